//! Field validation rules shared by the sign-in, registration and task forms.

use log::*;
use regex::Regex;
use std::sync::OnceLock;

/// Minimum password length accepted at registration.
///
pub const MIN_PASSWORD_LEN: usize = 6;

fn email_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| match Regex::new(r"\S+@\S+\.\S+") {
            Ok(re) => Some(re),
            Err(e) => {
                warn!("Failed to compile email pattern: {}", e);
                None
            }
        })
        .as_ref()
}

/// Return whether the text looks like an email address.
///
pub fn is_valid_email(text: &str) -> bool {
    email_pattern().map(|re| re.is_match(text)).unwrap_or(false)
}

/// Return whether the text has any non-whitespace character.
///
pub fn is_filled(text: &str) -> bool {
    !text.trim().is_empty()
}
