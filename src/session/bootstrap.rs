use super::{Session, SessionStore};
use log::*;
use std::time::Duration;

/// Launch-time routing decision.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BootstrapState {
    Checking,
    Authenticated(Session),
    Unauthenticated,
}

impl BootstrapState {
    pub fn is_resolved(&self) -> bool {
        !matches!(self, BootstrapState::Checking)
    }
}

/// Decides once per launch whether a persisted session exists.
///
#[derive(Debug)]
pub struct Bootstrap {
    state: BootstrapState,
}

impl Default for Bootstrap {
    fn default() -> Self {
        Bootstrap::new()
    }
}

impl Bootstrap {
    pub fn new() -> Self {
        Bootstrap {
            state: BootstrapState::Checking,
        }
    }

    pub fn state(&self) -> &BootstrapState {
        &self.state
    }

    /// Restore the persisted session and leave the checking state. Once
    /// resolved, further calls return the same outcome.
    ///
    pub fn resolve(&mut self, sessions: &SessionStore) -> &BootstrapState {
        if self.state.is_resolved() {
            debug!("Bootstrap already resolved; ignoring repeated check.");
            return &self.state;
        }
        self.state = match sessions.restore() {
            Some(session) => {
                info!("Restored session for {}.", session.email);
                BootstrapState::Authenticated(session)
            }
            None => {
                info!("No persisted session; routing to sign in.");
                BootstrapState::Unauthenticated
            }
        };
        &self.state
    }

    /// Wait out the splash delay, then resolve.
    ///
    pub async fn run(&mut self, sessions: &SessionStore, delay: Duration) -> &BootstrapState {
        tokio::time::sleep(delay).await;
        self.resolve(sessions)
    }
}
