//! Rotating motivational line shown above the task list.

use rand::seq::SliceRandom;
use rand::Rng;

const MORNING: &[&str] = &[
    "Rise and shine! Ready to conquer today's tasks?",
    "Good morning! Let's make today productive!",
    "Morning! Your tasks are waiting for you!",
];

const AFTERNOON: &[&str] = &[
    "Keeping the momentum going!",
    "Stay focused, stay productive!",
    "You're doing great! Keep pushing forward!",
];

const EVENING: &[&str] = &[
    "Wrapping up for the day?",
    "Time to review your accomplishments!",
    "Another productive day almost done!",
];

const QUOTES: &[&str] = &[
    "Small progress is still progress!",
    "Your future self will thank you!",
    "You've got this!",
    "Focus on progress, not perfection!",
    "Every task completed is a step forward!",
];

/// Return the time-of-day lines for the hour (0-23).
///
pub fn lines_for_hour(hour: u32) -> &'static [&'static str] {
    if hour < 12 {
        MORNING
    } else if hour < 17 {
        AFTERNOON
    } else {
        EVENING
    }
}

/// Pick a line from the time-of-day lines and the general quotes.
///
pub fn pick_line<R: Rng + ?Sized>(hour: u32, rng: &mut R) -> &'static str {
    let pool: Vec<&'static str> = lines_for_hour(hour)
        .iter()
        .chain(QUOTES.iter())
        .copied()
        .collect();
    pool.choose(rng).copied().unwrap_or(QUOTES[0])
}
