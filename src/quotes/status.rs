//! Transient status notifications
//!
//! One visible message at a time. A newer message replaces the current one,
//! and only the expiry scheduled for the visible message can hide it.

/// Current status message with a generation counter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusBoard {
    message: Option<String>,
    generation: u64,
}

impl StatusBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `message`, replacing whatever is visible
    ///
    /// Returns the generation to hand back to [`StatusBoard::expire`].
    pub fn post(&mut self, message: impl Into<String>) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.message = Some(message.into());
        self.generation
    }

    /// Hide the message if it is still the one posted as `generation`
    pub fn expire(&mut self, generation: u64) -> bool {
        if self.generation == generation && self.message.is_some() {
            self.message = None;
            true
        } else {
            false
        }
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}
