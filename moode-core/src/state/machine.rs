//! Power state definition

use super::events::Event;
use crate::config::{ACTIVE_POLL_MS, SLEEP_POLL_MS};

/// Display power states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Backlight on, polling at the active rate
    #[default]
    Active,
    /// Backlight off, polling at the sleep rate
    Sleeping,
}

impl State {
    /// Check if the backlight should be lit
    pub fn display_on(&self) -> bool {
        matches!(self, State::Active)
    }

    /// Delay before the next poll
    pub fn poll_interval_ms(&self) -> u64 {
        match self {
            State::Active => ACTIVE_POLL_MS,
            State::Sleeping => SLEEP_POLL_MS,
        }
    }

    /// Process an event and return the state the tick settles in
    ///
    /// Failures and stops show a notice while awake and then sleep, so
    /// both end in `Sleeping` whatever the starting state.
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use State::*;

        match (self, event) {
            // Active transitions
            (Active, Playback) => Active,
            (Active, FetchFailed) => Sleeping,
            (Active, Stopped) => Sleeping,

            // Sleeping transitions
            (Sleeping, Playback) => Active,
            (Sleeping, FetchFailed) => Sleeping,
            (Sleeping, Stopped) => Sleeping,
        }
    }
}
