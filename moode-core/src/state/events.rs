//! Events that trigger power transitions

use moode_protocol::SongStatus;

/// Outcome of one poll tick, as seen by the power state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Status could not be fetched
    FetchFailed,
    /// moOde reports playback stopped
    Stopped,
    /// moOde reports playing or paused
    Playback,
}

impl Event {
    /// Classify a fetch result
    pub fn from_status(status: Option<&SongStatus>) -> Self {
        match status {
            None => Event::FetchFailed,
            Some(status) if status.state.is_stopped() => Event::Stopped,
            Some(_) => Event::Playback,
        }
    }
}
