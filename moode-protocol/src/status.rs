//! Current-song status schema
//!
//! moOde reports every field as a JSON string. Only five keys matter to the
//! display; everything else in the object is ignored. Missing (or `null`)
//! keys get their defaults once, here, so render code never has to.

use alloc::string::String;

use serde::Deserialize;

/// Title shown when moOde omits one
pub const DEFAULT_TITLE: &str = "Unknown";

/// Artist shown when moOde omits one
pub const DEFAULT_ARTIST: &str = "Unknown Artist";

/// Playback state as reported by moOde's `state` key
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// `stop` or `stopped` (also used when the key is missing)
    #[default]
    Stopped,
    /// Exactly `pause`
    Paused,
    /// Any other value, normally `play`; the raw value is kept. This
    /// includes `paused`, which moOde never sends for a paused player
    Playing(String),
}

impl PlaybackState {
    /// Classify a raw `state` value
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "stop" | "stopped" => PlaybackState::Stopped,
            "pause" => PlaybackState::Paused,
            other => PlaybackState::Playing(String::from(other)),
        }
    }

    /// Check if playback is stopped
    pub fn is_stopped(&self) -> bool {
        matches!(self, PlaybackState::Stopped)
    }

    /// Check if playback is paused
    pub fn is_paused(&self) -> bool {
        matches!(self, PlaybackState::Paused)
    }

    /// Raw-ish label for logging
    pub fn as_str(&self) -> &str {
        match self {
            PlaybackState::Stopped => "stop",
            PlaybackState::Paused => "pause",
            PlaybackState::Playing(raw) => raw.as_str(),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for PlaybackState {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{}", self.as_str());
    }
}

/// Parsed `get_currentsong` response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongStatus {
    /// Playback state
    pub state: PlaybackState,
    /// Track title (or stream title for radio)
    pub title: String,
    /// Artist; moOde reports `"Radio station"` for radio streams
    pub artist: String,
    /// Album; holds the station name for radio streams
    pub album: String,
    /// Bitrate label such as `"320 kbps"`, empty if unknown
    pub bitrate: String,
}

/// Wire form: five optional strings, unknown keys ignored
#[derive(Deserialize, Default)]
struct RawSongStatus {
    state: Option<String>,
    title: Option<String>,
    artist: Option<String>,
    album: Option<String>,
    bitrate: Option<String>,
}

impl From<RawSongStatus> for SongStatus {
    fn from(raw: RawSongStatus) -> Self {
        Self {
            state: raw
                .state
                .as_deref()
                .map(PlaybackState::from_raw)
                .unwrap_or_default(),
            title: raw.title.unwrap_or_else(|| String::from(DEFAULT_TITLE)),
            artist: raw.artist.unwrap_or_else(|| String::from(DEFAULT_ARTIST)),
            album: raw.album.unwrap_or_default(),
            bitrate: raw.bitrate.unwrap_or_default(),
        }
    }
}

impl Default for SongStatus {
    /// Status with every field absent
    fn default() -> Self {
        RawSongStatus::default().into()
    }
}

impl SongStatus {
    /// Parse a single JSON object into a status, applying defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<RawSongStatus>(json).map(Self::from)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for SongStatus {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "SongStatus(state={}, title={}, artist={}, album={}, bitrate={})",
            self.state,
            self.title.as_str(),
            self.artist.as_str(),
            self.album.as_str(),
            self.bitrate.as_str()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_status() {
        let status = SongStatus::from_json(
            r#"{"state":"play","title":"Teardrop","artist":"Massive Attack","album":"Mezzanine","bitrate":"1.411 Mbps"}"#,
        )
        .unwrap();

        assert_eq!(status.state, PlaybackState::Playing(String::from("play")));
        assert_eq!(status.title, "Teardrop");
        assert_eq!(status.artist, "Massive Attack");
        assert_eq!(status.album, "Mezzanine");
        assert_eq!(status.bitrate, "1.411 Mbps");
    }

    #[test]
    fn test_defaults_for_missing_keys() {
        let status = SongStatus::from_json("{}").unwrap();

        assert_eq!(status.state, PlaybackState::Stopped);
        assert_eq!(status.title, DEFAULT_TITLE);
        assert_eq!(status.artist, DEFAULT_ARTIST);
        assert!(status.album.is_empty());
        assert!(status.bitrate.is_empty());
    }

    #[test]
    fn test_null_values_take_defaults() {
        let status = SongStatus::from_json(r#"{"title":null,"state":null}"#).unwrap();
        assert_eq!(status.title, DEFAULT_TITLE);
        assert_eq!(status.state, PlaybackState::Stopped);
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let status = SongStatus::from_json(
            r#"{"file":"NAS/a.flac","encoded":"FLAC 16/44.1 kHz","volume":"35","state":"pause"}"#,
        )
        .unwrap();
        assert_eq!(status.state, PlaybackState::Paused);
    }

    #[test]
    fn test_escaped_strings_are_unescaped() {
        let status = SongStatus::from_json(r#"{"artist":"AC\/DC","title":"Café"}"#).unwrap();
        assert_eq!(status.artist, "AC/DC");
        assert_eq!(status.title, "Café");
    }

    #[test]
    fn test_state_classification() {
        assert!(PlaybackState::from_raw("stop").is_stopped());
        assert!(PlaybackState::from_raw("stopped").is_stopped());
        assert!(PlaybackState::from_raw("pause").is_paused());
        assert_eq!(
            PlaybackState::from_raw("paused"),
            PlaybackState::Playing(String::from("paused"))
        );
        assert_eq!(
            PlaybackState::from_raw("play"),
            PlaybackState::Playing(String::from("play"))
        );
        assert_eq!(PlaybackState::from_raw("play").as_str(), "play");
    }

    #[test]
    fn test_rejects_non_object_and_bad_json() {
        assert!(SongStatus::from_json("[1,2]").is_err());
        assert!(SongStatus::from_json("{\"state\":").is_err());
        assert!(SongStatus::from_json(r#"{"state":1}"#).is_err());
    }
}
