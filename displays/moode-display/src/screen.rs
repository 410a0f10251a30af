//! Screen rendering
//!
//! Builds the full-frame screens shown by the display. Every function clears
//! to black, draws, and commits the frame with `update`.
//!
//! Panel is 320x240; rows used by the now-playing layouts:
//!
//! ```text
//!  y=15  ┌ large top field, 2 lines, 25px pitch
//!  y=90  ├ middle field
//!  y=125 ├ album (file layout)
//!  y=200 └ PLAYING/PAUSED              bitrate
//! ```

use moode_protocol::SongStatus;

use crate::backend::{DisplayBackend, DisplayError};
use crate::pen::Pen;
use crate::wrap::wrap_text;

/// Artist value moOde reports for radio streams
pub const RADIO_ARTIST: &str = "Radio station";

/// Left margin for all layouts
const MARGIN_X: i32 = 10;

/// Vertical pitch between wrapped lines
const LINE_PITCH: i32 = 25;

/// Baseline row of the bottom status line
const STATUS_Y: i32 = 200;

/// Estimated glyph advance at scale 1
const CHAR_WIDTH: i32 = 6;

/// Longest error message shown on the fatal error screen
pub const ERROR_MESSAGE_CHARS: usize = 20;

/// Layout chosen for a now-playing status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NowPlayingLayout<'a> {
    /// Radio stream: station name on top, track title when moOde has one
    Radio {
        station: &'a str,
        track: Option<&'a str>,
    },
    /// Music file: title, artist, optional album
    File {
        title: &'a str,
        artist: &'a str,
        album: Option<&'a str>,
    },
}

impl<'a> NowPlayingLayout<'a> {
    /// Pick the layout for a status
    ///
    /// Radio is chosen when the artist is `"Radio station"` and a station
    /// name is present in the album field. A radio title is only shown when
    /// it says more than the station name does.
    pub fn select(status: &'a SongStatus) -> Self {
        if status.artist == RADIO_ARTIST && !status.album.is_empty() {
            let title = status.title.as_str();
            let has_track = title != RADIO_ARTIST
                && title != status.album
                && title.chars().count() > 3;

            NowPlayingLayout::Radio {
                station: status.album.as_str(),
                track: has_track.then_some(title),
            }
        } else {
            NowPlayingLayout::File {
                title: status.title.as_str(),
                artist: status.artist.as_str(),
                album: (!status.album.is_empty()).then_some(status.album.as_str()),
            }
        }
    }
}

/// Clear the frame to black and select `pen` for the following text
fn begin<D: DisplayBackend>(display: &mut D, pen: Pen) -> Result<(), DisplayError> {
    display.set_pen(Pen::BLACK);
    display.clear()?;
    display.set_pen(pen);
    Ok(())
}

/// Draw up to `max_lines` wrapped lines starting at `y`
fn draw_wrapped<D: DisplayBackend>(
    display: &mut D,
    text: &str,
    max_chars: usize,
    max_lines: usize,
    y: i32,
    scale: u8,
) -> Result<(), DisplayError> {
    let mut line_y = y;
    for line in wrap_text(text, max_chars).take(max_lines) {
        display.text(line, MARGIN_X, line_y, scale)?;
        line_y += LINE_PITCH;
    }
    Ok(())
}

/// Render the welcome screen shown while booting
pub fn draw_startup<D: DisplayBackend>(display: &mut D) -> Result<(), DisplayError> {
    begin(display, Pen::LIME)?;
    display.text("Welcome to moode", 20, 60, 3)?;
    display.text("Starting...", 20, 120, 2)?;
    display.update()
}

/// Render the Wi-Fi association success screen
pub fn draw_wifi_connected<D: DisplayBackend>(display: &mut D) -> Result<(), DisplayError> {
    begin(display, Pen::LIME)?;
    display.text("WIFI Connected", 20, 60, 3)?;
    display.text("Starting...", 20, 120, 2)?;
    display.update()
}

/// Render the fetch failure screen
pub fn draw_no_connection<D: DisplayBackend>(display: &mut D) -> Result<(), DisplayError> {
    begin(display, Pen::RED)?;
    display.text("No connection", 20, 80, 3)?;
    display.text("to Moode", 20, 120, 3)?;
    display.update()
}

/// Render the playback stopped notice (bottom left)
pub fn draw_stopped<D: DisplayBackend>(display: &mut D) -> Result<(), DisplayError> {
    begin(display, Pen::ORANGE)?;
    display.text("STOPPED", 10, STATUS_Y, 3)?;
    display.update()
}

/// Render the fatal error screen
///
/// `message` is cut to [`ERROR_MESSAGE_CHARS`] characters.
pub fn draw_error<D: DisplayBackend>(display: &mut D, message: &str) -> Result<(), DisplayError> {
    let cut = message
        .char_indices()
        .nth(ERROR_MESSAGE_CHARS)
        .map_or(message, |(index, _)| &message[..index]);

    begin(display, Pen::RED)?;
    display.text("ERROR:", 10, 10, 2)?;
    display.text(cut, 10, 40, 1)?;
    display.update()
}

/// Render the now-playing screen for `status`
pub fn draw_now_playing<D: DisplayBackend>(
    display: &mut D,
    status: &SongStatus,
) -> Result<(), DisplayError> {
    display.set_pen(Pen::BLACK);
    display.clear()?;

    match NowPlayingLayout::select(status) {
        NowPlayingLayout::Radio { station, track } => {
            display.set_pen(Pen::GREEN);
            draw_wrapped(display, station, 18, 2, 15, 3)?;

            match track {
                Some(track) => {
                    display.set_pen(Pen::WHITE);
                    draw_wrapped(display, track, 20, 3, 90, 3)?;
                }
                None => {
                    display.set_pen(Pen::CYAN);
                    display.text("Listening to", MARGIN_X, 90, 2)?;
                    display.text("Radio", MARGIN_X, 115, 4)?;
                }
            }
        }
        NowPlayingLayout::File {
            title,
            artist,
            album,
        } => {
            display.set_pen(Pen::WHITE);
            draw_wrapped(display, title, 18, 2, 15, 4)?;

            display.set_pen(Pen::GREEN);
            draw_wrapped(display, artist, 20, 1, 90, 3)?;

            if let Some(album) = album {
                display.set_pen(Pen::BLUE);
                draw_wrapped(display, album, 22, 1, 125, 2)?;
            }
        }
    }

    draw_status_line(display, status)?;
    display.update()
}

/// Playback state bottom left, bitrate right-aligned bottom right
fn draw_status_line<D: DisplayBackend>(
    display: &mut D,
    status: &SongStatus,
) -> Result<(), DisplayError> {
    if status.state.is_paused() {
        display.set_pen(Pen::YELLOW);
        display.text("PAUSED", MARGIN_X, STATUS_Y, 2)?;
    } else {
        display.set_pen(Pen::GREEN);
        display.text("PLAYING", MARGIN_X, STATUS_Y, 2)?;
    }

    if !status.bitrate.is_empty() {
        display.set_pen(Pen::CYAN);
        display.text(
            &status.bitrate,
            bitrate_x(display.dimensions().0, &status.bitrate),
            STATUS_Y,
            2,
        )?;
    }

    Ok(())
}

/// X position that right-aligns `bitrate` at scale 2 with a 10px margin
fn bitrate_x(width: u16, bitrate: &str) -> i32 {
    let chars = i32::try_from(bitrate.chars().count()).unwrap_or(i32::MAX);
    let text_width = chars.saturating_mul(CHAR_WIDTH * 2);
    i32::from(width)
        .saturating_sub(text_width)
        .saturating_sub(MARGIN_X)
}
