//! Display controller
//!
//! Decides, once per poll tick, what the panel shows and whether the
//! backlight is on. Per-tick outcomes:
//!
//! | Fetch result        | Screen                      | Ends in    |
//! |---------------------|-----------------------------|------------|
//! | failed              | "No connection" for 2 s     | `Sleeping` |
//! | stopped (new)       | "STOPPED" for 3 s           | `Sleeping` |
//! | stopped (repeat)    | nothing                     | `Sleeping` |
//! | playing or paused   | now-playing layout          | `Active`   |

use embedded_hal_async::delay::DelayNs;
use moode_display::{screen, DisplayBackend, DisplayError};
use moode_protocol::{PlaybackState, SongStatus};

use crate::config::{AWAKE_BRIGHTNESS, NO_CONNECTION_DWELL_MS, SPLASH_MS, STOPPED_DWELL_MS};
use crate::state::{Event, State};

/// Display state machine
///
/// Owns the panel and the dwell timer, and carries everything that must
/// survive between ticks: power state and the last status seen.
pub struct DisplayStateMachine<D, T> {
    display: D,
    delay: T,
    state: State,
    last_playback: Option<PlaybackState>,
    last_status: Option<SongStatus>,
}

impl<D: DisplayBackend, T: DelayNs> DisplayStateMachine<D, T> {
    /// Create a controller in the `Active` state
    ///
    /// No display I/O happens until the first screen is shown.
    pub fn new(display: D, delay: T) -> Self {
        Self {
            display,
            delay,
            state: State::Active,
            last_playback: None,
            last_status: None,
        }
    }

    /// Current power state
    pub fn state(&self) -> State {
        self.state
    }

    /// Delay before the next poll, chosen by the power state
    pub fn poll_interval_ms(&self) -> u64 {
        self.state.poll_interval_ms()
    }

    /// Playback state recorded on the last successful tick
    pub fn last_playback(&self) -> Option<&PlaybackState> {
        self.last_playback.as_ref()
    }

    /// Last status drawn as now-playing
    pub fn last_status(&self) -> Option<&SongStatus> {
        self.last_status.as_ref()
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    /// Light the backlight and hold the welcome screen
    pub async fn show_startup(&mut self) -> Result<(), DisplayError> {
        self.display.set_backlight(AWAKE_BRIGHTNESS)?;
        self.state = State::Active;
        screen::draw_startup(&mut self.display)?;
        self.delay.delay_ms(SPLASH_MS).await;
        Ok(())
    }

    /// Hold the Wi-Fi connected screen
    pub async fn show_wifi_connected(&mut self) -> Result<(), DisplayError> {
        self.wake()?;
        screen::draw_wifi_connected(&mut self.display)?;
        self.delay.delay_ms(SPLASH_MS).await;
        Ok(())
    }

    /// Show the fatal error screen, awake
    pub fn show_fatal(&mut self, message: &str) -> Result<(), DisplayError> {
        self.wake()?;
        screen::draw_error(&mut self.display, message)
    }

    /// Handle one poll result
    ///
    /// `None` means the fetch failed. The last observed status is only
    /// updated by successful fetches.
    pub async fn render(&mut self, status: Option<&SongStatus>) -> Result<(), DisplayError> {
        let event = Event::from_status(status);

        match status {
            None => {
                self.wake()?;
                screen::draw_no_connection(&mut self.display)?;
                self.delay.delay_ms(NO_CONNECTION_DWELL_MS).await;
            }
            Some(status) if status.state.is_stopped() => {
                let was_stopped = self
                    .last_playback
                    .as_ref()
                    .is_some_and(PlaybackState::is_stopped);

                if !was_stopped {
                    self.wake()?;
                    screen::draw_stopped(&mut self.display)?;
                    self.delay.delay_ms(STOPPED_DWELL_MS).await;
                }
                self.last_playback = Some(status.state.clone());
            }
            Some(status) => {
                self.wake()?;
                screen::draw_now_playing(&mut self.display, status)?;
                self.last_playback = Some(status.state.clone());
                self.last_status = Some(status.clone());
            }
        }

        self.enter(self.state.transition(event))
    }

    /// Turn the backlight off; no-op when already asleep
    ///
    /// The frame is left as it is.
    pub fn sleep(&mut self) -> Result<(), DisplayError> {
        if self.state == State::Sleeping {
            return Ok(());
        }
        self.display.set_backlight(0.0)?;
        self.state = State::Sleeping;
        Ok(())
    }

    /// Restore the backlight; no-op when already awake
    pub fn wake(&mut self) -> Result<(), DisplayError> {
        if self.state == State::Active {
            return Ok(());
        }
        self.display.set_backlight(AWAKE_BRIGHTNESS)?;
        self.state = State::Active;
        Ok(())
    }

    fn enter(&mut self, next: State) -> Result<(), DisplayError> {
        match next {
            State::Active => self.wake(),
            State::Sleeping => self.sleep(),
        }
    }

    /// Release the panel and timer
    pub fn into_parts(self) -> (D, T) {
        (self.display, self.delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::mock::{ok_response, MockConnector, MockPeer};
    use crate::fetch::StatusFetcher;
    use embassy_futures::block_on;
    use embedded_io_async::ErrorKind;
    use moode_display::testing::{DrawOp, RecordingDisplay};
    use moode_display::Pen;

    /// Delay that returns at once and records requested milliseconds
    #[derive(Default)]
    struct RecordingDelay {
        waits_ms: Vec<u32>,
    }

    impl DelayNs for RecordingDelay {
        async fn delay_ns(&mut self, _ns: u32) {}

        async fn delay_ms(&mut self, ms: u32) {
            self.waits_ms.push(ms);
        }
    }

    type Machine = DisplayStateMachine<RecordingDisplay, RecordingDelay>;

    fn machine() -> Machine {
        DisplayStateMachine::new(RecordingDisplay::new(), RecordingDelay::default())
    }

    fn status(state: &str, title: &str) -> SongStatus {
        SongStatus {
            state: PlaybackState::from_raw(state),
            title: title.into(),
            artist: "Portishead".into(),
            album: "Dummy".into(),
            bitrate: "".into(),
        }
    }

    fn stopped_flashes(machine: &Machine) -> usize {
        machine
            .display()
            .texts()
            .iter()
            .filter(|t| **t == "STOPPED")
            .count()
    }

    #[test]
    fn test_single_stopped_flash() {
        let mut m = machine();
        let ticks = [
            status("play", "Roads"),
            status("stop", "Roads"),
            status("stop", "Roads"),
            status("play", "Glory Box"),
        ];

        for tick in &ticks {
            block_on(m.render(Some(tick))).unwrap();
        }

        assert_eq!(stopped_flashes(&m), 1);
        assert_eq!(m.display().backlight_levels(), [0.0, AWAKE_BRIGHTNESS]);
        assert_eq!(m.delay.waits_ms, [STOPPED_DWELL_MS]);
        assert_eq!(m.state(), State::Active);
        assert_eq!(m.last_status().map(|s| s.title.as_str()), Some("Glory Box"));
    }

    #[test]
    fn test_first_tick_stopped_flashes() {
        let mut m = machine();
        block_on(m.render(Some(&status("stop", "")))).unwrap();

        assert_eq!(stopped_flashes(&m), 1);
        assert_eq!(
            m.display().find_text("STOPPED"),
            Some(&DrawOp::text("STOPPED", 10, 200, 3, Pen::ORANGE))
        );
        assert_eq!(m.state(), State::Sleeping);
        assert_eq!(m.poll_interval_ms(), 15_000);
        assert_eq!(m.last_status(), None);
    }

    #[test]
    fn test_repeat_stop_does_no_display_io() {
        let mut m = machine();
        block_on(m.render(Some(&status("stop", "")))).unwrap();
        m.display_mut().reset();

        block_on(m.render(Some(&status("stopped", "")))).unwrap();
        assert!(m.display().ops().is_empty());
    }

    #[test]
    fn test_sleep_and_wake_are_idempotent() {
        let mut m = machine();

        m.sleep().unwrap();
        m.sleep().unwrap();
        assert_eq!(m.display().backlight_levels(), [0.0]);

        m.wake().unwrap();
        m.wake().unwrap();
        assert_eq!(m.display().backlight_levels(), [0.0, AWAKE_BRIGHTNESS]);
    }

    #[test]
    fn test_sleep_does_not_redraw() {
        let mut m = machine();
        m.sleep().unwrap();
        assert_eq!(m.display().ops(), [DrawOp::Backlight(0.0)]);
    }

    #[test]
    fn test_fetch_failure_while_asleep() {
        let mut m = machine();
        block_on(m.render(Some(&status("play", "Sour Times")))).unwrap();
        m.sleep().unwrap();
        m.display_mut().reset();

        block_on(m.render(None)).unwrap();

        assert_eq!(m.display().texts(), ["No connection", "to Moode"]);
        assert_eq!(m.display().backlight_levels(), [AWAKE_BRIGHTNESS, 0.0]);
        assert_eq!(m.delay.waits_ms, [NO_CONNECTION_DWELL_MS]);
        assert_eq!(m.state(), State::Sleeping);
        // Failures leave the last observation alone
        assert_eq!(
            m.last_playback(),
            Some(&PlaybackState::Playing("play".into()))
        );
    }

    #[test]
    fn test_paused_after_stop_wakes() {
        let mut m = machine();
        block_on(m.render(Some(&status("stop", "")))).unwrap();
        block_on(m.render(Some(&status("pause", "Numb")))).unwrap();

        assert_eq!(m.state(), State::Active);
        assert_eq!(
            m.display().find_text("PAUSED"),
            Some(&DrawOp::text("PAUSED", 10, 200, 2, Pen::YELLOW))
        );
    }

    #[test]
    fn test_timed_out_fetch_shows_no_connection_and_sleeps() {
        let mut peer = MockPeer::default();
        peer.chunks.push_back(Err(ErrorKind::TimedOut));
        let mut fetcher = StatusFetcher::new(MockConnector::new(peer), "192.168.1.50");
        let mut m = machine();

        block_on(async {
            let status = fetcher.fetch().await;
            assert!(status.is_err());
            m.render(status.as_ref().ok()).await.unwrap();
        });

        assert_eq!(m.display().texts(), ["No connection", "to Moode"]);
        assert_eq!(m.state(), State::Sleeping);
    }

    #[test]
    fn test_radio_stream_end_to_end() {
        let json = r#"{"state":"play","title":"BBC Radio 1","artist":"Radio station","album":"BBC Radio 1","bitrate":"320kbps"}"#;
        let peer = MockPeer::sending(&ok_response(json));
        let mut fetcher = StatusFetcher::new(MockConnector::new(peer), "192.168.1.50");
        let mut m = machine();

        block_on(async {
            let status = fetcher.fetch().await;
            m.render(status.as_ref().ok()).await.unwrap();
        });

        let display = m.display();
        assert_eq!(
            display.texts(),
            ["BBC Radio 1", "Listening to", "Radio", "PLAYING", "320kbps"]
        );
        assert_eq!(
            display.find_text("320kbps"),
            Some(&DrawOp::text("320kbps", 226, 200, 2, Pen::CYAN))
        );
        assert_eq!(display.update_count(), 1);
        assert_eq!(m.state(), State::Active);
    }

    #[test]
    fn test_display_failure_propagates() {
        let mut m = machine();
        m.display_mut().fail_updates = true;

        assert_eq!(
            block_on(m.render(Some(&status("play", "Mysterons")))),
            Err(DisplayError::Communication)
        );
    }

    #[test]
    fn test_splash_screens() {
        let mut m = machine();
        block_on(m.show_startup()).unwrap();
        block_on(m.show_wifi_connected()).unwrap();

        assert_eq!(
            m.display().texts(),
            ["Welcome to moode", "Starting...", "WIFI Connected", "Starting..."]
        );
        assert_eq!(m.display().backlight_levels(), [AWAKE_BRIGHTNESS]);
        assert_eq!(m.delay.waits_ms, [SPLASH_MS, SPLASH_MS]);
    }

    #[test]
    fn test_fatal_screen_wakes_display() {
        let mut m = machine();
        m.sleep().unwrap();
        m.show_fatal("WiFi connection timed out").unwrap();

        assert_eq!(m.display().texts(), ["ERROR:", "WiFi connection time"]);
        assert_eq!(m.state(), State::Active);
    }
}
