//! Poll task
//!
//! Fetch, render, sleep; forever. Cadence follows the display power state:
//! 5 s while awake, 15 s while asleep.

use core::convert::Infallible;

use defmt::*;
use embassy_time::{Delay, Timer};

use moode_core::{DisplayStateMachine, StatusFetcher};

use crate::display::PicoDisplay;
use crate::error::FatalError;
use crate::net::TcpConnector;

pub type Fetcher = StatusFetcher<'static, TcpConnector<'static>>;
pub type Machine = DisplayStateMachine<PicoDisplay, Delay>;

/// Poll task - runs until a display error, then shows it and parks
#[embassy_executor::task]
pub async fn poll_task(mut fetcher: Fetcher, mut machine: Machine) {
    info!("Polling moOde at {}", fetcher.host());

    let error = match run(&mut fetcher, &mut machine).await {
        Ok(never) => match never {},
        Err(e) => e,
    };
    halt(&mut machine, error).await
}

async fn run(fetcher: &mut Fetcher, machine: &mut Machine) -> Result<Infallible, FatalError> {
    loop {
        let fetched = fetcher.fetch().await;
        match &fetched {
            Ok(status) => debug!("Fetched {}", status),
            Err(e) => warn!("Fetch failed: {}", e.as_str()),
        }

        let was_state = machine.state();
        let was_playback = machine.last_playback().cloned();

        machine.render(fetched.as_ref().ok()).await?;

        if let Some(playback) = machine.last_playback() {
            if was_playback.as_ref() != Some(playback) {
                info!("Playback state: {}", playback);
            }
        }
        if machine.state() != was_state {
            debug!("Display {}", machine.state());
        }

        Timer::after_millis(machine.poll_interval_ms()).await;
    }
}

/// Show `error` on the panel and never return
pub async fn halt(machine: &mut Machine, error: FatalError) -> ! {
    error!("Fatal: {}", error.as_str());

    if let Err(e) = machine.show_fatal(error.as_str()) {
        error!("Could not show error screen: {}", e.as_str());
    }

    loop {
        Timer::after_secs(3600).await;
    }
}
