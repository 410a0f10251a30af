//! moOde Display - Now-Playing Panel Firmware
//!
//! Firmware for a Raspberry Pi Pico W with a Pimoroni Pico Display Pack
//! 2.8". Polls a moOde audio player over Wi-Fi and shows what is playing,
//! turning the backlight off while playback is stopped.
//!
//! Boot sequence:
//!
//! 1. panel up, welcome screen
//! 2. Wi-Fi join and DHCP (20 s window, fatal on failure)
//! 3. "WIFI Connected" screen
//! 4. poll task takes over

#![no_std]
#![no_main]

extern crate alloc;

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::PIO0;
use embassy_rp::pio::{InterruptHandler as PioInterruptHandler, Pio};
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_rp::spi::{Config as SpiConfig, Spi};
use embassy_time::Delay;
use embedded_alloc::LlffHeap as Heap;
use static_cell::{ConstStaticCell, StaticCell};
use {defmt_rtt as _, panic_probe as _};

use cyw43_pio::{PioSpi, DEFAULT_CLOCK_DIVIDER};
use embassy_net::StackResources;

use moode_core::{DisplayStateMachine, StatusFetcher};

use crate::display::{Backlight, FrameBuffer, PanelDisplay, St7789, FRAME_BYTES};
use crate::error::FatalError;
use crate::net::TcpConnector;

mod config;
mod display;
mod error;
mod net;
mod tasks;

// Heap allocator for the response buffer and parsed strings
#[global_allocator]
static HEAP: Heap = Heap::empty();

// Heap size: 48KB
const HEAP_SIZE: usize = 48 * 1024;

/// ST7789 SPI clock
const PANEL_SPI_HZ: u32 = 62_500_000;

/// Seed for the IP stack's port and sequence numbers
const NET_SEED: u64 = 0x6d6f_6f64_6520_6469;

bind_interrupts!(struct Irqs {
    PIO0_IRQ_0 => PioInterruptHandler<PIO0>;
});

// Frame buffer lives in .bss, never on the stack
static FRAMEBUFFER: ConstStaticCell<[u8; FRAME_BYTES]> = ConstStaticCell::new([0; FRAME_BYTES]);

// Radio and stack state (must live forever for the runner tasks)
static CYW43_STATE: StaticCell<cyw43::State> = StaticCell::new();
static NET_RESOURCES: StaticCell<StackResources<3>> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("moOde display starting...");

    // Initialize heap allocator
    init_heap();

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Display Pack: SPI0 SCK=GP18 MOSI=GP19, CS=GP17, DC=GP16, backlight=GP20
    let mut spi_config = SpiConfig::default();
    spi_config.frequency = PANEL_SPI_HZ;
    let spi = Spi::new_blocking_txonly(p.SPI0, p.PIN_18, p.PIN_19, spi_config);
    let cs = Output::new(p.PIN_17, Level::High);
    let dc = Output::new(p.PIN_16, Level::Low);
    let backlight = Backlight::new(Pwm::new_output_a(
        p.PWM_SLICE2,
        p.PIN_20,
        PwmConfig::default(),
    ));

    let mut panel = St7789::new(spi, dc, cs);
    let panel_ready = panel.init(&mut Delay);
    let display = PanelDisplay::new(panel, FrameBuffer::new(FRAMEBUFFER.take()), backlight);
    let mut machine = DisplayStateMachine::new(display, Delay);

    if let Err(e) = panel_ready {
        error!("Panel init failed: {}", e);
        tasks::poll::halt(&mut machine, FatalError::PanelInit).await;
    }
    info!("Display initialized");

    if let Err(e) = machine.show_startup().await {
        tasks::poll::halt(&mut machine, e.into()).await;
    }

    // CYW43: power GP23, CS GP25, DIO GP24, CLK GP29 on PIO0
    let pwr = Output::new(p.PIN_23, Level::Low);
    let cs = Output::new(p.PIN_25, Level::High);
    let mut pio = Pio::new(p.PIO0, Irqs);
    let spi = PioSpi::new(
        &mut pio.common,
        pio.sm0,
        DEFAULT_CLOCK_DIVIDER,
        pio.irq0,
        cs,
        p.PIN_24,
        p.PIN_29,
        p.DMA_CH0,
    );

    let state = CYW43_STATE.init(cyw43::State::new());
    let (net_device, mut control, runner) = cyw43::new(state, pwr, spi, net::cyw43_firmware()).await;
    spawner.spawn(tasks::cyw43_task(runner)).unwrap();

    control.init(net::cyw43_clm()).await;
    control
        .set_power_management(cyw43::PowerManagementMode::PowerSave)
        .await;

    let (stack, runner) = embassy_net::new(
        net_device,
        embassy_net::Config::dhcpv4(Default::default()),
        NET_RESOURCES.init(StackResources::new()),
        NET_SEED,
    );
    spawner.spawn(tasks::net_task(runner)).unwrap();

    if let Err(e) = net::join(&mut control, stack, &config::NETWORK).await {
        tasks::poll::halt(&mut machine, e).await;
    }

    if let Err(e) = machine.show_wifi_connected().await {
        tasks::poll::halt(&mut machine, e.into()).await;
    }

    let fetcher = StatusFetcher::new(TcpConnector::new(stack), config::NETWORK.host);
    spawner.spawn(tasks::poll_task(fetcher, machine)).unwrap();
}

fn init_heap() {
    use core::mem::MaybeUninit;
    static mut HEAP_MEM: [MaybeUninit<u8>; HEAP_SIZE] = [MaybeUninit::uninit(); HEAP_SIZE];
    #[allow(static_mut_refs)]
    unsafe {
        HEAP.init(HEAP_MEM.as_ptr() as usize, HEAP_SIZE)
    }
}
