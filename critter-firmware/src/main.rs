//! Critter - Badge Creature Collection Firmware
//!
//! Main firmware binary for RP2040-based conference badges. Collect
//! creatures, browse them, and trade them with nearby badges over IR.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::flash::Flash;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::UART1;
use embassy_rp::spi::{Config as SpiConfig, Spi};
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use embassy_time::Delay;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use critter_core::CreatureId;

use crate::board::storage;
use crate::board::{BadgeIdentity, S6b33};

mod board;
mod channels;
mod config;
mod tasks;

bind_interrupts!(struct Irqs {
    UART1_IRQ => BufferedInterruptHandler<UART1>;
});

/// IR link speed
const IR_BAUD: u32 = 9600;

/// Display SPI clock
const DISPLAY_SPI_HZ: u32 = 20_000_000;

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 64]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Critter firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = config::load();

    // Flash: badge id, then the saved collection
    let mut flash = Flash::new(p.FLASH, p.DMA_CH0);
    let identity = BadgeIdentity::read(&mut flash);
    storage::load(
        &mut flash,
        CreatureId::all().map(|id| id.creature().storage_key()),
    )
    .await;

    // Display on SPI0
    let mut spi_config = SpiConfig::default();
    spi_config.frequency = DISPLAY_SPI_HZ;
    let spi = Spi::new_blocking_txonly(p.SPI0, p.PIN_18, p.PIN_19, spi_config);
    let mut panel = S6b33::new(
        spi,
        Output::new(p.PIN_17, Level::High),
        Output::new(p.PIN_16, Level::Low),
        Output::new(p.PIN_20, Level::High),
    );
    match panel.init(&mut Delay) {
        Ok(()) => info!("Display initialized"),
        Err(e) => error!("Display init failed: {}", e),
    }

    // IR transceiver on UART1
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = IR_BAUD;

    let tx_buf = TX_BUF.init([0u8; 64]);
    let rx_buf = RX_BUF.init([0u8; 64]);

    let uart = Uart::new_blocking(p.UART1, p.PIN_4, p.PIN_5, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (ir_tx, ir_rx) = uart.split();

    info!("UART initialized for IR");

    // Buttons in Button::ALL order: Up, Down, Left, Right, A, B, encoder switches
    let buttons = [
        Input::new(p.PIN_8, Pull::Up),
        Input::new(p.PIN_9, Pull::Up),
        Input::new(p.PIN_10, Pull::Up),
        Input::new(p.PIN_11, Pull::Up),
        Input::new(p.PIN_12, Pull::Up),
        Input::new(p.PIN_13, Pull::Up),
        Input::new(p.PIN_14, Pull::Up),
        Input::new(p.PIN_15, Pull::Up),
    ];
    let left_a = Input::new(p.PIN_21, Pull::Up);
    let left_b = Input::new(p.PIN_22, Pull::Up);
    let right_a = Input::new(p.PIN_26, Pull::Up);
    let right_b = Input::new(p.PIN_27, Pull::Up);

    let beeper = Output::new(p.PIN_3, Level::Low);

    // Spawn tasks
    spawner.spawn(tasks::storage_task(flash)).unwrap();
    spawner.spawn(tasks::ir_rx_task(ir_rx)).unwrap();
    spawner.spawn(tasks::ir_tx_task(ir_tx)).unwrap();
    spawner.spawn(tasks::beeper_task(beeper)).unwrap();
    spawner.spawn(tasks::buttons_task(buttons)).unwrap();
    spawner.spawn(tasks::encoder_task(0, left_a, left_b)).unwrap();
    spawner.spawn(tasks::encoder_task(1, right_a, right_b)).unwrap();
    spawner
        .spawn(tasks::frame_task(panel, identity, config))
        .unwrap();

    info!("All tasks spawned, firmware running");

    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
