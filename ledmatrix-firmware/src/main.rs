//! Ledmatrix - Chained LED Matrix Firmware
//!
//! Main firmware binary for RP2040 boards driving a daisy chain of MAX7219
//! 8x8 LED modules. Shows a boot text, then applies text and brightness
//! commands received over a UART bridge.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::UART0;
use embassy_rp::spi::{self, Spi};
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use ledmatrix_display::MatrixController;
use ledmatrix_drivers::max7219::Max7219Chain;
use ledmatrix_hal_rp2040::Rp2040SpiBus;

mod channels;
mod config;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 16]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Ledmatrix firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let display_config = config::display_config();

    // SPI0 transmit-only: GP18 clock, GP19 data, GP17 chip select.
    // The chain driver applies the configured clock during init.
    let spi = Spi::new_blocking_txonly(p.SPI0, p.PIN_18, p.PIN_19, spi::Config::default());
    let cs = Output::new(p.PIN_17, Level::High);
    let bus = Rp2040SpiBus::new(spi, cs);

    let mut chain: tasks::Chain = Max7219Chain::new(bus, config::chain_config(&display_config));
    match chain.init() {
        Ok(()) => info!(
            "MAX7219 chain initialized: {} modules, intensity {}",
            config::MODULE_COUNT,
            display_config.intensity.value()
        ),
        // Keep going: the display task still drains commands and logs failures
        Err(e) => error!("MAX7219 chain init failed: {:?}", e),
    }

    let mut display = MatrixController::new(chain);
    if display.show_text(&display_config.boot_text) {
        info!("Boot text shown");
    } else {
        warn!("Failed to show boot text");
    }

    // Setup UART for the remote command bridge
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = config::LINK_BAUDRATE;

    let tx_buf = TX_BUF.init([0u8; 16]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    // Commands are one-way, nothing is sent back
    let (_tx, rx) = uart.split();

    spawner.spawn(tasks::remote_rx_task(rx)).unwrap();
    spawner.spawn(tasks::display_task(display)).unwrap();

    info!("All tasks spawned, firmware running");
}
