//! W5500 driver and IP stack runners (core0)

use embassy_net_wiznet::chip::W5500;
use embassy_net_wiznet::Device;
use embassy_rp::gpio::{Input, Output};
use embassy_rp::peripherals::SPI0;
use embassy_rp::spi::{Async, Spi};
use embassy_time::{Delay, Duration, Timer};
use embedded_hal_async::spi::{ErrorType, Operation, SpiDevice};
use embedded_hal_bus::spi::ExclusiveDevice;

/// W5500 on SPI0 with its own chip select
pub type EthernetSpi = ExclusiveDevice<Spi<'static, SPI0, Async>, Output<'static>, Delay>;

/// VERSIONR of every W5500
pub const W5500_VERSION: u8 = 0x04;

/// VERSIONR address in the common register block
const VERSIONR: u16 = 0x0039;

/// Common block, read, variable length
const COMMON_READ: u8 = 0x00;

/// Hold RSTn low, then wait for the PLL to lock
pub async fn reset_chip(reset: &mut Output<'static>) {
    reset.set_low();
    Timer::after(Duration::from_millis(1)).await;
    reset.set_high();
    Timer::after(Duration::from_millis(10)).await;
}

/// Read the chip version register
///
/// A missing or unpowered module reads back 0x00 or 0xFF.
pub async fn chip_version(spi: &mut EthernetSpi) -> Result<u8, <EthernetSpi as ErrorType>::Error> {
    let [hi, lo] = VERSIONR.to_be_bytes();
    let mut version = [0u8];
    spi.transaction(&mut [
        Operation::Write(&[hi, lo, COMMON_READ]),
        Operation::Read(&mut version),
    ])
    .await?;
    Ok(version[0])
}

/// W5500 MACRAW frame pump
#[embassy_executor::task]
pub async fn ethernet_task(
    runner: embassy_net_wiznet::Runner<'static, W5500, EthernetSpi, Input<'static>, Output<'static>>,
) -> ! {
    runner.run().await
}

/// smoltcp stack, DHCP client included
#[embassy_executor::task]
pub async fn net_stack_task(mut runner: embassy_net::Runner<'static, Device<'static>>) -> ! {
    runner.run().await
}
