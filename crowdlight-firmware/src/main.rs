//! CrowdLight - E1.31 to HC-12 DMX transmitter
//!
//! Receives one sACN universe on a W5500 Ethernet module and re-broadcasts
//! the configured fixtures' channels over an HC-12 433 MHz radio.
//!
//! The RP2040's two cores split the work:
//! - core0: Ethernet, E1.31 validation, radio transmit, flash writes
//! - core1: OLED status display, buttons, on-device menu
//!
//! The cores share only the channel snapshot and the live configuration
//! (see `channels.rs`).

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::{Executor, Spawner};
use embassy_net::{Ipv4Address, Ipv4Cidr, StackResources, StaticConfigV4};
use embassy_rp::adc::{Adc, Channel as AdcChannel, Config as AdcConfig};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{Config as I2cConfig, I2c, InterruptHandler as I2cInterruptHandler};
use embassy_rp::multicore::{spawn_core1, Stack};
use embassy_rp::peripherals::{I2C1, UART0};
use embassy_rp::spi::{Config as SpiConfig, Spi};
use embassy_rp::uart::{BufferedInterruptHandler, BufferedUart, Config as UartConfig, Uart};
use embassy_time::{Delay, Duration, Instant, Timer};
use embedded_hal_bus::spi::ExclusiveDevice;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use crowdlight_core::config::DeviceConfig;
use crowdlight_core::retry::Backoff;
use crowdlight_hal_rp2040::adc::DieTemperature;
use crowdlight_hal_rp2040::flash::Rp2040FlashStorage;
use crowdlight_hal_rp2040::gpio::ButtonPin;

use crate::channels::{CONFIG_LOADED, LIVE_CONFIG};
use crate::config::ConfigPersistence;
use crate::display::Ssd1306;
use crate::tasks::ethernet::{chip_version, reset_chip, W5500_VERSION};
use crate::tasks::EthernetSpi;

mod board;
mod channels;
mod config;
mod display;
mod radio;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
    I2C1_IRQ => I2cInterruptHandler<I2C1>;
});

/// W5500 SPI clock
const ETHERNET_SPI_HZ: u32 = 50_000_000;

/// OLED I2C clock
const OLED_I2C_HZ: u32 = 400_000;

// Executors and core1 stack (must live forever)
static CORE1_STACK: StaticCell<Stack<8192>> = StaticCell::new();
static EXECUTOR0: StaticCell<Executor> = StaticCell::new();
static EXECUTOR1: StaticCell<Executor> = StaticCell::new();

// HC-12 UART buffers; TX holds one full frame
static RADIO_TX_BUF: StaticCell<[u8; 512]> = StaticCell::new();
static RADIO_RX_BUF: StaticCell<[u8; 64]> = StaticCell::new();

// Network driver and stack state
static ETHERNET_STATE: StaticCell<embassy_net_wiznet::State<8, 8>> = StaticCell::new();
static NET_RESOURCES: StaticCell<StackResources<3>> = StaticCell::new();

/// W5500 wiring handed to the boot task
struct EthernetParts {
    spi: EthernetSpi,
    int: Input<'static>,
    reset: Output<'static>,
}

/// Main entry point
#[cortex_m_rt::entry]
fn main() -> ! {
    info!("CrowdLight transmitter starting...");

    let p = embassy_rp::init(Default::default());

    // core1: OLED on I2C1 (SDA GP14, SCL GP15), buttons, die temperature
    let i2c1 = p.I2C1;
    let (oled_sda, oled_scl) = (p.PIN_14, p.PIN_15);
    let adc = p.ADC;
    let temp_sensor = p.ADC_TEMP_SENSOR;
    // ButtonEvent::ALL order: up, down, left, right, select
    let buttons = [
        ButtonPin::new(p.PIN_10.into()),
        ButtonPin::new(p.PIN_11.into()),
        ButtonPin::new(p.PIN_12.into()),
        ButtonPin::new(p.PIN_13.into()),
        ButtonPin::new(p.PIN_9.into()),
    ];

    spawn_core1(p.CORE1, CORE1_STACK.init(Stack::new()), move || {
        let executor1 = EXECUTOR1.init(Executor::new());
        executor1.run(|spawner| {
            let mut i2c_config = I2cConfig::default();
            i2c_config.frequency = OLED_I2C_HZ;
            let i2c = I2c::new_async(i2c1, oled_scl, oled_sda, Irqs, i2c_config);

            let adc = Adc::new_blocking(adc, AdcConfig::default());
            let sensor = DieTemperature::new(adc, AdcChannel::new_temp_sensor(temp_sensor));

            spawner.spawn(unwrap!(tasks::ui_task(Ssd1306::new(i2c), sensor)));
            spawner.spawn(unwrap!(tasks::buttons_task(buttons)));
        })
    });

    // core0: flash, HC-12 on UART0 (GP0/GP1, SET GP2), W5500 on SPI0
    let persistence = ConfigPersistence::new(Rp2040FlashStorage::new(p.FLASH, p.DMA_CH2));

    let mut uart_config = UartConfig::default();
    uart_config.baudrate = board::RADIO_BAUD;
    let radio_uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config).into_buffered(
        Irqs,
        RADIO_TX_BUF.init([0u8; 512]),
        RADIO_RX_BUF.init([0u8; 64]),
    );
    // SET high keeps the module in transparent mode until it is probed
    let radio_set = Output::new(p.PIN_2, Level::High);

    let mut spi_config = SpiConfig::default();
    spi_config.frequency = ETHERNET_SPI_HZ;
    let spi = Spi::new(
        p.SPI0, p.PIN_18, p.PIN_19, p.PIN_16, p.DMA_CH0, p.DMA_CH1, spi_config,
    );
    let cs = Output::new(p.PIN_17, Level::High);
    let spi = match ExclusiveDevice::new(spi, cs, Delay) {
        Ok(device) => device,
        Err(e) => match e {},
    };
    let ethernet = EthernetParts {
        spi,
        int: Input::new(p.PIN_21, Pull::Up),
        reset: Output::new(p.PIN_20, Level::High),
    };

    let executor0 = EXECUTOR0.init(Executor::new());
    executor0.run(move |spawner| {
        spawner.spawn(unwrap!(boot_task(
            spawner,
            persistence,
            radio_uart,
            radio_set,
            ethernet
        )));
    })
}

/// Load configuration, then bring up radio and network
///
/// The W5500 is reset and polled until it answers; until then the link
/// stays reported as down and the rest of the system runs normally.
#[embassy_executor::task]
async fn boot_task(
    spawner: Spawner,
    mut persistence: ConfigPersistence<Rp2040FlashStorage<'static>>,
    radio_uart: BufferedUart,
    radio_set: Output<'static>,
    ethernet: EthernetParts,
) {
    let config = persistence.load_or_default().await;
    LIVE_CONFIG.publish(config);
    CONFIG_LOADED.signal(config);

    spawner.spawn(unwrap!(tasks::config_save_task(persistence)));
    spawner.spawn(unwrap!(tasks::radio_tx_task(radio_uart, radio_set)));

    let EthernetParts {
        mut spi,
        int,
        mut reset,
    } = ethernet;
    let mut backoff = Backoff::new(board::RETRY_INITIAL_MS, board::RETRY_MAX_MS);
    loop {
        reset_chip(&mut reset).await;
        match chip_version(&mut spi).await {
            Ok(W5500_VERSION) => break,
            Ok(version) => warn!("W5500 not answering (version {=u8:#x})", version),
            Err(e) => warn!("W5500 SPI error: {:?}", Debug2Format(&e)),
        }
        let delay = backoff.next_delay();
        warn!("Retrying W5500 in {} ms", delay);
        Timer::after(Duration::from_millis(delay)).await;
    }
    info!("W5500 detected");

    let state = ETHERNET_STATE.init(embassy_net_wiznet::State::new());
    let (device, runner) =
        match embassy_net_wiznet::new(board::MAC_ADDRESS, state, spi, int, reset).await {
            Ok(parts) => parts,
            Err(e) => {
                // The driver consumed the wiring; start over from a clean boot
                error!("W5500 init failed after detection: {:?}", Debug2Format(&e));
                Timer::after(Duration::from_millis(board::RETRY_MAX_MS)).await;
                cortex_m::peripheral::SCB::sys_reset();
            }
        };
    spawner.spawn(unwrap!(tasks::ethernet_task(runner)));

    let (stack, net_runner) = embassy_net::new(
        device,
        net_config(&config),
        NET_RESOURCES.init(StackResources::new()),
        net_seed(&board::MAC_ADDRESS),
    );
    spawner.spawn(unwrap!(tasks::net_stack_task(net_runner)));
    spawner.spawn(unwrap!(tasks::network_task(stack)));

    info!("All tasks spawned, transmitter running");
}

/// DHCP or static /24, per the stored configuration
fn net_config(config: &DeviceConfig) -> embassy_net::Config {
    if config.use_dhcp() {
        info!("Network: DHCP");
        return embassy_net::Config::dhcpv4(Default::default());
    }

    let [a, b, c, d] = config.ip_octets();
    info!("Network: static {}.{}.{}.{}/24", a, b, c, d);
    embassy_net::Config::ipv4_static(StaticConfigV4 {
        address: Ipv4Cidr::new(Ipv4Address::new(a, b, c, d), 24),
        gateway: None,
        dns_servers: heapless::Vec::new(),
    })
}

/// Stack seed for local ports and DHCP transaction ids
fn net_seed(mac: &[u8; 6]) -> u64 {
    let mac = mac.iter().fold(0u64, |acc, &b| (acc << 8) | b as u64);
    mac ^ Instant::now().as_ticks().rotate_left(24)
}
