//! Display and menu task (core1)
//!
//! Shows the boot splash, then runs the console: button presses drive the
//! menu, the slideshow advances on its timer, and every pass redraws the
//! OLED from the latest shared state.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_rp::i2c::{Async, I2c};
use embassy_rp::peripherals::I2C1;
use embassy_time::{Duration, Instant, Ticker, Timer};

use crowdlight_core::console::{Console, SensorReadings};
use crowdlight_display::{draw, DisplayBackend, Renderer};
use crowdlight_hal::TemperatureSensor;
use crowdlight_hal_rp2040::adc::DieTemperature;

use crate::board;
use crate::channels::{CHANNELS, CONFIG_LOADED, INPUT_CHANNEL, LIVE_CONFIG, SAVE_REQUEST};
use crate::display::Ssd1306;

/// OLED on I2C1
pub type Oled = Ssd1306<I2c<'static, I2C1, Async>>;

fn now_ms() -> u64 {
    Instant::now().as_millis()
}

/// Push a screen to the panel, logging only the first failure of a run
async fn show<B: DisplayBackend>(
    screen: &crowdlight_display::Screen,
    display: &mut B,
    healthy: &mut bool,
) {
    match draw(screen, display).await {
        Ok(()) => *healthy = true,
        Err(e) => {
            if *healthy {
                warn!("Display update failed: {:?}", e);
            }
            *healthy = false;
        }
    }
}

/// UI loop
#[embassy_executor::task]
pub async fn ui_task(mut display: Oled, mut sensor: DieTemperature<'static>) {
    info!("UI task started");

    let mut healthy = true;
    if let Err(e) = display.init().await {
        warn!("OLED init failed: {:?}", e);
        healthy = false;
    }

    let mut renderer = Renderer::new();
    show(renderer.render_boot(), &mut display, &mut healthy).await;
    Timer::after(Duration::from_millis(board::BOOT_SPLASH_MS)).await;

    let config = CONFIG_LOADED.wait().await;
    debug!("UI using universe {}, {} LEDs", config.universe(), config.num_leds());

    let mut console = Console::new(&CHANNELS, &LIVE_CONFIG, now_ms());
    let mut sensors = SensorReadings::default();
    let sensor_interval = Duration::from_millis(board::SENSOR_INTERVAL_MS);
    let mut next_sensor_read = Instant::now();
    let mut ticker = Ticker::every(Duration::from_millis(board::UI_TICK_MS));

    loop {
        if let Either::Second(event) = select(ticker.next(), INPUT_CHANNEL.receive()).await {
            if let Some(saved) = console.handle_button(event, now_ms()) {
                info!(
                    "Config committed: universe={}, leds={}",
                    saved.universe(), saved.num_leds()
                );
                SAVE_REQUEST.signal(saved);
            }
        }

        let now = Instant::now();
        if now >= next_sensor_read {
            sensors.temperature_x10 = match sensor.read_x10().await {
                Ok(t) => Some(t),
                Err(e) => {
                    debug!("Temperature read failed: {:?}", e);
                    None
                }
            };
            next_sensor_read = now + sensor_interval;
        }
        sensors.uptime_s = now.as_secs() as u32;

        let board = console.tick(now.as_millis(), sensors);
        show(renderer.render(&board), &mut display, &mut healthy).await;
    }
}
