//! Button polling task (core1)

use defmt::*;
use embassy_time::{Duration, Ticker};

use crowdlight_core::menu::ButtonEvent;
use crowdlight_hal::PressDetector;
use crowdlight_hal_rp2040::gpio::ButtonPin;

use crate::board;
use crate::channels::INPUT_CHANNEL;

/// Poll the five panel buttons and queue one event per press
///
/// `pins` are in [`ButtonEvent::ALL`] order.
#[embassy_executor::task]
pub async fn buttons_task(pins: [ButtonPin<'static>; 5]) {
    info!("Button task started");

    let mut detectors = [PressDetector::new(); 5];
    let mut ticker = Ticker::every(Duration::from_millis(board::BUTTON_POLL_MS));

    loop {
        for ((pin, detector), event) in pins.iter().zip(detectors.iter_mut()).zip(ButtonEvent::ALL) {
            if detector.poll(pin) {
                trace!("Button {:?}", event);
                if INPUT_CHANNEL.try_send(event).is_err() {
                    warn!("Input queue full, dropping {:?}", event);
                }
            }
        }
        ticker.next().await;
    }
}
