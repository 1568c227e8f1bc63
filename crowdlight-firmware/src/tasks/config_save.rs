//! Configuration save task (core0)
//!
//! RP2040 flash can only be erased and programmed from core0 while core1
//! is paused, so the UI on core1 hands committed configurations here.

use defmt::*;

use crowdlight_hal_rp2040::flash::Rp2040FlashStorage;

use crate::channels::SAVE_REQUEST;
use crate::config::ConfigPersistence;

/// Persist each committed configuration
#[embassy_executor::task]
pub async fn config_save_task(mut persistence: ConfigPersistence<Rp2040FlashStorage<'static>>) {
    loop {
        let config = SAVE_REQUEST.wait().await;
        match persistence.save(&config).await {
            Ok(()) => info!(
                "Saved config: universe={}, leds={}",
                config.universe(), config.num_leds()
            ),
            Err(e) => error!("Failed to save config: {:?}", e),
        }
    }
}
