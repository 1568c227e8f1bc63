//! Inter-task and inter-core shared state
//!
//! Everything here is a `static` behind a `CriticalSectionRawMutex`, which on
//! the RP2040 takes hardware spinlock 31 and so is safe between the two
//! cores as well as between tasks on one executor.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use crowdlight_core::config::DeviceConfig;
use crowdlight_core::menu::ButtonEvent;
use crowdlight_core::shared::{LiveConfig, SharedChannelState};
use crowdlight_protocol::RadioFrame;

/// Channel capacity for button presses
const INPUT_CHANNEL_SIZE: usize = 8;

/// Latest universe snapshot and Ethernet link report (core0 writes, core1 reads)
pub static CHANNELS: SharedChannelState<CriticalSectionRawMutex> = SharedChannelState::new();

/// Configuration the producer filters with (core1 writes on commit, core0 reads)
pub static LIVE_CONFIG: LiveConfig<CriticalSectionRawMutex> = LiveConfig::new(DeviceConfig::DEFAULT);

/// Newest radio frame waiting for the HC-12; a newer frame replaces an unsent one
pub static RADIO_OUT: Signal<CriticalSectionRawMutex, RadioFrame> = Signal::new();

/// Debounced button presses from the button task to the UI task
pub static INPUT_CHANNEL: Channel<CriticalSectionRawMutex, ButtonEvent, INPUT_CHANNEL_SIZE> =
    Channel::new();

/// Committed configuration waiting to be written to flash (core0 only)
pub static SAVE_REQUEST: Signal<CriticalSectionRawMutex, DeviceConfig> = Signal::new();

/// Configuration loaded at boot; releases the UI from its splash screen
pub static CONFIG_LOADED: Signal<CriticalSectionRawMutex, DeviceConfig> = Signal::new();
