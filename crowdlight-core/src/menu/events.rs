//! Menu inputs and outputs

use crate::config::DeviceConfig;

/// Debounced button press, one per physical press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEvent {
    Up,
    Down,
    Left,
    Right,
    Select,
}

impl ButtonEvent {
    /// All buttons, in panel order
    pub const ALL: [ButtonEvent; 5] = [
        ButtonEvent::Up,
        ButtonEvent::Down,
        ButtonEvent::Left,
        ButtonEvent::Right,
        ButtonEvent::Select,
    ];

    /// Value change for numeric editors
    pub fn step(&self) -> Option<i32> {
        match self {
            ButtonEvent::Up => Some(1),
            ButtonEvent::Down => Some(-1),
            _ => None,
        }
    }
}

/// Side effect requested by a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuOutcome {
    /// An edit was committed; persist this configuration and make it live
    CommitRequested(DeviceConfig),
}
