//! Button inputs

use embassy_rp::gpio::{AnyPin, Input, Pull};
use embassy_rp::Peri;

/// Active-low push button with the internal pull-up enabled
pub struct ButtonPin<'d> {
    input: Input<'d>,
}

impl<'d> ButtonPin<'d> {
    pub fn new(pin: Peri<'d, AnyPin>) -> Self {
        Self {
            input: Input::new(pin, Pull::Up),
        }
    }
}

impl crowdlight_hal::InputPin for ButtonPin<'_> {
    fn is_high(&self) -> bool {
        self.input.is_high()
    }
}
