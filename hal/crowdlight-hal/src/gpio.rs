//! GPIO pin abstractions
//!
//! Buttons are wired active-low with pull-ups and sampled on a fixed poll
//! interval. [`PressDetector`] turns those samples into one event per press.

/// Digital input pin
///
/// Implementations should handle the actual hardware register reading
/// for the specific chip.
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// Consecutive pressed samples required before a press is reported
pub const PRESS_SAMPLES: u8 = 2;

/// Debounced press edge detection for one button
///
/// A press fires once after the button has read pressed for
/// [`PRESS_SAMPLES`] consecutive polls, and cannot fire again until the
/// button has read released for the same number of polls.
#[derive(Debug, Clone, Copy, Default)]
pub struct PressDetector {
    pressed_count: u8,
    released_count: u8,
    latched: bool,
}

impl PressDetector {
    /// Create a detector for a released button
    pub const fn new() -> Self {
        Self {
            pressed_count: 0,
            released_count: 0,
            latched: false,
        }
    }

    /// Feed one sample; returns true exactly once per press
    pub fn update(&mut self, pressed: bool) -> bool {
        if pressed {
            self.released_count = 0;
            self.pressed_count = self.pressed_count.saturating_add(1);
            if !self.latched && self.pressed_count >= PRESS_SAMPLES {
                self.latched = true;
                return true;
            }
        } else {
            self.pressed_count = 0;
            self.released_count = self.released_count.saturating_add(1);
            if self.released_count >= PRESS_SAMPLES {
                self.latched = false;
            }
        }
        false
    }

    /// Sample an active-low pin
    pub fn poll<P: InputPin>(&mut self, pin: &P) -> bool {
        self.update(pin.is_low())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakePin(bool);

    impl InputPin for FakePin {
        fn is_high(&self) -> bool {
            self.0
        }
    }

    #[test]
    fn test_single_press_fires_once() {
        let mut detector = PressDetector::new();
        let samples = [true, true, true, true, true];
        let fired = samples.iter().filter(|&&s| detector.update(s)).count();
        assert_eq!(fired, 1);
    }

    #[test]
    fn test_bounce_is_ignored() {
        let mut detector = PressDetector::new();
        let samples = [true, false, true, false, false];
        assert!(samples.iter().all(|&s| !detector.update(s)));
    }

    #[test]
    fn test_release_rearms() {
        let mut detector = PressDetector::new();
        let samples = [true, true, false, false, true, true];
        let fired = samples.iter().filter(|&&s| detector.update(s)).count();
        assert_eq!(fired, 2);
    }

    #[test]
    fn test_short_release_does_not_rearm() {
        let mut detector = PressDetector::new();
        let samples = [true, true, false, true, true];
        let fired = samples.iter().filter(|&&s| detector.update(s)).count();
        assert_eq!(fired, 1);
    }

    #[test]
    fn test_poll_active_low() {
        let mut detector = PressDetector::new();
        let pressed = FakePin(false);
        assert!(!detector.poll(&pressed));
        assert!(detector.poll(&pressed));
        assert!(!detector.poll(&FakePin(true)));
    }
}
