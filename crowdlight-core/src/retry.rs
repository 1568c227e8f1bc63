//! Capped exponential back-off for hardware bring-up retries

/// Delay sequence `initial, 2*initial, 4*initial, ...` capped at `max`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Backoff {
    initial_ms: u64,
    max_ms: u64,
    current_ms: u64,
}

impl Backoff {
    /// `initial_ms` of zero is treated as 1 ms; `max_ms` is raised to
    /// `initial_ms` if smaller
    pub const fn new(initial_ms: u64, max_ms: u64) -> Self {
        let initial_ms = if initial_ms == 0 { 1 } else { initial_ms };
        let max_ms = if max_ms < initial_ms { initial_ms } else { max_ms };
        Self {
            initial_ms,
            max_ms,
            current_ms: initial_ms,
        }
    }

    /// Delay before the next attempt, in milliseconds
    pub fn next_delay(&mut self) -> u64 {
        let delay = self.current_ms;
        self.current_ms = self.current_ms.saturating_mul(2).min(self.max_ms);
        delay
    }

    /// Start over from the initial delay after a success
    pub fn reset(&mut self) {
        self.current_ms = self.initial_ms;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doubles_up_to_cap() {
        let mut backoff = Backoff::new(250, 2_000);
        let delays: [u64; 6] = core::array::from_fn(|_| backoff.next_delay());
        assert_eq!(delays, [250, 500, 1_000, 2_000, 2_000, 2_000]);
    }

    #[test]
    fn test_reset_restarts_sequence() {
        let mut backoff = Backoff::new(100, 1_000);
        backoff.next_delay();
        backoff.next_delay();
        backoff.reset();
        assert_eq!(backoff.next_delay(), 100);
    }

    #[test]
    fn test_degenerate_bounds() {
        let mut zero = Backoff::new(0, 0);
        assert_eq!(zero.next_delay(), 1);
        assert_eq!(zero.next_delay(), 1);

        let mut inverted = Backoff::new(500, 10);
        assert_eq!(inverted.next_delay(), 500);
        assert_eq!(inverted.next_delay(), 500);
    }

    #[test]
    fn test_never_overflows() {
        let mut backoff = Backoff::new(u64::MAX / 2 + 1, u64::MAX);
        backoff.next_delay();
        assert_eq!(backoff.next_delay(), u64::MAX);
        assert_eq!(backoff.next_delay(), u64::MAX);
    }
}
