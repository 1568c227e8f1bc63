//! Analog sensor abstractions
//!
//! The only analog input the transmitter reads is the MCU's on-die
//! temperature sensor, shown on the status display.

/// ADC reference voltage in microvolts
pub const ADC_VREF_UV: u32 = 3_300_000;

/// Full-scale count of a 12-bit conversion
pub const ADC_FULL_SCALE: u32 = 4096;

/// Sensor voltage at 27 °C, microvolts
const SENSE_UV_AT_27C: i32 = 706_000;

/// Sensor slope, microvolts per °C (negative coefficient)
const SENSE_UV_PER_C: i32 = 1_721;

/// Errors reading a sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Conversion did not complete
    Conversion,
}

/// Temperature sensor reporting tenths of a degree Celsius
pub trait TemperatureSensor {
    fn read_x10(&mut self) -> impl core::future::Future<Output = Result<i16, SensorError>>;
}

/// Convert a raw 12-bit reading of the RP2040 die sensor to 0.1 °C
///
/// `T = 27 - (V - 0.706) / 0.001721`
pub fn die_temperature_x10(raw: u16) -> i16 {
    let microvolts =
        (u64::from(raw) * u64::from(ADC_VREF_UV) / u64::from(ADC_FULL_SCALE)) as i32;
    let offset = (microvolts - SENSE_UV_AT_27C) * 10 / SENSE_UV_PER_C;
    (270 - offset) as i16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_point() {
        // 0.706 V is about count 876
        let t = die_temperature_x10(876);
        assert!((269..=272).contains(&t), "{}", t);
    }

    #[test]
    fn test_slope_direction() {
        assert!(die_temperature_x10(800) > die_temperature_x10(900));
    }

    #[test]
    fn test_full_range_does_not_overflow() {
        let cold = die_temperature_x10(u16::MAX >> 4);
        let hot = die_temperature_x10(0);
        assert!(cold < 0);
        assert!(hot > 1000);
    }
}
