//! On-die temperature sensor (ADC4)
//!
//! Uses a blocking conversion so the sensor can live on either core without
//! binding the ADC FIFO interrupt there.

use crowdlight_hal::adc::{die_temperature_x10, SensorError, TemperatureSensor};
use embassy_rp::adc::{Adc, Blocking, Channel};

/// RP2040 internal temperature sensor
pub struct DieTemperature<'d> {
    adc: Adc<'d, Blocking>,
    channel: Channel<'d>,
}

impl<'d> DieTemperature<'d> {
    /// `channel` must be the one built by `Channel::new_temp_sensor`
    pub fn new(adc: Adc<'d, Blocking>, channel: Channel<'d>) -> Self {
        Self { adc, channel }
    }
}

impl TemperatureSensor for DieTemperature<'_> {
    async fn read_x10(&mut self) -> Result<i16, SensorError> {
        let raw = self
            .adc
            .blocking_read(&mut self.channel)
            .map_err(|_| SensorError::Conversion)?;
        Ok(die_temperature_x10(raw))
    }
}
