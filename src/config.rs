//! Configuration primitives for the MPU-6050 driver.

use crate::params::{AccelRange, BusFrequency, ClockSource, DlpfConfig, ExtSync, GyroRange};
use crate::registers::{
    AccelConfig, GyroConfig, PowerManagement1, SyncConfig, CONFIG_BLOCK_LEN, DEFAULT_ADDRESS,
};

/// Bounded wait applied to every transfer completion.
///
/// The poll loop runs `ceil(timeout_us * 1000 / poll_interval_ns)`
/// iterations, each one delaying `poll_interval_ns` through the caller's
/// [`DelayNs`](embedded_hal::delay::DelayNs). A zero poll interval counts as 1 ns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WaitBudget {
    /// Total time allowed for one completion, in microseconds.
    pub timeout_us: u32,
    /// Delay between two checks of the completion signal, in nanoseconds.
    pub poll_interval_ns: u32,
}

impl WaitBudget {
    /// Creates a budget from a timeout and a poll interval.
    pub const fn new(timeout_us: u32, poll_interval_ns: u32) -> Self {
        Self {
            timeout_us,
            poll_interval_ns,
        }
    }

    /// Effective poll interval, never zero.
    pub const fn interval_ns(&self) -> u32 {
        if self.poll_interval_ns == 0 {
            1
        } else {
            self.poll_interval_ns
        }
    }

    /// Number of poll iterations covering the timeout, saturating at `u32::MAX`.
    pub const fn iterations(&self) -> u32 {
        let total_ns = self.timeout_us as u64 * 1_000;
        let step = self.interval_ns() as u64;
        let iterations = total_ns.div_ceil(step);
        if iterations > u32::MAX as u64 {
            u32::MAX
        } else {
            iterations as u32
        }
    }
}

impl Default for WaitBudget {
    /// 10 ms polled every microsecond, i.e. 10 000 iterations.
    fn default() -> Self {
        Self::new(10_000, 1_000)
    }
}

/// Peripheral-level settings applied once during bus bring-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusConfig {
    /// Clock line pin number.
    pub scl_pin: u8,
    /// Data line pin number.
    pub sda_pin: u8,
    /// Bus clock frequency.
    pub frequency: BusFrequency,
    /// Interrupt priority of the bus controller.
    pub interrupt_priority: u8,
    /// 7-bit address of the sensor.
    pub address: u8,
    /// Completion wait budget.
    pub wait: WaitBudget,
}

impl BusConfig {
    /// Begins building a [`BusConfig`] using the builder pattern.
    pub fn new() -> BusConfigBuilder {
        BusConfigBuilder::new()
    }
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            scl_pin: 4,
            sda_pin: 3,
            frequency: BusFrequency::K400,
            interrupt_priority: 6,
            address: DEFAULT_ADDRESS,
            wait: WaitBudget::default(),
        }
    }
}

/// Builder for [`BusConfig`].
#[derive(Debug, Clone, Copy)]
pub struct BusConfigBuilder {
    config: BusConfig,
}

impl BusConfigBuilder {
    /// Creates a new builder seeded with [`BusConfig::default()`].
    pub fn new() -> Self {
        Self {
            config: BusConfig::default(),
        }
    }

    /// Overrides the clock and data pins.
    pub fn pins(mut self, scl: u8, sda: u8) -> Self {
        self.config.scl_pin = scl;
        self.config.sda_pin = sda;
        self
    }

    /// Overrides the bus frequency.
    pub fn frequency(mut self, frequency: BusFrequency) -> Self {
        self.config.frequency = frequency;
        self
    }

    /// Overrides the controller interrupt priority.
    pub fn interrupt_priority(mut self, priority: u8) -> Self {
        self.config.interrupt_priority = priority;
        self
    }

    /// Overrides the sensor address.
    pub fn address(mut self, address: u8) -> Self {
        self.config.address = address;
        self
    }

    /// Overrides the completion wait budget.
    pub fn wait(mut self, wait: WaitBudget) -> Self {
        self.config.wait = wait;
        self
    }

    /// Finalizes the builder and returns the [`BusConfig`].
    pub fn build(self) -> BusConfig {
        self.config
    }
}

impl Default for BusConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Accelerometer self-test axis selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SelfTestAxes {
    /// X axis self-test enable.
    pub x: bool,
    /// Y axis self-test enable.
    pub y: bool,
    /// Z axis self-test enable.
    pub z: bool,
}

impl SelfTestAxes {
    /// No axis under self-test.
    pub const NONE: Self = Self {
        x: false,
        y: false,
        z: false,
    };
    /// Every axis under self-test.
    pub const ALL: Self = Self {
        x: true,
        y: true,
        z: true,
    };
}

/// User-facing configuration for the MPU-6050 sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// `SMPLRT_DIV`: sample rate is the gyro output rate divided by `1 + divider`.
    pub sample_rate_divider: u8,
    /// Digital low-pass filter selection.
    pub dlpf: DlpfConfig,
    /// FSYNC latch location.
    pub ext_sync: ExtSync,
    /// Gyroscope full-scale range.
    pub gyro_range: GyroRange,
    /// Accelerometer full-scale range.
    pub accel_range: AccelRange,
    /// Accelerometer self-test axes.
    pub accel_self_test: SelfTestAxes,
    /// Clock source selected when waking the device.
    pub clock_source: ClockSource,
}

impl Config {
    /// Begins building a [`Config`] using the builder pattern.
    pub fn new() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Checks whether this configuration avoids reserved encodings.
    pub fn validate(&self) -> core::result::Result<(), ConfigError> {
        if self.dlpf == DlpfConfig::Reserved {
            return Err(ConfigError::ReservedDlpf);
        }
        if self.clock_source == ClockSource::Reserved {
            return Err(ConfigError::ReservedClockSource);
        }

        Ok(())
    }

    /// Output sample rate in hertz implied by the divider and filter.
    pub fn sample_rate_hz(&self) -> u32 {
        self.dlpf.gyro_output_rate_hz() / (1 + self.sample_rate_divider as u32)
    }

    /// Encodes `SMPLRT_DIV`, `CONFIG`, `GYRO_CONFIG` and `ACCEL_CONFIG` in
    /// register order for one block write at `SMPLRT_DIV`.
    pub fn register_block(&self) -> [u8; CONFIG_BLOCK_LEN] {
        let sync = SyncConfig::new()
            .with_dlpf(self.dlpf)
            .with_ext_sync(self.ext_sync);
        let gyro = GyroConfig::new().with_range(self.gyro_range);
        let accel = AccelConfig::new()
            .with_range(self.accel_range)
            .with_x_self_test(self.accel_self_test.x)
            .with_y_self_test(self.accel_self_test.y)
            .with_z_self_test(self.accel_self_test.z);

        [
            self.sample_rate_divider,
            u8::from(sync),
            u8::from(gyro),
            u8::from(accel),
        ]
    }

    /// `PWR_MGMT_1` value that takes the device out of sleep.
    pub fn wake_command(&self) -> PowerManagement1 {
        PowerManagement1::new()
            .with_clock_source(self.clock_source)
            .with_sleep(false)
    }
}

/// Builder for [`Config`] allowing piecemeal construction.
#[derive(Debug, Clone, Copy)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Creates a new builder seeded with [`Config::default()`].
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Overrides the sample-rate divider.
    pub fn sample_rate_divider(mut self, divider: u8) -> Self {
        self.config.sample_rate_divider = divider;
        self
    }

    /// Overrides the digital low-pass filter.
    pub fn dlpf(mut self, dlpf: DlpfConfig) -> Self {
        self.config.dlpf = dlpf;
        self
    }

    /// Overrides the FSYNC latch location.
    pub fn ext_sync(mut self, ext_sync: ExtSync) -> Self {
        self.config.ext_sync = ext_sync;
        self
    }

    /// Overrides the gyroscope full-scale range.
    pub fn gyro_range(mut self, range: GyroRange) -> Self {
        self.config.gyro_range = range;
        self
    }

    /// Overrides the accelerometer full-scale range.
    pub fn accel_range(mut self, range: AccelRange) -> Self {
        self.config.accel_range = range;
        self
    }

    /// Selects the accelerometer axes placed under self-test.
    pub fn accel_self_test(mut self, axes: SelfTestAxes) -> Self {
        self.config.accel_self_test = axes;
        self
    }

    /// Overrides the clock source.
    pub fn clock_source(mut self, source: ClockSource) -> Self {
        self.config.clock_source = source;
        self
    }

    /// Finalizes the builder and returns the [`Config`].
    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sample_rate_divider: 19,
            dlpf: DlpfConfig::Bw184Hz,
            ext_sync: ExtSync::Disabled,
            gyro_range: GyroRange::Dps2000,
            accel_range: AccelRange::G2,
            accel_self_test: SelfTestAxes::NONE,
            clock_source: ClockSource::PllGyroX,
        }
    }
}

/// Validation errors generated while verifying a [`Config`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// `DLPF_CFG` uses the reserved encoding.
    ReservedDlpf,
    /// `CLKSEL` uses the reserved encoding.
    ReservedClockSource,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_budget_is_ten_thousand_polls() {
        assert_eq!(WaitBudget::default().iterations(), 10_000);
    }

    #[test]
    fn budget_rounds_partial_intervals_up() {
        assert_eq!(WaitBudget::new(1, 300).iterations(), 4);
        assert_eq!(WaitBudget::new(0, 1_000).iterations(), 0);
        assert_eq!(WaitBudget::new(5, 0).iterations(), 5_000);
        assert_eq!(WaitBudget::new(u32::MAX, 1).iterations(), u32::MAX);
    }

    #[test]
    fn default_register_block_matches_bring_up_values() {
        // divider 19, DLPF 184 Hz, +/-2000 dps, +/-2 g, no self-test
        assert_eq!(Config::default().register_block(), [19, 0x01, 0x18, 0x00]);
        assert_eq!(u8::from(Config::default().wake_command()), 0x01);
    }

    #[test]
    fn builder_overrides_block_fields() {
        let config = Config::new()
            .sample_rate_divider(7)
            .dlpf(DlpfConfig::Bw260Hz)
            .ext_sync(ExtSync::TempOutL)
            .gyro_range(GyroRange::Dps250)
            .accel_range(AccelRange::G16)
            .accel_self_test(SelfTestAxes::ALL)
            .build();

        assert_eq!(config.register_block(), [7, 0b0000_1000, 0x00, 0xF8]);
        assert_eq!(config.sample_rate_hz(), 1_000);
    }

    #[test]
    fn default_sample_rate_is_50_hz() {
        assert_eq!(Config::default().sample_rate_hz(), 50);
    }

    #[test]
    fn reserved_encodings_are_rejected() {
        let dlpf = Config::new().dlpf(DlpfConfig::Reserved).build();
        assert_eq!(dlpf.validate(), Err(ConfigError::ReservedDlpf));

        let clock = Config::new().clock_source(ClockSource::Reserved).build();
        assert_eq!(clock.validate(), Err(ConfigError::ReservedClockSource));

        assert_eq!(Config::default().validate(), Ok(()));
    }

    #[test]
    fn bus_builder_overrides_defaults() {
        let bus = BusConfig::new()
            .pins(27, 26)
            .frequency(BusFrequency::K100)
            .address(0x69)
            .wait(WaitBudget::new(500, 500))
            .build();

        assert_eq!((bus.scl_pin, bus.sda_pin), (27, 26));
        assert_eq!(bus.frequency.hz(), 100_000);
        assert_eq!(bus.address, 0x69);
        assert_eq!(bus.wait.iterations(), 1_000);
        assert_eq!(BusConfig::default().address, DEFAULT_ADDRESS);
    }
}
