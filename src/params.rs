//! Strongly typed parameter enumerations for the MPU-6050 driver.
//!
//! These enums map directly to register-map field encodings and are used
//! across [`Config`](crate::config::Config), [`BusConfig`](crate::config::BusConfig)
//! and the register bitfields. Prefer these types over raw integers to keep
//! configuration values valid and explicit.
//!
//! # Examples
//!
//! ```rust
//! use mpu6050::params::{AccelRange, DlpfConfig, GyroRange};
//!
//! let dlpf = DlpfConfig::Bw184Hz;
//! let gyro = GyroRange::Dps2000;
//! let accel = AccelRange::G2;
//! assert_eq!(accel.lsb_per_g(), 16_384);
//! let _ = (dlpf, gyro);
//! ```

use modular_bitfield::prelude::Specifier;

/// Digital low-pass filter selection (`CONFIG.DLPF_CFG`).
///
/// Variant names carry the accelerometer bandwidth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 3]
pub enum DlpfConfig {
    /// 260 Hz accelerometer / 256 Hz gyroscope, 8 kHz gyro output rate.
    Bw260Hz = 0b000,
    /// 184 Hz accelerometer / 188 Hz gyroscope.
    Bw184Hz = 0b001,
    /// 94 Hz accelerometer / 98 Hz gyroscope.
    Bw94Hz = 0b010,
    /// 44 Hz accelerometer / 42 Hz gyroscope.
    Bw44Hz = 0b011,
    /// 21 Hz accelerometer / 20 Hz gyroscope.
    Bw21Hz = 0b100,
    /// 10 Hz accelerometer / 10 Hz gyroscope.
    Bw10Hz = 0b101,
    /// 5 Hz accelerometer / 5 Hz gyroscope.
    Bw5Hz = 0b110,
    /// Reserved encoding.
    Reserved = 0b111,
}

impl DlpfConfig {
    /// Gyroscope output rate feeding the sample-rate divider, in hertz.
    pub const fn gyro_output_rate_hz(self) -> u32 {
        match self {
            Self::Bw260Hz | Self::Reserved => 8_000,
            _ => 1_000,
        }
    }

    /// Accelerometer bandwidth in hertz, `None` for the reserved encoding.
    pub const fn accel_bandwidth_hz(self) -> Option<u32> {
        match self {
            Self::Bw260Hz => Some(260),
            Self::Bw184Hz => Some(184),
            Self::Bw94Hz => Some(94),
            Self::Bw44Hz => Some(44),
            Self::Bw21Hz => Some(21),
            Self::Bw10Hz => Some(10),
            Self::Bw5Hz => Some(5),
            Self::Reserved => None,
        }
    }
}

/// FSYNC pin latch location (`CONFIG.EXT_SYNC_SET`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 3]
pub enum ExtSync {
    /// FSYNC input disabled.
    Disabled = 0b000,
    /// Latched into `TEMP_OUT_L[0]`.
    TempOutL = 0b001,
    /// Latched into `GYRO_XOUT_L[0]`.
    GyroXoutL = 0b010,
    /// Latched into `GYRO_YOUT_L[0]`.
    GyroYoutL = 0b011,
    /// Latched into `GYRO_ZOUT_L[0]`.
    GyroZoutL = 0b100,
    /// Latched into `ACCEL_XOUT_L[0]`.
    AccelXoutL = 0b101,
    /// Latched into `ACCEL_YOUT_L[0]`.
    AccelYoutL = 0b110,
    /// Latched into `ACCEL_ZOUT_L[0]`.
    AccelZoutL = 0b111,
}

/// Gyroscope full-scale range (`GYRO_CONFIG.FS_SEL`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 2]
pub enum GyroRange {
    /// ±250 °/s.
    Dps250 = 0b00,
    /// ±500 °/s.
    Dps500 = 0b01,
    /// ±1000 °/s.
    Dps1000 = 0b10,
    /// ±2000 °/s.
    Dps2000 = 0b11,
}

impl GyroRange {
    /// Sensitivity in tenths of LSB per °/s (131.0, 65.5, 32.8, 16.4).
    pub const fn lsb_per_dps_x10(self) -> i32 {
        match self {
            Self::Dps250 => 1_310,
            Self::Dps500 => 655,
            Self::Dps1000 => 328,
            Self::Dps2000 => 164,
        }
    }
}

/// Accelerometer full-scale range (`ACCEL_CONFIG.AFS_SEL`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 2]
pub enum AccelRange {
    /// ±2 g.
    G2 = 0b00,
    /// ±4 g.
    G4 = 0b01,
    /// ±8 g.
    G8 = 0b10,
    /// ±16 g.
    G16 = 0b11,
}

impl AccelRange {
    /// Sensitivity in LSB per g.
    pub const fn lsb_per_g(self) -> i32 {
        match self {
            Self::G2 => 16_384,
            Self::G4 => 8_192,
            Self::G8 => 4_096,
            Self::G16 => 2_048,
        }
    }
}

/// Clock source selection (`PWR_MGMT_1.CLKSEL`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 3]
pub enum ClockSource {
    /// Internal 8 MHz oscillator.
    Internal8MHz = 0b000,
    /// PLL with X axis gyroscope reference.
    PllGyroX = 0b001,
    /// PLL with Y axis gyroscope reference.
    PllGyroY = 0b010,
    /// PLL with Z axis gyroscope reference.
    PllGyroZ = 0b011,
    /// PLL with external 32.768 kHz reference.
    PllExternal32k = 0b100,
    /// PLL with external 19.2 MHz reference.
    PllExternal19M = 0b101,
    /// Reserved encoding.
    Reserved = 0b110,
    /// Stops the clock and keeps the timing generator in reset.
    Stopped = 0b111,
}

/// Two-wire bus clock frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusFrequency {
    /// Standard mode, 100 kHz.
    K100,
    /// 250 kHz.
    K250,
    /// Fast mode, 400 kHz.
    K400,
}

impl BusFrequency {
    /// Returns the bus clock in hertz.
    pub const fn hz(self) -> u32 {
        match self {
            Self::K100 => 100_000,
            Self::K250 => 250_000,
            Self::K400 => 400_000,
        }
    }
}
