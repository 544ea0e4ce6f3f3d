//! Decoded measurement values.

use crate::params::{AccelRange, GyroRange};
use crate::registers::{AXIS_BLOCK_LEN, MOTION_BLOCK_LEN};

/// One X, Y, Z triplet of raw signed 16-bit readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisSample {
    /// X-axis reading.
    pub x: i16,
    /// Y-axis reading.
    pub y: i16,
    /// Z-axis reading.
    pub z: i16,
}

impl AxisSample {
    /// Decodes three big-endian pairs in X, Y, Z order.
    pub fn from_be_bytes(raw: &[u8; AXIS_BLOCK_LEN]) -> Self {
        Self {
            x: i16::from_be_bytes([raw[0], raw[1]]),
            y: i16::from_be_bytes([raw[2], raw[3]]),
            z: i16::from_be_bytes([raw[4], raw[5]]),
        }
    }

    /// Returns the triplet as an array.
    pub fn as_array(&self) -> [i16; 3] {
        [self.x, self.y, self.z]
    }

    /// Acceleration in milli-g for the given full-scale range.
    pub fn to_mg(&self, range: AccelRange) -> [i32; 3] {
        let lsb = range.lsb_per_g();
        self.as_array().map(|raw| raw as i32 * 1_000 / lsb)
    }

    /// Angular rate in milli-degrees per second for the given full-scale range.
    pub fn to_mdps(&self, range: GyroRange) -> [i32; 3] {
        let lsb_x10 = range.lsb_per_dps_x10();
        self.as_array().map(|raw| raw as i32 * 10_000 / lsb_x10)
    }
}

/// Accelerometer, temperature and gyroscope read in one burst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionSample {
    /// Raw accelerometer triplet.
    pub accel: AxisSample,
    /// Raw `TEMP_OUT` value.
    pub temperature_raw: i16,
    /// Raw gyroscope triplet.
    pub gyro: AxisSample,
}

impl MotionSample {
    /// Decodes the 14 output registers starting at `ACCEL_XOUT_H`.
    pub fn from_be_bytes(raw: &[u8; MOTION_BLOCK_LEN]) -> Self {
        let mut accel = [0u8; AXIS_BLOCK_LEN];
        let mut gyro = [0u8; AXIS_BLOCK_LEN];
        accel.copy_from_slice(&raw[..6]);
        gyro.copy_from_slice(&raw[8..]);

        Self {
            accel: AxisSample::from_be_bytes(&accel),
            temperature_raw: i16::from_be_bytes([raw[6], raw[7]]),
            gyro: AxisSample::from_be_bytes(&gyro),
        }
    }

    /// Die temperature in hundredths of a degree Celsius.
    pub fn temperature_centi(&self) -> i32 {
        temperature_centi(self.temperature_raw)
    }
}

/// Converts a raw `TEMP_OUT` value to hundredths of a degree Celsius
/// (`raw / 340 + 36.53`).
pub fn temperature_centi(raw: i16) -> i32 {
    raw as i32 * 100 / 340 + 3_653
}
