//! Register map definitions for the MPU-6050 IMU.
#![allow(unused_parens)]

use modular_bitfield::prelude::*;

use crate::params::{AccelRange, ClockSource, DlpfConfig, ExtSync, GyroRange};

/// Register address of `SMPLRT_DIV`.
pub const REG_SMPLRT_DIV: u8 = 0x19;
/// Register address of `CONFIG`.
pub const REG_CONFIG: u8 = 0x1A;
/// Register address of `GYRO_CONFIG`.
pub const REG_GYRO_CONFIG: u8 = 0x1B;
/// Register address of `ACCEL_CONFIG`.
pub const REG_ACCEL_CONFIG: u8 = 0x1C;
/// Register address of `ACCEL_XOUT_H`.
pub const REG_ACCEL_XOUT_H: u8 = 0x3B;
/// Register address of `ACCEL_XOUT_L`.
pub const REG_ACCEL_XOUT_L: u8 = 0x3C;
/// Register address of `ACCEL_YOUT_H`.
pub const REG_ACCEL_YOUT_H: u8 = 0x3D;
/// Register address of `ACCEL_YOUT_L`.
pub const REG_ACCEL_YOUT_L: u8 = 0x3E;
/// Register address of `ACCEL_ZOUT_H`.
pub const REG_ACCEL_ZOUT_H: u8 = 0x3F;
/// Register address of `ACCEL_ZOUT_L`.
pub const REG_ACCEL_ZOUT_L: u8 = 0x40;
/// Register address of `TEMP_OUT_H`.
pub const REG_TEMP_OUT_H: u8 = 0x41;
/// Register address of `TEMP_OUT_L`.
pub const REG_TEMP_OUT_L: u8 = 0x42;
/// Register address of `GYRO_XOUT_H`.
pub const REG_GYRO_XOUT_H: u8 = 0x43;
/// Register address of `SIGNAL_PATH_RESET`.
pub const REG_SIGNAL_PATH_RESET: u8 = 0x68;
/// Register address of `PWR_MGMT_1`.
pub const REG_PWR_MGMT_1: u8 = 0x6B;
/// Register address of `WHO_AM_I`.
pub const REG_WHO_AM_I: u8 = 0x75;

/// Default 7-bit bus address (AD0 pulled low).
pub const DEFAULT_ADDRESS: u8 = 0x68;
/// Alternate 7-bit bus address (AD0 pulled high).
pub const ALTERNATE_ADDRESS: u8 = 0x69;
/// Value reported by `WHO_AM_I` regardless of the AD0 strap.
pub const EXPECTED_WHO_AM_I: u8 = 0x68;

/// Number of configuration registers starting at `SMPLRT_DIV`.
pub const CONFIG_BLOCK_LEN: usize = 4;
/// Consecutive bytes spanning X, Y, Z of one sensor.
pub const AXIS_BLOCK_LEN: usize = 6;
/// Accelerometer, temperature and gyroscope outputs in one burst.
pub const MOTION_BLOCK_LEN: usize = 14;

/// Access permissions encoded for each register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterAccess {
    /// Read-only register.
    ReadOnly,
    /// Write-only register.
    WriteOnly,
    /// Read/write register.
    ReadWrite,
}

/// Minimal metadata exposed by every register value type.
pub trait Register {
    /// Raw storage backing the register payload.
    type Raw: Copy;
    /// Register address as documented in the register map.
    const ADDRESS: u8;
    /// Access permission classification.
    const ACCESS: RegisterAccess;
    /// Optional reset/default value defined by the register map.
    const RESET_VALUE: Option<Self::Raw>;
}

/// Bitfield representation of the `CONFIG` register (address `0x1A`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncConfig {
    // Digital low-pass filter (bits 2:0).
    pub dlpf: DlpfConfig,
    // FSYNC latch location (bits 5:3).
    pub ext_sync: ExtSync,
    #[skip]
    __: B2,
}

impl From<u8> for SyncConfig {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<SyncConfig> for u8 {
    fn from(value: SyncConfig) -> Self {
        value.into_bytes()[0]
    }
}

/// Bitfield representation of the `GYRO_CONFIG` register (address `0x1B`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GyroConfig {
    #[skip]
    __: B3,
    // Full-scale select (bits 4:3).
    pub range: GyroRange,
    // Z axis self-test (bit 5).
    pub z_self_test: bool,
    // Y axis self-test (bit 6).
    pub y_self_test: bool,
    // X axis self-test (bit 7).
    pub x_self_test: bool,
}

impl From<u8> for GyroConfig {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<GyroConfig> for u8 {
    fn from(value: GyroConfig) -> Self {
        value.into_bytes()[0]
    }
}

/// Bitfield representation of the `ACCEL_CONFIG` register (address `0x1C`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccelConfig {
    #[skip]
    __: B3,
    // Full-scale select (bits 4:3).
    pub range: AccelRange,
    // Z axis self-test (bit 5).
    pub z_self_test: bool,
    // Y axis self-test (bit 6).
    pub y_self_test: bool,
    // X axis self-test (bit 7).
    pub x_self_test: bool,
}

impl From<u8> for AccelConfig {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<AccelConfig> for u8 {
    fn from(value: AccelConfig) -> Self {
        value.into_bytes()[0]
    }
}

/// Bitfield representation of the `SIGNAL_PATH_RESET` register (address `0x68`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalPathReset {
    // Temperature sensor path reset (bit 0).
    pub temp_reset: bool,
    // Accelerometer path reset (bit 1).
    pub accel_reset: bool,
    // Gyroscope path reset (bit 2).
    pub gyro_reset: bool,
    #[skip]
    __: B5,
}

impl SignalPathReset {
    /// Command resetting every analog and digital signal path.
    pub fn all() -> Self {
        Self::new()
            .with_temp_reset(true)
            .with_accel_reset(true)
            .with_gyro_reset(true)
    }
}

impl From<u8> for SignalPathReset {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<SignalPathReset> for u8 {
    fn from(value: SignalPathReset) -> Self {
        value.into_bytes()[0]
    }
}

/// Bitfield representation of the `PWR_MGMT_1` register (address `0x6B`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerManagement1 {
    // Clock source selection (bits 2:0).
    pub clock_source: ClockSource,
    // Temperature sensor disable (bit 3).
    pub temp_disable: bool,
    #[skip]
    __: B1,
    // Cycle between sleep and single samples (bit 5).
    pub cycle: bool,
    // Sleep mode (bit 6).
    pub sleep: bool,
    // Full device reset (bit 7).
    pub device_reset: bool,
}

impl From<u8> for PowerManagement1 {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<PowerManagement1> for u8 {
    fn from(value: PowerManagement1) -> Self {
        value.into_bytes()[0]
    }
}

impl Register for SyncConfig {
    type Raw = u8;
    const ADDRESS: u8 = REG_CONFIG;
    const ACCESS: RegisterAccess = RegisterAccess::ReadWrite;
    const RESET_VALUE: Option<Self::Raw> = Some(0x00);
}

impl Register for GyroConfig {
    type Raw = u8;
    const ADDRESS: u8 = REG_GYRO_CONFIG;
    const ACCESS: RegisterAccess = RegisterAccess::ReadWrite;
    const RESET_VALUE: Option<Self::Raw> = Some(0x00);
}

impl Register for AccelConfig {
    type Raw = u8;
    const ADDRESS: u8 = REG_ACCEL_CONFIG;
    const ACCESS: RegisterAccess = RegisterAccess::ReadWrite;
    const RESET_VALUE: Option<Self::Raw> = Some(0x00);
}

impl Register for SignalPathReset {
    type Raw = u8;
    const ADDRESS: u8 = REG_SIGNAL_PATH_RESET;
    const ACCESS: RegisterAccess = RegisterAccess::WriteOnly;
    const RESET_VALUE: Option<Self::Raw> = None;
}

impl Register for PowerManagement1 {
    type Raw = u8;
    const ADDRESS: u8 = REG_PWR_MGMT_1;
    const ACCESS: RegisterAccess = RegisterAccess::ReadWrite;
    const RESET_VALUE: Option<Self::Raw> = Some(0x40);
}
