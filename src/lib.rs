#![cfg_attr(not(test), no_std)]
//! `#![no_std]` driver for the InvenSense MPU-6050 6-axis IMU.
//!
//! Transfers are submitted to a [`BusTransport`](interface::BusTransport),
//! which reports each frame's terminal event through a shared
//! [`CompletionSignal`](completion::CompletionSignal). The caller polls that
//! signal with a bounded budget, so a stalled bus surfaces as
//! [`Error::Timeout`] instead of hanging.

#[macro_use]
mod log;

mod error;

pub mod completion;
pub mod config;
pub mod device;
pub mod interface;
pub mod params;
pub mod registers;
pub mod sample;
pub mod transaction;

#[cfg(test)]
mod testing;

pub use crate::completion::{BusEvent, CompletionSignal, TransferOutcome};
pub use crate::device::{BringUpReport, Mpu6050};
pub use crate::error::{Error, Result};
pub use crate::sample::{AxisSample, MotionSample};
