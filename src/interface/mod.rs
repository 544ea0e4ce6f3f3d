//! Bus transport abstraction for the MPU-6050 driver.
//!
//! A transport submits one addressed frame at a time and reports its terminal
//! outcome asynchronously through the [`CompletionSignal`](crate::completion::CompletionSignal)
//! it was constructed with.

pub mod i2c;

use crate::config::BusConfig;

/// Direction of a single frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Controller to target.
    Write,
    /// Target to controller.
    Read,
}

/// One frame handed to [`BusTransport::submit`].
#[derive(Debug, PartialEq, Eq)]
pub enum TransferRequest<'b> {
    /// Write `bytes` to `address`. With `stop == false` the bus stays
    /// claimed so the next frame starts with a repeated start.
    Write {
        /// 7-bit target address.
        address: u8,
        /// Payload, register pointer first.
        bytes: &'b [u8],
        /// Whether a stop condition ends the frame.
        stop: bool,
    },
    /// Read `buffer.len()` bytes from `address`.
    Read {
        /// 7-bit target address.
        address: u8,
        /// Destination, valid only after a successful completion.
        buffer: &'b mut [u8],
    },
}

impl TransferRequest<'_> {
    /// Direction of the frame.
    pub fn direction(&self) -> Direction {
        match self {
            Self::Write { .. } => Direction::Write,
            Self::Read { .. } => Direction::Read,
        }
    }

    /// Target address of the frame.
    pub fn address(&self) -> u8 {
        match self {
            Self::Write { address, .. } | Self::Read { address, .. } => *address,
        }
    }

    /// Number of payload bytes moved by the frame.
    pub fn len(&self) -> usize {
        match self {
            Self::Write { bytes, .. } => bytes.len(),
            Self::Read { buffer, .. } => buffer.len(),
        }
    }

    /// Returns `true` when the frame carries no payload.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Abstraction over the bus peripheral driver.
///
/// Contract for implementors:
/// - `submit` only queues the frame. `Ok` means accepted, not completed.
/// - Every accepted frame completes the transport's signal exactly once,
///   with the classified [`BusEvent`](crate::completion::BusEvent).
/// - A rejected frame never completes the signal.
pub trait BusTransport {
    /// Synchronous error produced at init or submission time.
    type Error;

    /// Applies pin and clock settings and registers the completion handler.
    fn init(&mut self, config: &BusConfig) -> core::result::Result<(), Self::Error>;

    /// Unmasks the controller interrupt.
    fn enable_interrupt(&mut self);

    /// Enables the controller.
    fn enable(&mut self);

    /// Queues one frame on the bus.
    fn submit(&mut self, request: TransferRequest<'_>) -> core::result::Result<(), Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_accessors_report_frame_shape() {
        let bytes = [0x6B, 0x01];
        let write = TransferRequest::Write {
            address: 0x68,
            bytes: &bytes,
            stop: true,
        };
        assert_eq!(write.direction(), Direction::Write);
        assert_eq!(write.address(), 0x68);
        assert_eq!(write.len(), 2);

        let mut buffer = [0u8; 6];
        let read = TransferRequest::Read {
            address: 0x69,
            buffer: &mut buffer,
        };
        assert_eq!(read.direction(), Direction::Read);
        assert_eq!(read.address(), 0x69);
        assert_eq!(read.len(), 6);
        assert!(!read.is_empty());
    }
}
