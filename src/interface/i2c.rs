//! Bus transport built on top of a blocking `embedded-hal` `I2c` bus.
//!
//! The blocking bus finishes each frame inside [`BusTransport::submit`], so the
//! completion signal is set before `submit` returns and the caller's wait
//! loop observes it on its first poll. A write submitted without a stop
//! condition is held back and prefixed to the next frame, which keeps the bus
//! claimed across a register-pointer write and the following read
//! (`write_read`, repeated start).

use embedded_hal::i2c::{Error as _, ErrorKind, I2c, NoAcknowledgeSource, Operation};

use super::{BusTransport, TransferRequest};
use crate::completion::{BusEvent, CompletionSignal};
use crate::config::BusConfig;
use crate::transaction::STAGING_CAPACITY;

/// Synchronous failures of the [`I2cTransport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum I2cTransportError {
    /// Configured address does not fit in 7 bits.
    InvalidAddress,
    /// Submission before `init` and `enable`.
    NotEnabled,
    /// Frame without payload.
    EmptyTransfer,
    /// Held bytes would exceed the staging capacity.
    Oversized,
    /// Frame targets a different address than the held prefix.
    AddressMismatch,
}

/// Maps an `embedded-hal` error kind onto the completion event taxonomy.
pub fn classify(kind: ErrorKind) -> BusEvent {
    match kind {
        ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data) => BusEvent::DataNack,
        ErrorKind::NoAcknowledge(_) => BusEvent::AddressNack,
        ErrorKind::Overrun => BusEvent::Overrun,
        _ => BusEvent::BusError,
    }
}

/// I2C-based transport implementation for the MPU-6050 driver.
pub struct I2cTransport<'a, I2C> {
    i2c: I2C,
    completion: &'a CompletionSignal,
    config: Option<BusConfig>,
    interrupt_enabled: bool,
    enabled: bool,
    held: [u8; STAGING_CAPACITY],
    held_len: usize,
    held_address: u8,
}

impl<'a, I2C> I2cTransport<'a, I2C> {
    /// Creates a transport that reports completions to `completion`.
    pub const fn new(i2c: I2C, completion: &'a CompletionSignal) -> Self {
        Self {
            i2c,
            completion,
            config: None,
            interrupt_enabled: false,
            enabled: false,
            held: [0; STAGING_CAPACITY],
            held_len: 0,
            held_address: 0,
        }
    }

    /// Settings recorded by the last successful `init`.
    pub fn bus_config(&self) -> Option<&BusConfig> {
        self.config.as_ref()
    }

    /// Returns `true` once the completion interrupt has been unmasked.
    pub fn interrupt_enabled(&self) -> bool {
        self.interrupt_enabled
    }

    /// Provides mutable access to the wrapped I2C bus.
    pub fn i2c_mut(&mut self) -> &mut I2C {
        &mut self.i2c
    }

    /// Consumes the transport and returns the owned I2C bus.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C> BusTransport for I2cTransport<'_, I2C>
where
    I2C: I2c,
{
    type Error = I2cTransportError;

    fn init(&mut self, config: &BusConfig) -> core::result::Result<(), Self::Error> {
        if config.address > 0x7F {
            return Err(I2cTransportError::InvalidAddress);
        }
        self.config = Some(*config);
        self.held_len = 0;
        Ok(())
    }

    fn enable_interrupt(&mut self) {
        self.interrupt_enabled = true;
    }

    fn enable(&mut self) {
        self.enabled = self.config.is_some();
    }

    fn submit(&mut self, request: TransferRequest<'_>) -> core::result::Result<(), Self::Error> {
        if !self.enabled {
            return Err(I2cTransportError::NotEnabled);
        }
        if request.is_empty() {
            return Err(I2cTransportError::EmptyTransfer);
        }
        let address = request.address();
        if self.held_len > 0 && address != self.held_address {
            return Err(I2cTransportError::AddressMismatch);
        }

        if let TransferRequest::Write {
            bytes, stop: false, ..
        } = request
        {
            let end = self.held_len + bytes.len();
            if end > STAGING_CAPACITY {
                return Err(I2cTransportError::Oversized);
            }
            self.held[self.held_len..end].copy_from_slice(bytes);
            self.held_len = end;
            self.held_address = address;
            self.completion.complete(BusEvent::Done);
            return Ok(());
        }

        let held = &self.held[..self.held_len];
        let result = match request {
            TransferRequest::Write { bytes, .. } if held.is_empty() => self.i2c.write(address, bytes),
            TransferRequest::Write { bytes, .. } => self
                .i2c
                .transaction(address, &mut [Operation::Write(held), Operation::Write(bytes)]),
            TransferRequest::Read { buffer, .. } if held.is_empty() => self.i2c.read(address, buffer),
            TransferRequest::Read { buffer, .. } => self.i2c.write_read(address, held, buffer),
        };
        self.held_len = 0;

        let event = match result {
            Ok(()) => BusEvent::Done,
            Err(err) => classify(err.kind()),
        };
        self.completion.complete(event);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

    fn enabled<'a>(i2c: I2cMock, signal: &'a CompletionSignal) -> I2cTransport<'a, I2cMock> {
        let mut transport = I2cTransport::new(i2c, signal);
        transport.init(&BusConfig::default()).unwrap();
        transport.enable_interrupt();
        transport.enable();
        transport
    }

    #[test]
    fn pointer_write_without_stop_becomes_write_read() {
        let expectations = [I2cTransaction::write_read(
            0x68,
            vec![0x3B],
            vec![0x01, 0x02, 0x03, 0x04, 0xFF, 0xFE],
        )];
        let signal = CompletionSignal::new();
        let mut transport = enabled(I2cMock::new(&expectations), &signal);

        transport
            .submit(TransferRequest::Write {
                address: 0x68,
                bytes: &[0x3B],
                stop: false,
            })
            .unwrap();
        assert_eq!(signal.poll(), Some(BusEvent::Done));

        signal.reset();
        let mut buffer = [0u8; 6];
        transport
            .submit(TransferRequest::Read {
                address: 0x68,
                buffer: &mut buffer,
            })
            .unwrap();
        assert_eq!(signal.poll(), Some(BusEvent::Done));
        assert_eq!(buffer, [0x01, 0x02, 0x03, 0x04, 0xFF, 0xFE]);

        transport.release().done();
    }

    #[test]
    fn write_with_stop_is_a_plain_write() {
        let expectations = [I2cTransaction::write(0x68, vec![0x6B, 0x01])];
        let signal = CompletionSignal::new();
        let mut transport = enabled(I2cMock::new(&expectations), &signal);

        transport
            .submit(TransferRequest::Write {
                address: 0x68,
                bytes: &[0x6B, 0x01],
                stop: true,
            })
            .unwrap();
        assert_eq!(signal.poll(), Some(BusEvent::Done));

        transport.release().done();
    }

    #[test]
    fn bus_errors_complete_with_classified_event() {
        let expectations = [I2cTransaction::write(0x68, vec![0x68, 0x07])
            .with_error(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address))];
        let signal = CompletionSignal::new();
        let mut transport = enabled(I2cMock::new(&expectations), &signal);

        let accepted = transport.submit(TransferRequest::Write {
            address: 0x68,
            bytes: &[0x68, 0x07],
            stop: true,
        });
        assert_eq!(accepted, Ok(()));
        assert_eq!(signal.poll(), Some(BusEvent::AddressNack));

        transport.release().done();
    }

    #[test]
    fn classify_covers_error_kinds() {
        assert_eq!(
            classify(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data)),
            BusEvent::DataNack
        );
        assert_eq!(
            classify(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Unknown)),
            BusEvent::AddressNack
        );
        assert_eq!(classify(ErrorKind::Overrun), BusEvent::Overrun);
        assert_eq!(classify(ErrorKind::Bus), BusEvent::BusError);
        assert_eq!(classify(ErrorKind::ArbitrationLoss), BusEvent::BusError);
        assert_eq!(classify(ErrorKind::Other), BusEvent::BusError);
    }

    #[test]
    fn rejected_submissions_never_complete() {
        let expectations: [I2cTransaction; 0] = [];
        let signal = CompletionSignal::new();
        let mut transport = I2cTransport::new(I2cMock::new(&expectations), &signal);

        let early = transport.submit(TransferRequest::Write {
            address: 0x68,
            bytes: &[0x6B, 0x01],
            stop: true,
        });
        assert_eq!(early, Err(I2cTransportError::NotEnabled));

        transport.init(&BusConfig::default()).unwrap();
        transport.enable();
        let empty = transport.submit(TransferRequest::Read {
            address: 0x68,
            buffer: &mut [],
        });
        assert_eq!(empty, Err(I2cTransportError::EmptyTransfer));
        assert!(signal.is_pending());

        transport.release().done();
    }

    #[test]
    fn init_rejects_eight_bit_address() {
        let expectations: [I2cTransaction; 0] = [];
        let signal = CompletionSignal::new();
        let mut transport = I2cTransport::new(I2cMock::new(&expectations), &signal);

        let config = BusConfig::new().address(0xD0).build();
        assert_eq!(transport.init(&config), Err(I2cTransportError::InvalidAddress));
        transport.enable();
        assert!(transport.bus_config().is_none());

        transport.release().done();
    }
}
