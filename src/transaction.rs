//! Register-oriented transactions over an interrupt-completed bus transport.
//!
//! Every frame follows the same sequence: reset the completion signal,
//! submit the frame, wait for the completion within the configured budget,
//! then map the outcome. The reset always precedes the submission so a
//! completion left over from an earlier frame can never be observed.

use embedded_hal::delay::DelayNs;

use crate::completion::CompletionSignal;
use crate::config::BusConfig;
use crate::error::{Error, Result};
use crate::interface::{BusTransport, TransferRequest};

/// Size of the write staging buffer: register pointer plus up to 13 data bytes.
/// Reads are bounded by the same capacity.
pub const STAGING_CAPACITY: usize = 14;

/// Serialized register access to one target on one bus.
///
/// Owns the transport and the delay used to pace completion polling, and
/// borrows the completion signal the transport reports to. All operations
/// take `&mut self`, so at most one frame is ever outstanding.
pub struct RegisterBus<'a, T, D> {
    transport: T,
    delay: D,
    completion: &'a CompletionSignal,
    config: BusConfig,
    iterations: u32,
    staging: [u8; STAGING_CAPACITY],
    ready: bool,
}

impl<'a, T, D> RegisterBus<'a, T, D> {
    /// Creates a bus that has not been brought up yet.
    pub fn new(transport: T, delay: D, completion: &'a CompletionSignal, config: BusConfig) -> Self {
        Self {
            transport,
            delay,
            completion,
            iterations: config.wait.iterations(),
            config,
            staging: [0; STAGING_CAPACITY],
            ready: false,
        }
    }

    /// Consumes the bus and returns the owned transport and delay.
    pub fn release(self) -> (T, D) {
        (self.transport, self.delay)
    }

    /// Provides mutable access to the underlying transport.
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Provides mutable access to the polling delay.
    pub fn delay_mut(&mut self) -> &mut D {
        &mut self.delay
    }

    /// Returns the bus configuration.
    pub fn config(&self) -> &BusConfig {
        &self.config
    }

    /// Poll iterations applied to each completion wait.
    pub fn wait_iterations(&self) -> u32 {
        self.iterations
    }

    /// Returns `true` after a successful [`init`](Self::init).
    pub fn is_ready(&self) -> bool {
        self.ready
    }
}

impl<T, D, E> RegisterBus<'_, T, D>
where
    T: BusTransport<Error = E>,
    D: DelayNs,
{
    /// Brings the peripheral up: pins and frequency, completion handler,
    /// interrupt unmask, controller enable.
    ///
    /// A failure here is fatal for the session. The bus stays unusable and
    /// every later transaction returns [`Error::NotReady`].
    pub fn init(&mut self) -> Result<(), E> {
        info!(
            "bus init: addr {=u8:#x}, {=u32} Hz",
            self.config.address,
            self.config.frequency.hz()
        );
        self.ready = false;

        if let Err(err) = self.transport.init(&self.config) {
            let err = Error::InitFailed(err);
            error!("bus init failed (code {=u8})", err.code());
            return Err(err);
        }
        self.transport.enable_interrupt();
        self.transport.enable();

        self.ready = true;
        Ok(())
    }

    /// Writes one register with a two-byte `[reg, value]` frame.
    pub fn write_register(&mut self, register: u8, value: u8) -> Result<(), E> {
        self.ensure_ready()?;
        let packet = [register, value];
        let address = self.config.address;
        self.exchange(TransferRequest::Write {
            address,
            bytes: &packet,
            stop: true,
        })
        .inspect_err(|err| {
            warn!("write {=u8:#x} failed (code {=u8})", register, err.code());
        })
    }

    /// Writes consecutive registers starting at `register` in one frame.
    ///
    /// The frame is assembled in the staging buffer as `[register, data..]`,
    /// so `data` must hold between 1 and `STAGING_CAPACITY - 1` bytes.
    pub fn write_registers(&mut self, register: u8, data: &[u8]) -> Result<(), E> {
        self.ensure_ready()?;
        if data.is_empty() || data.len() >= STAGING_CAPACITY {
            return Err(Error::InvalidLength);
        }

        let frame_len = data.len() + 1;
        self.staging[0] = register;
        self.staging[1..frame_len].copy_from_slice(data);

        let address = self.config.address;
        let request = TransferRequest::Write {
            address,
            bytes: &self.staging[..frame_len],
            stop: true,
        };
        Self::run(
            &mut self.transport,
            &mut self.delay,
            self.completion,
            self.iterations,
            self.config.wait.interval_ns(),
            request,
        )
        .inspect_err(|err| {
            warn!(
                "block write {=u8:#x}+{=usize} failed (code {=u8})",
                register,
                data.len(),
                err.code()
            );
        })
    }

    /// Reads `buf.len()` consecutive registers starting at `register`.
    ///
    /// Two frames: the register pointer written without a stop, then the
    /// read. If the pointer write fails the read is never submitted.
    pub fn read_registers(&mut self, register: u8, buf: &mut [u8]) -> Result<(), E> {
        self.ensure_ready()?;
        if buf.is_empty() || buf.len() > STAGING_CAPACITY {
            return Err(Error::InvalidLength);
        }

        let address = self.config.address;
        let pointer = [register];
        self.exchange(TransferRequest::Write {
            address,
            bytes: &pointer,
            stop: false,
        })
        .inspect_err(|err| {
            warn!("pointer write {=u8:#x} failed (code {=u8})", register, err.code());
        })?;

        let len = buf.len();
        self.exchange(TransferRequest::Read {
            address,
            buffer: buf,
        })
        .inspect_err(|err| {
            warn!(
                "read {=u8:#x}+{=usize} failed (code {=u8})",
                register,
                len,
                err.code()
            );
        })
    }

    fn ensure_ready(&self) -> Result<(), E> {
        if self.ready {
            Ok(())
        } else {
            Err(Error::NotReady)
        }
    }

    fn exchange(&mut self, request: TransferRequest<'_>) -> Result<(), E> {
        Self::run(
            &mut self.transport,
            &mut self.delay,
            self.completion,
            self.iterations,
            self.config.wait.interval_ns(),
            request,
        )
    }

    // Split from `exchange` so the staging buffer can be borrowed alongside
    // the transport.
    fn run(
        transport: &mut T,
        delay: &mut D,
        completion: &CompletionSignal,
        iterations: u32,
        interval_ns: u32,
        request: TransferRequest<'_>,
    ) -> Result<(), E> {
        completion.reset();
        transport
            .submit(request)
            .map_err(Error::SubmissionRejected)?;

        let outcome = completion.wait(iterations, interval_ns, delay);
        trace!("transfer outcome {}", outcome);
        outcome.into_result()
    }
}
