//! Completion hand-off between the bus interrupt and the waiting caller.
//!
//! A [`CompletionSignal`] is a single atomic cell. The waiter resets it to
//! pending immediately before submitting a transfer, and the transport's
//! completion callback (normally running in interrupt context) stores the
//! classified [`BusEvent`] exactly once. The waiter then polls the cell with
//! a bounded iteration budget.
//!
//! Only one transfer may be outstanding per signal. The driver enforces this
//! by taking `&mut self` for every transaction.

use core::sync::atomic::{AtomicU8, Ordering};

use embedded_hal::delay::DelayNs;

use crate::error::Error;

const PENDING: u8 = 0;

/// Terminal event reported by the transport for one accepted transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum BusEvent {
    /// Transfer finished and every byte was acknowledged.
    Done = 1,
    /// Target did not acknowledge its address.
    AddressNack = 2,
    /// Target did not acknowledge a data byte.
    DataNack = 3,
    /// Receive overrun in the controller.
    Overrun = 4,
    /// Generic bus fault.
    BusError = 5,
}

impl BusEvent {
    const fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            1 => Some(Self::Done),
            2 => Some(Self::AddressNack),
            3 => Some(Self::DataNack),
            4 => Some(Self::Overrun),
            5 => Some(Self::BusError),
            _ => None,
        }
    }
}

/// Result of waiting on one transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransferOutcome {
    /// Transfer completed; read buffers hold valid data.
    Success,
    /// Address phase was not acknowledged.
    AddressNack,
    /// A data byte was not acknowledged.
    DataNack,
    /// Receive overrun.
    Overrun,
    /// Generic bus fault.
    BusError,
    /// The wait budget ran out before a completion arrived.
    Timeout,
}

impl TransferOutcome {
    /// Maps the outcome onto the driver error taxonomy.
    pub fn into_result<E>(self) -> core::result::Result<(), Error<E>> {
        match self {
            Self::Success => Ok(()),
            Self::AddressNack => Err(Error::AddressNack),
            Self::DataNack => Err(Error::DataNack),
            Self::Overrun => Err(Error::Overrun),
            Self::BusError => Err(Error::BusError),
            Self::Timeout => Err(Error::Timeout),
        }
    }
}

impl From<BusEvent> for TransferOutcome {
    fn from(event: BusEvent) -> Self {
        match event {
            BusEvent::Done => Self::Success,
            BusEvent::AddressNack => Self::AddressNack,
            BusEvent::DataNack => Self::DataNack,
            BusEvent::Overrun => Self::Overrun,
            BusEvent::BusError => Self::BusError,
        }
    }
}

/// Single-writer/single-reader completion flag.
///
/// Can live in a `static` so an interrupt handler can reach it.
#[derive(Debug)]
pub struct CompletionSignal {
    state: AtomicU8,
}

impl CompletionSignal {
    /// Creates a signal in the pending state.
    pub const fn new() -> Self {
        Self {
            state: AtomicU8::new(PENDING),
        }
    }

    /// Clears the signal back to pending.
    ///
    /// Must happen before the matching transfer is submitted, otherwise the
    /// completion of the previous transfer could be observed.
    pub fn reset(&self) {
        self.state.store(PENDING, Ordering::Release);
    }

    /// Records the terminal event of the outstanding transfer.
    ///
    /// Only the first event after a reset is kept. Returns `false` when the
    /// signal had already been completed.
    pub fn complete(&self, event: BusEvent) -> bool {
        self.state
            .compare_exchange(PENDING, event as u8, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Returns the recorded event, or `None` while still pending.
    pub fn poll(&self) -> Option<BusEvent> {
        BusEvent::from_raw(self.state.load(Ordering::Acquire))
    }

    /// Returns `true` while no completion has been recorded since the last reset.
    pub fn is_pending(&self) -> bool {
        self.poll().is_none()
    }

    /// Polls the signal with a bounded budget.
    ///
    /// The signal is checked once up front and once after each of the
    /// `iterations` delays of `poll_interval_ns`. A completion that lands
    /// during the final delay therefore still wins over the timeout. The
    /// delay is called exactly `iterations` times when nothing completes.
    pub fn wait<D: DelayNs>(
        &self,
        iterations: u32,
        poll_interval_ns: u32,
        delay: &mut D,
    ) -> TransferOutcome {
        let mut remaining = iterations;
        loop {
            if let Some(event) = self.poll() {
                return event.into();
            }
            if remaining == 0 {
                return TransferOutcome::Timeout;
            }
            remaining -= 1;
            delay.delay_ns(poll_interval_ns);
        }
    }
}

impl Default for CompletionSignal {
    fn default() -> Self {
        Self::new()
    }
}
