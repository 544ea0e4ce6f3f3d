//! Error handling primitives for the MPU-6050 driver.

/// Crate-wide result type alias.
pub type Result<T, E> = core::result::Result<T, Error<E>>;

/// Error variants produced by the driver.
///
/// `E` is the synchronous error type of the bus transport, reported when a
/// transfer is refused at submission time or when the peripheral fails to
/// come up. Everything that happens on the wire after a transfer has been
/// accepted is classified by the completion event instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// The transport refused the transfer before touching the bus.
    SubmissionRejected(E),
    /// The target did not acknowledge its address.
    AddressNack,
    /// The target did not acknowledge a data byte.
    DataNack,
    /// The controller's receive buffer overflowed.
    Overrun,
    /// Any other bus fault (arbitration loss, misplaced start/stop, ...).
    BusError,
    /// No completion arrived within the wait budget.
    Timeout,
    /// Peripheral bring-up failed; the bus must not be used.
    InitFailed(E),
    /// Transfer length is zero or exceeds the staging capacity.
    InvalidLength,
    /// The provided configuration parameters are invalid.
    InvalidConfig,
    /// A transaction was attempted before the bus was initialized.
    NotReady,
    /// `WHO_AM_I` did not match the expected device identity.
    DeviceIdMismatch,
}

impl<E> Error<E> {
    /// Stable numeric code used when reporting failures in logs.
    pub const fn code(&self) -> u8 {
        match self {
            Self::SubmissionRejected(_) => 1,
            Self::AddressNack => 2,
            Self::DataNack => 3,
            Self::Overrun => 4,
            Self::BusError => 5,
            Self::Timeout => 6,
            Self::InitFailed(_) => 7,
            Self::InvalidLength => 8,
            Self::InvalidConfig => 9,
            Self::NotReady => 10,
            Self::DeviceIdMismatch => 11,
        }
    }

    /// Returns `true` for failures that leave the sensor unusable for the session.
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::InitFailed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::TransferOutcome;

    #[test]
    fn outcomes_map_to_distinct_errors() {
        assert_eq!(TransferOutcome::Success.into_result::<()>(), Ok(()));

        let cases = [
            (TransferOutcome::AddressNack, Error::AddressNack),
            (TransferOutcome::DataNack, Error::DataNack),
            (TransferOutcome::Overrun, Error::Overrun),
            (TransferOutcome::BusError, Error::BusError),
            (TransferOutcome::Timeout, Error::Timeout),
        ];
        for (outcome, expected) in cases {
            assert_eq!(outcome.into_result::<()>(), Err(expected));
        }
    }

    #[test]
    fn only_init_failure_is_fatal() {
        assert!(Error::InitFailed(()).is_fatal());
        assert!(!Error::<()>::Timeout.is_fatal());
        assert!(!Error::<()>::AddressNack.is_fatal());
        assert!(!Error::SubmissionRejected(()).is_fatal());
    }

    #[test]
    fn codes_are_unique() {
        let errors: [Error<()>; 11] = [
            Error::SubmissionRejected(()),
            Error::AddressNack,
            Error::DataNack,
            Error::Overrun,
            Error::BusError,
            Error::Timeout,
            Error::InitFailed(()),
            Error::InvalidLength,
            Error::InvalidConfig,
            Error::NotReady,
            Error::DeviceIdMismatch,
        ];
        for (i, a) in errors.iter().enumerate() {
            for b in &errors[i + 1..] {
                assert_ne!(a.code(), b.code());
            }
        }
    }
}
