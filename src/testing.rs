//! Scripted transport and clock doubles shared by the unit tests.

use std::collections::VecDeque;

use embedded_hal::delay::DelayNs;

use crate::completion::{BusEvent, CompletionSignal};
use crate::config::BusConfig;
use crate::interface::{BusTransport, Direction, TransferRequest};

/// Behaviour of the fake for one submitted frame.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Step {
    /// Complete immediately with the given event.
    Complete(BusEvent),
    /// Fill the read buffer with these bytes and complete with `Done`.
    Respond(&'static [u8]),
    /// Accept the frame but never complete it.
    Silent,
    /// Refuse the frame at submission time.
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FakeError {
    Init,
    Rejected,
}

/// What the fake saw for one submitted frame.
#[derive(Debug, Clone)]
pub(crate) struct Submission {
    pub direction: Direction,
    pub address: u8,
    pub bytes: Vec<u8>,
    pub len: usize,
    pub stop: bool,
    /// Whether the completion signal was pending when the frame arrived.
    pub pending_at_submit: bool,
}

pub(crate) struct FakeTransport<'a> {
    completion: &'a CompletionSignal,
    script: VecDeque<Step>,
    submissions: Vec<Submission>,
    lifecycle: Vec<&'static str>,
    fail_init: bool,
}

impl<'a> FakeTransport<'a> {
    pub fn new(completion: &'a CompletionSignal) -> Self {
        Self {
            completion,
            script: VecDeque::new(),
            submissions: Vec::new(),
            lifecycle: Vec::new(),
            fail_init: false,
        }
    }

    /// Steps consumed one per submission; once exhausted every frame completes with `Done`.
    pub fn script<I: IntoIterator<Item = Step>>(mut self, steps: I) -> Self {
        self.script.extend(steps);
        self
    }

    pub fn fail_init(mut self) -> Self {
        self.fail_init = true;
        self
    }

    pub fn submissions(&self) -> &[Submission] {
        &self.submissions
    }

    pub fn lifecycle(&self) -> &[&'static str] {
        &self.lifecycle
    }

    /// Register pointers of the writes submitted so far, in order.
    pub fn written_registers(&self) -> Vec<u8> {
        self.submissions
            .iter()
            .filter(|s| s.direction == Direction::Write)
            .map(|s| s.bytes[0])
            .collect()
    }
}

impl BusTransport for FakeTransport<'_> {
    type Error = FakeError;

    fn init(&mut self, _config: &BusConfig) -> Result<(), Self::Error> {
        self.lifecycle.push("init");
        if self.fail_init {
            Err(FakeError::Init)
        } else {
            Ok(())
        }
    }

    fn enable_interrupt(&mut self) {
        self.lifecycle.push("enable_interrupt");
    }

    fn enable(&mut self) {
        self.lifecycle.push("enable");
    }

    fn submit(&mut self, request: TransferRequest<'_>) -> Result<(), Self::Error> {
        let step = self.script.pop_front().unwrap_or(Step::Complete(BusEvent::Done));
        if let Step::Reject = step {
            return Err(FakeError::Rejected);
        }

        let pending_at_submit = self.completion.is_pending();
        let direction = request.direction();
        let address = request.address();
        let len = request.len();
        let (bytes, stop) = match request {
            TransferRequest::Write { bytes, stop, .. } => (bytes.to_vec(), stop),
            TransferRequest::Read { buffer, .. } => {
                if let Step::Respond(data) = step {
                    let n = data.len().min(buffer.len());
                    buffer[..n].copy_from_slice(&data[..n]);
                }
                (Vec::new(), true)
            }
        };
        self.submissions.push(Submission {
            direction,
            address,
            bytes,
            len,
            stop,
            pending_at_submit,
        });

        match step {
            Step::Complete(event) => {
                self.completion.complete(event);
            }
            Step::Respond(_) => {
                self.completion.complete(BusEvent::Done);
            }
            Step::Silent | Step::Reject => {}
        }
        Ok(())
    }
}

/// `DelayNs` that counts calls and can play the interrupt: on the n-th
/// delay it completes a signal once.
pub(crate) struct CountingDelay<'a> {
    calls: u32,
    total_ns: u64,
    fire: Option<(u32, &'a CompletionSignal, BusEvent)>,
}

impl<'a> CountingDelay<'a> {
    pub fn new() -> Self {
        Self {
            calls: 0,
            total_ns: 0,
            fire: None,
        }
    }

    pub fn fire_after(mut self, calls: u32, signal: &'a CompletionSignal, event: BusEvent) -> Self {
        self.fire = Some((self.calls + calls, signal, event));
        self
    }

    pub fn calls(&self) -> u32 {
        self.calls
    }

    pub fn total_ns(&self) -> u64 {
        self.total_ns
    }
}

impl DelayNs for CountingDelay<'_> {
    fn delay_ns(&mut self, ns: u32) {
        self.calls += 1;
        self.total_ns += u64::from(ns);
        if let Some((at, signal, event)) = self.fire {
            if self.calls == at {
                signal.complete(event);
                self.fire = None;
            }
        }
    }
}
