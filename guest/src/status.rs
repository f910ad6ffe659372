//! Decoding of raw `waitpid(2)` status words.
//!
//! Layout: bits 8-15 hold the exit code, bits 0-6 the terminating signal.
//! A zero signal field means the child exited normally.

/// Status word as filled in by `waitpid(2)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawStatus(pub i32);

/// How a child process terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    Exited(u8),
    Signaled(i32),
}

impl RawStatus {
    pub fn is_exited(self) -> bool {
        self.term_signal() == 0
    }

    /// Only meaningful when [`is_exited`](Self::is_exited) holds.
    pub fn exit_code(self) -> u8 {
        ((self.0 & 0xff00) >> 8) as u8
    }

    /// Only meaningful when [`is_exited`](Self::is_exited) does not hold.
    pub fn term_signal(self) -> i32 {
        self.0 & 0x7f
    }

    pub fn outcome(self) -> WaitOutcome {
        if self.is_exited() {
            WaitOutcome::Exited(self.exit_code())
        } else {
            WaitOutcome::Signaled(self.term_signal())
        }
    }
}
