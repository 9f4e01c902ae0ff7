//! Best-effort haptic feedback.
//!
//! Terminals cannot vibrate, but the bell is the closest physical nudge most
//! of them offer. Devices that can do neither report `false` and callers move
//! on without treating it as an error.

use std::io::{self, Write};
use std::time::Duration;

pub trait Haptics {
    /// Play `pattern` (alternating on/off durations, starting with "on").
    /// Returns `false` when the device has no haptic support.
    fn vibrate(&mut self, pattern: &[Duration]) -> bool;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoHaptics;

impl Haptics for NoHaptics {
    fn vibrate(&mut self, _pattern: &[Duration]) -> bool {
        false
    }
}

/// Rings the terminal bell once per "on" pulse.
#[derive(Debug)]
pub struct TerminalBell<W: Write> {
    out: W,
}

impl TerminalBell<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn ring(&mut self, pulses: usize) -> io::Result<()> {
        for _ in 0..pulses {
            self.out.write_all(b"\x07")?;
        }
        self.out.flush()
    }
}

impl<W: Write> Haptics for TerminalBell<W> {
    fn vibrate(&mut self, pattern: &[Duration]) -> bool {
        let pulses = pattern.iter().step_by(2).count();
        match self.ring(pulses) {
            Ok(()) => true,
            Err(err) => {
                tracing::debug!(%err, "terminal bell unavailable");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::HAPTIC_PATTERN;

    #[test]
    fn no_haptics_reports_unsupported() {
        assert!(!NoHaptics.vibrate(&HAPTIC_PATTERN));
    }

    #[test]
    fn bell_rings_once_per_pulse() {
        let mut bell = TerminalBell::new(Vec::new());
        assert!(bell.vibrate(&HAPTIC_PATTERN));
        assert_eq!(bell.into_inner(), b"\x07\x07".to_vec());
    }

    struct Broken;
    impl Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("closed"))
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn failing_bell_is_unsupported_not_fatal() {
        let mut bell = TerminalBell::new(Broken);
        assert!(!bell.vibrate(&HAPTIC_PATTERN));
    }
}
