//! Capturing the process snapshot the tree is built from.

mod darwin;
mod linux;
mod ps;

pub use darwin::DarwinPs;
pub use linux::LinuxPs;

use crate::prelude::*;
use crate::process::ProcessRecord;

/// Detects whether a source can be used on the current system
pub trait PlatformDetector {
    fn detect() -> bool;
}

/// Something able to list every process currently running
pub trait ProcessSource {
    /// Human readable name, used in logs
    fn name(&self) -> &'static str;

    /// Capture a snapshot of all processes
    ///
    /// Individual entries that cannot be understood are dropped, failing to list processes
    /// at all is an error.
    fn processes(&self) -> Result<Vec<ProcessRecord>>;
}

/// Pick the process source matching the current platform
pub fn get_source() -> Result<Box<dyn ProcessSource>> {
    if LinuxPs::detect() {
        return Ok(Box::new(LinuxPs));
    }

    if DarwinPs::detect() {
        return Ok(Box::new(DarwinPs));
    }

    bail!("Unsupported platform: {}", std::env::consts::OS)
}
