//! Host-side conformance fixtures for `firmcon-core`.
//!
//! The console device registry is write-once per process, so every scenario
//! that registers a device lives in its own integration-test binary under
//! `tests/`. This crate provides the capture and scripted devices those
//! binaries share.

use std::collections::VecDeque;

use firmcon_core::ConsoleDevice;
use parking_lot::Mutex;

/// Capture device exposing only the single-byte write capability.
///
/// All output takes the per-byte emulation path, so LF -> CRLF translation
/// is observable in the captured stream.
pub struct ByteCaptureDevice {
    data: Mutex<Vec<u8>>,
}

impl ByteCaptureDevice {
    pub const fn new() -> Self {
        ByteCaptureDevice {
            data: Mutex::new(Vec::new()),
        }
    }

    pub fn contents(&self) -> Vec<u8> {
        self.data.lock().clone()
    }

    pub fn clear(&self) {
        self.data.lock().clear();
    }
}

impl ConsoleDevice for ByteCaptureDevice {
    fn name(&self) -> &'static str {
        "byte-capture"
    }

    fn write_byte(&self, byte: u8) {
        self.data.lock().push(byte);
    }
}

/// Capture device with a bulk-write capability that consumes at most
/// `chunk` bytes per call (`chunk >= 1`), exercising the short-write loop
/// in the I/O layer. Bulk writes bypass newline translation.
pub struct BulkCaptureDevice {
    chunk: usize,
    data: Mutex<Vec<u8>>,
}

impl BulkCaptureDevice {
    pub const fn new(chunk: usize) -> Self {
        BulkCaptureDevice {
            chunk,
            data: Mutex::new(Vec::new()),
        }
    }

    pub fn contents(&self) -> Vec<u8> {
        self.data.lock().clone()
    }

    pub fn clear(&self) {
        self.data.lock().clear();
    }
}

impl ConsoleDevice for BulkCaptureDevice {
    fn name(&self) -> &'static str {
        "bulk-capture"
    }

    fn write_byte(&self, byte: u8) {
        self.data.lock().push(byte);
    }

    fn write_bytes(&self, bytes: &[u8]) -> Option<usize> {
        let take = bytes.len().min(self.chunk);
        self.data.lock().extend_from_slice(&bytes[..take]);
        Some(take)
    }
}

/// Input device fed from a fixed byte script; reads report no data once the
/// script is exhausted. Writes are discarded.
pub struct ScriptedInputDevice {
    input: Mutex<VecDeque<u8>>,
}

impl ScriptedInputDevice {
    pub const fn new() -> Self {
        ScriptedInputDevice {
            input: Mutex::new(VecDeque::new()),
        }
    }

    pub fn feed(&self, bytes: &[u8]) {
        self.input.lock().extend(bytes.iter().copied());
    }
}

impl ConsoleDevice for ScriptedInputDevice {
    fn name(&self) -> &'static str {
        "scripted-input"
    }

    fn read_byte(&self) -> Option<u8> {
        self.input.lock().pop_front()
    }
}

/// Input device that never runs dry: every read yields the same byte.
pub struct EndlessInputDevice {
    byte: u8,
}

impl EndlessInputDevice {
    pub const fn new(byte: u8) -> Self {
        EndlessInputDevice { byte }
    }
}

impl ConsoleDevice for EndlessInputDevice {
    fn name(&self) -> &'static str {
        "endless-input"
    }

    fn read_byte(&self) -> Option<u8> {
        Some(self.byte)
    }
}
