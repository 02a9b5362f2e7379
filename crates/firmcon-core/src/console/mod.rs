//! Console byte I/O, the output serialization lock, and input helpers.
//!
//! Every device-routed writer in the crate funnels through this module: the
//! single spin lock here guarantees that concurrent harts never interleave
//! output mid-call, and the staging buffer it protects lets the formatting
//! engine stream unboundedly long output through a fixed 256-byte window.
//!
//! Newline translation (LF becomes CRLF) happens at the lowest per-byte
//! layer so every higher-level writer gets it for free. Devices with a bulk
//! write capability receive bytes untranslated; such hardware handles line
//! discipline itself.

pub mod printf;

use spin::{Mutex, MutexGuard};

use crate::device::{ConsoleDevice, console_device};

/// Capacity of the staging buffer used for device-routed rendering.
const STAGE_CAPACITY: usize = 256;

/// Fixed staging buffer for unbounded renders.
///
/// Only reachable through [`lock_output`], so two harts can never touch it
/// at once. Contents are meaningful only between a flush and the next fill.
pub(crate) struct Stage {
    buf: [u8; STAGE_CAPACITY],
    len: usize,
}

impl Stage {
    const fn new() -> Self {
        Stage {
            buf: [0; STAGE_CAPACITY],
            len: 0,
        }
    }

    /// Discards any staged bytes. Called at the start of every staged
    /// render so stale contents from an interrupted flush cannot leak.
    pub(crate) fn reset(&mut self) {
        self.len = 0;
    }

    /// Stages one byte, flushing transparently when the buffer fills.
    pub(crate) fn push(&mut self, byte: u8) {
        self.buf[self.len] = byte;
        self.len += 1;
        if self.len == STAGE_CAPACITY {
            self.flush();
        }
    }

    /// Drains whatever is currently staged to the device.
    pub(crate) fn flush(&mut self) {
        if self.len > 0 {
            device_write_all(&self.buf[..self.len]);
            self.len = 0;
        }
    }
}

static CONSOLE_OUT: Mutex<Stage> = Mutex::new(Stage::new());

/// Acquires the console output lock, spinning until available.
///
/// Whoever holds the guard may touch the staging buffer and issue device
/// I/O without interleaving from other harts.
pub(crate) fn lock_output() -> MutexGuard<'static, Stage> {
    CONSOLE_OUT.lock()
}

/// Length of a NUL-terminated byte string: index of the first `0x00` byte,
/// or the full slice length when none is present.
pub(crate) fn cstr_len(s: &[u8]) -> usize {
    s.iter().position(|&b| b == 0).unwrap_or(s.len())
}

/// Returns whether `byte` is printable ASCII or common whitespace
/// (`\f`, `\r`, `\n`, `\t`).
pub fn isprintable(byte: u8) -> bool {
    (31 < byte && byte < 127) || byte == 0x0c || byte == b'\r' || byte == b'\n' || byte == b'\t'
}

/// Polls the console device for one byte of input.
///
/// Returns `None` when no device is registered or no input is pending.
/// Never blocks.
pub fn getc() -> Option<u8> {
    console_device().and_then(|device| device.read_byte())
}

fn putc_translated(device: &dyn ConsoleDevice, byte: u8) {
    if byte == b'\n' {
        device.write_byte(b'\r');
    }
    device.write_byte(byte);
}

/// Writes a single byte to the console device, translating LF to CRLF.
///
/// No-op when no device is registered.
pub fn putc(byte: u8) {
    if let Some(device) = console_device() {
        putc_translated(device, byte);
    }
}

/// Single write attempt against `device`: bulk capability if present (which
/// may legitimately consume fewer bytes), else per-byte emulation through
/// the translating path, which always reports the full length.
fn device_write(device: &dyn ConsoleDevice, bytes: &[u8]) -> usize {
    match device.write_bytes(bytes) {
        Some(written) => written,
        None => {
            for &byte in bytes {
                putc_translated(device, byte);
            }
            bytes.len()
        }
    }
}

/// Writes `bytes` to the device in full, looping over short bulk writes.
///
/// Callers must hold the output lock. Discards everything when no device is
/// registered.
pub(crate) fn device_write_all(bytes: &[u8]) {
    let Some(device) = console_device() else {
        return;
    };
    let mut done = 0;
    while done < bytes.len() {
        done += device_write(device, &bytes[done..]);
    }
}

/// Writes a NUL-terminated byte string to the console device in full.
///
/// Scans `s` for its NUL terminator (absent one, the whole slice is the
/// string), then writes the string as one contiguous block under the
/// output lock.
pub fn puts(s: &[u8]) {
    let len = cstr_len(s);
    let _guard = lock_output();
    device_write_all(&s[..len]);
}

/// Writes a raw byte sequence to the console device, bypassing formatting
/// and NUL scanning. A single write attempt under the output lock; returns
/// the number of bytes actually written.
pub fn nputs(bytes: &[u8]) -> usize {
    let _guard = lock_output();
    match console_device() {
        Some(device) => device_write(device, bytes),
        None => bytes.len(),
    }
}

/// Reads a line of input into `out`, stopping at `terminator`.
///
/// Polls the device one byte at a time; stops when the terminator is seen,
/// when the device signals no data, or when `out.len() - 1` bytes have been
/// stored. The poll happens before the width check, so the byte that would
/// have exceeded the width is consumed and discarded along with the
/// terminator itself. Always NUL-terminates `out` (when non-empty).
/// Returns the number of data bytes stored, excluding the NUL.
///
/// Not lock-protected: input is assumed single-consumer.
pub fn gets(out: &mut [u8], terminator: u8) -> usize {
    if out.is_empty() {
        return 0;
    }
    let mut stored = 0;
    loop {
        let Some(byte) = getc() else {
            break;
        };
        if byte == terminator || stored + 1 >= out.len() {
            break;
        }
        out[stored] = byte;
        stored += 1;
    }
    out[stored] = 0;
    stored
}

/// Reads up to `out.len()` raw bytes, stopping early the first time the
/// device signals no data. Returns the number of bytes read.
pub fn ngets(out: &mut [u8]) -> usize {
    let mut read = 0;
    while read < out.len() {
        match getc() {
            Some(byte) => {
                out[read] = byte;
                read += 1;
            }
            None => break,
        }
    }
    read
}
