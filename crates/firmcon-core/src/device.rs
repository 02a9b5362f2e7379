//! Console device capability interface and registry.
//!
//! A console device is any subset of `{read one byte, write one byte, write
//! many bytes}`; unimplemented capabilities degrade gracefully (reads report
//! no data, writes are discarded, bulk writes fall back to per-byte
//! emulation in the I/O layer).
//!
//! The registry holds at most one device for the whole process. Registration
//! is first-writer-wins and permanent: a later probe must not override an
//! already-working console, and "no device" is a valid permanent state.

use spin::Once;

/// Capability set of a console output/input device.
///
/// Implementations override whichever capabilities the hardware has. The
/// defaults model an absent capability: reads report no data and single-byte
/// writes discard their argument.
pub trait ConsoleDevice: Sync {
    /// Diagnostic name of the device.
    fn name(&self) -> &'static str;

    /// Reads one pending byte, or `None` when no input is available.
    ///
    /// Must never block; polled by the input helpers.
    fn read_byte(&self) -> Option<u8> {
        None
    }

    /// Writes a single byte to the device.
    fn write_byte(&self, _byte: u8) {}

    /// Writes many bytes at once, returning how many were consumed.
    ///
    /// `None` means the device has no bulk-write capability and the caller
    /// should fall back to [`ConsoleDevice::write_byte`]. A `Some(n)` with
    /// `n < bytes.len()` is a legitimate short write; callers loop until the
    /// full length is consumed.
    fn write_bytes(&self, _bytes: &[u8]) -> Option<usize> {
        None
    }
}

static CONSOLE_DEVICE: Once<&'static dyn ConsoleDevice> = Once::new();

/// Returns the registered console device, if any.
pub fn console_device() -> Option<&'static dyn ConsoleDevice> {
    CONSOLE_DEVICE.get().copied()
}

/// Registers the console device.
///
/// First registration wins; subsequent calls are silently ignored. Must be
/// called before concurrent use begins; the registry is write-once and the
/// device is never unregistered.
pub fn set_console_device(device: &'static dyn ConsoleDevice) {
    CONSOLE_DEVICE.call_once(|| device);
}
