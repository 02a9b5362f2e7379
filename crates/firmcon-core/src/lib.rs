//! # firmcon-core
//!
//! Allocation-free console and formatted-output core for firmware running on
//! multiple harts that share one physical output device.
//!
//! The crate serializes concurrent textual output from independent harts,
//! renders either into caller-supplied fixed buffers or directly to the
//! device through a small staging buffer, and guarantees bounded memory use
//! even when printed output is arbitrarily long. No `unsafe` code is
//! permitted at the crate level, and nothing here allocates.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod console;
pub mod device;
pub mod halt;

pub use console::printf::{FormatArg, dprintf, fatal, printf, snprintf, sprintf};
pub use console::{getc, gets, isprintable, ngets, nputs, putc, puts};
pub use device::{ConsoleDevice, console_device, set_console_device};
pub use halt::{halt, set_halt_handler};
