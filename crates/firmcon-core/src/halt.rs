//! Fatal-halt hook.
//!
//! The platform owns the actual halt mechanism (parking the hart, firmware
//! shutdown, etc.); this module only holds a write-once pointer to it. With
//! no handler registered, [`halt`] spins forever, which is the only thing a
//! scheduler-less target can do.

use spin::Once;

static HALT_HANDLER: Once<fn() -> !> = Once::new();

/// Registers the platform halt mechanism.
///
/// First registration wins; subsequent calls are silently ignored.
pub fn set_halt_handler(handler: fn() -> !) {
    HALT_HANDLER.call_once(|| handler);
}

/// Transfers control to the registered halt mechanism. Never returns.
pub fn halt() -> ! {
    if let Some(handler) = HALT_HANDLER.get() {
        handler();
    }
    loop {
        core::hint::spin_loop();
    }
}
