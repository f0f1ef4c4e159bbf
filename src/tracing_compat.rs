//! Optional tracing integration.
//!
//! With the `tracing-integration` feature these are `tracing`'s own macros.
//! Without it they expand to nothing, so library code can log unconditionally
//! at zero cost.

#[cfg(feature = "tracing-integration")]
pub use tracing::{debug, info, warn};

#[cfg(not(feature = "tracing-integration"))]
mod noop {
    macro_rules! noop_debug {
        ($($arg:tt)*) => {};
    }
    macro_rules! noop_info {
        ($($arg:tt)*) => {};
    }
    macro_rules! noop_warn {
        ($($arg:tt)*) => {};
    }

    pub(crate) use {noop_debug, noop_info, noop_warn};
}

#[cfg(not(feature = "tracing-integration"))]
pub(crate) use noop::{noop_debug as debug, noop_info as info, noop_warn as warn};
