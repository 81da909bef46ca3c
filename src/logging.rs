//! Logging shims.
//!
//! With the `log` feature these forward to the `log` facade; without it they
//! type-check their arguments and compile to nothing. The macros carry private
//! names and are re-exported, since a bare `warn` would clash with the
//! built-in `#[warn]` attribute.

#[cfg(feature = "log")]
macro_rules! __debug {
    ($($arg:tt)+) => { ::log::debug!($($arg)+) };
}

#[cfg(not(feature = "log"))]
macro_rules! __debug {
    ($($arg:tt)+) => {{
        if false {
            let _ = ::core::format_args!($($arg)+);
        }
    }};
}

#[cfg(feature = "log")]
macro_rules! __warn {
    ($($arg:tt)+) => { ::log::warn!($($arg)+) };
}

#[cfg(not(feature = "log"))]
macro_rules! __warn {
    ($($arg:tt)+) => {{
        if false {
            let _ = ::core::format_args!($($arg)+);
        }
    }};
}

pub(crate) use __debug as debug;
pub(crate) use __warn as warn;
