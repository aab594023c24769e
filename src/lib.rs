//! # haarstream - streaming multi-level Haar wavelet transform
//!
//! Reads a power-of-two number of samples and emits every detail
//! coefficient of a pyramid Haar decomposition, finest level first,
//! followed by the single final scaling coefficient. Coefficients are
//! handed to a [`CoefficientSink`] the moment they are computed.
//!
//! ## Features
//!
//! - **Ping-pong buffers**: one auxiliary allocation the size of the input,
//!   reused at halving lengths across levels
//! - **Orthonormal scaling**: `1/√2` per level, so signal energy is preserved
//! - **Streaming emission** through closures or the text sink
//! - **no_std + alloc** core (engine, buffer, validation)
//!
//! ## Cargo Features
//!
//! - `std` (default): text reader, [`sink::TextSink`] and [`pipeline::run`]
//! - `verbose-logging`: per-level and per-stage logging through `log`
//!
//! ## Example
//!
//! ```
//! use haarstream::haar::forward_to_vec;
//!
//! let coeffs = forward_to_vec(&[1.0, 1.0, 1.0, 1.0]).unwrap();
//! assert_eq!(coeffs.len(), 4);
//! assert!((coeffs[3] - 2.0).abs() < 1e-12);
//! ```
//!
//! ## License
//!
//! Licensed under either of
//! - Apache License, Version 2.0 ([LICENSE-APACHE](LICENSE-APACHE) or https://www.apache.org/licenses/LICENSE-2.0)
//! - MIT license ([LICENSE-MIT](LICENSE-MIT) or https://opensource.org/licenses/MIT)
//!
//! at your option.

#![no_std]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

/// Log through `log` when `verbose-logging` is enabled, otherwise compile
/// the arguments away.
macro_rules! vlog {
    ($lvl:ident, $($arg:tt)+) => {{
        #[cfg(feature = "verbose-logging")]
        log::$lvl!($($arg)+);
        #[cfg(not(feature = "verbose-logging"))]
        let _ = format_args!($($arg)+);
    }};
}
pub(crate) use vlog;

/// Error type and exit codes
pub mod error;

/// Haar transform engine
///
/// Level-by-level decomposition with streaming emission.
pub mod haar;

/// Sample buffer
///
/// Growable storage, token reader and power-of-two validation.
pub mod input;

/// Coefficient sinks and output formatting
pub mod sink;

/// Read, validate, transform and print in one call.
#[cfg(feature = "std")]
pub mod pipeline;

pub use error::HaarError;
pub use haar::{forward, forward_to_vec, HaarEngine, Stage};
pub use input::SampleBuffer;
pub use sink::{CoefficientSink, OutputFormat};
