//! `decnum` is an arbitrary-precision decimal floating point
//! library implementing the [General Decimal Arithmetic][gda]
//! division and square root.
//!
//! # Contexts and conditions
//!
//! Every operation takes a read-only [`Context`] (precision,
//! rounding mode, exponent range, clamping) and ORs the
//! [`Condition`]s it raises into a caller-owned set. Conditions
//! are never cleared by an operation and never abort it;
//! whether a trapped condition is an error is up to the caller.
//! See [`Context::trapped`].
//!
//! ```
//! use decnum::prelude::*;
//!
//! let ctx = Context::new(9);
//! let a: Decimal = "2".parse().unwrap();
//! let b: Decimal = "3".parse().unwrap();
//!
//! let mut status = Condition::empty();
//! let mut q = Decimal::zero();
//! decnum::divide(&mut q, &a, &b, &ctx, &mut status);
//! assert_eq!(q.to_string(), "0.666666667");
//! assert_eq!(status, Condition::INEXACT | Condition::ROUNDED);
//! ```
//!
//! # Exact results under memory pressure
//!
//! Results are computed with working buffers sized by the
//! precision. When one cannot be allocated (or, for the square
//! root, the working precision proves insufficient) the operation
//! is retried once at a precision just large enough for any
//! exact result. An exact result found that way is returned as
//! if nothing failed. Otherwise the output is set to
//! [`Decimal::error_sentinel`] and
//! [`MALLOC_ERROR`][Condition::MALLOC_ERROR] is raised.
//!
//! [`Context::with_alloc_limit`] caps the size of these buffers,
//! which makes the failure path deterministic.
//!
//! # Cargo Features
//!
//! - `rand`: Enable [`rand`] support.
//!
//! [gda]: https://speleotrove.com/decimal/decarith.html
//! [`rand`]: https://crates.io/crates/rand

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(clippy::cast_lossless)]
#![deny(clippy::expect_used)]
#![deny(clippy::implicit_saturating_sub)]
#![deny(clippy::missing_panics_doc)]
#![deny(clippy::panic)]
#![deny(clippy::string_slice)]
#![deny(clippy::unimplemented)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::wildcard_imports)]
#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![deny(unused_lifetimes)]
#![deny(unused_qualifications)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod conv;
mod ctx;
mod dec;
mod dectest;
mod div;
mod retry;
mod round;
mod sqrt;
mod uint;
mod util;

pub use conv::ParseError;
pub use ctx::{Condition, Context, ContextError, RoundingMode};
pub use dec::{Decimal, Kind};
pub use div::divide;
pub use sqrt::sqrt;

/// Simplifies importing common items.
pub mod prelude {
    pub use super::{Condition, Context, Decimal, RoundingMode};
}
