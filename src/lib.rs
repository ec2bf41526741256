//! Scoped Tracer - conditional, environment-gated debug tracing.
//!
//! This crate provides one mechanism: a trace handle that conditionally
//! writes a line to stderr, depending on environment variables the user
//! controls from the shell before running the program.
//!
//! - **config**: the gating parameters, read once per process from
//!   `TRACEGROUP`, `TRACELEVEL` and `TRACEONLY`
//! - **context**: process-scoped state (configuration, serial counter,
//!   output sink), injectable for tests and embedders
//! - **handle**: the scoped [`TraceHandle`] and the one-shot [`trace`]
//!   function
//!
//! A line is written if the caller's condition is true, the handle's group
//! is contained in `TRACEGROUP`, and its level compares favorably to
//! `TRACELEVEL` ("at most" by default, "exactly" when `TRACEONLY` is
//! `true`). Every armed handle gets a unique ascending serial that tags all
//! of its lines:
//!
//! ```text
//! Tracer: [<serial>][<group>, <level>] <message>
//! ```
//!
//! The intended use is a handle per trace site, with groups assigned per
//! module or type and higher levels carrying higher amounts of detail.
//!
//! # Example
//!
//! ```rust
//! use scoped_tracer::TraceHandle;
//!
//! fn foo_function() {
//!     // Entering message: group "Foo", level 5.
//!     TraceHandle::new(true, "Foo", 5, "Entering foo_function()");
//!
//!     // Higher level of detail; the handle keeps its serial across prints
//!     // and writes a matching -exit- line when dropped.
//!     let mut tt = TraceHandle::new(true, "Foo", 10, "Doing some detailed calculations");
//!     for i in 0..10 {
//!         tt.print(true, &format!("Iteration {i}"));
//!     }
//! }
//! ```
//!
//! With `TRACEGROUP=Foo` and `TRACELEVEL=5` only the entering line appears;
//! raising `TRACELEVEL` to 10 also shows the detail lines and their exit
//! line. Unsetting `TRACEGROUP` silences everything.

pub mod config;
pub mod context;
pub mod handle;

// Re-exports for convenience
pub use config::{TraceConfig, TraceConfigError};
pub use context::TraceContext;
pub use handle::{trace, TraceHandle};
