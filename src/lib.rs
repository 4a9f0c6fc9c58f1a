//! Parley - A Lisp-inspired condition system
//!
//! Parley decouples the three concerns conventional exceptions conflate:
//! *signaling* that an exceptional situation occurred, *handling* it at a
//! dynamically-scoped outer frame, and *recovering* through named
//! strategies (restarts) registered by inner code but selected by outer
//! code. First-class non-local exits ([`to_escape`]) are the primitive
//! handlers use to unwind.
//!
//! # The Seven Operators
//!
//! - [`signal`] announces a condition that may be ignored
//! - [`error`] announces a condition that must be handled
//! - [`handling`] installs handlers for the extent of a body
//! - [`to_escape`] opens a named exit point for the extent of a body
//! - [`with_restart`] advertises named recovery strategies
//! - [`invoke_restart`] transfers control to a visible restart
//! - [`available_restart`] checks whether a restart is visible
//!
//! # Example
//!
//! ```
//! use parley::error;
//! use parley::handling;
//! use parley::invoke_restart;
//! use parley::types::Condition;
//! use parley::types::Handler;
//! use parley::types::Restart;
//! use parley::types::RestartArgs;
//! use parley::with_restart;
//!
//! fn reciprocal(value: f64) -> f64 {
//!   with_restart(vec![Restart::new("use-zero", |_| 0.0)], move || {
//!     if value == 0.0 {
//!       error(Condition::new("div-by-zero"));
//!     }
//!
//!     1.0 / value
//!   })
//! }
//!
//! let value = handling(
//!   [Handler::on("div-by-zero", |_| {
//!     invoke_restart("use-zero", RestartArgs::new()).into()
//!   })],
//!   || reciprocal(0.0),
//! );
//!
//! assert_eq!(value, 0.0);
//! ```
//!
//! # Dynamic Extent
//!
//! Each thread owns its handler, restart, and escape stacks. Frames are
//! pushed when their binding form enters its body and popped when the body
//! exits on any path, including non-local transfers, which release every
//! intermediate frame in LIFO order.

mod core;
mod ops;
mod scope;
mod unwind;

pub mod consts;

pub mod types {
  //! Core types of the Parley condition system.

  pub use crate::core::Condition;
  pub use crate::core::Disposition;
  pub use crate::core::Payload;
  pub use crate::core::Symbol;
  pub use crate::core::SymbolTable;
  pub use crate::core::SymbolTableError;
  pub use crate::core::Value;

  pub use crate::ops::Escape;
  pub use crate::ops::Handler;
  pub use crate::ops::Restart;
  pub use crate::ops::RestartArgs;
}

pub use self::ops::available_restart;
pub use self::ops::error;
pub use self::ops::handling;
pub use self::ops::invoke_restart;
pub use self::ops::signal;
pub use self::ops::to_escape;
pub use self::ops::with_restart;
