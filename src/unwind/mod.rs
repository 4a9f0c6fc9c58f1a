//! Non-local transfer plumbing riding the host unwind mechanism.
//!
//! Escape invocations and restart invocations unwind the stack with a
//! typed [`Transfer`] payload. Each binding primitive catches the unwind,
//! claims transfers targeting its own binding, and re-raises everything
//! else — foreign transfers and ordinary host panics alike — after its
//! scoped-release guards have run.
//!
//! Transfers are raised with [`resume_unwind`], not `panic!`, so the panic
//! hook does not fire for ordinary control transfers.
//!
//! [`resume_unwind`]: std::panic::resume_unwind

use std::any::Any;
use std::panic;
use std::panic::AssertUnwindSafe;

use crate::core::Symbol;
use crate::core::Value;
use crate::ops::RestartArgs;
use crate::scope::BindingId;

/// The payload carried by a non-local transfer.
///
/// A transfer names its target by [`BindingId`]; binding identifiers are
/// process-wide unique, so a catch site inspecting a payload can decide
/// ownership with a single comparison.
#[derive(Debug)]
pub(crate) enum Transfer {
  /// Unwind to the `to_escape` call that owns `binding`, which returns
  /// `value`.
  Escape { binding: BindingId, value: Value },
  /// Unwind to the `with_restart` call that owns `binding` and run the
  /// strategy named `name` with `args`.
  Restart {
    binding: BindingId,
    name: Symbol,
    args: RestartArgs,
  },
}

impl Transfer {
  /// Returns the binding this transfer targets.
  #[inline]
  pub(crate) fn binding(&self) -> BindingId {
    match self {
      Self::Escape { binding, .. } => *binding,
      Self::Restart { binding, .. } => *binding,
    }
  }

  /// Initiates the transfer.
  ///
  /// Control leaves through the host unwind mechanism and resumes at the
  /// binding primitive owning the target, after every intermediate frame
  /// has released its context entries.
  pub(crate) fn depart(self) -> ! {
    tracing::trace!(
      target: "parley",
      transfer = ?self,
      "depart",
    );

    panic::resume_unwind(Box::new(self))
  }

  /// Reclaims a transfer from a caught unwind payload.
  ///
  /// Foreign payloads (host panics) are handed back for re-raising.
  #[inline]
  pub(crate) fn reclaim(payload: Box<dyn Any + Send>) -> Result<Self, Box<dyn Any + Send>> {
    payload.downcast::<Self>().map(|transfer| *transfer)
  }
}

/// Runs `f`, capturing any unwind that leaves it.
///
/// The captured payload is either a [`Transfer`] or a host panic payload;
/// callers claim the former and re-raise the latter via [`propagate`].
/// Scoped-release guards repair the dynamic context before any payload
/// escapes a primitive, which is what makes the unwind-safety assertion
/// sound.
#[inline]
pub(crate) fn run_protected<F, T>(f: F) -> Result<T, Box<dyn Any + Send>>
where
  F: FnOnce() -> T,
{
  panic::catch_unwind(AssertUnwindSafe(f))
}

/// Continues unwinding with a payload this frame does not own.
#[inline]
pub(crate) fn propagate(payload: Box<dyn Any + Send>) -> ! {
  panic::resume_unwind(payload)
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use std::any::Any;

  use crate::core::Value;
  use crate::scope::BindingId;
  use crate::unwind;
  use crate::unwind::Transfer;

  #[test]
  fn test_reclaim_transfer() {
    let binding: BindingId = BindingId::next();

    let caught: Box<dyn Any + Send> = unwind::run_protected(|| {
      Transfer::Escape {
        binding,
        value: Value::new(1_i32),
      }
      .depart()
    })
    .unwrap_err();

    match Transfer::reclaim(caught) {
      Ok(transfer) => assert_eq!(transfer.binding(), binding),
      Err(_) => panic!("expected a transfer"),
    }
  }

  #[test]
  fn test_reclaim_foreign_payload() {
    let caught: Box<dyn Any + Send> = unwind::run_protected(|| panic!("boom")).unwrap_err();

    assert!(Transfer::reclaim(caught).is_err());
  }
}
