use std::fmt::Debug;
use std::fmt::Formatter;
use std::fmt::Result;
use std::marker::PhantomData;

use crate::core::Condition;
use crate::core::Payload;
use crate::core::Value;
use crate::core::fatal;
use crate::ops::error;
use crate::scope;
use crate::scope::BindingId;
use crate::scope::EscapeFrame;
use crate::scope::EscapeGuard;
use crate::scope::FrameId;
use crate::unwind;
use crate::unwind::Transfer;

// -----------------------------------------------------------------------------
// Escape
// -----------------------------------------------------------------------------

/// A first-class non-local exit bound by [`to_escape`].
///
/// The handle is a small `Copy` value capturing the identity of its exit
/// point. It may be invoked from any dynamic descendant of the `to_escape`
/// body — including from inside a handler action or a restart strategy —
/// for as long as the body is executing.
///
/// Invoking the handle after its `to_escape` has returned signals the
/// [`ESCAPE_EXPIRED`] condition via [`error`].
///
/// [`ESCAPE_EXPIRED`]: crate::types::Symbol::ESCAPE_EXPIRED
/// [`error`]: crate::error
pub struct Escape<T> {
  binding: BindingId,
  marker: PhantomData<fn(T) -> T>,
}

impl<T> Escape<T> {
  /// Creates a handle targeting `binding`.
  #[inline]
  pub(crate) const fn new(binding: BindingId) -> Self {
    Self {
      binding,
      marker: PhantomData,
    }
  }
}

impl<T> Escape<T>
where
  T: Payload,
{
  /// Unwinds to the binding `to_escape` call, which returns `value`.
  ///
  /// Every handler, restart, and escape frame between the call site and
  /// the exit point is released as the unwind crosses its binding form.
  ///
  /// If the exit point is no longer open on the calling thread, the
  /// [`ESCAPE_EXPIRED`] condition is signaled via [`error`] instead; an
  /// expired escape cannot deliver a value, so a handler that settles
  /// that condition by returning still cannot resume this call.
  ///
  /// [`ESCAPE_EXPIRED`]: crate::types::Symbol::ESCAPE_EXPIRED
  /// [`error`]: crate::error
  pub fn escape(self, value: T) -> ! {
    let open: bool = scope::with(|ctx| ctx.has_escape(self.binding));

    if !open {
      error(Condition::escape_expired());
      fatal!("an expired escape cannot deliver a value");
    }

    Transfer::Escape {
      binding: self.binding,
      value: Value::new(value),
    }
    .depart()
  }
}

impl<T> Clone for Escape<T> {
  #[inline]
  fn clone(&self) -> Self {
    *self
  }
}

impl<T> Copy for Escape<T> {}

impl<T> PartialEq for Escape<T> {
  #[inline]
  fn eq(&self, other: &Self) -> bool {
    self.binding == other.binding
  }
}

impl<T> Debug for Escape<T> {
  fn fmt(&self, f: &mut Formatter<'_>) -> Result {
    f.debug_struct("Escape")
      .field("binding", &self.binding)
      .finish()
  }
}

// -----------------------------------------------------------------------------
// To Escape
// -----------------------------------------------------------------------------

/// Opens a named exit point for the dynamic extent of `body`.
///
/// The body receives an [`Escape`] handle; calling it unwinds every frame
/// between the call site and this `to_escape`, releasing each one's
/// context entries, and makes `to_escape` return the carried value.
///
/// Returns `body`'s value on normal exit. Transfers targeting an outer
/// binding, and host panics, release this frame and keep unwinding.
///
/// # Examples
///
/// ```
/// use parley::to_escape;
///
/// let value = to_escape(|exit: parley::types::Escape<&str>| {
///   exit.escape("done")
/// });
///
/// assert_eq!(value, "done");
/// ```
pub fn to_escape<F, T>(body: F) -> T
where
  F: FnOnce(Escape<T>) -> T,
  T: Payload,
{
  let binding: BindingId = BindingId::next();
  let frame: FrameId = FrameId::next();

  scope::with(|ctx| ctx.push_escape(EscapeFrame { binding, frame }));

  let guard: EscapeGuard = EscapeGuard::new(frame);
  let exit: Escape<T> = Escape::new(binding);

  match unwind::run_protected(|| body(exit)) {
    Ok(value) => {
      drop(guard);
      value
    }
    Err(payload) => match Transfer::reclaim(payload) {
      Ok(transfer) if transfer.binding() == binding => {
        drop(guard);

        match transfer {
          Transfer::Escape { value, .. } => match value.downcast::<T>() {
            Some(value) => value,
            None => fatal!("escape payload type mismatch"),
          },
          Transfer::Restart { .. } => fatal!("restart transfer claimed by an escape frame"),
        }
      }
      Ok(transfer) => {
        drop(guard);
        transfer.depart()
      }
      Err(payload) => {
        drop(guard);
        unwind::propagate(payload)
      }
    },
  }
}
