//! Frame records stored on the per-thread dynamic context stacks.

use std::fmt::Debug;
use std::fmt::Formatter;
use std::fmt::Result;
use std::rc::Rc;

use crate::core::Condition;
use crate::core::Disposition;
use crate::core::Symbol;
use crate::scope::BindingId;
use crate::scope::FrameId;

/// A handler action invoked when its matcher accepts a condition.
///
/// Actions run at the signal site, on top of the signaling frames, so they
/// can still see every restart and escape that was visible when the
/// condition was announced.
pub(crate) type HandlerAction = Rc<dyn Fn(&Condition) -> Disposition>;

/// A handler predicate deciding whether an action applies to a condition.
pub(crate) type HandlerPredicate = Rc<dyn Fn(&Condition) -> bool>;

// -----------------------------------------------------------------------------
// Matcher
// -----------------------------------------------------------------------------

/// Selects the conditions a handler applies to.
///
/// No condition hierarchy is imposed; a kind tag compares with `==` and a
/// predicate expresses everything else.
#[derive(Clone)]
pub(crate) enum Matcher {
  /// Accepts conditions whose kind equals the given symbol.
  Kind(Symbol),
  /// Accepts conditions for which the predicate returns `true`.
  Where(HandlerPredicate),
}

impl Matcher {
  /// Returns `true` if this matcher accepts `condition`.
  #[inline]
  pub(crate) fn accepts(&self, condition: &Condition) -> bool {
    match self {
      Self::Kind(kind) => condition.kind() == *kind,
      Self::Where(predicate) => predicate(condition),
    }
  }
}

impl Debug for Matcher {
  fn fmt(&self, f: &mut Formatter<'_>) -> Result {
    match self {
      Self::Kind(kind) => f.debug_tuple("Kind").field(kind).finish(),
      Self::Where(_) => f.write_str("Where(..)"),
    }
  }
}

// -----------------------------------------------------------------------------
// Handler Frame
// -----------------------------------------------------------------------------

/// One installed handler on the per-thread handler stack.
///
/// A `handling` call pushes one frame per handler pair and pops them on
/// every exit path. Frames clone cheaply; the matcher and action are
/// reference-counted so dispatch can snapshot the stack without holding
/// a borrow across user code.
#[derive(Clone)]
pub(crate) struct HandlerFrame {
  pub(crate) matcher: Matcher,
  pub(crate) action: HandlerAction,
  pub(crate) frame: FrameId,
}

impl Debug for HandlerFrame {
  fn fmt(&self, f: &mut Formatter<'_>) -> Result {
    f.debug_struct("HandlerFrame")
      .field("matcher", &self.matcher)
      .field("frame", &self.frame)
      .finish_non_exhaustive()
  }
}

// -----------------------------------------------------------------------------
// Restart Frame
// -----------------------------------------------------------------------------

/// One advertised restart on the per-thread restart stack.
///
/// The strategy itself never leaves its `with_restart` call; the stack only
/// records the name, the binding the invocation must unwind to, and the
/// frame identifier authenticating the pop.
#[derive(Clone, Copy, Debug)]
pub(crate) struct RestartFrame {
  pub(crate) name: Symbol,
  pub(crate) binding: BindingId,
  pub(crate) frame: FrameId,
}

// -----------------------------------------------------------------------------
// Escape Frame
// -----------------------------------------------------------------------------

/// One open escape point on the per-thread escape stack.
///
/// A frame is pushed when `to_escape` enters its body and popped when the
/// body exits on any path. An escape whose frame is no longer on the stack
/// has expired.
#[derive(Clone, Copy, Debug)]
pub(crate) struct EscapeFrame {
  pub(crate) binding: BindingId,
  pub(crate) frame: FrameId,
}
