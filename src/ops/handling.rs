use std::fmt::Debug;
use std::fmt::Formatter;
use std::fmt::Result;
use std::rc::Rc;

use crate::core::Condition;
use crate::core::Disposition;
use crate::core::Symbol;
use crate::scope;
use crate::scope::FrameId;
use crate::scope::HandlerFrame;
use crate::scope::HandlerGuard;
use crate::scope::Matcher;

// -----------------------------------------------------------------------------
// Handler
// -----------------------------------------------------------------------------

/// A matcher paired with an action, installed by [`handling`].
///
/// The matcher decides whether the action applies to a signaled condition;
/// the action either settles the signal with a value, declines, or departs
/// non-locally (escapes or invokes a restart).
///
/// # Examples
///
/// ```
/// use parley::types::Disposition;
/// use parley::types::Handler;
///
/// let fallback = Handler::on("div-by-zero", |_| Disposition::handled(0.0_f64));
///
/// let observer = Handler::matching(
///   |condition| condition.kind().as_str().ends_with("-warning"),
///   |_| Disposition::Declined,
/// );
/// ```
pub struct Handler {
  matcher: Matcher,
  action: Rc<dyn Fn(&Condition) -> Disposition>,
}

impl Handler {
  /// Creates a handler accepting conditions whose kind equals `kind`.
  #[inline]
  pub fn on<K, F>(kind: K, action: F) -> Self
  where
    K: Into<Symbol>,
    F: Fn(&Condition) -> Disposition + 'static,
  {
    Self {
      matcher: Matcher::Kind(kind.into()),
      action: Rc::new(action),
    }
  }

  /// Creates a handler accepting conditions for which `predicate` holds.
  #[inline]
  pub fn matching<P, F>(predicate: P, action: F) -> Self
  where
    P: Fn(&Condition) -> bool + 'static,
    F: Fn(&Condition) -> Disposition + 'static,
  {
    Self {
      matcher: Matcher::Where(Rc::new(predicate)),
      action: Rc::new(action),
    }
  }

  /// Converts this handler into a stack frame.
  #[inline]
  pub(crate) fn into_frame(self, frame: FrameId) -> HandlerFrame {
    HandlerFrame {
      matcher: self.matcher,
      action: self.action,
      frame,
    }
  }
}

impl Debug for Handler {
  fn fmt(&self, f: &mut Formatter<'_>) -> Result {
    f.debug_struct("Handler")
      .field("matcher", &self.matcher)
      .finish_non_exhaustive()
  }
}

// -----------------------------------------------------------------------------
// Handling
// -----------------------------------------------------------------------------

/// Installs handlers for the dynamic extent of `body`.
///
/// The handlers are visible to every [`signal`] and [`error`] announced
/// while `body` runs, including from nested calls, and are removed when
/// `body` exits on any path. Within one `handling` call, handlers are
/// consulted in declaration order; across nested calls, inner handlers are
/// consulted before outer ones.
///
/// Returns `body`'s value. A non-local transfer leaving `body` removes the
/// handlers and keeps unwinding.
///
/// # Examples
///
/// ```
/// use parley::handling;
/// use parley::signal;
/// use parley::types::Condition;
/// use parley::types::Disposition;
/// use parley::types::Handler;
///
/// let settled = handling(
///   [Handler::on("div-by-zero", |_| Disposition::handled(0.0_f64))],
///   || signal(Condition::new("div-by-zero")),
/// );
///
/// assert!(settled.is_handled());
/// ```
///
/// [`signal`]: crate::signal
/// [`error`]: crate::error
pub fn handling<I, F, T>(handlers: I, body: F) -> T
where
  I: IntoIterator<Item = Handler>,
  F: FnOnce() -> T,
{
  let handlers: Vec<Handler> = Vec::from_iter(handlers);
  let mut frames: Vec<FrameId> = Vec::with_capacity(handlers.len());

  scope::with(|ctx| {
    // Within one call the first-declared handler must be consulted first,
    // and the walk is newest-first: push in reverse declaration order.
    for handler in handlers.into_iter().rev() {
      let frame: FrameId = FrameId::next();

      frames.push(frame);
      ctx.push_handler(handler.into_frame(frame));
    }
  });

  let _guard: HandlerGuard = HandlerGuard::new(frames);

  body()
}
