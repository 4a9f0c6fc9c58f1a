//! Per-thread dynamic context bookkeeping.
//!
//! Every thread owns one [`DynamicContext`] holding three strictly LIFO
//! stacks: installed handlers, advertised restarts, and open escape points.
//! Contexts are not shared and not inherited; a spawned thread starts with
//! empty stacks.
//!
//! # Borrow Discipline
//!
//! The context lives in a `thread_local!` [`RefCell`]. No user code ever
//! runs while the cell is borrowed: dispatch snapshots the handler stack
//! first, and every primitive releases the borrow before invoking a body,
//! matcher, action, or strategy.

use std::cell::RefCell;

use crate::consts::CAP_ESCAPE_FRAMES;
use crate::consts::CAP_HANDLER_FRAMES;
use crate::consts::CAP_RESTART_FRAMES;
use crate::core::Symbol;
use crate::core::fatal;
use crate::scope::BindingId;
use crate::scope::EscapeFrame;
use crate::scope::FrameId;
use crate::scope::HandlerFrame;
use crate::scope::RestartFrame;

thread_local! {
  static CONTEXT: RefCell<DynamicContext> = RefCell::new(DynamicContext::new());
}

/// Runs `f` with exclusive access to the calling thread's dynamic context.
///
/// `f` must not invoke user code; the context is borrowed for its whole
/// duration.
#[inline]
pub(crate) fn with<F, T>(f: F) -> T
where
  F: FnOnce(&mut DynamicContext) -> T,
{
  CONTEXT.with(|cell| f(&mut cell.borrow_mut()))
}

// -----------------------------------------------------------------------------
// Dynamic Context
// -----------------------------------------------------------------------------

/// The per-thread stacks of handler, restart, and escape frames.
///
/// All three stacks are strictly LIFO. Pops verify the expected top frame;
/// a mismatch means frames were leaked or released out of order (e.g. a
/// suspended body resumed on another thread) and is fatal.
pub(crate) struct DynamicContext {
  handlers: Vec<HandlerFrame>,
  restarts: Vec<RestartFrame>,
  escapes: Vec<EscapeFrame>,
}

impl DynamicContext {
  /// Creates an empty context.
  #[inline]
  fn new() -> Self {
    Self {
      handlers: Vec::with_capacity(CAP_HANDLER_FRAMES),
      restarts: Vec::with_capacity(CAP_RESTART_FRAMES),
      escapes: Vec::with_capacity(CAP_ESCAPE_FRAMES),
    }
  }

  // ---------------------------------------------------------------------------
  // Handlers
  // ---------------------------------------------------------------------------

  /// Pushes a handler frame onto the handler stack.
  #[inline]
  pub(crate) fn push_handler(&mut self, frame: HandlerFrame) {
    self.handlers.push(frame);
  }

  /// Pops the top handler frame, which must be `expect`.
  pub(crate) fn pop_handler(&mut self, expect: FrameId) {
    match self.handlers.pop() {
      Some(frame) if frame.frame == expect => {}
      Some(_) | None => fatal!("unbalanced handler stack"),
    }
  }

  /// Returns a clone of the handler stack, oldest first.
  ///
  /// Dispatch walks the clone newest-first so matchers and actions run
  /// without the context borrowed.
  #[inline]
  pub(crate) fn handler_snapshot(&self) -> Vec<HandlerFrame> {
    self.handlers.clone()
  }

  /// Removes and returns `frame` and every newer handler frame.
  ///
  /// While a handler action runs, only handlers strictly older than the
  /// running one may see a nested signal. The removed frames are restored
  /// by [`unmask`][Self::unmask] once the action settles, declines, or
  /// departs non-locally.
  pub(crate) fn mask_handlers(&mut self, frame: FrameId) -> Vec<HandlerFrame> {
    match self.handlers.iter().position(|handler| handler.frame == frame) {
      Some(index) => self.handlers.split_off(index),
      None => fatal!("handler frame missing during dispatch"),
    }
  }

  /// Restores handler frames removed by [`mask_handlers`][Self::mask_handlers].
  #[inline]
  pub(crate) fn unmask_handlers(&mut self, saved: Vec<HandlerFrame>) {
    self.handlers.extend(saved);
  }

  // ---------------------------------------------------------------------------
  // Restarts
  // ---------------------------------------------------------------------------

  /// Pushes a restart frame onto the restart stack.
  #[inline]
  pub(crate) fn push_restart(&mut self, frame: RestartFrame) {
    self.restarts.push(frame);
  }

  /// Pops the top restart frame, which must be `expect`.
  pub(crate) fn pop_restart(&mut self, expect: FrameId) {
    match self.restarts.pop() {
      Some(frame) if frame.frame == expect => {}
      Some(_) | None => fatal!("unbalanced restart stack"),
    }
  }

  /// Returns the binding of the newest restart frame named `name`.
  #[inline]
  pub(crate) fn find_restart(&self, name: Symbol) -> Option<BindingId> {
    self
      .restarts
      .iter()
      .rev()
      .find(|frame| frame.name == name)
      .map(|frame| frame.binding)
  }

  /// Returns `true` if any restart frame is named `name`.
  #[inline]
  pub(crate) fn has_restart(&self, name: Symbol) -> bool {
    self.find_restart(name).is_some()
  }

  // ---------------------------------------------------------------------------
  // Escapes
  // ---------------------------------------------------------------------------

  /// Pushes an escape frame onto the escape stack.
  #[inline]
  pub(crate) fn push_escape(&mut self, frame: EscapeFrame) {
    self.escapes.push(frame);
  }

  /// Pops the top escape frame, which must be `expect`.
  pub(crate) fn pop_escape(&mut self, expect: FrameId) {
    match self.escapes.pop() {
      Some(frame) if frame.frame == expect => {}
      Some(_) | None => fatal!("unbalanced escape stack"),
    }
  }

  /// Returns `true` if the escape frame for `binding` is still open.
  #[inline]
  pub(crate) fn has_escape(&self, binding: BindingId) -> bool {
    self.escapes.iter().any(|frame| frame.binding == binding)
  }

  /// Returns the depth of each stack as `(handlers, restarts, escapes)`.
  #[cfg(test)]
  pub(crate) fn depths(&self) -> (usize, usize, usize) {
    (self.handlers.len(), self.restarts.len(), self.escapes.len())
  }
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------
