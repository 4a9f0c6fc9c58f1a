//! Scoped release of dynamic context frames.
//!
//! Every primitive that pushes frames holds one of these guards for the
//! extent of its body. Dropping the guard pops the frames, so release runs
//! on normal return, on host panic, and on non-local transfer alike, in
//! LIFO order as the unwind crosses each binding form.

use std::mem;

use crate::scope;
use crate::scope::FrameId;
use crate::scope::HandlerFrame;

// -----------------------------------------------------------------------------
// Handler Guard
// -----------------------------------------------------------------------------

/// Pops the handler frames pushed by one `handling` call.
pub(crate) struct HandlerGuard {
  frames: Vec<FrameId>,
}

impl HandlerGuard {
  /// Creates a guard over frames recorded in push order.
  #[inline]
  pub(crate) fn new(frames: Vec<FrameId>) -> Self {
    Self { frames }
  }
}

impl Drop for HandlerGuard {
  fn drop(&mut self) {
    scope::with(|ctx| {
      for frame in self.frames.drain(..).rev() {
        ctx.pop_handler(frame);
      }
    });
  }
}

// -----------------------------------------------------------------------------
// Restart Guard
// -----------------------------------------------------------------------------

/// Pops the restart frames pushed by one `with_restart` call.
pub(crate) struct RestartGuard {
  frames: Vec<FrameId>,
}

impl RestartGuard {
  /// Creates a guard over frames recorded in push order.
  #[inline]
  pub(crate) fn new(frames: Vec<FrameId>) -> Self {
    Self { frames }
  }
}

impl Drop for RestartGuard {
  fn drop(&mut self) {
    scope::with(|ctx| {
      for frame in self.frames.drain(..).rev() {
        ctx.pop_restart(frame);
      }
    });
  }
}

// -----------------------------------------------------------------------------
// Escape Guard
// -----------------------------------------------------------------------------

/// Pops the escape frame pushed by one `to_escape` call.
pub(crate) struct EscapeGuard {
  frame: FrameId,
}

impl EscapeGuard {
  /// Creates a guard over a single escape frame.
  #[inline]
  pub(crate) fn new(frame: FrameId) -> Self {
    Self { frame }
  }
}

impl Drop for EscapeGuard {
  fn drop(&mut self) {
    scope::with(|ctx| ctx.pop_escape(self.frame));
  }
}

// -----------------------------------------------------------------------------
// Mask Guard
// -----------------------------------------------------------------------------

/// Restores the handler frames masked while one handler action runs.
///
/// Dispatch removes the running handler and everything newer before
/// calling the action; this guard puts them back whether the action
/// settles, declines, or departs non-locally. On a transfer, the restore
/// runs before the unwind reaches the `handling` frames that own the
/// masked handlers: the guard lives inside the dispatch loop, a dynamic
/// descendant of every such frame.
pub(crate) struct MaskGuard {
  saved: Vec<HandlerFrame>,
}

impl MaskGuard {
  /// Masks `frame` and every newer handler frame.
  #[inline]
  pub(crate) fn mask(frame: FrameId) -> Self {
    Self {
      saved: scope::with(|ctx| ctx.mask_handlers(frame)),
    }
  }
}

impl Drop for MaskGuard {
  fn drop(&mut self) {
    let saved: Vec<HandlerFrame> = mem::take(&mut self.saved);

    scope::with(|ctx| ctx.unmask_handlers(saved));
  }
}
