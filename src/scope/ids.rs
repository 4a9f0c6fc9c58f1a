//! Process-wide unique identifiers for frames and binding points.

use std::num::NonZeroU64;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

use crate::core::fatal;

/// Identifies the return point bound by a `to_escape` or `with_restart` call.
///
/// Binding identifiers are unique for the lifetime of the process, so a
/// non-local transfer can never be claimed by a frame other than its
/// target, even across re-entrant calls to the same binding form.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
#[repr(transparent)]
pub(crate) struct BindingId {
  inner: NonZeroU64,
}

impl BindingId {
  /// Allocates the next unique binding identifier.
  #[inline]
  pub(crate) fn next() -> Self {
    static COUNTER: AtomicU64 = AtomicU64::new(0);

    Self {
      inner: next_id(&COUNTER),
    }
  }
}

/// Authenticates pops from the dynamic context stacks.
///
/// Every pushed frame records the identifier of the primitive call that
/// pushed it; a pop whose expected identifier does not match the top of
/// the stack indicates unbalanced use and aborts the process.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
#[repr(transparent)]
pub(crate) struct FrameId {
  inner: NonZeroU64,
}

impl FrameId {
  /// Allocates the next unique frame identifier.
  #[inline]
  pub(crate) fn next() -> Self {
    static COUNTER: AtomicU64 = AtomicU64::new(0);

    Self {
      inner: next_id(&COUNTER),
    }
  }
}

/// Draws the next identifier from `counter`.
///
/// The 64-bit space outlives any realistic workload; running dry still
/// must not mint a duplicate.
fn next_id(counter: &AtomicU64) -> NonZeroU64 {
  let last: u64 = counter.fetch_add(1, Ordering::Relaxed);

  match last.checked_add(1).and_then(NonZeroU64::new) {
    Some(id) => id,
    None => fatal!("identifier space exhausted"),
  }
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use crate::scope::BindingId;
  use crate::scope::FrameId;

  #[test]
  fn test_binding_ids_unique() {
    assert_ne!(BindingId::next(), BindingId::next());
  }

  #[test]
  fn test_frame_ids_unique() {
    assert_ne!(FrameId::next(), FrameId::next());
  }
}
