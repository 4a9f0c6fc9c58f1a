use std::fmt::Debug;
use std::fmt::Formatter;
use std::fmt::Result;

use crate::core::Payload;
use crate::core::Value;

/// The outcome of offering a condition to a handler.
///
/// A handler action returns [`Handled`] with a value to settle the signal,
/// or [`Declined`] to observe the condition and let it propagate to outer
/// handlers. [`signal`] itself returns a disposition: [`Declined`] means no
/// visible handler accepted the condition.
///
/// Declining is an explicit variant rather than an in-band sentinel, so a
/// handler can legitimately settle a signal with any value, including `()`.
///
/// [`Handled`]: Disposition::Handled
/// [`Declined`]: Disposition::Declined
/// [`signal`]: crate::signal
#[derive(Clone, PartialEq)]
pub enum Disposition {
  /// The condition was handled; the carried value settles the signal.
  Handled(Value),
  /// The condition was observed but not handled.
  Declined,
}

impl Disposition {
  /// Creates a [`Handled`] disposition wrapping the given data.
  ///
  /// # Examples
  ///
  /// ```
  /// use parley::types::Disposition;
  ///
  /// let disposition = Disposition::handled(0.0_f64);
  /// assert!(disposition.is_handled());
  /// ```
  ///
  /// [`Handled`]: Disposition::Handled
  #[inline]
  pub fn handled<T>(data: T) -> Self
  where
    T: Payload,
  {
    Self::Handled(Value::new(data))
  }

  /// Returns `true` if the disposition is [`Handled`][Disposition::Handled].
  #[inline]
  pub const fn is_handled(&self) -> bool {
    matches!(self, Self::Handled(_))
  }

  /// Returns `true` if the disposition is [`Declined`][Disposition::Declined].
  #[inline]
  pub const fn is_declined(&self) -> bool {
    matches!(self, Self::Declined)
  }

  /// Converts the disposition into the handled value, if any.
  #[inline]
  pub fn into_value(self) -> Option<Value> {
    match self {
      Self::Handled(value) => Some(value),
      Self::Declined => None,
    }
  }
}

impl Debug for Disposition {
  fn fmt(&self, f: &mut Formatter<'_>) -> Result {
    match self {
      Self::Handled(value) => f.debug_tuple("Handled").field(value).finish(),
      Self::Declined => f.write_str("Declined"),
    }
  }
}

impl From<Value> for Disposition {
  #[inline]
  fn from(other: Value) -> Self {
    Self::Handled(other)
  }
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use crate::core::Disposition;
  use crate::core::Value;

  #[test]
  fn test_handled() {
    let disposition: Disposition = Disposition::handled(123_i32);

    assert!(disposition.is_handled());
    assert!(!disposition.is_declined());
    assert_eq!(disposition.into_value(), Some(Value::new(123_i32)));
  }

  #[test]
  fn test_declined() {
    let disposition: Disposition = Disposition::Declined;

    assert!(disposition.is_declined());
    assert!(!disposition.is_handled());
    assert_eq!(disposition.into_value(), None);
  }

  #[test]
  fn test_handled_unit() {
    // A unit-valued handler return still settles the signal.
    assert!(Disposition::handled(()).is_handled());
  }
}
