use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result;

use crate::core::Payload;
use crate::core::Symbol;
use crate::core::Value;

/// A condition describing an exceptional situation.
///
/// Conditions carry a kind tag used by handler matching and an optional
/// payload inspected by handler actions. They are plain values, distinct
/// from host panics, and are announced via [`signal`] or [`error`].
///
/// # Display Format
///
/// Conditions format as `{kind}` or `{kind} - {payload}`.
///
/// Example: `div-by-zero - "reciprocal of zero"`
///
/// [`signal`]: crate::signal
/// [`error`]: crate::error
#[derive(Clone)]
pub struct Condition {
  kind: Symbol,
  data: Option<Value>,
}

impl Condition {
  /// Creates a new condition of the given kind with no payload.
  ///
  /// # Examples
  ///
  /// ```
  /// use parley::types::Condition;
  ///
  /// let condition = Condition::new("div-by-zero");
  /// assert_eq!(condition.kind(), "div-by-zero");
  /// ```
  #[inline]
  pub fn new<K>(kind: K) -> Self
  where
    K: Into<Symbol>,
  {
    Self {
      kind: kind.into(),
      data: None,
    }
  }

  /// Creates a new condition of the given kind carrying a payload.
  ///
  /// # Examples
  ///
  /// ```
  /// use parley::types::Condition;
  ///
  /// let condition = Condition::with("line-end", 80_usize);
  /// assert_eq!(condition.payload_ref::<usize>(), Some(&80));
  /// ```
  #[inline]
  pub fn with<K, T>(kind: K, data: T) -> Self
  where
    K: Into<Symbol>,
    T: Payload,
  {
    Self {
      kind: kind.into(),
      data: Some(Value::new(data)),
    }
  }

  /// Returns the condition's kind tag.
  #[inline]
  pub const fn kind(&self) -> Symbol {
    self.kind
  }

  /// Returns the condition's payload, if any.
  #[inline]
  pub const fn payload(&self) -> Option<&Value> {
    self.data.as_ref()
  }

  /// Returns `true` if the payload is present and of type `T`.
  #[inline]
  pub fn payload_is<T>(&self) -> bool
  where
    T: 'static,
  {
    self.data.as_ref().is_some_and(Value::is::<T>)
  }

  /// Returns a shared reference to the payload of type `T`.
  ///
  /// Returns `None` if the payload is absent or has a different type.
  #[inline]
  pub fn payload_ref<T>(&self) -> Option<&T>
  where
    T: 'static,
  {
    self.data.as_ref().and_then(Value::downcast_ref)
  }

  /// Creates the condition signaled when no restart matches an invocation.
  ///
  /// The payload is the [`Symbol`] that failed to match.
  #[inline]
  pub(crate) fn no_such_restart(name: Symbol) -> Self {
    Self::with(Symbol::NO_SUCH_RESTART, name)
  }

  /// Creates the condition signaled when an escape is used after its
  /// `to_escape` body has returned.
  #[inline]
  pub(crate) fn escape_expired() -> Self {
    Self::new(Symbol::ESCAPE_EXPIRED)
  }
}

impl Debug for Condition {
  fn fmt(&self, f: &mut Formatter<'_>) -> Result {
    Display::fmt(self, f)
  }
}

impl Display for Condition {
  fn fmt(&self, f: &mut Formatter<'_>) -> Result {
    match self.data.as_ref() {
      Some(data) => write!(f, "{} - {:?}", self.kind, data),
      None => Display::fmt(&self.kind, f),
    }
  }
}

impl From<Symbol> for Condition {
  #[inline]
  fn from(other: Symbol) -> Self {
    Self::new(other)
  }
}

impl From<&str> for Condition {
  #[inline]
  fn from(other: &str) -> Self {
    Self::new(other)
  }
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------
