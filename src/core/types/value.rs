//! Type-erased value container used across the condition system.
//!
//! This module provides [`Value`], a dynamically typed container that
//! carries condition payloads, handler results, restart arguments, and
//! escape payloads through dispatch and non-local transfers, together
//! with the [`Payload`] trait its contents must satisfy.
//!
//! # Use Cases
//!
//! [`Value`] is designed for the places where the concrete type isn't known
//! at compile time:
//!
//! - Condition payloads inspected by handlers
//! - Values returned from handlers through [`signal`] and [`error`]
//! - Restart arguments carried by a restart invocation
//! - Escape payloads carried by a non-local exit
//!
//! # Type Safety
//!
//! [`Value`] uses Rust's [`Any`] trait for runtime type checking. Values
//! can be safely extracted using [`downcast_ref()`] and [`downcast()`],
//! which fail gracefully if the type doesn't match.
//!
//! # Examples
//!
//! ```
//! use parley::types::Value;
//!
//! let num = Value::new(42_i32);
//! let text = Value::new(String::from("hello"));
//!
//! assert_eq!(num.downcast_ref::<i32>(), Some(&42));
//! assert_eq!(num.downcast_ref::<String>(), None);
//! ```
//!
//! [`signal`]: crate::signal
//! [`error`]: crate::error
//! [`Any`]: std::any::Any
//! [`downcast_ref()`]: Value::downcast_ref
//! [`downcast()`]: Value::downcast

use dyn_clone::DynClone;
use dyn_clone::clone_box;
use std::any::Any;
use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result;

// -----------------------------------------------------------------------------
// Payload
// -----------------------------------------------------------------------------

/// Trait implemented by all data carried in a [`Value`].
///
/// A payload crosses three boundaries: it is cloned when conditions are
/// copied, compared when dispositions are compared, and shipped through
/// the host unwind mechanism when a transfer departs. The supertraits
/// cover the first and last; the blanket implementation fills in the
/// [`Any`] plumbing and equality for every eligible type.
///
/// # Automatic Implementation
///
/// [`Payload`] is automatically implemented for all types that are
/// [`Any`] + [`Debug`] + [`Clone`] + [`PartialEq`] + [`Send`] + [`Sync`].
/// There is no reason to implement it manually.
///
/// # Examples
///
/// ```
/// use parley::types::Value;
///
/// // These types carry payloads without any extra impls:
/// let v1 = Value::new(42_i32);
/// let v2 = Value::new(String::from("hello"));
/// let v3 = Value::new(vec![1, 2, 3]);
/// ```
pub trait Payload: Any + Debug + DynClone + Send + Sync {
  /// Borrows this payload for downcasting.
  fn as_any(&self) -> &dyn Any;

  /// Converts this payload into a boxed [`Any`] for owned extraction.
  fn into_any(self: Box<Self>) -> Box<dyn Any>;

  /// Compares this payload against another.
  ///
  /// Payloads of distinct concrete types are never equal.
  fn eq_payload(&self, other: &dyn Any) -> bool;
}

impl<T> Payload for T
where
  T: Any + Debug + DynClone + Send + Sync,
  T: PartialEq,
{
  #[inline]
  fn as_any(&self) -> &dyn Any {
    self
  }

  #[inline]
  fn into_any(self: Box<Self>) -> Box<dyn Any> {
    self
  }

  #[inline]
  fn eq_payload(&self, other: &dyn Any) -> bool {
    other
      .downcast_ref::<T>()
      .is_some_and(|other| PartialEq::eq(self, other))
  }
}

// -----------------------------------------------------------------------------
// Value
// -----------------------------------------------------------------------------

/// Dynamically typed value passed between signaling and handling code.
///
/// [`Value`] wraps a boxed [`Payload`] and provides type-safe downcasting
/// APIs for inspecting or extracting the contained value.
///
/// # Cloning Behavior
///
/// Cloning a [`Value`] performs a deep clone of the contained payload
/// using the [`DynClone`] trait.
///
/// # Equality
///
/// Two values are equal when they contain the same concrete type and the
/// contained payloads compare equal.
///
/// # Examples
///
/// ```
/// use parley::types::Value;
///
/// let value = Value::new(vec![1, 2, 3]);
///
/// assert!(value.is::<Vec<i32>>());
/// assert_eq!(value.downcast::<Vec<i32>>(), Some(vec![1, 2, 3]));
/// ```
///
/// [`DynClone`]: dyn_clone::DynClone
#[repr(transparent)]
pub struct Value {
  data: Box<dyn Payload>,
}

impl Value {
  /// Creates a new value wrapping the given payload.
  ///
  /// # Examples
  ///
  /// ```
  /// use parley::types::Value;
  ///
  /// let num = Value::new(42);
  /// let text = Value::new("hello");
  /// ```
  #[inline]
  pub fn new<T>(data: T) -> Self
  where
    T: Payload,
  {
    Self {
      data: Box::new(data),
    }
  }

  /// Returns `true` if the contained payload is of type `T`.
  ///
  /// # Examples
  ///
  /// ```
  /// use parley::types::Value;
  ///
  /// let value = Value::new(42_i32);
  ///
  /// assert!(value.is::<i32>());
  /// assert!(!value.is::<String>());
  /// ```
  #[inline]
  pub fn is<T>(&self) -> bool
  where
    T: 'static,
  {
    self.data.as_any().is::<T>()
  }

  /// Returns a shared reference to the contained payload of type `T`.
  ///
  /// Returns [`None`] if the payload has a different concrete type.
  #[inline]
  pub fn downcast_ref<T>(&self) -> Option<&T>
  where
    T: 'static,
  {
    self.data.as_any().downcast_ref()
  }

  /// Converts this value into the contained payload of type `T`.
  ///
  /// Returns [`None`] and drops the payload if it has a different
  /// concrete type. Use [`is()`] or [`downcast_ref()`] first when the
  /// value must survive a failed extraction.
  ///
  /// # Examples
  ///
  /// ```
  /// use parley::types::Value;
  ///
  /// let value = Value::new(String::from("hello"));
  ///
  /// assert_eq!(value.downcast::<String>(), Some(String::from("hello")));
  /// ```
  ///
  /// [`is()`]: Self::is
  /// [`downcast_ref()`]: Self::downcast_ref
  #[inline]
  pub fn downcast<T>(self) -> Option<T>
  where
    T: 'static,
  {
    self.data.into_any().downcast().ok().map(|data| *data)
  }
}

impl Clone for Value {
  #[inline]
  fn clone(&self) -> Self {
    Self {
      data: clone_box(&*self.data),
    }
  }
}

impl PartialEq for Value {
  #[inline]
  fn eq(&self, other: &Self) -> bool {
    self.data.eq_payload(other.data.as_any())
  }
}

impl Debug for Value {
  fn fmt(&self, f: &mut Formatter<'_>) -> Result {
    Debug::fmt(&*self.data, f)
  }
}

impl Display for Value {
  fn fmt(&self, f: &mut Formatter<'_>) -> Result {
    Debug::fmt(&*self.data, f)
  }
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use crate::core::Symbol;
  use crate::core::Value;

  #[test]
  fn test_new_i32() {
    assert!(Value::new(123_i32).is::<i32>());
  }

  #[test]
  fn test_new_string() {
    assert!(Value::new(String::from("hello")).is::<String>());
  }

  #[test]
  fn test_new_symbol() {
    assert!(Value::new(Symbol::new("retry")).is::<Symbol>());
  }

  #[test]
  fn test_is_with_similar_types() {
    let value: Value = Value::new(123_i32);

    assert!(value.is::<i32>());
    assert!(!value.is::<i64>());
    assert!(!value.is::<u32>());
  }

  #[test]
  fn test_downcast_ref_success() {
    assert_eq!(Value::new(123_i32).downcast_ref::<i32>(), Some(&123));
  }

  #[test]
  fn test_downcast_ref_failure() {
    assert_eq!(Value::new(123_i32).downcast_ref::<String>(), None);
  }

  #[test]
  fn test_downcast_owned() {
    assert_eq!(Value::new(123_i32).downcast::<i32>(), Some(123));
    assert_eq!(Value::new(123_i32).downcast::<String>(), None);
  }

  #[test]
  fn test_clone_is_deep() {
    let src: Value = Value::new(vec![1, 2, 3]);
    let dst: Value = src.clone();

    assert_eq!(src.downcast_ref::<Vec<i32>>(), Some(&vec![1, 2, 3]));
    assert_eq!(dst.downcast::<Vec<i32>>(), Some(vec![1, 2, 3]));
  }

  #[test]
  fn test_equality() {
    assert_eq!(Value::new(123_i32), Value::new(123_i32));
    assert_ne!(Value::new(123_i32), Value::new(99_i32));
    assert_ne!(Value::new(123_i32), Value::new(123_u32));
  }

  #[test]
  fn test_display() {
    assert_eq!(format!("{}", Value::new(123_i32)), "123");
  }
}
