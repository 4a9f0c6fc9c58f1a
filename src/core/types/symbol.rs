//! Symbol type providing efficient, interned, immutable string identifiers.
//!
//! This module provides the [`Symbol`] type, a lightweight handle to globally
//! interned strings. Symbols name condition kinds and restarts, where fast
//! equality comparison matters and the vocabulary is small and static.
//!
//! # Core Properties
//!
//! - **Interned**: Each unique string is stored exactly once
//! - **Immutable**: Symbol values cannot be changed after creation
//! - **Fast comparison**: Equality checks compare 32-bit slot indices
//! - **Zero-copy**: Converting to string slices requires no allocation
//!
//! # Well-Known Symbols
//!
//! The library pre-allocates symbols for the conditions it signals itself:
//!
//! - [`Symbol::NO_SUCH_RESTART`]: No restart matched an invocation
//! - [`Symbol::ESCAPE_EXPIRED`]: An escape was used outside its extent
//!
//! # Examples
//!
//! ```
//! use parley::types::Symbol;
//!
//! // Create symbols from strings
//! let zero = Symbol::new("use-zero");
//! let retry = Symbol::from("retry");
//!
//! // Fast equality (compares slot indices, not strings)
//! assert_eq!(Symbol::new("retry"), retry);
//!
//! // Access string value
//! assert_eq!(zero.as_str(), "use-zero");
//! ```

use std::cmp::Ordering;
use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::ops::Deref;
use std::sync::LazyLock;

use crate::core::fatal;
use crate::core::table::SymbolTable;

// -----------------------------------------------------------------------------
// Symbol Table
// -----------------------------------------------------------------------------

/// Global symbol table initialized with well-known library symbols.
///
/// This table is lazily initialized on first access and ensures well-known
/// symbols occupy their expected slot indices.
static SYMBOL_TABLE: LazyLock<SymbolTable> = LazyLock::new(|| {
  let table: SymbolTable = SymbolTable::new();

  assert_eq!(
    table.set("no-such-restart").unwrap(),
    Symbol::NO_SUCH_RESTART.into_slot()
  );

  assert_eq!(
    table.set("escape-expired").unwrap(),
    Symbol::ESCAPE_EXPIRED.into_slot()
  );

  table
});

// -----------------------------------------------------------------------------
// Symbol
// -----------------------------------------------------------------------------

/// Interned, immutable identifier naming a condition kind or a restart.
///
/// Symbols are lightweight handles (32-bit slot indices) to globally interned
/// strings. Handler dispatch and restart lookup compare symbols on every
/// walk, so equality is a single integer comparison.
///
/// # Memory Layout
///
/// [`Symbol`] is a transparent wrapper around a `u32` slot index:
///
/// ```text
/// Symbol { slot: u32 }  // 4 bytes
/// ```
///
/// The actual string data lives in the global symbol table and is shared
/// across all [`Symbol`] instances with the same value.
///
/// # Equality and Ordering
///
/// Equality comparisons are performed on slot indices (O(1)), while ordering
/// comparisons delegate to the underlying string values (O(n)).
///
/// # Examples
///
/// ```
/// use parley::types::Symbol;
///
/// let s1 = Symbol::new("line-end");
/// let s2 = Symbol::new("line-end");
///
/// assert_eq!(s1, s2);                  // Fast: compares slot indices
/// assert_eq!(s1.as_str(), "line-end"); // Zero-copy string access
/// ```
#[derive(Clone, Copy, Hash, PartialEq, Eq)]
#[repr(transparent)]
pub struct Symbol {
  slot: u32,
}

impl Symbol {
  /// Symbol representing the value `no-such-restart`.
  ///
  /// Used as the kind of the condition signaled when [`invoke_restart`]
  /// finds no matching restart.
  ///
  /// [`invoke_restart`]: crate::invoke_restart
  pub const NO_SUCH_RESTART: Self = Self::from_slot(0);

  /// Symbol representing the value `escape-expired`.
  ///
  /// Used as the kind of the condition signaled when an [`Escape`] is used
  /// after its `to_escape` body has returned.
  ///
  /// [`Escape`]: crate::types::Escape
  pub const ESCAPE_EXPIRED: Self = Self::from_slot(1);

  /// Constructs a symbol from a raw symbol table slot.
  #[inline]
  pub(crate) const fn from_slot(slot: u32) -> Self {
    Self { slot }
  }

  /// Returns the symbol table slot backing this symbol.
  #[inline]
  pub(crate) const fn into_slot(self) -> u32 {
    self.slot
  }

  /// Interns a string and returns its corresponding symbol.
  ///
  /// If the string has been interned before, returns the existing symbol.
  /// Otherwise, allocates a new slot in the global symbol table.
  ///
  /// # Aborts
  ///
  /// Aborts the process if the string exceeds [`MAX_SYMBOL_BYTES`] or the
  /// symbol table has reached [`MAX_SYMBOL_COUNT`] capacity. Symbols name
  /// program vocabulary; exhausting the table indicates symbols are being
  /// minted from program data.
  ///
  /// # Examples
  ///
  /// ```
  /// use parley::types::Symbol;
  ///
  /// let symbol1 = Symbol::new("retry");
  /// let symbol2 = Symbol::new("retry");
  ///
  /// assert_eq!(symbol1, symbol2); // Same string, same symbol
  /// ```
  ///
  /// [`MAX_SYMBOL_BYTES`]: crate::consts::MAX_SYMBOL_BYTES
  /// [`MAX_SYMBOL_COUNT`]: crate::consts::MAX_SYMBOL_COUNT
  #[inline]
  pub fn new(data: &str) -> Self {
    match SYMBOL_TABLE.set(data) {
      Ok(slot) => Self::from_slot(slot),
      Err(error) => fatal!(error),
    }
  }

  /// Returns the string value associated with this symbol.
  ///
  /// This operation is zero-copy and returns a reference to the interned
  /// string with a `'static` lifetime.
  ///
  /// # Aborts
  ///
  /// Aborts the process if the symbol's slot index is invalid. This should
  /// never occur with symbols constructed through the public API.
  ///
  /// # Examples
  ///
  /// ```
  /// use parley::types::Symbol;
  ///
  /// let symbol = Symbol::new("div-by-zero");
  /// assert_eq!(symbol.as_str(), "div-by-zero");
  /// ```
  #[inline]
  pub fn as_str(&self) -> &'static str {
    match SYMBOL_TABLE.get(self.slot) {
      Ok(data) => data,
      Err(error) => fatal!(error),
    }
  }
}

impl Debug for Symbol {
  fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
    Debug::fmt(self.as_str(), f)
  }
}

impl Display for Symbol {
  fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
    Display::fmt(self.as_str(), f)
  }
}

impl PartialOrd for Symbol {
  #[inline]
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl Ord for Symbol {
  fn cmp(&self, other: &Self) -> Ordering {
    Ord::cmp(self.as_str(), other.as_str())
  }
}

impl Deref for Symbol {
  type Target = str;

  #[inline]
  fn deref(&self) -> &Self::Target {
    self.as_str()
  }
}

impl AsRef<str> for Symbol {
  #[inline]
  fn as_ref(&self) -> &str {
    self.as_str()
  }
}

// -----------------------------------------------------------------------------
// Extensions - From
// -----------------------------------------------------------------------------

impl From<&str> for Symbol {
  #[inline]
  fn from(other: &str) -> Symbol {
    Symbol::new(other)
  }
}

impl From<String> for Symbol {
  #[inline]
  fn from(other: String) -> Symbol {
    Symbol::new(other.as_str())
  }
}

impl From<&String> for Symbol {
  #[inline]
  fn from(other: &String) -> Symbol {
    Symbol::new(other.as_str())
  }
}

impl From<Symbol> for &'static str {
  #[inline]
  fn from(other: Symbol) -> &'static str {
    other.as_str()
  }
}

impl From<Symbol> for String {
  #[inline]
  fn from(other: Symbol) -> Self {
    String::from(other.as_str())
  }
}

// -----------------------------------------------------------------------------
// Extensions - PartialEq
// -----------------------------------------------------------------------------

impl PartialEq<str> for Symbol {
  #[inline]
  fn eq(&self, other: &str) -> bool {
    self.as_str() == other
  }
}

impl PartialEq<&str> for Symbol {
  #[inline]
  fn eq(&self, other: &&str) -> bool {
    self.as_str() == *other
  }
}

impl PartialEq<String> for Symbol {
  #[inline]
  fn eq(&self, other: &String) -> bool {
    self.as_str() == other
  }
}

impl PartialEq<Symbol> for str {
  #[inline]
  fn eq(&self, other: &Symbol) -> bool {
    self == other.as_str()
  }
}

impl PartialEq<Symbol> for &str {
  #[inline]
  fn eq(&self, other: &Symbol) -> bool {
    *self == other.as_str()
  }
}

impl PartialEq<Symbol> for String {
  #[inline]
  fn eq(&self, other: &Symbol) -> bool {
    self == other.as_str()
  }
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use crate::core::Symbol;

  #[test]
  fn test_interning() {
    assert_eq!(Symbol::new("retry"), Symbol::new("retry"));
    assert_ne!(Symbol::new("retry"), Symbol::new("use-zero"));
  }

  #[test]
  fn test_well_known() {
    assert_eq!(Symbol::NO_SUCH_RESTART, Symbol::new("no-such-restart"));
    assert_eq!(Symbol::ESCAPE_EXPIRED, Symbol::new("escape-expired"));
  }

  #[test]
  fn test_as_str() {
    assert_eq!(Symbol::new("line-end").as_str(), "line-end");
  }

  #[test]
  fn test_str_equality() {
    assert_eq!(Symbol::new("retry"), "retry");
    assert_eq!("retry", Symbol::new("retry"));
    assert_ne!(Symbol::new("retry"), "use-zero");
  }

  #[test]
  fn test_display() {
    assert_eq!(format!("{}", Symbol::new("div-by-zero")), "div-by-zero");
  }

  #[test]
  fn test_debug() {
    assert_eq!(format!("{:?}", Symbol::new("div-by-zero")), "\"div-by-zero\"");
  }
}
