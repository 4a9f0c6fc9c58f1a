//! Global symbol interning table.
//!
//! Condition kinds and restart names are program vocabulary: a handful of
//! distinct strings, minted once near startup and compared on every
//! handler walk. The table interns each string permanently so a [`Symbol`]
//! is a 4-byte slot index and equality is an integer comparison.
//!
//! # Storage
//!
//! Interned strings are leaked to `'static` and indexed by an append-only
//! slot list; a map from string to slot makes re-interning the same name
//! a read-lock lookup. Nothing is ever deallocated, which is why the
//! table refuses oversized strings and bounds its slot count: symbols are
//! for vocabulary, not for program data.
//!
//! [`Symbol`]: crate::types::Symbol

use hashbrown::HashMap;
use parking_lot::RwLock;
use parking_lot::RwLockReadGuard;
use parking_lot::RwLockUpgradableReadGuard;
use parking_lot::RwLockWriteGuard;
use std::error::Error;
use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;

use crate::consts::CAP_SYMBOL_TABLE;
use crate::consts::MAX_SYMBOL_BYTES;
use crate::consts::MAX_SYMBOL_COUNT;

// -----------------------------------------------------------------------------
// Symbol Table Error
// -----------------------------------------------------------------------------

/// Errors returned from symbol table lookup or insertion operations.
#[derive(Debug)]
#[non_exhaustive]
pub enum SymbolTableError {
  /// The symbol exceeds the maximum allowed byte length.
  ///
  /// Symbols are limited to [`MAX_SYMBOL_BYTES`] UTF-8 bytes; anything
  /// longer is almost certainly data, not a name.
  SymbolTooLarge,
  /// The symbol table has reached its maximum capacity.
  ///
  /// The table is limited to [`MAX_SYMBOL_COUNT`] distinct symbols.
  /// Hitting this bound indicates symbols are being minted from dynamic
  /// input.
  TooManySymbols,
  /// The requested symbol slot does not exist.
  ///
  /// This indicates an invalid slot index was provided to [`SymbolTable::get()`].
  SymbolNotFound,
}

impl Display for SymbolTableError {
  fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
    match self {
      Self::SymbolTooLarge => f.write_str("symbol too large"),
      Self::TooManySymbols => f.write_str("too many symbols"),
      Self::SymbolNotFound => f.write_str("symbol not found"),
    }
  }
}

impl Error for SymbolTableError {}

// -----------------------------------------------------------------------------
// Symbol Table
// -----------------------------------------------------------------------------

/// Thread-safe symbol interning table with permanent storage.
///
/// The table stores each distinct string exactly once and hands out its
/// slot index. Slots are stable for the program's lifetime, so a slot
/// index is a valid name for the string anywhere in the process.
///
/// # Concurrency
///
/// A single read-write lock protects the table. Lookups of existing
/// symbols — by far the common case, since programs re-intern the same
/// condition kinds and restart names repeatedly — take the lock for
/// reading; only a genuinely new symbol upgrades to a write lock.
pub struct SymbolTable {
  inner: RwLock<Table>,
}

impl SymbolTable {
  /// Creates a new empty symbol table with initial capacity allocated.
  #[inline]
  pub fn new() -> Self {
    Self {
      inner: RwLock::new(Table::new()),
    }
  }

  /// Returns the symbol string for the given table slot.
  ///
  /// The returned reference is `'static`: interned strings are never
  /// deallocated.
  ///
  /// # Errors
  ///
  /// Returns [`SymbolTableError::SymbolNotFound`] if the slot has not
  /// been allocated.
  pub fn get(&self, slot: u32) -> Result<&'static str, SymbolTableError> {
    self
      .inner
      .read()
      .slots
      .get(slot as usize)
      .copied()
      .ok_or(SymbolTableError::SymbolNotFound)
  }

  /// Interns a string and returns its symbol table slot.
  ///
  /// If the string is already interned, returns the existing slot without
  /// modification. Otherwise, leaks a copy of the string and allocates
  /// the next slot for it.
  ///
  /// # Errors
  ///
  /// Returns [`SymbolTableError::SymbolTooLarge`] if the string exceeds
  /// [`MAX_SYMBOL_BYTES`].
  ///
  /// Returns [`SymbolTableError::TooManySymbols`] if the table has
  /// reached [`MAX_SYMBOL_COUNT`] capacity.
  pub fn set(&self, data: &str) -> Result<u32, SymbolTableError> {
    let guard: RwLockUpgradableReadGuard<'_, Table> = self.inner.upgradable_read();

    if let Some(slot) = guard.map.get(data) {
      return Ok(*slot);
    }

    if data.len() > MAX_SYMBOL_BYTES {
      return Err(SymbolTableError::SymbolTooLarge);
    }

    if guard.slots.len() >= MAX_SYMBOL_COUNT {
      return Err(SymbolTableError::TooManySymbols);
    }

    // No other writer can have interned `data` in the meantime: upgrading
    // an upgradable read guard is atomic.
    let mut guard: RwLockWriteGuard<'_, Table> = RwLockUpgradableReadGuard::upgrade(guard);

    let name: &'static str = Box::leak(Box::from(data));
    let slot: u32 = guard.slots.len() as u32;

    guard.slots.push(name);
    guard.map.insert(name, slot);

    Ok(slot)
  }
}

impl Debug for SymbolTable {
  fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
    let guard: RwLockReadGuard<'_, Table> = self.inner.read();

    f.debug_struct("SymbolTable")
      .field("slots", &guard.slots)
      .finish()
  }
}

// -----------------------------------------------------------------------------
// Symbol Table - Table
// -----------------------------------------------------------------------------

/// Internal state: slot list plus reverse lookup map.
///
/// `slots[i]` and the map entry pointing at `i` refer to the same leaked
/// string, so the map borrows nothing that can move.
struct Table {
  map: HashMap<&'static str, u32>,
  slots: Vec<&'static str>,
}

impl Table {
  #[inline]
  fn new() -> Self {
    Self {
      map: HashMap::with_capacity(CAP_SYMBOL_TABLE),
      slots: Vec::with_capacity(CAP_SYMBOL_TABLE),
    }
  }
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use std::sync::Arc;
  use std::sync::Barrier;
  use std::thread;

  use crate::core::table::SymbolTable;

  #[test]
  fn test_set_then_get() {
    let table: SymbolTable = SymbolTable::new();
    let slot: u32 = table.set("use-zero").unwrap();

    assert_eq!(table.get(slot).unwrap(), "use-zero");
    assert_eq!(table.set("use-zero").unwrap(), slot);
  }

  #[test]
  fn test_slots_are_sequential() {
    let table: SymbolTable = SymbolTable::new();

    let first: u32 = table.set("use-zero").unwrap();
    let second: u32 = table.set("retry").unwrap();

    assert_eq!(second, first + 1);
  }

  #[test]
  fn test_get_unallocated() {
    let table: SymbolTable = SymbolTable::new();
    assert!(table.get(99).is_err());
  }

  #[test]
  fn test_set_too_large() {
    let table: SymbolTable = SymbolTable::new();
    let large: String = "x".repeat(crate::consts::MAX_SYMBOL_BYTES + 1);

    assert!(table.set(large.as_str()).is_err());
  }

  #[test]
  fn stress_concurrent_same_symbol() {
    let table: Arc<SymbolTable> = Arc::new(SymbolTable::new());
    let barrier: Arc<Barrier> = Arc::new(Barrier::new(100));

    let threads: Vec<_> = (0..100)
      .map(|_| {
        let table: Arc<SymbolTable> = Arc::clone(&table);
        let barrier: Arc<Barrier> = Arc::clone(&barrier);

        thread::spawn(move || {
          barrier.wait();
          table.set("retry").unwrap()
        })
      })
      .collect();

    let indices: Vec<u32> = threads
      .into_iter()
      .map(|handle| handle.join().unwrap())
      .collect();

    assert!(indices.windows(2).all(|window| window[0] == window[1]));
  }
}
