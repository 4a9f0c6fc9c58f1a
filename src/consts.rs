//! Library configuration constants and default values.
//!
//! This module defines the fundamental limits, exit codes, and tuning
//! parameters for the condition system. These constants control symbol
//! table sizing, dynamic context allocation, and the process exit status
//! used for unhandled error conditions.

// -----------------------------------------------------------------------------
// Exit Codes
// -----------------------------------------------------------------------------

/// Exit code used when an `error`-signaled condition goes unhandled.
///
/// An unhandled [`error`] terminates the process after printing a
/// diagnostic naming the condition. A non-zero status distinguishes this
/// from normal termination.
///
/// [`error`]: crate::error
pub const E_CODE_UNHANDLED: i32 = 1;

// -----------------------------------------------------------------------------
// System - Types
// -----------------------------------------------------------------------------

/// Maximum number of characters allowed in a [`Symbol`].
///
/// [`Symbol`]: crate::types::Symbol
pub const MAX_SYMBOL_CHARS: usize = 255;

/// Maximum number of bytes allowed in a [`Symbol`].
///
/// This value assumes a worst-case of four bytes per Unicode scalar value
/// (UTF-8 encoding). The actual byte limit is `MAX_SYMBOL_CHARS * 4 = 1020`
/// bytes.
///
/// Symbols exceeding this limit will cause a [`SymbolTooLarge`] error.
///
/// [`Symbol`]: crate::types::Symbol
/// [`SymbolTooLarge`]: crate::types::SymbolTableError::SymbolTooLarge
pub const MAX_SYMBOL_BYTES: usize = MAX_SYMBOL_CHARS.strict_mul(4);

/// Maximum number of [`Symbol`]s that can be stored in the symbol table.
///
/// The symbol table is limited to 65,536 (2¹⁶) distinct symbols. Condition
/// kinds and restart names are program vocabulary, not program data; this
/// bound prevents unbounded memory growth from dynamic symbol creation.
///
/// Exceeding this limit will cause a [`TooManySymbols`] error.
///
/// [`Symbol`]: crate::types::Symbol
/// [`TooManySymbols`]: crate::types::SymbolTableError::TooManySymbols
pub const MAX_SYMBOL_COUNT: usize = 1 << 16;

// -----------------------------------------------------------------------------
// System - Memory Allocation
// -----------------------------------------------------------------------------

/// Initial capacity of the global symbol table.
pub const CAP_SYMBOL_TABLE: usize = 64;

/// Initial capacity of the per-thread handler stack.
pub const CAP_HANDLER_FRAMES: usize = 8;

/// Initial capacity of the per-thread restart stack.
pub const CAP_RESTART_FRAMES: usize = 8;

/// Initial capacity of the per-thread escape stack.
pub const CAP_ESCAPE_FRAMES: usize = 4;
