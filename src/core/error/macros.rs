//! Internal error handling macros.
//!
//! Recoverable situations are expressed as conditions and flow through the
//! signaling machinery; [`fatal!`] is reserved for unrecoverable library
//! bugs (invariant violations).

/// Displays a system error message and aborts the program.
///
/// Use this for unrecoverable errors that indicate bugs in the condition
/// system itself, such as an unbalanced dynamic context stack. The program
/// prints a diagnostic message and immediately aborts without unwinding.
///
/// # Examples
///
/// ```ignore
/// if top.frame != expect {
///   fatal!("unbalanced handler stack");
/// }
/// ```
macro_rules! fatal {
  ($error:expr) => {{
    ::std::eprintln!(
      "{}:{}: (SysInv) a system invariant has been broken: {}",
      ::std::file!(),
      ::std::line!(),
      $error,
    );

    ::std::process::abort();
  }};
}

pub(crate) use fatal;
