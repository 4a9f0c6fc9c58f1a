use std::process;

use crate::consts::E_CODE_UNHANDLED;
use crate::core::Condition;
use crate::core::Disposition;
use crate::core::Value;
use crate::scope;
use crate::scope::HandlerFrame;
use crate::scope::MaskGuard;

/// Announces a condition that may be ignored.
///
/// Walks the calling thread's handler stack newest-first and offers the
/// condition to each handler whose matcher accepts it. The walk settles on
/// the first action that returns [`Handled`]; an action that returns
/// [`Declined`] is skipped and the walk continues outward. An action may
/// instead depart non-locally, in which case `signal` never returns.
///
/// Returns [`Declined`] if no visible handler settles the condition; an
/// unhandled signal has no effect.
///
/// While an action runs, the handler stack is masked down to the frames
/// strictly older than the running handler, so an action never re-enters
/// itself through a nested signal. Restarts and escapes remain visible:
/// the signaling frames have not been unwound.
///
/// # Examples
///
/// ```
/// use parley::signal;
/// use parley::types::Condition;
///
/// // No handler installed: the signal is ignorable.
/// assert!(signal(Condition::new("line-end")).is_declined());
/// ```
///
/// [`Handled`]: crate::types::Disposition::Handled
/// [`Declined`]: crate::types::Disposition::Declined
pub fn signal(condition: Condition) -> Disposition {
  dispatch(&condition)
}

/// Announces a condition that must be handled.
///
/// Performs the same walk as [`signal`]. If an action settles the
/// condition, its value becomes `error`'s return value; if an action
/// departs non-locally, control leaves through the unwind.
///
/// If the walk exhausts without settling, the process terminates with a
/// diagnostic naming the condition and exit code [`E_CODE_UNHANDLED`].
/// This is the distinction between the two signaling operators: `signal`
/// is ignorable, `error` is terminal unless handled.
pub fn error(condition: Condition) -> Value {
  match dispatch(&condition) {
    Disposition::Handled(value) => value,
    Disposition::Declined => unhandled(&condition),
  }
}

/// Offers `condition` to the visible handlers, newest-first.
fn dispatch(condition: &Condition) -> Disposition {
  let frames: Vec<HandlerFrame> = scope::with(|ctx| ctx.handler_snapshot());

  for frame in frames.iter().rev() {
    if !frame.matcher.accepts(condition) {
      continue;
    }

    let outcome: Disposition = {
      let _masked: MaskGuard = MaskGuard::mask(frame.frame);

      (frame.action)(condition)
    };

    match outcome {
      Disposition::Handled(value) => {
        tracing::trace!(
          target: "parley",
          kind = %condition.kind(),
          action = "dispatch",
          result = "handled",
        );

        return Disposition::Handled(value);
      }
      Disposition::Declined => {
        tracing::trace!(
          target: "parley",
          kind = %condition.kind(),
          action = "dispatch",
          result = "declined",
        );
      }
    }
  }

  tracing::trace!(
    target: "parley",
    kind = %condition.kind(),
    action = "dispatch",
    result = "unhandled",
  );

  Disposition::Declined
}

/// Terminates the process over an unhandled error condition.
fn unhandled(condition: &Condition) -> ! {
  tracing::error!(
    target: "parley",
    kind = %condition.kind(),
    "unhandled error condition",
  );

  eprintln!("unhandled error condition: {condition}");

  process::exit(E_CODE_UNHANDLED);
}
