//! Behavioral tests for the seven operators.

use std::cell::Cell;
use std::cell::RefCell;
use std::panic;
use std::panic::AssertUnwindSafe;
use std::rc::Rc;
use std::thread;

use parley::available_restart;
use parley::error;
use parley::handling;
use parley::invoke_restart;
use parley::signal;
use parley::to_escape;
use parley::types::Condition;
use parley::types::Disposition;
use parley::types::Escape;
use parley::types::Handler;
use parley::types::Restart;
use parley::types::RestartArgs;
use parley::types::Symbol;
use parley::types::Value;
use parley::with_restart;

type Journal = Rc<RefCell<Vec<&'static str>>>;

fn journal() -> Journal {
  Rc::new(RefCell::new(Vec::new()))
}

fn note(journal: &Journal, entry: &'static str) {
  journal.borrow_mut().push(entry);
}

// -----------------------------------------------------------------------------
// Signal + Handling
// -----------------------------------------------------------------------------

#[test]
fn test_signal_without_handlers_is_ignorable() {
  assert!(signal(Condition::new("line-end")).is_declined());
}

#[test]
fn test_handler_settles_signal() {
  let settled: Disposition = handling(
    [Handler::on("line-end", |_| Disposition::handled(7_i32))],
    || signal(Condition::new("line-end")),
  );

  assert_eq!(settled.into_value(), Some(Value::new(7_i32)));
}

#[test]
fn test_error_handled_returns_value() {
  let value: Value = handling(
    [Handler::on("div-by-zero", |_| Disposition::handled(9_i32))],
    || error(Condition::new("div-by-zero")),
  );

  assert_eq!(value.downcast::<i32>(), Some(9));
}

#[test]
fn test_unmatched_kind_is_skipped() {
  let settled: Disposition = handling(
    [Handler::on("line-end", |_| Disposition::handled(()))],
    || signal(Condition::new("div-by-zero")),
  );

  assert!(settled.is_declined());
}

#[test]
fn test_predicate_matcher() {
  let settled: Disposition = handling(
    [Handler::matching(
      |condition| condition.payload_is::<usize>(),
      |condition| Disposition::handled(*condition.payload_ref::<usize>().unwrap()),
    )],
    || signal(Condition::with("line-end", 80_usize)),
  );

  assert_eq!(settled.into_value(), Some(Value::new(80_usize)));
}

#[test]
fn test_innermost_handler_runs_first() {
  let log: Journal = journal();

  let outer: Journal = Rc::clone(&log);
  let inner: Journal = Rc::clone(&log);

  let settled: Disposition = handling(
    [Handler::on("div-by-zero", move |_| {
      note(&outer, "outer");
      Disposition::handled(())
    })],
    || {
      handling(
        [Handler::on("div-by-zero", move |_| {
          note(&inner, "inner");
          Disposition::Declined
        })],
        || signal(Condition::new("div-by-zero")),
      )
    },
  );

  assert!(settled.is_handled());
  assert_eq!(log.borrow().as_slice(), &["inner", "outer"]);
}

#[test]
fn test_declaration_order_within_one_call() {
  let log: Journal = journal();

  let first: Journal = Rc::clone(&log);
  let second: Journal = Rc::clone(&log);

  let settled: Disposition = handling(
    [
      Handler::on("div-by-zero", move |_| {
        note(&first, "first");
        Disposition::Declined
      }),
      Handler::on("div-by-zero", move |_| {
        note(&second, "second");
        Disposition::handled(())
      }),
    ],
    || signal(Condition::new("div-by-zero")),
  );

  assert!(settled.is_handled());
  assert_eq!(log.borrow().as_slice(), &["first", "second"]);
}

#[test]
fn test_decline_without_outer_handler_propagates() {
  let settled: Disposition = handling(
    [Handler::on("div-by-zero", |_| Disposition::Declined)],
    || signal(Condition::new("div-by-zero")),
  );

  assert!(settled.is_declined());
}

#[test]
fn test_handler_never_resees_its_own_condition() {
  let count: Rc<Cell<u32>> = Rc::new(Cell::new(0));
  let inner: Rc<Cell<u32>> = Rc::clone(&count);

  let settled: Disposition = handling(
    [Handler::on("div-by-zero", move |_| {
      inner.set(inner.get() + 1);

      // The running handler is masked; this must find nothing.
      assert!(signal(Condition::new("div-by-zero")).is_declined());

      Disposition::handled(())
    })],
    || signal(Condition::new("div-by-zero")),
  );

  assert!(settled.is_handled());
  assert_eq!(count.get(), 1);
}

#[test]
fn test_outer_handlers_visible_during_action() {
  let log: Journal = journal();

  let outer: Journal = Rc::clone(&log);
  let inner: Journal = Rc::clone(&log);

  handling(
    [Handler::on("overflow", move |_| {
      note(&outer, "outer");
      Disposition::handled(())
    })],
    || {
      handling(
        [Handler::on("div-by-zero", move |_| {
          note(&inner, "inner");

          // Handlers older than the running one stay visible.
          assert!(signal(Condition::new("overflow")).is_handled());

          Disposition::handled(())
        })],
        || signal(Condition::new("div-by-zero")),
      )
    },
  );

  assert_eq!(log.borrow().as_slice(), &["inner", "outer"]);
}

#[test]
fn test_handlers_removed_after_body_exits() {
  handling(
    [Handler::on("line-end", |_| Disposition::handled(()))],
    || assert!(signal(Condition::new("line-end")).is_handled()),
  );

  assert!(signal(Condition::new("line-end")).is_declined());
}

// -----------------------------------------------------------------------------
// Restarts
// -----------------------------------------------------------------------------

#[test]
fn test_available_restart_tracks_extent() {
  assert!(!available_restart("retry"));

  with_restart(vec![Restart::new("retry", |_| ())], || {
    assert!(available_restart("retry"));
  });

  assert!(!available_restart("retry"));
}

#[test]
fn test_invoke_restart_returns_strategy_value() {
  let value: i32 = with_restart(vec![Restart::new("use-zero", |_| 0_i32)], || {
    invoke_restart("use-zero", RestartArgs::new());
    unreachable!()
  });

  assert_eq!(value, 0);
}

#[test]
fn test_restart_receives_arguments() {
  let value: i32 = with_restart(
    vec![Restart::new("use-value", |args: RestartArgs| {
      *args.get::<i32>(0).unwrap()
    })],
    || {
      invoke_restart("use-value", RestartArgs::one(123_i32));
      unreachable!()
    },
  );

  assert_eq!(value, 123);
}

#[test]
fn test_innermost_restart_shadows_outer() {
  let value: &str = with_restart(vec![Restart::new("retry", |_| "outer")], || {
    with_restart(vec![Restart::new("retry", |_| "inner")], || {
      invoke_restart("retry", RestartArgs::new());
      unreachable!()
    })
  });

  assert_eq!(value, "inner");
}

#[test]
fn test_first_declared_restart_wins_within_one_call() {
  let value: &str = with_restart(
    vec![
      Restart::new("retry", |_| "first"),
      Restart::new("retry", |_| "second"),
    ],
    || {
      invoke_restart("retry", RestartArgs::new());
      unreachable!()
    },
  );

  assert_eq!(value, "first");
}

#[test]
fn test_handler_sees_restarts_below_the_signal() {
  let value: f64 = handling(
    [Handler::on("div-by-zero", |_| {
      assert!(available_restart("use-zero"));
      invoke_restart("use-zero", RestartArgs::new()).into()
    })],
    || {
      with_restart(vec![Restart::new("use-zero", |_| 0.0_f64)], || {
        error(Condition::new("div-by-zero"));
        unreachable!()
      })
    },
  );

  assert_eq!(value, 0.0);
}

#[test]
fn test_invocation_unwinds_intermediate_frames() {
  let value: i32 = with_restart(vec![Restart::new("recover", |_| 5_i32)], || {
    with_restart(vec![Restart::new("inner", |_| -1_i32)], || {
      handling([Handler::on("line-end", |_| Disposition::Declined)], || {
        invoke_restart("recover", RestartArgs::new());
        unreachable!()
      })
    })
  });

  assert_eq!(value, 5);
  assert!(!available_restart("recover"));
  assert!(!available_restart("inner"));
  assert!(signal(Condition::new("line-end")).is_declined());
}

#[test]
fn test_strategy_runs_outside_its_own_extent() {
  let value: bool = with_restart(
    vec![Restart::new("probe", |_| available_restart("probe"))],
    || {
      invoke_restart("probe", RestartArgs::new());
      unreachable!()
    },
  );

  // The group is released before the strategy runs.
  assert!(!value);
}

#[test]
fn test_invoke_without_match_signals_condition() {
  let value: Value = handling(
    [Handler::on(Symbol::NO_SUCH_RESTART, |condition| {
      let name: Symbol = *condition.payload_ref::<Symbol>().unwrap();
      Disposition::handled(name)
    })],
    || invoke_restart("nope", RestartArgs::new()),
  );

  assert_eq!(value.downcast::<Symbol>(), Some(Symbol::new("nope")));
}

// -----------------------------------------------------------------------------
// Escapes
// -----------------------------------------------------------------------------

#[test]
fn test_escape_normal_return() {
  assert_eq!(to_escape(|_: Escape<i32>| 7), 7);
}

#[test]
fn test_escape_carries_payload() {
  let value: i32 = to_escape(|exit| {
    exit.escape(5);
  });

  assert_eq!(value, 5);
}

#[test]
fn test_escape_from_handler_releases_frames() {
  let value: i32 = to_escape(|exit| {
    with_restart(vec![Restart::new("recover", |_| 0_i32)], || {
      handling(
        [Handler::on("div-by-zero", move |_| exit.escape(42))],
        || {
          error(Condition::new("div-by-zero"));
          unreachable!()
        },
      )
    })
  });

  assert_eq!(value, 42);
  assert!(!available_restart("recover"));
  assert!(signal(Condition::new("div-by-zero")).is_declined());
}

#[test]
fn test_inner_escape_targets_inner_frame() {
  let value: i32 = to_escape(|outer| {
    let inner_value: i32 = to_escape(|_: Escape<i32>| {
      let _ = outer;
      3
    });

    inner_value + 1
  });

  assert_eq!(value, 4);
}

#[test]
fn test_escape_skips_inner_frames() {
  let value: i32 = to_escape(|outer| {
    to_escape(|_: Escape<i32>| outer.escape(9));
    unreachable!()
  });

  assert_eq!(value, 9);
}

#[test]
fn test_expired_escape_signals_condition() {
  let mut smuggled: Option<Escape<i32>> = None;

  let primed: i32 = to_escape(|exit| {
    smuggled = Some(exit);
    0
  });

  assert_eq!(primed, 0);

  let stale: Escape<i32> = smuggled.unwrap();

  let outcome: &str = to_escape(|rescue| {
    handling(
      [Handler::on(Symbol::ESCAPE_EXPIRED, move |_| {
        rescue.escape("expired")
      })],
      || stale.escape(1),
    )
  });

  assert_eq!(outcome, "expired");
}

// -----------------------------------------------------------------------------
// Host Failures + Isolation
// -----------------------------------------------------------------------------

#[test]
fn test_host_panic_releases_frames() {
  let caught = panic::catch_unwind(AssertUnwindSafe(|| {
    with_restart(vec![Restart::new("recover", |_| ())], || {
      handling([Handler::on("line-end", |_| Disposition::Declined)], || {
        panic!("boom")
      })
    })
  }));

  assert!(caught.is_err());
  assert!(!available_restart("recover"));
  assert!(signal(Condition::new("line-end")).is_declined());
}

#[test]
fn test_contexts_are_per_thread() {
  with_restart(vec![Restart::new("recover", |_| ())], || {
    let seen: bool = thread::spawn(|| available_restart("recover"))
      .join()
      .unwrap();

    assert!(!seen);
    assert!(available_restart("recover"));
  });
}
