use std::fmt::Debug;
use std::fmt::Formatter;
use std::fmt::Result;

use crate::core::Condition;
use crate::core::Payload;
use crate::core::Symbol;
use crate::core::Value;
use crate::core::fatal;
use crate::ops::error;
use crate::scope;
use crate::scope::BindingId;
use crate::scope::FrameId;
use crate::scope::RestartFrame;
use crate::scope::RestartGuard;
use crate::unwind;
use crate::unwind::Transfer;

// -----------------------------------------------------------------------------
// Restart Args
// -----------------------------------------------------------------------------

/// The ordered arguments carried by a restart invocation.
///
/// Arguments are type-erased [`Value`]s; strategies extract them with the
/// typed accessors.
///
/// # Examples
///
/// ```
/// use parley::types::RestartArgs;
///
/// let args = RestartArgs::one(123.0_f64);
///
/// assert_eq!(args.len(), 1);
/// assert_eq!(args.get::<f64>(0), Some(&123.0));
/// assert_eq!(args.get::<i32>(0), None);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RestartArgs {
  items: Vec<Value>,
}

impl RestartArgs {
  /// Creates an empty argument list.
  #[inline]
  pub const fn new() -> Self {
    Self { items: Vec::new() }
  }

  /// Creates an argument list carrying a single value.
  #[inline]
  pub fn one<T>(data: T) -> Self
  where
    T: Payload,
  {
    Self {
      items: vec![Value::new(data)],
    }
  }

  /// Returns the number of arguments.
  #[inline]
  pub fn len(&self) -> usize {
    self.items.len()
  }

  /// Returns `true` if no arguments were carried.
  #[inline]
  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  /// Returns the argument at `index` as an untyped [`Value`].
  #[inline]
  pub fn value(&self, index: usize) -> Option<&Value> {
    self.items.get(index)
  }

  /// Returns a shared reference to the argument at `index` as type `T`.
  ///
  /// Returns `None` if the index is out of bounds or the argument has a
  /// different type.
  #[inline]
  pub fn get<T>(&self, index: usize) -> Option<&T>
  where
    T: 'static,
  {
    self.items.get(index).and_then(Value::downcast_ref)
  }
}

impl From<Vec<Value>> for RestartArgs {
  #[inline]
  fn from(other: Vec<Value>) -> Self {
    Self { items: other }
  }
}

impl FromIterator<Value> for RestartArgs {
  #[inline]
  fn from_iter<I>(iter: I) -> Self
  where
    I: IntoIterator<Item = Value>,
  {
    Self {
      items: Vec::from_iter(iter),
    }
  }
}

// -----------------------------------------------------------------------------
// Restart
// -----------------------------------------------------------------------------

/// A named recovery strategy, installed by [`with_restart`].
///
/// The strategy runs only when a visible handler (or any dynamic
/// descendant of the body) invokes it by name; its result becomes the
/// value of the [`with_restart`] call that bound it.
///
/// # Examples
///
/// ```
/// use parley::types::Restart;
///
/// let fallback: Restart<f64> = Restart::new("use-zero", |_| 0.0);
/// ```
pub struct Restart<T> {
  name: Symbol,
  run: Box<dyn FnOnce(RestartArgs) -> T>,
}

impl<T> Restart<T> {
  /// Creates a restart named `name` running `strategy` when invoked.
  #[inline]
  pub fn new<K, F>(name: K, strategy: F) -> Self
  where
    K: Into<Symbol>,
    F: FnOnce(RestartArgs) -> T + 'static,
  {
    Self {
      name: name.into(),
      run: Box::new(strategy),
    }
  }

  /// Returns the restart's name.
  #[inline]
  pub const fn name(&self) -> Symbol {
    self.name
  }
}

impl<T> Debug for Restart<T> {
  fn fmt(&self, f: &mut Formatter<'_>) -> Result {
    f.debug_struct("Restart")
      .field("name", &self.name)
      .finish_non_exhaustive()
  }
}

// -----------------------------------------------------------------------------
// With Restart
// -----------------------------------------------------------------------------

/// Advertises named recovery strategies for the dynamic extent of `body`.
///
/// The restart names are visible to [`available_restart`] and
/// [`invoke_restart`] while `body` runs, including from handler actions
/// installed above this call — the canonical pattern where outer code
/// selects a recovery registered by inner code.
///
/// Returns `body`'s value on normal exit. When an invocation targets one
/// of this call's restarts, the frames between the invocation site and
/// this call are released, the group is removed, and the named strategy
/// runs *in the dynamic context of this call's caller*; its result becomes
/// the return value. Transfers targeting an outer binding, and host
/// panics, release the group and keep unwinding.
///
/// Within one call the first-declared restart wins a name lookup; across
/// nested calls the innermost wins.
///
/// # Examples
///
/// ```
/// use parley::error;
/// use parley::handling;
/// use parley::invoke_restart;
/// use parley::types::Condition;
/// use parley::types::Handler;
/// use parley::types::Restart;
/// use parley::types::RestartArgs;
/// use parley::with_restart;
///
/// let value = handling(
///   [Handler::on("div-by-zero", |_| invoke_restart("use-zero", RestartArgs::new()).into())],
///   || {
///     with_restart(vec![Restart::new("use-zero", |_| 0.0_f64)], || {
///       error(Condition::new("div-by-zero"));
///       unreachable!()
///     })
///   },
/// );
///
/// assert_eq!(value, 0.0);
/// ```
pub fn with_restart<F, T>(restarts: Vec<Restart<T>>, body: F) -> T
where
  F: FnOnce() -> T,
{
  let binding: BindingId = BindingId::next();
  let mut restarts: Vec<Restart<T>> = restarts;
  let mut frames: Vec<FrameId> = Vec::with_capacity(restarts.len());

  scope::with(|ctx| {
    // Within one call the first-declared restart must win a name lookup,
    // and the walk is newest-first: push in reverse declaration order.
    for restart in restarts.iter().rev() {
      let frame: FrameId = FrameId::next();

      frames.push(frame);
      ctx.push_restart(RestartFrame {
        name: restart.name,
        binding,
        frame,
      });
    }
  });

  let guard: RestartGuard = RestartGuard::new(frames);

  match unwind::run_protected(body) {
    Ok(value) => {
      drop(guard);
      value
    }
    Err(payload) => match Transfer::reclaim(payload) {
      Ok(transfer) if transfer.binding() == binding => {
        // The strategy runs in the dynamic context of this call's caller.
        drop(guard);

        let Transfer::Restart { name, args, .. } = transfer else {
          fatal!("escape transfer claimed by a restart frame");
        };

        match restarts.iter().position(|restart| restart.name == name) {
          Some(index) => {
            let restart: Restart<T> = restarts.swap_remove(index);

            tracing::trace!(
              target: "parley",
              restart = %name,
              action = "restart",
              result = "invoked",
            );

            (restart.run)(args)
          }
          None => fatal!("restart vanished from its binding frame"),
        }
      }
      Ok(transfer) => {
        drop(guard);
        transfer.depart()
      }
      Err(payload) => {
        drop(guard);
        unwind::propagate(payload)
      }
    },
  }
}

// -----------------------------------------------------------------------------
// Available Restart
// -----------------------------------------------------------------------------

/// Returns `true` if a restart named `name` is visible on this thread.
///
/// Read-only: the restart stack is not modified.
///
/// # Examples
///
/// ```
/// use parley::available_restart;
/// use parley::types::Restart;
/// use parley::with_restart;
///
/// assert!(!available_restart("retry"));
///
/// with_restart(vec![Restart::new("retry", |_| ())], || {
///   assert!(available_restart("retry"));
/// });
/// ```
pub fn available_restart<K>(name: K) -> bool
where
  K: Into<Symbol>,
{
  let name: Symbol = name.into();

  scope::with(|ctx| ctx.has_restart(name))
}

// -----------------------------------------------------------------------------
// Invoke Restart
// -----------------------------------------------------------------------------

/// Invokes the newest visible restart named `name` with `args`.
///
/// On a match, control unwinds to the `with_restart` call that bound the
/// restart and does not return here. The innermost binding wins when
/// nested calls share a name.
///
/// With no match, the [`NO_SUCH_RESTART`] condition is signaled via
/// [`error`], carrying the name as payload; if a handler settles that
/// condition, its value becomes this function's return value.
///
/// [`NO_SUCH_RESTART`]: crate::types::Symbol::NO_SUCH_RESTART
/// [`error`]: crate::error
pub fn invoke_restart<K>(name: K, args: RestartArgs) -> Value
where
  K: Into<Symbol>,
{
  let name: Symbol = name.into();

  match scope::with(|ctx| ctx.find_restart(name)) {
    Some(binding) => Transfer::Restart {
      binding,
      name,
      args,
    }
    .depart(),
    None => error(Condition::no_such_restart(name)),
  }
}
