//! Per-thread dynamic extent bookkeeping.

mod context;
mod frame;
mod guard;
mod ids;

pub(crate) use self::context::DynamicContext;
pub(crate) use self::context::with;
pub(crate) use self::frame::EscapeFrame;
pub(crate) use self::frame::HandlerAction;
pub(crate) use self::frame::HandlerFrame;
pub(crate) use self::frame::HandlerPredicate;
pub(crate) use self::frame::Matcher;
pub(crate) use self::frame::RestartFrame;
pub(crate) use self::guard::EscapeGuard;
pub(crate) use self::guard::HandlerGuard;
pub(crate) use self::guard::MaskGuard;
pub(crate) use self::guard::RestartGuard;
pub(crate) use self::ids::BindingId;
pub(crate) use self::ids::FrameId;
