//! The seven operators of the condition system.

mod escape;
mod handling;
mod restart;
mod signal;

pub use self::escape::Escape;
pub use self::escape::to_escape;

pub use self::handling::Handler;
pub use self::handling::handling;

pub use self::restart::Restart;
pub use self::restart::RestartArgs;
pub use self::restart::available_restart;
pub use self::restart::invoke_restart;
pub use self::restart::with_restart;

pub use self::signal::error;
pub use self::signal::signal;
