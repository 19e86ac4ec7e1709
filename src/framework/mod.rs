//! The retry framework every GitHub request runs through.
//!
//! A request attempt resolves to a [`State`]: a value, a delayed retry, or an error to stop
//! with. Throttled responses are classified by [`Throttle::detect`] and resolved by a
//! [`RetryPolicy`].

mod retry;
mod state;
mod throttle;

pub use retry::RetryPolicy;
pub use state::State;
pub use throttle::{Throttle, ThrottleKind};
