//! The timer core.
//!
//! - `clock`: monotonic time sources
//! - `phase`: the phase state machine
//! - `counter`: completed-tomato bookkeeping
//! - `controller`: `Tomato`, the public driver of the state machine
//! - `render`: the view snapshot drawn by the shell

pub mod clock;
pub mod controller;
pub mod counter;
pub mod phase;
pub mod render;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use controller::Tomato;
pub use counter::SessionCounter;
pub use phase::{format_remaining, Countdown, Limbo, Paused, Phase, PhaseKind, PhaseStatus};
pub use render::{render, Fingerprint, View};
