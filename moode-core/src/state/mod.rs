//! Display power state machine
//!
//! The backlight is a function of the current state only. Transitions are
//! explicit, finite, and deterministic.

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::State;
