//! Embassy async tasks
//!
//! The poll task owns all application state; the other two only drive the
//! radio and the IP stack.

pub mod poll;
pub mod radio;

pub use poll::poll_task;
pub use radio::{cyw43_task, net_task};
