//! Hardware abstraction traits
//!
//! These traits define the interface between the application logic
//! and the network stack.

pub mod net;

pub use net::{ConnectError, Connection, Connector};
