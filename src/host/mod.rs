//! Host-facing command contract, session state and stdio bridge.

pub mod contract;
pub mod session;
pub mod stdio;
