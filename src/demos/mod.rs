//! Signal demonstrations
//!
//! - `pause`: catch one SIGINT in the current process
//! - `send`: fork a child that catches the demo signals, then signal it

pub mod pause;
pub mod send;
