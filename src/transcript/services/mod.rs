//! Application services for the transcript subsystem.
//!
//! Services orchestrate domain operations and coordinate between ports.

mod replay;


pub use replay::{Prepared, ReplayPreparer};
