//! Test utilities shared by unit tests across the crate.
//!
//! Only compiled for `cfg(test)`.

pub mod completion;
pub mod upstream;
