//! JSON serialization for the session file and command output.
//!
//! Output uses 2-space indentation and ends with a newline.

mod json;

pub use json::*;
