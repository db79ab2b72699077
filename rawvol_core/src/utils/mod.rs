//! # Utility Modules
//!
//! - **`logging`**: initialization of the `tracing` subscriber used by binaries and tests.

pub mod logging;
