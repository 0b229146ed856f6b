//! Library half of the `cohort` binary: command implementations and small
//! file helpers, kept here so they can be tested without spawning the binary.
pub mod commands;
pub mod util;
