//! Terminal front end for orgdesk.
//!
//! Each invocation opens the store, restores the session, runs one
//! command and prints the view the router lands on.

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod render;
