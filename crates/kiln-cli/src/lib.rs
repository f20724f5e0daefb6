//! Kiln CLI - inspect, validate and serve build configurations.
//!
//! The heavy lifting lives in [`kiln_config`]; this crate wires it to a
//! command line, a terminal UI and a development server.
//!
//! - [`cli`] - argument definitions
//! - [`commands`] - command implementations
//! - [`dev`] - development server with reload events
//! - [`error`] - CLI error type and miette conversion
//! - [`logger`] - `tracing` subscriber setup
//! - [`ui`] - status messages
//!
//! # Example
//!
//! ```rust,no_run
//! use kiln_cli::{error::Result, logger};
//!
//! fn main() -> Result<()> {
//!     logger::init_logger(false, false, false);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod dev;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, Result, ResultExt};
