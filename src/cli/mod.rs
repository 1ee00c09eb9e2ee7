//! # Command-Line Interface
//!
//! User-facing CLI commands and output formatting.
//!
//! ## Command Groups
//!
//! | Group | Purpose | Examples |
//! |-------|---------|----------|
//! | Core | Site management | `init`, `status` |
//! | Batch | Batch lifecycle | `batch add`, `batch advance`, `batch options` |
//! | Tank | Equipment | `tank list`, `tank show` |
//! | Analytics | Planning | `inventory`, `forecast`, `plan` |
//!
//! ## Output Formats
//!
//! All commands support the `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output:
//! ```bash
//! brewhouse --verbose batch list
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod batch;
mod output;
mod query;
mod tank;

pub use app::{run, Cli, Commands};
pub use output::{Output, OutputFormat};
