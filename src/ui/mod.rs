//! User interface module - terminal output.
//!
//! Machine-readable results (version name, build info) go to stdout; status,
//! warnings and errors go to stderr so a pipeline can capture stdout as is.

pub mod formatter;

pub use formatter::{
    display_boundary_warning, display_build_info, display_error, display_example_args,
    display_migration, display_retired, display_status, display_success,
};
