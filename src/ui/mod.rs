//! User interface module.
//!
//! The run is non-interactive (it executes in CI), so this module only
//! re-exports the formatting functions used to report progress.

pub mod formatter;

pub use formatter::{
    display_boundary_warning, display_error, display_plan, display_status, display_step,
    display_success, display_summary, format_plan,
};
