//! Output formatting for the stack plan.
//!
//! - [`json`] - the name-keyed plan document for the provisioning engine
//! - [`terminal`] - colored summary for humans

mod json;
mod terminal;

pub use json::{plan_json, write_plan_file};
pub use terminal::{format_field, print_plan};
