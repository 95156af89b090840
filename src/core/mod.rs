//! Built-in subcommand handlers
//!
//! Each handler declares its options and turns them into build tool
//! invocations; the build tool does the actual work.

pub mod bazel;
pub mod diff;
pub mod integration;
pub mod platform;
pub mod readable;
pub mod size_report;
pub mod test_all;

pub use bazel::{BazelCommand, BazelRunner};
pub use diff::DiffOutput;
pub use integration::IntegrationTest;
pub use platform::Platform;
pub use readable::ReadableExamples;
pub use size_report::SizeReport;
pub use test_all::TestAll;

use crate::error::{DevError, Result};
use regex::Regex;

/// Checks names that end up inside bazel target labels
#[derive(Debug, Clone)]
pub struct NameValidator {
    re_name: Regex,
}

impl NameValidator {
    pub fn new() -> Result<Self> {
        Ok(Self {
            re_name: Regex::new(r"^[A-Za-z0-9_]+(?:/[A-Za-z0-9_]+)*$")
                .map_err(|e| DevError::config(format!("Failed to compile regex: {e}")))?,
        })
    }

    /// Validate `name`, describing it as `what` in the error
    pub fn validate(&self, what: &str, name: &str) -> Result<()> {
        if self.re_name.is_match(name) {
            Ok(())
        } else {
            Err(DevError::validation(format!(
                "Invalid {what} '{name}': use letters, digits, '_' and '/' separators"
            )))
        }
    }
}
