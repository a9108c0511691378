use crate::app::error::ParseError;
use crate::app::models::Stats;
use std::path::Path;

pub struct OutputGenerator;

impl OutputGenerator {
    /// One line per error, in the order they were found.
    pub fn generate_errors(errors: &[ParseError]) -> String {
        let mut output = String::new();

        for err in errors {
            output.push_str(&err.to_string());
            output.push('\n');
        }

        output.trim_end().to_string()
    }

    pub fn generate_summary(path: &Path, stats: &Stats) -> String {
        format!("{}: {}", path.display(), stats)
    }
}
