use std::fmt;

/// Represents the final configuration after merging presets and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub description: String,
    pub comment: String,
    pub include_marker: String,
    pub keep_blank_lines: bool,
    pub trim_whitespace: bool,
    pub check_only: bool,
    pub show_stats: bool,
}

/// Counters describing a single call to `FileParser::parse`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub(crate) files_visited: usize,
    pub(crate) lines_read: usize,
    pub(crate) lines_parsed: usize,
}

impl Stats {
    /// Files successfully opened, the root included.
    pub fn files_visited(&self) -> usize {
        self.files_visited
    }

    /// Raw lines scanned across every opened file.
    pub fn lines_read(&self) -> usize {
        self.lines_read
    }

    /// Lines handed to the line parser.
    pub fn lines_parsed(&self) -> usize {
        self.lines_parsed
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "files: {:3}   lines read: {:5}   parsed: {:5}",
            self.files_visited, self.lines_read, self.lines_parsed
        )
    }
}
