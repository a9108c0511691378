use crate::app::error::ParseError;
use crate::app::filename::{fix_file_name, fix_include_file_name};
use crate::app::line_parser::LineParser;
use crate::app::location::{IncludeChain, Location};
use crate::app::models::{RuntimeConfig, Stats};
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Introduces the name of a file to be read in place of the directive.
pub const DEFAULT_INCLUDE_MARKER: &str = "#include";

/// Everything from this to the end of the line is ignored.
pub const DEFAULT_COMMENT_MARKER: &str = "//";

/// Reads a file line by line, strips comments and surrounding white space,
/// follows include directives (refusing loops) and hands every remaining
/// line to its `LineParser`.
pub struct FileParser<P: LineParser> {
    description: String,
    line_parser: P,

    comment: String,
    include_marker: String,
    keep_blank_lines: bool,
    trim_whitespace: bool,

    stats: Stats,
}

impl<P: LineParser> FileParser<P> {
    /// A parser with the default comment and include markers, trimming on
    /// and blank lines dropped. `description` names the kind of file in
    /// error messages.
    pub fn new(description: impl Into<String>, line_parser: P) -> Self {
        Self {
            description: description.into(),
            line_parser,
            comment: DEFAULT_COMMENT_MARKER.to_string(),
            include_marker: DEFAULT_INCLUDE_MARKER.to_string(),
            keep_blank_lines: false,
            trim_whitespace: true,
            stats: Stats::default(),
        }
    }

    /// Builds a parser configured from `config`.
    pub fn with_config(config: &RuntimeConfig, line_parser: P) -> Self {
        let mut fp = Self::new(config.description.clone(), line_parser);
        fp.set_comment(config.comment.clone());
        fp.set_include_marker(config.include_marker.clone());
        if config.keep_blank_lines {
            fp.keep_blank_lines();
        }
        if !config.trim_whitespace {
            fp.no_trim();
        }
        fp
    }

    /// Sets the comment introducer. An empty string turns comments off.
    pub fn set_comment(&mut self, comment: impl Into<String>) {
        self.comment = comment.into();
    }

    /// Sets the include keyword. An empty string turns includes off and
    /// such lines are passed on like any other.
    pub fn set_include_marker(&mut self, marker: impl Into<String>) {
        self.include_marker = marker.into();
    }

    /// Passes lines that are empty after comment stripping on to the line
    /// parser instead of dropping them.
    pub fn keep_blank_lines(&mut self) {
        self.keep_blank_lines = true;
    }

    /// Leaves leading and trailing white space in place.
    pub fn no_trim(&mut self) {
        self.trim_whitespace = false;
    }

    /// The kind of file being parsed, as shown in error messages.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Statistics from the most recent call to `parse`.
    pub fn stats(&self) -> Stats {
        self.stats
    }

    /// The line parser, for inspecting what it gathered.
    pub fn line_parser(&self) -> &P {
        &self.line_parser
    }

    pub fn line_parser_mut(&mut self) -> &mut P {
        &mut self.line_parser
    }

    /// Consumes the file parser and gives back its line parser.
    pub fn into_line_parser(self) -> P {
        self.line_parser
    }

    /// Parses `filename` and everything it includes. Every error found is
    /// returned, in the order it was found, along with the statistics for
    /// this run only.
    ///
    /// A leading `~` or `~name` in `filename` is expanded. Include targets
    /// are taken relative to the including file and never expanded.
    pub fn parse(&mut self, filename: impl AsRef<Path>) -> (Stats, Vec<ParseError>) {
        self.stats = Stats::default();
        let filename = filename.as_ref();
        let chain = IncludeChain::new();

        let errors = match fix_file_name(filename) {
            Ok(path) => self.parse_file(path, &chain),
            Err(source) => record(
                Vec::new(),
                ParseError::Expand {
                    note: self.note(&chain),
                    name: filename.display().to_string(),
                    source,
                },
            ),
        };
        (self.stats, errors)
    }

    fn note(&self, chain: &IncludeChain) -> String {
        if chain.is_empty() {
            self.description.clone()
        } else {
            format!("{} : {}", self.description, chain)
        }
    }

    fn strip_comment<'a>(&self, line: &'a str) -> &'a str {
        let line = match (self.comment.is_empty(), line.find(self.comment.as_str())) {
            (false, Some(idx)) => &line[..idx],
            _ => line,
        };
        if self.trim_whitespace {
            line.trim()
        } else {
            line
        }
    }

    /// The include target if `line` is an include directive. The target is
    /// empty when the directive names no file.
    fn include_target<'a>(&self, line: &'a str) -> Option<&'a str> {
        if self.include_marker.is_empty() {
            return None;
        }
        line.strip_prefix(self.include_marker.as_str())
            .map(str::trim)
    }

    /// Checks `path` against the chain, opens it and scans it.
    fn parse_file(&mut self, path: PathBuf, chain: &IncludeChain) -> Vec<ParseError> {
        let errors = Vec::new();
        let note = self.note(chain);

        let identity = identity_of(&path);
        if let Some(link) = chain.find_loop(&identity) {
            return record(
                errors,
                ParseError::IncludeLoop {
                    note,
                    path,
                    link: link.clone(),
                },
            );
        }

        let file = match File::open(&path) {
            Ok(file) => file,
            Err(source) => return record(errors, ParseError::Open { note, path, source }),
        };
        log::debug!("{}: reading {}", note, path.display());

        self.stats.files_visited += 1;
        let mut loc = Location::new(path);
        loc.set_note(note);

        self.scan_lines(BufReader::new(file), loc, &identity, chain)
    }

    fn scan_lines<R: BufRead>(
        &mut self,
        mut reader: R,
        mut loc: Location,
        identity: &Path,
        chain: &IncludeChain,
    ) -> Vec<ParseError> {
        let mut errors = Vec::new();
        let mut buf = Vec::new();

        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => {}
                Err(source) => {
                    loc.incr();
                    errors = record(errors, ParseError::Read { location: loc, source });
                    break;
                }
            }
            self.stats.lines_read += 1;
            loc.incr();

            let original = String::from_utf8_lossy(strip_line_ending(&buf)).into_owned();
            let line = self.strip_comment(&original);
            if line.is_empty() && !self.keep_blank_lines {
                continue;
            }

            if let Some(target) = self.include_target(line) {
                if target.is_empty() {
                    loc.set_content(original.as_str());
                    errors = record(
                        errors,
                        ParseError::MissingIncludeName {
                            location: loc.clone(),
                        },
                    );
                    continue;
                }

                let include = fix_include_file_name(target, loc.source());
                log::debug!("{}: including {}", loc, include.display());
                let nested = chain.extended(&loc, identity);
                errors.extend(self.parse_file(include, &nested));
                continue;
            }

            self.stats.lines_parsed += 1;
            if let Err(source) = self.line_parser.parse_line(line, &loc) {
                errors = record(
                    errors,
                    ParseError::Line {
                        location: loc.clone(),
                        source,
                    },
                );
            }
        }

        errors
    }
}

/// The key a file is compared by for loop detection: its canonical path
/// where the file system can supply one.
fn identity_of(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

// Drops a trailing "\n" or "\r\n".
fn strip_line_ending(buf: &[u8]) -> &[u8] {
    let buf = buf.strip_suffix(b"\n").unwrap_or(buf);
    buf.strip_suffix(b"\r").unwrap_or(buf)
}

fn record(mut errors: Vec<ParseError>, err: ParseError) -> Vec<ParseError> {
    log::debug!("recorded: {}", err);
    errors.push(err);
    errors
}
