use crate::app::location::Location;
use anyhow::Result;
use std::io::{self, Stdout, Write};

/// Receives each line that survives comment stripping, blank-line removal
/// and include expansion, together with where it came from.
///
/// An error returned here is recorded against the line's location; parsing
/// carries on with the next line.
pub trait LineParser {
    fn parse_line(&mut self, line: &str, loc: &Location) -> Result<()>;
}

impl<F> LineParser for F
where
    F: FnMut(&str, &Location) -> Result<()>,
{
    fn parse_line(&mut self, line: &str, loc: &Location) -> Result<()> {
        self(line, loc)
    }
}

/// Discards everything. Useful for checking a file tree for missing files,
/// loops and malformed include directives without acting on the content.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullParser;

impl LineParser for NullParser {
    fn parse_line(&mut self, _line: &str, _loc: &Location) -> Result<()> {
        Ok(())
    }
}

/// Writes every line it is given, followed by a newline, to its writer.
pub struct EchoParser<W: Write = Stdout> {
    writer: W,
}

impl EchoParser<Stdout> {
    pub fn stdout() -> Self {
        Self {
            writer: io::stdout(),
        }
    }
}

impl Default for EchoParser<Stdout> {
    fn default() -> Self {
        Self::stdout()
    }
}

impl<W: Write> EchoParser<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> LineParser for EchoParser<W> {
    fn parse_line(&mut self, line: &str, _loc: &Location) -> Result<()> {
        writeln!(self.writer, "{}", line)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn echo_appends_newline() {
        let mut ep = EchoParser::new(Vec::new());
        let loc = Location::new("testLoc");
        ep.parse_line("line", &loc).unwrap();
        ep.parse_line("", &loc).unwrap();
        assert_eq!(String::from_utf8(ep.into_inner()).unwrap(), "line\n\n");
    }

    #[test]
    fn null_accepts_everything() {
        let loc = Location::new("testLoc");
        assert!(NullParser.parse_line("anything", &loc).is_ok());
    }

    #[test]
    fn closures_are_line_parsers() {
        let mut seen = Vec::new();
        let mut record = |line: &str, loc: &Location| -> Result<()> {
            seen.push(format!("{}={}", loc, line));
            Ok(())
        };
        let mut loc = Location::new("f");
        loc.incr();
        record.parse_line("x", &loc).unwrap();
        assert_eq!(seen, vec!["f:1=x".to_string()]);
    }
}
