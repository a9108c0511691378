//! A line-oriented file reader with comments and include directives.
//!
//! Build a [`FileParser`] with a description of the kind of file and a
//! [`LineParser`] that acts on each line, adjust the comment and include
//! markers if the defaults (`//` and `#include`) don't suit, then call
//! [`FileParser::parse`]. Every error found across the whole tree of
//! included files is returned, not just the first.
//!
//! ```no_run
//! use fileparse::{EchoParser, FileParser};
//!
//! let mut fp = FileParser::new("config", EchoParser::stdout());
//! let (stats, errors) = fp.parse("settings.conf");
//! for err in &errors {
//!     eprintln!("{}", err);
//! }
//! eprintln!("{}", stats);
//! ```

pub mod app;

pub use app::error::{FileNameError, ParseError};
pub use app::line_parser::{EchoParser, LineParser, NullParser};
pub use app::location::{ChainLink, IncludeChain, Location};
pub use app::models::Stats;
pub use app::parser::{FileParser, DEFAULT_COMMENT_MARKER, DEFAULT_INCLUDE_MARKER};
