use std::fmt;
use std::path::{Path, PathBuf};

/// Where a line came from: the file, the line number within it and a note
/// describing how the file was reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    source: PathBuf,
    line: usize,
    note: String,
    content: Option<String>,
}

impl Location {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            line: 0,
            note: String::new(),
            content: None,
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Current line number, starting at 1 once the first line is read.
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn note(&self) -> &str {
        &self.note
    }

    pub fn set_note(&mut self, note: impl Into<String>) {
        self.note = note.into();
    }

    /// The original text of the current line, when it was recorded.
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = Some(content.into());
    }

    /// Advances to the next line and forgets the previous line's content.
    pub fn incr(&mut self) {
        self.line += 1;
        self.content = None;
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.source.display(), self.line)
    }
}

/// One step of an include chain: the file that held the include directive
/// and the line it was on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainLink {
    path: PathBuf,
    line: usize,
    identity: PathBuf,
}

impl ChainLink {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn line(&self) -> usize {
        self.line
    }
}

impl fmt::Display for ChainLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.path.display(), self.line)
    }
}

/// The files currently being expanded, outermost first.
///
/// A chain is never changed in place: `extended` hands back a new chain, so
/// sibling includes each see only their own ancestors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncludeChain {
    links: Vec<ChainLink>,
}

impl IncludeChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn links(&self) -> &[ChainLink] {
        &self.links
    }

    /// A copy of this chain with `loc` appended. `identity` is the key the
    /// file is compared by when looking for loops.
    pub fn extended(&self, loc: &Location, identity: &Path) -> IncludeChain {
        let mut links = self.links.clone();
        links.push(ChainLink {
            path: loc.source().to_path_buf(),
            line: loc.line(),
            identity: identity.to_path_buf(),
        });
        IncludeChain { links }
    }

    /// The chain entry for the file with the given identity, if it is
    /// already being expanded.
    pub fn find_loop(&self, identity: &Path) -> Option<&ChainLink> {
        self.links.iter().find(|link| link.identity == identity)
    }
}

impl fmt::Display for IncludeChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, link) in self.links.iter().enumerate() {
            if i > 0 {
                f.write_str(" : ")?;
            }
            write!(f, "included from {}", link)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(path: &str, line: usize) -> Location {
        let mut loc = Location::new(path);
        for _ in 0..line {
            loc.incr();
        }
        loc
    }

    #[test]
    fn location_counts_lines() {
        let mut loc = Location::new("a.conf");
        assert_eq!(loc.to_string(), "a.conf:0");
        loc.incr();
        loc.set_content("  #include  ");
        assert_eq!(loc.to_string(), "a.conf:1");
        assert_eq!(loc.content(), Some("  #include  "));
        loc.incr();
        assert_eq!(loc.line(), 2);
        assert_eq!(loc.content(), None);
    }

    #[test]
    fn chain_renders_outermost_first() {
        let chain = IncludeChain::new()
            .extended(&at("a.conf", 3), Path::new("/x/a.conf"))
            .extended(&at("b.conf", 1), Path::new("/x/b.conf"));
        assert_eq!(
            chain.to_string(),
            "included from a.conf:3 : included from b.conf:1"
        );
        assert_eq!(IncludeChain::new().to_string(), "");
    }

    #[test]
    fn extending_leaves_the_original_alone() {
        let root = IncludeChain::new().extended(&at("a", 1), Path::new("/a"));
        let left = root.extended(&at("b", 2), Path::new("/b"));
        let right = root.extended(&at("c", 4), Path::new("/c"));

        assert_eq!(root.len(), 1);
        assert_eq!(left.len(), 2);
        assert!(right.find_loop(Path::new("/b")).is_none());
        assert_eq!(right.find_loop(Path::new("/a")).map(|l| l.line()), Some(1));
    }
}
