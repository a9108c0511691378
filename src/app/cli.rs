use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[command(
    author,
    version,
    about = "Strip comments, follow include directives and print what remains"
)]
pub struct Cli {
    /// Files to parse
    pub files: Vec<PathBuf>,

    /// Use a predefined set of options from presets.toml
    #[arg(long)]
    pub preset: Option<String>,

    /// Read presets from this file instead of ~/.config/fileparse/presets.toml
    #[arg(long)]
    pub presets: Option<PathBuf>,

    /// Name for the kind of file being parsed, shown in error messages
    #[arg(long)]
    pub description: Option<String>,

    /// Comment introducer (an empty string turns comments off)
    #[arg(long)]
    pub comment: Option<String>,

    /// Include keyword (an empty string turns includes off)
    #[arg(long)]
    pub include_marker: Option<String>,

    /// Pass blank lines through instead of dropping them
    #[arg(long)]
    pub keep_blank_lines: bool,

    /// Keep leading and trailing white space
    #[arg(long)]
    pub no_trim: bool,

    /// Only check the files; don't print their contents
    #[arg(long)]
    pub check: bool,

    /// Print statistics for each file to stderr
    #[arg(long)]
    pub stats: bool,

    /// Patterns for further files to parse, below the current directory (e.g., 'conf/**/*.conf')
    #[arg(long, num_args = 1..)]
    pub glob: Option<Vec<String>>,

    /// Patterns for files or directories to skip when using --glob
    #[arg(long, num_args = 1..)]
    pub exclude: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_markers_are_accepted() {
        let cli = Cli::try_parse_from([
            "fileparse",
            "--comment",
            "",
            "--include-marker",
            "",
            "--check",
            "a.conf",
        ])
        .unwrap();
        assert_eq!(cli.comment.as_deref(), Some(""));
        assert_eq!(cli.include_marker.as_deref(), Some(""));
        assert!(cli.check);
        assert_eq!(cli.files, vec![PathBuf::from("a.conf")]);
    }

    #[test]
    fn globs_take_several_values() {
        let cli = Cli::try_parse_from(["fileparse", "--glob", "*.conf", "*.cfg", "--exclude", "old/**"])
            .unwrap();
        assert_eq!(cli.glob.unwrap(), vec!["*.conf", "*.cfg"]);
        assert_eq!(cli.exclude.unwrap(), vec!["old/**"]);
        assert!(cli.files.is_empty());
    }
}
