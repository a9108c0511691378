use crate::app::cli::Cli;
use crate::app::models::RuntimeConfig;
use crate::app::parser::{DEFAULT_COMMENT_MARKER, DEFAULT_INCLUDE_MARKER};
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_DESCRIPTION: &str = "file";

#[derive(Deserialize, Debug)]
struct PresetsFile {
    #[serde(flatten)]
    presets: HashMap<String, PresetConfig>,
}

/// One named entry of presets.toml. Anything left out falls back to the
/// built-in default.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct PresetConfig {
    pub description: Option<String>,
    pub comment: Option<String>,
    pub include_marker: Option<String>,
    pub keep_blank_lines: Option<bool>,
    pub trim_whitespace: Option<bool>,
}

fn default_presets_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("fileparse").join("presets.toml"))
}

/// Loads the presets file. A missing file yields no presets.
pub fn load_presets_file(path: &Path) -> Result<HashMap<String, PresetConfig>> {
    if !path.exists() {
        return Ok(HashMap::new());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read presets at {:?}", path))?;

    parse_presets(&content).with_context(|| format!("Failed to parse {:?}", path))
}

fn parse_presets(content: &str) -> Result<HashMap<String, PresetConfig>> {
    let parsed: PresetsFile = toml::from_str(content)?;
    Ok(parsed.presets)
}

/// Reads the presets file named on the command line (or the default one)
/// and merges it with the command line.
pub fn resolve_config(cli: &Cli) -> Result<RuntimeConfig> {
    let path = match &cli.presets {
        Some(path) => path.clone(),
        None => default_presets_path()?,
    };
    let presets = load_presets_file(&path)?;
    merge_config(cli, &presets)
}

/// Command line beats preset, preset beats the built-in default.
pub fn merge_config(cli: &Cli, presets: &HashMap<String, PresetConfig>) -> Result<RuntimeConfig> {
    let preset = match cli.preset.as_deref() {
        Some(name) => match presets.get(name) {
            Some(preset) => preset.clone(),
            None => bail!("Unknown preset: {}", name),
        },
        None => PresetConfig::default(),
    };

    let config = RuntimeConfig {
        description: cli
            .description
            .clone()
            .or(preset.description)
            .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
        comment: cli
            .comment
            .clone()
            .or(preset.comment)
            .unwrap_or_else(|| DEFAULT_COMMENT_MARKER.to_string()),
        include_marker: cli
            .include_marker
            .clone()
            .or(preset.include_marker)
            .unwrap_or_else(|| DEFAULT_INCLUDE_MARKER.to_string()),
        keep_blank_lines: cli.keep_blank_lines || preset.keep_blank_lines.unwrap_or(false),
        trim_whitespace: !cli.no_trim && preset.trim_whitespace.unwrap_or(true),
        check_only: cli.check,
        show_stats: cli.stats,
    };

    Ok(config)
}
