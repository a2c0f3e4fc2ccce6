use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::document::ContentInput;

/// How stored entry content is handed to the editing surface.
#[derive(clap::ValueEnum, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Treat content as markup when it mentions a recognized tag.
    #[default]
    Auto,
    /// Always treat content as plain text.
    Plain,
    /// Always treat content as markup.
    Html,
}

impl InputMode {
    pub fn classify(self, content: &str) -> ContentInput {
        match self {
            Self::Auto => ContentInput::detect(content),
            Self::Plain => ContentInput::PlainText(content.to_string()),
            Self::Html => ContentInput::Html(content.to_string()),
        }
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Plain => "plain",
            Self::Html => "html",
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub hide_toolbar: bool,
    pub toolbar: bool,
    pub perf: bool,
    pub input_mode: Option<InputMode>,
    pub entry: Option<String>,
    pub log_file: Option<PathBuf>,
}

impl ConfigFlags {
    pub fn union(&self, other: &Self) -> Self {
        Self {
            hide_toolbar: self.hide_toolbar || other.hide_toolbar,
            toolbar: self.toolbar || other.toolbar,
            perf: self.perf || other.perf,
            input_mode: other.input_mode.or(self.input_mode),
            entry: other.entry.clone().or_else(|| self.entry.clone()),
            log_file: other.log_file.clone().or_else(|| self.log_file.clone()),
        }
    }

    /// `--toolbar` wins over a saved `--hide-toolbar`.
    pub const fn toolbar_visible(&self) -> bool {
        self.toolbar || !self.hide_toolbar
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("reverie").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("reverie")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("reverie").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(".config").join("reverie").join("config");
        }
    }

    PathBuf::from(".reverierc")
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".reverierc")
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = Vec::new();
    lines.push("# reverie defaults (saved with --save)".to_string());
    if flags.hide_toolbar {
        lines.push("--hide-toolbar".to_string());
    }
    if flags.toolbar {
        lines.push("--toolbar".to_string());
    }
    if let Some(mode) = flags.input_mode {
        lines.push(format!("--input-mode {}", mode.as_str()));
    }
    if let Some(entry) = &flags.entry {
        lines.push(format!("--entry {entry}"));
    }
    if flags.perf {
        lines.push("--perf".to_string());
    }
    if let Some(path) = &flags.log_file {
        lines.push(format!("--log-file {}", path.display()));
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        if token == "--hide-toolbar" {
            flags.hide_toolbar = true;
        } else if token == "--toolbar" {
            flags.toolbar = true;
        } else if token == "--perf" {
            flags.perf = true;
        } else if token == "--input-mode" {
            if let Some(next) = tokens.get(i + 1) {
                flags.input_mode = parse_input_mode(next);
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--input-mode=") {
            flags.input_mode = parse_input_mode(value);
        } else if token == "--entry" {
            if let Some(next) = tokens.get(i + 1) {
                flags.entry = Some(next.clone());
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--entry=") {
            flags.entry = Some(value.to_string());
        } else if token == "--log-file" {
            if let Some(next) = tokens.get(i + 1) {
                flags.log_file = Some(PathBuf::from(next));
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--log-file=") {
            flags.log_file = Some(PathBuf::from(value));
        }
        i += 1;
    }
    flags
}

fn parse_input_mode(s: &str) -> Option<InputMode> {
    match s {
        "auto" => Some(InputMode::Auto),
        "plain" => Some(InputMode::Plain),
        "html" => Some(InputMode::Html),
        _ => None,
    }
}
