use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::parser::{MAX_NESTING_DEPTH, MarkerKind};
use crate::style::{LinkCursor, TextStyle, Theme};

/// Parser and style settings, usually read from `runmark.toml`.
///
/// ```toml
/// theme = "dark"
/// max_nesting_depth = 2
///
/// [styles.code]
/// font_family = "Iosevka"
///
/// [link]
/// color = "#0066cc"
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub theme: Theme,
    /// Maximum number of formats open at once; deeper pairs render literally.
    pub max_nesting_depth: usize,
    /// Font size used when the base style does not set one.
    pub base_font_size: f32,
    /// Super/subscript size as a fraction of the surrounding size.
    pub script_scale: f32,
    /// Superscript raise, as a fraction of the surrounding size.
    pub superscript_shift: f32,
    /// Subscript drop, as a fraction of the surrounding size.
    pub subscript_shift: f32,
    pub link_cursor: LinkCursor,
    /// Parse cache entries; 0 disables caching.
    pub cache_capacity: usize,
    /// User style per marker kind, layered over the theme defaults.
    pub styles: BTreeMap<MarkerKind, TextStyle>,
    pub link: Option<TextStyle>,
    pub link_hover: Option<TextStyle>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            max_nesting_depth: MAX_NESTING_DEPTH,
            base_font_size: 14.0,
            script_scale: 0.7,
            superscript_shift: 0.35,
            subscript_shift: 0.2,
            link_cursor: LinkCursor::default(),
            cache_capacity: 64,
            styles: BTreeMap::new(),
            link: None,
            link_hover: None,
        }
    }
}

impl Config {
    fn validate(&self) -> Result<(), String> {
        if self.max_nesting_depth == 0 {
            return Err("max_nesting_depth must be at least 1".to_string());
        }
        if self.base_font_size.is_nan() || self.base_font_size <= 0.0 {
            return Err(format!(
                "base_font_size must be positive, got {}",
                self.base_font_size
            ));
        }
        if self.script_scale.is_nan() || self.script_scale <= 0.0 || self.script_scale > 1.0 {
            return Err(format!(
                "script_scale must be in (0, 1], got {}",
                self.script_scale
            ));
        }
        Ok(())
    }
}

#[derive(Default, Clone)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn theme(mut self, theme: Theme) -> Self {
        self.config.theme = theme;
        self
    }

    pub fn max_nesting_depth(mut self, depth: usize) -> Self {
        self.config.max_nesting_depth = depth;
        self
    }

    pub fn base_font_size(mut self, size: f32) -> Self {
        self.config.base_font_size = size;
        self
    }

    pub fn script_scale(mut self, scale: f32) -> Self {
        self.config.script_scale = scale;
        self
    }

    pub fn link_cursor(mut self, cursor: LinkCursor) -> Self {
        self.config.link_cursor = cursor;
        self
    }

    pub fn cache_capacity(mut self, capacity: usize) -> Self {
        self.config.cache_capacity = capacity;
        self
    }

    pub fn style(mut self, kind: MarkerKind, style: TextStyle) -> Self {
        self.config.styles.insert(kind, style);
        self
    }

    pub fn link(mut self, style: TextStyle) -> Self {
        self.config.link = Some(style);
        self
    }

    pub fn link_hover(mut self, style: TextStyle) -> Self {
        self.config.link_hover = Some(style);
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

const CANDIDATE_NAMES: &[&str] = &[".runmark.toml", "runmark.toml"];

fn parse_config_str(s: &str, path: &Path) -> io::Result<Config> {
    let invalid = |msg: String| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("invalid config {}: {msg}", path.display()),
        )
    };
    let config = toml::from_str::<Config>(s).map_err(|e| invalid(e.to_string()))?;
    config.validate().map_err(invalid)?;
    Ok(config)
}

fn read_config(path: &Path) -> io::Result<Config> {
    log::debug!("Reading config from: {}", path.display());
    let s = fs::read_to_string(path)?;
    let config = parse_config_str(&s, path)?;
    log::info!("Loaded config from: {}", path.display());
    Ok(config)
}

fn find_in_tree(start_dir: &Path) -> Option<PathBuf> {
    for dir in start_dir.ancestors() {
        for name in CANDIDATE_NAMES {
            let p = dir.join(name);
            if p.is_file() {
                return Some(p);
            }
        }
    }
    None
}

fn xdg_config_path() -> Option<PathBuf> {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        let p = Path::new(&xdg).join("runmark").join("config.toml");
        if p.is_file() {
            return Some(p);
        }
    }
    if let Ok(home) = env::var("HOME") {
        let p = Path::new(&home)
            .join(".config")
            .join("runmark")
            .join("config.toml");
        if p.is_file() {
            return Some(p);
        }
    }
    None
}

/// Load configuration with precedence:
/// 1) explicit path (error if unreadable/invalid)
/// 2) walk up from start_dir: .runmark.toml, runmark.toml
/// 3) XDG: $XDG_CONFIG_HOME/runmark/config.toml or ~/.config/runmark/config.toml
/// 4) default config
pub fn load(explicit: Option<&Path>, start_dir: &Path) -> io::Result<(Config, Option<PathBuf>)> {
    if let Some(path) = explicit {
        let cfg = read_config(path)?;
        return Ok((cfg, Some(path.to_path_buf())));
    }

    if let Some(p) = find_in_tree(start_dir) {
        match read_config(&p) {
            Ok(cfg) => return Ok((cfg, Some(p))),
            Err(e) => log::warn!("Ignoring {}: {e}", p.display()),
        }
    }

    if let Some(p) = xdg_config_path() {
        match read_config(&p) {
            Ok(cfg) => return Ok((cfg, Some(p))),
            Err(e) => log::warn!("Ignoring {}: {e}", p.display()),
        }
    }

    log::debug!("No config file found, using defaults");
    Ok((Config::default(), None))
}
