//! TOML configuration for clockfloat.
//!
//! Reads `AppConfig` from the platform-appropriate config file:
//! - Windows:  `%APPDATA%\ClockFloat\config.toml`
//! - Linux:    `~/.config/clockfloat/config.toml`
//! - macOS:    `~/Library/Application Support/ClockFloat/config.toml`
//!
//! The file is read once at startup and never written back.  Every section and
//! every field is optional:
//!
//! ```toml
//! [general]
//! log_level = "info"
//! dodge_pointer = true
//! initial_corner = "bottom-right"
//!
//! [font]
//! family = "Menlo"
//!
//! [time]
//! size = { points = 22.0 }
//! format = "%H:%M"
//! refresh_secs = 1
//!
//! [date]
//! size = { screen_fraction = 0.015 }
//!
//! [[displays]]
//! id = 0
//! width = 2560.0
//! height = 1440.0
//! ```
//!
//! The two label sections have different defaults, so their fields are
//! optional in the schema and resolved against [`LabelStyles::default`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use clockfloat_core::{Display, MarginRatio, Orientation, Padding, PlacementParams, Rect};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::display_set::OverlaySettings;
use crate::application::host::Appearance;
use crate::application::labels::{is_valid_format, FontSize, LabelStyle, LabelStyles};

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The TOML parsed but a value is out of range.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Longest accepted label refresh interval.
pub const MAX_REFRESH: Duration = Duration::from_secs(24 * 60 * 60);

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level configuration file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub font: FontConfig,
    #[serde(default)]
    pub time: LabelConfig,
    #[serde(default)]
    pub date: LabelConfig,
    #[serde(default)]
    pub placement: PlacementConfig,
    #[serde(default)]
    pub appearance: Appearance,
    /// Static display list for hosts without display enumeration.
    #[serde(default = "default_displays")]
    pub displays: Vec<DisplayConfig>,
}

/// General behaviour.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralConfig {
    /// `tracing` log level: `"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Whether labels hop to the next corner when the pointer enters them.
    #[serde(default = "default_true")]
    pub dodge_pointer: bool,
    /// Corner every pair starts in, e.g. `"top-left"`.
    #[serde(default)]
    pub initial_corner: Orientation,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FontConfig {
    #[serde(default = "default_font_family")]
    pub family: String,
}

/// Overrides for one label; unset fields keep that label's default.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LabelConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<FontSize>,
    /// chrono `strftime` pattern.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_secs: Option<u64>,
}

/// Window padding and content-to-window margin ratios.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlacementConfig {
    #[serde(default = "default_padding")]
    pub padding_x: f64,
    #[serde(default = "default_padding")]
    pub padding_y: f64,
    #[serde(default = "default_width_margin_ratio")]
    pub width_margin_ratio: f64,
    #[serde(default = "default_height_margin_ratio")]
    pub height_margin_ratio: f64,
}

/// One statically configured display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisplayConfig {
    pub id: u32,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_log_level() -> String {
    "info".to_string()
}
fn default_true() -> bool {
    true
}
fn default_font_family() -> String {
    LabelStyles::default().font_family
}
fn default_padding() -> f64 {
    Padding::default().horizontal
}
fn default_width_margin_ratio() -> f64 {
    MarginRatio::default().horizontal
}
fn default_height_margin_ratio() -> f64 {
    MarginRatio::default().vertical
}
fn default_displays() -> Vec<DisplayConfig> {
    vec![DisplayConfig {
        id: 0,
        x: 0.0,
        y: 0.0,
        width: 1920.0,
        height: 1080.0,
    }]
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            font: FontConfig::default(),
            time: LabelConfig::default(),
            date: LabelConfig::default(),
            placement: PlacementConfig::default(),
            appearance: Appearance::default(),
            displays: default_displays(),
        }
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            dodge_pointer: default_true(),
            initial_corner: Orientation::default(),
        }
    }
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            family: default_font_family(),
        }
    }
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            padding_x: default_padding(),
            padding_y: default_padding(),
            width_margin_ratio: default_width_margin_ratio(),
            height_margin_ratio: default_height_margin_ratio(),
        }
    }
}

impl LabelConfig {
    fn resolve(&self, default: &LabelStyle) -> LabelStyle {
        LabelStyle {
            kind: default.kind,
            size: self.size.unwrap_or(default.size),
            format: self.format.clone().unwrap_or_else(|| default.format.clone()),
            refresh: self
                .refresh_secs
                .map(Duration::from_secs)
                .unwrap_or(default.refresh),
        }
    }
}

impl PlacementConfig {
    pub fn params(&self) -> PlacementParams {
        PlacementParams {
            padding: Padding {
                horizontal: self.padding_x,
                vertical: self.padding_y,
            },
            margin: MarginRatio {
                horizontal: self.width_margin_ratio,
                vertical: self.height_margin_ratio,
            },
        }
    }
}

impl AppConfig {
    /// Fully resolved label styles.
    pub fn label_styles(&self) -> LabelStyles {
        let defaults = LabelStyles::default();
        LabelStyles {
            font_family: self.font.family.clone(),
            time: self.time.resolve(&defaults.time),
            date: self.date.resolve(&defaults.date),
        }
    }

    /// The settings the display set is built from.
    pub fn overlay_settings(&self) -> OverlaySettings {
        OverlaySettings {
            labels: self.label_styles(),
            placement: self.placement.params(),
            initial_corner: self.general.initial_corner,
            dodge_pointer: self.general.dodge_pointer,
            appearance: self.appearance,
        }
    }

    /// The configured static display list.
    pub fn displays(&self) -> Vec<Display> {
        self.displays
            .iter()
            .map(|d| Display::new(d.id, Rect::new(d.x, d.y, d.width, d.height)))
            .collect()
    }

    /// Checks value ranges that the schema cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let styles = self.label_styles();
        for style in [&styles.time, &styles.date] {
            let section = style.kind;
            if !is_valid_format(&style.format) {
                return Err(invalid(format!("[{section}] format {:?} is not a valid strftime pattern", style.format)));
            }
            if !style.size.is_positive() {
                return Err(invalid(format!("[{section}] size must be positive")));
            }
            if style.refresh.is_zero() || style.refresh > MAX_REFRESH {
                return Err(invalid(format!(
                    "[{section}] refresh_secs must be within 1..={}",
                    MAX_REFRESH.as_secs()
                )));
            }
        }

        let p = &self.placement;
        if !(non_negative(p.padding_x) && non_negative(p.padding_y)) {
            return Err(invalid("[placement] padding must be finite and not negative".into()));
        }
        if !(positive(p.width_margin_ratio) && positive(p.height_margin_ratio)) {
            return Err(invalid("[placement] margin ratios must be finite and positive".into()));
        }

        let a = &self.appearance;
        if !(0.0..=1.0).contains(&a.background_alpha) || !(0.0..=1.0).contains(&a.text_alpha) {
            return Err(invalid("[appearance] alpha values must be within 0.0..=1.0".into()));
        }

        let bad_display = |d: &&DisplayConfig| {
            !(d.x.is_finite() && d.y.is_finite() && positive(d.width) && positive(d.height))
        };
        if let Some(d) = self.displays.iter().find(bad_display) {
            return Err(invalid(format!(
                "[[displays]] id {} must have a finite origin and positive size",
                d.id
            )));
        }

        Ok(())
    }
}

fn invalid(message: String) -> ConfigError {
    ConfigError::Invalid(message)
}

fn positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

fn non_negative(v: f64) -> bool {
    v.is_finite() && v >= 0.0
}

// ── Config loading ────────────────────────────────────────────────────────────

/// Determines the platform-appropriate directory for the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] when the platform config base
/// directory cannot be determined from the environment.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    platform_config_dir().ok_or(ConfigError::NoPlatformConfigDir)
}

/// Resolves the full path to the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] if the base directory cannot be
/// determined.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join("config.toml"))
}

/// Loads `AppConfig` from the platform config file.
///
/// # Errors
///
/// See [`load_config_from`].
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from(&config_file_path()?)
}

/// Loads and validates `AppConfig` from `path`, returning
/// `AppConfig::default()` if the file does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// [`ConfigError::Parse`] if the TOML is malformed, and
/// [`ConfigError::Invalid`] if a value is out of range.
pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    let cfg = match std::fs::read_to_string(path) {
        Ok(content) => toml::from_str::<AppConfig>(&content)?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => AppConfig::default(),
        Err(e) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })
        }
    };
    cfg.validate()?;
    Ok(cfg)
}

/// Resolves the platform config base directory including the app subdirectory.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("ClockFloat"))
    }

    #[cfg(target_os = "linux")]
    {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("clockfloat"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("ClockFloat")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clockfloat_core::{DisplayId, LabelKind};
    use uuid::Uuid;

    fn parse(toml_str: &str) -> AppConfig {
        toml::from_str(toml_str).expect("deserialize")
    }

    // ── defaults ──────────────────────────────────────────────────────────────

    #[test]
    fn test_app_config_default_matches_shipped_label_styles() {
        // Arrange / Act
        let settings = AppConfig::default().overlay_settings();

        // Assert
        assert_eq!(settings, OverlaySettings::default());
    }

    #[test]
    fn test_app_config_default_has_single_1080p_display() {
        let displays = AppConfig::default().displays();
        assert_eq!(displays, vec![Display::new(0, Rect::new(0.0, 0.0, 1920.0, 1080.0))]);
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let cfg = parse("");
        assert_eq!(cfg, AppConfig::default());
        assert!(cfg.validate().is_ok());
    }

    // ── overrides ─────────────────────────────────────────────────────────────

    #[test]
    fn test_partial_label_section_keeps_other_label_defaults() {
        // Arrange
        let toml_str = r#"
[time]
format = "%H:%M:%S"

[date]
size = { screen_fraction = 0.02 }
"#;

        // Act
        let styles = parse(toml_str).label_styles();

        // Assert
        assert_eq!(styles.time.format, "%H:%M:%S");
        assert_eq!(styles.time.size, FontSize::Points(22.0));
        assert_eq!(styles.date.size, FontSize::ScreenFraction(0.02));
        assert_eq!(styles.date.format, "%Y-%m-%d");
        assert_eq!(styles.date.refresh, Duration::from_secs(10));
    }

    #[test]
    fn test_general_section_sets_corner_and_dodge() {
        let toml_str = r#"
[general]
dodge_pointer = false
initial_corner = "top-left"
"#;

        let settings = parse(toml_str).overlay_settings();

        assert!(!settings.dodge_pointer);
        assert_eq!(settings.initial_corner, Orientation::TopLeft);
    }

    #[test]
    fn test_placement_section_maps_to_params() {
        let toml_str = r#"
[placement]
padding_x = 4.0
height_margin_ratio = 2.0
"#;

        let params = parse(toml_str).placement.params();

        assert_eq!(params.padding, Padding { horizontal: 4.0, vertical: 10.0 });
        assert_eq!(params.margin, MarginRatio { horizontal: 1.1, vertical: 2.0 });
    }

    #[test]
    fn test_displays_array_replaces_default_display() {
        let toml_str = r#"
[[displays]]
id = 4
x = -1280.0
width = 1280.0
height = 1024.0

[[displays]]
id = 5
width = 2560.0
height = 1440.0
"#;

        let displays = parse(toml_str).displays();

        assert_eq!(displays.len(), 2);
        assert_eq!(displays[0].id, DisplayId(4));
        assert_eq!(displays[0].usable.min_x(), -1280.0);
        assert_eq!(displays[1].usable, Rect::new(0.0, 0.0, 2560.0, 1440.0));
    }

    // ── validation ────────────────────────────────────────────────────────────

    #[test]
    fn test_validate_rejects_bad_strftime_pattern() {
        let cfg = parse("[date]\nformat = \"%Q\"\n");
        let err = cfg.validate().expect_err("invalid format");
        assert!(err.to_string().contains("[date]"), "got: {err}");
    }

    #[test]
    fn test_validate_rejects_timezone_specifier() {
        let cfg = parse("[time]\nformat = \"%H:%M %Z\"\n");
        let err = cfg.validate().expect_err("zone name cannot render");
        assert!(err.to_string().contains("[time]"), "got: {err}");
    }

    #[test]
    fn test_validate_rejects_zero_refresh() {
        let cfg = parse("[time]\nrefresh_secs = 0\n");
        assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_validate_refresh_upper_bound() {
        let day = parse("[date]\nrefresh_secs = 86400\n");
        let huge = parse("[date]\nrefresh_secs = 9223372036854775807\n");

        assert!(day.validate().is_ok());
        assert!(matches!(huge.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_validate_rejects_nan_and_infinite_geometry() {
        let cases = [
            "[placement]\npadding_x = nan\n",
            "[placement]\npadding_y = inf\n",
            "[placement]\nwidth_margin_ratio = nan\n",
            "[placement]\nheight_margin_ratio = inf\n",
            "[time]\nsize = { points = nan }\n",
            "[appearance]\ntext_alpha = nan\n",
            "[[displays]]\nid = 0\nwidth = nan\nheight = 1080.0\n",
            "[[displays]]\nid = 0\nx = inf\nwidth = 1920.0\nheight = 1080.0\n",
        ];
        for toml_str in cases {
            let result = parse(toml_str).validate();
            assert!(matches!(result, Err(ConfigError::Invalid(_))), "accepted: {toml_str}");
        }
    }

    #[test]
    fn test_validate_rejects_non_positive_font_size() {
        let cfg = parse("[time]\nsize = { points = 0.0 }\n");
        assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_validate_rejects_alpha_out_of_range() {
        let cfg = parse("[appearance]\nbackground_alpha = 1.5\n");
        assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_unknown_corner_is_a_parse_error() {
        let result: Result<AppConfig, toml::de::Error> =
            toml::from_str("[general]\ninitial_corner = \"middle\"\n");
        assert!(result.is_err());
    }

    // ── load_config_from ──────────────────────────────────────────────────────

    #[test]
    fn test_load_config_from_missing_file_returns_defaults() {
        let path = std::env::temp_dir().join(format!("clockfloat-missing-{}.toml", Uuid::new_v4()));

        let cfg = load_config_from(&path).expect("defaults");

        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn test_load_config_from_reads_and_validates_file() {
        // Arrange
        let path = std::env::temp_dir().join(format!("clockfloat-{}.toml", Uuid::new_v4()));
        std::fs::write(&path, "[font]\nfamily = \"Menlo\"\n[time]\nrefresh_secs = 5\n").expect("write");

        // Act
        let result = load_config_from(&path);
        let _ = std::fs::remove_file(&path);

        // Assert
        let cfg = result.expect("load");
        let styles = cfg.label_styles();
        assert_eq!(styles.font_family, "Menlo");
        assert_eq!(styles.get(LabelKind::Time).refresh, Duration::from_secs(5));
    }

    #[test]
    fn test_load_config_from_malformed_file_returns_parse_error() {
        let path = std::env::temp_dir().join(format!("clockfloat-bad-{}.toml", Uuid::new_v4()));
        std::fs::write(&path, "[[[ not valid toml").expect("write");

        let result = load_config_from(&path);
        let _ = std::fs::remove_file(&path);

        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
