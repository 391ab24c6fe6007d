//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.tea/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::content::providers::contentful::{
    DEFAULT_BASE_URL, DEFAULT_ENVIRONMENT, DEFAULT_LOCALE,
};
use crate::content::{ContentError, ContentProvider, ContentfulProvider, LocalProvider};
use crate::core::language::Language;
use crate::core::route::Route;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TeaConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub contentful: ContentfulConfig,
    #[serde(default)]
    pub local: LocalConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub default_course: Option<String>,
    pub locale: Option<String>,
    pub code_language: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ContentfulConfig {
    pub space_id: Option<String>,
    pub access_token: Option<String>,
    pub environment: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LocalConfig {
    pub content_file: Option<String>,
}

/// Values given on the command line. `None` = not specified.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub course: Option<String>,
    pub lesson: Option<String>,
    pub content_file: Option<PathBuf>,
    pub space_id: Option<String>,
}

// ============================================================================
// Resolved Config (concrete values)
// ============================================================================

/// Where course content comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentSource {
    Contentful {
        space_id: String,
        access_token: Option<String>,
        environment: String,
        base_url: String,
    },
    LocalFile(PathBuf),
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub source: ContentSource,
    pub locale: String,
    /// Language code snippets open on.
    pub code_language: Language,
    pub start_course: Option<String>,
    pub start_lesson: Option<String>,
}

impl ResolvedConfig {
    /// The first screen to show.
    pub fn start_route(&self) -> Route {
        match (&self.start_course, &self.start_lesson) {
            (Some(course), Some(lesson)) => Route::lesson(course, lesson),
            (Some(course), None) => Route::overview(course),
            (None, _) => Route::Courses,
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.tea/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".tea").join("config.toml"))
}

/// Load config from `~/.tea/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `TeaConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<TeaConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(TeaConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(TeaConfig::default());
    }

    load_config_from(&path)
}

/// Load and parse a config file at an explicit path.
pub fn load_config_from(path: &Path) -> Result<TeaConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: TeaConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# TEA Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# default_course = "hello-contentful"  # Open this course instead of the course list
# locale = "en-US"
# code_language = "python"             # Language code snippets open on (default java-android)

# [contentful]
# space_id = "your-space-id"           # Or set CONTENTFUL_SPACE_ID env var
# access_token = "..."                 # Or set CONTENTFUL_ACCESS_TOKEN env var
# environment = "master"
# base_url = "https://cdn.contentful.com"

# [local]
# content_file = "courses.json"        # Read courses from a JSON file instead
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &TeaConfig, cli: &CliOverrides) -> ResolvedConfig {
    // A source named on the command line wins outright. Otherwise a content
    // file from env or config selects the local source.
    let content_file = match (&cli.content_file, &cli.space_id) {
        (Some(path), _) => Some(path.clone()),
        (None, Some(_)) => None,
        (None, None) => std::env::var("TEA_CONTENT_FILE")
            .ok()
            .map(PathBuf::from)
            .or_else(|| config.local.content_file.as_ref().map(PathBuf::from)),
    };

    let source = match content_file {
        Some(path) => ContentSource::LocalFile(path),
        None => ContentSource::Contentful {
            // Space: CLI → env → config → empty (rejected at start-up)
            space_id: cli
                .space_id
                .clone()
                .or_else(|| std::env::var("CONTENTFUL_SPACE_ID").ok())
                .or_else(|| config.contentful.space_id.clone())
                .unwrap_or_default(),
            // Access token: env → config
            access_token: std::env::var("CONTENTFUL_ACCESS_TOKEN")
                .ok()
                .or_else(|| config.contentful.access_token.clone()),
            environment: std::env::var("CONTENTFUL_ENVIRONMENT")
                .ok()
                .or_else(|| config.contentful.environment.clone())
                .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string()),
            base_url: std::env::var("CONTENTFUL_BASE_URL")
                .ok()
                .or_else(|| config.contentful.base_url.clone())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        },
    };

    let locale = std::env::var("TEA_LOCALE")
        .ok()
        .or_else(|| config.general.locale.clone())
        .unwrap_or_else(|| DEFAULT_LOCALE.to_string());

    let code_language_name = std::env::var("TEA_CODE_LANGUAGE")
        .ok()
        .or_else(|| config.general.code_language.clone());
    let code_language = Language::from_name_or_default(code_language_name.as_deref());
    if let Some(name) = &code_language_name
        && Language::from_name(name).is_none()
    {
        warn!("Unknown code language {:?}, using {}", name, code_language.name());
    }

    let start_course = cli
        .course
        .clone()
        .or_else(|| std::env::var("TEA_DEFAULT_COURSE").ok())
        .or_else(|| config.general.default_course.clone());

    ResolvedConfig {
        source,
        locale,
        code_language,
        // A lesson without a course has nowhere to go
        start_lesson: start_course.as_ref().and(cli.lesson.clone()),
        start_course,
    }
}

// ============================================================================
// Provider Construction
// ============================================================================

/// Build the content provider the resolved config points at.
///
/// Fails fast on a missing space or access token, or an unreadable content file.
pub fn build_provider(config: &ResolvedConfig) -> Result<Arc<dyn ContentProvider>, ContentError> {
    match &config.source {
        ContentSource::LocalFile(path) => Ok(Arc::new(LocalProvider::load(path)?)),
        ContentSource::Contentful {
            space_id,
            access_token,
            environment,
            base_url,
        } => {
            if space_id.is_empty() {
                return Err(ContentError::Config(
                    "no Contentful space configured (set CONTENTFUL_SPACE_ID or use --content-file)"
                        .to_string(),
                ));
            }
            let token = access_token.clone().ok_or_else(|| {
                ContentError::Config("CONTENTFUL_ACCESS_TOKEN not set".to_string())
            })?;
            info!("Using Contentful space {} ({})", space_id, environment);
            Ok(Arc::new(
                ContentfulProvider::new(
                    space_id.clone(),
                    token,
                    Some(environment.clone()),
                    Some(base_url.clone()),
                )
                .with_locale(config.locale.clone()),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = TeaConfig::default();
        assert!(config.general.default_course.is_none());
        assert!(config.contentful.space_id.is_none());
        assert!(config.local.content_file.is_none());
    }

    #[test]
    fn test_resolve_cli_content_file_selects_local_source() {
        let config = TeaConfig {
            contentful: ContentfulConfig {
                space_id: Some("space".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let cli = CliOverrides {
            content_file: Some(PathBuf::from("courses.json")),
            ..Default::default()
        };
        let resolved = resolve(&config, &cli);
        assert_eq!(
            resolved.source,
            ContentSource::LocalFile(PathBuf::from("courses.json"))
        );
    }

    #[test]
    fn test_resolve_cli_space_overrides_config_content_file() {
        let config = TeaConfig {
            local: LocalConfig {
                content_file: Some("x.json".to_string()),
            },
            ..Default::default()
        };
        let cli = CliOverrides {
            space_id: Some("cli-space".to_string()),
            ..Default::default()
        };
        let resolved = resolve(&config, &cli);
        match resolved.source {
            ContentSource::Contentful { space_id, .. } => assert_eq!(space_id, "cli-space"),
            other => panic!("expected Contentful source, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_cli_content_file_beats_cli_space() {
        let cli = CliOverrides {
            content_file: Some(PathBuf::from("courses.json")),
            space_id: Some("cli-space".to_string()),
            ..Default::default()
        };
        let resolved = resolve(&TeaConfig::default(), &cli);
        assert_eq!(
            resolved.source,
            ContentSource::LocalFile(PathBuf::from("courses.json"))
        );
    }

    #[test]
    fn test_resolve_cli_course_and_lesson_pick_start_route() {
        let config = TeaConfig {
            general: GeneralConfig {
                default_course: Some("from-config".to_string()),
                ..Default::default()
            },
            local: LocalConfig {
                content_file: Some("x.json".to_string()),
            },
            ..Default::default()
        };
        let cli = CliOverrides {
            course: Some("from-cli".to_string()),
            lesson: Some("intro".to_string()),
            ..Default::default()
        };
        let resolved = resolve(&config, &cli);
        assert_eq!(resolved.start_route(), Route::lesson("from-cli", "intro"));
    }

    #[test]
    fn test_resolve_code_language_from_config() {
        let mut config = TeaConfig::default();
        config.general.code_language = Some("Python".to_string());
        let resolved = resolve(&config, &CliOverrides::default());
        assert_eq!(resolved.code_language, Language::Python);
    }

    #[test]
    fn test_resolve_unknown_code_language_falls_back() {
        let mut config = TeaConfig::default();
        config.general.code_language = Some("cobol".to_string());
        let resolved = resolve(&config, &CliOverrides::default());
        assert_eq!(resolved.code_language, Language::JavaAndroid);

        let resolved = resolve(&TeaConfig::default(), &CliOverrides::default());
        assert_eq!(resolved.code_language, Language::JavaAndroid);
    }

    #[test]
    fn test_lesson_without_course_is_ignored() {
        let config = TeaConfig {
            local: LocalConfig {
                content_file: Some("x.json".to_string()),
            },
            ..Default::default()
        };
        let cli = CliOverrides {
            lesson: Some("intro".to_string()),
            ..Default::default()
        };
        let resolved = resolve(&config, &cli);
        assert!(resolved.start_lesson.is_none());
    }

    #[test]
    fn test_start_route_variants() {
        let mut resolved = ResolvedConfig {
            source: ContentSource::LocalFile(PathBuf::from("x.json")),
            locale: DEFAULT_LOCALE.to_string(),
            code_language: Language::default(),
            start_course: None,
            start_lesson: None,
        };
        assert_eq!(resolved.start_route(), Route::Courses);
        resolved.start_course = Some("c".to_string());
        assert_eq!(resolved.start_route(), Route::overview("c"));
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
[general]
default_course = "hello-contentful"
locale = "de-DE"

[contentful]
space_id = "abc123"
access_token = "token"
environment = "staging"
"#;
        let config: TeaConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.general.default_course.as_deref(),
            Some("hello-contentful")
        );
        assert_eq!(config.general.locale.as_deref(), Some("de-DE"));
        assert_eq!(config.contentful.space_id.as_deref(), Some("abc123"));
        assert_eq!(config.contentful.environment.as_deref(), Some("staging"));
        assert!(config.contentful.base_url.is_none());
        assert!(config.local.content_file.is_none());
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing, everything else stays default
        let toml_str = r#"
[local]
content_file = "courses.json"
"#;
        let config: TeaConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.local.content_file.as_deref(), Some("courses.json"));
        assert!(config.general.default_course.is_none());
        assert!(config.contentful.access_token.is_none());
    }

    #[test]
    fn test_load_config_from_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[general\nbroken").unwrap();
        assert!(matches!(
            load_config_from(&path),
            Err(ConfigError::Parse(_))
        ));
    }

    fn contentful(space_id: &str, access_token: Option<&str>) -> ResolvedConfig {
        ResolvedConfig {
            source: ContentSource::Contentful {
                space_id: space_id.to_string(),
                access_token: access_token.map(String::from),
                environment: DEFAULT_ENVIRONMENT.to_string(),
                base_url: DEFAULT_BASE_URL.to_string(),
            },
            locale: DEFAULT_LOCALE.to_string(),
            code_language: Language::default(),
            start_course: None,
            start_lesson: None,
        }
    }

    #[test]
    fn test_build_provider_requires_access_token() {
        let result = build_provider(&contentful("space", None));
        assert!(matches!(result, Err(ContentError::Config(_))));
    }

    #[test]
    fn test_build_provider_requires_space() {
        let result = build_provider(&contentful("", Some("token")));
        assert!(matches!(result, Err(ContentError::Config(_))));
    }

    #[test]
    fn test_build_provider_contentful() {
        let provider = build_provider(&contentful("space", Some("token"))).unwrap();
        assert_eq!(provider.name(), "contentful");
    }

    #[test]
    fn test_build_provider_missing_file_is_config_error() {
        let resolved = ResolvedConfig {
            source: ContentSource::LocalFile(PathBuf::from("/nonexistent/courses.json")),
            locale: DEFAULT_LOCALE.to_string(),
            code_language: Language::default(),
            start_course: None,
            start_lesson: None,
        };
        assert!(matches!(
            build_provider(&resolved),
            Err(ContentError::Config(_))
        ));
    }

    #[test]
    fn test_generated_default_config_parses() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        generate_default_config(&path);
        let config = load_config_from(&path).unwrap();
        assert!(config.general.default_course.is_none());
    }
}
