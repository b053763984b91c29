//! Configuration management for docqa.
//!
//! This module handles loading and merging configuration from multiple sources:
//! - Config files (.docqa/config.yaml)
//! - Environment variables
//! - Command-line flags
//!
//! Later sources win. The configuration is workspace-centric: the documents
//! folder and the config file are resolved relative to the workspace.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// Default chunk size, in characters, for splitting the corpus.
pub const DEFAULT_CHUNK_SIZE: usize = 4000;

/// Default extractive question-answering model for HTTP engines.
pub const DEFAULT_QA_MODEL: &str = "bert-large-uncased-whole-word-masking-finetuned-squad";

/// Default documents folder, relative to the workspace.
pub const DEFAULT_DOCS_DIR: &str = "docs";

/// Providers the engine factory knows how to build (`hf` is short for `huggingface`).
pub const KNOWN_PROVIDERS: [&str; 4] = ["lexical", "huggingface", "hf", "http"];

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the workspace root (contains .docqa/ and the docs folder)
    pub workspace: PathBuf,

    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// Documents folder; relative paths are resolved against the workspace
    pub docs_dir: PathBuf,

    /// Chunk size in characters for the best-answer selector
    pub chunk_size: usize,

    /// Answer engine provider ("lexical", "huggingface", "http")
    pub provider: String,

    /// Model identifier for HTTP engines
    pub model: String,

    /// Endpoint override for HTTP engines
    pub endpoint: Option<String>,

    /// API key for the engine provider
    pub api_key: Option<String>,

    /// Per-request timeout for HTTP engines, in seconds
    pub timeout_secs: Option<u64>,

    /// Treat engine failures on one chunk or sub-question as "no candidate"
    /// instead of aborting the whole query
    pub isolate_failures: bool,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,

    /// Engine provider configurations from config.yaml
    pub engine: Option<EngineConfig>,
}

/// Engine configuration from config.yaml.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(rename = "activeProvider")]
    pub active_provider: String,

    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
}

/// Provider-specific configuration.
///
/// Variants are told apart by their keys; a block mixing keys of both (or
/// containing a misspelled key) fails to parse.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProviderConfig {
    Lexical(LexicalProviderConfig),
    Http(HttpProviderConfig),
}

/// Settings for the local lexical engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LexicalProviderConfig {
    #[serde(rename = "maxAnswerChars")]
    pub max_answer_chars: Option<usize>,
}

/// Settings for HTTP engines. Every key is optional: the Hugging Face
/// engine has a default endpoint and the model falls back to
/// [`DEFAULT_QA_MODEL`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HttpProviderConfig {
    pub endpoint: Option<String>,
    pub model: Option<String>,
    #[serde(rename = "apiKeyEnv")]
    pub api_key_env: Option<String>,
    pub timeout: Option<u64>,
}

/// Full configuration file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigFile {
    engine: Option<EngineConfig>,
    corpus: Option<CorpusConfig>,
    answering: Option<AnsweringConfig>,
    logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CorpusConfig {
    path: Option<String>,
    #[serde(rename = "chunkSize")]
    chunk_size: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct AnsweringConfig {
    #[serde(rename = "isolateFailures")]
    isolate_failures: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingConfig {
    level: Option<String>,
    color: Option<bool>,
}

/// Command-line overrides applied on top of the loaded configuration.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub docs_dir: Option<PathBuf>,
    pub provider: Option<String>,
    pub model: Option<String>,
    pub chunk_size: Option<usize>,
    pub log_level: Option<String>,
    pub verbose: bool,
    pub no_color: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workspace: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            config_file: None,
            docs_dir: PathBuf::from(DEFAULT_DOCS_DIR),
            chunk_size: DEFAULT_CHUNK_SIZE,
            provider: "lexical".to_string(), // Local-first default
            model: DEFAULT_QA_MODEL.to_string(),
            endpoint: None,
            api_key: None,
            timeout_secs: None,
            isolate_failures: false,
            log_level: None,
            verbose: false,
            no_color: false,
            engine: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from the config file, environment variables and defaults.
    ///
    /// Environment variables:
    /// - `DOCQA_WORKSPACE`: Override workspace path
    /// - `DOCQA_CONFIG`: Path to config file
    /// - `DOCQA_DOCS`: Documents folder
    /// - `DOCQA_PROVIDER`: Answer engine provider
    /// - `DOCQA_MODEL`: Model identifier
    /// - `DOCQA_API_KEY`: API key
    /// - `DOCQA_CHUNK_SIZE`: Chunk size in characters
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    ///
    /// # Example
    /// ```no_run
    /// use docqa_core::config::AppConfig;
    ///
    /// let config = AppConfig::load().expect("Failed to load config");
    /// println!("Documents: {:?}", config.docs_path());
    /// ```
    pub fn load() -> AppResult<Self> {
        Self::load_from(None, None)
    }

    /// Load configuration, with an explicit workspace and config file taking
    /// precedence over `DOCQA_WORKSPACE` and `DOCQA_CONFIG`.
    ///
    /// The config file is located before the remaining environment variables
    /// are applied, so CLI-supplied locations must be known at this point.
    pub fn load_from(workspace: Option<PathBuf>, config_file: Option<PathBuf>) -> AppResult<Self> {
        let mut config = Self::default();

        let workspace =
            workspace.or_else(|| std::env::var_os("DOCQA_WORKSPACE").map(PathBuf::from));
        if let Some(workspace) = workspace {
            config.workspace = workspace;
        }

        config.config_file =
            config_file.or_else(|| std::env::var_os("DOCQA_CONFIG").map(PathBuf::from));

        if !config.workspace.exists() {
            return Err(AppError::Config(format!(
                "Workspace directory does not exist: {:?}",
                config.workspace
            )));
        }

        let config_path = config
            .config_file
            .clone()
            .unwrap_or_else(|| config.docqa_dir().join("config.yaml"));

        if config_path.exists() {
            config = config.merge_yaml(&config_path)?;
        }

        // Environment variables override YAML config
        if let Ok(docs) = std::env::var("DOCQA_DOCS") {
            config.docs_dir = PathBuf::from(docs);
        }

        if let Ok(provider) = std::env::var("DOCQA_PROVIDER") {
            config.provider = provider;
        }

        if let Ok(model) = std::env::var("DOCQA_MODEL") {
            config.model = model;
        }

        if let Ok(chunk_size) = std::env::var("DOCQA_CHUNK_SIZE") {
            config.chunk_size = chunk_size.parse().map_err(|e| {
                AppError::Config(format!("Invalid DOCQA_CHUNK_SIZE '{}': {}", chunk_size, e))
            })?;
        }

        if let Ok(key) = std::env::var("DOCQA_API_KEY") {
            config.api_key = Some(key);
        }

        if let Ok(level) = std::env::var("RUST_LOG") {
            config.log_level = Some(level);
        }

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge a YAML configuration file into this config.
    fn merge_yaml(&self, path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        let mut result = self.clone();

        if let Some(corpus) = config_file.corpus {
            if let Some(path) = corpus.path {
                result.docs_dir = PathBuf::from(path);
            }
            if let Some(chunk_size) = corpus.chunk_size {
                result.chunk_size = chunk_size;
            }
        }

        if let Some(answering) = config_file.answering {
            if let Some(isolate) = answering.isolate_failures {
                result.isolate_failures = isolate;
            }
        }

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
        }

        if let Some(engine) = config_file.engine {
            result.provider = engine.active_provider.clone();

            if let Some(ProviderConfig::Http(http)) = engine.providers.get(&engine.active_provider) {
                if let Some(model) = &http.model {
                    result.model = model.clone();
                }
                if let Some(endpoint) = &http.endpoint {
                    result.endpoint = Some(endpoint.clone());
                }
                if let Some(timeout) = http.timeout {
                    result.timeout_secs = Some(timeout);
                }
            }

            result.engine = Some(engine);
        }

        Ok(result)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// CLI flags take precedence over environment variables and the config file.
    /// Workspace and config file locations go through [`AppConfig::load_from`].
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(docs_dir) = overrides.docs_dir {
            self.docs_dir = docs_dir;
        }

        if let Some(provider) = overrides.provider {
            self.provider = provider;
        }

        if let Some(model) = overrides.model {
            self.model = model;
        }

        if let Some(chunk_size) = overrides.chunk_size {
            self.chunk_size = chunk_size;
        }

        if let Some(log_level) = overrides.log_level {
            self.log_level = Some(log_level);
        }

        if overrides.verbose {
            self.verbose = true;
            // Verbose mode implies debug logging
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if overrides.no_color {
            self.no_color = true;
        }

        self
    }

    /// Get the path to the .docqa directory.
    pub fn docqa_dir(&self) -> PathBuf {
        self.workspace.join(".docqa")
    }

    /// Resolve the documents folder against the workspace.
    pub fn docs_path(&self) -> PathBuf {
        self.workspace.join(&self.docs_dir)
    }

    /// The configured chunk size as a non-zero value.
    pub fn chunk_size(&self) -> AppResult<NonZeroUsize> {
        NonZeroUsize::new(self.chunk_size).ok_or_else(|| {
            AppError::Config("Chunk size must be a positive integer".to_string())
        })
    }

    /// Get a provider configuration by name.
    pub fn get_provider_config(&self, provider: &str) -> Option<&ProviderConfig> {
        self.engine
            .as_ref()
            .and_then(|engine| engine.providers.get(provider))
    }

    /// Resolve the API key: explicit key first, then the provider's `apiKeyEnv`.
    pub fn resolve_api_key(&self) -> Option<String> {
        if let Some(ref key) = self.api_key {
            return Some(key.clone());
        }

        match self.get_provider_config(&self.provider) {
            Some(ProviderConfig::Http(HttpProviderConfig {
                api_key_env: Some(env_var),
                ..
            })) => std::env::var(env_var).ok(),
            _ => None,
        }
    }

    /// Maximum answer length for the lexical engine, if configured.
    pub fn lexical_max_answer_chars(&self) -> Option<usize> {
        match self.get_provider_config(&self.provider) {
            Some(ProviderConfig::Lexical(lexical)) => lexical.max_answer_chars,
            _ => None,
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> AppResult<()> {
        let provider = self.provider.to_lowercase();
        if !KNOWN_PROVIDERS.contains(&provider.as_str()) {
            return Err(AppError::Config(format!(
                "Unknown provider: {}. Supported: {}",
                self.provider,
                KNOWN_PROVIDERS.join(", ")
            )));
        }

        self.chunk_size()?;

        if self.model.trim().is_empty() {
            return Err(AppError::Config("Model identifier is empty".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.provider, "lexical");
        assert_eq!(config.model, DEFAULT_QA_MODEL);
        assert_eq!(config.chunk_size, 4000);
        assert_eq!(config.docs_dir, PathBuf::from("docs"));
        assert!(!config.isolate_failures);
        assert!(!config.verbose);
    }

    #[test]
    fn test_docs_path_relative_and_absolute() {
        let mut config = AppConfig::default();
        config.workspace = PathBuf::from("/srv/project");
        assert_eq!(config.docs_path(), PathBuf::from("/srv/project/docs"));

        config.docs_dir = PathBuf::from("/data/pdfs");
        assert_eq!(config.docs_path(), PathBuf::from("/data/pdfs"));
    }

    #[test]
    fn test_with_overrides() {
        let config = AppConfig::default();
        let overridden = config.with_overrides(ConfigOverrides {
            provider: Some("huggingface".to_string()),
            model: Some("deepset/roberta-base-squad2".to_string()),
            chunk_size: Some(512),
            verbose: true,
            ..Default::default()
        });

        assert_eq!(overridden.provider, "huggingface");
        assert_eq!(overridden.model, "deepset/roberta-base-squad2");
        assert_eq!(overridden.chunk_size, 512);
        assert!(overridden.verbose);
        assert_eq!(overridden.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_validate_unknown_provider() {
        let mut config = AppConfig::default();
        config.provider = "unknown".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_chunk_size() {
        let mut config = AppConfig::default();
        config.chunk_size = 0;
        assert!(config.chunk_size().is_err());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_defaults() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_merge_yaml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yaml");
        std::fs::write(
            &path,
            r#"
engine:
  activeProvider: huggingface
  providers:
    huggingface:
      endpoint: http://localhost:8080
      model: deepset/roberta-base-squad2
      apiKeyEnv: DOCQA_TEST_UNSET_KEY
      timeout: 30
    lexical:
      maxAnswerChars: 200
corpus:
  path: pdfs
  chunkSize: 1000
answering:
  isolateFailures: true
logging:
  level: debug
  color: false
"#,
        )
        .unwrap();

        let config = AppConfig::default().merge_yaml(&path).unwrap();
        assert_eq!(config.provider, "huggingface");
        assert_eq!(config.model, "deepset/roberta-base-squad2");
        assert_eq!(config.endpoint.as_deref(), Some("http://localhost:8080"));
        assert_eq!(config.timeout_secs, Some(30));
        assert_eq!(config.docs_dir, PathBuf::from("pdfs"));
        assert_eq!(config.chunk_size, 1000);
        assert!(config.isolate_failures);
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert!(config.no_color);
        assert!(matches!(
            config.get_provider_config("lexical"),
            Some(ProviderConfig::Lexical(LexicalProviderConfig {
                max_answer_chars: Some(200)
            }))
        ));
    }

    #[test]
    fn test_merge_yaml_huggingface_without_endpoint() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yaml");
        std::fs::write(
            &path,
            r#"
engine:
  activeProvider: huggingface
  providers:
    huggingface:
      model: deepset/roberta-base-squad2
      apiKeyEnv: DOCQA_TEST_HF_TOKEN
"#,
        )
        .unwrap();
        std::env::set_var("DOCQA_TEST_HF_TOKEN", "hf-secret");

        let config = AppConfig::default().merge_yaml(&path).unwrap();
        assert_eq!(config.model, "deepset/roberta-base-squad2");
        assert_eq!(config.endpoint, None);
        assert_eq!(config.timeout_secs, None);
        assert!(matches!(
            config.get_provider_config("huggingface"),
            Some(ProviderConfig::Http(_))
        ));
        assert_eq!(config.resolve_api_key().as_deref(), Some("hf-secret"));
    }

    #[test]
    fn test_merge_yaml_misspelled_provider_key() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yaml");
        std::fs::write(
            &path,
            "engine:\n  activeProvider: lexical\n  providers:\n    lexical:\n      maxAnswerChar: 50\n",
        )
        .unwrap();

        let result = AppConfig::default().merge_yaml(&path);
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_validate_accepts_hf_alias() {
        let mut config = AppConfig::default();
        for provider in ["hf", "HF", "huggingface", "http", "lexical"] {
            config.provider = provider.to_string();
            assert!(config.validate().is_ok(), "{} should be accepted", provider);
        }
    }

    #[test]
    fn test_load_from_workspace_reads_config_file() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join(".docqa")).unwrap();
        std::fs::write(
            temp.path().join(".docqa").join("config.yaml"),
            "answering:\n  isolateFailures: true\n",
        )
        .unwrap();

        let config = AppConfig::load_from(Some(temp.path().to_path_buf()), None).unwrap();
        assert_eq!(config.workspace, temp.path());
        assert!(config.isolate_failures);
    }

    #[test]
    fn test_load_from_missing_workspace() {
        let temp = TempDir::new().unwrap();
        let result = AppConfig::load_from(Some(temp.path().join("missing")), None);
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_merge_yaml_invalid() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yaml");
        std::fs::write(&path, "corpus: [unclosed").unwrap();

        let result = AppConfig::default().merge_yaml(&path);
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_lexical_max_answer_chars() {
        let mut providers = HashMap::new();
        providers.insert(
            "lexical".to_string(),
            ProviderConfig::Lexical(LexicalProviderConfig {
                max_answer_chars: Some(120),
            }),
        );
        let mut config = AppConfig::default();
        config.engine = Some(EngineConfig {
            active_provider: "lexical".to_string(),
            providers,
        });

        assert_eq!(config.lexical_max_answer_chars(), Some(120));
        assert_eq!(config.resolve_api_key(), None);
    }

    #[test]
    fn test_explicit_api_key_wins() {
        let mut config = AppConfig::default();
        config.api_key = Some("secret".to_string());
        assert_eq!(config.resolve_api_key().as_deref(), Some("secret"));
    }
}
