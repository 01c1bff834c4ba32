//! Application configuration and transcriber factory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use answerlens_core::{EngineConfig, Transcriber};

use crate::deepgram::DeepgramTranscriber;
use crate::mock::MockTranscriber;
use crate::openai::OpenAiTranscriber;

/// Configuration for the speech-to-text backend.
///
/// Note: Custom Debug impl masks API keys to prevent accidental exposure in logs.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TranscriberConfig {
    OpenAI {
        api_key: String,
        #[serde(default)]
        base_url: Option<String>,
        #[serde(default)]
        model: Option<String>,
        #[serde(default)]
        language: Option<String>,
    },
    Deepgram {
        api_key: String,
        #[serde(default)]
        base_url: Option<String>,
        #[serde(default)]
        model: Option<String>,
        #[serde(default)]
        language: Option<String>,
    },
    /// Canned transcript, for offline runs and tests.
    Mock { transcript: String },
}

impl std::fmt::Debug for TranscriberConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TranscriberConfig::OpenAI {
                api_key: _,
                base_url,
                model,
                language,
            } => f
                .debug_struct("OpenAI")
                .field("api_key", &"***")
                .field("base_url", base_url)
                .field("model", model)
                .field("language", language)
                .finish(),
            TranscriberConfig::Deepgram {
                api_key: _,
                base_url,
                model,
                language,
            } => f
                .debug_struct("Deepgram")
                .field("api_key", &"***")
                .field("base_url", base_url)
                .field("model", model)
                .field("language", language)
                .finish(),
            TranscriberConfig::Mock { transcript } => f
                .debug_struct("Mock")
                .field("transcript", transcript)
                .finish(),
        }
    }
}

/// Top-level answerlens configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnswerlensConfig {
    /// Backend used for `--audio` input.
    #[serde(default)]
    pub transcription: Option<TranscriberConfig>,
    /// Question bank used when none is given on the command line.
    #[serde(default)]
    pub default_question_bank: Option<PathBuf>,
    /// Overrides for the engine's vocabulary, patterns and heuristics.
    #[serde(default)]
    pub engine: EngineConfig,
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(len) = rest[start + 2..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + 2 + len];
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        // Substituted values are not rescanned.
        rest = &rest[start + 2 + len + 1..];
    }
    result.push_str(rest);
    result
}

fn resolve_transcriber_config(config: &TranscriberConfig) -> TranscriberConfig {
    let resolve = |o: &Option<String>| o.as_deref().map(resolve_env_vars);
    match config {
        TranscriberConfig::OpenAI {
            api_key,
            base_url,
            model,
            language,
        } => TranscriberConfig::OpenAI {
            api_key: resolve_env_vars(api_key),
            base_url: resolve(base_url),
            model: resolve(model),
            language: language.clone(),
        },
        TranscriberConfig::Deepgram {
            api_key,
            base_url,
            model,
            language,
        } => TranscriberConfig::Deepgram {
            api_key: resolve_env_vars(api_key),
            base_url: resolve(base_url),
            model: resolve(model),
            language: language.clone(),
        },
        TranscriberConfig::Mock { transcript } => TranscriberConfig::Mock {
            transcript: transcript.clone(),
        },
    }
}

/// Apply key overrides from the environment.
///
/// A key for the configured backend replaces its `api_key`. With no backend
/// configured, an OpenAI key selects OpenAI, otherwise a Deepgram key
/// selects Deepgram.
fn apply_key_overrides(
    config: &mut AnswerlensConfig,
    openai_key: Option<String>,
    deepgram_key: Option<String>,
) {
    match &mut config.transcription {
        Some(TranscriberConfig::OpenAI { api_key, .. }) => {
            if let Some(key) = openai_key {
                *api_key = key;
            }
        }
        Some(TranscriberConfig::Deepgram { api_key, .. }) => {
            if let Some(key) = deepgram_key {
                *api_key = key;
            }
        }
        Some(TranscriberConfig::Mock { .. }) => {}
        None => {
            config.transcription = match (openai_key, deepgram_key) {
                (Some(api_key), _) => Some(TranscriberConfig::OpenAI {
                    api_key,
                    base_url: None,
                    model: None,
                    language: None,
                }),
                (None, Some(api_key)) => Some(TranscriberConfig::Deepgram {
                    api_key,
                    base_url: None,
                    model: None,
                    language: None,
                }),
                (None, None) => None,
            };
        }
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `answerlens.toml` in the current directory
/// 2. `~/.config/answerlens/config.toml`
///
/// Environment variable overrides: `ANSWERLENS_OPENAI_KEY`, `ANSWERLENS_DEEPGRAM_KEY`.
pub fn load_config() -> Result<AnswerlensConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<AnswerlensConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("answerlens.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match &config_path {
        Some(path) => parse_config_file(path)?,
        None => AnswerlensConfig::default(),
    };

    apply_key_overrides(
        &mut config,
        std::env::var("ANSWERLENS_OPENAI_KEY").ok(),
        std::env::var("ANSWERLENS_DEEPGRAM_KEY").ok(),
    );
    config.transcription = config.transcription.as_ref().map(resolve_transcriber_config);

    config
        .engine
        .validate()
        .with_context(|| match &config_path {
            Some(path) => format!("invalid [engine] section in {}", path.display()),
            None => "invalid default engine configuration".to_string(),
        })?;

    tracing::debug!(path = ?config_path, transcription = ?config.transcription, "loaded config");
    Ok(config)
}

fn parse_config_file(path: &Path) -> Result<AnswerlensConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    toml::from_str::<AnswerlensConfig>(&content)
        .with_context(|| format!("failed to parse config: {}", path.display()))
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("answerlens"))
}

/// Create a transcriber instance from its configuration.
pub fn create_transcriber(config: &TranscriberConfig) -> Result<Box<dyn Transcriber>> {
    match config {
        TranscriberConfig::OpenAI {
            api_key,
            base_url,
            model,
            language,
        } => {
            if api_key.trim().is_empty() {
                anyhow::bail!("OpenAI transcription needs an api_key (or ANSWERLENS_OPENAI_KEY)");
            }
            let mut transcriber = OpenAiTranscriber::new(api_key, base_url.clone(), model.clone())?;
            if let Some(language) = language {
                transcriber = transcriber.with_language(language.clone());
            }
            Ok(Box::new(transcriber))
        }
        TranscriberConfig::Deepgram {
            api_key,
            base_url,
            model,
            language,
        } => {
            if api_key.trim().is_empty() {
                anyhow::bail!("Deepgram transcription needs an api_key (or ANSWERLENS_DEEPGRAM_KEY)");
            }
            let mut transcriber = DeepgramTranscriber::new(api_key, base_url.clone(), model.clone())?;
            if let Some(language) = language {
                transcriber = transcriber.with_language(language.clone());
            }
            Ok(Box::new(transcriber))
        }
        TranscriberConfig::Mock { transcript } => {
            Ok(Box::new(MockTranscriber::with_transcript(transcript)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_ANSWERLENS_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_ANSWERLENS_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_ANSWERLENS_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        assert_eq!(resolve_env_vars("no refs"), "no refs");
        assert_eq!(
            resolve_env_vars("open ${_ANSWERLENS_TEST_VAR"),
            "open ${_ANSWERLENS_TEST_VAR"
        );
        std::env::remove_var("_ANSWERLENS_TEST_VAR");
    }

    #[test]
    fn resolved_values_are_not_rescanned() {
        std::env::set_var("_ANSWERLENS_SELF_REF", "a${_ANSWERLENS_SELF_REF}b");
        assert_eq!(
            resolve_env_vars("${_ANSWERLENS_SELF_REF}-${_ANSWERLENS_SELF_REF}"),
            "a${_ANSWERLENS_SELF_REF}b-a${_ANSWERLENS_SELF_REF}b"
        );
        std::env::remove_var("_ANSWERLENS_SELF_REF");
    }

    #[test]
    fn default_config() {
        let config = AnswerlensConfig::default();
        assert!(config.transcription.is_none());
        assert!(config.default_question_bank.is_none());
        assert_eq!(config.engine, EngineConfig::default());
    }

    #[test]
    fn parse_full_config() {
        let toml_str = r#"
default_question_bank = "question-banks/core-cs.toml"

[transcription]
type = "deepgram"
api_key = "dg-test"
model = "nova-3"

[engine.scoring.aggregate]
suggestion_threshold = 7
"#;
        let config: AnswerlensConfig = toml::from_str(toml_str).unwrap();
        assert!(matches!(
            config.transcription,
            Some(TranscriberConfig::Deepgram { ref model, .. }) if model.as_deref() == Some("nova-3")
        ));
        assert_eq!(config.engine.scoring.aggregate.suggestion_threshold, 7);
        assert_eq!(config.engine.scoring.aggregate.max_suggestions, 5);
    }

    #[test]
    fn debug_masks_api_keys() {
        let config = TranscriberConfig::OpenAI {
            api_key: "sk-secret".into(),
            base_url: None,
            model: None,
            language: None,
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("***"));
    }

    #[test]
    fn key_overrides() {
        let mut config = AnswerlensConfig::default();
        apply_key_overrides(&mut config, None, Some("dg".into()));
        assert!(matches!(
            config.transcription,
            Some(TranscriberConfig::Deepgram { ref api_key, .. }) if api_key == "dg"
        ));

        // an OpenAI key does not replace a configured Deepgram backend
        apply_key_overrides(&mut config, Some("sk".into()), Some("dg2".into()));
        assert!(matches!(
            config.transcription,
            Some(TranscriberConfig::Deepgram { ref api_key, .. }) if api_key == "dg2"
        ));

        let mut config = AnswerlensConfig::default();
        apply_key_overrides(&mut config, Some("sk".into()), Some("dg".into()));
        assert!(matches!(config.transcription, Some(TranscriberConfig::OpenAI { .. })));
    }

    #[test]
    fn load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("answerlens.toml");
        std::fs::write(
            &path,
            "[transcription]\ntype = \"mock\"\ntranscript = \"A trie stores prefixes.\"\n",
        )
        .unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(
            config.transcription,
            Some(TranscriberConfig::Mock {
                transcript: "A trie stores prefixes.".into()
            })
        );
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = load_config_from(Some(Path::new("/nonexistent/answerlens.toml"))).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn invalid_engine_section_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("answerlens.toml");
        std::fs::write(&path, "[engine.scoring.aggregate]\nclarity_weight = 0.9\n").unwrap();
        let err = load_config_from(Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains("sum to 1"));
    }

    #[test]
    fn factory_builds_each_backend() {
        let mock = create_transcriber(&TranscriberConfig::Mock {
            transcript: "x".into(),
        })
        .unwrap();
        assert_eq!(mock.name(), "mock");

        let deepgram = create_transcriber(&TranscriberConfig::Deepgram {
            api_key: "dg".into(),
            base_url: None,
            model: None,
            language: Some("en-GB".into()),
        })
        .unwrap();
        assert_eq!(deepgram.name(), "deepgram");

        let missing_key = create_transcriber(&TranscriberConfig::OpenAI {
            api_key: " ".into(),
            base_url: None,
            model: None,
            language: None,
        });
        assert!(missing_key.is_err());
    }
}
