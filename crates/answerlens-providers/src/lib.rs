//! answerlens-providers — Speech-to-text backends and configuration.
//!
//! Implements the `Transcriber` trait for OpenAI and Deepgram, plus a mock
//! for tests, and loads the `answerlens.toml` configuration that selects
//! between them.

pub mod audio;
pub mod config;
pub mod deepgram;
mod http;
pub mod mock;
pub mod openai;

pub use config::{create_transcriber, load_config, load_config_from, AnswerlensConfig, TranscriberConfig};
pub use deepgram::DeepgramTranscriber;
pub use mock::MockTranscriber;
pub use openai::OpenAiTranscriber;
