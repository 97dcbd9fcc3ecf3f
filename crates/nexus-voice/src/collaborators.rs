//! Boundary traits for the speech and generation collaborators.
//!
//! The dispatcher only talks to the outside world through these. Real
//! engines live in the host process; tests use recording fakes.

use std::fmt;

use async_trait::async_trait;

use crate::error::{GenerationError, VoiceError};
use crate::persona::Persona;

/// Reason reported by the speech input engine when it stops on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputErrorKind {
    /// Recognition timed out without hearing anything.
    NoSpeech,
    /// Recognition was stopped on purpose.
    Aborted,
    Other(String),
}

impl fmt::Display for InputErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputErrorKind::NoSpeech => write!(f, "no-speech"),
            InputErrorKind::Aborted => write!(f, "aborted"),
            InputErrorKind::Other(reason) => write!(f, "{}", reason),
        }
    }
}

/// Delivers finalized transcripts to the dispatcher.
///
/// Starting an already started input must be harmless.
pub trait SpeechInput: Send + Sync {
    fn start(&self) -> Result<(), VoiceError>;

    fn stop(&self) -> Result<(), VoiceError>;

    fn is_available(&self) -> bool {
        true
    }
}

/// Fire-and-forget speech synthesis.
///
/// A new utterance cancels any utterance still in progress.
pub trait SpeechOutput: Send + Sync {
    fn speak(&self, text: &str);

    fn is_available(&self) -> bool {
        true
    }
}

/// Remote text generation.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Short provider name used in audit output.
    fn name(&self) -> &str;

    fn is_available(&self) -> bool;

    /// Reply to a wake-confirmed transcript that no local intent matched.
    async fn generate(&self, transcript: &str, persona: &Persona)
        -> Result<String, GenerationError>;
}

/// Generator used when no remote provider is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineGenerator;

#[async_trait]
impl Generator for OfflineGenerator {
    fn name(&self) -> &str {
        "offline"
    }

    fn is_available(&self) -> bool {
        false
    }

    async fn generate(
        &self,
        _transcript: &str,
        _persona: &Persona,
    ) -> Result<String, GenerationError> {
        Err(GenerationError::Unavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_error_kind_display() {
        assert_eq!(InputErrorKind::NoSpeech.to_string(), "no-speech");
        assert_eq!(InputErrorKind::Aborted.to_string(), "aborted");
        assert_eq!(
            InputErrorKind::Other("network".to_string()).to_string(),
            "network"
        );
    }

    #[tokio::test]
    async fn test_offline_generator_is_unavailable() {
        let generator = OfflineGenerator;
        assert!(!generator.is_available());
        assert_eq!(generator.name(), "offline");

        let err = generator
            .generate("nexus what time is it", &Persona::default())
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::Unavailable));
    }
}
