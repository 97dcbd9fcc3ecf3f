//! Hands-free voice session for Nexus.
//!
//! Owns the session status state machine and the voice command dispatcher
//! that turns finalized transcripts into local macros, remote replies and
//! schedule entries.

pub mod collaborators;
pub mod dispatcher;
pub mod error;
pub mod persona;
pub mod state;
pub mod wake;

pub use collaborators::{Generator, InputErrorKind, OfflineGenerator, SpeechInput, SpeechOutput};
pub use dispatcher::{
    AuditReport, Collaborators, Dispatcher, DispatcherSettings, TranscriptOutcome, VOICE_MACRO_ID,
};
pub use error::{GenerationError, VoiceError};
pub use persona::Persona;
pub use state::StateMachine;
pub use wake::WakePhrases;
