//! Terminal stand-ins for the speech collaborators.
//!
//! Input is line based: the listener only accepts transcripts while it is
//! started. Output prints each utterance as `[speak] <text>`.

use std::sync::atomic::{AtomicBool, Ordering};

use nexus_voice::{SpeechInput, SpeechOutput, VoiceError};

/// Stdin-backed speech input. Starting twice is harmless.
#[derive(Debug, Default)]
pub struct ConsoleInput {
    listening: AtomicBool,
}

impl ConsoleInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_listening(&self) -> bool {
        self.listening.load(Ordering::SeqCst)
    }
}

impl SpeechInput for ConsoleInput {
    fn start(&self) -> Result<(), VoiceError> {
        if self.listening.swap(true, Ordering::SeqCst) {
            tracing::debug!("Console input already listening");
        }
        Ok(())
    }

    fn stop(&self) -> Result<(), VoiceError> {
        self.listening.store(false, Ordering::SeqCst);
        Ok(())
    }
}

/// Prints utterances to stdout.
#[derive(Debug, Default)]
pub struct ConsoleOutput;

impl SpeechOutput for ConsoleOutput {
    fn speak(&self, text: &str) {
        println!("[speak] {}", text);
    }
}

/// One line typed at the console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Start,
    Stop,
    Anomaly,
    Clear,
    Audit,
    Status,
    Log,
    Quit,
    Transcript(String),
    Unknown(String),
    Empty,
}

impl ConsoleCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return ConsoleCommand::Empty;
        }
        let Some(command) = line.strip_prefix(':') else {
            return ConsoleCommand::Transcript(line.to_string());
        };
        match command.trim().to_lowercase().as_str() {
            "start" => ConsoleCommand::Start,
            "stop" => ConsoleCommand::Stop,
            "anomaly" => ConsoleCommand::Anomaly,
            "clear" => ConsoleCommand::Clear,
            "audit" => ConsoleCommand::Audit,
            "status" => ConsoleCommand::Status,
            "log" => ConsoleCommand::Log,
            "quit" | "q" | "exit" => ConsoleCommand::Quit,
            other => ConsoleCommand::Unknown(other.to_string()),
        }
    }
}
