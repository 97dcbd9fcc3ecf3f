//! Persona handed to the generation collaborator.

use nexus_core::config::PersonaConfig;

/// Identity and fixed instructions for remote replies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Persona {
    pub name: String,
    pub model: String,
    pub system_instruction: String,
}

impl Default for Persona {
    fn default() -> Self {
        Self::from_config(&PersonaConfig::default())
    }
}

impl Persona {
    pub fn from_config(config: &PersonaConfig) -> Self {
        Self {
            name: config.name.clone(),
            model: config.model.clone(),
            system_instruction: config.system_instruction.clone(),
        }
    }

    /// User prompt wrapping a wake-confirmed transcript.
    pub fn prompt(&self, transcript: &str) -> String {
        format!(
            "User Said: \"{transcript}\".\n\
             System: {name}.\n\
             Condition: Hands-free. The user cannot type or click.\n\
             Instructions: You are {name}. Provide a concise, authoritative response. \
             If they want to schedule something, tell them to say \"Schedule [time]\".",
            transcript = transcript,
            name = self.name,
        )
    }
}
