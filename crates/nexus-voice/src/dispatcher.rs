//! Voice command dispatcher: the only owner of the session status.
//!
//! Gates transcripts on a wake phrase, resolves a local intent or escalates
//! to the generation collaborator, and drives the status state machine.
//! Every step is reported through the shared activity log.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use nexus_core::{ActivityLog, EventBus, LogSeverity, NexusConfig, NexusEvent, SessionStatus};
use nexus_macro::{
    extract_clock_time, IntentClassifier, IntentTag, MacroEngine, ScheduleEntry, Scheduler,
};
use tokio::sync::broadcast;

use crate::collaborators::{Generator, InputErrorKind, SpeechInput, SpeechOutput};
use crate::error::{GenerationError, VoiceError};
use crate::persona::Persona;
use crate::state::StateMachine;
use crate::wake::WakePhrases;

/// Macro id stored for schedules requested by voice.
pub const VOICE_MACRO_ID: &str = "VOICE_MACRO";

/// Spoken when the generator returns an empty reply.
const DEFAULT_REPLY: &str = "Command acknowledged.";

/// Pause between the audit start line and the checks.
const AUDIT_DELAY: Duration = Duration::from_millis(800);

/// Timing and phrasing of the dispatcher.
#[derive(Debug, Clone)]
pub struct DispatcherSettings {
    pub remote_timeout: Duration,
    pub reply_settle: Duration,
    pub alert_report_delay: Duration,
    /// Auto-clear delay for alerts. `None` keeps the alert until cleared.
    pub alert_clear: Option<Duration>,
    pub restart_delay: Duration,
    pub greeting: String,
    pub farewell: String,
}

impl Default for DispatcherSettings {
    fn default() -> Self {
        Self::from_config(&NexusConfig::default())
    }
}

impl DispatcherSettings {
    pub fn from_config(config: &NexusConfig) -> Self {
        let d = &config.dispatcher;
        Self {
            remote_timeout: Duration::from_secs(d.remote_timeout_secs),
            reply_settle: Duration::from_millis(d.reply_settle_ms),
            alert_report_delay: Duration::from_millis(d.alert_report_delay_ms),
            alert_clear: (d.alert_clear_secs > 0).then(|| Duration::from_secs(d.alert_clear_secs)),
            restart_delay: Duration::from_millis(config.voice.restart_delay_ms),
            greeting: config.voice.greeting.clone(),
            farewell: config.voice.farewell.clone(),
        }
    }
}

/// External collaborators the dispatcher calls out to.
#[derive(Clone)]
pub struct Collaborators {
    pub input: Arc<dyn SpeechInput>,
    pub output: Arc<dyn SpeechOutput>,
    pub generator: Arc<dyn Generator>,
}

/// What happened to one transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptOutcome {
    /// No wake phrase; nothing changed.
    Ignored,
    /// Another transcript was still being handled; this one was dropped.
    Busy,
    /// A local macro ran.
    Executed(IntentTag),
    /// The generator replied; a schedule may have been stored.
    Replied {
        reply: String,
        scheduled: Option<ScheduleEntry>,
    },
    /// The generator failed; the fallback phrase was spoken.
    Fallback { reason: String },
}

/// Result of a system audit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditReport {
    pub generator_available: bool,
    pub voice_available: bool,
    pub active_schedules: usize,
}

/// Resets the single-flight flag when a transcript finishes, including on
/// early return.
struct ProcessingGuard<'a>(&'a AtomicBool);

impl Drop for ProcessingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

pub struct Dispatcher {
    state: StateMachine,
    active: AtomicBool,
    processing: AtomicBool,
    wake: WakePhrases,
    classifier: IntentClassifier,
    engine: MacroEngine,
    scheduler: Arc<Scheduler>,
    collaborators: Collaborators,
    persona: Persona,
    settings: DispatcherSettings,
    log: ActivityLog,
    events: EventBus,
}

impl Dispatcher {
    /// Build a dispatcher from configuration.
    pub fn new(
        config: &NexusConfig,
        collaborators: Collaborators,
        scheduler: Arc<Scheduler>,
        log: ActivityLog,
        events: EventBus,
    ) -> Self {
        let engine = MacroEngine::new(
            Duration::from_millis(config.macros.execution_ms),
            log.clone(),
            events.clone(),
        );
        Self {
            state: StateMachine::new(events.clone()),
            active: AtomicBool::new(false),
            processing: AtomicBool::new(false),
            wake: WakePhrases::new(&config.voice.wake_phrases),
            classifier: IntentClassifier::new(),
            engine,
            scheduler,
            collaborators,
            persona: Persona::from_config(&config.persona),
            settings: DispatcherSettings::from_config(config),
            log,
            events,
        }
    }

    /// Replace the built-in classifier.
    pub fn with_classifier(mut self, classifier: IntentClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn status(&self) -> SessionStatus {
        self.state.current()
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    pub fn is_processing(&self) -> bool {
        self.processing.load(Ordering::SeqCst)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<NexusEvent> {
        self.events.subscribe()
    }

    pub fn log(&self) -> &ActivityLog {
        &self.log
    }

    pub fn scheduler(&self) -> &Arc<Scheduler> {
        &self.scheduler
    }

    fn speak(&self, text: &str) {
        tracing::debug!(text, "Speaking");
        self.collaborators.output.speak(text);
    }

    // =========================================================================
    // Session lifecycle
    // =========================================================================

    /// Engage the hands-free listener. Repeated calls only log.
    pub fn activate(&self) -> Result<(), VoiceError> {
        if self.active.swap(true, Ordering::SeqCst) {
            self.log
                .info(format!("{}: Listener already engaged.", self.persona.name));
            return Ok(());
        }

        self.state.transition(SessionStatus::Listening)?;
        self.log.nexus(format!(
            "{name}: Hands-free listener engaged. Say '{name}' to command.",
            name = self.persona.name
        ));
        self.speak(&self.settings.greeting);

        if let Err(e) = self.collaborators.input.start() {
            self.log.warn(format!("Speech input did not start: {}", e));
        }
        Ok(())
    }

    /// Put the listener to sleep.
    pub fn deactivate(&self) -> Result<(), VoiceError> {
        self.active.store(false, Ordering::SeqCst);
        self.state.transition(SessionStatus::Idle)?;

        if let Err(e) = self.collaborators.input.stop() {
            tracing::warn!(error = %e, "Speech input did not stop cleanly");
        }
        self.log
            .info(format!("{}: Voice engine in sleep mode.", self.persona.name));
        self.speak(&self.settings.farewell);
        Ok(())
    }

    /// Speech input ended on its own. Restarts it while the session is
    /// active; returns whether a restart was attempted.
    pub fn on_input_ended(&self) -> bool {
        if !self.is_active() {
            return false;
        }
        if let Err(e) = self.collaborators.input.start() {
            tracing::debug!(error = %e, "Speech input restart ignored");
        }
        true
    }

    /// Speech input reported an error. Anything but `Aborted` is followed by
    /// a delayed restart while the session stays active.
    pub async fn on_input_error(&self, kind: InputErrorKind) -> bool {
        if !self.is_active() {
            return false;
        }
        if kind != InputErrorKind::NoSpeech {
            self.log.warn(format!("Audio Engine Error: {}", kind));
        }
        if kind == InputErrorKind::Aborted {
            return false;
        }

        tokio::time::sleep(self.settings.restart_delay).await;
        if !self.is_active() {
            return false;
        }
        if let Err(e) = self.collaborators.input.start() {
            tracing::debug!(error = %e, "Speech input restart ignored");
        }
        true
    }

    // =========================================================================
    // Transcripts
    // =========================================================================

    /// Handle one finalized transcript.
    ///
    /// Generation failures never escape; they end in the fallback reply. An
    /// alert raised while the transcript is in flight is left in place.
    pub async fn handle_transcript(&self, text: &str) -> Result<TranscriptOutcome, VoiceError> {
        if self
            .processing
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            self.log
                .warn(format!("Dispatcher busy. Dropped input: \"{}\"", text.trim()));
            return Ok(TranscriptOutcome::Busy);
        }
        let _guard = ProcessingGuard(&self.processing);

        let transcript = text.trim().to_lowercase();
        self.log.info(format!("Audio Input: \"{}\"", transcript));

        let Some(phrase) = self.wake.detect(&transcript) else {
            tracing::debug!("No wake phrase, transcript discarded");
            return Ok(TranscriptOutcome::Ignored);
        };
        self.events.publish(NexusEvent::WakePhraseDetected {
            phrase: phrase.to_string(),
        });

        self.state.transition(SessionStatus::Thinking)?;
        self.log.nexus(format!(
            "Wake Word '{}' Confirmed. Processing...",
            self.persona.name
        ));

        if let Some(tag) = self.classifier.classify(&transcript) {
            self.log
                .nexus(format!("Engine: Local trigger detected: {}", tag));
            self.speak(&format!("Executing {}.", tag.spoken()));
            self.execute_macro(tag).await?;
            return Ok(TranscriptOutcome::Executed(tag));
        }

        match self.generate(&transcript).await {
            Ok(reply) => self.deliver_reply(&transcript, reply).await,
            Err(e) => {
                tracing::warn!(error = %e, "Generation failed");
                self.log.error(format!(
                    "{}: Neural Link failed. Falling back to local engine.",
                    self.persona.name
                ));
                self.speak("Link down. Local macros only.");
                self.state
                    .transition_from(SessionStatus::Thinking, SessionStatus::Idle)?;
                Ok(TranscriptOutcome::Fallback {
                    reason: e.to_string(),
                })
            }
        }
    }

    async fn generate(&self, transcript: &str) -> Result<String, GenerationError> {
        tracing::debug!(
            generator = self.collaborators.generator.name(),
            model = %self.persona.model,
            "Requesting remote reply"
        );
        let call = self
            .collaborators
            .generator
            .generate(transcript, &self.persona);
        match tokio::time::timeout(self.settings.remote_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(GenerationError::Timeout(
                self.settings.remote_timeout.as_secs(),
            )),
        }
    }

    async fn deliver_reply(
        &self,
        transcript: &str,
        reply: String,
    ) -> Result<TranscriptOutcome, VoiceError> {
        let reply = match reply.trim() {
            "" => DEFAULT_REPLY.to_string(),
            trimmed => trimmed.to_string(),
        };
        self.speak(&reply);
        self.log.nexus(format!("{}: {}", self.persona.name, reply));

        // An alert raised while the generator was busy stays up.
        self.state.transition_from_any(
            &[
                SessionStatus::Thinking,
                SessionStatus::Idle,
                SessionStatus::Listening,
            ],
            SessionStatus::Executing,
        )?;

        let mut scheduled = None;
        if transcript.contains("schedule") {
            if let Some(time) = extract_clock_time(transcript) {
                match self.scheduler.save_schedule(VOICE_MACRO_ID, &time) {
                    Ok(entry) => {
                        self.speak(&format!("Macro scheduled for {}.", entry.time));
                        scheduled = Some(entry);
                    }
                    Err(e) => self.log.warn(format!("Scheduler: {}", e)),
                }
            }
        }

        tokio::time::sleep(self.settings.reply_settle).await;
        self.state
            .transition_from(SessionStatus::Executing, self.resting_status())?;

        Ok(TranscriptOutcome::Replied { reply, scheduled })
    }

    fn resting_status(&self) -> SessionStatus {
        if self.is_active() {
            SessionStatus::Listening
        } else {
            SessionStatus::Idle
        }
    }

    // =========================================================================
    // Actions
    // =========================================================================

    /// Run a local macro: `Executing` for the simulated duration, then `Idle`.
    ///
    /// An alert raised while the macro runs is left in place.
    pub async fn execute_macro(&self, tag: IntentTag) -> Result<(), VoiceError> {
        self.state.transition(SessionStatus::Executing)?;
        let invocation = self.engine.run_intent(tag).await;
        tracing::info!(intent = %tag, id = %invocation.id, "Macro executed");
        self.state
            .transition_from(SessionStatus::Executing, SessionStatus::Idle)?;
        Ok(())
    }

    /// Raise an environmental anomaly alert.
    ///
    /// Completes after the alert payload is reported, or after the
    /// configured auto-clear when one is set.
    pub async fn trigger_anomaly(&self) -> Result<(), VoiceError> {
        self.state.transition(SessionStatus::Alert)?;
        self.log.error("WATCHDOG: ENVIRONMENTAL ANOMALY DETECTED.");
        self.log
            .warn("ACTION: Initiating SMTP Tunnel Handshake [ECC-256]...");
        self.speak("Alert. Security breach suspected.");

        tokio::time::sleep(self.settings.alert_report_delay).await;
        self.log
            .info("SMTP: Security alert payload dispatched to Vault Mirror.");

        if let Some(clear_after) = self.settings.alert_clear {
            tokio::time::sleep(clear_after.saturating_sub(self.settings.alert_report_delay)).await;
            self.clear_alert()?;
        }
        Ok(())
    }

    /// Leave `Alert` for `Listening` (active) or `Idle`. No-op in any other
    /// status; returns whether the alert was cleared.
    pub fn clear_alert(&self) -> Result<bool, VoiceError> {
        let cleared = self
            .state
            .transition_from(SessionStatus::Alert, self.resting_status())?;
        if cleared {
            self.log.info("WATCHDOG: Alert cleared.");
        }
        Ok(cleared)
    }

    /// Run the integrity check over every collaborator.
    pub async fn audit(&self) -> AuditReport {
        self.log
            .warn("AUDIT: Initiating Full System Integrity Check...");
        tokio::time::sleep(AUDIT_DELAY).await;

        let generator = &self.collaborators.generator;
        let generator_available = generator.is_available();
        self.log.record(
            format!(
                "AUDIT: Neural Link ({}) status: {}",
                generator.name(),
                if generator_available { "STABLE" } else { "OFFLINE" }
            ),
            if generator_available {
                LogSeverity::Info
            } else {
                LogSeverity::Error
            },
        );

        let voice_available = self.collaborators.input.is_available()
            && self.collaborators.output.is_available();
        self.log.record(
            format!(
                "AUDIT: Voice Array status: {}",
                if voice_available { "ACTIVE" } else { "FAILED" }
            ),
            if voice_available {
                LogSeverity::Info
            } else {
                LogSeverity::Error
            },
        );

        self.log.info(format!(
            "AUDIT: Schedule store [{}] verified.",
            self.scheduler.store_description()
        ));
        let active_schedules = self.scheduler.active_count();
        self.log.info(format!(
            "AUDIT: Macro Scheduler Heartbeat: NOMINAL ({} pending).",
            active_schedules
        ));

        self.log.nexus(format!(
            "AUDIT: All systems NOMINAL. {} is ready.",
            self.persona.name
        ));
        self.speak("Audit complete. All systems are nominal.");

        AuditReport {
            generator_available,
            voice_available,
            active_schedules,
        }
    }
}
