//! Nexus console: wires the voice dispatcher and scheduler to a terminal.

mod cli;
mod console;

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast;
use tokio::task::JoinSet;

use nexus_core::{ActivityLog, EventBus, NexusConfig, NexusEvent};
use nexus_macro::{JsonFileStore, Scheduler};
use nexus_voice::{Collaborators, Dispatcher, OfflineGenerator, TranscriptOutcome};

use cli::CliArgs;
use console::{ConsoleCommand, ConsoleInput, ConsoleOutput};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Config is read before tracing exists; report the outcome afterwards.
    let config_file = args.resolve_config_path();
    let (mut config, load_error) = match NexusConfig::load(&config_file) {
        Ok(config) => (config, None),
        Err(e) => (NexusConfig::default(), Some(e)),
    };
    args.apply_overrides(&mut config);

    // Tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.general.log_level)),
        )
        .init();

    tracing::info!("Starting Nexus v{}", env!("CARGO_PKG_VERSION"));
    match load_error {
        None => tracing::info!(path = %config_file.display(), "Configuration loaded"),
        Some(e) => tracing::warn!(
            path = %config_file.display(),
            error = %e,
            "Configuration not loaded, using defaults"
        ),
    }

    let log = ActivityLog::new();
    let events = EventBus::new();

    // Scheduler.
    let schedule_path = config.schedule_path();
    let store = Arc::new(JsonFileStore::new(&schedule_path));
    let scheduler = Arc::new(Scheduler::new(store, log.clone(), events.clone()));
    tracing::info!(
        path = %schedule_path.display(),
        entries = scheduler.entries().len(),
        "Schedule list ready"
    );

    // Dispatcher.
    let input = Arc::new(ConsoleInput::new());
    let collaborators = Collaborators {
        input: input.clone(),
        output: Arc::new(ConsoleOutput),
        generator: Arc::new(OfflineGenerator),
    };
    let dispatcher = Arc::new(Dispatcher::new(
        &config,
        collaborators,
        Arc::clone(&scheduler),
        log,
        events.clone(),
    ));

    // === Background tasks ===

    let check_period = Duration::from_secs(config.macros.schedule_check_secs.max(1));
    let scheduler_loop = {
        let scheduler = Arc::clone(&scheduler);
        tokio::spawn(async move { scheduler.run(check_period).await })
    };
    tokio::spawn(print_events(events.subscribe()));

    if !args.no_greeting {
        dispatcher.activate()?;
    }

    // === Console loop ===

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut tasks = JoinSet::new();
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = &mut ctrl_c => {
                tracing::info!("Interrupted, shutting down");
                tasks.abort_all();
                break;
            }
            Some(joined) = tasks.join_next(), if !tasks.is_empty() => {
                if let Err(e) = joined {
                    if !e.is_cancelled() {
                        tracing::error!(error = %e, "Console task failed");
                    }
                }
            }
            line = lines.next_line() => match line {
                Ok(Some(line)) => {
                    if !handle_line(&dispatcher, &input, &mut tasks, &line) {
                        break;
                    }
                }
                Ok(None) => {
                    tracing::debug!("stdin closed, waiting for in-flight commands");
                    while tasks.join_next().await.is_some() {}
                    break;
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to read stdin");
                    break;
                }
            }
        }
    }

    // === Shutdown ===

    if dispatcher.is_active() {
        dispatcher.deactivate()?;
    }
    scheduler.shutdown();
    if let Err(e) = scheduler_loop.await {
        tracing::warn!(error = %e, "Schedule loop ended abnormally");
    }
    tracing::info!("Nexus stopped");
    Ok(())
}

/// Act on one console line. Returns `false` when the console should exit.
fn handle_line(
    dispatcher: &Arc<Dispatcher>,
    input: &ConsoleInput,
    tasks: &mut JoinSet<()>,
    line: &str,
) -> bool {
    match ConsoleCommand::parse(line) {
        ConsoleCommand::Empty => {}
        ConsoleCommand::Quit => return false,
        ConsoleCommand::Start => {
            if let Err(e) = dispatcher.activate() {
                tracing::warn!(error = %e, "Activation refused");
            }
        }
        ConsoleCommand::Stop => {
            if let Err(e) = dispatcher.deactivate() {
                tracing::warn!(error = %e, "Deactivation refused");
            }
        }
        ConsoleCommand::Clear => match dispatcher.clear_alert() {
            Ok(true) => {}
            Ok(false) => println!("No active alert."),
            Err(e) => tracing::warn!(error = %e, "Alert not cleared"),
        },
        ConsoleCommand::Status => {
            println!(
                "status={} active={} pending_schedules={}",
                dispatcher.status(),
                dispatcher.is_active(),
                dispatcher.scheduler().active_count()
            );
        }
        ConsoleCommand::Log => {
            for entry in dispatcher.log().snapshot() {
                println!(
                    "{} [{}] {}",
                    entry.time.format("%H:%M:%S"),
                    entry.severity,
                    entry.message
                );
            }
        }
        ConsoleCommand::Anomaly => {
            let dispatcher = Arc::clone(dispatcher);
            tasks.spawn(async move {
                if let Err(e) = dispatcher.trigger_anomaly().await {
                    tracing::warn!(error = %e, "Anomaly not raised");
                }
            });
        }
        ConsoleCommand::Audit => {
            let dispatcher = Arc::clone(dispatcher);
            tasks.spawn(async move {
                let report = dispatcher.audit().await;
                tracing::debug!(?report, "Audit finished");
            });
        }
        ConsoleCommand::Transcript(text) => {
            if !input.is_listening() {
                println!("Listener asleep. Type :start to engage.");
                return true;
            }
            let dispatcher = Arc::clone(dispatcher);
            tasks.spawn(async move {
                match dispatcher.handle_transcript(&text).await {
                    Ok(TranscriptOutcome::Busy) => println!("Still working on the last command."),
                    Ok(outcome) => tracing::debug!(?outcome, "Transcript handled"),
                    Err(e) => tracing::warn!(error = %e, "Transcript interrupted"),
                }
            });
        }
        ConsoleCommand::Unknown(command) => {
            println!(
                "Unknown command :{}. Try :start :stop :anomaly :clear :audit :status :log :quit",
                command
            );
        }
    }
    true
}

/// Print status changes and schedule triggers as they happen.
async fn print_events(mut rx: broadcast::Receiver<NexusEvent>) {
    loop {
        match rx.recv().await {
            Ok(NexusEvent::StatusChanged { from, to }) => {
                println!(
                    "{} [status] {} -> {}",
                    chrono::Local::now().format("%H:%M:%S"),
                    from,
                    to
                );
            }
            Ok(NexusEvent::ScheduleTriggered { macro_id, time }) => {
                println!(
                    "{} [schedule] {} fired at {}",
                    chrono::Local::now().format("%H:%M:%S"),
                    macro_id,
                    time
                );
            }
            Ok(_) => {}
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::debug!(skipped, "Event printer lagged");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}
