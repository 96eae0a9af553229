//! CLI binary for munjiz.

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use munjiz::companion::{apply_import, apply_prayer_times, parse_import, parse_prayer_times};
use munjiz::model::UnitNumber;
use munjiz::model::day::Feeling;
use munjiz::notifier::build_notifier;
use munjiz::scheduler::{SystemClock, set_master_enabled};
use munjiz::store::{DayPatch, FileStorage, ReminderPatch, Storage, TaskPatch};
use munjiz::{
    ActivationGate, AppTheme, DayNumber, PlannerConfig, ReminderKey, ReminderRunner, ReminderTime,
    StateStore, Update,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::time::MissedTickBehavior;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Munjiz: 30-day observance tracker with reminders.
#[derive(Parser)]
#[command(name = "munjiz", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Toggle {
    On,
    Off,
}

/// Available commands.
#[derive(Subcommand)]
enum Command {
    /// Show progress, activation and reminder settings.
    Status,

    /// Unlock the tracker with the activation code.
    Activate { code: String },

    /// Lock the tracker again.
    Deactivate,

    /// Turn all reminders on or off.
    Notifications {
        #[arg(value_enum)]
        state: Toggle,
    },

    /// Edit one reminder.
    Reminder {
        /// Reminder key (e.g. `prayerFajr`, `frog_task`, `isha`).
        key: ReminderKey,
        /// New time, `HH:MM`.
        #[arg(long)]
        time: Option<ReminderTime>,
        #[arg(long, conflicts_with = "disable")]
        enable: bool,
        #[arg(long)]
        disable: bool,
        #[arg(long)]
        label: Option<String>,
        #[arg(long)]
        message: Option<String>,
    },

    /// Switch the colour theme.
    Theme { name: AppTheme },

    /// Edit one day.
    Day {
        /// Day number, 1-30.
        number: u8,
        /// Frog task description.
        #[arg(long)]
        frog: Option<String>,
        #[arg(long, conflicts_with = "frog_undone")]
        frog_done: bool,
        #[arg(long)]
        frog_undone: bool,
        /// Pages read today.
        #[arg(long)]
        pages: Option<u32>,
        #[arg(long)]
        feeling: Option<Feeling>,
        /// Make this the current day.
        #[arg(long)]
        current: bool,
        #[arg(long, conflicts_with = "unlock")]
        lock: bool,
        #[arg(long)]
        unlock: bool,
    },

    /// Mark a scripture checklist unit (1-30) as done.
    Checklist {
        unit: u8,
        /// Mark as not done instead.
        #[arg(long)]
        undo: bool,
    },

    /// Merge a JSON plan (`{"days": [...]}`) into the tracker.
    Import { file: PathBuf },

    /// Apply prayer times from a text file containing a JSON object.
    PrayerTimes { file: PathBuf },

    /// Run the reminder scheduler until Ctrl+C.
    Run,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(PlannerConfig::default_config_path);
    let config = PlannerConfig::load_or_default(&config_path)
        .with_context(|| format!("cannot load config from {}", config_path.display()))?;

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter)),
        )
        .init();

    let storage: Arc<dyn Storage> = Arc::new(FileStorage::new(config.storage.resolved_dir()));
    let mut store = StateStore::initialize(Arc::clone(&storage));
    let gate = ActivationGate::load(Arc::clone(&storage), config.activation.code.clone());

    match cli.command.unwrap_or(Command::Status) {
        Command::Status => print_status(&store, &gate),
        Command::Activate { code } => {
            if gate.activate(&code)? {
                println!("Activated.");
            } else {
                anyhow::bail!("incorrect activation code");
            }
        }
        Command::Deactivate => {
            gate.deactivate()?;
            println!("Deactivated.");
        }
        Command::Notifications { state } => {
            let notifier = build_notifier(config.notifications.backend);
            let enabled = matches!(state, Toggle::On);
            let now = set_master_enabled(&mut store, notifier.as_ref(), enabled).await?;
            if enabled && !now {
                anyhow::bail!("notification permission was not granted");
            }
            println!("Reminders {}.", if now { "on" } else { "off" });
        }
        Command::Reminder {
            key,
            time,
            enable,
            disable,
            label,
            message,
        } => {
            let patch = ReminderPatch {
                enabled: toggle_flag(enable, disable),
                time,
                label,
                message,
            };
            if patch.is_empty() {
                anyhow::bail!("nothing to change for {key}");
            }
            store.apply(Update::Reminder { key, patch })?;
            print_reminder(&store, key);
        }
        Command::Theme { name } => {
            store.apply(Update::Theme(name))?;
            println!("Theme set to {name} ({}).", name.palette().primary);
        }
        Command::Day {
            number,
            frog,
            frog_done,
            frog_undone,
            pages,
            feeling,
            current,
            lock,
            unlock,
        } => {
            let day = DayNumber::new(number)?;
            let entry = store.day(day);
            let frog_patch = TaskPatch {
                description: frog,
                is_completed: toggle_flag(frog_done, frog_undone),
                time: None,
            };
            let patch = DayPatch {
                frog_task: (frog_patch != TaskPatch::default()).then_some(frog_patch),
                scripture_progress: pages.map(|completed| {
                    let mut progress = entry.scripture_progress;
                    progress.completed = completed;
                    progress
                }),
                reflection: feeling.map(|feeling| {
                    let mut reflection = entry.reflection.clone();
                    reflection.feeling = feeling;
                    reflection
                }),
                is_locked: toggle_flag(lock, unlock),
                ..DayPatch::default()
            };
            let mut updates = vec![Update::day(day, patch)];
            if current {
                updates.push(Update::CurrentDay(day));
            }
            store.apply_batch(updates)?;
            print_day(&store, day);
        }
        Command::Checklist { unit, undo } => {
            store.apply(Update::ChecklistUnit {
                unit: UnitNumber::new(unit)?,
                done: !undo,
            })?;
            let summary = store.document().summary();
            println!(
                "Checklist: {}/30 ({}%).",
                summary.checklist_completed, summary.checklist_percent
            );
        }
        Command::Import { file } => {
            let text = read_text(&file)?;
            let days = parse_import(&text)?;
            let count = apply_import(&mut store, days)?;
            println!("Imported {count} day(s).");
        }
        Command::PrayerTimes { file } => {
            let text = read_text(&file)?;
            let times = parse_prayer_times(&text)?;
            apply_prayer_times(&mut store, &times)?;
            for (key, _) in &times {
                print_reminder(&store, *key);
            }
        }
        Command::Run => run_scheduler(&mut store, &gate, &config).await?,
    }

    Ok(())
}

async fn run_scheduler(
    store: &mut StateStore,
    gate: &ActivationGate,
    config: &PlannerConfig,
) -> anyhow::Result<()> {
    if !gate.is_active() {
        println!("Not activated; reminders will start once `munjiz activate` succeeds.");
    }

    let runner = ReminderRunner::new(
        Arc::new(SystemClock),
        build_notifier(config.notifications.backend),
        store.subscribe_notifications(),
        gate.subscribe(),
    )
    .with_tick_interval(config.scheduler.tick_interval());
    let cancel = runner.cancellation_token();

    // Handle Ctrl+C
    let cancel_clone = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("received Ctrl+C, shutting down...");
            cancel_clone.cancel();
        }
    });

    println!("Reminder scheduler running. Press Ctrl+C to stop.");
    let handle = runner.spawn();

    // Other munjiz commands write to the same storage from their own process.
    let mut reload = tokio::time::interval(config.scheduler.reload_interval());
    reload.set_missed_tick_behavior(MissedTickBehavior::Skip);
    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = reload.tick() => {
                if store.reload() {
                    info!("reminder settings changed in storage");
                }
                gate.reload();
            }
        }
    }

    handle.await.context("reminder runner task failed")?;
    Ok(())
}

fn toggle_flag(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

fn read_text(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))
}

fn print_status(store: &StateStore, gate: &ActivationGate) {
    let doc = store.document();
    let summary = doc.summary();
    let today = doc.day(doc.current_day);

    println!("Munjiz v{}", env!("CARGO_PKG_VERSION"));
    println!("Activated:       {}", if gate.is_active() { "yes" } else { "no" });
    println!("Theme:           {}", doc.theme);
    println!("Current day:     {}", summary.current_day);
    println!(
        "Checklist:       {}/30 ({}%)",
        summary.checklist_completed, summary.checklist_percent
    );
    println!("High-focus days: {}", summary.high_focus_days);
    println!("Reviews started: {}", summary.reviews_started);
    println!(
        "Today:           frog {} | prayers {}/5 | reading {}%",
        if today.frog_task.is_completed { "done" } else { "open" },
        today.prayers.obligatory_count(),
        today.scripture_progress.percent()
    );
    println!(
        "Reminders:       {}",
        if doc.notifications.master_enabled { "on" } else { "off" }
    );
    for (key, _) in doc.notifications.reminders.iter() {
        print_reminder(store, key);
    }
}

fn print_reminder(store: &StateStore, key: ReminderKey) {
    let config = store.notifications().reminders.get(key);
    println!(
        "  [{}] {:<14} {}  {}",
        if config.enabled { "x" } else { " " },
        key.as_str(),
        config.time,
        config.label
    );
}

fn print_day(store: &StateStore, day: DayNumber) {
    let entry = store.day(day);
    println!("{}", entry.date_label);
    println!(
        "  frog:    [{}] {}",
        if entry.frog_task.is_completed { "x" } else { " " },
        entry.frog_task.description
    );
    println!(
        "  reading: {}/{} pages ({}%)",
        entry.scripture_progress.completed,
        entry.scripture_progress.goal,
        entry.scripture_progress.percent()
    );
    println!("  feeling: {}", entry.reflection.feeling);
    if entry.is_locked {
        println!("  locked");
    }
}
