mod commands;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use weekplan_core::config::GlobalConfig;
use weekplan_core::state::AppState;
use weekplan_core::store::LocalStore;

#[derive(Parser)]
#[command(name = "weekplan")]
#[command(about = "Plan your week: single and recurring events in one timeline")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the weekly grid
    Week {
        /// Any date inside the week to show (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Show today's reminders
    Today,
    /// List events (not occurrences)
    Events,
    /// Create an event
    Add {
        name: String,

        /// Date for a single event (YYYY-MM-DD)
        #[arg(long, conflicts_with = "weekly")]
        date: Option<String>,

        /// Start time (HH:mm)
        #[arg(long)]
        from: Option<String>,

        /// End time (HH:mm)
        #[arg(long)]
        to: Option<String>,

        /// Weekly slots, e.g. "mon=09:00-10:00,thu=14:00-15:30"
        #[arg(long)]
        weekly: Option<String>,

        /// Palette color (red, orange, yellow, green, teal, blue, purple, pink)
        #[arg(long, default_value = "blue")]
        color: String,

        /// Description
        #[arg(long)]
        desc: Option<String>,
    },
    /// Change an event's name, description, or color
    Edit {
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long, conflicts_with = "no_desc")]
        desc: Option<String>,

        /// Clear the description
        #[arg(long)]
        no_desc: bool,

        #[arg(long)]
        color: Option<String>,
    },
    /// Delete an event and its stored exceptions
    Rm { id: String },
    /// Cancel one occurrence of a recurring event
    Skip { event_id: String, date: String },
    /// Shift one occurrence of a recurring event
    Move {
        event_id: String,
        date: String,

        /// New start time (HH:mm)
        #[arg(long)]
        from: Option<String>,

        /// New end time (HH:mm)
        #[arg(long)]
        to: Option<String>,
    },
    /// Undo a skip or move for one occurrence
    Restore { event_id: String, date: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = GlobalConfig::load()?;
    let store = LocalStore::open(config.data_path())?;
    let scope = config.scope();

    let mut state = AppState::new();
    state.load(&store, &scope).await;

    match cli.command {
        Commands::Week { date } => commands::week::run(&state, date.as_deref()),
        Commands::Today => commands::today::run(&state),
        Commands::Events => commands::events::run(&state),
        Commands::Add {
            name,
            date,
            from,
            to,
            weekly,
            color,
            desc,
        } => {
            commands::add::run(&mut state, &store, &scope, name, date, from, to, weekly, color, desc)
                .await
        }
        Commands::Edit {
            id,
            name,
            desc,
            no_desc,
            color,
        } => commands::edit::run(&mut state, &store, id, name, desc, no_desc, color).await,
        Commands::Rm { id } => commands::rm::run(&mut state, &store, id).await,
        Commands::Skip { event_id, date } => {
            commands::skip::run(&mut state, &store, &scope, event_id, date).await
        }
        Commands::Move {
            event_id,
            date,
            from,
            to,
        } => commands::move_event::run(&mut state, &store, &scope, event_id, date, from, to).await,
        Commands::Restore { event_id, date } => {
            commands::restore::run(&mut state, &store, event_id, date).await
        }
    }
}
