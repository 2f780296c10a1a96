use anyhow::{Result, anyhow};
use owo_colors::OwoColorize;
use weekplan_core::state::AppState;
use weekplan_core::store::EventStore;
use weekplan_core::time::{format_date, parse_date};

pub async fn run(
    state: &mut AppState,
    store: &dyn EventStore,
    event_id: String,
    date: String,
) -> Result<()> {
    let date = parse_date(&date)?;

    let override_id = state
        .override_for(&event_id, date)
        .map(|o| o.id.clone())
        .ok_or_else(|| {
            anyhow!(
                "No skip or move stored for that event on {}",
                format_date(date)
            )
        })?;

    state.remove_override(store, &override_id).await?;

    println!(
        "{}",
        format!("Restored the scheduled times for {}", format_date(date)).green()
    );
    Ok(())
}
