use anyhow::{Result, anyhow, bail};
use owo_colors::OwoColorize;
use weekplan_core::event_override::OverrideData;
use weekplan_core::state::AppState;
use weekplan_core::store::{EventStore, Scope};
use weekplan_core::time::{format_date, parse_date};

pub async fn run(
    state: &mut AppState,
    store: &dyn EventStore,
    scope: &Scope,
    event_id: String,
    date: String,
) -> Result<()> {
    let date = parse_date(&date)?;

    let name = {
        let event = state
            .event(&event_id)
            .ok_or_else(|| anyhow!("No event with id {event_id}"))?;
        if !event.is_recurring() {
            bail!(
                "'{}' is a single event; delete it with `weekplan rm` instead",
                event.name
            );
        }
        event.name.clone()
    };

    state
        .set_override(
            store,
            OverrideData::cancellation(event_id, date, scope.owner_id()),
        )
        .await?;

    println!(
        "{}",
        format!("Skipping '{name}' on {}", format_date(date)).green()
    );
    Ok(())
}
