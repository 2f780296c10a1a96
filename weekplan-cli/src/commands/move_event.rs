use anyhow::{Result, anyhow, bail};
use owo_colors::OwoColorize;
use weekplan_core::event_override::OverrideData;
use weekplan_core::state::AppState;
use weekplan_core::store::{EventStore, Scope};
use weekplan_core::time::{format_date, parse_date, parse_time};

pub async fn run(
    state: &mut AppState,
    store: &dyn EventStore,
    scope: &Scope,
    event_id: String,
    date: String,
    from: Option<String>,
    to: Option<String>,
) -> Result<()> {
    let date = parse_date(&date)?;
    let new_start = from.as_deref().map(parse_time).transpose()?;
    let new_end = to.as_deref().map(parse_time).transpose()?;
    if new_start.is_none() && new_end.is_none() {
        bail!("Pass --from and/or --to with the new times");
    }
    if let (Some(start), Some(end)) = (new_start, new_end)
        && start >= end
    {
        bail!("Start time must be before end time");
    }

    let name = {
        let event = state
            .event(&event_id)
            .ok_or_else(|| anyhow!("No event with id {event_id}"))?;
        if !event.is_recurring() {
            bail!("'{}' is a single event; edit it instead", event.name);
        }
        event.name.clone()
    };

    state
        .set_override(
            store,
            OverrideData::reschedule(event_id, date, scope.owner_id(), new_start, new_end),
        )
        .await?;

    println!(
        "{}",
        format!("Moved '{name}' on {}", format_date(date)).green()
    );
    Ok(())
}
