use anyhow::{Context, Result, bail};
use owo_colors::OwoColorize;
use weekplan_core::event::{Color, EventKind, NewEvent, ScheduleSlot};
use weekplan_core::state::AppState;
use weekplan_core::store::{EventStore, Scope};
use weekplan_core::time::{parse_date, parse_time};

#[allow(clippy::too_many_arguments)]
pub async fn run(
    state: &mut AppState,
    store: &dyn EventStore,
    scope: &Scope,
    name: String,
    date: Option<String>,
    from: Option<String>,
    to: Option<String>,
    weekly: Option<String>,
    color: String,
    desc: Option<String>,
) -> Result<()> {
    if name.trim().is_empty() {
        bail!("Event name must not be empty");
    }
    let color: Color = color.parse().map_err(|e| anyhow::anyhow!("{e}"))?;

    let kind = match weekly {
        Some(spec) => EventKind::Recurring {
            schedule: parse_weekly_spec(&spec)?,
        },
        None => {
            let date = date.context("--date is required unless --weekly is given")?;
            let from = from.context("--from is required for single events")?;
            let to = to.context("--to is required for single events")?;

            let start_time = parse_time(&from)?;
            let end_time = parse_time(&to)?;
            if start_time >= end_time {
                bail!("Start time must be before end time");
            }

            EventKind::Single {
                date: parse_date(&date)?,
                start_time,
                end_time,
            }
        }
    };

    let id = state
        .add_event(
            store,
            NewEvent {
                name: name.clone(),
                description: desc,
                color,
                owner_id: scope.owner_id().to_string(),
                kind,
            },
        )
        .await?;

    println!("{}", format!("Created '{name}' ({id})").green());
    Ok(())
}

/// Parse a weekly spec like "mon=09:00-10:00,thu=14:00-15:30". The same day
/// may appear more than once for multiple sessions.
fn parse_weekly_spec(spec: &str) -> Result<Vec<ScheduleSlot>> {
    let mut schedule = Vec::new();

    for part in spec.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (day, times) = part
            .split_once('=')
            .with_context(|| format!("Expected day=HH:mm-HH:mm, got '{part}'"))?;
        let (start, end) = times
            .split_once('-')
            .with_context(|| format!("Expected HH:mm-HH:mm, got '{times}'"))?;

        let start_time = parse_time(start)?;
        let end_time = parse_time(end)?;
        if start_time >= end_time {
            bail!("Start time must be before end time in '{part}'");
        }

        schedule.push(ScheduleSlot {
            day_of_week: parse_day(day)?,
            start_time,
            end_time,
        });
    }

    if schedule.is_empty() {
        bail!("--weekly needs at least one day=HH:mm-HH:mm slot");
    }
    Ok(schedule)
}

fn parse_day(s: &str) -> Result<u8> {
    let day = match s.to_lowercase().as_str() {
        "sun" | "sunday" => 0,
        "mon" | "monday" => 1,
        "tue" | "tuesday" => 2,
        "wed" | "wednesday" => 3,
        "thu" | "thursday" => 4,
        "fri" | "friday" => 5,
        "sat" | "saturday" => 6,
        _ => bail!("Unknown day '{s}'. Use sun, mon, tue, wed, thu, fri, or sat"),
    };
    Ok(day)
}
