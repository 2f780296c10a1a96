use anyhow::Result;
use owo_colors::OwoColorize;
use weekplan_core::event::EventKind;
use weekplan_core::state::AppState;

use crate::render;

pub fn run(state: &AppState) -> Result<()> {
    if state.events().is_empty() {
        println!(
            "{}",
            "No events yet. Create one with `weekplan add`.".dimmed()
        );
        return Ok(());
    }

    for event in state.events() {
        let name = event.name.color(render::ansi_color(event.color)).to_string();
        let id_tag = format!("({})", event.id);
        println!(
            "  {} {} {}",
            name,
            describe_kind(&event.kind).dimmed(),
            id_tag.dimmed()
        );
        if let Some(description) = &event.description {
            println!("      {}", description.dimmed());
        }
    }

    Ok(())
}

fn describe_kind(kind: &EventKind) -> String {
    match kind {
        EventKind::Single {
            date,
            start_time,
            end_time,
        } => format!(
            "{} {}-{}",
            date.format("%Y-%m-%d"),
            start_time.format("%H:%M"),
            end_time.format("%H:%M")
        ),
        EventKind::Recurring { schedule } => {
            if schedule.is_empty() {
                return "weekly (no slots)".to_string();
            }
            let slots: Vec<String> = schedule
                .iter()
                .map(|slot| {
                    format!(
                        "{} {}-{}",
                        day_name(slot.day_of_week),
                        slot.start_time.format("%H:%M"),
                        slot.end_time.format("%H:%M")
                    )
                })
                .collect();
            format!("weekly: {}", slots.join(", "))
        }
    }
}

fn day_name(day_of_week: u8) -> &'static str {
    match day_of_week {
        0 => "sun",
        1 => "mon",
        2 => "tue",
        3 => "wed",
        4 => "thu",
        5 => "fri",
        6 => "sat",
        _ => "?",
    }
}
