use anyhow::Result;
use chrono::Local;
use owo_colors::OwoColorize;
use weekplan_core::state::AppState;
use weekplan_core::timeline::{daily_occurrences, is_occurring_now};

use crate::render;

pub fn run(state: &AppState) -> Result<()> {
    let now = Local::now().naive_local();
    let today = now.date();

    println!("{}", today.format("%A, %b %-d").to_string().bold());

    let occurrences = daily_occurrences(state.events(), state.overrides(), today);
    if occurrences.is_empty() {
        println!("{}", "No reminders for today".dimmed());
        return Ok(());
    }

    for occurrence in &occurrences {
        let times = format!(
            "{}-{}",
            occurrence.start_time.format("%H:%M"),
            occurrence.end_time.format("%H:%M")
        );
        let name = occurrence
            .event_name
            .color(render::ansi_color(occurrence.color))
            .to_string();

        if is_occurring_now(occurrence, now) {
            println!("  {times}  {name} {}", "● now".green());
        } else {
            println!("  {times}  {name}");
        }
    }

    Ok(())
}
