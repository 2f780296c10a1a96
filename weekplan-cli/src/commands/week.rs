use anyhow::Result;
use chrono::Local;
use owo_colors::OwoColorize;
use weekplan_core::state::AppState;
use weekplan_core::time::{parse_date, week_window};
use weekplan_core::timeline::build_timeline;

use crate::render;

pub fn run(state: &AppState, date: Option<&str>) -> Result<()> {
    let today = Local::now().date_naive();
    let reference = match date {
        Some(s) => parse_date(s)?,
        None => today,
    };

    let (week_start, week_end) = week_window(reference);
    let timeline = build_timeline(state.events(), state.overrides(), week_start, week_end);

    println!(
        "{}",
        format!(
            "Week of {} .. {}",
            week_start.format("%b %-d"),
            week_end.format("%b %-d, %Y")
        )
        .bold()
    );
    println!();
    println!("{}", render::week_grid(week_start, &timeline, today));

    if timeline.is_empty() {
        println!();
        println!("{}", "Nothing planned this week".dimmed());
    }

    Ok(())
}
