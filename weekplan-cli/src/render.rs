//! Terminal rendering for the weekly grid.

use chrono::{Duration, NaiveDate};
use owo_colors::{AnsiColors, OwoColorize};
use weekplan_core::event::Color;
use weekplan_core::occurrence::Occurrence;
use weekplan_core::time::time_to_minutes;
use weekplan_core::timeline::visible_hour_range;

const CELL_WIDTH: usize = 15;

/// Map a palette token to a terminal color.
pub fn ansi_color(color: Color) -> AnsiColors {
    match color {
        Color::Red => AnsiColors::Red,
        Color::Orange => AnsiColors::BrightYellow,
        Color::Yellow => AnsiColors::Yellow,
        Color::Green => AnsiColors::Green,
        Color::Teal => AnsiColors::Cyan,
        Color::Blue => AnsiColors::Blue,
        Color::Purple => AnsiColors::Magenta,
        Color::Pink => AnsiColors::BrightMagenta,
    }
}

/// Render the week as an hours-by-days grid.
///
/// The vertical extent comes from `visible_hour_range`, so the grid grows and
/// shrinks with the week's occurrences. An occurrence labels the cell of the
/// hour it starts in; hours it runs through get a continuation mark.
pub fn week_grid(week_start: NaiveDate, occurrences: &[Occurrence], today: NaiveDate) -> String {
    let (start_hour, end_hour) = visible_hour_range(occurrences);
    let days: Vec<NaiveDate> = (0..7).map(|i| week_start + Duration::days(i)).collect();

    let mut lines = Vec::new();

    let mut header = " ".repeat(7);
    for day in &days {
        let label = format!("{:<width$}", day.format("%a %-d").to_string(), width = CELL_WIDTH);
        if *day == today {
            header.push_str(&label.bold().to_string());
        } else {
            header.push_str(&label);
        }
    }
    lines.push(header.trim_end().to_string());

    for hour in start_hour..end_hour {
        let mut line = format!("{:>5}  ", format!("{hour:02}:00"));
        for day in &days {
            line.push_str(&cell(*day, hour, occurrences));
        }
        lines.push(line.trim_end().to_string());
    }

    lines.join("\n")
}

/// One grid cell. The first occurrence starting in this hour labels it; an
/// occurrence already running through it leaves a continuation mark.
fn cell(day: NaiveDate, hour: u32, occurrences: &[Occurrence]) -> String {
    let hour_start = hour * 60;
    let hour_end = hour_start + 60;

    let mut label: Option<(String, Color)> = None;
    let mut running: Option<Color> = None;

    for occurrence in occurrences.iter().filter(|o| o.date == day) {
        let start = time_to_minutes(occurrence.start_time);
        let end = time_to_minutes(occurrence.end_time);

        if start >= hour_start && start < hour_end {
            if label.is_none() {
                label = Some((
                    format!(
                        "{} {}",
                        occurrence.start_time.format("%H:%M"),
                        occurrence.event_name
                    ),
                    occurrence.color,
                ));
            }
        } else if start < hour_start && hour_start < end {
            running.get_or_insert(occurrence.color);
        }
    }

    match (label, running) {
        (Some((text, color)), _) => {
            let text = truncate(&text, CELL_WIDTH - 1);
            let padding = CELL_WIDTH - text.chars().count();
            format!(
                "{}{}",
                text.color(ansi_color(color)),
                " ".repeat(padding)
            )
        }
        (None, Some(color)) => {
            format!("{}{}", "│".color(ansi_color(color)), " ".repeat(CELL_WIDTH - 1))
        }
        (None, None) => " ".repeat(CELL_WIDTH),
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut truncated: String = s.chars().take(max.saturating_sub(1)).collect();
        truncated.push('…');
        truncated
    }
}
