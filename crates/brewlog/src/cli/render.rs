//! # Rendering
//!
//! Turns a [`CmdResult`] into text. The command picks the [`View`]; the result
//! carries the data. Messages always come last, one per line.

use super::styles::STYLES;
use brewlogapp::calendar::CalendarEntry;
use brewlogapp::commands::{CmdMessage, CmdResult, MessageLevel};
use brewlogapp::model::{Batch, VolumeUnit};
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// One line per batch
    List,
    /// A batch with its stages
    Detail,
    /// Calendar entries for one day
    Day,
    /// Days that have stages
    MarkedDates,
    /// The preferred volume unit
    Unit,
    /// Only the messages
    Messages,
}

pub fn render(view: View, result: &CmdResult, unit: VolumeUnit) -> String {
    let mut out = String::new();
    match view {
        View::List => render_list(&mut out, &result.batches, unit),
        View::Detail => {
            for batch in &result.batches {
                render_detail(&mut out, batch, unit);
            }
        }
        View::Day => render_day(&mut out, &result.calendar),
        View::MarkedDates => {
            for date in &result.marked_dates {
                let _ = writeln!(out, "{}", STYLES.date.apply_to(date));
            }
        }
        View::Unit => {
            if let Some(unit) = result.unit {
                let _ = writeln!(out, "{} ({})", unit.label(), unit);
            }
        }
        View::Messages => {}
    }
    render_messages(&mut out, &result.messages);
    out
}

fn format_quantity(quantity: f64, unit: VolumeUnit) -> String {
    format!("{} {}", quantity, unit)
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{} {}", count, word)
    } else {
        format!("{} {}s", count, word)
    }
}

fn render_list(out: &mut String, batches: &[Batch], unit: VolumeUnit) {
    let name_width = batches
        .iter()
        .map(|b| b.name.chars().count())
        .max()
        .unwrap_or(0);

    for (i, batch) in batches.iter().enumerate() {
        let _ = writeln!(
            out,
            "{} {}  {}  {}  {}",
            STYLES.index.apply_to(format!("{:>3}.", i + 1)),
            STYLES.title.apply_to(format!("{:<width$}", batch.name, width = name_width)),
            STYLES
                .quantity
                .apply_to(format!("{:>8}", format_quantity(batch.quantity, unit))),
            STYLES.date.apply_to(batch.created_at),
            STYLES.muted.apply_to(plural(batch.stages.len(), "stage")),
        );
    }
}

fn render_detail(out: &mut String, batch: &Batch, unit: VolumeUnit) {
    let _ = write!(out, "{}", STYLES.title.apply_to(&batch.name));
    if batch.is_finished {
        let _ = write!(out, "  {}", STYLES.finished.apply_to("finished"));
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "  {}  {}", STYLES.muted.apply_to("id      "), batch.id);
    let _ = writeln!(
        out,
        "  {}  {}",
        STYLES.muted.apply_to("quantity"),
        STYLES.quantity.apply_to(format_quantity(batch.quantity, unit))
    );
    let _ = writeln!(
        out,
        "  {}  {}",
        STYLES.muted.apply_to("created "),
        STYLES.date.apply_to(batch.created_at)
    );
    if let Some(description) = &batch.description {
        let _ = writeln!(out, "  {}  {}", STYLES.muted.apply_to("notes   "), description);
    }

    if !batch.stages.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", STYLES.title.apply_to("Stages"));
        for (i, stage) in batch.stages.iter().enumerate() {
            let _ = writeln!(
                out,
                "{} {}  {}  {}",
                STYLES.index.apply_to(format!("{:>3}.", i + 1)),
                STYLES.date.apply_to(stage.date),
                stage.description,
                STYLES.muted.apply_to(format!("#{}", stage.id)),
            );
        }
    }
}

fn render_day(out: &mut String, entries: &[CalendarEntry]) {
    for entry in entries {
        let _ = writeln!(
            out,
            "{}  {}  {}",
            STYLES.date.apply_to(entry.stage.date),
            STYLES.title.apply_to(&entry.batch_name),
            entry.stage.description,
        );
    }
}

fn render_messages(out: &mut String, messages: &[CmdMessage]) {
    for message in messages {
        let style = match message.level {
            MessageLevel::Info => &STYLES.info,
            MessageLevel::Success => &STYLES.success,
            MessageLevel::Warning => &STYLES.warning,
        };
        let _ = writeln!(out, "{}", style.apply_to(&message.content));
    }
}
