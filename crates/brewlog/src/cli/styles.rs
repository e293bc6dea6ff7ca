//! Terminal styles for the brewlog CLI.
//!
//! Renderers refer to styles by what the text means (an index, a date, a
//! warning), never by color, so the palette can change in one place. `console`
//! drops the escape codes when stdout is not a terminal.

use console::Style;
use once_cell::sync::Lazy;

pub struct Styles {
    pub title: Style,
    pub index: Style,
    pub muted: Style,
    pub date: Style,
    pub quantity: Style,
    pub finished: Style,
    pub info: Style,
    pub success: Style,
    pub warning: Style,
}

pub static STYLES: Lazy<Styles> = Lazy::new(|| {
    let muted = Style::new().color256(246);
    Styles {
        title: Style::new().bold(),
        index: Style::new().yellow(),
        date: Style::new().cyan(),
        quantity: Style::new().bold(),
        finished: Style::new().green(),
        info: muted.clone(),
        success: Style::new().green(),
        warning: Style::new().yellow().bold(),
        muted,
    }
});
