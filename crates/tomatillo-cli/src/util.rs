use std::io::IsTerminal;

use chrono::{Duration, Local, NaiveDate, NaiveDateTime};
use owo_colors::Style;

pub const ESTIMATE_GLYPH: &str = "🌱";
pub const ACTUAL_GLYPH: &str = "🍅";

/// Local wall-clock time; tracking keys are taken in local time.
pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

pub fn today() -> NaiveDate {
    local_now().date()
}

/// `glyph` repeated `count` times; non-positive counts render empty.
pub fn repeat_glyph(glyph: &str, count: i64) -> String {
    glyph.repeat(count.max(0) as usize)
}

/// First creation date included by a `--days N` window ending today.
///
/// `0` means no window, as does a window reaching past the earliest
/// representable date.
pub fn list_since(days: u32, today: NaiveDate) -> Option<NaiveDate> {
    match days {
        0 => None,
        n => today.checked_sub_signed(Duration::days(i64::from(n) - 1)),
    }
}

/// Whether a confirmation prompt can be shown.
pub fn is_interactive() -> bool {
    std::io::stdin().is_terminal()
}

/// Terminal styles for command feedback; all plain when colour is off.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub success: Style,
    pub info: Style,
    pub subtle: Style,
    pub highlight: Style,
    pub error: Style,
}

impl Palette {
    pub fn new(color: bool) -> Self {
        if !color {
            return Self {
                success: Style::new(),
                info: Style::new(),
                subtle: Style::new(),
                highlight: Style::new(),
                error: Style::new(),
            };
        }
        Self {
            success: Style::new().green().bold(),
            info: Style::new().blue(),
            subtle: Style::new().bright_black(),
            highlight: Style::new().yellow(),
            error: Style::new().red().bold(),
        }
    }
}
