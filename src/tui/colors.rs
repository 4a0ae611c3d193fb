//! Color constants for the terminal user interface.

use ratatui::style::Color;

/// Background of the delete confirmation dialog.
pub const DARK_RED: Color = Color::Rgb(114, 0, 0);
/// Priority 2
pub const ORANGE: Color = Color::Rgb(255, 140, 0);
/// Priority 3
pub const GOLD: Color = Color::Rgb(255, 215, 0);

/// Row colour for a priority on the suggested 1-5 scale.
pub fn priority_color(priority: i32) -> Color {
    match priority {
        1 => Color::Red,
        2 => ORANGE,
        3 => GOLD,
        4 => Color::Blue,
        5 => Color::Green,
        _ => Color::Gray,
    }
}
