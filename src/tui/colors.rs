//! Color constants for the terminal user interface.

use ratatui::style::Color;

/// Header and status bar in add mode
pub const DARK_GREEN: Color = Color::Rgb(0, 80, 0);
/// Header and status bar in edit mode, and the row being edited
pub const GOLD: Color = Color::Rgb(255, 215, 0);
/// Confirmation and notice dialogs
pub const DARK_RED: Color = Color::Rgb(114, 0, 0);
/// Border of the focused input
pub const DARK_PURPLE: Color = Color::Rgb(86, 60, 92);
