//! ANSI/VT100 control sequences
//!
//! Each function returns the sequence as a string. Nothing is buffered and
//! no terminal state is tracked.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Control sequence introducer
pub const CSI: &str = "\x1b[";

pub const SHOW_CURSOR: &str = "\x1b[?25h";
pub const HIDE_CURSOR: &str = "\x1b[?25l";
pub const ERASE_SCREEN: &str = "\x1b[2J";
/// SGR 0: clear every attribute and color
pub const RESET: &str = "\x1b[0m";

/// Move the cursor to a 1-based `(row, col)`
pub fn cursor_pos(row: u16, col: u16) -> String {
    format!("{}{};{}H", CSI, row, col)
}

/// Set a single graphic rendition attribute by its SGR code
pub fn set_attribute(code: u8) -> String {
    format!("{}{}m", CSI, code)
}

bitflags! {
    /// Text styles that can be combined into one SGR sequence
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct TextStyle: u8 {
        const BOLD = 1 << 0;
        const DIM = 1 << 1;
        const UNDERLINE = 1 << 2;
        const BLINK = 1 << 3;
        const REVERSE = 1 << 4;
        const HIDDEN = 1 << 5;
    }
}

impl TextStyle {
    const SGR_CODES: [(TextStyle, u8); 6] = [
        (TextStyle::BOLD, 1),
        (TextStyle::DIM, 2),
        (TextStyle::UNDERLINE, 4),
        (TextStyle::BLINK, 5),
        (TextStyle::REVERSE, 7),
        (TextStyle::HIDDEN, 8),
    ];

    /// SGR codes for the set flags, lowest code first
    pub fn sgr_codes(self) -> Vec<u8> {
        Self::SGR_CODES
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, code)| *code)
            .collect()
    }
}

/// Apply a combined style; an empty set resets all attributes
pub fn set_style(style: TextStyle) -> String {
    let codes = style.sgr_codes();
    if codes.is_empty() {
        return RESET.to_string();
    }
    let joined: Vec<String> = codes.iter().map(|c| c.to_string()).collect();
    format!("{}{}m", CSI, joined.join(";"))
}

/// The eight standard terminal colors
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TermColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    #[default]
    White,
}

impl TermColor {
    /// SGR foreground code (30..=37)
    pub fn fg_code(self) -> u8 {
        30 + self as u8
    }

    /// SGR background code (40..=47)
    pub fn bg_code(self) -> u8 {
        40 + self as u8
    }
}

pub fn foreground(color: TermColor) -> String {
    set_attribute(color.fg_code())
}

pub fn background(color: TermColor) -> String {
    set_attribute(color.bg_code())
}
