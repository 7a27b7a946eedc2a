/*
 * options.rs
 * Copyright (c) 2026 Posit, PBC
 */

//! Rendering options.
//!
//! [`RenderOptions`] bundles the view modes, truncation policy and formatting
//! switches used by the [`Renderer`](crate::Renderer). Every field has a
//! default, so a TOML document only needs the keys it wants to change:
//!
//! ```toml
//! lines = "around:5"
//! columns = "around:40"
//! trunc = "soft"
//! eof-marker = "<EOF>"
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{WindowError, WindowResult};
use crate::line_reader::MAX_LINES;
use crate::span::TruncMode;
use crate::view::{OddSide, ViewMode};

/// Where the column window is computed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColumnScope {
    /// Once, on the pivot line; every printed line uses the same columns.
    #[default]
    PivotLine,
    /// Separately for every printed line.
    PerLine,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct RenderOptions {
    /// Which lines to print around the pivot line.
    pub lines: ViewMode,
    /// Which bytes of each line to print. `full` prints whole lines.
    pub columns: ViewMode,
    pub scope: ColumnScope,
    pub trunc: TruncMode,
    pub odd_side: OddSide,
    /// Printed where a line was cut.
    pub trunc_marker: String,
    pub line_numbers: bool,
    /// Printed between the line number and the text.
    pub separator: String,
    /// Print `eof_marker` after the last byte of the input.
    pub show_eof: bool,
    pub eof_marker: String,
    pub cursor: bool,
    /// Append a parenthesized description of the byte under the cursor.
    pub cursor_hint: bool,
    /// Describe printable bytes in hints as `'c'`.
    pub hint_printable: bool,
    pub cursor_head: char,
    pub cursor_body: char,
    /// Maximum number of lines collected for one window.
    pub max_lines: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            lines: ViewMode::around(3),
            columns: ViewMode::Full,
            scope: ColumnScope::PivotLine,
            trunc: TruncMode::HardFlex,
            odd_side: OddSide::Right,
            trunc_marker: "..".to_string(),
            line_numbers: true,
            separator: " | ".to_string(),
            show_eof: false,
            eof_marker: "<EOF>".to_string(),
            cursor: true,
            cursor_hint: true,
            hint_printable: false,
            cursor_head: '^',
            cursor_body: '~',
            max_lines: 32,
        }
    }
}

impl RenderOptions {
    /// Parses options from a TOML document and validates them.
    pub fn from_toml_str(source: &str) -> WindowResult<Self> {
        let options: RenderOptions = toml::from_str(source)?;
        options.validate()?;
        Ok(options)
    }

    /// Checks the values serde cannot check on its own.
    pub fn validate(&self) -> WindowResult<()> {
        if self.max_lines == 0 || self.max_lines > MAX_LINES {
            return Err(WindowError::InvalidOptions {
                message: format!("max-lines must be between 1 and {}", MAX_LINES),
            });
        }
        if self.trunc_marker.contains('\n') || self.separator.contains('\n') {
            return Err(WindowError::InvalidOptions {
                message: "markers and separators must fit on one line".to_string(),
            });
        }
        Ok(())
    }
}
