/*
 * render.rs
 * Copyright (c) 2026 Posit, PBC
 */

//! Text rendering of source windows.
//!
//! Output layout, one source line per output line:
//!
//! ```text
//!  9 | let x = 1;
//! 10 | let y = x +;
//!                  ^ (newline)
//! 11 | let z = y;
//! ```
//!
//! Lines cut by the column window get the truncation marker on the cut side.
//! A line that lies entirely outside the column window is printed as the
//! marker alone. The cursor line goes right below the pivot line.

use std::io::Write;

use memchr::memchr_iter;
use tracing::debug;

use crate::error::WindowResult;
use crate::interval::decimal_width;
use crate::line_reader::{Line, ReadLines, read_lines};
use crate::options::{ColumnScope, RenderOptions};
use crate::span::{Pivot, Range, Window};
use crate::view::{ViewMode, view_window};

/// Describes the byte under a cursor at `index`.
///
/// Returns `None` for bytes without a useful description.
pub fn cursor_hint(input: &[u8], index: usize, escape_printable: bool) -> Option<String> {
    match input.get(index) {
        None => Some("end of string".to_string()),
        Some(b'\n') => Some("newline".to_string()),
        Some(b' ') => Some("space".to_string()),
        Some(byte) if escape_printable && byte.is_ascii_graphic() => {
            Some(format!("'{}'", byte.escape_ascii()))
        }
        Some(_) => None,
    }
}

/// 1-based number of the line starting at or containing `pos`.
pub fn line_number_at(input: &[u8], pos: usize) -> usize {
    let pos = pos.min(input.len());
    memchr_iter(b'\n', &input[..pos]).count() + 1
}

/// The part of `pivot` that falls on `line`, relative to the line start.
///
/// The newline position (`line.end`) counts as part of the line.
fn local_pivot(line: Range, pivot: Pivot) -> Option<Pivot> {
    let first = pivot.start().max(line.start);
    let last = pivot.last().min(line.end);
    if first > last {
        return None;
    }
    let local = Range::new(first, last).relative_to(line.start);
    Some(Pivot::range(local.start, local.end))
}

/// Number of the first collected line.
///
/// `line_number` is the number of the line holding `pivot`; when `None` the
/// lines are counted from the input. The pivot line need not be among the
/// collected lines.
pub fn first_line_number<const N: usize>(
    read: &ReadLines<'_, '_, N>,
    pivot: Pivot,
    line_number: Option<usize>,
) -> usize {
    let Some(first_line) = read.line(0) else {
        return line_number.unwrap_or(1);
    };
    let counted = line_number_at(read.input(), first_line.range.start);
    match (line_number, read.curr_line_pos) {
        (None, _) => counted,
        (Some(number), Some(pos)) => number.saturating_sub(pos),
        (Some(number), None) => {
            let pivot_counted = line_number_at(read.input(), pivot.start());
            if counted <= pivot_counted {
                number.saturating_sub(pivot_counted - counted)
            } else {
                number.saturating_add(counted - pivot_counted)
            }
        }
    }
}

/// Formats source windows according to a set of [`RenderOptions`].
#[derive(Debug, Clone, Copy)]
pub struct Renderer<'o> {
    options: &'o RenderOptions,
}

impl<'o> Renderer<'o> {
    pub fn new(options: &'o RenderOptions) -> Self {
        Renderer { options }
    }

    pub fn options(&self) -> &'o RenderOptions {
        self.options
    }

    /// Renders the window around byte `index`.
    ///
    /// `line_number` is the number of the line holding `index`; when `None`
    /// it is counted from the input.
    pub fn render_index<W: Write>(
        &self,
        out: &mut W,
        input: &[u8],
        index: usize,
        line_number: Option<usize>,
    ) -> WindowResult<()> {
        self.render(out, input, Pivot::Index(index), line_number)
    }

    /// Renders the window around the inclusive byte range between `a` and
    /// `b`, given in any order.
    pub fn render_range<W: Write>(
        &self,
        out: &mut W,
        input: &[u8],
        a: usize,
        b: usize,
        line_number: Option<usize>,
    ) -> WindowResult<()> {
        self.render(out, input, Pivot::range(a, b), line_number)
    }

    /// Collects the lines around `pivot` and renders them.
    ///
    /// Writes nothing when there is no view or the pivot lies past the end
    /// of the input. A line buffer overflow is returned as an error before
    /// anything is written.
    pub fn render<W: Write>(
        &self,
        out: &mut W,
        input: &[u8],
        pivot: Pivot,
        line_number: Option<usize>,
    ) -> WindowResult<()> {
        let options = self.options;
        let Some(read) = read_lines(
            input,
            pivot,
            options.lines,
            options.odd_side,
            options.max_lines,
        )?
        else {
            debug!(mode = %options.lines, "no line view");
            return Ok(());
        };
        self.render_lines(out, &read, pivot, line_number)
    }

    /// Renders into a string, replacing invalid UTF-8.
    pub fn render_to_string(
        &self,
        input: &[u8],
        pivot: Pivot,
        line_number: Option<usize>,
    ) -> WindowResult<String> {
        let mut out = Vec::new();
        self.render(&mut out, input, pivot, line_number)?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    /// Renders lines that were already collected for `pivot`.
    pub fn render_lines<W: Write, const N: usize>(
        &self,
        out: &mut W,
        read: &ReadLines<'_, '_, N>,
        pivot: Pivot,
        line_number: Option<usize>,
    ) -> WindowResult<()> {
        let Some(first_line) = read.line(0) else {
            return Ok(());
        };
        let options = self.options;

        let first_number = first_line_number(read, pivot, line_number);
        let last_number = first_number.saturating_add(read.len() - 1);
        let number_width = decimal_width(last_number);

        // Column window of the pivot line, shared by every line unless
        // columns are computed per line.
        let pivot_line = read.current_line().unwrap_or(first_line);
        let pivot_columns = match self.columns_for(pivot_line, pivot, read.index_pos) {
            Some(window) => window,
            None => {
                debug!(mode = %options.columns, "no column view");
                return Ok(());
            }
        };

        debug!(
            lines = read.len(),
            first_number,
            columns = ?pivot_columns.range,
            "rendering source window"
        );

        for (i, line) in read.lines().enumerate() {
            let is_pivot_line = read.curr_line_pos == Some(i);
            let columns = if is_pivot_line || options.scope == ColumnScope::PivotLine {
                Some(pivot_columns)
            } else {
                self.columns_for(line, pivot, read.index_pos)
            };

            if options.line_numbers {
                write!(
                    out,
                    "{:>width$}{}",
                    first_number + i,
                    options.separator,
                    width = number_width
                )?;
            }
            let leading_marker =
                self.write_content(out, line, columns.map(|w| w.range), read.input())?;
            out.write_all(b"\n")?;

            if is_pivot_line && options.cursor {
                self.write_cursor(
                    out,
                    read,
                    line,
                    pivot,
                    pivot_columns,
                    leading_marker,
                    number_width,
                )?;
            }
        }
        Ok(())
    }

    fn columns_for(&self, line: Line<'_>, pivot: Pivot, pivot_col: usize) -> Option<Window> {
        let options = self.options;
        let local = local_pivot(line.range, pivot).unwrap_or(Pivot::Index(pivot_col));
        view_window(
            options.columns,
            local,
            Range::new(0, line.len()),
            options.trunc,
            options.odd_side,
        )
    }

    /// Writes the visible part of `line`. Returns `true` when a leading
    /// truncation marker was written.
    ///
    /// `columns` is relative to the line start; `None` skips the line.
    fn write_content<W: Write>(
        &self,
        out: &mut W,
        line: Line<'_>,
        columns: Option<Range>,
        input: &[u8],
    ) -> WindowResult<bool> {
        let options = self.options;
        let marker = options.trunc_marker.as_bytes();
        let eof = options.show_eof && line.range.end >= input.len();
        let eof_marker = options.eof_marker.as_bytes();
        let len = line.len();

        let Some(columns) = columns else {
            out.write_all(marker)?;
            return Ok(false);
        };

        if options.columns == ViewMode::Full || len == 0 {
            out.write_all(line.text)?;
            if eof {
                out.write_all(eof_marker)?;
            }
            return Ok(false);
        }

        if columns.start > len {
            out.write_all(marker)?;
            return Ok(false);
        }

        let leading = columns.start > 0;
        if leading {
            out.write_all(marker)?;
        }
        out.write_all(&line.text[columns.start..columns.end.min(len)])?;
        if columns.end < len {
            out.write_all(marker)?;
        } else if eof {
            out.write_all(eof_marker)?;
        }
        Ok(leading)
    }

    fn write_cursor<W: Write, const N: usize>(
        &self,
        out: &mut W,
        read: &ReadLines<'_, '_, N>,
        line: Line<'_>,
        pivot: Pivot,
        columns: Window,
        leading_marker: bool,
        number_width: usize,
    ) -> WindowResult<()> {
        let options = self.options;
        let columns = if options.columns == ViewMode::Full {
            Range::new(0, line.len())
        } else {
            columns.range
        };
        let col = read.index_pos;
        if !columns.contains_inclusive(col) {
            return Ok(());
        }

        let mut pad = col - columns.start;
        if leading_marker {
            pad += options.trunc_marker.chars().count();
        }
        if options.line_numbers {
            pad += number_width + options.separator.chars().count();
        }

        let mut cursor = String::new();
        cursor.push(options.cursor_head);
        if let Pivot::Range { end, .. } = pivot {
            let tail = end.saturating_sub(line.range.start);
            // The newline position is visible when the window reaches
            // the end of the line.
            let visible_end = if columns.end >= line.len() {
                line.len() + 1
            } else {
                columns.end
            };
            if tail < visible_end {
                if tail > col {
                    cursor.extend(std::iter::repeat_n(options.cursor_body, tail - col - 1));
                    cursor.push(options.cursor_head);
                }
            } else {
                let body = visible_end.saturating_sub(col + 1);
                cursor.extend(std::iter::repeat_n(options.cursor_body, body));
            }
        }

        // The hint describes the byte under the first head.
        let hint = options
            .cursor_hint
            .then(|| cursor_hint(read.input(), pivot.start(), options.hint_printable))
            .flatten();
        if let Some(hint) = hint {
            cursor.push_str(&format!(" ({})", hint));
        }

        writeln!(out, "{:pad$}{}", "", cursor, pad = pad)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn plain() -> RenderOptions {
        RenderOptions {
            line_numbers: false,
            cursor: false,
            ..RenderOptions::default()
        }
    }

    fn render(options: &RenderOptions, input: &str, pivot: Pivot) -> String {
        Renderer::new(options)
            .render_to_string(input.as_bytes(), pivot, None)
            .unwrap()
    }

    #[test]
    fn test_cursor_hints() {
        let input = b"a b\n\x01";
        assert_eq!(cursor_hint(input, 0, false), None);
        assert_eq!(cursor_hint(input, 0, true), Some("'a'".to_string()));
        assert_eq!(cursor_hint(input, 1, false), Some("space".to_string()));
        assert_eq!(cursor_hint(input, 3, false), Some("newline".to_string()));
        assert_eq!(cursor_hint(input, 4, true), None);
        assert_eq!(cursor_hint(input, 5, false), Some("end of string".to_string()));
        assert_eq!(cursor_hint(b"'", 0, true), Some("'\\''".to_string()));
    }

    #[test]
    fn test_line_number_at() {
        let input = b"a\nb\nc";
        assert_eq!(line_number_at(input, 0), 1);
        assert_eq!(line_number_at(input, 2), 2);
        assert_eq!(line_number_at(input, 4), 3);
        assert_eq!(line_number_at(input, 99), 3);
    }

    #[test]
    fn test_local_pivot() {
        let line = Range::new(6, 11);
        assert_eq!(local_pivot(line, Pivot::Index(8)), Some(Pivot::Index(2)));
        assert_eq!(local_pivot(line, Pivot::Index(11)), Some(Pivot::Index(5)));
        assert_eq!(local_pivot(line, Pivot::Index(3)), None);
        assert_eq!(
            local_pivot(line, Pivot::range(2, 8)),
            Some(Pivot::Range { start: 0, end: 2 })
        );
    }

    #[test]
    fn test_empty_input_with_eof_marker() {
        let options = RenderOptions {
            show_eof: true,
            ..plain()
        };
        assert_eq!(render(&options, "", Pivot::Index(0)), "<EOF>\n");
    }

    #[test]
    fn test_out_of_bounds_pivot_renders_nothing() {
        let options = RenderOptions {
            lines: ViewMode::right(1),
            ..RenderOptions::default()
        };
        assert_eq!(render(&options, "hello", Pivot::Index(100)), "");
    }

    #[test]
    fn test_skipped_line_marker() {
        let options = RenderOptions {
            columns: ViewMode::around(3),
            ..plain()
        };
        // Pivot on the 'i' of "line": columns 5..8 on every line.
        let out = render(&options, "ab\nlong line here", Pivot::Index(9));
        assert_eq!(out, "..\n..lin..\n");
    }
}
