/*
 * line_reader.rs
 * Copyright (c) 2026 Posit, PBC
 */

//! Bidirectional line reader.
//!
//! A [`LineReader`] is a one-shot session over a byte buffer. `start` and
//! `end` delimit the line currently under construction; seeking moves them to
//! newline boundaries and [`LineReader::push_line`] records the current line in
//! a [`BoundedStack`]. Lines are stored as absolute [`Range`]s with the
//! terminating newline excluded, so they stay valid views into the input.
//!
//! The composite [`LineReader::seek_and_push_line_range`] collects a window of
//! lines around a pivot: it walks backward first, reverses what it collected
//! so the lines are in reading order, then walks forward.

use memchr::{memchr, memchr_iter, memrchr};
use tracing::trace;

use crate::bounded::BoundedStack;
use crate::error::CapacityError;
use crate::span::{Pivot, Range};
use crate::view::{OddSide, ViewMode};

/// Inline line capacity of readers built with [`LineReader::new`].
pub const DEFAULT_LINE_CAPACITY: usize = 64;

/// Largest inline line buffer used by [`read_lines`].
pub const MAX_LINES: usize = 256;

/// Seek direction: `Left` walks toward the buffer start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

/// A collected line: its absolute range and its bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    pub range: Range,
    pub text: &'a [u8],
}

impl Line<'_> {
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Cursor session producing one window of lines.
#[derive(Debug)]
pub struct LineReader<'a, 's, const N: usize> {
    input: &'a [u8],
    /// Start of the current line.
    pub start: usize,
    /// End of the current line (exclusive, points at the newline if any).
    pub end: usize,
    lines: BoundedStack<'s, Range, N>,
}

impl<'a> LineReader<'a, 'static, DEFAULT_LINE_CAPACITY> {
    /// Reader positioned at `pos`, collecting into inline storage.
    pub fn new(input: &'a [u8], pos: usize) -> Self {
        Self::with_stack(input, pos, BoundedStack::inline())
    }

    /// Like [`new`](Self::new) but holding at most `limit` lines, capped at
    /// [`DEFAULT_LINE_CAPACITY`].
    pub fn with_capacity(input: &'a [u8], pos: usize, limit: usize) -> Self {
        Self::with_stack(input, pos, BoundedStack::inline_with_limit(limit))
    }
}

impl<'a, 's> LineReader<'a, 's, 0> {
    /// Reader positioned at `pos`, collecting into a caller-supplied buffer.
    pub fn with_buffer(input: &'a [u8], pos: usize, buffer: &'s mut [Range]) -> Self {
        Self::with_stack(input, pos, BoundedStack::from_slice(buffer))
    }
}

impl<'a, 's, const N: usize> LineReader<'a, 's, N> {
    /// Reader positioned at `pos`, collecting into `lines`.
    pub fn with_stack(input: &'a [u8], pos: usize, lines: BoundedStack<'s, Range, N>) -> Self {
        LineReader {
            input,
            start: pos,
            end: pos,
            lines,
        }
    }

    pub fn input(&self) -> &'a [u8] {
        self.input
    }

    /// The line under construction.
    pub fn current(&self) -> Range {
        Range::new(self.start, self.end)
    }

    /// Lines pushed so far, in push order.
    pub fn lines(&self) -> &[Range] {
        self.lines.as_slice()
    }

    /// Moves `start` back to the beginning of its line.
    pub fn seek_line_start(&mut self) {
        self.seek_line_start_until(0);
    }

    /// Like [`seek_line_start`](Self::seek_line_start) but never moves
    /// before `bound`, which acts as a line boundary.
    pub fn seek_line_start_until(&mut self, bound: usize) {
        let from = self.start.min(self.input.len());
        let bound = bound.min(from);
        self.start = match memrchr(b'\n', &self.input[bound..from]) {
            Some(i) => bound + i + 1,
            None => bound,
        };
    }

    /// Moves `end` forward to the newline terminating its line, or to the
    /// end of the input.
    pub fn seek_line_end(&mut self) {
        self.seek_line_end_until(self.input.len());
    }

    /// Like [`seek_line_end`](Self::seek_line_end) but never moves past
    /// `bound`, which acts as a line boundary.
    pub fn seek_line_end_until(&mut self, bound: usize) {
        let from = self.end.min(self.input.len());
        let bound = bound.clamp(from, self.input.len());
        self.end = match memchr(b'\n', &self.input[from..bound]) {
            Some(i) => from + i,
            None => bound,
        };
    }

    /// Expands the current position to the whole line containing it.
    pub fn seek_line(&mut self) {
        self.seek_line_start();
        self.seek_line_end();
    }

    /// Moves to the previous line. Returns `false` at the start of the input.
    pub fn seek_prev_line(&mut self) -> bool {
        if self.start == 0 || self.start > self.input.len() {
            return false;
        }
        self.end = self.start - 1;
        self.start = self.end;
        self.seek_line_start();
        true
    }

    /// Moves to the next line. Returns `false` at the end of the input.
    pub fn seek_next_line(&mut self) -> bool {
        if self.end >= self.input.len() {
            return false;
        }
        self.start = self.end + 1;
        self.end = self.start;
        self.seek_line_end();
        true
    }

    /// Records the current line.
    pub fn push_line(&mut self) -> Result<(), CapacityError> {
        let line = self.current();
        self.lines.push(line)?;
        trace!(start = line.start, end = line.end, "pushed line");
        Ok(())
    }

    /// Steps and pushes up to `amount` lines in `dir`, stopping early at a
    /// buffer edge. Returns how many lines were pushed.
    ///
    /// On a capacity error the lines pushed before the failure stay in the
    /// reader.
    pub fn seek_and_push_lines(
        &mut self,
        dir: Direction,
        amount: usize,
    ) -> Result<usize, CapacityError> {
        let mut pushed = 0;
        while pushed < amount {
            let moved = match dir {
                Direction::Left => self.seek_prev_line(),
                Direction::Right => self.seek_next_line(),
            };
            if !moved {
                break;
            }
            self.push_line()?;
            pushed += 1;
        }
        Ok(pushed)
    }

    /// Collects the lines selected by `mode` around `pivot` and returns the
    /// position of the pivot line among them.
    ///
    /// Relative modes see the pivot as one line wide, or as the number of
    /// lines a range pivot touches. Absolute modes select lines from the
    /// buffer edges (`Start(n)` the first `n`, `End(n)` the last `n`, `Full`
    /// all), and the pivot line position is `None` when it falls outside them.
    ///
    /// Returns `Ok(None)` when the mode's padding constraint cannot be met or
    /// the pivot lies past the end of the input. Resets `start`/`end` to the
    /// pivot first.
    pub fn seek_and_push_line_range(
        &mut self,
        pivot: Pivot,
        mode: ViewMode,
        odd: OddSide,
    ) -> Result<Option<usize>, CapacityError> {
        let len = self.input.len();
        let first = pivot.start();
        if first > len {
            return Ok(None);
        }
        let base = self.lines.len();

        if mode.is_absolute() {
            self.push_edge_lines(mode)?;
            let pos = self.lines.as_slice()[base..]
                .iter()
                .position(|line| line.contains_inclusive(first))
                .map(|i| base + i);
            return Ok(pos);
        }

        let last = pivot.last().min(len);
        let width = memchr_iter(b'\n', &self.input[first..last]).count() + 1;
        let Some(span) = mode.span(width, odd) else {
            return Ok(None);
        };
        let before = span.left;
        let after = span.right.saturating_sub(width);
        trace!(first, width, before, after, "collecting line range");

        self.start = first;
        self.end = first;
        self.seek_line();
        let pivot_line = self.current();
        self.push_line()?;
        let pushed_before = self.seek_and_push_lines(Direction::Left, before)?;
        self.lines.as_mut_slice()[base..].reverse();

        self.start = pivot_line.start;
        self.end = pivot_line.end;
        self.seek_and_push_lines(Direction::Right, (width - 1).saturating_add(after))?;

        Ok(Some(base + pushed_before))
    }

    fn push_edge_lines(&mut self, mode: ViewMode) -> Result<(), CapacityError> {
        let len = self.input.len();
        match mode {
            ViewMode::Start(0) | ViewMode::End(0) => {}
            ViewMode::Start(n) => {
                self.start = 0;
                self.end = 0;
                self.seek_line_end();
                self.push_line()?;
                self.seek_and_push_lines(Direction::Right, n - 1)?;
            }
            ViewMode::End(n) => {
                let base = self.lines.len();
                self.start = len;
                self.end = len;
                self.seek_line();
                self.push_line()?;
                self.seek_and_push_lines(Direction::Left, n - 1)?;
                self.lines.as_mut_slice()[base..].reverse();
            }
            _ => {
                self.start = 0;
                self.end = 0;
                self.seek_line_end();
                self.push_line()?;
                self.seek_and_push_lines(Direction::Right, usize::MAX)?;
            }
        }
        Ok(())
    }

    /// Ends the session.
    ///
    /// `curr_line_pos` names the collected line holding `pivot`, normally the
    /// value returned by [`seek_and_push_line_range`](Self::seek_and_push_line_range).
    pub fn finish(self, curr_line_pos: Option<usize>, pivot: usize) -> ReadLines<'a, 's, N> {
        let index_pos = curr_line_pos
            .and_then(|pos| self.lines.get(pos))
            .map_or(0, |line| pivot.saturating_sub(line.start));
        ReadLines {
            input: self.input,
            lines: self.lines,
            curr_line_pos,
            index_pos,
        }
    }
}

/// The lines collected by one [`LineReader`] session.
#[derive(Debug)]
pub struct ReadLines<'a, 's, const N: usize> {
    input: &'a [u8],
    lines: BoundedStack<'s, Range, N>,
    /// Which collected line holds the pivot.
    pub curr_line_pos: Option<usize>,
    /// Pivot offset from the start of that line. May equal the line length
    /// when the pivot sits on the newline or at the end of the input.
    pub index_pos: usize,
}

impl<'a, const N: usize> ReadLines<'a, '_, N> {
    pub fn input(&self) -> &'a [u8] {
        self.input
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn ranges(&self) -> &[Range] {
        self.lines.as_slice()
    }

    pub fn line(&self, index: usize) -> Option<Line<'a>> {
        self.lines.get(index).map(|range| self.make_line(*range))
    }

    pub fn lines(&self) -> impl Iterator<Item = Line<'a>> + '_ {
        self.lines.iter().map(|range| self.make_line(*range))
    }

    /// The line holding the pivot, if it was collected.
    pub fn current_line(&self) -> Option<Line<'a>> {
        self.curr_line_pos.and_then(|pos| self.line(pos))
    }

    fn make_line(&self, range: Range) -> Line<'a> {
        Line {
            range,
            text: range.slice_bounded(self.input),
        }
    }
}

/// Collects the lines selected by `mode` around `pivot` into inline storage
/// holding at most `limit` lines (capped at [`MAX_LINES`]).
///
/// Returns `Ok(None)` when there is no view. A pivot past the end of the
/// input yields an empty result rather than `None`.
pub fn read_lines(
    input: &[u8],
    pivot: Pivot,
    mode: ViewMode,
    odd: OddSide,
    limit: usize,
) -> Result<Option<ReadLines<'_, 'static, MAX_LINES>>, CapacityError> {
    let lines = BoundedStack::inline_with_limit(limit);
    collect(LineReader::with_stack(input, pivot.start(), lines), pivot, mode, odd)
}

/// Like [`read_lines`] but collects into a caller-supplied buffer.
pub fn read_lines_into<'a, 's>(
    input: &'a [u8],
    pivot: Pivot,
    mode: ViewMode,
    odd: OddSide,
    buffer: &'s mut [Range],
) -> Result<Option<ReadLines<'a, 's, 0>>, CapacityError> {
    collect(LineReader::with_buffer(input, pivot.start(), buffer), pivot, mode, odd)
}

fn collect<'a, 's, const N: usize>(
    mut reader: LineReader<'a, 's, N>,
    pivot: Pivot,
    mode: ViewMode,
    odd: OddSide,
) -> Result<Option<ReadLines<'a, 's, N>>, CapacityError> {
    if pivot.start() > reader.input().len() {
        return Ok(Some(reader.finish(None, pivot.start())));
    }
    let pos = reader.seek_and_push_line_range(pivot, mode, odd)?;
    if pos.is_none() && !mode.is_absolute() {
        return Ok(None);
    }
    Ok(Some(reader.finish(pos, pivot.start())))
}
