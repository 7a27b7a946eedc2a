/*
 * span.rs
 * Copyright (c) 2026 Posit, PBC
 */

//! Windowing algebra: ranges, spans and their projection onto a bound.
//!
//! A [`Span`] is a plan: "this much before the pivot, this much from the
//! pivot onwards". It only becomes a [`Range`] once it is anchored at a pivot
//! and reconciled with an outer bound under a [`TruncMode`]. Offsets may lie
//! anywhere in `0..=usize::MAX`; all arithmetic saturates.

use serde::{Deserialize, Serialize};

use crate::interval::{clamp, in_range_inclusive, ordered_pair};

/// A half-open byte interval `[start, end)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range {
    pub start: usize,
    pub end: usize,
}

impl Range {
    /// Creates a range, swapping the ends if they are given in reverse order.
    pub fn new(start: usize, end: usize) -> Self {
        let (start, end) = ordered_pair(start, end);
        Range { start, end }
    }

    /// The range covering all of `input`.
    pub fn of(input: &[u8]) -> Self {
        Range {
            start: 0,
            end: input.len(),
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Half-open membership.
    pub fn contains(&self, pos: usize) -> bool {
        self.start <= pos && pos < self.end
    }

    /// Membership that also accepts `end`, the position just past the range.
    pub fn contains_inclusive(&self, pos: usize) -> bool {
        in_range_inclusive(pos, self.start, self.end)
    }

    /// Returns `true` when `other` lies entirely inside `self`.
    pub fn encloses(&self, other: Range) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Clamps both ends into `bound`.
    pub fn clamp_to(&self, bound: Range) -> Range {
        Range {
            start: clamp(self.start, bound.start, bound.end),
            end: clamp(self.end, bound.start, bound.end),
        }
    }

    /// Moves both ends forward by `offset`.
    pub fn shift(&self, offset: usize) -> Range {
        Range {
            start: self.start.saturating_add(offset),
            end: self.end.saturating_add(offset),
        }
    }

    /// Expresses this range relative to `base`.
    pub fn relative_to(&self, base: usize) -> Range {
        Range {
            start: self.start.saturating_sub(base),
            end: self.end.saturating_sub(base),
        }
    }

    /// The bytes covered by this range, or `None` if it is not inside `input`.
    pub fn slice<'a>(&self, input: &'a [u8]) -> Option<&'a [u8]> {
        input.get(self.start..self.end)
    }

    /// The bytes covered by this range after clamping it to `input`.
    ///
    /// Always valid, even for ranges computed speculatively past the end.
    pub fn slice_bounded<'a>(&self, input: &'a [u8]) -> &'a [u8] {
        let clamped = self.clamp_to(Range::of(input));
        &input[clamped.start..clamped.end]
    }
}

/// Padding planned around a pivot.
///
/// Anchored at pivot start `p`, the naive window is `[p - left, p + right)`.
/// Spans produced from a view mode count the pivot itself in `right`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub left: usize,
    pub right: usize,
}

/// Policy for reconciling an anchored [`Span`] with an outer bound.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TruncMode {
    /// Clamp each side independently; the window may come out shorter.
    Hard,
    /// Clamp, then hand the amount lost on one side to the other side.
    #[default]
    HardFlex,
    /// Keep the requested length whenever the bound is large enough,
    /// sliding the window flush against the nearest edge.
    Soft,
}

/// A projected window plus the pivot it was computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    pub range: Range,
    pub pivot: usize,
}

impl Window {
    /// Offset of the pivot from the window start.
    ///
    /// Only meaningful when [`exceeds`](Self::exceeds) is `false`.
    pub fn pos(&self) -> usize {
        self.pivot.saturating_sub(self.range.start)
    }

    /// `true` when the pivot fell outside `[range.start, range.end]`.
    pub fn exceeds(&self) -> bool {
        !self.range.contains_inclusive(self.pivot)
    }
}

impl Span {
    /// Reaches the bound edge on both sides.
    pub const UNBOUNDED: Span = Span {
        left: usize::MAX,
        right: usize::MAX,
    };

    pub fn new(left: usize, right: usize) -> Self {
        Span { left, right }
    }

    /// Total planned length.
    pub fn len(&self) -> usize {
        self.left.saturating_add(self.right)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Anchors the span at `anchor` and reconciles it with `bound`.
    pub fn project(self, anchor: usize, bound: Range, trunc: TruncMode) -> Window {
        let (bound_start, bound_end) = (bound.start, bound.end);
        let naive_start = anchor.saturating_sub(self.left);
        let naive_end = anchor.saturating_add(self.right);

        let mut start = clamp(naive_start, bound_start, bound_end);
        let mut end = clamp(naive_end, bound_start, bound_end);

        match trunc {
            TruncMode::Hard => {}
            TruncMode::Soft if anchor < bound_start => {
                start = bound_start;
                end = bound_start.saturating_add(self.len()).min(bound_end);
            }
            TruncMode::Soft if anchor >= bound_end => {
                start = bound_end.saturating_sub(self.len()).max(bound_start);
                end = bound_end;
            }
            TruncMode::HardFlex | TruncMode::Soft => {
                // Part of the left extent that lies before the bound, and of
                // the right extent that lies after it. Measured on the span
                // itself so saturation at zero does not hide an overrun.
                let unused_left = self.left.saturating_sub(anchor.saturating_sub(bound_start));
                let unused_right = self.right.saturating_sub(bound_end.saturating_sub(anchor));

                if unused_left > 0 && unused_right == 0 {
                    end = clamp(
                        naive_end.saturating_add(unused_left),
                        bound_start,
                        bound_end,
                    );
                } else if unused_right > 0 && unused_left == 0 {
                    start = clamp(
                        naive_start.saturating_sub(unused_right),
                        bound_start,
                        bound_end,
                    );
                }
            }
        }

        Window {
            range: Range { start, end },
            pivot: anchor,
        }
    }
}

/// What a window is computed around: one byte, or an inclusive byte range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pivot {
    Index(usize),
    /// Inclusive on both ends; build with [`Pivot::range`] to normalize order.
    Range { start: usize, end: usize },
}

impl Pivot {
    /// A range pivot from two offsets given in any order.
    pub fn range(a: usize, b: usize) -> Self {
        let (start, end) = ordered_pair(a, b);
        if start == end {
            Pivot::Index(start)
        } else {
            Pivot::Range { start, end }
        }
    }

    pub fn start(&self) -> usize {
        match *self {
            Pivot::Index(index) => index,
            Pivot::Range { start, .. } => start,
        }
    }

    /// Last offset covered by the pivot.
    pub fn last(&self) -> usize {
        match *self {
            Pivot::Index(index) => index,
            Pivot::Range { end, .. } => end,
        }
    }

    /// Number of bytes covered by the pivot.
    pub fn width(&self) -> usize {
        self.last().saturating_sub(self.start()).saturating_add(1)
    }
}

impl From<usize> for Pivot {
    fn from(index: usize) -> Self {
        Pivot::Index(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_MODES: [TruncMode; 3] = [TruncMode::Hard, TruncMode::HardFlex, TruncMode::Soft];

    fn project(
        left: usize,
        right: usize,
        anchor: usize,
        bound: (usize, usize),
        trunc: TruncMode,
    ) -> (usize, usize) {
        let window =
            Span::new(left, right).project(anchor, Range::new(bound.0, bound.1), trunc);
        (window.range.start, window.range.end)
    }

    #[test]
    fn test_range_normalizes_and_measures() {
        let range = Range::new(9, 4);
        assert_eq!(range, Range { start: 4, end: 9 });
        assert_eq!(range.len(), 5);
        assert!(range.contains(4));
        assert!(!range.contains(9));
        assert!(range.contains_inclusive(9));
        assert!(Range::new(3, 3).is_empty());
    }

    #[test]
    fn test_range_slices() {
        let input = b"hello world";
        assert_eq!(Range::new(0, 5).slice(input), Some(&b"hello"[..]));
        assert_eq!(Range::new(6, 40).slice(input), None);
        assert_eq!(Range::new(6, 40).slice_bounded(input), b"world");
        assert_eq!(Range::new(50, 60).slice_bounded(input), b"");
    }

    #[test]
    fn test_range_translation() {
        let range = Range::new(10, 14);
        assert_eq!(range.relative_to(8), Range::new(2, 6));
        assert_eq!(range.relative_to(12), Range::new(0, 2));
        assert_eq!(range.shift(usize::MAX), Range::new(usize::MAX, usize::MAX));
        assert!(Range::new(0, 20).encloses(range));
        assert!(!Range::new(11, 20).encloses(range));
    }

    #[test]
    fn test_unconstrained_window_is_the_same_in_every_mode() {
        for trunc in ALL_MODES {
            assert_eq!(project(2, 3, 10, (0, 20), trunc), (8, 13));
        }
    }

    #[test]
    fn test_hard_clamps_each_side() {
        assert_eq!(project(2, 9, 7, (5, 10), TruncMode::Hard), (5, 10));
        assert_eq!(project(4, 2, 1, (0, 20), TruncMode::Hard), (0, 3));
        assert_eq!(project(1, 4, 18, (0, 20), TruncMode::Hard), (17, 20));
    }

    #[test]
    fn test_hard_flex_moves_lost_padding_to_the_other_side() {
        assert_eq!(project(4, 2, 1, (0, 20), TruncMode::HardFlex), (0, 6));
        assert_eq!(project(1, 4, 18, (0, 20), TruncMode::HardFlex), (15, 20));
    }

    #[test]
    fn test_hard_flex_measures_from_an_outside_pivot() {
        // Pivot 22 is past the bound: [22 - 5, 22) intersected with [0, 20).
        assert_eq!(project(2, 3, 22, (0, 20), TruncMode::HardFlex), (17, 20));
        // Pivot 3 is before the bound [5, 20): [3, 3 + 5) intersected.
        assert_eq!(project(2, 3, 3, (5, 20), TruncMode::HardFlex), (5, 8));
    }

    #[test]
    fn test_soft_keeps_length_from_the_bound_edge() {
        assert_eq!(project(2, 3, 22, (0, 20), TruncMode::Soft), (15, 20));
        assert_eq!(project(2, 3, 3, (5, 20), TruncMode::Soft), (5, 10));
        assert_eq!(project(4, 2, 1, (0, 20), TruncMode::Soft), (0, 6));
    }

    #[test]
    fn test_soft_caps_at_the_bound_size() {
        // Eleven bytes requested, the bound only holds five.
        assert_eq!(project(2, 9, 7, (5, 10), TruncMode::Soft), (5, 10));
        assert_eq!(project(2, 9, 4, (5, 10), TruncMode::Soft), (5, 10));
        assert_eq!(project(2, 9, 30, (5, 10), TruncMode::Soft), (5, 10));
    }

    #[test]
    fn test_zero_length_span_out_of_bounds() {
        for trunc in ALL_MODES {
            let window = Span::new(0, 0).project(25, Range::new(0, 10), trunc);
            assert_eq!(window.range, Range::new(10, 10));
            assert!(window.exceeds());
        }
    }

    #[test]
    fn test_pivot_at_bound_end_does_not_exceed() {
        let window = Span::new(3, 1).project(10, Range::new(0, 10), TruncMode::HardFlex);
        assert_eq!(window.range, Range::new(6, 10));
        assert!(!window.exceeds());
        assert_eq!(window.pos(), 4);
    }

    #[test]
    fn test_unbounded_span_near_usize_max() {
        let bound = Range::new(0, usize::MAX);
        for trunc in ALL_MODES {
            let window = Span::UNBOUNDED.project(usize::MAX - 1, bound, trunc);
            assert_eq!(window.range, bound);
            let window = Span::new(5, usize::MAX).project(usize::MAX, bound, trunc);
            assert_eq!(window.range.end, usize::MAX);
        }
        assert_eq!(Span::UNBOUNDED.len(), usize::MAX);
    }

    #[test]
    fn test_pivot_range_normalizes() {
        assert_eq!(Pivot::range(9, 3), Pivot::Range { start: 3, end: 9 });
        assert_eq!(Pivot::range(4, 4), Pivot::Index(4));
        assert_eq!(Pivot::range(9, 3).width(), 7);
        assert_eq!(Pivot::Index(12).width(), 1);
        assert_eq!(Pivot::range(0, usize::MAX).width(), usize::MAX);
    }
}
