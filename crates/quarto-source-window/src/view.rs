/*
 * view.rs
 * Copyright (c) 2026 Posit, PBC
 */

//! View modes: how a requested length is distributed around a pivot.
//!
//! The same modes drive both byte windows (columns within a line) and line
//! windows (how many lines to collect around the pivot line). In line space
//! the pivot width is measured in lines.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::WindowError;
use crate::span::{Pivot, Range, Span, TruncMode, Window};

/// Which side receives the extra unit when padding splits unevenly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OddSide {
    Left,
    #[default]
    Right,
}

/// How a requested window length is laid out relative to a pivot.
///
/// Lengths of `usize::MAX` mean "up to the edge of the bound".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ViewMode {
    /// The first `len` units of the bound.
    Start(usize),
    /// The last `len` units of the bound.
    End(usize),
    /// The whole bound.
    #[default]
    Full,
    /// `len` units centred on the pivot, pivot included.
    Around { len: usize, min_pad: usize },
    /// `len` units ending with the pivot.
    Left { len: usize, min_pad: usize },
    /// `len` units starting with the pivot.
    Right { len: usize, min_pad: usize },
    /// `n` units on each side, in addition to the pivot.
    ExpSides(usize),
    /// `n` units before the pivot, in addition to it.
    ExpLeft(usize),
    /// `n` units after the pivot, in addition to it.
    ExpRight(usize),
    /// Explicit amounts on both sides, in addition to the pivot.
    ExpCustom { left: usize, right: usize },
}

impl ViewMode {
    pub fn around(len: usize) -> Self {
        ViewMode::Around { len, min_pad: 0 }
    }

    pub fn left(len: usize) -> Self {
        ViewMode::Left { len, min_pad: 0 }
    }

    pub fn right(len: usize) -> Self {
        ViewMode::Right { len, min_pad: 0 }
    }

    /// `true` for the modes that ignore where the pivot is.
    pub fn is_absolute(&self) -> bool {
        matches!(self, ViewMode::Start(_) | ViewMode::End(_) | ViewMode::Full)
    }

    /// Distributes this mode's length around a pivot `width` units wide.
    ///
    /// Returns `None` when the padding left after placing the pivot is below
    /// `min_pad` on a side that needs it. Absolute modes yield
    /// [`Span::UNBOUNDED`]; their edges are applied by [`view_window`].
    pub fn span(&self, width: usize, odd: OddSide) -> Option<Span> {
        let span = match *self {
            ViewMode::Start(_) | ViewMode::End(_) | ViewMode::Full => Span::UNBOUNDED,
            ViewMode::Around { len, min_pad } => {
                let avail = len.saturating_sub(width);
                let side = avail / 2;
                let extra = avail % 2;
                if side < min_pad {
                    return None;
                }
                match odd {
                    OddSide::Left => Span::new(side + extra, width.saturating_add(side)),
                    OddSide::Right => {
                        Span::new(side, width.saturating_add(side).saturating_add(extra))
                    }
                }
            }
            ViewMode::Left { len, min_pad } => {
                if len.saturating_sub(width) < min_pad {
                    return None;
                }
                Span::new(len.saturating_sub(width), width)
            }
            ViewMode::Right { len, min_pad } => {
                if len.saturating_sub(width) < min_pad {
                    return None;
                }
                Span::new(0, len.max(width))
            }
            ViewMode::ExpSides(n) => Span::new(n, width.saturating_add(n)),
            ViewMode::ExpLeft(n) => Span::new(n, width),
            ViewMode::ExpRight(n) => Span::new(0, width.saturating_add(n)),
            ViewMode::ExpCustom { left, right } => Span::new(left, width.saturating_add(right)),
        };
        Some(span)
    }
}

/// Computes the window for `pivot` inside `bound`.
///
/// Returns `None` ("no view") when the mode's `min_pad` cannot be met.
pub fn view_window(
    mode: ViewMode,
    pivot: Pivot,
    bound: Range,
    trunc: TruncMode,
    odd: OddSide,
) -> Option<Window> {
    let anchor = pivot.start();
    let range = match mode {
        ViewMode::Start(len) => Range::new(bound.start, bound.start.saturating_add(len)),
        ViewMode::End(len) => Range::new(bound.end.saturating_sub(len), bound.end),
        ViewMode::Full => bound,
        _ => {
            let span = mode.span(pivot.width(), odd)?;
            return Some(span.project(anchor, bound, trunc));
        }
    };
    Some(Window {
        range: range.clamp_to(bound),
        pivot: anchor,
    })
}

fn invalid(input: &str, reason: impl Into<String>) -> WindowError {
    WindowError::InvalidViewMode {
        input: input.to_string(),
        reason: reason.into(),
    }
}

impl FromStr for ViewMode {
    type Err = WindowError;

    /// Parses `name[:arg[:arg]]`, e.g. `around:5`, `left:3:1`, `exp-custom:2:4`.
    /// A length of `max` stands for `usize::MAX`.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let mut parts = input.trim().split(':');
        let name = parts.next().unwrap_or_default();
        let args = parts
            .map(|part| match part {
                "max" => Ok(usize::MAX),
                _ => part
                    .parse::<usize>()
                    .map_err(|e| invalid(input, format!("'{}': {}", part, e))),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let arity = |min: usize, max: usize| {
            if args.len() < min || args.len() > max {
                Err(invalid(
                    input,
                    format!("'{}' takes {} to {} arguments", name, min, max),
                ))
            } else {
                Ok(())
            }
        };
        let arg = |i: usize| args.get(i).copied().unwrap_or(0);

        let mode = match name {
            "start" => {
                arity(1, 1)?;
                ViewMode::Start(arg(0))
            }
            "end" => {
                arity(1, 1)?;
                ViewMode::End(arg(0))
            }
            "full" => {
                arity(0, 0)?;
                ViewMode::Full
            }
            "around" => {
                arity(1, 2)?;
                ViewMode::Around {
                    len: arg(0),
                    min_pad: arg(1),
                }
            }
            "left" => {
                arity(1, 2)?;
                ViewMode::Left {
                    len: arg(0),
                    min_pad: arg(1),
                }
            }
            "right" => {
                arity(1, 2)?;
                ViewMode::Right {
                    len: arg(0),
                    min_pad: arg(1),
                }
            }
            "exp-sides" => {
                arity(1, 1)?;
                ViewMode::ExpSides(arg(0))
            }
            "exp-left" => {
                arity(1, 1)?;
                ViewMode::ExpLeft(arg(0))
            }
            "exp-right" => {
                arity(1, 1)?;
                ViewMode::ExpRight(arg(0))
            }
            "exp-custom" => {
                arity(2, 2)?;
                ViewMode::ExpCustom {
                    left: arg(0),
                    right: arg(1),
                }
            }
            _ => return Err(invalid(input, "unknown view mode")),
        };
        Ok(mode)
    }
}

struct Len(usize);

impl fmt::Display for Len {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == usize::MAX {
            write!(f, "max")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

fn write_padded(f: &mut fmt::Formatter<'_>, name: &str, len: usize, min_pad: usize) -> fmt::Result {
    if min_pad == 0 {
        write!(f, "{}:{}", name, Len(len))
    } else {
        write!(f, "{}:{}:{}", name, Len(len), min_pad)
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ViewMode::Start(len) => write!(f, "start:{}", Len(len)),
            ViewMode::End(len) => write!(f, "end:{}", Len(len)),
            ViewMode::Full => write!(f, "full"),
            ViewMode::Around { len, min_pad } => write_padded(f, "around", len, min_pad),
            ViewMode::Left { len, min_pad } => write_padded(f, "left", len, min_pad),
            ViewMode::Right { len, min_pad } => write_padded(f, "right", len, min_pad),
            ViewMode::ExpSides(n) => write!(f, "exp-sides:{}", Len(n)),
            ViewMode::ExpLeft(n) => write!(f, "exp-left:{}", Len(n)),
            ViewMode::ExpRight(n) => write!(f, "exp-right:{}", Len(n)),
            ViewMode::ExpCustom { left, right } => {
                write!(f, "exp-custom:{}:{}", Len(left), Len(right))
            }
        }
    }
}

impl TryFrom<String> for ViewMode {
    type Error = WindowError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ViewMode> for String {
    fn from(mode: ViewMode) -> Self {
        mode.to_string()
    }
}
