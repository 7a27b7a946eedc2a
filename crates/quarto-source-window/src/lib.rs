//! Source windows for diagnostics
//!
//! This crate cuts a small, readable excerpt out of a byte buffer around a
//! position of interest (the *pivot*) and prints it with line numbers, a
//! cursor line and truncation markers. It never allocates per line: the
//! collected line ranges live in a fixed-capacity stack, either inline or in
//! a caller-supplied buffer.
//!
//! # Overview
//!
//! The core types are:
//! - [`Span`]: How much to show before and after a pivot
//! - [`Window`]: A span projected onto a bound under a [`TruncMode`]
//! - [`ViewMode`]: A named policy producing spans, parsed from strings like `around:5`
//! - [`LineReader`]: Seeks line boundaries and collects line ranges
//! - [`Renderer`]: Writes the final excerpt to any `std::io::Write`
//!
//! # Example
//!
//! ```rust
//! use quarto_source_window::*;
//!
//! let options = RenderOptions {
//!     lines: ViewMode::around(1),
//!     cursor_hint: false,
//!     ..RenderOptions::default()
//! };
//! let renderer = Renderer::new(&options);
//! let out = renderer
//!     .render_to_string(b"one\ntwo\nthree", Pivot::Index(5), None)
//!     .unwrap();
//!
//! assert_eq!(out, "2 | two\n     ^\n");
//! ```

pub mod bounded;
pub mod error;
pub mod interval;
pub mod line_reader;
pub mod options;
pub mod render;
pub mod span;
pub mod view;

// Re-export main types
pub use bounded::BoundedStack;
pub use error::{CapacityError, WindowError, WindowResult};
pub use line_reader::{
    DEFAULT_LINE_CAPACITY, Direction, Line, LineReader, MAX_LINES, ReadLines, read_lines,
    read_lines_into,
};
pub use options::{ColumnScope, RenderOptions};
pub use render::{Renderer, cursor_hint, first_line_number, line_number_at};
pub use span::{Pivot, Range, Span, TruncMode, Window};
pub use view::{OddSide, ViewMode, view_window};
