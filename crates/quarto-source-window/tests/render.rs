/*
 * render.rs
 * Copyright (c) 2026 Posit, PBC
 *
 * End-to-end tests for rendered source windows.
 */

use pretty_assertions::assert_eq;
use quarto_source_window::*;

fn render(
    options: &RenderOptions,
    input: &str,
    pivot: Pivot,
    line_number: Option<usize>,
) -> String {
    Renderer::new(options)
        .render_to_string(input.as_bytes(), pivot, line_number)
        .unwrap()
}

fn plain() -> RenderOptions {
    RenderOptions {
        line_numbers: false,
        cursor: false,
        ..RenderOptions::default()
    }
}

#[test]
fn test_column_window_around_pivot() {
    let input = b"hello\nworld";
    let line = Range::new(6, 11);
    let window = view_window(
        ViewMode::around(3),
        Pivot::Index(8 - line.start),
        Range::new(0, line.len()),
        TruncMode::HardFlex,
        OddSide::Right,
    )
    .unwrap();

    assert_eq!(window.range.shift(line.start).slice(input), Some(&b"orl"[..]));
    assert_eq!(window.pos(), 1);
    assert!(!window.exceeds());
}

#[test]
fn test_render_truncated_columns() {
    let options = RenderOptions {
        columns: ViewMode::around(3),
        ..RenderOptions::default()
    };
    let out = render(&options, "hello\nworld", Pivot::Index(8), None);
    insta::assert_snapshot!(out, @r"
    1 | ..ell..
    2 | ..orl..
           ^
    ");
}

#[test]
fn test_render_newline_hint() {
    let out = render(&RenderOptions::default(), "ab\ncd", Pivot::Index(2), None);
    insta::assert_snapshot!(out, @r"
    1 | ab
          ^ (newline)
    2 | cd
    ");
}

#[test]
fn test_render_range_cursor() {
    let out = render(
        &RenderOptions::default(),
        "let value = compute(a, b);",
        Pivot::range(8, 4),
        None,
    );
    insta::assert_snapshot!(out, @r"
    1 | let value = compute(a, b);
            ^~~~^
    ");
}

#[test]
fn test_render_range_cursor_cut_by_columns() {
    let options = RenderOptions {
        columns: ViewMode::Start(6),
        ..RenderOptions::default()
    };
    let out = render(&options, "let value = compute(a, b);", Pivot::range(4, 8), None);
    insta::assert_snapshot!(out, @r"
    1 | let va..
            ^~
    ");
}

#[test]
fn test_render_range_over_line_break() {
    let out = render(&RenderOptions::default(), "abc\ndef", Pivot::range(1, 5), None);
    insta::assert_snapshot!(out, @r"
    1 | abc
         ^~~
    2 | def
    ");
}

#[test]
fn test_render_eof_marker_after_last_byte() {
    let options = RenderOptions {
        columns: ViewMode::around(3),
        show_eof: true,
        ..RenderOptions::default()
    };
    let out = render(&options, "hello", Pivot::Index(4), None);
    insta::assert_snapshot!(out, @r"
    1 | ..llo<EOF>
            ^
    ");
}

#[test]
fn test_caller_supplied_line_number() {
    let out = render(&RenderOptions::default(), "a\nb\nc", Pivot::Index(2), Some(41));
    insta::assert_snapshot!(out, @r"
    40 | a
    41 | b
         ^
    42 | c
    ");
}

#[test]
fn test_caller_line_number_names_pivot_line_outside_window() {
    let input = "a\nb\nc\nd";
    let start = RenderOptions {
        lines: ViewMode::Start(2),
        ..RenderOptions::default()
    };
    // The pivot is on line 4, which the window does not include.
    assert_eq!(render(&start, input, Pivot::Index(6), Some(4)), "1 | a\n2 | b\n");
    assert_eq!(render(&start, input, Pivot::Index(6), None), "1 | a\n2 | b\n");
    assert_eq!(render(&start, input, Pivot::Index(6), Some(40)), "37 | a\n38 | b\n");

    let end = RenderOptions {
        lines: ViewMode::End(2),
        ..RenderOptions::default()
    };
    assert_eq!(render(&end, input, Pivot::Index(0), Some(10)), "12 | c\n13 | d\n");
}

#[test]
fn test_range_cursor_hint() {
    let out = render(&RenderOptions::default(), "a b", Pivot::range(1, 2), None);
    assert_eq!(out, "1 | a b\n     ^^ (space)\n");
}

#[test]
fn test_line_number_column_is_right_aligned() {
    let out = render(&RenderOptions::default(), "x\ny", Pivot::Index(2), Some(10));
    assert_eq!(out, " 9 | x\n10 | y\n     ^\n");
}

#[test]
fn test_column_scope() {
    let input = "abcdefgh\nxy\nabcdefgh";
    let pivot_line = RenderOptions {
        lines: ViewMode::Full,
        columns: ViewMode::around(3),
        trunc: TruncMode::Soft,
        ..plain()
    };
    let per_line = RenderOptions {
        scope: ColumnScope::PerLine,
        ..pivot_line.clone()
    };

    assert_eq!(
        render(&pivot_line, input, Pivot::Index(6), None),
        "..fgh\n..\n..fgh\n"
    );
    assert_eq!(
        render(&per_line, input, Pivot::Index(6), None),
        "..fgh\nxy\n..fgh\n"
    );
}

#[test]
fn test_empty_buffer_shows_only_eof_marker() {
    let options = RenderOptions {
        lines: ViewMode::Full,
        show_eof: true,
        ..plain()
    };
    assert_eq!(render(&options, "", Pivot::Index(0), None), "<EOF>\n");
}

#[test]
fn test_out_of_bounds_pivot() {
    let read = read_lines(
        b"hello",
        Pivot::Index(100),
        ViewMode::right(1),
        OddSide::Right,
        8,
    )
    .unwrap()
    .unwrap();
    assert!(read.is_empty());
    assert_eq!(read.curr_line_pos, None);

    let out = render(&RenderOptions::default(), "hello", Pivot::Index(100), None);
    assert_eq!(out, "");
}

#[test]
fn test_unmet_padding_renders_nothing() {
    let options = RenderOptions {
        columns: ViewMode::Around { len: 3, min_pad: 2 },
        ..RenderOptions::default()
    };
    assert_eq!(render(&options, "hello", Pivot::Index(2), None), "");
}

#[test]
fn test_render_from_caller_buffer() {
    let input = b"one\ntwo\nthree\nfour";
    let pivot = Pivot::Index(9);
    let mut buffer = [Range::default(); 4];
    let read = read_lines_into(input, pivot, ViewMode::around(3), OddSide::Right, &mut buffer)
        .unwrap()
        .unwrap();
    assert_eq!(read.len(), 3);

    let options = plain();
    let mut out = Vec::new();
    Renderer::new(&options)
        .render_lines(&mut out, &read, pivot, None)
        .unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "two\nthree\nfour\n");
}

#[test]
fn test_line_buffer_overflow_writes_nothing() {
    let options = RenderOptions {
        lines: ViewMode::Full,
        max_lines: 2,
        ..RenderOptions::default()
    };
    let mut out = Vec::new();
    let result = Renderer::new(&options).render_index(&mut out, b"1\n2\n3\n4\n5", 0, None);

    assert!(matches!(
        result,
        Err(WindowError::Capacity(CapacityError { capacity: 2 }))
    ));
    assert!(out.is_empty());
}

#[test]
fn test_options_from_toml() {
    let options = RenderOptions::from_toml_str(
        r#"
        lines = "around:1"
        columns = "around:3"
        line-numbers = false
        cursor-head = "*"
        trunc-marker = "~"
        "#,
    )
    .unwrap();
    let out = render(&options, "hello\nworld", Pivot::Index(8), None);
    assert_eq!(out, "~orl~\n  *\n");
}
