//! Text layout: word wrap and line placement on a fixed character grid.
//!
//! Each font has a fixed number of columns across the panel. Lines are cut
//! at a newline, at the last space that fits, or hard at the column limit
//! when a word is longer than a line.

use crate::config::TEXT_MAX_LINES;
use crate::hal::Surface;
use heapless::String;

/// The three font sizes of the badge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Font {
    Big,
    Medium,
    Small,
}

/// Widest line of any font, in characters.
pub const MAX_COLUMNS: usize = Font::Small.columns();

impl Font {
    /// Characters that fit on one line.
    pub const fn columns(self) -> usize {
        match self {
            Font::Big => 12,
            Font::Medium => 16,
            Font::Small => 25,
        }
    }
}

/// Length of the next line of `text` when set in `font`.
pub fn line_length(font: Font, text: &str) -> usize {
    wrap_at(font.columns(), text)
}

/// Line breaking on a `columns` wide grid.
///
/// Looks at up to `columns + 1` characters: a newline or the end of the text
/// ends the line right there. Otherwise the line ends at the last space seen,
/// or hard at `columns` when there was none.
pub fn wrap_at(columns: usize, text: &str) -> usize {
    let bytes = text.as_bytes();
    let mut space = None;

    for i in 0..=columns {
        match bytes.get(i) {
            None | Some(b'\n') | Some(0) => return i,
            Some(b' ') => space = Some(i),
            Some(_) => {}
        }
    }

    space.unwrap_or(columns)
}

/// Draw the first `len` bytes of `text` on `row`.
///
/// `len` is clamped to the font's columns. Centred lines are padded by half
/// the unused columns. A failed draw is logged and the caller carries on
/// with the next line. Returns the number of bytes consumed from `text`.
pub fn print_line<D: Surface>(
    display: &mut D,
    font: Font,
    row: u16,
    text: &str,
    len: usize,
    center: bool,
) -> usize {
    let len = floor_char_boundary(text, len.min(font.columns()));

    let mut line: String<{ MAX_COLUMNS * 4 }> = String::new();
    let _ = line.push_str(&text[..len]);

    let pad = if center {
        (font.columns() - line.chars().count().min(font.columns())) / 2
    } else {
        0
    };

    let (width, height) = display.glyph_size(font);
    let drawn = display
        .select_font(font)
        .and_then(|()| display.draw_text(&line, width * pad as u16, height * row));
    if let Err(e) = drawn {
        warn!("layout: failed to print a string: {}", e);
    }

    len
}

/// Draw `text` in the big font, wrapped over at most `TEXT_MAX_LINES` lines.
///
/// Leading spaces and newlines of every line are skipped. Does not clear or
/// flush the surface.
pub fn render_wrapped_body<D: Surface>(display: &mut D, text: &str, center: bool) {
    let mut rest = text;

    for row in 0..TEXT_MAX_LINES {
        rest = rest.trim_start_matches([' ', '\n']);

        let len = line_length(Font::Big, rest);
        if len == 0 {
            break;
        }

        let consumed = print_line(display, Font::Big, row as u16, rest, len, center);
        rest = &rest[consumed..];
        if rest.is_empty() || consumed == 0 {
            break;
        }
    }
}

/// Largest char boundary of `text` that is `<= index`.
fn floor_char_boundary(text: &str, index: usize) -> usize {
    let mut index = index.min(text.len());
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}
