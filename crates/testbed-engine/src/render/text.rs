//! 5x7 bitmap font for HUD and label text.
//!
//! Text is drawn as one small square per lit glyph cell, in element space,
//! so it goes through the same triangle pipeline as filled shapes and needs
//! no font atlas. Lowercase letters use the uppercase glyphs; characters
//! without a glyph leave a blank cell.

use testbed_camera::point::Point2;

/// Glyph width in cells.
pub const GLYPH_WIDTH: usize = 5;
/// Glyph height in cells.
pub const GLYPH_HEIGHT: usize = 7;
/// Horizontal distance between glyph origins, in cells.
pub const ADVANCE: usize = GLYPH_WIDTH + 1;
/// Vertical distance between lines, in cells.
pub const LINE_ADVANCE: usize = GLYPH_HEIGHT + 2;

/// Rows of a glyph, top to bottom; bit 4 is the leftmost cell.
pub fn glyph_rows(ch: char) -> Option<[u8; GLYPH_HEIGHT]> {
    let rows = match ch.to_ascii_uppercase() {
        '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => [0x1E, 0x01, 0x01, 0x0E, 0x01, 0x01, 0x1E],
        '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        'A' => [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'B' => [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E],
        'C' => [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E],
        'D' => [0x1C, 0x12, 0x11, 0x11, 0x11, 0x12, 0x1C],
        'E' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F],
        'F' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10],
        'G' => [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F],
        'H' => [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'I' => [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E],
        'J' => [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C],
        'K' => [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11],
        'L' => [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F],
        'M' => [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11],
        'N' => [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11],
        'O' => [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'P' => [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10],
        'Q' => [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D],
        'R' => [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11],
        'S' => [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E],
        'T' => [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04],
        'U' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'V' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04],
        'W' => [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A],
        'X' => [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11],
        'Y' => [0x11, 0x11, 0x11, 0x0A, 0x04, 0x04, 0x04],
        'Z' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F],
        '.' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C],
        ',' => [0x00, 0x00, 0x00, 0x00, 0x0C, 0x04, 0x08],
        ':' => [0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x0C, 0x00],
        '-' => [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00],
        '+' => [0x00, 0x04, 0x04, 0x1F, 0x04, 0x04, 0x00],
        '=' => [0x00, 0x00, 0x1F, 0x00, 0x1F, 0x00, 0x00],
        '/' => [0x01, 0x02, 0x02, 0x04, 0x08, 0x08, 0x10],
        '(' => [0x02, 0x04, 0x08, 0x08, 0x08, 0x04, 0x02],
        ')' => [0x08, 0x04, 0x02, 0x02, 0x02, 0x04, 0x08],
        '[' => [0x0E, 0x08, 0x08, 0x08, 0x08, 0x08, 0x0E],
        ']' => [0x0E, 0x02, 0x02, 0x02, 0x02, 0x02, 0x0E],
        '%' => [0x18, 0x19, 0x02, 0x04, 0x08, 0x13, 0x03],
        '_' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x1F],
        '!' => [0x04, 0x04, 0x04, 0x04, 0x04, 0x00, 0x04],
        '?' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x00, 0x04],
        '#' => [0x0A, 0x0A, 0x1F, 0x0A, 0x1F, 0x0A, 0x0A],
        '<' => [0x02, 0x04, 0x08, 0x10, 0x08, 0x04, 0x02],
        '>' => [0x08, 0x04, 0x02, 0x01, 0x02, 0x04, 0x08],
        _ => return None,
    };
    Some(rows)
}

/// Top-left corners of every lit cell of `text`, in element space.
///
/// `origin` is the top-left of the first glyph and `cell` the size of one
/// glyph cell in pixels. `'\n'` starts a new line.
pub fn lit_cells(text: &str, origin: Point2, cell: f64) -> Vec<Point2> {
    let mut cells = Vec::new();
    for (line_idx, line) in text.split('\n').enumerate() {
        let line_y = origin.y + (line_idx * LINE_ADVANCE) as f64 * cell;
        for (char_idx, ch) in line.chars().enumerate() {
            let Some(rows) = glyph_rows(ch) else {
                continue;
            };
            let char_x = origin.x + (char_idx * ADVANCE) as f64 * cell;
            for (row, bits) in rows.iter().enumerate() {
                for col in 0..GLYPH_WIDTH {
                    if (bits >> (GLYPH_WIDTH - 1 - col)) & 1 == 1 {
                        cells.push(Point2::new(
                            char_x + col as f64 * cell,
                            line_y + row as f64 * cell,
                        ));
                    }
                }
            }
        }
    }
    cells
}

/// Width and height of `text` in pixels at the given cell size.
pub fn text_size(text: &str, cell: f64) -> (f64, f64) {
    let mut lines = 0;
    let mut widest = 0;
    for line in text.split('\n') {
        lines += 1;
        widest = widest.max(line.chars().count());
    }
    let width = if widest == 0 {
        0
    } else {
        widest * ADVANCE - 1
    };
    let height = (lines - 1) * LINE_ADVANCE + GLYPH_HEIGHT;
    (width as f64 * cell, height as f64 * cell)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hud_characters_have_glyphs() {
        for ch in ('0'..='9').chain('A'..='Z').chain("abcxyz.:-+()%".chars()) {
            assert!(glyph_rows(ch).is_some(), "missing glyph for {ch:?}");
        }
    }

    #[test]
    fn glyph_rows_fit_five_columns() {
        for ch in ('0'..='9').chain('A'..='Z') {
            let rows = glyph_rows(ch).unwrap();
            assert!(rows.iter().all(|&r| r < 0x20), "{ch:?} overflows");
            assert!(rows.iter().any(|&r| r != 0), "{ch:?} is blank");
        }
    }

    #[test]
    fn space_and_unknown_are_blank() {
        assert!(lit_cells(" ", Point2::ZERO, 1.0).is_empty());
        assert!(lit_cells("\u{263A}", Point2::ZERO, 1.0).is_empty());
    }

    #[test]
    fn minus_is_one_row_of_five() {
        let cells = lit_cells("-", Point2::new(10.0, 20.0), 2.0);
        let expected: Vec<Point2> = (0..5)
            .map(|c| Point2::new(10.0 + 2.0 * f64::from(c), 26.0))
            .collect();
        assert_eq!(cells, expected);
    }

    #[test]
    fn second_glyph_is_advanced() {
        let one = lit_cells("-", Point2::ZERO, 1.0);
        let two = lit_cells(" -", Point2::ZERO, 1.0);
        assert_eq!(two[0].x - one[0].x, ADVANCE as f64);
    }

    #[test]
    fn newline_moves_down_a_line() {
        let cells = lit_cells("\n-", Point2::ZERO, 1.0);
        assert_eq!(cells[0], Point2::new(0.0, (LINE_ADVANCE + 3) as f64));
    }

    #[test]
    fn lowercase_folds_to_uppercase() {
        assert_eq!(glyph_rows('q'), glyph_rows('Q'));
    }

    #[test]
    fn text_size_counts_cells() {
        assert_eq!(text_size("", 2.0), (0.0, 14.0));
        assert_eq!(text_size("AB", 1.0), (11.0, 7.0));
        assert_eq!(text_size("A\nBCD", 2.0), (34.0, 32.0));
    }
}
