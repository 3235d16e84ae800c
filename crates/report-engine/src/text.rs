//! Text measurement and line breaking for the standard Helvetica faces
//!
//! Widths are the Adobe font metrics in 1/1000 em for the printable ASCII
//! range. Anything outside it is measured as a digit-width glyph.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Font {
    Regular,
    Bold,
}

impl Font {
    /// Resource name used in page content streams
    pub fn resource_name(&self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
        }
    }

    pub fn base_font(&self) -> &'static str {
        match self {
            Font::Regular => "Helvetica",
            Font::Bold => "Helvetica-Bold",
        }
    }
}

const FALLBACK_WIDTH: u16 = 556;

/// Helvetica, chars 32..=126
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Helvetica-Bold, chars 32..=126
#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

fn glyph_width(font: Font, c: char) -> u16 {
    let table = match font {
        Font::Regular => &HELVETICA_WIDTHS,
        Font::Bold => &HELVETICA_BOLD_WIDTHS,
    };
    match c as u32 {
        code @ 32..=126 => table[(code - 32) as usize],
        _ => FALLBACK_WIDTH,
    }
}

/// Rendered width of `text` in points
pub fn text_width(text: &str, font: Font, size: f32) -> f32 {
    let units: u32 = text.chars().map(|c| glyph_width(font, c) as u32).sum();
    units as f32 * size / 1000.0
}

/// Break text into lines no wider than `max_width`. Explicit newlines are
/// kept, runs of spaces collapse, and words wider than a line are split by
/// character.
pub fn wrap_text(text: &str, font: Font, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();

        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current, word)
            };

            if text_width(&candidate, font, size) <= max_width {
                current = candidate;
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }

            if text_width(word, font, size) <= max_width {
                current = word.to_string();
            } else {
                // Hard-break an over-long word
                for c in word.chars() {
                    current.push(c);
                    if text_width(&current, font, size) > max_width && current.chars().count() > 1
                    {
                        let last = current.pop().unwrap_or(c);
                        lines.push(std::mem::take(&mut current));
                        current.push(last);
                    }
                }
            }
        }

        lines.push(current);
    }

    lines
}

/// Cut text to fit `max_width`, ending with an ellipsis when shortened
pub fn truncate_to_width(text: &str, font: Font, size: f32, max_width: f32) -> String {
    if text_width(text, font, size) <= max_width {
        return text.to_string();
    }
    let ellipsis = "...";
    let budget = max_width - text_width(ellipsis, font, size);
    let mut out = String::new();
    for c in text.chars() {
        out.push(c);
        if text_width(&out, font, size) > budget {
            out.pop();
            break;
        }
    }
    format!("{}{}", out.trim_end(), ellipsis)
}

/// Encode for a standard Type1 font with WinAnsiEncoding. Characters with no
/// WinAnsi code become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            ' '..='~' => c as u8,
            '\u{a0}'..='\u{ff}' => c as u32 as u8,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201c}' => 0x93,
            '\u{201d}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            '\u{20ac}' => 0x80,
            '\t' => b' ',
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_text_width_uses_metrics() {
        // "Hi" = 722 + 222 units
        assert!((text_width("Hi", Font::Regular, 10.0) - 9.44).abs() < 0.001);
        assert!(text_width("Hi", Font::Bold, 10.0) > text_width("Hi", Font::Regular, 10.0));
    }

    #[test]
    fn test_wrap_breaks_on_words() {
        let width = text_width("aaaa bbbb", Font::Regular, 10.0);
        let lines = wrap_text("aaaa bbbb cccc", Font::Regular, 10.0, width);
        assert_eq!(lines, vec!["aaaa bbbb", "cccc"]);
    }

    #[test]
    fn test_wrap_keeps_newlines_and_blank_lines() {
        let lines = wrap_text("first\n\nsecond", Font::Regular, 10.0, 500.0);
        assert_eq!(lines, vec!["first", "", "second"]);
    }

    #[test]
    fn test_wrap_splits_long_words() {
        let width = text_width("abcd", Font::Regular, 10.0);
        let lines = wrap_text("abcdefghij", Font::Regular, 10.0, width);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), "abcdefghij");
        for line in &lines {
            assert!(text_width(line, Font::Regular, 10.0) <= width);
        }
    }

    #[test]
    fn test_truncate_adds_ellipsis() {
        let full = "Knock-out drum for flare header condensate";
        let cut = truncate_to_width(full, Font::Regular, 8.0, 60.0);
        assert!(cut.ends_with("..."));
        assert!(text_width(&cut, Font::Regular, 8.0) <= 60.0);
        assert_eq!(truncate_to_width("V-101", Font::Regular, 8.0, 60.0), "V-101");
    }

    #[test]
    fn test_encode_win_ansi() {
        assert_eq!(encode_win_ansi("A\u{2013}B"), vec![b'A', 0x96, b'B']);
        assert_eq!(encode_win_ansi("\u{b0}C"), vec![0xb0, b'C']);
        assert_eq!(encode_win_ansi("\u{4e2d}"), vec![b'?']);
    }
}
