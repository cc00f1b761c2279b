//! Line breaking: explicit paragraphs, then greedy per-character wrapping.

use super::measure::TextMeasurer;
use super::types::{StyleSpec, WrapResult, line_height_px};

/// Split `text` into paragraphs on `'\n'`, keeping empty ones.
///
/// A `'\r'` directly before the newline belongs to the line break.
pub fn paragraphs(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n').map(|p| p.strip_suffix('\r').unwrap_or(p))
}

/// Wrap `text` into display lines no wider than `max_width_px`.
///
/// Breaking is per code point, not per word: a long word is split mid-word
/// rather than overflowing. A single char wider than the box still gets its
/// own line, and an empty paragraph yields one empty line.
pub fn wrap<M: TextMeasurer>(
    text: &str,
    max_width_px: f64,
    measurer: &M,
    style: &StyleSpec,
) -> Result<WrapResult, M::Error> {
    let mut lines: Vec<String> = Vec::new();
    for paragraph in paragraphs(text) {
        let mut cur = String::new();
        for ch in paragraph.chars() {
            let mut candidate = String::with_capacity(cur.len() + ch.len_utf8());
            candidate.push_str(&cur);
            candidate.push(ch);
            if measurer.measure_width(&candidate, style)? > max_width_px && !cur.is_empty() {
                lines.push(cur);
                cur = ch.to_string();
            } else {
                cur = candidate;
            }
        }
        lines.push(cur);
    }

    let line_height = line_height_px(style.font_size_px);
    Ok(WrapResult {
        total_height_px: lines.len() as f64 * line_height,
        line_height_px: line_height,
        lines,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::measure::EstimateMeasurer;
    use std::cell::Cell;
    use std::convert::Infallible;

    fn mono() -> EstimateMeasurer {
        EstimateMeasurer::with_ratio(0.5)
    }

    #[test]
    fn short_text_single_line() {
        let style = StyleSpec::new("mono", 100, false);
        let out = wrap("HELLO", 800.0, &mono(), &style).unwrap();
        assert_eq!(out.lines, vec!["HELLO"]);
        assert_eq!(out.line_height_px, 120.0);
        assert_eq!(out.total_height_px, 120.0);
    }

    #[test]
    fn newline_gives_one_line_per_paragraph() {
        let style = StyleSpec::new("mono", 100, false);
        let out = wrap("LINE ONE\nLINE TWO", 800.0, &mono(), &style).unwrap();
        assert_eq!(out.lines, vec!["LINE ONE", "LINE TWO"]);
    }

    #[test]
    fn empty_text_is_one_empty_line() {
        let style = StyleSpec::new("mono", 100, false);
        let out = wrap("", 800.0, &mono(), &style).unwrap();
        assert_eq!(out.lines, vec![String::new()]);
        assert_eq!(out.total_height_px, out.line_height_px);
    }

    #[test]
    fn blank_paragraphs_are_preserved() {
        let style = StyleSpec::new("mono", 40, false);
        let out = wrap("top\n\nbottom\n", 800.0, &mono(), &style).unwrap();
        assert_eq!(out.lines, vec!["top", "", "bottom", ""]);
    }

    #[test]
    fn crlf_is_a_single_break() {
        let style = StyleSpec::new("mono", 40, false);
        let out = wrap("a\r\nb", 800.0, &mono(), &style).unwrap();
        assert_eq!(out.lines, vec!["a", "b"]);
    }

    #[test]
    fn long_word_breaks_mid_word() {
        // 50px per char at size 100 -> 16 chars per 800px line
        let style = StyleSpec::new("mono", 100, false);
        let word = "A".repeat(40);
        let out = wrap(&word, 800.0, &mono(), &style).unwrap();
        assert_eq!(out.lines.len(), 3);
        assert_eq!(out.lines[0].len(), 16);
        assert_eq!(out.lines[1].len(), 16);
        assert_eq!(out.lines[2].len(), 8);
        assert_eq!(out.lines.concat(), word);
    }

    #[test]
    fn spaces_are_ordinary_chars() {
        // 10px per char, 50px wide -> 5 chars per line, space included
        let style = StyleSpec::new("mono", 20, false);
        let out = wrap("ab cd ef", 50.0, &mono(), &style).unwrap();
        assert_eq!(out.lines, vec!["ab cd", " ef"]);
    }

    #[test]
    fn exact_width_fits() {
        let style = StyleSpec::new("mono", 100, false);
        let out = wrap("ABCD", 200.0, &mono(), &style).unwrap();
        assert_eq!(out.lines, vec!["ABCD"]);
    }

    #[test]
    fn oversized_char_gets_own_line() {
        let style = StyleSpec::new("mono", 100, false);
        let out = wrap("WWW", 10.0, &mono(), &style).unwrap();
        assert_eq!(out.lines, vec!["W", "W", "W"]);
    }

    #[test]
    fn multibyte_chars_are_never_split() {
        let style = StyleSpec::new("mono", 100, false);
        let text = "字幕字幕字幕字幕字幕字幕字幕字幕字幕字幕";
        let out = wrap(text, 400.0, &mono(), &style).unwrap();
        assert!(out.lines.iter().all(|l| l.chars().count() <= 8));
        assert_eq!(out.lines.concat(), text);
    }

    #[test]
    fn progress_bounds_hold() {
        let style = StyleSpec::new("mono", 60, false);
        for text in ["x", "hello world", "a very long caption that wraps a lot"] {
            for width in [1.0, 35.0, 100.0, 5000.0] {
                let out = wrap(text, width, &mono(), &style).unwrap();
                assert!(!out.lines.is_empty());
                assert!(out.lines.len() <= text.chars().count());
                assert_eq!(
                    out.total_height_px,
                    out.lines.len() as f64 * out.line_height_px
                );
            }
        }
    }

    #[test]
    fn idempotent() {
        let style = StyleSpec::new("mono", 45, true);
        let text = "Repeatable\nlayout of the same caption";
        let a = wrap(text, 300.0, &mono(), &style).unwrap();
        let b = wrap(text, 300.0, &mono(), &style).unwrap();
        assert_eq!(a, b);
    }

    struct Counting {
        calls: Cell<usize>,
    }

    impl TextMeasurer for Counting {
        type Error = Infallible;

        fn measure_width(&self, text: &str, _style: &StyleSpec) -> Result<f64, Infallible> {
            self.calls.set(self.calls.get() + 1);
            Ok(text.chars().count() as f64)
        }
    }

    #[test]
    fn one_measurement_per_char() {
        let m = Counting { calls: Cell::new(0) };
        let style = StyleSpec::new("x", 10, false);
        wrap("abc\nde", 100.0, &m, &style).unwrap();
        assert_eq!(m.calls.get(), 5);
    }

    struct Failing;

    impl TextMeasurer for Failing {
        type Error = String;

        fn measure_width(&self, _text: &str, _style: &StyleSpec) -> Result<f64, String> {
            Err("bad font".into())
        }
    }

    #[test]
    fn measurement_errors_propagate() {
        let style = StyleSpec::new("x", 10, false);
        assert_eq!(wrap("a", 100.0, &Failing, &style).unwrap_err(), "bad font");
        // no chars, no measurement
        assert!(wrap("", 100.0, &Failing, &style).is_ok());
    }
}
