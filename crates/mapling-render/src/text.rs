use regex::Regex;

fn math_span_regex() -> &'static Regex {
    static RE: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\$[^$]+\$").expect("valid regex"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment<'a> {
    Plain(&'a str),
    Math(&'a str),
}

/// Splits a label into alternating plain/math segments on `$...$` spans.
///
/// An unpaired trailing `$` never forms a span, so it stays inside a plain
/// segment.
fn split_math_segments(label: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut last = 0usize;
    for m in math_span_regex().find_iter(label) {
        if m.start() > last {
            out.push(Segment::Plain(&label[last..m.start()]));
        }
        out.push(Segment::Math(m.as_str()));
        last = m.end();
    }
    if last < label.len() {
        out.push(Segment::Plain(&label[last..]));
    }
    out
}

fn chunk_plain(text: &str, max_width: usize, out: &mut String) {
    let chars: Vec<char> = text.chars().collect();
    for (i, chunk) in chars.chunks(max_width).enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.extend(chunk.iter());
    }
}

/// Wraps a label to `max_width` characters per line without ever splitting a
/// `$...$` math span.
///
/// Plain segments longer than `max_width` are hard-chunked every `max_width`
/// characters (fixed-width, not word-aware, matching the upstream renderer's
/// behavior for dense notes). Math segments pass through whole regardless of
/// length: rendering the notation requires it to stay intact.
pub fn wrap_label(label: &str, max_width: usize) -> String {
    let max_width = max_width.max(1);
    let mut out = String::with_capacity(label.len() + label.len() / max_width);
    for segment in split_math_segments(label) {
        match segment {
            Segment::Math(math) => out.push_str(math),
            Segment::Plain(plain) => {
                if plain.chars().count() > max_width {
                    chunk_plain(plain, max_width, &mut out);
                } else {
                    out.push_str(plain);
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_chunked_fixed_width() {
        let wrapped = wrap_label("normal text of length thirty..", 10);
        let lines: Vec<&str> = wrapped.split('\n').collect();
        assert_eq!(lines, ["normal tex", "t of lengt", "h thirty.."]);
        assert!(lines.iter().all(|l| l.chars().count() <= 10));
    }

    #[test]
    fn short_text_passes_through() {
        assert_eq!(wrap_label("short", 10), "short");
        assert_eq!(wrap_label("", 10), "");
    }

    #[test]
    fn math_span_is_never_split() {
        let wrapped = wrap_label("a $x^2+y^2=1$ b", 5);
        assert!(wrapped.contains("$x^2+y^2=1$"));
    }

    #[test]
    fn long_math_span_exceeding_width_stays_whole() {
        let wrapped = wrap_label("$\\int_0^\\infty e^{-x^2} dx$", 5);
        assert_eq!(wrapped, "$\\int_0^\\infty e^{-x^2} dx$");
        assert!(!wrapped.contains('\n'));
    }

    #[test]
    fn plain_segments_around_math_are_wrapped() {
        let wrapped = wrap_label("aaaaaaaaaa$x+y$bbbbbbbbbb", 4);
        assert_eq!(wrapped, "aaaa\naaaa\naa$x+y$bbbb\nbbbb\nbb");
    }

    #[test]
    fn unpaired_dollar_is_plain_text() {
        let wrapped = wrap_label("price is $5 today ok", 10);
        assert_eq!(wrapped, "price is $\n5 today ok");
    }

    #[test]
    fn multibyte_text_wraps_by_char_count() {
        let wrapped = wrap_label("数学は美しい言語である", 4);
        let lines: Vec<&str> = wrapped.split('\n').collect();
        assert_eq!(lines.len(), 3);
        assert!(lines.iter().all(|l| l.chars().count() <= 4));
    }

    #[test]
    fn width_is_clamped_to_at_least_one() {
        let wrapped = wrap_label("abc", 0);
        assert_eq!(wrapped, "a\nb\nc");
    }
}
