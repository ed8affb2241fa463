/// Greedy word wrap. Words longer than `width` (file paths, mostly) are split
/// across lines instead of overflowing the error panel.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if word_len > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let chars: Vec<char> = word.chars().collect();
            let mut chunks = chars.chunks(width).peekable();
            while let Some(chunk) = chunks.next() {
                let piece: String = chunk.iter().collect();
                if chunks.peek().is_some() {
                    lines.push(piece);
                } else {
                    current_len = chunk.len();
                    current = piece;
                }
            }
        } else if current.is_empty() {
            current = word.to_string();
            current_len = word_len;
        } else if current_len + 1 + word_len <= width {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
            current_len = word_len;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}

pub fn truncate(s: &str, max_len: usize) -> String {
    match max_len {
        0 => return String::new(),
        1 => return "…".to_string(),
        _ => {}
    }

    if s.chars().count() <= max_len {
        return s.to_string();
    }

    let mut out: String = s.chars().take(max_len - 1).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_fits_on_one_line() {
        assert_eq!(wrap("bond (0, 7) is invalid", 40), vec!["bond (0, 7) is invalid"]);
    }

    #[test]
    fn wrap_breaks_between_words() {
        assert_eq!(
            wrap("no typing rule matches particle", 15),
            vec!["no typing rule", "matches", "particle"]
        );
    }

    #[test]
    fn wrap_splits_overlong_words() {
        assert_eq!(
            wrap("open /very/long/path ok", 8),
            vec!["open", "/very/lo", "ng/path", "ok"]
        );
    }

    #[test]
    fn wrap_empty_text_yields_one_blank_line() {
        assert_eq!(wrap("   ", 10), vec![String::new()]);
    }

    #[test]
    fn truncate_keeps_short_strings() {
        assert_eq!(truncate("opls_135", 10), "opls_135");
        assert_eq!(truncate("opls_135", 8), "opls_135");
    }

    #[test]
    fn truncate_marks_cut_with_ellipsis() {
        assert_eq!(truncate("Structure Summary", 9), "Structur…");
        assert_eq!(truncate("αβγδε", 3), "αβ…");
    }
}
