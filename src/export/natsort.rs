//! Natural ("human") ordering of type names.
//!
//! Names are split into alternating runs of digits and non-digits. Digit runs
//! compare by numeric value, other runs compare ASCII case-insensitively, and a
//! name that is a run-prefix of another sorts first. Remaining ties fall back
//! to byte order so the ordering is total.

use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Run<'a> {
    Text(&'a str),
    Number(&'a str),
}

fn runs(s: &str) -> Vec<Run<'_>> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut in_digits = None;

    for (idx, ch) in s.char_indices() {
        let digit = ch.is_ascii_digit();
        match in_digits {
            Some(prev) if prev != digit => {
                out.push(make_run(&s[start..idx], prev));
                start = idx;
            }
            _ => {}
        }
        in_digits = Some(digit);
    }
    if let Some(digit) = in_digits {
        out.push(make_run(&s[start..], digit));
    }
    out
}

impl Run<'_> {
    fn as_str(&self) -> &str {
        match self {
            Run::Text(s) | Run::Number(s) => s,
        }
    }
}

fn make_run(text: &str, digit: bool) -> Run<'_> {
    if digit {
        Run::Number(text)
    } else {
        Run::Text(text)
    }
}

fn cmp_numeric(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn cmp_text(a: &str, b: &str) -> Ordering {
    a.bytes()
        .map(|c| c.to_ascii_lowercase())
        .cmp(b.bytes().map(|c| c.to_ascii_lowercase()))
}

fn cmp_run(a: &Run<'_>, b: &Run<'_>) -> Ordering {
    match (a, b) {
        (Run::Number(x), Run::Number(y)) => cmp_numeric(x, y),
        _ => cmp_text(a.as_str(), b.as_str()),
    }
}

/// Compares two strings in natural order.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let ra = runs(a);
    let rb = runs(b);
    for (x, y) in ra.iter().zip(rb.iter()) {
        let ord = cmp_run(x, y);
        if ord != Ordering::Equal {
            return ord;
        }
    }
    ra.len().cmp(&rb.len()).then_with(|| a.cmp(b))
}

/// Sorts `names` in place in natural order. The sort is stable.
pub fn natural_sort<S: AsRef<str>>(names: &mut [S]) {
    names.sort_by(|a, b| natural_cmp(a.as_ref(), b.as_ref()));
}
