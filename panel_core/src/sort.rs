//! Line sorting with natural, case- and accent-insensitive ordering.
//!
//! `item2` sorts before `item10` because digit runs compare by numeric value,
//! and `Apple`/`apple`/`Äpple` compare equal so their relative input order is kept.

use std::cmp::Ordering;
use std::iter::Peekable;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::status::{is_blank_char, require_content, Failure, Outcome};

/// Direction requested by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    /// Only the exact label `"ascending"` sorts ascending; every other label,
    /// typos included, sorts descending.
    pub fn from_label(label: &str) -> Self {
        if label == "ascending" {
            Self::Ascending
        } else {
            Self::Descending
        }
    }
}

/// Compares two strings in natural order, ignoring case and accents.
///
/// # Example
/// ```
/// use std::cmp::Ordering;
/// use panel_core::sort::natural_cmp;
/// assert_eq!(natural_cmp("item2", "item10"), Ordering::Less);
/// assert_eq!(natural_cmp("ABC", "abc"), Ordering::Equal);
/// assert_eq!(natural_cmp("Éclair", "eclair"), Ordering::Equal);
/// ```
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = fold(a).peekable();
    let mut right = fold(b).peekable();
    loop {
        let (l, r) = match (left.peek(), right.peek()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(&l), Some(&r)) => (l, r),
        };
        let ord = if l.is_ascii_digit() && r.is_ascii_digit() {
            let l_run = take_digits(&mut left);
            let r_run = take_digits(&mut right);
            compare_digit_runs(&l_run, &r_run)
        } else {
            left.next();
            right.next();
            l.cmp(&r)
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
}

// Canonical decomposition with combining marks dropped, then lowercased.
fn fold(text: &str) -> impl Iterator<Item = char> + '_ {
    text.nfd()
        .filter(|ch| !is_combining_mark(*ch))
        .flat_map(char::to_lowercase)
}

fn take_digits(chars: &mut Peekable<impl Iterator<Item = char>>) -> String {
    let mut run = String::new();
    while let Some(&ch) = chars.peek() {
        if !ch.is_ascii_digit() {
            break;
        }
        run.push(ch);
        chars.next();
    }
    run
}

// Compares by value without parsing, so runs longer than any integer type still work.
fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Non-blank lines of `buffer`, kept verbatim (no trimming).
pub fn content_lines(buffer: &str) -> Vec<&str> {
    buffer
        .split('\n')
        .filter(|line| !line.trim_matches(is_blank_char).is_empty())
        .collect()
}

/// Sorts the buffer's non-blank lines; `order` is echoed verbatim in the status.
pub fn sort_lines(buffer: &str, order: &str) -> Outcome {
    match try_sort(buffer, SortOrder::from_label(order)) {
        Ok(lines) => {
            tracing::debug!(count = lines.len(), order, "sorted lines");
            Outcome::success(
                lines.join("\n"),
                format!("Sorted {} lines in {} order", lines.len(), order),
            )
        }
        Err(failure) => Outcome::failure(buffer, failure),
    }
}

fn try_sort(buffer: &str, order: SortOrder) -> Result<Vec<&str>, Failure> {
    require_content(buffer)?;
    let mut lines = content_lines(buffer);
    if lines.is_empty() {
        return Err(Failure::NoLines);
    }
    match order {
        SortOrder::Ascending => lines.sort_by(|a, b| natural_cmp(a, b)),
        SortOrder::Descending => lines.sort_by(|a, b| natural_cmp(b, a)),
    }
    Ok(lines)
}
