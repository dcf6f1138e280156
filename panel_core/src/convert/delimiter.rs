// Comma-separated to newline-separated list reshaping.
use crate::status::{require_content, trim_blank, Outcome};

/// Splits on commas, trims every value and drops the ones left empty.
///
/// # Example
/// ```
/// use panel_core::convert::delimiter::split_commas;
/// assert_eq!(split_commas(" a, ,b ,"), vec!["a", "b"]);
/// ```
pub fn split_commas(input: &str) -> Vec<&str> {
    input
        .split(',')
        .map(trim_blank)
        .filter(|item| !item.is_empty())
        .collect()
}

/// Rewrites a comma list as one value per line.
pub fn comma_to_newline(buffer: &str) -> Outcome {
    if let Err(failure) = require_content(buffer) {
        return Outcome::failure(buffer, failure);
    }
    let values = split_commas(buffer);
    tracing::debug!(count = values.len(), "split comma list");
    Outcome::success(
        values.join("\n"),
        format!(
            "Converted {} comma-separated values to newlines",
            values.len()
        ),
    )
}
