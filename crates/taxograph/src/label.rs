//! Label formatting: truncation and paper lists.
//!
//! Lengths are counted in `char`s, so multi-byte titles are never split in
//! the middle of a character.

use std::borrow::Cow;

const ELLIPSIS: &str = "...";
const BULLET: &str = "•";

/// Shortens `label` to at most `max` characters.
///
/// A trailing parenthesized suffix such as `(Smith, 2020)` is kept verbatim
/// and only the text before it is shortened, so the result may exceed `max`
/// when the suffix alone is longer.
///
/// ```
/// # use taxograph::label::truncate;
/// assert_eq!(truncate("A very long category name", 10), "A very ...");
/// assert_eq!(
///     truncate("Some Title About Retrieval (Smith, 2020)", 24),
///     "Some Ti... (Smith, 2020)"
/// );
/// assert_eq!(truncate("Short", 10), "Short");
/// ```
pub fn truncate(label: &str, max: usize) -> Cow<'_, str> {
    let len = label.chars().count();
    if len <= max {
        return Cow::Borrowed(label);
    }

    if max < ELLIPSIS.len() {
        return Cow::Owned(ELLIPSIS.chars().take(max).collect());
    }

    if let Some((prefix, suffix)) = split_suffix(label) {
        let prefix = prefix.trim_end();
        let prefix_len = prefix.chars().count();
        let suffix_len = suffix.chars().count();
        if prefix_len + 1 + suffix_len <= max {
            return Cow::Owned(format!("{prefix} {suffix}"));
        }

        // "<prefix>... <suffix>": three dots and a space around the suffix
        let room = max.saturating_sub(suffix_len + ELLIPSIS.len() + 1);
        if room == 0 {
            return Cow::Owned(format!("{ELLIPSIS} {suffix}"));
        }
        let prefix: String = prefix.chars().take(room).collect();
        return Cow::Owned(format!("{prefix}{ELLIPSIS} {suffix}"));
    }

    let kept: String = label.chars().take(max - ELLIPSIS.len()).collect();
    Cow::Owned(format!("{kept}{ELLIPSIS}"))
}

/// Applies [`truncate`] when a limit is configured.
pub fn truncate_opt(label: &str, max: Option<usize>) -> Cow<'_, str> {
    match max {
        Some(max) => truncate(label, max),
        None => Cow::Borrowed(label),
    }
}

/// Splits `"Title (Suffix)"` into `("Title ", "(Suffix)")`.
///
/// Returns `None` unless the label ends with `)` and has a non-empty text
/// before the matching `(`.
fn split_suffix(label: &str) -> Option<(&str, &str)> {
    if !label.ends_with(')') {
        return None;
    }
    let open = label.rfind('(')?;
    let (prefix, suffix) = label.split_at(open);
    (!prefix.trim().is_empty()).then_some((prefix, suffix))
}

/// Formats a paper list as the label of a content node, one `• title` line
/// per paper.
///
/// Line breaks inside a title are folded into spaces so that every paper
/// stays on exactly one line.
pub fn content_label(papers: &[String], max_item_length: Option<usize>) -> String {
    papers
        .iter()
        .map(|title| {
            let title = single_line(title);
            format!("{BULLET} {}", truncate_opt(&title, max_item_length))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn single_line(text: &str) -> Cow<'_, str> {
    if text.contains(['\n', '\r']) {
        Cow::Owned(text.split_whitespace().collect::<Vec<_>>().join(" "))
    } else {
        Cow::Borrowed(text)
    }
}
