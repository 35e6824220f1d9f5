//! Individual validation checks.
//!
//! Each check is a pure function; the service layer owns ordering and
//! message formatting.

use regex::Regex;

/// Keywords from `keywords` that occur in `text`, case-insensitive
/// substring match, in table order.
#[must_use]
pub fn find_keywords<'a>(text: &str, keywords: &'a [String]) -> Vec<&'a str> {
    let text_lower = text.to_lowercase();
    keywords
        .iter()
        .filter(|keyword| text_lower.contains(keyword.as_str()))
        .map(String::as_str)
        .collect()
}

/// Fraction of characters in `text` that are uppercase, over the total
/// character count. Empty text has ratio 0.
#[must_use]
pub fn caps_ratio(text: &str) -> f64 {
    let total = text.chars().count();
    if total == 0 {
        return 0.0;
    }
    let upper = text.chars().filter(|c| c.is_uppercase()).count();
    upper as f64 / total as f64
}

/// Number of URL-like substrings in `text`.
#[must_use]
pub fn count_urls(url_pattern: &Regex, text: &str) -> usize {
    url_pattern.find_iter(text).count()
}

/// True iff any single character repeats at least `run_threshold` times
/// consecutively.
///
/// Hand-rolled scan: backreferences are outside the regex crate's language.
#[must_use]
pub fn has_repeated_run(text: &str, run_threshold: usize) -> bool {
    if run_threshold == 0 {
        return true;
    }
    let mut previous: Option<char> = None;
    let mut run = 0usize;
    for c in text.chars() {
        if Some(c) == previous {
            run += 1;
        } else {
            previous = Some(c);
            run = 1;
        }
        if run >= run_threshold {
            return true;
        }
    }
    false
}
