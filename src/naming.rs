//! Deterministic display-name de-duplication.

use std::collections::BTreeSet;

/// Upper bound on rename attempts for one candidate.
pub const MAX_DEDUPE_ATTEMPTS: usize = 100;

/// Return a name not in `taken`, derived from `candidate`.
///
/// A trailing `-<digits>` suffix is incremented; otherwise `-1` is appended.
/// After [`MAX_DEDUPE_ATTEMPTS`] the last candidate is returned even if it
/// still collides.
pub fn dedupe(candidate: &str, taken: &BTreeSet<String>) -> String {
    let mut name = candidate.to_string();
    let mut attempts = 0;
    while taken.contains(&name) && attempts < MAX_DEDUPE_ATTEMPTS {
        name = next_candidate(&name);
        attempts += 1;
    }
    name
}

/// Dedupe `candidate` and reserve the result in `taken`.
pub fn allocate(candidate: &str, taken: &mut BTreeSet<String>) -> String {
    let name = dedupe(candidate, taken);
    taken.insert(name.clone());
    name
}

fn next_candidate(name: &str) -> String {
    if let Some((stem, counter)) = split_counter_suffix(name) {
        if let Some(next) = counter.checked_add(1) {
            return format!("{stem}-{next}");
        }
    }
    format!("{name}-1")
}

/// Split `stem-<digits>` into `(stem, digits)`.
fn split_counter_suffix(name: &str) -> Option<(&str, u64)> {
    let stem_and_dash = name.trim_end_matches(|c: char| c.is_ascii_digit());
    if stem_and_dash.len() == name.len() {
        return None;
    }
    let stem = stem_and_dash.strip_suffix('-')?;
    let counter = name[stem_and_dash.len()..].parse().ok()?;
    Some((stem, counter))
}
