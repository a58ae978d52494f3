//! Player name normalization and lookup.
//!
//! The leaderboard, the league spreadsheet and the rankings feeds all spell
//! names slightly differently (`"SAM BURNS"`, `"Sam Burns"`, `"Davis Love III"`,
//! `"J.T. Poston"`). Joins go through [`find_by_name`] so every consumer uses
//! the same policy.

use tracing::debug;

const SUFFIXES: &[&str] = &["jr", "sr", "ii", "iii", "iv"];

/// Canonical comparison form of a player name.
///
/// Lowercases, drops periods, apostrophes and commas, removes trailing
/// generational suffixes and collapses whitespace.
pub fn normalize(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| !matches!(c, '.' | '\'' | '\u{2019}' | ','))
        .collect::<String>()
        .to_lowercase();

    let mut words: Vec<&str> = cleaned.split_whitespace().collect();
    while words.len() > 1 && words.last().is_some_and(|w| SUFFIXES.contains(w)) {
        words.pop();
    }
    words.join(" ")
}

/// Case-insensitive substring test used by `--search` filters.
pub fn matches_search(name: &str, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    query.is_empty() || name.to_lowercase().contains(&query)
}

/// Index of `query` among `items`.
///
/// An exact display-name match wins. Otherwise the single item whose
/// normalized name equals the normalized query is returned; zero or several
/// such items resolve to `None`.
pub fn position_by_name<T, F>(items: &[T], query: &str, name_of: F) -> Option<usize>
where
    F: Fn(&T) -> &str,
{
    if let Some(exact) = items.iter().position(|item| name_of(item) == query) {
        return Some(exact);
    }

    let wanted = normalize(query);
    if wanted.is_empty() {
        return None;
    }

    let mut candidates = items
        .iter()
        .enumerate()
        .filter(|(_, item)| normalize(name_of(item)) == wanted)
        .map(|(index, _)| index);
    let first = candidates.next()?;
    if candidates.next().is_some() {
        debug!(name = query, "ambiguous normalized name match, ignoring");
        return None;
    }
    Some(first)
}

/// Look up `query` among `items` with the [`position_by_name`] policy.
pub fn find_by_name<'a, T, F>(items: &'a [T], query: &str, name_of: F) -> Option<&'a T>
where
    F: Fn(&T) -> &str,
{
    position_by_name(items, query, name_of).map(|index| &items[index])
}
