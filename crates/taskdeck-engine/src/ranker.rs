//! Query ranking.
//!
//! `rank` is a pure function of (collection snapshot, query), recomputed
//! on every keystroke. An empty or whitespace-only query yields recency
//! ordering: `last_run` descending, never-run tasks after ever-run ones,
//! ties broken by insertion order. A non-empty query scores each task's
//! name and description with a normalized edit-distance ratio in
//! [0, 100], drops anything under [`SCORE_CUTOFF`], and orders by score
//! descending, then recency, then insertion order.
//!
//! Scoring: the haystack is the lowercased name (plus description when
//! present). The score is the better of the whole-haystack ratio and the
//! best per-word ratio discounted to 95%, so an exact whole-string match
//! always outranks a word-level match. Identical strings score 100,
//! disjoint strings land near 0, and every injected edit can only lower
//! the ratio.

use std::cmp::Ordering;

use strsim::normalized_levenshtein;

use taskdeck_core::constants::SCORE_CUTOFF;
use taskdeck_core::task::Task;

/// Order a collection snapshot against a free-text query.
#[must_use]
pub fn rank<'a>(tasks: &'a [Task], query: &str) -> Vec<&'a Task> {
    let query = query.trim();
    if query.is_empty() {
        let mut out: Vec<&Task> = tasks.iter().collect();
        out.sort_by(|a, b| cmp_recency(a, b));
        return out;
    }

    let mut scored: Vec<(u8, &Task)> = tasks
        .iter()
        .filter_map(|task| {
            let score = similarity(query, &task.name, &task.description);
            (score >= SCORE_CUTOFF).then_some((score, task))
        })
        .collect();
    // Stable sort: equal (score, recency) pairs keep insertion order.
    scored.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| cmp_recency(a.1, b.1)));
    scored.into_iter().map(|(_, task)| task).collect()
}

/// Similarity of `query` to a task's name and description, in [0, 100].
#[must_use]
pub fn similarity(query: &str, name: &str, description: &str) -> u8 {
    let query = query.trim().to_lowercase();
    let haystack = if description.is_empty() {
        name.to_lowercase()
    } else {
        format!("{name} {description}").to_lowercase()
    };

    let whole = normalized_levenshtein(&query, &haystack);
    let word_best = haystack
        .split_whitespace()
        .map(|word| normalized_levenshtein(&query, word))
        .fold(0.0_f64, f64::max);

    let best = whole.max(word_best * 0.95);
    (best * 100.0).round() as u8
}

/// Recency ordering: `last_run` descending, never-run tasks last.
fn cmp_recency(a: &Task, b: &Task) -> Ordering {
    match (a.last_run, b.last_run) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
