//! Candidate selection by title

use autoweb_core_types::TitleMatch;

use crate::types::{Candidate, CandidatePool};

/// Picks the candidate for `title`.
///
/// Blank title: first candidate. Otherwise an exact (case-sensitive) title wins,
/// then a case-insensitive substring match in either direction, then the first
/// candidate. Ties resolve to pool order. An element with an empty title counts
/// as a substring match of any title.
pub fn select_candidate<'a>(
    pool: &'a CandidatePool,
    title: &str,
) -> Option<(&'a Candidate, TitleMatch)> {
    let candidates = pool.candidates();
    let first = candidates.first()?;

    if title.trim().is_empty() {
        return Some((first, TitleMatch::Untitled));
    }

    if let Some(exact) = candidates.iter().find(|c| c.title() == title) {
        return Some((exact, TitleMatch::Exact));
    }

    let wanted = title.to_lowercase();
    let partial = candidates.iter().find(|c| {
        let observed = c.title().to_lowercase();
        observed.contains(&wanted) || wanted.contains(&observed)
    });
    if let Some(partial) = partial {
        return Some((partial, TitleMatch::Partial));
    }

    Some((first, TitleMatch::Fallback))
}

#[cfg(test)]
mod tests {
    use super::*;
    use action_primitives::{LocateResponse, LocateStrategy, RawNode, StrategyMatches};
    use autoweb_core_types::{Rect, Viewport};

    fn pool(titles: &[&str]) -> CandidatePool {
        let matches = titles
            .iter()
            .enumerate()
            .map(|(i, title)| RawNode {
                key: i as u64 + 1,
                title: title.to_string(),
                rect: Rect::new(0.0, 0.0, 10.0, 10.0),
                ..Default::default()
            })
            .collect();
        CandidatePool::from_response(LocateResponse {
            viewport: Viewport::new(375.0, 667.0),
            strategies: vec![StrategyMatches {
                strategy: LocateStrategy::Selector,
                matches,
                error: None,
            }],
        })
    }

    #[test]
    fn blank_title_takes_first() {
        let pool = pool(&["Play", "Buy"]);
        let (chosen, how) = select_candidate(&pool, "  ").unwrap();
        assert_eq!(chosen.title(), "Play");
        assert_eq!(how, TitleMatch::Untitled);
    }

    #[test]
    fn exact_title_beats_pool_order() {
        let pool = pool(&["Buy now!", "Buy", "buy"]);
        let (chosen, how) = select_candidate(&pool, "buy").unwrap();
        assert_eq!(chosen.node.key, 3);
        assert_eq!(how, TitleMatch::Exact);
    }

    #[test]
    fn partial_match_is_case_insensitive_both_ways() {
        let pool = pool(&["Settings", "Buy Now"]);
        let (chosen, how) = select_candidate(&pool, "buy").unwrap();
        assert_eq!(chosen.node.key, 2);
        assert_eq!(how, TitleMatch::Partial);

        let (chosen, _) = select_candidate(&pool, "Open settings panel").unwrap();
        assert_eq!(chosen.node.key, 1);
    }

    #[test]
    fn unmatched_title_falls_back_to_first() {
        let pool = pool(&["Settings", "Help"]);
        let (chosen, how) = select_candidate(&pool, "Checkout").unwrap();
        assert_eq!(chosen.node.key, 1);
        assert_eq!(how, TitleMatch::Fallback);
    }

    #[test]
    fn untitled_candidates_match_any_title_partially() {
        let pool = pool(&["Settings", "", "Checkout later"]);
        let (chosen, how) = select_candidate(&pool, "Checkout").unwrap();
        assert_eq!(chosen.node.key, 2);
        assert_eq!(how, TitleMatch::Partial);
    }

    #[test]
    fn empty_pool_selects_nothing() {
        assert!(select_candidate(&pool(&[]), "x").is_none());
    }
}
