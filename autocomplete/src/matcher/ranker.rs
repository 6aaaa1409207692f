//! Ordering of scored candidates.
use super::suggestion::Suggestion;

/// Sorts candidates best first and keeps at most `n_best` of them.
pub fn rank(mut candidates: Vec<Suggestion>, n_best: Option<usize>) -> Vec<Suggestion> {
    match n_best {
        Some(n) if n < candidates.len() => {
            if n > 0 {
                candidates.select_nth_unstable(n - 1);
            }
            candidates.truncate(n);
            candidates.sort();
        }
        _ => candidates.sort(),
    }

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(value: &str, score: f32, usage_count: u64, prefix_match: bool) -> Suggestion {
        Suggestion::new(value.into(), score, usage_count, prefix_match)
    }

    fn values(v: &[Suggestion]) -> Vec<&str> {
        v.iter().map(|x| x.value()).collect()
    }

    #[test]
    fn order() {
        let ranked = rank(
            vec![
                s("fuzzy", 0.9, 50, false),
                s("zebra", 0.2, 1, true),
                s("apple", 0.2, 1, true),
                s("often", 0.2, 7, true),
                s("close", 0.5, 1, true),
            ],
            None,
        );

        assert_eq!(values(&ranked), vec!["close", "often", "apple", "zebra", "fuzzy"]);
    }

    #[test]
    fn truncates() {
        let candidates = (0..20u64)
            .map(|i| s(&format!("w{:02}", i), 0.5, i, false))
            .collect::<Vec<_>>();

        let ranked = rank(candidates.clone(), Some(3));
        assert_eq!(values(&ranked), vec!["w19", "w18", "w17"]);

        assert!(rank(candidates.clone(), Some(0)).is_empty());
        assert_eq!(rank(candidates, Some(50)).len(), 20);
    }
}
