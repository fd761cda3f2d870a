//! Ranking of matched intents.

use crate::Intent;
use std::cmp::Ordering;

/// Sort `(order, intent)` pairs by descending score, then ascending order.
///
/// Scores are validated to be finite at registration, so `total_cmp` agrees with
/// the numeric ordering here.
pub(crate) fn rank_intents(mut matched: Vec<(usize, Intent)>) -> Vec<Intent> {
    matched.sort_by(|(order_a, a), (order_b, b)| match b.score.total_cmp(&a.score) {
        Ordering::Equal => order_a.cmp(order_b),
        other => other,
    });
    matched.into_iter().map(|(_, intent)| intent).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intent(name: &str, score: f64) -> Intent {
        Intent { name: name.to_string(), score, entities: Vec::new() }
    }

    #[test]
    fn ties_keep_registration_order_regardless_of_input_order() {
        let ranked = rank_intents(vec![(3, intent("d", 0.5)), (0, intent("a", 0.5)), (2, intent("c", 0.9))]);
        let names: Vec<_> = ranked.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["c", "a", "d"]);
    }

    #[test]
    fn empty_input_stays_empty() {
        assert!(rank_intents(Vec::new()).is_empty());
    }
}
