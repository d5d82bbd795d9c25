// =========================================================================
// Ranking metrics contract: bounds and degenerate inputs.
//
// References:
//   - Voorhees (1999) "The TREC-8 Question Answering Track Report" (MRR)
// =========================================================================

use super::*;
use proptest::prelude::*;

fn arb_case() -> impl Strategy<Value = (RecommendationMap, RelevantItems)> {
    // Recommendation lists never repeat an item.
    let list = prop::collection::vec(0u8..12, 0..8).prop_map(|v| {
        let mut seen = std::collections::HashSet::new();
        v.into_iter()
            .filter(|i| seen.insert(*i))
            .map(|i| format!("i{i}"))
            .collect::<Vec<_>>()
    });
    let set = prop::collection::btree_set(0u8..12, 0..5)
        .prop_map(|s| s.into_iter().map(|i| format!("i{i}")).collect::<BTreeSet<_>>());
    (
        prop::collection::btree_map(0u8..6, list, 0..6),
        prop::collection::btree_map(0u8..6, set, 0..6),
    )
        .prop_map(|(recs, rel)| {
            (
                recs.into_iter().map(|(u, l)| (format!("u{u}"), l)).collect(),
                rel.into_iter().map(|(u, s)| (format!("u{u}"), s)).collect(),
            )
        })
}

proptest! {
    #[test]
    fn prop_all_metrics_in_unit_interval((recs, rel) in arb_case(), k in 0usize..10) {
        let m = evaluate(&recs, &rel, k);
        for value in [m.hit_rate, m.precision_at_k, m.recall_at_k, m.mrr] {
            prop_assert!(value.is_finite());
            prop_assert!((0.0..=1.0).contains(&value), "metric {value} out of [0,1]");
        }
    }

    #[test]
    fn prop_zero_when_no_qualifying_users((recs, _rel) in arb_case(), k in 1usize..10) {
        let m = evaluate(&recs, &RelevantItems::new(), k);
        prop_assert_eq!(m.as_tuple(), (0.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn prop_mrr_never_exceeds_hit_rate((recs, rel) in arb_case()) {
        prop_assert!(mrr(&recs, &rel) <= hit_rate(&recs, &rel) + 1e-12);
    }

    #[test]
    fn prop_recall_monotone_in_k((recs, rel) in arb_case(), k in 0usize..8) {
        prop_assert!(recall_at_k(&recs, &rel, k) <= recall_at_k(&recs, &rel, k + 1) + 1e-12);
    }
}
