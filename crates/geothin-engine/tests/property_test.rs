use std::collections::HashMap;

use geothin_core::models::{CompositionRow, RecordRow, ThinningInput, ThinningOutcome};
use geothin_core::types::{DistanceMode, RemovalPolicy, SimilarityMetric};
use geothin_core::ThinningParams;
use geothin_engine::neighbors::distance;
use geothin_engine::{thin, ThinningEngine};
use proptest::prelude::*;

const CATEGORIES: u32 = 5;

/// `(x, y, category bitmask)` per record; masks are never empty.
fn layout() -> impl Strategy<Value = Vec<(f64, f64, u8)>> {
    prop::collection::vec((0u8..60, 0u8..60, 1u8..32), 2..40).prop_map(|v| {
        v.into_iter()
            .map(|(x, y, mask)| (f64::from(x), f64::from(y), mask))
            .collect()
    })
}

fn build(layout: &[(f64, f64, u8)]) -> ThinningInput {
    let mut records = Vec::new();
    let mut compositions = Vec::new();
    for (i, &(x, y, mask)) in layout.iter().enumerate() {
        let key = format!("r{i}");
        for bit in 0..CATEGORIES {
            if mask & (1 << bit) != 0 {
                compositions.push(CompositionRow::new(key.as_str(), format!("c{bit}"), 1.0));
            }
        }
        records.push(RecordRow::new(key, x, y));
    }
    ThinningInput {
        records,
        compositions,
    }
}

/// Weighted layout: a bitmask of present categories plus a weight per category.
fn weighted_layout() -> impl Strategy<Value = Vec<(f64, f64, u8, Vec<f64>)>> {
    prop::collection::vec(
        (
            0u8..60,
            0u8..60,
            1u8..32,
            prop::collection::vec(0.1f64..10.0, CATEGORIES as usize),
        ),
        2..40,
    )
    .prop_map(|v| {
        v.into_iter()
            .map(|(x, y, mask, weights)| (f64::from(x), f64::from(y), mask, weights))
            .collect()
    })
}

fn build_weighted(layout: &[(f64, f64, u8, Vec<f64>)]) -> ThinningInput {
    let mut records = Vec::new();
    let mut compositions = Vec::new();
    for (i, (x, y, mask, weights)) in layout.iter().enumerate() {
        let key = format!("r{i}");
        for bit in 0..CATEGORIES {
            if mask & (1 << bit) != 0 {
                compositions.push(CompositionRow::new(key.as_str(), format!("c{bit}"), weights[bit as usize]));
            }
        }
        records.push(RecordRow::new(key, *x, *y));
    }
    ThinningInput {
        records,
        compositions,
    }
}

/// Bray–Curtis score computed directly over all categories.
fn weighted_similarity(a: (u8, &[f64]), b: (u8, &[f64])) -> f64 {
    let weight = |(mask, weights): (u8, &[f64]), bit: u32| {
        if mask & (1 << bit) != 0 {
            weights[bit as usize]
        } else {
            0.0
        }
    };
    let (mut abs_diff, mut total) = (0.0, 0.0);
    for bit in 0..CATEGORIES {
        let (wa, wb) = (weight(a, bit), weight(b, bit));
        abs_diff += (wa - wb).abs();
        total += wa + wb;
    }
    1.0 - abs_diff / total
}

fn restrict(input: &ThinningInput, outcome: &ThinningOutcome) -> ThinningInput {
    let kept: Vec<&str> = outcome.survivors.iter().map(|r| r.key.as_str()).collect();
    ThinningInput {
        records: outcome.survivors.clone(),
        compositions: input
            .compositions
            .iter()
            .filter(|c| kept.contains(&c.key.as_str()))
            .cloned()
            .collect(),
    }
}

/// Presence/absence score computed directly from bitmasks.
fn mask_similarity(metric: SimilarityMetric, a: u8, b: u8) -> f64 {
    let shared = f64::from((a & b).count_ones());
    let only_a = f64::from((a & !b).count_ones());
    let only_b = f64::from((b & !a).count_ones());
    let unique = only_a + only_b;
    match metric {
        SimilarityMetric::Sorensen => 1.0 - unique / (2.0 * shared + unique),
        SimilarityMetric::Jaccard => 1.0 - unique / (shared + unique),
        SimilarityMetric::Simpson => {
            let fewer = only_a.min(only_b);
            1.0 - fewer / (fewer + shared)
        }
        SimilarityMetric::BrayCurtis => unreachable!("weights are all 1"),
    }
}

fn presence_metric() -> impl Strategy<Value = SimilarityMetric> {
    prop_oneof![
        Just(SimilarityMetric::Sorensen),
        Just(SimilarityMetric::Jaccard),
        Just(SimilarityMetric::Simpson),
    ]
}

fn policy() -> impl Strategy<Value = RemovalPolicy> {
    prop_oneof![
        Just(RemovalPolicy::Random),
        Just(RemovalPolicy::LessDiverseFirst),
        Just(RemovalPolicy::MoreDiverseFirst),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn no_two_survivors_conflict(
        layout in layout(),
        radius in 1.0f64..30.0,
        threshold in 0.0f64..1.0,
        metric in presence_metric(),
        policy in policy(),
        seed in any::<u64>(),
    ) {
        let input = build(&layout);
        let params = ThinningParams::new(radius, threshold)
            .with_metric(metric)
            .with_policy(policy)
            .with_seed(seed);
        let outcome = thin(&input, &params).unwrap();

        let by_key: HashMap<&str, (f64, f64, u8)> = input
            .records
            .iter()
            .zip(&layout)
            .map(|(r, &p)| (r.key.as_str(), p))
            .collect();
        for (i, a) in outcome.survivors.iter().enumerate() {
            for b in &outcome.survivors[i + 1..] {
                let (ax, ay, am) = by_key[a.key.as_str()];
                let (bx, by, bm) = by_key[b.key.as_str()];
                let close = (ax - bx).hypot(ay - by) < radius;
                let similar = mask_similarity(metric, am, bm) > threshold;
                prop_assert!(!(close && similar), "{} and {} both survived", a.key, b.key);
            }
        }
        prop_assert_eq!(outcome.survivors.len() + outcome.removed_keys.len(), layout.len());
    }

    #[test]
    fn no_two_survivors_conflict_under_bray_curtis(
        layout in weighted_layout(),
        radius in 1.0f64..30.0,
        threshold in 0.0f64..1.0,
        policy in policy(),
        seed in any::<u64>(),
    ) {
        let input = build_weighted(&layout);
        let params = ThinningParams::new(radius, threshold)
            .with_metric(SimilarityMetric::BrayCurtis)
            .with_policy(policy)
            .with_seed(seed);
        let outcome = thin(&input, &params).unwrap();

        let by_key: HashMap<&str, &(f64, f64, u8, Vec<f64>)> = input
            .records
            .iter()
            .zip(&layout)
            .map(|(r, p)| (r.key.as_str(), p))
            .collect();
        for (i, a) in outcome.survivors.iter().enumerate() {
            for b in &outcome.survivors[i + 1..] {
                let (ax, ay, am, aw) = by_key[a.key.as_str()];
                let (bx, by, bm, bw) = by_key[b.key.as_str()];
                let close = (ax - bx).hypot(ay - by) < radius;
                // Summation order differs from the engine's merge; skip scores
                // within rounding of the threshold.
                let score = weighted_similarity((*am, aw.as_slice()), (*bm, bw.as_slice()));
                let similar = score > threshold + 1e-9;
                prop_assert!(!(close && similar), "{} and {} both survived ({score})", a.key, b.key);
            }
        }
        prop_assert_eq!(outcome.survivors.len() + outcome.removed_keys.len(), layout.len());
    }

    #[test]
    fn no_two_survivors_conflict_in_geographic_mode(
        layout in layout(),
        radius_m in 5.0f64..100.0,
        threshold in 0.0f64..1.0,
        metric in presence_metric(),
        seed in any::<u64>(),
    ) {
        // Grid steps of 1e-4 degrees: roughly 8 m east-west and 11 m north-south.
        let lonlat: Vec<(f64, f64, u8)> = layout
            .iter()
            .map(|&(x, y, mask)| (10.0 + x * 1e-4, 45.0 + y * 1e-4, mask))
            .collect();
        let input = build(&lonlat);
        let params = ThinningParams::new(radius_m, threshold)
            .with_distance_mode(DistanceMode::Geographic)
            .with_metric(metric)
            .with_seed(seed);
        let outcome = thin(&input, &params).unwrap();

        let by_key: HashMap<&str, (f64, f64, u8)> = input
            .records
            .iter()
            .zip(&lonlat)
            .map(|(r, &p)| (r.key.as_str(), p))
            .collect();
        for (i, a) in outcome.survivors.iter().enumerate() {
            for b in &outcome.survivors[i + 1..] {
                let (ax, ay, am) = by_key[a.key.as_str()];
                let (bx, by, bm) = by_key[b.key.as_str()];
                let close = distance(DistanceMode::Geographic, [ax, ay], [bx, by]) < radius_m;
                let similar = mask_similarity(metric, am, bm) > threshold;
                prop_assert!(!(close && similar), "{} and {} both survived", a.key, b.key);
            }
        }
    }

    #[test]
    fn rerunning_on_survivors_removes_nothing(
        layout in layout(),
        radius in 1.0f64..30.0,
        threshold in 0.0f64..1.0,
        metric in presence_metric(),
        seed in any::<u64>(),
    ) {
        let input = build(&layout);
        let params = ThinningParams::new(radius, threshold).with_metric(metric).with_seed(seed);
        let first = thin(&input, &params).unwrap();
        let second = thin(&restrict(&input, &first), &params).unwrap();
        prop_assert_eq!(second.summary.removed, 0);
        prop_assert_eq!(second.survivors, first.survivors);
    }

    #[test]
    fn thread_count_does_not_change_the_result(
        layout in layout(),
        radius in 1.0f64..30.0,
        threshold in 0.0f64..1.0,
        policy in policy(),
        seed in any::<u64>(),
    ) {
        let input = build(&layout);
        let params = ThinningParams::new(radius, threshold).with_policy(policy).with_seed(seed);
        let single = ThinningEngine::new(params.clone().with_threads(1)).unwrap().run(&input).unwrap();
        let many = ThinningEngine::new(params.clone().with_threads(4)).unwrap().run(&input).unwrap();
        let global = thin(&input, &params).unwrap();
        prop_assert_eq!(&single.removed_keys, &many.removed_keys);
        prop_assert_eq!(&single.removed_keys, &global.removed_keys);
        prop_assert_eq!(single.summary.conflict_edges, many.summary.conflict_edges);
    }

    #[test]
    fn conflicts_grow_with_distance_threshold(
        layout in layout(),
        near in 1.0f64..20.0,
        extra in 0.0f64..20.0,
        threshold in 0.0f64..1.0,
        seed in any::<u64>(),
    ) {
        let input = build(&layout);
        let small = thin(&input, &ThinningParams::new(near, threshold).with_seed(seed)).unwrap();
        let large = thin(&input, &ThinningParams::new(near + extra, threshold).with_seed(seed)).unwrap();
        prop_assert!(small.summary.neighbor_edges <= large.summary.neighbor_edges);
        prop_assert!(small.summary.conflict_edges <= large.summary.conflict_edges);
    }

    #[test]
    fn conflicts_grow_as_similarity_threshold_drops(
        layout in layout(),
        radius in 1.0f64..30.0,
        high in 0.0f64..1.0,
        drop in 0.0f64..1.0,
        seed in any::<u64>(),
    ) {
        let input = build(&layout);
        let low = (high - drop).max(0.0);
        let strict = thin(&input, &ThinningParams::new(radius, high).with_seed(seed)).unwrap();
        let loose = thin(&input, &ThinningParams::new(radius, low).with_seed(seed)).unwrap();
        prop_assert_eq!(strict.summary.neighbor_edges, loose.summary.neighbor_edges);
        prop_assert!(strict.summary.conflict_edges <= loose.summary.conflict_edges);
    }

    #[test]
    fn less_diverse_record_loses_a_direct_conflict(
        base in 1u8..16,
        extra in 1u8..16,
        seed in any::<u64>(),
    ) {
        // `rich` holds every category of `poor` plus at least one more.
        let poor = base;
        let rich = base | (extra << 1) | 0b1_0000;
        prop_assume!(rich.count_ones() > poor.count_ones());

        let mut input = build(&[(0.0, 0.0, rich), (1.0, 0.0, poor)]);
        input.records[0].key = "rich".into();
        input.records[1].key = "poor".into();
        for c in &mut input.compositions {
            c.key = if c.key == "r0" { "rich".into() } else { "poor".into() };
        }

        let params = ThinningParams::new(5.0, 0.0)
            .with_policy(RemovalPolicy::LessDiverseFirst)
            .with_seed(seed);
        let outcome = thin(&input, &params).unwrap();
        prop_assert_eq!(outcome.removed_keys, vec!["poor".to_string()]);
    }
}

/// A new high-scoring conflict on a hub can shrink the removal set: the hub
/// is removed instead of the two records that conflicted with it.
#[test]
fn greedy_removal_count_can_drop_when_distance_grows() {
    let ranked = |key: &str, x: f64, y: f64, rank: f64| RecordRow::new(key, x, y).with_attribute("rank", rank);
    let cats = |key: &str, names: &[&str]| -> Vec<CompositionRow> {
        names.iter().map(|&n| CompositionRow::new(key, n, 1.0)).collect()
    };
    let input = ThinningInput {
        records: vec![
            ranked("left", -10.0, 0.0, 1.0),
            ranked("right", 10.0, 0.0, 2.0),
            ranked("hub", 0.0, 0.0, 3.0),
            ranked("top", 0.0, 15.0, 4.0),
        ],
        compositions: [
            cats("left", &["a", "b", "c", "e"]),
            cats("right", &["a", "b", "c", "e"]),
            cats("hub", &["a", "b", "c", "d"]),
            cats("top", &["a", "b", "c", "d"]),
        ]
        .concat(),
    };
    let params = |radius: f64| {
        ThinningParams::new(radius, 0.5)
            .with_policy(RemovalPolicy::LowerRankingFirst)
            .with_ranking_attribute("rank")
    };

    let near = thin(&input, &params(12.0)).unwrap();
    assert_eq!(near.removed_keys, vec!["left", "right"]);
    assert_eq!(near.summary.conflict_edges, 2);

    let far = thin(&input, &params(16.0)).unwrap();
    assert_eq!(far.removed_keys, vec!["hub"]);
    assert_eq!(far.summary.conflict_edges, 3);
}
