#![allow(dead_code)]

//! Utility functions for tests.

use knn_vote::{
    normalizer,
    schema::{Feature, FeatureSchema},
    FeatureVector, Metric, MixedSquared,
};
use rand::prelude::*;

/// Four numeric features on a 0-10 scale and one nominal feature.
pub fn small_schema() -> FeatureSchema {
    FeatureSchema::new(vec![
        Feature::numeric("a", 0.0, 10.0),
        Feature::numeric("b", 0.0, 10.0),
        Feature::numeric("c", 0.0, 10.0),
        Feature::numeric("d", 0.0, 10.0),
        Feature::nominal("shade"),
    ])
    .unwrap_or_else(|e| unreachable!("{e}"))
}

/// One random row of `small_schema` fields, without a label.
///
/// Values are small integers so that many distances tie.
pub fn random_fields<R: Rng>(rng: &mut R) -> String {
    let numbers = (0..4).map(|_| rng.gen_range(0..=10).to_string()).collect::<Vec<_>>();
    let shade = ["light", "dark"][rng.gen_range(0..2)];
    format!("{},{shade}", numbers.join(","))
}

/// Random labeled records for `small_schema`.
pub fn random_records(cardinality: usize, labels: &[&str], seed: u64) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..cardinality)
        .map(|_| {
            let label = labels[rng.gen_range(0..labels.len())];
            format!("{},{label}", random_fields(&mut rng))
        })
        .collect()
}

/// Random queries for `small_schema`.
pub fn random_queries(schema: &FeatureSchema, num_queries: usize, seed: u64) -> Vec<FeatureVector> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..num_queries)
        .map(|_| normalizer::parse_query(schema, &random_fields(&mut rng)).unwrap_or_else(|e| unreachable!("{e}")))
        .collect()
}

/// Deals the records into `num_partitions` disjoint partitions at random.
/// Some partitions may be empty.
pub fn random_partitions(records: &[String], num_partitions: usize, seed: u64) -> Vec<Vec<String>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut partitions = vec![Vec::new(); num_partitions];
    for r in records {
        partitions[rng.gen_range(0..num_partitions)].push(r.clone());
    }
    partitions
}

/// Sorts every parseable record by distance to the query and returns the `k`
/// nearest `(distance, label)` pairs.
pub fn brute_force_neighbors(
    records: &[String],
    schema: &FeatureSchema,
    query: &FeatureVector,
    k: usize,
) -> Vec<(f64, String)> {
    let mut scored = records
        .iter()
        .filter_map(|r| normalizer::parse_labeled(schema, r).ok())
        .map(|(v, label)| (MixedSquared.distance(&v, query), label))
        .collect::<Vec<_>>();
    scored.sort_by(|(a, x), (b, y)| a.total_cmp(b).then_with(|| x.cmp(y)));
    scored.truncate(k);
    scored
}

/// Majority vote over brute-force neighbors; ties go to the label seen first.
pub fn brute_force_label(records: &[String], schema: &FeatureSchema, query: &FeatureVector, k: usize) -> String {
    let neighbors = brute_force_neighbors(records, schema, query, k);

    let mut counts: Vec<(String, usize)> = Vec::new();
    for (_, label) in neighbors {
        match counts.iter_mut().find(|(l, _)| *l == label) {
            Some((_, c)) => *c += 1,
            None => counts.push((label, 1)),
        }
    }

    let mut best = 0;
    for i in 1..counts.len() {
        if counts[i].1 > counts[best].1 {
            best = i;
        }
    }
    counts.swap_remove(best).0
}
