//! Common test utilities for compare-polars tests

#![allow(dead_code)]

use compare_polars::{
    ComparisonReporter, EffectSize, FamilyDecision, GroupSummary, OmnibusTest, PValueBound,
    PairMatrix, TestOutcome,
};
use polars::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};
use std::sync::Mutex;

/// Long-format frame with a `group` column and a `value` column
pub fn long_frame(groups: &[(&str, &[f64])]) -> DataFrame {
    let mut labels = Vec::new();
    let mut values = Vec::new();
    for (label, sample) in groups {
        labels.extend(std::iter::repeat(*label).take(sample.len()));
        values.extend_from_slice(sample);
    }
    df!["group" => labels, "value" => values].unwrap()
}

/// `k` independent samples of `n` standard normal draws from a seeded stream
pub fn normal_groups(seed: u64, n: usize, k: usize) -> Vec<Vec<f64>> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let normal = Normal::new(0.0, 1.0).unwrap();
    (0..k)
        .map(|_| (0..n).map(|_| normal.sample(&mut rng)).collect())
        .collect()
}

pub fn linear(start: f64, len: usize) -> Vec<f64> {
    (0..len).map(|i| start + i as f64).collect()
}

/// Reporter that records the name of every callback it receives
#[derive(Default)]
pub struct RecordingReporter {
    pub events: Mutex<Vec<String>>,
}

impl RecordingReporter {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    fn push(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }
}

impl ComparisonReporter for RecordingReporter {
    fn metric_started(&self, metric: &str, groups: &[GroupSummary]) {
        self.push(format!("started {metric} ({} groups)", groups.len()));
    }

    fn family_selected(&self, metric: &str, decision: &FamilyDecision) {
        self.push(format!(
            "family {metric} nonparametric={}",
            decision.needs_nonparametric
        ));
    }

    fn omnibus_completed(
        &self,
        metric: &str,
        test: OmnibusTest,
        _outcome: &TestOutcome,
        significant: bool,
    ) {
        self.push(format!("omnibus {metric} {test} significant={significant}"));
    }

    fn two_sample_completed(
        &self,
        metric: &str,
        _pvalue: f64,
        bound: &PValueBound,
        _effect: &EffectSize,
    ) {
        self.push(format!("two-sample {metric} {bound}"));
    }

    fn posthoc_completed(
        &self,
        metric: &str,
        _corrected: &PairMatrix<f64>,
        bounds: &PairMatrix<PValueBound>,
        _effects: &PairMatrix<f64>,
    ) {
        self.push(format!("posthoc {metric} {} pairs", bounds.count()));
    }
}
