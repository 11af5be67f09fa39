//! End-to-end comparison scenarios

mod common;

use approx::assert_abs_diff_eq;
use common::{linear, long_frame, normal_groups};
use compare_polars::{
    compare_groups, CompareConfig, EffectSizes, FamilyReason, GroupComparisonExt, OmnibusTest,
    PValueDisplay,
};

#[test]
fn test_two_separated_groups() {
    let a = linear(1.0, 5);
    let b = linear(10.0, 5);
    let df = long_frame(&[("A", &a), ("B", &b)]);

    let report = compare_groups(&df, "group", &["value"], &CompareConfig::default()).unwrap();
    let result = report.get("value").unwrap();

    // Both samples are normal with identical spread
    assert!(result.parametric);
    assert_eq!(result.family.reason, FamilyReason::DiagnosticsPassed);
    assert_eq!(result.omnibus, OmnibusTest::StudentT);
    assert_abs_diff_eq!(result.statistic, -9.0, epsilon = 1e-10);
    assert!(result.pvalue < 0.01);

    match &result.cohens_d {
        Some(EffectSizes::Single(d)) => {
            assert!(*d < -2.0);
            assert_abs_diff_eq!(*d, -9.0 / 2.5f64.sqrt(), epsilon = 1e-10);
        }
        other => panic!("expected a single effect size, got {other:?}"),
    }
    match &result.pvalue_display {
        Some(PValueDisplay::Single(bound)) => {
            assert_eq!(bound.to_string(), "<1e-4");
            assert!(result.pvalue < bound.upper());
        }
        other => panic!("expected a single bound, got {other:?}"),
    }
    assert!(result.posthoc.is_none());
    assert!(result.corrected_pvalues.is_none());
}

#[test]
fn test_three_null_groups_not_significant() {
    let groups = normal_groups(42, 30, 3);
    let df = long_frame(&[("A", &groups[0]), ("B", &groups[1]), ("C", &groups[2])]);

    let report = df
        .compare_groups("group", &["value"], &CompareConfig::default())
        .unwrap();
    let result = report.get("value").unwrap();

    assert_eq!(result.omnibus, OmnibusTest::KruskalWallis);
    assert!(!result.parametric);
    assert!(result.pvalue >= 0.01, "p = {}", result.pvalue);
    assert!(!result.is_significant());
    assert!(result.posthoc.is_none());
    assert!(result.pvalue_display.is_none());
    assert!(result.cohens_d.is_none());
    assert!(report.significant_metrics().is_empty());
}

#[test]
fn test_shifted_group_only_pairs_with_it_significant() {
    let mut groups = normal_groups(7, 30, 3);
    for v in groups[2].iter_mut() {
        *v += 10.0;
    }
    let df = long_frame(&[("A", &groups[0]), ("B", &groups[1]), ("C", &groups[2])]);

    let report = df
        .compare_groups("group", &["value"], &CompareConfig::default())
        .unwrap();
    let result = report.get("value").unwrap();
    assert!(result.is_significant());

    let posthoc = result.posthoc.as_ref().unwrap();
    assert_eq!(posthoc.labels(), ["A", "B", "C"]);
    assert!(posthoc.get_by_label("C", "A").is_some());
    assert!(posthoc.get_by_label("C", "B").is_some());
    assert!(posthoc.get_by_label("B", "A").is_none());

    // Upper triangle and diagonal are always absent
    for row in 0..3 {
        for col in row..3 {
            assert!(posthoc.get(row, col).is_none(), "cell ({row}, {col})");
        }
    }

    // The full matrix keeps every corrected p-value
    let full = result.corrected_pvalues.as_ref().unwrap();
    assert_eq!(full.count(), 9);
    assert_eq!(full.get(1, 1), Some(&1.0));
    assert!(*full.get_by_label("B", "A").unwrap() > 0.01);
    assert_eq!(full.get(0, 2), full.get(2, 0));

    match &result.cohens_d {
        Some(EffectSizes::Pairwise(effects)) => {
            // Row group minus column group
            assert!(*effects.get_by_label("C", "A").unwrap() > 2.0);
            assert!(*effects.get_by_label("C", "B").unwrap() > 2.0);
            assert!(effects.get_by_label("B", "A").is_none());
        }
        other => panic!("expected pairwise effect sizes, got {other:?}"),
    }
    match &result.pvalue_display {
        Some(PValueDisplay::Pairwise(bounds)) => {
            for (row, col, bound) in bounds.present() {
                let p = *posthoc.get_by_label(row, col).unwrap();
                assert!(p < bound.upper());
                assert!(bound.exponent() <= 0);
            }
            assert_eq!(bounds.count(), 2);
        }
        other => panic!("expected pairwise bounds, got {other:?}"),
    }
}

#[test]
fn test_non_normal_group_selects_rank_test() {
    let a = [1.0, 1.1, 1.2, 1.3, 1.4, 1.5, 1.6, 1.7, 1.8, 50.0];
    let b: Vec<f64> = a.iter().map(|v| v + 100.0).collect();
    let df = long_frame(&[("a", &a), ("b", &b)]);

    let report = df
        .compare_groups("group", &["value"], &CompareConfig::default())
        .unwrap();
    let result = report.get("value").unwrap();

    assert!(!result.parametric);
    assert_eq!(result.omnibus, OmnibusTest::MannWhitneyU);
    match &result.family.reason {
        FamilyReason::NonNormal { group, pvalue } => {
            assert_eq!(group, "a");
            assert!(*pvalue < 0.01);
        }
        other => panic!("unexpected reason {other:?}"),
    }
    assert!(result.is_significant());
    assert!(result.posthoc.is_none());
    assert!(matches!(result.cohens_d, Some(EffectSizes::Single(d)) if d < 0.0));
}

#[test]
fn test_unequal_variances_select_rank_test() {
    let a = linear(1.0, 9);
    let b: Vec<f64> = a.iter().map(|v| v * 100.0).collect();
    let df = long_frame(&[("a", &a), ("b", &b)]);

    let report = df
        .compare_groups("group", &["value"], &CompareConfig::default())
        .unwrap();
    let result = report.get("value").unwrap();

    assert!(matches!(
        result.family.reason,
        FamilyReason::UnequalVariance { .. }
    ));
    assert_eq!(result.omnibus, OmnibusTest::MannWhitneyU);
    assert!(result.is_significant());
}

#[test]
fn test_constant_group_still_compared() {
    let a = [4.0, 4.0, 4.0, 4.0];
    let b = linear(10.0, 5);
    let df = long_frame(&[("a", &a), ("b", &b)]);

    let report = compare_groups(&df, "group", &["value"], &CompareConfig::default()).unwrap();
    let result = report.get("value").unwrap();

    // The constant group is not taken as non-normal and Levene does not reject
    assert!(result.parametric);
    assert_eq!(result.family.reason, FamilyReason::DiagnosticsPassed);
    assert_eq!(result.omnibus, OmnibusTest::StudentT);
    assert!(result.is_significant());

    // Pooled variance (0 + 4 * 2.5) / 7
    let pooled = 10.0f64 / 7.0;
    match &result.cohens_d {
        Some(EffectSizes::Single(d)) => assert_abs_diff_eq!(*d, -8.0 / pooled.sqrt(), epsilon = 1e-10),
        other => panic!("expected a single effect size, got {other:?}"),
    }
}

#[test]
fn test_identical_spread_keeps_parametric_family() {
    // Every value sits exactly 1 away from its group median
    let a = [1.0, 1.0, 3.0, 3.0];
    let b = [5.0, 5.0, 7.0, 7.0];
    let df = long_frame(&[("a", &a), ("b", &b)]);

    let report = compare_groups(&df, "group", &["value"], &CompareConfig::default()).unwrap();
    let result = report.get("value").unwrap();

    assert!(result.parametric);
    assert_eq!(result.family.reason, FamilyReason::DiagnosticsPassed);
    assert_eq!(result.omnibus, OmnibusTest::StudentT);
    // t = -4 / sqrt(4/3 * 1/2) with 6 df
    assert_abs_diff_eq!(result.statistic, -4.0 / (2.0f64 / 3.0).sqrt(), epsilon = 1e-10);
    assert!(result.is_significant());
    match &result.cohens_d {
        Some(EffectSizes::Single(d)) => {
            assert_abs_diff_eq!(*d, -4.0 / (4.0f64 / 3.0).sqrt(), epsilon = 1e-10)
        }
        other => panic!("expected a single effect size, got {other:?}"),
    }
}

#[test]
fn test_anova_branch_when_override_disabled() {
    let a = linear(1.0, 5);
    let b = linear(2.0, 5);
    let c = linear(11.0, 5);
    let df = long_frame(&[("a", &a), ("b", &b), ("c", &c)]);

    let default = df
        .compare_groups("group", &["value"], &CompareConfig::default())
        .unwrap();
    let result = default.get("value").unwrap();
    assert_eq!(result.omnibus, OmnibusTest::KruskalWallis);
    assert_eq!(result.family.reason, FamilyReason::ManyGroups { groups: 3 });

    let config = CompareConfig::default().with_rank_tests_for_many_groups(false);
    let report = df.compare_groups("group", &["value"], &config).unwrap();
    let result = report.get("value").unwrap();

    assert!(result.parametric);
    assert_eq!(result.omnibus, OmnibusTest::OneWayAnova);
    let posthoc = result.posthoc.as_ref().unwrap();
    assert!(posthoc.get_by_label("c", "a").is_some());
    assert!(posthoc.get_by_label("c", "b").is_some());
    assert!(posthoc.get_by_label("b", "a").is_none());

    match &result.cohens_d {
        Some(EffectSizes::Pairwise(effects)) => {
            assert_abs_diff_eq!(
                *effects.get_by_label("c", "a").unwrap(),
                10.0 / 2.5f64.sqrt(),
                epsilon = 1e-10
            );
        }
        other => panic!("expected pairwise effect sizes, got {other:?}"),
    }
}

#[test]
fn test_matrices_follow_sorted_labels() {
    // Labels first appear as z, m, a
    let z = linear(11.0, 5);
    let m = linear(2.0, 5);
    let a = linear(1.0, 5);
    let df = long_frame(&[("z", &z), ("m", &m), ("a", &a)]);

    let report = compare_groups(&df, "group", &["value"], &CompareConfig::default()).unwrap();
    let result = report.get("value").unwrap();
    assert_eq!(result.group_labels(), vec!["a", "m", "z"]);

    let posthoc = result.posthoc.as_ref().unwrap();
    assert_eq!(posthoc.labels(), ["a", "m", "z"]);
    assert!(posthoc.get_by_label("z", "a").is_some());
    assert!(posthoc.get_by_label("a", "z").is_none());

    match &result.cohens_d {
        Some(EffectSizes::Pairwise(effects)) => {
            // z sorts last, so it is the row and the difference is positive
            assert_abs_diff_eq!(
                *effects.get_by_label("z", "a").unwrap(),
                10.0 / 2.5f64.sqrt(),
                epsilon = 1e-10
            );
        }
        other => panic!("expected pairwise effect sizes, got {other:?}"),
    }
}

#[test]
fn test_metrics_are_independent_and_ordered() -> anyhow::Result<()> {
    let df = polars::prelude::df![
        "group" => ["x", "x", "x", "x", "x", "y", "y", "y", "y", "y"],
        "far" => [1.0, 2.0, 3.0, 4.0, 5.0, 10.0, 11.0, 12.0, 13.0, 14.0],
        "near" => [1.0, 2.0, 3.0, 4.0, 5.0, 1.5, 2.5, 3.5, 4.5, 5.5],
    ]?;

    let report = df.compare_groups("group", &["near", "far"], &CompareConfig::default())?;
    assert_eq!(report.metrics(), vec!["near", "far"]);
    assert_eq!(report.significant_metrics(), vec!["far"]);
    assert!(report.get("near").unwrap().pvalue_display.is_none());
    // Two groups never get a posthoc matrix, significant or not
    assert!(report.get("near").unwrap().posthoc.is_none());
    assert!(report.get("far").unwrap().posthoc.is_none());
    Ok(())
}

#[test]
fn test_compare_groups_is_idempotent() {
    let mut groups = normal_groups(3, 20, 4);
    for v in groups[3].iter_mut() {
        *v -= 5.0;
    }
    let df = long_frame(&[
        ("g1", &groups[0]),
        ("g2", &groups[1]),
        ("g3", &groups[2]),
        ("g4", &groups[3]),
    ]);
    let config = CompareConfig::default();

    let first = compare_groups(&df, "group", &["value"], &config).unwrap();
    let second = compare_groups(&df, "group", &["value"], &config).unwrap();
    assert_eq!(first, second);
}
