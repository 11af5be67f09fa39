//! The facade exposes the full pipeline under one crate name

use group_compare::{cohen_d, CompareConfig, Correction, GroupComparisonExt, PValueBound};
use polars::prelude::*;

#[test]
fn test_pipeline_through_facade() -> anyhow::Result<()> {
    let df = df![
        "arm" => ["ctl", "ctl", "ctl", "ctl", "ctl", "trt", "trt", "trt", "trt", "trt"],
        "score" => [1.0, 2.0, 3.0, 4.0, 5.0, 10.0, 11.0, 12.0, 13.0, 14.0],
    ]?;

    let config = CompareConfig::default().with_correction(Correction::Bonferroni);
    let report = df.compare_groups("arm", &["score"], &config)?;
    let result = report.get("score").expect("score was requested");

    assert_eq!(result.group_labels(), vec!["ctl", "trt"]);
    assert!(result.is_significant());
    Ok(())
}

#[test]
fn test_primitives_through_facade() -> anyhow::Result<()> {
    let d = cohen_d(&[1.0, 2.0, 3.0, 4.0, 5.0], &[3.0, 4.0, 5.0, 6.0, 7.0])?;
    approx::assert_abs_diff_eq!(d, -2.0 / 2.5f64.sqrt(), epsilon = 1e-12);

    assert_eq!(PValueBound::new(2e-11)?.to_string(), "<1e-10");
    Ok(())
}
