// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Console summary tables.

use std::fmt::Write as _;

use wongwang_sim::{ParameterSweepRow, SweepRow, SweptParameter};

const RULE_WIDTH: usize = 52;

fn format_rt(value: f64) -> String {
    if value.is_nan() {
        "n/a".to_string()
    } else {
        format!("{:.1}", value)
    }
}

fn push_row(out: &mut String, row: &SweepRow) {
    let _ = writeln!(
        out,
        "{:>9.3} | {:>8.3} | {:>12} | {:>7.3}",
        row.coherence,
        row.p_correct,
        format_rt(row.mean_rt_ms),
        row.decision_rate
    );
}

/// Coherence / accuracy / mean RT table
///
/// ```text
/// Coherence | Accuracy | Mean RT (ms) | Decided
/// ----------------------------------------------------
///     0.000 |    0.512 |        734.5 |   0.410
/// ```
pub fn format_summary(rows: &[SweepRow]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Coherence | Accuracy | Mean RT (ms) | Decided");
    let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));
    for row in rows {
        push_row(&mut out, row);
    }
    out
}

/// One block per swept value, headed by `parameter = value`
pub fn format_parameter_sweep_summary(
    parameter: SweptParameter,
    rows: &[ParameterSweepRow],
) -> String {
    let mut out = String::new();
    let mut current: Option<f64> = None;
    for tagged in rows {
        if current != Some(tagged.value) {
            if current.is_some() {
                out.push('\n');
            }
            let _ = writeln!(out, "{} = {}", parameter.column_name(), tagged.value);
            let _ = writeln!(out, "Coherence | Accuracy | Mean RT (ms) | Decided");
            let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));
            current = Some(tagged.value);
        }
        push_row(&mut out, &tagged.row);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(coherence: f64, mean_rt_ms: f64) -> SweepRow {
        SweepRow {
            coherence,
            p_correct: 0.5,
            mean_rt_ms,
            decision_rate: 0.25,
            rt_std: f64::NAN,
        }
    }

    #[test]
    fn test_summary_lines() {
        let text = format_summary(&[row(0.0, 734.31), row(0.512, f64::NAN)]);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Coherence"));
        assert_eq!(lines[2], "    0.000 |    0.500 |        734.3 |   0.250");
        assert!(lines[3].contains("n/a"));
    }

    #[test]
    fn test_parameter_sweep_blocks() {
        let rows = [
            ParameterSweepRow { value: 20.0, row: row(0.0, 500.0) },
            ParameterSweepRow { value: 20.0, row: row(0.5, 450.0) },
            ParameterSweepRow { value: 30.0, row: row(0.0, 600.0) },
        ];
        let text = format_parameter_sweep_summary(SweptParameter::Threshold, &rows);
        assert!(text.starts_with("threshold = 20\n"));
        assert!(text.contains("\nthreshold = 30\n"));
        assert_eq!(text.matches("Coherence |").count(), 2);
    }
}
