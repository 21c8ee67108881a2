// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Comma-separated result tables.
//!
//! Files are small (one line per coherence), so they are built in memory and
//! written in one go. Columns are located by header name when reading, so
//! extra columns are ignored and `rt_std` may be absent.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use tracing::debug;
use wongwang_sim::{ParameterSweepRow, SweepRow, SweptParameter};

use crate::error::{PersistError, PersistResult};

/// Header of a plain results table
pub const RESULTS_HEADER: &str = "coherence,p_correct,mean_rt_ms,decision_rate,rt_std";

const REQUIRED_COLUMNS: [&str; 4] = ["coherence", "p_correct", "mean_rt_ms", "decision_rate"];
const OPTIONAL_STD_COLUMN: &str = "rt_std";

fn format_value(value: f64) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else {
        value.to_string()
    }
}

fn push_row(out: &mut String, leading: Option<f64>, row: &SweepRow) {
    let mut fields: Vec<String> = Vec::with_capacity(6);
    if let Some(value) = leading {
        fields.push(format_value(value));
    }
    fields.extend(row.values().iter().map(|v| format_value(*v)));
    // Writing to a String cannot fail
    let _ = writeln!(out, "{}", fields.join(","));
}

fn write_file(path: &Path, contents: &str) -> PersistResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, contents)?;
    Ok(())
}

/// Write sweep rows under [`RESULTS_HEADER`], creating parent directories
pub fn write_results_csv(path: &Path, rows: &[SweepRow]) -> PersistResult<()> {
    let mut out = String::new();
    let _ = writeln!(out, "{}", RESULTS_HEADER);
    for row in rows {
        push_row(&mut out, None, row);
    }
    write_file(path, &out)?;
    debug!("Wrote {} result rows to {}", rows.len(), path.display());
    Ok(())
}

/// Write parameter-sweep rows with a leading column named after the parameter
pub fn write_parameter_sweep_csv(
    path: &Path,
    parameter: SweptParameter,
    rows: &[ParameterSweepRow],
) -> PersistResult<()> {
    let mut out = String::new();
    let _ = writeln!(out, "{},{}", parameter.column_name(), RESULTS_HEADER);
    for tagged in rows {
        push_row(&mut out, Some(tagged.value), &tagged.row);
    }
    write_file(path, &out)?;
    debug!(
        "Wrote {} {} sweep rows to {}",
        rows.len(),
        parameter,
        path.display()
    );
    Ok(())
}

/// Column positions resolved from a header line
struct ColumnIndex {
    required: [usize; 4],
    rt_std: Option<usize>,
    width: usize,
}

impl ColumnIndex {
    fn from_header(header: &[&str]) -> PersistResult<Self> {
        let find = |name: &str| header.iter().position(|h| *h == name);
        let mut required = [0usize; 4];
        for (slot, name) in required.iter_mut().zip(REQUIRED_COLUMNS) {
            *slot = find(name).ok_or_else(|| PersistError::MissingColumn(name.to_string()))?;
        }
        Ok(ColumnIndex {
            required,
            rt_std: find(OPTIONAL_STD_COLUMN),
            width: header.len(),
        })
    }

    fn parse_row(&self, fields: &[&str], line: usize) -> PersistResult<SweepRow> {
        if fields.len() != self.width {
            return Err(PersistError::MalformedRow {
                line,
                reason: format!("expected {} fields, found {}", self.width, fields.len()),
            });
        }
        let [c, p, rt, rate] = self.required;
        Ok(SweepRow {
            coherence: parse_field(fields[c], line)?,
            p_correct: parse_field(fields[p], line)?,
            mean_rt_ms: parse_field(fields[rt], line)?,
            decision_rate: parse_field(fields[rate], line)?,
            rt_std: match self.rt_std {
                Some(i) => parse_field(fields[i], line)?,
                None => f64::NAN,
            },
        })
    }
}

/// Empty fields read as NaN, matching how blank statistics are usually exported
fn parse_field(field: &str, line: usize) -> PersistResult<f64> {
    if field.is_empty() {
        return Ok(f64::NAN);
    }
    field.parse::<f64>().map_err(|_| PersistError::MalformedRow {
        line,
        reason: format!("'{}' is not a number", field),
    })
}

/// Split into (1-based line number, trimmed fields), skipping blank lines
fn split_lines(contents: &str) -> impl Iterator<Item = (usize, Vec<&str>)> {
    contents
        .lines()
        .enumerate()
        .filter(|(_, l)| !l.trim().is_empty())
        .map(|(i, l)| (i + 1, l.split(',').map(str::trim).collect()))
}

/// Read a plain results table written by [`write_results_csv`]
pub fn read_results_csv(path: &Path) -> PersistResult<Vec<SweepRow>> {
    let contents = fs::read_to_string(path)?;
    let mut lines = split_lines(&contents);
    let (_, header) = lines
        .next()
        .ok_or_else(|| PersistError::MissingColumn("coherence".to_string()))?;
    let index = ColumnIndex::from_header(&header)?;

    lines
        .map(|(line, fields)| index.parse_row(&fields, line))
        .collect()
}

/// Read a parameter-sweep table; the first header field names the parameter
pub fn read_parameter_sweep_csv(
    path: &Path,
) -> PersistResult<(SweptParameter, Vec<ParameterSweepRow>)> {
    let contents = fs::read_to_string(path)?;
    let mut lines = split_lines(&contents);
    let (_, header) = lines
        .next()
        .ok_or_else(|| PersistError::MissingColumn("swept parameter".to_string()))?;

    let first = header.first().copied().unwrap_or_default();
    let parameter = SweptParameter::from_column_name(first).ok_or_else(|| {
        PersistError::MissingColumn(format!(
            "swept parameter (threshold, sigma, w_I or I0), found '{}'",
            first
        ))
    })?;
    let index = ColumnIndex::from_header(&header)?;

    let rows = lines
        .map(|(line, fields)| {
            let row = index.parse_row(&fields, line)?;
            Ok(ParameterSweepRow {
                value: parse_field(fields[0], line)?,
                row,
            })
        })
        .collect::<PersistResult<Vec<_>>>()?;
    Ok((parameter, rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn row(coherence: f64, decision_rate: f64) -> SweepRow {
        SweepRow {
            coherence,
            p_correct: 0.75,
            mean_rt_ms: 640.5,
            decision_rate,
            rt_std: 120.25,
        }
    }

    #[test]
    fn test_nan_written_as_lowercase() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("results.csv");
        let undecided = SweepRow {
            coherence: 0.0,
            p_correct: 0.0,
            mean_rt_ms: f64::NAN,
            decision_rate: 0.0,
            rt_std: f64::NAN,
        };
        write_results_csv(&path, &[undecided]).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, format!("{}\n0,0,nan,0,nan\n", RESULTS_HEADER));

        let back = read_results_csv(&path).unwrap();
        assert!(back[0].mean_rt_ms.is_nan());
        assert!(back[0].rt_std.is_nan());
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data").join("nested").join("results.csv");
        write_results_csv(&path, &[row(0.128, 0.5)]).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_read_tolerates_missing_std_and_reordered_columns() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("legacy.csv");
        fs::write(
            &path,
            "decision_rate,coherence,p_correct,mean_rt_ms\n0.9,0.256,0.8,512\n\n",
        )
        .unwrap();

        let rows = read_results_csv(&path).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].coherence, 0.256);
        assert_eq!(rows[0].decision_rate, 0.9);
        assert!(rows[0].rt_std.is_nan());
    }

    #[test]
    fn test_missing_required_column() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        fs::write(&path, "coherence,p_correct\n0,0.5\n").unwrap();
        match read_results_csv(&path) {
            Err(PersistError::MissingColumn(name)) => assert_eq!(name, "mean_rt_ms"),
            other => panic!("expected missing column, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_row_reports_line() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        fs::write(
            &path,
            format!("{}\n0,0.5,700,0.4,10\n0.1,abc,700,0.4,10\n", RESULTS_HEADER),
        )
        .unwrap();
        match read_results_csv(&path) {
            Err(PersistError::MalformedRow { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected malformed row, got {:?}", other),
        }

        fs::write(&path, format!("{}\n0,0.5,700\n", RESULTS_HEADER)).unwrap();
        assert!(matches!(
            read_results_csv(&path),
            Err(PersistError::MalformedRow { line: 2, .. })
        ));
    }

    #[test]
    fn test_parameter_sweep_table() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sigma_sweep.csv");
        let rows = vec![
            ParameterSweepRow {
                value: 0.01,
                row: row(0.0, 0.2),
            },
            ParameterSweepRow {
                value: 0.04,
                row: row(0.0, 0.9),
            },
        ];
        write_parameter_sweep_csv(&path, SweptParameter::Sigma, &rows).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("sigma,coherence,p_correct"));

        let (parameter, back) = read_parameter_sweep_csv(&path).unwrap();
        assert_eq!(parameter, SweptParameter::Sigma);
        assert_eq!(back, rows);
    }

    #[test]
    fn test_parameter_sweep_unknown_column() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plain.csv");
        write_results_csv(&path, &[row(0.0, 0.5)]).unwrap();
        assert!(matches!(
            read_parameter_sweep_csv(&path),
            Err(PersistError::MissingColumn(_))
        ));
    }
}
