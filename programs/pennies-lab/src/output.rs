//! CSV output for trial tables

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use pennies_logic::{GameResult, SweepParameter, SweepPoint};

/// Write one game as `trial,hider,player,feedback` rows
pub fn write_trials<W: Write>(writer: W, result: &GameResult) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    for record in &result.trials {
        csv.serialize(record)?;
    }
    csv.flush()?;
    Ok(())
}

pub fn write_trials_file(path: &Path, result: &GameResult) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    write_trials(file, result).with_context(|| format!("write {}", path.display()))
}

/// Write every sweep point into one table, with the running proportion
/// correct and the swept value as extra columns
pub fn write_sweep_table<W: Write>(
    writer: W,
    parameter: SweepParameter,
    points: &[SweepPoint],
) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record([
        "trial",
        "hider",
        "player",
        "feedback",
        "proportion_correct",
        parameter.column(),
    ])?;

    for point in points {
        let label = point.value.label();
        let running = point.result.proportion_correct();
        for (record, correct) in point.result.trials.iter().zip(running) {
            csv.write_record([
                record.trial.to_string(),
                u8::from(record.hider).to_string(),
                u8::from(record.player).to_string(),
                record.feedback.to_string(),
                format!("{:.6}", correct),
                label.clone(),
            ])?;
        }
    }
    csv.flush()?;
    Ok(())
}

/// Write `<column>_<value>.csv` per point plus `<column>_all.csv`
///
/// Creates `dir` if it does not exist. Returns the paths written.
pub fn write_sweep_files(
    dir: &Path,
    parameter: SweepParameter,
    points: &[SweepPoint],
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;

    let mut written = Vec::with_capacity(points.len() + 1);
    for point in points {
        let path = dir.join(format!("{}_{}.csv", parameter.column(), point.value.label()));
        write_trials_file(&path, &point.result)?;
        written.push(path);
    }

    let path = dir.join(format!("{}_all.csv", parameter.column()));
    let file = File::create(&path).with_context(|| format!("create {}", path.display()))?;
    write_sweep_table(file, parameter, points)
        .with_context(|| format!("write {}", path.display()))?;
    written.push(path);

    Ok(written)
}
