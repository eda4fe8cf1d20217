//! Writing of evaluation results.

use std::io::Write;

use super::result::{ConfusionCounts, MirnaCounts, Stats};
use crate::common::OutputFormat;

/// Serialized form of the results, per-miRNA counts only on request.
#[serde_with::skip_serializing_none]
#[derive(Debug, serde::Serialize)]
struct Report<'a> {
    /// Summed counts.
    #[serde(flatten)]
    counts: &'a ConfusionCounts,
    /// Sensitivity in percent.
    sensitivity: f64,
    /// Specificity in percent.
    specificity: f64,
    /// Per-miRNA counts.
    per_mirna: Option<&'a [MirnaCounts]>,
}

/// Write `stats` to `writer` in the given format.
///
/// # Arguments
///
/// * `writer` - Destination of the report.
/// * `stats` - The evaluation results.
/// * `format` - Output format.
/// * `per_mirna` - Whether to include the counts of each miRNA.
///
/// # Errors
///
/// If writing or serialization fails.
pub fn write<W: Write>(
    writer: &mut W,
    stats: &Stats,
    format: OutputFormat,
    per_mirna: bool,
) -> Result<(), anyhow::Error> {
    match format {
        OutputFormat::Text => write_text(writer, stats, per_mirna),
        OutputFormat::Json => write_json(writer, stats, per_mirna),
    }
}

fn write_text<W: Write>(
    writer: &mut W,
    stats: &Stats,
    per_mirna: bool,
) -> Result<(), anyhow::Error> {
    if per_mirna {
        for mirna_counts in &stats.per_mirna {
            let counts = &mirna_counts.counts;
            writeln!(
                writer,
                "for mirna: {} TP: {} FP: {} TN: {} FN: {}",
                &mirna_counts.mirna,
                counts.true_positives,
                counts.false_positives,
                counts.true_negatives,
                counts.false_negatives
            )?;
        }
    }
    let counts = &stats.counts;
    writeln!(
        writer,
        "Total TP: {} FP: {} TN: {} FN: {} sensitivity: {:?} specificity: {:?}",
        counts.true_positives,
        counts.false_positives,
        counts.true_negatives,
        counts.false_negatives,
        stats.sensitivity,
        stats.specificity
    )?;

    Ok(())
}

fn write_json<W: Write>(
    writer: &mut W,
    stats: &Stats,
    per_mirna: bool,
) -> Result<(), anyhow::Error> {
    let report = Report {
        counts: &stats.counts,
        sensitivity: stats.sensitivity,
        specificity: stats.specificity,
        per_mirna: per_mirna.then_some(stats.per_mirna.as_slice()),
    };
    serde_json::to_writer(&mut *writer, &report)?;
    writeln!(writer)?;

    Ok(())
}
