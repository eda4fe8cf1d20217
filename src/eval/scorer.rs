//! Confusion matrix computation from known and predicted targets.

use rustc_hash::FxHashSet;

use super::result::{ConfusionCounts, MirnaCounts, Stats};
use crate::{
    data::{predicted::Predictions, TargetMap},
    error::Error,
};

/// Compute the confusion matrix counts of one miRNA.
///
/// # Arguments
///
/// * `known` - Known targets of the miRNA.
/// * `targets` - Predicted targets of the miRNA.
/// * `non_targets` - Predicted non-targets of the miRNA.
pub fn count_mirna(
    known: &FxHashSet<String>,
    targets: &FxHashSet<String>,
    non_targets: &FxHashSet<String>,
) -> ConfusionCounts {
    ConfusionCounts {
        true_positives: known.intersection(targets).count(),
        false_positives: targets.difference(known).count(),
        true_negatives: non_targets
            .iter()
            .filter(|gene| !targets.contains(*gene) && !known.contains(*gene))
            .count(),
        false_negatives: known.difference(targets).count(),
    }
}

/// Compare predictions with the known targets.
///
/// Only miRNAs with known targets are scored; miRNAs without predictions
/// count as having empty prediction sets.
///
/// # Arguments
///
/// * `known` - Known targets by miRNA.
/// * `predictions` - Predicted targets and non-targets by miRNA.
///
/// # Returns
///
/// Summed counts, sensitivity, specificity and the per-miRNA counts.
///
/// # Errors
///
/// `Error::DegenerateMetric` if sensitivity or specificity is undefined.
pub fn compute_stats(known: &TargetMap, predictions: &Predictions) -> Result<Stats, Error> {
    let empty = FxHashSet::default();

    let mut mirnas = known.keys().collect::<Vec<_>>();
    mirnas.sort();

    let mut counts = ConfusionCounts::default();
    let mut per_mirna = Vec::with_capacity(mirnas.len());
    for mirna in mirnas {
        let mirna_counts = count_mirna(
            &known[mirna],
            predictions.targets.get(mirna).unwrap_or(&empty),
            predictions.non_targets.get(mirna).unwrap_or(&empty),
        );
        tracing::debug!(
            "for mirna: {} TP: {} FP: {} TN: {} FN: {}",
            mirna,
            mirna_counts.true_positives,
            mirna_counts.false_positives,
            mirna_counts.true_negatives,
            mirna_counts.false_negatives
        );
        counts += mirna_counts;
        per_mirna.push(MirnaCounts {
            mirna: mirna.clone(),
            counts: mirna_counts,
        });
    }

    Ok(Stats {
        counts,
        sensitivity: counts.sensitivity()?,
        specificity: counts.specificity()?,
        per_mirna,
    })
}
