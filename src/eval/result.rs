//! Data structures for representing the evaluation results.

use crate::error::Error;

/// Confusion matrix counts of one miRNA.
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize)]
pub struct MirnaCounts {
    /// miRNA name.
    pub mirna: String,
    /// Counts for this miRNA.
    #[serde(flatten)]
    pub counts: ConfusionCounts,
}

/// Confusion matrix counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
pub struct ConfusionCounts {
    /// Known targets predicted as targets.
    pub true_positives: usize,
    /// Predicted targets that are not known targets.
    pub false_positives: usize,
    /// Predicted non-targets that are neither known nor predicted targets.
    pub true_negatives: usize,
    /// Known targets not predicted as targets.
    pub false_negatives: usize,
}

impl std::ops::AddAssign for ConfusionCounts {
    fn add_assign(&mut self, other: Self) {
        self.true_positives += other.true_positives;
        self.false_positives += other.false_positives;
        self.true_negatives += other.true_negatives;
        self.false_negatives += other.false_negatives;
    }
}

impl ConfusionCounts {
    /// Sensitivity in percent, `TP / (TP + FN) * 100`.
    ///
    /// # Errors
    ///
    /// `Error::DegenerateMetric` if there are neither true positives nor
    /// false negatives.
    pub fn sensitivity(&self) -> Result<f64, Error> {
        percentage(
            "sensitivity",
            self.true_positives,
            self.true_positives + self.false_negatives,
        )
    }

    /// Specificity in percent, `TN / (TN + FP) * 100`.
    ///
    /// # Errors
    ///
    /// `Error::DegenerateMetric` if there are neither true negatives nor
    /// false positives.
    pub fn specificity(&self) -> Result<f64, Error> {
        percentage(
            "specificity",
            self.true_negatives,
            self.true_negatives + self.false_positives,
        )
    }
}

/// Compute `numerator / denominator * 100`, refusing a zero denominator.
fn percentage(metric: &'static str, numerator: usize, denominator: usize) -> Result<f64, Error> {
    if denominator == 0 {
        return Err(Error::DegenerateMetric {
            metric,
            numerator,
            denominator,
        });
    }
    Ok(numerator as f64 / denominator as f64 * 100.0)
}

/// Result of evaluating one prediction run against the known targets.
#[derive(Debug, Clone, PartialEq)]
pub struct Stats {
    /// Counts summed over all miRNAs with known targets.
    pub counts: ConfusionCounts,
    /// Sensitivity in percent.
    pub sensitivity: f64,
    /// Specificity in percent.
    pub specificity: f64,
    /// Counts of each miRNA with known targets, sorted by miRNA name.
    pub per_mirna: Vec<MirnaCounts>,
}

#[cfg(test)]
mod test {
    use super::*;

    fn counts(tp: usize, fp: usize, tn: usize, fn_: usize) -> ConfusionCounts {
        ConfusionCounts {
            true_positives: tp,
            false_positives: fp,
            true_negatives: tn,
            false_negatives: fn_,
        }
    }

    #[rstest::rstest]
    #[case(counts(0, 1, 1, 2), 0.0, 50.0)]
    #[case(counts(3, 0, 4, 1), 75.0, 100.0)]
    #[case(counts(1, 3, 1, 0), 100.0, 25.0)]
    fn ratios(
        #[case] counts: ConfusionCounts,
        #[case] sensitivity: f64,
        #[case] specificity: f64,
    ) -> Result<(), anyhow::Error> {
        assert_eq!(counts.sensitivity()?, sensitivity);
        assert_eq!(counts.specificity()?, specificity);

        Ok(())
    }

    #[test]
    fn ratios_in_range() -> Result<(), anyhow::Error> {
        for tp in 0..5 {
            for fn_ in 0..5 {
                for tn in 0..5 {
                    for fp in 0..5 {
                        let counts = counts(tp, fp, tn, fn_);
                        if tp + fn_ > 0 {
                            let value = counts.sensitivity()?;
                            assert!((0.0..=100.0).contains(&value), "{counts:?}");
                        }
                        if tn + fp > 0 {
                            let value = counts.specificity()?;
                            assert!((0.0..=100.0).contains(&value), "{counts:?}");
                        }
                    }
                }
            }
        }

        Ok(())
    }

    #[test]
    fn sensitivity_zero_denominator() {
        let result = counts(0, 2, 1, 0).sensitivity();

        assert!(matches!(
            result,
            Err(Error::DegenerateMetric {
                metric: "sensitivity",
                numerator: 0,
                denominator: 0,
            })
        ));
    }

    #[test]
    fn specificity_zero_denominator() {
        let result = counts(1, 0, 0, 1).specificity();

        assert!(matches!(
            result,
            Err(Error::DegenerateMetric {
                metric: "specificity",
                ..
            })
        ));
    }

    #[test]
    fn add_assign() {
        let mut total = ConfusionCounts::default();
        total += counts(0, 1, 0, 1);
        total += counts(0, 0, 1, 1);

        insta::assert_yaml_snapshot!(total, @r###"
        true_positives: 0
        false_positives: 1
        true_negatives: 1
        false_negatives: 2
        "###);
    }
}
