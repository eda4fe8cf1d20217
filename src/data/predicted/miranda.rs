//! Tabular miRanda output.
//!
//! The output is whitespace separated with the columns
//!
//! ```text
//! mirna_id  utr_id  score  energy  mirna_hit_start  mirna_hit_end  ...
//! ```
//!
//! and the header line is repeated before the alignments of each miRNA.

use std::io::BufRead;

use super::{Call, Extractor, Predictions};
use crate::error::Error;

/// Leading token of header lines.
pub const HEADER_MARKER: &str = "mirna_id";

/// Thresholds for accepting a miRanda alignment as target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// Minimal alignment score.
    pub min_score: f64,
    /// Maximal free energy.
    pub max_energy: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            min_score: 145.0,
            max_energy: -10.0,
        }
    }
}

impl Thresholds {
    /// Decide whether `record` is a hit.
    ///
    /// A record is a miss if either its score is too low or its energy is
    /// too high.
    pub fn call(&self, record: &Record) -> Call {
        if record.score < self.min_score || record.energy > self.max_energy {
            Call::Miss
        } else {
            Call::Hit
        }
    }
}

/// The leading columns of one data row.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// miRNA name.
    pub mirna_id: String,
    /// Gene identifier of the UTR.
    pub gene_id: String,
    /// Alignment score.
    pub score: f64,
    /// Free energy of the duplex.
    pub energy: f64,
}

impl std::str::FromStr for Record {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let fields = line.split_whitespace().take(4).collect::<Vec<_>>();
        if fields.len() < 4 {
            return Err(format!("expected at least 4 fields, found {}", fields.len()));
        }
        let score = fields[2]
            .parse::<f64>()
            .map_err(|e| format!("invalid score {:?}: {}", fields[2], e))?;
        let energy = fields[3]
            .parse::<f64>()
            .map_err(|e| format!("invalid energy {:?}: {}", fields[3], e))?;

        Ok(Self {
            mirna_id: fields[0].to_string(),
            gene_id: fields[1].to_string(),
            score,
            energy,
        })
    }
}

/// Whether `line` is a header line.
fn is_header(line: &str) -> bool {
    line.starts_with(HEADER_MARKER)
}

/// Extractor for tabular miRanda output.
#[derive(Debug, Clone, Default)]
pub struct Miranda {
    /// The thresholds to apply.
    thresholds: Thresholds,
}

impl Miranda {
    /// Create a new `Miranda` extractor.
    pub fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }
}

impl Extractor for Miranda {
    fn extract(&self, source_name: &str, reader: &mut dyn BufRead) -> Result<Predictions, Error> {
        let mut result = Predictions::default();
        let mut header_lines = 0usize;
        let mut data_lines = 0usize;

        let mut cursor = reader.lines().enumerate();
        while let Some((idx, line)) = cursor.next() {
            let (mut idx, mut line) = (idx, line?);
            if is_header(&line) {
                header_lines += 1;
                // A header consumes the following line as well if it
                // continues the header block.
                let Some((next_idx, next_line)) = cursor.next() else {
                    break;
                };
                (idx, line) = (next_idx, next_line?);
                if is_header(&line) {
                    header_lines += 1;
                    continue;
                }
            }
            if line.trim().is_empty() {
                continue;
            }

            let line_no = idx as u64 + 1;
            let record: Record = line
                .parse()
                .map_err(|reason: String| Error::malformed(source_name, line_no, &line, reason))?;
            let call = self.thresholds.call(&record);
            tracing::trace!("line {}: {:?} -> {:?}", line_no, &record, call);
            result.insert(&record.mirna_id, &record.gene_id, call);
            data_lines += 1;
        }

        tracing::debug!(
            "read {} data lines and {} header lines from {}",
            data_lines,
            header_lines,
            source_name
        );

        Ok(result)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::data::sorted_targets;

    const HEADER: &str = "mirna_id\tutr_id\tscore\tenergy\tmirna_hit_start\tmirna_hit_end";

    fn extract(data: &str) -> Result<Predictions, Error> {
        Miranda::default().extract("test", &mut data.as_bytes())
    }

    #[test]
    fn record_from_str() -> Result<(), anyhow::Error> {
        let record: Record = "hsa-miR-16-5p  ENSG00000001617 123.000000  -9.170000   2   21  171"
            .parse()
            .map_err(|e: String| anyhow::anyhow!(e))?;

        assert_eq!(
            record,
            Record {
                mirna_id: "hsa-miR-16-5p".to_string(),
                gene_id: "ENSG00000001617".to_string(),
                score: 123.0,
                energy: -9.17,
            }
        );

        Ok(())
    }

    #[rstest::rstest]
    #[case::passes(150.0, -15.0, Call::Hit)]
    #[case::on_thresholds(145.0, -10.0, Call::Hit)]
    #[case::low_score(144.9, -15.0, Call::Miss)]
    #[case::high_energy(150.0, -9.9, Call::Miss)]
    #[case::both_fail(100.0, -5.0, Call::Miss)]
    fn thresholds_call(#[case] score: f64, #[case] energy: f64, #[case] expected: Call) {
        let record = Record {
            mirna_id: "hsa-miR-16-5p".to_string(),
            gene_id: "ENSG00000105173".to_string(),
            score,
            energy,
        };

        assert_eq!(Thresholds::default().call(&record), expected);
    }

    #[test]
    fn custom_thresholds() -> Result<(), anyhow::Error> {
        let data = "hsa-miR-16-5p ENSG00000105173 100.0 -15.31\n";
        let extractor = Miranda::new(Thresholds {
            min_score: 90.0,
            max_energy: -10.0,
        });
        let predictions = extractor.extract("test", &mut data.as_bytes())?;

        assert_eq!(
            sorted_targets(&predictions.targets, "hsa-miR-16-5p"),
            vec!["ENSG00000105173"]
        );
        assert!(predictions.non_targets.is_empty());

        Ok(())
    }

    #[test]
    fn two_headers_one_data_row() -> Result<(), anyhow::Error> {
        let data = format!(
            "{HEADER}\n{HEADER}\nhsa-miR-16-5p ENSG00000159216 151.0 -15.69 2 20\n"
        );
        let predictions = extract(&data)?;

        assert_eq!(
            sorted_targets(&predictions.targets, "hsa-miR-16-5p"),
            vec!["ENSG00000159216"]
        );
        assert!(predictions.non_targets.is_empty());

        Ok(())
    }

    #[test]
    fn header_at_end_of_input() -> Result<(), anyhow::Error> {
        let data = format!("hsa-miR-16-5p ENSG00000159216 151.0 -15.69\n{HEADER}\n");
        let predictions = extract(&data)?;

        assert_eq!(predictions.targets.len(), 1);
        assert!(predictions.non_targets.is_empty());

        Ok(())
    }

    #[test]
    fn blank_lines_ignored() -> Result<(), anyhow::Error> {
        let data = "\nhsa-miR-24-3p ENSG00000001617 123.0 -17.34\n   \n";
        let predictions = extract(data)?;

        assert_eq!(
            sorted_targets(&predictions.non_targets, "hsa-miR-24-3p"),
            vec!["ENSG00000001617"]
        );

        Ok(())
    }

    #[rstest::rstest]
    #[case::too_few_fields("hsa-miR-16-5p ENSG00000159216 151.0\n", "expected at least 4 fields")]
    #[case::bad_score("hsa-miR-16-5p ENSG00000159216 high -15.69\n", "invalid score")]
    #[case::bad_energy("hsa-miR-16-5p ENSG00000159216 151.0 low\n", "invalid energy")]
    fn malformed_record(#[case] data: &str, #[case] expected: &str) {
        let result = extract(data);

        match result {
            Err(Error::MalformedRecord {
                source_name,
                line,
                reason,
                ..
            }) => {
                assert_eq!(source_name, "test");
                assert_eq!(line, 1);
                assert!(reason.starts_with(expected), "unexpected reason {reason:?}");
            }
            other => panic!("expected malformed record error, got {other:?}"),
        }
    }

    #[test]
    fn malformed_record_line_number_after_header() {
        let data = format!("{HEADER}\nhsa-miR-16-5p ENSG00000159216\n");
        let result = extract(&data);

        assert!(matches!(
            result,
            Err(Error::MalformedRecord { line: 2, .. })
        ));
    }

    #[test]
    fn test_load_file() -> Result<(), anyhow::Error> {
        let predictions = Miranda::default().load_file("tests/data/miranda.txt".as_ref())?;

        assert_eq!(predictions.targets.len(), 1);
        assert_eq!(predictions.non_targets.len(), 2);
        assert_eq!(
            sorted_targets(&predictions.targets, "hsa-miR-16-5p"),
            vec!["ENSG00000159216"]
        );
        let mut non_targets = predictions
            .non_targets
            .iter()
            .flat_map(|(mirna, genes)| genes.iter().map(move |gene| format!("{mirna}/{gene}")))
            .collect::<Vec<_>>();
        non_targets.sort();
        insta::assert_yaml_snapshot!(non_targets, @r###"
        - hsa-miR-16-5p/ENSG00000105173
        - hsa-miR-24-3p/ENSG00000001617
        "###);

        Ok(())
    }
}
