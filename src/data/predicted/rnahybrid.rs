//! Compact RNAhybrid output.
//!
//! Records are colon-delimited, e.g.
//!
//! ```text
//! ENSG00000166851|ENST00000300093:304:hsa-miR-24-3p:22:-26.8:0.068572:105:<alignment>
//! ```
//!
//! that is gene and transcript, UTR length, miRNA name, miRNA length, MFE,
//! p-value, hit position and the alignment columns.

use std::io::BufRead;

use super::{Call, Extractor, Predictions};
use crate::error::Error;

/// Number of leading fields that are interpreted.
const MIN_FIELDS: usize = 6;

/// Thresholds for accepting an RNAhybrid hybridization as target.
///
/// The defaults follow the published recommendation for RNAhybrid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// Maximal minimum free energy.
    pub max_mfe: f64,
    /// Maximal p-value.
    pub max_p_value: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            max_mfe: -22.0,
            max_p_value: 0.1,
        }
    }
}

impl Thresholds {
    /// Decide whether `record` is a hit; both MFE and p-value must pass.
    pub fn call(&self, record: &Record) -> Call {
        if record.mfe <= self.max_mfe && record.p_value <= self.max_p_value {
            Call::Hit
        } else {
            Call::Miss
        }
    }
}

/// The interpreted fields of one record.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Gene identifier.
    pub gene_id: String,
    /// Transcript identifier.
    pub transcript_id: String,
    /// miRNA name.
    pub mirna_id: String,
    /// Minimum free energy.
    pub mfe: f64,
    /// p-value of the hybridization.
    pub p_value: f64,
}

impl TryFrom<&csv::StringRecord> for Record {
    type Error = String;

    fn try_from(record: &csv::StringRecord) -> Result<Self, Self::Error> {
        if record.len() < MIN_FIELDS {
            return Err(format!(
                "expected at least {} fields, found {}",
                MIN_FIELDS,
                record.len()
            ));
        }
        let (gene_id, transcript_id) = record[0]
            .split_once('|')
            .ok_or_else(|| format!("missing '|' in gene/transcript field {:?}", &record[0]))?;
        let mfe = record[4]
            .trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid MFE {:?}: {}", &record[4], e))?;
        let p_value = record[5]
            .trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid p-value {:?}: {}", &record[5], e))?;

        Ok(Self {
            gene_id: gene_id.to_string(),
            transcript_id: transcript_id.to_string(),
            mirna_id: record[2].to_string(),
            mfe,
            p_value,
        })
    }
}

/// Extractor for compact RNAhybrid output.
#[derive(Debug, Clone, Default)]
pub struct Rnahybrid {
    /// The thresholds to apply.
    thresholds: Thresholds,
}

impl Rnahybrid {
    /// Create a new `Rnahybrid` extractor.
    pub fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }
}

impl Extractor for Rnahybrid {
    fn extract(&self, source_name: &str, reader: &mut dyn BufRead) -> Result<Predictions, Error> {
        // The alignment columns contain spaces and colons; they are never
        // looked at, so flexible records without quoting are fine.
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(b':')
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .from_reader(reader);

        let mut result = Predictions::default();
        let mut records = 0usize;
        for record in csv_reader.records() {
            let record = record?;
            if record.len() == 1 && record[0].trim().is_empty() {
                continue;
            }

            let line_no = record.position().map(|pos| pos.line()).unwrap_or_default();
            let parsed = Record::try_from(&record).map_err(|reason| {
                Error::malformed(
                    source_name,
                    line_no,
                    record.iter().collect::<Vec<_>>().join(":"),
                    reason,
                )
            })?;
            let call = self.thresholds.call(&parsed);
            tracing::trace!("line {}: {:?} -> {:?}", line_no, &parsed, call);
            result.insert(&parsed.mirna_id, &parsed.gene_id, call);
            records += 1;
        }

        tracing::debug!("read {} records from {}", records, source_name);

        Ok(result)
    }
}
