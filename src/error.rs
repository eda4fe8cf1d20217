//! Error type for parsing predictions and computing metrics.

use crate::common::Tool;

/// Errors that abort an evaluation run.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A prediction record does not have the shape expected for its tool.
    #[error("malformed record in {source_name} at line {line}: {reason} (record: {record:?})")]
    MalformedRecord {
        /// Name of the input, usually the file path.
        source_name: String,
        /// 1-based line number.
        line: u64,
        /// The offending record.
        record: String,
        /// What is wrong with it.
        reason: String,
    },
    /// The selected prediction tool has no extractor.
    #[error("prediction tool `{0}` is not implemented")]
    NotImplemented(Tool),
    /// A ratio cannot be computed because its denominator is zero.
    #[error("cannot compute {metric}: {numerator}/{denominator} has a zero denominator")]
    DegenerateMetric {
        /// Name of the metric, e.g. `sensitivity`.
        metric: &'static str,
        /// Numerator count.
        numerator: usize,
        /// Denominator count.
        denominator: usize,
    },
    /// Problem reading the input.
    #[error("problem reading input: {0}")]
    Io(#[from] std::io::Error),
    /// Problem reading a delimited record.
    #[error("problem reading record: {0}")]
    Csv(#[from] csv::Error),
}

impl Error {
    /// Create a `MalformedRecord` error.
    pub fn malformed(
        source_name: &str,
        line: u64,
        record: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Error::MalformedRecord {
            source_name: source_name.to_string(),
            line,
            record: record.into(),
            reason: reason.into(),
        }
    }
}
