//! Curated known miRNA targets.
//!
//! Each annotation line looks like
//!
//! ```text
//! hsa-miR-34a-5p corresponds with PLK1 |ENSG00000166851,ENST00000562272,PLK1,HGNC:9077
//! ```
//!
//! Lines not following this pattern are skipped.

use std::{
    io::{BufRead, BufReader},
    path::Path,
};

use super::TargetMap;

/// Pattern of one annotation line.  The gene symbol is captured twice and
/// both occurrences must agree, see `Matcher::parse_line`.
const RECORD_PATTERN: &str = r"^(?P<mirna>\S+) corresponds with (?P<gene_symbol>\S+) \|(?P<ensembl_gene>[^,]+),(?P<ensembl_transcript>[^,]+),(?P<gene_symbol_repeat>[^,]+),(?P<hgnc_id>HGNC:\d+)";

/// One known miRNA/gene relationship.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnownTarget {
    /// miRNA name.
    pub mirna: String,
    /// Gene symbol.
    pub gene_symbol: String,
    /// ENSEMBL gene identifier.
    pub ensembl_gene: String,
    /// ENSEMBL transcript identifier.
    pub ensembl_transcript: String,
    /// HGNC identifier.
    pub hgnc_id: String,
}

/// Matcher for annotation lines.
#[derive(Debug, Clone)]
pub struct Matcher {
    /// Compiled `RECORD_PATTERN`.
    record_re: regex::Regex,
}

impl Matcher {
    /// Construct a new `Matcher`.
    ///
    /// # Errors
    ///
    /// If the record pattern cannot be compiled.
    pub fn new() -> Result<Self, anyhow::Error> {
        Ok(Self {
            record_re: regex::Regex::new(RECORD_PATTERN)?,
        })
    }

    /// Parse a single annotation line.
    ///
    /// # Arguments
    ///
    /// * `line` - The line to parse, without the trailing newline.
    ///
    /// # Returns
    ///
    /// The known target if the line matches and the gene symbol label agrees
    /// with the repeated symbol, `None` otherwise.
    pub fn parse_line(&self, line: &str) -> Option<KnownTarget> {
        let captures = self.record_re.captures(line)?;
        if captures["gene_symbol"] != captures["gene_symbol_repeat"] {
            return None;
        }
        Some(KnownTarget {
            mirna: captures["mirna"].to_string(),
            gene_symbol: captures["gene_symbol"].to_string(),
            ensembl_gene: captures["ensembl_gene"].to_string(),
            ensembl_transcript: captures["ensembl_transcript"].to_string(),
            hgnc_id: captures["hgnc_id"].to_string(),
        })
    }
}

/// Read known targets from `reader`.
///
/// # Arguments
///
/// * `reader` - Source of annotation lines.
///
/// # Returns
///
/// Mapping from miRNA name to the set of its ENSEMBL gene identifiers.
///
/// # Errors
///
/// If reading from `reader` fails.  Non-matching lines, including lines that
/// are not valid UTF-8, are not an error.
pub fn read_known_targets<R: BufRead>(mut reader: R) -> Result<TargetMap, anyhow::Error> {
    let matcher = Matcher::new()?;
    let mut result = TargetMap::default();
    let mut skipped = 0usize;
    let mut buf = Vec::new();
    let mut lineno = 0u64;
    loop {
        buf.clear();
        let n = reader
            .read_until(b'\n', &mut buf)
            .map_err(|e| anyhow::anyhow!("problem reading line {}: {}", lineno + 1, e))?;
        if n == 0 {
            break;
        }
        lineno += 1;

        // Lines that are not valid UTF-8 cannot match and are skipped.
        let known_target = std::str::from_utf8(&buf)
            .ok()
            .and_then(|line| matcher.parse_line(line.trim_end_matches(['\n', '\r'])));
        if let Some(known_target) = known_target {
            super::add_target(
                &mut result,
                &known_target.mirna,
                &known_target.ensembl_gene,
            );
        } else {
            tracing::debug!(
                "skipping line {} that doesn't match: {:?}",
                lineno,
                String::from_utf8_lossy(&buf).trim_end()
            );
            skipped += 1;
        }
    }

    if skipped > 0 {
        tracing::warn!("skipped {} known target lines that did not match", skipped);
    }
    tracing::info!("read known targets for {} miRNAs", result.len());

    Ok(result)
}

/// Load known targets file.
///
/// # Arguments
///
/// * `path` - Path to the known targets annotation file.
///
/// # Returns
///
/// Mapping from miRNA name to the set of its ENSEMBL gene identifiers.
///
/// # Errors
///
/// If anything goes wrong, it returns a generic `anyhow::Error`.
pub fn load_file<P>(path: P) -> Result<TargetMap, anyhow::Error>
where
    P: AsRef<Path>,
{
    let reader = std::fs::File::open(path)
        .map_err(|e| anyhow::anyhow!("problem opening file: {}", e))
        .map(BufReader::new)?;
    read_known_targets(reader)
}
