//! Predicted targets and non-targets from target prediction tools.
//!
//! Each supported tool has an [`Extractor`] that reads the tool's output and
//! sorts every record into the predicted targets (hits) or predicted
//! non-targets (misses) of its miRNA, based on the tool's thresholds.

pub mod miranda;
pub mod rnahybrid;

use std::{
    io::{BufRead, BufReader},
    path::Path,
};

use super::TargetMap;
use crate::{common::Tool, error::Error};

/// Decision for one prediction record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    /// Passes the thresholds; predicted target.
    Hit,
    /// Fails the thresholds; predicted non-target.
    Miss,
}

/// Predicted targets and non-targets of one prediction tool run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Predictions {
    /// Genes predicted as targets, by miRNA.
    pub targets: TargetMap,
    /// Genes predicted as non-targets, by miRNA.
    pub non_targets: TargetMap,
}

impl Predictions {
    /// Route `gene` to the targets or non-targets of `mirna` according to `call`.
    pub fn insert(&mut self, mirna: &str, gene: &str, call: Call) {
        let map = match call {
            Call::Hit => &mut self.targets,
            Call::Miss => &mut self.non_targets,
        };
        super::add_target(map, mirna, gene);
    }
}

/// Thresholds for all supported prediction tools.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Config {
    /// Thresholds for miRanda output.
    pub miranda: miranda::Thresholds,
    /// Thresholds for RNAhybrid output.
    pub rnahybrid: rnahybrid::Thresholds,
}

/// Extraction of predictions from the output of one prediction tool.
pub trait Extractor {
    /// Read all records from `reader`.
    ///
    /// # Arguments
    ///
    /// * `source_name` - Name of the input used in error messages.
    /// * `reader` - The tool output.
    ///
    /// # Errors
    ///
    /// If reading fails or a record is malformed.
    fn extract(&self, source_name: &str, reader: &mut dyn BufRead) -> Result<Predictions, Error>;

    /// Open the file at `path` and extract from it.
    ///
    /// # Errors
    ///
    /// If the file cannot be opened, reading fails or a record is malformed.
    fn load_file(&self, path: &Path) -> Result<Predictions, Error> {
        let mut reader = std::fs::File::open(path).map(BufReader::new)?;
        self.extract(&path.display().to_string(), &mut reader)
    }
}

/// Construct the extractor for `tool`.
///
/// # Arguments
///
/// * `tool` - The prediction tool.
/// * `config` - Thresholds; only those of `tool` are used.
///
/// # Errors
///
/// `Error::NotImplemented` for tools without extractor.
pub fn extractor(tool: Tool, config: &Config) -> Result<Box<dyn Extractor>, Error> {
    match tool {
        Tool::Miranda => Ok(Box::new(miranda::Miranda::new(config.miranda))),
        Tool::Rnahybrid => Ok(Box::new(rnahybrid::Rnahybrid::new(config.rnahybrid))),
        Tool::Microtar => Err(Error::NotImplemented(tool)),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::data::sorted_targets;

    #[test]
    fn insert_routes_by_call() {
        let mut predictions = Predictions::default();
        predictions.insert("hsa-miR-16-5p", "ENSG00000159216", Call::Hit);
        predictions.insert("hsa-miR-16-5p", "ENSG00000105173", Call::Miss);

        assert_eq!(
            sorted_targets(&predictions.targets, "hsa-miR-16-5p"),
            vec!["ENSG00000159216"]
        );
        assert_eq!(
            sorted_targets(&predictions.non_targets, "hsa-miR-16-5p"),
            vec!["ENSG00000105173"]
        );
    }

    #[rstest::rstest]
    #[case(Tool::Miranda, "tests/data/miranda.txt")]
    #[case(Tool::Rnahybrid, "tests/data/rnahybrid.txt")]
    fn extractor_for_tool(#[case] tool: Tool, #[case] path: &str) -> Result<(), anyhow::Error> {
        let predictions = extractor(tool, &Config::default())?.load_file(Path::new(path))?;

        assert_eq!(predictions.targets.len(), 1);
        assert_eq!(predictions.non_targets.len(), 2);

        Ok(())
    }

    #[test]
    fn extractor_microtar_not_implemented() {
        let result = extractor(Tool::Microtar, &Config::default());

        assert!(matches!(result, Err(Error::NotImplemented(Tool::Microtar))));
    }

    #[test]
    fn load_file_missing() -> Result<(), anyhow::Error> {
        let result = extractor(Tool::Miranda, &Config::default())?
            .load_file(Path::new("tests/data/does-not-exist.txt"));

        assert!(matches!(result, Err(Error::Io(_))));

        Ok(())
    }
}
