//! Commonly used code.

use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};

/// Commonly used command line arguments.
#[derive(Parser, Debug)]
pub struct Args {
    /// Verbosity of the program
    #[clap(flatten)]
    pub verbose: Verbosity<InfoLevel>,
}

/// Target prediction tool that produced the predictions file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, clap::ValueEnum, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Tool {
    /// miRanda, tabular alignment score output.
    Miranda,
    /// RNAhybrid, compact colon-delimited hybridization output.
    Rnahybrid,
    /// microTar; recognized but not supported.
    Microtar,
}

/// Format of the written report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    /// Plain text summary line.
    #[default]
    Text,
    /// JSON document.
    Json,
}
