//! Evaluation of target predictions against known targets.

pub mod report;
pub mod result;
pub mod scorer;

use std::{
    io::{BufWriter, Write as _},
    path::{Path, PathBuf},
};

use clap::Parser;

use crate::{
    common::{OutputFormat, Tool},
    data::{
        known,
        predicted::{self, miranda, rnahybrid, Extractor},
    },
};

use self::result::Stats;

/// Command line arguments for `eval` command.
#[derive(Parser, Debug)]
#[command(about = "Compute TP/FP/TN/FN, sensitivity and specificity of predictions", long_about = None)]
pub struct Args {
    /// The tool that produced the predictions file.
    #[clap(long, value_enum, default_value_t = Tool::Miranda)]
    pub tool: Tool,
    /// Minimal miRanda alignment score of a predicted target.
    #[clap(long, default_value_t = miranda::Thresholds::default().min_score, allow_negative_numbers = true)]
    pub min_score: f64,
    /// Maximal miRanda energy of a predicted target.
    #[clap(long, default_value_t = miranda::Thresholds::default().max_energy, allow_negative_numbers = true)]
    pub max_energy: f64,
    /// Maximal RNAhybrid MFE of a predicted target.
    #[clap(long, default_value_t = rnahybrid::Thresholds::default().max_mfe, allow_negative_numbers = true)]
    pub max_mfe: f64,
    /// Maximal RNAhybrid p-value of a predicted target.
    #[clap(long, default_value_t = rnahybrid::Thresholds::default().max_p_value)]
    pub max_p_value: f64,
    /// Report the counts of each miRNA as well.
    #[clap(long)]
    pub per_mirna: bool,
    /// Format of the report.
    #[clap(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output_format: OutputFormat,

    /// Path to the annotated known targets.
    pub path_known_targets: PathBuf,
    /// Path to the prediction tool output.
    pub path_predictions: PathBuf,
    /// Path to the output file, stdout if omitted.
    pub path_output: Option<PathBuf>,
}

impl Args {
    /// Thresholds for the prediction tools.
    pub fn config(&self) -> predicted::Config {
        predicted::Config {
            miranda: miranda::Thresholds {
                min_score: self.min_score,
                max_energy: self.max_energy,
            },
            rnahybrid: rnahybrid::Thresholds {
                max_mfe: self.max_mfe,
                max_p_value: self.max_p_value,
            },
        }
    }
}

/// Load known targets and predictions and compare them.
///
/// # Arguments
///
/// * `extractor` - Extractor for the prediction tool output.
/// * `path_known_targets` - Path to the known targets file.
/// * `path_predictions` - Path to the prediction tool output.
///
/// # Errors
///
/// If loading fails or a metric is undefined.
pub fn evaluate(
    extractor: &dyn Extractor,
    path_known_targets: &Path,
    path_predictions: &Path,
) -> Result<Stats, anyhow::Error> {
    tracing::info!("Loading known targets ...");
    let known_targets = known::load_file(path_known_targets)
        .map_err(|e| anyhow::anyhow!("failed to load known targets: {}", e))?;
    tracing::info!("Loading predictions ...");
    let predictions = extractor
        .load_file(path_predictions)
        .map_err(|e| anyhow::anyhow!("failed to load predictions: {}", e))?;
    tracing::info!(
        "... done loading predictions for {} miRNAs",
        predictions
            .targets
            .keys()
            .chain(predictions.non_targets.keys())
            .collect::<rustc_hash::FxHashSet<_>>()
            .len()
    );

    let stats = scorer::compute_stats(&known_targets, &predictions)
        .map_err(|e| anyhow::anyhow!("failed to compute statistics: {}", e))?;

    Ok(stats)
}

/// Main entry point for the `eval` command.
///
/// # Arguments
///
/// * `common_args` - Commonly used command line arguments.
/// * `args` - Command line arguments specific to `eval` command.
///
/// # Errors
///
/// If anything goes wrong, it returns a generic `anyhow::Error`.
pub fn run(common_args: &crate::common::Args, args: &Args) -> Result<(), anyhow::Error> {
    tracing::info!("  running command `eval`");
    tracing::info!("  common_args = {:?}", &common_args);
    tracing::info!("  args = {:?}", &args);

    let extractor = predicted::extractor(args.tool, &args.config())?;
    let stats = evaluate(
        extractor.as_ref(),
        &args.path_known_targets,
        &args.path_predictions,
    )?;

    if let Some(path_output) = &args.path_output {
        let mut writer = std::fs::File::create(path_output)
            .map_err(|e| anyhow::anyhow!("problem creating output file: {}", e))
            .map(BufWriter::new)?;
        report::write(&mut writer, &stats, args.output_format, args.per_mirna)?;
        writer.flush()?;
    } else {
        let stdout = std::io::stdout();
        let mut writer = stdout.lock();
        report::write(&mut writer, &stats, args.output_format, args.per_mirna)?;
    }

    Ok(())
}
