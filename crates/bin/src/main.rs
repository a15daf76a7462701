//! Fremantle CLI binary.
//!
//! Command-line driver for the portfolio robustness experiments: the
//! performance-gap sweep, the weight-convergence study and the two-loss
//! comparison, on synthetic or Ken French industry data.

use std::path::{Path, PathBuf};
use std::process;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};

use fremantle::{LossFunction, ScenarioSet};
use fremantle_data::{SyntheticModel, load_industry_returns};
use fremantle_experiments::{
    CancelFlag, ConvergenceConfig, compare::loss_comparison_with_progress,
    convergence::weight_convergence_with_progress, gap::performance_gap_with_progress, log_grid,
};
use fremantle_output::{ExportFormat, summarize, write_convergence_records, write_gap_records};

#[derive(Parser)]
#[command(name = "fremantle")]
#[command(about = "Fremantle: SAA vs Wasserstein-DRO portfolio experiments", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sweep the ambiguity radius and compare SAA and DRO out of sample
    Gap {
        #[command(flatten)]
        data: DataArgs,

        #[command(flatten)]
        grid: GridArgs,

        /// Loss function to fit and evaluate under
        #[arg(long, value_enum, default_value_t = LossArg::MeanRisk)]
        loss: LossArg,

        /// Output path for the per-radius table
        #[arg(long, default_value = "gap.csv")]
        out: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = FormatArg::Csv)]
        format: FormatArg,
    },

    /// Average DRO weights over Monte Carlo runs per (sample size, radius)
    Convergence {
        #[command(flatten)]
        grid: GridArgs,

        /// Training sample sizes to sweep
        #[arg(long, value_delimiter = ',', default_values_t = vec![30, 300, 3000])]
        sizes: Vec<usize>,

        /// Monte Carlo runs per (sample size, radius) cell
        #[arg(long, default_value_t = 100)]
        runs: usize,

        /// Number of synthetic assets
        #[arg(long, default_value_t = 10)]
        assets: usize,

        /// Base seed; run r draws with seed base + r
        #[arg(long, default_value_t = 0)]
        seed: u64,

        /// Loss function to fit under
        #[arg(long, value_enum, default_value_t = LossArg::MeanRisk)]
        loss: LossArg,

        /// Output path for the per-cell table
        #[arg(long, default_value = "convergence.csv")]
        out: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = FormatArg::Csv)]
        format: FormatArg,
    },

    /// Run the gap sweep under both losses on the same data
    Compare {
        #[command(flatten)]
        data: DataArgs,

        #[command(flatten)]
        grid: GridArgs,

        /// Output path stem; `_mean_risk` and `_shortfall` are appended
        #[arg(long, default_value = "compare.csv")]
        out: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = FormatArg::Csv)]
        format: FormatArg,
    },
}

/// Where the train/test scenarios come from.
#[derive(Args)]
struct DataArgs {
    /// Ken French "10 Industry Portfolios" CSV; omit for synthetic data
    #[arg(long)]
    ff10: Option<PathBuf>,

    /// First month to retain from the CSV
    #[arg(long, default_value = "1926-07-01")]
    start: NaiveDate,

    /// Last month to retain from the CSV
    #[arg(long, default_value = "2026-12-31")]
    end: NaiveDate,

    /// Fraction of observations assigned to the training window
    #[arg(long, default_value_t = 0.8)]
    split: f64,

    /// Number of synthetic assets
    #[arg(long, default_value_t = 10)]
    assets: usize,

    /// Synthetic training scenarios
    #[arg(long, default_value_t = 300)]
    train: usize,

    /// Synthetic test scenarios
    #[arg(long, default_value_t = 10_000)]
    test: usize,

    /// Seed for the training sample; the test sample uses seed + 1
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

/// The log-spaced radius grid shared by every sweep.
#[derive(Args)]
struct GridArgs {
    /// Exponent of the smallest radius (base 10)
    #[arg(long, default_value_t = -4.0, allow_negative_numbers = true)]
    eps_min_exp: f64,

    /// Exponent of the largest radius (base 10)
    #[arg(long, default_value_t = -1.0, allow_negative_numbers = true)]
    eps_max_exp: f64,

    /// Number of radii in the grid
    #[arg(long, default_value_t = 20)]
    eps_count: usize,
}

impl GridArgs {
    fn epsilons(&self) -> Vec<f64> {
        log_grid(self.eps_min_exp, self.eps_max_exp, self.eps_count)
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum LossArg {
    MeanRisk,
    Shortfall,
}

impl From<LossArg> for LossFunction {
    fn from(arg: LossArg) -> Self {
        match arg {
            LossArg::MeanRisk => LossFunction::MeanRisk,
            LossArg::Shortfall => LossFunction::Shortfall,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Csv,
    Json,
    PrettyJson,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Csv => ExportFormat::Csv,
            FormatArg::Json => ExportFormat::Json,
            FormatArg::PrettyJson => ExportFormat::PrettyJson,
        }
    }
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let cancel = CancelFlag::new();

    match cli.command {
        Commands::Gap {
            data,
            grid,
            loss,
            out,
            format,
        } => {
            let (train, test) = build_scenarios(&data)?;
            let epsilons = grid.epsilons();
            let loss = LossFunction::from(loss);

            println!(
                "Gap sweep: {} radii, {} train / {} test scenarios, {} loss",
                epsilons.len(),
                train.n_scenarios(),
                test.n_scenarios(),
                loss.name(),
            );
            let pb = progress_bar(epsilons.len() as u64, "Sweeping radii...");
            let records =
                performance_gap_with_progress(&train, &test, &epsilons, loss, &cancel, Some(&pb))?;
            pb.finish_and_clear();

            write_gap_records(&out, &records, format.into())?;
            println!("Wrote {} rows to {}", records.len(), out.display());
            if let Some(summary) = summarize(loss.name(), &records) {
                println!("{}", summary);
            }
        }
        Commands::Convergence {
            grid,
            sizes,
            runs,
            assets,
            seed,
            loss,
            out,
            format,
        } => {
            let config = ConvergenceConfig {
                sample_sizes: sizes,
                epsilons: grid.epsilons(),
                runs,
                n_assets: assets,
                base_seed: seed,
                loss: loss.into(),
            };

            let cells = config.sample_sizes.len() * config.epsilons.len();
            println!(
                "Convergence study: {} cells, {} runs each, {} assets",
                cells, config.runs, config.n_assets,
            );
            let pb = progress_bar(cells as u64, "Averaging weights...");
            let records = weight_convergence_with_progress(&config, &cancel, Some(&pb))?;
            pb.finish_and_clear();

            write_convergence_records(&out, &records, format.into())?;
            println!("Wrote {} rows to {}", records.len(), out.display());
        }
        Commands::Compare {
            data,
            grid,
            out,
            format,
        } => {
            let (train, test) = build_scenarios(&data)?;
            let epsilons = grid.epsilons();

            println!(
                "Loss comparison: {} radii, {} train / {} test scenarios",
                epsilons.len(),
                train.n_scenarios(),
                test.n_scenarios(),
            );
            let pb = progress_bar(2 * epsilons.len() as u64, "Sweeping both losses...");
            let comparison =
                loss_comparison_with_progress(&train, &test, &epsilons, &cancel, Some(&pb))?;
            pb.finish_and_clear();

            let format = ExportFormat::from(format);
            let mean_risk_path = suffixed_path(&out, "_mean_risk", format.extension());
            let shortfall_path = suffixed_path(&out, "_shortfall", format.extension());
            write_gap_records(&mean_risk_path, &comparison.mean_risk, format)?;
            write_gap_records(&shortfall_path, &comparison.shortfall, format)?;
            println!(
                "Wrote {} and {}",
                mean_risk_path.display(),
                shortfall_path.display(),
            );
            for (loss, records) in [
                (LossFunction::MeanRisk, &comparison.mean_risk),
                (LossFunction::Shortfall, &comparison.shortfall),
            ] {
                if let Some(summary) = summarize(loss.name(), records) {
                    println!("{}", summary);
                }
            }
        }
    }

    Ok(())
}

/// Build the train/test pair from either data source.
fn build_scenarios(data: &DataArgs) -> Result<(ScenarioSet, ScenarioSet), Box<dyn std::error::Error>> {
    if let Some(path) = &data.ff10 {
        let loaded = load_industry_returns(path, data.start, data.end)?;
        println!(
            "Loaded {} months of {} industries from {}",
            loaded.returns.n_scenarios(),
            loaded.industries.len(),
            path.display(),
        );
        let (train, test) = loaded.returns.split_chronological(data.split)?;
        Ok((train, test))
    } else {
        let model = SyntheticModel::new(data.assets);
        let train = model.sample(data.train, data.seed)?;
        let test = model.sample(data.test, data.seed + 1)?;
        Ok((train, test))
    }
}

/// Derive `stem<suffix>.<ext>` next to the requested output path.
fn suffixed_path(out: &Path, suffix: &str, ext: &str) -> PathBuf {
    let stem = out.file_stem().and_then(|s| s.to_str()).unwrap_or("compare");
    out.with_file_name(format!("{stem}{suffix}.{ext}"))
}

fn progress_bar(len: u64, message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    if let Ok(style) =
        ProgressStyle::default_bar().template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
    {
        pb.set_style(style.progress_chars("█▓░"));
    }
    pb.set_message(message);
    pb
}
