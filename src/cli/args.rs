// h36m-pose 🚀 AGPL-3.0 License

use clap::{Args, Parser, Subcommand};

/// CLI arguments parser.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(after_help = r#"Examples:
    h36m-pose stats --poses h36m17_15678.npz --output norm_stats.npz
    h36m-pose stats --poses h36m17_15678.npz --output norm_stats.npz --root-idx 0 --quiet"#)]
pub struct Cli {
    #[command(subcommand)]
    /// Subcommand to execute.
    pub command: Commands,
}

/// Commands for the CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute normalization statistics from a training-split pose archive
    Stats(StatsArgs),
}

/// Arguments for the stats command.
#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Input NPZ archive with `pose2d` (N, 17, 2) and `pose3d` (N, 17, 3) arrays
    #[arg(short, long)]
    pub poses: String,

    /// Output NPZ path for the mean2d/std2d/mean3d/std3d table
    #[arg(short, long, default_value = "norm_stats.npz")]
    pub output: String,

    /// Root joint index (Pelvis)
    #[arg(long, default_value_t = 0)]
    pub root_idx: usize,

    /// Suppress progress output
    #[arg(long, default_value_t = false)]
    pub quiet: bool,
}
