// h36m-pose 🚀 AGPL-3.0 License

use std::process;

use clap::Parser;

use h36m_pose::cli::args::{Cli, Commands};
use h36m_pose::{cli, error};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Stats(args) => cli::compute::run(&args),
    };

    if let Err(e) = result {
        error!("{e}");
        process::exit(1);
    }
}
