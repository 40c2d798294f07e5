use clap::Parser;
use readiness_cli::{cmd, fail, init_logging, CommonArgs};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "readiness",
    about = "Compliance readiness tracker: weighted score, blocking gaps, effort and remediation timeline",
    version
)]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    /// Scoring configuration (YAML)
    #[arg(long, env = "READINESS_CONFIG")]
    config: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.common.verbose);

    if let Err(e) = cmd::assess::run(&cli.common, cli.config.as_deref()) {
        fail(e);
    }
}
