use clap::Parser;
use readiness_cli::{cmd, fail, init_logging, CommonArgs};
use readiness_core::types::Category;

#[derive(Parser)]
#[command(
    name = "audit-checklist",
    about = "Risk-prioritized audit checklist with follow-up questions for open findings",
    version
)]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    /// Category to weight as a risk area (repeatable), merged with the document's list
    #[arg(long = "risk-area", value_name = "CATEGORY")]
    risk_areas: Vec<Category>,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.common.verbose);

    if let Err(e) = cmd::audit::run(&cli.common, &cli.risk_areas) {
        fail(e);
    }
}
