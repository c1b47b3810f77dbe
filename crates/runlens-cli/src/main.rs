use anyhow::Result;
use clap::Parser;
use runlens_cli::{OutputFormat, commands};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "runlens")]
#[command(author, version)]
#[command(
    about = "Summarize graphics, memory and request diagnostics from a mobile test run",
    long_about = "runlens reads the artifacts captured for one test run (gfxinfo dumps, meminfo \
                  dumps and the filtered LLM_HTTP logcat), extracts jank, memory and request \
                  latency metrics, writes summary.json into the run directory and prints a digest."
)]
struct Cli {
    /// Run directory holding the captured artifacts
    #[arg(value_name = "RUN_DIR")]
    run_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Console output format
    #[arg(
        short,
        long,
        value_enum,
        env = "RUNLENS_FORMAT",
        default_value = "pretty"
    )]
    format: OutputFormat,
}

fn main() -> Result<()> {
    let cli = parse_args();

    init_logging(cli.verbose);

    commands::analyze::execute(&cli.run_dir, cli.format)
}

/// Parse arguments, exiting with status 1 on usage errors.
fn parse_args() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version print to stdout and exit 0
            if !err.use_stderr() {
                err.exit();
            }
            let _ = err.print();
            std::process::exit(1);
        }
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("runlens=debug,runlens_cli=debug,runlens_core=debug")
    } else {
        EnvFilter::new("runlens=info,runlens_cli=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
