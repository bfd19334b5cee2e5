use clap::Parser;
use colored::Colorize;
use pipit::utils::output::{ColorChoice, stdout_reporter};
use pipit::{Installer, PackageName, Pip, PipitConfig, PythonEnvironment, Result};
use std::io;
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "pipit")]
#[command(about = "💻 Install Python libraries from the command line", long_about = None)]
#[command(version)]
struct Cli {
    /// Name(s) of the package(s) to install. Leave empty for interactive mode.
    packages: Vec<PackageName>,

    /// Python interpreter whose pip is used
    #[arg(long, value_name = "PATH")]
    python: Option<PathBuf>,

    /// Extra argument passed to `pip install` (repeatable)
    #[arg(long = "pip-arg", value_name = "ARG", allow_hyphen_values = true)]
    pip_args: Vec<String>,

    /// When to color status output
    #[arg(long, value_enum)]
    color: Option<ColorChoice>,

    /// Config file (defaults to <config dir>/pipit/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(default_level.into())
                .from_env_lossy(),
        )
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = PipitConfig::resolve(cli.config.as_deref())?;

    let python = cli.python.or(config.python.executable);
    let env = PythonEnvironment::locate(python.as_deref());
    match env.version() {
        Ok(version) => debug!(python = %env.python_path.display(), %version, "interpreter ready"),
        Err(e) => debug!(error = %e, "could not query interpreter version"),
    }

    let mut pip_args = config.pip.extra_args;
    pip_args.extend(cli.pip_args);
    let pip = Pip::new(&env).with_extra_args(pip_args);

    let reporter = stdout_reporter(cli.color.unwrap_or(config.output.color));
    let mut installer = Installer::new(env, pip, reporter);

    let report = if cli.packages.is_empty() {
        pipit::cli::interactive::execute(&mut installer, io::stdin().lock())
    } else {
        pipit::cli::install::execute(&mut installer, &cli.packages)
    };
    info!(attempted = report.len(), failed = report.failed(), "run complete");

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "✗".red().bold(), e);
        std::process::exit(1);
    }
}
