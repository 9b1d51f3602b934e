use anyhow::Result;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;
use unityscan::{
    checker::OsvChecker,
    config::Config,
    manifest, mapper, output, scan,
};

/// Exit codes for CI integration
mod exit_codes {
    pub const SUCCESS: u8 = 0;
    pub const ERROR: u8 = 1;
}

#[derive(Parser)]
#[command(name = "unityscan")]
#[command(
    author,
    version,
    about = "Scan Unity package dependencies for known vulnerabilities using OSV.dev"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan the project manifest and write the vulnerability report
    Scan {
        /// Unity project directory (contains Packages/manifest.json)
        #[arg(short, long, default_value = ".")]
        project: PathBuf,

        /// Manifest path, overriding <project>/Packages/manifest.json
        #[arg(short, long)]
        manifest: Option<PathBuf>,

        /// Report path, overriding <project>/Security/osv_scan_results.json
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Per-query timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,

        /// Query OSV sequentially instead of fanning the requests out
        #[arg(long)]
        no_parallel: bool,
    },

    /// List the Unity packages with a known OSV ecosystem mapping
    ListOverrides,

    /// Show or create config file
    Config {
        /// Generate default config file
        #[arg(long)]
        init: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    match run().await {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(exit_codes::ERROR)
        }
    }
}

fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "unityscan=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run() -> Result<u8> {
    let cli = Cli::parse();
    let config = Config::load().unwrap_or_default();

    match cli.command {
        Commands::Scan {
            project,
            manifest,
            output,
            timeout,
            no_parallel,
        } => {
            let parallel = !no_parallel && config.parallel;
            let timeout_secs = timeout.unwrap_or(config.timeout_secs);
            run_scan(
                &project,
                manifest,
                output,
                Duration::from_secs(timeout_secs),
                parallel,
                &config,
            )
            .await
        }
        Commands::ListOverrides => {
            list_overrides();
            Ok(exit_codes::SUCCESS)
        }
        Commands::Config { init, path } => {
            handle_config(init, path)?;
            Ok(exit_codes::SUCCESS)
        }
    }
}

async fn run_scan(
    project: &Path,
    manifest_override: Option<PathBuf>,
    output_override: Option<PathBuf>,
    timeout: Duration,
    parallel: bool,
    config: &Config,
) -> Result<u8> {
    let manifest_path =
        manifest_override.unwrap_or_else(|| project.join(&config.manifest_path));
    let report_path = output_override.unwrap_or_else(|| project.join(&config.report_path));

    // Fatal: without a readable manifest there is nothing to scan.
    let dependencies = manifest::load_manifest(&manifest_path)?;

    let checker = OsvChecker::with_timeout(timeout)?;

    // The spinner draws on stderr; stdout carries only the summary protocol.
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message("Querying OSV.dev...");

    let report = scan::run_scan(&dependencies, &checker, parallel).await;

    spinner.finish_and_clear();

    output::write_report(&report_path, &report)?;
    output::print_summary(&report, &report_path);

    // Per-query failures are recorded in the report, not in the exit code.
    Ok(exit_codes::SUCCESS)
}

fn list_overrides() {
    println!("Supported package mappings:");
    println!();

    for (unity_name, mapping) in mapper::PACKAGE_OVERRIDES {
        println!(
            "  {:<36} ->  {} ({})",
            unity_name, mapping.name, mapping.ecosystem
        );
    }

    println!();
    println!("Manifest packages not listed here are reported as unsupported.");
}

fn handle_config(init: bool, show_path: bool) -> Result<()> {
    let config_path = Config::config_path();

    if show_path {
        println!("{}", config_path.display());
        return Ok(());
    }

    if init {
        if config_path.exists() {
            println!("Config file already exists at: {}", config_path.display());
            return Ok(());
        }

        let config = Config::default();
        config.save()?;
        println!("Created config file at: {}", config_path.display());
        println!();
        println!("Default configuration:");
        println!("{}", Config::generate_default_config());
        return Ok(());
    }

    // Show current config
    if config_path.exists() {
        let content = std::fs::read_to_string(&config_path)?;
        println!("Config file: {}", config_path.display());
        println!();
        println!("{}", content);
    } else {
        println!("No config file found.");
        println!("Run 'unityscan config --init' to create one.");
        println!();
        println!("Config path: {}", config_path.display());
    }

    Ok(())
}
