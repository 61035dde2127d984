use anyhow::Context;
use clap::{Parser, Subcommand};
use hospital_kmeans::config::{Config, DEFAULT_OUT_DIR, DEFAULT_SERVICE_URL};
use hospital_kmeans::{Controller, HttpServiceClient, TerminalSurface, repl};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(name = "hospital-kmeans")]
#[command(version)]
#[command(about = "Place hospitals among generated houses with a remote K-Means service")]
#[command(propagate_version = true)]
struct Cli {
    /// Base address of the clustering service
    #[arg(long, global = true, env = "KMEANS_SERVICE_URL", default_value = DEFAULT_SERVICE_URL)]
    service_url: String,

    /// Directory that receives the chart SVG/JSON files
    #[arg(long, global = true, env = "KMEANS_OUT_DIR", default_value = DEFAULT_OUT_DIR)]
    out_dir: PathBuf,

    /// Per-request timeout; requests wait indefinitely when omitted
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate, cluster and optionally analyze k in one go
    Run {
        #[arg(long, default_value_t = 50)]
        count: i64,
        #[arg(long, default_value_t = 100)]
        width: i64,
        #[arg(long, default_value_t = 100)]
        height: i64,
        #[arg(long, default_value_t = 3)]
        k: i64,
        /// Also run the optimal k analysis
        #[arg(long)]
        analyze: bool,
    },
    /// Read commands from stdin
    Interactive,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::new()
        .service_url(cli.service_url)
        .timeout_secs(cli.timeout_secs)
        .out_dir(cli.out_dir)
        .validated()
        .context("invalid configuration")?;
    tracing::info!(service_url = %config.service_url, out_dir = %config.out_dir.display(), "starting");

    let client = HttpServiceClient::with_timeout(&config.service_url, config.timeout)
        .context("failed to build the HTTP client")?;
    let surface = TerminalSurface::new(&config.out_dir, &config.service_url).with_context(|| {
        format!(
            "failed to prepare output directory {}",
            config.out_dir.display()
        )
    })?;
    let controller = Controller::new(client, surface);

    match cli.command {
        Commands::Run {
            count,
            width,
            height,
            k,
            analyze,
        } => {
            controller
                .generate_points(count, width, height)
                .await
                .context("generating houses")?;
            controller
                .compute_clustering(k)
                .await
                .context("computing hospitals")?;
            if analyze {
                controller
                    .analyze_optimal_k()
                    .await
                    .context("analyzing optimal k")?;
            }
            println!(
                "Charts written to {}",
                controller.surface().out_dir().display()
            );
        }
        Commands::Interactive => {
            controller.notify(repl::HELP);
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            repl::run(&controller, stdin).await?;
        }
    }

    Ok(())
}
