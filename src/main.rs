use clap::{Parser, Subcommand};
use spread_engine::{ColorSpace, CvdState, Palette};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use huespread::api;
use huespread::assets::AssetLoader;
use huespread::models::{self, AppConfig, RunOverrides, WeightOverrides};
use huespread::server;
use huespread::services::{parse_palette_text, OptimizerService};

#[derive(Parser)]
#[command(name = "huespread")]
#[command(about = "Huespread - extend color palettes that stay distinguishable for everyone")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Find new colors for a palette
    Extend {
        /// Palette colors, e.g. "#4477AA, #228833" (any whitespace, comma or semicolon)
        #[arg(short, long)]
        colors: String,

        /// Color space to search in: hsl, lab, lch, oklab, oklch
        #[arg(short, long)]
        space: Option<ColorSpace>,

        /// Number of colors to add
        #[arg(short, long)]
        add: Option<usize>,

        /// Number of optimizer restarts
        #[arg(short, long)]
        runs: Option<usize>,

        /// Nelder-Mead iterations per restart
        #[arg(short, long)]
        iterations: Option<usize>,

        /// Bounds tightness per channel, e.g. "0.5,0.5,0.5"
        #[arg(long, value_delimiter = ',')]
        widths: Option<Vec<f64>>,

        /// Weights for none,deutan,protan,tritan, e.g. "1,1,1,0.5"
        #[arg(long, value_delimiter = ',')]
        weights: Option<Vec<f64>>,

        /// Fixed random seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Config file (overrides CONFIG_FILE)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print the full run report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show how colors look under color-vision deficiencies
    Simulate {
        /// Colors to simulate
        #[arg(short, long)]
        colors: String,

        /// Only this state: none, deutan, protan, tritan
        #[arg(short, long)]
        state: Option<CvdState>,
    },
    /// Start the HTTP server
    Serve,
    /// Write the default config.yaml
    Init {
        /// Output path (defaults to CONFIG_FILE or ./config.yaml)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long, short)]
        force: bool,
    },
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Huespread API",
        description = "Extend color palettes with colors that stay distinguishable under color-vision deficiency",
        version = "0.1.0",
        license(name = "MIT")
    ),
    paths(
        api::handle_optimize,
        api::handle_last,
        api::handle_cancel,
        api::handle_simulate,
        api::handle_spaces,
    ),
    components(schemas(
        api::OptimizeRequest,
        api::CancelResponse,
        api::SimulateRequest,
        api::SimulateResponse,
        api::SimulatedState,
        api::SpaceSchema,
        api::ChannelSchema,
        models::RunOverrides,
        models::WeightOverrides,
        models::RunReport,
        models::StateDistancesReport,
    )),
    tags(
        (name = "Optimization", description = "Palette extension runs"),
        (name = "Simulation", description = "Color-vision deficiency simulation")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Extend {
            colors,
            space,
            add,
            runs,
            iterations,
            widths,
            weights,
            seed,
            config,
            json,
        }) => {
            let overrides = build_overrides(space, add, runs, iterations, widths, weights, seed)?;
            run_extend_command(&colors, overrides, config, json).await
        }
        Some(Commands::Simulate { colors, state }) => run_simulate_command(&colors, state),
        Some(Commands::Init { output, force }) => run_init_command(output, force),
        Some(Commands::Serve) => run_server().await,
        None => {
            run_status_command();
            Ok(())
        }
    }
}

fn init_cli_tracing() {
    // Minimal logging for CLI
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "huespread=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

fn config_file_from_env() -> Option<PathBuf> {
    std::env::var("CONFIG_FILE").ok().map(PathBuf::from)
}

/// Parse palette text, warning about anything that was skipped
fn read_palette(text: &str) -> anyhow::Result<Palette> {
    let parsed = parse_palette_text(text);
    if !parsed.rejected.is_empty() {
        eprintln!("Ignoring invalid colors: {}", parsed.rejected.join(" "));
    }
    parsed
        .into_palette()
        .map_err(|_| anyhow::anyhow!("No valid hex colors in --colors"))
}

fn build_overrides(
    space: Option<ColorSpace>,
    add: Option<usize>,
    runs: Option<usize>,
    iterations: Option<usize>,
    widths: Option<Vec<f64>>,
    weights: Option<Vec<f64>>,
    seed: Option<u64>,
) -> anyhow::Result<RunOverrides> {
    let widths = widths
        .map(|w| {
            <[f64; 3]>::try_from(w.as_slice())
                .map_err(|_| anyhow::anyhow!("--widths needs exactly 3 values, got {}", w.len()))
        })
        .transpose()?;
    let colorblind_weights = weights
        .map(|w| match w.as_slice() {
            &[none, deutan, protan, tritan] => Ok(WeightOverrides {
                none: Some(none),
                deutan: Some(deutan),
                protan: Some(protan),
                tritan: Some(tritan),
            }),
            _ => Err(anyhow::anyhow!(
                "--weights needs exactly 4 values (none,deutan,protan,tritan), got {}",
                w.len()
            )),
        })
        .transpose()?;

    Ok(RunOverrides {
        color_space: space,
        n_cols_to_add: add,
        n_optim_runs: runs,
        nm_iterations: iterations,
        widths,
        colorblind_weights,
        seed,
    })
}

/// Run one optimization in the foreground; Ctrl-C stops after the current restart
async fn run_extend_command(
    colors: &str,
    overrides: RunOverrides,
    config_file: Option<PathBuf>,
    json: bool,
) -> anyhow::Result<()> {
    init_cli_tracing();

    let loader = AssetLoader::new(config_file.or_else(config_file_from_env));
    let config = Arc::new(AppConfig::load_from_assets(&loader));
    let palette = read_palette(colors)?;

    let service = Arc::new(OptimizerService::new(config));
    let interrupt = service.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("Interrupted, finishing current restart...");
            interrupt.cancel_all();
        }
    });

    let report = tokio::task::spawn_blocking(move || {
        let run = service.begin();
        service.run(&palette, &overrides, run.flag())
    })
    .await??;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for color in &report.new_colors {
        println!("{color}");
    }
    eprintln!(
        "\nPalette: {}\nScore:   {:.4} ({}, {} restarts{})",
        report.full_palette().join(" "),
        report.best_score,
        report.convergence_reason,
        report.completed_restarts,
        if report.cancelled { ", cancelled" } else { "" }
    );
    let d = report.state_distances;
    eprintln!(
        "Distance: none {:.1}  deutan {:.1}  protan {:.1}  tritan {:.1}",
        d.none, d.deutan, d.protan, d.tritan
    );

    Ok(())
}

/// Print simulated colors per vision state
fn run_simulate_command(colors: &str, state: Option<CvdState>) -> anyhow::Result<()> {
    init_cli_tracing();

    let palette = read_palette(colors)?;
    let states = match state {
        Some(state) => vec![state],
        None => api::simulate::REPORT_ORDER.to_vec(),
    };

    for simulated in api::simulate_colors(palette.colors(), &states) {
        println!("{:<7} {}", simulated.state, simulated.colors.join(" "));
    }

    Ok(())
}

/// Write the embedded config to the filesystem
fn run_init_command(output: Option<PathBuf>, force: bool) -> anyhow::Result<()> {
    let loader = AssetLoader::new(output.or_else(config_file_from_env));
    let report = loader.init(force)?;

    for f in &report.written {
        println!("  + {f}");
    }
    if !report.skipped.is_empty() {
        println!("Skipped existing file (use --force to overwrite):");
        for f in &report.skipped {
            println!("  - {f}");
        }
    }

    Ok(())
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let bind_addr = std::env::var("BIND_ADDR").ok();
    let config_file = std::env::var("CONFIG_FILE").ok();

    println!("Huespread v{VERSION}");
    println!("Palette extension for every kind of color vision\n");

    println!("Environment Variables:");
    println!(
        "  BIND_ADDR   = {}",
        bind_addr.as_deref().unwrap_or("0.0.0.0:3000 (default)")
    );
    println!(
        "  CONFIG_FILE = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );

    let config_source = match config_file {
        Some(ref path) if PathBuf::from(path).exists() => path.to_string(),
        Some(_) => "embedded (file not found)".to_string(),
        None => "embedded".to_string(),
    };
    println!("\nConfig: {config_source}");

    println!("\nCommands:");
    println!("  huespread extend     Find new colors for a palette");
    println!("  huespread simulate   Show colors under color-vision deficiencies");
    println!("  huespread serve      Start the HTTP server");
    println!("  huespread init       Write the default config.yaml");
    println!("\nRun 'huespread --help' for more details.");
}

/// Run the HTTP server
async fn run_server() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "huespread=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_file = config_file_from_env();
    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

    tracing::info!(
        config = ?config_file.as_ref().map(|p| p.display().to_string()).unwrap_or_else(|| "embedded".to_string()),
        "Config source configured"
    );

    let loader = AssetLoader::new(config_file);
    if let Err(e) = loader.seed_if_configured() {
        tracing::warn!(%e, "Failed to seed config file");
    }

    let state = server::create_app_state(&loader);

    let app = server::build_router(state)
        // OpenAPI documentation (production only)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "Huespread server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
