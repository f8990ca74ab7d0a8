use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use facetx_api::{OrchestratorConfig, QueryOrchestrator, RestApi};
use facetx_backend::{seed_catalog, BackendConfig, HttpBackend, DEFAULT_BATCH_SIZE};
use facetx_core::{NativeSort, OrderingStrategy, PriceDomain, ProbeBias};

/// Faceted catalog search over a vector index
#[derive(Parser, Debug)]
#[command(name = "facetx")]
#[command(about = "Filter and price-order a product catalog stored in a vector index", long_about = None)]
struct Cli {
    /// Log level
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the product query API
    Serve(ServeArgs),
    /// Upsert a JSON catalog into the index
    Seed(SeedArgs),
}

#[derive(Args, Debug)]
struct BackendArgs {
    /// Base URL of the vector index REST API
    #[arg(long, env = "VECTOR_REST_URL")]
    backend_url: String,

    /// Bearer token for the vector index
    #[arg(long, env = "VECTOR_REST_TOKEN", hide_env_values = true)]
    backend_token: String,

    /// Backend request timeout in seconds
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,
}

#[derive(Args, Debug)]
struct ServeArgs {
    #[command(flatten)]
    backend: BackendArgs,

    /// HTTP API port
    #[arg(long, env = "FACETX_HTTP_PORT", default_value_t = 3000)]
    http_port: u16,

    /// Maximum results per query
    #[arg(long, default_value_t = facetx_api::DEFAULT_TOP_K)]
    top_k: usize,

    /// Average catalog price (probe position when no sort is requested)
    #[arg(long, default_value_t = 25.0)]
    average_price: f32,

    /// Maximum catalog price (probe position for descending sort)
    #[arg(long, default_value_t = 50.0)]
    max_price: f32,

    /// How price ordering is produced
    #[arg(long, value_enum, default_value_t = OrderingKind::Probe)]
    ordering: OrderingKind,
}

#[derive(Args, Debug)]
struct SeedArgs {
    #[command(flatten)]
    backend: BackendArgs,

    /// JSON array of catalog items
    #[arg(short, long)]
    file: PathBuf,

    /// Items per upsert request
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    batch_size: usize,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum OrderingKind {
    /// Bias the probe vector along the price axis
    Probe,
    /// Neutral probe plus a native sort directive
    Native,
}

impl BackendArgs {
    fn connect(&self) -> anyhow::Result<HttpBackend> {
        let config = BackendConfig::new(&self.backend_url, &self.backend_token)
            .with_timeout(Duration::from_secs(self.timeout_secs));
        Ok(HttpBackend::new(config)?)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting FacetX v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Command::Serve(args) => serve(args).await,
        Command::Seed(args) => seed(args).await,
    }
}

async fn serve(args: ServeArgs) -> anyhow::Result<()> {
    let price_domain = PriceDomain::new(args.average_price, args.max_price)?;
    let config = OrchestratorConfig {
        top_k: args.top_k,
        price_domain,
    };
    let ordering: Arc<dyn OrderingStrategy> = match args.ordering {
        OrderingKind::Probe => Arc::new(ProbeBias::new(price_domain)),
        OrderingKind::Native => Arc::new(NativeSort::new(price_domain)),
    };

    let backend = Arc::new(args.backend.connect()?);
    info!("Search backend: {}", backend.base_url());

    let orchestrator = Arc::new(QueryOrchestrator::new(backend, config)?.with_ordering(ordering));

    let http_port = args.http_port;
    let http_handle = std::thread::spawn(move || {
        info!("Starting HTTP server on port {}", http_port);
        let sys = actix_web::rt::System::new();
        sys.block_on(async {
            if let Err(e) = RestApi::start(orchestrator, http_port).await {
                tracing::error!("HTTP server error: {}", e);
            }
        })
    });

    info!("FacetX started successfully");
    info!("HTTP API: http://localhost:{}/api/products", http_port);

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        _ = tokio::task::spawn_blocking(move || {
            http_handle.join().ok();
        }) => {
            info!("HTTP server stopped");
        }
    }

    info!("Shutting down...");
    Ok(())
}

async fn seed(args: SeedArgs) -> anyhow::Result<()> {
    let items = facetx_core::load_catalog(&args.file)?;
    info!("Loaded {} catalog items from {:?}", items.len(), args.file);

    let backend = args.backend.connect()?;
    let written = seed_catalog(&backend, &items, args.batch_size).await?;
    info!("Seeded {} items into {}", written, backend.base_url());
    Ok(())
}
