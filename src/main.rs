use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use anyhow::anyhow;
use clap::{Args, Parser, Subcommand};
use http::{HeaderName, Method, header::CONTENT_TYPE};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;

use gemini_tts_studio::{
    GeminiTTS, ServerConfig, SpeechForm, SpeechPipeline,
    core::tts::{OUTPUT_FILE_NAME, catalog, write_wav_file},
    handlers::speak::PROVIDER_API_KEY_HEADER,
    routes,
    state::AppState,
};

/// Gemini TTS Studio - pick a voice, describe a style, get a WAV file
#[derive(Parser, Debug)]
#[command(name = "gemini-tts-studio")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to configuration file (YAML)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Subcommand to run (defaults to `serve`)
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the form page and API
    Serve,

    /// Print the voice catalog
    Voices,

    /// Generate a single WAV file without starting the server
    Generate(GenerateArgs),
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Gemini API key
    #[arg(long = "api-key", env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Voice label as listed by `voices` (defaults to Kore)
    #[arg(short = 'v', long = "voice")]
    voice: Option<String>,

    /// Speaking style prompt
    #[arg(short = 's', long = "style")]
    style: String,

    /// Script text
    #[arg(long = "script", conflicts_with = "script_file", required_unless_present = "script_file")]
    script: Option<String>,

    /// Read the script from a file
    #[arg(long = "script-file", value_name = "PATH")]
    script_file: Option<PathBuf>,

    /// Output path
    #[arg(short = 'o', long = "output", default_value = OUTPUT_FILE_NAME)]
    output: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if it exists (must be done before config loading)
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Parse CLI arguments
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Voices => {
            for label in catalog::display_labels() {
                println!("{label}");
            }
            Ok(())
        }
        Commands::Generate(args) => {
            let config = load_config(cli.config)?;
            generate(config, args).await
        }
        Commands::Serve => {
            let config = load_config(cli.config)?;
            serve(config).await
        }
    }
}

/// Load configuration from file or environment
fn load_config(path: Option<PathBuf>) -> anyhow::Result<ServerConfig> {
    if let Some(config_path) = path {
        println!("Loading configuration from {}", config_path.display());
        ServerConfig::from_file(&config_path).map_err(|e| anyhow!(e.to_string()))
    } else {
        ServerConfig::from_env().map_err(|e| anyhow!(e.to_string()))
    }
}

async fn generate(config: ServerConfig, args: GenerateArgs) -> anyhow::Result<()> {
    let script = match (args.script, args.script_file) {
        (Some(text), _) => text,
        (None, Some(path)) => tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| anyhow!("Failed to read script from {}: {}", path.display(), e))?,
        (None, None) => anyhow::bail!("Either --script or --script-file is required"),
    };

    let service = GeminiTTS::new(config.gemini)?;
    let pipeline = SpeechPipeline::new(Arc::new(service));

    let form = SpeechForm {
        api_key: args.api_key,
        voice: args.voice,
        style_prompt: args.style,
        script,
    };

    let audio = pipeline.run(&form).await?;
    write_wav_file(&args.output, &audio.wav).await?;

    println!(
        "Wrote {:.2}s of audio ({} bytes) to {}",
        audio.duration_secs(),
        audio.wav.len(),
        args.output.display()
    );
    Ok(())
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let address = config.address();
    let cors_origins = config.cors_allowed_origins.clone();
    println!("Starting server on {address}");

    // Create application state
    let app_state = AppState::new(config).await?;

    // Configure CORS
    let cors_layer = if let Some(ref origins) = cors_origins {
        if origins == "*" {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([CONTENT_TYPE, HeaderName::from_static(PROVIDER_API_KEY_HEADER)])
                .allow_credentials(false)
        } else {
            // Parse comma-separated origins
            let origins: Vec<_> = origins
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([CONTENT_TYPE, HeaderName::from_static(PROVIDER_API_KEY_HEADER)])
                .allow_credentials(true)
        }
    } else {
        // No allow_origin = same-origin only (browsers block cross-origin requests)
        info!(
            "CORS not configured, defaulting to same-origin only. \
             Set CORS_ALLOWED_ORIGINS to enable cross-origin access."
        );
        CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([CONTENT_TYPE, HeaderName::from_static(PROVIDER_API_KEY_HEADER)])
            .allow_credentials(false)
    };

    // Security headers
    let security_headers = tower::ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::overriding(
            http::header::X_CONTENT_TYPE_OPTIONS,
            http::HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            http::header::X_FRAME_OPTIONS,
            http::HeaderValue::from_static("DENY"),
        ));

    let app = routes::api::create_api_router()
        .with_state(app_state)
        .layer(cors_layer)
        .layer(security_headers);

    // Parse socket address
    let socket_addr: SocketAddr = address
        .parse()
        .map_err(|e| anyhow!("Invalid server address '{}': {}", address, e))?;

    println!("Server listening on http://{}", socket_addr);

    let listener = TcpListener::bind(&socket_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
