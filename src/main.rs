use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use nomad_directory::config::Config;
use nomad_directory::{
    DataUriEncoder, DestinationApi, HostedImageUploader, HttpDestinationClient, ImageEncoder,
    ImageFile, Normalizer, Notifier, PlaceholderIdentity, RawFields, SubmissionController,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "nomad-directory", about = "Browse and create nomad destinations")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List every destination stored by the backend
    List,
    /// Submit a new destination
    Create {
        /// JSON file with the form values (nested objects become dotted keys)
        #[arg(long)]
        fields: PathBuf,
        /// Destination image
        #[arg(long)]
        image: PathBuf,
    },
}

/// Prints notifications to the terminal
struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn on_success(&self, message: &str) {
        println!("✅ {}", message);
    }

    fn on_failure(&self, message: &str) {
        eprintln!("❌ {}", message);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    let api = Arc::new(
        HttpDestinationClient::new(&config.api_base_url).context("Failed to create HTTP client")?,
    );

    match cli.command {
        Command::List => list(api.as_ref()).await,
        Command::Create { fields, image } => create(&config, api, fields, image).await,
    }
}

async fn list(api: &dyn DestinationApi) -> Result<()> {
    let destinations = api.list().await.context("Failed to fetch destinations")?;

    info!("Fetched {} destinations", destinations.len());

    for (i, destination) in destinations.iter().enumerate() {
        println!("{}. {}", i + 1, destination.heading());
        println!("   Id: {}", destination.id.as_deref().unwrap_or("-"));
        if !destination.record.country.is_empty() {
            println!("   Country: {}", destination.record.country);
        }
        println!();
    }

    Ok(())
}

async fn create(
    config: &Config,
    api: Arc<HttpDestinationClient>,
    fields: PathBuf,
    image: PathBuf,
) -> Result<()> {
    let encoder: Arc<dyn ImageEncoder> = match &config.image_host {
        Some(host) => Arc::new(
            HostedImageUploader::new(&host.upload_url, &host.api_key)
                .context("Failed to create image uploader")?,
        ),
        None => Arc::new(DataUriEncoder::new()),
    };

    let controller = SubmissionController::new(
        api,
        encoder,
        Normalizer::new(Arc::new(PlaceholderIdentity)),
        Arc::new(TerminalNotifier),
    );

    let json = tokio::fs::read_to_string(&fields)
        .await
        .with_context(|| format!("Failed to read {}", fields.display()))?;
    let value: serde_json::Value =
        serde_json::from_str(&json).with_context(|| format!("{} is not valid JSON", fields.display()))?;
    controller.fill(&RawFields::from_json(&value));

    let file = ImageFile::read(&image)
        .await
        .with_context(|| format!("Failed to load image {}", image.display()))?;
    controller
        .select_image(Some(file))
        .await
        .context("Image could not be encoded")?;

    let persisted = controller.submit().await?;
    if let Some(id) = persisted.id {
        println!("   Id: {}", id);
    }

    Ok(())
}
