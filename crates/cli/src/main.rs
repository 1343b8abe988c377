//! vidqc CLI - quality control for property and lifestyle videos.

mod pipeline;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use vidqc_core::{AttributeRecord, Time, VidqcConfig};
use vidqc_extract::{EmbeddingService, GeminiClient, GeminiEmbeddingClient, GeminiExtractor};
use vidqc_quality::DecisionEngine;
use vidqc_storage::{JsonStorage, Storage};

#[derive(Parser)]
#[command(name = "vidqc")]
#[command(about = "Quality control decisions for video metadata", long_about = None)]
struct Cli {
    /// Configuration file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Storage directory, overrides the configured one
    #[arg(long, global = true)]
    storage: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate an attribute record and print the verdict
    Evaluate {
        /// Record file (JSON object)
        record: PathBuf,
        /// Evaluation time (RFC 3339), defaults to now
        #[arg(long)]
        now: Option<String>,
    },
    /// Extract metadata from media files and evaluate them
    Analyze {
        /// Media files
        #[arg(required = true)]
        media: Vec<PathBuf>,
        /// Embed and persist each analysed record
        #[arg(long)]
        store: bool,
    },
    /// Embed a record and persist it
    Store {
        /// Record file (JSON object)
        record: PathBuf,
        /// Asset name
        #[arg(long)]
        name: String,
    },
    /// Find stored assets similar to a query
    Search {
        /// Free-text query
        query: String,
        /// Number of results
        #[arg(long, default_value = "5")]
        top_k: usize,
    },
    /// Show the latest stored asset with a name
    Show {
        /// Asset name
        name: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config =
        VidqcConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(path) = cli.storage {
        config.storage_path = path;
    }

    match cli.command {
        Commands::Evaluate { record, now } => {
            let record = read_record(&record).await?;
            let now = match now {
                Some(s) => parse_now(&s)?,
                None => chrono::Utc::now(),
            };
            let verdict = DecisionEngine::new().evaluate_at(&record, now);
            println!("{}", serde_json::to_string_pretty(&verdict)?);
        }
        Commands::Analyze { media, store } => {
            let client = GeminiClient::from_config(&config)?;
            let extractor = GeminiExtractor::new(client.clone(), config.chat_model.clone());
            let engine = DecisionEngine::new();
            let now = chrono::Utc::now();

            let embedder;
            let mut storage;
            let sink = if store {
                embedder = GeminiEmbeddingClient::new(client, config.embed_model.clone());
                storage = open_storage(&config).await?;
                Some((&embedder as &dyn EmbeddingService, &mut storage))
            } else {
                None
            };

            let results = pipeline::analyze_batch(
                &extractor,
                &engine,
                sink,
                &media,
                &config.uploaded_by,
                now,
            )
            .await;

            for (analysis, stored) in results {
                let mut report = serde_json::json!({
                    "video_name": analysis.name,
                    "verdict": analysis.verdict,
                    "record": analysis.record,
                });
                if let Some(id) = stored {
                    report["asset_id"] = serde_json::json!(id.to_string());
                }
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
        }
        Commands::Store { record, name } => {
            let record = read_record(&record).await?;
            let client = GeminiClient::from_config(&config)?;
            let embedder = GeminiEmbeddingClient::new(client, config.embed_model.clone());
            let mut storage = open_storage(&config).await?;

            let id = pipeline::store_record(&embedder, &mut storage, &name, &record).await?;
            println!("Stored {} as {}", name, id);
        }
        Commands::Search { query, top_k } => {
            let client = GeminiClient::from_config(&config)?;
            let embedder = GeminiEmbeddingClient::new(client, config.embed_model.clone());
            let storage = open_storage(&config).await?;

            let embedding = embedder
                .embed(&query)
                .await
                .context("Failed to embed query")?;
            let hits = storage.search_nearest(&embedding, top_k).await?;

            info!("{} result(s) for {:?}", hits.len(), query);
            for hit in hits {
                println!(
                    "{:.4} | {} | {} | {}",
                    hit.distance,
                    hit.name,
                    hit.record.get_str("qc_decision").unwrap_or("-"),
                    hit.record.summary_or(""),
                );
            }
        }
        Commands::Show { name } => {
            let storage = open_storage(&config).await?;
            let Some(asset) = storage.find_asset(&name).await? else {
                println!("Asset not found: {}", name);
                return Ok(());
            };

            println!("Asset: {} ({})", asset.name, asset.id);
            println!("  Stored: {}", asset.stored_at);
            println!("  Dimensions: {}", asset.embedding.len());
            println!("{}", serde_json::to_string_pretty(&asset.row)?);
        }
    }

    Ok(())
}

async fn open_storage(config: &VidqcConfig) -> Result<JsonStorage> {
    JsonStorage::new(&config.storage_path)
        .await
        .with_context(|| format!("Failed to open storage at {}", config.storage_path.display()))
}

async fn read_record(path: &Path) -> Result<AttributeRecord> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    AttributeRecord::from_value(value)
        .with_context(|| format!("{} does not contain a JSON object", path.display()))
}

fn parse_now(s: &str) -> Result<Time> {
    let parsed = chrono::DateTime::parse_from_rfc3339(s)
        .with_context(|| format!("Invalid --now timestamp: {}", s))?;
    Ok(parsed.with_timezone(&chrono::Utc))
}
