use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;

use confab::io::{
    read_chunks_file, read_rows_file, read_transcript_file, render_row, write_ndjson,
};
use confab::{
    CompletionClient, CompletionConfig, DispatchConfig, ScoreScale, TranscriptFormat, assemble,
    roll_up, run_extraction,
};

#[derive(Parser)]
#[command(name = "confab")]
#[command(author, version, about = "Meeting transcript analytics pipeline", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a raw transcript and roll it up into analysis chunks
    Ingest {
        /// Input transcript file
        #[arg(short, long)]
        input: PathBuf,

        /// Output file for chunk records (NDJSON)
        #[arg(short, long)]
        output: PathBuf,

        /// Source transcript format
        #[arg(long, value_enum, default_value = "captions")]
        format: TranscriptFormat,

        /// Number of segments per analysis chunk
        #[arg(long, default_value = "10")]
        chunk_size: usize,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Run the extraction pipeline and write the analytics table
    Analyze {
        /// Input file: a raw transcript, or a chunk file with --chunked
        #[arg(short, long)]
        input: PathBuf,

        /// Output file for analytics rows (NDJSON)
        #[arg(short, long)]
        output: PathBuf,

        /// Treat the input as a pre-built chunk file
        #[arg(long)]
        chunked: bool,

        /// Source transcript format (ignored with --chunked)
        #[arg(long, value_enum, default_value = "captions")]
        format: TranscriptFormat,

        /// Number of segments per analysis chunk (ignored with --chunked)
        #[arg(long, default_value = "10")]
        chunk_size: usize,

        /// Maximum concurrent extraction requests
        #[arg(long, default_value = "30")]
        concurrency: usize,

        /// Model identifier for the completion service
        #[arg(long)]
        model: Option<String>,

        /// Sampling temperature (0 = fully deterministic)
        #[arg(long, default_value = "0.0")]
        temperature: f64,

        /// Score scale the extraction schema declares
        #[arg(long, value_enum, default_value = "unit")]
        scale: ScoreScale,

        /// Only process the first N chunks (for inexpensive trial runs)
        #[arg(long)]
        limit: Option<usize>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Render an analytics file as summary lines
    Show {
        /// Analytics file (NDJSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Ingest {
            input,
            output,
            format,
            chunk_size,
            verbose,
        } => {
            setup_logging(verbose);
            ingest(input, output, format, chunk_size)
        }
        Commands::Analyze {
            input,
            output,
            chunked,
            format,
            chunk_size,
            concurrency,
            model,
            temperature,
            scale,
            limit,
            verbose,
        } => {
            setup_logging(verbose);
            analyze(
                input,
                output,
                chunked,
                format,
                chunk_size,
                concurrency,
                model,
                temperature,
                scale,
                limit,
            )
            .await
        }
        Commands::Show { input, verbose } => {
            setup_logging(verbose);
            show(input)
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn ingest(
    input: PathBuf,
    output: PathBuf,
    format: TranscriptFormat,
    chunk_size: usize,
) -> Result<()> {
    info!("Loading transcript from {:?}", input);
    let segments = read_transcript_file(&input, format)?;
    info!("Parsed {} segments", segments.len());

    let chunks = roll_up(&segments, chunk_size)?;
    info!(
        "Rolled up into {} chunks of up to {} segments",
        chunks.len(),
        chunk_size
    );

    write_ndjson(&output, &chunks)?;
    info!("Chunks written to {:?}", output);

    Ok(())
}

async fn analyze(
    input: PathBuf,
    output: PathBuf,
    chunked: bool,
    format: TranscriptFormat,
    chunk_size: usize,
    concurrency: usize,
    model: Option<String>,
    temperature: f64,
    scale: ScoreScale,
    limit: Option<usize>,
) -> Result<()> {
    let started = chrono::Utc::now();

    info!("Loading input from {:?}", input);
    let mut chunks = if chunked {
        read_chunks_file(&input)?
    } else {
        let segments = read_transcript_file(&input, format)?;
        roll_up(&segments, chunk_size)?
    };

    if let Some(limit) = limit {
        chunks.truncate(limit);
        info!("Limited to the first {} chunks", chunks.len());
    }

    let mut completion_config = CompletionConfig::from_env()?;
    if let Some(model) = model {
        completion_config.model = model;
    }
    completion_config.temperature = temperature;

    info!(
        "Extracting metrics for {} chunks with model {} ({} concurrent)",
        chunks.len(),
        completion_config.model,
        concurrency
    );

    let client = Arc::new(CompletionClient::new(completion_config));
    let dispatch_config = DispatchConfig { concurrency, scale };
    let results = run_extraction(client, &chunks, &dispatch_config).await?;

    let failed = results.iter().filter(|metrics| metrics.is_failed()).count();
    if failed > 0 {
        warn!("{} chunks fell back to the sentinel result", failed);
    }

    let rows = assemble(chunks, results, scale)?;
    write_ndjson(&output, &rows)?;

    let elapsed = (chrono::Utc::now() - started).num_milliseconds() as f64 / 1000.0;
    info!(
        "{} rows written to {:?} in {:.1}s ({} failed)",
        rows.len(),
        output,
        elapsed,
        failed
    );

    Ok(())
}

fn show(input: PathBuf) -> Result<()> {
    let rows = read_rows_file(&input)?;

    for row in &rows {
        println!("{}", render_row(row));
    }

    Ok(())
}
