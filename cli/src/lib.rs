use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use docsearch_core::loader::{load_into, read_all_records};
use docsearch_core::{
    process_queries, remove_duplicates, DocId, Document, DocumentStatus, ExecutionPolicy, LogDuration, SearchConfig,
    SearchServer,
};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "docsearch")]
#[command(about = "Rank short documents against free-text queries", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub engine: EngineArgs,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone)]
pub struct EngineArgs {
    /// Input path (JSON/JSONL file or a directory of them)
    #[arg(long)]
    pub input: PathBuf,
    /// Space-separated stop words; overrides the config file
    #[arg(long, env = "DOCSEARCH_STOP_WORDS")]
    pub stop_words: Option<String>,
    /// Engine config file (JSON)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Top documents for a query
    Search {
        #[arg(long, allow_hyphen_values = true)]
        query: String,
        /// Only documents with this status
        #[arg(long, default_value = "actual")]
        status: DocumentStatus,
        #[arg(long, default_value_t = false)]
        parallel: bool,
    },
    /// Query words present in one document
    Match {
        #[arg(long, allow_hyphen_values = true)]
        query: String,
        #[arg(long, allow_hyphen_values = true)]
        id: DocId,
        #[arg(long, default_value_t = false)]
        parallel: bool,
    },
    /// Answer every query of a file (one per line) in parallel
    Batch {
        #[arg(long)]
        queries: PathBuf,
    },
    /// Remove documents with the same word set as an earlier one
    Dedup,
    /// Document count and live ids
    Stats,
}

#[derive(Debug, Serialize)]
pub struct SearchOutput {
    pub query: String,
    pub took_s: f64,
    pub total_hits: usize,
    pub results: Vec<Document>,
}

#[derive(Debug, Serialize)]
pub struct MatchOutput {
    pub id: DocId,
    pub status: DocumentStatus,
    pub words: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct BatchEntry {
    pub query: String,
    pub results: Vec<Document>,
}

#[derive(Debug, Serialize)]
pub struct DedupOutput {
    pub removed: Vec<DocId>,
    pub remaining: Vec<DocId>,
}

#[derive(Debug, Serialize)]
pub struct StatsOutput {
    pub document_count: usize,
    pub document_ids: Vec<DocId>,
    pub stop_words: Vec<String>,
    pub rejected: Vec<DocId>,
}

fn policy(parallel: bool) -> ExecutionPolicy {
    if parallel {
        ExecutionPolicy::Parallel
    } else {
        ExecutionPolicy::Sequential
    }
}

/// Defaults, then the config file, then command-line flags.
pub fn load_config(args: &EngineArgs) -> Result<SearchConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path).with_context(|| format!("reading config {}", path.display()))?;
            SearchConfig::from_json(&text).with_context(|| format!("parsing config {}", path.display()))?
        }
        None => SearchConfig::default(),
    };
    if let Some(stop_words) = &args.stop_words {
        config.stop_words = vec![stop_words.clone()];
    }
    Ok(config)
}

/// Build the engine and load every document; rejected documents are logged and skipped.
pub fn build_server(args: &EngineArgs) -> Result<(SearchServer, Vec<DocId>)> {
    let config = load_config(args)?;
    let mut server = SearchServer::from_config(&config).context("invalid stop words")?;
    let records = read_all_records(&args.input).with_context(|| format!("loading {}", args.input.display()))?;
    let report = load_into(&mut server, records);
    let rejected: Vec<DocId> = report.rejected.into_iter().map(|(id, _)| id).collect();
    tracing::info!(input = %args.input.display(), documents = server.document_count(), "engine ready");
    Ok((server, rejected))
}

pub fn run(cli: Cli) -> Result<serde_json::Value> {
    let (mut server, rejected) = build_server(&cli.engine)?;

    let output = match cli.command {
        Commands::Search { query, status, parallel } => {
            let _timer = LogDuration::new(format!("search [{query}]"));
            let start = Instant::now();
            let results = server.find_top_documents_by_status_with(policy(parallel), &query, status)?;
            serde_json::to_value(SearchOutput {
                query,
                took_s: start.elapsed().as_secs_f64(),
                total_hits: results.len(),
                results,
            })?
        }
        Commands::Match { query, id, parallel } => {
            let _timer = LogDuration::new(format!("match [{query}] against {id}"));
            let (words, status) = server.match_document_with(policy(parallel), &query, id)?;
            serde_json::to_value(MatchOutput { id, status, words })?
        }
        Commands::Batch { queries } => {
            let text = fs::read_to_string(&queries).with_context(|| format!("reading {}", queries.display()))?;
            let queries: Vec<&str> = text.lines().filter(|line| !line.trim().is_empty()).collect();
            let _timer = LogDuration::new(format!("batch of {} queries", queries.len()));
            let found = process_queries(&server, &queries)?;
            let entries: Vec<BatchEntry> = queries
                .iter()
                .zip(found)
                .map(|(query, results)| BatchEntry { query: query.to_string(), results })
                .collect();
            serde_json::to_value(entries)?
        }
        Commands::Dedup => {
            let removed = remove_duplicates(&mut server);
            let remaining = server.document_ids().collect();
            serde_json::to_value(DedupOutput { removed, remaining })?
        }
        Commands::Stats => serde_json::to_value(StatsOutput {
            document_count: server.document_count(),
            document_ids: server.document_ids().collect(),
            stop_words: server.stop_words().iter().cloned().collect(),
            rejected,
        })?,
    };
    Ok(output)
}
