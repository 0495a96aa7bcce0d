//! Reading documents from JSON and JSONL files.

use crate::document::{DocId, DocumentStatus};
use crate::error::Result;
use crate::search_server::SearchServer;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One document as it appears on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub id: DocId,
    pub text: String,
    #[serde(default)]
    pub status: DocumentStatus,
    #[serde(default)]
    pub ratings: Vec<i32>,
}

/// Outcome of loading records into an engine.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub added: usize,
    /// Records the engine refused, with the reason.
    pub rejected: Vec<(DocId, crate::SearchError)>,
}

fn is_document_file(path: &Path) -> bool {
    matches!(path.extension().and_then(|s| s.to_str()), Some("json" | "jsonl"))
}

/// A file yields itself; a directory yields every `.json` / `.jsonl` file below it, sorted.
pub fn collect_document_files(input: &Path) -> Vec<PathBuf> {
    if input.is_file() {
        return vec![input.to_path_buf()];
    }
    let mut files: Vec<PathBuf> = WalkDir::new(input)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|entry| entry.file_type().is_file() && is_document_file(entry.path()))
        .map(|entry| entry.into_path())
        .collect();
    files.sort();
    files
}

/// Parse one file: JSONL holds one record per non-blank line, JSON holds a
/// single record or an array of them.
pub fn read_records(file: &Path) -> Result<Vec<DocumentRecord>> {
    let reader = BufReader::new(File::open(file)?);
    if file.extension().and_then(|s| s.to_str()) == Some("jsonl") {
        let mut records = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            records.push(serde_json::from_str(&line)?);
        }
        return Ok(records);
    }
    let json: serde_json::Value = serde_json::from_reader(reader)?;
    let records = match json {
        serde_json::Value::Array(items) => items
            .into_iter()
            .map(serde_json::from_value)
            .collect::<std::result::Result<Vec<DocumentRecord>, _>>()?,
        other => vec![serde_json::from_value(other)?],
    };
    Ok(records)
}

pub fn read_all_records(input: &Path) -> Result<Vec<DocumentRecord>> {
    if !input.exists() {
        return Err(std::io::Error::new(std::io::ErrorKind::NotFound, format!("{} not found", input.display())).into());
    }
    let mut records = Vec::new();
    for file in collect_document_files(input) {
        let mut batch = read_records(&file)?;
        tracing::debug!(file = %file.display(), records = batch.len(), "read document file");
        records.append(&mut batch);
    }
    Ok(records)
}

/// Add every record, continuing past the ones the engine rejects.
pub fn load_into(search_server: &mut SearchServer, records: Vec<DocumentRecord>) -> LoadReport {
    let mut report = LoadReport::default();
    for record in records {
        match search_server.add_document(record.id, &record.text, record.status, &record.ratings) {
            Ok(()) => report.added += 1,
            Err(err) => {
                tracing::warn!(id = record.id, error = %err, "skipping document");
                report.rejected.push((record.id, err));
            }
        }
    }
    tracing::info!(added = report.added, rejected = report.rejected.len(), "loaded documents");
    report
}
