//! Command implementations for the sift CLI.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;
use std::time::Instant;

use log::{debug, info};

use crate::cli::args::*;
use crate::cli::output::*;
use crate::document::JsonlDocumentReader;
use crate::error::{Result, SiftError};
use crate::index::{IndexConfig, SearchIndex};
use crate::search::{SearchConfig, Searcher};
use crate::storage::{FileStorage, Storage};

/// Execute a CLI command.
pub fn execute_command(args: SiftArgs) -> Result<()> {
    match &args.command {
        Command::Index(index_args) => build_index(index_args, &args),
        Command::Search(search_args) => search_index(search_args, &args),
        Command::Stats(stats_args) => show_stats(stats_args, &args),
    }
}

/// Build a snapshot from a JSONL document file.
fn build_index(args: &IndexArgs, cli_args: &SiftArgs) -> Result<()> {
    if args.batch_size == 0 {
        return Err(SiftError::invalid_argument("batch size must be at least 1"));
    }

    let config = index_config(args)?;
    let index = SearchIndex::new(config)?;

    let start_time = Instant::now();
    info!("Reading documents from {}", args.documents.display());
    let file = File::open(&args.documents)?;
    let documents = JsonlDocumentReader::new().read(BufReader::new(file))?;

    let mut indexed = 0;
    for batch in documents.chunks(args.batch_size) {
        indexed += index.add_documents(batch)?;
        debug!("Processed {indexed} documents...");
    }

    let (storage, name) = snapshot_location(&args.snapshot)?;
    let snapshot_bytes = index.save(&storage, &name)?;
    let duration = start_time.elapsed();

    output_result(
        &IndexingResult {
            snapshot: args.snapshot.display().to_string(),
            documents_indexed: indexed,
            snapshot_bytes,
            duration_ms: duration.as_millis() as u64,
            docs_per_second: if duration.as_secs_f64() > 0.0 {
                indexed as f64 / duration.as_secs_f64()
            } else {
                0.0
            },
        },
        cli_args,
    )
}

/// Run one query against a snapshot.
fn search_index(args: &SearchArgs, cli_args: &SiftArgs) -> Result<()> {
    let index = load_index(&args.snapshot)?;

    let mut config = SearchConfig::default();
    if let Some(phrase_boost) = args.phrase_boost {
        config.scoring.phrase_boost = phrase_boost;
    }
    if let Some(clause_bonus) = args.clause_bonus {
        config.scoring.clause_bonus = clause_bonus;
    }
    config.max_results = args.max_results;
    let searcher = Searcher::with_config(index, config)?;

    let start_time = Instant::now();
    let results = searcher.search(&args.query, args.page, args.page_size)?;
    let duration_ms = start_time.elapsed().as_millis() as u64;

    let mut hits = Vec::with_capacity(results.hits.len());
    for hit in &results.hits {
        let explain = if args.explain {
            searcher.explain(&args.query, hit.doc_id)?
        } else {
            Vec::new()
        };
        hits.push(OutputHit {
            doc_id: hit.doc_id,
            score: hit.score,
            explain,
        });
    }

    output_result(
        &SearchOutput {
            query: args.query.clone(),
            page: args.page,
            page_size: args.page_size,
            total_hits: results.total_hits,
            hits,
            duration_ms,
        },
        cli_args,
    )
}

/// Print snapshot statistics.
fn show_stats(args: &StatsArgs, cli_args: &SiftArgs) -> Result<()> {
    let (storage, name) = snapshot_location(&args.snapshot)?;
    let index = SearchIndex::load(&storage, &name)?;
    let config = index.config();

    output_result(
        &StatsOutput {
            snapshot: args.snapshot.display().to_string(),
            snapshot_bytes: storage.file_size(&name)?,
            stats: index.stats(),
            fields: config
                .fields
                .iter()
                .map(|(name, weight)| (name.clone(), *weight))
                .collect(),
            position_gap: config.position_gap,
        },
        cli_args,
    )
}

fn load_index(snapshot: &Path) -> Result<SearchIndex> {
    let (storage, name) = snapshot_location(snapshot)?;
    SearchIndex::load(&storage, &name)
}

/// Split a snapshot path into its directory storage and file name.
fn snapshot_location(path: &Path) -> Result<(FileStorage, String)> {
    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| {
            SiftError::invalid_argument(format!("invalid snapshot path: {}", path.display()))
        })?
        .to_string();
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    Ok((FileStorage::new(directory)?, name))
}

/// Assemble the index configuration from the config file and flags.
fn index_config(args: &IndexArgs) -> Result<IndexConfig> {
    let mut config = match &args.config {
        Some(path) => {
            info!("Loading index configuration from {}", path.display());
            serde_json::from_str(&fs::read_to_string(path)?)?
        }
        None => IndexConfig::default(),
    };

    for entry in &args.fields {
        let (name, weight) = parse_field_weight(entry)?;
        config = config.with_field(name, weight);
    }
    if let Some(gap) = args.position_gap {
        config = config.with_position_gap(gap);
    }
    if args.stop_words {
        config.analyzer = config.analyzer.with_stop_words(true);
    }
    if args.stemming {
        config.analyzer = config.analyzer.with_stemming(true);
    }

    config.validate()?;
    Ok(config)
}

/// Parse `name` or `name=weight`.
fn parse_field_weight(entry: &str) -> Result<(&str, f32)> {
    match entry.split_once('=') {
        None if !entry.is_empty() => Ok((entry, 1.0)),
        Some((name, weight)) if !name.is_empty() => {
            let weight = weight.trim().parse::<f32>().map_err(|e| {
                SiftError::invalid_argument(format!("invalid weight in --field {entry:?}: {e}"))
            })?;
            Ok((name, weight))
        }
        _ => Err(SiftError::invalid_argument(format!(
            "invalid --field value {entry:?}, expected NAME or NAME=WEIGHT"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::ffi::OsString;
    use tempfile::TempDir;

    #[test]
    fn test_parse_field_weight() {
        assert_eq!(parse_field_weight("title").unwrap(), ("title", 1.0));
        assert_eq!(parse_field_weight("title=2.5").unwrap(), ("title", 2.5));
        assert!(parse_field_weight("title=heavy").is_err());
        assert!(parse_field_weight("=2").is_err());
        assert!(parse_field_weight("").is_err());
    }

    #[test]
    fn test_snapshot_location() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("docs.idx");
        let (storage, name) = snapshot_location(&path).unwrap();
        assert_eq!(name, "docs.idx");
        assert_eq!(storage.directory(), temp_dir.path());
    }

    #[test]
    fn test_index_then_search() {
        let temp_dir = TempDir::new().unwrap();
        let documents = temp_dir.path().join("docs.jsonl");
        let snapshot = temp_dir.path().join("docs.idx");
        fs::write(
            &documents,
            concat!(
                "{\"id\": 1, \"fields\": {\"title\": \"quick brown dog\"}}\n",
                "{\"id\": 2, \"fields\": {\"title\": \"quick red fox\"}}\n",
            ),
        )
        .unwrap();

        let args = SiftArgs::try_parse_from([
            OsString::from("sift"),
            OsString::from("-q"),
            OsString::from("index"),
            documents.clone().into_os_string(),
            snapshot.clone().into_os_string(),
            OsString::from("--field"),
            OsString::from("title=2"),
        ])
        .unwrap();
        execute_command(args).unwrap();

        let index = load_index(&snapshot).unwrap();
        assert_eq!(index.total_documents(), 2);
        assert_eq!(index.config().field_weight("title"), Some(2.0));

        let results = Searcher::new(index).search("quick fox", 1, 10).unwrap();
        assert_eq!(results.doc_ids(), vec![2, 1]);

        let search = SiftArgs::try_parse_from([
            OsString::from("sift"),
            OsString::from("-q"),
            OsString::from("-f"),
            OsString::from("json"),
            OsString::from("search"),
            snapshot.into_os_string(),
            OsString::from("quick fox"),
            OsString::from("--explain"),
        ])
        .unwrap();
        execute_command(search).unwrap();
    }
}
