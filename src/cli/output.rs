//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, SiftArgs};
use crate::error::Result;
use crate::index::IndexStats;
use crate::document::DocId;
use crate::query::ClauseScore;

/// Result of building an index.
#[derive(Debug, Serialize, Deserialize)]
pub struct IndexingResult {
    pub snapshot: String,
    pub documents_indexed: usize,
    pub snapshot_bytes: u64,
    pub duration_ms: u64,
    pub docs_per_second: f64,
}

/// A ranked hit, with its score breakdown when requested.
#[derive(Debug, Serialize, Deserialize)]
pub struct OutputHit {
    pub doc_id: DocId,
    pub score: f32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub explain: Vec<ClauseScore>,
}

/// One page of search output.
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchOutput {
    pub query: String,
    pub page: usize,
    pub page_size: usize,
    pub total_hits: usize,
    pub hits: Vec<OutputHit>,
    pub duration_ms: u64,
}

/// Snapshot statistics.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatsOutput {
    pub snapshot: String,
    pub snapshot_bytes: u64,
    #[serde(flatten)]
    pub stats: IndexStats,
    pub fields: Vec<(String, f32)>,
    pub position_gap: u32,
}

/// Something the CLI can print for people.
pub trait HumanOutput {
    fn print_human(&self, args: &SiftArgs);
}

/// Output a result in the selected format.
pub fn output_result<T: Serialize + HumanOutput>(result: &T, args: &SiftArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            result.print_human(args);
            Ok(())
        }
        OutputFormat::Json => output_json(result, args),
    }
}

fn output_json<T: Serialize>(result: &T, args: &SiftArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    println!("{json}");
    Ok(())
}

impl HumanOutput for IndexingResult {
    fn print_human(&self, args: &SiftArgs) {
        if args.verbosity() == 0 {
            return;
        }
        println!("Indexed {} documents into {}", self.documents_indexed, self.snapshot);
        println!(
            "Snapshot size: {}, took {}ms ({:.1} docs/s)",
            format_bytes(self.snapshot_bytes),
            self.duration_ms,
            self.docs_per_second
        );
    }
}

impl HumanOutput for SearchOutput {
    fn print_human(&self, args: &SiftArgs) {
        if self.hits.is_empty() {
            if args.verbosity() > 0 {
                println!("No results for {:?} (page {})", self.query, self.page);
            }
            return;
        }

        let first_rank = (self.page - 1) * self.page_size;
        for (i, hit) in self.hits.iter().enumerate() {
            println!("{:>4}. doc {:<10} score {:.3}", first_rank + i + 1, hit.doc_id, hit.score);
            for part in &hit.explain {
                println!("        {:<24} +{:.3}", part.clause, part.score);
            }
        }

        if args.verbosity() > 0 {
            println!();
            println!(
                "Total hits: {} (page {}, {}ms)",
                self.total_hits, self.page, self.duration_ms
            );
        }
    }
}

impl HumanOutput for StatsOutput {
    fn print_human(&self, _args: &SiftArgs) {
        println!("Index Statistics:");
        println!("════════════════");
        println!("Snapshot: {} ({})", self.snapshot, format_bytes(self.snapshot_bytes));
        println!("Total documents: {}", self.stats.doc_count);
        println!("Distinct terms: {}", self.stats.term_count);
        println!("Postings: {}", self.stats.posting_count);
        println!("Indexed tokens: {}", self.stats.token_count);
        println!("Position gap: {}", self.position_gap);

        if self.fields.is_empty() {
            println!("Fields: all (weight 1.0)");
        } else {
            println!("Fields:");
            for (name, weight) in &self.fields {
                println!("  {name}: {weight}");
            }
        }
    }
}

/// Format bytes in human-readable format.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3.0 MB");
    }

    #[test]
    fn test_explain_only_serialized_when_present() {
        let plain = OutputHit {
            doc_id: 1,
            score: 2.5,
            explain: Vec::new(),
        };
        let value = serde_json::to_value(&plain).unwrap();
        assert!(value.get("explain").is_none());

        let explained = OutputHit {
            explain: vec![ClauseScore {
                clause: "fox".to_string(),
                score: 2.5,
            }],
            ..plain
        };
        let value = serde_json::to_value(&explained).unwrap();
        assert_eq!(value["explain"][0]["clause"], "fox");
        assert_eq!(value["explain"][0]["score"], 2.5);
    }

    #[test]
    fn test_stats_json_is_flat() {
        let output = StatsOutput {
            snapshot: "x.idx".to_string(),
            snapshot_bytes: 10,
            stats: IndexStats::default(),
            fields: vec![("title".to_string(), 2.0)],
            position_gap: 100,
        };
        let value = serde_json::to_value(&output).unwrap();
        assert_eq!(value["doc_count"], 0);
        assert_eq!(value["position_gap"], 100);
    }
}
