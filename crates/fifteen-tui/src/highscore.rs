//! High score persistence.
//!
//! Per-size tables of (moves, seconds) pairs, best first, persisted as JSON
//! under the platform data directory. Sizes are keyed as strings so the
//! file stays a plain JSON object.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

/// Scores kept per board size.
const MAX_PER_SIZE: usize = 10;

/// One recorded win.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub moves: usize,
    pub time_secs: u64,
    pub timestamp: u64,
}

/// Loads, records, and saves high scores.
pub struct HighScores {
    path: Option<PathBuf>,
    scores: BTreeMap<String, Vec<ScoreEntry>>,
}

impl HighScores {
    /// Scores backed by the platform data dir, e.g.
    /// `~/.local/share/fifteen/highscores.json`. Falls back to an in-memory
    /// table when no data dir exists.
    pub fn load_default() -> Self {
        match dirs::data_dir() {
            Some(dir) => Self::load_from(dir.join("fifteen").join("highscores.json")),
            None => Self::in_memory(),
        }
    }

    pub fn load_from(path: PathBuf) -> Self {
        let scores = fs::read_to_string(&path)
            .ok()
            .and_then(|text| serde_json::from_str(&text).ok())
            .unwrap_or_default();
        Self {
            path: Some(path),
            scores,
        }
    }

    /// A table that is never written to disk.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            scores: BTreeMap::new(),
        }
    }

    /// Record a win. Returns the 1-based rank of the new entry if it made
    /// the table, `None` if it fell off the bottom.
    pub fn record(&mut self, size: usize, moves: usize, time_secs: u64) -> Option<usize> {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        let entry = ScoreEntry {
            moves,
            time_secs,
            timestamp,
        };
        let table = self.scores.entry(size.to_string()).or_default();
        table.push(entry.clone());
        table.sort_by_key(|e| (e.moves, e.time_secs, e.timestamp));
        table.truncate(MAX_PER_SIZE);
        let rank = table.iter().position(|e| *e == entry).map(|i| i + 1);
        self.save();
        rank
    }

    /// Best-first scores for a size; empty when none are recorded.
    pub fn for_size(&self, size: usize) -> &[ScoreEntry] {
        self.scores
            .get(&size.to_string())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn save(&self) {
        let Some(path) = &self.path else {
            return;
        };
        // A failed save should never take the game down with it.
        let _ = path.parent().map(fs::create_dir_all);
        if let Ok(text) = serde_json::to_string_pretty(&self.scores) {
            let _ = fs::write(path, text + "\n");
        }
    }
}
