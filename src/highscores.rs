//! High score leaderboard system
//!
//! Persisted as a JSON array in a file, tracks the top 3 scores.

use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::persistence;

/// Default number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 3;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Participant name ("Player 1", "Player 2")
    pub name: String,
    /// Final score of the run
    pub score: u32,
    /// Day achieved, `YYYY-MM-DD`
    pub date: String,
}

/// High score leaderboard, sorted descending by score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
    #[serde(skip, default = "default_capacity")]
    capacity: usize,
}

fn default_capacity() -> usize {
    MAX_HIGH_SCORES
}

impl Default for HighScores {
    fn default() -> Self {
        Self::new()
    }
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self::with_capacity(MAX_HIGH_SCORES)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Re-establish ordering and size after loading untrusted data
    pub fn normalize(&mut self, capacity: usize) {
        self.capacity = capacity;
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(capacity);
    }

    /// Check if a score would make the leaderboard
    pub fn qualifies(&self, score: u32) -> bool {
        if self.capacity == 0 {
            return false;
        }
        if self.entries.len() < self.capacity {
            return true;
        }
        // Ties rank after existing entries, so only a strictly higher score gets in
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u32) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a new score to the leaderboard (if it qualifies)
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn add_score(&mut self, name: &str, score: u32, date: &str) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry {
            name: name.to_string(),
            score,
            date: date.to_string(),
        };

        // Find insertion point (sorted descending, after equal scores)
        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(self.capacity);

        Some(rank)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    pub fn scores(&self) -> Vec<u32> {
        self.entries.iter().map(|e| e.score).collect()
    }
}

/// Where completed runs are recorded
pub trait ScoreStore {
    /// Current leaderboard; never fails (absent or corrupt data reads as empty)
    fn load(&self) -> HighScores;

    /// Replace the stored leaderboard
    fn save(&mut self, scores: &HighScores) -> io::Result<()>;

    /// Load, append, sort, truncate and save in one step
    fn record(&mut self, name: &str, score: u32, date: &str) -> io::Result<Option<usize>> {
        let mut scores = self.load();
        let rank = scores.add_score(name, score, date);
        if rank.is_some() {
            self.save(&scores)?;
            log::info!("High score saved: {name} {score} (rank {rank:?})");
        }
        Ok(rank)
    }
}

/// JSON file on disk, replaced atomically on each save
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    capacity: usize,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>, capacity: usize) -> Self {
        Self {
            path: path.into(),
            capacity,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for JsonFileStore {
    fn load(&self) -> HighScores {
        let mut scores: HighScores = persistence::load_json_or_default(&self.path);
        scores.normalize(self.capacity);
        log::debug!("Loaded {} high scores", scores.entries.len());
        scores
    }

    fn save(&mut self, scores: &HighScores) -> io::Result<()> {
        persistence::save_json(&self.path, scores)
    }
}

/// In-memory store for tests and headless sessions
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub scores: HighScores,
}

impl MemoryStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            scores: HighScores::with_capacity(capacity),
        }
    }
}

impl ScoreStore for MemoryStore {
    fn load(&self) -> HighScores {
        self.scores.clone()
    }

    fn save(&mut self, scores: &HighScores) -> io::Result<()> {
        self.scores = scores.clone();
        Ok(())
    }
}

/// Format a Unix timestamp (ms) as a `YYYY-MM-DD` UTC date
pub fn format_date(timestamp_ms: f64) -> String {
    let days = (timestamp_ms / 86_400_000.0).floor() as i64;

    // Civil-from-days (proleptic Gregorian, era-based)
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + i64::from(month <= 2);

    format!("{year:04}-{month:02}-{day:02}")
}

/// Current Unix time in milliseconds
pub fn now_ms() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as f64)
        .unwrap_or(0.0)
}

/// Today's date, `YYYY-MM-DD`
pub fn today() -> String {
    format_date(now_ms())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::test_util::scratch_dir;

    #[test]
    fn test_three_runs_then_a_low_one() {
        let mut store = MemoryStore::new(MAX_HIGH_SCORES);
        for score in [40, 90, 10] {
            store.record("Player 1", score, "2024-01-01").unwrap();
        }
        assert_eq!(store.load().scores(), vec![90, 40, 10]);

        assert_eq!(store.record("Player 1", 5, "2024-01-02").unwrap(), None);
        assert_eq!(store.load().scores(), vec![90, 40, 10]);

        assert_eq!(store.record("Player 2", 50, "2024-01-02").unwrap(), Some(2));
        assert_eq!(store.load().scores(), vec![90, 50, 40]);
    }

    #[test]
    fn test_ties_rank_after_existing() {
        let mut scores = HighScores::new();
        scores.add_score("Player 1", 30, "d");
        assert_eq!(scores.add_score("Player 2", 30, "d"), Some(2));
        assert_eq!(scores.entries[0].name, "Player 1");
        assert_eq!(scores.entries[1].name, "Player 2");
    }

    #[test]
    fn test_zero_score_recorded_when_room() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score("Player 1", 0, "d"), Some(1));
        assert_eq!(scores.potential_rank(10), Some(1));
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = scratch_dir("scores");
        let path = dir.join("scores.json");
        let mut store = JsonFileStore::new(&path, MAX_HIGH_SCORES);

        assert!(store.load().is_empty());
        store.record("Player 1", 40, "2024-05-01").unwrap();
        store.record("Player 2", 90, "2024-05-01").unwrap();

        let reopened = JsonFileStore::new(&path, MAX_HIGH_SCORES);
        let scores = reopened.load();
        assert_eq!(scores.scores(), vec![90, 40]);
        assert_eq!(scores.entries[0].name, "Player 2");
        assert_eq!(scores.top_score(), Some(90));
    }

    #[test]
    fn test_file_format_is_plain_array() {
        let dir = scratch_dir("format");
        let path = dir.join("scores.json");
        let mut store = JsonFileStore::new(&path, MAX_HIGH_SCORES);
        store.record("Player 1", 40, "2024-05-01").unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let first = &json.as_array().unwrap()[0];
        assert_eq!(first["name"], "Player 1");
        assert_eq!(first["score"], 40);
        assert_eq!(first["date"], "2024-05-01");
    }

    #[test]
    fn test_corrupt_file_reads_empty_and_is_replaced() {
        let dir = scratch_dir("corrupt-scores");
        let path = dir.join("scores.json");
        std::fs::write(&path, "[{\"name\": 12").unwrap();

        let mut store = JsonFileStore::new(&path, MAX_HIGH_SCORES);
        assert!(store.load().is_empty());
        store.record("Player 1", 10, "2024-05-01").unwrap();
        assert_eq!(store.load().scores(), vec![10]);
    }

    #[test]
    fn test_unsorted_oversized_file_is_normalized() {
        let dir = scratch_dir("oversized");
        let path = dir.join("scores.json");
        std::fs::write(
            &path,
            r#"[{"name":"a","score":1,"date":"x"},{"name":"b","score":9,"date":"x"},
                {"name":"c","score":5,"date":"x"},{"name":"d","score":7,"date":"x"}]"#,
        )
        .unwrap();

        let store = JsonFileStore::new(&path, MAX_HIGH_SCORES);
        assert_eq!(store.load().scores(), vec![9, 7, 5]);
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(0.0), "1970-01-01");
        // 2000-02-29T12:00:00Z
        assert_eq!(format_date(951_825_600_000.0), "2000-02-29");
        // 2024-12-31T23:59:59Z
        assert_eq!(format_date(1_735_689_599_000.0), "2024-12-31");
    }
}
