use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Number, Value};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::app::atomic_io::write_text_atomic;

pub(crate) const LEADERBOARD_CAPACITY: usize = 10;
pub(crate) const LEADERBOARD_FILE_NAME: &str = "high_scores.json";
const JSON_INDENT: &[u8] = b"    ";

#[derive(Debug, Error)]
pub(crate) enum LeaderboardError {
    #[error("high score name is missing")]
    InvalidInput,
    #[error("high score {score} is not a number; entry kept unranked and not saved")]
    TypeMismatch { score: Value },
    #[error("high score file {path} does not hold a list{at}: {message}")]
    NotASequence {
        path: PathBuf,
        at: String,
        message: String,
    },
}

/// A well-formed `{"name": ..., "score": ...}` entry. Fields the game does
/// not know about are carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct ScoreboardEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) score: Option<Number>,
    #[serde(flatten)]
    pub(crate) extra: Map<String, Value>,
}

impl ScoreboardEntry {
    pub(crate) fn new(name: impl Into<String>, score: impl Into<Number>) -> Self {
        Self {
            name: Some(name.into()),
            score: Some(score.into()),
            extra: Map::new(),
        }
    }
}

/// One element of the persisted list. Anything that is not a well-formed
/// entry is kept verbatim; it still ranks by its `score` when that is a
/// number, and as 0 otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub(crate) enum LeaderboardRecord {
    Entry(ScoreboardEntry),
    Unrecognized(Value),
}

impl<'de> Deserialize<'de> for LeaderboardRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        if !value.is_object() || has_explicit_null(&value) {
            return Ok(Self::Unrecognized(value));
        }
        Ok(match ScoreboardEntry::deserialize(value.clone()) {
            Ok(entry) => Self::Entry(entry),
            Err(_) => Self::Unrecognized(value),
        })
    }
}

/// `"name": null` and `"score": null` would decode to absent fields and be
/// dropped on the next save.
fn has_explicit_null(value: &Value) -> bool {
    ["name", "score"]
        .iter()
        .any(|field| matches!(value.get(field), Some(Value::Null)))
}

impl LeaderboardRecord {
    /// Ordering key; a missing or non-numeric score compares as 0.
    pub(crate) fn rank_score(&self) -> f64 {
        match self {
            Self::Entry(entry) => entry
                .score
                .as_ref()
                .and_then(Number::as_f64)
                .unwrap_or(0.0),
            Self::Unrecognized(value) => value
                .get("score")
                .and_then(Value::as_f64)
                .unwrap_or(0.0),
        }
    }

    pub(crate) fn display_name(&self) -> String {
        match self {
            Self::Entry(entry) => entry.name.clone().unwrap_or_else(|| "???".to_string()),
            Self::Unrecognized(value) => match value.get("name") {
                Some(Value::String(name)) => name.clone(),
                Some(Value::Null) | None => "???".to_string(),
                Some(other) => other.to_string(),
            },
        }
    }

    pub(crate) fn display_score(&self) -> String {
        match self {
            Self::Entry(entry) => entry
                .score
                .as_ref()
                .map_or_else(|| "0".to_string(), Number::to_string),
            Self::Unrecognized(value) => match value.get("score") {
                Some(Value::String(score)) => score.clone(),
                Some(Value::Null) | None => "0".to_string(),
                Some(other) => other.to_string(),
            },
        }
    }
}

/// Stable descending sort by score, then cap at `LEADERBOARD_CAPACITY`.
pub(crate) fn rank_records(records: &mut Vec<LeaderboardRecord>) {
    records.sort_by(|a, b| b.rank_score().total_cmp(&a.rank_score()));
    records.truncate(LEADERBOARD_CAPACITY);
}

/// True while the board has a free slot, or when `candidate` strictly beats
/// the lowest ranked score.
pub(crate) fn is_eligible(records: &[LeaderboardRecord], candidate: u64) -> bool {
    if records.len() < LEADERBOARD_CAPACITY {
        return true;
    }
    let lowest = records.last().map_or(0.0, LeaderboardRecord::rank_score);
    candidate as f64 > lowest
}

/// Reads the persisted board. Missing, unreadable or syntactically broken
/// files give an empty board; valid JSON that is not a list is an error.
pub(crate) fn load_records(path: &Path) -> Result<Vec<LeaderboardRecord>, LeaderboardError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(error) if error.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "leaderboard_file_missing");
            return Ok(Vec::new());
        }
        Err(error) => {
            warn!(path = %path.display(), error = %error, "leaderboard_read_failed");
            return Ok(Vec::new());
        }
    };

    let document: Value = match serde_json::from_str(&raw) {
        Ok(document) => document,
        Err(error) => {
            warn!(
                path = %path.display(),
                line = error.line(),
                column = error.column(),
                error = %error,
                "leaderboard_decode_failed"
            );
            return Ok(Vec::new());
        }
    };

    let mut records: Vec<LeaderboardRecord> = serde_path_to_error::deserialize(document)
        .map_err(|error| {
            let at = error.path().to_string();
            LeaderboardError::NotASequence {
                path: path.to_path_buf(),
                at: if at.is_empty() || at == "." {
                    String::new()
                } else {
                    format!(" at {at}")
                },
                message: error.into_inner().to_string(),
            }
        })?;

    rank_records(&mut records);
    Ok(records)
}

fn encode_records(records: &[LeaderboardRecord]) -> Result<String, serde_json::Error> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(JSON_INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    records.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Overwrites the board on disk. Failures are logged; the caller's
/// in-memory copy stays authoritative.
pub(crate) fn save_records(path: &Path, records: &[LeaderboardRecord]) -> bool {
    let json = match encode_records(records) {
        Ok(json) => json,
        Err(error) => {
            warn!(path = %path.display(), error = %error, "leaderboard_encode_failed");
            return false;
        }
    };
    match write_text_atomic(path, &json) {
        Ok(()) => {
            debug!(path = %path.display(), entries = records.len(), "leaderboard_saved");
            true
        }
        Err(error) => {
            warn!(path = %path.display(), error = %error, "leaderboard_save_failed");
            false
        }
    }
}

/// Bounded, ranked high-score list bound to its file.
#[derive(Debug, Clone)]
pub(crate) struct Leaderboard {
    path: PathBuf,
    records: Vec<LeaderboardRecord>,
}

impl Leaderboard {
    pub(crate) fn open(path: impl Into<PathBuf>) -> Result<Self, LeaderboardError> {
        let path = path.into();
        let records = load_records(&path)?;
        info!(path = %path.display(), entries = records.len(), "leaderboard_loaded");
        Ok(Self { path, records })
    }

    pub(crate) fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            records: Vec::new(),
        }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) fn records(&self) -> &[LeaderboardRecord] {
        &self.records
    }

    pub(crate) fn is_eligible(&self, candidate: u64) -> bool {
        is_eligible(&self.records, candidate)
    }

    pub(crate) fn save(&self) -> bool {
        save_records(&self.path, &self.records)
    }

    /// Adds `name` (trimmed) with `score`, re-ranks and persists. A
    /// non-numeric score is appended unranked and nothing is saved.
    pub(crate) fn insert(
        &mut self,
        name: Option<&str>,
        score: impl Into<Value>,
    ) -> Result<(), LeaderboardError> {
        let name = name.ok_or(LeaderboardError::InvalidInput)?.trim().to_string();
        let number = match score.into() {
            Value::Number(number) => number,
            other => {
                self.records.push(LeaderboardRecord::Unrecognized(serde_json::json!({
                    "name": name,
                    "score": other.clone(),
                })));
                return Err(LeaderboardError::TypeMismatch { score: other });
            }
        };

        self.records
            .push(LeaderboardRecord::Entry(ScoreboardEntry::new(name, number)));
        rank_records(&mut self.records);
        self.save();
        Ok(())
    }
}
