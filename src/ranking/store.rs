//! Ranking store - best-time persistence per difficulty
//!
//! Records are kept per difficulty under `rankings-<card_count>`, ascending
//! by time and capped at ten entries. Mutations are serialized by a single
//! advisory lock marker under `ranking_lock`, shared across all
//! difficulties; the lock is cooperative (a writer bypassing this API is
//! not stopped) and expires after a timeout to survive a crashed holder.
//!
//! The whole record list is replaced in one `set`, never appended to, so a
//! reader can never observe a partially merged list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ranking::kv::KeyValueStore;
use crate::types::{
    Difficulty, DUPLICATE_WINDOW_MS, LOCK_TIMEOUT_MS, MAX_NICKNAME_LEN, MAX_RANKING_ENTRIES,
};

/// Key of the global advisory lock marker
pub const LOCK_KEY: &str = "ranking_lock";

/// Storage key for one difficulty's record list
pub fn rankings_key(difficulty: Difficulty) -> String {
    format!("rankings-{}", difficulty.card_count())
}

/// One persisted best-time entry. Never mutated once stored; evicted when
/// it falls outside the top-10 cap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingRecord {
    pub nickname: String,
    /// Completion time in whole seconds
    pub time: u64,
    /// Submission instant (ISO-8601 in the stored JSON)
    pub recorded_at: DateTime<Utc>,
}

/// Persisted lock marker value
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct LockMarker {
    /// Acquisition time, epoch milliseconds
    timestamp: i64,
}

/// Ranking operation failures. None of these leave partial state behind,
/// and the lock is always released after a failed mutation attempt.
#[derive(Debug, Error)]
pub enum RankingError {
    /// Malformed submission input; nothing was mutated
    #[error("invalid submission: {reason}")]
    Validation { reason: String },

    /// An identical or near-in-time record by the same nickname exists
    #[error("this result has already been recorded")]
    Duplicate,

    /// Another mutation holds the advisory lock; retry after it expires
    #[error("another submission is in progress, try again shortly")]
    LockContention,

    /// Backend read/write failure
    #[error("storage failure: {0}")]
    Storage(#[from] std::io::Error),

    /// Record list or lock marker could not be encoded
    #[error("serialization failure: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Best-time store over an injected key-value backend
#[derive(Debug)]
pub struct RankingStore<S: KeyValueStore> {
    store: S,
    lock_timeout_ms: i64,
    duplicate_window_ms: i64,
}

impl<S: KeyValueStore> RankingStore<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            lock_timeout_ms: LOCK_TIMEOUT_MS,
            duplicate_window_ms: DUPLICATE_WINDOW_MS,
        }
    }

    /// Override the lock expiry (milliseconds)
    pub fn with_lock_timeout_ms(mut self, timeout_ms: i64) -> Self {
        self.lock_timeout_ms = timeout_ms;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// Submit a completion time, stamped with the current clock
    pub fn submit(
        &mut self,
        difficulty: Difficulty,
        nickname: &str,
        time: u64,
    ) -> Result<(), RankingError> {
        self.submit_at(difficulty, nickname, time, Utc::now())
    }

    /// Submit a completion time as of an explicit instant.
    ///
    /// `time` is whole seconds; negative and non-finite inputs are
    /// unrepresentable by type. The nickname is trimmed and must be
    /// non-empty and at most [`MAX_NICKNAME_LEN`] characters.
    pub fn submit_at(
        &mut self,
        difficulty: Difficulty,
        nickname: &str,
        time: u64,
        now: DateTime<Utc>,
    ) -> Result<(), RankingError> {
        let nickname = nickname.trim();
        if nickname.is_empty() {
            return Err(RankingError::Validation {
                reason: "nickname must not be empty".to_string(),
            });
        }
        if nickname.chars().count() > MAX_NICKNAME_LEN {
            return Err(RankingError::Validation {
                reason: format!("nickname longer than {} characters", MAX_NICKNAME_LEN),
            });
        }

        self.acquire_lock(now)?;
        let result = self.write_record(difficulty, nickname, time, now);
        // Released on success and on failure alike.
        let released = self.store.remove(LOCK_KEY);
        result?;
        released?;
        Ok(())
    }

    /// Submit against a raw card count, surfacing unsupported sizes as a
    /// validation error rather than falling back to a default layout.
    pub fn submit_for_card_count(
        &mut self,
        card_count: usize,
        nickname: &str,
        time: u64,
    ) -> Result<(), RankingError> {
        let difficulty = Difficulty::from_card_count(card_count).ok_or_else(|| {
            RankingError::Validation {
                reason: format!("unsupported card count: {}", card_count),
            }
        })?;
        self.submit(difficulty, nickname, time)
    }

    /// Current standings for a difficulty: ascending by time, at most ten.
    ///
    /// Absent or corrupt stored data reads as an empty list.
    pub fn query(&self, difficulty: Difficulty) -> Vec<RankingRecord> {
        self.load(&rankings_key(difficulty))
    }

    fn acquire_lock(&mut self, now: DateTime<Utc>) -> Result<(), RankingError> {
        if let Some(raw) = self.store.get(LOCK_KEY) {
            if let Ok(marker) = serde_json::from_str::<LockMarker>(&raw) {
                if now.timestamp_millis() - marker.timestamp < self.lock_timeout_ms {
                    return Err(RankingError::LockContention);
                }
            }
            // Expired or unreadable markers are overwritten.
        }

        let marker = LockMarker {
            timestamp: now.timestamp_millis(),
        };
        self.store.set(LOCK_KEY, &serde_json::to_string(&marker)?)?;
        Ok(())
    }

    fn write_record(
        &mut self,
        difficulty: Difficulty,
        nickname: &str,
        time: u64,
        now: DateTime<Utc>,
    ) -> Result<(), RankingError> {
        let key = rankings_key(difficulty);
        let mut records = self.load(&key);

        if Self::is_duplicate(&records, nickname, time, now, self.duplicate_window_ms) {
            return Err(RankingError::Duplicate);
        }

        records.push(RankingRecord {
            nickname: nickname.to_string(),
            time,
            recorded_at: now,
        });

        // De-duplicate by full-record identity, then keep the ten lowest
        // times (the sort key starts with `time`, so order is already
        // ascending by time afterwards).
        records.sort_by(|a, b| {
            (a.time, &a.nickname, a.recorded_at).cmp(&(b.time, &b.nickname, b.recorded_at))
        });
        records.dedup();
        records.truncate(MAX_RANKING_ENTRIES);

        self.store.set(&key, &serde_json::to_string(&records)?)?;
        Ok(())
    }

    fn is_duplicate(
        records: &[RankingRecord],
        nickname: &str,
        time: u64,
        now: DateTime<Utc>,
        window_ms: i64,
    ) -> bool {
        records.iter().any(|record| {
            if record.time == time && record.nickname == nickname {
                return true;
            }
            // Same nickname re-submitting within the window is treated as a
            // double-submit race.
            let gap = (record.recorded_at.timestamp_millis() - now.timestamp_millis()).abs();
            record.nickname == nickname && gap < window_ms
        })
    }

    fn load(&self, key: &str) -> Vec<RankingRecord> {
        self.store
            .get(key)
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }
}
