//! Best completion times, kept as a JSON list of whole seconds.

use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Number of times kept on the board.
pub(crate) const MAX_SCORES: usize = 5;

pub(crate) const DEFAULT_SCORES_FILE: &str = "highscores.json";

/// Fastest times first, never more than [`MAX_SCORES`] of them.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub(crate) struct BestTimes {
    times: Vec<u64>,
}

impl BestTimes {
    /// Adds a time and returns its 1-based rank, or None if it did not make the board.
    pub(crate) fn insert(&mut self, time: Duration) -> Option<usize> {
        let secs = time.as_secs();
        let position = self.times.partition_point(|&best| best <= secs);
        if position >= MAX_SCORES {
            return None;
        }

        self.times.insert(position, secs);
        self.times.truncate(MAX_SCORES);
        Some(position + 1)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// One `N. HH:MM:SS` line per entry.
    pub(crate) fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.times
            .iter()
            .enumerate()
            .map(|(i, &secs)| format!("{}. {}", i + 1, format_secs(secs)))
    }

    /// Reads the board, a missing or unreadable file counts as an empty one.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(err) => {
                return Err(err).with_context(|| format!("opening {}", path.display()));
            }
        };

        let mut best: Self = match serde_json::from_reader(BufReader::new(file)) {
            Ok(best) => best,
            Err(err) => {
                log::warn!("ignoring corrupt best times in {}: {}", path.display(), err);
                return Ok(Self::default());
            }
        };
        best.times.sort_unstable();
        best.times.truncate(MAX_SCORES);
        Ok(best)
    }

    pub(crate) fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, self)?;
        writer.flush()?;
        log::debug!("saved {} best times to {}", self.times.len(), path.display());
        Ok(())
    }
}

pub(crate) fn format_secs(secs: u64) -> String {
    let (minutes, secs) = (secs / 60, secs % 60);
    let (hours, minutes) = (minutes / 60, minutes % 60);
    format!("{hours:02}:{minutes:02}:{secs:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(values: &[u64]) -> BestTimes {
        BestTimes {
            times: values.to_vec(),
        }
    }

    #[test]
    fn insert_keeps_five_fastest() {
        let mut best = BestTimes::default();
        for (time, rank) in [(50, 1), (30, 1), (40, 2), (60, 4), (10, 1)] {
            assert_eq!(best.insert(Duration::from_secs(time)), Some(rank));
        }
        assert_eq!(best, secs(&[10, 30, 40, 50, 60]));

        assert_eq!(best.insert(Duration::from_secs(70)), None);
        assert_eq!(best.insert(Duration::from_millis(35_900)), Some(3));
        assert_eq!(best, secs(&[10, 30, 35, 40, 50]));
    }

    #[test]
    fn ties_rank_after_existing_entries() {
        let mut best = secs(&[10, 20]);
        assert_eq!(best.insert(Duration::from_secs(20)), Some(3));
    }

    #[test]
    fn formats_hours_minutes_seconds() {
        assert_eq!(format_secs(92), "00:01:32");
        assert_eq!(format_secs(3_725), "01:02:05");

        let lines: Vec<_> = secs(&[92, 3_725]).lines().collect();
        assert_eq!(lines, ["1. 00:01:32", "2. 01:02:05"]);
    }

    #[test]
    fn serializes_as_a_flat_list() {
        assert_eq!(serde_json::to_string(&secs(&[3, 7])).unwrap(), "[3,7]");
        let parsed: BestTimes = serde_json::from_str("[4, 9]").unwrap();
        assert_eq!(parsed, secs(&[4, 9]));
    }

    #[test]
    fn load_and_save_round_trip_through_a_file() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("turnsweep-scores-{}.json", std::process::id()));
        let missing = dir.join(format!("turnsweep-missing-{}.json", std::process::id()));

        assert_eq!(BestTimes::load(&missing).unwrap(), BestTimes::default());

        secs(&[5, 12]).save(&path).unwrap();
        let loaded = BestTimes::load(&path).unwrap();

        std::fs::write(&path, "not json").unwrap();
        let corrupt = BestTimes::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded, secs(&[5, 12]));
        assert!(corrupt.is_empty());
    }
}
