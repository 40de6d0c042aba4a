use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::display::{format_clock, parse_clock};
use crate::{LeaderboardError, ScoreStorage};

type Result<T> = core::result::Result<T, LeaderboardError>;

/// One completed game: time to clear the board and who did it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub seconds: u32,
    pub name: String,
}

impl Entry {
    pub fn new(seconds: u32, name: impl Into<String>) -> Self {
        Self {
            seconds,
            name: name.into(),
        }
    }
}

/// `MM:SS,Name`, the persisted line format.
impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", format_clock(self.seconds.into()), self.name)
    }
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
#[error("expected a `MM:SS,Name` line")]
pub struct ParseEntryError;

impl FromStr for Entry {
    type Err = ParseEntryError;

    fn from_str(line: &str) -> core::result::Result<Self, Self::Err> {
        let (time, name) = line.split_once(',').ok_or(ParseEntryError)?;
        let seconds = parse_clock(time.trim())
            .and_then(|secs| u32::try_from(secs).ok())
            .ok_or(ParseEntryError)?;
        Ok(Self::new(seconds, name))
    }
}

/// Entry prepared for display with its 1-based rank.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub rank: usize,
    pub entry: Entry,
    /// Set on the entry submitted during the current session.
    pub is_current: bool,
}

impl fmt::Display for RankedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.\t{}\t{}{}",
            self.rank,
            format_clock(self.entry.seconds.into()),
            self.entry.name,
            if self.is_current { "*" } else { "" }
        )
    }
}

/// Best completion times, ascending, bounded to [`Leaderboard::CAPACITY`].
///
/// The storage is the only source of truth: every operation loads it fresh,
/// and submissions rewrite it in full.
#[derive(Clone, Debug)]
pub struct Leaderboard<S> {
    storage: S,
}

impl<S: ScoreStorage> Leaderboard<S> {
    pub const CAPACITY: usize = 5;

    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Reads every well-formed line, skipping corrupt ones.
    pub fn load(&self) -> Result<Vec<Entry>> {
        let Some(contents) = self.storage.read()? else {
            return Ok(Vec::new());
        };

        let mut entries = Vec::new();
        for (number, line) in contents.lines().enumerate() {
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() {
                continue;
            }
            match line.parse::<Entry>() {
                Ok(entry) => entries.push(entry),
                Err(err) => {
                    log::warn!("Skipping leaderboard line {}: {:?} ({})", number + 1, line, err)
                }
            }
        }
        Ok(entries)
    }

    /// Records a time and returns its 0-based rank, or `None` when it did not
    /// make the cut.
    ///
    /// Ties keep existing entries ahead of the new one.
    pub fn submit(&mut self, seconds: u32, name: &str) -> Result<Option<usize>> {
        if name.contains([',', '\n', '\r']) {
            return Err(LeaderboardError::InvalidName(name.to_string()));
        }

        let mut entries: Vec<(bool, Entry)> = self
            .load()?
            .into_iter()
            .map(|entry| (false, entry))
            .collect();
        entries.push((true, Entry::new(seconds, name)));
        entries.sort_by_key(|(_, entry)| entry.seconds);
        entries.truncate(Self::CAPACITY);

        let rank = entries.iter().position(|&(is_new, _)| is_new);
        let contents: String = entries
            .iter()
            .map(|(_, entry)| format!("{}\n", entry))
            .collect();
        self.storage.write(&contents)?;

        log::debug!(
            "Submitted {} for {:?}, rank {:?}",
            format_clock(seconds.into()),
            name,
            rank
        );
        Ok(rank)
    }

    /// Persisted entries with display ranks, `highlight` marks a 0-based rank.
    pub fn list(&self, highlight: Option<usize>) -> Result<Vec<RankedEntry>> {
        Ok(self
            .load()?
            .into_iter()
            .enumerate()
            .map(|(index, entry)| RankedEntry {
                rank: index + 1,
                entry,
                is_current: highlight == Some(index),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStorage;

    fn board(contents: &str) -> Leaderboard<MemoryStorage> {
        Leaderboard::new(MemoryStorage::with_contents(contents))
    }

    #[test]
    fn empty_store_round_trip() {
        let mut leaderboard = Leaderboard::new(MemoryStorage::new());
        assert!(leaderboard.load().unwrap().is_empty());

        assert_eq!(leaderboard.submit(75, "AB").unwrap(), Some(0));

        assert_eq!(leaderboard.storage().contents(), Some("01:15,AB\n"));
        assert_eq!(leaderboard.load().unwrap(), vec![Entry::new(75, "AB")]);
    }

    #[test]
    fn persists_minutes_and_seconds() {
        let mut leaderboard = Leaderboard::new(MemoryStorage::new());
        leaderboard.submit(65, "Ann").unwrap();
        assert_eq!(leaderboard.storage().contents(), Some("01:05,Ann\n"));
    }

    #[test]
    fn sixth_entry_drops_the_worst() {
        let mut leaderboard = Leaderboard::new(MemoryStorage::new());
        for (secs, name) in [(50, "E"), (10, "A"), (40, "D"), (20, "B"), (30, "C")] {
            assert!(leaderboard.submit(secs, name).unwrap().is_some());
        }

        assert_eq!(leaderboard.submit(60, "F").unwrap(), None);
        assert_eq!(leaderboard.submit(15, "G").unwrap(), Some(1));

        let names: Vec<_> = leaderboard
            .load()
            .unwrap()
            .into_iter()
            .map(|entry| entry.name)
            .collect();
        assert_eq!(names, ["A", "G", "B", "C", "D"]);
    }

    #[test]
    fn ties_rank_existing_entries_first() {
        let mut leaderboard = board("00:30,Old\n");
        assert_eq!(leaderboard.submit(30, "New").unwrap(), Some(1));

        let mut full = board("00:10,A\n00:20,B\n00:30,C\n00:40,D\n00:50,E\n");
        assert_eq!(full.submit(50, "F").unwrap(), None);
    }

    #[test]
    fn duplicate_name_and_time_ranks_the_new_entry() {
        let mut leaderboard = board("00:30,Sam\n");
        assert_eq!(leaderboard.submit(30, "Sam").unwrap(), Some(1));
    }

    #[test]
    fn sorted_submission_keeps_order() {
        let mut leaderboard = board("00:10,A\n00:20,B\n");
        leaderboard.submit(25, "C").unwrap();
        assert_eq!(
            leaderboard.storage().contents(),
            Some("00:10,A\n00:20,B\n00:25,C\n")
        );
    }

    #[test]
    fn malformed_lines_are_skipped() {
        let leaderboard = board("00:10,A\ngarbage\n99:99,Bad\n\nxx:10,Bad\n00:20,B\r\n");
        assert_eq!(
            leaderboard.load().unwrap(),
            vec![Entry::new(10, "A"), Entry::new(20, "B")]
        );
    }

    #[test]
    fn rewrite_drops_malformed_lines() {
        let mut leaderboard = board("oops\n00:20,B\n");
        leaderboard.submit(10, "A").unwrap();
        assert_eq!(leaderboard.storage().contents(), Some("00:10,A\n00:20,B\n"));
    }

    #[test]
    fn name_keeps_everything_after_first_comma_on_load() {
        let entry: Entry = "01:00,Mary Jane".parse().unwrap();
        assert_eq!(entry, Entry::new(60, "Mary Jane"));
        assert_eq!(entry.to_string(), "01:00,Mary Jane");
    }

    #[test]
    fn rejects_names_that_break_the_format() {
        let mut leaderboard = Leaderboard::new(MemoryStorage::new());
        assert!(matches!(
            leaderboard.submit(10, "a,b"),
            Err(LeaderboardError::InvalidName(_))
        ));
        assert_eq!(leaderboard.storage().contents(), None);
    }

    #[test]
    fn list_marks_highlighted_rank() {
        let leaderboard = board("00:10,A\n00:20,B\n");
        let listed = leaderboard.list(Some(1)).unwrap();

        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].rank, 1);
        assert!(!listed[0].is_current);
        assert!(listed[1].is_current);
        assert_eq!(listed[1].to_string(), "2.\t00:20\tB*");
    }
}
