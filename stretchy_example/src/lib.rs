//! A leaderboard built on [`stretchy::Seq`], kept in descending score order by ordered
//! insertion, with player lookup through a comparator on names.

use core::cmp::Ordering;
use stretchy::prelude::*;

/// One player's latest score.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    pub player: String,
    pub score: u32,
}

impl Entry {
    pub fn new(player: &str, score: u32) -> Self {
        Entry {
            player: player.to_owned(),
            score,
        }
    }
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum LeaderboardError {
    #[error("leaderboard limit must be at least 1")]
    ZeroLimit,
    #[error(transparent)]
    Storage(#[from] stretchy::Error),
}

fn by_score(a: &Entry, b: &Entry) -> Ordering {
    a.score.cmp(&b.score)
}

fn by_player(a: &Entry, b: &Entry) -> Ordering {
    a.player.cmp(&b.player)
}

/// Highest score first. Players with equal scores keep the order in which they reached it.
#[derive(Debug)]
pub struct Leaderboard<A: RawAlloc = Global> {
    entries: Seq<Entry, A>,
    limit: Option<usize>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Leaderboard::new_in(Global)
    }
}

impl Default for Leaderboard {
    fn default() -> Self {
        Leaderboard::new()
    }
}

impl<A: RawAlloc> Leaderboard<A> {
    pub fn new_in(alloc: A) -> Self {
        Leaderboard {
            entries: Seq::new_in(alloc),
            limit: None,
        }
    }

    /// Keeps only the best `limit` players; anyone pushed past the limit is dropped.
    pub fn with_limit(mut self, limit: usize) -> Result<Self, LeaderboardError> {
        if limit == 0 {
            return Err(LeaderboardError::ZeroLimit);
        }
        self.limit = Some(limit);
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Records a score, replacing the player's previous one even if it was higher, and
    /// returns the player's rank (0 is first).
    ///
    /// Returns `None` if a new player's score did not make it within the limit. A player
    /// already on the board keeps a place, since their old entry makes room, but a worse
    /// score moves them down.
    ///
    /// On error the board is unchanged.
    pub fn record(&mut self, player: &str, score: u32) -> Result<Option<usize>, LeaderboardError> {
        // With one spare slot reserved up front, the remove-then-insert below cannot need
        // to grow, so a failure can only happen before anything has changed.
        self.entries.reserve(1)?;
        let entry = Entry::new(player, score);
        if let Some(previous) = self.entries.remove_value(&entry, by_player) {
            log::debug!(
                "{player}: replacing score {} with {score}",
                previous.score
            );
        }
        let rank = self.entries.insert_descending(entry, by_score)?;
        if let Some(limit) = self.limit {
            while self.entries.len() > limit {
                let last = self.entries.len() - 1;
                let dropped = self.entries.remove(last)?;
                log::debug!("{} fell off the board", dropped.player);
            }
            if rank >= limit {
                return Ok(None);
            }
        }
        Ok(Some(rank))
    }

    /// Rank of `player`, if present.
    pub fn rank_of(&self, player: &str) -> Option<usize> {
        self.entries.index_of(&Entry::new(player, 0), by_player)
    }

    pub fn remove(&mut self, player: &str) -> Option<Entry> {
        self.entries.remove_value(&Entry::new(player, 0), by_player)
    }

    pub fn top(&self, n: usize) -> &[Entry] {
        &self.entries[..n.min(self.entries.len())]
    }

    /// `(rank, entry)` pairs, best first.
    pub fn standings(&self) -> impl Iterator<Item = (usize, &Entry)> + '_ {
        self.entries.entries()
    }

    /// A copy of the board on the global heap, ordered by player name.
    pub fn alphabetical(&self) -> Result<Seq<Entry>, LeaderboardError> {
        let mut out = Seq::with_capacity(self.entries.len())?;
        out.extend_from_slice(&self.entries)?;
        out.sort_with(by_player);
        Ok(out)
    }

    /// Empties the board, keeping its storage for the next season.
    pub fn reset(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names<A: RawAlloc>(board: &Leaderboard<A>) -> Vec<&str> {
        board.standings().map(|(_, e)| e.player.as_str()).collect()
    }

    #[test]
    fn ranks_by_descending_score() {
        let mut board = Leaderboard::new();
        assert_eq!(Ok(Some(0)), board.record("ada", 30));
        assert_eq!(Ok(Some(0)), board.record("grace", 50));
        assert_eq!(Ok(Some(2)), board.record("alan", 10));
        assert_eq!(Ok(Some(2)), board.record("edsger", 30));
        assert_eq!(names(&board), ["grace", "ada", "edsger", "alan"]);
        assert_eq!(Some(1), board.rank_of("ada"));
        assert_eq!(None, board.rank_of("barbara"));
    }

    #[test]
    fn rerecording_moves_the_player() {
        let mut board = Leaderboard::new();
        for (p, s) in [("a", 5), ("b", 4), ("c", 3)] {
            board.record(p, s).unwrap();
        }
        assert_eq!(Ok(Some(0)), board.record("c", 9));
        assert_eq!(3, board.len());
        assert_eq!(names(&board), ["c", "a", "b"]);
        assert_eq!(Some(Entry::new("a", 5)), board.remove("a"));
        assert_eq!(None, board.remove("a"));
        assert_eq!(board.top(5), [Entry::new("c", 9), Entry::new("b", 4)]);
    }

    #[test]
    fn limit_drops_the_tail() {
        let mut board = Leaderboard::new().with_limit(2).unwrap();
        board.record("x", 1).unwrap();
        board.record("y", 2).unwrap();
        assert_eq!(Ok(None), board.record("z", 0));
        assert_eq!(Ok(Some(0)), board.record("w", 3));
        assert_eq!(names(&board), ["w", "y"]);
        assert_eq!(
            Err(LeaderboardError::ZeroLimit),
            Leaderboard::new().with_limit(0).map(|_| ())
        );
    }

    #[test]
    fn worse_score_replaces_a_better_one() {
        let mut board = Leaderboard::new().with_limit(2).unwrap();
        board.record("p", 8).unwrap();
        board.record("q", 6).unwrap();
        assert_eq!(Ok(None), board.record("r", 5));
        assert_eq!(Ok(Some(1)), board.record("p", 1));
        assert_eq!(board.top(2), [Entry::new("q", 6), Entry::new("p", 1)]);
        assert_eq!(Ok(None), board.record("r", 0));
        assert_eq!(Some(1), board.rank_of("p"));
    }

    #[test]
    fn alphabetical_copy_leaves_board_alone() {
        let mut board = Leaderboard::new();
        for (p, s) in [("mia", 7), ("bo", 2), ("kai", 4)] {
            board.record(p, s).unwrap();
        }
        let alpha = board.alphabetical().unwrap();
        let alpha: Vec<_> = alpha.iter().map(|e| e.player.as_str()).collect();
        assert_eq!(alpha, ["bo", "kai", "mia"]);
        assert_eq!(names(&board), ["mia", "kai", "bo"]);
        board.reset();
        assert!(board.is_empty());
    }

    #[test]
    fn arena_board_reports_exhaustion() {
        let arena = bumpalo::Bump::new();
        let mut board = Leaderboard::new_in(&arena);
        for i in 0..3 {
            board.record(&format!("p{i}"), i).unwrap();
        }
        arena.set_allocation_limit(Some(arena.allocated_bytes()));
        let mut failed = None;
        for i in 3..10_000 {
            if let Err(e) = board.record(&format!("p{i}"), i) {
                failed = Some((i, e));
                break;
            }
        }
        let (at, err) = failed.expect("arena limit never hit");
        assert!(matches!(
            err,
            LeaderboardError::Storage(stretchy::Error::AllocationFailure { .. })
        ));
        assert_eq!(at as usize, board.len());
        assert_eq!(None, board.rank_of(&format!("p{at}")));
    }

    // push, insert, search, remove, sort, list, clear, release
    #[test]
    fn demonstration_trace() {
        fn compare_int(x: &i32, y: &i32) -> Ordering {
            x.cmp(y)
        }

        let mut nums: Seq<i32> = Seq::new();
        nums.push(12).unwrap();
        nums.push(34).unwrap();
        nums.push(56).unwrap();
        nums.push(78).unwrap();
        assert_eq!(4, nums.len());

        nums.insert(0, 4).unwrap();
        nums.insert(nums.len(), 8).unwrap();
        nums.insert(3, 16).unwrap();
        assert_eq!(7, nums.len());
        assert_eq!(Some(&16), nums.get(3));

        nums.insert_ascending(45, compare_int).unwrap();
        nums.insert_descending(33, compare_int).unwrap();

        nums.remove_value(&56, compare_int);
        nums.remove_value(&100, compare_int);
        nums.remove(3).unwrap();
        assert_eq!(7, nums.len());

        nums.sort_with(compare_int);
        assert_eq!(Some(4), nums.index_of(&33, compare_int));
        assert!(nums.contains_by(&45, compare_int));
        assert!(nums.contains_by(&4, compare_int));

        let listed: Vec<String> = nums
            .entries()
            .map(|(i, it)| format!("Item[{i}] = {it}"))
            .collect();
        assert_eq!("Item[0] = 4", listed[0]);
        assert_eq!("Item[6] = 78", listed[6]);

        let capacity = nums.capacity();
        nums.clear();
        assert_eq!(0, nums.len());
        assert_eq!(capacity, nums.capacity());
        nums.release();
        assert_eq!(0, nums.capacity());
    }
}
