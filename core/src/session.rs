use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - InProgress -> Won
/// - InProgress -> Lost
///
/// A new game always starts over at InProgress.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::InProgress
    }
}

/// Outcome of a reveal request.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// One played game from setup to win or loss, reset in place by [`new_game`].
///
/// Owns the board exclusively. Reveal and flag requests are ignored while
/// the game is paused or over; requests outside the board are errors.
///
/// [`new_game`]: GameSession::new_game
#[derive(Debug)]
pub struct GameSession<C = SystemClock> {
    config: GameConfig,
    board: Board,
    rng: SmallRng,
    clock: C,
    stopwatch: Stopwatch,
    flag_count: i32,
    status: GameStatus,
    is_paused: bool,
    is_debug_visible: bool,
    suspended: bool,
    final_seconds: Option<u32>,
    recorded_rank: Option<Option<usize>>,
}

impl GameSession {
    /// Starts a game with a random seed on the system clock.
    pub fn new(config: GameConfig) -> Result<Self> {
        let seed: u64 = rand::random();
        log::debug!("seed: {}", seed);
        Self::with_clock(config, seed, SystemClock)
    }
}

impl<C: Clock> GameSession<C> {
    pub fn with_clock(config: GameConfig, seed: u64, clock: C) -> Result<Self> {
        let config = config.validate()?;
        let mut session = Self::blank(Board::new(config), config, seed, clock);
        session.new_game();
        Ok(session)
    }

    /// Plays on a prepared layout; later calls to [`new_game`](Self::new_game)
    /// randomise it again with `seed`.
    pub fn with_board(board: Board, seed: u64, clock: C) -> Self {
        let config = GameConfig::new_unchecked(board.size(), board.mine_count());
        Self::blank(board, config, seed, clock)
    }

    fn blank(board: Board, config: GameConfig, seed: u64, clock: C) -> Self {
        let stopwatch = Stopwatch::start(clock.now());
        Self {
            config,
            board,
            rng: SmallRng::seed_from_u64(seed),
            clock,
            stopwatch,
            flag_count: 0,
            status: GameStatus::InProgress,
            is_paused: false,
            is_debug_visible: false,
            suspended: false,
            final_seconds: None,
            recorded_rank: None,
        }
    }

    /// Lays out fresh mines and resets flags, status, pause, and the clock.
    pub fn new_game(&mut self) {
        self.board.place_mines(&mut self.rng);
        self.board.compute_adjacency();
        self.flag_count = 0;
        self.status = GameStatus::InProgress;
        self.is_paused = false;
        self.is_debug_visible = false;
        self.suspended = false;
        self.final_seconds = None;
        self.recorded_rank = None;
        self.stopwatch = Stopwatch::start(self.clock.now());
        log::debug!(
            "New game {}x{} with {} mines",
            self.config.columns(),
            self.config.rows(),
            self.config.mines
        );
    }

    /// Flags or unflags a hidden cell and returns the mines-remaining counter.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<i32> {
        let coords = self.board.validate_coords(coords)?;
        if !self.accepts_moves() {
            return Ok(self.mines_remaining());
        }

        let cell = &mut self.board[coords];
        if cell.is_revealed {
            return Ok(self.mines_remaining());
        }
        cell.is_flagged = !cell.is_flagged;
        self.flag_count += if cell.is_flagged { 1 } else { -1 };
        log::trace!("Flag at {:?}: {}", coords, cell.is_flagged);

        Ok(self.mines_remaining())
    }

    pub fn reveal_at(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.board.validate_coords(coords)?;
        if !self.accepts_moves() {
            return Ok(RevealOutcome::NoChange);
        }

        let cell = self.board[coords];
        if cell.is_flagged || cell.is_revealed {
            return Ok(RevealOutcome::NoChange);
        }

        let opened = reveal(&mut self.board, coords);
        log::debug!("Reveal at {:?} opened {} cells", coords, opened);

        Ok(if cell.is_mine {
            self.lose(coords);
            RevealOutcome::HitMine
        } else if check_win(&self.board) {
            self.win();
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        })
    }

    /// Pauses or resumes an in-progress game, returns whether it is now paused.
    pub fn toggle_pause(&mut self) -> bool {
        if self.status != GameStatus::InProgress {
            return self.is_paused;
        }

        let now = self.clock.now();
        if self.is_paused {
            let secs = self.stopwatch.resume(now);
            log::debug!("Resumed after {} s paused", secs);
        } else {
            self.stopwatch.pause(now);
            let elapsed = self.stopwatch.elapsed_secs(now);
            log::debug!("Paused at {}", format_clock(elapsed));
        }
        self.is_paused = !self.is_paused;
        self.suspended = false;
        self.is_paused
    }

    /// Holds the clock while an overlay such as the leaderboard is open.
    pub fn suspend(&mut self) {
        if self.status == GameStatus::InProgress && !self.is_paused {
            self.toggle_pause();
            self.suspended = true;
        }
    }

    /// Undoes [`suspend`](Self::suspend), leaving a player pause in place.
    pub fn resume(&mut self) {
        if self.suspended {
            self.toggle_pause();
        }
    }

    /// Shows or hides the mine hint layer, returns whether it is now visible.
    pub fn toggle_debug(&mut self) -> bool {
        if self.accepts_moves() {
            self.is_debug_visible = !self.is_debug_visible;
        }
        self.is_debug_visible
    }

    /// Seconds played net of pauses; frozen while paused and once finished.
    pub fn elapsed_seconds(&self) -> u64 {
        self.stopwatch.elapsed_secs(self.clock.now())
    }

    pub fn clock_display(&self) -> String {
        format_clock(self.elapsed_seconds())
    }

    pub fn counter_display(&self) -> String {
        format_counter(self.mines_remaining())
    }

    pub fn mines_remaining(&self) -> i32 {
        self.config.mines as i32 - self.flag_count
    }

    pub fn flag_count(&self) -> i32 {
        self.flag_count
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    pub fn is_debug_visible(&self) -> bool {
        self.is_debug_visible
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Completion time, set once the game is won.
    pub fn final_seconds(&self) -> Option<u32> {
        self.final_seconds
    }

    pub fn cell_view(&self, coords: Coord2) -> Result<CellView> {
        let cell = self.board.cell(coords)?;
        Ok(if self.is_paused {
            CellView::Covered
        } else {
            cell.into()
        })
    }

    /// Whether the debug layer should mark a mine at `coords`.
    pub fn debug_mine_at(&self, coords: Coord2) -> Result<bool> {
        let cell = self.board.cell(coords)?;
        Ok(self.is_debug_visible && !self.is_paused && cell.is_mine)
    }

    /// Display state of every cell, one `Vec` per row.
    pub fn view(&self) -> Vec<Vec<CellView>> {
        let (columns, rows) = self.board.size();
        (0..rows)
            .map(|y| {
                (0..columns)
                    .map(|x| {
                        if self.is_paused {
                            CellView::Covered
                        } else {
                            self.board[(x, y)].into()
                        }
                    })
                    .collect()
            })
            .collect()
    }

    /// Submits the winning time once and remembers the rank it got.
    pub fn record_score<S: ScoreStorage>(
        &mut self,
        leaderboard: &mut Leaderboard<S>,
        name: &PlayerName,
    ) -> core::result::Result<Option<usize>, LeaderboardError> {
        if let Some(rank) = self.recorded_rank {
            return Ok(rank);
        }
        let seconds = self.final_seconds.ok_or(LeaderboardError::NotWon)?;
        let rank = leaderboard.submit(seconds, name.as_str())?;
        self.recorded_rank = Some(rank);
        Ok(rank)
    }

    /// Rank of this session's recorded score, for highlighting.
    pub fn recorded_rank(&self) -> Option<usize> {
        self.recorded_rank.flatten()
    }

    fn accepts_moves(&self) -> bool {
        !self.is_paused && !self.status.is_finished()
    }

    fn lose(&mut self, coords: Coord2) {
        self.status = GameStatus::Lost;
        self.stopwatch.stop(self.clock.now());
        self.board
            .cells_mut()
            .filter(|cell| cell.is_mine)
            .for_each(|cell| cell.is_revealed = true);
        log::debug!("Lost on mine at {:?}", coords);
    }

    fn win(&mut self) {
        self.status = GameStatus::Won;
        self.stopwatch.stop(self.clock.now());
        self.board
            .cells_mut()
            .filter(|cell| cell.is_mine)
            .for_each(|cell| cell.is_flagged = true);
        self.flag_count = self.config.mines as i32;

        let seconds = self.elapsed_seconds();
        self.final_seconds = Some(u32::try_from(seconds).unwrap_or(u32::MAX));
        log::debug!("Won in {}", format_clock(seconds));
    }
}
