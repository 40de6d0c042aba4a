//! End-to-end games driven the way a frontend would drive them.

use std::time::Duration;

use sweeper_core::*;

fn beginner(seed: u64) -> (GameSession<ManualClock>, ManualClock) {
    let clock = ManualClock::new();
    let game = GameSession::with_clock(GameConfig::beginner(), seed, clock.clone()).unwrap();
    (game, clock)
}

#[test]
fn first_click_on_a_mine_loses_without_score() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("leaderboard.txt");
    let mut leaderboard = Leaderboard::new(FileStorage::new(&path));

    let (mut game, _) = beginner(11);
    let mines = game.board().mine_coords();
    assert_eq!(mines.len(), 10);

    assert_eq!(game.reveal_at(mines[0]).unwrap(), RevealOutcome::HitMine);
    assert_eq!(game.status(), GameStatus::Lost);
    for &coords in &mines {
        assert_eq!(game.cell_view(coords).unwrap(), CellView::Mine);
    }

    let name = PlayerName::new("Ann").unwrap();
    assert!(matches!(
        game.record_score(&mut leaderboard, &name),
        Err(LeaderboardError::NotWon)
    ));
    assert!(!path.exists());
}

#[test]
fn clearing_every_safe_cell_wins_and_ranks() {
    let dir = tempfile::tempdir().unwrap();
    let mut leaderboard = Leaderboard::new(FileStorage::new(dir.path().join("leaderboard.txt")));
    leaderboard.submit(30, "Fast").unwrap();
    leaderboard.submit(500, "Slow").unwrap();

    let (mut game, clock) = beginner(5);
    clock.advance(Duration::from_secs(95));

    let safe: Vec<_> = game
        .board()
        .iter_cells()
        .filter(|(_, cell)| !cell.is_mine)
        .map(|(coords, _)| coords)
        .collect();
    let mut last = RevealOutcome::NoChange;
    for coords in safe {
        let outcome = game.reveal_at(coords).unwrap();
        if outcome.has_update() {
            last = outcome;
        }
    }

    assert_eq!(last, RevealOutcome::Won);
    assert_eq!(game.mines_remaining(), 0);
    assert_eq!(game.counter_display(), "000");
    assert_eq!(game.final_seconds(), Some(95));

    let name = PlayerName::new("mIDdle").unwrap();
    assert_eq!(game.record_score(&mut leaderboard, &name).unwrap(), Some(1));

    let listed = leaderboard.list(game.recorded_rank()).unwrap();
    let lines: Vec<_> = listed.iter().map(ToString::to_string).collect();
    assert_eq!(lines, ["1.\t00:30\tFast", "2.\t01:35\tMiddle*", "3.\t08:20\tSlow"]);
}

#[test]
fn pause_freezes_the_clock_across_a_game() {
    let (mut game, clock) = beginner(3);

    clock.advance(Duration::from_millis(4_400));
    game.toggle_pause();
    let at_pause = game.elapsed_seconds();

    clock.advance(Duration::from_secs(60));
    assert_eq!(game.elapsed_seconds(), at_pause);
    assert_eq!(game.clock_display(), "00:04");

    game.toggle_pause();
    assert!(game.elapsed_seconds().abs_diff(at_pause) <= 1);
}

#[test]
fn six_submissions_keep_five_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("files").join("leaderboard.txt");
    let mut leaderboard = Leaderboard::new(FileStorage::new(&path));

    for (secs, name) in [(61, "A"), (62, "B"), (63, "C"), (64, "D"), (65, "E")] {
        leaderboard.submit(secs, name).unwrap();
    }
    assert_eq!(leaderboard.submit(66, "F").unwrap(), None);

    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text, "01:01,A\n01:02,B\n01:03,C\n01:04,D\n01:05,E\n");
}

#[test]
fn corrupt_file_keeps_valid_entries() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("leaderboard.txt");
    std::fs::write(&path, "01:15,AB\nnot a score\n02:00\n").unwrap();

    let leaderboard = Leaderboard::new(FileStorage::new(&path));
    assert_eq!(leaderboard.load().unwrap(), vec![Entry::new(75, "AB")]);
}
