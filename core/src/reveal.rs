use crate::*;

/// Reveals the cell at `coords` and cascades through empty cells.
///
/// Revealed and flagged cells are left alone. When the revealed cell has no
/// adjacent mines, every non-mine neighbour is revealed the same way, so the
/// whole connected empty region opens together with its numbered border.
/// Mines are never opened by the cascade.
///
/// The worklist is a stack visited in the same order as a depth-first
/// recursive expansion, and the revealed guard makes every cell open at most
/// once. Returns how many cells were newly revealed.
pub fn reveal(board: &mut Board, coords: Coord2) -> CellCount {
    let mut revealed = 0;
    let mut to_visit = vec![coords];

    while let Some(visit_coords) = to_visit.pop() {
        let cell = board[visit_coords];
        if cell.is_revealed || cell.is_flagged {
            continue;
        }

        board[visit_coords].is_revealed = true;
        revealed += 1;

        if !cell.is_empty() {
            continue;
        }

        let pending = to_visit.len();
        to_visit.extend(board.iter_neighbors(visit_coords).filter(|&pos| {
            let neighbor = board[pos];
            !neighbor.is_mine && !neighbor.is_revealed && !neighbor.is_flagged
        }));
        // popped from the back, so reverse to expand neighbours in iteration order
        to_visit[pending..].reverse();
        log::trace!(
            "Flood opened {:?}, queued {} neighbours",
            visit_coords,
            to_visit.len() - pending
        );
    }

    revealed
}

/// Whether every safe cell has been revealed, regardless of flags.
pub fn check_win(board: &Board) -> bool {
    board.revealed_count() == board.safe_cell_count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn revealed_set(board: &Board) -> Vec<Coord2> {
        board
            .iter_cells()
            .filter(|(_, cell)| cell.is_revealed)
            .map(|(coords, _)| coords)
            .collect()
    }

    #[test]
    fn numbered_cell_reveals_alone() {
        let mut board = Board::from_mines((3, 3), &[(0, 0)]).unwrap();

        assert_eq!(reveal(&mut board, (1, 1)), 1);
        assert_eq!(revealed_set(&board), vec![(1, 1)]);
    }

    #[test]
    fn flood_fill_opens_zero_region_and_border() {
        let mut board = Board::from_mines((3, 3), &[(2, 2)]).unwrap();

        assert_eq!(reveal(&mut board, (0, 0)), 8);
        assert!(board[(1, 1)].is_revealed);
        assert_eq!(board[(1, 1)].adjacent_mines, 1);
        assert!(!board[(2, 2)].is_revealed);
        assert!(check_win(&board));
    }

    #[test]
    fn flood_fill_stops_at_numbered_wall() {
        // column 2 is a wall of mines, everything right of it stays hidden
        let mines = [(2, 0), (2, 1), (2, 2), (2, 3)];
        let mut board = Board::from_mines((5, 4), &mines).unwrap();

        reveal(&mut board, (0, 0));

        for y in 0..4 {
            assert!(board[(0, y)].is_revealed);
            assert!(board[(1, y)].is_revealed);
            assert!(!board[(2, y)].is_revealed);
            assert!(!board[(3, y)].is_revealed);
            assert!(!board[(4, y)].is_revealed);
        }
        assert!(!check_win(&board));
    }

    #[test]
    fn flags_block_the_cascade() {
        let mut board = Board::from_mines((4, 1), &[(3, 0)]).unwrap();
        board[(1, 0)].is_flagged = true;

        assert_eq!(reveal(&mut board, (0, 0)), 1);
        assert!(!board[(1, 0)].is_revealed);
        assert!(!board[(2, 0)].is_revealed);
    }

    #[test]
    fn revealed_or_flagged_target_is_noop() {
        let mut board = Board::from_mines((2, 2), &[(0, 0)]).unwrap();
        board[(1, 0)].is_flagged = true;

        assert_eq!(reveal(&mut board, (1, 0)), 0);
        assert_eq!(reveal(&mut board, (1, 1)), 1);
        assert_eq!(reveal(&mut board, (1, 1)), 0);
    }

    #[test]
    fn revealing_a_mine_does_not_cascade() {
        let mut board = Board::from_mines((3, 3), &[(1, 1)]).unwrap();

        assert_eq!(reveal(&mut board, (1, 1)), 1);
        assert_eq!(revealed_set(&board), vec![(1, 1)]);
    }

    #[test]
    fn large_empty_board_terminates() {
        let mut board = Board::from_mines((300, 300), &[]).unwrap();

        assert_eq!(reveal(&mut board, (150, 150)), 90_000);
        assert!(check_win(&board));
    }

    #[test]
    fn win_ignores_flags() {
        let mut board = Board::from_mines((2, 1), &[(0, 0)]).unwrap();
        assert!(!check_win(&board));

        board[(0, 0)].is_flagged = true;
        assert!(!check_win(&board));

        reveal(&mut board, (1, 0));
        board[(0, 0)].is_flagged = false;
        assert!(check_win(&board));
    }
}
