use othello_core::board::DIRECTIONS;
use othello_core::{Board, GameError, Player, Position};

/// Legality test written directly against the rules, one square at a time.
fn brute_force_legal(board: &Board, position: Position, player: Player) -> bool {
    if board.owner(position).is_some() {
        return false;
    }
    let size = board.size() as isize;
    for (d_row, d_col) in DIRECTIONS {
        let mut row = position.row as isize + d_row;
        let mut col = position.col as isize + d_col;
        let mut seen_opponent = false;
        while (0..size).contains(&row) && (0..size).contains(&col) {
            match board.owner(Position::new(row as usize, col as usize)) {
                Some(owner) if owner == player.opponent() => seen_opponent = true,
                Some(_) => {
                    if seen_opponent {
                        return true;
                    }
                    break;
                }
                None => break,
            }
            row += d_row;
            col += d_col;
        }
    }
    false
}

fn check_position(board: &Board) {
    let size = board.size();
    let (first, second) = board.score();
    assert_eq!((first + second) as usize, board.occupied());
    assert!(board.occupied() <= size * size);

    for player in [Player::First, Player::Second] {
        let moves = board.moves_for(player);
        for row in 0..size {
            for col in 0..size {
                let position = Position::new(row, col);
                assert_eq!(
                    moves.contains(position),
                    brute_force_legal(board, position, player),
                    "{position} for {player:?} on\n{board}"
                );
            }
        }
        assert_eq!(moves.is_empty(), !board.has_moves(player));
    }
}

/// Walks every line of play up to `depth` plies, checking each position.
fn walk(board: &Board, player: Player, depth: u32, visited: &mut u64) {
    check_position(board);
    *visited += 1;
    if depth == 0 {
        return;
    }

    let moves = board.moves_for(player);
    if moves.is_empty() {
        if board.has_moves(player.opponent()) {
            walk(board, player.opponent(), depth, visited);
        }
        return;
    }
    for &mv in &moves {
        let mut next = board.clone();
        next.apply_move(mv, player).unwrap();
        walk(&next, player.opponent(), depth - 1, visited);
    }
}

#[test]
fn test_exhaustive_4x4() {
    let mut visited = 0;
    walk(&Board::new(4).unwrap(), Player::Second, u32::MAX, &mut visited);
    assert!(visited > 100);
}

#[test]
fn test_depth_limited_6x6() {
    let mut visited = 0;
    walk(&Board::new(6).unwrap(), Player::Second, 5, &mut visited);
    assert!(visited > 100);
}

#[test]
fn test_illegal_moves_leave_board_untouched() {
    let mut board = Board::new(6).unwrap();
    board.apply_move("C2".parse().unwrap(), Player::Second).unwrap();
    let legal = board.moves_for(Player::First);

    for row in 0..6 {
        for col in 0..6 {
            let position = Position::new(row, col);
            if legal.contains(position) {
                continue;
            }
            let before = board.clone();
            assert!(matches!(
                board.apply_move(position, Player::First),
                Err(GameError::InvalidMove(p)) if p == position
            ));
            assert_eq!(board, before);
        }
    }
}

#[test]
fn test_largest_board() {
    let mut board = Board::new(26).unwrap();
    assert_eq!(board.owner("M13".parse().unwrap()), Some(Player::First));
    assert_eq!(board.owner("N14".parse().unwrap()), Some(Player::First));
    assert_eq!(board.owner("N13".parse().unwrap()), Some(Player::Second));
    assert_eq!(board.legal_moves_for(Player::Second).len(), 4);
    check_position(&board);

    let corner = Position::parse("z26", 26).unwrap();
    assert_eq!(corner, Position::new(25, 25));
    assert!(matches!(
        board.apply_move(corner, Player::Second),
        Err(GameError::InvalidMove(_))
    ));
}
