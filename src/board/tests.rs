use super::*;

#[test]
fn test_pos_conversion() {
    let pos = Pos::new(3, 3); // Center
    assert_eq!(pos.to_index(), 24);

    let pos2 = Pos::from_index(24);
    assert_eq!(pos2.row, 3);
    assert_eq!(pos2.col, 3);
}

#[test]
fn test_pos_validity() {
    assert!(Pos::is_valid(0, 0));
    assert!(Pos::is_valid(6, 6));
    assert!(!Pos::is_valid(-1, 0));
    assert!(!Pos::is_valid(0, -1));
    assert!(!Pos::is_valid(7, 0));
    assert!(!Pos::is_valid(0, 7));
}

#[test]
fn test_board_constants() {
    assert_eq!(BOARD_SIZE, 7);
    assert_eq!(TOTAL_CELLS, 49);
    assert_eq!(Color::ALL.len(), COLOR_COUNT);
}

#[test]
fn test_pos_ordering() {
    let pos1 = Pos::new(0, 0);
    let pos2 = Pos::new(0, 1);
    let pos3 = Pos::new(1, 0);

    assert!(pos1 < pos2);
    assert!(pos2 < pos3);
}

#[test]
fn test_pos_mirror_and_edges() {
    assert_eq!(Pos::new(0, 0).mirror(), Pos::new(6, 6));
    assert_eq!(Pos::new(1, 5).mirror(), Pos::new(5, 1));
    assert_eq!(Pos::new(3, 3).mirror(), Pos::new(3, 3));
    assert!(Pos::new(0, 3).is_edge());
    assert!(!Pos::new(3, 3).is_edge());
    assert_eq!(Pos::new(3, 3).center_distance(), 0);
    assert_eq!(Pos::new(0, 0).center_distance(), 6);
}

#[test]
fn test_address_notation() {
    // c4 = row 2, column 3
    assert_eq!("c4".parse::<Pos>().unwrap(), Pos::new(2, 3));
    assert_eq!(Pos::new(2, 3).to_string(), "c4");
    assert_eq!(Pos::new(0, 0).to_string(), "a1");
    assert_eq!(Pos::new(6, 6).to_string(), "g7");
    assert_eq!("G7".parse::<Pos>().unwrap(), Pos::new(6, 6));
}

#[test]
fn test_address_rejects_garbage() {
    for bad in ["", "a", "h1", "a0", "a8", "a10", "11", "pass"] {
        assert!(bad.parse::<Pos>().is_err(), "{bad:?} should not parse");
    }
}

#[test]
fn test_color_symbols_round_trip() {
    for color in Color::ALL {
        let parsed: Color = color.to_string().parse().unwrap();
        assert_eq!(parsed, color);
        assert_eq!(Color::from_index(color.index()), Some(color));
    }
    assert!("X".parse::<Color>().is_err());
    assert!("RG".parse::<Color>().is_err());
}

#[test]
fn test_phase_thresholds() {
    assert_eq!(Phase::from_filled(0), Phase::Early);
    assert_eq!(Phase::from_filled(15), Phase::Early);
    assert_eq!(Phase::from_filled(16), Phase::Mid);
    assert_eq!(Phase::from_filled(34), Phase::Mid);
    assert_eq!(Phase::from_filled(35), Phase::Late);
    assert_eq!(Phase::from_filled(49), Phase::Late);
}

#[test]
fn test_place_and_remove_track_counts() {
    let mut board = Board::new();
    board.place(Pos::new(1, 1), Color::Red);
    board.place(Pos::new(2, 2), Color::Red);
    assert_eq!(board.count(Color::Red), 2);
    assert_eq!(board.remaining(Color::Red), 5);
    assert_eq!(board.filled_count(), 2);

    // Replacing a token keeps the counts consistent
    board.place(Pos::new(1, 1), Color::Blue);
    assert_eq!(board.count(Color::Red), 1);
    assert_eq!(board.count(Color::Blue), 1);

    assert_eq!(board.remove(Pos::new(2, 2)), Some(Color::Red));
    assert_eq!(board.remove(Pos::new(2, 2)), None);
    assert_eq!(board.filled_count(), 1);
    assert_eq!(board.empty_count(), 48);
}

#[test]
fn test_rows_and_columns() {
    let mut board = Board::new();
    board.place(Pos::new(2, 0), Color::Green);
    board.place(Pos::new(2, 6), Color::White);
    board.place(Pos::new(5, 6), Color::Yellow);

    let row = board.row(2);
    assert_eq!(row[0], Some(Color::Green));
    assert_eq!(row[6], Some(Color::White));
    assert_eq!(row[3], None);

    let col = board.column(6);
    assert_eq!(col[2], Some(Color::White));
    assert_eq!(col[5], Some(Color::Yellow));
}

#[test]
fn test_key_distinguishes_boards() {
    let mut a = Board::new();
    let mut b = Board::new();
    assert_eq!(a.key(), b.key());

    a.place(Pos::new(6, 6), Color::Purple);
    assert_ne!(a.key(), b.key());

    b.place(Pos::new(6, 6), Color::Orange);
    assert_ne!(a.key(), b.key());

    b.place(Pos::new(6, 6), Color::Purple);
    assert_eq!(a.key(), b.key());
}

#[test]
fn test_modal_remaining_color() {
    let mut board = Board::new();
    // Full bag: lowest index wins the tie
    assert_eq!(board.modal_remaining_color(), Some(Color::Red));

    board.place(Pos::new(0, 0), Color::Red);
    assert_eq!(board.modal_remaining_color(), Some(Color::Orange));

    let mut full = Board::new();
    for idx in 0..TOTAL_CELLS {
        full.place(Pos::from_index(idx), Color::ALL[idx / 7]);
    }
    assert!(full.is_full());
    assert_eq!(full.modal_remaining_color(), None);
    assert_eq!(full.bag_overflow(), None);
}

#[test]
fn test_bag_overflow_detected() {
    let mut board = Board::new();
    for c in 0..BOARD_SIZE {
        board.place(Pos::new(0, c as u8), Color::Blue);
    }
    assert_eq!(board.bag_overflow(), None);
    board.place(Pos::new(1, 0), Color::Blue);
    assert_eq!(board.bag_overflow(), Some((Color::Blue, 8)));
}

#[test]
fn test_display_renders_grid() {
    let mut board = Board::new();
    board.place(Pos::new(0, 0), Color::Red);
    board.place(Pos::new(6, 6), Color::Green);
    let text = board.to_string();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 7);
    assert_eq!(lines[0], "R......");
    assert_eq!(lines[6], "......G");
}
