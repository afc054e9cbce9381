//! Board integration tests on the standard map.
//!
//! Covers the placement scenarios, destruction on removal, completion
//! flips, the A–F related-hexagon rule, and error reporting.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use trihex::board::{Board, HexagonPosition, Position, PositionMap};
use trihex::core::{BoardError, Color, HexCoord, TriRef};
use trihex::events::{BoardEvent, EventKind, FormedHexagon};
use trihex::grid::GridType;
use trihex::pieces::Piece;

/// Attach a listener for every kind, collecting events in order.
fn record_events(board: &mut Board) -> Rc<RefCell<Vec<BoardEvent>>> {
    let events = Rc::new(RefCell::new(Vec::new()));
    for kind in EventKind::ALL {
        let sink = Rc::clone(&events);
        board.add_event_listener(kind, move |event| sink.borrow_mut().push(event.clone()));
    }
    events
}

fn formed(col: i32, row: i32, color: &str) -> FormedHexagon {
    FormedHexagon::new(HexCoord::new(col, row), Color::from(color))
}

#[test]
fn test_two_pieces_form_shared_hexagon() {
    let mut board = Board::standard();
    let events = record_events(&mut board);

    board.place(0, Piece::new("red", "green")).unwrap();
    let result = board.place(8, Piece::new("green", "blue")).unwrap();

    assert_eq!(result, vec![formed(1, 1, "green")]);
    assert_eq!(board.get_complete_hexagons(), vec![formed(1, 1, "green")]);

    let form_events: Vec<_> = events
        .borrow()
        .iter()
        .filter(|e| e.kind() == EventKind::Form)
        .cloned()
        .collect();
    assert_eq!(form_events, vec![BoardEvent::Form(vec![formed(1, 1, "green")])]);
}

#[test]
fn test_remove_fires_single_destroy() {
    let mut board = Board::standard();
    board.place(0, Piece::new("red", "green")).unwrap();
    board.place(8, Piece::new("green", "blue")).unwrap();
    let events = record_events(&mut board);

    board.remove(8).unwrap();

    let destroys: Vec<_> = events
        .borrow()
        .iter()
        .filter_map(|e| match e {
            BoardEvent::Destroy(coords) => Some(coords.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(destroys, vec![vec![[1, 1]]]);
    assert!(board.get_complete_hexagons().is_empty());
}

#[test]
fn test_hexagon_positions_single_candidate() {
    let mut board = Board::standard();
    board.place(0, Piece::new("red", "blue")).unwrap();

    let positions = board.get_hexagon_positions(&Piece::new("blue", "green")).unwrap();
    assert_eq!(positions, vec![HexagonPosition { index: 8, count: 1 }]);

    // The query left nothing behind
    assert_eq!(board.get_occupied_positions(), vec![0]);
    assert_eq!(board.history().len(), 1);
}

#[test]
fn test_hexagon_positions_on_empty_board() {
    let mut board = Board::standard();
    assert!(board
        .get_hexagon_positions(&Piece::new("red", "red"))
        .unwrap()
        .is_empty());
}

#[test]
fn test_hexagon_positions_sorted_by_count() {
    let mut board = Board::standard();
    // (0,0) needs 5-6, (1,0) needs 5-6; position 7 paints both
    board.place(1, Piece::new("red", "green")).unwrap();
    board.place(0, Piece::new("red", "green")).unwrap();

    // Position 8 only finishes the centre hexagon (1,1)
    let positions = board.get_hexagon_positions(&Piece::new("green", "red")).unwrap();
    assert_eq!(
        positions,
        vec![
            HexagonPosition { index: 7, count: 2 },
            HexagonPosition { index: 8, count: 1 },
        ]
    );
}

#[test]
fn test_completion_flips_on_any_triangle_change() {
    let mut board = Board::standard();
    assert!(!board.is_complete_hexagon(1, 1).unwrap());

    board.place(0, Piece::new("red", "green")).unwrap();
    board.place(8, Piece::new("green", "blue")).unwrap();
    assert!(board.is_complete_hexagon(1, 1).unwrap());

    // Different color
    board.set(8, Piece::new("blue", "blue")).unwrap();
    assert!(!board.is_complete_hexagon(1, 1).unwrap());
    assert!(board.get_complete_hexagons().is_empty());

    board.set(8, Piece::new("green", "green")).unwrap();
    assert!(board.is_complete_hexagon(1, 1).unwrap());
    assert_eq!(board.get_complete_hexagons(), vec![formed(1, 1, "green")]);

    // Absent
    board.remove(0).unwrap();
    assert!(!board.is_complete_hexagon(1, 1).unwrap());
    assert!(board.get_complete_hexagons().is_empty());
}

#[test]
fn test_related_hexagons_exclude_g_and_h() {
    // Position 0 finishes hexagon (0,0) only through G and H, so it is
    // painted complete but never recorded as such.
    let mut board = Board::standard();
    board.place(1, Piece::new("red", "green")).unwrap();
    board.place(7, Piece::new("green", "red")).unwrap();
    let result = board.place(0, Piece::new("red", "green")).unwrap();

    assert_eq!(result, vec![formed(1, 0, "red")]);
    assert!(board.is_complete_hexagon(0, 0).unwrap());
    assert_eq!(board.get_complete_hexagons(), vec![formed(1, 0, "red")]);
}

#[test]
fn test_related_hexagons_in_reference_order() {
    // Same pieces, position 7 last: it reaches (0,0) through C and D
    let mut board = Board::standard();
    board.place(0, Piece::new("red", "green")).unwrap();
    board.place(1, Piece::new("red", "green")).unwrap();
    let result = board.place(7, Piece::new("green", "red")).unwrap();

    assert_eq!(result, vec![formed(0, 0, "green"), formed(1, 0, "red")]);
    assert_eq!(
        board.get_complete_hexagons(),
        vec![formed(0, 0, "green"), formed(1, 0, "red")]
    );
}

#[test]
fn test_place_then_back_fires_inverse_pair() {
    let mut board = Board::standard();
    board.place(0, Piece::new("red", "green")).unwrap();
    let events = record_events(&mut board);

    board.place(8, Piece::new("green", "blue")).unwrap();
    board.back(1).unwrap();

    let kinds: Vec<_> = events.borrow().iter().map(BoardEvent::kind).collect();
    assert_eq!(
        kinds,
        vec![EventKind::Set, EventKind::Form, EventKind::Destroy, EventKind::Remove]
    );
    assert_eq!(board.get_occupied_positions(), vec![0]);
    assert_eq!(board.history().len(), 1);
}

#[test]
fn test_replay_reconstructs_state() {
    let mut board = Board::standard();
    board.place(0, Piece::new("red", "green")).unwrap();
    board.place(8, Piece::new("green", "blue")).unwrap();
    board.place(4, Piece::new("blue", "blue")).unwrap();
    board.remove(0).unwrap();
    board.place(0, Piece::new("yellow", "green")).unwrap();
    board.remove(2).unwrap();

    let replayed = Board::replay(Arc::clone(board.map()), board.history_records()).unwrap();

    for i in 0..board.len() {
        assert_eq!(replayed.get(i).unwrap(), board.get(i).unwrap());
    }
    assert_eq!(replayed.get_complete_hexagons(), board.get_complete_hexagons());
    assert_eq!(replayed.grid(), board.grid());
    assert_eq!(replayed.history(), board.history());
}

#[test]
fn test_fill_and_drain() {
    let mut board = Board::standard();
    for i in 0..board.len() {
        board.place(i, Piece::new("red", "red")).unwrap();
    }
    assert!(board.is_full());
    assert!(board.get_available_positions().is_empty());
    assert!(board.get_edge_positions().is_empty());

    assert_eq!(board.back(100).unwrap(), 9);
    assert!(board.is_empty());
    assert!(board.get_complete_hexagons().is_empty());
    assert!(board.grid().grid().is_empty());
}

#[test]
fn test_errors_leave_board_untouched() {
    let mut board = Board::standard();
    board.place(0, Piece::new("red", "green")).unwrap();
    let before = board.to_snapshot(true);
    let events = record_events(&mut board);

    assert!(matches!(
        board.place(0, Piece::new("blue", "blue")),
        Err(BoardError::InvalidState(_))
    ));
    assert!(matches!(
        board.set(9, Piece::new("blue", "blue")),
        Err(BoardError::IndexOutOfRange { index: 9, len: 9 })
    ));
    assert!(matches!(board.remove(100), Err(BoardError::IndexOutOfRange { .. })));
    assert!(matches!(
        board.is_complete_hexagon(0, 4),
        Err(BoardError::InvalidArgument(_))
    ));
    assert!(matches!(
        board.add_event_listener_named("place", |_| {}),
        Err(BoardError::InvalidArgument(_))
    ));

    assert!(events.borrow().is_empty());
    assert_eq!(board.to_snapshot(true), before);
}

#[test]
fn test_listener_removal() {
    let mut board = Board::standard();
    let calls = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&calls);
    let id = board.add_event_listener(EventKind::Set, move |_| *sink.borrow_mut() += 1);

    board.place(0, Piece::new("red", "green")).unwrap();
    assert!(!board.remove_event_listener(EventKind::Remove, id));
    assert!(board.remove_event_listener(EventKind::Set, id));
    assert!(!board.remove_event_listener(EventKind::Set, id));
    board.place(1, Piece::new("red", "green")).unwrap();

    assert_eq!(*calls.borrow(), 1);
}

#[test]
fn test_custom_map_from_json() {
    let json = r#"{
        "type": "even-r", "columns": 2, "rows": 2,
        "positions": [
            { "adjacents": [1], "edge": true,
              "A": [0, 0, 1], "B": [0, 0, 2], "C": [0, 0, 3], "D": [0, 1, 1],
              "E": [0, 0, 4], "F": [0, 0, 5], "G": [0, 1, 2], "H": [0, 1, 3] },
            { "adjacents": [0],
              "A": [0, 0, 6], "B": [1, 0, 1], "C": [1, 0, 2], "D": [1, 0, 3],
              "E": [1, 1, 1], "F": [1, 1, 2], "G": [1, 1, 3], "H": [1, 1, 4] }
        ]
    }"#;
    let map = Arc::new(PositionMap::from_json_str(json).unwrap());
    let mut board = Board::new(Arc::clone(&map)).unwrap();

    assert_eq!(board.get_edge_positions(), vec![0]);
    assert!(board.place(0, Piece::new("red", "red")).unwrap().is_empty());
    assert_eq!(board.get_available_positions(), vec![1]);

    let result = board.place(1, Piece::new("red", "blue")).unwrap();
    assert_eq!(result, vec![formed(0, 0, "red")]);
    assert!(Arc::ptr_eq(board.map(), &map));
}

#[test]
fn test_invalid_maps_are_rejected() {
    let refs = [TriRef::new(0, 0, 1); 8];

    let no_positions = PositionMap::new(GridType::OddR, 2, 2);
    let zero_rows = PositionMap::new(GridType::OddR, 2, 0).with_position(Position::new(refs));
    let self_neighbor = PositionMap::new(GridType::OddR, 2, 2)
        .with_position(Position::new(refs).with_adjacents([0]));

    for map in [no_positions, zero_rows, self_neighbor] {
        assert!(matches!(
            Board::new(Arc::new(map)),
            Err(BoardError::InvalidConfiguration(_))
        ));
    }
}
