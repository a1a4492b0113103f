use glam::IVec2;
use maze_chase::{
    error::MapError,
    map::{
        grid::{manhattan, Grid},
        layout::MapId,
    },
};
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

#[test]
fn test_builtin_dimensions() {
    let one = Grid::for_map(MapId::One);
    let two = Grid::for_map(MapId::Two);
    let three = Grid::for_map(MapId::Three);

    assert_eq!((one.width(), one.height()), (20, 11));
    assert_eq!((two.width(), two.height()), (8, 6));
    assert_eq!((three.width(), three.height()), (5, 5));
}

#[test]
fn test_walkability_and_bounds() {
    let grid = Grid::for_map(MapId::One);

    assert_that(&grid.is_walkable(IVec2::new(1, 1))).is_true();
    assert_that(&grid.is_walkable(IVec2::new(0, 0))).is_false();
    assert_that(&grid.is_walkable(IVec2::new(2, 2))).is_false();

    for outside in [IVec2::new(-1, 1), IVec2::new(1, -1), IVec2::new(20, 1), IVec2::new(1, 11)] {
        assert_that(&grid.is_walkable(outside)).is_false();
        assert_that(&grid.cell(outside)).is_none();
    }
}

#[test]
fn test_unknown_map_falls_back_to_default() {
    assert_eq!(Grid::from_id("not-a-map"), Grid::for_map(MapId::One));
    assert_eq!(Grid::from_id("42"), Grid::for_map(MapId::One));
    assert_eq!(Grid::from_id("2"), Grid::for_map(MapId::Two));
}

#[test]
fn test_from_rows_validation() {
    let empty: [[u8; 0]; 0] = [];
    assert_eq!(Grid::from_rows(&empty), Err(MapError::Empty));

    let ragged: [&[u8]; 2] = [&[1, 1, 1], &[1, 0]];
    assert_eq!(
        Grid::from_rows(&ragged),
        Err(MapError::NotRectangular {
            row: 1,
            expected: 3,
            found: 2,
        })
    );
}

#[test]
fn test_walkable_tiles_row_major() {
    let grid = Grid::for_map(MapId::Three);

    assert_eq!(
        grid.walkable_tiles(),
        vec![
            IVec2::new(1, 1),
            IVec2::new(2, 1),
            IVec2::new(2, 2),
            IVec2::new(3, 2),
            IVec2::new(1, 3),
            IVec2::new(2, 3),
            IVec2::new(3, 3),
        ]
    );
}

#[test]
fn test_line_of_sight_along_open_row_and_column() {
    let grid = Grid::for_map(MapId::One);

    assert_that(&grid.has_line_of_sight(IVec2::new(1, 1), IVec2::new(18, 1))).is_true();
    assert_that(&grid.has_line_of_sight(IVec2::new(1, 1), IVec2::new(1, 9))).is_true();
}

#[test]
fn test_line_of_sight_blocked_by_wall() {
    let grid = Grid::for_map(MapId::One);

    // (2, 3) is a wall between the two
    assert_that(&grid.has_line_of_sight(IVec2::new(1, 3), IVec2::new(3, 3))).is_false();
}

#[test]
fn test_line_of_sight_requires_shared_axis() {
    let grid = Grid::for_map(MapId::One);

    assert_that(&grid.has_line_of_sight(IVec2::new(1, 1), IVec2::new(3, 3))).is_false();
}

#[test]
fn test_line_of_sight_adjacent_and_same_tile() {
    let grid = Grid::for_map(MapId::One);

    assert_that(&grid.has_line_of_sight(IVec2::new(1, 1), IVec2::new(2, 1))).is_true();
    assert_that(&grid.has_line_of_sight(IVec2::new(1, 1), IVec2::new(1, 1))).is_true();
}

#[test]
fn test_line_of_sight_is_symmetric() {
    let grid = Grid::for_map(MapId::One);
    let tiles = grid.walkable_tiles();

    for &a in &tiles {
        for &b in &tiles {
            assert_eq!(grid.has_line_of_sight(a, b), grid.has_line_of_sight(b, a), "{a} -> {b}");
        }
    }
}

#[test]
fn test_manhattan() {
    assert_eq!(manhattan(IVec2::new(1, 1), IVec2::new(4, 3)), 5);
    assert_eq!(manhattan(IVec2::new(4, 3), IVec2::new(1, 1)), 5);
    assert_eq!(manhattan(IVec2::new(2, 2), IVec2::new(2, 2)), 0);
}

#[test]
fn test_iter_cells_matches_walkability() {
    let grid = Grid::for_map(MapId::Two);
    let cells: Vec<_> = grid.iter_cells().collect();

    assert_eq!(cells.len(), 8 * 6);
    for (tile, walkable) in cells {
        assert_eq!(walkable, grid.is_walkable(tile));
    }
}
