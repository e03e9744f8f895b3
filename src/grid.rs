use crate::config::GridSize;
use crate::input::Direction;

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the neighbouring cell one step in `direction`.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        match direction {
            Direction::Up => Self::new(self.x, self.y - 1),
            Direction::Down => Self::new(self.x, self.y + 1),
            Direction::Left => Self::new(self.x - 1, self.y),
            Direction::Right => Self::new(self.x + 1, self.y),
        }
    }

    /// Returns true when the position lies inside the bounds, walls included.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }

    /// Returns true for cells inside the wall ring.
    #[must_use]
    pub fn is_interior(self, bounds: GridSize) -> bool {
        self.x >= 1
            && self.y >= 1
            && self.x <= i32::from(bounds.width) - 2
            && self.y <= i32::from(bounds.height) - 2
    }

    /// Returns true for cells on the outer wall ring.
    #[must_use]
    pub fn is_wall(self, bounds: GridSize) -> bool {
        self.is_within_bounds(bounds) && !self.is_interior(bounds)
    }

    /// Wraps the position toroidally over the interior on both axes.
    ///
    /// Leaving the interior through one side re-enters on the opposite
    /// interior edge, never on the wall ring.
    #[must_use]
    pub fn wrapped_interior(self, bounds: GridSize) -> Self {
        Self {
            x: wrap_axis(self.x, i32::from(bounds.width)),
            y: wrap_axis(self.y, i32::from(bounds.height)),
        }
    }

    /// Chessboard distance, the larger of the two axis deltas.
    #[must_use]
    pub fn chebyshev_distance(self, other: Self) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }
}

fn wrap_axis(value: i32, extent: i32) -> i32 {
    let first = 1;
    let last = extent - 2;
    if value < first {
        last
    } else if value > last {
        first
    } else {
        value
    }
}

/// Inclusive range of cells eligible for spawning on one axis.
///
/// Excludes the wall and the innermost ring next to it.
#[must_use]
pub fn spawn_range(extent: u16) -> std::ops::RangeInclusive<i32> {
    2..=i32::from(extent) - 3
}

#[cfg(test)]
mod tests {
    use crate::config::GridSize;
    use crate::input::Direction;

    use super::{spawn_range, Position};

    const BOUNDS: GridSize = GridSize {
        width: 40,
        height: 20,
    };

    #[test]
    fn wrapping_re_enters_on_opposite_interior_edge() {
        assert_eq!(
            Position::new(0, 5).wrapped_interior(BOUNDS),
            Position::new(38, 5)
        );
        assert_eq!(
            Position::new(39, 5).wrapped_interior(BOUNDS),
            Position::new(1, 5)
        );
        assert_eq!(
            Position::new(7, 0).wrapped_interior(BOUNDS),
            Position::new(7, 18)
        );
        assert_eq!(
            Position::new(7, 19).wrapped_interior(BOUNDS),
            Position::new(7, 1)
        );
    }

    #[test]
    fn wrapping_leaves_interior_cells_alone() {
        let inside = Position::new(12, 9);
        assert_eq!(inside.wrapped_interior(BOUNDS), inside);
        assert!(inside.is_interior(BOUNDS));
    }

    #[test]
    fn wall_ring_is_not_interior() {
        assert!(Position::new(0, 0).is_wall(BOUNDS));
        assert!(Position::new(39, 10).is_wall(BOUNDS));
        assert!(Position::new(10, 19).is_wall(BOUNDS));
        assert!(!Position::new(1, 1).is_wall(BOUNDS));
        assert!(!Position::new(40, 10).is_wall(BOUNDS));
    }

    #[test]
    fn step_moves_one_cell() {
        let origin = Position::new(5, 5);
        assert_eq!(origin.step(Direction::Up), Position::new(5, 4));
        assert_eq!(origin.step(Direction::Down), Position::new(5, 6));
        assert_eq!(origin.step(Direction::Left), Position::new(4, 5));
        assert_eq!(origin.step(Direction::Right), Position::new(6, 5));
    }

    #[test]
    fn chebyshev_distance_takes_larger_axis() {
        assert_eq!(Position::new(1, 1).chebyshev_distance(Position::new(3, 2)), 2);
        assert_eq!(Position::new(4, 9).chebyshev_distance(Position::new(4, 9)), 0);
    }

    #[test]
    fn spawn_range_skips_wall_and_inner_ring() {
        assert_eq!(spawn_range(40), 2..=37);
        assert_eq!(spawn_range(20), 2..=17);
    }
}
