use enumset::{enum_set, EnumSet, EnumSetType};

/// One of the eight grid moves.
///
/// Variants are declared in row-major order of their target cell, which is
/// the order [`GridModel`](crate::GridModel) generates neighbors in.
#[derive(EnumSetType, Debug, Hash)]
pub enum Direction {
    NorthWest,
    North,
    NorthEast,
    West,
    East,
    SouthWest,
    South,
    SouthEast,
}

impl Direction {
    /// Moves along a single axis.
    pub const CARDINAL: EnumSet<Direction> = enum_set!(
        Direction::North | Direction::West | Direction::South | Direction::East
    );

    /// Moves along both axes at once.
    pub const DIAGONAL: EnumSet<Direction> = enum_set!(
        Direction::NorthWest | Direction::NorthEast | Direction::SouthWest | Direction::SouthEast
    );

    /// `(dx, dy)` of a single step.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::NorthWest => (-1, -1),
            Direction::North => (0, -1),
            Direction::NorthEast => (1, -1),
            Direction::West => (-1, 0),
            Direction::East => (1, 0),
            Direction::SouthWest => (-1, 1),
            Direction::South => (0, 1),
            Direction::SouthEast => (1, 1),
        }
    }

    /// The two cardinal moves a diagonal move is composed of. Empty for
    /// cardinal moves.
    pub fn components(self) -> EnumSet<Direction> {
        use Direction::*;
        match self {
            NorthWest => North | West,
            NorthEast => North | East,
            SouthWest => South | West,
            SouthEast => South | East,
            _ => EnumSet::empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagonals_are_sums_of_their_components() {
        for dir in EnumSet::<Direction>::all() {
            let (dx, dy) = dir.offset();
            let diagonal = Direction::DIAGONAL.contains(dir);
            assert_eq!(diagonal, dx != 0 && dy != 0);
            let (sx, sy) = dir
                .components()
                .iter()
                .map(Direction::offset)
                .fold((0, 0), |(ax, ay), (bx, by)| (ax + bx, ay + by));
            if diagonal {
                assert_eq!((sx, sy), (dx, dy));
            } else {
                assert_eq!((sx, sy), (0, 0));
            }
        }
        assert_eq!(Direction::CARDINAL | Direction::DIAGONAL, EnumSet::all());
    }
}
