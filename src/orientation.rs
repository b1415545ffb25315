//! Block orientation and its toggle transitions.

use crate::footprint::Footprint;

/// How the block rests on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    /// Upright on a single cell.
    #[default]
    Standing,
    /// Lying along a column, covering two rows.
    Vertical,
    /// Lying along a row, covering two columns.
    Horizontal,
}

impl Orientation {
    /// Orientation after rolling Up or Down.
    ///
    /// Horizontal is unaffected because the roll axis is orthogonal to its length.
    pub const fn roll_vertical(self) -> Self {
        match self {
            Orientation::Standing => Orientation::Vertical,
            Orientation::Vertical => Orientation::Standing,
            Orientation::Horizontal => Orientation::Horizontal,
        }
    }

    /// Orientation after rolling Left or Right.
    pub const fn roll_horizontal(self) -> Self {
        match self {
            Orientation::Standing => Orientation::Horizontal,
            Orientation::Horizontal => Orientation::Standing,
            Orientation::Vertical => Orientation::Vertical,
        }
    }

    /// Reads the orientation off a footprint's shape.
    pub fn of(footprint: &Footprint) -> Self {
        match footprint.cells() {
            [_] => Orientation::Standing,
            [a, b] if a.1 == b.1 => Orientation::Vertical,
            _ => Orientation::Horizontal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertical_toggle() {
        assert_eq!(Orientation::Standing.roll_vertical(), Orientation::Vertical);
        assert_eq!(Orientation::Vertical.roll_vertical(), Orientation::Standing);
        assert_eq!(
            Orientation::Horizontal.roll_vertical(),
            Orientation::Horizontal
        );
    }

    #[test]
    fn test_horizontal_toggle() {
        assert_eq!(
            Orientation::Standing.roll_horizontal(),
            Orientation::Horizontal
        );
        assert_eq!(
            Orientation::Horizontal.roll_horizontal(),
            Orientation::Standing
        );
        assert_eq!(Orientation::Vertical.roll_horizontal(), Orientation::Vertical);
    }

    #[test]
    fn test_toggles_are_involutions() {
        for orientation in [
            Orientation::Standing,
            Orientation::Vertical,
            Orientation::Horizontal,
        ] {
            assert_eq!(orientation.roll_vertical().roll_vertical(), orientation);
            assert_eq!(orientation.roll_horizontal().roll_horizontal(), orientation);
        }
    }

    #[test]
    fn test_orientation_of_footprint() {
        assert_eq!(
            Orientation::of(&Footprint::standing((3, 3))),
            Orientation::Standing
        );
        assert_eq!(
            Orientation::of(&Footprint::new(&[(3, 3), (4, 3)]).unwrap()),
            Orientation::Vertical
        );
        assert_eq!(
            Orientation::of(&Footprint::new(&[(3, 3), (3, 4)]).unwrap()),
            Orientation::Horizontal
        );
    }
}
