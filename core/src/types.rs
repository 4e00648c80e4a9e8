/// Single axis used for grid rows, columns, and positions.
pub type Coord = u8;

/// Count type used for cell counts and composition counts.
pub type CellCount = u16;

/// Row-major linear index of a cell, in `[0, rows * cols)`.
pub type CellIndex = CellCount;

/// Two-dimensional coordinates `(row, col)`, also used for grid shapes `(rows, cols)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Converts a linear index into `(row, col)` for a grid of the given shape.
///
/// Returns `None` when the index falls outside the grid.
pub fn index_to_coords(index: CellIndex, shape: Coord2) -> Option<Coord2> {
    let (rows, cols) = shape;
    if cols == 0 || index >= mult(rows, cols) {
        return None;
    }
    let cols = CellCount::from(cols);
    let row = (index / cols).try_into().ok()?;
    let col = (index % cols).try_into().ok()?;
    Some((row, col))
}

pub const fn coords_to_index((row, col): Coord2, shape: Coord2) -> CellIndex {
    row as CellIndex * shape.1 as CellIndex + col as CellIndex
}

/// Rounds a money amount to whole cents.
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_round_trips_through_coords() {
        let shape = (4, 5);
        assert_eq!(index_to_coords(0, shape), Some((0, 0)));
        assert_eq!(index_to_coords(7, shape), Some((1, 2)));
        assert_eq!(index_to_coords(19, shape), Some((3, 4)));
        assert_eq!(coords_to_index((3, 4), shape), 19);
    }

    #[test]
    fn index_outside_grid_has_no_coords() {
        assert_eq!(index_to_coords(20, (4, 5)), None);
        assert_eq!(index_to_coords(0, (0, 0)), None);
    }

    #[test]
    fn cents_rounding() {
        assert_eq!(round_cents(10.004), 10.0);
        assert_eq!(round_cents(0.1 + 0.2), 0.3);
    }
}
