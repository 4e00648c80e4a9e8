use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Immutable cell layout of one round.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    cells: Array2<CellType>,
    bomb_count: CellCount,
}

impl Grid {
    /// Builds a grid from row-major cells.
    pub fn from_cells(size: Coord2, cells: Vec<CellType>) -> Result<Self> {
        if cells.len() != usize::from(mult(size.0, size.1)) || cells.is_empty() {
            return Err(GameError::InvalidGridShape);
        }
        let cells = Array2::from_shape_vec(size.to_nd_index(), cells)
            .map_err(|_| GameError::InvalidGridShape)?;
        let bomb_count = cells
            .iter()
            .filter(|cell| cell.is_bomb())
            .count()
            .try_into()
            .map_err(|_| GameError::InvalidGridShape)?;
        Ok(Self { cells, bomb_count })
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.cells.dim();
        (dim.0.try_into().unwrap(), dim.1.try_into().unwrap())
    }

    pub fn total_cells(&self) -> CellCount {
        self.cells.len().try_into().unwrap()
    }

    pub fn bomb_count(&self) -> CellCount {
        self.bomb_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.bomb_count
    }

    pub fn validate_index(&self, index: CellIndex) -> Result<Coord2> {
        index_to_coords(index, self.size()).ok_or(GameError::InvalidIndex)
    }

    pub fn cell_type(&self, index: CellIndex) -> Option<CellType> {
        let coords = index_to_coords(index, self.size())?;
        Some(self[coords])
    }

    /// Cells in row-major order, paired with their linear index.
    pub fn iter(&self) -> impl Iterator<Item = (CellIndex, CellType)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &cell)| (i as CellIndex, cell))
    }

    pub fn count_where(&self, pred: impl Fn(CellType) -> bool) -> CellCount {
        self.cells
            .iter()
            .filter(|&&cell| pred(cell))
            .count()
            .try_into()
            .unwrap()
    }
}

impl Index<Coord2> for Grid {
    type Output = CellType;

    fn index(&self, (row, col): Coord2) -> &Self::Output {
        &self.cells[(row as usize, col as usize)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HALF: CellType = CellType::Multiplier(Multiplier::Half);

    #[test]
    fn from_cells_counts_bombs() {
        let grid = Grid::from_cells((2, 2), vec![CellType::Bomb, HALF, HALF, CellType::Bomb]).unwrap();

        assert_eq!(grid.size(), (2, 2));
        assert_eq!(grid.bomb_count(), 2);
        assert_eq!(grid.safe_cell_count(), 2);
        assert_eq!(grid.cell_type(3), Some(CellType::Bomb));
        assert_eq!(grid[(0, 1)], HALF);
    }

    #[test]
    fn from_cells_rejects_wrong_length() {
        assert_eq!(
            Grid::from_cells((2, 2), vec![HALF; 3]),
            Err(GameError::InvalidGridShape)
        );
    }

    #[test]
    fn validate_index_rejects_out_of_range() {
        let grid = Grid::from_cells((1, 2), vec![HALF, CellType::Bomb]).unwrap();
        assert_eq!(grid.validate_index(1), Ok((0, 1)));
        assert_eq!(grid.validate_index(2), Err(GameError::InvalidIndex));
    }
}
