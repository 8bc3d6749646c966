//! Label grids: occupancy matrices where reserved labels mark robot markers.

use striker_geometry::Point2D;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::VisionError;

/// A cell of a label grid.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct GridCell {
    /// Row index.
    pub row: usize,
    /// Column index.
    pub col: usize,
}

impl GridCell {
    /// Creates a new `GridCell`.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Columns become `x`, rows become `y`.
impl From<GridCell> for Point2D {
    fn from(cell: GridCell) -> Self {
        Point2D::new(cell.col as f64, cell.row as f64)
    }
}

/// A row-major 2D grid of integer labels.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct LabelGrid {
    /// Number of columns.
    width: usize,
    /// Number of rows.
    height: usize,
    /// Labels, row by row.
    data: Vec<i32>,
}

impl LabelGrid {
    /// Creates a `width` × `height` grid with every cell set to `fill`.
    ///
    /// # Returns
    /// * `Result<Self, VisionError>` - The grid, or an error if a dimension is zero or the size overflows
    pub fn new(width: usize, height: usize, fill: i32) -> Result<Self, VisionError> {
        if width == 0 || height == 0 {
            return Err(VisionError::InvalidDimensions("Width and height must be non-zero"));
        }
        let Some(len) = width.checked_mul(height) else {
            return Err(VisionError::InvalidDimensions("Grid dimensions too large, would cause overflow"));
        };

        Ok(LabelGrid {
            width,
            height,
            data: vec![fill; len],
        })
    }

    /// Builds a grid from equally long rows.
    ///
    /// # Returns
    /// * `Result<Self, VisionError>` - The grid, or an error if there are no rows, rows are empty, or rows differ in length
    pub fn from_rows<R: AsRef<[i32]>>(rows: &[R]) -> Result<Self, VisionError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.as_ref().len());
        if width == 0 || height == 0 {
            return Err(VisionError::InvalidDimensions("Width and height must be non-zero"));
        }
        if rows.iter().any(|row| row.as_ref().len() != width) {
            return Err(VisionError::InvalidDimensions("All rows must have the same length"));
        }

        let data = rows.iter().flat_map(|row| row.as_ref().iter().copied()).collect();
        Ok(LabelGrid { width, height, data })
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, cell: GridCell) -> Option<usize> {
        (cell.row < self.height && cell.col < self.width).then(|| cell.row * self.width + cell.col)
    }

    fn cell_at(&self, index: usize) -> GridCell {
        GridCell::new(index / self.width, index % self.width)
    }

    /// Gets the label at `cell`.
    ///
    /// # Returns
    /// * `Result<i32, VisionError>` - The label or an error if out of bounds
    pub fn get(&self, cell: GridCell) -> Result<i32, VisionError> {
        self.index(cell)
            .map(|i| self.data[i])
            .ok_or(VisionError::OutOfBounds("Grid index out of bounds"))
    }

    /// Sets the label at `cell`.
    ///
    /// # Returns
    /// * `Result<(), VisionError>` - Success or error if out of bounds
    pub fn set(&mut self, cell: GridCell, label: i32) -> Result<(), VisionError> {
        let i = self
            .index(cell)
            .ok_or(VisionError::OutOfBounds("Grid index out of bounds"))?;
        self.data[i] = label;
        Ok(())
    }

    /// The first cell holding `label` in row-major scan order, or `None` if the label is absent.
    pub fn find_first(&self, label: i32) -> Option<GridCell> {
        self.data
            .iter()
            .position(|&v| v == label)
            .map(|i| self.cell_at(i))
    }

    /// Every cell holding `label`, in row-major scan order.
    pub fn find_all(&self, label: i32) -> Vec<GridCell> {
        self.data
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v == label)
            .map(|(i, _)| self.cell_at(i))
            .collect()
    }

    /// Gets a reference to the underlying labels, row by row.
    pub fn data(&self) -> &[i32] {
        &self.data
    }
}

impl std::fmt::Display for LabelGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "LabelGrid ({}x{})", self.width, self.height)?;
        for row in self.data.chunks(self.width) {
            for label in row {
                write!(f, "{:3} ", label)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
