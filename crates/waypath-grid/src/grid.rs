use thiserror::Error;

use crate::Point;

/// Dense row-major storage for a `width` by `height` rectangle of cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid<T> {
    width: i32,
    height: i32,
    cells: Box<[T]>,
}

/// Failure to build a grid from rows of cells.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("grid has no rows")]
    Empty,
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("grid of {width}x{height} cells is too large")]
    TooLarge { width: usize, height: usize },
    #[error("row {row}: invalid cell value {token:?}")]
    InvalidCell { row: usize, token: String },
}

impl<T> Grid<T> {
    /// Create a grid, initializing each cell with `f(x, y)`.
    ///
    /// # Panics
    /// Panics if `width` or `height` is negative.
    #[track_caller]
    pub fn new(width: i32, height: i32, mut f: impl FnMut(i32, i32) -> T) -> Self {
        assert!(width >= 0, "width must be non-negative");
        assert!(height >= 0, "height must be non-negative");
        let cells = (0..height)
            .flat_map(move |y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| f(x, y))
            .collect();
        Grid {
            width,
            height,
            cells,
        }
    }

    /// Build a grid from equally long rows, the first row being `y = 0`.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, GridError> {
        let height = rows.len();
        let width = rows.first().ok_or(GridError::Empty)?.len();
        let too_large = || GridError::TooLarge { width, height };
        let w = i32::try_from(width).map_err(|_| too_large())?;
        let h = i32::try_from(height).map_err(|_| too_large())?;

        let mut cells = Vec::with_capacity(width * height);
        for (row, cols) in rows.into_iter().enumerate() {
            if cols.len() != width {
                return Err(GridError::RaggedRow {
                    row,
                    expected: width,
                    found: cols.len(),
                });
            }
            cells.extend(cols);
        }
        Ok(Grid {
            width: w,
            height: h,
            cells: cells.into_boxed_slice(),
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn storage(&self) -> &[T] {
        &self.cells
    }

    pub fn storage_mut(&mut self) -> &mut [T] {
        &mut self.cells
    }

    /// Whether `p` lies inside the grid.
    #[inline(always)]
    pub fn in_bounds(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && p.x < self.width && p.y < self.height
    }

    pub fn get(&self, p: Point) -> Option<&T> {
        if self.in_bounds(p) {
            Some(&self.cells[self.index(p)])
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, p: Point) -> Option<&mut T> {
        if self.in_bounds(p) {
            let index = self.index(p);
            Some(&mut self.cells[index])
        } else {
            None
        }
    }

    /// Iterate over rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        // chunks panics on a zero chunk size
        self.cells.chunks(self.width.max(1) as usize)
    }

    #[inline(always)]
    fn index(&self, p: Point) -> usize {
        self.width as usize * p.y as usize + p.x as usize
    }

    #[track_caller]
    #[inline(always)]
    fn bounds_check(&self, p: Point) {
        assert!(p.x >= 0, "x out of bounds");
        assert!(p.y >= 0, "y out of bounds");
        assert!(p.x < self.width, "x out of bounds");
        assert!(p.y < self.height, "y out of bounds");
    }
}

impl<T> std::ops::Index<Point> for Grid<T> {
    type Output = T;

    #[track_caller]
    fn index(&self, p: Point) -> &T {
        self.bounds_check(p);
        &self.cells[self.index(p)]
    }
}

impl<T> std::ops::IndexMut<Point> for Grid<T> {
    #[track_caller]
    fn index_mut(&mut self, p: Point) -> &mut T {
        self.bounds_check(p);
        let index = self.index(p);
        &mut self.cells[index]
    }
}
