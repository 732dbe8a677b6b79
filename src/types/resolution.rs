//! Structured grid shapes.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Dimensionality;
use crate::error::{Result, SetupError};

/// Number of cells along each axis of a structured grid.
///
/// 2D grids are stored row-major with `x2` as the slow axis, so a 2D shape
/// corresponds to an array of shape `(ny, nx)`.
///
/// # Example
///
/// ```
/// use rhd_rs::types::GridShape;
///
/// let shape = GridShape::two_d(100, 50).unwrap();
/// assert_eq!(shape.nx(), 100);
/// assert_eq!(shape.ny(), 50);
/// assert_eq!(shape.n_cells(), 5000);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridShape {
    /// A line of `n` cells
    OneD(usize),
    /// `nx` cells along x1 times `ny` cells along x2
    TwoD { nx: usize, ny: usize },
}

impl GridShape {
    /// Create a 1D shape. Fails on zero cells.
    pub fn one_d(n: usize) -> Result<Self> {
        if n == 0 {
            return Err(SetupError::invalid("point_counts", n, "need at least one cell"));
        }
        Ok(Self::OneD(n))
    }

    /// Create a 2D shape. Fails if either axis has zero cells.
    pub fn two_d(nx: usize, ny: usize) -> Result<Self> {
        if nx == 0 || ny == 0 {
            return Err(SetupError::invalid(
                "point_counts",
                format!("({}, {})", nx, ny),
                "need at least one cell per axis",
            ));
        }
        Ok(Self::TwoD { nx, ny })
    }

    /// Number of cells along x1.
    #[inline]
    pub fn nx(&self) -> usize {
        match *self {
            Self::OneD(n) => n,
            Self::TwoD { nx, .. } => nx,
        }
    }

    /// Number of cells along x2 (1 for 1D shapes).
    #[inline]
    pub fn ny(&self) -> usize {
        match *self {
            Self::OneD(_) => 1,
            Self::TwoD { ny, .. } => ny,
        }
    }

    /// Total number of cells.
    #[inline]
    pub fn n_cells(&self) -> usize {
        self.nx() * self.ny()
    }

    /// Spatial dimensionality.
    #[inline]
    pub fn dimensionality(&self) -> Dimensionality {
        match self {
            Self::OneD(_) => Dimensionality::One,
            Self::TwoD { .. } => Dimensionality::Two,
        }
    }

    /// Flat index of cell `(i, j)`, where `i` runs along x1 and `j` along x2.
    #[inline]
    pub fn index(&self, i: usize, j: usize) -> usize {
        debug_assert!(i < self.nx() && j < self.ny());
        j * self.nx() + i
    }

    /// Shape grown by `add_x1` cells on each side of x1 and `add_x2` on each side of x2.
    ///
    /// `add_x2` is ignored for 1D shapes.
    pub fn grown(&self, add_x1: usize, add_x2: usize) -> Self {
        match *self {
            Self::OneD(n) => Self::OneD(n + 2 * add_x1),
            Self::TwoD { nx, ny } => Self::TwoD {
                nx: nx + 2 * add_x1,
                ny: ny + 2 * add_x2,
            },
        }
    }

    /// Shape shrunk by `cut_x1` cells on each side of x1 and `cut_x2` on each side of x2.
    ///
    /// Returns `None` if nothing would remain.
    pub fn shrunk(&self, cut_x1: usize, cut_x2: usize) -> Option<Self> {
        match *self {
            Self::OneD(n) => n.checked_sub(2 * cut_x1).filter(|&n| n > 0).map(Self::OneD),
            Self::TwoD { nx, ny } => {
                let nx = nx.checked_sub(2 * cut_x1).filter(|&n| n > 0)?;
                let ny = ny.checked_sub(2 * cut_x2).filter(|&n| n > 0)?;
                Some(Self::TwoD { nx, ny })
            }
        }
    }
}

impl fmt::Display for GridShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OneD(n) => write!(f, "{}", n),
            Self::TwoD { nx, ny } => write!(f, "{}×{}", nx, ny),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_d_shape() {
        let s = GridShape::one_d(10).unwrap();
        assert_eq!(s.nx(), 10);
        assert_eq!(s.ny(), 1);
        assert_eq!(s.dimensionality(), Dimensionality::One);
        assert_eq!(s.index(3, 0), 3);
    }

    #[test]
    fn test_two_d_index_is_row_major() {
        let s = GridShape::two_d(4, 3).unwrap();
        assert_eq!(s.index(0, 1), 4);
        assert_eq!(s.index(3, 2), 11);
    }

    #[test]
    fn test_grow_and_shrink() {
        let s = GridShape::two_d(4, 3).unwrap();
        let g = s.grown(2, 1);
        assert_eq!(g, GridShape::TwoD { nx: 8, ny: 5 });
        assert_eq!(g.shrunk(2, 1), Some(s));
        assert_eq!(GridShape::OneD(3).shrunk(2, 0), None);
        assert_eq!(GridShape::OneD(3).grown(1, 5), GridShape::OneD(5));
    }

    #[test]
    fn test_zero_cells_rejected() {
        assert!(GridShape::one_d(0).is_err());
        assert!(GridShape::two_d(5, 0).is_err());
    }
}
