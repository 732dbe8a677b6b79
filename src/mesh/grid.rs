//! Structured coordinate grids.
//!
//! A grid is a list of cell-centre coordinates along each axis. Faces sit
//! between neighbouring centres: at the arithmetic mean for uniform spacing
//! and at the geometric mean for logarithmic spacing. The outermost faces
//! coincide with the first and last centre.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SetupError};
use crate::types::{CoordinateSystem, Dimensionality, GridShape, Interval, Spacing};

/// Build `npts` coordinates spanning `bounds`, inclusive of both ends.
///
/// - [`Spacing::Uniform`]: evenly spaced in the coordinate
/// - [`Spacing::Logarithmic`]: evenly spaced in `ln(coordinate)`; requires
///   strictly positive bounds
///
/// # Example
///
/// ```
/// use rhd_rs::mesh::build_grid;
/// use rhd_rs::types::{Interval, Spacing};
///
/// let r = build_grid(Interval::new(0.05, 1.0).unwrap(), 64, Spacing::Logarithmic).unwrap();
/// assert_eq!(r[0], 0.05);
/// assert_eq!(r[63], 1.0);
///
/// assert!(build_grid(Interval::unit(), 64, Spacing::Logarithmic).is_err());
/// ```
pub fn build_grid(bounds: Interval, npts: usize, spacing: Spacing) -> Result<Vec<f64>> {
    if npts == 0 {
        return Err(SetupError::invalid("point_counts", npts, "need at least one point"));
    }
    if npts == 1 {
        return Ok(vec![bounds.min]);
    }

    let last = (npts - 1) as f64;
    let mut coords: Vec<f64> = match spacing {
        Spacing::Uniform => {
            let h = bounds.length() / last;
            (0..npts).map(|i| bounds.min + i as f64 * h).collect()
        }
        Spacing::Logarithmic => {
            if !bounds.is_positive() {
                return Err(SetupError::NonPositiveLogBounds {
                    min: bounds.min,
                    max: bounds.max,
                });
            }
            let (lo, hi) = (bounds.min.ln(), bounds.max.ln());
            let h = (hi - lo) / last;
            (0..npts).map(|i| (lo + i as f64 * h).exp()).collect()
        }
    };

    // Pin the endpoints so they match the bounds exactly
    coords[0] = bounds.min;
    coords[npts - 1] = bounds.max;
    Ok(coords)
}

/// Spacing mode of each axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisSpacing {
    #[serde(default)]
    pub x1: Spacing,
    #[serde(default)]
    pub x2: Spacing,
}

impl AxisSpacing {
    /// Same spacing on both axes.
    pub fn both(spacing: Spacing) -> Self {
        Self {
            x1: spacing,
            x2: spacing,
        }
    }

    /// Default spacing for a coordinate system.
    ///
    /// Spherical grids are logarithmic in radius (x1) and uniform in angle
    /// (x2), which keeps cell aspect ratios roughly constant.
    pub fn for_coordinates(coords: CoordinateSystem) -> Self {
        match coords {
            CoordinateSystem::Cartesian => Self::default(),
            CoordinateSystem::Spherical => Self {
                x1: Spacing::Logarithmic,
                x2: Spacing::Uniform,
            },
        }
    }
}

/// Physical extent of the simulation domain.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Geometry {
    /// Interval along x1
    OneD { bounds: Interval },
    /// Rectangle `x1 × x2`
    TwoD { x1: Interval, x2: Interval },
}

impl Geometry {
    pub fn one_d(bounds: Interval) -> Self {
        Self::OneD { bounds }
    }

    pub fn two_d(x1: Interval, x2: Interval) -> Self {
        Self::TwoD { x1, x2 }
    }

    #[inline]
    pub fn dimensionality(&self) -> Dimensionality {
        match self {
            Self::OneD { .. } => Dimensionality::One,
            Self::TwoD { .. } => Dimensionality::Two,
        }
    }

    /// Bounds along x1.
    #[inline]
    pub fn x1(&self) -> Interval {
        match *self {
            Self::OneD { bounds } => bounds,
            Self::TwoD { x1, .. } => x1,
        }
    }

    /// Bounds along x2, if the domain is 2D.
    #[inline]
    pub fn x2(&self) -> Option<Interval> {
        match *self {
            Self::OneD { .. } => None,
            Self::TwoD { x2, .. } => Some(x2),
        }
    }
}

/// Cell centres along one axis, with derived faces and widths.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid1D {
    /// Coordinate bounds
    pub bounds: Interval,
    /// Spacing mode used to generate the centres
    pub spacing: Spacing,
    /// Cell-centre coordinates, strictly increasing
    pub centers: Vec<f64>,
}

impl Grid1D {
    /// Resolve `npts` centres over `bounds`.
    pub fn new(bounds: Interval, npts: usize, spacing: Spacing) -> Result<Self> {
        let centers = build_grid(bounds, npts, spacing)?;
        Ok(Self {
            bounds,
            spacing,
            centers,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.centers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.centers.is_empty()
    }

    /// Face coordinates, one more than the number of centres.
    pub fn faces(&self) -> Vec<f64> {
        let n = self.centers.len();
        let mut faces = Vec::with_capacity(n + 1);
        faces.push(self.centers[0]);
        for pair in self.centers.windows(2) {
            let face = match self.spacing {
                Spacing::Uniform => 0.5 * (pair[0] + pair[1]),
                Spacing::Logarithmic => (pair[0] * pair[1]).sqrt(),
            };
            faces.push(face);
        }
        faces.push(self.centers[n - 1]);
        faces
    }

    /// Width of each cell (difference of consecutive faces).
    pub fn widths(&self) -> Vec<f64> {
        self.faces().windows(2).map(|f| f[1] - f[0]).collect()
    }

    /// Smallest cell width, the length scale of the CFL bound.
    pub fn min_width(&self) -> f64 {
        self.widths().into_iter().fold(f64::INFINITY, f64::min)
    }
}

/// Resolved coordinates of a 1D or 2D grid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridGeometry {
    OneD(Grid1D),
    TwoD { x1: Grid1D, x2: Grid1D },
}

impl GridGeometry {
    /// Resolve coordinates for `geometry` at the cell counts of `shape`.
    ///
    /// Each axis is resolved independently with its own spacing mode.
    pub fn resolve(geometry: &Geometry, shape: GridShape, spacing: AxisSpacing) -> Result<Self> {
        match (*geometry, shape) {
            (Geometry::OneD { bounds }, GridShape::OneD(n)) => {
                Ok(Self::OneD(Grid1D::new(bounds, n, spacing.x1)?))
            }
            (Geometry::TwoD { x1, x2 }, GridShape::TwoD { nx, ny }) => Ok(Self::TwoD {
                x1: Grid1D::new(x1, nx, spacing.x1)?,
                x2: Grid1D::new(x2, ny, spacing.x2)?,
            }),
            _ => Err(SetupError::DimensionalityMismatch(format!(
                "{} geometry cannot be resolved on a {} grid of {} cells",
                geometry.dimensionality(),
                shape.dimensionality(),
                shape
            ))),
        }
    }

    #[inline]
    pub fn dimensionality(&self) -> Dimensionality {
        match self {
            Self::OneD(_) => Dimensionality::One,
            Self::TwoD { .. } => Dimensionality::Two,
        }
    }

    /// Coordinates along x1.
    pub fn x1(&self) -> &Grid1D {
        match self {
            Self::OneD(grid) => grid,
            Self::TwoD { x1, .. } => x1,
        }
    }

    /// Coordinates along x2, if 2D.
    pub fn x2(&self) -> Option<&Grid1D> {
        match self {
            Self::OneD(_) => None,
            Self::TwoD { x2, .. } => Some(x2),
        }
    }

    /// Number of centres along each axis, as a grid shape.
    pub fn shape(&self) -> GridShape {
        match self {
            Self::OneD(grid) => GridShape::OneD(grid.len()),
            Self::TwoD { x1, x2 } => GridShape::TwoD {
                nx: x1.len(),
                ny: x2.len(),
            },
        }
    }

    /// Smallest cell width over all axes.
    pub fn min_width(&self) -> f64 {
        match self {
            Self::OneD(grid) => grid.min_width(),
            Self::TwoD { x1, x2 } => x1.min_width().min(x2.min_width()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-14;

    #[test]
    fn test_uniform_grid_inclusive() {
        let x = build_grid(Interval::unit(), 5, Spacing::Uniform).unwrap();
        assert_eq!(x.len(), 5);
        for (i, &xi) in x.iter().enumerate() {
            assert!((xi - 0.25 * i as f64).abs() < TOL);
        }
        assert_eq!(x[4], 1.0);
    }

    #[test]
    fn test_log_grid_requires_positive_bounds() {
        let err = build_grid(Interval::unit(), 16, Spacing::Logarithmic).unwrap_err();
        assert!(matches!(err, SetupError::NonPositiveLogBounds { .. }));

        let neg = Interval::new(-1.0, 1.0).unwrap();
        assert!(build_grid(neg, 16, Spacing::Logarithmic).is_err());
    }

    #[test]
    fn test_log_grid_monotone_with_exact_ends() {
        let r = build_grid(Interval::new(0.05, 1.0).unwrap(), 100, Spacing::Logarithmic).unwrap();
        assert_eq!(r.len(), 100);
        assert_eq!(r[0], 0.05);
        assert_eq!(r[99], 1.0);
        assert!(r.windows(2).all(|w| w[1] > w[0]));

        // Constant ratio between neighbours
        let ratio = r[1] / r[0];
        assert!((r[50] / r[49] - ratio).abs() < 1e-12);
    }

    #[test]
    fn test_zero_points_rejected() {
        assert!(build_grid(Interval::unit(), 0, Spacing::Uniform).is_err());
        assert_eq!(build_grid(Interval::unit(), 1, Spacing::Uniform).unwrap(), vec![0.0]);
    }

    #[test]
    fn test_faces_uniform() {
        let grid = Grid1D::new(Interval::unit(), 5, Spacing::Uniform).unwrap();
        let faces = grid.faces();
        assert_eq!(faces.len(), 6);
        assert_eq!(faces[0], 0.0);
        assert!((faces[1] - 0.125).abs() < TOL);
        assert_eq!(faces[5], 1.0);

        let widths = grid.widths();
        assert!((widths[2] - 0.25).abs() < TOL);
        assert!((grid.min_width() - 0.125).abs() < TOL);
    }

    #[test]
    fn test_faces_logarithmic_geometric_mean() {
        let grid =
            Grid1D::new(Interval::new(1.0, 100.0).unwrap(), 3, Spacing::Logarithmic).unwrap();
        let faces = grid.faces();
        assert!((faces[1] - 10.0_f64.sqrt()).abs() < 1e-12);
        assert!((faces[2] - 1000.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_spherical_default_spacing() {
        let spacing = AxisSpacing::for_coordinates(CoordinateSystem::Spherical);
        assert_eq!(spacing.x1, Spacing::Logarithmic);
        assert_eq!(spacing.x2, Spacing::Uniform);
        assert_eq!(
            AxisSpacing::for_coordinates(CoordinateSystem::Cartesian),
            AxisSpacing::both(Spacing::Uniform)
        );
    }

    #[test]
    fn test_resolve_mixed_axes() {
        let geometry = Geometry::two_d(
            Interval::new(0.1, 10.0).unwrap(),
            Interval::new(0.0, std::f64::consts::PI).unwrap(),
        );
        let shape = GridShape::two_d(32, 16).unwrap();
        let grid = GridGeometry::resolve(
            &geometry,
            shape,
            AxisSpacing::for_coordinates(CoordinateSystem::Spherical),
        )
        .unwrap();

        assert_eq!(grid.shape(), shape);
        assert_eq!(grid.x1().spacing, Spacing::Logarithmic);
        let theta = grid.x2().unwrap();
        assert!((theta.centers[1] - theta.centers[0] - std::f64::consts::PI / 15.0).abs() < 1e-12);
    }

    #[test]
    fn test_resolve_dimensionality_mismatch() {
        let geometry = Geometry::one_d(Interval::unit());
        let err = GridGeometry::resolve(
            &geometry,
            GridShape::two_d(4, 4).unwrap(),
            AxisSpacing::default(),
        )
        .unwrap_err();
        assert!(matches!(err, SetupError::DimensionalityMismatch(_)));
    }
}
