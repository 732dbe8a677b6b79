//! Ghost-cell padding and stripping.
//!
//! Padding allocates the grown array once (`N + 2g` per padded axis),
//! copies the interior block into place and then fills the ghosts:
//!
//! ```text
//!  x2 ghosts   c c | r r r r | c c    <- copies of the first padded row
//!              ----+---------+----
//!  interior    e e | a b c d | h h    <- x1 ghosts replicate the edge cell
//!              e e | e f g h | h h
//!              ----+---------+----
//!  x2 ghosts   ...                    <- copies of the last padded row
//! ```
//!
//! x1 is filled first, then x2 over the full padded width, so corner ghosts
//! take the value extrapolated from the already x1-padded rows.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Result, SetupError};
use crate::state::{check_companion, ConservedField, LorentzFactorField};
use crate::types::{BoundaryMode, Dimensionality, GridShape, Order};

/// Ghost cells per side on each axis of a field.
///
/// 1D fields always have `x2 == 0`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GhostLayout {
    pub x1: usize,
    pub x2: usize,
}

impl GhostLayout {
    /// No ghost cells.
    pub const fn none() -> Self {
        Self { x1: 0, x2: 0 }
    }

    /// `width` ghost cells per side on every axis of a `dims` field.
    pub fn uniform(width: usize, dims: Dimensionality) -> Self {
        match dims {
            Dimensionality::One => Self { x1: width, x2: 0 },
            Dimensionality::Two => Self { x1: width, x2: width },
        }
    }

    #[inline]
    pub fn is_none(&self) -> bool {
        self.x1 == 0 && self.x2 == 0
    }

    /// Shape left after removing these ghosts from `shape`.
    pub fn interior_of(&self, shape: GridShape) -> Option<GridShape> {
        shape.shrunk(self.x1, self.x2)
    }

    /// Fail unless this layout leaves a non-empty interior of `shape`.
    pub(crate) fn check_fits(&self, shape: GridShape) -> Result<()> {
        let fits = match shape.dimensionality() {
            Dimensionality::One => self.x2 == 0,
            Dimensionality::Two => true,
        } && self.interior_of(shape).is_some();

        if fits {
            Ok(())
        } else {
            Err(SetupError::shape_mismatch(
                "ghost layout",
                format!("fewer ghost cells than half of {}", shape),
                *self,
            ))
        }
    }
}

impl fmt::Display for GhostLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x1: {}, x2: {}", self.x1, self.x2)
    }
}

/// Pads and strips boundary ghost cells for one boundary policy.
///
/// A relativistic conserved field and its Lorentz factors are always padded
/// and stripped in the same call, so they cannot drift out of step.
///
/// # Example
///
/// ```
/// use rhd_rs::boundary::GhostZoneManager;
/// use rhd_rs::equations::IdealGas;
/// use rhd_rs::state::{ConservedStateBuilder, PrimitiveState};
/// use rhd_rs::types::{BoundaryMode, Order, Regime};
///
/// let primitive = PrimitiveState::one_d(vec![1.0; 8], vec![1.0; 8], vec![0.5; 8]).unwrap();
/// let mut state = ConservedStateBuilder::new(IdealGas::radiation(), Regime::Relativistic)
///     .build(&primitive)
///     .unwrap();
///
/// let manager = GhostZoneManager::new(Order::Second, BoundaryMode::Outflow);
/// manager.pad(&mut state.conserved, state.lorentz.as_mut(), None).unwrap();
///
/// assert_eq!(state.conserved.shape().nx(), 12);
/// assert_eq!(state.lorentz.as_ref().unwrap().shape().nx(), 12);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GhostZoneManager {
    width: usize,
    mode: BoundaryMode,
}

impl GhostZoneManager {
    /// Ghost width follows the stencil reach of `order`.
    pub fn new(order: Order, mode: BoundaryMode) -> Self {
        Self {
            width: order.ghost_width(),
            mode,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn mode(&self) -> BoundaryMode {
        self.mode
    }

    /// Layout a freshly padded `dims` field ends up with.
    pub fn target(&self, dims: Dimensionality) -> GhostLayout {
        match self.mode {
            BoundaryMode::Outflow => GhostLayout::uniform(self.width, dims),
            BoundaryMode::Periodic => GhostLayout::none(),
        }
    }

    /// Pad `conserved` together with its companions.
    ///
    /// - Outflow: each axis is grown to the target width with zero-gradient
    ///   ghosts. Existing ghosts count toward the target, so only the
    ///   missing cells are added. An axis already wider than the target is
    ///   left unchanged.
    /// - Periodic: no ghosts exist. Any cells already recorded as ghosts are
    ///   removed so the engine sees the bare interior.
    ///
    /// `lorentz` must match `conserved` cell for cell. `sources` must cover
    /// the same interior and is brought to the same layout.
    ///
    /// Returns the resulting ghost layout.
    pub fn pad(
        &self,
        conserved: &mut ConservedField,
        mut lorentz: Option<&mut LorentzFactorField>,
        mut sources: Option<&mut ConservedField>,
    ) -> Result<GhostLayout> {
        conserved.validate()?;
        if let Some(w) = lorentz.as_deref() {
            check_companion(conserved, w)?;
        }
        if let Some(s) = sources.as_deref() {
            check_sources(conserved, s)?;
        }

        if self.mode == BoundaryMode::Periodic {
            if !conserved.ghosts().is_none() {
                debug!(
                    ghosts = %conserved.ghosts(),
                    "periodic boundary: removing margin so the engine sees the interior"
                );
            }
            self.strip(conserved, lorentz)?;
            if let Some(s) = sources {
                strip_field(s)?;
            }
            return Ok(GhostLayout::none());
        }

        let existing = conserved.ghosts();
        let requested = self.target(conserved.dimensionality());
        if existing.x1 > requested.x1 || existing.x2 > requested.x2 {
            warn!(
                existing = %existing,
                requested = %requested,
                "field already carries more ghost cells than requested; leaving them"
            );
        }
        let target = GhostLayout {
            x1: existing.x1.max(requested.x1),
            x2: existing.x2.max(requested.x2),
        };

        pad_field(conserved, target);
        if let Some(w) = lorentz.as_deref_mut() {
            pad_lorentz(w, target);
        }
        if let Some(s) = sources.as_deref_mut() {
            pad_field(s, target);
        }

        debug!(
            width = self.width,
            layout = %target,
            shape = %conserved.shape(),
            "padded conserved field"
        );
        debug_assert!(lorentz
            .as_deref()
            .map_or(true, |w| check_companion(conserved, w).is_ok()));

        Ok(target)
    }

    /// Remove every ghost cell recorded on `conserved` and its Lorentz factors.
    ///
    /// Fields without ghosts (periodic runs) are returned unchanged.
    pub fn strip(
        &self,
        conserved: &mut ConservedField,
        lorentz: Option<&mut LorentzFactorField>,
    ) -> Result<()> {
        if let Some(w) = lorentz.as_deref() {
            check_companion(conserved, w)?;
        }
        strip_field(conserved)?;
        if let Some(w) = lorentz {
            let ghosts = w.ghosts();
            if !ghosts.is_none() {
                let (shape, data) = strip_array(w.data(), 1, w.shape(), ghosts)?;
                w.replace_storage(shape, GhostLayout::none(), data);
            }
        }
        Ok(())
    }
}

fn check_sources(conserved: &ConservedField, sources: &ConservedField) -> Result<()> {
    if sources.interior_shape() != conserved.interior_shape()
        || sources.n_vars() != conserved.n_vars()
    {
        return Err(SetupError::shape_mismatch(
            "source terms",
            format!("{} vars × {}", conserved.n_vars(), conserved.interior_shape()),
            format!("{} vars × {}", sources.n_vars(), sources.interior_shape()),
        ));
    }
    Ok(())
}

/// Grow `field` to `target`, adding only the cells it is missing.
pub(crate) fn pad_field(field: &mut ConservedField, target: GhostLayout) {
    let ghosts = field.ghosts();
    let add = GhostLayout {
        x1: target.x1.saturating_sub(ghosts.x1),
        x2: target.x2.saturating_sub(ghosts.x2),
    };
    if add.is_none() {
        return;
    }
    let (shape, data) = pad_array(field.data(), field.n_vars(), field.shape(), add);
    field.replace_storage(shape, target, data);
}

fn pad_lorentz(field: &mut LorentzFactorField, target: GhostLayout) {
    let ghosts = field.ghosts();
    let add = GhostLayout {
        x1: target.x1.saturating_sub(ghosts.x1),
        x2: target.x2.saturating_sub(ghosts.x2),
    };
    if add.is_none() {
        return;
    }
    let (shape, data) = pad_array(field.data(), 1, field.shape(), add);
    field.replace_storage(shape, target, data);
}

fn strip_field(field: &mut ConservedField) -> Result<()> {
    let ghosts = field.ghosts();
    if ghosts.is_none() {
        return Ok(());
    }
    let (shape, data) = strip_array(field.data(), field.n_vars(), field.shape(), ghosts)?;
    field.replace_storage(shape, GhostLayout::none(), data);
    Ok(())
}

/// Grow every component of a variable-major array by `add` cells per side.
fn pad_array(
    data: &[f64],
    n_comp: usize,
    shape: GridShape,
    add: GhostLayout,
) -> (GridShape, Vec<f64>) {
    let (nx, ny) = (shape.nx(), shape.ny());
    let add_x2 = match shape.dimensionality() {
        Dimensionality::One => 0,
        Dimensionality::Two => add.x2,
    };
    let grown = shape.grown(add.x1, add_x2);
    let (gx, gy) = (grown.nx(), grown.ny());
    let (n_old, n_new) = (nx * ny, gx * gy);

    let mut out = vec![0.0; n_comp * n_new];
    for (src, dst) in data.chunks_exact(n_old).zip(out.chunks_exact_mut(n_new)) {
        for (j, row) in src.chunks_exact(nx).enumerate() {
            let base = (j + add_x2) * gx;
            dst[base + add.x1..base + add.x1 + nx].copy_from_slice(row);
            dst[base..base + add.x1].fill(row[0]);
            dst[base + add.x1 + nx..base + gx].fill(row[nx - 1]);
        }

        let first = add_x2 * gx;
        for j in 0..add_x2 {
            dst.copy_within(first..first + gx, j * gx);
        }
        let last = (add_x2 + ny - 1) * gx;
        for j in add_x2 + ny..gy {
            dst.copy_within(last..last + gx, j * gx);
        }
    }

    (grown, out)
}

/// Remove `cut` cells per side from every component of a variable-major array.
fn strip_array(
    data: &[f64],
    n_comp: usize,
    shape: GridShape,
    cut: GhostLayout,
) -> Result<(GridShape, Vec<f64>)> {
    let inner = cut.interior_of(shape).ok_or_else(|| {
        SetupError::shape_mismatch("ghost strip", format!("more cells than {}", cut), shape)
    })?;
    let (nx, ix, iy) = (shape.nx(), inner.nx(), inner.ny());

    let mut out = Vec::with_capacity(n_comp * inner.n_cells());
    for src in data.chunks_exact(shape.n_cells()) {
        for j in 0..iy {
            let start = (j + cut.x2) * nx + cut.x1;
            out.extend_from_slice(&src[start..start + ix]);
        }
    }
    Ok((inner, out))
}
