//! Fixed-step walk over a surface's parameter domain.

use stereo_core::{Result, StereoError};
use stereo_geometry::Surface;
use stereo_math::{remap, Point2};

/// Upper bound on grid cells, far above any sensible step for a unit-scale surface.
const MAX_CELLS: usize = 1 << 22;

/// Corner offsets, in grid steps, of the two triangles emitted per cell:
/// A = {(u,v), (u+s,v), (u,v+s)}, B = {(u,v+s), (u+s,v), (u+s,v+s)}.
pub const CELL_CORNERS: [(usize, usize); 6] = [(0, 0), (1, 0), (0, 1), (0, 1), (1, 0), (1, 1)];

/// Grid of parameter values `min + i * step`, keeping only values strictly
/// below the domain maximum.
///
/// A trailing span shorter than `step` is dropped rather than clamped, so a
/// step that does not divide the domain leaves the last row/column uncovered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamGrid {
    pub u_domain: (f64, f64),
    pub v_domain: (f64, f64),
    pub step: f64,
    u_count: usize,
    v_count: usize,
}

impl ParamGrid {
    pub fn new(surface: &dyn Surface, step: f64) -> Result<Self> {
        Self::from_domains(surface.domain_u(), surface.domain_v(), step)
    }

    pub fn from_domains(u_domain: (f64, f64), v_domain: (f64, f64), step: f64) -> Result<Self> {
        if !(step.is_finite() && step > 0.0) {
            return Err(StereoError::Geometry(format!(
                "grid step must be positive and finite, got {step}"
            )));
        }
        for (name, (lo, hi)) in [("u", u_domain), ("v", v_domain)] {
            if !(lo.is_finite() && hi.is_finite() && lo < hi) {
                return Err(StereoError::Geometry(format!(
                    "invalid {name} domain [{lo}, {hi}]"
                )));
            }
        }

        // Bound the walk before counting it.
        let u_cells = ((u_domain.1 - u_domain.0) / step).ceil();
        let v_cells = ((v_domain.1 - v_domain.0) / step).ceil();
        let estimate = u_cells * v_cells;
        if estimate > MAX_CELLS as f64 {
            return Err(StereoError::Geometry(format!(
                "step {step} yields about {estimate} cells (limit {MAX_CELLS})"
            )));
        }

        Ok(Self {
            u_domain,
            v_domain,
            step,
            u_count: count_below(u_domain, step),
            v_count: count_below(v_domain, step),
        })
    }

    pub fn u_count(&self) -> usize {
        self.u_count
    }

    pub fn v_count(&self) -> usize {
        self.v_count
    }

    pub fn cell_count(&self) -> usize {
        self.u_count * self.v_count
    }

    pub fn triangle_count(&self) -> usize {
        self.cell_count() * 2
    }

    /// Parameter value of grid line `i` along u. `i` may equal `u_count` for the
    /// far edge of the last cell.
    pub fn u_at(&self, i: usize) -> f64 {
        self.u_domain.0 + i as f64 * self.step
    }

    pub fn v_at(&self, j: usize) -> f64 {
        self.v_domain.0 + j as f64 * self.step
    }

    pub fn u_values(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.u_count).map(move |i| self.u_at(i))
    }

    pub fn v_values(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.v_count).map(move |j| self.v_at(j))
    }

    /// Parameter pairs of every triangle corner, u-major, six per cell in
    /// [`CELL_CORNERS`] order.
    pub fn corners(&self) -> Vec<(f64, f64)> {
        let mut corners = Vec::with_capacity(self.cell_count() * CELL_CORNERS.len());
        for i in 0..self.u_count {
            for j in 0..self.v_count {
                corners.extend(
                    CELL_CORNERS
                        .iter()
                        .map(|&(di, dj)| (self.u_at(i + di), self.v_at(j + dj))),
                );
            }
        }
        corners
    }

    /// Texture coordinate of a parameter pair, each domain mapped linearly onto `[0, 1]`.
    pub fn texture_coord(&self, u: f64, v: f64) -> Point2 {
        Point2::new(
            remap(u, self.u_domain.0, self.u_domain.1, 0.0, 1.0),
            remap(v, self.v_domain.0, self.v_domain.1, 0.0, 1.0),
        )
    }
}

fn count_below((lo, hi): (f64, f64), step: f64) -> usize {
    (0usize..).take_while(|&i| lo + i as f64 * step < hi).count()
}
