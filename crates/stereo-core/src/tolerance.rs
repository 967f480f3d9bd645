/// Thresholds used when deciding whether a sampled quantity is degenerate.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Tolerance {
    /// Magnitude below which a vector or determinant counts as zero
    pub linear: f64,
}

impl Tolerance {
    pub const DEFAULT_LINEAR: f64 = 1e-12;

    /// Check if a value is zero within linear tolerance.
    /// NaN never counts as zero, callers must reject it separately.
    pub fn is_zero(self, v: f64) -> bool {
        v.abs() < self.linear
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            linear: Self::DEFAULT_LINEAR,
        }
    }
}
