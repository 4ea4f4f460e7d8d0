use crate::FlowError;

/// Ratio of specific heats `γ = cp/cv`, constrained to be greater than one.
///
/// Every relation in this crate divides by `γ - 1`, so the constraint is
/// checked once at construction and trusted afterwards.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct HeatCapacityRatio(f64);

impl HeatCapacityRatio {
    /// Diatomic ideal gas, e.g. air at moderate temperature.
    pub const DIATOMIC: Self = Self(1.4);

    /// Creates a `HeatCapacityRatio` if `gamma` is finite and greater than one.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::InvalidInput`] otherwise.
    pub fn new(gamma: f64) -> Result<Self, FlowError> {
        if gamma.is_finite() && gamma > 1.0 {
            Ok(Self(gamma))
        } else {
            Err(FlowError::invalid_input(
                "gamma",
                gamma,
                "must be finite and greater than 1",
            ))
        }
    }

    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Returns `(γ - 1) / 2`.
    pub(crate) fn half_gm1(self) -> f64 {
        0.5 * (self.0 - 1.0)
    }
}

impl TryFrom<f64> for HeatCapacityRatio {
    type Error = FlowError;

    fn try_from(gamma: f64) -> Result<Self, Self::Error> {
        Self::new(gamma)
    }
}
