//! The per-axis space constraint passed into layout.

use crate::geometry::Size;
use crate::math::MaybeMath;

/// The amount of space available to a node on one axis.
///
/// Either an exact amount, or a qualitative constraint asking the node to
/// size itself as small (`MinContent`) or as large (`MaxContent`) as its
/// content allows.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AvailableSpace {
    /// An exact number of units is available
    Definite(f32),
    /// The node should be sized to its smallest non-overflowing size
    MinContent,
    /// The node should be sized to its ideal content-fitting size
    MaxContent,
}

impl AvailableSpace {
    /// True for the `Definite` variant.
    pub fn is_definite(self) -> bool {
        matches!(self, Self::Definite(_))
    }

    /// The definite value, if any.
    pub fn into_option(self) -> Option<f32> {
        match self {
            Self::Definite(value) => Some(value),
            _ => None,
        }
    }

    /// The definite value, or the given fallback.
    pub fn unwrap_or(self, fallback: f32) -> f32 {
        self.into_option().unwrap_or(fallback)
    }

    /// Subtract from the definite value, leaving constraints unchanged.
    pub fn maybe_sub(self, rhs: f32) -> AvailableSpace {
        match self {
            Self::Definite(value) => Self::Definite(value - rhs),
            other => other,
        }
    }

    /// Replace with a definite value if one is given.
    pub fn maybe_set(self, value: Option<f32>) -> AvailableSpace {
        match value {
            Some(value) => Self::Definite(value),
            None => self,
        }
    }

    /// Apply a function to the definite value, leaving constraints
    /// unchanged.
    pub fn map_definite_value(self, f: impl FnOnce(f32) -> f32) -> AvailableSpace {
        match self {
            Self::Definite(value) => Self::Definite(f(value)),
            other => other,
        }
    }

    /// Compute free space given the amount used. Constraints are treated
    /// as infinite (`MaxContent`) or zero (`MinContent`) free space.
    pub fn compute_free_space(self, used: f32) -> f32 {
        match self {
            Self::Definite(value) => value - used,
            Self::MaxContent => f32::INFINITY,
            Self::MinContent => 0.0,
        }
    }

    /// Equality with a tolerance on definite values, used by the cache to
    /// match float constraint keys.
    pub fn is_roughly_equal(self, other: AvailableSpace) -> bool {
        use AvailableSpace::*;
        match (self, other) {
            (Definite(a), Definite(b)) => (a - b).abs() < f32::EPSILON,
            (MinContent, MinContent) => true,
            (MaxContent, MaxContent) => true,
            _ => false,
        }
    }
}

impl From<f32> for AvailableSpace {
    fn from(value: f32) -> Self {
        Self::Definite(value)
    }
}

impl From<Option<f32>> for AvailableSpace {
    fn from(value: Option<f32>) -> Self {
        match value {
            Some(value) => Self::Definite(value),
            None => Self::MaxContent,
        }
    }
}

impl Size<AvailableSpace> {
    /// Both axes min-content constrained.
    pub const MIN_CONTENT: Self = Self { width: AvailableSpace::MinContent, height: AvailableSpace::MinContent };

    /// Both axes max-content constrained.
    pub const MAX_CONTENT: Self = Self { width: AvailableSpace::MaxContent, height: AvailableSpace::MaxContent };

    /// A definite size on both axes.
    pub fn from_lengths(width: f32, height: f32) -> Self {
        Self { width: AvailableSpace::Definite(width), height: AvailableSpace::Definite(height) }
    }

    /// The definite values on each axis, if any.
    pub fn into_options(self) -> Size<Option<f32>> {
        Size { width: self.width.into_option(), height: self.height.into_option() }
    }

    /// Replace axes with definite values where given.
    pub fn maybe_set(self, values: Size<Option<f32>>) -> Size<AvailableSpace> {
        Size { width: self.width.maybe_set(values.width), height: self.height.maybe_set(values.height) }
    }
}

impl MaybeMath<Option<f32>, AvailableSpace> for AvailableSpace {
    fn maybe_min(self, rhs: Option<f32>) -> AvailableSpace {
        match rhs {
            Some(rhs) => self.map_definite_value(|value| value.min(rhs)),
            None => self,
        }
    }

    fn maybe_max(self, rhs: Option<f32>) -> AvailableSpace {
        match rhs {
            Some(rhs) => self.map_definite_value(|value| value.max(rhs)),
            None => self,
        }
    }

    fn maybe_clamp(self, min: Option<f32>, max: Option<f32>) -> AvailableSpace {
        self.map_definite_value(|value| value.maybe_clamp(min, max))
    }

    fn maybe_add(self, rhs: Option<f32>) -> AvailableSpace {
        match rhs {
            Some(rhs) => self.map_definite_value(|value| value + rhs),
            None => self,
        }
    }

    fn maybe_sub(self, rhs: Option<f32>) -> AvailableSpace {
        match rhs {
            Some(rhs) => self.map_definite_value(|value| value - rhs),
            None => self,
        }
    }
}
