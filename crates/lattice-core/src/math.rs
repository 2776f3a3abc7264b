//! Arithmetic over possibly-unset (`Option<f32>`) values.
//!
//! Layout constantly mixes definite values with "not yet known" values.
//! These helpers keep that mixing explicit: operations apply when the
//! optional operand is set and pass the value through unchanged otherwise.

/// Arithmetic between a value and a possibly-unset operand.
pub trait MaybeMath<In, Out> {
    /// Minimum of `self` and `rhs` if `rhs` is set.
    fn maybe_min(self, rhs: In) -> Out;

    /// Maximum of `self` and `rhs` if `rhs` is set.
    fn maybe_max(self, rhs: In) -> Out;

    /// Clamp `self` between any set bounds.
    fn maybe_clamp(self, min: In, max: In) -> Out;

    /// Add `rhs` if it is set.
    fn maybe_add(self, rhs: In) -> Out;

    /// Subtract `rhs` if it is set.
    fn maybe_sub(self, rhs: In) -> Out;
}

impl MaybeMath<Option<f32>, Option<f32>> for Option<f32> {
    fn maybe_min(self, rhs: Option<f32>) -> Option<f32> {
        match (self, rhs) {
            (Some(l), Some(r)) => Some(l.min(r)),
            (Some(l), None) => Some(l),
            _ => None,
        }
    }

    fn maybe_max(self, rhs: Option<f32>) -> Option<f32> {
        match (self, rhs) {
            (Some(l), Some(r)) => Some(l.max(r)),
            (Some(l), None) => Some(l),
            _ => None,
        }
    }

    fn maybe_clamp(self, min: Option<f32>, max: Option<f32>) -> Option<f32> {
        self.map(|val| val.maybe_clamp(min, max))
    }

    fn maybe_add(self, rhs: Option<f32>) -> Option<f32> {
        match (self, rhs) {
            (Some(l), Some(r)) => Some(l + r),
            (Some(l), None) => Some(l),
            _ => None,
        }
    }

    fn maybe_sub(self, rhs: Option<f32>) -> Option<f32> {
        match (self, rhs) {
            (Some(l), Some(r)) => Some(l - r),
            (Some(l), None) => Some(l),
            _ => None,
        }
    }
}

impl MaybeMath<f32, Option<f32>> for Option<f32> {
    fn maybe_min(self, rhs: f32) -> Option<f32> {
        self.map(|val| val.min(rhs))
    }

    fn maybe_max(self, rhs: f32) -> Option<f32> {
        self.map(|val| val.max(rhs))
    }

    fn maybe_clamp(self, min: f32, max: f32) -> Option<f32> {
        self.map(|val| val.min(max).max(min))
    }

    fn maybe_add(self, rhs: f32) -> Option<f32> {
        self.map(|val| val + rhs)
    }

    fn maybe_sub(self, rhs: f32) -> Option<f32> {
        self.map(|val| val - rhs)
    }
}

impl MaybeMath<Option<f32>, f32> for f32 {
    fn maybe_min(self, rhs: Option<f32>) -> f32 {
        match rhs {
            Some(r) => self.min(r),
            None => self,
        }
    }

    fn maybe_max(self, rhs: Option<f32>) -> f32 {
        match rhs {
            Some(r) => self.max(r),
            None => self,
        }
    }

    fn maybe_clamp(self, min: Option<f32>, max: Option<f32>) -> f32 {
        // Clamp against max first so that a min bound larger than the max
        // bound wins, matching CSS min/max resolution order.
        self.maybe_min(max).maybe_max(min)
    }

    fn maybe_add(self, rhs: Option<f32>) -> f32 {
        match rhs {
            Some(r) => self + r,
            None => self,
        }
    }

    fn maybe_sub(self, rhs: Option<f32>) -> f32 {
        match rhs {
            Some(r) => self - r,
            None => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maybe_clamp_min_wins() {
        // min > max: min bound takes precedence
        assert_eq!(50.0_f32.maybe_clamp(Some(40.0), Some(20.0)), 40.0);
        assert_eq!(10.0_f32.maybe_clamp(Some(40.0), Some(20.0)), 40.0);
    }

    #[test]
    fn test_unset_operands_pass_through() {
        assert_eq!(5.0_f32.maybe_sub(None), 5.0);
        assert_eq!(Some(5.0).maybe_add(None), Some(5.0));
        assert_eq!(None.maybe_max(Some(3.0)), None);
        assert_eq!(7.0_f32.maybe_clamp(None, None), 7.0);
    }
}
