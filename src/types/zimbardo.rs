//! Zimbardo time-perspective vector

use serde::{Deserialize, Serialize};

/// The five Zimbardo dimensions, in vector order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZimbardoDimension {
    /// Regret, rumination
    PastNegative,
    /// Nostalgia, warm memories
    PastPositive,
    /// Pleasure-seeking, impulsive
    PresentHedonistic,
    /// Helpless, no agency
    PresentFatalistic,
    /// Goal-driven, planning
    FutureOriented,
}

impl ZimbardoDimension {
    pub const ALL: [ZimbardoDimension; 5] = [
        ZimbardoDimension::PastNegative,
        ZimbardoDimension::PastPositive,
        ZimbardoDimension::PresentHedonistic,
        ZimbardoDimension::PresentFatalistic,
        ZimbardoDimension::FutureOriented,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::PastNegative => "past_negative",
            Self::PastPositive => "past_positive",
            Self::PresentHedonistic => "present_hedonistic",
            Self::PresentFatalistic => "present_fatalistic",
            Self::FutureOriented => "future_oriented",
        }
    }
}

impl std::fmt::Display for ZimbardoDimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Five non-negative coordinates, each kept within [0, 1]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ZimbardoVector {
    pub past_negative: f64,
    pub past_positive: f64,
    pub present_hedonistic: f64,
    pub present_fatalistic: f64,
    pub future_oriented: f64,
}

impl ZimbardoVector {
    pub fn new(
        past_negative: f64,
        past_positive: f64,
        present_hedonistic: f64,
        present_fatalistic: f64,
        future_oriented: f64,
    ) -> Self {
        Self {
            past_negative,
            past_positive,
            present_hedonistic,
            present_fatalistic,
            future_oriented,
        }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    pub fn get(&self, dim: ZimbardoDimension) -> f64 {
        match dim {
            ZimbardoDimension::PastNegative => self.past_negative,
            ZimbardoDimension::PastPositive => self.past_positive,
            ZimbardoDimension::PresentHedonistic => self.present_hedonistic,
            ZimbardoDimension::PresentFatalistic => self.present_fatalistic,
            ZimbardoDimension::FutureOriented => self.future_oriented,
        }
    }

    fn get_mut(&mut self, dim: ZimbardoDimension) -> &mut f64 {
        match dim {
            ZimbardoDimension::PastNegative => &mut self.past_negative,
            ZimbardoDimension::PastPositive => &mut self.past_positive,
            ZimbardoDimension::PresentHedonistic => &mut self.present_hedonistic,
            ZimbardoDimension::PresentFatalistic => &mut self.present_fatalistic,
            ZimbardoDimension::FutureOriented => &mut self.future_oriented,
        }
    }

    /// Coordinates in dimension order
    pub fn values(&self) -> [f64; 5] {
        ZimbardoDimension::ALL.map(|d| self.get(d))
    }

    pub fn sum(&self) -> f64 {
        self.values().iter().sum()
    }

    /// Multiply every coordinate by `factor`
    pub fn scaled(&self, factor: f64) -> Self {
        let mut out = *self;
        for dim in ZimbardoDimension::ALL {
            *out.get_mut(dim) *= factor;
        }
        out
    }

    /// Component-wise addition, each coordinate clamped to [0, 1]
    pub fn add_capped(&self, other: &ZimbardoVector) -> Self {
        let mut out = *self;
        for dim in ZimbardoDimension::ALL {
            *out.get_mut(dim) = (self.get(dim) + other.get(dim)).clamp(0.0, 1.0);
        }
        out
    }

    /// Coordinates scaled to sum 1; identity when the sum is 0
    pub fn normalize(&self) -> Self {
        let total = self.sum();
        if total == 0.0 {
            return *self;
        }
        self.scaled(1.0 / total)
    }

    /// Largest dimension; the first in dimension order wins ties
    pub fn dominant(&self) -> ZimbardoDimension {
        let mut best = ZimbardoDimension::PastNegative;
        for dim in ZimbardoDimension::ALL {
            if self.get(dim) > self.get(best) {
                best = dim;
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_capped_clamps_each_coordinate() {
        let a = ZimbardoVector::new(0.9, 0.0, 0.5, 0.0, 1.0);
        let b = ZimbardoVector::new(0.3, 0.1, 0.0, 0.0, 0.2);
        let c = a.add_capped(&b);
        assert_eq!(c.past_negative, 1.0);
        assert!((c.past_positive - 0.1).abs() < 1e-12);
        assert_eq!(c.future_oriented, 1.0);
    }

    #[test]
    fn test_normalize_zero_is_identity() {
        let z = ZimbardoVector::zero();
        assert_eq!(z.normalize(), z);
        let v = ZimbardoVector::new(0.1, 0.1, 0.0, 0.0, 0.2).normalize();
        assert!((v.sum() - 1.0).abs() < 1e-9);
        assert!((v.future_oriented - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_dominant_first_on_ties() {
        assert_eq!(ZimbardoVector::zero().dominant(), ZimbardoDimension::PastNegative);
        let v = ZimbardoVector::new(0.0, 0.2, 0.0, 0.0, 0.2);
        assert_eq!(v.dominant(), ZimbardoDimension::PastPositive);
    }
}
