use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Sub},
};

use serde::{Deserialize, Serialize};

/// A length along the road network, always expressed in meters.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(f64);

impl Meters {
    pub const ZERO: Meters = Meters(0.0);

    pub fn new(value: f64) -> Self {
        Meters(value)
    }

    #[inline(always)]
    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn kilometers(&self) -> f64 {
        self.0 / 1000.0
    }
}

impl From<f64> for Meters {
    fn from(value: f64) -> Self {
        Meters(value)
    }
}

impl From<Meters> for f64 {
    fn from(value: Meters) -> Self {
        value.0
    }
}

impl Add for Meters {
    type Output = Meters;

    fn add(self, other: Meters) -> Meters {
        Meters(self.0 + other.0)
    }
}

impl AddAssign for Meters {
    fn add_assign(&mut self, other: Meters) {
        self.0 += other.0;
    }
}

impl Sub for Meters {
    type Output = Meters;

    fn sub(self, other: Meters) -> Meters {
        Meters(self.0 - other.0)
    }
}

impl Sum for Meters {
    fn sum<I: Iterator<Item = Meters>>(iter: I) -> Self {
        iter.fold(Meters::ZERO, |acc, value| acc + value)
    }
}

impl fmt::Display for Meters {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} m", self.0)
    }
}

#[macro_export]
macro_rules! meters {
    ($num:expr) => {
        $crate::distance::Meters::new(($num) as f64)
    };
}

#[macro_export]
macro_rules! kilometers {
    ($num:expr) => {
        $crate::distance::Meters::new(($num) as f64 * 1000.0)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_add_distances_together() {
        assert_eq!(meters!(10) + meters!(1000), meters!(1010));
    }

    #[test]
    fn should_sum_distances() {
        let total: Meters = [meters!(1), meters!(2.5), meters!(3)].into_iter().sum();
        assert_eq!(total, meters!(6.5));
    }

    #[test]
    fn kilometers() {
        assert_eq!(meters!(1500).kilometers(), 1.5);
    }
}
