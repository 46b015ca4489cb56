use std::fmt::{self, Display, Formatter};

/// A `(degree, weight)` bigrading. The degree is the cohomological degree and decides signs in
/// Euler characteristics; the weight is the grading that survives into the final series.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Bidegree {
    degree: i32,
    weight: i32,
}

impl Bidegree {
    pub const fn new(degree: i32, weight: i32) -> Self {
        Self { degree, weight }
    }

    pub const fn origin() -> Self {
        Self::new(0, 0)
    }

    pub const fn degree(&self) -> i32 {
        self.degree
    }

    pub const fn weight(&self) -> i32 {
        self.weight
    }

    /// `(-1)^degree`. Negative degrees follow the same parity rule.
    pub const fn sign(&self) -> i64 {
        if self.degree.rem_euclid(2) == 0 {
            1
        } else {
            -1
        }
    }

    /// Grade of a product of pieces in grades `self` and `other`, or `None` on overflow.
    pub fn checked_add(self, other: Self) -> Option<Self> {
        Some(Self {
            degree: self.degree.checked_add(other.degree)?,
            weight: self.weight.checked_add(other.weight)?,
        })
    }
}

impl From<(i32, i32)> for Bidegree {
    fn from((degree, weight): (i32, i32)) -> Self {
        Self::new(degree, weight)
    }
}

impl Display for Bidegree {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.degree, self.weight)
    }
}
