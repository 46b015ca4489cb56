use std::fmt;
use std::ops::{Deref, Index};

use serde::Serialize;

use crate::{Result, RingError};

macro_rules! int_vector {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
        #[serde(transparent)]
        pub struct $name(Vec<i64>);

        impl $name {
            pub fn zero(classes: usize) -> Self {
                Self(vec![0; classes])
            }

            pub fn entry(&self, index: usize) -> i64 {
                self.0[index]
            }

            pub fn as_slice(&self) -> &[i64] {
                &self.0
            }

            pub fn into_vec(self) -> Vec<i64> {
                self.0
            }

            pub fn is_zero(&self) -> bool {
                self.0.iter().all(|&x| x == 0)
            }
        }

        impl From<Vec<i64>> for $name {
            fn from(v: Vec<i64>) -> Self {
                Self(v)
            }
        }

        impl Deref for $name {
            type Target = [i64];

            fn deref(&self) -> &[i64] {
                &self.0
            }
        }

        impl Index<usize> for $name {
            type Output = i64;

            fn index(&self, index: usize) -> &i64 {
                &self.0[index]
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "[")?;
                for (i, x) in self.0.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{x}")?;
                }
                write!(f, "]")
            }
        }
    };
}

int_vector!(
    /// A virtual representation, written as its vector of multiplicities over the irreducibles.
    /// Entry `i` is the coefficient of irreducible `i`; entries may be negative.
    Representation
);

int_vector!(
    /// The values of a (virtual) character on each conjugacy class.
    Character
);

impl Representation {
    /// The indicator vector of irreducible `index`.
    pub fn unit(classes: usize, index: usize) -> Self {
        assert!(
            index < classes,
            "Irreducible {index} out of range for {classes} classes"
        );
        let mut v = vec![0; classes];
        v[index] = 1;
        Self(v)
    }

    /// Sum of all multiplicities. This is what decides whether a graded piece survives pruning.
    /// Accumulated in `i128` so that it never overflows for vectors of `i64`s.
    pub fn multiplicity_sum(&self) -> i128 {
        self.0.iter().map(|&x| i128::from(x)).sum()
    }

    /// Componentwise sum, failing on overflow.
    pub fn checked_add(&self, other: &Self) -> Result<Self> {
        if self.len() != other.len() {
            return Err(RingError::LengthMismatch {
                expected: self.len(),
                found: other.len(),
            });
        }
        self.0
            .iter()
            .zip(&other.0)
            .map(|(&a, &b)| a.checked_add(b).ok_or(RingError::Overflow))
            .collect::<Result<Vec<_>>>()
            .map(Self)
    }
}

impl Character {
    /// Pointwise product of two characters. This is the character of the tensor product.
    pub fn checked_mul(&self, other: &Self) -> Result<Self> {
        if self.len() != other.len() {
            return Err(RingError::LengthMismatch {
                expected: self.len(),
                found: other.len(),
            });
        }
        self.0
            .iter()
            .zip(&other.0)
            .map(|(&a, &b)| a.checked_mul(b).ok_or(RingError::Overflow))
            .collect::<Result<Vec<_>>>()
            .map(Self)
    }
}
