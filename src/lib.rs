//! Poincaré series of fiber products over the moduli space attached to E6, computed in the
//! representation ring of its Weyl group.
//!
//! The arithmetic of the representation ring itself lives in the [`repring`] crate. On top of it,
//! [`graded`] implements bigraded modules and their tensor products, [`invariant`] passes to
//! integer series and [`series`] assembles the family of polynomials indexed by the number of
//! fiber factors.

pub mod bidegree;
pub mod e6;
pub mod graded;
pub mod invariant;
pub mod series;
pub mod utils;

pub use repring;
