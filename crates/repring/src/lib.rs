//! Exact integer arithmetic in the representation ring of a finite group, driven entirely by the
//! group's character table.
//!
//! A [`CharacterTable`] is parsed once from text, after which it precomputes the fusion table
//! (the decomposition of every tensor product of two irreducibles). All further arithmetic
//! ([`CharacterTable::multiply`], [`CharacterTable::add`], [`CharacterTable::decompose`]) works on
//! [`Representation`]s, i.e. integer multiplicity vectors over the irreducibles.

mod character_table;
mod error;
mod parser;
mod representation;

pub use character_table::{CharacterTable, InnerProduct, IntegralityPolicy};
pub use error::{Result, RingError};
pub use representation::{Character, Representation};
