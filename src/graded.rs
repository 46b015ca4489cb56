//! Bigraded modules over the representation ring and their tensor products.

use std::collections::btree_map::{self, BTreeMap};
use std::fmt;

use itertools::iproduct;
use repring::{CharacterTable, Representation, Result, RingError};

use crate::bidegree::Bidegree;

/// A formal sum of virtual representations indexed by [`Bidegree`]s.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BigradedModule {
    pieces: BTreeMap<Bidegree, Representation>,
}

impl BigradedModule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a module from `(grade, representation)` pairs. A repeated grade replaces the earlier
    /// entry. No pruning takes place.
    pub fn from_pieces<B: Into<Bidegree>>(
        pieces: impl IntoIterator<Item = (B, Representation)>,
    ) -> Self {
        Self {
            pieces: pieces.into_iter().map(|(b, v)| (b.into(), v)).collect(),
        }
    }

    pub fn get(&self, b: impl Into<Bidegree>) -> Option<&Representation> {
        self.pieces.get(&b.into())
    }

    pub fn iter(&self) -> impl Iterator<Item = (Bidegree, &Representation)> + Clone + '_ {
        self.pieces.iter().map(|(&b, v)| (b, v))
    }

    pub fn representations(&self) -> impl Iterator<Item = &Representation> + '_ {
        self.pieces.values()
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Drops every piece whose multiplicities sum to zero.
    pub fn prune(&mut self) {
        self.pieces.retain(|_, v| v.multiplicity_sum() != 0);
    }

    pub fn pruned(mut self) -> Self {
        self.prune();
        self
    }
}

impl fmt::Display for BigradedModule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (b, v)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{b}: {v}")?;
        }
        write!(f, "}}")
    }
}

/// Arithmetic of bigraded modules over the representation ring of a fixed character table.
#[derive(Clone, Copy)]
pub struct GradedRing<'a> {
    table: &'a CharacterTable,
}

impl<'a> GradedRing<'a> {
    pub fn new(table: &'a CharacterTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &'a CharacterTable {
        self.table
    }

    /// The multiplicative unit, the trivial representation in bidegree `(0, 0)`.
    pub fn one(&self) -> BigradedModule {
        BigradedModule::from_pieces([(Bidegree::origin(), self.table.trivial())])
    }

    fn accumulate(
        &self,
        pieces: &mut BTreeMap<Bidegree, Representation>,
        grade: Bidegree,
        v: Representation,
    ) -> Result<()> {
        match pieces.entry(grade) {
            btree_map::Entry::Occupied(mut e) => {
                let sum = self.table.add(e.get(), &v)?;
                *e.get_mut() = sum;
            }
            btree_map::Entry::Vacant(e) => {
                e.insert(v);
            }
        }
        Ok(())
    }

    /// Grade-wise sum, pruned.
    pub fn add(&self, p: &BigradedModule, q: &BigradedModule) -> Result<BigradedModule> {
        let mut pieces = p.pieces.clone();
        for (grade, v) in q.iter() {
            self.accumulate(&mut pieces, grade, v.clone())?;
        }
        Ok(BigradedModule { pieces }.pruned())
    }

    /// The tensor product: pieces in grades `a` and `b` multiply into grade `a + b`. Pieces whose
    /// multiplicities sum to zero are dropped from the result.
    pub fn multiply(&self, p: &BigradedModule, q: &BigradedModule) -> Result<BigradedModule> {
        let mut pieces = BTreeMap::new();
        for ((a, v), (b, w)) in iproduct!(p.iter(), q.iter()) {
            let grade = a.checked_add(b).ok_or(RingError::Overflow)?;
            let product = self.table.multiply(v, w)?;
            self.accumulate(&mut pieces, grade, product)?;
        }
        Ok(BigradedModule { pieces }.pruned())
    }

    /// `p` multiplied into [`GradedRing::one`] `n` times. The zeroth power of any module, the
    /// empty one included, is the unit.
    pub fn power(&self, p: &BigradedModule, n: i32) -> Result<BigradedModule> {
        if n < 0 {
            return Err(RingError::InvalidExponent(n));
        }
        let mut result = self.one();
        for _ in 0..n {
            result = self.multiply(&result, p)?;
        }
        Ok(result)
    }
}
