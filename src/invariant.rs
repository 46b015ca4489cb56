//! Passing from bigraded modules of representations to integer series: take invariants, then
//! collapse the cohomological degree with signs.

use std::collections::BTreeMap;
use std::fmt;

use repring::{CharacterTable, Result, RingError};
use serde::Serialize;

use crate::bidegree::Bidegree;
use crate::graded::BigradedModule;

/// Multiplicity of the trivial representation in every grade.
pub type GradedInvariants = BTreeMap<Bidegree, i64>;

pub fn invariants(table: &CharacterTable, module: &BigradedModule) -> Result<GradedInvariants> {
    table.invariant(module.iter())
}

/// Sums `(-1)^degree * coefficient` over all degrees with a given weight. Weights whose total
/// vanishes are omitted.
pub fn alternating_sum(invariants: &GradedInvariants) -> Result<BTreeMap<i32, i64>> {
    let mut result: BTreeMap<i32, i64> = BTreeMap::new();
    for (b, &c) in invariants {
        let entry = result.entry(b.weight()).or_default();
        *entry = c
            .checked_mul(b.sign())
            .and_then(|x| entry.checked_add(x))
            .ok_or(RingError::Overflow)?;
    }
    result.retain(|_, c| *c != 0);
    Ok(result)
}

/// A Laurent polynomial in `q` with integer coefficients, stored sparsely.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Polynomial {
    terms: BTreeMap<i32, i64>,
}

impl Polynomial {
    /// Reindexes a series in the weight `w` by the exponent `2n - w`.
    pub fn from_weights(n: i32, weights: &BTreeMap<i32, i64>) -> Result<Self> {
        let top = n.checked_mul(2).ok_or(RingError::Overflow)?;
        let terms: BTreeMap<i32, i64> = weights
            .iter()
            .map(|(&w, &c)| Ok((top.checked_sub(w).ok_or(RingError::Overflow)?, c)))
            .collect::<Result<_>>()?;
        Ok(Self { terms })
    }

    pub fn coefficient(&self, exponent: i32) -> i64 {
        self.terms.get(&exponent).copied().unwrap_or(0)
    }

    /// Terms in increasing order of exponent.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (i32, i64)> + '_ {
        self.terms.iter().map(|(&e, &c)| (e, c))
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// The value at `q = 1`.
    pub fn evaluate_at_one(&self) -> Result<i64> {
        self.terms
            .values()
            .try_fold(0i64, |acc, &c| acc.checked_add(c))
            .ok_or(RingError::Overflow)
    }

    /// Collects `(exponent, coefficient)` terms, adding up repeated exponents and dropping zero
    /// coefficients.
    pub fn from_terms(terms: impl IntoIterator<Item = (i32, i64)>) -> Result<Self> {
        let mut result: BTreeMap<i32, i64> = BTreeMap::new();
        for (e, c) in terms {
            let entry = result.entry(e).or_default();
            *entry = entry.checked_add(c).ok_or(RingError::Overflow)?;
        }
        result.retain(|_, c| *c != 0);
        Ok(Self { terms: result })
    }
}

/// Writes each term as `c q^(e) + `, highest exponent first.
impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (e, c) in self.iter().rev() {
            write!(f, "{c} q^({e}) + ")?;
        }
        Ok(())
    }
}
