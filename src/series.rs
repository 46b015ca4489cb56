use std::ops::RangeInclusive;

use repring::{CharacterTable, Result};

use crate::e6;
use crate::graded::{BigradedModule, GradedRing};
use crate::invariant::{alternating_sum, invariants, Polynomial};

/// The `n`-fold fiber product of a fixed fiber over a fixed base. For each `n` this produces the
/// polynomial obtained from the invariant part of `fiber^n (x) base` by taking the alternating
/// sum over degrees.
pub struct ProductBundle<'a> {
    ring: GradedRing<'a>,
    fiber: BigradedModule,
    base: BigradedModule,
}

impl<'a> ProductBundle<'a> {
    pub fn new(table: &'a CharacterTable, fiber: BigradedModule, base: BigradedModule) -> Self {
        Self {
            ring: GradedRing::new(table),
            fiber,
            base,
        }
    }

    /// The bundle over the E6 moduli space. With `exterior` the base is multiplied by the
    /// exterior factors of [`e6::exterior_factors`].
    pub fn e6(table: &'a CharacterTable, exterior: bool) -> Result<Self> {
        let ring = GradedRing::new(table);
        let mut base = e6::moduli_space(table)?;
        if exterior {
            for factor in e6::exterior_factors(table) {
                base = ring.multiply(&base, &factor)?;
            }
        }
        Ok(Self::new(table, e6::fiber(table)?, base))
    }

    pub fn table(&self) -> &'a CharacterTable {
        self.ring.table()
    }

    pub fn base(&self) -> &BigradedModule {
        &self.base
    }

    /// A single copy of the fiber.
    pub fn fiber(&self) -> &BigradedModule {
        &self.fiber
    }

    /// `n` copies of the fiber.
    pub fn fiber_power(&self, n: i32) -> Result<BigradedModule> {
        self.ring.power(&self.fiber, n)
    }

    fn polynomial_of_fiber(&self, n: i32, fiber: &BigradedModule) -> Result<Polynomial> {
        let total = self.ring.multiply(fiber, &self.base)?;
        let invariants = invariants(self.table(), &total)?;
        tracing::debug!(n, grades = total.len(), "taking invariants");
        Polynomial::from_weights(n, &alternating_sum(&invariants)?)
    }

    pub fn polynomial(&self, n: i32) -> Result<Polynomial> {
        let fiber = self.fiber_power(n)?;
        self.polynomial_of_fiber(n, &fiber)
    }

    /// The polynomials for every `n` in `range`. Consecutive fiber powers are built from one
    /// another, which gives the same modules as [`ProductBundle::fiber_power`].
    #[cfg(not(feature = "concurrent"))]
    #[tracing::instrument(skip(self))]
    pub fn polynomials(&self, range: RangeInclusive<i32>) -> Result<Vec<(i32, Polynomial)>> {
        let (start, end) = range.into_inner();
        let mut result = Vec::new();
        if start > end {
            return Ok(result);
        }
        let mut fiber = self.fiber_power(start)?;
        for n in start..=end {
            if n > start {
                fiber = self.ring.multiply(&fiber, &self.fiber)?;
            }
            result.push((n, self.polynomial_of_fiber(n, &fiber)?));
        }
        Ok(result)
    }

    #[cfg(feature = "concurrent")]
    #[tracing::instrument(skip(self))]
    pub fn polynomials(&self, range: RangeInclusive<i32>) -> Result<Vec<(i32, Polynomial)>> {
        use rayon::prelude::*;

        range
            .into_par_iter()
            .map(|n| self.polynomial(n).map(|p| (n, p)))
            .collect()
    }
}
