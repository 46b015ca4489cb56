use std::collections::BTreeMap;
use std::str::FromStr;

use itertools::izip;

use crate::parser::{parse_table, RawTable};
use crate::{Character, Representation, Result, RingError};

/// What to do when an inner product is not an integer, i.e. when one of its arguments is not a
/// virtual character.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IntegralityPolicy {
    /// Emit a warning and continue with the floored quotient.
    #[default]
    Warn,
    /// Fail with [`RingError::NonIntegralInnerProduct`].
    Strict,
}

/// The unreduced inner product `numerator / size` of two class functions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InnerProduct {
    pub numerator: i64,
    pub size: i64,
}

impl InnerProduct {
    /// The floored quotient. This is the inner product whenever it is integral.
    pub fn quotient(&self) -> i64 {
        self.numerator.div_euclid(self.size)
    }

    pub fn remainder(&self) -> i64 {
        self.numerator.rem_euclid(self.size)
    }

    pub fn is_integral(&self) -> bool {
        self.remainder() == 0
    }
}

/// The character table of a finite group together with its fusion table.
///
/// Conjugacy classes and irreducibles are both indexed by `0..classes`. Irreducible 0 is taken to
/// be the trivial representation.
#[derive(Debug, Clone)]
pub struct CharacterTable {
    classes: usize,
    size: i64,
    centralizer_sizes: Vec<i64>,
    class_sizes: Vec<i64>,
    rows: Vec<Character>,
    /// `fusion[i * classes + j]` is the decomposition of the tensor product of irreducibles `i`
    /// and `j`.
    fusion: Vec<Representation>,
    policy: IntegralityPolicy,
}

impl FromStr for CharacterTable {
    type Err = RingError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s, IntegralityPolicy::default())
    }
}

impl CharacterTable {
    /// Parses a character table in the text format described in the parser module and builds its
    /// fusion table.
    pub fn parse(text: &str, policy: IntegralityPolicy) -> Result<Self> {
        let RawTable {
            size,
            centralizer_sizes,
            class_sizes,
            rows,
        } = parse_table(text)?;
        Self::from_parts(size, centralizer_sizes, class_sizes, rows, policy)
    }

    #[tracing::instrument(skip_all, fields(classes = class_sizes.len(), size = size))]
    pub fn from_parts(
        size: i64,
        centralizer_sizes: Vec<i64>,
        class_sizes: Vec<i64>,
        rows: Vec<Vec<i64>>,
        policy: IntegralityPolicy,
    ) -> Result<Self> {
        let classes = class_sizes.len();
        let malformed = |line, reason: String| RingError::MalformedTable { line, reason };

        if classes == 0 {
            return Err(malformed(1, "table has no classes".to_string()));
        }
        if size <= 0 {
            return Err(malformed(1, format!("group order must be positive, got {size}")));
        }
        if centralizer_sizes.len() != classes {
            return Err(malformed(
                2,
                format!("expected {classes} centralizer sizes, found {}", centralizer_sizes.len()),
            ));
        }
        if rows.len() != classes {
            return Err(malformed(
                4 + rows.len().min(classes),
                format!("expected {classes} rows, found {}", rows.len()),
            ));
        }
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != classes) {
            return Err(malformed(
                4 + i,
                format!("expected {classes} entries in row {i}, found {}", row.len()),
            ));
        }

        let total = class_sizes
            .iter()
            .try_fold(0i64, |acc, &x| acc.checked_add(x))
            .ok_or(RingError::Overflow)?;
        if total != size {
            return Err(malformed(
                3,
                format!("class sizes sum to {total}, but the group has order {size}"),
            ));
        }
        for (i, (&c, &k)) in centralizer_sizes.iter().zip(&class_sizes).enumerate() {
            if c.checked_mul(k) != Some(size) {
                return Err(malformed(
                    2,
                    format!("centralizer size {c} and class size {k} of class {i} do not multiply to {size}"),
                ));
            }
        }

        let mut table = Self {
            classes,
            size,
            centralizer_sizes,
            class_sizes,
            rows: rows.into_iter().map(Character::from).collect(),
            fusion: Vec::new(),
            policy,
        };
        table.compute_fusion_table()?;
        Ok(table)
    }

    fn compute_fusion_table(&mut self) -> Result<()> {
        let c = self.classes;
        let mut fusion = vec![Representation::default(); c * c];
        for i in 0..c {
            for j in i..c {
                let chi = self.rows[i].checked_mul(&self.rows[j])?;
                let decomposition = self.decompose(&chi)?;
                fusion[j * c + i] = decomposition.clone();
                fusion[i * c + j] = decomposition;
            }
        }
        tracing::debug!(entries = c * (c + 1) / 2, "computed fusion table");
        self.fusion = fusion;
        Ok(())
    }

    pub fn classes(&self) -> usize {
        self.classes
    }

    /// The order of the group.
    pub fn size(&self) -> i64 {
        self.size
    }

    pub fn centralizer_sizes(&self) -> &[i64] {
        &self.centralizer_sizes
    }

    pub fn class_sizes(&self) -> &[i64] {
        &self.class_sizes
    }

    pub fn policy(&self) -> IntegralityPolicy {
        self.policy
    }

    /// The character of irreducible `i`.
    pub fn row(&self, i: usize) -> &Character {
        &self.rows[i]
    }

    /// The decomposition of the tensor product of irreducibles `i` and `j`.
    pub fn fusion(&self, i: usize, j: usize) -> &Representation {
        &self.fusion[i * self.classes + j]
    }

    fn check_len(&self, v: &[i64]) -> Result<()> {
        if v.len() == self.classes {
            Ok(())
        } else {
            Err(RingError::LengthMismatch {
                expected: self.classes,
                found: v.len(),
            })
        }
    }

    /// Computes `sum_k chi[k] sigma[k] |C_k|` together with the group order, without dividing.
    pub fn inner_product_checked(&self, chi: &[i64], sigma: &[i64]) -> Result<InnerProduct> {
        self.check_len(chi)?;
        self.check_len(sigma)?;
        let numerator = izip!(chi, sigma, &self.class_sizes).try_fold(0i64, |acc, (&a, &b, &k)| {
            a.checked_mul(b)
                .and_then(|x| x.checked_mul(k))
                .and_then(|x| acc.checked_add(x))
                .ok_or(RingError::Overflow)
        })?;
        Ok(InnerProduct {
            numerator,
            size: self.size,
        })
    }

    /// The inner product of two class functions. If it is not integral, this either warns and
    /// returns the floored quotient or fails, according to the table's [`IntegralityPolicy`].
    pub fn inner_product(&self, chi: &[i64], sigma: &[i64]) -> Result<i64> {
        let product = self.inner_product_checked(chi, sigma)?;
        if !product.is_integral() {
            match self.policy {
                IntegralityPolicy::Warn => tracing::warn!(
                    ?chi,
                    ?sigma,
                    numerator = product.numerator,
                    size = product.size,
                    "inner product of non-integral characters"
                ),
                IntegralityPolicy::Strict => {
                    return Err(RingError::NonIntegralInnerProduct {
                        numerator: product.numerator,
                        size: product.size,
                    })
                }
            }
        }
        Ok(product.quotient())
    }

    /// Writes a class function as a combination of irreducible characters. This is exact when
    /// `chi` is a virtual character.
    pub fn decompose(&self, chi: &[i64]) -> Result<Representation> {
        self.rows
            .iter()
            .map(|row| self.inner_product(chi, row))
            .collect::<Result<Vec<_>>>()
            .map(Representation::from)
    }

    /// The product in the representation ring, extended bilinearly from the fusion table.
    pub fn multiply(&self, rho: &Representation, sigma: &Representation) -> Result<Representation> {
        self.check_len(rho)?;
        self.check_len(sigma)?;
        let mut result = vec![0i64; self.classes];
        for (i, &r) in rho.iter().enumerate() {
            if r == 0 {
                continue;
            }
            for (j, &s) in sigma.iter().enumerate() {
                if s == 0 {
                    continue;
                }
                let scale = r.checked_mul(s).ok_or(RingError::Overflow)?;
                for (out, &f) in result.iter_mut().zip(self.fusion(i, j).iter()) {
                    if f != 0 {
                        *out = f
                            .checked_mul(scale)
                            .and_then(|x| out.checked_add(x))
                            .ok_or(RingError::Overflow)?;
                    }
                }
            }
        }
        Ok(Representation::from(result))
    }

    pub fn add(&self, rho: &Representation, sigma: &Representation) -> Result<Representation> {
        self.check_len(rho)?;
        rho.checked_add(sigma)
    }

    pub fn unit_vector(&self, index: usize) -> Representation {
        Representation::unit(self.classes, index)
    }

    pub fn trivial(&self) -> Representation {
        self.unit_vector(0)
    }

    /// The character of a virtual representation, as a combination of the rows of the table.
    pub fn to_character(&self, multiplicities: &Representation) -> Result<Character> {
        self.check_len(multiplicities)?;
        let mut result = vec![0i64; self.classes];
        for (&m, row) in multiplicities.iter().zip(&self.rows) {
            if m == 0 {
                continue;
            }
            for (out, &x) in result.iter_mut().zip(row.iter()) {
                *out = x
                    .checked_mul(m)
                    .and_then(|y| out.checked_add(y))
                    .ok_or(RingError::Overflow)?;
            }
        }
        Ok(Character::from(result))
    }

    /// The dimension of a virtual representation, i.e. its character on the identity class.
    pub fn dimension(&self, multiplicities: &Representation) -> Result<i64> {
        Ok(self.to_character(multiplicities)?[0])
    }

    /// For every grade, the multiplicity of the trivial representation.
    pub fn invariant<'a, K: Ord>(
        &self,
        pieces: impl IntoIterator<Item = (K, &'a Representation)>,
    ) -> Result<BTreeMap<K, i64>> {
        pieces
            .into_iter()
            .map(|(grade, rep)| {
                self.check_len(rep)?;
                Ok((grade, rep.entry(0)))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    const C2: &str = "2 2\n2 2\n1 1\n1 1\n1 -1\n";
    const S3: &str = "3 6\n6 2 3\n1 3 2\n1 1 1\n1 -1 1\n2 0 -1\n";
    const S4: &str = "5 24
24 4 8 3 4
1 6 3 8 6
1 1 1 1 1
1 -1 1 1 -1
2 0 2 -1 0
3 1 -1 0 -1
3 -1 -1 0 1
";

    fn rep(v: &[i64]) -> Representation {
        Representation::from(v.to_vec())
    }

    #[rstest(text, case(C2), case(S3), case(S4))]
    fn orthogonality(text: &str) {
        let table: CharacterTable = text.parse().unwrap();
        for i in 0..table.classes() {
            for j in 0..table.classes() {
                let product = table.inner_product_checked(table.row(i), table.row(j)).unwrap();
                assert!(product.is_integral());
                assert_eq!(product.quotient(), i64::from(i == j), "<chi_{i}, chi_{j}>");
            }
        }
    }

    #[rstest(text, case(C2), case(S3), case(S4))]
    fn fusion_symmetric(text: &str) {
        let table: CharacterTable = text.parse().unwrap();
        for i in 0..table.classes() {
            for j in 0..table.classes() {
                assert_eq!(table.fusion(i, j), table.fusion(j, i));
            }
            assert_eq!(table.fusion(0, i), &table.unit_vector(i));
        }
    }

    #[test]
    fn s4_fusion() {
        let table: CharacterTable = S4.parse().unwrap();
        assert_eq!(table.classes(), 5);
        assert_eq!(table.size(), 24);
        // sign (x) sign = trivial
        assert_eq!(table.fusion(1, 1).as_slice(), &[1, 0, 0, 0, 0]);
        // V (x) V = 1 + W + V + V'
        assert_eq!(table.fusion(3, 3).as_slice(), &[1, 0, 1, 1, 1]);
        assert_eq!(table.fusion(1, 3).as_slice(), &[0, 0, 0, 0, 1]);
        assert_eq!(table.fusion(2, 2).as_slice(), &[1, 1, 1, 0, 0]);
    }

    #[test]
    fn multiply_virtual() {
        let table: CharacterTable = S3.parse().unwrap();
        // (1 - sign)(1 + sign) = 1 - sign^2 = 0
        let a = rep(&[1, -1, 0]);
        let b = rep(&[1, 1, 0]);
        assert!(table.multiply(&a, &b).unwrap().is_zero());
        // std^2 = 1 + sign + std
        let std = table.unit_vector(2);
        assert_eq!(table.multiply(&std, &std).unwrap().as_slice(), &[1, 1, 1]);
        assert_eq!(
            table.multiply(&rep(&[2, 0, 1]), &rep(&[0, 1, -1])).unwrap().as_slice(),
            &[-1, 1, -2]
        );
    }

    #[test]
    fn characters_round_trip() {
        let table: CharacterTable = S4.parse().unwrap();
        let v = rep(&[2, 0, 1, -1, 3]);
        let chi = table.to_character(&v).unwrap();
        assert_eq!(chi.as_slice(), &[2 + 2 - 3 + 9, 2 - 1 - 3, 2 + 2 + 1 - 3, 2 - 1, 2 + 1 + 3]);
        assert_eq!(table.decompose(&chi).unwrap(), v);
        assert_eq!(table.dimension(&v).unwrap(), 10);
    }

    #[test]
    fn non_integral_warn() {
        let table: CharacterTable = S4.parse().unwrap();
        let delta = [1, 0, 0, 0, 0];
        let product = table.inner_product_checked(&delta, table.row(0)).unwrap();
        assert_eq!(product.numerator, 1);
        assert!(!product.is_integral());
        assert_eq!(table.inner_product(&delta, table.row(0)).unwrap(), 0);
        // Floored, not truncated towards zero
        assert_eq!(table.inner_product(&[-1, 0, 0, 0, 0], table.row(0)).unwrap(), -1);
    }

    #[test]
    fn non_integral_strict() {
        let table = CharacterTable::parse(S4, IntegralityPolicy::Strict).unwrap();
        assert_eq!(table.policy(), IntegralityPolicy::Strict);
        assert_eq!(
            table.decompose(&[1, 0, 0, 0, 0]),
            Err(RingError::NonIntegralInnerProduct {
                numerator: 1,
                size: 24
            })
        );
    }

    #[test]
    fn strict_rejects_fake_table() {
        // Not a character table: rows are not orthonormal, so some tensor products decompose
        // non-integrally.
        let fake = "2 2\n2 2\n1 1\n1 1\n1 0\n";
        assert!(matches!(
            CharacterTable::parse(fake, IntegralityPolicy::Strict),
            Err(RingError::NonIntegralInnerProduct { .. })
        ));
        assert!(CharacterTable::parse(fake, IntegralityPolicy::Warn).is_ok());
    }

    #[test]
    fn inconsistent_sizes() {
        let err = "2 3\n2 2\n1 1\n1 1\n1 -1\n".parse::<CharacterTable>().unwrap_err();
        assert!(matches!(err, RingError::MalformedTable { line: 3, .. }));
        let err = "2 2\n2 1\n1 1\n1 1\n1 -1\n".parse::<CharacterTable>().unwrap_err();
        assert!(matches!(err, RingError::MalformedTable { line: 2, .. }));
    }

    #[rstest(size, class_size, case(0, 0), case(-2, -2))]
    fn non_positive_order(size: i64, class_size: i64) {
        let err = CharacterTable::from_parts(
            size,
            vec![1],
            vec![class_size],
            vec![vec![1]],
            IntegralityPolicy::Warn,
        )
        .unwrap_err();
        assert!(matches!(err, RingError::MalformedTable { line: 1, .. }), "{err}");
    }

    #[test]
    fn overflow() {
        let table: CharacterTable = C2.parse().unwrap();
        let big = rep(&[i64::MAX, 0]);
        assert_eq!(table.multiply(&big, &rep(&[2, 0])), Err(RingError::Overflow));
        assert_eq!(table.add(&big, &big), Err(RingError::Overflow));
        assert_eq!(
            table.inner_product_checked(&[i64::MAX, 0], &[2, 0]),
            Err(RingError::Overflow)
        );
    }

    #[test]
    fn length_mismatch() {
        let table: CharacterTable = S3.parse().unwrap();
        assert_eq!(
            table.multiply(&rep(&[1, 0]), &rep(&[1, 0, 0])),
            Err(RingError::LengthMismatch {
                expected: 3,
                found: 2
            })
        );
    }

    fn arb_rep(classes: usize) -> impl Strategy<Value = Representation> {
        prop::collection::vec(-3..4i64, classes).prop_map(Representation::from)
    }

    proptest! {
        #[test]
        fn ring_laws(a in arb_rep(5), b in arb_rep(5), c in arb_rep(5)) {
            let table: CharacterTable = S4.parse().unwrap();
            let ab = table.multiply(&a, &b).unwrap();
            prop_assert_eq!(&ab, &table.multiply(&b, &a).unwrap());
            prop_assert_eq!(
                table.multiply(&ab, &c).unwrap(),
                table.multiply(&a, &table.multiply(&b, &c).unwrap()).unwrap()
            );
            let sum = table.add(&b, &c).unwrap();
            prop_assert_eq!(
                table.multiply(&a, &sum).unwrap(),
                table.add(&ab, &table.multiply(&a, &c).unwrap()).unwrap()
            );
        }

        #[test]
        fn characters_are_multiplicative(a in arb_rep(5), b in arb_rep(5)) {
            let table: CharacterTable = S4.parse().unwrap();
            let chi = table.to_character(&table.multiply(&a, &b).unwrap()).unwrap();
            let product = table
                .to_character(&a)
                .unwrap()
                .checked_mul(&table.to_character(&b).unwrap())
                .unwrap();
            prop_assert_eq!(&chi, &product);
            prop_assert_eq!(table.decompose(&chi).unwrap(), table.multiply(&a, &b).unwrap());
        }
    }

    #[test]
    fn invariant_takes_trivial_coefficient() {
        let table: CharacterTable = S3.parse().unwrap();
        let a = rep(&[2, 1, 0]);
        let b = rep(&[0, 1, 1]);
        let invariants = table.invariant([((0, 0), &a), ((2, 1), &b)]).unwrap();
        assert_eq!(invariants.into_iter().collect::<Vec<_>>(), vec![((0, 0), 2), ((2, 1), 0)]);
    }

    #[test]
    fn invariant_checks_lengths() {
        let table: CharacterTable = S3.parse().unwrap();
        let empty = Representation::default();
        assert_eq!(
            table.invariant([((0, 0), &empty)]),
            Err(RingError::LengthMismatch {
                expected: 3,
                found: 0
            })
        );
    }
}
