//! Fixed input data for the Weyl group of E6. Indices refer to the irreducibles in the order of the
//! bundled `e6` character table, which has 25 classes.

use repring::{CharacterTable, Representation, Result, RingError};

use crate::graded::BigradedModule;

pub const CLASSES: usize = 25;

#[rustfmt::skip]
const DEGREE_THREE: [i64; CLASSES] =
    [0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 0, 1, 0];
#[rustfmt::skip]
const DEGREE_FOUR: [i64; CLASSES] =
    [0, 0, 1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1, 0, 0, 1, 0, 0, 1, 1];

fn check(table: &CharacterTable) -> Result<()> {
    if table.classes() == CLASSES {
        Ok(())
    } else {
        Err(RingError::IncompatibleTable {
            required: CLASSES,
            classes: table.classes(),
        })
    }
}

/// The cohomology of the moduli space, in bidegrees `(d, d)` for `d = 0, ..., 4`.
pub fn moduli_space(table: &CharacterTable) -> Result<BigradedModule> {
    check(table)?;
    Ok(BigradedModule::from_pieces([
        ((0, 0), table.trivial()),
        ((1, 1), table.unit_vector(7)),
        ((2, 2), table.unit_vector(6)),
        ((3, 3), Representation::from(DEGREE_THREE.to_vec())),
        ((4, 4), Representation::from(DEGREE_FOUR.to_vec())),
    ]))
}

/// The classes `1 + t^{3,2}`, `1 + t^{5,3}` and `1 + t^{7,4}` of an exterior algebra on
/// invariant generators of odd degree.
pub fn exterior_factors(table: &CharacterTable) -> [BigradedModule; 3] {
    [(3, 2), (5, 3), (7, 4)].map(|generator| {
        BigradedModule::from_pieces([((0, 0), table.trivial()), (generator, table.trivial())])
    })
}

/// One copy of the fiber: the trivial representation in degrees 0 and 4 and the trivial plus the
/// first non-trivial irreducible in degree 2. Works for any table with at least two classes.
pub fn fiber(table: &CharacterTable) -> Result<BigradedModule> {
    if table.classes() < 2 {
        return Err(RingError::IncompatibleTable {
            required: 2,
            classes: table.classes(),
        });
    }
    let middle = table.add(&table.trivial(), &table.unit_vector(1))?;
    Ok(BigradedModule::from_pieces([
        ((0, 0), table.trivial()),
        ((2, 1), middle),
        ((4, 2), table.trivial()),
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_small_tables() {
        let c2: CharacterTable = "2 2\n2 2\n1 1\n1 1\n1 -1\n".parse().unwrap();
        assert_eq!(
            moduli_space(&c2),
            Err(RingError::IncompatibleTable {
                required: 25,
                classes: 2
            })
        );
        assert_eq!(fiber(&c2).unwrap().len(), 3);

        let trivial_group: CharacterTable = "1 1\n1\n1\n1\n".parse().unwrap();
        assert!(fiber(&trivial_group).is_err());
    }

    #[test]
    fn exterior_factor_grades() {
        let c2: CharacterTable = "2 2\n2 2\n1 1\n1 1\n1 -1\n".parse().unwrap();
        let factors = exterior_factors(&c2);
        assert_eq!(factors[1].get((5, 3)), Some(&c2.trivial()));
        assert!(factors.iter().all(|f| f.len() == 2));
    }
}
