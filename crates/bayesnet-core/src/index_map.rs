use bayesnet_error::{BayesError, BayesResult};

use crate::domain::Domain;

/// A flat lookup table mapping each row-major index of a `full` domain to
/// the row-major index of the corresponding assignment within a `sub`
/// domain (`sub` must be a subset of `full`).
///
/// `map(sub, full)[i]` is the same joint assignment as `full`'s index `i`,
/// restricted to `sub`'s variables and re-encoded using `sub`'s own axis
/// order. This is the workhorse behind factor product and marginalization:
/// it lets both operations walk a table's flat storage directly instead of
/// materializing an intermediate array shaped like the union of the
/// operands' domains.
#[derive(Clone, Debug)]
pub struct IndexMap(Vec<usize>);

impl IndexMap {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }
}

impl std::ops::Index<usize> for IndexMap {
    type Output = usize;
    fn index(&self, i: usize) -> &usize {
        &self.0[i]
    }
}

/// Builds the index map from `sub` into `full`. `sub` must be a subset of
/// `full`; every other variable of `full` is free (summed or broadcast over
/// by the caller).
pub fn map(sub: &Domain, full: &Domain) -> BayesResult<IndexMap> {
    if !sub.is_subset_of(full) {
        let missing = sub
            .iter()
            .find(|v| !full.contains(v))
            .map(|v| v.symbol().to_string())
            .unwrap_or_default();
        return Err(BayesError::UnknownVariable {
            symbol: missing.into(),
        });
    }

    let full_dims = full.cardinalities();
    let full_strides = full.strides();
    let sub_strides = sub.strides();
    let n_full = full.len();

    // Position within `full` of each of `sub`'s variables, in `sub`'s order.
    let positions: Vec<usize> = sub
        .iter()
        .map(|v| full.position(v).expect("checked subset above"))
        .collect();

    let mut out = vec![0usize; full.size()];
    let mut assignment = vec![0usize; n_full];
    for (flat, slot) in out.iter_mut().enumerate() {
        let mut rem = flat;
        for axis in 0..n_full {
            assignment[axis] = rem / full_strides[axis] % full_dims[axis];
        }
        let mut idx = 0usize;
        for (j, &pos) in positions.iter().enumerate() {
            idx += assignment[pos] * sub_strides[j];
        }
        *slot = idx;
    }

    Ok(IndexMap(out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variable::Variable;

    // These variables alias across calls by symbol only for test readability;
    // `Domain`/`map` never compare by symbol, so each helper call below
    // re-derives domains from the same variable handles to stay consistent.
    struct Vars {
        a: Variable,
        b: Variable,
        c: Variable,
        d: Variable,
    }

    fn vars() -> Vars {
        Vars {
            a: Variable::binary("a"),
            b: Variable::binary("b"),
            c: Variable::binary("c"),
            d: Variable::binary("d"),
        }
    }

    #[test]
    fn identity_map() {
        let v = vars();
        let ab = Domain::new([v.a.clone(), v.b.clone()]).unwrap();
        let m = map(&ab, &ab).unwrap();
        assert_eq!(m.as_slice(), &[0, 1, 2, 3]);
    }

    #[test]
    fn single_variable_broadcast() {
        let v = vars();
        let a = Domain::new([v.a.clone()]).unwrap();
        let ab = Domain::new([v.a.clone(), v.b.clone()]).unwrap();
        let m = map(&a, &ab).unwrap();
        assert_eq!(m.as_slice(), &[0, 0, 1, 1]);
    }

    #[test]
    fn reordered_three_variables() {
        let v = vars();
        let bca = Domain::new([v.b.clone(), v.c.clone(), v.a.clone()]).unwrap();
        let abc = Domain::new([v.a.clone(), v.b.clone(), v.c.clone()]).unwrap();
        let m = map(&bca, &abc).unwrap();
        assert_eq!(m.as_slice(), &[0, 2, 4, 6, 1, 3, 5, 7]);
    }

    #[test]
    fn two_of_four_variables() {
        let v = vars();
        let da = Domain::new([v.d.clone(), v.a.clone()]).unwrap();
        let abcd = Domain::new([v.a.clone(), v.b.clone(), v.c.clone(), v.d.clone()]).unwrap();
        let m = map(&da, &abcd).unwrap();
        assert_eq!(
            m.as_slice(),
            &[0, 2, 0, 2, 0, 2, 0, 2, 1, 3, 1, 3, 1, 3, 1, 3]
        );
    }

    #[test]
    fn non_subset_is_rejected() {
        let v = vars();
        let a = Domain::new([v.a.clone()]).unwrap();
        let bc = Domain::new([v.b.clone(), v.c.clone()]).unwrap();
        assert!(map(&a, &bc).is_err());
    }

    #[test]
    fn non_binary_cardinalities() {
        let x = Variable::new("x", 3);
        let y = Variable::new("y", 2);
        let xy = Domain::new([x.clone(), y.clone()]).unwrap();
        let x_only = Domain::new([x]).unwrap();
        // xy has 6 states: (x,y) in row-major order x-major, y-minor.
        let m = map(&x_only, &xy).unwrap();
        assert_eq!(m.as_slice(), &[0, 0, 1, 1, 2, 2]);
        let _ = y;
    }
}
