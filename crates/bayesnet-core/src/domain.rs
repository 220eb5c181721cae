use std::cmp::Ordering;

use bayesnet_error::{BayesError, BayesResult};

use crate::variable::Variable;

/// An ordered, duplicate-free tuple of variables.
///
/// Equality and subset/superset comparisons treat a `Domain` as a *set*: two
/// domains with the same variables in different orders are equal. The stored
/// order is what determines the row-major layout of any `Table` built over
/// this domain (last variable varies fastest), so it is preserved verbatim
/// by every operation that doesn't explicitly reorder.
#[derive(Clone, Debug)]
pub struct Domain {
    vars: Vec<Variable>,
    dims: Vec<usize>,
    strides: Vec<usize>,
    size: usize,
}

impl Domain {
    pub fn new(vars: impl IntoIterator<Item = Variable>) -> BayesResult<Self> {
        let vars: Vec<Variable> = vars.into_iter().collect();
        if vars.is_empty() {
            return Err(BayesError::EmptyDomain);
        }
        for i in 0..vars.len() {
            for j in (i + 1)..vars.len() {
                if vars[i] == vars[j] {
                    return Err(BayesError::DuplicateVariable {
                        symbol: vars[i].symbol().to_string().into(),
                    });
                }
            }
        }
        let dims: Vec<usize> = vars.iter().map(Variable::cardinality).collect();
        let strides = row_major_strides(&dims);
        let size = dims.iter().product();
        Ok(Self {
            vars,
            dims,
            strides,
            size,
        })
    }

    pub fn single(var: Variable) -> Self {
        Self::new([var]).expect("a single-variable domain is never empty or duplicated")
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// A `Domain` always holds at least one variable.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cardinalities(&self) -> &[usize] {
        &self.dims
    }

    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    pub fn variables(&self) -> &[Variable] {
        &self.vars
    }

    pub fn contains(&self, v: &Variable) -> bool {
        self.vars.iter().any(|x| x == v)
    }

    pub fn position(&self, v: &Variable) -> Option<usize> {
        self.vars.iter().position(|x| x == v)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Variable> {
        self.vars.iter()
    }

    pub fn is_subset_of(&self, other: &Domain) -> bool {
        self.vars.iter().all(|v| other.contains(v))
    }

    pub fn is_superset_of(&self, other: &Domain) -> bool {
        other.is_subset_of(self)
    }

    /// Set union, preserving `self`'s order then appending `other`'s
    /// variables that are not already present.
    pub fn union(&self, other: &Domain) -> Domain {
        let mut vars = self.vars.clone();
        for v in other.iter() {
            if !self.contains(v) {
                vars.push(v.clone());
            }
        }
        Domain::new(vars).expect("union of two non-empty domains is never empty")
    }

    /// Removes a single variable from the domain, preserving relative order
    /// of the remainder.
    pub fn without(&self, v: &Variable) -> BayesResult<Domain> {
        if !self.contains(v) {
            return Err(BayesError::UnknownVariable {
                symbol: v.symbol().to_string().into(),
            });
        }
        let remaining: Vec<Variable> = self.vars.iter().filter(|x| *x != v).cloned().collect();
        if remaining.is_empty() {
            Err(BayesError::EmptyDomain)
        } else {
            Domain::new(remaining)
        }
    }
}

impl std::ops::Mul<&Domain> for &Domain {
    type Output = Domain;
    fn mul(self, rhs: &Domain) -> Domain {
        self.union(rhs)
    }
}

impl std::ops::Index<usize> for Domain {
    type Output = Variable;
    fn index(&self, i: usize) -> &Variable {
        &self.vars[i]
    }
}

impl<'a> IntoIterator for &'a Domain {
    type Item = &'a Variable;
    type IntoIter = std::slice::Iter<'a, Variable>;
    fn into_iter(self) -> Self::IntoIter {
        self.vars.iter()
    }
}

impl PartialEq for Domain {
    fn eq(&self, other: &Self) -> bool {
        self.vars.len() == other.vars.len() && self.is_subset_of(other)
    }
}

impl Eq for Domain {}

impl PartialOrd for Domain {
    /// Subset partial order: `self <= other` iff `self`'s variables are a
    /// subset of `other`'s. Consistent with `Eq` (equal sets compare equal).
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self == other {
            Some(Ordering::Equal)
        } else if self.is_subset_of(other) {
            Some(Ordering::Less)
        } else if self.is_superset_of(other) {
            Some(Ordering::Greater)
        } else {
            None
        }
    }
}

fn row_major_strides(dims: &[usize]) -> Vec<usize> {
    let n = dims.len();
    let mut strides = vec![1usize; n];
    for i in (0..n.saturating_sub(1)).rev() {
        strides[i] = strides[i + 1] * dims[i + 1];
    }
    strides
}
