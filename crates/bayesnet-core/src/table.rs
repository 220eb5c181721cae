use bayesnet_error::{bayes_bail, BayesError, BayesResult};

use crate::domain::Domain;
use crate::index_map;
use crate::variable::Variable;

/// A discrete factor over a `Domain`: a dense row-major array of
/// non-negative values plus a normalization scalar.
///
/// `values` always sums to 1 (within floating-point error); `normalization`
/// holds the scale factor such that `values[i] * normalization` recovers the
/// true, un-normalized factor value. The two default to carrying a table
/// that is *normalized*; [`Table::unnormalize`] collapses them back into a
/// single un-normalized array when a caller wants the true values directly.
#[derive(Clone, Debug)]
pub struct Table {
    domain: Domain,
    values: Vec<f64>,
    normalization: f64,
}

impl Table {
    /// Builds a table from raw (possibly un-normalized) values, normalizing
    /// them and recording the scale factor that was divided out.
    pub fn new(domain: Domain, values: Vec<f64>) -> BayesResult<Self> {
        if values.len() != domain.size() {
            return Err(BayesError::ShapeMismatch {
                expected: domain.size(),
                actual: values.len(),
            });
        }
        let z: f64 = values.iter().sum();
        if z == 0.0 {
            bayes_bail!(DegenerateFactor: "values for domain of size {} sum to zero", domain.size());
        }
        let normalized = values.iter().map(|v| v / z).collect();
        Ok(Self {
            domain,
            values: normalized,
            normalization: z,
        })
    }

    /// Builds a table from values that are already known to sum to ~1,
    /// carrying an explicit normalization scalar rather than recomputing
    /// one. Used by marginalization, where the output of summing out an
    /// axis of a normalized table is itself already normalized and the
    /// scale factor is inherited unchanged from the input.
    pub(crate) fn from_normalized(
        domain: Domain,
        values: Vec<f64>,
        normalization: f64,
    ) -> BayesResult<Self> {
        let sum: f64 = values.iter().sum();
        if sum == 0.0 {
            bayes_bail!(DegenerateFactor: "marginalized values for domain of size {} sum to zero", domain.size());
        }
        Ok(Self {
            domain,
            values,
            normalization,
        })
    }

    pub fn uniform(domain: Domain) -> Self {
        let size = domain.size();
        let z = size as f64;
        Self {
            values: vec![1.0 / z; size],
            domain,
            normalization: z,
        }
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn normalization(&self) -> f64 {
        self.normalization
    }

    /// Returns a copy of this table with the normalization scalar replaced,
    /// values unchanged. Used to stamp every marginal of a compiled junction
    /// tree with the tree's single shared normalization constant.
    pub fn with_normalization(&self, normalization: f64) -> Self {
        Self {
            domain: self.domain.clone(),
            values: self.values.clone(),
            normalization,
        }
    }

    /// Folds the normalization scalar into the values, returning a table
    /// whose `values` are the true factor values and whose normalization is
    /// 1.
    pub fn unnormalize(&self) -> Self {
        Self {
            domain: self.domain.clone(),
            values: self.values.iter().map(|v| v * self.normalization).collect(),
            normalization: 1.0,
        }
    }

    /// Re-derives the normalized form from the current values, recomputing
    /// the normalization scalar as their sum. A no-op (up to floating-point
    /// error) if `self` is already normalized.
    pub fn normalize(&self) -> BayesResult<Self> {
        Table::new(self.domain.clone(), self.values.clone())
    }

    /// Conditions on observed variable states, dropping the conditioned
    /// variables from the domain. Re-normalizes the result.
    pub fn restrict(&self, evidence: &[(Variable, usize)]) -> BayesResult<Self> {
        for (v, state) in evidence {
            if !self.domain.contains(v) {
                return Err(BayesError::UnknownVariable {
                    symbol: v.symbol().to_string().into(),
                });
            }
            if *state >= v.cardinality() {
                return Err(BayesError::InvalidEvidence {
                    variable: v.symbol().to_string().into(),
                    state: *state,
                    cardinality: v.cardinality(),
                });
            }
        }

        let mut remaining = self.domain.clone();
        for (v, _) in evidence {
            remaining = remaining.without(v)?;
        }

        let full_strides = self.domain.strides();
        let fixed: Vec<(usize, usize)> = evidence
            .iter()
            .map(|(v, state)| (self.domain.position(v).expect("checked above"), *state))
            .collect();

        let free_positions: Vec<usize> = remaining
            .iter()
            .map(|v| self.domain.position(v).expect("remaining is a subset"))
            .collect();
        let remaining_strides = remaining.strides();
        let remaining_dims = remaining.cardinalities();

        let mut values = vec![0.0f64; remaining.size()];
        for (j, slot) in values.iter_mut().enumerate() {
            let mut full_index = 0usize;
            for axis in 0..remaining.len() {
                let state = j / remaining_strides[axis] % remaining_dims[axis];
                full_index += state * full_strides[free_positions[axis]];
            }
            for &(pos, state) in &fixed {
                full_index += state * full_strides[pos];
            }
            *slot = self.values[full_index];
        }

        Table::new(remaining, values)
    }

    /// True if the domains agree as sets, the normalizations agree within
    /// `eps`, and every value (after remapping onto a common variable order)
    /// agrees within `eps`.
    pub fn approx_eq(&self, other: &Table, eps: f64) -> bool {
        if self.domain != other.domain {
            return false;
        }
        if (self.normalization - other.normalization).abs() > eps {
            return false;
        }
        let Ok(remap) = index_map::map(&self.domain, &other.domain) else {
            return false;
        };
        self.values
            .iter()
            .enumerate()
            .all(|(i, v)| (v - other.values[remap[i]]).abs() <= eps)
    }
}

impl std::ops::Mul<&Table> for &Table {
    type Output = BayesResult<Table>;

    fn mul(self, rhs: &Table) -> BayesResult<Table> {
        crate::factor::product::product(self, rhs)
    }
}

impl Table {
    /// Sums `variable` out of this table. See [`crate::factor::marginal::marginalize`].
    pub fn marginalize(&self, variable: &Variable) -> BayesResult<Table> {
        crate::factor::marginal::marginalize(self, variable)
    }
}
