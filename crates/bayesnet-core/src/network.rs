use bayesnet_error::{bayes_bail, BayesError, BayesResult};

use crate::domain::Domain;
use crate::table::Table;
use crate::variable::Variable;

/// A naive, unordered collection of factors: the correctness oracle this
/// crate's tests check the junction-tree engine against. Every operation
/// here multiplies and marginalizes in the most direct possible way; none
/// of it scales past toy networks, which is the point.
#[derive(Clone, Debug, Default)]
pub struct Network {
    tables: Vec<Table>,
}

impl Network {
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }

    pub fn add_table(&mut self, table: Table) {
        self.tables.push(table);
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// The union of every table's domain, in first-seen order across the
    /// tables as they were added.
    pub fn domain(&self) -> BayesResult<Domain> {
        let mut iter = self.tables.iter();
        let first = iter.next().ok_or(BayesError::EmptyDomain)?;
        let mut domain = first.domain().clone();
        for t in iter {
            domain = domain.union(t.domain());
        }
        Ok(domain)
    }

    /// Multiplies together every table that mentions `variable`, sums it
    /// out of the product, and returns a new network with those tables
    /// replaced by the single result.
    pub fn marginalize(&self, variable: &Variable) -> BayesResult<Network> {
        let mut kept = Vec::new();
        let mut involved = Vec::new();
        for t in &self.tables {
            if t.domain().contains(variable) {
                involved.push(t.clone());
            } else {
                kept.push(t.clone());
            }
        }
        if involved.is_empty() {
            bayes_bail!(UnknownVariable: "{}", variable.symbol());
        }
        let mut product = involved[0].clone();
        for t in &involved[1..] {
            product = (&product * t)?;
        }
        kept.push(product.marginalize(variable)?);
        Ok(Network { tables: kept })
    }

    /// The marginal probability table of a single variable, computed by
    /// marginalizing out every other variable in the network's domain.
    pub fn marginal(&self, variable: &Variable) -> BayesResult<Table> {
        let domain = self.domain()?;
        let mut network = self.clone();
        for other in domain.iter() {
            if other != variable {
                network = network.marginalize(other)?;
            }
        }
        let mut iter = network.tables.iter();
        let first = iter.next().ok_or(BayesError::EmptyDomain)?;
        let mut result = first.clone();
        for t in iter {
            result = (&result * t)?;
        }
        Ok(result)
    }

    /// The marginal probability tables of every variable in the network's
    /// domain, computed by recursively bisecting the domain and
    /// marginalizing each half out of a cloned network, which amortizes the
    /// duplicate marginalization work that calling [`Network::marginal`]
    /// once per variable would otherwise repeat.
    pub fn marginals(&self) -> BayesResult<Vec<Table>> {
        let domain = self.domain()?;
        let n = domain.len();
        if n > 1 {
            let half = n / 2;
            let vars = domain.variables();
            let halves = [vars[half..].to_vec(), vars[..half].to_vec()];
            let mut marginals = Vec::new();
            for to_marginalize in halves {
                let mut network = self.clone();
                for v in &to_marginalize {
                    network = network.marginalize(v)?;
                }
                marginals.extend(network.marginals()?);
            }
            Ok(marginals)
        } else {
            Ok(vec![self.marginal(&domain[0])?])
        }
    }
}
