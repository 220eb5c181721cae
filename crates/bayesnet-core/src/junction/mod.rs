//! Junction-tree compilation and the collect/distribute message-passing
//! schedule that turns a compiled tree into exact marginals.

pub mod clique;
mod compile;
mod message;

pub use clique::Clique;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use bayesnet_error::BayesResult;

use crate::network::Network;
use crate::table::Table;
use crate::variable::Variable;

/// A compiled, filled junction tree: ready to answer `marginals()` for
/// every variable of the network it was built from.
///
/// Compilation (simplicial elimination with fill-ins) and filling
/// (collect + distribute) both happen inside [`JunctionTree::compile`];
/// [`JunctionTree::fill`] is exposed separately only because the message
/// caches are, by design, the one piece of this engine that mutation
/// touches (see `fill`'s own doc).
#[derive(Clone, Debug)]
pub struct JunctionTree {
    cliques: Vec<Clique>,
    subgraph_roots: Vec<Variable>,
    variables: Vec<Variable>,
    normalization: f64,
}

impl JunctionTree {
    pub fn compile(network: &Network) -> BayesResult<Self> {
        let compiled = compile::build(network)?;
        let variables = network.domain()?.variables().to_vec();
        let mut tree = Self {
            cliques: compiled.cliques,
            subgraph_roots: compiled.subgraph_roots,
            variables,
            normalization: 1.0,
        };
        tree.fill()?;
        Ok(tree)
    }

    /// Runs collect then distribute over the tree's cliques, then derives
    /// the shared normalization constant from one representative variable
    /// per connected subgraph. This is the one method on `JunctionTree`
    /// that mutates the tree's own message caches; every other method only
    /// reads them.
    pub fn fill(&mut self) -> BayesResult<()> {
        message::fill(&mut self.cliques)?;
        let mut z = 1.0;
        for root_var in &self.subgraph_roots {
            let m = message::extract_marginal(&self.cliques, root_var)?;
            z *= m.normalization();
        }
        self.normalization = z;
        Ok(())
    }

    pub fn cliques(&self) -> &[Clique] {
        &self.cliques
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// The marginal likelihood of the evidence baked into the network this
    /// tree was compiled from: the product of every connected subgraph's
    /// normalization constant.
    pub fn normalization(&self) -> f64 {
        self.normalization
    }

    /// The marginal probability table of every variable in the network's
    /// domain, each stamped with the tree's shared normalization constant.
    pub fn marginals(&self) -> BayesResult<Vec<Table>> {
        self.variables
            .iter()
            .map(|v| {
                message::extract_marginal(&self.cliques, v)
                    .map(|m| m.with_normalization(self.normalization))
            })
            .collect()
    }

    pub fn marginal(&self, variable: &Variable) -> BayesResult<Table> {
        message::extract_marginal(&self.cliques, variable)
            .map(|m| m.with_normalization(self.normalization))
    }

    pub fn summary(&self) -> Summary {
        let max_clique_width = self
            .cliques
            .iter()
            .map(|c| c.variables().len())
            .max()
            .unwrap_or(0);
        Summary {
            clique_count: self.cliques.len(),
            max_clique_width,
            treewidth: max_clique_width.saturating_sub(1),
        }
    }
}

/// Read-only diagnostics about a compiled junction tree, for observability
/// rather than behavior.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Summary {
    pub clique_count: usize,
    pub max_clique_width: usize,
    pub treewidth: usize,
}

#[cfg(feature = "serde")]
impl Summary {
    /// Renders the summary as a JSON string, for logging or snapshotting a
    /// compiled tree's shape without depending on the `serde` feature being
    /// mandatory for ordinary inference use.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
