//! Exact probabilistic inference over discrete Bayesian networks.
//!
//! This crate is a thin facade over [`bayesnet_core`] and [`bayesnet_error`]:
//! factor algebra, junction-tree compilation, and collect/distribute message
//! passing, behind a single dependency.

pub use bayesnet_core::*;
pub use bayesnet_error::{bayes_bail, bayes_err, ensure, BayesError, BayesResult, ResultExt};

/// Re-exports the handful of types most programs need: `Variable`,
/// `Domain`, `Table`, `Network`, `JunctionTree`, and the error types.
pub mod prelude {
    pub use crate::{
        BayesError, BayesResult, Domain, JunctionTree, Network, ResultExt, Table, Variable,
    };
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn pyramid_marginals_via_facade() {
        let a = Variable::binary("a");
        let b = Variable::binary("b");

        let mut net = Network::new();
        net.add_table(Table::new(Domain::single(a.clone()), vec![0.4, 0.6]).unwrap());
        net.add_table(
            Table::new(
                Domain::new([a.clone(), b.clone()]).unwrap(),
                vec![0.7, 0.3, 0.2, 0.8],
            )
            .unwrap(),
        );

        let tree = JunctionTree::compile(&net).unwrap();
        let marginals = tree.marginals().unwrap();
        assert_eq!(marginals.len(), 2);
    }
}
