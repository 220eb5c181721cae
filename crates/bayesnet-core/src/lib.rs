//! Exact probabilistic inference over discrete Bayesian networks.
//!
//! Three layers, bottom to top:
//!
//! - Factor algebra ([`table`], [`factor`], [`index_map`]): dense row-major
//!   probability tables and the product/marginalize operations that combine
//!   and reduce them.
//! - Junction-tree compilation ([`graph`], [`junction`]): turns a
//!   [`network::Network`]'s tables into a tree of cliques via simplicial
//!   elimination with a minimum-fill-in heuristic.
//! - Collect/distribute message passing ([`junction::message`], private):
//!   fills a compiled tree so every variable's marginal can be read off in
//!   time proportional to its host clique rather than the whole network.
//!
//! [`network::Network`] is kept alongside the fast path as a naive,
//! brute-force reference engine: slow, but a straightforward enough
//! implementation of the same algebra to serve as a correctness oracle in
//! tests.

pub mod domain;
pub mod factor;
pub mod index_map;
pub mod junction;
pub mod network;
pub mod table;
pub mod variable;

pub use domain::Domain;
pub use factor::Factor;
pub use junction::{Clique, JunctionTree, Summary};
pub use network::Network;
pub use table::Table;
pub use variable::Variable;

pub use bayesnet_error::{BayesError, BayesResult};
