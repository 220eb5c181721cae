//! Factor algebra: table construction plus the two operations (product,
//! marginalize) that combine and reduce them.

pub mod marginal;
pub mod product;

use std::cell::OnceCell;

use bayesnet_error::BayesResult;

use crate::table::Table;
use crate::variable::Variable;

/// A lazily-evaluated factor expression tree.
///
/// This is the Rust-native shape of what the source material modeled as a
/// small dataflow graph of dirty-flagged nodes: here each node is an owned
/// expression, evaluated once and cached in a [`OnceCell`] rather than
/// tracked with a mutable `dirty` flag, since a `Factor` expression is built
/// once and then forced at most a handful of times (assigning clique tables
/// during junction-tree compilation) rather than mutated in place.
pub enum Factor {
    Leaf(Table),
    Product(Box<Factor>, Box<Factor>, OnceCell<Table>),
    Marginal(Box<Factor>, Variable, OnceCell<Table>),
}

impl Factor {
    pub fn leaf(table: Table) -> Self {
        Factor::Leaf(table)
    }

    pub fn product(a: Factor, b: Factor) -> Self {
        Factor::Product(Box::new(a), Box::new(b), OnceCell::new())
    }

    pub fn marginalize(a: Factor, variable: Variable) -> Self {
        Factor::Marginal(Box::new(a), variable, OnceCell::new())
    }

    /// Forces this expression down to a concrete [`Table`], computing and
    /// caching each intermediate node's value the first time it is
    /// visited.
    pub fn evaluate(&self) -> BayesResult<Table> {
        match self {
            Factor::Leaf(t) => Ok(t.clone()),
            Factor::Product(a, b, cache) => {
                if let Some(t) = cache.get() {
                    return Ok(t.clone());
                }
                let ta = a.evaluate()?;
                let tb = b.evaluate()?;
                let result = product::product(&ta, &tb)?;
                let _ = cache.set(result.clone());
                Ok(result)
            }
            Factor::Marginal(a, variable, cache) => {
                if let Some(t) = cache.get() {
                    return Ok(t.clone());
                }
                let ta = a.evaluate()?;
                let result = marginal::marginalize(&ta, variable)?;
                let _ = cache.set(result.clone());
                Ok(result)
            }
        }
    }
}
