use bayesnet_error::{bayes_bail, BayesResult};
use tracing::trace;

use crate::table::Table;

use super::clique::Clique;

/// Runs the collect pass (leaves towards the root) followed by the
/// distribute pass (root back out to the leaves), filling in every
/// non-root clique's `collect_msg` and `distribute_msg`.
///
/// Cliques are always created in an order where a parent's index exceeds
/// every one of its children's, since elimination only ever groups a
/// variable with neighbors already present in the graph. Collect can
/// therefore walk `cliques` in ascending index order and distribute in
/// descending order, each one pass-appropriate for a tree with that
/// invariant, without needing to first discover an explicit traversal
/// order.
pub(crate) fn fill(cliques: &mut [Clique]) -> BayesResult<()> {
    collect(cliques)?;
    distribute(cliques)?;
    Ok(())
}

fn collect(cliques: &mut [Clique]) -> BayesResult<()> {
    for k in 0..cliques.len() {
        let Some(separator) = cliques[k].separator.clone() else {
            continue;
        };
        let mut tables: Vec<Table> = cliques[k].tables.clone();
        for &child in &cliques[k].children {
            let msg = cliques[child]
                .collect_msg
                .clone()
                .expect("child processed before parent");
            tables.push(msg);
        }
        let psi = product_all(&tables)?;
        let msg = marginalize_down_to(&psi, &separator)?;
        trace!(clique = k, separator_size = separator.len(), "collect message");
        cliques[k].collect_msg = Some(msg);
    }
    Ok(())
}

fn distribute(cliques: &mut [Clique]) -> BayesResult<()> {
    for k in (0..cliques.len()).rev() {
        let mut bucket_tables: Vec<Table> = cliques[k].tables.clone();
        if let Some(from_parent) = cliques[k].distribute_msg.clone() {
            bucket_tables.push(from_parent);
        }

        let children = cliques[k].children.clone();
        for &child in &children {
            let mut tables = bucket_tables.clone();
            for &other in &children {
                if other != child {
                    let msg = cliques[other]
                        .collect_msg
                        .clone()
                        .expect("collect pass already ran");
                    tables.push(msg);
                }
            }
            let psi = product_all(&tables)?;
            let separator = cliques[child]
                .separator
                .clone()
                .expect("a clique with a parent has a separator");
            let msg = marginalize_down_to(&psi, &separator)?;
            trace!(clique = k, child, "distribute message");
            cliques[child].distribute_msg = Some(msg);
        }
    }
    Ok(())
}

fn product_all(tables: &[Table]) -> BayesResult<Table> {
    let mut iter = tables.iter();
    let mut result = iter
        .next()
        .expect("a clique always has at least one input table or message")
        .clone();
    for t in iter {
        result = (&result * t)?;
    }
    Ok(result)
}

fn marginalize_down_to(table: &Table, target: &crate::domain::Domain) -> BayesResult<Table> {
    let mut result = table.clone();
    let to_remove: Vec<_> = result
        .domain()
        .iter()
        .filter(|v| !target.contains(v))
        .cloned()
        .collect();
    for v in to_remove {
        result = result.marginalize(&v)?;
    }
    if result.values().iter().all(|&v| v == 0.0) {
        bayes_bail!(InconsistentEvidence: "message over domain of size {} is all zero", target.size());
    }
    Ok(result)
}

/// Extracts the marginal of `variable` from whichever clique contains it
/// (preferring the smallest, per the shared-minimality tie-break used
/// throughout this compiler): multiplies the clique's own tables with its
/// distribute message (if any) and every child's collect message, then
/// marginalizes out everything but `variable`.
pub(crate) fn extract_marginal(
    cliques: &[Clique],
    variable: &crate::variable::Variable,
) -> BayesResult<Table> {
    let host = cliques
        .iter()
        .filter(|c| c.variables().contains(variable))
        .min_by_key(|c| c.variables().len())
        .ok_or_else(|| {
            bayesnet_error::BayesError::UnknownVariable {
                symbol: variable.symbol().to_string().into(),
            }
        })?;

    let mut tables: Vec<Table> = host.tables.clone();
    if let Some(from_parent) = host.distribute_msg.clone() {
        tables.push(from_parent);
    }
    for &child in &host.children {
        tables.push(
            cliques[child]
                .collect_msg
                .clone()
                .expect("collect pass already ran"),
        );
    }

    let psi = product_all(&tables)?;
    let to_remove: Vec<_> = host
        .variables()
        .iter()
        .filter(|v| *v != variable)
        .cloned()
        .collect();
    let mut result = psi;
    for v in to_remove {
        result = result.marginalize(&v)?;
    }
    Ok(result)
}
