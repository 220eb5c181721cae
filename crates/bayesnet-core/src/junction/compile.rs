use std::collections::HashSet;

use bayesnet_error::BayesResult;
use tracing::debug;

use crate::domain::Domain;
use crate::graph::DomainGraph;
use crate::network::Network;
use crate::table::Table;
use crate::variable::Variable;

use super::clique::Clique;

pub(crate) struct Compiled {
    pub(crate) cliques: Vec<Clique>,
    pub(crate) subgraph_roots: Vec<Variable>,
}

/// Compiles a network's interaction graph into a junction tree's cliques via
/// simplicial elimination with a minimum-fill-in heuristic.
///
/// Isolated variables are peeled off first into their own singleton
/// cliques. The remaining graph is then eliminated one simplicial node
/// (adding fill-in edges when none exists) at a time; each elimination step
/// produces one clique, assigns it whichever input tables mention a
/// variable being removed, and computes the separator it shares with
/// whichever later clique will become its parent. A clique's separator is
/// `None` exactly when it is the root of its connected component.
pub(crate) fn build(network: &Network) -> BayesResult<Compiled> {
    let tables = network.tables().to_vec();
    let mut graph = DomainGraph::from_tables(&tables);
    let mut assigned = vec![false; tables.len()];
    let mut cliques: Vec<Clique> = Vec::new();
    let mut subgraph_roots: Vec<Variable> = Vec::new();

    while let Some(id) = graph.isolated_node() {
        let variable = graph.variable(id).clone();
        let mut clique = Clique::new(cliques.len(), Domain::single(variable.clone()));
        clique.tables = assign_tables(&tables, &mut assigned, &[variable.clone()]);
        debug!(variable = %variable, "isolated clique");
        cliques.push(clique);
        subgraph_roots.push(variable);
        graph.remove(id);
    }

    loop {
        if graph.is_empty() {
            break;
        }

        let simplicial = match graph.simplicial_node() {
            Some(id) => id,
            None => {
                let id = graph
                    .minimal_fillin_node()
                    .expect("non-empty graph with no simplicial node has a minimal-fillin node");
                graph.make_simplicial(id);
                id
            }
        };

        let mut family_ids: HashSet<usize> = graph.neighbors(simplicial).collect();
        family_ids.insert(simplicial);

        let remaining_before = graph.alive_count();

        let family_variables: Vec<Variable> =
            family_ids.iter().map(|&id| graph.variable(id).clone()).collect();
        let family_domain = Domain::new(family_variables)?;
        let mut clique = Clique::new(cliques.len(), family_domain);

        if family_ids.len() < remaining_before {
            let removable_ids: HashSet<usize> = family_ids
                .iter()
                .filter(|&&n| graph.neighbors(n).all(|nb| family_ids.contains(&nb)))
                .copied()
                .collect();
            let keep_ids: Vec<usize> = family_ids.difference(&removable_ids).copied().collect();

            if keep_ids.is_empty() {
                subgraph_roots.push(graph.variable(simplicial).clone());
            } else {
                let separator_vars: Vec<Variable> =
                    keep_ids.iter().map(|&id| graph.variable(id).clone()).collect();
                clique.separator = Some(Domain::new(separator_vars)?);
            }

            let removed_vars: Vec<Variable> =
                removable_ids.iter().map(|&id| graph.variable(id).clone()).collect();
            clique.tables = assign_tables(&tables, &mut assigned, &removed_vars);

            for id in removable_ids {
                graph.remove(id);
            }
        } else {
            subgraph_roots.push(graph.variable(simplicial).clone());
            clique.tables = assign_tables(&tables, &mut assigned, &family_variables);
            for id in family_ids.iter().copied().collect::<Vec<_>>() {
                graph.remove(id);
            }
        }

        debug!(
            variables = clique.variables().len(),
            separator = clique.separator.as_ref().map(Domain::len),
            "eliminated clique"
        );
        cliques.push(clique);

        if graph.is_empty() {
            break;
        }
    }

    link_cliques(&mut cliques)?;

    Ok(Compiled {
        cliques,
        subgraph_roots,
    })
}

/// Moves every not-yet-assigned table that mentions one of `variables` into
/// the returned list, marking it assigned.
fn assign_tables(tables: &[Table], assigned: &mut [bool], variables: &[Variable]) -> Vec<Table> {
    let mut out = Vec::new();
    for (idx, t) in tables.iter().enumerate() {
        if assigned[idx] {
            continue;
        }
        if variables.iter().any(|v| t.domain().contains(v)) {
            assigned[idx] = true;
            out.push(t.clone());
        }
    }
    out
}

/// Links every clique with a separator to the first later-created clique
/// whose variables bound that separator, establishing parent/child edges.
fn link_cliques(cliques: &mut [Clique]) -> BayesResult<()> {
    for k in 0..cliques.len() {
        let Some(separator) = cliques[k].separator.clone() else {
            continue;
        };
        let mut parent = None;
        for p in (k + 1)..cliques.len() {
            if separator.is_subset_of(cliques[p].variables()) {
                parent = Some(p);
                break;
            }
        }
        let Some(parent_id) = parent else {
            bayesnet_error::bayes_bail!(CompilationFailure: "no later clique bounds separator of size {}", separator.len());
        };
        cliques[k].parent = Some(parent_id);
        cliques[parent_id].children.push(k);
    }
    Ok(())
}
