//! The undirected interaction graph a network's tables induce over its
//! variables: one node per variable, one edge per pair of variables that
//! co-occur in some table's domain. The junction-tree compiler consumes
//! this structure and destroys it via repeated elimination, which is why
//! every mutating method here takes `&mut self`.

mod node;

use node::GraphNode;

use crate::table::Table;
use crate::variable::Variable;

#[derive(Clone, Debug, Default)]
pub struct DomainGraph {
    nodes: Vec<Option<GraphNode>>,
}

impl DomainGraph {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Builds the interaction graph of a set of tables: one node per
    /// variable (in first-seen order across the tables, in the order
    /// given), with every pair of variables sharing a table's domain
    /// linked.
    pub fn from_tables(tables: &[Table]) -> Self {
        let mut graph = Self::new();
        for table in tables {
            let ids: Vec<usize> = table
                .domain()
                .iter()
                .map(|v| graph.id_of_or_insert(v.clone()))
                .collect();
            for i in 0..ids.len() {
                for j in (i + 1)..ids.len() {
                    graph.link(ids[i], ids[j]);
                }
            }
        }
        graph
    }

    fn id_of_or_insert(&mut self, variable: Variable) -> usize {
        if let Some(id) = self.id_of(&variable) {
            return id;
        }
        self.nodes.push(Some(GraphNode::new(variable)));
        self.nodes.len() - 1
    }

    pub fn id_of(&self, variable: &Variable) -> Option<usize> {
        self.nodes.iter().position(|n| match n {
            Some(node) => &node.variable == variable,
            None => false,
        })
    }

    fn link(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.nodes[a].as_mut().unwrap().neighbors.insert(b);
        self.nodes[b].as_mut().unwrap().neighbors.insert(a);
    }

    pub fn variable(&self, id: usize) -> &Variable {
        &self.nodes[id].as_ref().expect("node id is alive").variable
    }

    /// Neighbor ids in insertion order is not guaranteed; only membership
    /// matters for every algorithm that consumes this.
    pub fn neighbors(&self, id: usize) -> impl Iterator<Item = usize> + '_ {
        self.nodes[id]
            .as_ref()
            .expect("node id is alive")
            .neighbors
            .iter()
            .copied()
    }

    pub fn degree(&self, id: usize) -> usize {
        self.nodes[id].as_ref().expect("node id is alive").neighbors.len()
    }

    /// Ids of currently-alive nodes, in the order they were first inserted.
    pub fn ids(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.nodes.len()).filter(move |&i| self.nodes[i].is_some())
    }

    pub fn alive_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.alive_count() == 0
    }

    pub fn is_isolated(&self, id: usize) -> bool {
        self.degree(id) == 0
    }

    /// A node is simplicial if its open neighborhood forms a clique: every
    /// pair of its neighbors is itself linked. Isolated nodes are excluded
    /// here: they are handled separately, before simplicial elimination
    /// begins.
    pub fn is_simplicial(&self, id: usize) -> bool {
        let neighbors: Vec<usize> = self.neighbors(id).collect();
        if neighbors.is_empty() {
            return false;
        }
        for i in 0..neighbors.len() {
            for j in (i + 1)..neighbors.len() {
                if !self.linked(neighbors[i], neighbors[j]) {
                    return false;
                }
            }
        }
        true
    }

    fn linked(&self, a: usize, b: usize) -> bool {
        self.nodes[a]
            .as_ref()
            .expect("node id is alive")
            .neighbors
            .contains(&b)
    }

    /// The first isolated node, in insertion order, if any remain.
    pub fn isolated_node(&self) -> Option<usize> {
        self.ids().find(|&id| self.is_isolated(id))
    }

    /// The first simplicial, non-isolated node, in insertion order, if any.
    pub fn simplicial_node(&self) -> Option<usize> {
        self.ids().find(|&id| self.is_simplicial(id))
    }

    /// Among all currently-alive non-isolated nodes, the one requiring the
    /// fewest fill-in edges to become simplicial. Ties are broken by
    /// insertion order: the first node encountered with the minimal
    /// count wins, which is the deterministic rule this compiler commits
    /// to (the source material's own tie-breaking was itself an artifact
    /// of its node iteration order, so any fixed rule is a faithful choice).
    pub fn minimal_fillin_node(&self) -> Option<usize> {
        let mut best: Option<(usize, usize)> = None; // (id, fill-in count)
        for id in self.ids() {
            if self.is_isolated(id) {
                continue;
            }
            let count = self.fillin_count(id);
            match best {
                Some((_, best_count)) if best_count <= count => {}
                _ => best = Some((id, count)),
            }
        }
        best.map(|(id, _)| id)
    }

    fn fillin_count(&self, id: usize) -> usize {
        let neighbors: Vec<usize> = self.neighbors(id).collect();
        let mut missing = 0;
        for i in 0..neighbors.len() {
            for j in (i + 1)..neighbors.len() {
                if !self.linked(neighbors[i], neighbors[j]) {
                    missing += 1;
                }
            }
        }
        missing
    }

    /// Links every pair of `id`'s neighbors that are not already linked,
    /// making `id` simplicial.
    pub fn make_simplicial(&mut self, id: usize) {
        let neighbors: Vec<usize> = self.neighbors(id).collect();
        for i in 0..neighbors.len() {
            for j in (i + 1)..neighbors.len() {
                self.link(neighbors[i], neighbors[j]);
            }
        }
    }

    /// Removes a node from the graph, dropping it from every remaining
    /// neighbor's adjacency set.
    pub fn remove(&mut self, id: usize) {
        let neighbors: Vec<usize> = self.neighbors(id).collect();
        for n in neighbors {
            self.nodes[n].as_mut().unwrap().neighbors.remove(&id);
        }
        self.nodes[id] = None;
    }
}
