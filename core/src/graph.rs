use std::collections::{BTreeSet, HashMap};

use crate::error::{Error, Result};
use crate::person::Person;

/// In-memory undirected graph: adjacency lists keyed by `Person`.
///
/// Every edge is stored in both endpoints' lists. `size` counts unordered
/// edges (one per friendship), `order` counts vertices. Self-edges and
/// duplicate edges are never stored.
#[derive(Debug, Clone)]
pub struct Graph {
    adjacency: HashMap<Person, Vec<Person>>,
    vertices: Vec<Person>,
    size: usize,
    order: usize,
}

impl Graph {
    pub fn new() -> Self {
        Self {
            adjacency: HashMap::new(),
            vertices: Vec::new(),
            size: 0,
            order: 0,
        }
    }

    /// Pre-allocate for a known number of vertices.
    pub fn with_capacity(node_count: usize) -> Self {
        Self {
            adjacency: HashMap::with_capacity(node_count),
            vertices: Vec::with_capacity(node_count),
            size: 0,
            order: 0,
        }
    }

    /// Insert a vertex with no edges. Adding an existing vertex is a no-op.
    pub fn add_node(&mut self, person: &Person) -> Result<()> {
        if person.is_unnamed() {
            return Err(Error::unnamed());
        }
        self.insert_vertex(person);
        Ok(())
    }

    /// Add an undirected edge, creating either endpoint if absent.
    ///
    /// `add_edge(a, a)` creates `a` if needed but never a self-edge, and an
    /// existing edge is left alone, so `size` grows by at most one.
    pub fn add_edge(&mut self, a: &Person, b: &Person) -> Result<()> {
        if a.is_unnamed() || b.is_unnamed() {
            return Err(Error::unnamed());
        }
        self.connect(a, b);
        Ok(())
    }

    /// Remove the edge between `a` and `b`.
    ///
    /// Both endpoints must exist. A missing edge between existing endpoints
    /// is a silent no-op.
    pub fn remove_edge(&mut self, a: &Person, b: &Person) -> Result<()> {
        for p in [a, b] {
            if !self.adjacency.contains_key(p.name()) {
                return Err(Error::not_in_network(p.name()));
            }
        }

        if !self.has_edge(a.name(), b.name()) {
            return Ok(());
        }
        if let Some(list) = self.adjacency.get_mut(a.name()) {
            list.retain(|n| n != b);
        }
        if let Some(list) = self.adjacency.get_mut(b.name()) {
            list.retain(|n| n != a);
        }
        self.size -= 1;
        Ok(())
    }

    /// Remove a vertex and every edge incident to it.
    ///
    /// A vertex of degree k lowers `size` by k and `order` by one.
    pub fn remove_node(&mut self, person: &Person) -> Result<()> {
        let friends = self
            .adjacency
            .remove(person.name())
            .ok_or_else(|| Error::not_in_network(person.name()))?;

        for friend in &friends {
            if let Some(list) = self.adjacency.get_mut(friend.name()) {
                list.retain(|n| n != person);
            }
            self.size -= 1;
        }

        self.vertices.retain(|v| v != person);
        self.order -= 1;
        Ok(())
    }

    /// Snapshot of a vertex's neighbors. Mutating the result does not touch the graph.
    pub fn neighbors(&self, person: &Person) -> Result<BTreeSet<Person>> {
        self.adjacency
            .get(person.name())
            .map(|list| list.iter().cloned().collect())
            .ok_or_else(|| Error::not_in_network(person.name()))
    }

    /// Look up a vertex by name.
    pub fn node(&self, name: &str) -> Result<Person> {
        self.adjacency
            .get_key_value(name)
            .map(|(p, _)| p.clone())
            .ok_or_else(|| Error::not_in_network(name))
    }

    /// Snapshot of every vertex, ordered by name.
    pub fn all_nodes(&self) -> BTreeSet<Person> {
        self.adjacency.keys().cloned().collect()
    }

    /// Vertices in insertion order.
    pub fn vertices(&self) -> &[Person] {
        &self.vertices
    }

    pub fn contains(&self, name: &str) -> bool {
        self.adjacency.contains_key(name)
    }

    pub fn has_edge(&self, a: &str, b: &str) -> bool {
        self.adjacency
            .get(a)
            .is_some_and(|list| list.iter().any(|n| n.name() == b))
    }

    /// Number of friends of `name`, or None if absent.
    pub fn degree(&self, name: &str) -> Option<usize> {
        self.adjacency.get(name).map(|list| list.len())
    }

    /// Borrowed neighbor list in insertion order. Empty for an absent vertex.
    pub(crate) fn adjacent(&self, name: &str) -> &[Person] {
        self.adjacency.get(name).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Number of vertices.
    pub fn order(&self) -> usize {
        self.order
    }

    /// Number of undirected edges.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.order == 0
    }

    /// Edge insertion for callers that already hold named persons.
    /// Returns true if a new edge was stored.
    pub(crate) fn connect(&mut self, a: &Person, b: &Person) -> bool {
        self.insert_vertex(a);
        self.insert_vertex(b);

        if a == b || self.has_edge(a.name(), b.name()) {
            return false;
        }

        if let Some(list) = self.adjacency.get_mut(a.name()) {
            list.push(b.clone());
        }
        if let Some(list) = self.adjacency.get_mut(b.name()) {
            list.push(a.clone());
        }
        self.size += 1;
        true
    }

    pub(crate) fn insert_vertex(&mut self, person: &Person) {
        if !self.adjacency.contains_key(person.name()) {
            self.adjacency.insert(person.clone(), Vec::new());
            self.vertices.push(person.clone());
            self.order += 1;
        }
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}
