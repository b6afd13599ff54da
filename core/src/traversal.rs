use std::collections::{HashMap, HashSet, VecDeque};

use serde::Serialize;

use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::person::Person;

/// A user found during neighborhood traversal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Neighbor {
    pub person: Person,
    /// Hops from the start user (degrees of separation).
    pub distance: u32,
}

/// Friend count for a single user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DegreeEntry {
    pub person: Person,
    pub degree: usize,
}

/// Shortest path from `from` to `to` using BFS (unweighted).
///
/// Returns the path including both endpoints; a user's path to itself is
/// the single-element path. Neighbors are expanded in name order, so among
/// equally short paths the one through the alphabetically first friend wins.
///
/// Fails with `InvalidArgument` if `from` is absent, and with `NoPathFound`
/// if the search exhausts without reaching `to` (including an absent `to`).
pub fn shortest_path(graph: &Graph, from: &str, to: &str) -> Result<Vec<Person>> {
    let start = graph.node(from)?;
    if from == to {
        return Ok(vec![start]);
    }

    // visited maps node → parent. The start node has no parent.
    let mut visited: HashMap<Person, Option<Person>> = HashMap::new();
    let mut queue: VecDeque<Person> = VecDeque::new();

    visited.insert(start.clone(), None);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        for friend in graph.neighbors(&current)? {
            if visited.contains_key(&friend) {
                continue;
            }
            visited.insert(friend.clone(), Some(current.clone()));

            if friend.name() == to {
                return Ok(reconstruct_path(&visited, friend));
            }
            queue.push_back(friend);
        }
    }

    Err(Error::NoPathFound {
        from: from.to_string(),
        to: to.to_string(),
    })
}

/// Walk parent pointers from `target` back to the root, then reverse.
fn reconstruct_path(visited: &HashMap<Person, Option<Person>>, target: Person) -> Vec<Person> {
    let mut path = Vec::new();
    let mut current = Some(target);

    while let Some(person) = current {
        current = visited.get(&person).cloned().flatten();
        path.push(person);
    }

    path.reverse();
    path
}

/// Partition the graph into its connected components.
///
/// Each component is a fresh `Graph` holding only that component's users and
/// friendships; isolated users become single-vertex components. Components
/// come out in the insertion order of their first-discovered user.
///
/// Discovery is an iterative DFS with an explicit stack, so deep chains do
/// not grow the call stack.
pub fn connected_components(graph: &Graph) -> Vec<Graph> {
    let mut remaining: HashSet<&Person> = graph.vertices().iter().collect();
    let mut components = Vec::new();

    for root in graph.vertices() {
        if !remaining.remove(root) {
            continue;
        }

        let mut component = Graph::new();
        component.insert_vertex(root);
        let mut stack = vec![root];

        while let Some(node) = stack.pop() {
            for friend in graph.adjacent(node.name()) {
                component.connect(node, friend);
                if remaining.remove(friend) {
                    stack.push(friend);
                }
            }
        }

        components.push(component);
    }

    components
}

/// All users within `max_depth` hops of `start`, nearest first.
///
/// Each user appears once, at its minimum distance. The start user is not
/// included. Ties in distance are ordered by name.
pub fn neighborhood(graph: &Graph, start: &str, max_depth: u32) -> Result<Vec<Neighbor>> {
    let start = graph.node(start)?;

    let mut visited: HashMap<&Person, u32> = HashMap::new();
    let mut queue: VecDeque<(&Person, u32)> = VecDeque::new();

    visited.insert(&start, 0);
    queue.push_back((&start, 0));

    while let Some((current, depth)) = queue.pop_front() {
        if depth >= max_depth {
            continue;
        }

        for friend in graph.adjacent(current.name()) {
            if !visited.contains_key(friend) {
                visited.insert(friend, depth + 1);
                queue.push_back((friend, depth + 1));
            }
        }
    }

    let mut neighbors: Vec<Neighbor> = visited
        .into_iter()
        .filter(|(person, _)| **person != start)
        .map(|(person, distance)| Neighbor {
            person: person.clone(),
            distance,
        })
        .collect();

    neighbors.sort_by(|a, b| {
        a.distance
            .cmp(&b.distance)
            .then_with(|| a.person.cmp(&b.person))
    });

    Ok(neighbors)
}

/// Return users ranked by friend count.
///
/// If `top_n` is 0, returns all users. Otherwise returns the top N by
/// degree (descending). Ties are broken by name (ascending).
pub fn degree_ranking(graph: &Graph, top_n: usize) -> Vec<DegreeEntry> {
    let mut results: Vec<DegreeEntry> = graph
        .vertices()
        .iter()
        .map(|person| DegreeEntry {
            person: person.clone(),
            degree: graph.adjacent(person.name()).len(),
        })
        .collect();

    results.sort_by(|a, b| b.degree.cmp(&a.degree).then(a.person.cmp(&b.person)));

    if top_n > 0 && top_n < results.len() {
        results.truncate(top_n);
    }

    results
}
