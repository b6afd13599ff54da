use std::collections::HashSet;

use proptest::prelude::*;
use social_graph_core::{
    connected_components, neighborhood, shortest_path, Graph, Person, SocialNetwork,
};

#[derive(Debug, Clone)]
enum Op {
    AddNode(u8),
    AddEdge(u8, u8),
    RemoveEdge(u8, u8),
    RemoveNode(u8),
}

fn person(i: u8) -> Person {
    Person::new(format!("u{}", i))
}

prop_compose! {
    fn random_edge_list()
        (edges in prop::collection::vec((0u8..=11, 0u8..=11), 0..=40))
        -> Vec<(u8, u8)>
    {
        edges
    }
}

fn random_ops() -> impl Strategy<Value = Vec<Op>> {
    let op = prop_oneof![
        1 => (0u8..=9).prop_map(Op::AddNode),
        4 => (0u8..=9, 0u8..=9).prop_map(|(a, b)| Op::AddEdge(a, b)),
        2 => (0u8..=9, 0u8..=9).prop_map(|(a, b)| Op::RemoveEdge(a, b)),
        1 => (0u8..=9).prop_map(Op::RemoveNode),
    ];
    prop::collection::vec(op, 0..=60)
}

fn build(edges: &[(u8, u8)]) -> Graph {
    let mut g = Graph::new();
    for &(a, b) in edges {
        g.add_edge(&person(a), &person(b)).unwrap();
    }
    g
}

fn assert_bookkeeping(g: &Graph) {
    let degree_sum: usize = g
        .vertices()
        .iter()
        .map(|v| g.neighbors(v).unwrap().len())
        .sum();
    assert_eq!(g.size() * 2, degree_sum);
    assert_eq!(g.order(), g.vertices().len());
    assert_eq!(g.order(), g.all_nodes().len());
    for v in g.vertices() {
        let friends = g.neighbors(v).unwrap();
        assert!(!friends.contains(v));
        for f in &friends {
            assert!(g.neighbors(f).unwrap().contains(v), "edge {}-{} not symmetric", v, f);
        }
    }
}

proptest! {
    // size == degree sum / 2 and order == |vertices| after any op sequence.
    #[test]
    fn prop_bookkeeping_holds(ops in random_ops()) {
        let mut g = Graph::new();
        for op in ops {
            // Removals on absent vertices are expected to fail
            let _ = match op {
                Op::AddNode(a) => g.add_node(&person(a)),
                Op::AddEdge(a, b) => g.add_edge(&person(a), &person(b)),
                Op::RemoveEdge(a, b) => g.remove_edge(&person(a), &person(b)),
                Op::RemoveNode(a) => g.remove_node(&person(a)),
            };
            assert_bookkeeping(&g);
        }
    }

    #[test]
    fn prop_add_edge_idempotent(edges in random_edge_list(), a in 0u8..=11, b in 0u8..=11) {
        let mut g = build(&edges);
        g.add_edge(&person(a), &person(b)).unwrap();
        let size = g.size();
        g.add_edge(&person(a), &person(b)).unwrap();
        g.add_edge(&person(b), &person(a)).unwrap();
        prop_assert_eq!(g.size(), size);
    }

    #[test]
    fn prop_self_edge_never_stored(edges in random_edge_list(), a in 0u8..=11) {
        let mut g = build(&edges);
        let size = g.size();
        g.add_edge(&person(a), &person(a)).unwrap();
        prop_assert_eq!(g.size(), size);
        prop_assert!(g.contains(person(a).name()));
        prop_assert!(!g.neighbors(&person(a)).unwrap().contains(&person(a)));
    }

    #[test]
    fn prop_remove_node_accounting(edges in random_edge_list(), a in 0u8..=11) {
        let mut g = build(&edges);
        prop_assume!(g.contains(person(a).name()));
        let degree = g.degree(person(a).name()).unwrap();
        let (size, order) = (g.size(), g.order());

        g.remove_node(&person(a)).unwrap();
        prop_assert_eq!(g.size(), size - degree);
        prop_assert_eq!(g.order(), order - 1);
        for v in g.vertices() {
            prop_assert!(!g.neighbors(v).unwrap().contains(&person(a)));
        }
    }

    #[test]
    fn prop_mutual_friends_symmetric(edges in random_edge_list(), a in 0u8..=11, b in 0u8..=11) {
        let mut sn = SocialNetwork::new();
        for (x, y) in edges {
            sn.add_friends(person(x).name(), person(y).name());
        }
        let (a, b) = (person(a), person(b));
        prop_assert_eq!(
            sn.mutual_friends(a.name(), b.name()),
            sn.mutual_friends(b.name(), a.name())
        );
    }

    #[test]
    fn prop_components_partition(edges in random_edge_list()) {
        let g = build(&edges);
        let comps = connected_components(&g);

        let mut seen: HashSet<Person> = HashSet::new();
        for c in &comps {
            assert_bookkeeping(c);
            for v in c.vertices() {
                prop_assert!(seen.insert(v.clone()), "{} in two components", v);
            }
        }
        prop_assert_eq!(seen.len(), g.order());
        prop_assert_eq!(comps.iter().map(Graph::size).sum::<usize>(), g.size());

        for &(x, y) in &edges {
            if x == y {
                continue;
            }
            let holders = comps
                .iter()
                .filter(|c| c.has_edge(person(x).name(), person(y).name()))
                .count();
            prop_assert_eq!(holders, 1);
        }
    }

    // Endpoints are right, consecutive users are friends, and the hop count
    // matches the BFS distance reported by neighborhood().
    #[test]
    fn prop_shortest_path_is_valid_walk(edges in random_edge_list(), a in 0u8..=11, b in 0u8..=11) {
        let g = build(&edges);
        let (a, b) = (person(a), person(b));
        prop_assume!(g.contains(a.name()));

        match shortest_path(&g, a.name(), b.name()) {
            Ok(path) => {
                prop_assert_eq!(path.first(), Some(&a));
                prop_assert_eq!(path.last(), Some(&b));
                for pair in path.windows(2) {
                    prop_assert!(g.has_edge(pair[0].name(), pair[1].name()));
                }
                let unique: HashSet<&Person> = path.iter().collect();
                prop_assert_eq!(unique.len(), path.len());

                if a != b {
                    let layers = neighborhood(&g, a.name(), u32::MAX).unwrap();
                    let hops = layers
                        .iter()
                        .find(|n| n.person == b)
                        .map(|n| n.distance as usize);
                    prop_assert_eq!(hops, Some(path.len() - 1));
                }
            }
            Err(err) => {
                prop_assert!(err.is_no_path());
                let comps = connected_components(&g);
                let same = comps
                    .iter()
                    .any(|c| c.contains(a.name()) && c.contains(b.name()));
                prop_assert!(!same);
            }
        }
    }
}
