use social_graph_core::{Graph, Person, Result};
use std::time::Instant;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mode = args.get(1).map(|s| s.as_str()).unwrap_or("all");
    let user_count: usize = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(100_000);

    if mode == "help" || mode == "--help" {
        println!("Usage: social-graph-bench [mode] [user_count]");
        println!();
        println!("Modes:");
        println!("  all         Run all generators and benchmark each (default)");
        println!("  tree        Branching invitation tree (deep paths)");
        println!("  scalefree   Preferential attachment (a few very popular users)");
        println!("  smallworld  Watts-Strogatz ring of acquaintances + shortcuts");
        println!("  random      Erdos-Renyi uniform random friendships");
        println!("  barbell     Two dense circles joined by a thin chain of friends");
        println!();
        println!("Default user_count: 100000");
        return;
    }

    println!("social-graph-bench");
    println!("==================");
    println!();

    let generators: Vec<(&str, fn(usize) -> Result<Graph>)> = match mode {
        "tree" => vec![("Invitation tree", gen_tree)],
        "scalefree" => vec![("Scale-free (edge sampling)", gen_scale_free)],
        "smallworld" => vec![("Small-world (Watts-Strogatz)", gen_small_world)],
        "random" => vec![("Erdos-Renyi random", gen_random)],
        "barbell" => vec![("Barbell (circle-chain-circle)", gen_barbell)],
        "all" => vec![
            ("Invitation tree", gen_tree as fn(usize) -> Result<Graph>),
            ("Scale-free (edge sampling)", gen_scale_free),
            ("Small-world (Watts-Strogatz)", gen_small_world),
            ("Erdos-Renyi random", gen_random),
            ("Barbell (circle-chain-circle)", gen_barbell),
        ],
        _ => {
            eprintln!("Unknown mode: {}. Use --help for options.", mode);
            return;
        }
    };

    for (name, generator) in generators {
        if let Err(err) = run_benchmark(name, generator, user_count) {
            eprintln!("{} failed: {}", name, err);
        }
    }
}

fn run_benchmark(name: &str, generator: fn(usize) -> Result<Graph>, user_count: usize) -> Result<()> {
    println!("--- {} ---", name);
    println!("Target: {} users", user_count);

    let t = Instant::now();
    let graph = generator(user_count)?;
    let gen_time = t.elapsed();
    println!(
        "Generated in {:.2}s: {} users, {} friendships",
        gen_time.as_secs_f64(),
        graph.order(),
        graph.size()
    );

    let (first, last) = match (graph.vertices().first(), graph.vertices().last()) {
        (Some(first), Some(last)) => (first.clone(), last.clone()),
        _ => {
            println!("(empty graph, nothing to measure)");
            println!();
            return Ok(());
        }
    };

    // Neighborhood growth from the first user (typically a hub or root)
    println!();
    println!("{:>8} {:>12} {:>10}", "depth", "reached", "time");
    println!("{:->8} {:->12} {:->10}", "", "", "");

    for depth in [1, 2, 3, 5, 10] {
        let t = Instant::now();
        let reached = social_graph_core::neighborhood(&graph, first.name(), depth)?;
        let elapsed = t.elapsed();
        println!(
            "{:>8} {:>12} {:>8.1}ms",
            depth,
            reached.len(),
            elapsed.as_secs_f64() * 1000.0
        );
        if reached.len() + 1 >= graph.order() {
            println!("{:>8} (every user reached)", "");
            break;
        }
    }

    println!();
    let t = Instant::now();
    let path = social_graph_core::shortest_path(&graph, first.name(), last.name());
    let elapsed = t.elapsed();
    match path {
        Ok(p) => println!(
            "Shortest path {} -> {}: {} hops in {:.1}ms",
            first,
            last,
            p.len() - 1,
            elapsed.as_secs_f64() * 1000.0
        ),
        Err(err) if err.is_no_path() => println!(
            "Shortest path {} -> {}: no path ({:.1}ms)",
            first,
            last,
            elapsed.as_secs_f64() * 1000.0
        ),
        Err(err) => return Err(err),
    }

    let t = Instant::now();
    let components = social_graph_core::connected_components(&graph);
    let elapsed = t.elapsed();
    let largest = components.iter().map(Graph::order).max().unwrap_or(0);
    println!(
        "Connected components: {} (largest {} users) in {:.1}ms",
        components.len(),
        largest,
        elapsed.as_secs_f64() * 1000.0
    );

    let t = Instant::now();
    let ranking = social_graph_core::degree_ranking(&graph, 5);
    let elapsed = t.elapsed();
    let top: Vec<String> = ranking
        .iter()
        .map(|d| format!("{}({})", d.person, d.degree))
        .collect();
    println!(
        "Degree ranking top 5: {} in {:.1}ms",
        top.join(" "),
        elapsed.as_secs_f64() * 1000.0
    );
    println!();
    Ok(())
}

// ---------------------------------------------------------------------------
// Generators: deterministic, single-threaded, O(users + friendships)
// ---------------------------------------------------------------------------

/// Simple LCG for deterministic, fast pseudo-random numbers.
struct FastRng(u64);

impl FastRng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next(&mut self, max: usize) -> usize {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        ((self.0 >> 33) % max as u64) as usize
    }
    fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Users `u0..u{n-1}`, added up front so insertion order follows the index.
fn users(graph: &mut Graph, count: usize) -> Result<Vec<Person>> {
    let people: Vec<Person> = (0..count).map(|i| Person::new(format!("u{}", i))).collect();
    for person in &people {
        graph.add_node(person)?;
    }
    Ok(people)
}

/// Each user invites three others. Log depth, exponential width.
fn gen_tree(user_count: usize) -> Result<Graph> {
    let mut graph = Graph::with_capacity(user_count);
    let people = users(&mut graph, user_count)?;

    let branching = 3;
    for child in 1..user_count {
        graph.add_edge(&people[(child - 1) / branching], &people[child])?;
    }

    Ok(graph)
}

/// Preferential attachment by picking a random existing friendship and
/// befriending one of its endpoints. Popular users get more popular.
fn gen_scale_free(user_count: usize) -> Result<Graph> {
    let friends_per_user = 10;
    let mut graph = Graph::with_capacity(user_count);
    let people = users(&mut graph, user_count)?;
    let mut rng = FastRng::new(12345);

    let mut endpoints: Vec<usize> = Vec::with_capacity(user_count * friends_per_user * 2);

    // Seed: small clique
    let seed = 5.min(user_count);
    for i in 0..seed {
        for j in (i + 1)..seed {
            graph.add_edge(&people[i], &people[j])?;
            endpoints.push(i);
            endpoints.push(j);
        }
    }

    for new_user in seed..user_count {
        for _ in 0..friends_per_user.min(new_user) {
            let target = endpoints[rng.next(endpoints.len())];
            if target != new_user {
                graph.add_edge(&people[new_user], &people[target])?;
                endpoints.push(new_user);
                endpoints.push(target);
            }
        }
    }

    Ok(graph)
}

/// Ring lattice of K acquaintances per side, each friendship rewired with
/// probability p. High clustering, short paths.
fn gen_small_world(user_count: usize) -> Result<Graph> {
    let k = 5;
    let p = 0.05f64;
    let mut graph = Graph::with_capacity(user_count);
    let people = users(&mut graph, user_count)?;
    let mut rng = FastRng::new(67890);

    for i in 0..user_count {
        for j in 1..=k {
            let mut friend = (i + j) % user_count;
            if rng.next_f64() < p {
                let rewired = rng.next(user_count);
                if rewired != i {
                    friend = rewired;
                }
            }
            graph.add_edge(&people[i], &people[friend])?;
        }
    }

    Ok(graph)
}

/// Uniform random friendships, ~5 per user. No structure.
fn gen_random(user_count: usize) -> Result<Graph> {
    let target = user_count * 5;
    let mut graph = Graph::with_capacity(user_count);
    let people = users(&mut graph, user_count)?;
    let mut rng = FastRng::new(54321);

    for _ in 0..target {
        let a = rng.next(user_count);
        let b = rng.next(user_count);
        graph.add_edge(&people[a], &people[b])?;
    }

    Ok(graph)
}

/// Two dense circles joined by a chain of ~10 users. Every path between the
/// circles squeezes through the chain.
fn gen_barbell(user_count: usize) -> Result<Graph> {
    let bridge_len = 10.min(user_count);
    let circle = (user_count - bridge_len) / 2;
    let mut graph = Graph::with_capacity(user_count);
    let people = users(&mut graph, user_count)?;
    let mut rng = FastRng::new(99999);

    let b_start = circle + bridge_len;
    for offset in [0, b_start] {
        for i in 0..circle {
            for _ in 0..20usize.min(circle.saturating_sub(1)) {
                let target = rng.next(circle);
                graph.add_edge(&people[offset + i], &people[offset + target])?;
            }
        }
    }

    // Chain: last of circle A, the bridge users, first of circle B
    let chain_end = (b_start + 1).min(user_count);
    for i in circle.saturating_sub(1)..chain_end.saturating_sub(1) {
        graph.add_edge(&people[i], &people[i + 1])?;
    }

    Ok(graph)
}
