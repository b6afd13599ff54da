//! Formatting of query results as plain text or single-line JSON.

use std::collections::BTreeSet;

use serde::Serialize;
use serde_json::json;
use social_graph_core::{DegreeEntry, Graph, Neighbor, Person, SocialNetwork};

use crate::config::OutputFormat;

/// One connected component, flattened for output.
#[derive(Debug, Serialize)]
pub struct ComponentView<'a> {
    pub users: &'a [Person],
    /// Each friendship once, endpoints in name order.
    pub friendships: Vec<(Person, Person)>,
}

impl<'a> ComponentView<'a> {
    pub fn new(graph: &'a Graph) -> Self {
        let mut friendships = Vec::with_capacity(graph.size());
        for user in graph.vertices() {
            let friends = graph.neighbors(user).unwrap_or_default();
            friendships.extend(
                friends
                    .into_iter()
                    .filter(|friend| user < friend)
                    .map(|friend| (user.clone(), friend)),
            );
        }
        Self {
            users: graph.vertices(),
            friendships,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Stats<'a> {
    pub users: usize,
    pub friendships: usize,
    pub components: usize,
    pub active_user: Option<&'a Person>,
    pub transcript_lines: usize,
}

impl<'a> Stats<'a> {
    pub fn of(network: &'a SocialNetwork) -> Self {
        Self {
            users: network.graph().order(),
            friendships: network.graph().size(),
            components: network.connected_components().len(),
            active_user: network.active_user(),
            transcript_lines: network.transcript().len(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    format: OutputFormat,
}

impl Renderer {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// The view re-rendered after every accepted command: all users plus the
    /// active user's friends.
    pub fn network_view(&self, users: &[Person], network: &SocialNetwork) -> String {
        let active = network.active_user();
        let active_friends = network.active_friends();
        match self.format {
            OutputFormat::Json => json!({
                "users": users,
                "active_user": active,
                "active_friends": active_friends,
            })
            .to_string(),
            OutputFormat::Text => {
                let mut out = format!("users ({}): {}", users.len(), join(users.iter()));
                if let (Some(user), Some(friends)) = (active, active_friends) {
                    out.push_str(&format!("\n{}'s friends: {}", user, join(friends.iter())));
                }
                out
            }
        }
    }

    pub fn friends(&self, user: &str, friends: &BTreeSet<Person>) -> String {
        match self.format {
            OutputFormat::Json => json!({ "user": user, "friends": friends }).to_string(),
            OutputFormat::Text => format!("{}'s friends: {}", user, join(friends.iter())),
        }
    }

    pub fn mutual(&self, a: &str, b: &str, mutual: &BTreeSet<Person>) -> String {
        match self.format {
            OutputFormat::Json => json!({ "users": [a, b], "mutual_friends": mutual }).to_string(),
            OutputFormat::Text => {
                format!("mutual friends of {} and {}: {}", a, b, join(mutual.iter()))
            }
        }
    }

    pub fn path(&self, path: &[Person]) -> String {
        match self.format {
            OutputFormat::Json => json!({ "path": path, "hops": path.len() - 1 }).to_string(),
            OutputFormat::Text => {
                let steps: Vec<&str> = path.iter().map(Person::name).collect();
                format!("{} ({} hops)", steps.join(" -> "), path.len() - 1)
            }
        }
    }

    pub fn components(&self, components: &[Graph]) -> String {
        let views: Vec<ComponentView<'_>> = components.iter().map(ComponentView::new).collect();
        match self.format {
            OutputFormat::Json => json!({ "components": views }).to_string(),
            OutputFormat::Text => {
                let mut lines = vec![format!("{} components", views.len())];
                for (i, view) in views.iter().enumerate() {
                    lines.push(format!(
                        "  {}: {} users, {} friendships: {}",
                        i + 1,
                        view.users.len(),
                        view.friendships.len(),
                        join(view.users.iter())
                    ));
                }
                lines.join("\n")
            }
        }
    }

    pub fn neighborhood(&self, user: &str, neighbors: &[Neighbor]) -> String {
        match self.format {
            OutputFormat::Json => json!({ "user": user, "neighbors": neighbors }).to_string(),
            OutputFormat::Text => {
                let mut lines = vec![format!("{} users near {}", neighbors.len(), user)];
                lines.extend(
                    neighbors
                        .iter()
                        .map(|n| format!("{:>6}  {}", n.distance, n.person)),
                );
                lines.join("\n")
            }
        }
    }

    pub fn degrees(&self, ranking: &[DegreeEntry]) -> String {
        match self.format {
            OutputFormat::Json => json!({ "ranking": ranking }).to_string(),
            OutputFormat::Text => {
                let mut lines = vec![format!("{:>6}  {}", "friends", "user")];
                lines.extend(
                    ranking
                        .iter()
                        .map(|d| format!("{:>6}  {}", d.degree, d.person)),
                );
                lines.join("\n")
            }
        }
    }

    pub fn stats(&self, stats: &Stats<'_>) -> String {
        match self.format {
            OutputFormat::Json => json!(stats).to_string(),
            OutputFormat::Text => format!(
                "users: {}\nfriendships: {}\ncomponents: {}\nactive user: {}\ntranscript: {} lines",
                stats.users,
                stats.friendships,
                stats.components,
                stats.active_user.map(Person::name).unwrap_or("(none)"),
                stats.transcript_lines
            ),
        }
    }

    pub fn transcript(&self, text: &str) -> String {
        match self.format {
            OutputFormat::Json => json!({ "transcript": text }).to_string(),
            OutputFormat::Text => text.trim_end_matches('\n').to_string(),
        }
    }

    pub fn message(&self, text: &str) -> String {
        match self.format {
            OutputFormat::Json => json!({ "message": text }).to_string(),
            OutputFormat::Text => text.to_string(),
        }
    }

    pub fn error(&self, text: &str) -> String {
        match self.format {
            OutputFormat::Json => json!({ "error": text }).to_string(),
            OutputFormat::Text => format!("error: {}", text),
        }
    }
}

fn join<'a>(people: impl Iterator<Item = &'a Person>) -> String {
    let names: Vec<&str> = people.map(Person::name).collect();
    if names.is_empty() {
        "(none)".to_string()
    } else {
        names.join(", ")
    }
}
