//! social-graph-core: In-memory social network engine.
//!
//! Models users and friendships as an unweighted, undirected graph keyed by
//! user name, and maintains it through a small command language
//! (`a`dd / `r`emove / `s`et active user). Answers neighbor, mutual-friend,
//! shortest-path and connected-component queries.
//! No I/O here: callers feed command strings and persist the transcript.

mod command;
mod error;
mod graph;
mod network;
mod person;
mod transcript;
mod traversal;

pub use command::{Command, ParseError};
pub use error::{Error, Result};
pub use graph::Graph;
pub use network::SocialNetwork;
pub use person::Person;
pub use transcript::Transcript;
pub use traversal::{
    connected_components, degree_ranking, neighborhood, shortest_path, DegreeEntry, Neighbor,
};
