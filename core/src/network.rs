use std::collections::BTreeSet;

use tracing::{debug, info, warn};

use crate::command::Command;
use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::person::Person;
use crate::transcript::Transcript;
use crate::traversal::{self, DegreeEntry, Neighbor};

/// A social network: the friendship graph, the active user, and the
/// transcript of issued commands.
///
/// Domain operations (`add_user`, `add_friends`, ...) report soft failures
/// as `false`/`None` so batch processing can keep going. Path search and
/// command execution return `Error`.
#[derive(Debug, Default)]
pub struct SocialNetwork {
    graph: Graph,
    /// Name of the active user. Cleared when that user is removed.
    active_user: Option<Person>,
    transcript: Transcript,
}

impl SocialNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a user. False if the name is empty or already taken.
    pub fn add_user(&mut self, name: &str) -> bool {
        if self.graph.contains(name) {
            debug!(user = name, "user already exists");
            return false;
        }
        match self.graph.add_node(&Person::new(name)) {
            Ok(()) => {
                debug!(user = name, "user added");
                true
            }
            Err(err) => soft_failure("add user", err),
        }
    }

    /// Remove a user and all of their friendships. False if absent.
    pub fn remove_user(&mut self, name: &str) -> bool {
        let person = Person::new(name);
        match self.graph.remove_node(&person) {
            Ok(()) => {
                if self.active_user.as_ref() == Some(&person) {
                    debug!(user = name, "active user removed, clearing");
                    self.active_user = None;
                }
                debug!(user = name, "user removed");
                true
            }
            Err(err) => soft_failure("remove user", err),
        }
    }

    /// Befriend two users, creating either if absent.
    ///
    /// True only if a new friendship was formed: re-adding an existing one or
    /// befriending oneself returns false.
    pub fn add_friends(&mut self, a: &str, b: &str) -> bool {
        let before = self.graph.size();
        match self.graph.add_edge(&Person::new(a), &Person::new(b)) {
            Ok(()) if self.graph.size() > before => {
                debug!(user = a, friend = b, "friendship added");
                true
            }
            Ok(()) => {
                debug!(user = a, friend = b, "friendship not formed");
                false
            }
            Err(err) => soft_failure("add friends", err),
        }
    }

    /// End a friendship. False if either user is absent or they were not friends.
    pub fn remove_friends(&mut self, a: &str, b: &str) -> bool {
        let before = self.graph.size();
        match self.graph.remove_edge(&Person::new(a), &Person::new(b)) {
            Ok(()) if self.graph.size() < before => {
                debug!(user = a, friend = b, "friendship removed");
                true
            }
            Ok(()) => false,
            Err(err) => soft_failure("remove friends", err),
        }
    }

    /// Friends of `name`, or None if the user is absent.
    pub fn friends(&self, name: &str) -> Option<BTreeSet<Person>> {
        self.graph.neighbors(&Person::new(name)).ok()
    }

    /// Friends shared by both users, or None unless both exist.
    pub fn mutual_friends(&self, a: &str, b: &str) -> Option<BTreeSet<Person>> {
        let friends_a = self.friends(a)?;
        let friends_b = self.friends(b)?;
        Some(friends_a.intersection(&friends_b).cloned().collect())
    }

    /// See [`traversal::shortest_path`].
    pub fn shortest_path(&self, from: &str, to: &str) -> Result<Vec<Person>> {
        traversal::shortest_path(&self.graph, from, to)
    }

    /// See [`traversal::connected_components`].
    pub fn connected_components(&self) -> Vec<Graph> {
        traversal::connected_components(&self.graph)
    }

    /// See [`traversal::neighborhood`].
    pub fn neighborhood(&self, name: &str, max_depth: u32) -> Result<Vec<Neighbor>> {
        traversal::neighborhood(&self.graph, name, max_depth)
    }

    /// See [`traversal::degree_ranking`].
    pub fn degree_ranking(&self, top_n: usize) -> Vec<DegreeEntry> {
        traversal::degree_ranking(&self.graph, top_n)
    }

    /// Make `name` the active user. Fails, leaving the active user unchanged,
    /// if no such user exists.
    pub fn set_active_user(&mut self, name: &str) -> Result<()> {
        let person = self.graph.node(name)?;
        debug!(user = name, "active user set");
        self.active_user = Some(person);
        Ok(())
    }

    pub fn active_user(&self) -> Option<&Person> {
        self.active_user.as_ref()
    }

    /// Friends of the active user, if one is set.
    pub fn active_friends(&self) -> Option<BTreeSet<Person>> {
        self.active_user
            .as_ref()
            .and_then(|user| self.friends(user.name()))
    }

    /// Parse and run one command line.
    ///
    /// Returns the full vertex list (insertion order) after the command, or
    /// `None` for a blank line. A rejected line leaves the network unchanged.
    pub fn run_action(&mut self, line: &str) -> Result<Option<Vec<Person>>> {
        let command = match Command::parse(line)? {
            Some(command) => command,
            None => return Ok(None),
        };
        self.apply(&command)?;
        Ok(Some(self.graph.vertices().to_vec()))
    }

    /// Run a parsed command. Only `SetActive` can fail; the rest are soft.
    pub fn apply(&mut self, command: &Command) -> Result<()> {
        match command {
            Command::AddUser(user) => {
                self.add_user(user);
            }
            Command::AddFriendship(a, b) => {
                self.add_friends(a, b);
            }
            Command::RemoveUser(user) => {
                self.remove_user(user);
            }
            Command::RemoveFriendship(a, b) => {
                self.remove_friends(a, b);
            }
            Command::SetActive(user) => self.set_active_user(user)?,
        }
        Ok(())
    }

    /// Record `line` in the transcript, then run it.
    ///
    /// The line is recorded even if it is rejected, since the transcript is
    /// the history of what was issued. Replaying such a transcript with
    /// `load_commands` aborts at the first rejected line.
    pub fn execute(&mut self, line: &str) -> Result<Option<Vec<Person>>> {
        self.transcript.record(line);
        self.run_action(line)
    }

    /// Replay a block of command lines in order.
    ///
    /// Returns the replayed text with every line newline-terminated. The
    /// first failing line aborts the replay with `Error::Import`; lines
    /// before it stay applied.
    pub fn load_commands(&mut self, text: &str) -> Result<String> {
        let mut replayed = String::with_capacity(text.len() + 1);

        for (idx, line) in text.lines().enumerate() {
            if let Err(err) = self.run_action(line) {
                warn!(line = idx + 1, error = %err, "import aborted");
                return Err(Error::Import {
                    line: idx + 1,
                    source: Box::new(err),
                });
            }
            replayed.push_str(line);
            replayed.push('\n');
        }

        info!(
            lines = text.lines().count(),
            users = self.graph.order(),
            friendships = self.graph.size(),
            "commands imported"
        );
        Ok(replayed)
    }

    /// `load_commands`, appending the replayed text to the transcript on success.
    pub fn import(&mut self, text: &str) -> Result<String> {
        let replayed = self.load_commands(text)?;
        self.transcript.append(&replayed);
        Ok(replayed)
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// All users in insertion order.
    pub fn vertices(&self) -> &[Person] {
        self.graph.vertices()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Reset to an empty network with no active user and an empty transcript.
    pub fn clear(&mut self) {
        self.graph = Graph::new();
        self.active_user = None;
        self.transcript.clear();
    }
}

fn soft_failure(op: &str, err: Error) -> bool {
    match err {
        Error::InvalidArgument(reason) => debug!(op, %reason, "rejected"),
        other => warn!(op, error = %other, "unexpected failure"),
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::ParseError;

    fn names(people: &[Person]) -> Vec<&str> {
        people.iter().map(|p| p.name()).collect()
    }

    fn set(names: &[&str]) -> BTreeSet<Person> {
        names.iter().map(|n| Person::new(*n)).collect()
    }

    #[test]
    fn test_add_user() {
        let mut sn = SocialNetwork::new();
        assert!(sn.add_user("alice"));
        assert!(!sn.add_user("alice"));
        assert!(!sn.add_user(""));
        assert_eq!(sn.graph().order(), 1);
    }

    #[test]
    fn test_remove_user() {
        let mut sn = SocialNetwork::new();
        sn.add_friends("alice", "bob");
        assert!(sn.remove_user("alice"));
        assert!(!sn.remove_user("alice"));
        assert_eq!(sn.friends("bob"), Some(BTreeSet::new()));
        assert_eq!(sn.graph().size(), 0);
    }

    #[test]
    fn test_add_friends_result() {
        let mut sn = SocialNetwork::new();
        assert!(sn.add_friends("alice", "bob"));
        assert!(!sn.add_friends("bob", "alice"));
        assert!(!sn.add_friends("alice", "alice"));
        assert!(!sn.add_friends("alice", ""));
        assert_eq!(sn.graph().size(), 1);
    }

    #[test]
    fn test_remove_friends_result() {
        let mut sn = SocialNetwork::new();
        sn.add_friends("alice", "bob");
        sn.add_user("carol");
        assert!(!sn.remove_friends("alice", "carol"));
        assert!(!sn.remove_friends("alice", "ghost"));
        assert!(sn.remove_friends("bob", "alice"));
        assert!(!sn.remove_friends("bob", "alice"));
    }

    #[test]
    fn test_friends_absent_is_none() {
        let sn = SocialNetwork::new();
        assert_eq!(sn.friends("nobody"), None);
    }

    #[test]
    fn test_mutual_friends() {
        let mut sn = SocialNetwork::new();
        sn.add_friends("alice", "carol");
        sn.add_friends("alice", "dave");
        sn.add_friends("bob", "carol");
        sn.add_friends("bob", "dave");
        sn.add_friends("bob", "erin");
        assert_eq!(sn.mutual_friends("alice", "bob"), Some(set(&["carol", "dave"])));
        assert_eq!(sn.mutual_friends("bob", "alice"), sn.mutual_friends("alice", "bob"));
        assert_eq!(sn.mutual_friends("alice", "erin"), Some(BTreeSet::new()));
        assert_eq!(sn.mutual_friends("alice", "ghost"), None);
    }

    #[test]
    fn test_set_active_user() {
        let mut sn = SocialNetwork::new();
        sn.add_friends("alice", "bob");
        sn.set_active_user("alice").unwrap();
        assert_eq!(sn.active_user(), Some(&Person::new("alice")));
        assert_eq!(sn.active_friends(), Some(set(&["bob"])));

        let err = sn.set_active_user("ghost").unwrap_err();
        assert!(err.is_invalid_argument());
        assert_eq!(sn.active_user(), Some(&Person::new("alice")));
    }

    #[test]
    fn test_remove_active_user_clears_it() {
        let mut sn = SocialNetwork::new();
        sn.add_user("alice");
        sn.add_user("bob");
        sn.set_active_user("alice").unwrap();

        sn.remove_user("bob");
        assert_eq!(sn.active_user(), Some(&Person::new("alice")));

        sn.remove_user("alice");
        assert_eq!(sn.active_user(), None);
        assert_eq!(sn.active_friends(), None);
    }

    #[test]
    fn test_run_action_returns_vertices() {
        let mut sn = SocialNetwork::new();
        let v = sn.run_action("a alice").unwrap().unwrap();
        assert_eq!(names(&v), ["alice"]);
        let v = sn.run_action("a bob carol").unwrap().unwrap();
        assert_eq!(names(&v), ["alice", "bob", "carol"]);
        let v = sn.run_action("r bob").unwrap().unwrap();
        assert_eq!(names(&v), ["alice", "carol"]);
    }

    #[test]
    fn test_run_action_blank_is_noop() {
        let mut sn = SocialNetwork::new();
        assert_eq!(sn.run_action("   ").unwrap(), None);
    }

    #[test]
    fn test_run_action_parse_error_leaves_state() {
        let mut sn = SocialNetwork::new();
        let err = sn.run_action("x alice").unwrap_err();
        assert_eq!(err, Error::Parse(ParseError::UnknownAction("x".into())));
        assert_eq!(sn.graph().order(), 0);

        assert!(sn.run_action("s alice bob").unwrap_err().is_parse());
        assert!(sn.run_action("a").unwrap_err().is_parse());
        assert_eq!(sn.graph().order(), 0);
    }

    #[test]
    fn test_run_action_soft_failures_still_succeed() {
        let mut sn = SocialNetwork::new();
        // Removing an absent user is a soft failure, not an error
        let v = sn.run_action("r ghost").unwrap().unwrap();
        assert!(v.is_empty());
        assert!(sn.run_action("r ghost other").unwrap().is_some());
    }

    #[test]
    fn test_run_action_set_absent_propagates() {
        let mut sn = SocialNetwork::new();
        sn.run_action("a alice").unwrap();
        sn.run_action("s alice").unwrap();
        assert!(sn.run_action("s bob").unwrap_err().is_invalid_argument());
        assert_eq!(sn.active_user().map(Person::name), Some("alice"));
    }

    #[test]
    fn test_execute_records_transcript() {
        let mut sn = SocialNetwork::new();
        sn.execute("a alice").unwrap();
        assert!(sn.execute("bogus line").is_err());
        sn.execute("").unwrap();
        assert_eq!(sn.transcript().as_str(), "a alice\nbogus line\n");
    }

    #[test]
    fn test_transcript_with_rejected_line_aborts_replay() {
        let mut sn = SocialNetwork::new();
        sn.execute("a alice").unwrap();
        assert!(sn.execute("s ghost").is_err());
        sn.execute("a bob").unwrap();

        let mut replay = SocialNetwork::new();
        let err = replay.load_commands(sn.transcript().as_str()).unwrap_err();
        match err {
            Error::Import { line, source } => {
                assert_eq!(line, 2);
                assert!(source.is_invalid_argument());
            }
            other => panic!("expected import error, got {:?}", other),
        }
        assert_eq!(names(replay.vertices()), ["alice"]);
    }

    #[test]
    fn test_load_commands() {
        let mut sn = SocialNetwork::new();
        let text = "a alice\na alice bob\n\ns bob";
        let replayed = sn.load_commands(text).unwrap();
        assert_eq!(replayed, "a alice\na alice bob\n\ns bob\n");
        assert_eq!(sn.graph().size(), 1);
        assert_eq!(sn.active_user().map(Person::name), Some("bob"));
        // load_commands alone does not touch the transcript
        assert!(sn.transcript().is_empty());
    }

    #[test]
    fn test_load_commands_aborts_on_bad_line() {
        let mut sn = SocialNetwork::new();
        let err = sn.load_commands("a alice\nz bob\na carol").unwrap_err();
        match err {
            Error::Import { line, source } => {
                assert_eq!(line, 2);
                assert!(source.is_parse());
            }
            other => panic!("expected import error, got {:?}", other),
        }
        assert!(sn.graph().contains("alice"));
        assert!(!sn.graph().contains("carol"));
    }

    #[test]
    fn test_import_appends_transcript() {
        let mut sn = SocialNetwork::new();
        sn.execute("a zed").unwrap();
        sn.import("a alice bob\r\nr bob\n").unwrap();
        assert_eq!(sn.transcript().as_str(), "a zed\na alice bob\nr bob\n");

        assert!(sn.import("q\n").is_err());
        assert_eq!(sn.transcript().len(), 3);
    }

    #[test]
    fn test_clear() {
        let mut sn = SocialNetwork::new();
        sn.execute("a alice bob").unwrap();
        sn.execute("s alice").unwrap();
        sn.clear();
        assert_eq!(sn.graph().order(), 0);
        assert_eq!(sn.graph().size(), 0);
        assert_eq!(sn.active_user(), None);
        assert!(sn.transcript().is_empty());
    }

    #[test]
    fn test_shortest_path_and_components() {
        let mut sn = SocialNetwork::new();
        sn.add_friends("alice", "bob");
        sn.add_friends("bob", "carol");
        sn.add_user("dave");
        let path = sn.shortest_path("alice", "carol").unwrap();
        assert_eq!(names(&path), ["alice", "bob", "carol"]);
        assert!(sn.shortest_path("alice", "dave").unwrap_err().is_no_path());
        assert_eq!(sn.connected_components().len(), 2);
    }
}
