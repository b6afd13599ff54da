//! The interactive loop: command lines go to the network, `:` lines are
//! queries and file operations handled here.

use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use social_graph_core::SocialNetwork;
use tracing::{debug, info};

use crate::config::Config;
use crate::render::{Renderer, Stats};

pub const META_HELP: &str = "\
:friends <user>          friends of a user
:mutual <user1> <user2>  friends both users share
:path <user1> <user2>    shortest chain of friends
:components              connected groups of users
:near <user> <depth>     users within <depth> hops
:top [n]                 users with the most friends (all if n omitted)
:stats                   network summary
:import <file>           replay a command file
:save [file]             write the command transcript (default: --save path)
:transcript              show the command transcript
:clear                   reset the network and transcript
:help                    this list
:quit                    exit";

/// A parsed `:` query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Meta {
    Friends(String),
    Mutual(String, String),
    Path(String, String),
    Components,
    Near(String, u32),
    Top(usize),
    Stats,
    Import(PathBuf),
    Save(Option<PathBuf>),
    Transcript,
    Clear,
    Help,
    Quit,
}

impl Meta {
    /// Parse a line starting with ':'.
    pub fn parse(line: &str) -> Result<Meta> {
        let body = line.trim().trim_start_matches(':');
        let mut tokens = body.split_whitespace();
        let name = tokens.next().unwrap_or("");
        let args: Vec<&str> = tokens.collect();

        let meta = match (name, args.as_slice()) {
            ("friends", [user]) => Meta::Friends(user.to_string()),
            ("mutual", [a, b]) => Meta::Mutual(a.to_string(), b.to_string()),
            ("path", [a, b]) => Meta::Path(a.to_string(), b.to_string()),
            ("components", []) => Meta::Components,
            ("near", [user, depth]) => Meta::Near(user.to_string(), parse_count(depth, "depth")?),
            ("top", []) => Meta::Top(0),
            ("top", [n]) => Meta::Top(parse_count(n, "n")?),
            ("stats", []) => Meta::Stats,
            ("import", [file]) => Meta::Import(PathBuf::from(file)),
            ("save", []) => Meta::Save(None),
            ("save", [file]) => Meta::Save(Some(PathBuf::from(file))),
            ("transcript", []) => Meta::Transcript,
            ("clear", []) => Meta::Clear,
            ("help", []) => Meta::Help,
            ("quit", []) | ("exit", []) | ("q", []) => Meta::Quit,
            ("", _) => bail!("empty query, type :help for the list"),
            (other, _) => bail!("bad query ':{}', type :help for the list", other),
        };
        Ok(meta)
    }
}

/// Validate a non-negative count argument.
fn parse_count<T: std::str::FromStr>(value: &str, param_name: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| anyhow!("{} must be a non-negative integer, got '{}'", param_name, value))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Session<W: Write> {
    network: SocialNetwork,
    config: Config,
    renderer: Renderer,
    out: W,
}

impl<W: Write> Session<W> {
    pub fn new(config: Config, out: W) -> Self {
        Self {
            network: SocialNetwork::new(),
            renderer: Renderer::new(config.format),
            config,
            out,
        }
    }

    /// Replay every `--import` file. Any failure is fatal at startup.
    pub fn import_startup(&mut self) -> Result<()> {
        for path in self.config.imports.clone() {
            self.import_file(&path)?;
        }
        Ok(())
    }

    /// Read lines until EOF or `:quit`.
    pub fn run<R: BufRead>(&mut self, mut input: R) -> Result<()> {
        let mut line = String::new();
        loop {
            if self.config.prompt {
                write!(self.out, "> ")?;
                self.out.flush()?;
            }

            line.clear();
            if input.read_line(&mut line).context("reading stdin")? == 0 {
                break;
            }

            let command = line.trim_end_matches(['\r', '\n']);
            if self.handle_line(command)? == Flow::Quit {
                break;
            }
        }
        Ok(())
    }

    /// Handle one line. Errors from the network or from file operations are
    /// reported to the user; only output failures propagate.
    pub fn handle_line(&mut self, line: &str) -> Result<Flow> {
        if line.trim_start().starts_with(':') {
            return match Meta::parse(line) {
                Ok(meta) => self.handle_meta(meta),
                Err(err) => {
                    self.emit_error(&err.to_string())?;
                    Ok(Flow::Continue)
                }
            };
        }

        match self.network.execute(line) {
            Ok(Some(users)) => {
                let view = self.renderer.network_view(&users, &self.network);
                self.emit(&view)?;
            }
            Ok(None) => {}
            Err(err) => {
                debug!(line, error = %err, "command rejected");
                self.emit_error(&format!("{} (check syntax, type :help)", err))?;
            }
        }
        Ok(Flow::Continue)
    }

    fn handle_meta(&mut self, meta: Meta) -> Result<Flow> {
        let output = match meta {
            Meta::Friends(user) => match self.network.friends(&user) {
                Some(friends) => self.renderer.friends(&user, &friends),
                None => self.renderer.error(&format!("no user '{}'", user)),
            },
            Meta::Mutual(a, b) => match self.network.mutual_friends(&a, &b) {
                Some(mutual) => self.renderer.mutual(&a, &b, &mutual),
                None => self
                    .renderer
                    .error(&format!("both '{}' and '{}' must exist", a, b)),
            },
            Meta::Path(a, b) => match self.network.shortest_path(&a, &b) {
                Ok(path) => self.renderer.path(&path),
                Err(err) => self.renderer.error(&err.to_string()),
            },
            Meta::Components => self.renderer.components(&self.network.connected_components()),
            Meta::Near(user, depth) => match self.network.neighborhood(&user, depth) {
                Ok(neighbors) => self.renderer.neighborhood(&user, &neighbors),
                Err(err) => self.renderer.error(&err.to_string()),
            },
            Meta::Top(n) => self.renderer.degrees(&self.network.degree_ranking(n)),
            Meta::Stats => self.renderer.stats(&Stats::of(&self.network)),
            Meta::Import(path) => match self.import_file(&path) {
                Ok(()) => self
                    .renderer
                    .network_view(self.network.vertices(), &self.network),
                Err(err) => self.renderer.error(&format!("{:#}", err)),
            },
            Meta::Save(path) => match path.or_else(|| self.config.save_path.clone()) {
                Some(path) => match self.save_transcript(&path) {
                    Ok(()) => self
                        .renderer
                        .message(&format!("transcript saved to {}", path.display())),
                    Err(err) => self.renderer.error(&format!("{:#}", err)),
                },
                None => self.renderer.error("no file given and no --save path configured"),
            },
            Meta::Transcript => self.renderer.transcript(self.network.transcript().as_str()),
            Meta::Clear => {
                self.network.clear();
                self.renderer.message("network cleared")
            }
            Meta::Help => self.renderer.message(META_HELP),
            Meta::Quit => return Ok(Flow::Quit),
        };
        self.emit(&output)?;
        Ok(Flow::Continue)
    }

    /// Read a command file and replay it. The replayed text joins the transcript.
    pub fn import_file(&mut self, path: &Path) -> Result<()> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("cannot read import file {}", path.display()))?;
        self.network
            .import(&text)
            .with_context(|| format!("import of {} failed", path.display()))?;
        info!(path = %path.display(), "import complete");
        Ok(())
    }

    pub fn save_transcript(&self, path: &Path) -> Result<()> {
        fs::write(path, self.network.transcript().as_str())
            .with_context(|| format!("cannot write transcript to {}", path.display()))?;
        info!(
            path = %path.display(),
            lines = self.network.transcript().len(),
            "transcript saved"
        );
        Ok(())
    }

    /// Write the transcript to the configured destination, if any.
    pub fn finish(&mut self) -> Result<()> {
        if let Some(path) = self.config.save_path.clone() {
            self.save_transcript(&path)?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn emit(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "{}", text)?;
        Ok(())
    }

    fn emit_error(&mut self, text: &str) -> Result<()> {
        let rendered = self.renderer.error(text);
        self.emit(&rendered)
    }
}
