//! Command-line interface over a configured triple store.
//!
//! Entities are written `namespace:instance`. Filters accept shorter forms:
//! `ns` or `ns:` selects a whole namespace and `:inst` selects an instance in
//! any namespace. `*` as an instance is the stored wildcard, not a pattern.

use std::io::Write;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rebac_domain::model::{Entity, Triple};
use rebac_domain::query::EntitySelector;
use rebac_domain::{DomainError, Query, TripleStore};

use crate::config::StorageSettings;

/// rebac - relation triple store administration
#[derive(Parser, Debug)]
#[command(name = "rebac")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (YAML)
    #[arg(short, long, env = "REBAC_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Store a triple
    Put(TripleArgs),
    /// Remove a triple
    Delete(TripleArgs),
    /// Exit 0 if the triple is stored literally, 1 otherwise
    Contains(TripleArgs),
    /// Exit 0 if the triple is stored or derived by a resolver, 1 otherwise
    Check(TripleArgs),
    /// Print matching triples
    Query(QueryArgs),
    /// Print the number of stored triples
    Count,
    /// Remove every matching triple
    DeleteByQuery(FilterArgs),
}

impl Command {
    /// Returns true if the command changes the stored triples.
    pub fn is_mutating(&self) -> bool {
        matches!(self, Self::Put(_) | Self::Delete(_) | Self::DeleteByQuery(_))
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Put(_) => "put",
            Self::Delete(_) => "delete",
            Self::Contains(_) => "contains",
            Self::Check(_) => "check",
            Self::Query(_) => "query",
            Self::Count => "count",
            Self::DeleteByQuery(_) => "delete-by-query",
        }
    }
}

/// A fully specified triple.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct TripleArgs {
    /// Source entity, `namespace:instance`
    #[arg(value_parser = parse_entity)]
    pub source: Entity,
    pub relation: String,
    /// Target entity, `namespace:instance`
    #[arg(value_parser = parse_entity)]
    pub target: Entity,
}

impl TripleArgs {
    pub fn triple(&self) -> Triple {
        Triple::new(self.source.clone(), self.relation.as_str(), self.target.clone())
    }
}

/// Query filters; omitted ones match anything.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterArgs {
    #[arg(long)]
    pub source: Option<String>,
    #[arg(long)]
    pub relation: Option<String>,
    #[arg(long)]
    pub target: Option<String>,
}

impl FilterArgs {
    /// Builds the query these filters describe.
    pub fn query(&self) -> Query {
        let mut query = Query::select();
        if let Some(source) = &self.source {
            query = select_entity(query.source(), source);
        }
        if let Some(relation) = &self.relation {
            query = query.relation().has(relation.as_str());
        }
        if let Some(target) = &self.target {
            query = select_entity(query.target(), target);
        }
        query
    }
}

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryArgs {
    #[command(flatten)]
    pub filter: FilterArgs,
    /// Print each distinct relation once
    #[arg(long)]
    pub group_by_relation: bool,
    /// Stop after this many results
    #[arg(long)]
    pub limit: Option<usize>,
    /// Print one JSON object per line
    #[arg(long)]
    pub json: bool,
}

/// Error type for command execution.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode output: {0}")]
    Json(#[from] serde_json::Error),

    #[error(
        "'{command}' would be lost on exit: storage backend '{backend}' keeps nothing \
         between runs; configure storage.backend = \"rocksdb\" with a data_path"
    )]
    EphemeralBackend {
        command: &'static str,
        backend: String,
    },
}

/// Rejects mutating commands when the configured backend does not persist.
///
/// Each CLI invocation opens a fresh store, so writes to the memory backend
/// would be reported as successful and then discarded.
pub fn ensure_durable(command: &Command, storage: &StorageSettings) -> Result<(), CliError> {
    if command.is_mutating() && storage.backend == "memory" {
        return Err(CliError::EphemeralBackend {
            command: command.name(),
            backend: storage.backend.clone(),
        });
    }
    Ok(())
}

fn parse_entity(value: &str) -> Result<Entity, String> {
    Entity::parse(value).map_err(|e| format!("{e}: '{value}'"))
}

fn select_entity(selector: EntitySelector, filter: &str) -> Query {
    match filter.split_once(':') {
        None | Some((_, "")) => selector.is_namespace(filter.trim_end_matches(':')),
        Some(("", instance)) => selector.is_instance(instance),
        Some((namespace, instance)) => selector.is(namespace, instance),
    }
}

/// Runs `command` against `store`, writing results to `out`.
///
/// Returns the truth value that decides the exit status: the answer for
/// `contains` and `check`, true for every other command that succeeds.
pub fn execute<W: Write>(
    command: &Command,
    store: &TripleStore,
    out: &mut W,
) -> Result<bool, CliError> {
    match command {
        Command::Put(args) => {
            let triple = args.triple();
            let inserted = store.put(&triple)?;
            writeln!(out, "{} {triple}", if inserted { "stored" } else { "exists" })?;
            Ok(true)
        }
        Command::Delete(args) => {
            let triple = args.triple();
            let removed = store.delete(&triple)?;
            writeln!(out, "{} {triple}", if removed { "deleted" } else { "absent" })?;
            Ok(true)
        }
        Command::Contains(args) => {
            let found = store.contains(&args.triple());
            writeln!(out, "{found}")?;
            Ok(found)
        }
        Command::Check(args) => {
            let allowed = store.resolve(&args.triple())?;
            writeln!(out, "{allowed}")?;
            Ok(allowed)
        }
        Command::Query(args) => {
            let mut query = args.filter.query();
            if args.group_by_relation {
                query = query.group_by_relation();
            }
            let limit = args.limit.unwrap_or(usize::MAX);
            for triple in store.query(&query).take(limit) {
                if args.json {
                    serde_json::to_writer(&mut *out, &triple)?;
                    writeln!(out)?;
                } else {
                    writeln!(out, "{triple}")?;
                }
            }
            Ok(true)
        }
        Command::Count => {
            writeln!(out, "{}", store.count())?;
            Ok(true)
        }
        Command::DeleteByQuery(filter) => {
            let deleted = store.delete_by_query(&filter.query())?;
            writeln!(out, "deleted {deleted}")?;
            Ok(true)
        }
    }
}
