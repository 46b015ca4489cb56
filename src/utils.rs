use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{anyhow, Context};
use repring::{CharacterTable, IntegralityPolicy, RingError};

use crate::graded::BigradedModule;
use crate::series::ProductBundle;

const STATIC_TABLES_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/character_tables");

/// Run-time options of the binary.
#[derive(Clone, Debug)]
pub struct Config {
    /// Name of the character table, or a path to it
    pub table: String,
    /// Largest number of fiber factors
    pub max: i32,
    pub policy: IntegralityPolicy,
    /// Whether to multiply the base by the exterior factors
    pub exterior: bool,
    pub json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            table: "e6".to_string(),
            max: 8,
            policy: IntegralityPolicy::Warn,
            exterior: false,
            json: false,
        }
    }
}

impl TryFrom<&clap::ArgMatches<'_>> for Config {
    type Error = anyhow::Error;

    fn try_from(matches: &clap::ArgMatches<'_>) -> Result<Self, Self::Error> {
        let default = Self::default();
        let max = match matches.value_of("max") {
            Some(x) => x.parse().with_context(|| format!("Invalid value for --max: {x}"))?,
            None => default.max,
        };
        if max < 0 {
            return Err(anyhow!("--max must be non-negative, got {max}"));
        }
        Ok(Self {
            table: matches.value_of("table").unwrap_or(default.table.as_str()).to_string(),
            max,
            policy: if matches.is_present("strict") {
                IntegralityPolicy::Strict
            } else {
                IntegralityPolicy::Warn
            },
            exterior: matches.is_present("exterior"),
            json: matches.is_present("json"),
        })
    }
}

/// Locates the character table `name`. Tables are named `<name>-character-table` and searched for
/// in the current directory, `$CWD/character_tables` and the bundled `character_tables`. A name
/// containing a path separator is used as a path directly.
pub fn table_path(name: &str) -> anyhow::Result<PathBuf> {
    if name.contains('/') || name.contains(std::path::MAIN_SEPARATOR) {
        return Ok(PathBuf::from(name));
    }
    let file_name = format!("{name}-character-table");
    let current_dir = std::env::current_dir()?;
    let relative_dir = current_dir.join("character_tables");

    for dir in [current_dir, relative_dir, PathBuf::from(STATIC_TABLES_PATH)] {
        let path = dir.join(&file_name);
        if path.is_file() {
            return Ok(path);
        }
    }
    Err(RingError::TableNotFound(name.to_string()).into())
}

pub fn load_table(name: &str, policy: IntegralityPolicy) -> anyhow::Result<CharacterTable> {
    let path = table_path(name)?;
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read character table {}", path.display()))?;
    let table = CharacterTable::parse(&text, policy)
        .with_context(|| format!("Failed to load character table {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        classes = table.classes(),
        size = table.size(),
        "loaded character table"
    );
    Ok(table)
}

pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| anyhow!(e))
}

/// Prints the character of every piece of `module`, one per line.
pub fn write_characters(
    out: &mut impl Write,
    table: &CharacterTable,
    module: &BigradedModule,
) -> anyhow::Result<()> {
    for v in module.representations() {
        writeln!(out, "{}", table.to_character(v)?)?;
    }
    Ok(())
}

/// Prints the characters of the base and of the fiber, followed by the polynomials for
/// `n = 1, ..., max`. With `json` only the polynomials are printed, as an object keyed by `n`.
pub fn write_report(
    out: &mut impl Write,
    bundle: &ProductBundle,
    max: i32,
    json: bool,
) -> anyhow::Result<()> {
    let polynomials = bundle.polynomials(1..=max)?;

    if json {
        let polynomials: BTreeMap<_, _> = polynomials.into_iter().collect();
        serde_json::to_writer_pretty(&mut *out, &polynomials)?;
        writeln!(out)?;
        return Ok(());
    }

    write_characters(out, bundle.table(), bundle.base())?;
    write_characters(out, bundle.table(), &bundle.fiber_power(1)?)?;

    writeln!(out, "{{")?;
    for (_, p) in polynomials {
        writeln!(out, "{p} , ")?;
    }
    writeln!(out, "}}")?;
    Ok(())
}
