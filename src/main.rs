//! `trick-catalog` command line.
//!
//! Builds catalog documents from the raw trick list and resolves single
//! queries against them. Results go to stdout, logs to stderr.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing::{error, info, warn};
use trick_catalog::catalog::document::write_catalog;
use trick_catalog::{
    build_from_path, ActiveStance, CatalogError, NaturalStance, Rotation, TrickConfig, TrickKey, TrickQuery,
};

#[derive(Parser, Debug)]
#[command(name = "trick-catalog")]
#[command(about = "Build skateboard trick catalogs and name tricks from their rotations")]
#[command(version)]
struct Cli {
    /// TOML settings file
    #[arg(long, short = 'c', value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Catalog document to read (overrides config and TRICK_CATALOG)
    #[arg(long, value_name = "PATH", global = true)]
    catalog: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a raw trick list into a catalog document
    Build {
        /// Raw list: spin, flip, body, activeStance, name per line
        input: PathBuf,
        /// Output document (.json or .toon)
        #[arg(short, long, default_value = "TrickCatalog.json")]
        output: PathBuf,
    },
    /// Name a trick from its rotations
    Resolve(ResolveArgs),
    /// Show the catalog entry stored under a key such as S180,F-360,B0
    Lookup { key: String },
    /// List every catalog entry
    List,
}

#[derive(Args, Debug)]
struct ResolveArgs {
    /// Board spin in degrees
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    spin: i32,
    /// Board flip in degrees
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    flip: i32,
    /// Body spin in degrees
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    body: i32,
    /// Natural stance: regular/goofy (r/g)
    #[arg(long)]
    natural: Option<String>,
    /// Active stance: normal/fakie/nollie/switch (f/n/s)
    #[arg(long, default_value = "normal")]
    stance: String,
    #[arg(long, allow_hyphen_values = true)]
    late_spin: Option<i32>,
    #[arg(long, allow_hyphen_values = true)]
    late_flip: Option<i32>,
    #[arg(long, allow_hyphen_values = true)]
    late_body: Option<i32>,
    /// Reject rotations that are not whole half turns (spin, body) or full turns (flip)
    #[arg(long)]
    strict: bool,
}

impl ResolveArgs {
    fn late(&self) -> Option<Rotation> {
        if self.late_spin.is_none() && self.late_flip.is_none() && self.late_body.is_none() {
            return None;
        }
        Some(Rotation::new(
            self.late_spin.unwrap_or(0),
            self.late_flip.unwrap_or(0),
            self.late_body.unwrap_or(0),
        ))
    }

    fn query(&self, cfg: &TrickConfig) -> Result<TrickQuery, CatalogError> {
        let natural = match &self.natural {
            Some(raw) => raw.parse::<NaturalStance>()?,
            None => cfg.natural_stance,
        };
        let active = self.stance.parse::<ActiveStance>()?;
        let mut query = TrickQuery::new(Rotation::new(self.spin, self.flip, self.body), natural, active);
        if let Some(late) = self.late() {
            query = query.with_late(late);
        }
        Ok(query)
    }
}

fn setup_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("trick_catalog=debug")
        } else {
            EnvFilter::new("trick_catalog=info")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(cli: &Cli) -> Result<TrickConfig, CatalogError> {
    let cfg = match &cli.config {
        Some(path) => TrickConfig::load(path)?,
        None => TrickConfig::default(),
    };
    let mut cfg = cfg.with_env_overrides();
    if let Some(path) = &cli.catalog {
        cfg.catalog_path = path.clone();
    }
    Ok(cfg)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), CatalogError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run(cli: Cli) -> Result<ExitCode, CatalogError> {
    let cfg = load_config(&cli)?;

    match &cli.command {
        Command::Build { input, output } => {
            let (catalog, report) = build_from_path(input)?;
            for s in &report.skipped {
                warn!(line = s.line, reason = %s.reason, "skipped row");
            }
            write_catalog(output, &catalog)?;
            println!(
                "Successfully wrote {} tricks to {} ({} skipped, {} key collisions).",
                report.emitted,
                output.display(),
                report.skipped.len(),
                report.collisions.len()
            );
        }
        Command::Resolve(args) => {
            let query = args.query(&cfg)?;
            if args.strict || cfg.enforce_conventions {
                let mut violations = query.rotation().convention_violations();
                if let Some(late) = query.late_params {
                    violations.extend(late.convention_violations());
                }
                if !violations.is_empty() {
                    for v in &violations {
                        error!("{v}");
                    }
                    return Ok(ExitCode::from(2));
                }
            }
            let store = cfg.open_store()?;
            let result = store.resolve(&query);
            info!(resolved = result.fully_resolved(), "{}", result.trick_name);
            print_json(&result)?;
        }
        Command::Lookup { key } => {
            let store = cfg.open_store()?;
            let Some(rotation) = TrickKey::parse(key) else {
                error!(%key, "not a lookup key, expected S<spin>,F<flip>,B<body>");
                return Ok(ExitCode::from(2));
            };
            match store.lookup_rotation(rotation) {
                Some(entry) => print_json(entry)?,
                None => {
                    warn!(%key, "no catalog entry");
                    return Ok(ExitCode::from(1));
                }
            }
        }
        Command::List => {
            let store = cfg.open_store()?;
            for (key, entry) in store.iter() {
                if entry.other_names.is_empty() {
                    println!("{key}\t{}", entry.canonical_name);
                } else {
                    println!("{key}\t{} ({})", entry.canonical_name, entry.other_names.join(", "));
                }
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
