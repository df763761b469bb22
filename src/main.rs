//! fuzzy CLI entry point

use anyhow::{Context, Result};
use fuzzy::config::cli::{Cli, Command};
use fuzzy::config::toml::load_config;
use fuzzy::config::{AnyDistribution, Config, ParserKind};
use fuzzy::output::{json, text};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    init_logging(cli.debug);
    cli.validate()?;

    let config = load_config(&cli)?;
    tracing::debug!(
        distributions = config.distributions.len(),
        seed = ?config.sampling.seed,
        count = config.sampling.count,
        "configuration loaded"
    );

    match &cli.command {
        Command::Check {
            spec,
            parser,
            pattern,
        } => run_check(spec, *parser, *pattern),
        Command::Sample {
            spec,
            parser,
            json: as_json,
        } => run_sample(&config, spec, *parser, *as_json),
        Command::Show => run_show(&config),
    }
}

/// Install the stderr subscriber; RUST_LOG wins over --debug
fn init_logging(debug: bool) {
    let default = if debug { "fuzzy=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_check(spec: &str, parser: ParserKind, pattern: bool) -> Result<()> {
    if pattern {
        println!("{}", parser.allowed_pattern()?);
        return Ok(());
    }

    let dist = parser
        .build(spec)
        .with_context(|| format!("Invalid distribution: {}", spec))?;
    text::print_distribution(spec, &dist);
    Ok(())
}

fn run_sample(config: &Config, spec: &str, parser: ParserKind, as_json: bool) -> Result<()> {
    let dist = resolve(config, spec, parser)?;

    let mut rng = match config.sampling.seed {
        Some(seed) => Xoshiro256PlusPlus::seed_from_u64(seed),
        None => Xoshiro256PlusPlus::from_entropy(),
    };
    let report = dist.sample_report(&mut rng, config.sampling.count);

    if as_json {
        json::write_report(std::io::stdout().lock(), &report, true)?;
    } else {
        println!("{}", dist);
        println!();
        text::print_report(&report);
    }
    Ok(())
}

fn run_show(config: &Config) -> Result<()> {
    let built = config
        .build_distributions()
        .context("Configuration validation failed")?;

    if built.is_empty() {
        println!("No distributions configured");
    }
    for (i, (name, dist)) in built.iter().enumerate() {
        if i != 0 {
            println!();
        }
        text::print_distribution(name, dist);
    }
    Ok(())
}

/// A configured name wins over parsing `spec` as a literal distribution
fn resolve(config: &Config, spec: &str, parser: ParserKind) -> Result<AnyDistribution> {
    if let Some(named) = config.distributions.get(spec) {
        return named
            .parser
            .build(&named.spec)
            .with_context(|| format!("Invalid distribution '{}': {}", spec, named.spec));
    }

    parser
        .build(spec)
        .with_context(|| format!("Invalid distribution: {}", spec))
}
