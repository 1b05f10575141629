//! CLI command handler: resolve options, read items, sign, print.

use anyhow::{Context, Result};
use log::debug;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::engine::arg_parser::Cli;
use crate::utils::setup_logging;
use crate::utils::signer_toml::{
    SignerToml, apply_env_lookup, apply_file_to_opts, load_signer_toml,
};
use crate::{Opts, SignOpts, SignReport};

/// Load `.signer.toml` and `.env`, set up logging, then resolve the effective options.
fn setup_opts(cli: &Cli) -> Opts {
    let file = std::env::current_dir()
        .ok()
        .and_then(|dir| load_signer_toml(&dir));
    let parsed = match &file {
        Some((_, Ok(file))) => Some(file),
        _ => None,
    };

    let verbose = cli
        .verbose
        .or_else(|| parsed.and_then(SignerToml::verbose))
        .unwrap_or(false);
    setup_logging(verbose);

    if let Some((path, Err(e))) = &file {
        log::warn!("{}: {}", path.display(), e);
    }

    let _ = dotenvy::dotenv();
    resolve_opts(cli, parsed, |key| std::env::var(key).ok())
}

/// Defaults < `.signer.toml` < environment < CLI flags.
///
/// `env` looks up variables such as `SIGNER_WORKERS`; unparsable values are ignored.
pub fn resolve_opts(
    cli: &Cli,
    file: Option<&SignerToml>,
    env: impl Fn(&str) -> Option<String>,
) -> Opts {
    let mut opts = Opts::default();
    if let Some(file) = file {
        apply_file_to_opts(file, &mut opts);
    }
    apply_env_lookup(&mut opts, env);

    if cli.workers.is_some() {
        opts.workers = cli.workers;
    }
    if cli.relay_cap.is_some() {
        opts.relay_cap = cli.relay_cap;
    }
    if let Some(algo) = cli.chained {
        opts.chained = algo;
    }
    if let Some(v) = cli.json {
        opts.json = v;
    }
    if let Some(v) = cli.verbose {
        opts.verbose = v;
    }
    opts
}

/// Positional items first, then lines from `--input` (`-` for stdin).
pub fn collect_items(cli: &Cli) -> Result<Vec<String>> {
    let mut items = cli.items.clone();
    if let Some(path) = &cli.input {
        items.extend(read_item_lines(path)?);
    }
    Ok(items)
}

/// One item per line of `path`; blank lines are skipped.
pub fn read_item_lines(path: &Path) -> Result<Vec<String>> {
    let source = path.display().to_string();
    if path == Path::new("-") {
        return parse_item_lines(BufReader::new(std::io::stdin()), &source);
    }
    let file =
        std::fs::File::open(path).with_context(|| format!("open input {}", path.display()))?;
    parse_item_lines(BufReader::new(file), &source)
}

/// Non-blank lines of `reader`, kept verbatim.
pub fn parse_item_lines<R: BufRead>(reader: R, source: &str) -> Result<Vec<String>> {
    let mut items = Vec::new();
    for line in reader.lines() {
        let line = line.with_context(|| format!("read input {source}"))?;
        if !line.trim().is_empty() {
            items.push(line);
        }
    }
    Ok(items)
}

/// Sign the items named on the command line and print the signature (or JSON report).
pub fn handle_run(cli: &Cli) -> Result<()> {
    let opts = setup_opts(cli);
    debug!("{:#?}", opts);
    let items = collect_items(cli)?;
    let count = items.len();
    let result = crate::sign(&items, &SignOpts::from(&opts))?;
    if opts.json {
        let report = SignReport {
            items: count,
            result,
        };
        println!("{}", serde_json::to_string(&report)?);
    } else {
        println!("{}", result);
    }
    Ok(())
}
