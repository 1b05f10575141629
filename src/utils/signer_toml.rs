//! Load `.signer.toml` and environment overrides (CLI only). Lib callers pass [`SignOpts`](crate::SignOpts) directly.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::utils::config::PackagePaths;
use crate::{ChainedAlgo, Opts};

#[derive(Debug, Deserialize)]
pub struct SignerToml {
    #[serde(default)]
    settings: SettingsSection,
}

#[derive(Debug, Default, Deserialize)]
struct SettingsSection {
    workers: Option<usize>,
    relay_cap: Option<usize>,
    chained: Option<ChainedAlgo>,
    json: Option<bool>,
    verbose: Option<bool>,
}

/// Load `.signer.toml` from `dir`. Returns None if the file is missing or unreadable; a parse
/// failure is returned with the path so the caller can log it once logging is up.
pub fn load_signer_toml(
    dir: &Path,
) -> Option<(PathBuf, Result<SignerToml, toml::de::Error>)> {
    let path = dir.join(PackagePaths::get().config_filename());
    let s = std::fs::read_to_string(&path).ok()?;
    let parsed = parse_signer_toml(&s);
    Some((path, parsed))
}

impl SignerToml {
    /// `verbose` from the file, needed before logging is set up.
    pub fn verbose(&self) -> Option<bool> {
        self.settings.verbose
    }
}

pub fn parse_signer_toml(s: &str) -> Result<SignerToml, toml::de::Error> {
    toml::from_str(s)
}

/// Overwrite opts field from file when present.
macro_rules! apply_file_opt {
    ($src:expr, $opts:expr, $src_field:ident => $opts_field:ident) => {
        if let Some(v) = $src.$src_field {
            $opts.$opts_field = Some(v);
        }
    };
}

/// Apply file config to opts (only fields present in the file). Call before env and CLI.
pub fn apply_file_to_opts(file: &SignerToml, opts: &mut Opts) {
    let s = &file.settings;
    apply_file_opt!(s, opts, workers => workers);
    apply_file_opt!(s, opts, relay_cap => relay_cap);
    if let Some(algo) = s.chained {
        opts.chained = algo;
    }
    if let Some(v) = s.json {
        opts.json = v;
    }
    if let Some(v) = s.verbose {
        opts.verbose = v;
    }
}

/// Apply `SIGNER_WORKERS` / `SIGNER_RELAY_CAP`, read through `lookup` (the process environment
/// once `.env` is loaded). Unparsable values are logged and ignored.
pub fn apply_env_lookup(opts: &mut Opts, lookup: impl Fn(&str) -> Option<String>) {
    let paths = PackagePaths::get();
    if let Some(n) = env_usize(&paths.env_var("workers"), &lookup) {
        opts.workers = Some(n);
    }
    if let Some(n) = env_usize(&paths.env_var("relay_cap"), &lookup) {
        opts.relay_cap = Some(n);
    }
}

fn env_usize(key: &str, lookup: &impl Fn(&str) -> Option<String>) -> Option<usize> {
    let raw = lookup(key)?;
    raw.trim()
        .parse()
        .map_err(|e| log::warn!("ignoring {}={:?}: {}", key, raw, e))
        .ok()
}
