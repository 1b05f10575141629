//! Application configuration constants.
//! Tuning and thresholds in one place.

use std::sync::OnceLock;

// ---- Package names (from CARGO_PKG_NAME, cached) ----

/// Package-derived names: built once from `CARGO_PKG_NAME`, then cached.
pub struct PackagePaths {
    config_filename: String,
    env_prefix: String,
}

static PACKAGE_PATHS: OnceLock<PackagePaths> = OnceLock::new();

impl PackagePaths {
    /// Build and cache names from `CARGO_PKG_NAME`. Called once on first use.
    pub fn get() -> &'static PackagePaths {
        PACKAGE_PATHS.get_or_init(|| {
            let pkg = env!("CARGO_PKG_NAME");
            PackagePaths {
                config_filename: format!(".{pkg}.toml"),
                env_prefix: pkg.to_uppercase(),
            }
        })
    }

    /// Config file looked up in the working directory (e.g. `.signer.toml`).
    pub fn config_filename(&self) -> &str {
        &self.config_filename
    }

    /// Environment variable name for `key`, e.g. `SIGNER_WORKERS`.
    pub fn env_var(&self, key: &str) -> String {
        format!("{}_{}", self.env_prefix, key.to_uppercase())
    }
}

// ---- Worker threads ----

/// Bounds for the per-stage fan-out pool.
/// Use [`WorkerLimits::current()`] to fill `all_threads` from rayon; the rest are const.
#[derive(Clone, Copy, Debug)]
pub struct WorkerLimits {
    /// Available threads (from rayon); set by [`WorkerLimits::current()`].
    pub all_threads: usize,
    /// Minimum pool size, even on small machines.
    pub floor: usize,
    /// Maximum pool size.
    pub max: usize,
}

impl Default for WorkerLimits {
    fn default() -> Self {
        Self {
            all_threads: 0, // use current() to set from rayon
            floor: Self::FLOOR_WORKERS,
            max: Self::MAX_WORKERS,
        }
    }
}

impl WorkerLimits {
    pub const FLOOR_WORKERS: usize = 4;
    pub const MAX_WORKERS: usize = 100;

    /// Build limits with `all_threads` set from `rayon::current_num_threads()`.
    pub fn current() -> Self {
        Self {
            all_threads: rayon::current_num_threads(),
            ..Self::default()
        }
    }

    /// Default pool size: available threads clamped to `[floor, max]`.
    pub fn default_workers(&self) -> usize {
        self.all_threads.clamp(self.floor, self.max)
    }

    /// Clamp a requested pool size into `[1, max]`.
    pub fn clamp_requested(&self, requested: usize) -> usize {
        requested.clamp(1, self.max)
    }
}

// ---- Relays ----

/// Relay (bounded channel) sizing.
pub struct RelayConsts;

impl RelayConsts {
    /// Slots per relay between two stages.
    pub const CAPACITY: usize = 100;
}

// ---- Hashing ----

/// Stage layout constants.
pub struct HashingConsts;

impl HashingConsts {
    /// Number of prefixed variants computed per item by the multi-hash stage (prefixes 0..=5).
    pub const MULTI_HASH_VARIANTS: usize = 6;
    /// Joins the two halves of a single-hash value.
    pub const SINGLE_HASH_SEPARATOR: &'static str = "~";
    /// Joins the sorted values in the aggregate.
    pub const COMBINE_SEPARATOR: &'static str = "_";
}
