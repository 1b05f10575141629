//! Hashing primitives and the gate that serializes the non-reentrant one.

use md5::{Digest, Md5};
use std::sync::{Mutex, PoisonError};

use crate::ChainedAlgo;

/// The two hash functions the stages are built on.
///
/// Both must be deterministic functions of their input. `fast_hash` may be called from many
/// threads at once; `chained_hash` must not be, and the stages only ever call it through
/// [`CHAINED_GATE`].
pub trait HashPrimitives: Send + Sync {
    /// Expensive hash, not safe for concurrent invocation.
    fn chained_hash(&self, data: &str) -> String;
    /// Cheap hash, safe for concurrent invocation.
    fn fast_hash(&self, data: &str) -> String;
}

/// Production primitives: CRC-32 (IEEE) as decimal for `fast_hash`, MD5 or BLAKE3 hex for `chained_hash`.
#[derive(Clone, Copy, Debug, Default)]
pub struct DataSigner {
    chained: ChainedAlgo,
}

impl DataSigner {
    pub fn new(chained: ChainedAlgo) -> Self {
        Self { chained }
    }
}

impl HashPrimitives for DataSigner {
    fn chained_hash(&self, data: &str) -> String {
        match self.chained {
            ChainedAlgo::Md5 => md5_hex(data),
            ChainedAlgo::Blake3 => blake3::hash(data.as_bytes()).to_hex().to_string(),
        }
    }

    fn fast_hash(&self, data: &str) -> String {
        crc32_decimal(data)
    }
}

/// CRC-32/IEEE of the UTF-8 bytes, rendered as an unsigned decimal.
pub fn crc32_decimal(data: &str) -> String {
    crc32fast::hash(data.as_bytes()).to_string()
}

/// MD5 of the UTF-8 bytes, rendered as 32 lowercase hex digits.
pub fn md5_hex(data: &str) -> String {
    format!("{:x}", Md5::digest(data.as_bytes()))
}

/// Mutual exclusion around exactly one call.
///
/// The lock guards no data, so a poisoned lock (a panic inside a previous call) is simply reused.
#[derive(Debug, Default)]
pub struct SerializationGate {
    lock: Mutex<()>,
}

impl SerializationGate {
    pub const fn new() -> Self {
        Self {
            lock: Mutex::new(()),
        }
    }

    /// Run `f` while holding the gate. Never call relay operations inside `f`.
    pub fn call<R>(&self, f: impl FnOnce() -> R) -> R {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        f()
    }
}

/// Process-wide gate for every `chained_hash` call.
pub static CHAINED_GATE: SerializationGate = SerializationGate::new();
