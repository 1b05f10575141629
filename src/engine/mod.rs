//! Engine module: hash primitives, the three stages, and the CLI handler.

pub mod arg_parser;
pub mod cli;
pub mod combine;
pub mod core;
pub mod hashing;
pub mod multi_hash;
pub mod single_hash;

// Re-export commonly used items
pub use arg_parser::Cli;
pub use cli::{collect_items, handle_run, parse_item_lines, read_item_lines, resolve_opts};
pub use combine::{CombineResults, combine_results};
pub use self::core::{sign_items, standard_stages};
pub use hashing::{
    CHAINED_GATE, DataSigner, HashPrimitives, SerializationGate, crc32_decimal, md5_hex,
};
pub use multi_hash::{MultiHash, multi_hash};
pub use single_hash::{SingleHash, single_hash};
