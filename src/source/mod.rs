pub mod pairs;

pub use pairs::{discover_pairs, read_pair, Discovery, FilePair, PairText};
