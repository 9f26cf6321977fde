pub mod adjacency;

pub use adjacency::{parse_adjacency, ParseError};
