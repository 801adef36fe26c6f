//! YAML documents and path-based access to them.

pub mod cursor;
pub mod node;
pub mod parser;
pub mod tree;
