//! File I/O operations for YAML documents.
//!
//! This module provides functionality to load YAML files from disk or stdin,
//! including gzip-compressed input.

pub mod loader;
