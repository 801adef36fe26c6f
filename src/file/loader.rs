//! YAML file loading functionality.
//!
//! This module provides functions to load YAML documents from files or stdin,
//! parsing them into `YamlTree` structures that path expressions can be
//! resolved against. Gzip-compressed input is decompressed transparently.

use crate::document::parser::parse_yaml;
use crate::document::tree::YamlTree;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Loads and parses a YAML file from the filesystem.
///
/// Files ending in `.gz` are decompressed before parsing.
///
/// # Examples
///
/// ```no_run
/// use yamlselect::file::loader::load_yaml_file;
///
/// let tree = load_yaml_file("config.yaml").unwrap();
/// let name = tree.select("service.name");
/// ```
///
/// # Errors
///
/// This function will return an error if:
/// - The file path does not exist
/// - The file cannot be read (permissions, etc.)
/// - The file is not valid gzip or the contents are not valid YAML
pub fn load_yaml_file<P: AsRef<Path>>(path: P) -> Result<YamlTree> {
    let path_ref = path.as_ref();

    let is_gzipped = path_ref
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == "gz")
        .unwrap_or(false);

    let content = if is_gzipped {
        read_gzipped_file(path_ref)?
    } else {
        fs::read_to_string(path_ref)
            .with_context(|| format!("Failed to read file {}", path_ref.display()))?
    };

    log::debug!("read {} bytes from {}", content.len(), path_ref.display());
    parse_yaml(&content).with_context(|| format!("Failed to load {}", path_ref.display()))
}

/// Loads and parses YAML from standard input.
///
/// Input starting with the gzip magic bytes is decompressed first.
///
/// # Errors
///
/// This function will return an error if:
/// - Reading from stdin fails
/// - The input is not valid UTF-8 or not valid YAML
pub fn load_yaml_from_stdin() -> Result<YamlTree> {
    use std::io::{self, Read};

    let mut buffer = Vec::new();
    io::stdin()
        .read_to_end(&mut buffer)
        .context("Failed to read from stdin")?;

    let content = decode_bytes(buffer)?;
    parse_yaml(&content).context("Failed to parse YAML from stdin")
}

/// Turns raw input into text, decompressing gzip data (magic bytes 0x1f 0x8b).
fn decode_bytes(buffer: Vec<u8>) -> Result<String> {
    if buffer.starts_with(&[0x1f, 0x8b]) {
        decompress_gzip_bytes(&buffer)
    } else {
        String::from_utf8(buffer).context("Invalid UTF-8 in stdin")
    }
}

/// Reads and decompresses a gzipped file.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened
/// - The file is not valid gzip format (corrupted)
/// - The decompressed content is not valid UTF-8
fn read_gzipped_file<P: AsRef<Path>>(path: P) -> Result<String> {
    use flate2::read::GzDecoder;
    use std::io::Read;

    let file = fs::File::open(path).context("Failed to open gzipped file")?;
    let mut decoder = GzDecoder::new(file);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzipped file - file may be corrupted")?;
    Ok(content)
}

fn decompress_gzip_bytes(bytes: &[u8]) -> Result<String> {
    use flate2::read::GzDecoder;
    use std::io::Read;

    let mut decoder = GzDecoder::new(bytes);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzipped stdin")?;
    Ok(content)
}
