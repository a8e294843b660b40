use std::fs;
use std::path::Path;

use slabs::{Slab, SlabTable};
use tracing::debug;

use crate::error::CliError;

/// Read a snapshot file.
///
/// Without a table the file is a plain JSON array of slabs; with one it is the
/// backend's list response for that table.
pub fn load(path: &Path, table: Option<SlabTable>) -> Result<Vec<Slab>, CliError> {
    let body = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let slabs = match table {
        Some(table) => {
            debug!(table = %table, endpoint = table.collection_path(), "decoding list response");
            table.decode_list(&body)?
        }
        None => serde_json::from_str(&body)?,
    };
    debug!(path = %path.display(), count = slabs.len(), "snapshot loaded");
    Ok(slabs)
}

/// Write a snapshot in the same shape [`load`] reads for `table`.
pub fn save(path: &Path, table: Option<SlabTable>, slabs: &[Slab]) -> Result<(), CliError> {
    let mut body = match table {
        Some(table) => table.encode_list(slabs)?,
        None => serde_json::to_string_pretty(slabs)?,
    };
    body.push('\n');
    fs::write(path, body).map_err(|source| CliError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), count = slabs.len(), "snapshot saved");
    Ok(())
}
