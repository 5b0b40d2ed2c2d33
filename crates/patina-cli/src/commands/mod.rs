pub mod check;
pub mod generators;
pub mod simulate;

use std::fs;
use std::path::Path;

/// Read a file into a string, naming the path on failure.
fn read_file(path: &Path) -> Result<String, String> {
    fs::read_to_string(path).map_err(|e| format!("cannot read {}: {e}", path.display()))
}
