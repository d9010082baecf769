use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

use tracing::debug;

/// Writes contents to a file, creating parent directories if they don't exist.
///
/// Used for prediction reports; an existing file at `path` is replaced.
pub fn write_file<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> io::Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(contents.as_ref())?;
    debug!("wrote {} bytes to {}", contents.as_ref().len(), path.display());
    Ok(())
}
