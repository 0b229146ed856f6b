use anyhow::Result;
use std::{fs::File, io::Write, path::Path};

pub fn validate_csv_file<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();

    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_lowercase());
    match ext.as_deref() {
        Some("csv") => {}
        _ => anyhow::bail!("File must have a .csv extension: {}", path.display()),
    }

    if !path.exists() {
        anyhow::bail!("File does not exist: {}", path.display());
    }

    Ok(())
}

pub fn write_bytes_to_file<P: AsRef<Path>>(path: P, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    Ok(())
}
