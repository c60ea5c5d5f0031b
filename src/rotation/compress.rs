//! Gzip for rotated backups. The result stays readable with `zcat`.

use crate::Error;
use flate2::Compression;
use flate2::write::GzEncoder;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

/// Writes `path.gz` next to `path`, copies the original's permissions onto it, then
/// removes the original. Returns the new path and the bytes saved.
///
/// A partially written `.gz` is removed on failure so the uncompressed backup stays
/// the only copy.
pub(super) fn compress_file(path: &Path) -> Result<(PathBuf, u64), Error> {
    let gz_path = PathBuf::from(format!("{}{}", path.display(), super::COMPRESS_SUFFIX));
    match write_gz(path, &gz_path) {
        Ok(original_size) => {
            let compressed_size = fs::metadata(&gz_path)?.len();
            fs::remove_file(path)?;
            Ok((gz_path, original_size.saturating_sub(compressed_size)))
        }
        Err(e) => {
            let _ = fs::remove_file(&gz_path);
            Err(e)
        }
    }
}

fn write_gz(path: &Path, gz_path: &Path) -> Result<u64, Error> {
    let input = File::open(path)?;
    let metadata = input.metadata()?;
    let mut reader = BufReader::new(input);

    let output = File::create(gz_path)?;
    fs::set_permissions(gz_path, metadata.permissions())?;
    let writer = BufWriter::new(output);
    let mut encoder = GzEncoder::new(writer, Compression::default());

    let mut buffer = [0u8; 8192];
    loop {
        let bytes_read = reader.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        encoder.write_all(&buffer[..bytes_read])?;
    }
    encoder.finish()?.flush()?;

    Ok(metadata.len())
}
