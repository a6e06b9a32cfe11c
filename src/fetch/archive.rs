//! Archive extraction for the downloaded bundles

use crate::Result;
use std::fs;
use std::path::Path;
use tracing::info;

/// Extract a zip archive into a directory
pub fn extract_zip(archive: &Path, dest: &Path) -> Result<()> {
    info!("extracting {} to {}", archive.display(), dest.display());
    let file = fs::File::open(archive)?;
    let mut zip = zip::ZipArchive::new(file)?;
    zip.extract(dest)?;
    Ok(())
}

/// Extract a .tar.xz archive into a directory
pub fn extract_tar_xz(archive: &Path, dest: &Path) -> Result<()> {
    info!("extracting {} to {}", archive.display(), dest.display());
    fs::create_dir_all(dest)?;
    let file = fs::File::open(archive)?;
    let decoder = xz2::read::XzDecoder::new(file);
    let mut tar = tar::Archive::new(decoder);
    tar.unpack(dest)?;
    Ok(())
}
