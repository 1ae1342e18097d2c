//! Batch runner: asset discovery, per-asset compilation, archive append.

use std::fs::OpenOptions;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::time::Instant;

use log::{debug, info};
use walkdir::WalkDir;

use crate::host::SceneHost;
use crate::util::Result;
use crate::wire::Writer;

use super::record::compile_record;

/// Compiles every supported asset under an input directory into a
/// single persistent archive.
///
/// The batch owns the encode buffer. Discovery covers the union of the
/// given hosts' supported extensions; each asset is dispatched to the
/// host claiming its extension and processed strictly one after
/// another, behind a full scene reset. The buffer is appended to the
/// archive file exactly once, after every asset has compiled. Any
/// failure aborts the whole run before the archive file is touched, so
/// an earlier successful archive is never corrupted, but none of this
/// run's assets are persisted either.
///
/// The archive file is opened in append mode: bytes from previous runs
/// are preserved and repeated runs accumulate duplicate records.
/// Callers wanting a clean archive must delete the file first.
pub struct Batch {
    input_dir: PathBuf,
    archive_path: PathBuf,
    writer: Writer,
}

impl Batch {
    /// Create a batch reading assets under `input_dir` and appending to
    /// the archive at `archive_path`.
    pub fn new(input_dir: impl Into<PathBuf>, archive_path: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            archive_path: archive_path.into(),
            writer: Writer::new(),
        }
    }

    /// Run the batch with the given scene hosts, one per source
    /// format. Returns the number of bytes appended to the archive.
    pub fn run(mut self, hosts: &mut [&mut dyn SceneHost]) -> Result<usize> {
        let started = Instant::now();
        let assets = {
            let extensions: Vec<&str> = hosts
                .iter()
                .flat_map(|h| h.supported_extensions().iter().copied())
                .collect();
            discover(&self.input_dir, &extensions)?
        };
        info!(
            "compiling {} assets from {}",
            assets.len(),
            self.input_dir.display()
        );

        for path in &assets {
            debug!("asset: {}", path.display());
            // Discovery guarantees some host claims this extension.
            let ext = asset_extension(path).unwrap_or_default();
            let host = hosts
                .iter_mut()
                .find(|h| h.supported_extensions().contains(&ext.as_str()))
                .expect("discovered asset with unclaimed extension");
            host.reset();
            host.import(path)?;
            compile_record(&mut **host, path, &mut self.writer)?;
        }

        let bytes = self.writer.into_bytes();
        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.archive_path)?;
        file.write_all(&bytes)?;

        info!(
            "appended {} bytes to {} in {:.2} sec",
            bytes.len(),
            self.archive_path.display(),
            started.elapsed().as_secs_f64()
        );
        Ok(bytes.len())
    }
}

/// Lowercased extension of an asset path.
fn asset_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}

/// Recursively collect asset paths with a supported extension, in
/// sorted directory-traversal order.
fn discover(root: &Path, extensions: &[&str]) -> Result<Vec<PathBuf>> {
    let mut assets = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }
        let matched = asset_extension(entry.path())
            .is_some_and(|e| extensions.contains(&e.as_str()));
        if matched {
            assets.push(entry.into_path());
        }
    }
    Ok(assets)
}
