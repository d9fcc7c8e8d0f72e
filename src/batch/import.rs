//! Batch import module.
//!
//! Drives per-message transcoding across many inputs, tracking each
//! item's outcome independently: one failing input never takes its
//! siblings down with it. Failures that make the whole destination
//! unusable abort the batch before any item is touched.

use chrono::Local;
use log::{debug, info, warn};
use serde::Serialize;
use std::{
    error,
    fs, io,
    path::{Path, PathBuf},
    result,
};
use thiserror::Error;

use crate::{
    backend::{self, Backend, Writer},
    source::Source,
};

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot use destination")]
    CheckUpError(#[source] backend::Error),
    #[error("cannot create destination folder {1}")]
    CreateFolderError(#[source] backend::Error, String),
    #[error("cannot read input directory {1}")]
    ReadInputDirError(#[source] io::Error, PathBuf),
}

pub type Result<T> = result::Result<T, Error>;

/// Outcome of one failed input.
#[derive(Debug, Clone, Serialize)]
pub struct BatchFailure {
    pub path: PathBuf,
    pub reason: String,
}

/// Per-item outcomes of a whole batch. Partial success is a valid
/// terminal state, not an error.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    /// Produced outputs: file paths for per-file conversions, input
    /// paths for container imports.
    pub succeeded: Vec<PathBuf>,
    pub failed: Vec<BatchFailure>,
}

impl BatchReport {
    fn success(&mut self, path: PathBuf) {
        self.succeeded.push(path);
    }

    fn failure(&mut self, path: &Path, reason: String) {
        warn!("cannot convert {:?}: {}", path, reason);
        self.failed.push(BatchFailure {
            path: path.to_owned(),
            reason,
        });
    }
}

/// Default name of the folder a batch imports into.
pub fn generate_folder_name() -> String {
    format!("Imported mails ({})", Local::now().format("%Y-%m-%d %H.%M"))
}

/// Flattens an error and its cause chain into one line, so a batch
/// report names both the offending file and the underlying cause.
fn describe(err: &dyn error::Error) -> String {
    let mut desc = err.to_string();
    let mut cause = err.source();
    while let Some(err) = cause {
        desc.push_str(": ");
        desc.push_str(&err.to_string());
        cause = err.source();
    }
    desc
}

fn read_message(source: &dyn Source, path: &Path) -> result::Result<crate::Message, String> {
    let raw = fs::read(path)
        .map_err(|err| format!("cannot read input file {}: {}", path.display(), err))?;
    source.read(&raw).map_err(|err| describe(&err))
}

fn output_path(input: &Path, out_dir: Option<&Path>, extension: &str) -> PathBuf {
    let out = input.with_extension(extension);
    if let Some(dir) = out_dir {
        if let Some(name) = out.file_name() {
            return dir.join(name);
        }
    }
    out
}

/// Drives batches of conversions, one message fully transcoded after
/// the other.
#[derive(Debug, Default)]
pub struct BatchImporter;

impl BatchImporter {
    /// Imports every input into one folder of a container destination.
    ///
    /// The destination is checked once up front: an unusable
    /// destination refuses the whole batch before any item is read.
    /// The folder is created once, reusing an existing folder of the
    /// same name.
    pub fn import_all(
        &self,
        backend: &dyn Backend,
        source: &dyn Source,
        paths: &[PathBuf],
        folder: &str,
    ) -> Result<BatchReport> {
        backend.check_up().map_err(Error::CheckUpError)?;
        backend
            .add_folder(folder)
            .map_err(|err| Error::CreateFolderError(err, folder.to_owned()))?;

        info!("importing {} messages into folder {}", paths.len(), folder);

        let mut report = BatchReport::default();
        for path in paths {
            let outcome = read_message(source, path)
                .and_then(|msg| backend.add_message(folder, &msg).map_err(|err| describe(&err)));

            match outcome {
                Ok(id) => {
                    debug!("imported {:?} as {}", path, id);
                    report.success(path.clone());
                }
                Err(reason) => report.failure(path, reason),
            }
        }

        info!(
            "import done: {} succeeded, {} failed",
            report.succeeded.len(),
            report.failed.len()
        );
        Ok(report)
    }

    /// Converts every input to its own output file: input stem plus
    /// the writer's extension, next to the input or under `out_dir`
    /// when one is given.
    pub fn convert_each(
        &self,
        writer: &dyn Writer,
        source: &dyn Source,
        paths: &[PathBuf],
        out_dir: Option<&Path>,
    ) -> Result<BatchReport> {
        writer.check_up().map_err(Error::CheckUpError)?;

        info!("converting {} messages", paths.len());

        let mut report = BatchReport::default();
        for path in paths {
            let out = output_path(path, out_dir, writer.extension());
            let outcome = read_message(source, path)
                .and_then(|msg| writer.write(&msg, &out).map_err(|err| describe(&err)));

            match outcome {
                Ok(()) => {
                    debug!("converted {:?} to {:?}", path, out);
                    report.success(out);
                }
                Err(reason) => report.failure(path, reason),
            }
        }

        info!(
            "conversion done: {} succeeded, {} failed",
            report.succeeded.len(),
            report.failed.len()
        );
        Ok(report)
    }
}

/// Collects candidate input files under a directory by extension,
/// case-insensitively, sorted for a stable batch order.
pub fn find_inputs(dir: &Path, extension: &str, recursive: bool) -> Result<Vec<PathBuf>> {
    let mut inputs = Vec::new();
    collect_inputs(dir, &extension.to_lowercase(), recursive, &mut inputs)?;
    inputs.sort();

    Ok(inputs)
}

fn collect_inputs(
    dir: &Path,
    extension: &str,
    recursive: bool,
    inputs: &mut Vec<PathBuf>,
) -> Result<()> {
    let entries =
        fs::read_dir(dir).map_err(|err| Error::ReadInputDirError(err, dir.to_owned()))?;

    for entry in entries {
        let entry = entry.map_err(|err| Error::ReadInputDirError(err, dir.to_owned()))?;
        let path = entry.path();

        if path.is_dir() {
            if recursive {
                collect_inputs(&path, extension, recursive, inputs)?;
            }
            continue;
        }

        let matches = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase() == extension)
            .unwrap_or(false);
        if matches {
            inputs.push(path);
        }
    }

    Ok(())
}

#[cfg(test)]
mod test_find_inputs {
    use std::fs;

    use super::find_inputs;

    #[test]
    fn test_extension_matching_is_case_insensitive_and_sorted() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.EML"), "").unwrap();
        fs::write(dir.path().join("a.eml"), "").unwrap();
        fs::write(dir.path().join("c.txt"), "").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub").join("d.eml"), "").unwrap();

        let flat = find_inputs(dir.path(), "eml", false).unwrap();
        assert_eq!(2, flat.len());
        assert!(flat[0].ends_with("a.eml"));
        assert!(flat[1].ends_with("b.EML"));

        let deep = find_inputs(dir.path(), "eml", true).unwrap();
        assert_eq!(3, deep.len());
    }
}
