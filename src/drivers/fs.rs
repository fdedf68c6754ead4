use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::debug;

use super::Driver;
use crate::error::{ArbiterError, ArbiterResult};
use crate::util::path;

/// Local filesystem driver, registered under the `file` scheme.
///
/// Paths are used as-is after tilde expansion. Operations fail fast; there
/// is no retry for local IO.
#[derive(Debug, Default)]
pub struct FsDriver;

impl FsDriver {
    pub fn new() -> Self {
        Self
    }

    fn full(&self, path: &str) -> String {
        path::expand_tilde(path)
    }

    fn walk(dir: &Path, recursive: bool, results: &mut Vec<String>) -> ArbiterResult<()> {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            // A missing directory globs to nothing.
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(()),
            Err(error) => return Err(error.into()),
        };

        let mut paths: Vec<_> = entries
            .map(|entry| entry.map(|e| e.path()))
            .collect::<Result<_, _>>()?;
        paths.sort();

        for entry_path in paths {
            if entry_path.is_dir() {
                if recursive {
                    Self::walk(&entry_path, true, results)?;
                }
            } else {
                results.push(entry_path.to_string_lossy().into_owned());
            }
        }

        Ok(())
    }
}

impl Driver for FsDriver {
    fn scheme(&self) -> &str {
        "file"
    }

    fn is_remote(&self) -> bool {
        false
    }

    fn get(&self, path: &str) -> ArbiterResult<Vec<u8>> {
        fs::read(self.full(path)).map_err(|error| match error.kind() {
            ErrorKind::NotFound => ArbiterError::NotFound(path.to_string()),
            _ => ArbiterError::Io(error),
        })
    }

    fn put(&self, path: &str, data: &[u8]) -> ArbiterResult<()> {
        fs::write(self.full(path), data)?;
        Ok(())
    }

    fn try_get_size(&self, path: &str) -> ArbiterResult<Option<u64>> {
        match fs::metadata(self.full(path)) {
            Ok(metadata) => Ok(Some(metadata.len())),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    fn copy(&self, src: &str, dst: &str) -> ArbiterResult<()> {
        fs::copy(self.full(src), self.full(dst)).map_err(|error| match error.kind() {
            ErrorKind::NotFound => ArbiterError::NotFound(src.to_string()),
            _ => ArbiterError::Io(error),
        })?;
        Ok(())
    }

    fn glob(&self, pattern: &str, recursive: bool, verbose: bool) -> ArbiterResult<Vec<String>> {
        if !pattern.ends_with("/*") {
            return Err(ArbiterError::Config(format!(
                "Invalid glob path: {}",
                pattern
            )));
        }

        let dir = self.full(&pattern[..pattern.len() - 1]);
        if verbose {
            debug!("globbing {}", dir);
        }

        let mut results = Vec::new();
        Self::walk(Path::new(&dir), recursive, &mut results)?;
        Ok(results)
    }
}
