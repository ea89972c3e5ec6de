use std::fmt;
use std::io::{self, Cursor};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use ::zip::ZipArchive;
use ::zip::result::ZipError;

use super::{Oracle, OracleError};

/// Tests candidates as the password of an encrypted ZIP archive.
///
/// The archive is read into memory once and its central directory parsed at
/// construction. Each validation works on a cheap clone of that handle, so
/// workers never share a reader and never touch the filesystem.
///
/// A candidate matches only if every entry opens with it and reads back in
/// full with a valid checksum.
#[derive(Clone)]
pub struct ZipOracle {
    path: PathBuf,
    archive: ZipArchive<Cursor<Arc<[u8]>>>,
}

impl ZipOracle {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, OracleError> {
        let path = path.as_ref();
        let bytes: Arc<[u8]> = std::fs::read(path)
            .map_err(|e| OracleError::unavailable(path, e))?
            .into();

        let archive = ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| OracleError::unavailable(path, describe(&e)))?;

        if archive.len() == 0 {
            return Err(OracleError::unavailable(path, "archive has no entries"));
        }

        tracing::info!("Opened {} ({} entries)", path.display(), archive.len());

        Ok(Self {
            path: path.to_path_buf(),
            archive,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entries(&self) -> usize {
        self.archive.len()
    }

    fn unlocks_every_entry(&self, password: &[u8]) -> bool {
        let mut archive = self.archive.clone();

        for index in 0..archive.len() {
            let mut entry = match archive.by_index_decrypt(index, password) {
                Ok(entry) => entry,
                Err(_) => return false,
            };

            let expected = entry.size();
            match io::copy(&mut entry, &mut io::sink()) {
                Ok(read) if read == expected => {}
                _ => return false,
            }
        }

        true
    }
}

impl fmt::Debug for ZipOracle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZipOracle")
            .field("path", &self.path)
            .field("entries", &self.archive.len())
            .finish()
    }
}

impl Oracle for ZipOracle {
    fn validate(&self, candidate: &str) -> Result<bool, OracleError> {
        Ok(self.unlocks_every_entry(candidate.as_bytes()))
    }
}

fn describe(error: &ZipError) -> String {
    match error {
        ZipError::InvalidArchive(reason) => format!("not a valid zip archive ({reason})"),
        other => other.to_string(),
    }
}
