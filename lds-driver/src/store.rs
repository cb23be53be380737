use crate::error::{LdsError, Result};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

const RECORD_EXTENSION: &str = "bin";

/// Append-only destination for encoded scan records.
pub trait RecordSink {
    fn append_record(&mut self, record: &[u8]) -> Result<()>;
}

impl RecordSink for Vec<u8> {
    fn append_record(&mut self, record: &[u8]) -> Result<()> {
        self.extend_from_slice(record);
        Ok(())
    }
}

/// Record log on disk. Created if missing, never truncated.
pub struct RecordFile {
    path: PathBuf,
    file: File,
}

impl RecordFile {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(RecordFile { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSink for RecordFile {
    fn append_record(&mut self, record: &[u8]) -> Result<()> {
        self.file.write_all(record)?;
        self.file.flush()?;
        Ok(())
    }
}

/// A directory of `*.bin` record files, read back in file name order.
pub struct DirectoryStore {
    dir: PathBuf,
}

impl DirectoryStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        DirectoryStore {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn record_paths(&self) -> Result<Vec<PathBuf>> {
        let mut paths = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.is_file() && path.extension().is_some_and(|e| e == RECORD_EXTENSION) {
                paths.push(path);
            }
        }
        paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(paths)
    }

    /// The contents of every record file, one blob per file.
    pub fn list_records(&self) -> Result<Vec<Vec<u8>>> {
        self.record_paths()?
            .iter()
            .map(|path| fs::read(path).map_err(LdsError::from))
            .collect()
    }
}
