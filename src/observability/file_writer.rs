//! Append-only trace file with size-based rotation.
//!
//! When a write would push the live file past its size limit, the file is
//! shifted into numbered backups (`<file>.1` newest, `<file>.N` oldest) and a
//! fresh file is started. The oldest backup beyond the retention count is
//! deleted.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Size limit of the live file (10 MB).
pub const DEFAULT_MAX_BYTES: u64 = 10 * 1024 * 1024;

/// Number of rotated files kept.
pub const DEFAULT_BACKUPS: usize = 3;

/// Line-oriented writer over a rotating file.
#[derive(Debug)]
pub struct RotatingFile {
    path: PathBuf,
    max_bytes: u64,
    backups: usize,
    file: Option<File>,
    written: u64,
}

impl RotatingFile {
    /// Writer with the default 10 MB limit and 3 backups.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self::with_limits(path, DEFAULT_MAX_BYTES, DEFAULT_BACKUPS)
    }

    #[must_use]
    pub const fn with_limits(path: PathBuf, max_bytes: u64, backups: usize) -> Self {
        Self {
            path,
            max_bytes,
            backups,
            file: None,
            written: 0,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `line` plus a newline, rotating first if the limit would be
    /// exceeded. The file is opened lazily on first write.
    ///
    /// # Errors
    ///
    /// Any I/O error from opening, renaming or writing.
    pub fn append_line(&mut self, line: &str) -> io::Result<()> {
        let incoming = line.len() as u64 + 1;

        if self.file.is_none() {
            self.open()?;
        }
        if self.written > 0 && self.written + incoming > self.max_bytes {
            self.rotate()?;
            self.open()?;
        }

        let file = self
            .file
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "trace file not open"))?;
        writeln!(file, "{line}")?;
        file.flush()?;
        self.written += incoming;
        Ok(())
    }

    fn open(&mut self) -> io::Result<()> {
        let file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        self.written = file.metadata().map(|m| m.len()).unwrap_or(0);
        self.file = Some(file);
        Ok(())
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file = None;

        if self.backups == 0 {
            return fs::remove_file(&self.path).or_else(ignore_missing);
        }

        fs::remove_file(self.backup_path(self.backups)).or_else(ignore_missing)?;
        for n in (1..self.backups).rev() {
            let from = self.backup_path(n);
            if from.exists() {
                fs::rename(&from, self.backup_path(n + 1))?;
            }
        }
        fs::rename(&self.path, self.backup_path(1)).or_else(ignore_missing)
    }

    /// `<path>.<n>`
    fn backup_path(&self, n: usize) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(format!(".{n}"));
        PathBuf::from(name)
    }
}

fn ignore_missing(err: io::Error) -> io::Result<()> {
    if err.kind() == io::ErrorKind::NotFound {
        Ok(())
    } else {
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(path: &Path) -> Vec<String> {
        fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(String::from)
            .collect()
    }

    #[test]
    fn appends_lines_lazily() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.json");
        let mut writer = RotatingFile::new(path.clone());
        assert!(!path.exists());

        writer.append_line("{\"a\":1}").unwrap();
        writer.append_line("{\"b\":2}").unwrap();
        assert_eq!(lines(&path), vec!["{\"a\":1}", "{\"b\":2}"]);
    }

    #[test]
    fn rotates_into_numbered_backups() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.json");
        let mut writer = RotatingFile::with_limits(path.clone(), 10, 2);

        for line in ["first", "second", "third", "fourth"] {
            writer.append_line(line).unwrap();
        }

        assert_eq!(lines(&path), vec!["fourth"]);
        assert_eq!(lines(&dir.path().join("trace.json.1")), vec!["third"]);
        assert_eq!(lines(&dir.path().join("trace.json.2")), vec!["second"]);
        assert!(!dir.path().join("trace.json.3").exists());
    }

    #[test]
    fn resumes_size_of_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.json");
        fs::write(&path, "0123456789\n").unwrap();

        let mut writer = RotatingFile::with_limits(path.clone(), 12, 1);
        writer.append_line("x").unwrap();
        assert_eq!(lines(&path), vec!["x"]);
        assert_eq!(lines(&dir.path().join("trace.json.1")), vec!["0123456789"]);
    }
}
