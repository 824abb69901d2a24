//! Strata - Manifest
//! An append-only line file recording segment file names in creation order.
//! The final line is always a reservation: the name of the segment the next
//! flush will create. Everything before it names a segment that exists on
//! disk and is immutable.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use crate::error::{Result, StrataError};

/// Name of the manifest file inside the data directory.
pub const MANIFEST_FILE: &str = "manifest.txt";

/// File name for segment number `n`.
pub fn segment_file_name(n: u64) -> String {
    format!("sst-{}.json", n)
}

/// Parse a segment number out of a manifest line.
fn parse_segment_number(name: &str) -> Option<u64> {
    name.strip_prefix("sst-")?
        .strip_suffix(".json")?
        .parse()
        .ok()
}

/// Handle to the manifest file.
///
/// A single open handle serves both appends (seek to end) and lookup-time
/// reads (seek to start). That is safe only because every use happens under
/// the engine's exclusive lock.
#[derive(Debug)]
pub struct Manifest {
    dir: PathBuf,
    file: File,
}

impl Manifest {
    /// Open the manifest in `data_dir`. If the directory does not exist it
    /// is created along with a fresh manifest holding a `sst-1.json`
    /// reservation; if it exists, the manifest must be present.
    ///
    /// Returns the handle and the recovered `next_segment_number`: 1 for a
    /// fresh store, otherwise the number encoded in the manifest's last line.
    pub fn initialize(data_dir: &Path) -> Result<(Self, u64)> {
        let path = data_dir.join(MANIFEST_FILE);

        if !data_dir.exists() {
            std::fs::create_dir_all(data_dir)?;

            let mut file = OpenOptions::new()
                .read(true)
                .write(true)
                .create(true)
                .open(&path)?;
            file.write_all(segment_file_name(1).as_bytes())?;
            file.write_all(b"\n")?;
            file.sync_all()?;

            log::info!("created manifest at {}", path.display());
            return Ok((
                Self {
                    dir: data_dir.to_path_buf(),
                    file,
                },
                1,
            ));
        }

        // An existing data dir without a manifest means the store is
        // damaged: any segments in it would be invisible and the next flush
        // would collide with them. Refuse to continue rather than silently
        // start fresh.
        if !path.exists() {
            return Err(StrataError::Manifest(format!(
                "data dir {} exists but {} is missing",
                data_dir.display(),
                MANIFEST_FILE
            )));
        }

        let file = OpenOptions::new().read(true).write(true).open(&path)?;
        let manifest = Self {
            dir: data_dir.to_path_buf(),
            file,
        };

        // Only the last line matters for counter recovery; earlier lines are
        // read again at lookup time.
        let last = manifest.segment_names()?.pop().ok_or_else(|| {
            StrataError::Manifest(format!("manifest {} is empty", path.display()))
        })?;
        let next = parse_segment_number(&last).ok_or_else(|| {
            StrataError::Manifest(format!("bad reservation line {:?} in {}", last, path.display()))
        })?;

        Ok((manifest, next))
    }

    /// All manifest lines in file order (oldest first, reservation last).
    pub fn segment_names(&self) -> Result<Vec<String>> {
        (&self.file).seek(SeekFrom::Start(0))?;

        let reader = BufReader::new(&self.file);
        let mut names = Vec::new();
        for line in reader.lines() {
            let line = line?;
            let name = line.trim();
            if !name.is_empty() {
                names.push(name.to_string());
            }
        }
        Ok(names)
    }

    /// Append one reservation line and sync. Called exactly once per flush,
    /// strictly after the corresponding segment file is durable.
    pub fn append_reservation(&mut self, name: &str) -> Result<()> {
        self.file.seek(SeekFrom::End(0))?;
        self.file.write_all(name.as_bytes())?;
        self.file.write_all(b"\n")?;
        self.file.sync_all()?;
        Ok(())
    }

    /// Full path of a segment named in this manifest.
    pub fn segment_path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_initialize() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("data");

        let (manifest, next) = Manifest::initialize(&data_dir).unwrap();
        assert_eq!(next, 1);
        assert_eq!(manifest.segment_names().unwrap(), vec!["sst-1.json"]);

        let raw = std::fs::read_to_string(data_dir.join(MANIFEST_FILE)).unwrap();
        assert_eq!(raw, "sst-1.json\n");
    }

    #[test]
    fn test_append_and_list_order() {
        let dir = tempfile::tempdir().unwrap();
        let (mut manifest, _) = Manifest::initialize(&dir.path().join("db")).unwrap();

        manifest.append_reservation("sst-2.json").unwrap();
        manifest.append_reservation("sst-3.json").unwrap();

        assert_eq!(
            manifest.segment_names().unwrap(),
            vec!["sst-1.json", "sst-2.json", "sst-3.json"]
        );
    }

    #[test]
    fn test_recover_next_segment_number() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("db");

        {
            let (mut manifest, next) = Manifest::initialize(&data_dir).unwrap();
            assert_eq!(next, 1);
            manifest.append_reservation("sst-2.json").unwrap();
            manifest.append_reservation("sst-3.json").unwrap();
        }

        let (_, next) = Manifest::initialize(&data_dir).unwrap();
        assert_eq!(next, 3);
    }

    #[test]
    fn test_existing_dir_without_manifest_is_fatal() {
        // A data dir that exists but has no manifest is a damaged store,
        // not a fresh one: starting over would mask any segments in it.
        let dir = tempfile::tempdir().unwrap();

        let err = Manifest::initialize(dir.path()).unwrap_err();
        assert!(matches!(err, StrataError::Manifest(_)));
    }

    #[test]
    fn test_bad_reservation_line_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(MANIFEST_FILE);
        std::fs::write(&path, "sst-1.json\ngarbage\n").unwrap();

        let err = Manifest::initialize(dir.path()).unwrap_err();
        assert!(matches!(err, StrataError::Manifest(_)));
    }

    #[test]
    fn test_empty_manifest_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(MANIFEST_FILE), "").unwrap();

        let err = Manifest::initialize(dir.path()).unwrap_err();
        assert!(matches!(err, StrataError::Manifest(_)));
    }

    #[test]
    fn test_segment_file_name_round_trip() {
        assert_eq!(segment_file_name(7), "sst-7.json");
        assert_eq!(parse_segment_number("sst-7.json"), Some(7));
        assert_eq!(parse_segment_number("wal-7.json"), None);
    }
}
