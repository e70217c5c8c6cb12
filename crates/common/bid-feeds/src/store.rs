use chrono::{DateTime, Utc};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// A cached copy of some external text, with the time it was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub body: String,
    pub written_at: DateTime<Utc>,
}

/// Durable home for a single cached value. Writes replace the previous
/// snapshot entirely and no locking is done across processes.
pub trait SnapshotStore: Send + Sync {
    fn load(&self) -> std::io::Result<Option<Snapshot>>;

    fn save(&self, body: &str) -> std::io::Result<()>;
}

/// Snapshot kept in a plain file; the file's modification time is the
/// write time.
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn load(&self) -> std::io::Result<Option<Snapshot>> {
        let metadata = match fs::metadata(&self.path) {
            Ok(m) => m,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e),
        };
        let written_at = DateTime::<Utc>::from(metadata.modified()?);
        let body = fs::read_to_string(&self.path)?;
        Ok(Some(Snapshot { body, written_at }))
    }

    fn save(&self, body: &str) -> std::io::Result<()> {
        fs::write(&self.path, body)
    }
}

/// In-process store, mostly useful for tests.
#[derive(Debug, Default)]
pub struct MemorySnapshotStore {
    snapshot: RwLock<Option<Snapshot>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(body: impl Into<String>, written_at: DateTime<Utc>) -> Self {
        Self {
            snapshot: RwLock::new(Some(Snapshot {
                body: body.into(),
                written_at,
            })),
        }
    }

    pub fn current(&self) -> Option<Snapshot> {
        self.snapshot.read().ok().and_then(|s| s.clone())
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn load(&self) -> std::io::Result<Option<Snapshot>> {
        Ok(self.current())
    }

    fn save(&self, body: &str) -> std::io::Result<()> {
        let mut guard = self
            .snapshot
            .write()
            .map_err(|_| std::io::Error::new(ErrorKind::Other, "snapshot lock poisoned"))?;
        *guard = Some(Snapshot {
            body: body.to_string(),
            written_at: Utc::now(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSnapshotStore::new(dir.path().join("rate.cache"));

        assert_eq!(store.load().unwrap(), None);

        let before = Utc::now() - chrono::Duration::seconds(5);
        store.save("2.5").unwrap();
        let snapshot = store.load().unwrap().unwrap();
        assert_eq!(snapshot.body, "2.5");
        assert!(snapshot.written_at >= before);

        store.save("3.25").unwrap();
        assert_eq!(store.load().unwrap().unwrap().body, "3.25");
    }

    #[test]
    fn memory_store_overwrites() {
        let store = MemorySnapshotStore::with_snapshot("1", Utc::now() - chrono::Duration::hours(3));
        store.save("2").unwrap();
        let snapshot = store.load().unwrap().unwrap();
        assert_eq!(snapshot.body, "2");
        assert!(Utc::now() - snapshot.written_at < chrono::Duration::minutes(1));
    }
}
