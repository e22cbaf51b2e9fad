//! Persistence for [`FamilyData`].
//!
//! Two backends carry the same payload: the host's shared configuration
//! store (a keyed JSON-blob surface, synchronized by the host) and a local
//! sled tree acting as a redundant backup. Reads prefer the shared store and
//! fall back to the local copy; writes always go to both, so losing either
//! store alone never loses progress.
//!
//! The repository never propagates storage errors. A failed read falls
//! through to the next source (ultimately an empty [`FamilyData`]); a failed
//! write is logged and dropped. Loss of persistence must not crash the host.

use std::collections::HashMap;
use std::fs;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use log::{debug, warn};
use serde_json::Value;

use crate::gamify::errors::GamifyError;
use crate::gamify::types::FamilyData;

/// Key the stats payload lives under in both stores.
pub const STATS_KEY: &str = "gamify-stats";

const LOCAL_TREE: &str = "taskquest";

/// Keyed get/put of JSON-serializable blobs. The host application implements
/// this over its synchronized plugin-config surface; [`SharedConfigFile`] is
/// the standalone file-backed implementation the CLI uses.
pub trait SharedStore {
    fn get_blob(&self, key: &str) -> Result<Option<Value>, GamifyError>;
    fn put_blob(&mut self, key: &str, value: Value) -> Result<(), GamifyError>;
}

/// Plain string key-value store for the local backup copy.
pub trait LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, GamifyError>;
    fn put(&mut self, key: &str, value: &str) -> Result<(), GamifyError>;
}

/// Shared plugin-config store backed by a single JSON object file.
///
/// File access is guarded with `fs2` locks: shared for reads, exclusive for
/// the read-modify-write on writes. Locks release when the handle drops, on
/// every path.
pub struct SharedConfigFile {
    path: PathBuf,
}

impl SharedConfigFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(file: &mut fs::File) -> Result<HashMap<String, Value>, GamifyError> {
        let mut raw = String::new();
        file.read_to_string(&mut raw)?;
        if raw.trim().is_empty() {
            return Ok(HashMap::new());
        }
        Ok(serde_json::from_str(&raw)?)
    }
}

impl SharedStore for SharedConfigFile {
    fn get_blob(&self, key: &str) -> Result<Option<Value>, GamifyError> {
        let mut file = match fs::OpenOptions::new().read(true).open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        file.lock_shared()?;
        let map = Self::read_map(&mut file);
        let _ = file.unlock();
        Ok(map?.remove(key))
    }

    fn put_blob(&mut self, key: &str, value: Value) -> Result<(), GamifyError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(&self.path)?;
        file.lock_exclusive()?;
        let result = (|| -> Result<(), GamifyError> {
            // Tolerate a corrupt file on write: start over from an empty map
            // rather than refusing to persist new progress.
            let mut map = Self::read_map(&mut file).unwrap_or_default();
            map.insert(key.to_string(), value);
            let serialized = serde_json::to_string_pretty(&map)?;
            file.seek(SeekFrom::Start(0))?;
            file.set_len(0)?;
            file.write_all(serialized.as_bytes())?;
            file.flush()?;
            Ok(())
        })();
        let _ = file.unlock();
        result
    }
}

/// Local backup store on a sled tree.
pub struct LocalSledStore {
    _db: sled::Db,
    tree: sled::Tree,
}

impl LocalSledStore {
    /// Open (or create) the local store rooted at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, GamifyError> {
        fs::create_dir_all(path.as_ref())?;
        let db = sled::open(path.as_ref())?;
        let tree = db.open_tree(LOCAL_TREE)?;
        Ok(Self { _db: db, tree })
    }
}

impl LocalStore for LocalSledStore {
    fn get(&self, key: &str) -> Result<Option<String>, GamifyError> {
        let Some(bytes) = self.tree.get(key.as_bytes())? else {
            return Ok(None);
        };
        Ok(Some(std::str::from_utf8(&bytes).map_err(|e| {
            GamifyError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })?.to_string()))
    }

    fn put(&mut self, key: &str, value: &str) -> Result<(), GamifyError> {
        self.tree.insert(key.as_bytes(), value.as_bytes())?;
        self.tree.flush()?;
        Ok(())
    }
}

/// In-memory local store. Used when no on-disk backup is configured or the
/// sled store fails to open; also convenient in tests.
#[derive(Debug, Default)]
pub struct MemoryLocalStore {
    entries: HashMap<String, String>,
}

impl LocalStore for MemoryLocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, GamifyError> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &str) -> Result<(), GamifyError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Load/save boundary for the family stats payload.
///
/// Owns the local backup store; the shared store is passed per call because
/// inside a host it belongs to the host (handed to the plugin through
/// `HostApi`), while the CLI supplies a [`SharedConfigFile`].
pub struct StatsRepository {
    local: Box<dyn LocalStore + Send>,
}

impl StatsRepository {
    pub fn new(local: Box<dyn LocalStore + Send>) -> Self {
        Self { local }
    }

    /// Load stats: shared store first, local backup second, empty default
    /// last. Unreadable or malformed payloads are logged and skipped, never
    /// surfaced.
    pub fn load(&self, shared: &dyn SharedStore) -> FamilyData {
        match shared.get_blob(STATS_KEY) {
            Ok(Some(blob)) => match serde_json::from_value::<FamilyData>(blob) {
                Ok(data) => return data,
                Err(e) => warn!("shared stats payload malformed, trying local backup: {e}"),
            },
            Ok(None) => debug!("no shared stats payload under {STATS_KEY}"),
            Err(e) => warn!("shared stats store unreadable, trying local backup: {e}"),
        }

        match self.local.get(STATS_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<FamilyData>(&raw) {
                Ok(data) => return data,
                Err(e) => warn!("local stats payload malformed, starting fresh: {e}"),
            },
            Ok(None) => debug!("no local stats payload under {STATS_KEY}"),
            Err(e) => warn!("local stats store unreadable, starting fresh: {e}"),
        }

        FamilyData::default()
    }

    /// Write the payload to both stores unconditionally. The local copy is a
    /// redundant backup so nobody is stranded by shared-store availability.
    /// Failures are logged and swallowed.
    pub fn save(&mut self, shared: &mut dyn SharedStore, data: &FamilyData) {
        let blob = match serde_json::to_value(data) {
            Ok(blob) => blob,
            Err(e) => {
                warn!("stats payload failed to serialize, nothing saved: {e}");
                return;
            }
        };

        if let Err(e) = shared.put_blob(STATS_KEY, blob.clone()) {
            warn!("failed writing stats to shared store: {e}");
        }
        if let Err(e) = self.local.put(STATS_KEY, &blob.to_string()) {
            warn!("failed writing stats to local backup: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// In-memory shared store for exercising repository fallback order.
    #[derive(Default)]
    struct MemoryShared {
        blobs: HashMap<String, Value>,
        fail_reads: bool,
    }

    impl SharedStore for MemoryShared {
        fn get_blob(&self, key: &str) -> Result<Option<Value>, GamifyError> {
            if self.fail_reads {
                return Err(GamifyError::Io(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    "shared store offline",
                )));
            }
            Ok(self.blobs.get(key).cloned())
        }

        fn put_blob(&mut self, key: &str, value: Value) -> Result<(), GamifyError> {
            self.blobs.insert(key.to_string(), value);
            Ok(())
        }
    }

    fn sample_family() -> FamilyData {
        let mut family = FamilyData::default();
        family.user_mut("Hero").currency = 45;
        family.user_mut("Scribe").currency = 120;
        family
    }

    fn repo_in(dir: &TempDir) -> StatsRepository {
        let local = LocalSledStore::open(dir.path().join("local")).expect("open sled");
        StatsRepository::new(Box::new(local))
    }

    #[test]
    fn save_then_load_is_identity() {
        let dir = TempDir::new().expect("tempdir");
        let mut repo = repo_in(&dir);
        let mut shared = MemoryShared::default();
        let family = sample_family();

        repo.save(&mut shared, &family);
        assert_eq!(repo.load(&shared), family);
    }

    #[test]
    fn shared_store_wins_over_local() {
        let dir = TempDir::new().expect("tempdir");
        let mut repo = repo_in(&dir);
        let mut shared = MemoryShared::default();

        let mut local_only = FamilyData::default();
        local_only.user_mut("Stale");
        repo.save(&mut shared, &local_only);

        let mut newer = FamilyData::default();
        newer.user_mut("Fresh");
        shared
            .put_blob(STATS_KEY, serde_json::to_value(&newer).unwrap())
            .unwrap();

        assert_eq!(repo.load(&shared), newer);
    }

    #[test]
    fn local_backup_covers_shared_outage() {
        let dir = TempDir::new().expect("tempdir");
        let mut repo = repo_in(&dir);
        let mut shared = MemoryShared::default();
        let family = sample_family();
        repo.save(&mut shared, &family);

        shared.fail_reads = true;
        assert_eq!(repo.load(&shared), family);
    }

    #[test]
    fn both_stores_empty_yields_default() {
        let dir = TempDir::new().expect("tempdir");
        let repo = repo_in(&dir);
        let shared = MemoryShared::default();
        assert_eq!(repo.load(&shared), FamilyData::default());
    }

    #[test]
    fn malformed_shared_payload_falls_back_to_local() {
        let dir = TempDir::new().expect("tempdir");
        let mut repo = repo_in(&dir);
        let mut shared = MemoryShared::default();
        let family = sample_family();
        repo.save(&mut shared, &family);

        shared
            .put_blob(STATS_KEY, Value::String("not a stats payload".into()))
            .unwrap();
        assert_eq!(repo.load(&shared), family);
    }

    #[test]
    fn shared_config_file_round_trip() {
        let dir = TempDir::new().expect("tempdir");
        let mut store = SharedConfigFile::new(dir.path().join("plugin-config.json"));
        assert!(store.get_blob(STATS_KEY).expect("read missing").is_none());

        let family = sample_family();
        store
            .put_blob(STATS_KEY, serde_json::to_value(&family).unwrap())
            .expect("write");
        // Other keys in the same file survive a second write.
        store
            .put_blob("other-plugin", Value::Bool(true))
            .expect("write other");

        let blob = store.get_blob(STATS_KEY).expect("read").expect("present");
        assert_eq!(serde_json::from_value::<FamilyData>(blob).unwrap(), family);
        assert_eq!(
            store.get_blob("other-plugin").expect("read"),
            Some(Value::Bool(true))
        );
    }

    #[test]
    fn sled_store_round_trip() {
        let dir = TempDir::new().expect("tempdir");
        let mut store = LocalSledStore::open(dir.path()).expect("open");
        assert!(store.get(STATS_KEY).expect("get missing").is_none());
        store.put(STATS_KEY, "{\"users\":{}}").expect("put");
        assert_eq!(store.get(STATS_KEY).expect("get"), Some("{\"users\":{}}".to_string()));
    }
}
