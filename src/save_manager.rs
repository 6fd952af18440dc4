use crate::core::{GameError, Result, SAVE_FILE_NAME, SAVE_VERSION_MAGIC};
use crate::items::ItemKind;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

/// Everything needed to resume a session at a stage boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub player_lives: u32,
    pub opponent_lives: u32,
    pub player_items: Vec<ItemKind>,
    pub opponent_items: Vec<ItemKind>,
    pub stage: u8,
    pub round: u32,
    pub infinite_mode: bool,
    pub winnings: u64,
    pub stages_completed: u32,
}

/// Somewhere a snapshot can be kept between runs.
pub trait SaveStore {
    fn save(&mut self, snapshot: &Snapshot) -> Result<()>;

    /// `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<Snapshot>>;
}

/// Saves snapshots to disk in a checksummed binary format
pub struct SaveManager {
    save_path: PathBuf,
}

impl SaveManager {
    /// Uses the platform config directory (via `directories`).
    pub fn new() -> Result<Self> {
        let project_dirs = ProjectDirs::from("", "", "buckshot").ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "Could not determine config directory")
        })?;

        let config_dir = project_dirs.config_dir();
        fs::create_dir_all(config_dir)?;

        Ok(Self {
            save_path: config_dir.join(SAVE_FILE_NAME),
        })
    }

    /// Save to an explicit file instead of the config directory.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            save_path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.save_path
    }

    pub fn save_exists(&self) -> bool {
        self.save_path.exists()
    }

    /// File format:
    /// - Version magic (8 bytes)
    /// - Data length (4 bytes)
    /// - bincode snapshot (variable length)
    /// - SHA256 over everything before it (32 bytes)
    fn write_snapshot(&self, snapshot: &Snapshot) -> Result<()> {
        let data = bincode::serialize(snapshot).map_err(|e| GameError::CorruptSave(e.to_string()))?;
        let data_len = data.len() as u32;

        let mut hasher = Sha256::new();
        hasher.update(SAVE_VERSION_MAGIC.to_le_bytes());
        hasher.update(data_len.to_le_bytes());
        hasher.update(&data);
        let checksum = hasher.finalize();

        if let Some(parent) = self.save_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let mut file = fs::File::create(&self.save_path)?;
        file.write_all(&SAVE_VERSION_MAGIC.to_le_bytes())?;
        file.write_all(&data_len.to_le_bytes())?;
        file.write_all(&data)?;
        file.write_all(&checksum)?;

        tracing::info!(path = %self.save_path.display(), bytes = data.len(), "game saved");
        Ok(())
    }

    fn read_snapshot(&self) -> Result<Snapshot> {
        let mut file = fs::File::open(&self.save_path)?;

        let mut version_bytes = [0u8; 8];
        file.read_exact(&mut version_bytes)?;
        let version = u64::from_le_bytes(version_bytes);
        if version != SAVE_VERSION_MAGIC {
            return Err(GameError::CorruptSave(format!(
                "Invalid save version: expected 0x{:016X}, got 0x{:016X}",
                SAVE_VERSION_MAGIC, version
            )));
        }

        let mut length_bytes = [0u8; 4];
        file.read_exact(&mut length_bytes)?;
        let data_len = u32::from_le_bytes(length_bytes);
        let file_len = file.metadata()?.len();
        if u64::from(data_len) > file_len {
            return Err(GameError::CorruptSave(format!(
                "Length header {} exceeds file size {}",
                data_len, file_len
            )));
        }

        let mut data = vec![0u8; data_len as usize];
        file.read_exact(&mut data)?;

        let mut stored_checksum = [0u8; 32];
        file.read_exact(&mut stored_checksum)?;

        let mut hasher = Sha256::new();
        hasher.update(version_bytes);
        hasher.update(length_bytes);
        hasher.update(&data);
        if stored_checksum != hasher.finalize().as_slice() {
            return Err(GameError::CorruptSave(
                "Checksum verification failed".to_string(),
            ));
        }

        bincode::deserialize(&data).map_err(|e| GameError::CorruptSave(e.to_string()))
    }
}

impl SaveStore for SaveManager {
    fn save(&mut self, snapshot: &Snapshot) -> Result<()> {
        self.write_snapshot(snapshot)
    }

    fn load(&self) -> Result<Option<Snapshot>> {
        match self.read_snapshot() {
            Ok(snapshot) => Ok(Some(snapshot)),
            Err(GameError::Io(e)) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(GameError::Io(e)) if e.kind() == io::ErrorKind::UnexpectedEof => Err(
                GameError::CorruptSave("save file is truncated".to_string()),
            ),
            Err(e) => Err(e),
        }
    }
}

/// Keeps the last snapshot in memory. Used by the simulator and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    latest: Option<Snapshot>,
    saves: usize,
    fail: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every save fails.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn saves(&self) -> usize {
        self.saves
    }

    pub fn latest(&self) -> Option<&Snapshot> {
        self.latest.as_ref()
    }
}

impl SaveStore for MemoryStore {
    fn save(&mut self, snapshot: &Snapshot) -> Result<()> {
        if self.fail {
            return Err(GameError::Io(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "store is read-only",
            )));
        }
        self.latest = Some(snapshot.clone());
        self.saves += 1;
        Ok(())
    }

    fn load(&self) -> Result<Option<Snapshot>> {
        Ok(self.latest.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static COUNTER: AtomicUsize = AtomicUsize::new(0);

    fn temp_manager() -> SaveManager {
        let n = COUNTER.fetch_add(1, Ordering::SeqCst);
        let dir = std::env::temp_dir().join(format!("buckshot-test-{}-{}", std::process::id(), n));
        SaveManager::with_path(dir.join(SAVE_FILE_NAME))
    }

    fn cleanup(manager: &SaveManager) {
        if let Some(dir) = manager.path().parent() {
            let _ = fs::remove_dir_all(dir);
        }
    }

    fn sample() -> Snapshot {
        Snapshot {
            player_lives: 3,
            opponent_lives: 5,
            player_items: vec![ItemKind::Saw, ItemKind::Phone],
            opponent_items: vec![ItemKind::Inverter],
            stage: 3,
            round: 7,
            infinite_mode: true,
            winnings: 4000,
            stages_completed: 2,
        }
    }

    #[test]
    fn test_save_and_load() {
        let mut manager = temp_manager();
        manager.save(&sample()).expect("save");
        assert!(manager.save_exists());

        let loaded = manager.load().expect("load").expect("snapshot present");
        assert_eq!(loaded, sample());
        cleanup(&manager);
    }

    #[test]
    fn test_load_nonexistent_is_none() {
        let manager = temp_manager();
        assert!(manager.load().expect("load").is_none());
    }

    #[test]
    fn test_tampered_file_fails_checksum() {
        let mut manager = temp_manager();
        manager.save(&sample()).expect("save");

        let mut bytes = fs::read(manager.path()).unwrap();
        bytes[12] ^= 0xFF;
        fs::write(manager.path(), &bytes).unwrap();

        assert!(matches!(manager.load(), Err(GameError::CorruptSave(_))));
        cleanup(&manager);
    }

    #[test]
    fn test_wrong_magic_rejected() {
        let mut manager = temp_manager();
        manager.save(&sample()).expect("save");

        let mut bytes = fs::read(manager.path()).unwrap();
        bytes[0] ^= 0x01;
        fs::write(manager.path(), &bytes).unwrap();

        let err = manager.load().unwrap_err();
        assert!(err.to_string().contains("Invalid save version"));
        cleanup(&manager);
    }

    #[test]
    fn test_truncated_file_is_corrupt() {
        let mut manager = temp_manager();
        manager.save(&sample()).expect("save");

        let bytes = fs::read(manager.path()).unwrap();
        fs::write(manager.path(), &bytes[..bytes.len() - 10]).unwrap();

        assert!(matches!(manager.load(), Err(GameError::CorruptSave(_))));
        cleanup(&manager);
    }

    #[test]
    fn test_oversized_length_header_is_corrupt() {
        let mut manager = temp_manager();
        manager.save(&sample()).expect("save");

        let mut bytes = fs::read(manager.path()).unwrap();
        bytes[8..12].copy_from_slice(&u32::MAX.to_le_bytes());
        fs::write(manager.path(), &bytes).unwrap();

        let err = manager.load().unwrap_err();
        assert!(matches!(err, GameError::CorruptSave(_)));
        assert!(err.to_string().contains("exceeds file size"));
        cleanup(&manager);
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert!(store.load().unwrap().is_none());
        store.save(&sample()).unwrap();
        assert_eq!(store.saves(), 1);
        assert_eq!(store.load().unwrap(), Some(sample()));

        let mut failing = MemoryStore::failing();
        assert!(failing.save(&sample()).is_err());
        assert!(failing.latest().is_none());
    }
}
