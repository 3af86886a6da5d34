use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;

use crate::store::StatsRepository;
use crate::store::schema::{ProfileData, StatsEntry};

/// File-backed stats repository: one `profile.json` under the platform
/// data directory, written atomically (tmp + fsync + rename).
pub struct JsonStore {
    base_dir: PathBuf,
}

impl JsonStore {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("lectio");
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    fn profile_path(&self) -> PathBuf {
        self.base_dir.join("profile.json")
    }

    /// Load the profile, degrading to a fresh default on a missing,
    /// unparsable, or stale-schema file.
    pub fn load_profile(&self) -> ProfileData {
        let path = self.profile_path();
        if !path.exists() {
            return ProfileData::default();
        }
        let profile: ProfileData = fs::read_to_string(&path)
            .ok()
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_default();
        if profile.needs_reset() {
            return ProfileData::default();
        }
        profile
    }

    pub fn save_profile(&self, data: &ProfileData) -> Result<()> {
        let path = self.profile_path();
        let tmp_path = path.with_extension("tmp");

        let json = serde_json::to_string_pretty(data)?;
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }
}

impl StatsRepository for JsonStore {
    fn load(&self, key: &str) -> Option<StatsEntry> {
        self.load_profile().entries.get(key).cloned()
    }

    fn save(&self, key: &str, entry: &StatsEntry) -> Result<()> {
        let mut profile = self.load_profile();
        let mut entry = entry.clone();
        entry.updated_at = Utc::now();
        profile.entries.insert(key.to_string(), entry);
        self.save_profile(&profile)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::engine::adaptive::DifficultyTier;

    fn make_test_store() -> (TempDir, JsonStore) {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        (dir, store)
    }

    #[test]
    fn test_load_missing_key_is_none() {
        let (_dir, store) = make_test_store();
        assert!(store.load("passage:beginner").is_none());
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let (_dir, store) = make_test_store();
        let entry = StatsEntry {
            tier: DifficultyTier::Intermediate,
            best_wpm: 132,
            best_accuracy: 96,
            ..StatsEntry::default()
        };
        store.save("reading", &entry).unwrap();

        let loaded = store.load("reading").unwrap();
        assert_eq!(loaded.tier, DifficultyTier::Intermediate);
        assert_eq!(loaded.best_wpm, 132);
        assert_eq!(loaded.best_accuracy, 96);
    }

    #[test]
    fn test_keys_are_independent() {
        let (_dir, store) = make_test_store();
        let entry = StatsEntry::default();
        store.save("a", &entry).unwrap();
        store.save("b", &entry).unwrap();
        assert_eq!(store.load_profile().entries.len(), 2);
        assert!(store.load("a").is_some());
        assert!(store.load("c").is_none());
    }

    #[test]
    fn test_corrupted_file_degrades_to_default() {
        let (_dir, store) = make_test_store();
        fs::write(store.profile_path(), "{not json").unwrap();
        assert!(store.load("anything").is_none());
        // A save over the corrupted file must still succeed.
        store.save("anything", &StatsEntry::default()).unwrap();
        assert!(store.load("anything").is_some());
    }

    #[test]
    fn test_no_residual_tmp_file_after_save() {
        let (dir, store) = make_test_store();
        store.save("k", &StatsEntry::default()).unwrap();
        let residual: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().and_then(|x| x.to_str()) == Some("tmp"))
            .collect();
        assert!(residual.is_empty(), "no residual .tmp files");
    }
}
