pub mod json_store;
pub mod schema;

use anyhow::Result;

use crate::store::schema::StatsEntry;

/// Key-value seam for best scores and the saved difficulty tier. The core
/// never touches ambient global state; whatever persistence the host has
/// (JSON file, platform store, nothing) sits behind this trait.
pub trait StatsRepository {
    fn load(&self, key: &str) -> Option<StatsEntry>;
    fn save(&self, key: &str, entry: &StatsEntry) -> Result<()>;
}
