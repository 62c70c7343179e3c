use crate::config::Config;
use crate::draft::DraftAutosaver;
use crate::journal::JournalStore;
use crate::models::JournalEntry;
use crate::storage::{ENTRIES_KEY, SlotStore};
use chrono::Local;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub slots: SlotStore,
    pub journal: Arc<Mutex<JournalStore>>,
    pub drafts: Arc<DraftAutosaver>,
}

impl AppState {
    pub fn new(slots: SlotStore, journal: JournalStore, config: &Config) -> Self {
        Self {
            drafts: Arc::new(DraftAutosaver::new(slots.clone(), config.autosave_delay)),
            slots,
            journal: Arc::new(Mutex::new(journal)),
        }
    }

    /// Opens the data directory and restores the persisted entry list.
    pub async fn load(config: &Config) -> Result<Self, std::io::Error> {
        let slots = SlotStore::new(&config.data_dir);
        slots.ensure_dir().await?;

        let entries: Vec<JournalEntry> = slots.load(ENTRIES_KEY).await.unwrap_or_default();
        let journal = JournalStore::from_entries(entries, Local::now().date_naive());
        info!(
            entries = journal.len(),
            streak = journal.streak(),
            "loaded journal from {}",
            slots.dir().display()
        );

        Ok(Self::new(slots, journal, config))
    }
}
