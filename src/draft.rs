use crate::models::Draft;
use crate::storage::{DRAFT_KEY, SlotStore};
use chrono::Utc;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

/// Drafts older than this are discarded on load.
pub const DRAFT_MAX_AGE_MS: i64 = 24 * 60 * 60 * 1000;

pub async fn load_draft(slots: &SlotStore) -> Option<Draft> {
    load_draft_at(slots, Utc::now().timestamp_millis()).await
}

pub async fn load_draft_at(slots: &SlotStore, now_ms: i64) -> Option<Draft> {
    let draft: Draft = slots.load(DRAFT_KEY).await?;
    if now_ms - draft.last_modified < DRAFT_MAX_AGE_MS {
        return Some(draft);
    }

    info!(last_modified = draft.last_modified, "discarding expired draft");
    clear_draft(slots).await;
    None
}

/// Best effort: failures are logged and otherwise ignored.
pub async fn save_draft(slots: &SlotStore, draft: &Draft) {
    if let Err(err) = slots.persist(DRAFT_KEY, draft).await {
        error!("failed to save draft: {err}");
    }
}

pub async fn clear_draft(slots: &SlotStore) {
    if let Err(err) = slots.remove(DRAFT_KEY).await {
        error!("failed to clear draft: {err}");
    }
}

#[derive(Default)]
struct Pending {
    draft: Option<Draft>,
    handle: Option<JoinHandle<()>>,
    generation: u64,
}

/// Coalesces rapid draft edits into one write after `delay` of quiet.
///
/// A newer `schedule` replaces the pending write. Dropping the autosaver
/// cancels whatever is still pending.
///
/// Every slot write and clear goes through `io`, so a write that already
/// started always lands before a later `discard` removes the slot.
pub struct DraftAutosaver {
    slots: SlotStore,
    delay: Duration,
    pending: Arc<Mutex<Pending>>,
    io: Arc<tokio::sync::Mutex<()>>,
}

impl DraftAutosaver {
    pub fn new(slots: SlotStore, delay: Duration) -> Self {
        Self {
            slots,
            delay,
            pending: Arc::new(Mutex::new(Pending::default())),
            io: Arc::new(tokio::sync::Mutex::new(())),
        }
    }

    pub fn schedule(&self, draft: Draft) {
        let mut pending = lock(&self.pending);
        if let Some(handle) = pending.handle.take() {
            handle.abort();
        }
        pending.draft = Some(draft);
        pending.generation += 1;

        let generation = pending.generation;
        let slots = self.slots.clone();
        let delay = self.delay;
        let shared = Arc::clone(&self.pending);
        let io = Arc::clone(&self.io);
        pending.handle = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _io = io.lock().await;
            // once the draft is taken the handle is gone, so cancel can no
            // longer abort the write halfway
            let draft = {
                let mut pending = lock(&shared);
                if pending.generation != generation {
                    return;
                }
                pending.handle = None;
                pending.draft.take()
            };
            if let Some(draft) = draft {
                debug!("autosaving draft");
                save_draft(&slots, &draft).await;
            }
        }));
    }

    /// The draft waiting for its debounce window, if any.
    pub fn pending(&self) -> Option<Draft> {
        lock(&self.pending).draft.clone()
    }

    /// Writes the pending draft now instead of waiting.
    pub async fn flush(&self) -> Option<Draft> {
        let _io = self.io.lock().await;
        let draft = {
            let mut pending = lock(&self.pending);
            if let Some(handle) = pending.handle.take() {
                handle.abort();
            }
            pending.generation += 1;
            pending.draft.take()
        };
        if let Some(draft) = &draft {
            save_draft(&self.slots, draft).await;
        }
        draft
    }

    pub fn cancel(&self) {
        let mut pending = lock(&self.pending);
        if let Some(handle) = pending.handle.take() {
            handle.abort();
        }
        pending.generation += 1;
        pending.draft = None;
    }

    /// Cancels the pending write and removes the saved draft. Waits for a
    /// write that is already in progress, so nothing stale survives.
    pub async fn discard(&self) {
        self.cancel();
        let _io = self.io.lock().await;
        clear_draft(&self.slots).await;
    }
}

impl Drop for DraftAutosaver {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn lock(pending: &Mutex<Pending>) -> std::sync::MutexGuard<'_, Pending> {
    pending.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Mood;

    fn draft(title: &str, last_modified: i64) -> Draft {
        Draft {
            title: title.to_string(),
            content: "half a thought".to_string(),
            selected_mood: Some(Mood::Meh),
            images: Vec::new(),
            songs: Vec::new(),
            last_modified,
        }
    }

    #[tokio::test]
    async fn fresh_draft_is_restored() {
        let dir = tempfile::tempdir().unwrap();
        let slots = SlotStore::new(dir.path());
        let now = 1_710_000_000_000;
        save_draft(&slots, &draft("fresh", now - 60_000)).await;

        let loaded = load_draft_at(&slots, now).await.unwrap();
        assert_eq!(loaded.title, "fresh");
        assert_eq!(loaded.selected_mood, Some(Mood::Meh));
    }

    #[tokio::test]
    async fn expired_draft_is_discarded_and_cleared() {
        let dir = tempfile::tempdir().unwrap();
        let slots = SlotStore::new(dir.path());
        let now = 1_710_000_000_000;
        save_draft(&slots, &draft("stale", now - DRAFT_MAX_AGE_MS)).await;

        assert!(load_draft_at(&slots, now).await.is_none());
        assert!(slots.load::<Draft>(DRAFT_KEY).await.is_none());
    }

    #[tokio::test]
    async fn autosave_coalesces_rapid_edits() {
        let dir = tempfile::tempdir().unwrap();
        let slots = SlotStore::new(dir.path());
        let saver = DraftAutosaver::new(slots.clone(), Duration::from_millis(50));

        saver.schedule(draft("one", 1));
        saver.schedule(draft("two", 2));
        saver.schedule(draft("three", 3));
        assert!(slots.load::<Draft>(DRAFT_KEY).await.is_none());
        assert_eq!(saver.pending().unwrap().title, "three");

        tokio::time::sleep(Duration::from_millis(300)).await;
        let saved: Draft = slots.load(DRAFT_KEY).await.unwrap();
        assert_eq!(saved.title, "three");
        assert!(saver.pending().is_none());
    }

    #[tokio::test]
    async fn cancel_drops_pending_write() {
        let dir = tempfile::tempdir().unwrap();
        let slots = SlotStore::new(dir.path());
        let saver = DraftAutosaver::new(slots.clone(), Duration::from_millis(50));

        saver.schedule(draft("never", 1));
        saver.cancel();
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(slots.load::<Draft>(DRAFT_KEY).await.is_none());
    }

    #[tokio::test]
    async fn dropping_autosaver_cancels_pending_write() {
        let dir = tempfile::tempdir().unwrap();
        let slots = SlotStore::new(dir.path());
        {
            let saver = DraftAutosaver::new(slots.clone(), Duration::from_millis(50));
            saver.schedule(draft("torn down", 1));
        }
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(slots.load::<Draft>(DRAFT_KEY).await.is_none());
    }

    #[tokio::test]
    async fn flush_writes_immediately() {
        let dir = tempfile::tempdir().unwrap();
        let slots = SlotStore::new(dir.path());
        let saver = DraftAutosaver::new(slots.clone(), Duration::from_secs(60));

        saver.schedule(draft("now", 1));
        let flushed = saver.flush().await.unwrap();
        assert_eq!(flushed.title, "now");
        let saved: Draft = slots.load(DRAFT_KEY).await.unwrap();
        assert_eq!(saved.title, "now");
    }

    #[tokio::test]
    async fn discard_waits_for_write_in_progress() {
        let dir = tempfile::tempdir().unwrap();
        let slots = SlotStore::new(dir.path());
        let saver = DraftAutosaver::new(slots.clone(), Duration::from_millis(10));

        saver.schedule(draft("racing", 1));
        let deadline = std::time::Instant::now() + Duration::from_secs(2);
        while saver.pending().is_some() {
            assert!(std::time::Instant::now() < deadline, "autosave never started");
            tokio::time::sleep(Duration::from_millis(1)).await;
        }

        saver.discard().await;
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(slots.load::<Draft>(DRAFT_KEY).await.is_none());
    }

    #[tokio::test]
    async fn discard_clears_saved_draft() {
        let dir = tempfile::tempdir().unwrap();
        let slots = SlotStore::new(dir.path());
        let saver = DraftAutosaver::new(slots.clone(), Duration::from_secs(60));

        save_draft(&slots, &draft("saved", 1)).await;
        saver.schedule(draft("pending", 2));
        saver.discard().await;

        assert!(saver.pending().is_none());
        assert!(slots.load::<Draft>(DRAFT_KEY).await.is_none());
    }
}
