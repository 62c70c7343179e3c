use crate::models::{EntryFields, EntryPatch, JournalEntry, MoodByDate, date_key};
use crate::streak::current_streak;
use chrono::{DateTime, Local, NaiveDate};

/// Owns the entry list and everything derived from it.
///
/// Entries are kept newest-first. `mood_by_date` and `streak` are updated in
/// the same call that changes the entries, so they never lag behind.
///
/// A day's mood is the mood of the entry on that day with the highest
/// `mood_seq`, i.e. the last mood written. The sequence is persisted with the
/// entries so a reload derives the same map.
#[derive(Debug, Clone, Default)]
pub struct JournalStore {
    entries: Vec<JournalEntry>,
    mood_by_date: MoodByDate,
    streak: u32,
    next_seq: u64,
}

impl JournalStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the derived state for a list loaded from storage.
    pub fn from_entries(entries: Vec<JournalEntry>, today: NaiveDate) -> Self {
        let next_seq = entries.iter().map(|entry| entry.mood_seq).max().unwrap_or(0) + 1;
        let mut store = Self {
            entries,
            mood_by_date: MoodByDate::new(),
            streak: 0,
            next_seq,
        };
        store.sort_entries();

        let keys: Vec<String> = store.entries.iter().map(JournalEntry::day_key).collect();
        for key in keys {
            store.rederive_day(&key);
        }
        store.recompute_streak(today);
        store
    }

    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    pub fn mood_by_date(&self) -> &MoodByDate {
        &self.mood_by_date
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: i64) -> Option<&JournalEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn add_entry(&mut self, fields: EntryFields) -> &JournalEntry {
        self.add_entry_at(fields, Local::now())
    }

    pub fn add_entry_at(&mut self, fields: EntryFields, now: DateTime<Local>) -> &JournalEntry {
        let mut id = now.timestamp_millis();
        if self.entries.iter().any(|entry| entry.id == id) {
            id = self.entries.iter().map(|entry| entry.id).max().unwrap_or(id) + 1;
        }

        let entry = JournalEntry {
            id,
            title: fields.title,
            content: fields.content,
            date: now,
            mood: fields.mood,
            images: fields.images,
            songs: fields.songs,
            mood_seq: self.take_seq(),
        };
        let key = entry.day_key();

        self.entries.insert(0, entry);
        self.sort_entries();
        self.rederive_day(&key);
        self.recompute_streak(now.date_naive());
        self.entry_ref(id)
    }

    /// Merges `patch` into the entry. Returns `None` and changes nothing when
    /// the id is unknown.
    pub fn update_entry(&mut self, id: i64, patch: EntryPatch) -> Option<&JournalEntry> {
        self.update_entry_at(id, patch, Local::now().date_naive())
    }

    pub fn update_entry_at(
        &mut self,
        id: i64,
        patch: EntryPatch,
        today: NaiveDate,
    ) -> Option<&JournalEntry> {
        let pos = self.entries.iter().position(|entry| entry.id == id)?;
        let old_key = self.entries[pos].day_key();
        let date_changed = patch.date.is_some();
        let mood_written = patch.mood.is_some() || date_changed;
        let seq = if mood_written { Some(self.take_seq()) } else { None };

        let entry = &mut self.entries[pos];
        if let Some(title) = patch.title {
            entry.title = title;
        }
        if let Some(content) = patch.content {
            entry.content = content;
        }
        if let Some(mood) = patch.mood {
            entry.mood = mood;
        }
        if let Some(images) = patch.images {
            entry.images = images;
        }
        if let Some(songs) = patch.songs {
            entry.songs = songs;
        }
        if let Some(date) = patch.date {
            entry.date = date;
        }
        if let Some(seq) = seq {
            entry.mood_seq = seq;
        }
        let new_key = entry.day_key();

        if date_changed {
            self.sort_entries();
        }
        if new_key != old_key {
            self.rederive_day(&old_key);
        }
        self.rederive_day(&new_key);

        self.recompute_streak(today);
        Some(self.entry_ref(id))
    }

    /// Writes `fields` into today's entry, or adds one when nothing has been
    /// written today. The flag is `true` when a new entry was created.
    pub fn upsert_today(&mut self, fields: EntryFields) -> (&JournalEntry, bool) {
        self.upsert_today_at(fields, Local::now())
    }

    pub fn upsert_today_at(&mut self, fields: EntryFields, now: DateTime<Local>) -> (&JournalEntry, bool) {
        let today = now.date_naive();
        let Some(id) = self.today_entry(today).map(|entry| entry.id) else {
            return (self.add_entry_at(fields, now), true);
        };

        let patch = EntryPatch {
            title: Some(fields.title),
            content: Some(fields.content),
            mood: Some(fields.mood),
            images: Some(fields.images),
            songs: Some(fields.songs),
            date: None,
        };
        self.update_entry_at(id, patch, today);
        (self.entry_ref(id), false)
    }

    /// Removes the entry and retracts its day from the mood map. Returns
    /// `None` when the id is unknown.
    pub fn delete_entry(&mut self, id: i64) -> Option<JournalEntry> {
        self.delete_entry_at(id, Local::now().date_naive())
    }

    pub fn delete_entry_at(&mut self, id: i64, today: NaiveDate) -> Option<JournalEntry> {
        let pos = self.entries.iter().position(|entry| entry.id == id)?;
        let removed = self.entries.remove(pos);
        self.rederive_day(&removed.day_key());
        self.recompute_streak(today);
        Some(removed)
    }

    pub fn recompute_streak(&mut self, today: NaiveDate) -> u32 {
        self.streak = current_streak(self.entries.iter().map(JournalEntry::day), today);
        self.streak
    }

    /// Newest entry written on `today`.
    pub fn today_entry(&self, today: NaiveDate) -> Option<&JournalEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.day() == today)
            .max_by_key(|entry| (entry.date, entry.id))
    }

    /// Case-insensitive match on title or content, or a substring of the
    /// `YYYY-MM-DD` date.
    pub fn search(&self, query: &str) -> Vec<&JournalEntry> {
        let query = query.trim();
        if query.is_empty() {
            return self.entries.iter().collect();
        }

        let needle = query.to_lowercase();
        self.entries
            .iter()
            .filter(|entry| {
                entry.title.to_lowercase().contains(&needle)
                    || entry.content.to_lowercase().contains(&needle)
                    || date_key(entry.day()).contains(query)
            })
            .collect()
    }

    fn take_seq(&mut self) -> u64 {
        let seq = self.next_seq.max(1);
        self.next_seq = seq + 1;
        seq
    }

    fn sort_entries(&mut self) {
        self.entries
            .sort_by(|a, b| (b.date, b.id).cmp(&(a.date, a.id)));
    }

    /// Callers only pass ids they just found or inserted.
    fn entry_ref(&self, id: i64) -> &JournalEntry {
        let pos = self
            .entries
            .iter()
            .position(|entry| entry.id == id)
            .unwrap_or_default();
        &self.entries[pos]
    }

    fn rederive_day(&mut self, key: &str) {
        let latest = self
            .entries
            .iter()
            .filter(|entry| entry.day_key() == key)
            .max_by_key(|entry| (entry.mood_seq, entry.date, entry.id))
            .map(|entry| entry.mood);

        match latest {
            Some(mood) => {
                self.mood_by_date.insert(key.to_string(), mood);
            }
            None => {
                self.mood_by_date.remove(key);
            }
        }
    }
}
