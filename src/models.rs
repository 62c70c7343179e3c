use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Calendar date (`YYYY-MM-DD`) to the mood recorded for that day.
pub type MoodByDate = BTreeMap<String, Mood>;

/// How the day went, best to worst. Stored and sent as its integer index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Mood {
    Awesome = 0,
    Good = 1,
    Meh = 2,
    Rough = 3,
    DeadInside = 4,
}

#[derive(Debug, thiserror::Error)]
#[error("mood must be between 0 and 4, got {0}")]
pub struct InvalidMood(pub u8);

impl Mood {
    pub const ALL: [Mood; 5] = [
        Mood::Awesome,
        Mood::Good,
        Mood::Meh,
        Mood::Rough,
        Mood::DeadInside,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            Mood::Awesome => "Awesome",
            Mood::Good => "Pretty good",
            Mood::Meh => "Meh",
            Mood::Rough => "Rough",
            Mood::DeadInside => "Dead inside",
        }
    }
}

impl TryFrom<u8> for Mood {
    type Error = InvalidMood;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Mood::ALL
            .get(usize::from(value))
            .copied()
            .ok_or(InvalidMood(value))
    }
}

impl From<Mood> for u8 {
    fn from(mood: Mood) -> Self {
        mood as u8
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    pub id: String,
    pub name: String,
    pub artist: String,
    pub album_art: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,
    pub spotify_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub date: DateTime<Local>,
    pub mood: Mood,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub songs: Vec<Song>,
    /// Order of the last mood write across the journal. The day's mood comes
    /// from the entry with the highest value.
    #[serde(default)]
    pub mood_seq: u64,
}

impl JournalEntry {
    pub fn day(&self) -> NaiveDate {
        self.date.date_naive()
    }

    pub fn day_key(&self) -> String {
        date_key(self.day())
    }
}

/// Everything the caller supplies for a new entry; id and date are assigned.
#[derive(Debug, Clone, Deserialize)]
pub struct EntryFields {
    pub title: String,
    pub content: String,
    pub mood: Mood,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub songs: Vec<Song>,
}

/// Body of an entry save. Everything is optional so missing fields get the
/// same messages as blank ones instead of a deserialization rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntryRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub mood: Option<Mood>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub songs: Vec<Song>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntryPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub mood: Option<Mood>,
    pub images: Option<Vec<String>>,
    pub songs: Option<Vec<Song>>,
    pub date: Option<DateTime<Local>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageFile {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub selected_mood: Option<Mood>,
    #[serde(default)]
    pub images: Vec<ImageFile>,
    #[serde(default)]
    pub songs: Vec<Song>,
    /// Epoch milliseconds of the last edit.
    #[serde(default)]
    pub last_modified: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub user: User,
    pub token: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StreakResponse {
    pub streak: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PromptResponse {
    pub prompt: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CalendarDay {
    pub date: String,
    pub day: u32,
    pub mood: Option<Mood>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MonthCalendar {
    pub year: i32,
    pub month: u32,
    pub days_in_month: u32,
    /// Weekday of the 1st, Sunday = 0.
    pub first_weekday: u32,
    pub days: Vec<CalendarDay>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DailyMoodPoint {
    pub date: String,
    pub mood: Option<Mood>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WeeklyMoodPoint {
    pub week: String,
    pub start_date: String,
    pub end_date: String,
    pub days_logged: u8,
    pub avg_mood: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MoodCount {
    pub mood: Mood,
    pub label: String,
    pub days: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatsResponse {
    pub total_entries: usize,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub mood_summary: Option<String>,
    pub mood_counts: Vec<MoodCount>,
    pub last_7_days: Vec<DailyMoodPoint>,
    pub weekly_moods: Vec<WeeklyMoodPoint>,
}

pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mood_serializes_as_integer() {
        assert_eq!(serde_json::to_string(&Mood::Rough).unwrap(), "3");
        let mood: Mood = serde_json::from_str("0").unwrap();
        assert_eq!(mood, Mood::Awesome);
    }

    #[test]
    fn mood_rejects_out_of_range() {
        assert!(serde_json::from_str::<Mood>("5").is_err());
        assert!(Mood::try_from(7u8).is_err());
    }

    #[test]
    fn entry_without_attachments_defaults_to_empty() {
        let json = r#"{
            "id": 1,
            "title": "t",
            "content": "c",
            "date": "2024-03-16T09:30:00+00:00",
            "mood": 4
        }"#;
        let entry: JournalEntry = serde_json::from_str(json).unwrap();
        assert!(entry.images.is_empty());
        assert!(entry.songs.is_empty());
        assert_eq!(entry.mood, Mood::DeadInside);
    }

    #[test]
    fn song_uses_camel_case_fields() {
        let song = Song {
            id: "1".into(),
            name: "n".into(),
            artist: "a".into(),
            album_art: "art".into(),
            preview_url: None,
            spotify_url: "url".into(),
        };
        let value = serde_json::to_value(&song).unwrap();
        assert_eq!(value["albumArt"], "art");
        assert_eq!(value["spotifyUrl"], "url");
        assert!(value.get("previewUrl").is_none());
    }
}
