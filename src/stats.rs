use crate::journal::JournalStore;
use crate::models::{
    CalendarDay, DailyMoodPoint, JournalEntry, MonthCalendar, Mood, MoodByDate, MoodCount,
    StatsResponse, WeeklyMoodPoint, date_key,
};
use crate::streak::{current_streak, longest_streak};
use chrono::{Datelike, Duration, Local, NaiveDate};

pub fn build_stats(store: &JournalStore) -> StatsResponse {
    build_stats_at(Local::now().date_naive(), store)
}

pub fn build_stats_at(today: NaiveDate, store: &JournalStore) -> StatsResponse {
    const WEEK_COUNT: usize = 8;
    let moods = store.mood_by_date();

    let mut last_7_days = Vec::with_capacity(7);
    for offset in (0..7).rev() {
        let date = today - Duration::days(offset);
        last_7_days.push(DailyMoodPoint {
            date: date_key(date),
            mood: moods.get(&date_key(date)).copied(),
        });
    }

    let current_week_start = week_start(today);
    let mut weekly_moods = Vec::with_capacity(WEEK_COUNT);
    for offset in (0..WEEK_COUNT).rev() {
        let start = current_week_start - Duration::weeks(offset as i64);
        let end = start + Duration::days(6);

        let mut days_logged = 0u8;
        let mut mood_sum = 0u32;
        for day_offset in 0..7 {
            let date = start + Duration::days(day_offset);
            if let Some(mood) = moods.get(&date_key(date)) {
                days_logged += 1;
                mood_sum += u32::from(u8::from(*mood));
            }
        }

        weekly_moods.push(WeeklyMoodPoint {
            week: week_label(start),
            start_date: date_key(start),
            end_date: date_key(end),
            days_logged,
            avg_mood: (days_logged > 0).then(|| f64::from(mood_sum) / f64::from(days_logged)),
        });
    }

    let days = || store.entries().iter().map(JournalEntry::day);

    StatsResponse {
        total_entries: store.len(),
        current_streak: current_streak(days(), today),
        longest_streak: longest_streak(days()),
        mood_summary: mood_summary(moods).map(|mood| mood.label().to_string()),
        mood_counts: mood_counts(moods)
            .into_iter()
            .zip(Mood::ALL)
            .map(|(days, mood)| MoodCount {
                mood,
                label: mood.label().to_string(),
                days,
            })
            .collect(),
        last_7_days,
        weekly_moods,
    }
}

/// Number of dates recorded with each mood, indexed by mood.
pub fn mood_counts(moods: &MoodByDate) -> [u32; 5] {
    let mut counts = [0u32; 5];
    for mood in moods.values() {
        counts[mood.index()] += 1;
    }
    counts
}

/// Most frequent mood; ties go to the lower index.
pub fn mood_summary(moods: &MoodByDate) -> Option<Mood> {
    if moods.is_empty() {
        return None;
    }

    let counts = mood_counts(moods);
    let mut best = 0;
    for (index, count) in counts.iter().enumerate() {
        if *count > counts[best] {
            best = index;
        }
    }
    Some(Mood::ALL[best])
}

/// Returns `None` for a month outside 1..=12.
pub fn month_calendar(year: i32, month: u32, moods: &MoodByDate) -> Option<MonthCalendar> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    let days_in_month = (next_month - first).num_days() as u32;

    let days = (0..days_in_month)
        .map(|offset| {
            let date = first + Duration::days(i64::from(offset));
            let key = date_key(date);
            CalendarDay {
                mood: moods.get(&key).copied(),
                date: key,
                day: offset + 1,
            }
        })
        .collect();

    Some(MonthCalendar {
        year,
        month,
        days_in_month,
        first_weekday: first.weekday().num_days_from_sunday(),
        days,
    })
}

fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

fn week_label(date: NaiveDate) -> String {
    let iso = date.iso_week();
    format!("{}-W{:02}", iso.year(), iso.week())
}
