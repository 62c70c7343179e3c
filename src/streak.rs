use chrono::{Duration, NaiveDate};
use std::collections::BTreeSet;

/// Consecutive days with at least one entry, ending today or yesterday.
///
/// Days after `today` are ignored. Several entries on one day count once.
pub fn current_streak<I>(days: I, today: NaiveDate) -> u32
where
    I: IntoIterator<Item = NaiveDate>,
{
    let days: BTreeSet<NaiveDate> = days.into_iter().filter(|day| *day <= today).collect();

    let Some(&latest) = days.last() else {
        return 0;
    };
    if latest != today && latest != today - Duration::days(1) {
        return 0;
    }

    let mut streak = 0u32;
    let mut check_date = latest;
    for day in days.iter().rev() {
        if *day == check_date {
            streak += 1;
            check_date -= Duration::days(1);
        } else {
            break;
        }
    }
    streak
}

/// Longest run of consecutive days anywhere in the history.
pub fn longest_streak<I>(days: I) -> u32
where
    I: IntoIterator<Item = NaiveDate>,
{
    let days: BTreeSet<NaiveDate> = days.into_iter().collect();

    let mut longest = 0u32;
    let mut run = 0u32;
    let mut prev: Option<NaiveDate> = None;
    for day in days {
        run = match prev {
            Some(prev) if day == prev + Duration::days(1) => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        prev = Some(day);
    }
    longest
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn no_days_means_no_streak() {
        assert_eq!(current_streak(Vec::new(), ymd(2024, 3, 16)), 0);
    }

    #[test]
    fn latest_day_before_yesterday_resets_streak() {
        let today = ymd(2024, 3, 16);
        let days = vec![ymd(2024, 3, 14), ymd(2024, 3, 13), ymd(2024, 3, 12)];
        assert_eq!(current_streak(days, today), 0);
    }

    #[test]
    fn three_consecutive_days_then_gap() {
        let today = ymd(2024, 3, 16);
        let days = vec![
            today,
            today - Duration::days(1),
            today - Duration::days(2),
            today - Duration::days(4),
        ];
        assert_eq!(current_streak(days, today), 3);
    }

    #[test]
    fn streak_may_end_yesterday() {
        let today = ymd(2024, 3, 16);
        let days = vec![ymd(2024, 3, 15), ymd(2024, 3, 14)];
        assert_eq!(current_streak(days, today), 2);
    }

    #[test]
    fn same_day_counts_once() {
        let today = ymd(2024, 3, 16);
        let days = vec![today, today, today, ymd(2024, 3, 15)];
        assert_eq!(current_streak(days, today), 2);
    }

    #[test]
    fn future_days_are_ignored() {
        let today = ymd(2024, 3, 16);
        let days = vec![ymd(2024, 3, 20), today];
        assert_eq!(current_streak(days, today), 1);
    }

    #[test]
    fn streak_crosses_month_boundary() {
        let today = ymd(2024, 3, 1);
        let days = vec![today, ymd(2024, 2, 29), ymd(2024, 2, 28)];
        assert_eq!(current_streak(days, today), 3);
    }

    #[test]
    fn longest_streak_finds_best_run() {
        let days = vec![
            ymd(2024, 1, 1),
            ymd(2024, 1, 2),
            ymd(2024, 1, 5),
            ymd(2024, 1, 6),
            ymd(2024, 1, 7),
            ymd(2024, 1, 7),
        ];
        assert_eq!(longest_streak(days), 3);
        assert_eq!(longest_streak(Vec::new()), 0);
    }
}
