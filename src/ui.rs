use crate::journal::JournalStore;
use crate::models::{JournalEntry, User};
use crate::stats::mood_summary;
use chrono::NaiveDate;

const RECENT_LIMIT: usize = 5;

pub fn render_index(user: Option<&User>, journal: &JournalStore, today: NaiveDate) -> String {
    let greeting = match user {
        Some(user) => format!("Hi, {}", escape_html(&user.name)),
        None => "Log in through <code>/api/auth/login</code> to start writing.".to_string(),
    };

    let today_html = match journal.today_entry(today) {
        Some(entry) => render_entry(entry),
        None => r#"<p class="muted">Nothing written yet today.</p>"#.to_string(),
    };

    let recent: String = journal
        .entries()
        .iter()
        .filter(|entry| entry.day() != today)
        .take(RECENT_LIMIT)
        .map(render_entry)
        .collect();
    let recent_html = if recent.is_empty() {
        r#"<p class="muted">No earlier entries.</p>"#.to_string()
    } else {
        recent
    };

    let summary = mood_summary(journal.mood_by_date())
        .map(|mood| mood.label())
        .unwrap_or("No moods yet");

    INDEX_HTML
        .replace("{{GREETING}}", &greeting)
        .replace("{{DATE}}", &today.format("%A, %B %-d, %Y").to_string())
        .replace("{{STREAK}}", &journal.streak().to_string())
        .replace("{{ENTRIES}}", &journal.len().to_string())
        .replace("{{SUMMARY}}", summary)
        .replace("{{TODAY}}", &today_html)
        .replace("{{RECENT}}", &recent_html)
}

fn render_entry(entry: &JournalEntry) -> String {
    format!(
        r#"<article class="entry"><header><h3>{title}</h3><span class="mood mood-{index}">{mood}</span></header><time>{date}</time><p>{content}</p><footer>{images} images · {songs} songs</footer></article>"#,
        title = escape_html(&entry.title),
        index = entry.mood.index(),
        mood = entry.mood.label(),
        date = entry.day_key(),
        content = escape_html(&entry.content),
        images = entry.images.len(),
        songs = entry.songs.len(),
    )
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            '{' => escaped.push_str("&#123;"),
            '}' => escaped.push_str("&#125;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Mood Journal</title>
  <style>
    :root {
      --bg-1: #f6f1fb;
      --ink: #2b2a28;
      --accent: #7c3aed;
      --card: rgba(255, 255, 255, 0.9);
      --shadow: 0 24px 60px rgba(76, 29, 149, 0.14);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: linear-gradient(135deg, var(--bg-1), #fdf4ff 60%, #f5f3ff 100%);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(760px, 100%);
      background: var(--card);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 24px;
    }

    .stats {
      display: grid;
      grid-template-columns: repeat(3, 1fr);
      gap: 12px;
    }

    .stat {
      background: #ede9fe;
      border-radius: 18px;
      padding: 14px;
      text-align: center;
    }

    .stat strong {
      display: block;
      font-size: 1.6rem;
      color: var(--accent);
    }

    .entry {
      border: 1px solid #e9d5ff;
      border-radius: 18px;
      padding: 16px;
      margin-bottom: 12px;
    }

    .entry header {
      display: flex;
      justify-content: space-between;
      align-items: center;
    }

    .entry h3 {
      margin: 0;
    }

    .entry p {
      white-space: pre-wrap;
    }

    .mood {
      border-radius: 999px;
      padding: 4px 12px;
      font-size: 0.85rem;
    }

    .mood-0 { background: #facc15; }
    .mood-1 { background: #4ade80; }
    .mood-2 { background: #60a5fa; }
    .mood-3 { background: #fb923c; }
    .mood-4 { background: #f87171; }

    .muted {
      color: #6b7280;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Mood Journal</h1>
      <p>{{GREETING}}</p>
      <p class="muted">{{DATE}}</p>
    </header>
    <section class="stats">
      <div class="stat"><strong>{{STREAK}}</strong>day streak</div>
      <div class="stat"><strong>{{ENTRIES}}</strong>entries</div>
      <div class="stat"><strong>{{SUMMARY}}</strong>usual mood</div>
    </section>
    <section>
      <h2>Today</h2>
      {{TODAY}}
    </section>
    <section>
      <h2>Recent</h2>
      {{RECENT}}
    </section>
  </main>
</body>
</html>
"#;
