use crate::auth;
use crate::draft::load_draft;
use crate::errors::AppError;
use crate::journal::JournalStore;
use crate::models::{
    CalendarQuery, Draft, EntryFields, EntryPatch, EntryRequest, JournalEntry, LoginRequest,
    MonthCalendar, MoodByDate, PromptResponse, SearchQuery, SessionResponse, SignupRequest, Song,
    StatsResponse, StreakResponse, User,
};
use crate::prompts::{append_prompt, random_prompt};
use crate::songs::search_songs;
use crate::state::AppState;
use crate::stats::{build_stats, month_calendar};
use crate::storage::ENTRIES_KEY;
use crate::ui::render_index;
use axum::{
    Json,
    extract::{FromRequestParts, Path, Query, State},
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
    response::Html,
};
use chrono::{Datelike, Local, Utc};
use tracing::info;

/// The logged-in user, resolved from `Authorization: Bearer <token>`.
pub struct CurrentUser(pub User);

#[axum::async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or_else(AppError::unauthorized)?;

        let session = auth::current_session(&state.slots)
            .await
            .ok_or_else(AppError::unauthorized)?;
        if session.token != token {
            return Err(AppError::unauthorized());
        }

        Ok(CurrentUser(session.user))
    }
}

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let today = Local::now().date_naive();
    let user = auth::current_session(&state.slots).await.map(|session| session.user);
    let mut journal = state.journal.lock().await;
    journal.recompute_streak(today);
    Html(render_index(user.as_ref(), &journal, today))
}

pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = auth::signup(&state.slots, &payload.email, &payload.password, &payload.name).await?;
    info!(user = %session.user.id, "signed up");
    Ok(Json(SessionResponse {
        user: session.user,
        token: session.token,
    }))
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = auth::login(&state.slots, &payload.email, &payload.password).await?;
    info!(user = %session.user.id, "logged in");
    Ok(Json(SessionResponse {
        user: session.user,
        token: session.token,
    }))
}

pub async fn logout(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    auth::logout(&state.slots).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn me(CurrentUser(user): CurrentUser) -> Json<User> {
    Json(user)
}

pub async fn list_entries(
    _user: CurrentUser,
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Json<Vec<JournalEntry>> {
    let journal = state.journal.lock().await;
    Json(journal.search(&query.q).into_iter().cloned().collect())
}

const MISSING_TITLE: &str = "Please add a title for your entry!";
const MISSING_CONTENT_OR_MOOD: &str = "Please write something and select a mood before saving!";

pub async fn create_entry(
    _user: CurrentUser,
    State(state): State<AppState>,
    Json(request): Json<EntryRequest>,
) -> Result<(StatusCode, Json<JournalEntry>), AppError> {
    let fields = validate_entry(request)?;

    let (entry, streak) = commit(&state, move |journal| {
        let entry = journal.add_entry(fields).clone();
        Ok((entry, journal.streak()))
    })
    .await?;
    info!(id = entry.id, streak, "added entry");

    state.drafts.discard().await;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// Saves the editor into today's entry, creating it on the first save of the
/// day.
pub async fn save_today_entry(
    _user: CurrentUser,
    State(state): State<AppState>,
    Json(request): Json<EntryRequest>,
) -> Result<(StatusCode, Json<JournalEntry>), AppError> {
    let fields = validate_entry(request)?;

    let (entry, created) = commit(&state, move |journal| {
        let (entry, created) = journal.upsert_today(fields);
        Ok((entry.clone(), created))
    })
    .await?;
    info!(id = entry.id, created, "saved today's entry");

    state.drafts.discard().await;
    let status = if created { StatusCode::CREATED } else { StatusCode::OK };
    Ok((status, Json(entry)))
}

pub async fn today_entry(
    _user: CurrentUser,
    State(state): State<AppState>,
) -> Json<Option<JournalEntry>> {
    let journal = state.journal.lock().await;
    Json(journal.today_entry(Local::now().date_naive()).cloned())
}

pub async fn get_entry(
    _user: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<JournalEntry>, AppError> {
    let journal = state.journal.lock().await;
    journal
        .get(id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::entry_not_found(id))
}

pub async fn update_entry(
    _user: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(patch): Json<EntryPatch>,
) -> Result<Json<JournalEntry>, AppError> {
    if patch.title.as_deref().is_some_and(|title| title.trim().is_empty()) {
        return Err(AppError::bad_request(MISSING_TITLE));
    }
    if patch.content.as_deref().is_some_and(|content| content.trim().is_empty()) {
        return Err(AppError::bad_request(MISSING_CONTENT_OR_MOOD));
    }

    let entry = commit(&state, move |journal| {
        journal
            .update_entry(id, patch)
            .cloned()
            .ok_or_else(|| AppError::entry_not_found(id))
    })
    .await?;
    info!(id, "updated entry");

    Ok(Json(entry))
}

pub async fn delete_entry(
    _user: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    commit(&state, move |journal| {
        journal
            .delete_entry(id)
            .ok_or_else(|| AppError::entry_not_found(id))
    })
    .await?;
    info!(id, "deleted entry");

    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_moods(_user: CurrentUser, State(state): State<AppState>) -> Json<MoodByDate> {
    let journal = state.journal.lock().await;
    Json(journal.mood_by_date().clone())
}

pub async fn get_calendar(
    _user: CurrentUser,
    State(state): State<AppState>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<MonthCalendar>, AppError> {
    let today = Local::now().date_naive();
    let year = query.year.unwrap_or(today.year());
    let month = query.month.unwrap_or(today.month());

    let journal = state.journal.lock().await;
    month_calendar(year, month, journal.mood_by_date())
        .map(Json)
        .ok_or_else(|| AppError::bad_request("month must be between 1 and 12"))
}

pub async fn get_streak(_user: CurrentUser, State(state): State<AppState>) -> Json<StreakResponse> {
    let mut journal = state.journal.lock().await;
    let streak = journal.recompute_streak(Local::now().date_naive());
    Json(StreakResponse { streak })
}

pub async fn get_stats(_user: CurrentUser, State(state): State<AppState>) -> Json<StatsResponse> {
    let journal = state.journal.lock().await;
    Json(build_stats(&journal))
}

pub async fn get_draft(_user: CurrentUser, State(state): State<AppState>) -> Json<Option<Draft>> {
    Json(current_draft(&state).await)
}

pub async fn put_draft(
    _user: CurrentUser,
    State(state): State<AppState>,
    Json(mut draft): Json<Draft>,
) -> (StatusCode, Json<Draft>) {
    draft.last_modified = Utc::now().timestamp_millis();
    state.drafts.schedule(draft.clone());
    (StatusCode::ACCEPTED, Json(draft))
}

pub async fn flush_draft(_user: CurrentUser, State(state): State<AppState>) -> Json<Option<Draft>> {
    Json(state.drafts.flush().await)
}

pub async fn delete_draft(_user: CurrentUser, State(state): State<AppState>) -> StatusCode {
    state.drafts.discard().await;
    StatusCode::NO_CONTENT
}

pub async fn prompt_draft(_user: CurrentUser, State(state): State<AppState>) -> Json<Draft> {
    let mut draft = current_draft(&state).await.unwrap_or_default();
    draft.content = append_prompt(&draft.content, random_prompt());
    draft.last_modified = Utc::now().timestamp_millis();
    state.drafts.schedule(draft.clone());
    Json(draft)
}

pub async fn songs(Query(query): Query<SearchQuery>) -> Json<Vec<Song>> {
    Json(search_songs(&query.q))
}

pub async fn prompt() -> Json<PromptResponse> {
    Json(PromptResponse {
        prompt: random_prompt().to_string(),
    })
}

async fn current_draft(state: &AppState) -> Option<Draft> {
    match state.drafts.pending() {
        Some(draft) => Some(draft),
        None => load_draft(&state.slots).await,
    }
}

fn validate_entry(request: EntryRequest) -> Result<EntryFields, AppError> {
    if request.title.trim().is_empty() {
        return Err(AppError::bad_request(MISSING_TITLE));
    }
    let Some(mood) = request.mood else {
        return Err(AppError::bad_request(MISSING_CONTENT_OR_MOOD));
    };
    if request.content.trim().is_empty() {
        return Err(AppError::bad_request(MISSING_CONTENT_OR_MOOD));
    }

    Ok(EntryFields {
        title: request.title,
        content: request.content,
        mood,
        images: request.images,
        songs: request.songs,
    })
}

/// Applies `change` to a copy of the journal and swaps it in only after the
/// entry list is on disk. A failed write leaves memory untouched.
async fn commit<T>(
    state: &AppState,
    change: impl FnOnce(&mut JournalStore) -> Result<T, AppError>,
) -> Result<T, AppError> {
    let mut journal = state.journal.lock().await;
    let mut next = journal.clone();
    let out = change(&mut next)?;
    state.slots.persist(ENTRIES_KEY, next.entries()).await?;
    *journal = next;
    Ok(out)
}
