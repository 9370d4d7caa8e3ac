use crate::auth::{self, UserProfile};
use crate::catalog::{self, Platform, Tool, Tutorial};
use crate::errors::AppError;
use crate::models::{
    PageQuery, PageView, PlatformDetail, PlatformSummary, ResourceView, SearchQuery, SearchView,
    SignInForm, SignInRequest, ThemeResponse, ToggleForm, ToggleRequest, ToggleResponse,
};
use crate::progress::{self, ProgressRecord};
use crate::state::AppState;
use crate::storage::{persist_data, SlotStore};
use crate::theme;
use crate::ui::render_index;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, Redirect},
    Form, Json,
};
use tracing::{debug, info};

pub async fn index(State(state): State<AppState>, Query(query): Query<PageQuery>) -> Html<String> {
    let store = state.store.lock().await;
    let view = build_page(&store, &query);
    Html(render_index(&view))
}

pub async fn toggle_form(
    State(state): State<AppState>,
    Form(form): Form<ToggleForm>,
) -> Result<Redirect, AppError> {
    let response = apply_toggle(&state, &form.platform, &form.resource).await?;
    Ok(Redirect::to(&format!("/?platform={}#detail", response.platform_id)))
}

pub async fn theme_form(State(state): State<AppState>) -> Result<Redirect, AppError> {
    apply_theme_toggle(&state).await?;
    Ok(Redirect::to("/"))
}

pub async fn sign_in_form(
    State(state): State<AppState>,
    Form(form): Form<SignInForm>,
) -> Result<Redirect, AppError> {
    apply_sign_in(&state, &form.name).await?;
    Ok(Redirect::to("/"))
}

pub async fn sign_out_form(State(state): State<AppState>) -> Result<Redirect, AppError> {
    apply_sign_out(&state).await?;
    Ok(Redirect::to("/"))
}

pub async fn list_platforms(State(state): State<AppState>) -> Json<Vec<PlatformSummary>> {
    let store = state.store.lock().await;
    Json(summaries(&store, catalog::platforms().iter()))
}

pub async fn get_platform(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PlatformDetail>, AppError> {
    let platform = lookup_platform(&id)?;
    let store = state.store.lock().await;
    Ok(Json(platform_detail(&store, platform)))
}

pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Json<Vec<PlatformSummary>> {
    let results = catalog::search_platforms(&query.q);
    debug!(query = %query.q, matches = results.len(), "platform search");
    let store = state.store.lock().await;
    Json(summaries(&store, results.into_iter()))
}

pub async fn get_progress(State(state): State<AppState>) -> Json<ProgressRecord> {
    let store = state.store.lock().await;
    Json(progress::load(&store))
}

pub async fn toggle(
    State(state): State<AppState>,
    Json(payload): Json<ToggleRequest>,
) -> Result<Json<ToggleResponse>, AppError> {
    let response = apply_toggle(&state, &payload.platform_id, &payload.resource_title).await?;
    Ok(Json(response))
}

pub async fn get_theme(State(state): State<AppState>) -> Json<ThemeResponse> {
    let store = state.store.lock().await;
    Json(ThemeResponse {
        mode: theme::current_theme(&store),
    })
}

pub async fn toggle_theme(State(state): State<AppState>) -> Result<Json<ThemeResponse>, AppError> {
    let mode = apply_theme_toggle(&state).await?;
    Ok(Json(ThemeResponse { mode }))
}

pub async fn get_user(State(state): State<AppState>) -> Json<Option<UserProfile>> {
    let store = state.store.lock().await;
    Json(auth::current_user(&store))
}

pub async fn sign_in(
    State(state): State<AppState>,
    Json(payload): Json<SignInRequest>,
) -> Result<Json<UserProfile>, AppError> {
    apply_sign_in(&state, &payload.name)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::bad_request("name must not be empty"))
}

pub async fn sign_out(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    apply_sign_out(&state).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_tools() -> Json<&'static [Tool]> {
    Json(catalog::tools())
}

pub async fn list_tutorials() -> Json<&'static [Tutorial]> {
    Json(catalog::tutorials())
}

/// Mutations work on a copy of the store and only replace the shared one
/// once the copy is on disk, so a failed write changes nothing.
async fn apply_toggle(
    state: &AppState,
    platform_id: &str,
    resource_title: &str,
) -> Result<ToggleResponse, AppError> {
    let platform = lookup_platform(platform_id)?;
    let resource = platform.find_resource(resource_title).ok_or_else(|| {
        AppError::not_found(format!("unknown resource '{resource_title}' in '{platform_id}'"))
    })?;

    let mut store = state.store.lock().await;
    let mut next = store.clone();
    let completed = progress::toggle_completion(&mut next, platform.id, resource.title)?;
    persist_data(&state.data_path, &next).await?;
    *store = next;

    let percent_complete =
        progress::percent_complete(&store, platform.id, platform.total_resources());
    info!(
        platform = platform.id,
        resource = resource.title,
        completed,
        percent_complete,
        "toggled resource completion"
    );

    Ok(ToggleResponse {
        platform_id: platform.id.to_owned(),
        resource_title: resource.title.to_owned(),
        completed,
        percent_complete,
    })
}

async fn apply_theme_toggle(state: &AppState) -> Result<theme::ThemeMode, AppError> {
    let mut store = state.store.lock().await;
    let mut next = store.clone();
    let mode = theme::toggle_theme(&mut next);
    persist_data(&state.data_path, &next).await?;
    *store = next;
    info!(mode = mode.as_str(), "theme changed");
    Ok(mode)
}

async fn apply_sign_in(state: &AppState, name: &str) -> Result<Option<UserProfile>, AppError> {
    let mut store = state.store.lock().await;
    let mut next = store.clone();
    let Some(profile) = auth::sign_in(&mut next, name)? else {
        debug!("sign-in cancelled");
        return Ok(None);
    };
    persist_data(&state.data_path, &next).await?;
    *store = next;
    info!(email = %profile.email, "demo user signed in");
    Ok(Some(profile))
}

async fn apply_sign_out(state: &AppState) -> Result<(), AppError> {
    let mut store = state.store.lock().await;
    let mut next = store.clone();
    if auth::sign_out(&mut next) {
        persist_data(&state.data_path, &next).await?;
        *store = next;
        info!("demo user signed out");
    }
    Ok(())
}

fn lookup_platform(id: &str) -> Result<&'static Platform, AppError> {
    catalog::find_platform(id).ok_or_else(|| AppError::not_found(format!("unknown platform '{id}'")))
}

fn summaries(
    store: &SlotStore,
    platforms: impl Iterator<Item = &'static Platform>,
) -> Vec<PlatformSummary> {
    platforms
        .map(|platform| PlatformSummary::new(platform, progress::platform_progress(store, platform)))
        .collect()
}

fn platform_detail(store: &SlotStore, platform: &'static Platform) -> PlatformDetail {
    let summary = progress::platform_progress(store, platform);
    let resources = platform
        .resources
        .iter()
        .map(|resource| ResourceView {
            title: resource.title,
            description: resource.description,
            link: resource.link,
            difficulty: resource.difficulty,
            estimated_time: resource.estimated_time,
            completed: progress::is_completed(store, platform.id, resource.title),
        })
        .collect();

    PlatformDetail {
        id: platform.id,
        name: platform.name,
        icon: platform.icon,
        category: platform.category,
        description: platform.description,
        main_link: platform.main_link,
        completed_resources: summary.completed,
        total_resources: summary.total,
        percent_complete: summary.percent,
        resources,
    }
}

/// Unknown platform ids simply leave the detail panel closed.
fn build_page(store: &SlotStore, query: &PageQuery) -> PageView {
    let search = query.q.as_ref().map(|q| SearchView {
        query: q.clone(),
        results: catalog::search_platforms(q),
    });
    let detail = query
        .platform
        .as_deref()
        .and_then(catalog::find_platform)
        .map(|platform| platform_detail(store, platform));

    PageView {
        theme: theme::current_theme(store),
        user: auth::current_user(store),
        grid: summaries(store, catalog::platforms().iter()),
        search,
        detail,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_opens_detail_only_for_known_platform() {
        let mut store = SlotStore::default();
        progress::toggle_completion(&mut store, "docker", "Docker Compose").unwrap();

        let query = PageQuery {
            platform: Some("docker".into()),
            q: None,
        };
        let page = build_page(&store, &query);
        let detail = page.detail.expect("docker detail");
        assert_eq!(detail.completed_resources, 1);
        assert_eq!(detail.percent_complete, 25);
        assert!(detail.resources.iter().any(|r| r.title == "Docker Compose" && r.completed));
        assert!(page.search.is_none());

        let query = PageQuery {
            platform: Some("cobol".into()),
            q: Some("pyth".into()),
        };
        let page = build_page(&store, &query);
        assert!(page.detail.is_none());
        let search = page.search.expect("search panel");
        assert_eq!(search.results.len(), 1);
        assert_eq!(search.results[0].id, "python");
    }

    #[test]
    fn grid_reports_progress_per_platform() {
        let mut store = SlotStore::default();
        progress::toggle_completion(&mut store, "react", "Understanding JSX").unwrap();
        progress::toggle_completion(&mut store, "react", "Components & Props").unwrap();

        let grid = summaries(&store, catalog::platforms().iter());
        assert_eq!(grid.len(), 5);
        assert_eq!(grid[0].id, "react");
        assert_eq!(grid[0].completed_resources, 2);
        assert_eq!(grid[0].percent_complete, 50);
        assert!(grid[1..].iter().all(|summary| summary.percent_complete == 0));
    }

    fn unwritable_state(name: &str) -> (AppState, std::path::PathBuf) {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let mut dir = std::env::temp_dir();
        dir.push(format!("tech_catalog_{name}_{}_{nanos}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        // A directory in place of the data file makes every write fail.
        (AppState::new(dir.clone(), SlotStore::default()), dir)
    }

    #[tokio::test]
    async fn failed_persist_leaves_progress_unchanged() {
        let (state, dir) = unwritable_state("toggle");

        let result = apply_toggle(&state, "react", "Understanding JSX").await;
        assert!(result.is_err());

        let store = state.store.lock().await;
        assert!(!progress::is_completed(&store, "react", "Understanding JSX"));
        assert_eq!(*store, SlotStore::default());
        drop(store);
        let _ = std::fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn failed_persist_leaves_theme_and_user_unchanged() {
        let (state, dir) = unwritable_state("settings");

        assert!(apply_theme_toggle(&state).await.is_err());
        assert!(apply_sign_in(&state, "Ada Lovelace").await.is_err());

        let store = state.store.lock().await;
        assert_eq!(theme::current_theme(&store), theme::ThemeMode::Dark);
        assert_eq!(auth::current_user(&store), None);
        drop(store);
        let _ = std::fs::remove_dir_all(dir);
    }
}
