use crate::auth::UserProfile;
use crate::catalog::{Difficulty, Platform};
use crate::progress::PlatformProgress;
use crate::theme::ThemeMode;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub platform: Option<String>,
    pub q: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Deserialize)]
pub struct ToggleForm {
    pub platform: String,
    pub resource: String,
}

#[derive(Debug, Deserialize)]
pub struct SignInForm {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleRequest {
    pub platform_id: String,
    pub resource_title: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleResponse {
    pub platform_id: String,
    pub resource_title: String,
    pub completed: bool,
    pub percent_complete: u8,
}

#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct ThemeResponse {
    pub mode: ThemeMode,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformSummary {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub category: &'static str,
    pub total_resources: usize,
    pub completed_resources: usize,
    pub percent_complete: u8,
}

impl PlatformSummary {
    pub fn new(platform: &'static Platform, progress: PlatformProgress) -> Self {
        Self {
            id: platform.id,
            name: platform.name,
            icon: platform.icon,
            category: platform.category,
            total_resources: progress.total,
            completed_resources: progress.completed,
            percent_complete: progress.percent,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceView {
    pub title: &'static str,
    pub description: &'static str,
    pub link: &'static str,
    pub difficulty: Difficulty,
    pub estimated_time: &'static str,
    pub completed: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformDetail {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub category: &'static str,
    pub description: &'static str,
    pub main_link: &'static str,
    pub completed_resources: usize,
    pub total_resources: usize,
    pub percent_complete: u8,
    pub resources: Vec<ResourceView>,
}

/// Everything one render of the page needs, captured under a single lock.
#[derive(Debug)]
pub struct PageView {
    pub theme: ThemeMode,
    pub user: Option<UserProfile>,
    pub grid: Vec<PlatformSummary>,
    pub search: Option<SearchView>,
    pub detail: Option<PlatformDetail>,
}

#[derive(Debug)]
pub struct SearchView {
    pub query: String,
    pub results: Vec<&'static Platform>,
}
