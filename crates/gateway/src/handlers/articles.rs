//! Newspaper article handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::pipeline::orchestrator::{
    PublicationOrchestrator, PublicationStatus, PublishRequest,
};
use crate::pipeline::store::{PublicationStore, RewriteDispatch};
use crate::pipeline::submission::Submission;
use crate::pipeline::tenant_scope;
use crate::AppState;
use newsdesk_common::{
    auth::Principal,
    db::models::{ArticleStatus, NewspaperArticle},
    db::{NewspaperArticleFilter, NewspaperArticlePatch, Repository},
    errors::{AppError, Result},
    queue::QueuedFormats,
};

/// Query overrides on article creation
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateArticleQuery {
    /// Per-request rewrite override; enabling requires super admin
    pub force_ai_rewrite_enabled: Option<bool>,

    /// Target tenant (honored for super admins only)
    pub tenant_id: Option<Uuid>,
}

/// Response after accepting a submission (work continues asynchronously)
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateArticleResponse {
    pub base_article_id: Uuid,
    pub print_article_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_article_id: Option<Uuid>,
    pub external_id: String,
    pub ai_mode: String,
    pub queued: QueuedFormats,
    pub creation_status: PublicationStatus,
    pub status_url: String,
}

/// Filters for listing newspaper articles
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListArticlesQuery {
    pub tenant_id: Option<Uuid>,
    pub status: Option<String>,
    /// UTC day, YYYY-MM-DD
    pub date: Option<NaiveDate>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

/// One newspaper article in API shape
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewspaperArticleResponse {
    pub id: Uuid,
    pub base_article_id: Uuid,
    pub external_id: String,
    pub headline: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    pub points: serde_json::Value,
    pub dateline: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place_name: Option<String>,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<NewspaperArticle> for NewspaperArticleResponse {
    fn from(article: NewspaperArticle) -> Self {
        Self {
            id: article.id,
            base_article_id: article.base_article_id,
            external_id: article.external_id,
            headline: article.headline,
            subtitle: article.subtitle,
            points: article.points,
            dateline: article.dateline,
            place_name: article.place_name,
            status: article.status,
            created_at: article.created_at.to_rfc3339(),
            updated_at: article.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListArticlesResponse {
    pub items: Vec<NewspaperArticleResponse>,
    pub total: u64,
    pub limit: u64,
    pub offset: u64,
}

/// Patchable newspaper article fields
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PatchArticleRequest {
    #[validate(length(min = 1, max = 200))]
    pub headline: Option<String>,

    #[validate(length(max = 50))]
    pub subtitle: Option<String>,

    pub points: Option<Vec<String>>,

    pub status: Option<String>,
}

fn orchestrator(state: &AppState) -> PublicationOrchestrator {
    let store: Arc<dyn PublicationStore> = Arc::new(Repository::new(state.db.clone()));
    let dispatch = state
        .queue
        .clone()
        .map(|q| q as Arc<dyn RewriteDispatch>);

    PublicationOrchestrator::new(store, dispatch, state.config.publishing.clone())
}

/// Accept a submission and run the publication pipeline
pub async fn create_article(
    State(state): State<AppState>,
    principal: Principal,
    Query(query): Query<CreateArticleQuery>,
    Json(submission): Json<Submission>,
) -> Result<(StatusCode, Json<CreateArticleResponse>)> {
    submission.validate().map_err(|e| AppError::Validation {
        message: e.to_string(),
        field: None,
    })?;

    let outcome = orchestrator(&state)
        .publish(
            &principal,
            PublishRequest {
                submission,
                force_rewrite_enabled: query.force_ai_rewrite_enabled,
                tenant_id_param: query.tenant_id,
            },
        )
        .await?;

    tracing::info!(
        base_article_id = %outcome.base_article_id,
        external_id = %outcome.external_id,
        "Submission accepted"
    );

    Ok((
        StatusCode::ACCEPTED,
        Json(CreateArticleResponse {
            base_article_id: outcome.base_article_id,
            print_article_id: outcome.newspaper_article_id,
            web_article_id: outcome.web_article_id,
            external_id: outcome.external_id,
            ai_mode: outcome.ai_mode.as_str().to_string(),
            queued: outcome.queued,
            creation_status: outcome.status,
            status_url: outcome.status_url,
        }),
    ))
}

/// List newspaper articles
pub async fn list_articles(
    State(state): State<AppState>,
    principal: Principal,
    Query(query): Query<ListArticlesQuery>,
) -> Result<Json<ListArticlesResponse>> {
    let repo = Repository::new(state.db.clone());

    let scope = tenant_scope::resolve(&repo, &principal, query.tenant_id).await?;

    let limit = query.limit.unwrap_or(20).clamp(1, 100);
    let offset = query.offset.unwrap_or(0);

    let day = query.date.map(|d| {
        let start = d.and_hms_opt(0, 0, 0).expect("midnight is always valid").and_utc();
        (start, start + chrono::Duration::days(1))
    });

    let filter = NewspaperArticleFilter {
        tenant_id: scope.tenant_id,
        status: query.status,
        day,
    };

    let (articles, total) = repo.list_newspaper_articles(filter, offset, limit).await?;

    Ok(Json(ListArticlesResponse {
        items: articles.into_iter().map(Into::into).collect(),
        total,
        limit,
        offset,
    }))
}

/// Get a newspaper article by ID
pub async fn get_article(
    State(state): State<AppState>,
    principal: Principal,
    Path(article_id): Path<Uuid>,
) -> Result<Json<NewspaperArticleResponse>> {
    let repo = Repository::new(state.db.clone());

    let scope = tenant_scope::resolve(&repo, &principal, None).await?;

    let article = repo
        .find_newspaper_article_by_id(article_id)
        .await?
        .ok_or_else(|| AppError::ArticleNotFound {
            id: article_id.to_string(),
        })?;

    // Verify tenant access
    if !scope.can_access(article.tenant_id) {
        return Err(AppError::TenantMismatch);
    }

    Ok(Json(article.into()))
}

/// Patch a newspaper article
pub async fn patch_article(
    State(state): State<AppState>,
    principal: Principal,
    Path(article_id): Path<Uuid>,
    Json(request): Json<PatchArticleRequest>,
) -> Result<Json<NewspaperArticleResponse>> {
    request.validate().map_err(|e| AppError::Validation {
        message: e.to_string(),
        field: None,
    })?;

    let status = match request.status.as_deref() {
        None => None,
        Some("draft") => Some(ArticleStatus::Draft),
        Some("pending") => Some(ArticleStatus::Pending),
        Some("published") => Some(ArticleStatus::Published),
        Some(other) => {
            return Err(AppError::validation(
                "status",
                format!("unknown status '{}'", other),
            ))
        }
    };

    let repo = Repository::new(state.db.clone());

    let scope = tenant_scope::resolve(&repo, &principal, None).await?;

    let article = repo
        .find_newspaper_article_by_id(article_id)
        .await?
        .ok_or_else(|| AppError::ArticleNotFound {
            id: article_id.to_string(),
        })?;

    if !scope.can_access(article.tenant_id) {
        return Err(AppError::TenantMismatch);
    }

    let patch = NewspaperArticlePatch {
        headline: request.headline,
        subtitle: request.subtitle,
        points: request.points.map(|p| serde_json::json!(p)),
        status,
    };

    if patch.is_empty() {
        return Ok(Json(article.into()));
    }

    let updated = repo.update_newspaper_article(article_id, patch).await?;

    tracing::info!(
        article_id = %article_id,
        "Newspaper article updated"
    );

    Ok(Json(updated.into()))
}
