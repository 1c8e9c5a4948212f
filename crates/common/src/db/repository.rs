//! Repository pattern for database operations
//!
//! Provides a clean interface for all data access operations
//! with proper error handling.

use crate::db::models::*;
use crate::db::DbPool;
use crate::errors::{AppError, Result};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A category name candidate for fuzzy matching; flattens categories and
/// their translations into (id, name) pairs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryCandidate {
    pub category_id: Uuid,
    pub name: String,
}

/// Fields for creating a base article
#[derive(Debug, Clone)]
pub struct NewArticle {
    pub tenant_id: Uuid,
    pub title: String,
    pub content: String,
    pub status: ArticleStatus,
    pub images: serde_json::Value,
    pub tags: serde_json::Value,
    pub category_id: Option<Uuid>,
    pub descriptor: serde_json::Value,
    pub language_code: String,
}

/// Fields for creating a newspaper article
#[derive(Debug, Clone)]
pub struct NewNewspaperArticle {
    pub base_article_id: Uuid,
    pub tenant_id: Uuid,
    pub external_id: String,
    pub headline: String,
    pub subtitle: Option<String>,
    pub points: serde_json::Value,
    pub dateline: String,
    pub content: String,
    pub place_name: Option<String>,
    pub status: ArticleStatus,
}

/// Fields for creating a web article
#[derive(Debug, Clone)]
pub struct NewWebArticle {
    pub base_article_id: Uuid,
    pub tenant_id: Uuid,
    pub domain_id: Option<Uuid>,
    pub slug: String,
    pub content_html: String,
    pub plain_text: String,
    pub meta_title: String,
    pub meta_description: String,
    pub canonical_url: Option<String>,
    pub json_ld: serde_json::Value,
    pub cover_image: Option<String>,
    pub status: ArticleStatus,
}

/// Filters for listing newspaper articles
#[derive(Debug, Clone, Default)]
pub struct NewspaperArticleFilter {
    pub tenant_id: Option<Uuid>,
    pub status: Option<String>,
    pub day: Option<(DateTime<Utc>, DateTime<Utc>)>,
}

/// Patchable fields on a newspaper article
#[derive(Debug, Clone, Default)]
pub struct NewspaperArticlePatch {
    pub headline: Option<String>,
    pub subtitle: Option<String>,
    pub points: Option<serde_json::Value>,
    pub status: Option<ArticleStatus>,
}

impl NewspaperArticlePatch {
    pub fn is_empty(&self) -> bool {
        self.headline.is_none()
            && self.subtitle.is_none()
            && self.points.is_none()
            && self.status.is_none()
    }
}

/// Repository for data access operations
#[derive(Clone)]
pub struct Repository {
    pool: DbPool,
}

impl Repository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get the read connection
    fn read_conn(&self) -> &DatabaseConnection {
        self.pool.read()
    }

    /// Get the write connection
    fn write_conn(&self) -> &DatabaseConnection {
        self.pool.write()
    }

    // ========================================================================
    // Health Check
    // ========================================================================

    /// Ping the database
    pub async fn ping(&self) -> Result<()> {
        self.pool.ping().await
    }

    // ========================================================================
    // Tenant Operations
    // ========================================================================

    /// Find tenant by ID
    pub async fn find_tenant_by_id(&self, id: Uuid) -> Result<Option<Tenant>> {
        TenantEntity::find_by_id(id)
            .one(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// Find tenant by API key hash
    pub async fn find_tenant_by_api_key_hash(&self, hash: &str) -> Result<Option<Tenant>> {
        TenantEntity::find()
            .filter(TenantColumn::ApiKeyHash.eq(hash))
            .filter(TenantColumn::IsActive.eq(true))
            .one(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// Find feature flags for a tenant
    pub async fn find_feature_flags(&self, tenant_id: Uuid) -> Result<Option<TenantFeatureFlags>> {
        TenantFeatureFlagsEntity::find()
            .filter(TenantFeatureFlagsColumn::TenantId.eq(tenant_id))
            .one(self.read_conn())
            .await
            .map_err(Into::into)
    }

    // ========================================================================
    // Reporter Operations
    // ========================================================================

    /// Find an active reporter profile by the authenticated user ID
    pub async fn find_reporter_by_user_id(&self, user_id: Uuid) -> Result<Option<Reporter>> {
        ReporterEntity::find()
            .filter(ReporterColumn::UserId.eq(user_id))
            .filter(ReporterColumn::IsActive.eq(true))
            .one(self.read_conn())
            .await
            .map_err(Into::into)
    }

    // ========================================================================
    // Location Operations
    // ========================================================================

    /// Find village by ID
    pub async fn find_village(&self, id: Uuid) -> Result<Option<Village>> {
        VillageEntity::find_by_id(id)
            .one(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// Find mandal by ID
    pub async fn find_mandal(&self, id: Uuid) -> Result<Option<Mandal>> {
        MandalEntity::find_by_id(id)
            .one(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// Find district by ID
    pub async fn find_district(&self, id: Uuid) -> Result<Option<District>> {
        DistrictEntity::find_by_id(id)
            .one(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// Find state by ID
    pub async fn find_state(&self, id: Uuid) -> Result<Option<State>> {
        StateEntity::find_by_id(id)
            .one(self.read_conn())
            .await
            .map_err(Into::into)
    }

    // ========================================================================
    // Domain Operations
    // ========================================================================

    /// Find domain by ID
    pub async fn find_domain_by_id(&self, id: Uuid) -> Result<Option<Domain>> {
        DomainEntity::find_by_id(id)
            .one(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// Find a tenant's domain by hostname
    pub async fn find_domain_by_hostname(
        &self,
        tenant_id: Uuid,
        hostname: &str,
    ) -> Result<Option<Domain>> {
        DomainEntity::find()
            .filter(DomainColumn::TenantId.eq(tenant_id))
            .filter(DomainColumn::Hostname.eq(hostname))
            .one(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// Find a tenant's primary domain
    pub async fn find_primary_domain(&self, tenant_id: Uuid) -> Result<Option<Domain>> {
        DomainEntity::find()
            .filter(DomainColumn::TenantId.eq(tenant_id))
            .filter(DomainColumn::IsPrimary.eq(true))
            .one(self.read_conn())
            .await
            .map_err(Into::into)
    }

    // ========================================================================
    // Category Operations
    // ========================================================================

    /// List category name candidates visible to a tenant (tenant-owned plus
    /// global), flattening translations into additional name candidates.
    pub async fn category_candidates(&self, tenant_id: Uuid) -> Result<Vec<CategoryCandidate>> {
        let categories = CategoryEntity::find()
            .filter(
                Condition::any()
                    .add(CategoryColumn::TenantId.eq(tenant_id))
                    .add(CategoryColumn::TenantId.is_null()),
            )
            .all(self.read_conn())
            .await?;

        let mut candidates: Vec<CategoryCandidate> = categories
            .iter()
            .map(|c| CategoryCandidate {
                category_id: c.id,
                name: c.name.clone(),
            })
            .collect();

        if !categories.is_empty() {
            let ids: Vec<Uuid> = categories.iter().map(|c| c.id).collect();
            let translations = CategoryTranslationEntity::find()
                .filter(CategoryTranslationColumn::CategoryId.is_in(ids))
                .all(self.read_conn())
                .await?;

            candidates.extend(translations.into_iter().map(|t| CategoryCandidate {
                category_id: t.category_id,
                name: t.name,
            }));
        }

        Ok(candidates)
    }

    /// Create a tenant-owned category
    pub async fn create_category(
        &self,
        tenant_id: Uuid,
        name: String,
        slug: String,
    ) -> Result<Category> {
        let category = CategoryActiveModel {
            id: Set(Uuid::new_v4()),
            tenant_id: Set(Some(tenant_id)),
            name: Set(name),
            slug: Set(slug),
            created_at: Set(Utc::now().into()),
        };

        category.insert(self.write_conn()).await.map_err(Into::into)
    }

    // ========================================================================
    // Article Operations
    // ========================================================================

    /// Create the base article
    pub async fn create_article(&self, new: NewArticle) -> Result<Article> {
        let now = Utc::now();

        let article = ArticleActiveModel {
            id: Set(Uuid::new_v4()),
            tenant_id: Set(new.tenant_id),
            title: Set(new.title),
            content: Set(new.content),
            status: Set(String::from(new.status)),
            images: Set(new.images),
            tags: Set(new.tags),
            category_id: Set(new.category_id),
            descriptor: Set(new.descriptor),
            language_code: Set(new.language_code),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        article.insert(self.write_conn()).await.map_err(Into::into)
    }

    /// Find base article by ID
    pub async fn find_article_by_id(&self, id: Uuid) -> Result<Option<Article>> {
        ArticleEntity::find_by_id(id)
            .one(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// Create the newspaper article
    pub async fn create_newspaper_article(
        &self,
        new: NewNewspaperArticle,
    ) -> Result<NewspaperArticle> {
        let now = Utc::now();

        let article = NewspaperArticleActiveModel {
            id: Set(Uuid::new_v4()),
            base_article_id: Set(new.base_article_id),
            tenant_id: Set(new.tenant_id),
            external_id: Set(new.external_id),
            headline: Set(new.headline),
            subtitle: Set(new.subtitle),
            points: Set(new.points),
            dateline: Set(new.dateline),
            content: Set(new.content),
            place_name: Set(new.place_name),
            status: Set(String::from(new.status)),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        article.insert(self.write_conn()).await.map_err(Into::into)
    }

    /// Create the web article
    pub async fn create_web_article(&self, new: NewWebArticle) -> Result<WebArticle> {
        let now = Utc::now();

        let article = WebArticleActiveModel {
            id: Set(Uuid::new_v4()),
            base_article_id: Set(new.base_article_id),
            tenant_id: Set(new.tenant_id),
            domain_id: Set(new.domain_id),
            slug: Set(new.slug),
            content_html: Set(new.content_html),
            plain_text: Set(new.plain_text),
            meta_title: Set(new.meta_title),
            meta_description: Set(new.meta_description),
            canonical_url: Set(new.canonical_url),
            json_ld: Set(new.json_ld),
            cover_image: Set(new.cover_image),
            status: Set(String::from(new.status)),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        article.insert(self.write_conn()).await.map_err(Into::into)
    }

    /// Count a tenant's newspaper articles created within [start, end)
    pub async fn count_newspaper_articles_in_window(
        &self,
        tenant_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<u64> {
        NewspaperArticleEntity::find()
            .filter(NewspaperArticleColumn::TenantId.eq(tenant_id))
            .filter(NewspaperArticleColumn::CreatedAt.gte(start))
            .filter(NewspaperArticleColumn::CreatedAt.lt(end))
            .count(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// Find newspaper article by ID
    pub async fn find_newspaper_article_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<NewspaperArticle>> {
        NewspaperArticleEntity::find_by_id(id)
            .one(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// List newspaper articles with pagination and filters
    pub async fn list_newspaper_articles(
        &self,
        filter: NewspaperArticleFilter,
        offset: u64,
        limit: u64,
    ) -> Result<(Vec<NewspaperArticle>, u64)> {
        let mut query = NewspaperArticleEntity::find();

        if let Some(tenant_id) = filter.tenant_id {
            query = query.filter(NewspaperArticleColumn::TenantId.eq(tenant_id));
        }

        if let Some(status) = filter.status {
            query = query.filter(NewspaperArticleColumn::Status.eq(status));
        }

        if let Some((start, end)) = filter.day {
            query = query
                .filter(NewspaperArticleColumn::CreatedAt.gte(start))
                .filter(NewspaperArticleColumn::CreatedAt.lt(end));
        }

        let paginator = query
            .order_by_desc(NewspaperArticleColumn::CreatedAt)
            .paginate(self.read_conn(), limit);

        let total = paginator.num_items().await?;
        let articles = paginator.fetch_page(offset / limit.max(1)).await?;

        Ok((articles, total))
    }

    /// Apply a patch to a newspaper article
    pub async fn update_newspaper_article(
        &self,
        id: Uuid,
        patch: NewspaperArticlePatch,
    ) -> Result<NewspaperArticle> {
        let mut article: NewspaperArticleActiveModel = NewspaperArticleEntity::find_by_id(id)
            .one(self.write_conn())
            .await?
            .ok_or_else(|| AppError::ArticleNotFound { id: id.to_string() })?
            .into();

        if let Some(headline) = patch.headline {
            article.headline = Set(headline);
        }

        if let Some(subtitle) = patch.subtitle {
            article.subtitle = Set(Some(subtitle));
        }

        if let Some(points) = patch.points {
            article.points = Set(points);
        }

        if let Some(status) = patch.status {
            article.status = Set(String::from(status));
        }

        article.updated_at = Set(Utc::now().into());

        article.update(self.write_conn()).await.map_err(Into::into)
    }
}
