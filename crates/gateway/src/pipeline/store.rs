//! Trait seams between the pipeline and its collaborators
//!
//! The orchestrator and resolvers depend on these traits rather than on the
//! concrete repository and queue, so the pipeline is testable without a
//! live store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use newsdesk_common::db::models::{
    Article, Category, District, Domain, Mandal, NewspaperArticle, Reporter, State,
    TenantFeatureFlags, Village, WebArticle,
};
use newsdesk_common::db::{
    CategoryCandidate, NewArticle, NewNewspaperArticle, NewWebArticle, Repository,
};
use newsdesk_common::errors::Result;
use newsdesk_common::queue::{Queue, RewriteJobMessage};
use uuid::Uuid;

/// Persistence operations the publication pipeline needs
#[async_trait]
pub trait PublicationStore: Send + Sync {
    async fn find_reporter_by_user_id(&self, user_id: Uuid) -> Result<Option<Reporter>>;

    async fn find_feature_flags(&self, tenant_id: Uuid) -> Result<Option<TenantFeatureFlags>>;

    async fn find_village(&self, id: Uuid) -> Result<Option<Village>>;

    async fn find_mandal(&self, id: Uuid) -> Result<Option<Mandal>>;

    async fn find_district(&self, id: Uuid) -> Result<Option<District>>;

    async fn find_state(&self, id: Uuid) -> Result<Option<State>>;

    async fn find_domain_by_id(&self, id: Uuid) -> Result<Option<Domain>>;

    async fn find_domain_by_hostname(
        &self,
        tenant_id: Uuid,
        hostname: &str,
    ) -> Result<Option<Domain>>;

    async fn find_primary_domain(&self, tenant_id: Uuid) -> Result<Option<Domain>>;

    async fn category_candidates(&self, tenant_id: Uuid) -> Result<Vec<CategoryCandidate>>;

    async fn create_category(
        &self,
        tenant_id: Uuid,
        name: String,
        slug: String,
    ) -> Result<Category>;

    async fn create_article(&self, new: NewArticle) -> Result<Article>;

    async fn create_newspaper_article(&self, new: NewNewspaperArticle)
        -> Result<NewspaperArticle>;

    async fn create_web_article(&self, new: NewWebArticle) -> Result<WebArticle>;

    async fn count_newspaper_articles_in_window(
        &self,
        tenant_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<u64>;
}

#[async_trait]
impl PublicationStore for Repository {
    async fn find_reporter_by_user_id(&self, user_id: Uuid) -> Result<Option<Reporter>> {
        Repository::find_reporter_by_user_id(self, user_id).await
    }

    async fn find_feature_flags(&self, tenant_id: Uuid) -> Result<Option<TenantFeatureFlags>> {
        Repository::find_feature_flags(self, tenant_id).await
    }

    async fn find_village(&self, id: Uuid) -> Result<Option<Village>> {
        Repository::find_village(self, id).await
    }

    async fn find_mandal(&self, id: Uuid) -> Result<Option<Mandal>> {
        Repository::find_mandal(self, id).await
    }

    async fn find_district(&self, id: Uuid) -> Result<Option<District>> {
        Repository::find_district(self, id).await
    }

    async fn find_state(&self, id: Uuid) -> Result<Option<State>> {
        Repository::find_state(self, id).await
    }

    async fn find_domain_by_id(&self, id: Uuid) -> Result<Option<Domain>> {
        Repository::find_domain_by_id(self, id).await
    }

    async fn find_domain_by_hostname(
        &self,
        tenant_id: Uuid,
        hostname: &str,
    ) -> Result<Option<Domain>> {
        Repository::find_domain_by_hostname(self, tenant_id, hostname).await
    }

    async fn find_primary_domain(&self, tenant_id: Uuid) -> Result<Option<Domain>> {
        Repository::find_primary_domain(self, tenant_id).await
    }

    async fn category_candidates(&self, tenant_id: Uuid) -> Result<Vec<CategoryCandidate>> {
        Repository::category_candidates(self, tenant_id).await
    }

    async fn create_category(
        &self,
        tenant_id: Uuid,
        name: String,
        slug: String,
    ) -> Result<Category> {
        Repository::create_category(self, tenant_id, name, slug).await
    }

    async fn create_article(&self, new: NewArticle) -> Result<Article> {
        Repository::create_article(self, new).await
    }

    async fn create_newspaper_article(
        &self,
        new: NewNewspaperArticle,
    ) -> Result<NewspaperArticle> {
        Repository::create_newspaper_article(self, new).await
    }

    async fn create_web_article(&self, new: NewWebArticle) -> Result<WebArticle> {
        Repository::create_web_article(self, new).await
    }

    async fn count_newspaper_articles_in_window(
        &self,
        tenant_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<u64> {
        Repository::count_newspaper_articles_in_window(self, tenant_id, start, end).await
    }
}

/// Queue handoff for the asynchronous rewrite worker
#[async_trait]
pub trait RewriteDispatch: Send + Sync {
    async fn dispatch(&self, message: &RewriteJobMessage) -> Result<()>;
}

#[async_trait]
impl RewriteDispatch for Queue {
    async fn dispatch(&self, message: &RewriteJobMessage) -> Result<()> {
        self.send(message).await.map(|_| ())
    }
}
