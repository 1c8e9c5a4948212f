//! In-memory fakes and fixtures for pipeline tests

use super::store::{PublicationStore, RewriteDispatch};
use super::submission::{ContentPayload, LocationPayload, Submission};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use newsdesk_common::db::models::{
    Article, Category, District, Domain, Mandal, NewspaperArticle, Reporter, State,
    TenantFeatureFlags, Village, WebArticle,
};
use newsdesk_common::db::{CategoryCandidate, NewArticle, NewNewspaperArticle, NewWebArticle};
use newsdesk_common::errors::{AppError, Result};
use newsdesk_common::queue::RewriteJobMessage;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use uuid::Uuid;

/// A minimal valid submission, matching the end-to-end example
pub(crate) fn minimal_submission() -> Submission {
    Submission {
        title: "Test".to_string(),
        subtitle: None,
        heading: Some("Test".to_string()),
        lead: None,
        content: ContentPayload::Text("ten words of body text for the end to end".to_string()),
        bullet_points: vec![],
        location: LocationPayload {
            city: Some("Hyderabad".to_string()),
            ..Default::default()
        },
        language_code: None,
        tenant_id: None,
        domain_id: None,
        domain_name: None,
        media: None,
        image_urls: vec![],
        tags: vec![],
        category_id: None,
        category_name: None,
        publish: false,
        callback_url: None,
    }
}

/// Identifiers of a seeded village-to-state chain
pub(crate) struct LocationChain {
    pub village_id: Uuid,
    pub mandal_id: Uuid,
    pub district_id: Uuid,
    pub state_id: Uuid,
}

#[derive(Default)]
struct Inner {
    reporters: Vec<Reporter>,
    flags: Vec<TenantFeatureFlags>,
    villages: Vec<Village>,
    mandals: Vec<Mandal>,
    districts: Vec<District>,
    states: Vec<State>,
    domains: Vec<Domain>,
    categories: Vec<Category>,
    articles: Vec<Article>,
    newspaper_articles: Vec<NewspaperArticle>,
    web_articles: Vec<WebArticle>,
    fail_locations: bool,
    fail_categories: bool,
    fail_web_create: bool,
}

/// In-memory store fake
#[derive(Default)]
pub(crate) struct InMemoryStore {
    inner: Mutex<Inner>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn now() -> chrono::DateTime<chrono::FixedOffset> {
        Utc::now().into()
    }

    pub fn fail_location_lookups(&self) {
        self.inner.lock().unwrap().fail_locations = true;
    }

    pub fn fail_category_ops(&self) {
        self.inner.lock().unwrap().fail_categories = true;
    }

    pub fn fail_web_article_creation(&self) {
        self.inner.lock().unwrap().fail_web_create = true;
    }

    pub fn seed_reporter(&self, user_id: Uuid, tenant_id: Uuid, role: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.inner.lock().unwrap().reporters.push(Reporter {
            id,
            user_id,
            tenant_id,
            role: role.to_string(),
            full_name: "Test Reporter".to_string(),
            is_active: true,
            created_at: Self::now(),
            updated_at: Self::now(),
        });
        id
    }

    pub fn seed_flags(&self, tenant_id: Uuid, rewrite_enabled: Option<bool>) {
        self.inner.lock().unwrap().flags.push(TenantFeatureFlags {
            id: Uuid::new_v4(),
            tenant_id,
            ai_article_rewrite_enabled: rewrite_enabled,
            created_at: Self::now(),
            updated_at: Self::now(),
        });
    }

    pub fn seed_location_chain(
        &self,
        village: &str,
        mandal: &str,
        district: &str,
        state: &str,
    ) -> LocationChain {
        let mut inner = self.inner.lock().unwrap();

        let state_id = Uuid::new_v4();
        inner.states.push(State {
            id: state_id,
            name: state.to_string(),
        });

        let district_id = Uuid::new_v4();
        inner.districts.push(District {
            id: district_id,
            state_id,
            name: district.to_string(),
        });

        let mandal_id = Uuid::new_v4();
        inner.mandals.push(Mandal {
            id: mandal_id,
            district_id,
            name: mandal.to_string(),
        });

        let village_id = Uuid::new_v4();
        inner.villages.push(Village {
            id: village_id,
            mandal_id,
            name: village.to_string(),
        });

        LocationChain {
            village_id,
            mandal_id,
            district_id,
            state_id,
        }
    }

    pub fn seed_district(&self, name: &str, state_id: Uuid) -> Uuid {
        let id = Uuid::new_v4();
        self.inner.lock().unwrap().districts.push(District {
            id,
            state_id,
            name: name.to_string(),
        });
        id
    }

    pub fn seed_domain(&self, tenant_id: Uuid, hostname: &str, is_primary: bool) -> Uuid {
        let id = Uuid::new_v4();
        self.inner.lock().unwrap().domains.push(Domain {
            id,
            tenant_id,
            hostname: hostname.to_string(),
            is_primary,
            created_at: Self::now(),
            updated_at: Self::now(),
        });
        id
    }

    pub fn seed_category(&self, tenant_id: Option<Uuid>, name: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.inner.lock().unwrap().categories.push(Category {
            id,
            tenant_id,
            name: name.to_string(),
            slug: newsdesk_common::text::slugify(name),
            created_at: Self::now(),
        });
        id
    }

    pub fn category_count(&self) -> usize {
        self.inner.lock().unwrap().categories.len()
    }

    pub fn articles(&self) -> Vec<Article> {
        self.inner.lock().unwrap().articles.clone()
    }

    pub fn newspaper_articles(&self) -> Vec<NewspaperArticle> {
        self.inner.lock().unwrap().newspaper_articles.clone()
    }

    pub fn web_articles(&self) -> Vec<WebArticle> {
        self.inner.lock().unwrap().web_articles.clone()
    }

    pub fn entity_count(&self) -> usize {
        let inner = self.inner.lock().unwrap();
        inner.articles.len() + inner.newspaper_articles.len() + inner.web_articles.len()
    }

    fn degraded() -> AppError {
        AppError::Internal {
            message: "injected store failure".to_string(),
        }
    }
}

#[async_trait]
impl PublicationStore for InMemoryStore {
    async fn find_reporter_by_user_id(&self, user_id: Uuid) -> Result<Option<Reporter>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .reporters
            .iter()
            .find(|r| r.user_id == user_id && r.is_active)
            .cloned())
    }

    async fn find_feature_flags(&self, tenant_id: Uuid) -> Result<Option<TenantFeatureFlags>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.flags.iter().find(|f| f.tenant_id == tenant_id).cloned())
    }

    async fn find_village(&self, id: Uuid) -> Result<Option<Village>> {
        let inner = self.inner.lock().unwrap();
        if inner.fail_locations {
            return Err(Self::degraded());
        }
        Ok(inner.villages.iter().find(|v| v.id == id).cloned())
    }

    async fn find_mandal(&self, id: Uuid) -> Result<Option<Mandal>> {
        let inner = self.inner.lock().unwrap();
        if inner.fail_locations {
            return Err(Self::degraded());
        }
        Ok(inner.mandals.iter().find(|m| m.id == id).cloned())
    }

    async fn find_district(&self, id: Uuid) -> Result<Option<District>> {
        let inner = self.inner.lock().unwrap();
        if inner.fail_locations {
            return Err(Self::degraded());
        }
        Ok(inner.districts.iter().find(|d| d.id == id).cloned())
    }

    async fn find_state(&self, id: Uuid) -> Result<Option<State>> {
        let inner = self.inner.lock().unwrap();
        if inner.fail_locations {
            return Err(Self::degraded());
        }
        Ok(inner.states.iter().find(|s| s.id == id).cloned())
    }

    async fn find_domain_by_id(&self, id: Uuid) -> Result<Option<Domain>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.domains.iter().find(|d| d.id == id).cloned())
    }

    async fn find_domain_by_hostname(
        &self,
        tenant_id: Uuid,
        hostname: &str,
    ) -> Result<Option<Domain>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .domains
            .iter()
            .find(|d| d.tenant_id == tenant_id && d.hostname == hostname)
            .cloned())
    }

    async fn find_primary_domain(&self, tenant_id: Uuid) -> Result<Option<Domain>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .domains
            .iter()
            .find(|d| d.tenant_id == tenant_id && d.is_primary)
            .cloned())
    }

    async fn category_candidates(&self, tenant_id: Uuid) -> Result<Vec<CategoryCandidate>> {
        let inner = self.inner.lock().unwrap();
        if inner.fail_categories {
            return Err(Self::degraded());
        }
        Ok(inner
            .categories
            .iter()
            .filter(|c| c.tenant_id.is_none() || c.tenant_id == Some(tenant_id))
            .map(|c| CategoryCandidate {
                category_id: c.id,
                name: c.name.clone(),
            })
            .collect())
    }

    async fn create_category(
        &self,
        tenant_id: Uuid,
        name: String,
        slug: String,
    ) -> Result<Category> {
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_categories {
            return Err(Self::degraded());
        }
        let category = Category {
            id: Uuid::new_v4(),
            tenant_id: Some(tenant_id),
            name,
            slug,
            created_at: Self::now(),
        };
        inner.categories.push(category.clone());
        Ok(category)
    }

    async fn create_article(&self, new: NewArticle) -> Result<Article> {
        let article = Article {
            id: Uuid::new_v4(),
            tenant_id: new.tenant_id,
            title: new.title,
            content: new.content,
            status: String::from(new.status),
            images: new.images,
            tags: new.tags,
            category_id: new.category_id,
            descriptor: new.descriptor,
            language_code: new.language_code,
            created_at: Self::now(),
            updated_at: Self::now(),
        };
        self.inner.lock().unwrap().articles.push(article.clone());
        Ok(article)
    }

    async fn create_newspaper_article(
        &self,
        new: NewNewspaperArticle,
    ) -> Result<NewspaperArticle> {
        let article = NewspaperArticle {
            id: Uuid::new_v4(),
            base_article_id: new.base_article_id,
            tenant_id: new.tenant_id,
            external_id: new.external_id,
            headline: new.headline,
            subtitle: new.subtitle,
            points: new.points,
            dateline: new.dateline,
            content: new.content,
            place_name: new.place_name,
            status: String::from(new.status),
            created_at: Self::now(),
            updated_at: Self::now(),
        };
        self.inner
            .lock()
            .unwrap()
            .newspaper_articles
            .push(article.clone());
        Ok(article)
    }

    async fn create_web_article(&self, new: NewWebArticle) -> Result<WebArticle> {
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_web_create {
            return Err(Self::degraded());
        }
        let article = WebArticle {
            id: Uuid::new_v4(),
            base_article_id: new.base_article_id,
            tenant_id: new.tenant_id,
            domain_id: new.domain_id,
            slug: new.slug,
            content_html: new.content_html,
            plain_text: new.plain_text,
            meta_title: new.meta_title,
            meta_description: new.meta_description,
            canonical_url: new.canonical_url,
            json_ld: new.json_ld,
            cover_image: new.cover_image,
            status: String::from(new.status),
            created_at: Self::now(),
            updated_at: Self::now(),
        };
        inner.web_articles.push(article.clone());
        Ok(article)
    }

    async fn count_newspaper_articles_in_window(
        &self,
        tenant_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<u64> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .newspaper_articles
            .iter()
            .filter(|a| {
                let created = a.created_at.with_timezone(&Utc);
                a.tenant_id == tenant_id && created >= start && created < end
            })
            .count() as u64)
    }
}

/// Dispatch fake that records every message
#[derive(Default)]
pub(crate) struct RecordingDispatch {
    messages: Mutex<Vec<RewriteJobMessage>>,
    fail: AtomicBool,
}

impl RecordingDispatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_dispatch(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    pub fn messages(&self) -> Vec<RewriteJobMessage> {
        self.messages.lock().unwrap().clone()
    }
}

#[async_trait]
impl RewriteDispatch for RecordingDispatch {
    async fn dispatch(&self, message: &RewriteJobMessage) -> Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::QueueError {
                message: "injected queue failure".to_string(),
            });
        }
        self.messages.lock().unwrap().push(message.clone());
        Ok(())
    }
}
