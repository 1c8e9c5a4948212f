//! Publication orchestration
//!
//! Composes validation, tenant scope, location, rewrite-mode, category and
//! content normalization into one pipeline run:
//!
//! validate -> tenant -> location -> mode -> base article
//!   -> [limited only] web article -> newspaper article -> enqueue
//!
//! Any failure before the base article exists aborts with no side effects.
//! Once the base article is created, failures creating secondary artifacts
//! (the synchronous web article, the queue handoff) are logged and
//! swallowed; the request still succeeds and the outcome is flagged
//! PartiallyCreated.

use super::ai_mode::{self, AiMode};
use super::category;
use super::external_id;
use super::location::LocationResolver;
use super::normalizer::{self, NormalizedContent};
use super::store::{PublicationStore, RewriteDispatch};
use super::submission::Submission;
use super::tenant_scope;
use chrono::Utc;
use newsdesk_common::auth::Principal;
use newsdesk_common::config::PublishingConfig;
use newsdesk_common::db::models::{AiStatus, Article, ArticleStatus};
use newsdesk_common::db::{NewArticle, NewNewspaperArticle, NewWebArticle};
use newsdesk_common::errors::{AppError, Result};
use newsdesk_common::metrics::{
    record_artifact, record_lookup_degradation, record_publication, record_rewrite_enqueued,
};
use newsdesk_common::queue::{QueuedFormats, RewriteJobMessage};
use newsdesk_common::seo::{self, SeoInput};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// Inputs for one publication run
#[derive(Debug, Clone)]
pub struct PublishRequest {
    pub submission: Submission,

    /// Per-request rewrite override (?forceAiRewriteEnabled=)
    pub force_rewrite_enabled: Option<bool>,

    /// Explicit tenant parameter (?tenantId=, honored for global principals)
    pub tenant_id_param: Option<Uuid>,
}

/// Whether every artifact was created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PublicationStatus {
    FullyCreated,
    PartiallyCreated,
}

/// Result of a publication run
#[derive(Debug, Clone)]
pub struct PublicationOutcome {
    pub base_article_id: Uuid,
    pub newspaper_article_id: Uuid,
    pub web_article_id: Option<Uuid>,
    pub external_id: String,
    pub ai_mode: AiMode,
    pub queued: QueuedFormats,
    pub status: PublicationStatus,
    pub status_url: String,
}

/// The publication pipeline
pub struct PublicationOrchestrator {
    store: Arc<dyn PublicationStore>,
    dispatch: Option<Arc<dyn RewriteDispatch>>,
    config: PublishingConfig,
}

impl PublicationOrchestrator {
    pub fn new(
        store: Arc<dyn PublicationStore>,
        dispatch: Option<Arc<dyn RewriteDispatch>>,
        config: PublishingConfig,
    ) -> Self {
        Self {
            store,
            dispatch,
            config,
        }
    }

    /// Run the pipeline for one submission
    #[instrument(skip(self, principal, request), fields(request_id = %principal.request_id))]
    pub async fn publish(
        &self,
        principal: &Principal,
        request: PublishRequest,
    ) -> Result<PublicationOutcome> {
        let started = Instant::now();
        let submission = &request.submission;

        // Fail-closed validation, before any write.
        submission.check()?;

        // Tenant scope. Creation is always tenant-scoped, so a global
        // principal must name a tenant.
        let explicit_tenant = request.tenant_id_param.or(submission.tenant_id);
        let scope = tenant_scope::resolve(self.store.as_ref(), principal, explicit_tenant).await?;
        let tenant_id = scope.tenant_id.ok_or_else(|| AppError::MissingField {
            field: "tenantId".to_string(),
        })?;

        // Best-effort location resolution; never fails.
        let location = LocationResolver::new(self.store.as_ref())
            .resolve(&submission.location)
            .await;

        // Rewrite policy. The flag lookup is authoritative, not best-effort.
        let rewrite_enabled = self
            .store
            .find_feature_flags(tenant_id)
            .await?
            .map(|f| f.rewrite_enabled())
            .unwrap_or(true);
        let decision =
            ai_mode::decide(rewrite_enabled, request.force_rewrite_enabled, scope.role)?;

        // Category is best-effort; a failure just leaves it unassigned.
        let category_id = category::resolve(
            self.store.as_ref(),
            tenant_id,
            submission.category_id,
            submission.category_name.as_deref(),
            self.config.category_similarity,
        )
        .await;

        let normalized = normalizer::normalize(submission);
        let language_code = submission
            .language_code
            .clone()
            .unwrap_or_else(|| self.config.default_language.clone());
        let callback_url = submission.effective_callback_url();

        let queued = match decision.mode {
            AiMode::Full => QueuedFormats {
                web: true,
                short: true,
                newspaper: true,
            },
            // The web article is created synchronously below.
            AiMode::Limited => QueuedFormats {
                web: false,
                short: true,
                newspaper: true,
            },
        };

        let base_status = if submission.publish {
            ArticleStatus::Pending
        } else {
            ArticleStatus::Draft
        };

        let descriptor = json!({
            "submission": submission,
            "aiDecision": decision,
            "location": location,
            "queued": queued,
            "aiStatus": AiStatus::Pending.as_str(),
            "callbackUrl": callback_url,
        });

        // First write; everything before this point has no side effects.
        let base = self
            .store
            .create_article(NewArticle {
                tenant_id,
                title: normalized.title.clone(),
                content: normalized.plain_text.clone(),
                status: base_status,
                images: json!(normalized.images),
                tags: json!(submission.tags),
                category_id,
                descriptor,
                language_code: language_code.clone(),
            })
            .await?;
        record_artifact("base");

        info!(
            base_article_id = %base.id,
            tenant_id = %tenant_id,
            ai_mode = decision.mode.as_str(),
            "Base article created"
        );

        let mut partial = false;
        let mut web_article_id = None;

        // In limited mode the web article is created synchronously; its
        // failure must not fail the request.
        if decision.mode == AiMode::Limited {
            match self
                .create_web_article(&base, submission, &normalized, &language_code)
                .await
            {
                Ok(id) => {
                    web_article_id = Some(id);
                    record_artifact("web");
                }
                Err(e) => {
                    warn!(
                        base_article_id = %base.id,
                        error = %e,
                        "Web article creation failed, continuing without it"
                    );
                    partial = true;
                }
            }
        }

        // Newspaper article, always created.
        let now = Utc::now();
        let external_id = external_id::generate(self.store.as_ref(), tenant_id, now).await?;

        let newspaper = self
            .store
            .create_newspaper_article(NewNewspaperArticle {
                base_article_id: base.id,
                tenant_id,
                external_id: external_id.clone(),
                headline: normalized.heading.clone(),
                subtitle: submission.subtitle.clone(),
                points: json!(submission.bullet_points),
                dateline: normalizer::dateline(location.display_name.as_deref(), now),
                content: normalized.plain_text.clone(),
                place_name: location.display_name.clone(),
                status: base_status,
            })
            .await?;
        record_artifact("newspaper");

        // Fire-and-forget handoff to the rewrite worker.
        let message = RewriteJobMessage {
            base_article_id: base.id,
            tenant_id,
            ai_mode: decision.mode.as_str().to_string(),
            formats: queued,
            language_code,
            callback_url,
        };

        match &self.dispatch {
            Some(dispatch) => match dispatch.dispatch(&message).await {
                Ok(()) => record_rewrite_enqueued(decision.mode.as_str()),
                Err(e) => {
                    warn!(
                        base_article_id = %base.id,
                        error = %e,
                        "Rewrite job dispatch failed, article left at ai_status=pending"
                    );
                    partial = true;
                }
            },
            None => {
                warn!(
                    base_article_id = %base.id,
                    "No rewrite queue configured, article will not be rewritten"
                );
                partial = true;
            }
        }

        let status = if partial {
            PublicationStatus::PartiallyCreated
        } else {
            PublicationStatus::FullyCreated
        };

        record_publication(
            started.elapsed().as_secs_f64(),
            decision.mode.as_str(),
            partial,
            &tenant_id.to_string(),
        );

        info!(
            base_article_id = %base.id,
            newspaper_article_id = %newspaper.id,
            external_id = %external_id,
            status = ?status,
            "Publication complete"
        );

        Ok(PublicationOutcome {
            base_article_id: base.id,
            newspaper_article_id: newspaper.id,
            web_article_id,
            external_id,
            ai_mode: decision.mode,
            queued,
            status,
            status_url: format!(
                "{}/articles/newspaper/{}",
                self.config.status_url_prefix, newspaper.id
            ),
        })
    }

    /// Resolve the publishing domain, best-effort
    async fn resolve_domain(
        &self,
        tenant_id: Uuid,
        submission: &Submission,
    ) -> Option<newsdesk_common::db::models::Domain> {
        let result = if let Some(domain_id) = submission.domain_id {
            self.store.find_domain_by_id(domain_id).await
        } else if let Some(ref hostname) = submission.domain_name {
            self.store.find_domain_by_hostname(tenant_id, hostname).await
        } else {
            self.store.find_primary_domain(tenant_id).await
        };

        match result {
            Ok(domain) => domain,
            Err(e) => {
                warn!(tenant_id = %tenant_id, error = %e, "Domain lookup failed, degrading to null");
                record_lookup_degradation("domain");
                None
            }
        }
    }

    async fn create_web_article(
        &self,
        base: &Article,
        submission: &Submission,
        normalized: &NormalizedContent,
        language_code: &str,
    ) -> Result<Uuid> {
        let domain = self.resolve_domain(base.tenant_id, submission).await;

        let seo_meta = seo::build(SeoInput {
            headline: normalized.title.clone(),
            plain_text: normalized.plain_text.clone(),
            slug: normalized.slug.clone(),
            hostname: domain.as_ref().map(|d| d.hostname.clone()),
            images: normalized.images.clone(),
            language_code: language_code.to_string(),
            keywords: normalized.keywords.clone(),
            published_at: Utc::now(),
        });

        let status = if submission.publish {
            ArticleStatus::Published
        } else {
            ArticleStatus::Draft
        };

        let web = self
            .store
            .create_web_article(NewWebArticle {
                base_article_id: base.id,
                tenant_id: base.tenant_id,
                domain_id: domain.map(|d| d.id),
                slug: normalized.slug.clone(),
                content_html: normalized.content_html.clone(),
                plain_text: normalized.plain_text.clone(),
                meta_title: seo_meta.meta_title,
                meta_description: seo_meta.meta_description,
                canonical_url: seo_meta.canonical_url,
                json_ld: seo_meta.json_ld,
                cover_image: normalized.cover_image.clone(),
                status,
            })
            .await?;

        Ok(web.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::testing::{minimal_submission, InMemoryStore, RecordingDispatch};
    use newsdesk_common::auth::{Principal, Role};
    use newsdesk_common::config::PublishingConfig;

    fn publishing_config() -> PublishingConfig {
        PublishingConfig {
            status_url_prefix: "/v1".to_string(),
            default_language: "en".to_string(),
            category_similarity: 0.9,
        }
    }

    struct Harness {
        store: Arc<InMemoryStore>,
        dispatch: Arc<RecordingDispatch>,
        orchestrator: PublicationOrchestrator,
    }

    fn harness() -> Harness {
        let store = Arc::new(InMemoryStore::new());
        let dispatch = Arc::new(RecordingDispatch::new());
        let orchestrator = PublicationOrchestrator::new(
            store.clone(),
            Some(dispatch.clone()),
            publishing_config(),
        );
        Harness {
            store,
            dispatch,
            orchestrator,
        }
    }

    /// Seed a reporter principal linked to a fresh tenant
    fn seed_reporter_principal(store: &InMemoryStore) -> (Principal, Uuid) {
        let user_id = Uuid::new_v4();
        let tenant_id = Uuid::new_v4();
        store.seed_reporter(user_id, tenant_id, "REPORTER");
        (Principal::new(user_id, Role::Reporter), tenant_id)
    }

    fn request(submission: Submission) -> PublishRequest {
        PublishRequest {
            submission,
            force_rewrite_enabled: None,
            tenant_id_param: None,
        }
    }

    #[tokio::test]
    async fn test_full_mode_creates_base_and_newspaper_only() {
        let h = harness();
        let (principal, tenant_id) = seed_reporter_principal(&h.store);
        h.store.seed_flags(tenant_id, Some(true));

        let outcome = h
            .orchestrator
            .publish(&principal, request(minimal_submission()))
            .await
            .unwrap();

        assert_eq!(outcome.ai_mode, AiMode::Full);
        assert_eq!(
            outcome.queued,
            QueuedFormats {
                web: true,
                short: true,
                newspaper: true
            }
        );
        assert_eq!(outcome.web_article_id, None);
        assert_eq!(outcome.status, PublicationStatus::FullyCreated);

        let articles = h.store.articles();
        let newspapers = h.store.newspaper_articles();
        assert_eq!(articles.len(), 1);
        assert_eq!(newspapers.len(), 1);
        assert!(h.store.web_articles().is_empty());

        // The print artifact is linked 1:1 to the base article.
        assert_eq!(newspapers[0].base_article_id, articles[0].id);
        assert_eq!(outcome.base_article_id, articles[0].id);
        assert!(outcome.external_id.starts_with("ART"));
        assert!(outcome.external_id.ends_with("0001"));
        assert_eq!(
            outcome.status_url,
            format!("/v1/articles/newspaper/{}", newspapers[0].id)
        );

        // Draft until an explicit publish, and the worker owns aiStatus.
        assert_eq!(articles[0].status, "draft");
        assert_eq!(articles[0].descriptor["aiStatus"], "pending");

        let messages = h.dispatch.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].base_article_id, articles[0].id);
        assert_eq!(messages[0].ai_mode, "full");
        assert!(messages[0].formats.web);
    }

    #[tokio::test]
    async fn test_limited_mode_creates_web_synchronously() {
        let h = harness();
        let (principal, tenant_id) = seed_reporter_principal(&h.store);
        h.store.seed_flags(tenant_id, Some(false));
        h.store.seed_domain(tenant_id, "news.example.com", true);

        let mut submission = minimal_submission();
        submission.publish = true;

        let outcome = h
            .orchestrator
            .publish(&principal, request(submission))
            .await
            .unwrap();

        assert_eq!(outcome.ai_mode, AiMode::Limited);
        assert!(outcome.web_article_id.is_some());
        assert!(!outcome.queued.web);
        assert!(outcome.queued.short);
        assert!(outcome.queued.newspaper);

        let webs = h.store.web_articles();
        assert_eq!(webs.len(), 1);
        // Web status mirrors the publish intent.
        assert_eq!(webs[0].status, "published");
        assert_eq!(webs[0].base_article_id, outcome.base_article_id);
        assert!(webs[0]
            .canonical_url
            .as_deref()
            .unwrap()
            .starts_with("https://news.example.com/articles/"));
    }

    #[tokio::test]
    async fn test_force_enable_by_non_super_admin_creates_nothing() {
        let h = harness();
        let (principal, tenant_id) = seed_reporter_principal(&h.store);
        h.store.seed_flags(tenant_id, Some(false));

        let mut req = request(minimal_submission());
        req.force_rewrite_enabled = Some(true);

        let err = h.orchestrator.publish(&principal, req).await.unwrap_err();
        assert!(matches!(err, AppError::RewriteOverrideDenied));
        assert_eq!(h.store.entity_count(), 0);
        assert!(h.dispatch.messages().is_empty());
    }

    #[tokio::test]
    async fn test_force_disable_wins_over_enabled_flag() {
        let h = harness();
        let (principal, tenant_id) = seed_reporter_principal(&h.store);
        h.store.seed_flags(tenant_id, Some(true));

        let mut req = request(minimal_submission());
        req.force_rewrite_enabled = Some(false);

        let outcome = h.orchestrator.publish(&principal, req).await.unwrap();
        assert_eq!(outcome.ai_mode, AiMode::Limited);
        assert!(outcome.web_article_id.is_some());
    }

    #[tokio::test]
    async fn test_missing_flag_row_defaults_to_full() {
        let h = harness();
        let (principal, _tenant_id) = seed_reporter_principal(&h.store);

        let outcome = h
            .orchestrator
            .publish(&principal, request(minimal_submission()))
            .await
            .unwrap();
        assert_eq!(outcome.ai_mode, AiMode::Full);
    }

    #[tokio::test]
    async fn test_super_admin_publishes_into_named_tenant() {
        let h = harness();
        let principal = Principal::new(Uuid::new_v4(), Role::SuperAdmin);
        let tenant_id = Uuid::new_v4();

        let mut req = request(minimal_submission());
        req.tenant_id_param = Some(tenant_id);

        let outcome = h.orchestrator.publish(&principal, req).await.unwrap();
        assert_eq!(h.store.articles()[0].tenant_id, tenant_id);
        assert_eq!(outcome.status, PublicationStatus::FullyCreated);
    }

    #[tokio::test]
    async fn test_super_admin_without_tenant_is_rejected() {
        let h = harness();
        let principal = Principal::new(Uuid::new_v4(), Role::SuperAdmin);

        let err = h
            .orchestrator
            .publish(&principal, request(minimal_submission()))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
        assert_eq!(h.store.entity_count(), 0);
    }

    #[tokio::test]
    async fn test_validation_failure_has_no_side_effects() {
        let h = harness();
        let (principal, _) = seed_reporter_principal(&h.store);

        let mut submission = minimal_submission();
        submission.title = "x".repeat(51);

        let err = h
            .orchestrator
            .publish(&principal, request(submission))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
        assert_eq!(h.store.entity_count(), 0);
        assert!(h.dispatch.messages().is_empty());
    }

    #[tokio::test]
    async fn test_web_failure_is_swallowed_and_flagged() {
        let h = harness();
        let (principal, tenant_id) = seed_reporter_principal(&h.store);
        h.store.seed_flags(tenant_id, Some(false));
        h.store.fail_web_article_creation();

        let outcome = h
            .orchestrator
            .publish(&principal, request(minimal_submission()))
            .await
            .unwrap();

        assert_eq!(outcome.status, PublicationStatus::PartiallyCreated);
        assert_eq!(outcome.web_article_id, None);
        // The newspaper artifact is still created and the job still queued.
        assert_eq!(h.store.newspaper_articles().len(), 1);
        assert_eq!(h.dispatch.messages().len(), 1);
    }

    #[tokio::test]
    async fn test_dispatch_failure_is_swallowed_and_flagged() {
        let h = harness();
        let (principal, _) = seed_reporter_principal(&h.store);
        h.dispatch.fail_dispatch();

        let outcome = h
            .orchestrator
            .publish(&principal, request(minimal_submission()))
            .await
            .unwrap();

        assert_eq!(outcome.status, PublicationStatus::PartiallyCreated);
        assert_eq!(h.store.newspaper_articles().len(), 1);
    }

    #[tokio::test]
    async fn test_external_id_sequence_increments_within_day() {
        let h = harness();
        let (principal, _) = seed_reporter_principal(&h.store);

        let first = h
            .orchestrator
            .publish(&principal, request(minimal_submission()))
            .await
            .unwrap();
        let second = h
            .orchestrator
            .publish(&principal, request(minimal_submission()))
            .await
            .unwrap();

        assert!(first.external_id.ends_with("0001"));
        assert!(second.external_id.ends_with("0002"));
    }

    #[tokio::test]
    async fn test_newspaper_carries_dateline_and_place() {
        let h = harness();
        let (principal, _) = seed_reporter_principal(&h.store);

        let outcome = h
            .orchestrator
            .publish(&principal, request(minimal_submission()))
            .await
            .unwrap();

        let newspaper = &h.store.newspaper_articles()[0];
        assert_eq!(newspaper.place_name.as_deref(), Some("Hyderabad"));
        assert!(newspaper.dateline.starts_with("Hyderabad, "));
        assert_eq!(newspaper.external_id, outcome.external_id);
    }
}
