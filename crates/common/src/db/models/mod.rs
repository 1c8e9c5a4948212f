//! SeaORM entity models
//!
//! Database entities for Newsdesk

mod article;
mod category;
mod category_translation;
mod district;
mod domain;
mod mandal;
mod newspaper_article;
mod reporter;
mod state;
mod tenant;
mod tenant_feature_flags;
mod village;
mod web_article;

pub use article::{
    ActiveModel as ArticleActiveModel, AiStatus, ArticleStatus, Column as ArticleColumn,
    Entity as ArticleEntity, Model as Article,
};

pub use category::{
    ActiveModel as CategoryActiveModel, Column as CategoryColumn, Entity as CategoryEntity,
    Model as Category,
};

pub use category_translation::{
    ActiveModel as CategoryTranslationActiveModel, Column as CategoryTranslationColumn,
    Entity as CategoryTranslationEntity, Model as CategoryTranslation,
};

pub use district::{
    ActiveModel as DistrictActiveModel, Column as DistrictColumn, Entity as DistrictEntity,
    Model as District,
};

pub use domain::{
    ActiveModel as DomainActiveModel, Column as DomainColumn, Entity as DomainEntity,
    Model as Domain,
};

pub use mandal::{
    ActiveModel as MandalActiveModel, Column as MandalColumn, Entity as MandalEntity,
    Model as Mandal,
};

pub use newspaper_article::{
    ActiveModel as NewspaperArticleActiveModel, Column as NewspaperArticleColumn,
    Entity as NewspaperArticleEntity, Model as NewspaperArticle,
};

pub use reporter::{
    ActiveModel as ReporterActiveModel, Column as ReporterColumn, Entity as ReporterEntity,
    Model as Reporter,
};

pub use state::{
    ActiveModel as StateActiveModel, Column as StateColumn, Entity as StateEntity, Model as State,
};

pub use tenant::{
    ActiveModel as TenantActiveModel, Column as TenantColumn, Entity as TenantEntity,
    Model as Tenant,
};

pub use tenant_feature_flags::{
    ActiveModel as TenantFeatureFlagsActiveModel, Column as TenantFeatureFlagsColumn,
    Entity as TenantFeatureFlagsEntity, Model as TenantFeatureFlags,
};

pub use village::{
    ActiveModel as VillageActiveModel, Column as VillageColumn, Entity as VillageEntity,
    Model as Village,
};

pub use web_article::{
    ActiveModel as WebArticleActiveModel, Column as WebArticleColumn, Entity as WebArticleEntity,
    Model as WebArticle,
};
