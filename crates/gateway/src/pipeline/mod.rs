//! The unified publication pipeline
//!
//! One submission becomes up to three linked artifacts: a base article, a
//! newspaper article, and (in limited-rewrite mode) a web article, with the
//! remaining formats handed to the asynchronous rewrite worker.

pub mod ai_mode;
pub mod category;
pub mod external_id;
pub mod location;
pub mod normalizer;
pub mod orchestrator;
pub mod store;
pub mod submission;
pub mod tenant_scope;

#[cfg(test)]
pub(crate) mod testing;

pub use orchestrator::{
    PublicationOrchestrator, PublicationOutcome, PublicationStatus, PublishRequest,
};
