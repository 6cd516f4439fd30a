//! Versioned, append-only document repository

use crate::config::ApprovalPolicy;
use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use sowgen_domain::{
    has_critical_failure, summary_score, DomainError, ProjectId, ScopeOfWork, SowId,
    ValidationResult,
};
use std::sync::Arc;
use thiserror::Error;

/// Repository failures
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// No document with the given id
    #[error("scope of work {id} not found")]
    NotFound {
        /// The unknown id
        id: SowId,
    },

    /// Approval refused by policy
    #[error("approval blocked: {reason}")]
    ApprovalBlocked {
        /// Why the policy refused
        reason: String,
    },

    /// The document violated a domain invariant at persist time
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Storage boundary for scope-of-work documents
///
/// Append-only: `save` always creates a new version, `approve` is the sole
/// permitted status mutation and `append_validation` the sole permitted
/// content mutation. Storage keys never leak past this trait.
#[async_trait]
pub trait SowRepository: Send + Sync {
    /// Persist a document, assigning the next version for its project
    ///
    /// # Errors
    /// [`RepositoryError::Domain`] when version assignment is rejected.
    async fn save(&self, sow: ScopeOfWork) -> Result<Arc<ScopeOfWork>, RepositoryError>;

    /// Fetch one document by id
    async fn get_by_id(&self, id: SowId) -> Option<Arc<ScopeOfWork>>;

    /// All versions for a project, oldest first (newest last)
    async fn get_versions_by_project(&self, project_id: ProjectId) -> Vec<Arc<ScopeOfWork>>;

    /// Approve a stored document, policy permitting
    ///
    /// Idempotent: an already-approved document is returned unchanged. The
    /// policy is evaluated against the stored validation results.
    ///
    /// # Errors
    /// [`RepositoryError::NotFound`] for unknown ids and
    /// [`RepositoryError::ApprovalBlocked`] when policy refuses.
    async fn approve(&self, id: SowId) -> Result<Arc<ScopeOfWork>, RepositoryError>;

    /// Append validation results to a stored document
    ///
    /// # Errors
    /// [`RepositoryError::NotFound`] for unknown ids.
    async fn append_validation(
        &self,
        id: SowId,
        results: Vec<ValidationResult>,
    ) -> Result<Arc<ScopeOfWork>, RepositoryError>;
}

/// In-memory repository
///
/// Version assignment takes the project's entry lock for the duration of
/// the increment-and-insert, so concurrent writers for one project get
/// consecutive versions with no duplicates or gaps.
pub struct InMemorySowRepository {
    policy: ApprovalPolicy,
    by_id: DashMap<SowId, Arc<ScopeOfWork>>,
    by_project: DashMap<ProjectId, Vec<(u32, SowId)>>,
}

impl InMemorySowRepository {
    /// Empty repository enforcing the given approval policy
    #[must_use]
    pub fn new(policy: ApprovalPolicy) -> Self {
        Self {
            policy,
            by_id: DashMap::new(),
            by_project: DashMap::new(),
        }
    }

    fn check_policy(&self, sow: &ScopeOfWork) -> Result<(), RepositoryError> {
        if self.policy.block_on_critical && has_critical_failure(&sow.validation_results) {
            return Err(RepositoryError::ApprovalBlocked {
                reason: "a critical compliance checker failed".to_string(),
            });
        }
        let score = summary_score(&sow.validation_results);
        if score < self.policy.minimum_score {
            return Err(RepositoryError::ApprovalBlocked {
                reason: format!(
                    "validation summary score {score:.1} below required {:.1}",
                    self.policy.minimum_score
                ),
            });
        }
        Ok(())
    }
}

impl Default for InMemorySowRepository {
    fn default() -> Self {
        Self::new(ApprovalPolicy::default())
    }
}

#[async_trait]
impl SowRepository for InMemorySowRepository {
    async fn save(&self, sow: ScopeOfWork) -> Result<Arc<ScopeOfWork>, RepositoryError> {
        let project_id = sow.project_id;
        let mut versions = self.by_project.entry(project_id).or_default();
        let next = versions.iter().map(|(v, _)| *v).max().unwrap_or(0) + 1;
        let stored = Arc::new(sow.with_version(next)?);
        versions.push((next, stored.id));
        self.by_id.insert(stored.id, Arc::clone(&stored));
        drop(versions);

        tracing::info!(
            sow_id = %stored.id,
            project_id = %project_id,
            version = next,
            "scope of work persisted"
        );
        Ok(stored)
    }

    async fn get_by_id(&self, id: SowId) -> Option<Arc<ScopeOfWork>> {
        self.by_id.get(&id).map(|entry| Arc::clone(entry.value()))
    }

    async fn get_versions_by_project(&self, project_id: ProjectId) -> Vec<Arc<ScopeOfWork>> {
        let Some(versions) = self.by_project.get(&project_id) else {
            return Vec::new();
        };
        let mut ordered = versions.value().clone();
        drop(versions);
        ordered.sort_by_key(|(v, _)| *v);
        ordered
            .iter()
            .filter_map(|(_, id)| self.by_id.get(id).map(|e| Arc::clone(e.value())))
            .collect()
    }

    async fn approve(&self, id: SowId) -> Result<Arc<ScopeOfWork>, RepositoryError> {
        let Some(mut entry) = self.by_id.get_mut(&id) else {
            return Err(RepositoryError::NotFound { id });
        };
        if entry.is_approved() {
            return Ok(Arc::clone(entry.value()));
        }
        self.check_policy(entry.value())?;

        let approved = Arc::new(entry.value().as_ref().clone().approved(Utc::now()));
        *entry.value_mut() = Arc::clone(&approved);
        tracing::info!(sow_id = %id, "scope of work approved");
        Ok(approved)
    }

    async fn append_validation(
        &self,
        id: SowId,
        results: Vec<ValidationResult>,
    ) -> Result<Arc<ScopeOfWork>, RepositoryError> {
        let Some(mut entry) = self.by_id.get_mut(&id) else {
            return Err(RepositoryError::NotFound { id });
        };
        let mut updated = entry.value().as_ref().clone();
        updated.validation_results.extend(results);
        let updated = Arc::new(updated);
        *entry.value_mut() = Arc::clone(&updated);
        Ok(updated)
    }
}
