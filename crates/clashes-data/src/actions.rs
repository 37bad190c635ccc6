//! Server-side actions: list filtering, detail lookup and clash creation.

use tracing::{debug, error, info, instrument, warn};

use clashes_shared::constants::{detail_path, CREATE_FAILED_MESSAGE};
use clashes_shared::{
    filter, Clash, ClashError, ClashId, CreateClashForm, CreatedClash, FieldErrors,
};

use crate::backend::ClashBackend;

/// Fetch every clash and keep those matching `term`.
///
/// Backend failures are logged with their cause and surfaced as the
/// generic [`ClashError::FetchFailed`].
#[instrument(skip(backend), fields(backend = backend.backend_tag()))]
pub async fn filter_clashes(backend: &dyn ClashBackend, term: &str) -> Result<Vec<Clash>, ClashError> {
    let clashes = backend.fetch_clashes().await.map_err(|e| {
        error!(error = %e, "Failed to fetch clashes from backend");
        ClashError::FetchFailed
    })?;

    let total = clashes.len();
    let matched = filter::filter_clashes(clashes, term);
    debug!(total, matched = matched.len(), "Filtered clashes");
    Ok(matched)
}

#[instrument(skip(backend), fields(backend = backend.backend_tag()))]
pub async fn fetch_clash(backend: &dyn ClashBackend, id: &str) -> Result<Clash, ClashError> {
    match backend.fetch_clash(id).await {
        Ok(Some(clash)) => Ok(clash),
        Ok(None) => Err(ClashError::NotFound(id.to_string())),
        Err(e) => {
            error!(error = %e, "Failed to fetch clash from backend");
            Err(ClashError::FetchFailed)
        }
    }
}

/// Phases of a single create submission.
///
/// `Idle → Validating → Invalid`, or
/// `Idle → Validating → Submitting → Succeeded | Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionPhase {
    Idle,
    Validating,
    Invalid,
    Submitting,
    Succeeded,
    Failed,
}

impl SubmissionPhase {
    pub fn can_advance_to(self, next: SubmissionPhase) -> bool {
        use SubmissionPhase::*;
        matches!(
            (self, next),
            (Idle, Validating)
                | (Validating, Invalid)
                | (Validating, Submitting)
                | (Submitting, Succeeded)
                | (Submitting, Failed)
        )
    }
}

/// Where a create submission ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    /// Validation failed; nothing was sent. Raw values are echoed back.
    Invalid {
        errors: FieldErrors,
        values: CreateClashForm,
    },
    /// The clash exists; navigate to its detail page.
    Redirect { id: ClashId, location: String },
    /// The mutation failed or returned no id. Raw values are echoed back.
    Failed {
        message: String,
        values: CreateClashForm,
    },
}

impl CreateOutcome {
    pub fn phase(&self) -> SubmissionPhase {
        match self {
            CreateOutcome::Invalid { .. } => SubmissionPhase::Invalid,
            CreateOutcome::Redirect { .. } => SubmissionPhase::Succeeded,
            CreateOutcome::Failed { .. } => SubmissionPhase::Failed,
        }
    }

    pub fn error(&self) -> Option<ClashError> {
        match self {
            CreateOutcome::Invalid { errors, .. } => Some(ClashError::Validation(errors.clone())),
            CreateOutcome::Redirect { .. } => None,
            CreateOutcome::Failed { .. } => Some(ClashError::MutationFailed),
        }
    }
}

fn advance(phase: &mut SubmissionPhase, next: SubmissionPhase) {
    debug_assert!(
        phase.can_advance_to(next),
        "illegal transition {phase:?} -> {next:?}"
    );
    debug!(from = ?phase, to = ?next, "Create submission transition");
    *phase = next;
}

/// Validate `form` and, if it passes, run the create mutation.
#[instrument(skip(backend, form), fields(backend = backend.backend_tag()))]
pub async fn create_clash(backend: &dyn ClashBackend, form: CreateClashForm) -> CreateOutcome {
    let mut phase = SubmissionPhase::Idle;

    advance(&mut phase, SubmissionPhase::Validating);
    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => {
            advance(&mut phase, SubmissionPhase::Invalid);
            debug!(fields = %errors, "Create clash input rejected");
            return CreateOutcome::Invalid {
                errors,
                values: form,
            };
        }
    };

    advance(&mut phase, SubmissionPhase::Submitting);
    match backend.create_clash(&input).await {
        Ok(CreatedClash { id: Some(id), .. }) if !id.is_empty() => {
            advance(&mut phase, SubmissionPhase::Succeeded);
            info!(id = %id, title = %input.title, "Clash created");
            CreateOutcome::Redirect {
                location: detail_path(&id),
                id,
            }
        }
        Ok(_) => {
            advance(&mut phase, SubmissionPhase::Failed);
            warn!("Create mutation returned no id");
            CreateOutcome::Failed {
                message: CREATE_FAILED_MESSAGE.to_string(),
                values: form,
            }
        }
        Err(e) => {
            advance(&mut phase, SubmissionPhase::Failed);
            error!(error = %e, "Create mutation failed");
            CreateOutcome::Failed {
                message: CREATE_FAILED_MESSAGE.to_string(),
                values: form,
            }
        }
    }
}
