//! Role-based authorization guards.
//!
//! These guards extract the authenticated user and verify they have the
//! required role before the handler runs, so permission checks live at the
//! API boundary instead of being scattered through handlers.
//!
//! Roles:
//! - admin: platform administration (catalogs, corrections, deletions)
//! - rh: human resources (job offers, rating approvals, staff views)
//! - tuteur: supervises assigned stagiaires, reviews their reports
//! - stagiaire: submits reports, rates their tutor

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;
use axum::{extract::FromRequestParts, http::request::Parts};

fn authenticated_user(parts: &Parts) -> Result<AuthenticatedUser, AppError> {
    parts
        .extensions
        .get::<AuthenticatedUser>()
        .cloned()
        .ok_or_else(|| AppError::Unauthorized("User not authenticated".to_string()))
}

/// Guard for admin-only operations.
///
/// # Example
/// ```ignore
/// pub async fn handler(RequireAdmin(user): RequireAdmin) { ... }
/// ```
pub struct RequireAdmin(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = authenticated_user(parts)?;

        if !user.is_admin() {
            return Err(AppError::Forbidden("Admin access required".to_string()));
        }

        Ok(RequireAdmin(user))
    }
}

/// Guard for staff operations (admin or RH).
///
/// Use this for job offer management, rating approvals and catalog edits.
pub struct RequireStaff(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireStaff
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = authenticated_user(parts)?;

        if !user.has_staff_access() {
            return Err(AppError::Forbidden("Staff access required".to_string()));
        }

        Ok(RequireStaff(user))
    }
}

/// Guard for report review operations (admin, RH or tuteur).
pub struct RequireReviewer(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireReviewer
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = authenticated_user(parts)?;

        if !user.has_reviewer_access() {
            return Err(AppError::Forbidden("Reviewer access required".to_string()));
        }

        Ok(RequireReviewer(user))
    }
}

/// Guard for stagiaire-only operations (report submission, tutor rating).
pub struct RequireStagiaire(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireStagiaire
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = authenticated_user(parts)?;

        if !user.is_stagiaire() {
            return Err(AppError::Forbidden(
                "Stagiaire access required".to_string(),
            ));
        }

        Ok(RequireStagiaire(user))
    }
}
