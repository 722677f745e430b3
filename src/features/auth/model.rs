use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::users::models::UserRole;

/// Identity attached to a request after bearer-token validation.
///
/// Token issuance lives in the external identity provider; this service only
/// verifies the signature and lifts the claims into a typed value.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub email: String,
    pub full_name: String,
    pub role: UserRole,
}

impl AuthenticatedUser {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    pub fn is_rh(&self) -> bool {
        self.role == UserRole::Rh
    }

    pub fn is_tuteur(&self) -> bool {
        self.role == UserRole::Tuteur
    }

    pub fn is_stagiaire(&self) -> bool {
        self.role == UserRole::Stagiaire
    }

    /// Staff access: admin or RH. Used for catalog management, job offers
    /// and rating approvals.
    pub fn has_staff_access(&self) -> bool {
        self.is_admin() || self.is_rh()
    }

    /// Reviewer access: anyone allowed to approve or reject stage reports.
    pub fn has_reviewer_access(&self) -> bool {
        self.is_admin() || self.is_rh() || self.is_tuteur()
    }
}

/// Raw JWT claims as issued by the identity provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub iss: String,
    pub aud: String,
    pub exp: u64,
    pub iat: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with_role(role: UserRole) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: Uuid::new_v4(),
            email: "user@example.com".to_string(),
            full_name: "Test User".to_string(),
            role,
        }
    }

    #[test]
    fn test_staff_access() {
        assert!(user_with_role(UserRole::Admin).has_staff_access());
        assert!(user_with_role(UserRole::Rh).has_staff_access());
        assert!(!user_with_role(UserRole::Tuteur).has_staff_access());
        assert!(!user_with_role(UserRole::Stagiaire).has_staff_access());
    }

    #[test]
    fn test_reviewer_access() {
        assert!(user_with_role(UserRole::Admin).has_reviewer_access());
        assert!(user_with_role(UserRole::Rh).has_reviewer_access());
        assert!(user_with_role(UserRole::Tuteur).has_reviewer_access());
        assert!(!user_with_role(UserRole::Stagiaire).has_reviewer_access());
    }
}
