use serde::{Deserialize, Serialize};

/// Payload carried by email-confirmation and approval links.
///
/// Both links of a registration carry the same claims, so either one can
/// be presented to either endpoint.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationClaims {
    pub user_id: i32,
    pub email: String,
}
