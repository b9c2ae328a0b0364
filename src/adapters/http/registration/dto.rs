//! DTOs for registration endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::registration::RegisterForEventResult;
use crate::domain::foundation::{PassId, Timestamp, ValidationError};

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub pass_id: String,
}

impl RegisterRequest {
    pub fn pass_id(&self) -> Result<PassId, ValidationError> {
        PassId::parse(self.pass_id.trim())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationResponse {
    pub registration_id: String,
    pub tournament_id: String,
    pub tournament_name: String,
    pub pass_id: String,
    pub pass_type_name: String,
    pub remaining: u32,
    pub registered_at: Timestamp,
}

impl From<RegisterForEventResult> for RegistrationResponse {
    fn from(result: RegisterForEventResult) -> Self {
        Self {
            registration_id: result.registration.id.to_string(),
            tournament_id: result.registration.tournament_id.to_string(),
            tournament_name: result.tournament_name,
            pass_id: result.registration.pass_id.to_string(),
            pass_type_name: result.pass_type_name,
            remaining: result.remaining,
            registered_at: result.registration.created_at,
        }
    }
}
