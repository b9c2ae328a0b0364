//! Tournament (the capacity-limited event a pass grants entry to).

use serde::{Deserialize, Serialize};

use crate::domain::foundation::TournamentId;

/// Read-only event data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    /// Ranking points awarded for participation.
    pub points_value: f64,
}
