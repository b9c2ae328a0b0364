//! In-memory RegistrationStore.
//!
//! Guard, decrement and insert happen under one lock acquisition, which
//! gives the same all-or-nothing behavior as the Postgres transaction
//! within a single process. Used for tests and local runs without a
//! database.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;

use crate::domain::foundation::{DomainError, PassId, PassTypeId, TournamentId};
use crate::domain::registration::{Pass, PassType, PassView, Registration, Tournament};
use crate::ports::{ConsumeOutcome, ConsumePass, RegistrationStore};

#[derive(Default)]
struct Tables {
    tournaments: HashMap<TournamentId, Tournament>,
    pass_types: HashMap<PassTypeId, PassType>,
    passes: HashMap<PassId, Pass>,
    registrations: Vec<Registration>,
}

/// In-memory registration store.
#[derive(Default)]
pub struct InMemoryRegistrationStore {
    tables: Mutex<Tables>,
    unavailable: AtomicBool,
}

impl InMemoryRegistrationStore {
    pub fn new() -> Self {
        Self::default()
    }

    // === Seeding ===

    pub async fn add_tournament(&self, tournament: Tournament) {
        self.tables
            .lock()
            .await
            .tournaments
            .insert(tournament.id, tournament);
    }

    pub async fn add_pass_type(&self, pass_type: PassType) {
        self.tables
            .lock()
            .await
            .pass_types
            .insert(pass_type.id, pass_type);
    }

    pub async fn add_pass(&self, pass: Pass) {
        self.tables.lock().await.passes.insert(pass.id, pass);
    }

    /// Makes every subsequent call fail as if the backing store were down.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    // === Inspection ===

    pub async fn remaining(&self, pass_id: &PassId) -> Option<u32> {
        self.tables
            .lock()
            .await
            .passes
            .get(pass_id)
            .map(|p| p.remaining)
    }

    pub async fn registrations(&self) -> Vec<Registration> {
        self.tables.lock().await.registrations.clone()
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::database("in-memory store marked unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl RegistrationStore for InMemoryRegistrationStore {
    async fn find_tournament(&self, id: &TournamentId) -> Result<Option<Tournament>, DomainError> {
        self.check_available()?;
        Ok(self.tables.lock().await.tournaments.get(id).cloned())
    }

    async fn find_pass(&self, id: &PassId) -> Result<Option<PassView>, DomainError> {
        self.check_available()?;
        let tables = self.tables.lock().await;

        let Some(pass) = tables.passes.get(id) else {
            return Ok(None);
        };
        let pass_type = tables.pass_types.get(&pass.pass_type_id).cloned().ok_or_else(|| {
            DomainError::database(format!("Pass {} references unknown pass type", id))
        })?;

        Ok(Some(PassView {
            pass: pass.clone(),
            pass_type,
        }))
    }

    async fn consume_pass_and_register(
        &self,
        request: ConsumePass,
    ) -> Result<ConsumeOutcome, DomainError> {
        self.check_available()?;
        let mut tables = self.tables.lock().await;

        if !tables.tournaments.contains_key(&request.tournament_id) {
            return Err(DomainError::database(format!(
                "Foreign key violation: tournament {} does not exist",
                request.tournament_id
            )));
        }

        let remaining = match tables.passes.get_mut(&request.pass_id) {
            Some(pass) if pass.is_eligible_for(&request.user_id) => {
                pass.remaining -= 1;
                pass.remaining
            }
            _ => return Ok(ConsumeOutcome::Exhausted),
        };

        let registration =
            Registration::new(request.user_id, request.tournament_id, request.pass_id);
        tables.registrations.push(registration.clone());

        Ok(ConsumeOutcome::Registered {
            registration,
            remaining,
        })
    }
}
