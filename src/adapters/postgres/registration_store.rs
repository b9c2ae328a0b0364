//! PostgreSQL implementation of RegistrationStore.
//!
//! Spending a pass unit is a single transaction: a guarded conditional
//! `UPDATE` on `passes` followed by the `INSERT` into `registrations`.
//! Concurrent attempts serialize on the pass row lock, so the guard is
//! always evaluated against the committed `remaining`.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{
    DomainError, ErrorCode, PassId, PassTypeId, TournamentId, UserId,
};
use crate::domain::registration::{Pass, PassType, PassView, Registration, Tournament};
use crate::ports::{ConsumeOutcome, ConsumePass, RegistrationStore};

/// PostgreSQL implementation of the RegistrationStore port.
pub struct PostgresRegistrationStore {
    pool: PgPool,
}

impl PostgresRegistrationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct TournamentRow {
    id: Uuid,
    name: String,
    points_value: f64,
}

impl From<TournamentRow> for Tournament {
    fn from(row: TournamentRow) -> Self {
        Tournament {
            id: TournamentId::from_uuid(row.id),
            name: row.name,
            points_value: row.points_value,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PassViewRow {
    id: Uuid,
    owner_user_id: String,
    remaining: i32,
    pass_type_id: Uuid,
    pass_type_name: String,
    units_per_pass: i32,
}

impl TryFrom<PassViewRow> for PassView {
    type Error = DomainError;

    fn try_from(row: PassViewRow) -> Result<Self, Self::Error> {
        let pass_type = PassType {
            id: PassTypeId::from_uuid(row.pass_type_id),
            name: row.pass_type_name,
            units_per_pass: non_negative("units_per_pass", row.units_per_pass)?,
        };

        let pass = Pass {
            id: PassId::from_uuid(row.id),
            owner_user_id: UserId::new(row.owner_user_id).map_err(|e| {
                DomainError::new(ErrorCode::DatabaseError, format!("Invalid owner_user_id: {}", e))
            })?,
            pass_type_id: pass_type.id,
            remaining: non_negative("remaining", row.remaining)?,
        };

        Ok(PassView { pass, pass_type })
    }
}

fn non_negative(column: &str, value: i32) -> Result<u32, DomainError> {
    u32::try_from(value).map_err(|_| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Negative {} in database: {}", column, value),
        )
        .with_detail("column", column)
    })
}

fn db_error(context: &str, e: sqlx::Error) -> DomainError {
    DomainError::database(format!("{}: {}", context, e))
}

#[async_trait]
impl RegistrationStore for PostgresRegistrationStore {
    async fn find_tournament(&self, id: &TournamentId) -> Result<Option<Tournament>, DomainError> {
        let row: Option<TournamentRow> = sqlx::query_as(
            r#"
            SELECT id, name, points_value
            FROM tournaments
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch tournament", e))?;

        Ok(row.map(Tournament::from))
    }

    async fn find_pass(&self, id: &PassId) -> Result<Option<PassView>, DomainError> {
        let row: Option<PassViewRow> = sqlx::query_as(
            r#"
            SELECT p.id, p.owner_user_id, p.remaining,
                   t.id AS pass_type_id, t.name AS pass_type_name, t.units_per_pass
            FROM passes p
            JOIN pass_types t ON t.id = p.pass_type_id
            WHERE p.id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch pass", e))?;

        row.map(PassView::try_from).transpose()
    }

    async fn consume_pass_and_register(
        &self,
        request: ConsumePass,
    ) -> Result<ConsumeOutcome, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to begin transaction", e))?;

        let remaining: Option<i32> = sqlx::query_scalar(
            r#"
            UPDATE passes
            SET remaining = remaining - 1
            WHERE id = $1 AND owner_user_id = $2 AND remaining >= 1
            RETURNING remaining
            "#,
        )
        .bind(request.pass_id.as_uuid())
        .bind(request.user_id.as_str())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| db_error("Failed to decrement pass", e))?;

        let Some(remaining) = remaining else {
            tx.rollback()
                .await
                .map_err(|e| db_error("Failed to roll back transaction", e))?;
            return Ok(ConsumeOutcome::Exhausted);
        };

        let registration = Registration::new(
            request.user_id,
            request.tournament_id,
            request.pass_id,
        );

        sqlx::query(
            r#"
            INSERT INTO registrations (id, user_id, tournament_id, pass_id, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(registration.id.as_uuid())
        .bind(registration.user_id.as_str())
        .bind(registration.tournament_id.as_uuid())
        .bind(registration.pass_id.as_uuid())
        .bind(registration.created_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("Failed to insert registration", e))?;

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit transaction", e))?;

        Ok(ConsumeOutcome::Registered {
            remaining: non_negative("remaining", remaining)?,
            registration,
        })
    }
}
