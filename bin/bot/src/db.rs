//! Postgres implementation of the roster [`Directory`].

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use station_roster_core::{ChatUserId, StationId, WorkerId};
use station_roster_directory::{
    Directory, DirectoryError, HeadAssignment, Position, Shift, Station, StationHead, Worker,
    WorkerDraft, WorkerPatch,
};

/// Row type for station queries.
#[derive(FromRow)]
struct StationRow {
    id: i32,
    name: String,
}

impl From<StationRow> for Station {
    fn from(row: StationRow) -> Self {
        Self {
            id: StationId::new(row.id),
            name: row.name,
        }
    }
}

/// Row type for worker queries.
///
/// Position labels and shift numbers are stored as plain columns; converting
/// them back into their domain types can fail if the table was edited by hand.
#[derive(FromRow)]
struct WorkerRow {
    id: i32,
    station_id: i32,
    full_name: String,
    tabel: String,
    position: String,
    shift: i16,
    photo: Option<String>,
}

impl WorkerRow {
    fn try_into_worker(self) -> Result<Worker, DirectoryError> {
        let position: Position = self.position.parse().map_err(|e| DirectoryError::Backend {
            message: format!("worker {}: {e}", self.id),
        })?;
        let shift = u8::try_from(self.shift)
            .ok()
            .and_then(Shift::new)
            .ok_or_else(|| DirectoryError::Backend {
                message: format!("worker {}: shift {} out of range", self.id, self.shift),
            })?;
        Ok(Worker {
            id: WorkerId::new(self.id),
            station: StationId::new(self.station_id),
            full_name: self.full_name,
            tabel: self.tabel,
            position,
            shift,
            photo: self.photo,
        })
    }
}

/// Row type for head-assignment queries.
#[derive(FromRow)]
struct HeadRow {
    head_user_id: i64,
    station_id: i32,
}

impl From<HeadRow> for StationHead {
    fn from(row: HeadRow) -> Self {
        Self {
            user: ChatUserId::new(row.head_user_id),
            station: StationId::new(row.station_id),
        }
    }
}

/// Row type for the head listing, joined with station names.
#[derive(FromRow)]
struct AssignmentRow {
    head_user_id: i64,
    station_id: i32,
    station_name: String,
}

impl From<AssignmentRow> for HeadAssignment {
    fn from(row: AssignmentRow) -> Self {
        Self {
            user: ChatUserId::new(row.head_user_id),
            station: Station {
                id: StationId::new(row.station_id),
                name: row.station_name,
            },
        }
    }
}

fn backend(error: sqlx::Error) -> DirectoryError {
    DirectoryError::Backend {
        message: error.to_string(),
    }
}

/// Roster storage backed by Postgres.
pub struct PgDirectory {
    pool: PgPool,
}

impl PgDirectory {
    /// Creates a directory over an open connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Directory for PgDirectory {
    async fn stations(&self) -> Result<Vec<Station>, DirectoryError> {
        let rows: Vec<StationRow> = sqlx::query_as(
            r#"
            SELECT id, name
            FROM stations
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;

        Ok(rows.into_iter().map(Station::from).collect())
    }

    async fn station(&self, id: StationId) -> Result<Option<Station>, DirectoryError> {
        let row: Option<StationRow> = sqlx::query_as(
            r#"
            SELECT id, name
            FROM stations
            WHERE id = $1
            "#,
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?;

        Ok(row.map(Station::from))
    }

    async fn upsert_station(&self, name: &str) -> Result<Station, DirectoryError> {
        // The no-op update makes RETURNING yield the existing row on conflict.
        let row: StationRow = sqlx::query_as(
            r#"
            INSERT INTO stations (name)
            VALUES ($1)
            ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
            RETURNING id, name
            "#,
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(backend)?;

        Ok(row.into())
    }

    async fn insert_worker(&self, draft: WorkerDraft) -> Result<Worker, DirectoryError> {
        if self.station(draft.station).await?.is_none() {
            return Err(DirectoryError::StationNotFound { id: draft.station });
        }

        let row: WorkerRow = sqlx::query_as(
            r#"
            INSERT INTO workers (station_id, full_name, tabel, position, shift, photo)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, station_id, full_name, tabel, position, shift, photo
            "#,
        )
        .bind(draft.station.get())
        .bind(&draft.full_name)
        .bind(&draft.tabel)
        .bind(draft.position.as_str())
        .bind(i16::from(draft.shift.get()))
        .bind(&draft.photo)
        .fetch_one(&self.pool)
        .await
        .map_err(backend)?;

        row.try_into_worker()
    }

    async fn update_worker(
        &self,
        id: WorkerId,
        patch: WorkerPatch,
    ) -> Result<Worker, DirectoryError> {
        if let WorkerPatch::Station(station) = patch {
            if self.station(station).await?.is_none() {
                return Err(DirectoryError::StationNotFound { id: station });
            }
        }

        let row: Option<WorkerRow> = match patch {
            WorkerPatch::FullName(value) => {
                sqlx::query_as(
                    r#"
                    UPDATE workers SET full_name = $2
                    WHERE id = $1
                    RETURNING id, station_id, full_name, tabel, position, shift, photo
                    "#,
                )
                .bind(id.get())
                .bind(value)
                .fetch_optional(&self.pool)
                .await
            }
            WorkerPatch::Tabel(value) => {
                sqlx::query_as(
                    r#"
                    UPDATE workers SET tabel = $2
                    WHERE id = $1
                    RETURNING id, station_id, full_name, tabel, position, shift, photo
                    "#,
                )
                .bind(id.get())
                .bind(value)
                .fetch_optional(&self.pool)
                .await
            }
            WorkerPatch::Position(value) => {
                sqlx::query_as(
                    r#"
                    UPDATE workers SET position = $2
                    WHERE id = $1
                    RETURNING id, station_id, full_name, tabel, position, shift, photo
                    "#,
                )
                .bind(id.get())
                .bind(value.as_str())
                .fetch_optional(&self.pool)
                .await
            }
            WorkerPatch::Shift(value) => {
                sqlx::query_as(
                    r#"
                    UPDATE workers SET shift = $2
                    WHERE id = $1
                    RETURNING id, station_id, full_name, tabel, position, shift, photo
                    "#,
                )
                .bind(id.get())
                .bind(i16::from(value.get()))
                .fetch_optional(&self.pool)
                .await
            }
            WorkerPatch::Photo(value) => {
                sqlx::query_as(
                    r#"
                    UPDATE workers SET photo = $2
                    WHERE id = $1
                    RETURNING id, station_id, full_name, tabel, position, shift, photo
                    "#,
                )
                .bind(id.get())
                .bind(value)
                .fetch_optional(&self.pool)
                .await
            }
            WorkerPatch::Station(value) => {
                sqlx::query_as(
                    r#"
                    UPDATE workers SET station_id = $2
                    WHERE id = $1
                    RETURNING id, station_id, full_name, tabel, position, shift, photo
                    "#,
                )
                .bind(id.get())
                .bind(value.get())
                .fetch_optional(&self.pool)
                .await
            }
        }
        .map_err(backend)?;

        match row {
            Some(r) => r.try_into_worker(),
            None => Err(DirectoryError::WorkerNotFound { id }),
        }
    }

    async fn worker(&self, id: WorkerId) -> Result<Option<Worker>, DirectoryError> {
        let row: Option<WorkerRow> = sqlx::query_as(
            r#"
            SELECT id, station_id, full_name, tabel, position, shift, photo
            FROM workers
            WHERE id = $1
            "#,
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?;

        match row {
            Some(r) => Ok(Some(r.try_into_worker()?)),
            None => Ok(None),
        }
    }

    async fn workers_by_station(
        &self,
        station: StationId,
    ) -> Result<Vec<Worker>, DirectoryError> {
        let rows: Vec<WorkerRow> = sqlx::query_as(
            r#"
            SELECT id, station_id, full_name, tabel, position, shift, photo
            FROM workers
            WHERE station_id = $1
            ORDER BY id
            "#,
        )
        .bind(station.get())
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;

        rows.into_iter().map(WorkerRow::try_into_worker).collect()
    }

    async fn assign_head(
        &self,
        user: ChatUserId,
        station: StationId,
    ) -> Result<StationHead, DirectoryError> {
        if self.station(station).await?.is_none() {
            return Err(DirectoryError::StationNotFound { id: station });
        }

        sqlx::query(
            r#"
            INSERT INTO station_heads (head_user_id, station_id)
            VALUES ($1, $2)
            ON CONFLICT (head_user_id) DO UPDATE SET station_id = EXCLUDED.station_id
            "#,
        )
        .bind(user.get())
        .bind(station.get())
        .execute(&self.pool)
        .await
        .map_err(backend)?;

        Ok(StationHead { user, station })
    }

    async fn remove_head(&self, user: ChatUserId) -> Result<Option<StationHead>, DirectoryError> {
        let row: Option<HeadRow> = sqlx::query_as(
            r#"
            DELETE FROM station_heads
            WHERE head_user_id = $1
            RETURNING head_user_id, station_id
            "#,
        )
        .bind(user.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?;

        Ok(row.map(StationHead::from))
    }

    async fn head_station(&self, user: ChatUserId) -> Result<Option<Station>, DirectoryError> {
        let row: Option<StationRow> = sqlx::query_as(
            r#"
            SELECT s.id, s.name
            FROM stations s
            JOIN station_heads h ON h.station_id = s.id
            WHERE h.head_user_id = $1
            "#,
        )
        .bind(user.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?;

        Ok(row.map(Station::from))
    }

    async fn head_assignments(&self) -> Result<Vec<HeadAssignment>, DirectoryError> {
        let rows: Vec<AssignmentRow> = sqlx::query_as(
            r#"
            SELECT h.head_user_id, s.id AS station_id, s.name AS station_name
            FROM station_heads h
            JOIN stations s ON s.id = h.station_id
            ORDER BY s.id, h.head_user_id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;

        Ok(rows.into_iter().map(HeadAssignment::from).collect())
    }
}
