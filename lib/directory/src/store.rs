//! The storage seam for the roster.
//!
//! [`Directory`] is implemented against Postgres in the binary; tests run
//! against [`MemoryDirectory`].

use crate::error::DirectoryError;
use crate::station::{HeadAssignment, Station, StationHead};
use crate::worker::{Worker, WorkerDraft, WorkerPatch};
use async_trait::async_trait;
use station_roster_core::{ChatUserId, StationId, WorkerId};
use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

/// Trait for roster storage operations.
///
/// Listing methods return rows in ascending id order so that numbered
/// listings stay stable between the prompt and the user's reply.
#[async_trait]
pub trait Directory: Send + Sync {
    /// All stations, ordered by id.
    async fn stations(&self) -> Result<Vec<Station>, DirectoryError>;

    /// Looks up one station.
    async fn station(&self, id: StationId) -> Result<Option<Station>, DirectoryError>;

    /// Inserts a station by name, returning the existing row if the name is
    /// already present.
    async fn upsert_station(&self, name: &str) -> Result<Station, DirectoryError>;

    /// Inserts a new worker and returns it with its assigned id.
    async fn insert_worker(&self, draft: WorkerDraft) -> Result<Worker, DirectoryError>;

    /// Applies a single-field amendment and returns the updated worker.
    async fn update_worker(
        &self,
        id: WorkerId,
        patch: WorkerPatch,
    ) -> Result<Worker, DirectoryError>;

    /// Looks up one worker.
    async fn worker(&self, id: WorkerId) -> Result<Option<Worker>, DirectoryError>;

    /// All workers rostered at one station, ordered by id.
    async fn workers_by_station(&self, station: StationId)
    -> Result<Vec<Worker>, DirectoryError>;

    /// Entrusts a station to a user, moving them if they already head one.
    async fn assign_head(
        &self,
        user: ChatUserId,
        station: StationId,
    ) -> Result<StationHead, DirectoryError>;

    /// Revokes a user's head assignment, returning what was removed.
    async fn remove_head(&self, user: ChatUserId) -> Result<Option<StationHead>, DirectoryError>;

    /// The station a user heads, if any.
    async fn head_station(&self, user: ChatUserId) -> Result<Option<Station>, DirectoryError>;

    /// Every head assignment joined with its station, ordered by station id.
    async fn head_assignments(&self) -> Result<Vec<HeadAssignment>, DirectoryError>;
}

#[derive(Debug, Default)]
struct MemoryInner {
    stations: BTreeMap<StationId, Station>,
    workers: BTreeMap<WorkerId, Worker>,
    heads: HashMap<ChatUserId, StationId>,
    next_station: i32,
    next_worker: i32,
    fail_writes: bool,
}

/// An in-memory roster for tests and local experiments.
///
/// Write operations can be made to fail on demand to exercise the
/// store-failure paths of the dialogue flows.
#[derive(Debug, Default)]
pub struct MemoryDirectory {
    inner: Mutex<MemoryInner>,
}

impl MemoryDirectory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a directory pre-seeded with the given station names.
    #[must_use]
    pub fn with_stations(names: &[&str]) -> Self {
        let directory = Self::new();
        {
            let mut inner = directory.inner.lock().unwrap();
            for name in names {
                let id = StationId::new(inner.next_station + 1);
                inner.next_station += 1;
                inner.stations.insert(
                    id,
                    Station {
                        id,
                        name: (*name).to_string(),
                    },
                );
            }
        }
        directory
    }

    /// Makes every future write operation fail with a backend error.
    pub fn fail_writes(&self, fail: bool) {
        self.inner.lock().unwrap().fail_writes = fail;
    }

    /// Removes a station together with its workers and head assignments,
    /// mirroring the cascading delete the SQL schema performs.
    pub fn delete_station(&self, id: StationId) {
        let mut inner = self.inner.lock().unwrap();
        inner.stations.remove(&id);
        inner.workers.retain(|_, worker| worker.station != id);
        inner.heads.retain(|_, station| *station != id);
    }

    fn check_write(inner: &MemoryInner) -> Result<(), DirectoryError> {
        if inner.fail_writes {
            return Err(DirectoryError::Backend {
                message: "injected write failure".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl Directory for MemoryDirectory {
    async fn stations(&self) -> Result<Vec<Station>, DirectoryError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.stations.values().cloned().collect())
    }

    async fn station(&self, id: StationId) -> Result<Option<Station>, DirectoryError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.stations.get(&id).cloned())
    }

    async fn upsert_station(&self, name: &str) -> Result<Station, DirectoryError> {
        let mut inner = self.inner.lock().unwrap();
        Self::check_write(&inner)?;
        if let Some(existing) = inner.stations.values().find(|s| s.name == name) {
            return Ok(existing.clone());
        }
        let id = StationId::new(inner.next_station + 1);
        inner.next_station += 1;
        let station = Station {
            id,
            name: name.to_string(),
        };
        inner.stations.insert(id, station.clone());
        Ok(station)
    }

    async fn insert_worker(&self, draft: WorkerDraft) -> Result<Worker, DirectoryError> {
        let mut inner = self.inner.lock().unwrap();
        Self::check_write(&inner)?;
        if !inner.stations.contains_key(&draft.station) {
            return Err(DirectoryError::StationNotFound { id: draft.station });
        }
        let id = WorkerId::new(inner.next_worker + 1);
        inner.next_worker += 1;
        let worker = draft.into_worker(id);
        inner.workers.insert(id, worker.clone());
        Ok(worker)
    }

    async fn update_worker(
        &self,
        id: WorkerId,
        patch: WorkerPatch,
    ) -> Result<Worker, DirectoryError> {
        let mut inner = self.inner.lock().unwrap();
        Self::check_write(&inner)?;
        if let WorkerPatch::Station(station) = &patch {
            if !inner.stations.contains_key(station) {
                return Err(DirectoryError::StationNotFound { id: *station });
            }
        }
        let worker = inner
            .workers
            .get_mut(&id)
            .ok_or(DirectoryError::WorkerNotFound { id })?;
        patch.apply(worker);
        Ok(worker.clone())
    }

    async fn worker(&self, id: WorkerId) -> Result<Option<Worker>, DirectoryError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.workers.get(&id).cloned())
    }

    async fn workers_by_station(
        &self,
        station: StationId,
    ) -> Result<Vec<Worker>, DirectoryError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .workers
            .values()
            .filter(|w| w.station == station)
            .cloned()
            .collect())
    }

    async fn assign_head(
        &self,
        user: ChatUserId,
        station: StationId,
    ) -> Result<StationHead, DirectoryError> {
        let mut inner = self.inner.lock().unwrap();
        Self::check_write(&inner)?;
        if !inner.stations.contains_key(&station) {
            return Err(DirectoryError::StationNotFound { id: station });
        }
        inner.heads.insert(user, station);
        Ok(StationHead { user, station })
    }

    async fn remove_head(&self, user: ChatUserId) -> Result<Option<StationHead>, DirectoryError> {
        let mut inner = self.inner.lock().unwrap();
        Self::check_write(&inner)?;
        Ok(inner
            .heads
            .remove(&user)
            .map(|station| StationHead { user, station }))
    }

    async fn head_station(&self, user: ChatUserId) -> Result<Option<Station>, DirectoryError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .heads
            .get(&user)
            .and_then(|station| inner.stations.get(station))
            .cloned())
    }

    async fn head_assignments(&self) -> Result<Vec<HeadAssignment>, DirectoryError> {
        let inner = self.inner.lock().unwrap();
        let mut assignments: Vec<HeadAssignment> = inner
            .heads
            .iter()
            .filter_map(|(user, station_id)| {
                inner.stations.get(station_id).map(|station| HeadAssignment {
                    user: *user,
                    station: station.clone(),
                })
            })
            .collect();
        assignments.sort_by_key(|a| (a.station.id, a.user));
        Ok(assignments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::{Position, Shift};

    fn draft(station: StationId, tabel: &str) -> WorkerDraft {
        WorkerDraft {
            station,
            full_name: "Karimov Aziz Baxtiyorovich".to_string(),
            tabel: tabel.to_string(),
            position: Position::StationMaster,
            shift: Shift::new(1).expect("valid shift"),
            photo: "AgACAgIAAxkBAAIB".to_string(),
        }
    }

    #[tokio::test]
    async fn upsert_station_is_idempotent_by_name() {
        let directory = MemoryDirectory::new();

        let first = directory.upsert_station("Chilonzor").await.expect("upsert");
        let second = directory.upsert_station("Chilonzor").await.expect("upsert");

        assert_eq!(first.id, second.id);
        assert_eq!(directory.stations().await.expect("list").len(), 1);
    }

    #[tokio::test]
    async fn workers_list_in_insertion_order() {
        let directory = MemoryDirectory::with_stations(&["Chilonzor"]);
        let station = StationId::new(1);

        directory
            .insert_worker(draft(station, "11111"))
            .await
            .expect("insert");
        directory
            .insert_worker(draft(station, "22222"))
            .await
            .expect("insert");

        let workers = directory
            .workers_by_station(station)
            .await
            .expect("list");
        let tabels: Vec<_> = workers.iter().map(|w| w.tabel.as_str()).collect();
        assert_eq!(tabels, ["11111", "22222"]);
    }

    #[tokio::test]
    async fn assign_head_moves_existing_assignment() {
        let directory = MemoryDirectory::with_stations(&["Chilonzor", "Mustaqillik maydoni"]);
        let user = ChatUserId::new(555_000_111);

        directory
            .assign_head(user, StationId::new(1))
            .await
            .expect("assign");
        directory
            .assign_head(user, StationId::new(2))
            .await
            .expect("reassign");

        let station = directory
            .head_station(user)
            .await
            .expect("lookup")
            .expect("assigned");
        assert_eq!(station.id, StationId::new(2));
        assert_eq!(directory.head_assignments().await.expect("list").len(), 1);
    }

    #[tokio::test]
    async fn assign_head_same_station_twice_changes_nothing() {
        let directory = MemoryDirectory::with_stations(&["Chilonzor"]);
        let user = ChatUserId::new(555_000_111);

        let first = directory
            .assign_head(user, StationId::new(1))
            .await
            .expect("assign");
        let second = directory
            .assign_head(user, StationId::new(1))
            .await
            .expect("assign again");

        assert_eq!(first, second);
        assert_eq!(directory.head_assignments().await.expect("list").len(), 1);
    }

    #[tokio::test]
    async fn remove_head_reports_what_was_removed() {
        let directory = MemoryDirectory::with_stations(&["Chilonzor"]);
        let user = ChatUserId::new(42);

        directory
            .assign_head(user, StationId::new(1))
            .await
            .expect("assign");

        let removed = directory.remove_head(user).await.expect("remove");
        assert_eq!(
            removed,
            Some(StationHead {
                user,
                station: StationId::new(1)
            })
        );
        assert_eq!(directory.remove_head(user).await.expect("remove"), None);
    }

    #[tokio::test]
    async fn moving_a_worker_requires_a_real_station() {
        let directory = MemoryDirectory::with_stations(&["Chilonzor", "Oybek"]);
        let worker = directory
            .insert_worker(draft(StationId::new(1), "11111"))
            .await
            .expect("insert");

        let moved = directory
            .update_worker(worker.id, WorkerPatch::Station(StationId::new(2)))
            .await
            .expect("move");
        assert_eq!(moved.station, StationId::new(2));

        let err = directory
            .update_worker(worker.id, WorkerPatch::Station(StationId::new(44)))
            .await
            .expect_err("should reject unknown station");
        assert_eq!(
            err,
            DirectoryError::StationNotFound {
                id: StationId::new(44)
            }
        );
    }

    #[tokio::test]
    async fn update_worker_requires_existing_row() {
        let directory = MemoryDirectory::with_stations(&["Chilonzor"]);

        let err = directory
            .update_worker(
                WorkerId::new(99),
                WorkerPatch::FullName("Yusupova Dilnoza Rustamovna".to_string()),
            )
            .await
            .expect_err("should fail");
        assert_eq!(
            err,
            DirectoryError::WorkerNotFound {
                id: WorkerId::new(99)
            }
        );
    }

    #[tokio::test]
    async fn deleting_a_station_cascades_to_workers_and_heads() {
        let directory = MemoryDirectory::with_stations(&["Chilonzor", "Oybek"]);
        let doomed = StationId::new(1);
        let kept = StationId::new(2);
        let head = ChatUserId::new(900);

        directory
            .insert_worker(draft(doomed, "11111"))
            .await
            .expect("insert");
        directory
            .insert_worker(draft(kept, "22222"))
            .await
            .expect("insert");
        directory.assign_head(head, doomed).await.expect("assign");

        directory.delete_station(doomed);

        assert!(directory
            .workers_by_station(doomed)
            .await
            .expect("list")
            .is_empty());
        assert_eq!(
            directory.workers_by_station(kept).await.expect("list").len(),
            1
        );
        assert!(directory.head_station(head).await.expect("lookup").is_none());
    }

    #[tokio::test]
    async fn injected_write_failure_leaves_reads_working() {
        let directory = MemoryDirectory::with_stations(&["Chilonzor"]);
        directory.fail_writes(true);

        let err = directory
            .insert_worker(draft(StationId::new(1), "11111"))
            .await
            .expect_err("should fail");
        assert!(matches!(err, DirectoryError::Backend { .. }));
        assert_eq!(directory.stations().await.expect("list").len(), 1);
    }
}
