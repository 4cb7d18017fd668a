use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::screening::pipeline::ScreeningReport;

/// Runs kept before the oldest is evicted.
pub const MAX_RUNS: usize = 256;

/// Ephemeral in-memory store of screening runs. Lost on restart.
/// Holds at most `capacity` runs; inserting past that evicts the oldest by
/// `created_at`.
#[derive(Clone)]
pub struct RunStore {
    runs: Arc<RwLock<HashMap<Uuid, ScreeningReport>>>,
    capacity: usize,
}

impl Default for RunStore {
    fn default() -> Self {
        Self::with_capacity(MAX_RUNS)
    }
}

impl RunStore {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            runs: Arc::default(),
            capacity: capacity.max(1),
        }
    }

    pub async fn insert(&self, report: ScreeningReport) {
        let mut runs = self.runs.write().await;

        if !runs.contains_key(&report.id) && runs.len() >= self.capacity {
            let oldest = runs
                .values()
                .min_by_key(|r| r.created_at)
                .map(|r| r.id);
            if let Some(id) = oldest {
                runs.remove(&id);
                debug!(run_id = %id, "Evicted oldest screening run");
            }
        }

        runs.insert(report.id, report);
    }


    pub async fn get(&self, id: Uuid) -> Option<ScreeningReport> {
        self.runs.read().await.get(&id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    use crate::screening::jd_parser::StructuredJd;

    fn report() -> ScreeningReport {
        ScreeningReport {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            scorer_backend: "weighted".to_string(),
            jd_text: String::new(),
            jd: StructuredJd::default(),
            ranked: vec![],
            failures: vec![],
        }
    }

    #[tokio::test]
    async fn test_insert_then_get() {
        let store = RunStore::default();
        let report = report();
        let id = report.id;
        store.insert(report).await;

        assert_eq!(store.get(id).await.map(|r| r.id), Some(id));
        assert!(store.get(Uuid::new_v4()).await.is_none());
    }

    async fn stored(store: &RunStore) -> usize {
        store.runs.read().await.len()
    }

    fn report_at(offset_secs: i64) -> ScreeningReport {
        ScreeningReport {
            created_at: Utc::now() + Duration::seconds(offset_secs),
            ..report()
        }
    }

    #[tokio::test]
    async fn test_insert_past_capacity_evicts_oldest() {
        let store = RunStore::with_capacity(3);
        let reports: Vec<ScreeningReport> = (0..4).map(report_at).collect();
        let ids: Vec<Uuid> = reports.iter().map(|r| r.id).collect();

        for report in reports {
            store.insert(report).await;
        }

        assert_eq!(stored(&store).await, 3);
        assert!(store.get(ids[0]).await.is_none());
        for id in &ids[1..] {
            assert!(store.get(*id).await.is_some());
        }
    }

    #[tokio::test]
    async fn test_default_store_caps_at_max_runs() {
        let store = RunStore::default();
        let first = report_at(-1);
        let first_id = first.id;
        store.insert(first).await;

        for i in 0..MAX_RUNS as i64 {
            store.insert(report_at(i)).await;
        }

        assert_eq!(stored(&store).await, MAX_RUNS);
        assert!(store.get(first_id).await.is_none());
    }

    #[tokio::test]
    async fn test_reinserting_same_run_does_not_evict() {
        let store = RunStore::with_capacity(2);
        let a = report_at(0);
        let b = report_at(1);
        let a_id = a.id;
        let b_id = b.id;
        store.insert(a.clone()).await;
        store.insert(b).await;
        store.insert(a).await;

        assert_eq!(stored(&store).await, 2);
        assert!(store.get(a_id).await.is_some());
        assert!(store.get(b_id).await.is_some());
    }

    #[tokio::test]
    async fn test_clones_share_runs() {
        let store = RunStore::default();
        let handle = store.clone();
        let report = report();
        let id = report.id;
        handle.insert(report).await;
        assert!(store.get(id).await.is_some());
    }
}
