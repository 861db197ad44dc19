use std::sync::Arc;
use tokio::sync::RwLock;

use crate::models::RunReport;

/// Holds the report of the most recent run
#[derive(Clone, Default)]
pub struct RunStore {
    last: Arc<RwLock<Option<RunReport>>>,
}

impl RunStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored report
    pub async fn store(&self, report: RunReport) {
        let mut last = self.last.write().await;
        *last = Some(report);
    }

    pub async fn get(&self) -> Option<RunReport> {
        self.last.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use spread_engine::{Palette, PaletteExtender};

    fn report(seed: u64) -> RunReport {
        let palette = Palette::from_hex(&["#000000"]).unwrap();
        let extender = PaletteExtender::new(palette.clone())
            .restarts(1)
            .iterations(10)
            .seed(seed);
        let result = extender.run_to_completion().unwrap();
        let now = Utc::now();
        RunReport::new(&palette, extender.settings(), result, now, now)
    }

    #[tokio::test]
    async fn test_empty_store() {
        assert!(RunStore::new().get().await.is_none());
    }

    #[tokio::test]
    async fn test_store_replaces_previous() {
        let store = RunStore::new();
        store.store(report(1)).await;
        store.store(report(2)).await;

        assert_eq!(store.get().await.map(|r| r.seed), Some(Some(2)));
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = RunStore::new();
        let other = store.clone();
        store.store(report(3)).await;

        assert!(other.get().await.is_some());
    }
}
