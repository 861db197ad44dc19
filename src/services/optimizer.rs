use chrono::Utc;
use spread_engine::{EngineError, Palette, PaletteExtender, RestartProgress};
use std::collections::HashMap;
use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::models::{AppConfig, RunOverrides, RunReport};

/// Shared stop request, checked between restarts
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Runs palette optimizations with the configured defaults
pub struct OptimizerService {
    config: Arc<AppConfig>,
    active: Mutex<HashMap<u64, CancelFlag>>,
    next_id: AtomicU64,
}

/// Registration of an in-flight run; unregisters on drop
pub struct ActiveRun<'a> {
    service: &'a OptimizerService,
    id: u64,
    flag: CancelFlag,
}

impl ActiveRun<'_> {
    pub fn flag(&self) -> &CancelFlag {
        &self.flag
    }
}

impl Drop for ActiveRun<'_> {
    fn drop(&mut self) {
        self.service.active().remove(&self.id);
    }
}

impl OptimizerService {
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self {
            config,
            active: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(0),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    fn active(&self) -> MutexGuard<'_, HashMap<u64, CancelFlag>> {
        // The map holds plain flags, so a poisoned lock is still consistent
        self.active.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Register a run so [`cancel_all`](Self::cancel_all) can reach it.
    pub fn begin(&self) -> ActiveRun<'_> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let flag = CancelFlag::new();
        self.active().insert(id, flag.clone());
        ActiveRun {
            service: self,
            id,
            flag,
        }
    }

    /// Ask every in-flight run to stop after its current restart.
    ///
    /// Returns how many runs were signalled.
    pub fn cancel_all(&self) -> usize {
        let active = self.active();
        for flag in active.values() {
            flag.cancel();
        }
        active.len()
    }

    pub fn active_runs(&self) -> usize {
        self.active().len()
    }

    /// Run one optimization to completion or cancellation.
    ///
    /// Blocks the calling thread; async callers go through `spawn_blocking`.
    pub fn run(
        &self,
        palette: &Palette,
        overrides: &RunOverrides,
        cancel: &CancelFlag,
    ) -> Result<RunReport, EngineError> {
        let settings = self.config.settings(overrides);
        let extender = PaletteExtender::with_settings(palette.clone(), settings);

        let started_at = Utc::now();
        let mut sink = |p: &RestartProgress| {
            tracing::debug!(
                restart = p.restart,
                total = p.total,
                percent = p.percent,
                best_score = p.best_score,
                "Restart finished"
            );
            if cancel.is_cancelled() {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        };
        let result = extender.run(&mut sink)?;
        let finished_at = Utc::now();

        let report = RunReport::new(
            palette,
            extender.settings(),
            result,
            started_at,
            finished_at,
        );

        tracing::info!(
            colors = ?report.new_colors,
            score = report.best_score,
            restarts = report.completed_restarts,
            cancelled = report.cancelled,
            elapsed_ms = report.elapsed_ms,
            "Optimization finished"
        );

        Ok(report)
    }
}
