//! Per-provider spinners driven by `FetchState` snapshots.

use crate::domain::FetchState;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Live view of one fetch cycle. Drop it via [`ProgressTracker::finish`] once the cycle returns.
pub struct ProgressTracker {
    multi: MultiProgress,
    task: JoinHandle<()>,
}

impl ProgressTracker {
    pub fn start(mut rx: watch::Receiver<FetchState>) -> Self {
        let multi = MultiProgress::new();
        let style = ProgressStyle::with_template("{spinner:.cyan} {prefix:>12.bold} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());

        let initial = rx.borrow_and_update().clone();
        let bars: Vec<ProgressBar> = initial
            .providers
            .iter()
            .map(|p| {
                let bar = multi.add(ProgressBar::new_spinner());
                bar.set_style(style.clone());
                bar.set_prefix(p.name);
                bar.set_message("waiting");
                bar.enable_steady_tick(Duration::from_millis(100));
                bar
            })
            .collect();

        let task = tokio::spawn(async move {
            let mut started = vec![false; bars.len()];
            while rx.changed().await.is_ok() {
                let state = rx.borrow_and_update().clone();
                for ((bar, seen), p) in bars.iter().zip(started.iter_mut()).zip(&state.providers) {
                    if p.loading && !*seen {
                        *seen = true;
                        bar.set_message("fetching…");
                    } else if !p.loading && *seen && !bar.is_finished() {
                        bar.finish_with_message("done");
                    }
                }
            }
        });

        Self { multi, task }
    }

    /// Stop tracking and erase the spinners.
    pub fn finish(self) {
        self.task.abort();
        let _ = self.multi.clear();
    }
}
