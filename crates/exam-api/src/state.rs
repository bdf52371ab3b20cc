use std::{path::Path, sync::Arc, time::Duration, time::SystemTime};

use question_bank::{BankError, QuestionBank};
use tokio::{sync::RwLock, task::JoinHandle, time::interval};
use tracing::{info, warn};

use super::config::Config;

pub struct AppState {
    pub bank: RwLock<QuestionBank>,
    pub config: Config,
}

impl AppState {
    pub fn new(bank: QuestionBank, config: Config) -> Arc<Self> {
        Arc::new(Self {
            bank: RwLock::new(bank),
            config,
        })
    }

    pub async fn load(config: Config) -> Result<Arc<Self>, BankError> {
        let path = config.snapshot_path.clone();
        let bank = tokio::task::spawn_blocking(move || QuestionBank::load_or_default(&path))
            .await
            .map_err(|e| BankError::Io(std::io::Error::other(e)))??;
        Ok(Self::new(bank, config))
    }

    /// Replace the in-memory bank with the snapshot on disk.
    pub async fn reload(&self) -> Result<usize, BankError> {
        let path = self.config.snapshot_path.clone();
        let bank = tokio::task::spawn_blocking(move || QuestionBank::load(&path))
            .await
            .map_err(|e| BankError::Io(std::io::Error::other(e)))??;
        let count = bank.len();
        *self.bank.write().await = bank;
        Ok(count)
    }
}

fn modified(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}

/// Poll the snapshot's modification time and reload when it changes.
pub fn spawn_reloader(state: Arc<AppState>) -> Option<JoinHandle<()>> {
    if state.config.reload_secs == 0 {
        return None;
    }

    Some(tokio::spawn(async move {
        let mut ticker = interval(Duration::from_secs(state.config.reload_secs));
        let mut last_seen = modified(&state.config.snapshot_path);
        loop {
            ticker.tick().await;
            let current = modified(&state.config.snapshot_path);
            if current.is_none() || current == last_seen {
                continue;
            }
            match state.reload().await {
                Ok(count) => {
                    info!("Reloaded snapshot with {count} questions");
                    last_seen = current;
                }
                Err(e) => warn!("Snapshot reload failed: {e}"),
            }
        }
    }))
}
