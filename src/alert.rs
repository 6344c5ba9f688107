use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc, Mutex, MutexGuard, PoisonError,
};
use std::time::Duration;

use log::{debug, warn};
use tokio::{task::JoinHandle, time::Instant};

use crate::config::Config;

pub const FETCH_ERROR_MESSAGE: &str = "Ошибка в получении данных с сервера!";
pub const ALERT_CLASS: &str = "alert-error";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub id: u64,
    pub class: &'static str,
    pub message: String,
}

/// Stand-in for the document body: holds the error banners currently shown.
/// Each banner removes itself after the configured duration; nothing is queued.
#[derive(Debug, Clone)]
pub struct AlertBoard {
    banners: Arc<Mutex<Vec<Banner>>>,
    next_id: Arc<AtomicU64>,
    duration: Duration,
}

impl AlertBoard {
    pub fn new(duration: Duration) -> AlertBoard {
        AlertBoard {
            banners: Arc::new(Mutex::new(Vec::new())),
            next_id: Arc::new(AtomicU64::new(1)),
            duration,
        }
    }

    pub fn from_config(config: &Config) -> AlertBoard {
        AlertBoard::new(Duration::from_millis(config.alert_duration_ms))
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Banner>> {
        self.banners.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Must be called from inside a tokio runtime.
    pub fn show_alert(&self, message: &str) -> JoinHandle<()> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        warn!("{}", message);
        self.lock().push(Banner {
            id,
            class: ALERT_CLASS,
            message: message.to_string(),
        });

        let deadline = Instant::now() + self.duration;
        let board = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            board.lock().retain(|banner| banner.id != id);
            debug!("Alert {} dismissed", id);
        })
    }

    pub fn banners(&self) -> Vec<Banner> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
