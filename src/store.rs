//! Snapshot persistence
//!
//! All records live in one in-memory `SystemData` guarded by a lock and are
//! written to disk as a single JSON file. A background task saves changed
//! data periodically.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{RwLock, RwLockReadGuard};
use tokio::time::interval;
use tracing::{info, warn};

use crate::error::{AppError, Result};
use crate::models::SystemData;

/// Shared handle to the record snapshot
#[derive(Clone)]
pub struct Store {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    path: PathBuf,
    data: RwLock<SystemData>,
    dirty: AtomicBool,
}

impl Store {
    /// Open the snapshot at `path`.
    ///
    /// A missing file starts empty. A file that cannot be parsed is logged
    /// and also starts empty; it is left on disk until the next save.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let data = match tokio::fs::read_to_string(&path).await {
            Ok(text) => match serde_json::from_str::<SystemData>(&text) {
                Ok(data) => {
                    info!(
                        "Loaded snapshot {}: {} customers, {} products, {} packages, {} orders",
                        path.display(),
                        data.customers.len(),
                        data.products.len(),
                        data.packages.len(),
                        data.orders.len()
                    );
                    data
                }
                Err(e) => {
                    warn!("Failed to parse snapshot {}: {}", path.display(), e);
                    SystemData::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No snapshot at {}, starting empty", path.display());
                SystemData::default()
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self::with_data(path, data))
    }

    pub fn with_data(path: impl Into<PathBuf>, data: SystemData) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                path: path.into(),
                data: RwLock::new(data),
                dirty: AtomicBool::new(false),
            }),
        }
    }

    pub fn path(&self) -> &Path {
        &self.inner.path
    }

    pub fn is_dirty(&self) -> bool {
        self.inner.dirty.load(Ordering::Acquire)
    }

    /// Run `f` against the current records.
    pub async fn read<R>(&self, f: impl FnOnce(&SystemData) -> R) -> R {
        let data = self.inner.data.read().await;
        f(&data)
    }

    /// Hold the read lock across an await. Writers wait until the guard drops.
    pub async fn read_guard(&self) -> RwLockReadGuard<'_, SystemData> {
        self.inner.data.read().await
    }

    /// Run `f` with write access and mark the records as changed.
    pub async fn update<R>(&self, f: impl FnOnce(&mut SystemData) -> R) -> R {
        let mut data = self.inner.data.write().await;
        let out = f(&mut data);
        self.inner.dirty.store(true, Ordering::Release);
        out
    }

    /// Like [`Store::update`], but the records only count as changed when
    /// `f` succeeds. `f` must not mutate before returning an error.
    pub async fn try_update<T, E>(
        &self,
        f: impl FnOnce(&mut SystemData) -> std::result::Result<T, E>,
    ) -> std::result::Result<T, E> {
        let mut data = self.inner.data.write().await;
        let out = f(&mut data)?;
        self.inner.dirty.store(true, Ordering::Release);
        Ok(out)
    }

    /// Write the snapshot to disk, stamping the save time.
    pub async fn save(&self) -> Result<DateTime<Utc>> {
        let now = Utc::now();
        let json = {
            let mut data = self.inner.data.write().await;
            data.settings.last_save = Some(now);
            self.inner.dirty.store(false, Ordering::Release);
            serde_json::to_string(&*data)?
        };

        if let Err(e) = write_atomic(&self.inner.path, json.as_bytes()).await {
            self.inner.dirty.store(true, Ordering::Release);
            return Err(e);
        }
        Ok(now)
    }

    /// Pretty-printed snapshot for download.
    pub async fn export(&self) -> Result<String> {
        let data = self.inner.data.read().await;
        Ok(serde_json::to_string_pretty(&*data)?)
    }

    /// Replace every record with an imported snapshot and save it.
    pub async fn import(&self, json: &str) -> Result<DateTime<Utc>> {
        let imported: SystemData = serde_json::from_str(json)
            .map_err(|e| AppError::Validation(format!("invalid snapshot: {}", e)))?;

        info!(
            "Importing snapshot: {} customers, {} orders",
            imported.customers.len(),
            imported.orders.len()
        );
        *self.inner.data.write().await = imported;
        self.save().await
    }

    /// Drop all records and delete the snapshot file.
    pub async fn clear(&self) -> Result<()> {
        *self.inner.data.write().await = SystemData::default();
        self.inner.dirty.store(false, Ordering::Release);

        match tokio::fs::remove_file(&self.inner.path).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        info!("All records cleared");
        Ok(())
    }
}

async fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, bytes).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}

/// Start background autosave
///
/// Saves every `period` when records changed since the last save.
pub async fn start_autosave(store: Store, period: Duration) {
    let mut ticker = interval(period);
    // First tick completes immediately
    ticker.tick().await;
    loop {
        ticker.tick().await;
        if !store.is_dirty() {
            continue;
        }
        match store.save().await {
            Ok(at) => tracing::debug!("Autosaved snapshot at {}", at),
            Err(e) => warn!("Autosave failed: {}", e),
        }
    }
}
