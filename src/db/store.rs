use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::{Appointment, Car, CarWash, Client, Employee, Service, Shift, WashBay};

/// The whole persisted document.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Data {
    pub clients: Vec<Client>,
    pub cars: Vec<Car>,
    pub services: Vec<Service>,
    pub employees: Vec<Employee>,
    pub appointments: Vec<Appointment>,
    pub shifts: Vec<Shift>,
    pub carwashes: Vec<CarWash>,
    pub washbays: Vec<WashBay>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushPolicy {
    /// Write the full document before a mutation reports success.
    WriteThrough,
    /// Mark dirty and let a background task call [`Store::flush`].
    Batched,
}

impl FlushPolicy {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "write-through" | "write_through" | "sync" => Some(FlushPolicy::WriteThrough),
            "batched" | "batch" | "async" => Some(FlushPolicy::Batched),
            _ => None,
        }
    }
}

/// In-memory entity store backed by a single JSON file.
///
/// The store is owned by one writer at a time (callers wrap it in a mutex);
/// reads always see the latest in-memory state regardless of flush policy.
#[derive(Debug)]
pub struct Store {
    data: Data,
    path: Option<PathBuf>,
    policy: FlushPolicy,
    dirty: bool,
}

impl Store {
    /// Load the document at `path`, creating it empty when the file is missing.
    pub fn load(path: impl Into<PathBuf>, policy: FlushPolicy) -> anyhow::Result<Self> {
        let path = path.into();
        let exists = path.exists();

        let data = if exists {
            let raw = fs::read_to_string(&path).context("failed to read data file")?;
            serde_json::from_str(&raw).context("failed to parse data file")?
        } else {
            tracing::warn!(path = %path.display(), "data file not found, creating a new one");
            Data::default()
        };

        let mut store = Self {
            data,
            path: Some(path),
            policy,
            dirty: !exists,
        };
        if !exists {
            store.write_snapshot()?;
        }
        Ok(store)
    }

    /// A store with no backing file. Flushes are no-ops.
    pub fn in_memory(data: Data) -> Self {
        Self {
            data,
            path: None,
            policy: FlushPolicy::WriteThrough,
            dirty: false,
        }
    }

    pub fn data(&self) -> &Data {
        &self.data
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Apply `f` to the document and commit it according to the flush policy.
    ///
    /// If `f` fails nothing is kept. If a write-through flush fails the document
    /// is restored to its prior state and the storage error is returned.
    pub fn mutate<T, F>(&mut self, f: F) -> Result<T, AppError>
    where
        F: FnOnce(&mut Data) -> Result<T, AppError>,
    {
        let before = self.data.clone();

        let out = match f(&mut self.data) {
            Ok(out) => out,
            Err(e) => {
                self.data = before;
                return Err(e);
            }
        };

        self.dirty = true;
        if self.policy == FlushPolicy::WriteThrough {
            if let Err(e) = self.flush() {
                self.data = before;
                self.dirty = false;
                return Err(e);
            }
        }
        Ok(out)
    }

    /// Persist the document if anything changed since the last flush.
    pub fn flush(&mut self) -> Result<(), AppError> {
        if !self.dirty {
            return Ok(());
        }
        self.write_snapshot()?;
        Ok(())
    }

    fn write_snapshot(&mut self) -> anyhow::Result<()> {
        let Some(path) = self.path.as_deref() else {
            self.dirty = false;
            return Ok(());
        };

        let bytes = serde_json::to_vec_pretty(&self.data).context("failed to serialize data")?;
        write_atomically(path, &bytes)?;

        self.dirty = false;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "store flushed");
        Ok(())
    }
}

fn write_atomically(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    fs::write(&tmp, bytes).with_context(|| format!("failed to write {}", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| format!("failed to replace {}", path.display()))?;
    Ok(())
}
