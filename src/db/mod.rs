pub mod store;

pub use store::{Data, FlushPolicy, Store};

use std::path::Path;

use anyhow::Context;

pub fn init_store(path: impl AsRef<Path>, policy: FlushPolicy) -> anyhow::Result<Store> {
    let path = path.as_ref();
    let store = Store::load(path, policy)
        .with_context(|| format!("failed to load data file {}", path.display()))?;

    let data = store.data();
    tracing::info!(
        path = %path.display(),
        carwashes = data.carwashes.len(),
        washbays = data.washbays.len(),
        appointments = data.appointments.len(),
        ?policy,
        "store loaded"
    );
    Ok(store)
}
