//! Snapshot file persistence for the CLI.

use anyhow::Context;
use std::path::Path;
use yield_scheduler::LedgerState;
use yield_types::{Principal, SchedulerParams};

/// Load the ledger from `path`, or start an empty one owned by `admin` when
/// the file does not exist yet. An existing snapshot keeps its own admin and
/// parameters; differing configured values are logged and ignored.
pub fn load_or_init(
    path: &Path,
    admin: &Principal,
    params: &SchedulerParams,
) -> anyhow::Result<LedgerState> {
    if !path.exists() {
        tracing::info!(path = %path.display(), admin = %admin, "starting a new ledger");
        return Ok(LedgerState::new(admin.clone(), params.clone()));
    }
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let state = LedgerState::from_snapshot(&bytes)
        .with_context(|| format!("failed to decode {}", path.display()))?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "ledger loaded");
    for field in ignored_settings(&state, admin, params) {
        tracing::warn!(
            path = %path.display(),
            field,
            "configured value differs from the snapshot and is ignored"
        );
    }
    Ok(state)
}

/// Config fields that an existing snapshot overrides.
pub fn ignored_settings(
    state: &LedgerState,
    admin: &Principal,
    params: &SchedulerParams,
) -> Vec<&'static str> {
    let mut fields = Vec::new();
    if state.admin != *admin {
        fields.push("admin");
    }
    if state.params != *params {
        fields.push("params");
    }
    fields
}

/// Write the ledger to `path` through a sibling temp file and a rename, so
/// an interrupted write never leaves a truncated snapshot behind.
pub fn save(path: &Path, state: &LedgerState) -> anyhow::Result<()> {
    let bytes = state.to_snapshot()?;
    let tmp = path.with_extension("tmp");
    std::fs::write(&tmp, &bytes).with_context(|| format!("failed to write {}", tmp.display()))?;
    std::fs::rename(&tmp, path)
        .with_context(|| format!("failed to replace {}", path.display()))?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "ledger saved");
    Ok(())
}
