//! The ledger state every operation runs against.

use crate::bonus::BonusSchedule;
use crate::error::SchedulerError;
use crate::pool::{Pool, PoolId};
use crate::stake::Stake;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use yield_types::{Principal, SchedulerParams};

/// Snapshot format version written by [`LedgerState::to_snapshot`].
pub const SNAPSHOT_VERSION: u32 = 1;

/// All authoritative scheduler state: pools, stakes and bonus schedules.
///
/// Owned by exactly one writer. Operations live in the component modules
/// (`registry`, `bonus`, `ledger`) as methods on this type; each validates
/// every precondition before its first write.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerState {
    /// The only principal allowed to create, toggle and schedule pools.
    pub admin: Principal,
    pub params: SchedulerParams,
    pub(crate) next_pool_id: PoolId,
    pub(crate) pools: BTreeMap<PoolId, Pool>,
    pub(crate) stakes: BTreeMap<(PoolId, Principal), Stake>,
    pub(crate) schedules: BTreeMap<PoolId, Vec<BonusSchedule>>,
}

#[derive(Serialize)]
struct SnapshotRef<'a> {
    version: u32,
    state: &'a LedgerState,
}

#[derive(Deserialize)]
struct SnapshotOwned {
    version: u32,
    state: LedgerState,
}

impl LedgerState {
    pub fn new(admin: Principal, params: SchedulerParams) -> Self {
        Self {
            admin,
            params,
            next_pool_id: 1,
            pools: BTreeMap::new(),
            stakes: BTreeMap::new(),
            schedules: BTreeMap::new(),
        }
    }

    /// Fail with `NotAuthorized` unless `caller` is the admin.
    pub fn require_admin(&self, caller: &Principal) -> Result<(), SchedulerError> {
        if *caller == self.admin {
            Ok(())
        } else {
            Err(SchedulerError::NotAuthorized(caller.clone()))
        }
    }

    /// Look up a pool regardless of its active flag.
    pub fn pool(&self, pool_id: PoolId) -> Option<&Pool> {
        self.pools.get(&pool_id)
    }

    /// Look up a pool for a staker operation: inactive pools are not found.
    pub fn active_pool(&self, pool_id: PoolId) -> Result<&Pool, SchedulerError> {
        self.pools
            .get(&pool_id)
            .filter(|p| p.active)
            .ok_or(SchedulerError::PoolNotFound(pool_id))
    }

    pub fn pools(&self) -> impl Iterator<Item = &Pool> {
        self.pools.values()
    }

    pub fn stake_of(&self, pool_id: PoolId, staker: &Principal) -> Option<&Stake> {
        self.stakes.get(&(pool_id, staker.clone()))
    }

    /// Every stake in a pool, ordered by staker.
    pub fn stakes_in(&self, pool_id: PoolId) -> impl Iterator<Item = (&Principal, &Stake)> {
        self.stakes
            .iter()
            .filter(move |((id, _), _)| *id == pool_id)
            .map(|((_, staker), stake)| (staker, stake))
    }

    /// Bonus schedules of a pool in insertion order.
    pub fn schedules(&self, pool_id: PoolId) -> &[BonusSchedule] {
        self.schedules
            .get(&pool_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Serialize the full state with a version header.
    pub fn to_snapshot(&self) -> Result<Vec<u8>, SchedulerError> {
        bincode::serialize(&SnapshotRef {
            version: SNAPSHOT_VERSION,
            state: self,
        })
        .map_err(|e| SchedulerError::Snapshot(e.to_string()))
    }

    /// Restore state written by [`LedgerState::to_snapshot`].
    pub fn from_snapshot(bytes: &[u8]) -> Result<Self, SchedulerError> {
        let snapshot: SnapshotOwned =
            bincode::deserialize(bytes).map_err(|e| SchedulerError::Snapshot(e.to_string()))?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(SchedulerError::Snapshot(format!(
                "unsupported snapshot version {} (expected {})",
                snapshot.version, SNAPSHOT_VERSION
            )));
        }
        Ok(snapshot.state)
    }
}
