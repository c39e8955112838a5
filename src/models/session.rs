//! Per-session state owned by the caller's session store

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    #[serde(default)]
    pub num_visits: u64,
}

/// Result of counting a visit: the value to display and the state to persist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VisitTally {
    pub current: u64,
    pub next_state: SessionState,
}
