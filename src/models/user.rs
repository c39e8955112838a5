//! Identity handed to the core by the authentication layer

use serde::{Deserialize, Serialize};

/// The librarian (or patron) on whose behalf an operation runs.
///
/// The identity provider resolves permissions before calling into the core;
/// `can_mark_returned` carries the renew/return capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActingUser {
    pub id: i32,
    pub can_mark_returned: bool,
}

impl ActingUser {
    pub fn librarian(id: i32) -> Self {
        Self {
            id,
            can_mark_returned: true,
        }
    }

    pub fn patron(id: i32) -> Self {
        Self {
            id,
            can_mark_returned: false,
        }
    }
}
