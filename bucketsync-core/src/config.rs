//! Sync session configuration.

use crate::types::ObjectAcl;
use serde::{Deserialize, Serialize};

/// Content classification stamped on uploads unless configured otherwise.
pub const DEFAULT_CONTENT_TYPE: &str = "text/plain";

/// Immutable settings for one sync session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Always transfer, bypassing the digest comparison.
    pub force: bool,

    /// Access-control level applied to uploaded objects.
    pub acl: ObjectAcl,

    /// Content type sent with uploaded objects.
    pub content_type: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            force: false,
            acl: ObjectAcl::Private,
            content_type: DEFAULT_CONTENT_TYPE.to_string(),
        }
    }
}

impl SyncConfig {
    /// Default settings with the force flag set.
    pub fn forced() -> Self {
        Self {
            force: true,
            ..Self::default()
        }
    }

    pub fn with_acl(mut self, acl: ObjectAcl) -> Self {
        self.acl = acl;
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }
}
