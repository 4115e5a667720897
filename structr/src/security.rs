// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Security context carried through function calls and resource requests

use serde::{Deserialize, Serialize};

/// Identity of the caller on whose behalf an operation runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityContext {
    pub user: Option<String>,
    pub super_user: bool,
}

impl SecurityContext {
    /// Context with unrestricted access, used for internal operations
    pub fn super_user() -> Self {
        Self {
            user: Some("superadmin".to_string()),
            super_user: true,
        }
    }

    pub fn anonymous() -> Self {
        Self {
            user: None,
            super_user: false,
        }
    }

    pub fn for_user(user: impl Into<String>) -> Self {
        Self {
            user: Some(user.into()),
            super_user: false,
        }
    }

    pub fn is_anonymous(&self) -> bool {
        self.user.is_none()
    }
}

impl Default for SecurityContext {
    fn default() -> Self {
        Self::anonymous()
    }
}
