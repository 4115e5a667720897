// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Authenticated console sessions

use parking_lot::RwLock;
use std::collections::HashSet;

/// Set of session ids that passed the console login
pub trait SessionStore: Send + Sync {
    fn authenticate(&self, session_id: &str);

    fn invalidate(&self, session_id: &str);

    fn is_authenticated(&self, session_id: &str) -> bool;
}

/// Process-local session store
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashSet<String>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }
}

impl SessionStore for InMemorySessionStore {
    fn authenticate(&self, session_id: &str) {
        self.sessions.write().insert(session_id.to_string());
    }

    fn invalidate(&self, session_id: &str) {
        self.sessions.write().remove(session_id);
    }

    fn is_authenticated(&self, session_id: &str) -> bool {
        self.sessions.read().contains(session_id)
    }
}
