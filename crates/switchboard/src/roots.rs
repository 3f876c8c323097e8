//! Workspace roots advertised to the peer.

use crate::types::Root;

/// Append-only list of roots. Duplicates are kept.
#[derive(Debug, Default, Clone)]
pub struct RootsManager {
    roots: Vec<Root>,
}

impl RootsManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, root: Root) {
        tracing::debug!("Registering root {}", root.uri);
        self.roots.push(root);
    }

    pub fn list(&self) -> Vec<Root> {
        self.roots.clone()
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}
