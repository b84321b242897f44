// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Build backend: services dispatched build actions.
//!
//! The backend is the only writer of the build store. Watchers learn about
//! lookup and creation results through the store's change notifications.

use async_trait::async_trait;
use bw_core::{Branch, Build, BuildAction, BuildKey, CommitId, Repo};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::store::MemoryBuildStore;

/// Errors reported by a build service
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("build service unavailable: {0}")]
    Unavailable(String),
    #[error("build request rejected: {0}")]
    Rejected(String),
}

/// Remote side of the build system: looks builds up and enqueues new ones.
#[async_trait]
pub trait BuildService: Clone + Send + Sync + 'static {
    /// All builds for a commit, in any order
    async fn newest_builds(&self, key: &BuildKey) -> Result<Vec<Build>, ServiceError>;

    /// Enqueue a build for a commit and return it
    async fn create_build(
        &self,
        repo: &Repo,
        commit_id: &CommitId,
        branch: Option<&Branch>,
    ) -> Result<Build, ServiceError>;
}

/// Consumes build actions and writes their results into the store
pub struct BuildBackend<S> {
    service: S,
    store: MemoryBuildStore,
}

impl<S: BuildService> BuildBackend<S> {
    pub fn new(service: S, store: MemoryBuildStore) -> Self {
        Self { service, store }
    }

    /// Service one action. Failures are recorded in the store (lookups) or
    /// logged (creation); they never stop the backend.
    pub async fn handle(&self, action: BuildAction) {
        match action {
            BuildAction::WantNewestBuildForCommit { repo, commit_id, force } => {
                let key = BuildKey::new(repo, commit_id);
                if !force && self.store.is_loaded(&key) {
                    tracing::debug!(%key, "skipping lookup, already loaded");
                    return;
                }
                match self.service.newest_builds(&key).await {
                    Ok(builds) => {
                        tracing::debug!(%key, count = builds.len(), "lookup complete");
                        self.store.put_builds(key, builds);
                    }
                    Err(e) => {
                        tracing::warn!(%key, error = %e, "lookup failed");
                        self.store.put_failure(key, e.to_string());
                    }
                }
            }
            BuildAction::CreateBuild { repo, commit_id, branch } => {
                match self.service.create_build(&repo, &commit_id, branch.as_ref()).await {
                    Ok(build) => {
                        tracing::info!(%repo, commit = %commit_id, build = %build.id, "build created");
                        self.store.upsert_build(build);
                    }
                    Err(e) => {
                        tracing::error!(%repo, commit = %commit_id, error = %e, "build creation failed");
                    }
                }
            }
        }
    }

    /// Service actions until the channel closes or `cancel` fires.
    pub async fn run(self, mut actions: mpsc::UnboundedReceiver<BuildAction>, cancel: CancellationToken) {
        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                action = actions.recv() => match action {
                    Some(action) => self.handle(action).await,
                    None => break,
                },
            }
        }
        tracing::debug!("build backend stopped");
    }

    pub fn spawn(
        self,
        actions: mpsc::UnboundedReceiver<BuildAction>,
        cancel: CancellationToken,
    ) -> JoinHandle<()> {
        tokio::spawn(self.run(actions, cancel))
    }
}

#[cfg(test)]
#[path = "backend_tests.rs"]
mod tests;
