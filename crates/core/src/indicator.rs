// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Indicator state for a rendering surface.
//!
//! Carries what a status badge needs (status, title, link) and nothing
//! about how it looks.

use serde::Serialize;

use crate::build::{BuildId, BuildStatus};
use crate::id::Repo;
use crate::lookup::BuildLookup;

/// Title offered when a missing build can be requested.
pub const BUILD_THIS_VERSION: &str = "Build this version";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "indicator", rename_all = "snake_case")]
pub enum Indicator {
    /// Lookup pending or failed; nothing to show
    NotAvailable,
    /// No build exists. `buildable` says whether one may be requested.
    Missing { buildable: bool },
    Build { id: BuildId, status: BuildStatus, title: String, path: String },
}

impl Indicator {
    pub fn derive(repo: &Repo, lookup: &BuildLookup, buildable: bool) -> Self {
        match lookup {
            BuildLookup::Loading | BuildLookup::Failed { .. } => Indicator::NotAvailable,
            BuildLookup::Empty => Indicator::Missing { buildable },
            BuildLookup::Found(build) => {
                let status = build.status();
                Indicator::Build {
                    id: build.id,
                    status,
                    title: format!("Build #{} {}", build.id, status),
                    path: build_path(repo, build.id),
                }
            }
        }
    }

    /// Hover title, if the indicator has one
    pub fn title(&self) -> Option<&str> {
        match self {
            Indicator::NotAvailable => None,
            Indicator::Missing { buildable } => buildable.then_some(BUILD_THIS_VERSION),
            Indicator::Build { title, .. } => Some(title),
        }
    }
}

/// Site path of a build's detail page.
pub fn build_path(repo: &Repo, id: BuildId) -> String {
    format!("/{}/.builds/{}", repo, id)
}

impl std::fmt::Display for Indicator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Indicator::NotAvailable => f.write_str("not available"),
            Indicator::Missing { buildable: true } => write!(f, "no build ({BUILD_THIS_VERSION})"),
            Indicator::Missing { buildable: false } => f.write_str("no build"),
            Indicator::Build { title, path, .. } => write!(f, "{title} {path}"),
        }
    }
}

#[cfg(test)]
#[path = "indicator_tests.rs"]
mod tests;
