// Rexford: BGP control-plane simulator written in Rust
// Copyright 2024-2026 The Rexford developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The Routing Information Base: every router's set of candidate routes.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::{
    bgp::BgpRoute,
    types::{Prefix, RouterId},
};

/// Per-router table of candidate routes.
pub type BgpTable = BTreeMap<Prefix, BTreeSet<BgpRoute>>;

/// The candidate routes of every router, keyed by router and prefix. Routes
/// form sets, so re-learning an identical route is a no-op, and a withdrawal
/// only removes an exactly matching entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rib {
    tables: BTreeMap<RouterId, BgpTable>,
}

impl Rib {
    /// Create the (empty) table of a newly registered router.
    pub(crate) fn add_router(&mut self, router: RouterId) {
        self.tables.entry(router).or_default();
    }

    /// Add a route to the router's table. Returns `false` if the identical
    /// route was already present.
    pub(crate) fn insert(&mut self, router: RouterId, route: BgpRoute) -> bool {
        self.tables
            .entry(router)
            .or_default()
            .entry(route.prefix)
            .or_default()
            .insert(route)
    }

    /// Remove an exactly matching route. Returns `false` if no such entry
    /// exists.
    pub(crate) fn remove(&mut self, router: RouterId, route: &BgpRoute) -> bool {
        self.tables
            .get_mut(&router)
            .and_then(|table| table.get_mut(&route.prefix))
            .map(|routes| routes.remove(route))
            .unwrap_or(false)
    }

    /// Check whether the router holds an exactly matching entry.
    pub fn contains(&self, router: RouterId, route: &BgpRoute) -> bool {
        self.tables
            .get(&router)
            .and_then(|table| table.get(&route.prefix))
            .map(|routes| routes.contains(route))
            .unwrap_or(false)
    }

    /// The candidate routes of a router for one prefix. Empty if the router
    /// or prefix is unknown.
    pub fn routes(
        &self,
        router: RouterId,
        prefix: Prefix,
    ) -> impl Iterator<Item = &BgpRoute> + '_ {
        self.tables
            .get(&router)
            .and_then(|table| table.get(&prefix))
            .into_iter()
            .flatten()
    }

    /// The full table of a router, or `None` if the router is unknown.
    pub fn table(&self, router: RouterId) -> Option<&BgpTable> {
        self.tables.get(&router)
    }

    /// All tables, keyed by router.
    pub fn tables(&self) -> &BTreeMap<RouterId, BgpTable> {
        &self.tables
    }
}
