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

//! Per-AS interior routing state, answering distance queries towards the
//! next-hop of iBGP-learned routes.

use std::collections::BTreeMap;

use petgraph::algo::astar;
use petgraph::graph::{NodeIndex, UnGraph};
use serde::{Deserialize, Serialize};

use crate::types::{BgpId, IndexType};

/// The weighted adjacency of the routers inside one AS. Every router of the
/// AS is a vertex, whether or not it has internal links.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IgpGraph {
    graph: UnGraph<BgpId, u32, IndexType>,
    nodes: BTreeMap<BgpId, NodeIndex<IndexType>>,
}

impl IgpGraph {
    /// Register a router of the AS. Idempotent.
    pub(crate) fn add_router(&mut self, id: BgpId) {
        if !self.nodes.contains_key(&id) {
            let node = self.graph.add_node(id);
            self.nodes.insert(id, node);
        }
    }

    /// Add (or re-weight) the link between two routers of the AS.
    pub(crate) fn add_link(&mut self, a: BgpId, b: BgpId, cost: u32) {
        self.add_router(a);
        self.add_router(b);
        let na = self.nodes[&a];
        let nb = self.nodes[&b];
        self.graph.update_edge(na, nb, cost);
    }

    /// The number of vertices on the minimum-cost path between two routers,
    /// or `None` if the target is unreachable. A router is at distance 1 from
    /// itself. Note that paths are ranked by cost, so a cheap detour beats a
    /// direct but expensive link, and the distance is the length of whichever
    /// path wins.
    pub fn distance(&self, from: BgpId, to: BgpId) -> Option<usize> {
        let from = *self.nodes.get(&from)?;
        let to = *self.nodes.get(&to)?;
        let (_, path) = astar(&self.graph, from, |n| n == to, |e| *e.weight(), |_| 0)?;
        Some(path.len())
    }

    /// Number of routers in the AS.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if no router was registered yet.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
