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

//! The static topology: routers, their AS membership, commercial
//! relationships with per-edge MED attributes, and weighted internal links.

use std::collections::BTreeMap;

use petgraph::stable_graph::StableDiGraph;
use serde::{Deserialize, Serialize};

use crate::{
    igp::IgpGraph,
    types::{BgpId, IndexType, NetworkError, NetworkErrorOption, NextHop, RouterId, ASN},
};

/// Role of the target router of a directed adjacency, as seen from the source
/// router. The two directions of an edge are always paired: if `b` is the
/// customer of `a`, then `a` is the provider of `b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Relationship {
    /// The neighbor sells transit to the local router.
    Provider,
    /// The neighbor buys transit from the local router.
    Customer,
    /// Settlement-free peering.
    Peer,
    /// The neighbor belongs to the same AS.
    Internal,
}

impl Relationship {
    /// The role of the source router as seen from the target.
    pub fn reverse(self) -> Self {
        match self {
            Self::Provider => Self::Customer,
            Self::Customer => Self::Provider,
            Self::Peer => Self::Peer,
            Self::Internal => Self::Internal,
        }
    }
}

impl std::fmt::Display for Relationship {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Provider => write!(f, "provider"),
            Self::Customer => write!(f, "customer"),
            Self::Peer => write!(f, "peer"),
            Self::Internal => write!(f, "internal"),
        }
    }
}

/// Attributes of a router in the topology.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouterData {
    name: String,
    asn: ASN,
    bgp_id: BgpId,
}

/// Attributes of a directed adjacency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinkData {
    /// Edge towards a router of another AS, carrying the commercial role of
    /// the target and the MED hint announced over this edge.
    External {
        /// Role of the target router as seen from the source.
        relation: Relationship,
        /// MED attribute stamped on announcements crossing this edge.
        med: u32,
    },
    /// Edge towards a router of the same AS, carrying an IGP cost.
    Internal {
        /// Administrative cost of the adjacency.
        cost: u32,
    },
}

/// The static network layout. Routers and relationship edges live in one
/// directed graph; each AS additionally owns its internal-only weighted graph
/// for IGP distance queries.
///
/// Neighbor and AS-membership iteration follow the insertion order of the
/// `add_*` calls. The propagation engine relies on this order being stable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Topology {
    graph: StableDiGraph<RouterData, LinkData, IndexType>,
    adjacency: BTreeMap<RouterId, Vec<RouterId>>,
    members: BTreeMap<ASN, Vec<RouterId>>,
    igp: BTreeMap<ASN, IgpGraph>,
}

impl Topology {
    /// Register a router with its AS number and BGP identifier, and return
    /// its handle.
    pub fn add_router(
        &mut self,
        name: impl Into<String>,
        asn: impl Into<ASN>,
        bgp_id: impl Into<BgpId>,
    ) -> RouterId {
        let asn = asn.into();
        let bgp_id = bgp_id.into();
        let router = self.graph.add_node(RouterData {
            name: name.into(),
            asn,
            bgp_id,
        });
        self.adjacency.entry(router).or_default();
        self.members.entry(asn).or_default().push(router);
        self.igp.entry(asn).or_default().add_router(bgp_id);
        router
    }

    /// Connect two routers of different ASes as peers (MED 0).
    pub fn add_peer_link(&mut self, a: RouterId, b: RouterId) -> Result<(), NetworkError> {
        self.add_peer_link_med(a, b, 0)
    }

    /// Connect two routers of different ASes as peers, with an explicit MED.
    pub fn add_peer_link_med(
        &mut self,
        a: RouterId,
        b: RouterId,
        med: u32,
    ) -> Result<(), NetworkError> {
        self.add_link_pair(
            a,
            b,
            LinkData::External {
                relation: Relationship::Peer,
                med,
            },
            LinkData::External {
                relation: Relationship::Peer,
                med,
            },
        )
    }

    /// Connect a provider to its customer (MED 0).
    pub fn add_provider_customer(
        &mut self,
        provider: RouterId,
        customer: RouterId,
    ) -> Result<(), NetworkError> {
        self.add_provider_customer_med(provider, customer, 0)
    }

    /// Connect a provider to its customer, with an explicit MED.
    pub fn add_provider_customer_med(
        &mut self,
        provider: RouterId,
        customer: RouterId,
        med: u32,
    ) -> Result<(), NetworkError> {
        self.add_link_pair(
            provider,
            customer,
            LinkData::External {
                relation: Relationship::Customer,
                med,
            },
            LinkData::External {
                relation: Relationship::Provider,
                med,
            },
        )
    }

    /// Connect two routers of the same AS with the given IGP cost (at least
    /// 1). Fails with [`NetworkError::CrossAsInternalLink`] if the routers
    /// belong to different ASes.
    pub fn add_internal_link(
        &mut self,
        a: RouterId,
        b: RouterId,
        cost: u32,
    ) -> Result<(), NetworkError> {
        let asn_a = self.asn_of(a)?;
        let asn_b = self.asn_of(b)?;
        if asn_a != asn_b {
            return Err(NetworkError::CrossAsInternalLink(a, b));
        }
        self.add_link_pair(
            a,
            b,
            LinkData::Internal { cost },
            LinkData::Internal { cost },
        )?;
        let id_a = self.bgp_id_of(a)?;
        let id_b = self.bgp_id_of(b)?;
        if let Some(igp) = self.igp.get_mut(&asn_a) {
            igp.add_link(id_a, id_b, cost);
        }
        Ok(())
    }

    fn add_link_pair(
        &mut self,
        a: RouterId,
        b: RouterId,
        ab: LinkData,
        ba: LinkData,
    ) -> Result<(), NetworkError> {
        self.router_data(a)?;
        self.router_data(b)?;
        self.graph.update_edge(a, b, ab);
        self.graph.update_edge(b, a, ba);
        self.register_neighbor(a, b);
        self.register_neighbor(b, a);
        Ok(())
    }

    fn register_neighbor(&mut self, router: RouterId, neighbor: RouterId) {
        let adj = self.adjacency.entry(router).or_default();
        if !adj.contains(&neighbor) {
            adj.push(neighbor);
        }
    }

    fn router_data(&self, router: RouterId) -> Result<&RouterData, NetworkError> {
        self.graph.node_weight(router).or_router_not_found(router)
    }

    /// The AS number of a router.
    pub fn asn_of(&self, router: RouterId) -> Result<ASN, NetworkError> {
        Ok(self.router_data(router)?.asn)
    }

    /// The BGP identifier of a router.
    pub fn bgp_id_of(&self, router: RouterId) -> Result<BgpId, NetworkError> {
        Ok(self.router_data(router)?.bgp_id)
    }

    /// The name of a router.
    pub fn name_of(&self, router: RouterId) -> Result<&str, NetworkError> {
        Ok(&self.router_data(router)?.name)
    }

    /// The `10.0.<AS>.<id>` address of a router.
    pub fn address_of(&self, router: RouterId) -> Result<NextHop, NetworkError> {
        let data = self.router_data(router)?;
        Ok(NextHop {
            asn: data.asn,
            id: data.bgp_id,
        })
    }

    /// Look up a router by name. If multiple routers share the name, the
    /// first registered one is returned.
    pub fn router_id(&self, name: impl AsRef<str>) -> Result<RouterId, NetworkError> {
        self.graph
            .node_indices()
            .find(|r| {
                self.graph
                    .node_weight(*r)
                    .map(|d| d.name == name.as_ref())
                    .unwrap_or(false)
            })
            .ok_or_else(|| NetworkError::DeviceNameNotFound(name.as_ref().to_string()))
    }

    /// The role of `to` as seen from `from`. Fails if the routers are not
    /// adjacent.
    pub fn relation(&self, from: RouterId, to: RouterId) -> Result<Relationship, NetworkError> {
        let edge = self.graph.find_edge(from, to).or_link_not_found(from, to)?;
        match self.graph.edge_weight(edge).or_link_not_found(from, to)? {
            LinkData::External { relation, .. } => Ok(*relation),
            LinkData::Internal { .. } => Ok(Relationship::Internal),
        }
    }

    /// The MED attribute of the edge from `from` to `to` (0 on internal
    /// edges). Fails if the routers are not adjacent.
    pub fn med(&self, from: RouterId, to: RouterId) -> Result<u32, NetworkError> {
        let edge = self.graph.find_edge(from, to).or_link_not_found(from, to)?;
        match self.graph.edge_weight(edge).or_link_not_found(from, to)? {
            LinkData::External { med, .. } => Ok(*med),
            LinkData::Internal { .. } => Ok(0),
        }
    }

    /// All ASes of the topology, in ascending order.
    pub fn ases(&self) -> impl Iterator<Item = ASN> + '_ {
        self.members.keys().copied()
    }

    /// The routers of an AS, in registration order.
    pub fn routers_in_as(&self, asn: ASN) -> impl Iterator<Item = RouterId> + '_ {
        self.members.get(&asn).into_iter().flatten().copied()
    }

    /// All routers, in registration order per AS.
    pub fn routers(&self) -> impl Iterator<Item = RouterId> + '_ {
        self.members.values().flatten().copied()
    }

    /// Number of registered routers.
    pub fn num_routers(&self) -> usize {
        self.graph.node_count()
    }

    /// The external neighbors of a router with the relationship towards them
    /// and the per-edge MED, in link registration order.
    pub fn external_neighbors(
        &self,
        router: RouterId,
    ) -> impl Iterator<Item = (RouterId, Relationship, u32)> + '_ {
        self.neighbor_links(router)
            .filter_map(|(n, link)| match link {
                LinkData::External { relation, med } => Some((n, relation, med)),
                LinkData::Internal { .. } => None,
            })
    }

    /// The internal neighbors of a router with the IGP cost of the adjacency,
    /// in link registration order.
    pub fn igp_neighbors(
        &self,
        router: RouterId,
    ) -> impl Iterator<Item = (RouterId, u32)> + '_ {
        self.neighbor_links(router)
            .filter_map(|(n, link)| match link {
                LinkData::Internal { cost } => Some((n, cost)),
                LinkData::External { .. } => None,
            })
    }

    fn neighbor_links(
        &self,
        router: RouterId,
    ) -> impl Iterator<Item = (RouterId, LinkData)> + '_ {
        self.adjacency
            .get(&router)
            .into_iter()
            .flatten()
            .copied()
            .filter_map(move |n| {
                self.graph
                    .find_edge(router, n)
                    .and_then(|e| self.graph.edge_weight(e))
                    .map(|link| (n, *link))
            })
    }

    /// The internal graph of an AS.
    pub fn igp_graph(&self, asn: ASN) -> Option<&IgpGraph> {
        self.igp.get(&asn)
    }

    /// Shortest-path distance (in hops, see [`IgpGraph::distance`]) from a
    /// router to a next-hop address inside its own AS. Fails with
    /// [`NetworkError::NoIgpRoute`] if the address lies in another AS or is
    /// unreachable.
    pub fn igp_distance(&self, router: RouterId, next_hop: NextHop) -> Result<usize, NetworkError> {
        let data = self.router_data(router)?;
        if next_hop.asn == data.asn {
            if let Some(d) = self
                .igp
                .get(&data.asn)
                .and_then(|igp| igp.distance(data.bgp_id, next_hop.id))
            {
                return Ok(d);
            }
        }
        Err(NetworkError::NoIgpRoute(router, next_hop))
    }
}
