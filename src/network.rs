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

//! # Top-level Network module
//!
//! This module ties the topology and the RIB together and runs the
//! event-driven route propagation between the routers.

use log::*;
use serde::{Deserialize, Serialize};

use crate::{
    bgp::{ingress_local_pref, BgpEvent, BgpRoute, PREF_CUSTOMER},
    decision,
    rib::Rib,
    topology::{Relationship, Topology},
    types::{BgpId, NetworkError, Prefix, RouterId, ASN},
};

/// # Network struct
///
/// The simulator: a static [`Topology`] plus the [`Rib`] of every router.
/// Prefixes are originated with [`Network::announce_prefix`]; propagation then
/// runs synchronously and depth-first until every router's table is stable.
/// A router only fans out when its selected best route changed, and any
/// announcement whose AS path already contains the receiving AS is dropped,
/// which together guarantee termination.
///
/// ```rust
/// use rexford::prelude::*;
///
/// fn main() -> Result<(), NetworkError> {
///     let mut net = Network::default();
///     let r1 = net.add_router("r1", 1, 1);
///     let r2 = net.add_router("r2", 2, 2);
///     let r3 = net.add_router("r3", 3, 3);
///     net.add_provider_customer(r1, r2)?;
///     net.add_provider_customer(r1, r3)?;
///     net.add_peer_link(r2, r3)?;
///
///     let prefix = net.announce_prefix(r2)?;
///     assert_eq!(prefix, Prefix::new(2));
///
///     // r3 prefers the direct peer route over the one through its provider.
///     let best = net.decision_process(r3, prefix)?.expect("r3 learned the prefix");
///     assert_eq!(best.as_path, vec![ASN(2)]);
///     assert_eq!(best.local_pref, Some(PREF_PEER));
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Network {
    topology: Topology,
    rib: Rib,
}

impl Network {
    /// Generate an empty Network
    pub fn new() -> Self {
        Self::default()
    }

    /// The static topology.
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// The observable RIB state of every router.
    pub fn bgp_tables(&self) -> &Rib {
        &self.rib
    }

    /*
     * Topology construction
     */

    /// Register a router with its AS number and BGP identifier, and return
    /// its handle.
    pub fn add_router(
        &mut self,
        name: impl Into<String>,
        asn: impl Into<ASN>,
        bgp_id: impl Into<BgpId>,
    ) -> RouterId {
        let router = self.topology.add_router(name, asn, bgp_id);
        self.rib.add_router(router);
        router
    }

    /// Connect two routers of different ASes as peers (MED 0).
    pub fn add_peer_link(&mut self, a: RouterId, b: RouterId) -> Result<(), NetworkError> {
        self.topology.add_peer_link(a, b)
    }

    /// Connect two routers of different ASes as peers, with an explicit MED.
    pub fn add_peer_link_med(
        &mut self,
        a: RouterId,
        b: RouterId,
        med: u32,
    ) -> Result<(), NetworkError> {
        self.topology.add_peer_link_med(a, b, med)
    }

    /// Connect a provider to its customer (MED 0).
    pub fn add_provider_customer(
        &mut self,
        provider: RouterId,
        customer: RouterId,
    ) -> Result<(), NetworkError> {
        self.topology.add_provider_customer(provider, customer)
    }

    /// Connect a provider to its customer, with an explicit MED.
    pub fn add_provider_customer_med(
        &mut self,
        provider: RouterId,
        customer: RouterId,
        med: u32,
    ) -> Result<(), NetworkError> {
        self.topology
            .add_provider_customer_med(provider, customer, med)
    }

    /// Connect two routers of the same AS with the given IGP cost.
    pub fn add_internal_link(
        &mut self,
        a: RouterId,
        b: RouterId,
        cost: u32,
    ) -> Result<(), NetworkError> {
        self.topology.add_internal_link(a, b, cost)
    }

    /*
     * Origination and propagation
     */

    /// Originate the prefix of the router's AS: install the self route and
    /// announce it to every external neighbor. Routers of the originating AS
    /// itself learn nothing here; they only see prefixes that a border router
    /// redistributes after learning them externally.
    pub fn announce_prefix(&mut self, router: RouterId) -> Result<Prefix, NetworkError> {
        let asn = self.topology.asn_of(router)?;
        let bgp_id = self.topology.bgp_id_of(router)?;
        let route = BgpRoute::originate(asn, bgp_id);
        let prefix = route.prefix;
        debug!("{} originates {}", self.name(router), prefix);
        self.rib.insert(router, route.clone());
        let neighbors: Vec<(RouterId, u32)> = self
            .topology
            .external_neighbors(router)
            .map(|(n, _, med)| (n, med))
            .collect();
        for (neighbor, med) in neighbors {
            let announcement = BgpRoute {
                med,
                ..route.clone()
            };
            self.receive(neighbor, router, BgpEvent::Update(announcement))?;
        }
        Ok(prefix)
    }

    /// Deliver a BGP message to `local`, announced by its neighbor `from`.
    /// If the AS path of the carried route contains the AS of `local`, the
    /// message is dropped silently. Otherwise the router updates its table,
    /// re-runs the decision process, and fans out to its iBGP and eBGP
    /// neighbors whenever its selected best route changed.
    pub fn receive(
        &mut self,
        local: RouterId,
        from: RouterId,
        event: BgpEvent,
    ) -> Result<(), NetworkError> {
        let asn = self.topology.asn_of(local)?;
        if event.route().as_path.contains(&asn) {
            trace!(
                "{}: drop message from {} ({}: own AS on path)",
                self.name(local),
                self.name(from),
                event.route(),
            );
            return Ok(());
        }
        match event {
            BgpEvent::Update(route) => self.handle_update(local, from, route),
            BgpEvent::Withdraw(route) => self.handle_withdraw(local, from, route),
        }
    }

    /// Compute the best route of a router for a prefix.
    pub fn decision_process(
        &self,
        router: RouterId,
        prefix: Prefix,
    ) -> Result<Option<BgpRoute>, NetworkError> {
        decision::best_route(&self.topology, router, self.rib.routes(router, prefix))
    }

    /*
     * Serialization
     */

    /// Serialize the full simulator state to JSON.
    pub fn as_json(&self) -> Result<String, NetworkError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Restore a simulator from its JSON representation.
    pub fn from_json(json: &str) -> Result<Self, NetworkError> {
        Ok(serde_json::from_str(json)?)
    }

    /*
     * Private functions
     */

    fn handle_update(
        &mut self,
        local: RouterId,
        from: RouterId,
        route: BgpRoute,
    ) -> Result<(), NetworkError> {
        let asn = self.topology.asn_of(local)?;
        let local_addr = self.topology.address_of(local)?;
        let from_id = self.topology.bgp_id_of(from)?;
        let relation = if route.src.is_ibgp() {
            Relationship::Internal
        } else {
            self.topology.relation(local, from)?
        };
        let prefix = route.prefix;

        let prev_best = self.decision_process(local, prefix)?;
        let stored = BgpRoute {
            local_pref: ingress_local_pref(relation, route.local_pref),
            from_id: Some(from_id),
            ..route
        };
        self.rib.insert(local, stored.clone());
        let new_best = self.decision_process(local, prefix)?;
        if prev_best == new_best {
            return Ok(());
        }
        if let Some(best) = &new_best {
            debug!("{}: new best route {}", self.name(local), best);
        }

        // redistribute to the other routers of the AS
        let peers: Vec<RouterId> = self
            .topology
            .routers_in_as(asn)
            .filter(|r| *r != local)
            .collect();
        for peer in peers {
            if let Some(prev) = prev_best.as_ref().filter(|p| p.src.is_ebgp()) {
                self.receive(peer, local, BgpEvent::Withdraw(prev.ibgp_shadow(local_addr)))?;
            }
            if stored.src.is_ebgp() {
                self.receive(peer, local, BgpEvent::Update(stored.ibgp_shadow(local_addr)))?;
            }
        }

        // export over the eBGP sessions
        let externals: Vec<(RouterId, Relationship, u32)> =
            self.topology.external_neighbors(local).collect();
        for (neighbor, to_relation, med) in externals {
            if let Some(prev) = prev_best.as_ref() {
                self.receive(
                    neighbor,
                    local,
                    BgpEvent::Withdraw(prev.ebgp_shadow(local_addr, med)),
                )?;
            }
            if relation != Relationship::Customer && to_relation != Relationship::Customer {
                // routes learned from providers or peers go to customers only
                continue;
            }
            self.receive(
                neighbor,
                local,
                BgpEvent::Update(stored.ebgp_shadow(local_addr, med)),
            )?;
        }
        Ok(())
    }

    fn handle_withdraw(
        &mut self,
        local: RouterId,
        from: RouterId,
        route: BgpRoute,
    ) -> Result<(), NetworkError> {
        let asn = self.topology.asn_of(local)?;
        let local_addr = self.topology.address_of(local)?;
        let relation = if route.src.is_ibgp() {
            Relationship::Internal
        } else {
            self.topology.relation(local, from)?
        };
        // restore the local preference so the lookup matches the stored entry
        let route = BgpRoute {
            local_pref: ingress_local_pref(relation, route.local_pref),
            ..route
        };
        let prefix = route.prefix;

        let best = self.decision_process(local, prefix)?;
        if !self.rib.contains(local, &route) {
            return Ok(());
        }
        self.rib.remove(local, &route);
        if best.as_ref() != Some(&route) {
            return Ok(());
        }
        let Some(new_best) = self.decision_process(local, prefix)? else {
            // the prefix is gone entirely; nobody is informed
            return Ok(());
        };
        debug!(
            "{}: withdrew its best route for {}, falls back to {}",
            self.name(local),
            prefix,
            new_best,
        );

        // redistribute the fallback to the other routers of the AS
        let peers: Vec<RouterId> = self
            .topology
            .routers_in_as(asn)
            .filter(|r| *r != local)
            .collect();
        for peer in peers {
            if route.src.is_ebgp() {
                self.receive(peer, local, BgpEvent::Withdraw(route.ibgp_shadow(local_addr)))?;
            }
            if new_best.src.is_ebgp() {
                self.receive(
                    peer,
                    local,
                    BgpEvent::Update(new_best.ibgp_shadow(local_addr)),
                )?;
            }
        }

        // retract the old route over every eBGP session, and export the
        // fallback where the policy allows it
        let externals: Vec<(RouterId, Relationship, u32)> =
            self.topology.external_neighbors(local).collect();
        for (neighbor, to_relation, med) in externals {
            self.receive(
                neighbor,
                local,
                BgpEvent::Withdraw(route.ebgp_shadow(local_addr, med)),
            )?;
            if new_best.local_pref != Some(PREF_CUSTOMER) && to_relation != Relationship::Customer {
                // only customer-learned routes may go to providers and peers
                continue;
            }
            self.receive(
                neighbor,
                local,
                BgpEvent::Update(new_best.ebgp_shadow(local_addr, med)),
            )?;
        }
        Ok(())
    }

    fn name(&self, router: RouterId) -> &str {
        self.topology.name_of(router).unwrap_or("?")
    }
}
