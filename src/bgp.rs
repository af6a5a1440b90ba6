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

//! Module containing definitions for BGP routes and messages

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{
    topology::Relationship,
    types::{BgpId, NextHop, Prefix, ASN},
};

/// Local preference assigned to routes learned from a provider.
pub const PREF_PROVIDER: u32 = 50;
/// Local preference assigned to routes learned from a peer.
pub const PREF_PEER: u32 = 100;
/// Local preference assigned to routes learned from a customer.
pub const PREF_CUSTOMER: u32 = 150;
/// Local preference of a self-originated route. Dominates every learned one.
pub const PREF_SELF: u32 = 1000;

/// Compute the local preference a router assigns on ingress, given the
/// relationship towards the announcing neighbor. Routes crossing an iBGP
/// session keep the preference stamped by the border router.
pub fn ingress_local_pref(relation: Relationship, carried: Option<u32>) -> Option<u32> {
    match relation {
        Relationship::Provider => Some(PREF_PROVIDER),
        Relationship::Peer => Some(PREF_PEER),
        Relationship::Customer => Some(PREF_CUSTOMER),
        Relationship::Internal => carried,
    }
}

/// The kind of session a route was learned over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RouteSource {
    /// Learned from a router in a different AS.
    EBgp,
    /// Learned from a border router of the own AS.
    IBgp,
}

impl RouteSource {
    /// returns true if the route was learned over an eBGP session
    pub fn is_ebgp(&self) -> bool {
        matches!(self, Self::EBgp)
    }

    /// returns true if the route was learned over an iBGP session
    pub fn is_ibgp(&self) -> bool {
        !self.is_ebgp()
    }
}

impl Default for RouteSource {
    fn default() -> Self {
        Self::EBgp
    }
}

impl std::fmt::Display for RouteSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RouteSource::EBgp => write!(f, "eBGP"),
            RouteSource::IBgp => write!(f, "iBGP"),
        }
    }
}

/// Bgp Route
///
/// Routes are value types: two routes are the same entry if and only if all
/// seven fields agree. This equality governs both set membership in the RIB
/// and the matching of withdrawals.
///
/// The derived ordering is purely structural. It keeps route sets in a stable
/// iteration order and must never be read as route preference, which is
/// computed by [`crate::decision::best_route`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BgpRoute {
    /// The destination prefix.
    pub prefix: Prefix,
    /// Address of the router to forward to for this route.
    pub next_hop: NextHop,
    /// AS path, where the origin of the route is last and every AS crossed
    /// over eBGP prepends itself.
    pub as_path: Vec<ASN>,
    /// LOCAL-PREF. `None` on routes in flight towards an eBGP neighbor; the
    /// receiver assigns it on ingress from the commercial relationship.
    pub local_pref: Option<u32>,
    /// MED (Multi-Exit Discriminator), taken from the edge the announcement
    /// crossed.
    pub med: u32,
    /// Identifier of the neighbor that announced the route to the local
    /// router. `None` for a self-originated route.
    pub from_id: Option<BgpId>,
    /// The kind of session the route was learned over.
    pub src: RouteSource,
}

impl BgpRoute {
    /// The route a router installs for the prefix of its own AS.
    pub fn originate(asn: ASN, id: BgpId) -> Self {
        Self {
            prefix: Prefix(asn),
            next_hop: NextHop { asn, id },
            as_path: vec![asn],
            local_pref: Some(PREF_SELF),
            med: 0,
            from_id: None,
            src: RouteSource::EBgp,
        }
    }

    /// returns true if the route was installed by the local router itself
    pub fn is_self_originated(&self) -> bool {
        self.from_id.is_none()
    }

    /// The copy of this route that a border router redistributes to the other
    /// routers of its AS: the next-hop moves to the border router and the
    /// source becomes iBGP, while the AS path, the stamped local preference,
    /// and the MED are carried along unchanged.
    pub fn ibgp_shadow(&self, local: NextHop) -> Self {
        Self {
            prefix: self.prefix,
            next_hop: local,
            as_path: self.as_path.clone(),
            local_pref: self.local_pref,
            med: self.med,
            from_id: Some(local.id),
            src: RouteSource::IBgp,
        }
    }

    /// The copy of this route that a router exports over an eBGP session: the
    /// next-hop moves to the local router, the own AS is prepended to the
    /// path, and the MED is the attribute of the traversed edge. The local
    /// preference and announcing neighbor are left unset, the receiver stamps
    /// them on ingress.
    pub fn ebgp_shadow(&self, local: NextHop, med: u32) -> Self {
        let mut as_path = Vec::with_capacity(self.as_path.len() + 1);
        as_path.push(local.asn);
        as_path.extend_from_slice(&self.as_path);
        Self {
            prefix: self.prefix,
            next_hop: local,
            as_path,
            local_pref: None,
            med,
            from_id: None,
            src: RouteSource::EBgp,
        }
    }
}

impl std::fmt::Display for BgpRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} via {} (path {}, med {})",
            self.prefix,
            self.next_hop,
            self.as_path.iter().join(":"),
            self.med,
        )
    }
}

/// BGP Events
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BgpEvent {
    /// Advertise a route, or add a new one.
    Update(BgpRoute),
    /// Retract a previously advertised route. The withdrawal only takes
    /// effect if the receiver holds an entry equal to the carried route.
    Withdraw(BgpRoute),
}

impl BgpEvent {
    /// The route this event carries.
    pub fn route(&self) -> &BgpRoute {
        match self {
            Self::Update(r) | Self::Withdraw(r) => r,
        }
    }

    /// Returns the prefix for which this event is responsible
    pub fn prefix(&self) -> Prefix {
        self.route().prefix
    }
}
