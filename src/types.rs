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

//! Module containing all type definitions

use petgraph::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub(crate) type IndexType = u32;
/// Router Identification (and index into the topology graph)
pub type RouterId = NodeIndex<IndexType>;

/// AS Number
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ASN(pub u32);

impl std::fmt::Display for ASN {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AS{}", self.0)
    }
}

impl From<u32> for ASN {
    fn from(x: u32) -> Self {
        Self(x)
    }
}

impl From<u64> for ASN {
    fn from(x: u64) -> Self {
        Self(x as u32)
    }
}

impl From<usize> for ASN {
    fn from(x: usize) -> Self {
        Self(x as u32)
    }
}

impl From<i32> for ASN {
    fn from(x: i32) -> Self {
        Self(x as u32)
    }
}

/// BGP identifier of a router, unique within its AS. It doubles as the final
/// tiebreaker of the decision process, where the identifier of the announcing
/// neighbor decides between otherwise equal routes.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BgpId(pub u32);

impl std::fmt::Display for BgpId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for BgpId {
    fn from(x: u32) -> Self {
        Self(x)
    }
}

impl From<u64> for BgpId {
    fn from(x: u64) -> Self {
        Self(x as u32)
    }
}

impl From<usize> for BgpId {
    fn from(x: usize) -> Self {
        Self(x as u32)
    }
}

impl From<i32> for BgpId {
    fn from(x: i32) -> Self {
        Self(x as u32)
    }
}

/// Destination prefix owned by an AS, written `10.0.<AS>.0`. Each AS owns
/// exactly one prefix, derived from its number.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
pub struct Prefix(pub ASN);

impl Prefix {
    /// The prefix owned by the given AS.
    pub fn new(asn: impl Into<ASN>) -> Self {
        Self(asn.into())
    }

    /// The AS that owns this prefix.
    pub fn asn(&self) -> ASN {
        self.0
    }
}

impl std::fmt::Display for Prefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "10.0.{}.0", self.0 .0)
    }
}

impl std::str::FromStr for Prefix {
    type Err = ParseAddrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('.');
        match (
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
        ) {
            (Some("10"), Some("0"), Some(asn), Some("0"), None) => Ok(Self(ASN(asn.parse()?))),
            _ => Err(ParseAddrError::BadFormat(s.to_string())),
        }
    }
}

impl Serialize for Prefix {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Prefix {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Next-hop address of a route, written `10.0.<AS>.<id>`. The next-hop is
/// rewritten at every eBGP hop and at the iBGP ingress point to the address of
/// the local border router.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
pub struct NextHop {
    /// The AS of the router owning the address.
    pub asn: ASN,
    /// The BGP identifier of the router owning the address.
    pub id: BgpId,
}

impl NextHop {
    /// Build the address of the router with the given AS and identifier.
    pub fn new(asn: impl Into<ASN>, id: impl Into<BgpId>) -> Self {
        Self {
            asn: asn.into(),
            id: id.into(),
        }
    }
}

impl std::fmt::Display for NextHop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "10.0.{}.{}", self.asn.0, self.id.0)
    }
}

impl std::str::FromStr for NextHop {
    type Err = ParseAddrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('.');
        match (
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
        ) {
            (Some("10"), Some("0"), Some(asn), Some(id), None) => Ok(Self {
                asn: ASN(asn.parse()?),
                id: BgpId(id.parse()?),
            }),
            _ => Err(ParseAddrError::BadFormat(s.to_string())),
        }
    }
}

impl Serialize for NextHop {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for NextHop {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Error returned when parsing a prefix or next-hop address
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseAddrError {
    /// Number parsing error
    #[error("{0}")]
    Int(#[from] std::num::ParseIntError),
    /// The string does not have the `10.0.<AS>.<id>` shape.
    #[error("`{0}` is not a 10.0.<AS>.<id> address")]
    BadFormat(String),
}

/// Network Errors
#[derive(Error, Debug)]
pub enum NetworkError {
    /// Device is not present in the topology
    #[error("Network device was not found in topology: {0:?}")]
    DeviceNotFound(RouterId),
    /// Device name is not present in the topology
    #[error("Network device name was not found in topology: {0}")]
    DeviceNameNotFound(String),
    /// Internal links must stay within a single AS
    #[error("Cannot add an internal link between different ASes: {0:?} and {1:?}")]
    CrossAsInternalLink(RouterId, RouterId),
    /// The two routers are not adjacent
    #[error("Link does not exist: {0:?} -- {1:?}")]
    LinkNotFound(RouterId, RouterId),
    /// The IGP cannot reach the next-hop of a route under selection
    #[error("No IGP route from {0:?} towards next-hop {1}")]
    NoIgpRoute(RouterId, NextHop),
    /// Json error
    #[error("{0}")]
    JsonError(Box<serde_json::Error>),
}

impl From<serde_json::Error> for NetworkError {
    fn from(value: serde_json::Error) -> Self {
        Self::JsonError(Box::new(value))
    }
}

impl PartialEq for NetworkError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::DeviceNotFound(l0), Self::DeviceNotFound(r0)) => l0 == r0,
            (Self::DeviceNameNotFound(l0), Self::DeviceNameNotFound(r0)) => l0 == r0,
            (Self::CrossAsInternalLink(l0, l1), Self::CrossAsInternalLink(r0, r1)) => {
                l0 == r0 && l1 == r1
            }
            (Self::LinkNotFound(l0, l1), Self::LinkNotFound(r0, r1)) => l0 == r0 && l1 == r1,
            (Self::NoIgpRoute(l0, l1), Self::NoIgpRoute(r0, r1)) => l0 == r0 && l1 == r1,
            (Self::JsonError(l), Self::JsonError(r)) => l.to_string() == r.to_string(),
            _ => false,
        }
    }
}

/// Convenience trait to get an option into an error
pub trait NetworkErrorOption<T> {
    /// Transform `None` into `Err(NetworkError::DeviceNotFound)`
    fn or_router_not_found(self, router: RouterId) -> Result<T, NetworkError>;

    /// Transform `None` into `Err(NetworkError::LinkNotFound)`
    fn or_link_not_found(self, a: RouterId, b: RouterId) -> Result<T, NetworkError>;
}

impl<T> NetworkErrorOption<T> for Option<T> {
    fn or_router_not_found(self, router: RouterId) -> Result<T, NetworkError> {
        self.ok_or(NetworkError::DeviceNotFound(router))
    }

    fn or_link_not_found(self, a: RouterId, b: RouterId) -> Result<T, NetworkError> {
        self.ok_or(NetworkError::LinkNotFound(a, b))
    }
}
