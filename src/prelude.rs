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

//! Convenient re-export of the common types.

pub use crate::bgp::{
    BgpEvent, BgpRoute, RouteSource, PREF_CUSTOMER, PREF_PEER, PREF_PROVIDER, PREF_SELF,
};
pub use crate::formatter::NetworkFormatter;
pub use crate::network::Network;
pub use crate::topology::{Relationship, Topology};
pub use crate::types::{BgpId, NetworkError, NextHop, Prefix, RouterId, ASN};
