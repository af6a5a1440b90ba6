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

use crate::{
    bgp::{BgpRoute, RouteSource},
    types::{BgpId, NextHop, Prefix, ASN},
};

/// Build a route record for test fixtures.
fn route(
    prefix: u32,
    next_hop: (u32, u32),
    as_path: &[u32],
    pref: u32,
    med: u32,
    from: Option<u32>,
    src: RouteSource,
) -> BgpRoute {
    BgpRoute {
        prefix: Prefix::new(prefix),
        next_hop: NextHop::new(next_hop.0, next_hop.1),
        as_path: as_path.iter().map(|asn| ASN(*asn)).collect(),
        local_pref: Some(pref),
        med,
        from_id: from.map(BgpId),
        src,
    }
}

mod test_ibgp;
mod test_igp;
