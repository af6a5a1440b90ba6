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

use crate::topology::Topology;
use crate::types::{NetworkError, NextHop, RouterId, ASN};

use pretty_assertions::assert_eq;

/// The internal graph of the iBGP scenario: six routers, where expensive
/// direct links lose against cheap detours.
fn as1() -> (Topology, [RouterId; 6]) {
    let mut top = Topology::default();
    let r1 = top.add_router("r1", 1, 1);
    let r2 = top.add_router("r2", 1, 2);
    let r3 = top.add_router("r3", 1, 3);
    let r4 = top.add_router("r4", 1, 4);
    let r5 = top.add_router("r5", 1, 5);
    let r6 = top.add_router("r6", 1, 6);

    top.add_internal_link(r1, r6, 1).unwrap();
    top.add_internal_link(r3, r6, 3).unwrap();
    top.add_internal_link(r1, r2, 1).unwrap();
    top.add_internal_link(r1, r3, 1).unwrap();
    top.add_internal_link(r2, r4, 1).unwrap();
    top.add_internal_link(r5, r6, 1).unwrap();
    top.add_internal_link(r4, r5, 7).unwrap();

    (top, [r1, r2, r3, r4, r5, r6])
}

#[test]
fn distance_is_hop_count_of_cheapest_path() {
    let (top, [r1, _, _, _, r5, r6]) = as1();

    // direct neighbor
    assert_eq!(top.igp_distance(r1, NextHop::new(1, 3)).unwrap(), 2);
    // r5 -> r3: the direct r6-r3 link costs 3, the detour over r1 costs 2,
    // so the cheapest path has four hops
    assert_eq!(top.igp_distance(r5, NextHop::new(1, 3)).unwrap(), 4);
    // r5 -> r4: the direct link costs 7 and loses against the detour
    assert_eq!(top.igp_distance(r5, NextHop::new(1, 4)).unwrap(), 5);
    assert_eq!(top.igp_distance(r6, NextHop::new(1, 3)).unwrap(), 3);
    assert_eq!(top.igp_distance(r6, NextHop::new(1, 4)).unwrap(), 4);
}

#[test]
fn distance_to_self_is_one() {
    let (top, [r1, ..]) = as1();
    assert_eq!(top.igp_distance(r1, NextHop::new(1, 1)).unwrap(), 1);
}

#[test]
fn unreachable_next_hop() {
    let (mut top, [r1, ..]) = as1();
    // a router of the same AS without any internal link
    top.add_router("r7", 1, 7);
    assert_eq!(
        top.igp_distance(r1, NextHop::new(1, 7)),
        Err(NetworkError::NoIgpRoute(r1, NextHop::new(1, 7)))
    );
}

#[test]
fn next_hop_outside_the_as() {
    let (top, [r1, ..]) = as1();
    assert_eq!(
        top.igp_distance(r1, NextHop::new(2, 1)),
        Err(NetworkError::NoIgpRoute(r1, NextHop::new(2, 1)))
    );
}

#[test]
fn igp_graph_tracks_membership() {
    let (top, _) = as1();
    let igp = top.igp_graph(ASN(1)).unwrap();
    assert_eq!(igp.len(), 6);
    assert!(!igp.is_empty());
    assert!(top.igp_graph(ASN(9)).is_none());
}
