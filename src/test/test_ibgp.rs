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

//! Steady state of a topology with a six-router AS, exercising iBGP
//! redistribution and the IGP tie-break.

use super::route;
use crate::bgp::RouteSource::{EBgp, IBgp};
use crate::network::Network;
use crate::types::{Prefix, RouterId};

use maplit::{btreemap, btreeset};
use pretty_assertions::assert_eq;

fn net() -> (Network, [RouterId; 11]) {
    let mut net = Network::default();

    // AS1
    let r1 = net.add_router("r1", 1, 1);
    let r2 = net.add_router("r2", 1, 2);
    let r3 = net.add_router("r3", 1, 3);
    let r4 = net.add_router("r4", 1, 4);
    let r5 = net.add_router("r5", 1, 5);
    let r6 = net.add_router("r6", 1, 6);

    // AS2 to AS5
    let r21 = net.add_router("r21", 2, 21);
    let r31 = net.add_router("r31", 3, 31);
    let r41 = net.add_router("r41", 4, 41);
    let r42 = net.add_router("r42", 4, 42);
    let r51 = net.add_router("r51", 5, 51);

    net.add_provider_customer(r21, r51).unwrap();
    net.add_provider_customer(r21, r41).unwrap();
    net.add_provider_customer_med(r41, r5, 3).unwrap();
    net.add_provider_customer_med(r42, r4, 0).unwrap();
    net.add_provider_customer(r51, r3).unwrap();
    net.add_provider_customer_med(r31, r1, 7).unwrap();
    net.add_provider_customer_med(r31, r6, 1).unwrap();
    net.add_provider_customer(r51, r31).unwrap();

    net.add_internal_link(r1, r6, 1).unwrap();
    net.add_internal_link(r3, r6, 3).unwrap();
    net.add_internal_link(r1, r2, 1).unwrap();
    net.add_internal_link(r1, r3, 1).unwrap();
    net.add_internal_link(r2, r4, 1).unwrap();
    net.add_internal_link(r5, r6, 1).unwrap();
    net.add_internal_link(r4, r5, 7).unwrap();

    net.add_internal_link(r41, r42, 2).unwrap();

    (net, [r1, r2, r3, r4, r5, r6, r21, r31, r41, r42, r51])
}

#[test]
fn steady_state() {
    let _ = env_logger::try_init();
    for _ in 0..20 {
        let (mut net, routers) = net();
        let [r1, r2, r3, r4, r5, r6, r21, r31, r41, r42, r51] = routers;
        net.announce_prefix(r21).unwrap();

        let p = Prefix::new(2);
        let expected = btreemap! {
            r1 => btreemap! { p => btreeset! {
                route(2, (1, 3), &[5, 2], 50, 0, Some(3), IBgp),
                route(2, (1, 4), &[4, 2], 50, 0, Some(4), IBgp),
                route(2, (3, 31), &[3, 5, 2], 50, 7, Some(31), EBgp),
            }},
            r2 => btreemap! { p => btreeset! {
                route(2, (1, 3), &[5, 2], 50, 0, Some(3), IBgp),
                route(2, (1, 4), &[4, 2], 50, 0, Some(4), IBgp),
            }},
            r3 => btreemap! { p => btreeset! {
                route(2, (5, 51), &[5, 2], 50, 0, Some(51), EBgp),
                route(2, (1, 4), &[4, 2], 50, 0, Some(4), IBgp),
            }},
            r4 => btreemap! { p => btreeset! {
                route(2, (1, 3), &[5, 2], 50, 0, Some(3), IBgp),
                route(2, (4, 42), &[4, 2], 50, 0, Some(42), EBgp),
            }},
            r5 => btreemap! { p => btreeset! {
                route(2, (1, 3), &[5, 2], 50, 0, Some(3), IBgp),
                route(2, (4, 41), &[4, 2], 50, 3, Some(41), EBgp),
                route(2, (1, 4), &[4, 2], 50, 0, Some(4), IBgp),
            }},
            r6 => btreemap! { p => btreeset! {
                route(2, (1, 3), &[5, 2], 50, 0, Some(3), IBgp),
                route(2, (3, 31), &[3, 5, 2], 50, 1, Some(31), EBgp),
                route(2, (1, 4), &[4, 2], 50, 0, Some(4), IBgp),
            }},
            r21 => btreemap! { p => btreeset! {
                route(2, (2, 21), &[2], 1000, 0, None, EBgp),
            }},
            r31 => btreemap! { p => btreeset! {
                route(2, (5, 51), &[5, 2], 50, 0, Some(51), EBgp),
            }},
            r41 => btreemap! { p => btreeset! {
                route(2, (2, 21), &[2], 50, 0, Some(21), EBgp),
            }},
            r42 => btreemap! { p => btreeset! {
                route(2, (4, 41), &[2], 50, 0, Some(41), IBgp),
            }},
            r51 => btreemap! { p => btreeset! {
                route(2, (2, 21), &[2], 50, 0, Some(21), EBgp),
            }},
        };
        assert_eq!(net.bgp_tables().tables(), &expected);
    }
}

#[test]
fn igp_distance_breaks_the_tie() {
    let (mut net, routers) = net();
    let [r1, r2, _, _, r5, ..] = routers;
    let prefix = net.announce_prefix(routers[6]).unwrap();

    // r1 holds two iBGP routes with equal preference and path length; the
    // border router r3 is two IGP hops away, r4 three, so the route over r3
    // wins
    assert_eq!(
        net.decision_process(r1, prefix).unwrap(),
        Some(route(2, (1, 3), &[5, 2], 50, 0, Some(3), IBgp))
    );
    // same at r2, where r4 is the closer border router
    assert_eq!(
        net.decision_process(r2, prefix).unwrap(),
        Some(route(2, (1, 4), &[4, 2], 50, 0, Some(4), IBgp))
    );
    // at r5 the cheap detour over r6 and r1 makes r3 the closer exit
    assert_eq!(
        net.decision_process(r5, prefix).unwrap(),
        Some(route(2, (1, 3), &[5, 2], 50, 0, Some(3), IBgp))
    );
}

#[test]
fn ebgp_preferred_at_border_routers() {
    let (mut net, routers) = net();
    let [_, _, r3, r4, ..] = routers;
    let prefix = net.announce_prefix(routers[6]).unwrap();

    // border routers hold both their own external route and the iBGP copy
    // of the other exit, and select the external one
    assert_eq!(
        net.decision_process(r3, prefix).unwrap(),
        Some(route(2, (5, 51), &[5, 2], 50, 0, Some(51), EBgp))
    );
    assert_eq!(
        net.decision_process(r4, prefix).unwrap(),
        Some(route(2, (4, 42), &[4, 2], 50, 0, Some(42), EBgp))
    );
}
