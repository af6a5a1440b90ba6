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

//! The best-route selection procedure.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use itertools::Itertools;

use crate::{
    bgp::BgpRoute,
    topology::Topology,
    types::{NetworkError, RouterId, ASN},
};

/// Select the best route among the candidates a router holds for one prefix,
/// or `None` if there are no candidates.
///
/// The procedure is a staged tournament; ties pass to the next stage:
///
/// 1. Highest local preference.
/// 2. Shortest AS path.
/// 3. Lowest MED, compared only among routes whose leftmost AS agrees: the
///    remaining candidates are partitioned by their leftmost AS, each
///    partition keeps its MED minima, and the union advances.
/// 4. Prefer eBGP-learned over iBGP-learned routes.
/// 5. Among iBGP-learned routes, lowest IGP distance towards the next-hop.
///    An unreachable next-hop is a fatal error.
/// 6. Lowest identifier of the announcing neighbor, where self-originated
///    routes rank first.
pub fn best_route<'a, I>(
    topology: &Topology,
    router: RouterId,
    candidates: I,
) -> Result<Option<BgpRoute>, NetworkError>
where
    I: IntoIterator<Item = &'a BgpRoute>,
{
    let candidates = candidates.into_iter().collect_vec();

    // stages 1 and 2 are global: only (pref, path length) of the leader matter
    let Some(leader) = candidates
        .iter()
        .copied()
        .max_by_key(|r| (r.local_pref, Reverse(r.as_path.len())))
    else {
        return Ok(None);
    };
    let pref = leader.local_pref;
    let path_len = leader.as_path.len();

    // stage 3: MED is only comparable among routes from the same neighbor AS
    let mut partitions: BTreeMap<Option<ASN>, Vec<&BgpRoute>> = BTreeMap::new();
    for route in candidates
        .iter()
        .copied()
        .filter(|r| r.local_pref == pref && r.as_path.len() == path_len)
    {
        partitions
            .entry(route.as_path.first().copied())
            .or_default()
            .push(route);
    }
    let mut survivors: Vec<&BgpRoute> = Vec::new();
    for group in partitions.into_values() {
        let lowest = group.iter().map(|r| r.med).min().unwrap_or_default();
        survivors.extend(group.into_iter().filter(|r| r.med == lowest));
    }

    // stages 4 to 6 as a pairwise fold
    let mut best: Option<&BgpRoute> = None;
    for route in survivors {
        let Some(current) = best else {
            best = Some(route);
            continue;
        };
        let replace = if route.src != current.src {
            route.src.is_ebgp()
        } else if route.src.is_ibgp() {
            let d_current = topology.igp_distance(router, current.next_hop)?;
            let d_route = topology.igp_distance(router, route.next_hop)?;
            if d_route != d_current {
                d_route < d_current
            } else {
                current.from_id >= route.from_id
            }
        } else {
            current.from_id >= route.from_id
        };
        if replace {
            best = Some(route);
        }
    }
    Ok(best.cloned())
}
