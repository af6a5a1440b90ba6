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

//! Module that introduces a formatter to display types containing `RouterId`,
//! and the diagnostic rendering of all BGP tables.

use std::fmt::Write;

use itertools::Itertools;

use crate::{
    bgp::BgpRoute,
    network::Network,
    types::{NetworkError, RouterId},
};

/// Trait to format a type by resolving router IDs in the network.
pub trait NetworkFormatter {
    /// Return a formatted string by looking up router IDs in the network.
    fn fmt(&self, net: &Network) -> String;
}

impl NetworkFormatter for RouterId {
    fn fmt(&self, net: &Network) -> String {
        net.topology().name_of(*self).unwrap_or("?").to_string()
    }
}

impl NetworkFormatter for BgpRoute {
    fn fmt(&self, _net: &Network) -> String {
        format!(
            "nexthop={}, pref={}, AS path={}, MED={}",
            self.next_hop,
            self.local_pref
                .map(|p| p.to_string())
                .unwrap_or_else(|| String::from("-")),
            self.as_path.iter().join(":"),
            self.med,
        )
    }
}

impl Network {
    /// Render the BGP table of every router, grouped by AS. The selected best
    /// route of each prefix is marked with `*`, iBGP-learned entries with `i`.
    pub fn fmt_bgp_tables(&self) -> Result<String, NetworkError> {
        let mut result = String::new();
        let f = &mut result;
        for asn in self.topology().ases() {
            writeln!(f, "AS {}:", asn.0).unwrap();
            for router in self.topology().routers_in_as(asn) {
                writeln!(f, "  {} :", router.fmt(self)).unwrap();
                let Some(table) = self.bgp_tables().table(router) else {
                    continue;
                };
                for (prefix, routes) in table {
                    writeln!(f, "    {} :", prefix).unwrap();
                    let best = self.decision_process(router, *prefix)?;
                    for route in routes {
                        writeln!(
                            f,
                            "     {}{} {}",
                            if best.as_ref() == Some(route) { "*" } else { " " },
                            if route.src.is_ibgp() { "i" } else { " " },
                            route.fmt(self),
                        )
                        .unwrap();
                    }
                }
            }
        }
        Ok(result)
    }
}
