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

#![deny(missing_docs, missing_debug_implementations)]

//! # Rexford
//!
//! This is a simulator for the control plane of a multi-AS BGP fabric. It
//! does not model OSI layers 1 to 4: there is no TCP transport, no session
//! establishment, no message framing, and no timers. Routers are identified
//! by a graph handle ([`types::RouterId`]), and control-plane messages are
//! exchanged by direct, synchronous function calls rather than a message
//! queue.
//!
//! Given a static declaration of autonomous systems, routers, their
//! commercial relationships (provider, customer, peer), and weighted internal
//! links, the simulator computes the steady-state RIB of every router for
//! each announced prefix. Local preference is assigned from the commercial
//! relationship, exports follow the Gao-Rexford rule (routes learned from
//! providers or peers are announced to customers only), and routers of one AS
//! redistribute their externally learned best routes over iBGP.
//!
//! ## Example usage
//!
//! ```rust
//! use rexford::prelude::*;
//!
//! fn main() -> Result<(), NetworkError> {
//!     let mut net = Network::default();
//!     let r1 = net.add_router("r1", 1, 1);
//!     let r2 = net.add_router("r2", 2, 2);
//!     net.add_provider_customer(r1, r2)?;
//!
//!     let prefix = net.announce_prefix(r2)?;
//!
//!     let best = net.decision_process(r1, prefix)?.expect("r1 learned the prefix");
//!     assert_eq!(best.next_hop, NextHop::new(2, 2));
//!     assert_eq!(best.as_path, vec![ASN(2)]);
//!     assert_eq!(best.local_pref, Some(PREF_CUSTOMER));
//!     Ok(())
//! }
//! ```

pub mod bgp;
pub mod decision;
pub mod formatter;
pub mod igp;
pub mod network;
pub mod prelude;
pub mod rib;
pub mod topology;
pub mod types;

#[cfg(test)]
mod test;
