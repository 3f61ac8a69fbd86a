use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Routing protocols the dashboard compares. Each one is only a table of
/// constants; no forwarding logic is modelled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Protocol {
	Vbf,
	Hhvbf,
	Dbr,
	Eedbr,
	Olsr,
}

/// Scores used by the comparison radar and the scalability curves.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProtocolMetrics {
	pub energy_efficiency: f64,
	pub delivery_ratio: f64,
	/// Mean end-to-end delay in ms.
	pub delay: f64,
	pub scalability: f64,
	pub control_overhead: f64,
	pub network_lifetime: f64,
}

/// Share of consumed energy per radio state, in percent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnergyBreakdown {
	pub transmission: f64,
	pub reception: f64,
	pub idle_listening: f64,
	pub processing: f64,
	pub sleep: f64,
}

impl EnergyBreakdown {
	pub const LABELS: [&'static str; 5] = [
		"Transmission",
		"Reception",
		"Idle Listening",
		"Processing",
		"Sleep",
	];

	pub fn values(&self) -> [f64; 5] {
		[
			self.transmission,
			self.reception,
			self.idle_listening,
			self.processing,
			self.sleep,
		]
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnergyProfile {
	/// Joules per packet.
	pub per_packet: f64,
	/// Joules per node per minute.
	pub per_node: f64,
	/// Estimated lifetime in hours at 100 nodes.
	pub lifetime_hours: f64,
}

impl Protocol {
	/// Display order used by every chart.
	pub const ALL: [Protocol; 5] = [
		Protocol::Vbf,
		Protocol::Dbr,
		Protocol::Eedbr,
		Protocol::Olsr,
		Protocol::Hhvbf,
	];

	pub fn code(self) -> &'static str {
		match self {
			Protocol::Vbf => "VBF",
			Protocol::Hhvbf => "HHVBF",
			Protocol::Dbr => "DBR",
			Protocol::Eedbr => "EEDBR",
			Protocol::Olsr => "OLSR",
		}
	}

	pub fn full_name(self) -> &'static str {
		match self {
			Protocol::Vbf => "Vector-Based Forwarding",
			Protocol::Hhvbf => "Hop-by-Hop Vector-Based Forwarding",
			Protocol::Dbr => "Depth-Based Routing",
			Protocol::Eedbr => "Energy-Efficient DBR",
			Protocol::Olsr => "Optimized Link State Routing",
		}
	}

	pub fn description(self) -> &'static str {
		match self {
			Protocol::Vbf => {
				"Vector-Based Forwarding creates a virtual routing pipe from source to sink. \
				 Only nodes within this pipe participate in forwarding, reducing energy consumption."
			}
			Protocol::Hhvbf => {
				"Hop-by-Hop Vector-Based Forwarding improves on VBF by defining a routing vector \
				 at every hop, adapting better to sparse deployments."
			}
			Protocol::Dbr => {
				"Depth-Based Routing uses depth information for forwarding decisions instead of \
				 full coordinates. Packets travel from deeper to shallower nodes."
			}
			Protocol::Eedbr => {
				"Energy-Efficient Depth-Based Routing extends DBR with the residual energy of \
				 each node, balancing consumption across the network."
			}
			Protocol::Olsr => {
				"Optimized Link State Routing is a proactive protocol that keeps routes to all \
				 destinations and uses multipoint relays to limit flooding overhead."
			}
		}
	}

	pub fn features(self) -> &'static [&'static str] {
		match self {
			Protocol::Vbf => &[
				"Uses geographical information for routing decisions",
				"Employs a virtual routing pipe between source and sink",
				"Reduces the number of forwarding nodes",
				"Adjustable routing pipe radius parameter",
			],
			Protocol::Dbr => &[
				"Requires only depth information rather than full location",
				"Greedy forwarding to nodes at lower depths",
				"Uses a holding time to reduce redundant transmissions",
				"No requirement for complete location information",
			],
			Protocol::Eedbr => &[
				"Considers both depth and residual energy",
				"Balances energy consumption across the network",
				"Extends network lifetime compared to DBR",
				"Adaptive holding time calculation",
			],
			Protocol::Olsr => &[
				"Maintains routing tables for all destinations",
				"Uses Multipoint Relays (MPRs) to reduce flooding",
				"Periodic exchange of topology information",
				"Fast route computation with minimal delay",
			],
			Protocol::Hhvbf => &[
				"Establishes routing vectors at each forwarding hop",
				"More robust to node mobility and water currents",
				"Improved packet delivery in sparse networks",
				"Greater resilience to frequent topology changes",
			],
		}
	}

	/// Fraction of sent packets that arrive, before noise.
	pub fn delivery_efficiency(self) -> f64 {
		match self {
			Protocol::Vbf => 0.65,
			Protocol::Hhvbf => 0.75,
			Protocol::Dbr => 0.70,
			Protocol::Eedbr => 0.80,
			Protocol::Olsr => 0.72,
		}
	}

	/// Energy multiplier relative to VBF.
	pub fn energy_factor(self) -> f64 {
		match self {
			Protocol::Vbf => 1.0,
			Protocol::Hhvbf => 0.85,
			Protocol::Dbr => 0.90,
			Protocol::Eedbr => 0.75,
			Protocol::Olsr => 1.1,
		}
	}

	/// Joules per minute for a 100 node network.
	pub fn base_energy_per_minute(self) -> f64 {
		match self {
			Protocol::Vbf => 0.12,
			Protocol::Dbr => 0.10,
			Protocol::Eedbr => 0.08,
			Protocol::Olsr => 0.15,
			Protocol::Hhvbf => 0.11,
		}
	}

	pub fn metrics(self) -> ProtocolMetrics {
		let (energy_efficiency, delivery_ratio, delay, scalability, control_overhead, network_lifetime) =
			match self {
				Protocol::Vbf => (75.0, 93.2, 156.0, 72.0, 84.0, 80.0),
				Protocol::Dbr => (70.0, 91.7, 187.0, 80.0, 63.0, 65.0),
				Protocol::Eedbr => (83.0, 89.5, 201.0, 75.0, 58.0, 75.0),
				Protocol::Olsr => (60.0, 95.8, 143.0, 65.0, 90.0, 55.0),
				Protocol::Hhvbf => (78.0, 91.8, 168.0, 68.0, 80.0, 72.0),
			};
		ProtocolMetrics {
			energy_efficiency,
			delivery_ratio,
			delay,
			scalability,
			control_overhead,
			network_lifetime,
		}
	}

	pub fn energy_breakdown(self) -> EnergyBreakdown {
		let (transmission, reception, idle_listening, processing, sleep) = match self {
			Protocol::Vbf => (40.0, 25.0, 20.0, 10.0, 5.0),
			Protocol::Dbr => (38.0, 28.0, 18.0, 12.0, 4.0),
			Protocol::Eedbr => (35.0, 25.0, 15.0, 10.0, 15.0),
			Protocol::Olsr => (45.0, 30.0, 15.0, 8.0, 2.0),
			Protocol::Hhvbf => (42.0, 26.0, 18.0, 9.0, 5.0),
		};
		EnergyBreakdown {
			transmission,
			reception,
			idle_listening,
			processing,
			sleep,
		}
	}

	pub fn energy_profile(self) -> EnergyProfile {
		let (per_packet, per_node, lifetime_hours) = match self {
			Protocol::Vbf => (0.0045, 0.12, 280.0),
			Protocol::Dbr => (0.0040, 0.10, 320.0),
			Protocol::Eedbr => (0.0035, 0.08, 380.0),
			Protocol::Olsr => (0.0055, 0.15, 240.0),
			Protocol::Hhvbf => (0.0042, 0.11, 300.0),
		};
		EnergyProfile {
			per_packet,
			per_node,
			lifetime_hours,
		}
	}
}

impl fmt::Display for Protocol {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.code())
	}
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown routing protocol {0:?}")]
pub struct UnknownProtocol(pub String);

impl FromStr for Protocol {
	type Err = UnknownProtocol;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Protocol::ALL
			.into_iter()
			.find(|p| p.code().eq_ignore_ascii_case(s.trim()))
			.ok_or_else(|| UnknownProtocol(s.to_string()))
	}
}

impl ProtocolMetrics {
	/// Mean of the scores where higher is better.
	pub fn composite(&self) -> f64 {
		(self.energy_efficiency + self.delivery_ratio + self.scalability + self.network_lifetime) / 4.0
	}
}

/// Protocol that wins each headline comparison.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Leaders {
	pub delivery: Protocol,
	pub energy: Protocol,
	pub latency: Protocol,
	pub overall: Protocol,
}

fn best_by(score: impl Fn(&ProtocolMetrics) -> f64) -> Protocol {
	let mut best = Protocol::ALL[0];
	for p in &Protocol::ALL[1..] {
		if score(&p.metrics()) > score(&best.metrics()) {
			best = *p;
		}
	}
	best
}

pub fn leaders() -> Leaders {
	Leaders {
		delivery: best_by(|m| m.delivery_ratio),
		energy: best_by(|m| m.energy_efficiency),
		latency: best_by(|m| -m.delay),
		overall: best_by(ProtocolMetrics::composite),
	}
}

/// Add `protocol` to the comparison set, or remove it if present.
/// Additions beyond `max` are refused; returns whether the set changed.
pub fn toggle_compared(selected: &mut Vec<Protocol>, protocol: Protocol, max: usize) -> bool {
	if let Some(pos) = selected.iter().position(|p| *p == protocol) {
		selected.remove(pos);
		true
	} else if selected.len() < max {
		selected.push(protocol);
		true
	} else {
		false
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn leaders_follow_metric_tables() {
		let l = leaders();
		assert_eq!(l.delivery, Protocol::Olsr);
		assert_eq!(l.energy, Protocol::Eedbr);
		assert_eq!(l.latency, Protocol::Olsr);
		assert_eq!(l.overall, Protocol::Eedbr);
	}

	#[test]
	fn comparison_set_is_capped() {
		let mut selected = vec![Protocol::Vbf, Protocol::Dbr, Protocol::Olsr];
		assert!(!toggle_compared(&mut selected, Protocol::Eedbr, 3));
		assert_eq!(selected.len(), 3);

		assert!(toggle_compared(&mut selected, Protocol::Dbr, 3));
		assert_eq!(selected, vec![Protocol::Vbf, Protocol::Olsr]);

		assert!(toggle_compared(&mut selected, Protocol::Eedbr, 3));
		assert_eq!(selected, vec![Protocol::Vbf, Protocol::Olsr, Protocol::Eedbr]);
	}

	#[test]
	fn codes_parse_back() {
		for p in Protocol::ALL {
			assert_eq!(p.code().parse::<Protocol>(), Ok(p));
		}
		assert_eq!("eedbr".parse::<Protocol>(), Ok(Protocol::Eedbr));
		assert!("AODV".parse::<Protocol>().is_err());
	}

	#[test]
	fn breakdowns_sum_to_one_hundred() {
		for p in Protocol::ALL {
			let total: f64 = p.energy_breakdown().values().iter().sum();
			assert!((total - 100.0).abs() < 1e-9, "{p}: {total}");
		}
	}

	#[test]
	fn efficiency_stays_below_one_with_noise() {
		// The accrual loop scales efficiency by up to 1.1.
		for p in Protocol::ALL {
			assert!(p.delivery_efficiency() * 1.1 < 1.0, "{p}");
		}
	}
}
