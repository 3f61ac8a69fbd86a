//! Node and sink placement plus distance-based connectivity.
//!
//! [`build`] is a pure function of [`TopologyParams`] and the injected random
//! source. Any parameter change means a full rebuild; nothing is updated
//! incrementally.

use std::collections::HashSet;
use std::f64::consts::PI;
use std::fmt;

use log::debug;
use rand::Rng;

/// Side of the square deployment area on the x/z plane.
pub const EXTENT: f64 = 1600.0;
pub const HALF_EXTENT: f64 = EXTENT / 2.0;
/// Depth band for sensor nodes, `[DEPTH_MIN, DEPTH_MIN + DEPTH_SPAN)`.
pub const DEPTH_MIN: f64 = 20.0;
pub const DEPTH_SPAN: f64 = 400.0;
pub const JITTER: f64 = 25.0;
pub const COLUMN_HEIGHT: usize = 5;
pub const COLUMN_ROW_STEP: f64 = 80.0;
pub const SINK_RING_RADIUS: f64 = 400.0;
pub const SINK_HEIGHT: f64 = 30.0;
pub const TRIANGLE_SPREAD: f64 = 400.0;
pub const TRIANGLE_ANCHORS: [(f64, f64); 3] = [(0.0, -400.0), (-400.0, 400.0), (400.0, 400.0)];

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec3 {
	pub x: f64,
	pub y: f64,
	pub z: f64,
}

impl Vec3 {
	pub const ORIGIN: Vec3 = Vec3::new(0.0, 0.0, 0.0);

	pub const fn new(x: f64, y: f64, z: f64) -> Self {
		Self { x, y, z }
	}

	pub fn distance_to(&self, other: &Vec3) -> f64 {
		let (dx, dy, dz) = (self.x - other.x, self.y - other.y, self.z - other.z);
		(dx * dx + dy * dy + dz * dz).sqrt()
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TopologyKind {
	#[default]
	Random,
	Grid,
	Column,
	Triangle,
}

impl TopologyKind {
	pub const ALL: [TopologyKind; 4] = [
		TopologyKind::Random,
		TopologyKind::Grid,
		TopologyKind::Column,
		TopologyKind::Triangle,
	];

	pub fn slug(self) -> &'static str {
		match self {
			TopologyKind::Random => "random",
			TopologyKind::Grid => "grid",
			TopologyKind::Column => "column",
			TopologyKind::Triangle => "triangle",
		}
	}

	pub fn from_slug(slug: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|k| k.slug() == slug)
	}

	pub fn title(self) -> &'static str {
		match self {
			TopologyKind::Random => "Random Distribution",
			TopologyKind::Grid => "Grid Distribution",
			TopologyKind::Column => "Vertical Column",
			TopologyKind::Triangle => "Triangle Distribution",
		}
	}

	pub fn description(self) -> &'static str {
		match self {
			TopologyKind::Random => {
				"Nodes are randomly placed throughout the volume, creating a natural and irregular network structure."
			}
			TopologyKind::Grid => {
				"Nodes are organized in a structured grid pattern with small random offsets to represent practical deployment."
			}
			TopologyKind::Column => {
				"Nodes are distributed in vertical columns, representing common underwater sensor deployments along moorings."
			}
			TopologyKind::Triangle => {
				"Nodes are concentrated in three distinct areas, creating a triangle-shaped network topology."
			}
		}
	}

	pub fn advantages(self) -> &'static [&'static str] {
		match self {
			TopologyKind::Random => &[
				"Mimics real-world deployment scenarios",
				"Good for testing protocol adaptability",
				"Provides diverse node distances and connection patterns",
			],
			TopologyKind::Grid => &[
				"Ensures consistent coverage of the area",
				"Predictable connectivity patterns",
				"Easier to analyze protocol behavior",
			],
			TopologyKind::Column => &[
				"Realistic representation of tethered deployments",
				"Good for depth-based protocol testing",
				"Efficient for water column monitoring",
			],
			TopologyKind::Triangle => &[
				"Tests multi-hop routing capabilities",
				"Creates natural clustering for hierarchical protocols",
				"Simulates data collection from multiple areas of interest",
			],
		}
	}

	pub fn challenges(self) -> &'static [&'static str] {
		match self {
			TopologyKind::Random => &[
				"May create isolated node clusters",
				"Network connectivity can be unpredictable",
				"Uneven energy consumption across the network",
			],
			TopologyKind::Grid => &[
				"Less realistic for underwater environments",
				"Regular patterns may favor certain routing protocols",
				"May create hotspots at central grid nodes",
			],
			TopologyKind::Column => &[
				"Limited horizontal connectivity",
				"Reliance on vertical packet forwarding",
				"Potential single points of failure within columns",
			],
			TopologyKind::Triangle => &[
				"Inter-cluster communication depends on limited nodes",
				"Non-uniform node distribution",
				"Potential energy bottlenecks at cluster boundaries",
			],
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TopologyParams {
	pub node_count: usize,
	pub sink_count: usize,
	pub kind: TopologyKind,
	/// Maximum link distance, same units as positions.
	pub connection_range: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NodeCategory {
	#[default]
	Sensor,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SensorNode {
	pub id: usize,
	pub position: Vec3,
	pub category: NodeCategory,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Sink {
	pub index: usize,
	pub position: Vec3,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Endpoint {
	Node(usize),
	Sink(usize),
}

impl fmt::Display for Endpoint {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Endpoint::Node(id) => write!(f, "{}", id),
			Endpoint::Sink(index) => write!(f, "sink-{}", index),
		}
	}
}

/// Undirected link. `from` is always the node whose pass discovered it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edge {
	pub from: usize,
	pub to: Endpoint,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TopologySummary {
	pub node_count: usize,
	pub sink_count: usize,
	pub edge_count: usize,
	pub connectivity_percent: u32,
}

impl fmt::Display for TopologySummary {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"Nodes: {} | Connections: {} | Connectivity: {}%",
			self.node_count, self.edge_count, self.connectivity_percent
		)
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct Topology {
	pub params: TopologyParams,
	pub nodes: Vec<SensorNode>,
	pub sinks: Vec<Sink>,
	pub edges: Vec<Edge>,
}

impl Topology {
	pub fn position(&self, endpoint: Endpoint) -> Option<Vec3> {
		match endpoint {
			Endpoint::Node(id) => self.nodes.get(id).map(|n| n.position),
			Endpoint::Sink(index) => self.sinks.get(index).map(|s| s.position),
		}
	}

	/// Share of nodes that appear in at least one edge, rounded to a whole
	/// percent.
	pub fn connectivity_percent(&self) -> u32 {
		if self.nodes.is_empty() {
			return 0;
		}
		let mut connected = HashSet::new();
		for edge in &self.edges {
			connected.insert(edge.from);
			if let Endpoint::Node(id) = edge.to {
				connected.insert(id);
			}
		}
		(connected.len() as f64 / self.nodes.len() as f64 * 100.0).round() as u32
	}

	pub fn summary(&self) -> TopologySummary {
		TopologySummary {
			node_count: self.nodes.len(),
			sink_count: self.sinks.len(),
			edge_count: self.edges.len(),
			connectivity_percent: self.connectivity_percent(),
		}
	}

	/// Endpoints sharing an edge with `endpoint`.
	pub fn neighbors(&self, endpoint: Endpoint) -> HashSet<Endpoint> {
		let mut out = HashSet::new();
		for edge in &self.edges {
			let from = Endpoint::Node(edge.from);
			if from == endpoint {
				out.insert(edge.to);
			} else if edge.to == endpoint {
				out.insert(from);
			}
		}
		out
	}
}

/// Place nodes and sinks for `params` and connect everything within range.
pub fn build<R: Rng + ?Sized>(params: TopologyParams, rng: &mut R) -> Topology {
	let sinks = place_sinks(&params);
	let nodes = (0..params.node_count)
		.map(|id| SensorNode {
			id,
			position: place_node(&params, id, rng),
			category: NodeCategory::Sensor,
		})
		.collect::<Vec<_>>();
	let edges = connect(&nodes, &sinks, params.connection_range);

	let topology = Topology {
		params,
		nodes,
		sinks,
		edges,
	};
	debug!("built {:?} topology: {}", params.kind, topology.summary());
	topology
}

fn depth<R: Rng + ?Sized>(rng: &mut R) -> f64 {
	rng.random::<f64>() * DEPTH_SPAN + DEPTH_MIN
}

/// Uniform in `[-span/2, span/2)`.
fn centered<R: Rng + ?Sized>(rng: &mut R, span: f64) -> f64 {
	(rng.random::<f64>() - 0.5) * span
}

fn jitter<R: Rng + ?Sized>(rng: &mut R) -> f64 {
	rng.random::<f64>() * 2.0 * JITTER - JITTER
}

fn place_node<R: Rng + ?Sized>(params: &TopologyParams, i: usize, rng: &mut R) -> Vec3 {
	match params.kind {
		TopologyKind::Random => {
			let x = centered(rng, EXTENT);
			let y = depth(rng);
			let z = centered(rng, EXTENT);
			Vec3::new(x, y, z)
		}
		TopologyKind::Grid => {
			let side = (params.node_count as f64).sqrt().ceil().max(1.0) as usize;
			let cell = EXTENT / side as f64;
			let (row, col) = (i / side, i % side);
			let x = col as f64 * cell - HALF_EXTENT + jitter(rng);
			let y = depth(rng);
			let z = row as f64 * cell - HALF_EXTENT + jitter(rng);
			Vec3::new(x, y, z)
		}
		TopologyKind::Column => {
			let columns = params.node_count.div_ceil(COLUMN_HEIGHT).max(1);
			let (column, row) = (i / COLUMN_HEIGHT, i % COLUMN_HEIGHT);
			let x = column as f64 * (EXTENT / columns as f64) - HALF_EXTENT + jitter(rng);
			let y = row as f64 * COLUMN_ROW_STEP + DEPTH_MIN;
			let z = centered(rng, EXTENT);
			Vec3::new(x, y, z)
		}
		TopologyKind::Triangle => {
			let (ax, az) = TRIANGLE_ANCHORS[i % 3];
			let x = centered(rng, TRIANGLE_SPREAD) + ax;
			let z = centered(rng, TRIANGLE_SPREAD) + az;
			let y = depth(rng);
			Vec3::new(x, y, z)
		}
	}
}

fn place_sinks(params: &TopologyParams) -> Vec<Sink> {
	let n = params.sink_count;
	(0..n)
		.map(|i| {
			let (x, z) = match params.kind {
				TopologyKind::Random | TopologyKind::Grid => {
					if n == 1 {
						(0.0, 0.0)
					} else {
						let angle = i as f64 / n as f64 * PI * 2.0;
						(angle.cos() * SINK_RING_RADIUS, angle.sin() * SINK_RING_RADIUS)
					}
				}
				TopologyKind::Column => {
					// a single sink sits at the start of the line
					let gaps = n.saturating_sub(1).max(1) as f64;
					(0.0, -SINK_RING_RADIUS + i as f64 * (2.0 * SINK_RING_RADIUS / gaps))
				}
				TopologyKind::Triangle => TRIANGLE_ANCHORS[i.min(2)],
			};
			Sink {
				index: i,
				position: Vec3::new(x, SINK_HEIGHT, z),
			}
		})
		.collect()
}

fn connect(nodes: &[SensorNode], sinks: &[Sink], range: f64) -> Vec<Edge> {
	let mut edges = Vec::new();
	let mut linked: HashSet<(usize, usize)> = HashSet::new();

	for node in nodes {
		for sink in sinks {
			if node.position.distance_to(&sink.position) <= range {
				edges.push(Edge {
					from: node.id,
					to: Endpoint::Sink(sink.index),
				});
			}
		}

		for other in nodes {
			if node.id == other.id {
				continue;
			}
			if node.position.distance_to(&other.position) > range {
				continue;
			}
			let key = (node.id.min(other.id), node.id.max(other.id));
			if linked.insert(key) {
				edges.push(Edge {
					from: node.id,
					to: Endpoint::Node(other.id),
				});
			}
		}
	}
	edges
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;

	/// Longest possible distance between any two placed entities.
	const EXTENT_DIAGONAL: f64 = 2300.0;

	fn params(node_count: usize, sink_count: usize, kind: TopologyKind, range: f64) -> TopologyParams {
		TopologyParams {
			node_count,
			sink_count,
			kind,
			connection_range: range,
		}
	}

	fn build_seeded(p: TopologyParams, seed: u64) -> Topology {
		let mut rng = StdRng::seed_from_u64(seed);
		build(p, &mut rng)
	}

	fn edge_length(t: &Topology, edge: &Edge) -> f64 {
		let a = t.position(Endpoint::Node(edge.from)).unwrap();
		let b = t.position(edge.to).unwrap();
		a.distance_to(&b)
	}

	#[test]
	fn test_same_seed_same_topology() {
		let p = params(60, 3, TopologyKind::Random, 300.0);
		assert_eq!(build_seeded(p, 7), build_seeded(p, 7));
	}

	#[test]
	fn test_zero_range_has_no_edges() {
		for kind in TopologyKind::ALL {
			let t = build_seeded(params(40, 2, kind, 0.0), 1);
			assert!(t.edges.is_empty(), "{kind:?}");
			assert_eq!(t.connectivity_percent(), 0);
		}
	}

	#[test]
	fn test_range_covering_extent_connects_everything() {
		for kind in TopologyKind::ALL {
			let t = build_seeded(params(10, 1, kind, EXTENT_DIAGONAL), 3);
			assert_eq!(t.connectivity_percent(), 100, "{kind:?}");
			// every node reaches the sink, plus the complete node graph
			assert_eq!(t.edges.len(), 10 + 10 * 9 / 2);
		}
	}

	#[test]
	fn test_grid_scenario_at_max_range() {
		let t = build_seeded(params(10, 1, TopologyKind::Grid, 500.0), 11);
		assert_eq!(t.nodes.len(), 10);
		assert_eq!(t.sinks.len(), 1);
		assert_eq!(t.sinks[0].position, Vec3::new(0.0, SINK_HEIGHT, 0.0));
		for edge in &t.edges {
			assert!(edge_length(&t, edge) <= 500.0);
		}
		let connected: HashSet<usize> = t
			.nodes
			.iter()
			.filter(|n| !t.neighbors(Endpoint::Node(n.id)).is_empty())
			.map(|n| n.id)
			.collect();
		assert_eq!(
			t.connectivity_percent(),
			(connected.len() as f64 * 10.0).round() as u32
		);
	}

	#[test]
	fn test_grid_layout_follows_cells() {
		let t = build_seeded(params(10, 1, TopologyKind::Grid, 100.0), 5);
		// side 4, cell 400
		for node in &t.nodes {
			let (row, col) = (node.id / 4, node.id % 4);
			let cx = col as f64 * 400.0 - HALF_EXTENT;
			let cz = row as f64 * 400.0 - HALF_EXTENT;
			assert!((node.position.x - cx).abs() <= JITTER);
			assert!((node.position.z - cz).abs() <= JITTER);
			assert!(node.position.y >= DEPTH_MIN && node.position.y < DEPTH_MIN + DEPTH_SPAN);
		}
	}

	#[test]
	fn test_column_layout_stacks_rows() {
		let t = build_seeded(params(12, 1, TopologyKind::Column, 100.0), 5);
		for node in &t.nodes {
			let row = node.id % COLUMN_HEIGHT;
			assert_eq!(node.position.y, row as f64 * COLUMN_ROW_STEP + DEPTH_MIN);
		}
		// three columns: 0..5, 5..10, 10..12
		let column_width = EXTENT / 3.0;
		assert!((t.nodes[11].position.x - (2.0 * column_width - HALF_EXTENT)).abs() <= JITTER);
	}

	#[test]
	fn test_single_column_sink_does_not_divide_by_zero() {
		let t = build_seeded(params(10, 1, TopologyKind::Column, 100.0), 0);
		assert_eq!(t.sinks[0].position, Vec3::new(0.0, SINK_HEIGHT, -400.0));
	}

	#[test]
	fn test_column_sinks_spread_along_line() {
		let t = build_seeded(params(10, 3, TopologyKind::Column, 100.0), 0);
		let zs: Vec<f64> = t.sinks.iter().map(|s| s.position.z).collect();
		assert_eq!(zs, vec![-400.0, 0.0, 400.0]);
	}

	#[test]
	fn test_ring_sinks_are_evenly_spaced() {
		let t = build_seeded(params(10, 4, TopologyKind::Random, 100.0), 0);
		for sink in &t.sinks {
			let r = (sink.position.x.powi(2) + sink.position.z.powi(2)).sqrt();
			assert!((r - SINK_RING_RADIUS).abs() < 1e-9);
		}
		assert!((t.sinks[1].position.z - SINK_RING_RADIUS).abs() < 1e-9);
	}

	#[test]
	fn test_triangle_sinks_share_last_anchor() {
		let t = build_seeded(params(10, 5, TopologyKind::Triangle, 100.0), 0);
		let anchors: Vec<(f64, f64)> = t.sinks.iter().map(|s| (s.position.x, s.position.z)).collect();
		assert_eq!(
			anchors,
			vec![
				(0.0, -400.0),
				(-400.0, 400.0),
				(400.0, 400.0),
				(400.0, 400.0),
				(400.0, 400.0)
			]
		);
	}

	#[test]
	fn test_triangle_nodes_stay_near_their_anchor() {
		let t = build_seeded(params(30, 3, TopologyKind::Triangle, 100.0), 9);
		for node in &t.nodes {
			let (ax, az) = TRIANGLE_ANCHORS[node.id % 3];
			assert!((node.position.x - ax).abs() <= TRIANGLE_SPREAD / 2.0);
			assert!((node.position.z - az).abs() <= TRIANGLE_SPREAD / 2.0);
		}
	}

	#[test]
	fn test_sink_ids_and_summary_text() {
		let t = build_seeded(params(10, 2, TopologyKind::Grid, 0.0), 0);
		assert_eq!(Endpoint::Sink(t.sinks[1].index).to_string(), "sink-1");
		assert_eq!(
			t.summary().to_string(),
			"Nodes: 10 | Connections: 0 | Connectivity: 0%"
		);
	}

	#[test]
	fn test_neighbors_are_symmetric() {
		let t = build_seeded(params(40, 2, TopologyKind::Random, 400.0), 21);
		for node in &t.nodes {
			let me = Endpoint::Node(node.id);
			for other in t.neighbors(me) {
				assert!(t.neighbors(other).contains(&me));
			}
		}
	}

	fn kind_strategy() -> impl Strategy<Value = TopologyKind> {
		prop_oneof![
			Just(TopologyKind::Random),
			Just(TopologyKind::Grid),
			Just(TopologyKind::Column),
			Just(TopologyKind::Triangle),
		]
	}

	proptest! {
		#![proptest_config(ProptestConfig::with_cases(64))]

		#[test]
		fn prop_topology_invariants(
			node_count in 10usize..=150,
			sink_count in 1usize..=5,
			kind in kind_strategy(),
			range in 0.0f64..600.0,
			seed in any::<u64>(),
		) {
			let t = build_seeded(params(node_count, sink_count, kind, range), seed);

			prop_assert_eq!(t.nodes.len(), node_count);
			prop_assert_eq!(t.sinks.len(), sink_count);
			for (i, node) in t.nodes.iter().enumerate() {
				prop_assert_eq!(node.id, i);
			}

			let mut pairs = HashSet::new();
			for edge in &t.edges {
				prop_assert!(edge_length(&t, edge) <= range + 1e-9);
				let key = match edge.to {
					Endpoint::Node(other) => {
						prop_assert_ne!(other, edge.from);
						(0, edge.from.min(other), edge.from.max(other))
					}
					Endpoint::Sink(s) => (1, edge.from, s),
				};
				prop_assert!(pairs.insert(key), "duplicate edge {:?}", edge);
			}

			let c = t.connectivity_percent();
			prop_assert!(c <= 100);
		}
	}
}
