//! Chart series in the `{labels, datasets}` shape the canvas chart draws.
//!
//! Generators that add noise take the random source as a parameter, like
//! the topology builder.

use rand::Rng;

use super::protocol::{EnergyBreakdown, Protocol};

pub const GREEN: &str = "rgba(0, 255, 0, 1)";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChartKind {
	#[default]
	Line,
	Bar,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
	pub label: String,
	pub data: Vec<f64>,
	/// CSS colour string.
	pub color: String,
	/// Shade the area under a line.
	pub fill: bool,
}

impl Dataset {
	pub fn new(label: impl Into<String>, data: Vec<f64>, color: impl Into<String>) -> Self {
		Self {
			label: label.into(),
			data,
			color: color.into(),
			fill: false,
		}
	}

	pub fn filled(mut self) -> Self {
		self.fill = true;
		self
	}
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChartData {
	pub labels: Vec<String>,
	pub datasets: Vec<Dataset>,
}

impl ChartData {
	/// Largest value across all datasets, 0 when empty.
	pub fn max_value(&self) -> f64 {
		self.datasets
			.iter()
			.flat_map(|d| d.data.iter().copied())
			.fold(0.0, f64::max)
	}
}

/// Stable colour per protocol for multi-protocol charts.
pub fn protocol_color(protocol: Protocol) -> &'static str {
	match protocol {
		Protocol::Vbf => "rgba(0, 255, 0, 0.8)",
		Protocol::Dbr => "rgba(0, 200, 255, 0.8)",
		Protocol::Eedbr => "rgba(255, 255, 0, 0.8)",
		Protocol::Olsr => "rgba(255, 0, 255, 0.8)",
		Protocol::Hhvbf => "rgba(255, 150, 0, 0.8)",
	}
}

fn protocol_labels() -> Vec<String> {
	Protocol::ALL.iter().map(|p| p.code().to_string()).collect()
}

fn round2(v: f64) -> f64 {
	(v * 100.0).round() / 100.0
}

fn round1(v: f64) -> f64 {
	(v * 10.0).round() / 10.0
}

/// Uniform in `[0.95, 1.05)`.
fn noise<R: Rng + ?Sized>(rng: &mut R) -> f64 {
	0.95 + rng.random::<f64>() * 0.1
}

/// Cumulative energy per minute for one protocol.
pub fn energy_consumption<R: Rng + ?Sized>(
	protocol: Protocol,
	node_count: u32,
	minutes: u32,
	rng: &mut R,
) -> ChartData {
	let per_minute = protocol.base_energy_per_minute() * (node_count as f64 / 100.0);
	let labels = (0..=minutes).map(|m| m.to_string()).collect();
	let data = (0..=minutes)
		.map(|m| round2(per_minute * m as f64 * noise(rng)))
		.collect();
	ChartData {
		labels,
		datasets: vec![Dataset::new("Energy Consumption (J)", data, GREEN).filled()],
	}
}

pub fn energy_breakdown(protocol: Protocol) -> ChartData {
	ChartData {
		labels: EnergyBreakdown::LABELS.iter().map(|s| s.to_string()).collect(),
		datasets: vec![Dataset::new(
			"Energy Percentage",
			protocol.energy_breakdown().values().to_vec(),
			GREEN,
		)],
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnergyStats {
	pub per_packet: f64,
	pub per_node: f64,
	pub per_hour: f64,
	/// Joules for the whole network over the window.
	pub network_total: f64,
	/// Hours, scaled from the 100 node reference.
	pub estimated_lifetime: f64,
}

pub fn energy_stats(protocol: Protocol, node_count: u32, minutes: u32) -> EnergyStats {
	let profile = protocol.energy_profile();
	let node_factor = (node_count.max(1)) as f64 / 100.0;
	EnergyStats {
		per_packet: profile.per_packet,
		per_node: profile.per_node,
		per_hour: profile.per_node * 60.0,
		network_total: round2(profile.per_node * node_count as f64 * minutes as f64 / 60.0),
		estimated_lifetime: (profile.lifetime_hours / node_factor).round(),
	}
}

pub fn performance_overview() -> ChartData {
	let series = |f: fn(&Protocol) -> f64| Protocol::ALL.iter().map(f).collect::<Vec<_>>();
	ChartData {
		labels: protocol_labels(),
		datasets: vec![
			Dataset::new(
				"Energy Efficiency",
				series(|p| p.metrics().energy_efficiency),
				"rgba(0, 255, 0, 0.7)",
			),
			Dataset::new(
				"Delivery Ratio",
				series(|p| p.metrics().delivery_ratio),
				"rgba(100, 255, 100, 0.7)",
			),
			Dataset::new(
				"Network Lifetime",
				series(|p| p.metrics().network_lifetime),
				"rgba(0, 200, 0, 0.7)",
			),
		],
	}
}

pub const LATENCY_NODE_COUNTS: [u32; 7] = [20, 40, 60, 80, 100, 120, 140];

/// End-to-end latency (ms) against node count.
pub fn latency_by_node_count() -> ChartData {
	let rows: [(Protocol, [f64; 7], &str); 3] = [
		(
			Protocol::Vbf,
			[110.0, 125.0, 140.0, 156.0, 172.0, 185.0, 197.0],
			"rgba(0, 255, 0, 1)",
		),
		(
			Protocol::Dbr,
			[130.0, 152.0, 170.0, 187.0, 205.0, 218.0, 230.0],
			"rgba(0, 170, 0, 1)",
		),
		(
			Protocol::Olsr,
			[100.0, 116.0, 130.0, 143.0, 158.0, 170.0, 185.0],
			"rgba(120, 255, 120, 1)",
		),
	];
	ChartData {
		labels: LATENCY_NODE_COUNTS.iter().map(|n| n.to_string()).collect(),
		datasets: rows
			.into_iter()
			.map(|(p, data, color)| Dataset::new(p.code(), data.to_vec(), color).filled())
			.collect(),
	}
}

/// Throughput (kbps) by protocol at three densities.
pub fn throughput_by_density() -> ChartData {
	ChartData {
		labels: protocol_labels(),
		datasets: vec![
			Dataset::new(
				"Low Density (50 nodes)",
				vec![580.0, 520.0, 540.0, 620.0, 560.0],
				"rgba(0, 255, 0, 0.7)",
			),
			Dataset::new(
				"Medium Density (100 nodes)",
				vec![520.0, 470.0, 490.0, 580.0, 510.0],
				"rgba(0, 200, 0, 0.7)",
			),
			Dataset::new(
				"High Density (150 nodes)",
				vec![450.0, 410.0, 430.0, 520.0, 440.0],
				"rgba(0, 150, 0, 0.7)",
			),
		],
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TrendMetric {
	#[default]
	Latency,
	Throughput,
	PacketDelivery,
	EnergyEfficiency,
}

impl TrendMetric {
	pub const ALL: [TrendMetric; 4] = [
		TrendMetric::Latency,
		TrendMetric::Throughput,
		TrendMetric::PacketDelivery,
		TrendMetric::EnergyEfficiency,
	];

	pub fn title(self) -> &'static str {
		match self {
			TrendMetric::Latency => "Latency (ms)",
			TrendMetric::Throughput => "Throughput (kbps)",
			TrendMetric::PacketDelivery => "Packet Delivery Ratio (%)",
			TrendMetric::EnergyEfficiency => "Energy Efficiency (%)",
		}
	}

	fn base(self, p: Protocol) -> f64 {
		use Protocol::*;
		match (self, p) {
			(TrendMetric::Latency, Vbf) => 120.0,
			(TrendMetric::Latency, Dbr) => 100.0,
			(TrendMetric::Latency, Eedbr) => 90.0,
			(TrendMetric::Latency, Olsr) => 150.0,
			(TrendMetric::Latency, Hhvbf) => 110.0,
			(TrendMetric::Throughput, Vbf) => 65.0,
			(TrendMetric::Throughput, Dbr) => 75.0,
			(TrendMetric::Throughput, Eedbr) => 85.0,
			(TrendMetric::Throughput, Olsr) => 60.0,
			(TrendMetric::Throughput, Hhvbf) => 70.0,
			(TrendMetric::PacketDelivery, Vbf) => 85.0,
			(TrendMetric::PacketDelivery, Dbr) => 88.0,
			(TrendMetric::PacketDelivery, Eedbr) => 92.0,
			(TrendMetric::PacketDelivery, Olsr) => 80.0,
			(TrendMetric::PacketDelivery, Hhvbf) => 87.0,
			(TrendMetric::EnergyEfficiency, Vbf) => 70.0,
			(TrendMetric::EnergyEfficiency, Dbr) => 75.0,
			(TrendMetric::EnergyEfficiency, Eedbr) => 85.0,
			(TrendMetric::EnergyEfficiency, Olsr) => 60.0,
			(TrendMetric::EnergyEfficiency, Hhvbf) => 72.0,
		}
	}

	/// Multipliers applied over successive slices of the time range.
	fn factors(self, p: Protocol) -> [f64; 7] {
		use Protocol::*;
		match (self, p) {
			(TrendMetric::Latency, Vbf) => [1.0, 0.98, 0.97, 0.96, 0.95, 0.94, 0.93],
			(TrendMetric::Latency, Dbr) => [1.0, 0.97, 0.95, 0.93, 0.92, 0.91, 0.90],
			(TrendMetric::Latency, Eedbr) => [1.0, 0.96, 0.94, 0.92, 0.90, 0.89, 0.88],
			(TrendMetric::Latency, Olsr) => [1.0, 0.99, 0.98, 0.97, 0.96, 0.95, 0.94],
			(TrendMetric::Latency, Hhvbf) => [1.0, 0.97, 0.96, 0.94, 0.93, 0.92, 0.91],
			(TrendMetric::Throughput, Vbf) => [1.0, 1.02, 1.03, 1.04, 1.05, 1.06, 1.07],
			(TrendMetric::Throughput, Dbr) => [1.0, 1.03, 1.05, 1.07, 1.08, 1.09, 1.10],
			(TrendMetric::Throughput, Eedbr) => [1.0, 1.04, 1.06, 1.08, 1.10, 1.11, 1.12],
			(TrendMetric::Throughput, Olsr) => [1.0, 1.01, 1.02, 1.03, 1.04, 1.05, 1.06],
			(TrendMetric::Throughput, Hhvbf) => [1.0, 1.03, 1.04, 1.06, 1.07, 1.08, 1.09],
			(TrendMetric::PacketDelivery, Vbf) => [1.0, 1.01, 1.02, 1.03, 1.04, 1.05, 1.06],
			(TrendMetric::PacketDelivery, Dbr) => [1.0, 1.02, 1.03, 1.04, 1.05, 1.06, 1.07],
			(TrendMetric::PacketDelivery, Eedbr) => [1.0, 1.01, 1.02, 1.03, 1.04, 1.05, 1.06],
			(TrendMetric::PacketDelivery, Olsr) => [1.0, 1.01, 1.02, 1.03, 1.03, 1.04, 1.04],
			(TrendMetric::PacketDelivery, Hhvbf) => [1.0, 1.02, 1.03, 1.04, 1.05, 1.06, 1.07],
			(TrendMetric::EnergyEfficiency, Vbf) => [1.0, 1.02, 1.03, 1.04, 1.05, 1.06, 1.07],
			(TrendMetric::EnergyEfficiency, Dbr) => [1.0, 1.03, 1.04, 1.06, 1.07, 1.08, 1.09],
			(TrendMetric::EnergyEfficiency, Eedbr) => [1.0, 1.04, 1.06, 1.08, 1.10, 1.11, 1.12],
			(TrendMetric::EnergyEfficiency, Olsr) => [1.0, 1.01, 1.02, 1.03, 1.04, 1.05, 1.06],
			(TrendMetric::EnergyEfficiency, Hhvbf) => [1.0, 1.02, 1.04, 1.05, 1.06, 1.07, 1.08],
		}
	}
}

/// Daily values of `metric` for every protocol over the last `days` days.
/// Labels run from `-days` to `0` (today).
pub fn performance_trend<R: Rng + ?Sized>(
	metric: TrendMetric,
	days: u32,
	node_count: u32,
	rng: &mut R,
) -> ChartData {
	let labels = (0..=days)
		.map(|i| {
			let offset = days - i;
			if offset == 0 {
				"Today".to_string()
			} else {
				format!("-{}d", offset)
			}
		})
		.collect();
	let density = 1.0 + (node_count as f64 - 50.0) / 200.0;

	let datasets = Protocol::ALL
		.iter()
		.map(|&p| {
			let factors = metric.factors(p);
			let slice = (days as usize / factors.len()).max(1);
			let data = (0..=days as usize)
				.map(|i| {
					let trend = metric.base(p) * factors[(i / slice).min(factors.len() - 1)];
					round1(trend * noise(rng) * density)
				})
				.collect();
			Dataset::new(p.code(), data, protocol_color(p))
		})
		.collect();

	ChartData { labels, datasets }
}

pub const RADAR_AXES: [&str; 6] = [
	"Energy Efficiency",
	"Delivery Ratio",
	"Low Delay",
	"Scalability",
	"Low Control Overhead",
	"Network Lifetime",
];

/// Comparison scores on [`RADAR_AXES`], drawn as grouped bars.
pub fn protocol_scores(protocols: &[Protocol]) -> ChartData {
	ChartData {
		labels: RADAR_AXES.iter().map(|s| s.to_string()).collect(),
		datasets: protocols
			.iter()
			.map(|&p| {
				let m = p.metrics();
				Dataset::new(
					p.code(),
					vec![
						m.energy_efficiency,
						m.delivery_ratio,
						100.0 - m.delay / 4.0,
						m.scalability,
						m.control_overhead,
						m.network_lifetime,
					],
					protocol_color(p),
				)
			})
			.collect(),
	}
}

/// Delivery ratio decay with network size; floors at 50 %.
pub fn scalability(protocols: &[Protocol]) -> ChartData {
	ChartData {
		labels: LATENCY_NODE_COUNTS.iter().map(|n| n.to_string()).collect(),
		datasets: protocols
			.iter()
			.map(|&p| {
				let m = p.metrics();
				let s = m.scalability / 100.0;
				let data = LATENCY_NODE_COUNTS
					.iter()
					.map(|&n| {
						let decay = (1.0 - s) * (n as f64 / 20.0).ln() * 0.1;
						(m.delivery_ratio * (1.0 - decay)).max(50.0)
					})
					.collect();
				Dataset::new(p.code(), data, protocol_color(p))
			})
			.collect(),
	}
}

pub const MONTHS: [&str; 12] = [
	"Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Monthly energy use per protocol for the analytics page.
pub fn monthly_energy<R: Rng + ?Sized>(rng: &mut R) -> ChartData {
	ChartData {
		labels: MONTHS.iter().map(|m| m.to_string()).collect(),
		datasets: Protocol::ALL
			.iter()
			.map(|&p| {
				let span = if p == Protocol::Eedbr { 80.0 } else { 100.0 };
				let data = (0..MONTHS.len())
					.map(|_| round1(rng.random::<f64>() * span + 20.0))
					.collect();
				Dataset::new(p.code(), data, protocol_color(p))
			})
			.collect(),
	}
}

/// Network-wide radio-state split shown on the analytics page.
pub fn energy_distribution() -> ChartData {
	ChartData {
		labels: ["Transmission", "Reception", "Processing", "Idle", "Sleep"]
			.iter()
			.map(|s| s.to_string())
			.collect(),
		datasets: vec![Dataset::new(
			"Energy Distribution (%)",
			vec![35.0, 25.0, 20.0, 15.0, 5.0],
			GREEN,
		)],
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;

	fn assert_shape(chart: &ChartData) {
		for d in &chart.datasets {
			assert_eq!(d.data.len(), chart.labels.len(), "{}", d.label);
		}
	}

	#[test]
	fn test_energy_consumption_grows_from_zero() {
		let mut rng = StdRng::seed_from_u64(1);
		let chart = energy_consumption(Protocol::Vbf, 100, 30, &mut rng);
		assert_shape(&chart);
		assert_eq!(chart.labels.len(), 31);
		let data = &chart.datasets[0].data;
		assert_eq!(data[0], 0.0);
		// 0.12 J/min at 100 nodes, +-5 %
		assert!(data[30] >= 0.12 * 30.0 * 0.95 - 0.01);
		assert!(data[30] <= 0.12 * 30.0 * 1.05 + 0.01);
	}

	#[test]
	fn test_energy_stats_scale_with_nodes() {
		let s = energy_stats(Protocol::Eedbr, 200, 60);
		assert_eq!(s.estimated_lifetime, 190.0);
		assert_eq!(s.network_total, 16.0);
		assert!((s.per_hour - 4.8).abs() < 1e-9);
	}

	#[test]
	fn test_static_charts_are_well_formed() {
		for chart in [
			performance_overview(),
			latency_by_node_count(),
			throughput_by_density(),
			energy_breakdown(Protocol::Olsr),
			energy_distribution(),
			protocol_scores(&Protocol::ALL),
			scalability(&Protocol::ALL),
		] {
			assert_shape(&chart);
			assert!(chart.max_value() > 0.0);
		}
	}

	#[test]
	fn test_trend_covers_every_day_and_protocol() {
		let mut rng = StdRng::seed_from_u64(2);
		let chart = performance_trend(TrendMetric::Throughput, 30, 50, &mut rng);
		assert_shape(&chart);
		assert_eq!(chart.labels.first().map(String::as_str), Some("-30d"));
		assert_eq!(chart.labels.last().map(String::as_str), Some("Today"));
		assert_eq!(chart.datasets.len(), Protocol::ALL.len());
		// last slice uses the final factor: EEDBR 85 * 1.12 +-5 %
		let eedbr = &chart.datasets[2];
		assert_eq!(eedbr.label, "EEDBR");
		let last = *eedbr.data.last().unwrap();
		assert!(last > 85.0 * 1.12 * 0.94 && last < 85.0 * 1.12 * 1.06);
	}

	#[test]
	fn test_scalability_is_monotone_and_floored() {
		let chart = scalability(&Protocol::ALL);
		for d in &chart.datasets {
			assert_eq!(d.data[0], Protocol::ALL.iter().find(|p| p.code() == d.label).unwrap().metrics().delivery_ratio);
			for w in d.data.windows(2) {
				assert!(w[1] <= w[0]);
				assert!(w[1] >= 50.0);
			}
		}
	}

	#[test]
	fn test_low_delay_score_inverts_delay() {
		let chart = protocol_scores(&[Protocol::Olsr]);
		assert_eq!(chart.datasets[0].data[2], 100.0 - 143.0 / 4.0);
	}

	#[test]
	fn test_monthly_energy_range() {
		let mut rng = StdRng::seed_from_u64(3);
		let chart = monthly_energy(&mut rng);
		assert_shape(&chart);
		for v in chart.datasets.iter().flat_map(|d| d.data.iter()) {
			assert!((20.0..=120.0).contains(v));
		}
	}
}
