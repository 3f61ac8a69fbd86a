//! Energy and packet accrual for the simulation page.
//!
//! The page owns the 200 ms timer; every tick calls [`Simulation::step`],
//! which is the only place the accumulator changes.

use log::info;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::protocol::Protocol;
use super::topology::Vec3;

/// Energy budget of the most loaded node, in joules.
pub const BATTERY_CAPACITY_J: f64 = 50.0;
/// Simulated seconds per tick at speed 50.
pub const BASE_TIME_STEP: f64 = 0.2;
pub const REFERENCE_SPEED: f64 = 50.0;
/// Max energy grows this much faster than the average.
pub const PEAK_LOAD_FACTOR: f64 = 1.5;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationConfig {
	pub node_count: u32,
	pub protocol: Protocol,
	/// Bytes.
	pub packet_size: u32,
	/// 1..=100, 50 is real time.
	pub speed: u32,
}

impl SimulationConfig {
	fn speed_scale(&self) -> f64 {
		self.speed as f64 / REFERENCE_SPEED
	}

	fn time_step(&self) -> f64 {
		BASE_TIME_STEP * self.speed_scale()
	}

	/// Energy added in one tick before the random term.
	fn fixed_energy_increase(&self) -> f64 {
		let dt = self.time_step();
		let base = 0.05 * dt;
		let speed = self.speed_scale() * 0.05 * dt;
		let nodes = self.node_count as f64 / 10.0 * 0.02 * dt;
		(base + speed + nodes) * self.protocol.energy_factor()
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SimulationStatus {
	#[default]
	Idle,
	Running,
	BatteryDepleted,
}

/// Running totals. Only [`Simulation::step`] writes these.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Accumulator {
	/// Simulated seconds.
	pub elapsed: f64,
	pub packets_sent: u64,
	pub packets_received: u64,
	pub avg_energy: f64,
	pub max_energy: f64,
	/// Fractional packets not yet counted, so low speeds still accrue.
	pub sent_carry: f64,
	pub received_carry: f64,
}

impl Accumulator {
	pub fn delivery_ratio_percent(&self) -> u32 {
		if self.packets_sent == 0 {
			return 0;
		}
		(self.packets_received as f64 / self.packets_sent as f64 * 100.0).round() as u32
	}

	pub fn remaining_battery_percent(&self) -> u32 {
		((1.0 - self.max_energy / BATTERY_CAPACITY_J) * 100.0)
			.round()
			.max(0.0) as u32
	}
}

/// One logged tick, exactly as exported.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Reading {
	#[serde(rename = "Timestamp(s)")]
	pub timestamp: f64,
	#[serde(rename = "AvgEnergy(J)")]
	pub avg_energy: f64,
	#[serde(rename = "MaxEnergy(J)")]
	pub max_energy: f64,
	#[serde(rename = "NodeCount")]
	pub node_count: u32,
	#[serde(rename = "Protocol")]
	pub protocol: Protocol,
	#[serde(rename = "PacketSize(bytes)")]
	pub packet_size: u32,
	#[serde(rename = "SimSpeed")]
	pub speed: u32,
	#[serde(rename = "PacketsSent")]
	pub packets_sent: u64,
	#[serde(rename = "PacketsReceived")]
	pub packets_received: u64,
	#[serde(rename = "DeliveryRatio(%)")]
	pub delivery_ratio: u32,
	#[serde(rename = "RemainingBattery(%)")]
	pub remaining_battery: u32,
}

fn round_to(value: f64, places: i32) -> f64 {
	let scale = 10f64.powi(places);
	(value * scale).round() / scale
}

impl Reading {
	fn capture(config: &SimulationConfig, acc: &Accumulator) -> Self {
		Self {
			timestamp: round_to(acc.elapsed, 1),
			avg_energy: round_to(acc.avg_energy, 2),
			max_energy: round_to(acc.max_energy, 2),
			node_count: config.node_count,
			protocol: config.protocol,
			packet_size: config.packet_size,
			speed: config.speed,
			packets_sent: acc.packets_sent,
			packets_received: acc.packets_received,
			delivery_ratio: acc.delivery_ratio_percent(),
			remaining_battery: acc.remaining_battery_percent(),
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub enum TickOutcome {
	Recorded(Reading),
	BatteryDepleted,
	/// Tick arrived while not running; nothing changed.
	Ignored,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Simulation {
	config: SimulationConfig,
	status: SimulationStatus,
	acc: Accumulator,
	readings: Vec<Reading>,
}

impl Simulation {
	pub fn new(config: SimulationConfig) -> Self {
		Self {
			config,
			status: SimulationStatus::Idle,
			acc: Accumulator::default(),
			readings: Vec::new(),
		}
	}

	pub fn config(&self) -> &SimulationConfig {
		&self.config
	}

	pub fn status(&self) -> SimulationStatus {
		self.status
	}

	pub fn is_running(&self) -> bool {
		self.status == SimulationStatus::Running
	}

	pub fn accumulator(&self) -> &Accumulator {
		&self.acc
	}

	pub fn readings(&self) -> &[Reading] {
		&self.readings
	}

	/// Looping 0..100 value for progress feedback.
	pub fn progress(&self) -> f64 {
		self.acc.elapsed % 100.0
	}

	/// Settings only change between runs.
	pub fn reconfigure(&mut self, config: SimulationConfig) {
		if !self.is_running() {
			self.config = config;
		}
	}

	/// Apply `config` and start, whatever the current status.
	pub fn start_with(&mut self, config: SimulationConfig) {
		self.config = config;
		self.start();
	}

	/// Clear all counters and log the zero reading.
	pub fn start(&mut self) {
		self.acc = Accumulator::default();
		self.readings.clear();
		self.readings.push(Reading::capture(&self.config, &self.acc));
		self.status = SimulationStatus::Running;
		info!(
			"simulation started: {} with {} nodes at speed {}",
			self.config.protocol, self.config.node_count, self.config.speed
		);
	}

	/// Pause without discarding the log, so it can still be exported.
	pub fn stop(&mut self) {
		if self.is_running() {
			self.status = SimulationStatus::Idle;
		}
	}

	pub fn reset(&mut self) {
		self.acc = Accumulator::default();
		self.readings.clear();
		self.status = SimulationStatus::Idle;
	}

	/// Advance one tick.
	pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> TickOutcome {
		if !self.is_running() {
			return TickOutcome::Ignored;
		}
		let cfg = self.config;
		let dt = cfg.time_step();
		let scale = cfg.speed_scale();

		let burst = rng.random_range(1..=3u32) as f64 * scale;
		let noise = 0.9 + rng.random::<f64>() * 0.2;
		let sent_exact = burst + self.acc.sent_carry;
		let received_exact = burst * cfg.protocol.delivery_efficiency() * noise + self.acc.received_carry;
		let (sent, received) = (sent_exact.floor(), received_exact.floor());

		let variation = rng.random::<f64>() * 0.03 * dt * cfg.protocol.energy_factor();
		let increase = cfg.fixed_energy_increase() + variation;
		let max_energy = self.acc.max_energy + increase * PEAK_LOAD_FACTOR;

		if max_energy >= BATTERY_CAPACITY_J {
			self.status = SimulationStatus::BatteryDepleted;
			info!(
				"battery depleted after {:.1}s ({} readings)",
				self.acc.elapsed,
				self.readings.len()
			);
			return TickOutcome::BatteryDepleted;
		}

		self.acc.elapsed += dt;
		self.acc.packets_sent += sent as u64;
		self.acc.packets_received = (self.acc.packets_received + received as u64).min(self.acc.packets_sent);
		self.acc.sent_carry = sent_exact - sent;
		self.acc.received_carry = received_exact - received;
		self.acc.avg_energy += increase;
		self.acc.max_energy = max_energy;

		let reading = Reading::capture(&cfg, &self.acc);
		self.readings.push(reading.clone());
		TickOutcome::Recorded(reading)
	}
}

/// Upper bound on ticks before depletion, from the smallest possible
/// per-tick energy increase.
pub fn tick_upper_bound(config: &SimulationConfig) -> u64 {
	let min_step = config.fixed_energy_increase() * PEAK_LOAD_FACTOR;
	if min_step <= 0.0 {
		return u64::MAX;
	}
	(BATTERY_CAPACITY_J / min_step).ceil() as u64 + 1
}

/// Slowly drifting water current for a wall-clock time in ms.
pub fn water_current(t_ms: f64) -> Vec3 {
	Vec3::new(
		(t_ms / 10_000.0).sin() * 0.5,
		(t_ms / 12_000.0).cos() * 0.3,
		(t_ms / 15_000.0).sin() * 0.2,
	)
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;

	fn config(protocol: Protocol, speed: u32, node_count: u32) -> SimulationConfig {
		SimulationConfig {
			node_count,
			protocol,
			packet_size: 64,
			speed,
		}
	}

	fn run_to_depletion(sim: &mut Simulation, rng: &mut StdRng) -> u64 {
		let bound = tick_upper_bound(sim.config());
		let mut ticks = 0;
		loop {
			ticks += 1;
			assert!(ticks <= bound, "no depletion within {bound} ticks");
			match sim.step(rng) {
				TickOutcome::Recorded(r) => assert!(r.packets_received <= r.packets_sent),
				TickOutcome::BatteryDepleted => return ticks,
				TickOutcome::Ignored => panic!("running simulation ignored a tick"),
			}
		}
	}

	#[test]
	fn test_idle_simulation_ignores_ticks() {
		let mut rng = StdRng::seed_from_u64(1);
		let mut sim = Simulation::new(config(Protocol::Vbf, 50, 5));
		assert_eq!(sim.step(&mut rng), TickOutcome::Ignored);
		assert!(sim.readings().is_empty());
	}

	#[test]
	fn test_start_logs_zero_reading() {
		let mut sim = Simulation::new(config(Protocol::Hhvbf, 50, 5));
		sim.start();
		assert_eq!(sim.status(), SimulationStatus::Running);
		let r = &sim.readings()[0];
		assert_eq!(r.timestamp, 0.0);
		assert_eq!(r.packets_sent, 0);
		assert_eq!(r.delivery_ratio, 0);
		assert_eq!(r.remaining_battery, 100);
		assert_eq!(r.protocol, Protocol::Hhvbf);
	}

	#[test]
	fn test_reading_reflects_same_tick_counters() {
		let mut rng = StdRng::seed_from_u64(2);
		let mut sim = Simulation::new(config(Protocol::Eedbr, 50, 5));
		sim.start();
		for _ in 0..20 {
			let TickOutcome::Recorded(r) = sim.step(&mut rng) else {
				panic!("depleted too early");
			};
			let acc = sim.accumulator();
			assert_eq!(r.packets_sent, acc.packets_sent);
			assert_eq!(r.packets_received, acc.packets_received);
			assert_eq!(r.delivery_ratio, acc.delivery_ratio_percent());
		}
		assert_eq!(sim.readings().len(), 21);
	}

	#[test]
	fn test_runs_until_battery_depleted() {
		let mut rng = StdRng::seed_from_u64(3);
		let mut sim = Simulation::new(config(Protocol::Olsr, 100, 150));
		sim.start();
		run_to_depletion(&mut sim, &mut rng);
		assert_eq!(sim.status(), SimulationStatus::BatteryDepleted);
		let last_logged = sim.readings().last().map(|r| r.timestamp);
		assert_eq!(last_logged, Some(round_to(sim.accumulator().elapsed, 1)));
		assert!(sim.accumulator().max_energy < BATTERY_CAPACITY_J);
		assert_eq!(sim.step(&mut rng), TickOutcome::Ignored);

		let last = sim.readings().last().unwrap();
		assert!(last.remaining_battery <= 100);
	}

	#[test]
	fn test_max_energy_strictly_increases() {
		let mut rng = StdRng::seed_from_u64(4);
		let mut sim = Simulation::new(config(Protocol::Dbr, 25, 20));
		sim.start();
		let mut last = 0.0;
		while let TickOutcome::Recorded(_) = sim.step(&mut rng) {
			let now = sim.accumulator().max_energy;
			assert!(now > last);
			last = now;
		}
	}

	#[test]
	fn test_reset_returns_to_idle() {
		let mut rng = StdRng::seed_from_u64(5);
		let mut sim = Simulation::new(config(Protocol::Vbf, 50, 5));
		sim.start();
		sim.step(&mut rng);
		sim.reset();
		assert_eq!(sim.status(), SimulationStatus::Idle);
		assert!(sim.readings().is_empty());
		assert_eq!(*sim.accumulator(), Accumulator::default());
	}

	#[test]
	fn test_start_with_applies_settings_changed_mid_run() {
		let mut sim = Simulation::new(config(Protocol::Vbf, 50, 5));
		sim.start();
		sim.reconfigure(config(Protocol::Vbf, 80, 5));
		assert_eq!(sim.config().speed, 50);
		sim.stop();
		sim.start_with(config(Protocol::Vbf, 80, 5));
		assert_eq!(sim.config().speed, 80);
		assert_eq!(sim.readings()[0].speed, 80);
	}

	#[test]
	fn test_sent_rate_does_not_depend_on_speed() {
		for speed in [1, 5, 12, 25, 50, 100] {
			let mut rng = StdRng::seed_from_u64(speed as u64);
			let mut sim = Simulation::new(config(Protocol::Vbf, speed, 5));
			sim.start();
			for _ in 0..400 {
				if sim.step(&mut rng) == TickOutcome::BatteryDepleted {
					break;
				}
			}
			let acc = sim.accumulator();
			// two packets per 0.2 simulated seconds on average
			let rate = acc.packets_sent as f64 / acc.elapsed;
			assert!((7.0..=13.0).contains(&rate), "speed {speed}: {rate} packets/s");
			assert!(acc.packets_received <= acc.packets_sent);
		}
	}

	#[test]
	fn test_stop_keeps_log() {
		let mut rng = StdRng::seed_from_u64(6);
		let mut sim = Simulation::new(config(Protocol::Dbr, 50, 5));
		sim.start();
		sim.step(&mut rng);
		sim.stop();
		assert_eq!(sim.status(), SimulationStatus::Idle);
		assert_eq!(sim.readings().len(), 2);
		assert_eq!(sim.step(&mut rng), TickOutcome::Ignored);
	}

	#[test]
	fn test_reconfigure_is_blocked_while_running() {
		let mut sim = Simulation::new(config(Protocol::Vbf, 50, 5));
		sim.start();
		sim.reconfigure(config(Protocol::Olsr, 10, 5));
		assert_eq!(sim.config().protocol, Protocol::Vbf);
		sim.reset();
		sim.reconfigure(config(Protocol::Olsr, 10, 5));
		assert_eq!(sim.config().protocol, Protocol::Olsr);
	}

	#[test]
	fn test_water_current_is_bounded() {
		for t in [0.0, 1_000.0, 123_456.0, 9.9e9] {
			let c = water_current(t);
			assert!(c.x.abs() <= 0.5 && c.y.abs() <= 0.3 && c.z.abs() <= 0.2);
		}
	}

	proptest! {
		#![proptest_config(ProptestConfig::with_cases(24))]

		#[test]
		fn prop_accrual_invariants(
			protocol in prop_oneof![
				Just(Protocol::Vbf),
				Just(Protocol::Hhvbf),
				Just(Protocol::Dbr),
				Just(Protocol::Eedbr),
				Just(Protocol::Olsr),
			],
			speed in 20u32..=100,
			node_count in 1u32..=150,
			seed in any::<u64>(),
		) {
			let mut rng = StdRng::seed_from_u64(seed);
			let mut sim = Simulation::new(config(protocol, speed, node_count));
			sim.start();
			let ticks = run_to_depletion(&mut sim, &mut rng);
			prop_assert!(ticks <= tick_upper_bound(sim.config()));
			for pair in sim.readings().windows(2) {
				prop_assert!(pair[1].packets_sent >= pair[0].packets_sent);
				prop_assert!(pair[1].timestamp >= pair[0].timestamp);
			}
		}
	}
}
