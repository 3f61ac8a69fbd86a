//! Input bounds and defaults for every user-controlled parameter.
//!
//! Pages clamp raw control values through these bounds before handing them
//! to the model, so model code can assume its inputs are in range.

use std::time::Duration;

/// Inclusive range an input is held to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds<T> {
	pub min: T,
	pub max: T,
	pub default: T,
}

impl<T: PartialOrd + Copy> Bounds<T> {
	pub const fn new(min: T, max: T, default: T) -> Self {
		Self { min, max, default }
	}

	pub fn clamp(&self, value: T) -> T {
		if value < self.min {
			self.min
		} else if value > self.max {
			self.max
		} else {
			value
		}
	}
}

impl Bounds<u32> {
	/// Parse a control's text value, falling back to the default on garbage.
	pub fn parse_clamped(&self, raw: &str) -> u32 {
		raw.trim()
			.parse::<u32>()
			.map(|v| self.clamp(v))
			.unwrap_or(self.default)
	}
}

// Topology page
pub const TOPOLOGY_NODE_COUNT: Bounds<u32> = Bounds::new(10, 150, 50);
pub const TOPOLOGY_SINK_COUNT: Bounds<u32> = Bounds::new(1, 5, 1);
/// Metres.
pub const CONNECTION_RANGE: Bounds<u32> = Bounds::new(100, 500, 200);
pub const CONNECTION_RANGE_STEP: u32 = 50;
/// Range used for the node view on the simulation page.
pub const SIM_VIEW_RANGE: f64 = 300.0;

// Simulation page
pub const SIM_NODE_COUNT: Bounds<u32> = Bounds::new(1, 150, 5);
pub const SIM_PACKET_SIZE: Bounds<u32> = Bounds::new(16, 1024, 64);
pub const SIM_SPEED: Bounds<u32> = Bounds::new(1, 100, 50);
pub const TICK_INTERVAL: Duration = Duration::from_millis(200);

// Energy page
pub const ENERGY_NODE_COUNT: Bounds<u32> = Bounds::new(10, 200, 100);
pub const ENERGY_MINUTES: Bounds<u32> = Bounds::new(5, 120, 30);

// Trends page
pub const TREND_DAYS: Bounds<u32> = Bounds::new(7, 90, 30);
pub const TREND_NODE_COUNT: Bounds<u32> = Bounds::new(10, 150, 50);

/// At most this many protocols are overlaid on the comparison page.
pub const MAX_COMPARED_PROTOCOLS: usize = 3;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn clamp_holds_values_inside_bounds() {
		assert_eq!(TOPOLOGY_NODE_COUNT.clamp(3), 10);
		assert_eq!(TOPOLOGY_NODE_COUNT.clamp(400), 150);
		assert_eq!(TOPOLOGY_NODE_COUNT.clamp(77), 77);
		assert_eq!(CONNECTION_RANGE.clamp(1000), 500);
	}

	#[test]
	fn parse_clamped_falls_back_to_default() {
		assert_eq!(SIM_PACKET_SIZE.parse_clamped("abc"), 64);
		assert_eq!(SIM_PACKET_SIZE.parse_clamped(" 2048 "), 1024);
		assert_eq!(SIM_SPEED.parse_clamped("0"), 1);
		assert_eq!(CONNECTION_RANGE.parse_clamped("-5"), 200);
		assert_eq!(CONNECTION_RANGE.parse_clamped("350"), 350);
	}

	#[test]
	fn defaults_are_within_bounds() {
		for b in [
			TOPOLOGY_NODE_COUNT,
			TOPOLOGY_SINK_COUNT,
			SIM_NODE_COUNT,
			SIM_PACKET_SIZE,
			SIM_SPEED,
			ENERGY_NODE_COUNT,
			ENERGY_MINUTES,
			TREND_DAYS,
			TREND_NODE_COUNT,
			CONNECTION_RANGE,
		] {
			assert_eq!(b.clamp(b.default), b.default, "{b:?}");
		}
	}
}
