//! CSV export of the simulation reading log.
//!
//! Layout: `# key: value` metadata lines, one header row, one row per
//! [`Reading`]. [`parse_readings`] skips the comment lines and reads the
//! rows back.

use log::info;

use super::protocol::Protocol;
use super::simulation::{BATTERY_CAPACITY_J, Reading};
use crate::error::Result;

pub const COLUMNS: [&str; 11] = [
	"Timestamp(s)",
	"AvgEnergy(J)",
	"MaxEnergy(J)",
	"NodeCount",
	"Protocol",
	"PacketSize(bytes)",
	"SimSpeed",
	"PacketsSent",
	"PacketsReceived",
	"DeliveryRatio(%)",
	"RemainingBattery(%)",
];

/// Run description written above the header row.
#[derive(Clone, Debug, PartialEq)]
pub struct ExportMetadata {
	/// Already formatted by the caller, usually the browser locale string.
	pub generated_at: String,
	pub protocol: Protocol,
	pub node_count: u32,
	pub packet_size: u32,
	/// Simulated seconds.
	pub duration: f64,
}

impl ExportMetadata {
	fn lines(&self) -> Vec<String> {
		vec![
			"# UWSN Simulation Results".to_string(),
			format!("# Date: {}", self.generated_at),
			format!("# Protocol: {}", self.protocol),
			format!("# Node Count: {}", self.node_count),
			format!("# Packet Size: {} bytes", self.packet_size),
			format!("# Simulation Duration: {:.1} seconds", self.duration),
			format!("# Battery Capacity: {} J", BATTERY_CAPACITY_J),
			"#".to_string(),
		]
	}

	/// `uwsn_simulation_<PROTOCOL>_<N>nodes_<millis>.csv`
	pub fn file_name(&self, timestamp_ms: u64) -> String {
		format!(
			"uwsn_simulation_{}_{}nodes_{}.csv",
			self.protocol, self.node_count, timestamp_ms
		)
	}
}

/// Render the log, or `None` when there is nothing to export.
pub fn to_csv(meta: &ExportMetadata, readings: &[Reading]) -> Result<Option<String>> {
	if readings.is_empty() {
		return Ok(None);
	}

	let mut out = String::new();
	for line in meta.lines() {
		out.push_str(&line);
		out.push('\n');
	}

	let mut wtr = csv::Writer::from_writer(Vec::new());
	for reading in readings {
		wtr.serialize(reading)?;
	}
	let body = wtr.into_inner().map_err(|e| e.into_error())?;
	out.push_str(&String::from_utf8(body)?);

	info!("exported {} readings for {}", readings.len(), meta.protocol);
	Ok(Some(out))
}

/// Read back every non-comment row of an export.
pub fn parse_readings(text: &str) -> Result<Vec<Reading>> {
	let mut rdr = csv::ReaderBuilder::new()
		.comment(Some(b'#'))
		.from_reader(text.as_bytes());
	let mut readings = Vec::new();
	for row in rdr.deserialize() {
		readings.push(row?);
	}
	Ok(readings)
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;
	use crate::model::simulation::{Simulation, SimulationConfig, TickOutcome};

	fn meta() -> ExportMetadata {
		ExportMetadata {
			generated_at: "10/19/2026, 9:00:00 AM".to_string(),
			protocol: Protocol::Hhvbf,
			node_count: 5,
			packet_size: 64,
			duration: 12.34,
		}
	}

	fn sample_log() -> Vec<Reading> {
		let mut rng = StdRng::seed_from_u64(42);
		let mut sim = Simulation::new(SimulationConfig {
			node_count: 5,
			protocol: Protocol::Hhvbf,
			packet_size: 64,
			speed: 50,
		});
		sim.start();
		for _ in 0..30 {
			if sim.step(&mut rng) == TickOutcome::BatteryDepleted {
				break;
			}
		}
		sim.readings().to_vec()
	}

	#[test]
	fn test_empty_log_is_skipped() {
		assert_eq!(to_csv(&meta(), &[]).unwrap(), None);
	}

	#[test]
	fn test_layout() {
		let log = sample_log();
		let csv = to_csv(&meta(), &log).unwrap().unwrap();
		let lines: Vec<&str> = csv.lines().collect();

		assert_eq!(lines[0], "# UWSN Simulation Results");
		assert_eq!(lines[1], "# Date: 10/19/2026, 9:00:00 AM");
		assert_eq!(lines[2], "# Protocol: HHVBF");
		assert_eq!(lines[3], "# Node Count: 5");
		assert_eq!(lines[4], "# Packet Size: 64 bytes");
		assert_eq!(lines[5], "# Simulation Duration: 12.3 seconds");
		assert_eq!(lines[6], "# Battery Capacity: 50 J");
		assert_eq!(lines[7], "#");
		assert_eq!(lines[8], COLUMNS.join(","));
		assert_eq!(lines.len(), 9 + log.len());

		for row in &lines[9..] {
			assert_eq!(row.split(',').count(), COLUMNS.len());
			assert_eq!(row.split(',').nth(4), Some("HHVBF"));
		}
	}

	#[test]
	fn test_round_trip() {
		let log = sample_log();
		let csv = to_csv(&meta(), &log).unwrap().unwrap();
		assert_eq!(parse_readings(&csv).unwrap(), log);
	}

	#[test]
	fn test_parse_rejects_unknown_protocol() {
		let text = format!(
			"# x\n{}\n0.0,0.0,0.0,5,AODV,64,50,0,0,0,100\n",
			COLUMNS.join(",")
		);
		assert!(parse_readings(&text).is_err());
	}

	#[test]
	fn test_file_name() {
		assert_eq!(
			meta().file_name(1700000000000),
			"uwsn_simulation_HHVBF_5nodes_1700000000000.csv"
		);
	}
}
