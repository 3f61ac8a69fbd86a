use std::collections::HashSet;
use std::f64::consts::FRAC_PI_2;

use crate::model::topology::{Endpoint, Topology, Vec3};

pub const NODE_RADIUS: f64 = 6.0;
pub const SINK_SIZE: f64 = 11.0;
pub const HIT_RADIUS: f64 = 12.0;

/// Orbit centre: middle of the deployment volume.
const TARGET: Vec3 = Vec3::new(0.0, 220.0, 0.0);
const NEAR_PLANE: f64 = 1.0;
const AUTO_ROTATE_SPEED: f64 = 0.08;

#[derive(Clone, Debug)]
pub struct Camera {
	/// Rotation around the vertical axis, radians.
	pub yaw: f64,
	/// Tilt towards looking down on the water surface, radians.
	pub pitch: f64,
	pub distance: f64,
}

impl Default for Camera {
	fn default() -> Self {
		Self {
			yaw: 0.6,
			pitch: 0.45,
			distance: 2600.0,
		}
	}
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub yaw_start: f64,
	pub pitch_start: f64,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub endpoint: Option<Endpoint>,
	pub neighbors: HashSet<Endpoint>,
	pub highlight_t: f64,
}

/// Screen-space position of a world point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projected {
	pub x: f64,
	pub y: f64,
	/// Distance from the camera plane, larger is farther.
	pub depth: f64,
	/// Pixels per world unit at this depth.
	pub scale: f64,
}

pub struct TopologyViewState {
	pub topology: Topology,
	pub camera: Camera,
	pub drag: DragState,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
	pub auto_rotate: bool,
}

impl TopologyViewState {
	pub fn new(topology: Topology, width: f64, height: f64) -> Self {
		Self {
			topology,
			camera: Camera::default(),
			drag: DragState::default(),
			hover: HoverState::default(),
			width,
			height,
			auto_rotate: true,
		}
	}

	/// Swap in a rebuilt topology, keeping the camera where the user left it.
	pub fn set_topology(&mut self, topology: Topology) {
		self.topology = topology;
		self.hover = HoverState::default();
	}

	fn focal(&self) -> f64 {
		self.width.min(self.height) * 1.1
	}

	pub fn project(&self, p: &Vec3) -> Option<Projected> {
		let (x, y, z) = (p.x - TARGET.x, p.y - TARGET.y, p.z - TARGET.z);
		let (sy, cy) = self.camera.yaw.sin_cos();
		let (x1, z1) = (x * cy - z * sy, x * sy + z * cy);
		let (sp, cp) = self.camera.pitch.sin_cos();
		let (y2, z2) = (y * cp - z1 * sp, y * sp + z1 * cp);

		let depth = self.camera.distance + z2;
		if depth < NEAR_PLANE {
			return None;
		}
		let scale = self.focal() / depth;
		Some(Projected {
			x: self.width / 2.0 + x1 * scale,
			y: self.height / 2.0 + y2 * scale,
			depth,
			scale,
		})
	}

	pub fn endpoint_position(&self, endpoint: Endpoint) -> Option<Projected> {
		self.topology
			.position(endpoint)
			.and_then(|p| self.project(&p))
	}

	/// Nearest endpoint under the cursor; sinks win ties.
	pub fn endpoint_at_position(&self, sx: f64, sy: f64) -> Option<Endpoint> {
		let sinks = self.topology.sinks.iter().map(|s| Endpoint::Sink(s.index));
		let nodes = self.topology.nodes.iter().map(|n| Endpoint::Node(n.id));
		let mut found: Option<(Endpoint, f64)> = None;
		for endpoint in sinks.chain(nodes) {
			let Some(p) = self.endpoint_position(endpoint) else {
				continue;
			};
			let d = ((p.x - sx).powi(2) + (p.y - sy).powi(2)).sqrt();
			if d < HIT_RADIUS && found.is_none_or(|(_, best)| d < best) {
				found = Some((endpoint, d));
			}
		}
		found.map(|(e, _)| e)
	}

	pub fn set_hover(&mut self, endpoint: Option<Endpoint>) {
		if self.hover.endpoint == endpoint {
			return;
		}
		self.hover.endpoint = endpoint;
		self.hover.neighbors = endpoint
			.map(|e| self.topology.neighbors(e))
			.unwrap_or_default();
	}

	pub fn is_highlighted(&self, endpoint: Endpoint) -> bool {
		self.hover.endpoint == Some(endpoint) || self.hover.neighbors.contains(&endpoint)
	}

	pub fn is_hovered(&self, endpoint: Endpoint) -> bool {
		self.hover.endpoint == Some(endpoint)
	}

	pub fn has_active_highlight(&self) -> bool {
		self.hover.endpoint.is_some()
	}

	pub fn begin_drag(&mut self, x: f64, y: f64) {
		self.drag = DragState {
			active: true,
			start_x: x,
			start_y: y,
			yaw_start: self.camera.yaw,
			pitch_start: self.camera.pitch,
		};
		self.auto_rotate = false;
	}

	pub fn drag_to(&mut self, x: f64, y: f64) {
		if !self.drag.active {
			return;
		}
		self.camera.yaw = self.drag.yaw_start + (x - self.drag.start_x) * 0.01;
		self.camera.pitch = (self.drag.pitch_start + (y - self.drag.start_y) * 0.01)
			.clamp(-FRAC_PI_2 + 0.05, FRAC_PI_2 - 0.05);
	}

	pub fn end_drag(&mut self) {
		self.drag.active = false;
	}

	/// Positive `delta` zooms out.
	pub fn zoom(&mut self, delta: f64) {
		let factor = if delta > 0.0 { 1.1 } else { 0.9 };
		self.camera.distance = (self.camera.distance * factor).clamp(600.0, 8000.0);
	}

	pub fn tick(&mut self, dt: f64) {
		if self.auto_rotate && !self.drag.active && !self.has_active_highlight() {
			self.camera.yaw += AUTO_ROTATE_SPEED * dt;
		}
		let target = if self.has_active_highlight() { 1.0 } else { 0.0 };
		self.hover.highlight_t += (target - self.hover.highlight_t) * (4.0 * dt).min(1.0);
		if self.hover.highlight_t < 0.01 {
			self.hover.highlight_t = 0.0;
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;
	use crate::model::topology::{self, TopologyKind, TopologyParams};

	fn state(range: f64) -> TopologyViewState {
		let mut rng = StdRng::seed_from_u64(8);
		let topology = topology::build(
			TopologyParams {
				node_count: 20,
				sink_count: 2,
				kind: TopologyKind::Grid,
				connection_range: range,
			},
			&mut rng,
		);
		TopologyViewState::new(topology, 800.0, 600.0)
	}

	#[test]
	fn test_target_projects_to_centre() {
		let s = state(300.0);
		let p = s.project(&TARGET).unwrap();
		assert!((p.x - 400.0).abs() < 1e-9);
		assert!((p.y - 300.0).abs() < 1e-9);
		assert!((p.depth - s.camera.distance).abs() < 1e-9);
	}

	#[test]
	fn test_front_on_projection_scales_offsets() {
		let mut s = state(300.0);
		s.camera = Camera {
			yaw: 0.0,
			pitch: 0.0,
			distance: 1000.0,
		};
		let p = s
			.project(&Vec3::new(TARGET.x + 100.0, TARGET.y, TARGET.z))
			.unwrap();
		let focal = 600.0 * 1.1;
		assert!((p.x - (400.0 + 100.0 * focal / 1000.0)).abs() < 1e-9);
		assert!((p.y - 300.0).abs() < 1e-9);
	}

	#[test]
	fn test_points_behind_camera_are_culled() {
		let mut s = state(300.0);
		s.camera = Camera {
			yaw: 0.0,
			pitch: 0.0,
			distance: 600.0,
		};
		assert!(s.project(&Vec3::new(0.0, TARGET.y, -2000.0)).is_none());
	}

	#[test]
	fn test_hit_test_finds_projected_endpoint() {
		let s = state(300.0);
		let p = s.endpoint_position(Endpoint::Sink(1)).unwrap();
		assert_eq!(s.endpoint_at_position(p.x, p.y), Some(Endpoint::Sink(1)));
		assert_eq!(s.endpoint_at_position(-500.0, -500.0), None);
	}

	#[test]
	fn test_hover_collects_neighbors() {
		let mut s = state(2500.0);
		s.set_hover(Some(Endpoint::Node(0)));
		// everything is in range
		assert_eq!(s.hover.neighbors.len(), 19 + 2);
		assert!(s.is_highlighted(Endpoint::Node(5)));
		assert!(s.is_hovered(Endpoint::Node(0)));
		s.set_hover(None);
		assert!(!s.has_active_highlight());
		assert!(s.hover.neighbors.is_empty());
	}

	#[test]
	fn test_drag_rotates_and_clamps_pitch() {
		let mut s = state(300.0);
		let yaw = s.camera.yaw;
		s.begin_drag(10.0, 10.0);
		s.drag_to(110.0, 10_000.0);
		assert!((s.camera.yaw - (yaw + 1.0)).abs() < 1e-9);
		assert!(s.camera.pitch < FRAC_PI_2);
		s.end_drag();
		assert!(!s.auto_rotate);
	}

	#[test]
	fn test_rebuild_keeps_camera_and_drops_hover() {
		let mut s = state(300.0);
		s.zoom(1.0);
		let distance = s.camera.distance;
		s.set_hover(Some(Endpoint::Node(1)));
		let fresh = state(100.0).topology;
		s.set_topology(fresh);
		assert_eq!(s.camera.distance, distance);
		assert!(!s.has_active_highlight());
	}
}
