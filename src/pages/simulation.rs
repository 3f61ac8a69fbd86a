use leptos::prelude::*;
use log::{error, info, warn};
use rand::rngs::StdRng;

use crate::browser;
use crate::components::controls::{NumberInput, ProtocolSelect, RangeSlider, StatCard};
use crate::components::topology_view::TopologyCanvas;
use crate::config::{SIM_NODE_COUNT, SIM_PACKET_SIZE, SIM_SPEED, SIM_VIEW_RANGE, TICK_INTERVAL};
use crate::error::DashboardError;
use crate::model::Protocol;
use crate::model::export::{self, ExportMetadata};
use crate::model::simulation::{Simulation, SimulationConfig, SimulationStatus, TickOutcome, water_current};
use crate::model::topology::{self, TopologyKind, TopologyParams, Vec3};

/// Owns the running simulation and its 200 ms timer.
#[derive(Clone, Copy)]
struct Controller {
	sim: RwSignal<Simulation>,
	config: Memo<SimulationConfig>,
	rng: StoredValue<StdRng>,
	timer: StoredValue<Option<IntervalHandle>>,
	current: RwSignal<Vec3>,
}

impl Controller {
	fn new(config: Memo<SimulationConfig>) -> Self {
		Self {
			sim: RwSignal::new(Simulation::new(config.get_untracked())),
			config,
			rng: StoredValue::new(browser::seeded_rng()),
			timer: StoredValue::new(None),
			current: RwSignal::new(Vec3::ORIGIN),
		}
	}

	fn start(self) {
		self.clear_timer();
		let config = self.config.get_untracked();
		self.sim.update(|s| s.start_with(config));
		match set_interval_with_handle(move || self.tick(), TICK_INTERVAL) {
			Ok(handle) => self.timer.set_value(Some(handle)),
			Err(e) => {
				error!("failed to start simulation timer: {}", DashboardError::from(e));
				self.sim.update(Simulation::stop);
			}
		}
	}

	fn tick(self) {
		self.current.set(water_current(browser::now_ms()));
		let outcome = self
			.rng
			.try_update_value(|rng| self.sim.try_update(|s| s.step(rng)))
			.flatten();
		match outcome {
			Some(TickOutcome::Recorded(_)) => {}
			Some(TickOutcome::BatteryDepleted) => {
				warn!("simulation stopped: battery depleted");
				self.clear_timer();
			}
			Some(TickOutcome::Ignored) | None => self.clear_timer(),
		}
	}

	fn stop(self) {
		self.clear_timer();
		self.sim.update(Simulation::stop);
	}

	fn reset(self) {
		self.clear_timer();
		self.sim.update(Simulation::reset);
	}

	fn clear_timer(self) {
		if let Some(handle) = self.timer.try_update_value(Option::take).flatten() {
			handle.clear();
		}
	}

	fn export(self) {
		let meta = self.sim.with(|s| ExportMetadata {
			generated_at: browser::locale_timestamp(),
			protocol: s.config().protocol,
			node_count: s.config().node_count,
			packet_size: s.config().packet_size,
			duration: s.accumulator().elapsed,
		});
		let csv = match self.sim.with(|s| export::to_csv(&meta, s.readings())) {
			Ok(Some(csv)) => csv,
			Ok(None) => {
				warn!("no simulation data to export");
				return;
			}
			Err(e) => {
				error!("failed to encode simulation log: {e}");
				return;
			}
		};
		let file_name = meta.file_name(browser::now_ms() as u64);
		match browser::download_csv(&file_name, &csv) {
			Ok(()) => info!("exported {file_name}"),
			Err(e) => error!("failed to download {file_name}: {e}"),
		}
	}
}

#[component]
pub fn SimulationPage() -> impl IntoView {
	let node_count = RwSignal::new(SIM_NODE_COUNT.default);
	let protocol = RwSignal::new(Protocol::Vbf);
	let packet_size = RwSignal::new(SIM_PACKET_SIZE.default);
	let speed = RwSignal::new(SIM_SPEED.default);

	let config = Memo::new(move |_| SimulationConfig {
		node_count: node_count.get(),
		protocol: protocol.get(),
		packet_size: packet_size.get(),
		speed: speed.get(),
	});

	let controller = Controller::new(config);
	let sim = controller.sim;
	on_cleanup(move || controller.clear_timer());

	Effect::new(move |_| {
		let cfg = config.get();
		sim.update(|s| s.reconfigure(cfg));
	});

	let running = Signal::derive(move || sim.with(Simulation::is_running));
	let depleted = move || sim.with(|s| s.status() == SimulationStatus::BatteryDepleted);
	let has_log = move || sim.with(|s| !s.readings().is_empty());

	let view_topology = Memo::new(move |_| {
		let params = TopologyParams {
			node_count: node_count.get() as usize,
			sink_count: 1,
			kind: TopologyKind::Random,
			connection_range: SIM_VIEW_RANGE,
		};
		topology::build(params, &mut browser::seeded_rng())
	});

	let stat = move |f: fn(&Simulation) -> String| Signal::derive(move || sim.with(f));

	view! {
		<div class="page">
			<h1 class="page-title">"Underwater Sensor Network Simulation"</h1>

			<section class="section">
				<div class="control-row">
					<NumberInput label="Number of Nodes" bounds=SIM_NODE_COUNT value=node_count disabled=running />
					<ProtocolSelect value=protocol disabled=running />
					<NumberInput label="Packet Size (bytes)" bounds=SIM_PACKET_SIZE value=packet_size disabled=running />
					<RangeSlider label="Simulation Speed" bounds=SIM_SPEED value=speed disabled=running />
				</div>
				<div class="controls">
					<Show
						when=move || running.get()
						fallback=move || {
							view! {
								<button class="control-button" on:click=move |_| controller.start()>
									"Start Simulation"
								</button>
							}
						}
					>
						<button class="control-button" on:click=move |_| controller.stop()>
							"Stop Simulation"
						</button>
					</Show>
					<button class="control-button" on:click=move |_| controller.reset()>
						"Reset"
					</button>
					<button
						class="control-button"
						disabled=move || !has_log()
						on:click=move |_| controller.export()
					>
						"Export CSV"
					</button>
				</div>
				<Show when=depleted>
					<div class="alert">"Battery depleted. The simulation has stopped; export the log or reset to run again."</div>
				</Show>
			</section>

			<section class="section">
				<div class="stats-grid">
					<StatCard label="Simulation Time" value=stat(|s| format!("{:.1} s", s.accumulator().elapsed)) />
					<StatCard label="Packets Sent" value=stat(|s| s.accumulator().packets_sent.to_string()) />
					<StatCard label="Packets Received" value=stat(|s| s.accumulator().packets_received.to_string()) />
					<StatCard label="Delivery Ratio" value=stat(|s| format!("{}%", s.accumulator().delivery_ratio_percent())) />
					<StatCard label="Average Energy" value=stat(|s| format!("{:.2} J", s.accumulator().avg_energy)) />
					<StatCard label="Max Node Energy" value=stat(|s| format!("{:.2} J", s.accumulator().max_energy)) />
					<StatCard label="Remaining Battery" value=stat(|s| format!("{}%", s.accumulator().remaining_battery_percent())) />
					<StatCard label="Readings Logged" value=stat(|s| s.readings().len().to_string()) />
				</div>
				<div class="progress">
					<div class="progress-bar" style:width=move || format!("{:.1}%", sim.with(Simulation::progress)) />
				</div>
				<p class="water-current">
					{move || {
						let c = controller.current.get();
						format!("Water current: x {:.2}, y {:.2}, z {:.2} m/s", c.x, c.y, c.z)
					}}
				</p>
			</section>

			<section class="section">
				<h2 class="section-title">"Sensor Deployment"</h2>
				<TopologyCanvas topology=view_topology height=420.0 />
			</section>
		</div>
	}
}
