use leptos::prelude::*;

use crate::browser;
use crate::components::chart::ChartCanvas;
use crate::components::controls::{ProtocolSelect, RangeSlider, StatCard};
use crate::config::{ENERGY_MINUTES, ENERGY_NODE_COUNT};
use crate::model::Protocol;
use crate::model::charts::{self, ChartKind};

#[component]
pub fn EnergyPage() -> impl IntoView {
	let protocol = RwSignal::new(Protocol::Vbf);
	let node_count = RwSignal::new(ENERGY_NODE_COUNT.default);
	let minutes = RwSignal::new(ENERGY_MINUTES.default);

	let consumption = Memo::new(move |_| {
		charts::energy_consumption(
			protocol.get(),
			node_count.get(),
			minutes.get(),
			&mut browser::seeded_rng(),
		)
	});
	let breakdown = Memo::new(move |_| charts::energy_breakdown(protocol.get()));
	let stats = Memo::new(move |_| charts::energy_stats(protocol.get(), node_count.get(), minutes.get()));

	view! {
		<div class="page">
			<h1 class="page-title">"Energy Consumption Analysis"</h1>

			<section class="section">
				<h2 class="section-title">"Energy Profile Configuration"</h2>
				<div class="control-row">
					<ProtocolSelect value=protocol />
					<RangeSlider label="Number of Nodes" bounds=ENERGY_NODE_COUNT value=node_count />
					<RangeSlider label="Duration" bounds=ENERGY_MINUTES unit=" min" value=minutes />
				</div>
				<div class="stats-grid">
					<StatCard
						label="Energy Per Node"
						value=Signal::derive(move || format!("{:.2} J/min", stats.get().per_node))
					/>
					<StatCard
						label="Network Total"
						value=Signal::derive(move || format!("{:.2} J", stats.get().network_total))
					/>
					<StatCard
						label="Energy Per Packet"
						value=Signal::derive(move || format!("{:.4} J", stats.get().per_packet))
					/>
					<StatCard
						label="Est. Lifetime"
						value=Signal::derive(move || format!("{} h", stats.get().estimated_lifetime))
					/>
				</div>
			</section>

			<section class="section">
				<h2 class="section-title">"Energy Consumption Visualization"</h2>
				<ChartCanvas data=consumption />
				<h2 class="section-title">"Detailed Energy Analysis"</h2>
				<ChartCanvas data=breakdown kind=ChartKind::Bar />
			</section>

			<section class="section">
				<h2 class="section-title">"Protocol-specific Optimizations"</h2>
				<p>{move || protocol.get().description()}</p>
				<ul>
					{move || {
						protocol
							.get()
							.features()
							.iter()
							.map(|f| view! { <li>{*f}</li> })
							.collect_view()
					}}
				</ul>
			</section>
		</div>
	}
}
