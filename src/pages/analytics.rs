use leptos::prelude::*;

use crate::browser;
use crate::components::chart::ChartCanvas;
use crate::components::controls::{ButtonGroup, StatCard};
use crate::model::Protocol;
use crate::model::charts::{self, ChartKind};
use crate::model::protocol::leaders;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tab {
	Energy,
	Protocols,
}

fn mean(f: impl Fn(Protocol) -> f64) -> f64 {
	Protocol::ALL.iter().map(|p| f(*p)).sum::<f64>() / Protocol::ALL.len() as f64
}

#[component]
fn EnergyReport() -> impl IntoView {
	let monthly = charts::monthly_energy(&mut browser::seeded_rng());
	let per_node = mean(|p| p.energy_profile().per_node);
	let per_packet = mean(|p| p.energy_profile().per_packet);
	let lifetime = mean(|p| p.energy_profile().lifetime_hours);
	let efficiency = mean(|p| p.metrics().energy_efficiency);

	view! {
		<h2 class="section-title">"Energy Consumption Reports"</h2>
		<div class="stats-grid">
			<StatCard label="Average Power Consumption" value=format!("{:.3} J/min per node", per_node) />
			<StatCard label="Energy Efficiency" value=format!("{:.1}%", efficiency) />
			<StatCard label="Battery Lifetime" value=format!("{:.0} h", lifetime) />
			<StatCard label="Energy per Packet" value=format!("{:.4} J", per_packet) />
		</div>
		<ChartCanvas data=Signal::stored(monthly) />
		<h2 class="section-title">"Energy Distribution"</h2>
		<ChartCanvas data=Signal::stored(charts::energy_distribution()) kind=ChartKind::Bar />
	}
}

#[component]
fn ProtocolReport() -> impl IntoView {
	let l = leaders();
	let card = |p: Protocol, detail: String| format!("{} ({})", p.code(), detail);

	view! {
		<h2 class="section-title">"Protocol Performance Comparison"</h2>
		<div class="stats-grid">
			<StatCard
				label="Best Delivery Ratio"
				value=card(l.delivery, format!("{}%", l.delivery.metrics().delivery_ratio))
			/>
			<StatCard
				label="Most Energy Efficient"
				value=card(l.energy, format!("{}/100", l.energy.metrics().energy_efficiency))
			/>
			<StatCard label="Lowest Latency" value=card(l.latency, format!("{} ms", l.latency.metrics().delay)) />
			<StatCard
				label="Best Overall"
				value=card(l.overall, format!("{:.1} composite", l.overall.metrics().composite()))
			/>
		</div>
		<ChartCanvas data=Signal::stored(charts::performance_overview()) kind=ChartKind::Bar />
	}
}

#[component]
pub fn AnalyticsPage() -> impl IntoView {
	let tab = RwSignal::new(Tab::Energy);
	let options = vec![(Tab::Energy, "Energy"), (Tab::Protocols, "Protocols")];

	view! {
		<div class="page">
			<h1 class="page-title">"Analytics Dashboard"</h1>
			<ButtonGroup options=options selected=tab />
			<section class="section">
				{move || match tab.get() {
					Tab::Energy => view! { <EnergyReport /> }.into_any(),
					Tab::Protocols => view! { <ProtocolReport /> }.into_any(),
				}}
			</section>
		</div>
	}
}
