use leptos::prelude::*;

use crate::components::chart::ChartCanvas;
use crate::components::controls::ButtonGroup;
use crate::model::charts::{self, ChartKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tab {
	Overview,
	Latency,
	Throughput,
}

#[component]
pub fn PerformancePage() -> impl IntoView {
	let tab = RwSignal::new(Tab::Overview);
	let options = vec![
		(Tab::Overview, "Overview"),
		(Tab::Latency, "Latency"),
		(Tab::Throughput, "Throughput"),
	];

	let body = move || match tab.get() {
		Tab::Overview => view! {
			<h2 class="section-title">"Performance Overview"</h2>
			<ChartCanvas data=Signal::stored(charts::performance_overview()) kind=ChartKind::Bar />
			<div class="info-grid">
				<div class="info-card">
					<h3>"Key Findings"</h3>
					<ul>
						<li>"EEDBR leads on energy efficiency and network lifetime."</li>
						<li>"OLSR trades higher energy use for lower delay."</li>
						<li>"HHVBF improves on VBF delivery in sparse regions."</li>
					</ul>
				</div>
				<div class="info-card">
					<h3>"Recommendations"</h3>
					<ul>
						<li>"Prefer EEDBR for long-lived deployments."</li>
						<li>"Prefer OLSR where latency matters more than battery."</li>
					</ul>
				</div>
			</div>
		}
		.into_any(),
		Tab::Latency => view! {
			<h2 class="section-title">"Latency Analysis"</h2>
			<ChartCanvas data=Signal::stored(charts::latency_by_node_count()) />
			<p>"End-to-end delay in ms as the number of nodes grows."</p>
		}
		.into_any(),
		Tab::Throughput => view! {
			<h2 class="section-title">"Throughput Analysis"</h2>
			<ChartCanvas data=Signal::stored(charts::throughput_by_density()) kind=ChartKind::Bar />
			<p>"Throughput in kbps at low, medium and high deployment density."</p>
		}
		.into_any(),
	};

	view! {
		<div class="page">
			<h1 class="page-title">"Performance Analysis"</h1>
			<ButtonGroup options=options selected=tab />
			<section class="section">{body}</section>
		</div>
	}
}
