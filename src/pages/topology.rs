use leptos::prelude::*;
use leptos_router::hooks::use_query_map;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::browser;
use crate::components::controls::{ButtonGroup, RangeSlider};
use crate::components::topology_view::TopologyCanvas;
use crate::config::{CONNECTION_RANGE, CONNECTION_RANGE_STEP, TOPOLOGY_NODE_COUNT, TOPOLOGY_SINK_COUNT};
use crate::model::topology::{self, TopologyKind, TopologyParams};

#[component]
pub fn TopologyPage() -> impl IntoView {
	// `/topology?kind=grid` preselects a layout
	let initial = use_query_map()
		.with_untracked(|q| q.get("kind").and_then(|slug| TopologyKind::from_slug(&slug)))
		.unwrap_or(TopologyKind::Random);
	let kind = RwSignal::new(initial);
	let node_count = RwSignal::new(TOPOLOGY_NODE_COUNT.default);
	let sink_count = RwSignal::new(TOPOLOGY_SINK_COUNT.default);
	let range = RwSignal::new(CONNECTION_RANGE.default);
	let seed = RwSignal::new(browser::random_seed());

	let built = Memo::new(move |_| {
		let params = TopologyParams {
			node_count: node_count.get() as usize,
			sink_count: sink_count.get() as usize,
			kind: kind.get(),
			connection_range: range.get() as f64,
		};
		topology::build(params, &mut StdRng::seed_from_u64(seed.get()))
	});

	let options = TopologyKind::ALL.iter().map(|k| (*k, k.title())).collect::<Vec<_>>();
	let list = |items: &'static [&'static str]| {
		items
			.iter()
			.map(|item| view! { <li>{*item}</li> })
			.collect_view()
	};

	view! {
		<div class="page">
			<h1 class="page-title">"Network Topology"</h1>

			<section class="section">
				<ButtonGroup options=options selected=kind />
				<div class="control-row">
					<RangeSlider label="Nodes" bounds=TOPOLOGY_NODE_COUNT value=node_count />
					<RangeSlider label="Sink Nodes" bounds=TOPOLOGY_SINK_COUNT value=sink_count />
					<RangeSlider
						label="Connection Range"
						bounds=CONNECTION_RANGE
						step=CONNECTION_RANGE_STEP
						unit="m"
						value=range
					/>
				</div>
				<div class="controls">
					<button class="control-button" on:click=move |_| seed.set(browser::random_seed())>
						"Regenerate"
					</button>
				</div>
			</section>

			<section class="section">
				<TopologyCanvas topology=built />
				<div class="status-bar">{move || built.with(|t| t.summary().to_string())}</div>
			</section>

			<section class="section">
				{move || {
					let k = kind.get();
					view! {
						<h2 class="section-title">{k.title()}</h2>
						<p>{k.description()}</p>
						<div class="info-grid">
							<div class="info-card">
								<h3>"Advantages"</h3>
								<ul>{list(k.advantages())}</ul>
							</div>
							<div class="info-card">
								<h3>"Challenges"</h3>
								<ul>{list(k.challenges())}</ul>
							</div>
						</div>
					}
				}}
			</section>
		</div>
	}
}
