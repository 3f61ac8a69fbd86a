use leptos::prelude::*;

const FEATURES: [&str; 5] = [
	"Interactive 3D view of underwater sensor deployments",
	"VBF, HHVBF, DBR, EEDBR and OLSR routing protocol profiles",
	"Energy consumption analysis with CSV export of simulation runs",
	"Performance metrics and trend analytics",
	"Side-by-side protocol comparison",
];

const QUICK_START: [&str; 5] = [
	"Open the \"Run Simulation\" page",
	"Configure the node count, packet size and speed",
	"Select a routing protocol",
	"Start the simulation and watch the battery drain",
	"Export the log or explore the analytics pages",
];

#[component]
pub fn HelpPage() -> impl IntoView {
	let items = |list: &'static [&'static str]| list.iter().map(|i| view! { <li>{*i}</li> }).collect_view();

	view! {
		<div class="page">
			<h1 class="page-title">"Help & About"</h1>
			<section class="section">
				<h2 class="section-title">"About UWSN Simulator"</h2>
				<p>
					"The Underwater Wireless Sensor Network (UWSN) Simulator models sensor deployments "
					"and routing protocol behaviour with synthetic data, for comparing protocols at a glance."
				</p>
			</section>
			<section class="section">
				<h2 class="section-title">"Key Features"</h2>
				<ul>{items(&FEATURES)}</ul>
			</section>
			<section class="section">
				<h2 class="section-title">"Quick Start"</h2>
				<ol>{items(&QUICK_START)}</ol>
			</section>
		</div>
	}
}
