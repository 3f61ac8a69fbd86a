use leptos::prelude::*;

use crate::browser;
use crate::components::chart::ChartCanvas;
use crate::components::controls::{ButtonGroup, RangeSlider};
use crate::config::{TREND_DAYS, TREND_NODE_COUNT};
use crate::model::charts::{self, TrendMetric};

#[component]
pub fn TrendsPage() -> impl IntoView {
	let metric = RwSignal::new(TrendMetric::default());
	let days = RwSignal::new(TREND_DAYS.default);
	let node_count = RwSignal::new(TREND_NODE_COUNT.default);

	let data = Memo::new(move |_| {
		charts::performance_trend(
			metric.get(),
			days.get(),
			node_count.get(),
			&mut browser::seeded_rng(),
		)
	});
	let options = TrendMetric::ALL.iter().map(|m| (*m, m.title())).collect::<Vec<_>>();

	view! {
		<div class="page">
			<h1 class="page-title">"Network Performance Trends"</h1>

			<section class="section">
				<h2 class="section-title">"Trend Analysis"</h2>
				<ButtonGroup options=options selected=metric />
				<div class="control-row">
					<RangeSlider label="Time Range" bounds=TREND_DAYS unit=" days" value=days />
					<RangeSlider label="Network Density" bounds=TREND_NODE_COUNT unit=" nodes" value=node_count />
				</div>
			</section>

			<section class="section">
				<h2 class="section-title">{move || metric.get().title()}</h2>
				<ChartCanvas data=data height=360.0 />
			</section>
		</div>
	}
}
