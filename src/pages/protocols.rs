use leptos::prelude::*;

use crate::components::chart::ChartCanvas;
use crate::config::MAX_COMPARED_PROTOCOLS;
use crate::model::Protocol;
use crate::model::charts::{self, ChartKind};
use crate::model::protocol::{ProtocolMetrics, toggle_compared};

const METRIC_ROWS: [(&str, fn(&ProtocolMetrics) -> String); 6] = [
	("Energy Efficiency", |m| format!("{}/100", m.energy_efficiency)),
	("Packet Delivery Ratio", |m| format!("{}%", m.delivery_ratio)),
	("End-to-End Delay", |m| format!("{} ms", m.delay)),
	("Scalability", |m| format!("{}/100", m.scalability)),
	("Control Overhead", |m| format!("{}/100", m.control_overhead)),
	("Network Lifetime", |m| format!("{}/100", m.network_lifetime)),
];

#[component]
pub fn ProtocolsPage() -> impl IntoView {
	let selected = RwSignal::new(vec![Protocol::Vbf, Protocol::Dbr, Protocol::Olsr]);

	let scores = Memo::new(move |_| selected.with(|s| charts::protocol_scores(s)));
	let scalability = Memo::new(move |_| selected.with(|s| charts::scalability(s)));

	let toggles = Protocol::ALL
		.into_iter()
		.map(|p| {
			view! {
				<button
					class="control-button"
					class:active=move || selected.with(|s| s.contains(&p))
					on:click=move |_| {
						selected.update(|s| {
							toggle_compared(s, p, MAX_COMPARED_PROTOCOLS);
						})
					}
				>
					{p.code()}
				</button>
			}
		})
		.collect_view();

	let table = move || {
		let protocols = selected.get();
		let header = protocols.iter().map(|p| view! { <th>{p.code()}</th> }).collect_view();
		let rows = METRIC_ROWS
			.iter()
			.map(|(name, cell)| {
				let cells = protocols
					.iter()
					.map(|p| view! { <td>{cell(&p.metrics())}</td> })
					.collect_view();
				view! {
					<tr>
						<td>{*name}</td>
						{cells}
					</tr>
				}
			})
			.collect_view();
		view! {
			<table class="metrics-table">
				<thead>
					<tr>
						<th>"Metric"</th>
						{header}
					</tr>
				</thead>
				<tbody>{rows}</tbody>
			</table>
		}
	};

	let details = move || {
		selected
			.get()
			.into_iter()
			.map(|p| {
				let features = p.features().iter().map(|f| view! { <li>{*f}</li> }).collect_view();
				view! {
					<div class="info-card">
						<h3>{format!("{} ({})", p.full_name(), p.code())}</h3>
						<p>{p.description()}</p>
						<ul>{features}</ul>
					</div>
				}
			})
			.collect_view()
	};

	view! {
		<div class="page">
			<h1 class="page-title">"Protocol Comparison"</h1>

			<section class="section">
				<h2 class="section-title">"Protocol Performance Comparison"</h2>
				<p>{format!("Select up to {} protocols to compare.", MAX_COMPARED_PROTOCOLS)}</p>
				<div class="controls">{toggles}</div>
				<ChartCanvas data=scores kind=ChartKind::Bar />
			</section>

			<section class="section">
				<div class="info-grid">
					<div>
						<h2 class="section-title">"Protocol Scalability"</h2>
						<ChartCanvas data=scalability />
					</div>
					<div>
						<h2 class="section-title">"Key Performance Metrics"</h2>
						{table}
					</div>
				</div>
			</section>

			<section class="section">
				<h2 class="section-title">"Protocol Details"</h2>
				<div class="info-grid">{details}</div>
			</section>
		</div>
	}
}
