use leptos::prelude::*;
use leptos_router::components::A;

struct MenuSection {
	title: &'static str,
	links: &'static [(&'static str, &'static str)],
}

const SECTIONS: [MenuSection; 4] = [
	MenuSection {
		title: "MAIN",
		links: &[("/", "Dashboard")],
	},
	MenuSection {
		title: "SIMULATION",
		links: &[
			("/simulation", "Run Simulation"),
			("/topology", "Network Topology"),
			("/energy", "Energy Consumption"),
			("/performance", "Performance Metrics"),
		],
	},
	MenuSection {
		title: "ANALYSIS",
		links: &[
			("/protocols", "Protocol Comparison"),
			("/analytics", "Analytics Overview"),
			("/performance-trends", "Performance Trends"),
		],
	},
	MenuSection {
		title: "HELP",
		links: &[("/help", "Help & About")],
	},
];

/// Collapsible navigation column. Active links get `aria-current="page"`
/// from the router.
#[component]
pub fn SideMenu() -> impl IntoView {
	let open = RwSignal::new(true);

	let sections = SECTIONS
		.iter()
		.map(|section| {
			let links = section
				.links
				.iter()
				.map(|&(href, text)| {
					view! {
						<A href=href exact=true>
							<span class="menu-text">{text}</span>
						</A>
					}
				})
				.collect_view();
			view! {
				<div class="menu-section">
					<div class="menu-section-title">{section.title}</div>
					{links}
				</div>
			}
		})
		.collect_view();

	view! {
		<aside class="side-menu" class:collapsed=move || !open.get()>
			<div class="logo">{move || if open.get() { "UWSN SIMULATOR" } else { "UWSN" }}</div>
			<button class="menu-toggle" on:click=move |_| open.update(|o| *o = !*o)>
				{move || if open.get() { "\u{203a}" } else { "\u{2630}" }}
			</button>
			<nav>{sections}</nav>
		</aside>
	}
}
