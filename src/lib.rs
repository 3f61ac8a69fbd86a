//! Leptos client-side dashboard for comparing underwater sensor network
//! routing protocols.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

// Modules
mod browser;
mod components;
mod config;
mod error;
mod model;
mod pages;

use crate::components::side_menu::SideMenu;
use crate::pages::analytics::AnalyticsPage;
use crate::pages::energy::EnergyPage;
use crate::pages::help::HelpPage;
use crate::pages::not_found::NotFound;
use crate::pages::performance::PerformancePage;
use crate::pages::protocols::ProtocolsPage;
use crate::pages::simulation::SimulationPage;
use crate::pages::topology::TopologyPage;
use crate::pages::trends::TrendsPage;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// Side menu plus one page per route; unknown paths render a 404.
#[component]
pub fn App() -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />

		<Title text="UWSN Simulator" />

		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<div class="app">
				<SideMenu />
				<main class="content">
					<Routes fallback=|| view! { <NotFound /> }>
						<Route path=path!("/") view=SimulationPage />
						<Route path=path!("/simulation") view=SimulationPage />
						<Route path=path!("/topology") view=TopologyPage />
						<Route path=path!("/energy") view=EnergyPage />
						<Route path=path!("/performance") view=PerformancePage />
						<Route path=path!("/performance-trends") view=TrendsPage />
						<Route path=path!("/protocols") view=ProtocolsPage />
						<Route path=path!("/analytics") view=AnalyticsPage />
						<Route path=path!("/help") view=HelpPage />
					</Routes>
				</main>
			</div>
		</Router>
	}
}
