use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<div class="page">
			<h1 class="page-title">"Page not found"</h1>
			<p>"Nothing lives at this address. "<A href="/">"Back to the simulation"</A></p>
		</div>
	}
}
