//! Form controls and stat cards shared by the pages.

use leptos::prelude::*;

use crate::config::Bounds;
use crate::model::Protocol;

#[component]
pub fn RangeSlider(
	label: &'static str,
	bounds: Bounds<u32>,
	value: RwSignal<u32>,
	#[prop(default = 1)] step: u32,
	#[prop(default = "")] unit: &'static str,
	#[prop(into, default = Signal::from(false))] disabled: Signal<bool>,
) -> impl IntoView {
	view! {
		<div class="slider">
			<label class="slider-label">
				<span>{label}</span>
				<span>{move || format!("{}{}", value.get(), unit)}</span>
			</label>
			<input
				type="range"
				min=bounds.min.to_string()
				max=bounds.max.to_string()
				step=step.to_string()
				prop:value=move || value.get().to_string()
				disabled=move || disabled.get()
				on:input=move |ev| value.set(bounds.parse_clamped(&event_target_value(&ev)))
			/>
		</div>
	}
}

#[component]
pub fn NumberInput(
	label: &'static str,
	bounds: Bounds<u32>,
	value: RwSignal<u32>,
	#[prop(into, default = Signal::from(false))] disabled: Signal<bool>,
) -> impl IntoView {
	view! {
		<div class="control-group">
			<label>{label}</label>
			<input
				type="number"
				min=bounds.min.to_string()
				max=bounds.max.to_string()
				prop:value=move || value.get().to_string()
				disabled=move || disabled.get()
				on:change=move |ev| value.set(bounds.parse_clamped(&event_target_value(&ev)))
			/>
		</div>
	}
}

#[component]
pub fn ProtocolSelect(
	value: RwSignal<Protocol>,
	#[prop(default = "Routing Protocol")] label: &'static str,
	#[prop(into, default = Signal::from(false))] disabled: Signal<bool>,
) -> impl IntoView {
	let options = Protocol::ALL
		.into_iter()
		.map(|p| view! { <option value=p.code()>{p.code()}</option> })
		.collect_view();

	view! {
		<div class="control-group">
			<label>{label}</label>
			<select
				prop:value=move || value.get().code().to_string()
				disabled=move || disabled.get()
				on:change=move |ev| {
					if let Ok(p) = event_target_value(&ev).parse::<Protocol>() {
						value.set(p);
					}
				}
			>
				{options}
			</select>
		</div>
	}
}

/// Row of toggle buttons, one per option.
#[component]
pub fn ButtonGroup<T>(
	options: Vec<(T, &'static str)>,
	selected: RwSignal<T>,
) -> impl IntoView
where
	T: Copy + PartialEq + Send + Sync + 'static,
{
	let buttons = options
		.into_iter()
		.map(|(option, name)| {
			view! {
				<button
					class="control-button"
					class:active=move || selected.get() == option
					on:click=move |_| selected.set(option)
				>
					{name}
				</button>
			}
		})
		.collect_view();

	view! { <div class="controls">{buttons}</div> }
}

/// Labelled read-only figure.
#[component]
pub fn StatCard(label: &'static str, #[prop(into)] value: Signal<String>) -> impl IntoView {
	view! {
		<div class="stat-card">
			<div class="stat-label">{label}</div>
			<div class="stat-value">{move || value.get()}</div>
		</div>
	}
}
