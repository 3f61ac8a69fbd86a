use leptos::prelude::*;
use log::error;
use web_sys::HtmlCanvasElement;

use super::render;
use crate::components::canvas::{context_2d, parent_width};
use crate::model::charts::{ChartData, ChartKind};

/// Static chart, redrawn whenever `data` changes.
#[component]
pub fn ChartCanvas(
	#[prop(into)] data: Signal<ChartData>,
	#[prop(default = ChartKind::Line)] kind: ChartKind,
	#[prop(default = 300.0)] height: f64,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();

	Effect::new(move |_| {
		let chart = data.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let width = parent_width(&canvas, 600.0);
		canvas.set_width(width as u32);
		canvas.set_height(height as u32);

		match context_2d(&canvas) {
			Ok(ctx) => render::render(&chart, kind, &ctx, width, height),
			Err(e) => error!("chart canvas: {e}"),
		}
	});

	view! { <canvas node_ref=canvas_ref class="chart-canvas" style="display: block;" /> }
}
