use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::{NODE_RADIUS, Projected, SINK_SIZE, TopologyViewState};
use crate::model::topology::{Endpoint, HALF_EXTENT, Vec3};

const SURFACE_LINES: usize = 9;

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

pub fn render(state: &TopologyViewState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str("#001a00");
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	draw_surface(state, ctx);
	draw_edges(state, ctx);
	draw_entities(state, ctx);
}

/// Water surface as a grid at depth zero.
fn draw_surface(state: &TopologyViewState, ctx: &CanvasRenderingContext2d) {
	ctx.set_stroke_style_str("rgba(0, 255, 0, 0.08)");
	ctx.set_line_width(1.0);
	let step = 2.0 * HALF_EXTENT / (SURFACE_LINES - 1) as f64;
	for i in 0..SURFACE_LINES {
		let t = -HALF_EXTENT + i as f64 * step;
		for (a, b) in [
			(Vec3::new(t, 0.0, -HALF_EXTENT), Vec3::new(t, 0.0, HALF_EXTENT)),
			(Vec3::new(-HALF_EXTENT, 0.0, t), Vec3::new(HALF_EXTENT, 0.0, t)),
		] {
			if let (Some(p1), Some(p2)) = (state.project(&a), state.project(&b)) {
				ctx.begin_path();
				ctx.move_to(p1.x, p1.y);
				ctx.line_to(p2.x, p2.y);
				ctx.stroke();
			}
		}
	}
}

fn draw_edges(state: &TopologyViewState, ctx: &CanvasRenderingContext2d) {
	let t = ease_out_cubic(state.hover.highlight_t);

	for edge in &state.topology.edges {
		let from = Endpoint::Node(edge.from);
		let (Some(p1), Some(p2)) = (
			state.endpoint_position(from),
			state.endpoint_position(edge.to),
		) else {
			continue;
		};

		let to_sink = matches!(edge.to, Endpoint::Sink(_));
		let base = if to_sink { 0.35 } else { 0.2 };
		let is_highlighted = state.is_hovered(from) || state.is_hovered(edge.to);
		let (alpha, width) = if is_highlighted {
			(base + (0.9 - base) * t, 1.0 + 1.0 * t)
		} else {
			(base * (1.0 - 0.7 * t), 1.0)
		};

		ctx.set_stroke_style_str(&format!("rgba(0, 255, 0, {})", alpha));
		ctx.set_line_width(width);
		ctx.begin_path();
		ctx.move_to(p1.x, p1.y);
		ctx.line_to(p2.x, p2.y);
		ctx.stroke();
	}
}

/// Nodes and sinks back to front so nearer ones overdraw.
fn draw_entities(state: &TopologyViewState, ctx: &CanvasRenderingContext2d) {
	let topology = &state.topology;
	let mut visible: Vec<(Endpoint, Projected)> = topology
		.sinks
		.iter()
		.map(|s| Endpoint::Sink(s.index))
		.chain(topology.nodes.iter().map(|n| Endpoint::Node(n.id)))
		.filter_map(|e| state.endpoint_position(e).map(|p| (e, p)))
		.collect();
	visible.sort_by(|a, b| b.1.depth.total_cmp(&a.1.depth));

	let (has_highlight, t) = (
		state.has_active_highlight(),
		ease_out_cubic(state.hover.highlight_t),
	);

	for (endpoint, p) in visible {
		let highlighted = has_highlight && state.is_highlighted(endpoint);
		let alpha = if has_highlight && !highlighted {
			1.0 - 0.7 * t
		} else {
			1.0
		};
		let grow = if state.is_hovered(endpoint) {
			1.0 + 0.35 * t
		} else if highlighted {
			1.0 + 0.15 * t
		} else {
			1.0
		};
		// keep far entities visible
		let size_scale = (p.scale * 4.0).clamp(0.5, 1.6) * grow;

		ctx.set_global_alpha(alpha);
		match endpoint {
			Endpoint::Node(_) => draw_node(ctx, &p, NODE_RADIUS * size_scale),
			Endpoint::Sink(_) => draw_sink(ctx, &p, SINK_SIZE * size_scale),
		}
		ctx.set_global_alpha(1.0);

		if state.is_hovered(endpoint) && t > 0.01 {
			ctx.begin_path();
			let _ = ctx.arc(p.x, p.y, NODE_RADIUS * size_scale + 4.0, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str(&format!("rgba(255, 255, 255, {})", 0.7 * t));
			ctx.set_line_width(1.5);
			ctx.stroke();

			ctx.set_fill_style_str("white");
			ctx.set_font("12px sans-serif");
			let _ = ctx.fill_text(&endpoint.to_string(), p.x + 12.0, p.y - 8.0);
		}
	}
}

fn draw_node(ctx: &CanvasRenderingContext2d, p: &Projected, radius: f64) {
	ctx.begin_path();
	let _ = ctx.arc(p.x, p.y, radius, 0.0, 2.0 * PI);
	ctx.set_fill_style_str("#00ff00");
	ctx.fill();
}

fn draw_sink(ctx: &CanvasRenderingContext2d, p: &Projected, size: f64) {
	ctx.set_fill_style_str("#111111");
	ctx.fill_rect(p.x - size / 2.0, p.y - size, size, size * 2.0);
	ctx.set_stroke_style_str("#00ff00");
	ctx.set_line_width(2.0);
	ctx.stroke_rect(p.x - size / 2.0, p.y - size, size, size * 2.0);
}
