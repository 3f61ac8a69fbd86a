use web_sys::CanvasRenderingContext2d;

use super::scale::{self, Axis};
use crate::model::charts::{ChartData, ChartKind, Dataset};

const PAD_LEFT: f64 = 48.0;
const PAD_RIGHT: f64 = 16.0;
const PAD_TOP: f64 = 32.0;
const PAD_BOTTOM: f64 = 40.0;
const MIN_LABEL_PX: f64 = 44.0;
const TEXT: &str = "rgba(255, 255, 255, 0.7)";
const GRID: &str = "rgba(255, 255, 255, 0.1)";

/// Drawable area inside the padding.
struct Plot {
	x: f64,
	y: f64,
	w: f64,
	h: f64,
}

impl Plot {
	fn y_for(&self, axis: &Axis, value: f64) -> f64 {
		self.y + self.h * (1.0 - axis.fraction(value))
	}
}

pub fn render(
	chart: &ChartData,
	kind: ChartKind,
	ctx: &CanvasRenderingContext2d,
	width: f64,
	height: f64,
) {
	ctx.clear_rect(0.0, 0.0, width, height);
	let plot = Plot {
		x: PAD_LEFT,
		y: PAD_TOP,
		w: (width - PAD_LEFT - PAD_RIGHT).max(1.0),
		h: (height - PAD_TOP - PAD_BOTTOM).max(1.0),
	};
	let axis = Axis::for_max(chart.max_value());

	draw_grid(ctx, &plot, &axis);
	draw_categories(ctx, &plot, chart, kind);
	match kind {
		ChartKind::Line => {
			for dataset in &chart.datasets {
				draw_line(ctx, &plot, &axis, dataset, chart.labels.len());
			}
		}
		ChartKind::Bar => draw_bars(ctx, &plot, &axis, chart),
	}
	draw_legend(ctx, chart, width);
}

fn draw_grid(ctx: &CanvasRenderingContext2d, plot: &Plot, axis: &Axis) {
	ctx.set_stroke_style_str(GRID);
	ctx.set_line_width(1.0);
	ctx.set_fill_style_str(TEXT);
	ctx.set_font("11px sans-serif");
	ctx.set_text_align("right");
	for tick in axis.ticks() {
		let y = plot.y_for(axis, tick);
		ctx.begin_path();
		ctx.move_to(plot.x, y);
		ctx.line_to(plot.x + plot.w, y);
		ctx.stroke();
		let _ = ctx.fill_text(&scale::format_tick(tick), plot.x - 6.0, y + 4.0);
	}
}

fn category_x(plot: &Plot, kind: ChartKind, index: usize, count: usize) -> f64 {
	plot.x
		+ match kind {
			ChartKind::Line => scale::point_x(index, count, plot.w),
			ChartKind::Bar => scale::band_x(index, count, plot.w),
		}
}

fn draw_categories(ctx: &CanvasRenderingContext2d, plot: &Plot, chart: &ChartData, kind: ChartKind) {
	let count = chart.labels.len();
	let stride = scale::label_stride(count, plot.w, MIN_LABEL_PX);
	ctx.set_fill_style_str(TEXT);
	ctx.set_font("11px sans-serif");
	ctx.set_text_align("center");
	for (i, label) in chart.labels.iter().enumerate().step_by(stride) {
		let x = category_x(plot, kind, i, count);
		let _ = ctx.fill_text(label, x, plot.y + plot.h + 18.0);
	}
}

fn draw_line(ctx: &CanvasRenderingContext2d, plot: &Plot, axis: &Axis, dataset: &Dataset, count: usize) {
	if dataset.data.is_empty() {
		return;
	}
	let points: Vec<(f64, f64)> = dataset
		.data
		.iter()
		.enumerate()
		.map(|(i, v)| (category_x(plot, ChartKind::Line, i, count), plot.y_for(axis, *v)))
		.collect();

	if dataset.fill {
		ctx.begin_path();
		ctx.move_to(points[0].0, plot.y + plot.h);
		for &(x, y) in &points {
			ctx.line_to(x, y);
		}
		ctx.line_to(points[points.len() - 1].0, plot.y + plot.h);
		ctx.close_path();
		ctx.set_global_alpha(0.15);
		ctx.set_fill_style_str(&dataset.color);
		ctx.fill();
		ctx.set_global_alpha(1.0);
	}

	ctx.set_stroke_style_str(&dataset.color);
	ctx.set_line_width(2.0);
	ctx.begin_path();
	ctx.move_to(points[0].0, points[0].1);
	for &(x, y) in &points[1..] {
		ctx.line_to(x, y);
	}
	ctx.stroke();
}

fn draw_bars(ctx: &CanvasRenderingContext2d, plot: &Plot, axis: &Axis, chart: &ChartData) {
	let (count, groups) = (chart.labels.len(), chart.datasets.len());
	if count == 0 || groups == 0 {
		return;
	}
	let band = plot.w / count as f64;
	let bar = band * 0.8 / groups as f64;
	let baseline = plot.y + plot.h;

	for (g, dataset) in chart.datasets.iter().enumerate() {
		ctx.set_fill_style_str(&dataset.color);
		for (i, v) in dataset.data.iter().enumerate().take(count) {
			let left = category_x(plot, ChartKind::Bar, i, count) - band * 0.4 + g as f64 * bar;
			let top = plot.y_for(axis, *v);
			ctx.fill_rect(left, top, bar * 0.9, baseline - top);
		}
	}
}

fn draw_legend(ctx: &CanvasRenderingContext2d, chart: &ChartData, width: f64) {
	ctx.set_font("12px sans-serif");
	ctx.set_text_align("left");
	let mut x = PAD_LEFT;
	for dataset in &chart.datasets {
		let text_w = ctx
			.measure_text(&dataset.label)
			.map(|m| m.width())
			.unwrap_or(dataset.label.len() as f64 * 7.0);
		if x + text_w + 20.0 > width {
			break;
		}
		ctx.set_fill_style_str(&dataset.color);
		ctx.fill_rect(x, 10.0, 12.0, 12.0);
		ctx.set_fill_style_str(TEXT);
		let _ = ctx.fill_text(&dataset.label, x + 16.0, 20.0);
		x += text_w + 32.0;
	}
}
