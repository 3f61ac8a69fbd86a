//! Axis and layout arithmetic for the chart renderer.

/// Value axis from zero to a rounded maximum.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Axis {
	pub max: f64,
	pub step: f64,
}

const TARGET_TICKS: f64 = 5.0;

/// Smallest of 1, 2, 5 or 10 times a power of ten that is ≥ `raw`.
pub fn nice_step(raw: f64) -> f64 {
	if !(raw > 0.0) || !raw.is_finite() {
		return 1.0;
	}
	let magnitude = 10f64.powf(raw.log10().floor());
	let norm = raw / magnitude;
	let nice = if norm <= 1.0 {
		1.0
	} else if norm <= 2.0 {
		2.0
	} else if norm <= 5.0 {
		5.0
	} else {
		10.0
	};
	nice * magnitude
}

impl Axis {
	pub fn for_max(max: f64) -> Self {
		let step = nice_step(max / TARGET_TICKS);
		let ticks = (max / step).ceil().max(1.0);
		Self {
			max: ticks * step,
			step,
		}
	}

	pub fn ticks(&self) -> impl Iterator<Item = f64> + '_ {
		let n = (self.max / self.step).round() as usize;
		(0..=n).map(move |i| i as f64 * self.step)
	}

	/// Fraction of the axis height, clamped to `[0, 1]`.
	pub fn fraction(&self, value: f64) -> f64 {
		(value / self.max).clamp(0.0, 1.0)
	}
}

/// Show every n-th category label so labels stay at least `min_px` apart.
pub fn label_stride(count: usize, width: f64, min_px: f64) -> usize {
	if count == 0 || width <= 0.0 {
		return 1;
	}
	let fits = (width / min_px).floor().max(1.0) as usize;
	count.div_ceil(fits).max(1)
}

/// X offset of point `index` when `count` points span `width` edge to edge.
pub fn point_x(index: usize, count: usize, width: f64) -> f64 {
	if count <= 1 {
		return width / 2.0;
	}
	index as f64 * width / (count - 1) as f64
}

/// X offset of the centre of category `index` out of `count` equal bands.
pub fn band_x(index: usize, count: usize, width: f64) -> f64 {
	if count == 0 {
		return 0.0;
	}
	(index as f64 + 0.5) * width / count as f64
}

/// Tick label without a trailing `.0`.
pub fn format_tick(value: f64) -> String {
	if value.fract() == 0.0 {
		format!("{}", value as i64)
	} else {
		format!("{:.1}", value)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn nice_steps() {
		assert_eq!(nice_step(0.0), 1.0);
		assert_eq!(nice_step(0.7), 1.0);
		assert_eq!(nice_step(1.3), 2.0);
		assert_eq!(nice_step(19.0), 20.0);
		assert_eq!(nice_step(41.0), 50.0);
		assert_eq!(nice_step(60.0), 100.0);
	}

	#[test]
	fn axis_covers_max() {
		let axis = Axis::for_max(95.8);
		assert_eq!(axis.step, 20.0);
		assert_eq!(axis.max, 100.0);
		assert_eq!(axis.ticks().collect::<Vec<_>>(), vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);

		let empty = Axis::for_max(0.0);
		assert_eq!(empty.max, 1.0);
		assert_eq!(empty.fraction(5.0), 1.0);
	}

	#[test]
	fn label_stride_thins_crowded_axes() {
		assert_eq!(label_stride(31, 600.0, 40.0), 3);
		assert_eq!(label_stride(5, 600.0, 40.0), 1);
		assert_eq!(label_stride(0, 600.0, 40.0), 1);
	}

	#[test]
	fn positions() {
		assert_eq!(point_x(0, 5, 400.0), 0.0);
		assert_eq!(point_x(4, 5, 400.0), 400.0);
		assert_eq!(point_x(0, 1, 400.0), 200.0);
		assert_eq!(band_x(0, 4, 400.0), 50.0);
		assert_eq!(band_x(3, 4, 400.0), 350.0);
	}

	#[test]
	fn tick_labels() {
		assert_eq!(format_tick(40.0), "40");
		assert_eq!(format_tick(0.5), "0.5");
	}
}
