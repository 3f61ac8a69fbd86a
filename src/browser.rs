//! Thin wrappers over the browser APIs the pages need.

use rand::SeedableRng;
use rand::rngs::StdRng;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

use crate::error::{DashboardError, Result};

/// Fresh generator for UI-driven data. Model code only sees the `Rng`.
pub fn seeded_rng() -> StdRng {
	StdRng::seed_from_u64(random_seed())
}

pub fn random_seed() -> u64 {
	(js_sys::Math::random() * u64::MAX as f64) as u64
}

/// Wall-clock milliseconds since the epoch.
pub fn now_ms() -> f64 {
	js_sys::Date::now()
}

/// Current date and time in the browser's `en-US` locale format.
pub fn locale_timestamp() -> String {
	js_sys::Date::new_0()
		.to_locale_string("en-US", &JsValue::UNDEFINED)
		.into()
}

/// Offer `contents` as a CSV file download.
pub fn download_csv(file_name: &str, contents: &str) -> Result<()> {
	let document = web_sys::window()
		.and_then(|w| w.document())
		.ok_or_else(|| DashboardError::Browser("no document".into()))?;
	let body = document
		.body()
		.ok_or_else(|| DashboardError::Browser("no document body".into()))?;

	let parts = js_sys::Array::of1(&JsValue::from_str(contents));
	let options = BlobPropertyBag::new();
	options.set_type("text/csv;charset=utf-8");
	let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;
	let url = Url::create_object_url_with_blob(&blob)?;

	let link: HtmlAnchorElement = document
		.create_element("a")?
		.dyn_into()
		.map_err(|_| DashboardError::Browser("anchor element expected".into()))?;
	link.set_href(&url);
	link.set_download(file_name);
	link.style().set_property("display", "none")?;
	body.append_child(&link)?;
	link.click();
	body.remove_child(&link)?;
	Url::revoke_object_url(&url)?;
	Ok(())
}
