//! Crate error type.

use wasm_bindgen::JsValue;

#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
	#[error("csv: {0}")]
	Csv(#[from] csv::Error),

	#[error("io: {0}")]
	Io(#[from] std::io::Error),

	#[error("export is not valid utf-8: {0}")]
	Utf8(#[from] std::string::FromUtf8Error),

	#[error("browser: {0}")]
	Browser(String),
}

impl From<JsValue> for DashboardError {
	fn from(value: JsValue) -> Self {
		let text = value
			.as_string()
			.unwrap_or_else(|| format!("{:?}", value));
		DashboardError::Browser(text)
	}
}

pub type Result<T> = std::result::Result<T, DashboardError>;
