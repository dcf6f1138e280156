use console_error_panic_hook::set_once as set_panic_hook;
use serde::Serialize;
use wasm_bindgen::prelude::*;

pub mod convert;
pub mod qr;
pub mod sort;
pub mod status;

use qr::{QrOptions, QrRegion};
use status::Outcome;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    set_panic_hook();
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|err| JsValue::from_str(&err.to_string()))
}

fn outcome_to_js(outcome: &Outcome) -> Result<JsValue, JsValue> {
    to_js(&outcome.to_report())
}

/// Converts the buffer from JSON to YAML or from YAML to JSON.
#[wasm_bindgen]
pub fn convert_json_yaml(input: &str) -> Result<JsValue, JsValue> {
    outcome_to_js(&convert::convert_json_yaml(input))
}

/// Rewrites a comma-separated buffer as one value per line.
#[wasm_bindgen]
pub fn comma_to_newline(input: &str) -> Result<JsValue, JsValue> {
    outcome_to_js(&convert::comma_to_newline(input))
}

/// Sorts buffer lines; `order` is `"ascending"` or anything else for descending.
#[wasm_bindgen]
pub fn sort_lines(input: &str, order: &str) -> Result<JsValue, JsValue> {
    outcome_to_js(&sort::sort_lines(input, order))
}

/// QR display region owned by the page, one instance per `<div>`.
#[wasm_bindgen]
pub struct QrPanel {
    region: QrRegion,
}

#[wasm_bindgen]
impl QrPanel {
    /// `options` may be `undefined` or a partial `{ width, height, ecLevel, format }` object.
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<QrPanel, JsValue> {
        let options = qr_options_from_js(options).map_err(|err| JsValue::from_str(&err))?;
        let region = QrRegion::new(options).map_err(|err| JsValue::from_str(&err))?;
        Ok(QrPanel { region })
    }

    /// Draws `text`, returning the image to display or `null` once the region is cleared.
    pub fn render(&mut self, text: &str) -> Result<JsValue, JsValue> {
        match self
            .region
            .render(text)
            .map_err(|err| JsValue::from_str(&err))?
        {
            Some(image) => to_js(image),
            None => Ok(JsValue::NULL),
        }
    }

    pub fn clear(&mut self) {
        self.region.clear();
    }

    #[wasm_bindgen(js_name = hasSurface)]
    pub fn has_surface(&self) -> bool {
        self.region.has_surface()
    }
}

fn qr_options_from_js(value: JsValue) -> Result<QrOptions, String> {
    if value.is_undefined() || value.is_null() {
        return Ok(QrOptions::default());
    }
    serde_wasm_bindgen::from_value(value).map_err(|err| err.to_string())
}

#[cfg(test)]
mod lib_tests;
