use wasm_bindgen::prelude::*;

use crate::classify::{ClassifyOptions, classify_with};
use crate::codes::ErrorCode;
use crate::decimal::{Decimal, canonical_decimal_text};
use crate::domain::DomainError;
use crate::failure::Failure;
use crate::types::Value;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = JSON)]
    fn parse(s: &str) -> JsValue;
}

fn to_js(value: &serde_json::Value) -> JsValue {
    match serde_json::to_string(value) {
        Ok(json_str) => parse(&json_str),
        Err(_) => JsValue::NULL,
    }
}

/// Returns every engine error code as `{name, code}`.
#[wasm_bindgen]
pub fn get_error_codes() -> JsValue {
    let codes: Vec<serde_json::Value> = ErrorCode::ALL
        .iter()
        .map(|c| {
            serde_json::json!({
                "name": c.as_ref(),
                "code": c.code(),
            })
        })
        .collect();
    to_js(&serde_json::Value::Array(codes))
}

/// Canonical fixed-point text for a decimal literal.
#[wasm_bindgen]
pub fn canonicalize_decimal(text: &str) -> JsValue {
    let decimal = match text.parse::<Decimal>() {
        Ok(d) => d,
        Err(e) => return error_result(&e.to_string()),
    };
    match canonical_decimal_text(&Value::Decimal(decimal)) {
        Ok(canonical) => to_js(&serde_json::json!({ "text": canonical })),
        Err(e) => error_result(&e.to_string()),
    }
}

/// Classify a domain error raised with an explicit engine code.
#[wasm_bindgen]
pub fn classify_domain_error(code: i32, message: &str) -> JsValue {
    let Some(code) = ErrorCode::from_code(code) else {
        return error_result("Unknown error code");
    };
    let options = ClassifyOptions {
        include_backtrace: false,
        ..ClassifyOptions::default()
    };
    let result = classify_with(&Failure::new(DomainError::new(code, message)), &options);
    match serde_json::to_value(&result) {
        Ok(v) => to_js(&v),
        Err(_) => error_result("Failed to serialize classification"),
    }
}

fn error_result(msg: &str) -> JsValue {
    let obj = serde_json::json!({"error": msg});
    to_js(&obj)
}
