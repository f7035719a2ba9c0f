use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

/// Log a message to the browser console.
pub fn log(s: &str) {
    web_sys::console::log_1(&JsValue::from_str(s));
}

/// Await a fetch promise and return the response body text. Non-2xx statuses
/// are errors; nothing here retries or recovers.
pub async fn response_text(request: js_sys::Promise) -> Result<String, JsValue> {
    let resp: Response = JsFuture::from(request).await?.dyn_into()?;
    if !resp.ok() {
        return Err(JsValue::from_str(&format!(
            "request failed with status {}",
            resp.status()
        )));
    }
    let text = JsFuture::from(resp.text()?).await?;
    text.as_string()
        .ok_or_else(|| JsValue::from_str("response body is not text"))
}
