//! fetch によるAPI呼び出し
//!
//! 通信エラーもレスポンス構造違反も、画面には同じ「失敗メッセージ」として返す。

use exam_admin_common::{normalize_assignments, parse_events, AssignmentSummary, EventKind, ExamEvent};
use serde_json::Value;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

/// 教室割当を取得して正規化
pub async fn load_assignments(
    base_url: &str,
    token: &str,
    kind: EventKind,
    id: &str,
) -> Result<AssignmentSummary, String> {
    let url = format!(
        "{}/{}/{}/assignments",
        base_url.trim_end_matches('/'),
        kind.as_str(),
        String::from(js_sys::encode_uri_component(id.trim()))
    );
    let body = fetch_json(&url, token).await.map_err(js_error_message)?;
    normalize_assignments(&body).map_err(|e| e.to_string())
}

/// 試験・コンクール一覧を取得
pub async fn load_events(base_url: &str, token: &str, kind: EventKind) -> Result<Vec<ExamEvent>, String> {
    let url = format!("{}/{}", base_url.trim_end_matches('/'), kind.as_str());
    let body = fetch_json(&url, token).await.map_err(js_error_message)?;
    parse_events(&body, kind).map_err(|e| e.to_string())
}

/// GETしてJSONを返す（トークンが空ならAuthorizationなし）
async fn fetch_json(url: &str, token: &str) -> Result<Value, JsValue> {
    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::Cors);

    let request = Request::new_with_str_and_init(url, &opts)?;
    request.headers().set("Accept", "application/json")?;
    if !token.trim().is_empty() {
        request.headers().set("Authorization", &format!("Bearer {}", token.trim()))?;
    }

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("window がありません"))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
    let resp: Response = resp_value.dyn_into()?;

    if !resp.ok() {
        return Err(JsValue::from_str(&format!("API error: {} {}", resp.status(), resp.status_text())));
    }

    let json = JsFuture::from(resp.json()?).await?;
    let value: Value = serde_wasm_bindgen::from_value(json)?;
    Ok(value)
}

fn js_error_message(err: JsValue) -> String {
    err.as_string()
        .or_else(|| {
            err.dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{:?}", err))
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn wasm_error_message_from_string() {
        assert_eq!(js_error_message(JsValue::from_str("API error: 404 Not Found")), "API error: 404 Not Found");
    }

    #[wasm_bindgen_test]
    fn wasm_error_message_from_js_error() {
        let err: JsValue = js_sys::Error::new("network down").into();
        assert_eq!(js_error_message(err), "network down");
    }
}
