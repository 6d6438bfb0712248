//! Page Helpers
//!
//! Small wrappers over the server-rendered page: embedded JSON blocks, the
//! CSRF token, element geometry and window events. A missing element is
//! never an error here; callers get `None` or an empty list.

use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};

use leptos_dragdrop::{Axis, Span};

pub const CSRF_INPUT_NAME: &str = "csrfmiddlewaretoken";
pub const CSRF_COOKIE_NAME: &str = "csrftoken";
pub const TASK_MOVED_EVENT: &str = "taskMoved";

fn document() -> Option<web_sys::Document> {
    web_sys::window().and_then(|win| win.document())
}

/// Text content of `<script id="...">`
pub fn script_text(id: &str) -> Option<String> {
    document()
        .and_then(|doc| doc.get_element_by_id(id))
        .and_then(|el| el.text_content())
        .filter(|text| !text.trim().is_empty())
}

/// Value of `name` in a `document.cookie` string
pub fn cookie_value(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
}

/// CSRF token from the hidden form input, else the cookie
pub fn csrf_token() -> Option<String> {
    let doc = document()?;
    let selector = format!("input[name='{}']", CSRF_INPUT_NAME);
    let from_input = doc
        .query_selector(&selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<web_sys::HtmlInputElement>().ok())
        .map(|input| input.value())
        .filter(|value| !value.is_empty());

    from_input.or_else(|| {
        let cookies = doc.dyn_into::<web_sys::HtmlDocument>().ok()?.cookie().ok()?;
        cookie_value(&cookies, CSRF_COOKIE_NAME)
    })
}

pub fn origin() -> String {
    web_sys::window()
        .and_then(|win| win.location().origin().ok())
        .unwrap_or_default()
}

pub fn alert(message: &str) {
    if let Some(win) = web_sys::window() {
        let _ = win.alert_with_message(message);
    }
}

/// Dispatch a `CustomEvent` named `name` on the window with `detail`
pub fn dispatch_window_event<T: Serialize>(name: &str, detail: &T) {
    let Some(win) = web_sys::window() else {
        return;
    };
    let detail = match serde_wasm_bindgen::to_value(detail) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("could not encode {} detail: {}", name, e);
            JsValue::NULL
        }
    };
    let init = web_sys::CustomEventInit::new();
    init.set_detail(&detail);
    match web_sys::CustomEvent::new_with_event_init_dict(name, &init) {
        Ok(event) => {
            let _ = win.dispatch_event(&event);
        }
        Err(e) => tracing::warn!("could not create {} event: {:?}", name, e),
    }
}

/// Spans of the elements matching `selector`, in DOM order, keyed by the
/// id recovered from each element's `id` attribute.
pub fn collect_spans<Id>(selector: &str, axis: Axis, parse: impl Fn(&str) -> Option<Id>) -> Vec<(Id, Span)> {
    let Some(nodes) = document().and_then(|doc| doc.query_selector_all(selector).ok()) else {
        tracing::debug!("no elements for {}", selector);
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
        .filter_map(|el| {
            let id = parse(&el.id())?;
            Some((id, Span::from_rect(&el.get_bounding_client_rect(), axis)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_value() {
        let cookies = "sessionid=abc; csrftoken=T0k3n; theme=dark";
        assert_eq!(cookie_value(cookies, "csrftoken").as_deref(), Some("T0k3n"));
        assert_eq!(cookie_value(cookies, "theme").as_deref(), Some("dark"));
        assert_eq!(cookie_value(cookies, "missing"), None);
        assert_eq!(cookie_value("csrftoken=", "csrftoken"), None);
        assert_eq!(cookie_value("", "csrftoken"), None);
    }
}
