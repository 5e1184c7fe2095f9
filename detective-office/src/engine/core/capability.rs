//! Graphics capability check run before the app is built.

use crate::error::{OfficeError, OfficeResult};

/// Context names tried in order of preference.
pub const CONTEXT_KINDS: [&str; 2] = ["webgpu", "webgl2"];

const UNSUPPORTED_NOTICE: &str = "This office needs WebGPU or WebGL2. \
Try a recent Chrome, Edge, Firefox or Safari with hardware acceleration enabled.";

/// First context kind the probe accepts.
pub fn pick_context(mut probe: impl FnMut(&str) -> bool) -> OfficeResult<&'static str> {
    CONTEXT_KINDS
        .into_iter()
        .find(|kind| probe(kind))
        .ok_or_else(|| OfficeError::UnsupportedPlatform(CONTEXT_KINDS.join(" and ") + " unavailable"))
}

#[cfg(target_arch = "wasm32")]
pub fn check_graphics_support() -> OfficeResult<&'static str> {
    use wasm_bindgen::JsCast;
    use web_sys::HtmlCanvasElement;

    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| OfficeError::UnsupportedPlatform("no document".into()))?;
    let canvas = document
        .create_element("canvas")
        .ok()
        .and_then(|element| element.dyn_into::<HtmlCanvasElement>().ok())
        .ok_or_else(|| OfficeError::UnsupportedPlatform("cannot create a canvas".into()))?;

    pick_context(|kind| matches!(canvas.get_context(kind), Ok(Some(_))))
}

/// Native builds let wgpu pick the backend.
#[cfg(not(target_arch = "wasm32"))]
pub fn check_graphics_support() -> OfficeResult<&'static str> {
    Ok("native")
}

const NOTICE_STYLE: &str = "position:fixed;inset:0;display:flex;align-items:center;\
justify-content:center;padding:2rem;text-align:center;background:#14110f;color:#ffcc66;\
font:16px sans-serif;z-index:1000";

/// Attributes set on the notice element.
pub fn notice_attributes(error: &OfficeError) -> [(&'static str, String); 2] {
    [
        ("style", NOTICE_STYLE.to_string()),
        ("data-error", error.to_string()),
    ]
}

/// Full-page blocking notice. There is no recovery short of a reload.
///
/// Runs before the app (and its log subscriber) exists, so failures go
/// straight to the browser console.
#[cfg(target_arch = "wasm32")]
pub fn show_unsupported_notice(error: &OfficeError) {
    use web_sys::console;

    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        console::error_1(&UNSUPPORTED_NOTICE.into());
        return;
    };
    let Some(body) = document.body() else {
        console::error_1(&UNSUPPORTED_NOTICE.into());
        return;
    };
    let notice = match document.create_element("div") {
        Ok(notice) => notice,
        Err(e) => {
            console::warn_2(&"Failed to create unsupported notice:".into(), &e);
            console::error_1(&UNSUPPORTED_NOTICE.into());
            return;
        }
    };
    notice.set_text_content(Some(UNSUPPORTED_NOTICE));
    for (name, value) in notice_attributes(error) {
        if let Err(e) = notice.set_attribute(name, &value) {
            console::warn_2(&format!("Failed to set notice attribute {name}:").into(), &e);
        }
    }
    if let Err(e) = body.append_child(&notice) {
        console::warn_2(&"Failed to attach unsupported notice:".into(), &e);
        console::error_1(&UNSUPPORTED_NOTICE.into());
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn show_unsupported_notice(error: &OfficeError) {
    eprintln!("{UNSUPPORTED_NOTICE} ({error})");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FaultPolicy;

    #[test]
    fn prefers_webgpu() {
        assert_eq!(pick_context(|_| true).unwrap(), "webgpu");
    }

    #[test]
    fn falls_back_to_webgl2() {
        assert_eq!(pick_context(|kind| kind == "webgl2").unwrap(), "webgl2");
    }

    #[test]
    fn no_context_blocks_startup() {
        let err = pick_context(|_| false).unwrap_err();
        assert_eq!(err.policy(), FaultPolicy::Block);
        assert!(err.to_string().contains("webgpu and webgl2 unavailable"));
    }

    #[test]
    fn notice_carries_style_and_error() {
        let err = pick_context(|_| false).unwrap_err();
        let [(style_name, style), (error_name, detail)] = notice_attributes(&err);
        assert_eq!(style_name, "style");
        assert!(style.starts_with("position:fixed;inset:0;"));
        assert!(style.contains("z-index:1000"));
        assert_eq!(error_name, "data-error");
        assert_eq!(detail, err.to_string());
    }
}
