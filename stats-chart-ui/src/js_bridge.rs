//! Typed wrappers around JS interop via `js_sys::eval()`.
//!
//! Chart.js is loaded by the host page. The glue functions in
//! `assets/js/stats-charts.js` are evaluated at global scope once Chart.js is
//! available, and `JsChartBackend` drives them from the chart registry.

use stats_core::chart::{ChartBackend, ChartSpec};
use stats_core::series::SeriesDescriptor;

static STATS_CHARTS_JS: &str = include_str!("../assets/js/stats-charts.js");

/// Execute arbitrary JS, wrapping in try/catch to avoid panics.
pub fn call_js(code: &str) {
    let wrapped = format!(
        "try {{ {} }} catch(e) {{ console.warn('stats JS call failed:', e); }}",
        code
    );
    let _ = js_sys::eval(&wrapped);
}

/// Initialize the chart glue with a wait-for-Chart.js polling loop.
///
/// The glue defines its functions with `function` declarations, so it is
/// evaluated via indirect eval to land at global scope rather than inside
/// the interval callback.
pub fn init_charts() {
    let store_js = format!(
        "window.__statsChartScripts = {};",
        serde_json::to_string(STATS_CHARTS_JS).unwrap_or_default()
    );
    let _ = js_sys::eval(&store_js);

    let init_js = r#"
        (function() {
            var waitForChartJs = setInterval(function() {
                if (typeof Chart !== 'undefined') {
                    clearInterval(waitForChartJs);
                    (0, eval)(window.__statsChartScripts);
                    delete window.__statsChartScripts;
                    window.__statsChartsReady = true;
                    console.log('stats charts initialized');
                }
            }, 100);
        })();
    "#;
    let _ = js_sys::eval(init_js);
}

/// Polls made by `when_ready` before giving up, 100 ms apart.
const MAX_READY_POLLS: u32 = 100;

/// Script running `call` once the glue is ready and, if given, the element
/// exists. Polling stops with a warning after `MAX_READY_POLLS` attempts.
fn ready_script(element_id: Option<&str>, call: &str) -> String {
    let element_check = element_id
        .map(|id| format!(" && document.getElementById({})", js_string(id)))
        .unwrap_or_default();
    let target = js_string(element_id.unwrap_or("chart glue"));
    format!(
        r#"
        (function() {{
            var polls = 0;
            var poll = setInterval(function() {{
                if (window.__statsChartsReady{element_check}) {{
                    clearInterval(poll);
                    try {{
                        {call};
                    }} catch(e) {{ console.error('[stats] chart call failed:', e); }}
                }} else if (++polls >= {MAX_READY_POLLS}) {{
                    clearInterval(poll);
                    console.warn('[stats] gave up waiting for', {target});
                }}
            }}, 100);
        }})();
        "#,
    )
}

fn when_ready(element_id: Option<&str>, call: &str) {
    call_js(&ready_script(element_id, call));
}

fn js_string(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| "\"\"".to_string())
}

/// Chart.js rendering target for the chart registry. Charts are addressed
/// by their canvas id.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsChartBackend;

impl ChartBackend for JsChartBackend {
    type Handle = String;

    fn create(&mut self, spec: &ChartSpec) -> String {
        when_ready(
            Some(&spec.id),
            &format!(
                "createStatsChart({}, {}, {})",
                js_string(&spec.id),
                spec.to_chartjs_config(),
                spec.percent
            ),
        );
        spec.id.clone()
    }

    fn update(&mut self, handle: &String, series: &[SeriesDescriptor]) {
        let datasets: Vec<serde_json::Value> = series.iter().map(|s| s.to_chartjs()).collect();
        let datasets_json = serde_json::Value::Array(datasets).to_string();
        log::debug!("redrawing {} with {} series", handle, series.len());
        when_ready(
            None,
            &format!("updateStatsChart({}, {})", js_string(handle), datasets_json),
        );
    }

    fn destroy(&mut self, handle: String) {
        when_ready(None, &format!("destroyStatsChart({})", js_string(&handle)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ready_script_gives_up_after_max_polls() {
        let script = ready_script(Some("chart-\"1\""), "destroyStatsChart('x')");
        assert!(script.contains("++polls >= 100"));
        assert!(script.contains("document.getElementById(\"chart-\\\"1\\\"\")"));
        assert_eq!(script.matches("clearInterval(poll)").count(), 2);
        assert!(script.contains("destroyStatsChart('x');"));
    }

    #[test]
    fn ready_script_without_element_waits_for_glue_only() {
        let script = ready_script(None, "updateStatsChart('x', [])");
        assert!(script.contains("if (window.__statsChartsReady) {"));
        assert!(script.contains("\"chart glue\""));
    }
}
