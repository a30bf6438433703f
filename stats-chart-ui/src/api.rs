//! Browser-side access to the stats endpoints and to data embedded in the page.

use anyhow::{anyhow, Context};
use stats_core::dashboard::{admin_plan, class_plan, DashboardPlan};
use stats_core::response::{class_stats_path, program_stats_path, ClassStats, ProgramStats, StatsQuery};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

/// GET `url` relative to the current page and return the body text.
pub async fn fetch_text(url: &str) -> anyhow::Result<String> {
    let window = web_sys::window().ok_or_else(|| anyhow!("no window"))?;
    let response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| anyhow!("GET {url} failed: {e:?}"))?;
    let response: Response = response
        .dyn_into()
        .map_err(|e| anyhow!("GET {url} returned a non-response: {e:?}"))?;
    if !response.ok() {
        return Err(anyhow!("GET {url} returned status {}", response.status()));
    }
    let body = response
        .text()
        .map_err(|e| anyhow!("GET {url} body unreadable: {e:?}"))?;
    let body = JsFuture::from(body)
        .await
        .map_err(|e| anyhow!("GET {url} body unreadable: {e:?}"))?;
    body.as_string()
        .ok_or_else(|| anyhow!("GET {url} body is not text"))
}

/// Fetch program-wide stats and reshape them for the admin dashboard.
pub async fn load_admin_plan(query: StatsQuery) -> anyhow::Result<DashboardPlan> {
    let path = program_stats_path(&query);
    let body = fetch_text(&path).await?;
    let stats = ProgramStats::from_json(&body).with_context(|| format!("decoding {path}"))?;
    Ok(admin_plan(&stats))
}

/// Fetch stats of one class and reshape them for the class dashboard.
pub async fn load_class_plan(class_id: String, query: StatsQuery) -> anyhow::Result<DashboardPlan> {
    let path = class_stats_path(&class_id, &query);
    let body = fetch_text(&path).await?;
    let stats = ClassStats::from_json(&body).with_context(|| format!("decoding {path}"))?;
    Ok(class_plan(&stats))
}

/// Value of attribute `name` on the element with id `element_id`.
pub fn element_attribute(element_id: &str, name: &str) -> Option<String> {
    web_sys::window()?
        .document()?
        .get_element_by_id(element_id)?
        .get_attribute(name)
}

/// Text content of the element with id `element_id`, e.g. a
/// `<script type="application/json">` block rendered by the server.
pub fn embedded_text(element_id: &str) -> Option<String> {
    web_sys::window()?
        .document()?
        .get_element_by_id(element_id)?
        .text_content()
}
