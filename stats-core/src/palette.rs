//! Chart colors shared by every dashboard.

pub const FAIL: &str = "#fd7f6f";
pub const SUCCESS: &str = "#b2e061";
pub const NEUTRAL: &str = "#7eb0d5";

/// General purpose palette for keyed series (exceptions, user types, students).
pub const CHART_COLORS: &[&str] = &[
    "#fd7f6f", "#b2e061", "#7eb0d5", "#bd7ebe", "#ffb55a", "#ffee65", "#beb9db", "#fdcce5",
    "#8bd3c7",
];

/// Five shades for each of five hues, one color per level.
pub const LEVEL_COLORS: &[&str] = &[
    "#fbcb8d", "#f9ac48", "#f18c07", "#ac6405", "#673c03", "#fce28c", "#fad146", "#f3bd05",
    "#ae8704", "#685102", "#b3d5b5", "#85bc89", "#58a15d", "#3f7342", "#254528", "#fab28e",
    "#f78449", "#ef5709", "#ab3e07", "#662504", "#dbadb8", "#c57b8d", "#ad4c63", "#7c3647",
    "#4a202a",
];

/// Color for the `index`-th series; the palette wraps around.
pub fn cycle(palette: &[&'static str], index: usize) -> Option<&'static str> {
    if palette.is_empty() {
        None
    } else {
        Some(palette[index % palette.len()])
    }
}
