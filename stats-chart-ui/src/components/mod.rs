//! Reusable Dioxus RSX components for the stats dashboards.

mod chart_canvas;
mod chart_section;
mod loading_spinner;
mod period_toggle;
mod section_header;
mod shared_legend;
mod student_tiles;

pub use chart_canvas::ChartCanvas;
pub use chart_section::ChartSection;
pub use loading_spinner::LoadingSpinner;
pub use period_toggle::PeriodToggle;
pub use section_header::SectionHeader;
pub use shared_legend::SharedLegend;
pub use student_tiles::StudentTiles;
