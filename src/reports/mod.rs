// Reports module - tax summary rendering for terminal and JSON output

pub mod summary;

pub use summary::{
    render_disposals, render_json, render_ratios, render_real_earnings_note, render_summary,
    render_uncovered_warning,
};
