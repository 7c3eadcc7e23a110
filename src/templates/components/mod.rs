use maud::{html, Markup};

pub mod bar_chart;
pub mod error;
pub mod prediction;

pub use bar_chart::dataset_result;
pub use error::error_page;
pub use prediction::{prediction_card, prediction_failed};

pub fn card(title: &str, body: Markup) -> Markup {
    html! {
        section class="card" {
            h2 { (title) }
            div class="card-body" {
                (body)
            }
        }
    }
}

/// Inline warning that leaves the rest of the page usable.
pub fn warning_notice(message: &str) -> Markup {
    html! {
        div class="notice warning" role="alert" {
            strong { "Warning: " } (message)
        }
    }
}
