use crate::domain::{format_currency, PropertyRecord};
use crate::predictor::{Prediction, PriceCategory};
use maud::{html, Markup};

pub fn prediction_card(record: &PropertyRecord, prediction: &Prediction, currency: &str) -> Markup {
    let badge = match prediction.category {
        PriceCategory::Affordable => "background: #d1fae5; color: #065f46;",
        PriceCategory::Expensive => "background: #fee2e2; color: #991b1b;",
    };

    html! {
        div id="prediction-result" {
            h3 { "🏷️ Prediction" }
            p {
                "Estimated Price: "
                strong { (format_currency(prediction.price, currency)) }
            }
            p {
                "Price Category: "
                span style=(format!("{badge} padding: 2px 8px; border-radius: 9999px; font-weight: 600;")) {
                    (prediction.category)
                }
            }
            p style="color: #6b7280; font-size: 0.85em;" {
                (record.bedrooms) " bed · " (record.bathrooms) " bath · "
                (record.toilets) " toilets · " (record.parking_space) " parking · "
                (record.title) ", " (record.town) ", " (record.state)
            }
        }
    }
}

/// Shown instead of a result when either model rejects the record.
pub fn prediction_failed() -> Markup {
    html! {
        div id="prediction-result" class="notice error" role="alert" {
            strong { "Prediction failed." }
            " The models could not score this combination of inputs. Try a different town, state or house type."
        }
    }
}
