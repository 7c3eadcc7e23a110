// src/domain/record.rs

use crate::config::InputsConfig;
use crate::domain::catalog::{self, HouseType, TOWNS};
use crate::errors::ServerError;
use crate::geos::NG_STATES;
use serde::Serialize;
use std::collections::HashMap;

/// Predictor input. Built fresh per interaction and dropped once the
/// predictions come back.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyRecord {
    pub bedrooms: u8,
    pub bathrooms: u8,
    pub toilets: u8,
    pub parking_space: u8,
    pub title: HouseType,
    pub town: String,
    pub state: String,
}

/// A bounded integer input, rendered as a range slider.
#[derive(Debug, Clone, Copy)]
pub struct Slider {
    pub name: &'static str,
    pub label: &'static str,
    pub min: u8,
    pub max: u8,
    pub default: u8,
}

impl Slider {
    pub fn clamp(&self, value: i64) -> u8 {
        value.clamp(self.min as i64, self.max as i64) as u8
    }
}

pub const BEDROOMS: Slider = Slider {
    name: "bedrooms",
    label: "Bedrooms",
    min: 1,
    max: 10,
    default: 3,
};

pub const BATHROOMS: Slider = Slider {
    name: "bathrooms",
    label: "Bathrooms",
    min: 1,
    max: 10,
    default: 3,
};

pub const TOILETS: Slider = Slider {
    name: "toilets",
    label: "Toilets",
    min: 1,
    max: 10,
    default: 3,
};

/// Parking range depends on the deployment, so the max comes from config.
pub fn parking_slider(inputs: &InputsConfig) -> Slider {
    Slider {
        name: "parking_space",
        label: "Parking Space",
        min: 0,
        max: inputs.parking_space_max,
        default: 2.min(inputs.parking_space_max),
    }
}

pub fn sliders(inputs: &InputsConfig) -> [Slider; 4] {
    [BEDROOMS, BATHROOMS, TOILETS, parking_slider(inputs)]
}

/// True when the query carries at least one property input, i.e. the user
/// submitted the form rather than just opening the page.
pub fn has_inputs(params: &HashMap<String, String>) -> bool {
    ["bedrooms", "bathrooms", "toilets", "parking_space", "title", "town", "state"]
        .iter()
        .any(|k| params.contains_key(*k))
}

/// Assemble a [`PropertyRecord`] from form parameters.
///
/// Numbers clamp to their slider range and fall back to the slider default
/// when absent. Categories must be catalog members; an absent category takes
/// the first catalog entry, like an untouched select box.
pub fn assemble(
    params: &HashMap<String, String>,
    inputs: &InputsConfig,
) -> Result<PropertyRecord, ServerError> {
    let [bedrooms, bathrooms, toilets, parking] = sliders(inputs);

    let title = match params.get("title") {
        Some(raw) => HouseType::from_label(raw)
            .ok_or_else(|| ServerError::BadRequest(format!("unknown house type '{raw}'")))?,
        None => HouseType::ALL[0],
    };

    let town = pick_category(params, "town", TOWNS, catalog::is_town)?;
    let state = pick_category(params, "state", NG_STATES, catalog::is_state)?;

    Ok(PropertyRecord {
        bedrooms: read_slider(params, &bedrooms)?,
        bathrooms: read_slider(params, &bathrooms)?,
        toilets: read_slider(params, &toilets)?,
        parking_space: read_slider(params, &parking)?,
        title,
        town,
        state,
    })
}

fn read_slider(params: &HashMap<String, String>, slider: &Slider) -> Result<u8, ServerError> {
    match params.get(slider.name).map(|s| s.trim()) {
        None | Some("") => Ok(slider.default),
        Some(raw) => raw.parse::<i64>().map(|v| slider.clamp(v)).map_err(|_| {
            ServerError::BadRequest(format!("{} must be a whole number", slider.name))
        }),
    }
}

fn pick_category(
    params: &HashMap<String, String>,
    field: &str,
    options: &[&str],
    is_member: fn(&str) -> bool,
) -> Result<String, ServerError> {
    match params.get(field) {
        Some(raw) if is_member(raw) => Ok(raw.clone()),
        Some(raw) => Err(ServerError::BadRequest(format!("unknown {field} '{raw}'"))),
        None => Ok(options[0].to_string()),
    }
}
