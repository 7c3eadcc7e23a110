use crate::dataset::GroupBy;
use crate::domain::catalog::{HouseType, TOWNS};
use crate::domain::record::Slider;
use crate::domain::PropertyRecord;
use crate::geos::NG_STATES;
use crate::templates::{card, desktop_layout};
use maud::{html, Markup, PreEscaped};

pub struct DashboardVm<'a> {
    pub title: &'a str,
    pub sliders: [Slider; 4],
    /// Current selections; widget defaults on first load.
    pub record: PropertyRecord,
    /// Prediction card (or failure notice) when the form was submitted.
    pub result: Option<Markup>,
}

// Reads the chosen file in the browser and posts it as a raw CSV body.
const UPLOAD_SCRIPT: &str = r#"
async function uploadDataset(input) {
  const file = input.files[0];
  if (!file) return;
  const by = document.getElementById('group-by').value;
  const resp = await fetch('/dataset?by=' + encodeURIComponent(by), {
    method: 'POST',
    headers: { 'Content-Type': 'text/csv' },
    body: await file.text(),
  });
  document.getElementById('chart-area').innerHTML = await resp.text();
}
"#;

pub fn dashboard_page(vm: &DashboardVm) -> Markup {
    desktop_layout(
        vm.title,
        html! {
            main class="shell" {
                aside class="sidebar" {
                    (property_form(vm))
                }
                div {
                    section class="card" id="prediction" {
                        @match &vm.result {
                            Some(result) => (result),
                            None => p style="color: #6b7280;" {
                                "Adjust the property features and press Predict."
                            },
                        }
                    }
                    (dataset_card())
                }
            }
            script { (PreEscaped(UPLOAD_SCRIPT)) }
        },
    )
}

fn property_form(vm: &DashboardVm) -> Markup {
    let record = &vm.record;
    let values = [
        record.bedrooms,
        record.bathrooms,
        record.toilets,
        record.parking_space,
    ];

    html! {
        form
            action="/"
            method="get"
            hx-get="/predict"
            hx-target="#prediction"
            hx-trigger="change, submit"
        {
            h2 { "Property Features" }

            @for (slider, value) in vm.sliders.iter().zip(values) {
                div class="field" {
                    label for=(slider.name) {
                        (slider.label) ": "
                        output id=(format!("{}-value", slider.name)) { (value) }
                    }
                    input
                        type="range"
                        id=(slider.name)
                        name=(slider.name)
                        min=(slider.min)
                        max=(slider.max)
                        value=(value)
                        oninput=(format!("document.getElementById('{}-value').textContent = this.value", slider.name));
                }
            }

            div class="field" {
                label for="title" { "House Type" }
                select name="title" id="title" {
                    @for t in HouseType::ALL {
                        option value=(t.label()) selected[t == record.title] { (t.label()) }
                    }
                }
            }

            div class="field" {
                label for="town" { "Town" }
                select name="town" id="town" {
                    @for town in TOWNS {
                        option value=(town) selected[*town == record.town] { (town) }
                    }
                }
            }

            div class="field" {
                label for="state" { "State" }
                select name="state" id="state" {
                    @for state in NG_STATES {
                        option value=(state) selected[*state == record.state] { (state) }
                    }
                }
            }

            button type="submit" { "Predict" }
        }
    }
}

fn dataset_card() -> Markup {
    card(
        "Explore a dataset",
        html! {
            p {
                "Upload a CSV with a " code { "state" } " or " code { "town" }
                " column and a " code { "price Category" } " column."
            }
            div style="display: flex; gap: 10px; align-items: center;" {
                label for="group-by" { "Group by" }
                select id="group-by" name="by" {
                    option value=(GroupBy::Zone.as_param()) { "Geopolitical zone" }
                    option value=(GroupBy::Town.as_param()) { "Town" }
                }
                input type="file" accept=".csv,text/csv" onchange="uploadDataset(this)";
            }
            details style="margin-top: 12px;" {
                summary { "Or paste CSV" }
                form method="post" action="/dataset/export" {
                    select name="by" {
                        option value=(GroupBy::Zone.as_param()) { "Geopolitical zone" }
                        option value=(GroupBy::Town.as_param()) { "Town" }
                    }
                    textarea name="csv" rows="6" style="width: 100%;" placeholder="state,price Category" {}
                    button type="submit" hx-post="/dataset" hx-target="#chart-area" { "Plot" }
                    button type="submit" { "Download counts (.xlsx)" }
                }
            }
            div id="chart-area" style="margin-top: 16px;" {}
        },
    )
}
