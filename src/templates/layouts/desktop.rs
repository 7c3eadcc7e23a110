use maud::{html, Markup, PreEscaped, DOCTYPE};

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; color: #1f2937; background: #f9fafb; }
header { display: flex; align-items: center; gap: 12px; padding: 12px 24px; background: #fff; box-shadow: 0 1px 3px rgba(0,0,0,.08); }
.shell { display: grid; grid-template-columns: 300px 1fr; gap: 24px; padding: 24px; }
.sidebar, .card { background: #fff; border: 1px solid #e5e7eb; border-radius: 8px; padding: 16px; }
.card { margin-bottom: 24px; }
.field { display: flex; flex-direction: column; gap: 4px; margin-bottom: 12px; }
.notice { padding: 12px; border-radius: 6px; }
.notice.warning { background: #fef3c7; color: #92400e; }
.notice.error { background: #fee2e2; color: #991b1b; }
.legend { display: flex; gap: 16px; flex-wrap: wrap; font-size: 0.9em; }
.swatch { display: inline-block; width: 12px; height: 12px; margin-right: 4px; border-radius: 2px; }
"#;

pub fn desktop_layout(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(STYLE)) }
                script src="https://unpkg.com/htmx.org@1.9.12" defer {};
            }
            body {
                header {
                    svg
                        xmlns="http://www.w3.org/2000/svg"
                        width="24"
                        height="24"
                        viewBox="0 0 24 24"
                        fill="none"
                        stroke="#524ed2"
                        stroke-width="2"
                        stroke-linecap="round"
                        stroke-linejoin="round"
                    {
                        path stroke="none" d="M0 0h24v24H0z" fill="none" {}
                        path d="M5 12l-2 0l9 -9l9 9l-2 0" {}
                        path d="M5 12v7a2 2 0 0 0 2 2h10a2 2 0 0 0 2 -2v-7" {}
                        path d="M9 21v-6a2 2 0 0 1 2 -2h2a2 2 0 0 1 2 2v6" {}
                    }
                    h3 { (title) }
                }
                (content)
            }
        }
    }
}
