//! HTML rendering for the diagnosis page

use axum::response::Html;

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>3D Printer Fault Diagnosis</title>
    <style>
        body { font-family: sans-serif; max-width: 32rem; margin: 3rem auto; }
        label { display: block; margin-top: 1rem; }
        input { width: 100%; padding: 0.4rem; }
        button { margin-top: 1.5rem; padding: 0.5rem 1.5rem; }
        .prediction { margin-top: 2rem; padding: 1rem; border: 1px solid #888; }
    </style>
</head>
<body>
    <h1>3D Printer Fault Diagnosis</h1>
    <form action="/predict" method="post">
        <label for="x-direction">X direction</label>
        <input type="text" inputmode="decimal" id="x-direction" name="x-direction" required>
        <label for="y-direction">Y direction</label>
        <input type="text" inputmode="decimal" id="y-direction" name="y-direction" required>
        <label for="z-direction">Z direction</label>
        <input type="text" inputmode="decimal" id="z-direction" name="z-direction" required>
        <button type="submit">Predict</button>
    </form>
"#;

const PAGE_TAIL: &str = "</body>\n</html>\n";

/// Render the form page, with the prediction block when there is one
pub fn render_index(prediction_text: Option<&str>) -> Html<String> {
    let mut page = String::with_capacity(PAGE_HEAD.len() + PAGE_TAIL.len() + 128);
    page.push_str(PAGE_HEAD);
    if let Some(text) = prediction_text {
        page.push_str("    <div class=\"prediction\">");
        page.push_str(&escape_html(text));
        page.push_str("</div>\n");
    }
    page.push_str(PAGE_TAIL);
    Html(page)
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
