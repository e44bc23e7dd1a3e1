use maud::{html, Markup, PreEscaped, DOCTYPE};

const STYLESHEET: &str = r#"
body { font-family: sans-serif; max-width: 56rem; margin: 0 auto; padding: 1rem; }
nav { display: flex; justify-content: space-between; margin-bottom: 1.5rem; }
.deck-card { border: 1px solid #ccc; border-radius: 8px; padding: 1rem; margin: 0.5rem 0; }
.content-table td { border: 1px solid #ddd; padding: 8px; }
.content-table { border-collapse: collapse; width: 100%; margin: 10px 0; }
.row-odd { background: #f8fafc; }
.content-formula { font-family: monospace; text-align: center; padding: 1rem; }
.study-card { border: 1px solid #ccc; border-radius: 8px; padding: 2rem; margin: 1rem 0; }
.error { color: #b91c1c; }
"#;

fn header(signed_in: bool) -> Markup {
    html! {
        nav {
            a href="/" { strong { "Engram" } }
            @if signed_in {
                form method="post" action="/logout" {
                    button type="submit" { "Sign out" }
                }
            } @else {
                a href="/login" { "Sign in" }
            }
        }
    }
}

pub fn page(title: &str, signed_in: bool, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        head {
            meta charset="utf-8";
            meta name="viewport" content="width=device-width, initial-scale=1";
            style { (PreEscaped(STYLESHEET)) }
            title { (format!("{title} - Engram")) }
        }
        body {
            (header(signed_in))
            main { (body) }
        }
    }
}
