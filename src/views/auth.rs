use maud::{html, Markup};

use crate::views::page;

fn credentials_form(action: &str, submit_label: &str, error: Option<&str>) -> Markup {
    html! {
        @if let Some(message) = error {
            p class="error" { (message) }
        }
        form method="post" action=(action) {
            p {
                label { "Email" }
                br;
                input type="email" name="email" required;
            }
            p {
                label { "Password" }
                br;
                input type="password" name="password" required;
            }
            button type="submit" { (submit_label) }
        }
    }
}

pub fn login_page(error: Option<&str>) -> Markup {
    page(
        "Sign in",
        false,
        html! {
            h1 { "Welcome back" }
            (credentials_form("/login", "Sign in", error))
            p { "No account? " a href="/signup" { "Sign up" } }
        },
    )
}

pub fn signup_page(error: Option<&str>) -> Markup {
    page(
        "Sign up",
        false,
        html! {
            h1 { "Create your account" }
            (credentials_form("/signup", "Sign up", error))
            p { "Already registered? " a href="/login" { "Sign in" } }
        },
    )
}
