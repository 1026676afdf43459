use maud::{html, Markup, DOCTYPE};

pub fn base(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                meta name="theme-color" content="#16a34a";
                title { (title) " - FreshBay" }

                link rel="icon" type="image/svg+xml" href="/static/images/logo.svg";

                // Tailwind CSS CDN
                script src="https://cdn.tailwindcss.com" {}

                // Animations and popup styles (loaded after Tailwind to override)
                link rel="stylesheet" href="/static/css/freshbay.css";
            }
            body class="bg-white text-gray-900" {
                main {
                    (content)
                }
            }
        }
    }
}

/// Logo and wordmark linking back to the landing page
pub fn brand() -> Markup {
    html! {
        a href="/" class="flex items-center justify-center space-x-3" {
            img src="/static/images/logo.svg" alt="Logo" class="w-16 md:w-20 rounded-xl";
            h1 class="text-4xl md:text-5xl font-bold text-green-900" {
                "FreshBay"
            }
        }
    }
}
