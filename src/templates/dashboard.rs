use super::layout::brand;
use crate::models::{AuthUser, Role};
use maud::{html, Markup};

fn role_label(role: Role) -> &'static str {
    match role {
        Role::Donor => "Donor",
        Role::Receiver => "Receiver",
        Role::Unset => "Not set",
    }
}

/// The website only becomes a link when it is plain http(s).
fn web_link(website: &str) -> Option<&str> {
    let lower = website.trim_start().to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        Some(website.trim_start())
    } else {
        None
    }
}

pub fn dashboard(user: &AuthUser) -> Markup {
    let meta = &user.user_metadata;
    let food_bank = &meta.foodbank;

    html! {
        div class="min-h-screen px-6 py-12 bg-gradient-to-br from-emerald-50 to-green-100" {
            div class="max-w-2xl mx-auto space-y-8" {
                (brand())

                div class="bg-white rounded-xl shadow p-8 space-y-6" {
                    div class="flex items-center justify-between" {
                        h2 class="text-2xl font-bold text-green-900" {
                            "Welcome, " (user.display_name())
                        }
                        form action="/logout" method="post" {
                            button type="submit" class="text-sm font-medium text-gray-600 hover:text-gray-900" {
                                "Sign out"
                            }
                        }
                    }

                    dl class="grid grid-cols-3 gap-4 text-sm" {
                        dt class="font-medium text-gray-600" { "Email" }
                        dd class="col-span-2" { (user.email.as_deref().unwrap_or("-")) }

                        dt class="font-medium text-gray-600" { "Role" }
                        dd class="col-span-2" { (role_label(meta.role)) }

                        dt class="font-medium text-gray-600" { "Location" }
                        dd class="col-span-2" { (meta.location.as_deref().unwrap_or("Not shared")) }

                        @if let Some(created_at) = user.created_at {
                            dt class="font-medium text-gray-600" { "Member since" }
                            dd class="col-span-2" { (created_at.format("%Y-%m-%d").to_string()) }
                        }
                    }

                    @if !food_bank.title.is_empty() {
                        div class="border-t border-gray-200 pt-6 space-y-2" {
                            h3 class="text-lg font-bold text-green-900" { (food_bank.title) }
                            @if !food_bank.address.is_empty() {
                                p class="text-sm text-gray-700" { (food_bank.address) }
                            }
                            @if let Some(website) = web_link(&food_bank.website) {
                                a href=(website) class="text-sm text-green-600 hover:text-green-500" {
                                    (website)
                                }
                            } @else if !food_bank.website.is_empty() {
                                p class="text-sm text-gray-600" { (food_bank.website) }
                            }
                            @if !food_bank.description.is_empty() {
                                p class="text-sm text-gray-600" { (food_bank.description) }
                            }
                        }
                    }
                }
            }
        }
    }
}
