use super::layout::brand;
use maud::{html, Markup};

pub fn login(notice: Option<&str>, error: Option<&str>) -> Markup {
    html! {
        div class="min-h-screen flex flex-col justify-center items-center px-6 py-12 bg-gradient-to-br from-emerald-50 to-green-100" {
            div class="w-full max-w-md space-y-8" {
                (brand())

                form action="/login" method="post" class="mt-8 space-y-6" {
                    h2 class="text-center text-2xl font-bold text-green-900" { "Sign In" }

                    @if let Some(notice_msg) = notice {
                        div class="bg-green-100 border border-green-400 text-green-800 px-4 py-3 rounded" role="status" {
                            (notice_msg)
                        }
                    }

                    @if let Some(error_msg) = error {
                        div class="bg-red-100 border border-red-400 text-red-700 px-4 py-3 rounded" role="alert" {
                            (error_msg)
                        }
                    }

                    // Email field
                    div {
                        label for="email" class="text-sm font-medium text-gray-700" {
                            "Email"
                        }
                        input type="email" id="email" name="email" required autofocus
                            class="mt-1 block w-full rounded-lg border border-gray-300 px-4 py-2.5 text-gray-900 placeholder-gray-500 focus:border-green-500 focus:ring-green-500"
                            placeholder="you@example.com";
                    }

                    // Password field
                    div {
                        label for="password" class="text-sm font-medium text-gray-700" {
                            "Password"
                        }
                        input type="password" id="password" name="password" required
                            class="mt-1 block w-full rounded-lg border border-gray-300 px-4 py-2.5 text-gray-900 placeholder-gray-500 focus:border-green-500 focus:ring-green-500"
                            placeholder="********";
                    }

                    button type="submit"
                        class="w-full bg-green-600 text-white hover:bg-green-700 focus:ring-4 focus:ring-green-300 font-medium rounded-lg px-5 py-2.5 text-center" {
                        "Sign In"
                    }

                    // Signup link
                    div class="text-center" {
                        p class="text-sm text-gray-600" {
                            "Don't have an account? "
                            a href="/signup" class="font-medium text-green-600 hover:text-green-500" {
                                "Create one"
                            }
                        }
                    }
                }
            }
        }
    }
}
