use super::components::{decor_panels, floating_badge, DecorConfig};
use super::layout::brand;
use crate::{
    geo::GeolocationOptions,
    models::ROLE_OPTIONS,
    signup::{RegistrationDraft, SubmissionState},
};
use maud::{html, Markup, PreEscaped};

const INPUT_CLASS: &str = "mt-1 block w-full rounded-lg border border-gray-300 px-4 py-2.5 text-gray-900 placeholder-gray-500 focus:border-green-500 focus:ring-green-500 transition duration-200 ease-in-out";
const LABEL_CLASS: &str = "text-sm font-medium text-gray-700";
const SUBMIT_CLASS: &str = "w-full bg-green-600 text-white hover:bg-green-700 focus:ring-4 focus:ring-green-300 font-medium rounded-lg px-5 py-2.5 text-center transition duration-200 ease-in-out";
const SUBMIT_CLASS_BUSY: &str = "w-full bg-green-600 text-white hover:bg-green-700 focus:ring-4 focus:ring-green-300 font-medium rounded-lg px-5 py-2.5 text-center transition duration-200 ease-in-out opacity-50 cursor-not-allowed";

/// Everything the signup page needs to render one form.
pub struct SignupView {
    /// Identifies the live form on the server
    pub token: String,
    pub draft: RegistrationDraft,
    pub state: SubmissionState,
    pub geolocation: GeolocationOptions,
}

fn spinner() -> Markup {
    html! {
        svg class="animate-spin -ml-1 mr-3 h-5 w-5 text-white"
            xmlns="http://www.w3.org/2000/svg" fill="none" viewBox="0 0 24 24" {
            circle class="opacity-25" cx="12" cy="12" r="10" stroke="currentColor" stroke-width="4" {}
            path class="opacity-75" fill="currentColor"
                d="M4 12a8 8 0 018-8V0C5.373 0 0 5.373 0 12h4zm2.93 6.364A8.001 8.001 0 014 12H0c0 3.042 1.135 5.824 3 7.938l3.93-1.574z" {}
        }
    }
}

fn role_select(draft: &RegistrationDraft) -> Markup {
    // Several labels can share a value; only the first match is preselected.
    let selected = ROLE_OPTIONS
        .iter()
        .position(|(_, role)| *role == draft.role());

    html! {
        select id="role" name="role" class=(INPUT_CLASS) {
            option value="" disabled selected[selected.is_none()] { "Select your role" }
            optgroup label="Roles" {
                @for (i, (label, role)) in ROLE_OPTIONS.iter().enumerate() {
                    option value=(role.as_str()) selected[selected == Some(i)] { (label) }
                }
            }
        }
    }
}

fn food_bank_popup(draft: &RegistrationDraft, open: bool) -> Markup {
    let food_bank = draft.food_bank();
    let popup_class = if open { "fb-popup open" } else { "fb-popup" };

    html! {
        div id="foodbank-popup" class=(popup_class)
            role="dialog" aria-modal="true" aria-labelledby="foodbank-popup-title" {
            div class="fb-popup-card bg-white rounded-xl p-6 space-y-4 max-w-md w-full" {
                h3 id="foodbank-popup-title" class="text-xl font-bold text-green-900" {
                    "Tell us about your food bank"
                }
                p class="text-sm text-gray-600" {
                    "Receivers need to name the food bank they represent before creating an account."
                }
                div {
                    label for="food_bank_title" class=(LABEL_CLASS) { "Food Bank Name" }
                    input type="text" id="food_bank_title" name="food_bank_title"
                        class=(INPUT_CLASS) value=(food_bank.title);
                }
                div {
                    label for="food_bank_address" class=(LABEL_CLASS) { "Address" }
                    input type="text" id="food_bank_address" name="food_bank_address"
                        class=(INPUT_CLASS) value=(food_bank.address);
                }
                div {
                    label for="food_bank_website" class=(LABEL_CLASS) { "Website" }
                    input type="url" id="food_bank_website" name="food_bank_website"
                        class=(INPUT_CLASS) value=(food_bank.website)
                        placeholder="https://";
                }
                div {
                    label for="food_bank_description" class=(LABEL_CLASS) { "Description" }
                    textarea id="food_bank_description" name="food_bank_description"
                        class=(INPUT_CLASS) rows="3" { (food_bank.description) }
                }
                button type="button" id="foodbank-popup-close"
                    class="w-full bg-green-600 text-white hover:bg-green-700 font-medium rounded-lg px-5 py-2.5" {
                    "Save"
                }
            }
        }
    }
}

fn script(geolocation: &GeolocationOptions) -> Markup {
    let js = format!(
        r#"
        (function() {{
            const form = document.getElementById('signup-form');
            const popup = document.getElementById('foodbank-popup');
            const submit = document.getElementById('signup-submit');

            if ('geolocation' in navigator) {{
                // The option timeout starts after the permission prompt; this one includes it.
                let decided = false;
                setTimeout(function() {{ decided = true; }}, {timeout_ms});

                navigator.geolocation.getCurrentPosition(function(position) {{
                    if (decided) return;
                    decided = true;
                    document.getElementById('latitude').value = position.coords.latitude;
                    document.getElementById('longitude').value = position.coords.longitude;
                }}, function() {{ decided = true; }}, {{ enableHighAccuracy: {high_accuracy}, timeout: {timeout_ms} }});
            }}

            document.getElementById('foodbank-popup-close').addEventListener('click', function() {{
                popup.classList.remove('open');
            }});

            form.addEventListener('submit', function(e) {{
                const role = document.getElementById('role').value;
                const title = document.getElementById('food_bank_title').value;

                if (role === 'receiver' && title === '') {{
                    e.preventDefault();
                    popup.classList.add('open');
                    return false;
                }}

                if (submit.disabled) {{
                    e.preventDefault();
                    return false;
                }}
                submit.disabled = true;
                submit.classList.add('opacity-50', 'cursor-not-allowed');
                document.getElementById('signup-submit-idle').classList.add('hidden');
                document.getElementById('signup-submit-busy').classList.remove('hidden');
            }});
        }})();
        "#,
        high_accuracy = geolocation.high_accuracy,
        timeout_ms = geolocation.decision_timeout.as_millis(),
    );

    html! {
        script { (PreEscaped(js)) }
    }
}

pub fn signup(view: &SignupView) -> Markup {
    let draft = &view.draft;
    let state = &view.state;
    let decor = DecorConfig::default();
    let (submit_class, busy_class, idle_class) = if state.loading {
        (SUBMIT_CLASS_BUSY, "flex items-center justify-center", "hidden")
    } else {
        (SUBMIT_CLASS, "flex items-center justify-center hidden", "")
    };

    html! {
        div class="min-h-screen flex flex-col md:flex-row relative" {
            div class="md:w-2/5 w-full flex flex-col justify-center items-center px-6 py-12 md:px-12 bg-gradient-to-br from-emerald-50 to-green-100" {
                div class="w-full max-w-md space-y-8" {
                    (brand())

                    form id="signup-form" action="/signup" method="post" class="mt-8 space-y-6" {
                        h2 class="text-center text-2xl font-bold text-green-900" {
                            "Create Your Account"
                        }

                        @if let Some(error_msg) = &state.error {
                            div class="bg-red-100 border border-red-400 text-red-700 px-4 py-3 rounded relative" role="alert" {
                                span class="block sm:inline" { (error_msg) }
                            }
                        }

                        input type="hidden" name="form_token" value=(view.token);
                        input type="hidden" id="latitude" name="latitude";
                        input type="hidden" id="longitude" name="longitude";

                        div class="space-y-4" {
                            div class="grid grid-cols-2 gap-4" {
                                div {
                                    label for="first_name" class=(LABEL_CLASS) { "First Name" }
                                    input type="text" id="first_name" name="first_name" required
                                        class=(INPUT_CLASS) placeholder="John"
                                        value=(draft.first_name());
                                }
                                div {
                                    label for="last_name" class=(LABEL_CLASS) { "Last Name" }
                                    input type="text" id="last_name" name="last_name" required
                                        class=(INPUT_CLASS) placeholder="Doe"
                                        value=(draft.last_name());
                                }
                                div class="col-span-2" {
                                    label for="role" class=(LABEL_CLASS) { "Role" }
                                    (role_select(draft))
                                }
                                div class="col-span-2" {
                                    label for="email" class=(LABEL_CLASS) { "Email" }
                                    input type="email" id="email" name="email" required
                                        class=(INPUT_CLASS) placeholder="you@example.com"
                                        value=(draft.email());
                                }
                                div class="col-span-2" {
                                    label for="password" class=(LABEL_CLASS) { "Password" }
                                    input type="password" id="password" name="password" required
                                        class=(INPUT_CLASS) placeholder="********";
                                }
                            }

                            div class="space-y-2 text-center text-sm" {
                                p class="text-gray-600" {
                                    "Already have an account? "
                                    a href="/login" class="font-medium text-green-600 hover:text-green-500 transition-colors" {
                                        "Sign in"
                                    }
                                }
                            }

                            button type="submit" id="signup-submit" disabled[state.loading]
                                class=(submit_class) {
                                span id="signup-submit-busy" class=(busy_class) {
                                    (spinner())
                                    "Creating Account..."
                                }
                                span id="signup-submit-idle" class=(idle_class) {
                                    "Create Account"
                                }
                            }
                        }

                        (food_bank_popup(draft, state.popup_open))
                    }
                }
            }

            (decor_panels(&decor))
            (floating_badge(&decor))
        }

        (script(&view.geolocation))
    }
}
