use maud::{html, Markup};

/// Settings for the decorative side panel
pub struct DecorConfig {
    /// Number of fade-in tiles
    pub panels: usize,
    /// Delay added per tile, in seconds
    pub stagger_secs: f64,
    /// Length of one badge bounce, in seconds
    pub bounce_secs: f64,
}

impl Default for DecorConfig {
    fn default() -> Self {
        Self {
            panels: 35,
            stagger_secs: 0.02,
            bounce_secs: 3.0,
        }
    }
}

/// Animation delay for tile `index`, formatted for an inline style
pub fn panel_delay(index: usize, config: &DecorConfig) -> String {
    format!("{:.2}s", index as f64 * config.stagger_secs)
}

/// Staggered fade-in tiles. CSS-driven, no state.
pub fn decor_panels(config: &DecorConfig) -> Markup {
    html! {
        div class="hidden md:grid md:w-3/5 grid-cols-5 md:grid-cols-7 gap-3 bg-gradient-to-br from-green-50 to-green-100 p-8"
            aria-hidden="true" {
            @for i in 0..config.panels {
                div class="fb-fade-in bg-white/10 rounded-lg h-20"
                    style={ "animation-delay: " (panel_delay(i, config)) ";" } {}
            }
        }
    }
}

/// Floating badge with a looping vertical bounce
pub fn floating_badge(config: &DecorConfig) -> Markup {
    html! {
        div class="fb-float absolute top-20 left-20 p-4 bg-white/10 backdrop-blur-md rounded-xl"
            style=(format!("animation-duration: {}s;", config.bounce_secs))
            aria-hidden="true" {
            span class="text-green-900 font-bold" { "Share food, not waste" }
        }
    }
}
