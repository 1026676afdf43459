use crate::models::Coordinates;
use async_trait::async_trait;
use std::time::Duration;

/// Default time to wait for the user to grant or deny location access.
pub const DEFAULT_DECISION_TIMEOUT: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeolocationOptions {
    pub high_accuracy: bool,
    /// Give up on the position after this long
    pub decision_timeout: Duration,
}

impl Default for GeolocationOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            decision_timeout: DEFAULT_DECISION_TIMEOUT,
        }
    }
}

/// Source of the user's position. Best-effort: `None` means unavailable or denied.
#[async_trait]
pub trait GeoProvider: Send + Sync {
    async fn locate(&self, options: &GeolocationOptions) -> Option<Coordinates>;
}

/// Position reported by the browser in the posted form.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostedPosition(pub Option<Coordinates>);

impl PostedPosition {
    /// Build from the raw hidden form fields; both must parse.
    pub fn from_fields(latitude: Option<&str>, longitude: Option<&str>) -> Self {
        let parse = |value: Option<&str>| value.and_then(|v| v.trim().parse::<f64>().ok());

        match (parse(latitude), parse(longitude)) {
            (Some(lat), Some(lng)) if lat.is_finite() && lng.is_finite() => {
                PostedPosition(Some(Coordinates::new(lat, lng)))
            }
            _ => PostedPosition(None),
        }
    }
}

#[async_trait]
impl GeoProvider for PostedPosition {
    async fn locate(&self, _options: &GeolocationOptions) -> Option<Coordinates> {
        self.0
    }
}

/// Ask the provider for a position, giving up after the decision timeout.
pub async fn locate_within(
    provider: &dyn GeoProvider,
    options: &GeolocationOptions,
) -> Option<Coordinates> {
    match tokio::time::timeout(options.decision_timeout, provider.locate(options)).await {
        Ok(position) => position,
        Err(_) => {
            tracing::debug!(
                "No position within {}ms, continuing without location",
                options.decision_timeout.as_millis()
            );
            None
        }
    }
}
