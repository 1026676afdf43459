use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Account role chosen on the signup form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Role {
    Donor,
    Receiver,
    /// Nothing selected yet
    #[default]
    Unset,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Donor => "donor",
            Role::Receiver => "receiver",
            Role::Unset => "",
        }
    }

    /// Parse a posted select value. Anything unrecognised is treated as unset.
    pub fn from_form_value(value: &str) -> Self {
        match value {
            "donor" => Role::Donor,
            "receiver" => Role::Receiver,
            _ => Role::Unset,
        }
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(Role::from_form_value(&value))
    }
}

/// Role selector entries as (label, value).
///
/// Two labels share the "donor" value and the "User" label maps to
/// "receiver". Kept exactly as the product defined it until the intended
/// mapping is confirmed.
pub const ROLE_OPTIONS: [(&str, Role); 3] = [
    ("User", Role::Receiver),
    ("Donor", Role::Donor),
    ("Reciever", Role::Donor),
];

/// Food bank details collected from receivers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodBankInfo {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Render as "<lat>, <lng>" using the shortest round-trip form of each number.
    pub fn to_metadata_string(&self) -> String {
        format!("{}, {}", self.latitude, self.longitude)
    }

    /// Parse a "<lat>, <lng>" metadata string back into coordinates.
    pub fn parse_metadata_string(value: &str) -> Option<Self> {
        let (lat, lng) = value.split_once(',')?;
        let latitude = lat.trim().parse::<f64>().ok()?;
        let longitude = lng.trim().parse::<f64>().ok()?;
        Some(Self::new(latitude, longitude))
    }
}

/// User metadata attached to the provider account at signup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignUpMetadata {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub profile_image: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub foodbank: FoodBankInfo,
    #[serde(default)]
    pub location: Option<String>,
}

/// Body of the provider signup call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub data: SignUpMetadata,
}

/// A user as reported by the auth provider.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: SignUpMetadata,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl AuthUser {
    pub fn display_name(&self) -> String {
        let meta = &self.user_metadata;
        let name = format!("{} {}", meta.first_name, meta.last_name);
        let name = name.trim();
        if name.is_empty() {
            self.email.clone().unwrap_or_else(|| self.id.clone())
        } else {
            name.to_string()
        }
    }
}

/// Tokens issued by a successful password sign-in.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    pub user: AuthUser,
}
