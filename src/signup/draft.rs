use crate::models::{Coordinates, FoodBankInfo, Role, SignUpMetadata, SignUpRequest};

/// In-progress, unsaved signup form data.
///
/// Every setter stores the value verbatim and returns `true` only when the
/// stored value actually changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationDraft {
    email: String,
    password: String,
    first_name: String,
    last_name: String,
    role: Role,
    food_bank: FoodBankInfo,
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}

impl RegistrationDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn food_bank(&self) -> &FoodBankInfo {
        &self.food_bank
    }

    pub fn set_email(&mut self, value: impl Into<String>) -> bool {
        replace(&mut self.email, value.into())
    }

    pub fn set_password(&mut self, value: impl Into<String>) -> bool {
        replace(&mut self.password, value.into())
    }

    pub fn set_first_name(&mut self, value: impl Into<String>) -> bool {
        replace(&mut self.first_name, value.into())
    }

    pub fn set_last_name(&mut self, value: impl Into<String>) -> bool {
        replace(&mut self.last_name, value.into())
    }

    pub fn set_role(&mut self, role: Role) -> bool {
        replace(&mut self.role, role)
    }

    pub fn set_food_bank_title(&mut self, value: impl Into<String>) -> bool {
        replace(&mut self.food_bank.title, value.into())
    }

    pub fn set_food_bank_address(&mut self, value: impl Into<String>) -> bool {
        replace(&mut self.food_bank.address, value.into())
    }

    pub fn set_food_bank_website(&mut self, value: impl Into<String>) -> bool {
        replace(&mut self.food_bank.website, value.into())
    }

    pub fn set_food_bank_description(&mut self, value: impl Into<String>) -> bool {
        replace(&mut self.food_bank.description, value.into())
    }

    /// Receivers must name their food bank before the account can be created.
    pub fn is_missing_food_bank(&self) -> bool {
        self.role == Role::Receiver && self.food_bank.title.is_empty()
    }

    /// Assemble the provider signup payload.
    pub fn to_request(&self, location: Option<Coordinates>) -> SignUpRequest {
        SignUpRequest {
            email: self.email.clone(),
            password: self.password.clone(),
            data: SignUpMetadata {
                first_name: self.first_name.clone(),
                last_name: self.last_name.clone(),
                profile_image: String::new(),
                role: self.role,
                foodbank: self.food_bank.clone(),
                location: location.map(|c| c.to_metadata_string()),
            },
        }
    }
}
