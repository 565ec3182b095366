use serde::{Deserialize, Serialize};

/// A registered rider's public profile.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rider {
    id: String,
    name: String,
    age: u32,
    phone_number: String,
}

impl Rider {
    pub fn new(id: impl Into<String>, name: impl Into<String>, age: u32, phone_number: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            age,
            phone_number: phone_number.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RiderRegistration {
    pub username: String,
    #[serde(default)]
    pub password: String,
    pub name: String,
    pub age: u32,
    pub phone_number: String,
}
