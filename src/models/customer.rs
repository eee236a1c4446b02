use serde::Deserialize;

/// Identity attributes of an account holder. Stored as opaque strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Customer {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub gender: String,
    #[serde(rename = "dob")]
    pub date_of_birth: String,
}

impl Customer {
    pub fn named(name: impl Into<String>) -> Self {
        Customer {
            name: name.into(),
            ..Default::default()
        }
    }

    /// The profile used for the account opened at startup when the demo account is enabled.
    pub fn demo() -> Self {
        Customer {
            name: "John Doe".to_string(),
            email: "john@gmail.com".to_string(),
            phone: "(213) 555 0147".to_string(),
            address: "Los Angeles, California".to_string(),
            gender: "Male".to_string(),
            date_of_birth: "1983-10-10".to_string(),
        }
    }

    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }
}
