use serde::{Deserialize, Serialize};

/// The channels a customer can be reached on.
///
/// At least one of `email` or `phone` must be populated for the customer to
/// pass validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl ContactInfo {
    pub fn email(address: impl Into<String>) -> Self {
        Self {
            email: Some(address.into()),
            phone: None,
        }
    }

    pub fn phone(number: impl Into<String>) -> Self {
        Self {
            email: None,
            phone: Some(number.into()),
        }
    }

    pub fn with_phone(mut self, number: impl Into<String>) -> Self {
        self.phone = Some(number.into());
        self
    }

    /// Returns the email address if it holds anything besides whitespace.
    pub fn email_address(&self) -> Option<&str> {
        non_blank(self.email.as_deref())
    }

    /// Returns the phone number if it holds anything besides whitespace.
    pub fn phone_number(&self) -> Option<&str> {
        non_blank(self.phone.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// The paying customer, supplied by the caller for a single pipeline invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub name: String,
    pub contact: ContactInfo,
}

impl CustomerRecord {
    pub fn new(name: impl Into<String>, contact: ContactInfo) -> Self {
        Self {
            name: name.into(),
            contact,
        }
    }
}
