use serde::{Deserialize, Serialize};

/// Consumer details collected by the web form. SSN and date of birth are
/// carried for the caller but never written into generated letters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserData {
    pub full_name: String,
    #[serde(default)]
    pub street_address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip_code: String,
    #[serde(default)]
    pub ssn_last4: String,
    #[serde(default)]
    pub dob: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

impl UserData {
    /// `street, city, state zip`, skipping empty parts.
    pub fn mailing_address(&self) -> String {
        let locality = [self.state.trim(), self.zip_code.trim()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        [self.street_address.trim(), self.city.trim(), locality.as_str()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Assigns a form field by its wire name. Unknown names are ignored.
    pub fn set_field(&mut self, name: &str, value: String) {
        match name {
            "full_name" => self.full_name = value,
            "street_address" => self.street_address = value,
            "city" => self.city = value,
            "state" => self.state = value,
            "zip_code" => self.zip_code = value,
            "ssn_last4" => self.ssn_last4 = value,
            "dob" => self.dob = value,
            "email" => self.email = value,
            "phone" => self.phone = value,
            _ => {}
        }
    }
}
