use crate::domain::model::{normalize_active_flag, Client, MappingCreatePayload};
use crate::utils::error::{ConsoleError, Result};
use crate::utils::validation::is_numeric_id;

/// 去除非數字字元；沒有剩下任何數字時回傳 None
pub fn normalize_numeric_id(raw: &str) -> Option<String> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        None
    } else {
        Some(digits)
    }
}

fn parse_id<T: std::str::FromStr>(value: &str, title: &str, message: &str) -> Result<T> {
    let trimmed = value.trim();
    if !is_numeric_id(trimmed) {
        return Err(ConsoleError::validation(title, message));
    }
    trimmed
        .parse::<T>()
        .map_err(|_| ConsoleError::validation(title, message))
}

fn optional_text(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientForm {
    pub client_id: String,
    pub client_name: String,
    pub iso_version: String,
    pub encoding: String,
    pub bitmap_type: String,
    pub active: String,
}

impl ClientForm {
    /// 編輯時以既有資料預先填入表單
    pub fn from_client(client: &Client) -> Self {
        Self {
            client_id: client
                .client_id
                .map(|id| id.to_string())
                .unwrap_or_default(),
            client_name: client.client_name.clone(),
            iso_version: client.iso_version.clone(),
            encoding: client.encoding.clone(),
            bitmap_type: client.bitmap_type.clone(),
            active: normalize_active_flag(&client.active).to_string(),
        }
    }

    pub fn validate_for_create(&self) -> Result<Client> {
        let client_id = self.parse_client_id()?;

        let required = [
            &self.client_name,
            &self.iso_version,
            &self.encoding,
            &self.bitmap_type,
        ];
        if required.iter().any(|value| value.trim().is_empty()) {
            return Err(ConsoleError::validation(
                "Missing information",
                "Please fill in all required fields.",
            ));
        }

        Ok(self.to_client(client_id))
    }

    pub fn validate_for_update(&self) -> Result<Client> {
        let client_id = self.parse_client_id()?;
        Ok(self.to_client(client_id))
    }

    fn parse_client_id(&self) -> Result<u64> {
        parse_id(
            &self.client_id,
            "Invalid client ID",
            "Please provide a valid client ID.",
        )
    }

    fn to_client(&self, client_id: u64) -> Client {
        Client {
            client_id: Some(client_id),
            client_name: self.client_name.trim().to_string(),
            iso_version: self.iso_version.trim().to_string(),
            encoding: self.encoding.trim().to_string(),
            bitmap_type: self.bitmap_type.trim().to_string(),
            active: normalize_active_flag(&self.active).to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingForm {
    pub client_id: String,
    pub iso_rec_id: String,
    pub client_field_no: String,
    pub direction: String,
    pub transformation: Option<String>,
    pub default_value: Option<String>,
}

impl MappingForm {
    pub fn to_payload(&self) -> Result<MappingCreatePayload> {
        let client_id = parse_id(
            &self.client_id,
            "Invalid client ID",
            "Please provide a valid client ID.",
        )?;
        let iso_rec_id = parse_id(
            &self.iso_rec_id,
            "Invalid ISO field",
            "Please provide a numeric ISO standard record ID.",
        )?;
        let client_field_no = parse_id(
            &self.client_field_no,
            "Invalid client field",
            "Please provide a numeric client field number.",
        )?;

        let direction = self.direction.trim();
        if direction.is_empty() {
            return Err(ConsoleError::validation(
                "Missing information",
                "Please provide a mapping direction.",
            ));
        }

        Ok(MappingCreatePayload {
            client_id,
            iso_rec_id,
            client_field_no,
            direction: direction.to_string(),
            transformation: optional_text(&self.transformation),
            default_value: optional_text(&self.default_value),
        })
    }
}
