use serde::{Deserialize, Serialize};

/// 後端回傳的統一外層結構 `{ success, message, data }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub data: T,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<u64>,
    #[serde(default)]
    pub client_name: String,
    #[serde(default)]
    pub iso_version: String,
    #[serde(default)]
    pub encoding: String,
    #[serde(default)]
    pub bitmap_type: String,
    #[serde(default)]
    pub active: String,
}

impl Client {
    pub fn is_inactive(&self) -> bool {
        is_inactive_flag(&self.active)
    }

    pub fn status_label(&self) -> String {
        status_label(&self.active)
    }
}

/// ISO-8583 標準欄位定義。後端有兩種欄位命名，兩者都可解析。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IsoStandardDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rec_id: Option<u64>,
    #[serde(default, alias = "fieldId")]
    pub iso_field_no: u32,
    #[serde(default, alias = "fieldLength")]
    pub length: u32,
    #[serde(default, alias = "fieldName")]
    pub iso_field_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientDefinition {
    #[serde(default)]
    pub default_value: Option<String>,
    #[serde(default)]
    pub client_field_no: u32,
    #[serde(default)]
    pub active: String,
    #[serde(default)]
    pub transformation: Option<String>,
    #[serde(default)]
    pub direction: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mapping_id: Option<u64>,
    #[serde(default)]
    pub iso_standard_definition: Option<IsoStandardDefinition>,
    #[serde(default)]
    pub client_definition: Option<ClientDefinition>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingCreatePayload {
    pub client_id: u64,
    pub iso_rec_id: u64,
    pub client_field_no: u32,
    pub direction: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transformation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

/// `n` / `false` (不分大小寫) 視為停用，其餘一律視為啟用
pub fn is_inactive_flag(flag: &str) -> bool {
    let normalized = flag.to_lowercase();
    normalized == "n" || normalized == "false"
}

pub fn status_label(flag: &str) -> String {
    match flag.to_lowercase().as_str() {
        "y" | "true" => "Active".to_string(),
        "n" | "false" => "Inactive".to_string(),
        "" => "-".to_string(),
        _ => flag.to_string(),
    }
}

/// 表單送出前將啟用狀態正規化為 `Y` / `N`
pub fn normalize_active_flag(flag: &str) -> &'static str {
    if is_inactive_flag(flag.trim()) {
        "N"
    } else {
        "Y"
    }
}
