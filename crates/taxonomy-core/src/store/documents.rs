//! Raw document shapes as exported from the reference database, and their
//! projection into wire types.
//!
//! Field names follow the export (`name_vi`, `category_desc_en`, ...). Text
//! fields decode leniently; `_id` accepts a plain string, a number or an
//! extended-JSON `{"$oid": "..."}` object.

use serde::{Deserialize, Deserializer};

use ipms_types::lenient;
use ipms_types::{CountryOption, NiceEntry, NiceGroup, NiceGroupKind, PartyOption, ViennaEntry};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Oid {
        #[serde(rename = "$oid")]
        oid: String,
    },
    Text(String),
    Number(i64),
}

fn document_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<RawId>::deserialize(deserializer)? {
        Some(RawId::Oid { oid }) => oid,
        Some(RawId::Text(text)) => text,
        Some(RawId::Number(n)) => n.to_string(),
        None => String::new(),
    })
}

// ── Nice ──

#[derive(Debug, Clone, Deserialize)]
pub struct NiceGroupDocument {
    #[serde(rename = "_id", default, deserialize_with = "document_id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::number")]
    pub group: u32,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name_vi: String,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub name_en: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "lenient::string")]
    pub kind: String,
}

impl NiceGroupDocument {
    pub fn into_group(self) -> NiceGroup {
        let kind = match self.kind.to_ascii_lowercase().as_str() {
            "goods" => NiceGroupKind::Goods,
            "services" => NiceGroupKind::Services,
            _ => NiceGroupKind::Unknown,
        };
        NiceGroup {
            group: self.group,
            description: self.name_vi,
            description_en: self.name_en,
            kind,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NiceClassDocument {
    #[serde(rename = "_id", default, deserialize_with = "document_id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::number")]
    pub group: u32,
    #[serde(default, deserialize_with = "lenient::string")]
    pub code: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name_vi: String,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub name_en: Option<String>,
}

impl NiceClassDocument {
    pub fn into_entry(self) -> NiceEntry {
        NiceEntry {
            id: self.id,
            group: self.group,
            code: self.code,
            description: self.name_vi,
            description_en: self.name_en,
        }
    }
}

// ── Vienna ──

#[derive(Debug, Clone, Deserialize)]
pub struct ViennaClassDocument {
    #[serde(rename = "_id", default, deserialize_with = "document_id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::number")]
    pub category: u32,
    #[serde(default, deserialize_with = "lenient::string")]
    pub category_desc_vi: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub category_desc_en: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub division: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub division_desc_vi: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub division_desc_en: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub section: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub section_desc_vi: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub section_desc_en: String,
}

impl ViennaClassDocument {
    pub fn into_entry(self) -> ViennaEntry {
        ViennaEntry {
            id: self.id,
            category: self.category,
            category_description: self.category_desc_vi,
            category_description_en: self.category_desc_en,
            division: self.division,
            division_description: self.division_desc_vi,
            division_description_en: self.division_desc_en,
            section: self.section,
            section_description: self.section_desc_vi,
            section_description_en: self.section_desc_en,
        }
    }
}

// ── Flat reference lists ──

#[derive(Debug, Clone, Deserialize)]
pub struct CountryDocument {
    #[serde(rename = "_id", default, deserialize_with = "document_id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub code: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub country_name: String,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub note: Option<String>,
    #[serde(default)]
    pub group_details: serde_json::Value,
}

impl CountryDocument {
    pub fn into_option(self) -> CountryOption {
        CountryOption {
            label: format!("{} - {}", self.code, self.country_name),
            value: self.code,
            note: self.note,
            group_details: self.group_details,
        }
    }
}

/// Companies and agencies share one document shape.
#[derive(Debug, Clone, Deserialize)]
pub struct PartyDocument {
    #[serde(rename = "_id", default, deserialize_with = "document_id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub short_name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub tax_code: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub address: Option<String>,
}

impl PartyDocument {
    pub fn into_option(self) -> PartyOption {
        PartyOption {
            label: format!("{} - {}", self.short_name, self.name),
            value: self.id,
            short_name: self.short_name,
            name: self.name,
            tax_code: self.tax_code,
            address: self.address,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extended_json_object_id() {
        let doc: NiceClassDocument = serde_json::from_str(
            r#"{"_id": {"$oid": "65f0c0ffee"}, "group": 9, "code": "090001", "name_vi": "Phần mềm"}"#,
        )
        .unwrap();
        let entry = doc.into_entry();
        assert_eq!(entry.id, "65f0c0ffee");
        assert_eq!(entry.description, "Phần mềm");
        assert!(entry.description_en.is_none());
    }

    #[test]
    fn test_group_kind_projection() {
        let doc: NiceGroupDocument = serde_json::from_str(
            r#"{"_id": 1, "group": 35, "name_vi": "Quảng cáo", "type": "Services"}"#,
        )
        .unwrap();
        let group = doc.into_group();
        assert_eq!(group.kind, NiceGroupKind::Services);
        assert_eq!(group.group, 35);
    }

    #[test]
    fn test_party_label() {
        let doc: PartyDocument = serde_json::from_str(
            r#"{"_id": "c1", "short_name": "ACME", "name": "Acme Trading JSC", "tax_code": null}"#,
        )
        .unwrap();
        let option = doc.into_option();
        assert_eq!(option.label, "ACME - Acme Trading JSC");
        assert_eq!(option.value, "c1");
        assert!(option.tax_code.is_none());
    }
}
