//! Domain value objects: ScoreKind, FieldType, Position, Responder, Section, ids.
//!
//! # Design
//!
//! These are pure value types: `Copy` where possible and compared by value, no
//! identity. Each one owns its wire string (`as_str`), its `Display`, and its
//! `FromStr` parser. The serde mapping always matches the strings the
//! persistence API stores, so a document written by one client reads back
//! unchanged in another.
//!
//! # Adding New Variants
//!
//! 1. Add the enum variant here
//! 2. Add the `as_str` arm and the `FromStr` arm here
//! 3. If the variant changes which option list a field uses, update
//!    `FieldType::uses_options` / `FieldType::uses_scale_options`
//! 4. Done. The validator and the normalized model follow from those

use crate::domain::error::DomainError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

// ── ScoreKind ────────────────────────────────────────────────────────────────

/// How a form is scored.
///
/// `Score` always carries the fixed rubric text; `Other` carries a rubric the
/// author typed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ScoreKind {
    Score,
    Other,
}

impl ScoreKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Score => "SCORE",
            Self::Other => "OTHER",
        }
    }
}

impl fmt::Display for ScoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScoreKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "SCORE" => Ok(Self::Score),
            "OTHER" => Ok(Self::Other),
            _ => Err(DomainError::InvalidValue {
                field: "score",
                value: s.to_string(),
            }),
        }
    }
}

// ── FieldType ────────────────────────────────────────────────────────────────

/// Display type of a field template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldType {
    Text,
    TextArea,
    Date,
    Select,
    Scale,
    Checkbox,
}

impl FieldType {
    pub const ALL: [FieldType; 6] = [
        Self::Text,
        Self::TextArea,
        Self::Date,
        Self::Select,
        Self::Scale,
        Self::Checkbox,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::TextArea => "textArea",
            Self::Date => "date",
            Self::Select => "select",
            Self::Scale => "scale",
            Self::Checkbox => "checkbox",
        }
    }

    /// Whether fields of this type carry an `options` list.
    pub const fn uses_options(self) -> bool {
        matches!(self, Self::Select | Self::Checkbox)
    }

    /// Whether fields of this type carry a `scaleOptions` list.
    pub const fn uses_scale_options(self) -> bool {
        matches!(self, Self::Scale)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "textArea" | "textarea" => Ok(Self::TextArea),
            "date" => Ok(Self::Date),
            "select" => Ok(Self::Select),
            "scale" => Ok(Self::Scale),
            "checkbox" => Ok(Self::Checkbox),
            other => Err(DomainError::InvalidValue {
                field: "type",
                value: other.to_string(),
            }),
        }
    }
}

// ── Position ─────────────────────────────────────────────────────────────────

/// Column a field is laid out in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    #[default]
    Left,
    Right,
    Full,
}

impl Position {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Full => "full",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Position {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "full" => Ok(Self::Full),
            _ => Err(DomainError::InvalidValue {
                field: "position",
                value: s.to_string(),
            }),
        }
    }
}

// ── Responder ────────────────────────────────────────────────────────────────

/// Who fills a field in. `Unassigned` is written as the empty string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Responder {
    Tutor,
    Resident,
    #[default]
    #[serde(rename = "")]
    Unassigned,
}

impl Responder {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Tutor => "tutor",
            Self::Resident => "resident",
            Self::Unassigned => "",
        }
    }
}

impl fmt::Display for Responder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Responder {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "tutor" => Ok(Self::Tutor),
            "resident" => Ok(Self::Resident),
            "" => Ok(Self::Unassigned),
            _ => Err(DomainError::InvalidValue {
                field: "response",
                value: s.to_string(),
            }),
        }
    }
}

// ── Section ──────────────────────────────────────────────────────────────────

/// Layout section a field belongs to.
///
/// Invariant: `MIN..=MAX`. Enforced at construction. On the wire a section is
/// its decimal string (`"3"`); "no section" is handled by `Option<Section>`
/// and written as `""`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Section(u8);

impl Section {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    pub fn new(value: u8) -> Result<Self, DomainError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(DomainError::InvalidValue {
                field: "section",
                value: value.to_string(),
            })
        }
    }

    pub const fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Section {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().parse::<u8>().map_err(|_| DomainError::InvalidValue {
            field: "section",
            value: s.to_string(),
        })?;
        Self::new(value)
    }
}

impl Serialize for Section {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Section {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

// ── Identifiers ──────────────────────────────────────────────────────────────

/// Length of a back-end object id, in hex characters.
const OBJECT_ID_LEN: usize = 24;

fn is_object_id(s: &str) -> bool {
    s.len() == OBJECT_ID_LEN && s.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Generate a fresh 24-hex-character id.
fn generate_object_id() -> String {
    let mut hex = uuid::Uuid::new_v4().simple().to_string();
    hex.truncate(OBJECT_ID_LEN);
    hex
}

macro_rules! object_id {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Strict parse: exactly 24 hexadecimal characters.
            pub fn parse(s: &str) -> Result<Self, DomainError> {
                let s = s.trim();
                if is_object_id(s) {
                    Ok(Self(s.to_string()))
                } else {
                    Err(DomainError::InvalidIdentifier {
                        kind: $field,
                        value: s.to_string(),
                    })
                }
            }

            /// Generate a new, unused identifier.
            pub fn generate() -> Self {
                Self(generate_object_id())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Whether the held value would pass [`Self::parse`]. Leniently
            /// read ids may not.
            pub fn is_well_formed(&self) -> bool {
                is_object_id(&self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }
    };
}

object_id!(
    /// Identifier of a persisted form template.
    ///
    /// Deserialization is lenient (stored records are trusted as-is); user
    /// input goes through [`FormId::parse`].
    FormId,
    "form"
);

object_id!(
    /// Identifier of a persisted field template.
    FieldId,
    "field"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_kind_wire_strings() {
        assert_eq!(serde_json::to_string(&ScoreKind::Score).unwrap(), "\"SCORE\"");
        assert_eq!(
            serde_json::from_str::<ScoreKind>("\"OTHER\"").unwrap(),
            ScoreKind::Other
        );
        assert_eq!(ScoreKind::from_str("other").unwrap(), ScoreKind::Other);
        assert!(ScoreKind::from_str("points").is_err());
    }

    #[test]
    fn field_type_wire_strings() {
        assert_eq!(
            serde_json::to_string(&FieldType::TextArea).unwrap(),
            "\"textArea\""
        );
        for ty in FieldType::ALL {
            assert_eq!(FieldType::from_str(ty.as_str()).unwrap(), ty);
        }
        assert!(FieldType::from_str("radio").is_err());
    }

    #[test]
    fn option_lists_follow_type() {
        assert!(FieldType::Select.uses_options());
        assert!(FieldType::Checkbox.uses_options());
        assert!(!FieldType::Scale.uses_options());
        assert!(FieldType::Scale.uses_scale_options());
        assert!(!FieldType::Text.uses_scale_options());
    }

    #[test]
    fn responder_unassigned_is_empty_string() {
        assert_eq!(serde_json::to_string(&Responder::Unassigned).unwrap(), "\"\"");
        assert_eq!(
            serde_json::from_str::<Responder>("\"tutor\"").unwrap(),
            Responder::Tutor
        );
    }

    #[test]
    fn position_defaults_left() {
        assert_eq!(Position::default(), Position::Left);
        assert_eq!(Position::from_str("FULL").unwrap(), Position::Full);
    }

    #[test]
    fn section_bounds() {
        assert!(Section::new(0).is_err());
        assert!(Section::new(11).is_err());
        assert_eq!(Section::from_str("10").unwrap().get(), 10);
        assert!(Section::from_str("abc").is_err());
    }

    #[test]
    fn section_serializes_as_string() {
        let s = Section::new(3).unwrap();
        assert_eq!(serde_json::to_string(&s).unwrap(), "\"3\"");
        assert_eq!(serde_json::from_str::<Section>("\"3\"").unwrap(), s);
    }

    #[test]
    fn form_id_parse_requires_object_id_shape() {
        assert!(FormId::parse("65a1f0c2e4b0a1b2c3d4e5f6").is_ok());
        assert!(FormId::parse("65a1f0c2e4b0a1b2c3d4e5f").is_err());
        assert!(FormId::parse("zz a1f0c2e4b0a1b2c3d4e5f6").is_err());
    }

    #[test]
    fn generated_ids_parse_back() {
        let id = FieldId::generate();
        assert_eq!(FieldId::parse(id.as_str()).unwrap(), id);
        assert_ne!(FormId::generate(), FormId::generate());
    }
}
