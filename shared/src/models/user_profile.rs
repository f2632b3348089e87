//! Staff Profile Model
//!
//! The profile document lives at `users/{uid}`. Three shapes exist locally:
//! - [`ProfileSeed`]: what registration writes, with registration defaults
//! - [`UserProfile`]: what the profile screen renders, never partially empty
//! - [`ProfileDraft`] / [`ProfilePatch`]: the edit form and the merge-write it produces

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Fields;

/// Collection holding one profile document per user
pub const USERS_COLLECTION: &str = "users";

pub const DEFAULT_AVATAR_URL: &str =
    "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?w=200&h=200&fit=crop&crop=face";
pub const DEFAULT_PHONE: &str = "+52 614 123 4567";
pub const DEFAULT_RESTAURANT: &str = "Hostee Restaurant";
pub const DEFAULT_EXPERIENCE: &str = "Nuevo";
pub const DEFAULT_DISPLAY_NAME: &str = "Usuario";
/// Role written at registration when none is given
pub const DEFAULT_ROLE: &str = "Mesero";
/// Role shown when the stored document has none
pub const DEFAULT_DISPLAY_ROLE: &str = "Empleado";
/// Shift written at registration when none is given
pub const DEFAULT_SHIFT: &str = "Matutino";
/// Shift shown when the stored document has none
pub const DEFAULT_DISPLAY_SHIFT: &str = "No definido";

/// Document field names
pub mod field {
    pub const NAME: &str = "nombre";
    pub const EMAIL: &str = "email";
    pub const ROLE: &str = "puesto";
    pub const SHIFT: &str = "turno";
    pub const EXPERIENCE: &str = "experiencia";
    pub const RESTAURANT: &str = "restaurante";
    pub const PHONE: &str = "telefono";
    pub const AVATAR: &str = "avatar";
    pub const CREATED_AT: &str = "createdAt";
    pub const STATS: &str = "stats";
}

/// Non-empty string value of a document field
fn text<'a>(fields: &'a Fields, key: &str) -> Option<&'a str> {
    fields
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

fn text_or(fields: &Fields, key: &str, default: &str) -> String {
    text(fields, key).unwrap_or(default).to_string()
}

fn or_default(value: &str, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}

/// Service statistics stored with the profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaffStats {
    /// Customer satisfaction, percent
    #[serde(rename = "satisfaccion")]
    pub satisfaction: u32,
    #[serde(rename = "ordenes")]
    pub orders: u32,
    /// Average rating out of 5
    #[serde(rename = "calificacion")]
    pub rating: f64,
}

impl Default for StaffStats {
    fn default() -> Self {
        Self {
            satisfaction: 95,
            orders: 0,
            rating: 5.0,
        }
    }
}

impl StaffStats {
    fn from_document(fields: &Fields) -> Self {
        match fields.get(field::STATS) {
            Some(value @ Value::Object(_)) => serde_json::from_value(value.clone())
                .unwrap_or_else(|e| {
                    tracing::warn!("Malformed stats in profile document: {e}");
                    Self::default()
                }),
            _ => Self::default(),
        }
    }
}

/// Staff profile as rendered by the profile screen
///
/// Every field is populated: gaps in the stored document are filled with
/// display defaults so the screen is never blank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(rename = "nombre")]
    pub name: String,
    pub email: String,
    #[serde(rename = "puesto")]
    pub role: String,
    #[serde(rename = "turno")]
    pub shift: String,
    #[serde(rename = "experiencia")]
    pub experience: String,
    #[serde(rename = "restaurante")]
    pub restaurant: String,
    #[serde(rename = "telefono")]
    pub phone: String,
    pub avatar: String,
    #[serde(default)]
    pub stats: StaffStats,
}

impl UserProfile {
    /// Profile shown when the user has no document yet
    pub fn placeholder(email: &str) -> Self {
        let local = crate::util::email_local_part(email);
        Self {
            name: or_default(local, DEFAULT_DISPLAY_NAME),
            email: email.to_string(),
            role: DEFAULT_DISPLAY_ROLE.to_string(),
            shift: DEFAULT_DISPLAY_SHIFT.to_string(),
            experience: DEFAULT_EXPERIENCE.to_string(),
            restaurant: DEFAULT_RESTAURANT.to_string(),
            phone: DEFAULT_PHONE.to_string(),
            avatar: DEFAULT_AVATAR_URL.to_string(),
            stats: StaffStats::default(),
        }
    }

    /// Profile built from a stored document, missing or empty fields defaulted
    pub fn from_document(fields: &Fields, session_email: &str) -> Self {
        Self {
            name: text_or(fields, field::NAME, DEFAULT_DISPLAY_NAME),
            email: text_or(fields, field::EMAIL, session_email),
            role: text_or(fields, field::ROLE, DEFAULT_DISPLAY_ROLE),
            shift: text_or(fields, field::SHIFT, DEFAULT_DISPLAY_SHIFT),
            experience: text_or(fields, field::EXPERIENCE, DEFAULT_EXPERIENCE),
            restaurant: text_or(fields, field::RESTAURANT, DEFAULT_RESTAURANT),
            phone: text_or(fields, field::PHONE, DEFAULT_PHONE),
            avatar: text_or(fields, field::AVATAR, DEFAULT_AVATAR_URL),
            stats: StaffStats::from_document(fields),
        }
    }
}

/// Data captured at registration, turned into the initial profile document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileSeed {
    pub email: String,
    pub name: String,
    pub phone: String,
    pub role: String,
    pub shift: String,
    pub experience: String,
    pub restaurant: String,
}

impl ProfileSeed {
    /// Initial document; empty optional fields get registration defaults
    pub fn into_document(self, created_at: &str) -> Fields {
        let mut fields = Fields::new();
        fields.insert(field::EMAIL.into(), Value::String(self.email));
        fields.insert(field::NAME.into(), Value::String(self.name));
        fields.insert(field::PHONE.into(), or_default(&self.phone, DEFAULT_PHONE).into());
        fields.insert(field::ROLE.into(), or_default(&self.role, DEFAULT_ROLE).into());
        fields.insert(field::SHIFT.into(), or_default(&self.shift, DEFAULT_SHIFT).into());
        fields.insert(
            field::EXPERIENCE.into(),
            or_default(&self.experience, DEFAULT_EXPERIENCE).into(),
        );
        fields.insert(
            field::RESTAURANT.into(),
            or_default(&self.restaurant, DEFAULT_RESTAURANT).into(),
        );
        fields.insert(field::AVATAR.into(), DEFAULT_AVATAR_URL.into());
        fields.insert(field::CREATED_AT.into(), created_at.into());
        // StaffStats always serializes to an object
        fields.insert(
            field::STATS.into(),
            serde_json::to_value(StaffStats::default()).unwrap_or(Value::Null),
        );
        fields
    }
}

/// Editable profile field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileField {
    Name,
    Role,
    Shift,
    Experience,
    Restaurant,
    Phone,
    Avatar,
}

impl ProfileField {
    pub const ALL: [ProfileField; 7] = [
        Self::Name,
        Self::Role,
        Self::Shift,
        Self::Experience,
        Self::Restaurant,
        Self::Phone,
        Self::Avatar,
    ];

    /// Document key of this field
    pub fn key(&self) -> &'static str {
        match self {
            Self::Name => field::NAME,
            Self::Role => field::ROLE,
            Self::Shift => field::SHIFT,
            Self::Experience => field::EXPERIENCE,
            Self::Restaurant => field::RESTAURANT,
            Self::Phone => field::PHONE,
            Self::Avatar => field::AVATAR,
        }
    }
}

/// Edit-form state of the profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileDraft {
    pub name: String,
    pub role: String,
    pub shift: String,
    pub experience: String,
    pub restaurant: String,
    pub phone: String,
    pub avatar: String,
}

impl Default for ProfileDraft {
    /// Empty form, avatar preset to the default picture
    fn default() -> Self {
        Self {
            name: String::new(),
            role: String::new(),
            shift: String::new(),
            experience: String::new(),
            restaurant: String::new(),
            phone: String::new(),
            avatar: DEFAULT_AVATAR_URL.to_string(),
        }
    }
}

impl ProfileDraft {
    /// Form prefilled from a stored document (missing fields left empty)
    pub fn from_document(fields: &Fields) -> Self {
        let get = |key: &str| text(fields, key).unwrap_or_default().to_string();
        Self {
            name: get(field::NAME),
            role: get(field::ROLE),
            shift: get(field::SHIFT),
            experience: get(field::EXPERIENCE),
            restaurant: get(field::RESTAURANT),
            phone: get(field::PHONE),
            avatar: text_or(fields, field::AVATAR, DEFAULT_AVATAR_URL),
        }
    }

    pub fn get(&self, field: ProfileField) -> &str {
        match field {
            ProfileField::Name => &self.name,
            ProfileField::Role => &self.role,
            ProfileField::Shift => &self.shift,
            ProfileField::Experience => &self.experience,
            ProfileField::Restaurant => &self.restaurant,
            ProfileField::Phone => &self.phone,
            ProfileField::Avatar => &self.avatar,
        }
    }

    pub fn set(&mut self, field: ProfileField, value: impl Into<String>) {
        let slot = match field {
            ProfileField::Name => &mut self.name,
            ProfileField::Role => &mut self.role,
            ProfileField::Shift => &mut self.shift,
            ProfileField::Experience => &mut self.experience,
            ProfileField::Restaurant => &mut self.restaurant,
            ProfileField::Phone => &mut self.phone,
            ProfileField::Avatar => &mut self.avatar,
        };
        *slot = value.into();
    }

    /// Patch writing every editable field, as the save button does
    pub fn to_patch(&self) -> ProfilePatch {
        ProfileField::ALL
            .iter()
            .fold(ProfilePatch::default(), |patch, f| patch.set(*f, self.get(*f)))
    }
}

/// Partial profile update applied as a merge-write
///
/// Only fields that are `Some` are written; everything else in the stored
/// document (phone, stats, createdAt, ...) is left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub role: Option<String>,
    pub shift: Option<String>,
    pub experience: Option<String>,
    pub restaurant: Option<String>,
    pub phone: Option<String>,
    pub avatar: Option<String>,
}

impl ProfilePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, field: ProfileField, value: impl Into<String>) -> Self {
        let value = Some(value.into());
        match field {
            ProfileField::Name => self.name = value,
            ProfileField::Role => self.role = value,
            ProfileField::Shift => self.shift = value,
            ProfileField::Experience => self.experience = value,
            ProfileField::Restaurant => self.restaurant = value,
            ProfileField::Phone => self.phone = value,
            ProfileField::Avatar => self.avatar = value,
        }
        self
    }

    pub fn name(self, value: impl Into<String>) -> Self {
        self.set(ProfileField::Name, value)
    }

    pub fn role(self, value: impl Into<String>) -> Self {
        self.set(ProfileField::Role, value)
    }

    pub fn shift(self, value: impl Into<String>) -> Self {
        self.set(ProfileField::Shift, value)
    }

    pub fn phone(self, value: impl Into<String>) -> Self {
        self.set(ProfileField::Phone, value)
    }

    pub fn is_empty(&self) -> bool {
        ProfileField::ALL.iter().all(|f| self.value(*f).is_none())
    }

    fn value(&self, field: ProfileField) -> Option<&String> {
        match field {
            ProfileField::Name => self.name.as_ref(),
            ProfileField::Role => self.role.as_ref(),
            ProfileField::Shift => self.shift.as_ref(),
            ProfileField::Experience => self.experience.as_ref(),
            ProfileField::Restaurant => self.restaurant.as_ref(),
            ProfileField::Phone => self.phone.as_ref(),
            ProfileField::Avatar => self.avatar.as_ref(),
        }
    }

    /// Fields to merge-write, plus the owner's email when given
    pub fn to_fields(&self, email: Option<&str>) -> Fields {
        let mut fields = Fields::new();
        for f in ProfileField::ALL {
            if let Some(value) = self.value(f) {
                fields.insert(f.key().into(), Value::String(value.clone()));
            }
        }
        if let Some(email) = email {
            fields.insert(field::EMAIL.into(), Value::String(email.to_string()));
        }
        fields
    }
}
