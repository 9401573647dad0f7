//! Form validation and normalization.
//!
//! Validation runs on the raw text exactly as typed; trimming happens afterwards,
//! in [`normalize`]. Each field reports at most one message.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

pub const NAME_MIN_CHARS: usize = 3;
pub const NAME_MAX_CHARS: usize = 64;
pub const DESCRIPTION_MIN_CHARS: usize = 10;
pub const DESCRIPTION_MAX_CHARS: usize = 280;
pub const IMAGE_URL_MAX_CHARS: usize = 256;

/// Prefix every Sui address carries.
pub const ADDRESS_PREFIX: &str = "0x";

pub const RECIPIENT_MESSAGE: &str = "Recipient must be a valid Sui address";

/// Editable fields of the mint form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    Name,
    Description,
    ImageUrl,
    Recipient,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::Name,
        FormField::Description,
        FormField::ImageUrl,
        FormField::Recipient,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Description => "description",
            FormField::ImageUrl => "imageUrl",
            FormField::Recipient => "recipient",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One message per invalid field.
pub type FieldErrors = BTreeMap<FormField, String>;

/// Raw, possibly invalid form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MintFormValues {
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub recipient: Option<String>,
}

impl MintFormValues {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Description => &self.description,
            FormField::ImageUrl => &self.image_url,
            FormField::Recipient => self.recipient.as_deref().unwrap_or(""),
        }
    }

    pub fn set(&mut self, field: FormField, value: String) {
        match field {
            FormField::Name => self.name = value,
            FormField::Description => self.description = value,
            FormField::ImageUrl => self.image_url = value,
            FormField::Recipient => self.recipient = Some(value),
        }
    }
}

/// Validated and trimmed input, ready for transaction building.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MintRequest {
    pub name: String,
    pub description: String,
    pub image_url: String,
    /// `None` means "mint to the connected account".
    pub recipient: Option<String>,
}

impl From<MintRequest> for MintFormValues {
    fn from(request: MintRequest) -> Self {
        Self {
            name: request.name,
            description: request.description,
            image_url: request.image_url,
            recipient: request.recipient,
        }
    }
}

/// Check every field of the raw input.
pub fn validate(values: &MintFormValues) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    if !within(&values.name, NAME_MIN_CHARS, NAME_MAX_CHARS) {
        errors.insert(
            FormField::Name,
            format!(
                "Name must be between {} and {} characters",
                NAME_MIN_CHARS, NAME_MAX_CHARS
            ),
        );
    }

    if !within(&values.description, DESCRIPTION_MIN_CHARS, DESCRIPTION_MAX_CHARS) {
        errors.insert(
            FormField::Description,
            format!(
                "Description must be between {} and {} characters",
                DESCRIPTION_MIN_CHARS, DESCRIPTION_MAX_CHARS
            ),
        );
    }

    if let Some(message) = check_image_url(&values.image_url) {
        errors.insert(FormField::ImageUrl, message);
    }

    if let Some(recipient) = values.recipient.as_deref() {
        if !recipient.is_empty() && !recipient.starts_with(ADDRESS_PREFIX) {
            errors.insert(FormField::Recipient, RECIPIENT_MESSAGE.to_string());
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Trim every field. A recipient that trims to nothing becomes `None`.
pub fn normalize(values: &MintFormValues) -> MintRequest {
    MintRequest {
        name: values.name.trim().to_string(),
        description: values.description.trim().to_string(),
        image_url: values.image_url.trim().to_string(),
        recipient: values
            .recipient
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(str::to_string),
    }
}

/// Validate, then normalize.
pub fn parse_form(values: &MintFormValues) -> Result<MintRequest, FieldErrors> {
    validate(values)?;
    Ok(normalize(values))
}

fn within(value: &str, min: usize, max: usize) -> bool {
    let len = value.chars().count();
    (min..=max).contains(&len)
}

fn check_image_url(value: &str) -> Option<String> {
    if url::Url::parse(value).is_err() {
        return Some("Image URL must be a valid URL".to_string());
    }
    if value.chars().count() > IMAGE_URL_MAX_CHARS {
        return Some(format!(
            "Image URL must be at most {} characters",
            IMAGE_URL_MAX_CHARS
        ));
    }
    None
}
