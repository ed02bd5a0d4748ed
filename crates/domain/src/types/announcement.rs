//! Announcement ("anuncio") types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;

/// An announcement published by an administrator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct Announcement {
    #[serde(rename = "id_anuncio")]
    pub id: i64,
    /// E-mail of the publishing administrator.
    #[serde(rename = "usuario_asodi_admin")]
    pub published_by: String,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descripcion", default)]
    pub description: String,
    #[serde(rename = "fecha_inicio")]
    pub starts_on: NaiveDate,
    #[serde(rename = "fecha_termino")]
    pub ends_on: NaiveDate,
    #[serde(rename = "estado_an", default)]
    pub active: bool,
    /// URL of the uploaded image, when any.
    #[serde(rename = "imagen", default)]
    pub image_url: Option<String>,
}

impl Announcement {
    /// Active and within its publication window (inclusive).
    pub fn is_visible_on(&self, day: NaiveDate) -> bool {
        self.active && self.starts_on <= day && day <= self.ends_on
    }
}

/// Image attached to a new announcement
#[derive(Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageUpload")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

/// Payload for publishing an announcement (sent as multipart form data)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAnnouncement {
    pub published_by: String,
    pub title: String,
    pub description: String,
    pub starts_on: NaiveDate,
    pub ends_on: NaiveDate,
    pub active: bool,
    pub image: Option<ImageUpload>,
}

/// Partial update for an announcement; unset fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnouncementUpdate {
    #[serde(rename = "titulo", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "descripcion", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "fecha_inicio", skip_serializing_if = "Option::is_none")]
    pub starts_on: Option<NaiveDate>,
    #[serde(rename = "fecha_termino", skip_serializing_if = "Option::is_none")]
    pub ends_on: Option<NaiveDate>,
    #[serde(rename = "estado_an", skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}
