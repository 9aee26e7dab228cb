//! Events: time-bounded detection incidents that operators triage.
//!
//! Events arrive from the backend as JSON objects carrying their images,
//! each image's detections, and the air-quality records taken around it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thermwatch_common::clock::parse_event_date;

use crate::air_quality::AirQualitySample;
use crate::detection::{DetectedImage, ImageId};

/// Backend identifier for an event.
pub type EventId = i64;

/// Backend identifier for a user.
pub type UserId = i64;

/// Triage state of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum EventStatus {
    #[serde(rename = "pendiente")]
    #[default]
    Pending,
    #[serde(rename = "confirmado")]
    Confirmed,
    #[serde(rename = "descartado")]
    Discarded,
}

impl EventStatus {
    /// Human-readable label for list chips and CLI output.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Confirmed => "Confirmed",
            Self::Discarded => "Discarded",
        }
    }
}

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserRole {
    #[serde(rename = "admin")]
    Admin,
    #[serde(rename = "operador")]
    Operator,
}

/// The user who handled an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "usuario_id")]
    pub user_id: UserId,

    #[serde(rename = "nombre_usuario")]
    pub username: String,

    #[serde(rename = "correo_electronico", default)]
    pub email: String,

    #[serde(rename = "rol")]
    pub role: UserRole,
}

/// A detection incident with its raw images and telemetry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "evento_id")]
    pub event_id: EventId,

    /// Calendar date of the event (`YYYY-MM-DD`).
    #[serde(rename = "fecha_evento")]
    pub event_date: String,

    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,

    #[serde(rename = "estatus", default)]
    pub status: EventStatus,

    /// User that confirmed or discarded the event, if any.
    #[serde(rename = "usuario_id", default)]
    pub handled_by: Option<UserId>,

    #[serde(rename = "usuario", default)]
    pub user: Option<User>,

    #[serde(rename = "imagenes", default)]
    pub images: Vec<DetectedImage>,

    #[serde(rename = "registros_calidad_aire", default)]
    pub air_quality: Vec<AirQualitySample>,
}

impl Event {
    pub fn new(event_id: EventId, event_date: impl Into<String>) -> Self {
        Self {
            event_id,
            event_date: event_date.into(),
            description: None,
            status: EventStatus::Pending,
            handled_by: None,
            user: None,
            images: Vec::new(),
            air_quality: Vec::new(),
        }
    }

    pub fn with_status(mut self, status: EventStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_images(mut self, images: Vec<DetectedImage>) -> Self {
        self.images = images;
        self
    }

    pub fn with_air_quality(mut self, samples: Vec<AirQualitySample>) -> Self {
        self.air_quality = samples;
        self
    }

    /// Parsed event date, or `None` when the backend value is unreadable.
    pub fn date(&self) -> Option<NaiveDate> {
        parse_event_date(&self.event_date).ok()
    }

    pub fn is_pending(&self) -> bool {
        self.status == EventStatus::Pending
    }

    /// Look up one of this event's images.
    pub fn image(&self, image_id: ImageId) -> Option<&DetectedImage> {
        self.images.iter().find(|img| img.image_id == image_id)
    }

    /// Sum of detections across all images.
    pub fn detection_count(&self) -> usize {
        self.images.iter().map(DetectedImage::detection_count).sum()
    }
}

/// Parse a single event object.
pub fn parse_event(json: &str) -> Result<Event, serde_json::Error> {
    serde_json::from_str(json)
}

/// Parse a JSON array of events.
pub fn parse_events(json: &str) -> Result<Vec<Event>, serde_json::Error> {
    serde_json::from_str(json)
}
