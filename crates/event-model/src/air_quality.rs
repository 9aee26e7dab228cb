//! Air-quality telemetry recorded around an event.

use serde::{Deserialize, Serialize};

/// When a sample was taken relative to the detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum MeasurementPhase {
    #[serde(rename = "antes")]
    Before,
    #[serde(rename = "durante")]
    During,
    #[serde(rename = "despues")]
    After,
    #[serde(rename = "pendiente")]
    #[default]
    Pending,
}

/// One sensor reading. Every channel is optional: the sensor may omit any
/// of them in a given transmission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirQualitySample {
    #[serde(rename = "registro_id", default)]
    pub record_id: Option<i64>,

    #[serde(rename = "evento_id", default)]
    pub event_id: Option<i64>,

    /// Sampling time as sent by the backend.
    #[serde(rename = "hora_medicion", default)]
    pub sampled_at: Option<String>,

    #[serde(rename = "pm1p0", default)]
    pub pm1_0: Option<f64>,

    #[serde(rename = "pm2p5", default)]
    pub pm2_5: Option<f64>,

    #[serde(default)]
    pub pm10: Option<f64>,

    #[serde(rename = "temp", default)]
    pub temperature: Option<f64>,

    #[serde(rename = "humedad", default)]
    pub humidity: Option<f64>,

    #[serde(default)]
    pub aqi: Option<f64>,

    #[serde(rename = "descrip", default)]
    pub description: Option<String>,

    #[serde(rename = "tipo", default)]
    pub phase: MeasurementPhase,
}

impl AirQualitySample {
    /// A sample with only a timestamp; channels are set with the builders.
    pub fn at(sampled_at: impl Into<String>) -> Self {
        Self {
            record_id: None,
            event_id: None,
            sampled_at: Some(sampled_at.into()),
            pm1_0: None,
            pm2_5: None,
            pm10: None,
            temperature: None,
            humidity: None,
            aqi: None,
            description: None,
            phase: MeasurementPhase::default(),
        }
    }

    pub fn with_pm1_0(mut self, value: f64) -> Self {
        self.pm1_0 = Some(value);
        self
    }

    pub fn with_pm2_5(mut self, value: f64) -> Self {
        self.pm2_5 = Some(value);
        self
    }

    pub fn with_pm10(mut self, value: f64) -> Self {
        self.pm10 = Some(value);
        self
    }

    pub fn with_record_id(mut self, id: i64) -> Self {
        self.record_id = Some(id);
        self
    }
}
