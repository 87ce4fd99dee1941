// Errores de los bordes del crate (carga de datos, configuración, validación
// de peticiones). El motor de recomendación en sí no falla: degrada a vacío.

use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid policy: {0}")]
    InvalidPolicy(String),

    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("Grade {grade} for subject {subject} is outside the 0-10 scale")]
    InvalidGrade { subject: String, grade: f64 },

    #[error("Invalid value for {key}: {value}")]
    InvalidEnv { key: String, value: String },
}

pub type Result<T> = std::result::Result<T, AdvisorError>;
