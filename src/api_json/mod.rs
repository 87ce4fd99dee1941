use serde::{Deserialize, Serialize};

use crate::config::AdvisoryPolicy;
use crate::error::{AdvisorError, Result};
use crate::models::StudentState;

/// Parámetros de entrada de una recomendación
///
/// # Estructura del JSON esperado:
/// ```json
/// {
///   "student": {
///     "student_id": "SV001",
///     "major": "CNTT",
///     "completed_credits": 15,
///     "gpa": 8.5,
///     "transcript": {"CS101": 8.0, "MA101": 6.0}
///   },
///   "target_gpa": 3.2,
///   "policy": {"acceleration_gpa": 8.0}
/// }
/// ```
///
/// # Campos:
/// - `student`: estado del estudiante (malla, créditos, GPA 0-10, notas)
/// - `target_gpa`: GPA objetivo declarado, escala 4.0
/// - `policy`: política opcional; los campos ausentes usan los valores por defecto
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisoryRequest {
    pub student: StudentState,
    pub target_gpa: f64,
    #[serde(default)]
    pub policy: Option<AdvisoryPolicy>,
}

impl AdvisoryRequest {
    /// Verifica la precondición del motor: todas las notas en 0 - 10.
    pub fn validate(&self) -> Result<()> {
        for (code, grade) in self.student.transcript.iter() {
            if !(0.0..=10.0).contains(&grade) {
                return Err(AdvisorError::InvalidGrade { subject: code.to_string(), grade });
            }
        }
        if let Some(policy) = &self.policy {
            policy.validate()?;
        }
        Ok(())
    }
}

pub fn parse_json_input(json_str: &str) -> Result<AdvisoryRequest> {
    let request: AdvisoryRequest = serde_json::from_str(json_str)?;
    request.validate()?;
    Ok(request)
}
