//! Clasificación de notas del expediente según la política.
//!
//! Precondición: la nota está en la escala 0 - 10. No se verifica aquí;
//! quien llama (ver `api_json::AdvisoryRequest::validate`) debe garantizarlo.

use crate::config::AdvisoryPolicy;
use crate::models::{GradeBand, RetakeReason};

/// Bandas con límite inferior inclusivo: 5.0 ya es `WeakPass`, 6.5 ya es `Pass`.
pub fn classify(grade: f64, policy: &AdvisoryPolicy) -> GradeBand {
    if grade < policy.pass_threshold {
        GradeBand::Fail
    } else if grade < policy.weak_pass_ceiling {
        GradeBand::WeakPass
    } else {
        GradeBand::Pass
    }
}

pub fn is_passed(grade: f64, policy: &AdvisoryPolicy) -> bool {
    classify(grade, policy) != GradeBand::Fail
}

/// Motivo para repetir la asignatura, o `None` si no corresponde.
/// Un aprobado débil sólo se marca si el GPA objetivo alcanza el umbral.
pub fn retake_reason(grade: f64, target_gpa: f64, policy: &AdvisoryPolicy) -> Option<RetakeReason> {
    match classify(grade, policy) {
        GradeBand::Fail => Some(RetakeReason::Failed),
        GradeBand::WeakPass if target_gpa >= policy.retake_target_gpa => Some(RetakeReason::LowScore(grade)),
        GradeBand::WeakPass | GradeBand::Pass => None,
    }
}
