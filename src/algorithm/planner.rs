// planner.rs - Orquestador de la recomendación académica
//
// Pipeline (el orden importa):
// PASO 1: repeticiones
//   - cada (asignatura, nota) del expediente pasa por el evaluador
//   - reprobadas siempre; aprobados débiles sólo si el GPA objetivo lo pide
// PASO 2: semestre actual = floor(créditos / créditos_por_semestre) + 1
//   - siguiente = actual + 1
// PASO 3: lista estándar = elegibles del semestre siguiente
// PASO 4: adelanto (sólo con GPA acumulado >= umbral)
//   - elegibles de siguiente + 1; si hay alguno se fija el mensaje
//
// Estándar y adelanto usan el MISMO semestre siguiente: el adelanto mira
// exactamente un semestre más allá, nunca más.

use std::collections::BTreeSet;

use tracing::{debug, info};

use crate::algorithm::eligibility::eligible_subjects_withholding;
use crate::algorithm::evaluator::retake_reason;
use crate::catalog::CurriculumCatalog;
use crate::config::AdvisoryPolicy;
use crate::models::{Recommendation, RetakeItem, RetakeReason, StudentState};

/// Motor de recomendación. No guarda estado mutable: dos llamadas con la misma
/// entrada producen la misma salida y puede compartirse entre hilos si el
/// catálogo lo permite.
#[derive(Debug, Clone)]
pub struct AdvisoryEngine<C> {
    catalog: C,
    policy: AdvisoryPolicy,
}

impl<C: CurriculumCatalog> AdvisoryEngine<C> {
    pub fn new(catalog: C, policy: AdvisoryPolicy) -> Self {
        Self { catalog, policy }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn policy(&self) -> &AdvisoryPolicy {
        &self.policy
    }

    pub fn plan(&self, student: &StudentState, target_gpa: f64) -> Recommendation {
        debug!(
            "plan: major={} créditos={} gpa={} notas={} objetivo={}",
            student.major,
            student.completed_credits,
            student.gpa,
            student.transcript.len(),
            target_gpa
        );

        // PASO 1
        let retake = retake_list(student, target_gpa, &self.policy);

        // Con `flagged_prerequisites_unlock = false` los aprobados débiles
        // marcados no habilitan a sus dependientes.
        let withheld: BTreeSet<String> = if self.policy.flagged_prerequisites_unlock {
            BTreeSet::new()
        } else {
            retake
                .iter()
                .filter(|r| matches!(r.reason, RetakeReason::LowScore(_)))
                .map(|r| r.code.clone())
                .collect()
        };

        // PASO 2
        let next = current_semester(student.completed_credits, &self.policy).saturating_add(1);

        // PASO 3
        let standard = eligible_subjects_withholding(
            &self.catalog,
            &self.policy,
            &student.major,
            next,
            &student.transcript,
            &withheld,
        );

        // PASO 4
        let mut advance = Vec::new();
        let mut message = None;
        if student.gpa >= self.policy.acceleration_gpa {
            let after_next = next.saturating_add(1);
            advance = eligible_subjects_withholding(
                &self.catalog,
                &self.policy,
                &student.major,
                after_next,
                &student.transcript,
                &withheld,
            );
            if !advance.is_empty() {
                message = Some(acceleration_message(after_next));
            }
        }

        info!(
            "recomendación {}: {} repetir, {} estándar (semestre {}), {} adelanto",
            if student.student_id.is_empty() { "-" } else { student.student_id.as_str() },
            retake.len(),
            standard.len(),
            next,
            advance.len()
        );

        Recommendation { retake, standard, advance, message }
    }
}

/// Semestre nominal en curso según créditos aprobados.
pub fn current_semester(completed_credits: u32, policy: &AdvisoryPolicy) -> u32 {
    // una política sin validar con 0 créditos por semestre queda en el semestre 1
    completed_credits
        .checked_div(policy.credits_per_semester)
        .unwrap_or(0)
        .saturating_add(1)
}

/// Asignaturas a repetir, en orden de código.
pub fn retake_list(student: &StudentState, target_gpa: f64, policy: &AdvisoryPolicy) -> Vec<RetakeItem> {
    student
        .transcript
        .iter()
        .filter_map(|(code, grade)| {
            retake_reason(grade, target_gpa, policy).map(|reason| RetakeItem { code: code.to_string(), reason })
        })
        .collect()
}

fn acceleration_message(semester: u32) -> String {
    format!(
        "Eligible for acceleration: subjects from semester {} can be taken in parallel",
        semester
    )
}
