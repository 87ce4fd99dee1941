// Puntajes de modelos externos (recomendador / predictor de riesgo).
//
// El motor no sabe cómo se calcula un puntaje: recibe cualquier
// `SubjectScorer` y sólo ordena o normaliza lo que éste devuelve.

use std::cmp::Ordering;

use tracing::{debug, warn};

use crate::algorithm::evaluator::is_passed;
use crate::algorithm::planner::AdvisoryEngine;
use crate::catalog::CurriculumCatalog;
use crate::models::{RiskReport, ScoredSubject, StudentState};

/// Capacidad de puntuar una asignatura para un estudiante.
pub trait SubjectScorer {
    fn score(&self, student_id: &str, subject_id: &str) -> f64;
}

impl<F> SubjectScorer for F
where
    F: Fn(&str, &str) -> f64,
{
    fn score(&self, student_id: &str, subject_id: &str) -> f64 {
        self(student_id, subject_id)
    }
}

impl<C: CurriculumCatalog> AdvisoryEngine<C> {
    /// Ranking de asignaturas aún no aprobadas de la malla del estudiante,
    /// de mayor a menor puntaje (empates por código), truncado a
    /// `ranking_size`.
    pub fn rank_subjects<S>(&self, student: &StudentState, scorer: &S) -> Vec<ScoredSubject>
    where
        S: SubjectScorer + ?Sized,
    {
        let policy = self.policy();
        let mut scored: Vec<ScoredSubject> = Vec::new();
        let semesters = self.catalog().semesters(&student.major);
        if semesters.is_empty() {
            debug!(
                "el catálogo no informa semestres para {}: ranking vacío (¿implementa `semesters`?)",
                student.major
            );
        }
        for semester in semesters {
            for code in self.catalog().curriculum(&student.major, semester) {
                if student.transcript.grade(&code).is_some_and(|g| is_passed(g, policy)) {
                    continue;
                }
                let score = scorer.score(&student.student_id, &code);
                if score.is_nan() {
                    warn!("puntaje NaN para {} / {}, se descarta", student.student_id, code);
                    continue;
                }
                scored.push(ScoredSubject { code, score });
            }
        }

        scored.sort_by(|a, b| match b.score.total_cmp(&a.score) {
            Ordering::Equal => a.code.cmp(&b.code),
            other => other,
        });
        scored.truncate(policy.ranking_size);
        debug!("ranking {}: {:?}", student.student_id, scored);
        scored
    }

    /// `scorer` debe devolver la probabilidad de reprobar (0.0 - 1.0).
    pub fn assess_risk<S>(&self, student: &StudentState, subject: &str, scorer: &S) -> RiskReport
    where
        S: SubjectScorer + ?Sized,
    {
        risk_report(subject, scorer.score(&student.student_id, subject))
    }
}

/// Convierte una probabilidad en porcentaje (0 - 100, un decimal).
pub fn risk_report(subject: &str, probability: f64) -> RiskReport {
    let pct = if probability.is_finite() {
        ((probability * 100.0).clamp(0.0, 100.0) * 10.0).round() / 10.0
    } else {
        warn!("probabilidad no finita para {}: {}", subject, probability);
        0.0
    };
    RiskReport {
        subject: subject.to_string(),
        risk_percentage: pct,
        message: format!("Risk of failing {} is {:.1}%", subject, pct),
    }
}
