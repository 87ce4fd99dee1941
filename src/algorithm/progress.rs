use crate::algorithm::planner::{AdvisoryEngine, current_semester};
use crate::catalog::CurriculumCatalog;
use crate::config::AdvisoryPolicy;
use crate::models::{ProgressReport, StudentState};

/// Avance del estudiante en el programa y en el semestre en curso.
pub fn progress_report(student: &StudentState, policy: &AdvisoryPolicy) -> ProgressReport {
    let total = if policy.program_credits == 0 {
        0.0
    } else {
        (student.completed_credits as f64 / policy.program_credits as f64 * 100.0).min(100.0)
    };
    let semester = if policy.credits_per_semester == 0 {
        0.0
    } else {
        let within = student.completed_credits % policy.credits_per_semester;
        within as f64 / policy.credits_per_semester as f64 * 100.0
    };

    ProgressReport {
        current_semester: current_semester(student.completed_credits, policy),
        total_program_progress_pct: round2(total),
        semester_progress_pct: round2(semester),
        gpa: student.gpa,
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

impl<C: CurriculumCatalog> AdvisoryEngine<C> {
    pub fn progress(&self, student: &StudentState) -> ProgressReport {
        progress_report(student, self.policy())
    }
}
