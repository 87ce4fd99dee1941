// Módulo de alto nivel para la recomendación académica
// Declarar submódulos (archivos en la carpeta `src/algorithm`)
pub mod evaluator;
pub mod eligibility;
pub mod planner;
pub mod scoring;
mod progress;

// Reexportar la API pública
pub use evaluator::{classify, is_passed, retake_reason};
pub use eligibility::{UNKNOWN_SUBJECT_NAME, eligible_subjects, eligible_subjects_withholding};
pub use planner::{AdvisoryEngine, current_semester, retake_list};
pub use progress::progress_report;
pub use scoring::{SubjectScorer, risk_report};
