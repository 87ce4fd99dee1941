// Biblioteca raíz del crate `mallaguia`.
// Motor de recomendación académica: qué repetir, qué cursar el semestre
// siguiente y a qué adelantarse, a partir de la malla, los prerequisitos y
// las notas del estudiante. Función pura de sus entradas: no lee datos,
// no habla con la red y no persiste nada.
pub mod algorithm;
pub mod api_json;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;

pub use algorithm::{AdvisoryEngine, SubjectScorer, classify, eligible_subjects};
pub use catalog::{CatalogIssue, CatalogSnapshot, CurriculumCatalog, InMemoryCatalog};
pub use config::{AdvisoryPolicy, PrerequisiteCheck};
pub use error::{AdvisorError, Result};
pub use models::{GradeBand, Recommendation, StudentState, Transcript};
