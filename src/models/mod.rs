// Estructuras de datos principales

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

/// Asignatura del registro del catálogo. Inmutable una vez definida.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub code: String,
    pub name: String,
    /// Créditos (entero positivo)
    pub credits: u32,
}

/// Asignación (malla, semestre, asignatura).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurriculumAssignment {
    pub major: String,
    pub semester: u32,
    pub subject: String,
}

/// Arista dirigida `subject -> prerequisite`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrerequisiteEdge {
    pub subject: String,
    pub prerequisite: String,
}

/// Notas del estudiante por asignatura (escala 0.0 - 10.0).
///
/// Una sola nota por asignatura: registrar de nuevo la misma asignatura
/// reemplaza la nota anterior (la última rendición manda). Se guarda en un
/// `BTreeMap` para que el recorrido sea siempre en orden de código y dos
/// llamadas con la misma entrada produzcan exactamente la misma salida.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript(BTreeMap<String, f64>);

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registra (o sobrescribe) la nota de `code`.
    pub fn record(&mut self, code: impl Into<String>, grade: f64) -> Option<f64> {
        self.0.insert(code.into(), grade)
    }

    pub fn grade(&self, code: &str) -> Option<f64> {
        self.0.get(code).copied()
    }

    /// Pares (código, nota) en orden de código.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for Transcript {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut t = Transcript::new();
        for (code, grade) in iter {
            t.record(code, grade);
        }
        t
    }
}

/// Estado del estudiante. Créditos aprobados y GPA son agregados mantenidos
/// fuera de este crate; aquí sólo se leen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentState {
    #[serde(default)]
    pub student_id: String,
    pub major: String,
    pub completed_credits: u32,
    /// GPA acumulado en escala 0 - 10
    pub gpa: f64,
    #[serde(default)]
    pub transcript: Transcript,
}

/// Banda de clasificación de una nota.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GradeBand {
    Fail,
    WeakPass,
    Pass,
}

/// Motivo por el que se recomienda repetir una asignatura.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RetakeReason {
    Failed,
    LowScore(f64),
}

impl fmt::Display for RetakeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RetakeReason::Failed => write!(f, "failed"),
            // 6.0 se muestra como "6.0", no como "6"
            RetakeReason::LowScore(g) if g.fract() == 0.0 => write!(f, "low score ({:.1})", g),
            RetakeReason::LowScore(g) => write!(f, "low score ({})", g),
        }
    }
}

impl Serialize for RetakeReason {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RetakeItem {
    pub code: String,
    pub reason: RetakeReason,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubjectRef {
    pub code: String,
    pub name: String,
}

/// Resultado del planificador. Se construye de nuevo en cada invocación.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Recommendation {
    pub retake: Vec<RetakeItem>,
    pub standard: Vec<SubjectRef>,
    pub advance: Vec<SubjectRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Asignatura con el puntaje entregado por un modelo externo.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredSubject {
    pub code: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskReport {
    pub subject: String,
    pub risk_percentage: f64,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressReport {
    pub current_semester: u32,
    pub total_program_progress_pct: f64,
    pub semester_progress_pct: f64,
    pub gpa: f64,
}
