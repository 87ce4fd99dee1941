//! Acceso al catálogo curricular (asignaturas, malla por semestre y
//! prerequisitos).
//!
//! Submódulos:
//! - `memory`: catálogo en memoria construido a partir de un snapshot JSON
//! - `audit`: verificación de integridad (ciclos, referencias desconocidas)
//!
//! El motor sólo consulta el catálogo a través de `CurriculumCatalog`; cómo se
//! almacenan los datos es responsabilidad del servicio que lo aloja.

mod audit;
mod memory;

pub use audit::CatalogIssue;
pub use memory::{CatalogSnapshot, InMemoryCatalog};

/// Consultas de sólo lectura que el motor necesita del catálogo.
///
/// Los datos ausentes se devuelven vacíos (`Vec` vacío / `None`), nunca como
/// error: durante la carga de una malla nueva es normal que falten piezas.
pub trait CurriculumCatalog {
    /// Códigos asignados a (malla, semestre), en el orden del catálogo.
    fn curriculum(&self, major: &str, semester: u32) -> Vec<String>;

    /// Prerequisitos directos de `subject`.
    fn prerequisites(&self, subject: &str) -> Vec<String>;

    fn subject_name(&self, subject: &str) -> Option<String>;

    /// Semestres con asignaturas para la malla, en orden ascendente.
    fn semesters(&self, _major: &str) -> Vec<u32> {
        Vec::new()
    }
}

impl<C: CurriculumCatalog + ?Sized> CurriculumCatalog for &C {
    fn curriculum(&self, major: &str, semester: u32) -> Vec<String> {
        (**self).curriculum(major, semester)
    }

    fn prerequisites(&self, subject: &str) -> Vec<String> {
        (**self).prerequisites(subject)
    }

    fn subject_name(&self, subject: &str) -> Option<String> {
        (**self).subject_name(subject)
    }

    fn semesters(&self, major: &str) -> Vec<u32> {
        (**self).semesters(major)
    }
}
