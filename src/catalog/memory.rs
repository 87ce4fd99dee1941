use std::collections::{BTreeSet, HashMap, HashSet};
use std::fs;
use std::path::Path;

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};

use crate::catalog::CurriculumCatalog;
use crate::error::{AdvisorError, Result};
use crate::models::{CurriculumAssignment, PrerequisiteEdge, Subject};

/// Snapshot serializable del catálogo, tal como lo entrega el servicio.
///
/// ```json
/// {
///   "subjects": [{"code": "CS101", "name": "Nhập môn Lập trình", "credits": 3}],
///   "curriculum": [{"major": "CNTT", "semester": 1, "subject": "CS101"}],
///   "prerequisites": [{"subject": "CS102", "prerequisite": "CS101"}]
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    #[serde(default)]
    pub subjects: Vec<Subject>,
    #[serde(default)]
    pub curriculum: Vec<CurriculumAssignment>,
    #[serde(default)]
    pub prerequisites: Vec<PrerequisiteEdge>,
}

/// Catálogo en memoria. Los prerequisitos se guardan como grafo dirigido
/// `asignatura -> prerequisito`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    pub(crate) subjects: HashMap<String, Subject>,
    // (malla, semestre) -> códigos en orden del snapshot
    pub(crate) curriculum: HashMap<(String, u32), Vec<String>>,
    pub(crate) graph: DiGraph<String, ()>,
    pub(crate) node_map: HashMap<String, NodeIndex>,
}

impl InMemoryCatalog {
    /// Construye el catálogo validando el snapshot:
    /// - códigos de asignatura únicos y créditos positivos
    /// - semestres >= 1
    /// - cada asignatura aparece a lo sumo una vez por malla
    ///
    /// Las aristas que nombran asignaturas fuera del registro se conservan;
    /// `audit` las reporta.
    pub fn from_snapshot(snapshot: CatalogSnapshot) -> Result<Self> {
        let mut catalog = InMemoryCatalog::default();

        for subject in snapshot.subjects {
            if subject.credits == 0 {
                return Err(AdvisorError::InvalidCatalog(format!(
                    "subject {} has no credits",
                    subject.code
                )));
            }
            if catalog.subjects.contains_key(&subject.code) {
                return Err(AdvisorError::InvalidCatalog(format!(
                    "duplicate subject {}",
                    subject.code
                )));
            }
            catalog.subjects.insert(subject.code.clone(), subject);
        }

        let mut seen: HashSet<(String, String)> = HashSet::new();
        for a in snapshot.curriculum {
            if a.semester == 0 {
                return Err(AdvisorError::InvalidCatalog(format!(
                    "subject {} assigned to semester 0 in {}",
                    a.subject, a.major
                )));
            }
            if !seen.insert((a.major.clone(), a.subject.clone())) {
                return Err(AdvisorError::InvalidCatalog(format!(
                    "subject {} assigned more than once in {}",
                    a.subject, a.major
                )));
            }
            catalog.curriculum.entry((a.major, a.semester)).or_default().push(a.subject);
        }

        for edge in snapshot.prerequisites {
            catalog.add_prerequisite(&edge.subject, &edge.prerequisite);
        }

        Ok(catalog)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let snapshot: CatalogSnapshot = serde_json::from_str(json)?;
        Self::from_snapshot(snapshot)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn subject(&self, code: &str) -> Option<&Subject> {
        self.subjects.get(code)
    }

    fn node(&mut self, code: &str) -> NodeIndex {
        if let Some(&idx) = self.node_map.get(code) {
            return idx;
        }
        let idx = self.graph.add_node(code.to_string());
        self.node_map.insert(code.to_string(), idx);
        idx
    }

    fn add_prerequisite(&mut self, subject: &str, prerequisite: &str) {
        let from = self.node(subject);
        let to = self.node(prerequisite);
        if self.graph.find_edge(from, to).is_none() {
            self.graph.add_edge(from, to, ());
        }
    }
}

impl CurriculumCatalog for InMemoryCatalog {
    fn curriculum(&self, major: &str, semester: u32) -> Vec<String> {
        self.curriculum
            .get(&(major.to_string(), semester))
            .cloned()
            .unwrap_or_default()
    }

    fn prerequisites(&self, subject: &str) -> Vec<String> {
        let Some(&idx) = self.node_map.get(subject) else {
            return Vec::new();
        };
        // petgraph recorre las aristas en orden inverso de inserción
        let mut out: Vec<String> = self
            .graph
            .neighbors_directed(idx, Direction::Outgoing)
            .map(|n| self.graph[n].clone())
            .collect();
        out.reverse();
        out
    }

    fn subject_name(&self, subject: &str) -> Option<String> {
        self.subjects.get(subject).map(|s| s.name.clone())
    }

    fn semesters(&self, major: &str) -> Vec<u32> {
        let set: BTreeSet<u32> = self
            .curriculum
            .keys()
            .filter(|(m, _)| m == major)
            .map(|(_, s)| *s)
            .collect();
        set.into_iter().collect()
    }
}
