// Auditoría de integridad del catálogo. Es sólo diagnóstico para quien
// mantiene la malla: el planificador nunca la invoca.

use std::collections::BTreeSet;

use petgraph::algo::tarjan_scc;
use serde::Serialize;

use crate::catalog::InMemoryCatalog;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CatalogIssue {
    /// Asignaturas que se requieren mutuamente (códigos ordenados).
    PrerequisiteCycle { subjects: Vec<String> },
    /// `referenced_by` nombra una asignatura que no está en el registro.
    UnknownSubject { referenced_by: String, code: String },
}

impl InMemoryCatalog {
    /// Devuelve los problemas encontrados, ordenados y sin duplicados.
    pub fn audit(&self) -> Vec<CatalogIssue> {
        let mut issues: BTreeSet<CatalogIssue> = BTreeSet::new();

        // Ciclos: componentes fuertemente conexas de tamaño > 1 o auto-aristas
        for scc in tarjan_scc(&self.graph) {
            let is_cycle = scc.len() > 1
                || scc.first().is_some_and(|&n| self.graph.find_edge(n, n).is_some());
            if is_cycle {
                let mut subjects: Vec<String> = scc.iter().map(|&n| self.graph[n].clone()).collect();
                subjects.sort();
                tracing::warn!("ciclo de prerequisitos en el catálogo: {:?}", subjects);
                issues.insert(CatalogIssue::PrerequisiteCycle { subjects });
            }
        }

        for edge in self.graph.edge_indices() {
            let Some((from, to)) = self.graph.edge_endpoints(edge) else { continue };
            let subject = &self.graph[from];
            let prereq = &self.graph[to];
            if !self.subjects.contains_key(subject) {
                issues.insert(CatalogIssue::UnknownSubject {
                    referenced_by: format!("prerequisite edge {} -> {}", subject, prereq),
                    code: subject.clone(),
                });
            }
            if !self.subjects.contains_key(prereq) {
                issues.insert(CatalogIssue::UnknownSubject {
                    referenced_by: format!("prerequisite edge {} -> {}", subject, prereq),
                    code: prereq.clone(),
                });
            }
        }

        for ((major, semester), codes) in self.curriculum.iter() {
            for code in codes.iter().filter(|c| !self.subjects.contains_key(*c)) {
                issues.insert(CatalogIssue::UnknownSubject {
                    referenced_by: format!("curriculum {} semester {}", major, semester),
                    code: code.clone(),
                });
            }
        }

        issues.into_iter().collect()
    }
}
