// Resolución de asignaturas elegibles para un semestre.
//
// 1) candidatos = malla del (major, semestre), en orden del catálogo
// 2) se descartan los ya aprobados (nota >= umbral de aprobación)
// 3) un candidato es elegible si TODOS sus prerequisitos están aprobados
//    (sólo directos por defecto; transitivo si la política lo pide)
// 4) se anota el nombre; si falta en el catálogo se usa un placeholder

use std::collections::{BTreeSet, HashMap, HashSet};

use tracing::{debug, warn};

use crate::algorithm::evaluator::is_passed;
use crate::catalog::CurriculumCatalog;
use crate::config::{AdvisoryPolicy, PrerequisiteCheck};
use crate::models::{SubjectRef, Transcript};

/// Nombre usado cuando el registro de la asignatura no existe en el catálogo.
pub const UNKNOWN_SUBJECT_NAME: &str = "Unknown subject";

/// Asignaturas de `semester` que el estudiante puede cursar.
///
/// Una combinación malla/semestre desconocida devuelve un vector vacío, no un
/// error: "no hay asignaturas este semestre" es un estado válido.
pub fn eligible_subjects<C>(
    catalog: &C,
    policy: &AdvisoryPolicy,
    major: &str,
    semester: u32,
    transcript: &Transcript,
) -> Vec<SubjectRef>
where
    C: CurriculumCatalog + ?Sized,
{
    eligible_subjects_withholding(catalog, policy, major, semester, transcript, &BTreeSet::new())
}

/// Igual que `eligible_subjects`, pero los códigos de `withheld` no cuentan
/// como prerequisito cumplido aunque tengan nota aprobatoria. El planificador
/// lo usa para los aprobados débiles marcados para repetir.
pub fn eligible_subjects_withholding<C>(
    catalog: &C,
    policy: &AdvisoryPolicy,
    major: &str,
    semester: u32,
    transcript: &Transcript,
    withheld: &BTreeSet<String>,
) -> Vec<SubjectRef>
where
    C: CurriculumCatalog + ?Sized,
{
    let satisfied = |code: &str| -> bool {
        !withheld.contains(code)
            && transcript.grade(code).is_some_and(|g| is_passed(g, policy))
    };

    let mut out: Vec<SubjectRef> = Vec::new();
    for code in catalog.curriculum(major, semester) {
        if transcript.grade(&code).is_some_and(|g| is_passed(g, policy)) {
            debug!("⊘ {} ya aprobado, se omite del semestre {}", code, semester);
            continue;
        }

        let eligible = match policy.prerequisite_check {
            PrerequisiteCheck::Direct => catalog.prerequisites(&code).iter().all(|p| satisfied(p.as_str())),
            PrerequisiteCheck::Transitive => {
                let mut on_path: HashSet<String> = HashSet::from([code.clone()]);
                let mut visited: HashMap<String, usize> = HashMap::new();
                ancestors_satisfied(catalog, policy, &code, 1, &mut on_path, &mut visited, &satisfied)
            }
        };
        if !eligible {
            debug!("⊘ {} excluido: prerequisitos no cumplidos", code);
            continue;
        }

        let name = match catalog.subject_name(&code) {
            Some(n) => n,
            None => {
                warn!("asignatura {} sin registro en el catálogo, se usa nombre genérico", code);
                UNKNOWN_SUBJECT_NAME.to_string()
            }
        };
        out.push(SubjectRef { code, name });
    }
    out
}

/// Recorre los prerequisitos de `code` hacia arriba. Una arista que cierra un
/// ciclo se ignora (sólo esa arista, no el cálculo completo) y la búsqueda no
/// desciende más allá de `max_prerequisite_depth`.
///
/// `visited` guarda la menor profundidad con la que se expandió cada nodo: un
/// nodo alcanzado antes por un camino largo (y cortado por la profundidad) se
/// vuelve a expandir si aparece por un camino más corto.
fn ancestors_satisfied<C, F>(
    catalog: &C,
    policy: &AdvisoryPolicy,
    code: &str,
    depth: usize,
    on_path: &mut HashSet<String>,
    visited: &mut HashMap<String, usize>,
    satisfied: &F,
) -> bool
where
    C: CurriculumCatalog + ?Sized,
    F: Fn(&str) -> bool,
{
    if depth > policy.max_prerequisite_depth {
        warn!("prerequisitos de {} superan la profundidad máxima {}", code, policy.max_prerequisite_depth);
        return true;
    }

    for prereq in catalog.prerequisites(code) {
        if on_path.contains(&prereq) {
            warn!("arista cíclica {} -> {} ignorada", code, prereq);
            continue;
        }
        if !satisfied(prereq.as_str()) {
            return false;
        }
        let prereq_depth = depth + 1;
        if visited.get(&prereq).is_some_and(|&d| d <= prereq_depth) {
            continue;
        }
        visited.insert(prereq.clone(), prereq_depth);
        on_path.insert(prereq.clone());
        let ok = ancestors_satisfied(catalog, policy, &prereq, prereq_depth, on_path, visited, satisfied);
        on_path.remove(&prereq);
        if !ok {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogSnapshot, InMemoryCatalog};
    use crate::models::{CurriculumAssignment, PrerequisiteEdge, Subject};
    use proptest::prelude::*;

    fn catalog(semester_2: &[&str], edges: &[(&str, &str)]) -> InMemoryCatalog {
        let mut codes: Vec<&str> = semester_2.to_vec();
        for (s, p) in edges {
            codes.push(*s);
            codes.push(*p);
        }
        codes.sort();
        codes.dedup();
        InMemoryCatalog::from_snapshot(CatalogSnapshot {
            subjects: codes
                .iter()
                .map(|c| Subject { code: c.to_string(), name: format!("Asignatura {}", c), credits: 3 })
                .collect(),
            curriculum: semester_2
                .iter()
                .map(|c| CurriculumAssignment { major: "CNTT".into(), semester: 2, subject: c.to_string() })
                .collect(),
            prerequisites: edges
                .iter()
                .map(|(s, p)| PrerequisiteEdge { subject: s.to_string(), prerequisite: p.to_string() })
                .collect(),
        })
        .unwrap()
    }

    fn codes(v: &[SubjectRef]) -> Vec<&str> {
        v.iter().map(|s| s.code.as_str()).collect()
    }

    #[test]
    fn test_direct_prerequisites() {
        let c = catalog(&["CS102", "MA102"], &[("CS102", "CS101")]);
        let p = AdvisoryPolicy::default();

        let none: Transcript = Transcript::new();
        assert_eq!(codes(&eligible_subjects(&c, &p, "CNTT", 2, &none)), vec!["MA102"]);

        let passed: Transcript = [("CS101", 8.0)].into_iter().collect();
        let out = eligible_subjects(&c, &p, "CNTT", 2, &passed);
        assert_eq!(codes(&out), vec!["CS102", "MA102"]);
        assert_eq!(out[0].name, "Asignatura CS102");

        let failed: Transcript = [("CS101", 4.0)].into_iter().collect();
        assert_eq!(codes(&eligible_subjects(&c, &p, "CNTT", 2, &failed)), vec!["MA102"]);
    }

    #[test]
    fn test_every_prerequisite_must_pass() {
        let c = catalog(&["CS201"], &[("CS201", "CS101"), ("CS201", "MA101")]);
        let p = AdvisoryPolicy::default();
        let partial: Transcript = [("CS101", 7.0), ("MA101", 3.0)].into_iter().collect();
        assert!(eligible_subjects(&c, &p, "CNTT", 2, &partial).is_empty());
        let full: Transcript = [("CS101", 7.0), ("MA101", 5.0)].into_iter().collect();
        assert_eq!(codes(&eligible_subjects(&c, &p, "CNTT", 2, &full)), vec!["CS201"]);
    }

    #[test]
    fn test_passed_and_failed_candidates() {
        let c = catalog(&["MA102", "ENG102"], &[]);
        let p = AdvisoryPolicy::default();
        let t: Transcript = [("MA102", 5.0), ("ENG102", 2.0)].into_iter().collect();
        // aprobado se omite; reprobado sigue siendo candidato
        assert_eq!(codes(&eligible_subjects(&c, &p, "CNTT", 2, &t)), vec!["ENG102"]);
    }

    #[test]
    fn test_unknown_major_or_semester_is_empty() {
        let c = catalog(&["MA102"], &[]);
        let p = AdvisoryPolicy::default();
        assert!(eligible_subjects(&c, &p, "KT", 2, &Transcript::new()).is_empty());
        assert!(eligible_subjects(&c, &p, "CNTT", 7, &Transcript::new()).is_empty());
    }

    #[test]
    fn test_missing_name_uses_placeholder() {
        let c = InMemoryCatalog::from_snapshot(CatalogSnapshot {
            subjects: vec![],
            curriculum: vec![CurriculumAssignment { major: "CNTT".into(), semester: 2, subject: "GHOST".into() }],
            prerequisites: vec![],
        })
        .unwrap();
        let out = eligible_subjects(&c, &AdvisoryPolicy::default(), "CNTT", 2, &Transcript::new());
        assert_eq!(out, vec![SubjectRef { code: "GHOST".into(), name: UNKNOWN_SUBJECT_NAME.into() }]);
    }

    #[test]
    fn test_direct_mode_ignores_grandparents() {
        // CS201 <- CS102 <- CS101; CS102 aprobado pero CS101 reprobado
        let c = catalog(&["CS201"], &[("CS201", "CS102"), ("CS102", "CS101")]);
        let t: Transcript = [("CS102", 7.0), ("CS101", 3.0)].into_iter().collect();

        let direct = AdvisoryPolicy::default();
        assert_eq!(codes(&eligible_subjects(&c, &direct, "CNTT", 2, &t)), vec!["CS201"]);

        let transitive = AdvisoryPolicy { prerequisite_check: PrerequisiteCheck::Transitive, ..Default::default() };
        assert!(eligible_subjects(&c, &transitive, "CNTT", 2, &t).is_empty());
    }

    #[test]
    fn test_transitive_skips_cyclic_edge() {
        // CS201 <- A <-> B: la arista que cierra el ciclo se ignora
        let c = catalog(&["CS201"], &[("CS201", "A"), ("A", "B"), ("B", "A")]);
        let t: Transcript = [("A", 7.0), ("B", 7.0)].into_iter().collect();
        let p = AdvisoryPolicy { prerequisite_check: PrerequisiteCheck::Transitive, ..Default::default() };
        assert_eq!(codes(&eligible_subjects(&c, &p, "CNTT", 2, &t)), vec!["CS201"]);
    }

    #[test]
    fn test_transitive_depth_bound() {
        let c = catalog(&["D"], &[("D", "C"), ("C", "B"), ("B", "A")]);
        let t: Transcript = [("C", 7.0), ("B", 7.0), ("A", 1.0)].into_iter().collect();
        let shallow = AdvisoryPolicy {
            prerequisite_check: PrerequisiteCheck::Transitive,
            max_prerequisite_depth: 2,
            ..Default::default()
        };
        assert_eq!(codes(&eligible_subjects(&c, &shallow, "CNTT", 2, &t)), vec!["D"]);
        let deep = AdvisoryPolicy { max_prerequisite_depth: 3, ..shallow };
        assert!(eligible_subjects(&c, &deep, "CNTT", 2, &t).is_empty());
    }

    #[test]
    fn test_transitive_shared_node_reached_first_by_longer_path() {
        // D -> X -> A y D -> A; A -> Z reprobado. X se recorre primero y llega
        // a A con profundidad 3 (cortada), pero por D -> A -> Z, Z está a 2 aristas.
        let c = catalog(&["D"], &[("D", "X"), ("D", "A"), ("X", "A"), ("A", "Z")]);
        let t: Transcript = [("X", 7.0), ("A", 7.0), ("Z", 1.0)].into_iter().collect();
        let p = AdvisoryPolicy {
            prerequisite_check: PrerequisiteCheck::Transitive,
            max_prerequisite_depth: 2,
            ..Default::default()
        };
        assert!(eligible_subjects(&c, &p, "CNTT", 2, &t).is_empty());
    }

    #[test]
    fn test_transitive_diamond_with_paths_of_different_length() {
        // D -> L1 -> L2 -> A (largo) y D -> A (corto); A -> Z reprobado
        let c = catalog(
            &["D"],
            &[("D", "L1"), ("L1", "L2"), ("L2", "A"), ("D", "A"), ("A", "Z")],
        );
        let t: Transcript = [("L1", 7.0), ("L2", 7.0), ("A", 7.0), ("Z", 2.0)].into_iter().collect();
        let transitive = |depth: usize| AdvisoryPolicy {
            prerequisite_check: PrerequisiteCheck::Transitive,
            max_prerequisite_depth: depth,
            ..Default::default()
        };

        // profundidad 1: sólo L1 y A (directos), ambos aprobados
        assert_eq!(codes(&eligible_subjects(&c, &transitive(1), "CNTT", 2, &t)), vec!["D"]);
        // profundidad 2: Z queda al alcance por el camino corto
        assert!(eligible_subjects(&c, &transitive(2), "CNTT", 2, &t).is_empty());
        assert!(eligible_subjects(&c, &transitive(5), "CNTT", 2, &t).is_empty());

        // con Z aprobado el rombo completo se satisface
        let ok: Transcript = [("L1", 7.0), ("L2", 7.0), ("A", 7.0), ("Z", 5.0)].into_iter().collect();
        assert_eq!(codes(&eligible_subjects(&c, &transitive(5), "CNTT", 2, &ok)), vec!["D"]);
    }

    #[test]
    fn test_withheld_prerequisite_does_not_unlock() {
        let c = catalog(&["CS102"], &[("CS102", "CS101")]);
        let t: Transcript = [("CS101", 6.0)].into_iter().collect();
        let withheld = BTreeSet::from(["CS101".to_string()]);
        let p = AdvisoryPolicy::default();
        assert!(eligible_subjects_withholding(&c, &p, "CNTT", 2, &t, &withheld).is_empty());
        assert_eq!(codes(&eligible_subjects(&c, &p, "CNTT", 2, &t)), vec!["CS102"]);
    }

    proptest! {
        #[test]
        fn prop_passed_subject_never_eligible(g in 5.0f64..=10.0) {
            let c = catalog(&["MA102"], &[]);
            let t: Transcript = [("MA102", g)].into_iter().collect();
            prop_assert!(eligible_subjects(&c, &AdvisoryPolicy::default(), "CNTT", 2, &t).is_empty());
        }

        #[test]
        fn prop_unsatisfied_prerequisite_never_eligible(g in 0.0f64..5.0) {
            let c = catalog(&["CS102"], &[("CS102", "CS101")]);
            let t: Transcript = [("CS101", g)].into_iter().collect();
            prop_assert!(eligible_subjects(&c, &AdvisoryPolicy::default(), "CNTT", 2, &t).is_empty());
        }

        #[test]
        fn prop_free_unpassed_subject_always_eligible(g in proptest::option::of(0.0f64..5.0)) {
            let c = catalog(&["MA102"], &[]);
            let t: Transcript = g.map(|g| ("MA102", g)).into_iter().collect();
            let out = eligible_subjects(&c, &AdvisoryPolicy::default(), "CNTT", 2, &t);
            prop_assert_eq!(codes(&out), vec!["MA102"]);
        }
    }
}
