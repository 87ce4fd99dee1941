//! Política de recomendación.
//!
//! Todos los umbrales del motor viven aquí en vez de estar embebidos en el
//! código, de modo que cada malla o institución pueda usar los suyos.
//! Orden de precedencia: valores por defecto -> JSON -> variables de entorno
//! (`MALLAGUIA_*`, con `.env` si existe).

use std::env;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AdvisorError, Result};

/// Profundidad de la verificación de prerequisitos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrerequisiteCheck {
    /// Sólo prerequisitos directos (un nivel de aristas).
    #[default]
    Direct,
    /// Todos los ancestros alcanzables deben estar aprobados.
    Transitive,
}

impl FromStr for PrerequisiteCheck {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "direct" => Ok(PrerequisiteCheck::Direct),
            "transitive" => Ok(PrerequisiteCheck::Transitive),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisoryPolicy {
    /// Nota >= umbral => aprobado
    pub pass_threshold: f64,
    /// Aprobado con nota < techo => aprobado débil
    pub weak_pass_ceiling: f64,
    /// GPA objetivo (escala 4.0) desde el cual se sugiere repetir aprobados débiles
    pub retake_target_gpa: f64,
    /// GPA acumulado (escala 0-10) para habilitar adelanto de semestre
    pub acceleration_gpa: f64,
    pub credits_per_semester: u32,
    /// Créditos totales del programa (reporte de progreso)
    pub program_credits: u32,
    pub prerequisite_check: PrerequisiteCheck,
    pub max_prerequisite_depth: usize,
    /// Si es `false`, un prerequisito marcado para repetir no habilita a sus
    /// dependientes en las listas estándar/adelanto.
    pub flagged_prerequisites_unlock: bool,
    pub ranking_size: usize,
}

impl Default for AdvisoryPolicy {
    fn default() -> Self {
        Self {
            pass_threshold: 5.0,
            weak_pass_ceiling: 6.5,
            retake_target_gpa: 3.2,
            acceleration_gpa: 8.0,
            credits_per_semester: 15,
            program_credits: 150,
            prerequisite_check: PrerequisiteCheck::Direct,
            max_prerequisite_depth: 32,
            flagged_prerequisites_unlock: true,
            ranking_size: 3,
        }
    }
}

impl AdvisoryPolicy {
    /// Campos ausentes en el JSON toman el valor por defecto.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let policy: AdvisoryPolicy = serde_json::from_str(json)?;
        policy.validate()?;
        Ok(policy)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Aplica las variables `MALLAGUIA_*` del entorno (cargando `.env` si existe).
    pub fn with_env_overrides(self) -> Result<Self> {
        let _ = dotenv::dotenv();
        self.with_overrides(|key| env::var(key).ok())
    }

    /// Versión parametrizable de `with_env_overrides`: `lookup` resuelve una
    /// clave a su valor. Permite probar sin tocar el entorno del proceso.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        fn parse<T: FromStr>(key: &str, value: String) -> Result<T> {
            value
                .trim()
                .parse::<T>()
                .map_err(|_| AdvisorError::InvalidEnv { key: key.to_string(), value })
        }

        if let Some(v) = lookup("MALLAGUIA_PASS_THRESHOLD") {
            self.pass_threshold = parse("MALLAGUIA_PASS_THRESHOLD", v)?;
        }
        if let Some(v) = lookup("MALLAGUIA_WEAK_PASS_CEILING") {
            self.weak_pass_ceiling = parse("MALLAGUIA_WEAK_PASS_CEILING", v)?;
        }
        if let Some(v) = lookup("MALLAGUIA_RETAKE_TARGET_GPA") {
            self.retake_target_gpa = parse("MALLAGUIA_RETAKE_TARGET_GPA", v)?;
        }
        if let Some(v) = lookup("MALLAGUIA_ACCELERATION_GPA") {
            self.acceleration_gpa = parse("MALLAGUIA_ACCELERATION_GPA", v)?;
        }
        if let Some(v) = lookup("MALLAGUIA_CREDITS_PER_SEMESTER") {
            self.credits_per_semester = parse("MALLAGUIA_CREDITS_PER_SEMESTER", v)?;
        }
        if let Some(v) = lookup("MALLAGUIA_PROGRAM_CREDITS") {
            self.program_credits = parse("MALLAGUIA_PROGRAM_CREDITS", v)?;
        }
        if let Some(v) = lookup("MALLAGUIA_PREREQUISITE_CHECK") {
            self.prerequisite_check = parse("MALLAGUIA_PREREQUISITE_CHECK", v)?;
        }
        if let Some(v) = lookup("MALLAGUIA_MAX_PREREQUISITE_DEPTH") {
            self.max_prerequisite_depth = parse("MALLAGUIA_MAX_PREREQUISITE_DEPTH", v)?;
        }
        if let Some(v) = lookup("MALLAGUIA_FLAGGED_PREREQUISITES_UNLOCK") {
            self.flagged_prerequisites_unlock = parse("MALLAGUIA_FLAGGED_PREREQUISITES_UNLOCK", v)?;
        }
        if let Some(v) = lookup("MALLAGUIA_RANKING_SIZE") {
            self.ranking_size = parse("MALLAGUIA_RANKING_SIZE", v)?;
        }

        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=10.0).contains(&self.pass_threshold) {
            return Err(AdvisorError::InvalidPolicy(format!(
                "pass_threshold {} outside 0-10",
                self.pass_threshold
            )));
        }
        if !(self.pass_threshold..=10.0).contains(&self.weak_pass_ceiling) {
            return Err(AdvisorError::InvalidPolicy(format!(
                "weak_pass_ceiling {} must lie between pass_threshold {} and 10",
                self.weak_pass_ceiling, self.pass_threshold
            )));
        }
        if self.credits_per_semester == 0 {
            return Err(AdvisorError::InvalidPolicy("credits_per_semester must be positive".into()));
        }
        if self.program_credits == 0 {
            return Err(AdvisorError::InvalidPolicy("program_credits must be positive".into()));
        }
        if self.max_prerequisite_depth == 0 {
            return Err(AdvisorError::InvalidPolicy("max_prerequisite_depth must be positive".into()));
        }
        Ok(())
    }
}
