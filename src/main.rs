// --- Asesor de malla curricular - Archivo principal ---
//
// Uso: mallaguia <catalogo.json> <peticion.json>
// Imprime en stdout la recomendación y el progreso en JSON; los diagnósticos
// van al log (stderr, filtrable con RUST_LOG).

use std::env;
use std::fs;
use std::process::ExitCode;

use mallaguia::api_json::parse_json_input;
use mallaguia::{AdvisoryEngine, InMemoryCatalog, Result};
use serde_json::json;
use tracing_subscriber::EnvFilter;

fn run(catalog_path: &str, request_path: &str) -> Result<serde_json::Value> {
    let catalog = InMemoryCatalog::from_json_file(catalog_path)?;
    for issue in catalog.audit() {
        tracing::warn!("catálogo {}: {:?}", catalog_path, issue);
    }

    let request = parse_json_input(&fs::read_to_string(request_path)?)?;
    let policy = request.policy.clone().unwrap_or_default().with_env_overrides()?;

    let engine = AdvisoryEngine::new(catalog, policy);
    let recommendation = engine.plan(&request.student, request.target_gpa);
    let progress = engine.progress(&request.student);

    Ok(json!({
        "student_id": request.student.student_id,
        "recommendation": recommendation,
        "progress": progress,
    }))
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 3 {
        eprintln!("uso: {} <catalogo.json> <peticion.json>", args.first().map(String::as_str).unwrap_or("mallaguia"));
        return ExitCode::from(2);
    }

    match run(&args[1], &args[2]) {
        Ok(out) => match serde_json::to_string_pretty(&out) {
            Ok(s) => {
                println!("{}", s);
                ExitCode::SUCCESS
            }
            Err(e) => {
                tracing::error!("no se pudo serializar la salida: {}", e);
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
