//! rxplain-demo — walk one patient through intake, triage, and prescription.
//!
//! Usage:
//!   rxplain-demo <medicine> [symptoms...]
//!
//! Environment:
//!   GEMINI_API_KEY    enables the primary tier
//!   HF_TOKEN          enables the secondary tier
//!   RUST_LOG          tracing filter (default "rxplain=info")

use anyhow::Result;
use rxplain::{
    ExplanationRequest, InMemoryRoster, Intake, MedicineExplanationResolver, Prescription,
    ResolverConfig, Roster,
};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rxplain=info".into()),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let medicine = match args.next() {
        Some(m) => m,
        None => {
            eprintln!("usage: rxplain-demo <medicine> [symptoms...]");
            std::process::exit(2);
        }
    };
    let rest: Vec<String> = args.collect();
    let symptoms = if rest.is_empty() {
        "chest pain and a racing pulse".to_string()
    } else {
        rest.join(" ")
    };

    let config = ResolverConfig::from_env();
    let resolver = MedicineExplanationResolver::new(&config)?;
    let roster = InMemoryRoster::new();

    let record = roster.register(Intake {
        name: "John Doe".to_string(),
        age: 42,
        gender: "Male".to_string(),
        blood_type: "O+".to_string(),
        contact: "555-0100".to_string(),
        symptoms,
    })?;
    println!(
        "Registered {} -> token {} ({})",
        record.intake.name,
        record.token,
        record.department.name()
    );

    let explanation = resolver
        .resolve(&ExplanationRequest::new(medicine.as_str()))
        .await;
    let marker = if explanation.degraded { " (offline mode)" } else { "" };
    println!("[{}]{} {}", explanation.source, marker, explanation.text);

    let completed = roster.complete(
        &record.token,
        Prescription {
            medicine,
            notes: "Take after meals. Rest for 2 days.".to_string(),
            explanation,
        },
    )?;
    println!("Completed appointment for token {}", completed.token);

    Ok(())
}
