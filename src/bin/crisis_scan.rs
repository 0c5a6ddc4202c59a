// src/bin/crisis_scan.rs
//! Classify messages from stdin, one per line, and print JSON assessments

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use mindful_guard::{load_config, CrisisDetector};
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = load_config();
    let mut detector = CrisisDetector::from_config(config);
    info!(
        locale = %detector.locale(),
        rules = %detector.rules().version,
        "crisis scan started"
    );

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout().lock();
    let mut scanned = 0usize;

    for line in stdin.lock().lines() {
        let line = line.context("failed to read stdin")?;
        if line.trim().is_empty() {
            continue;
        }
        let assessment = detector.analyze_message(&line);
        serde_json::to_writer(&mut stdout, &assessment)?;
        writeln!(stdout)?;
        scanned += 1;
    }

    let summary = json!({
        "scanned": scanned,
        "deterioration": detector.check_deterioration_pattern(),
        "emergency_mode": detector.is_emergency_mode(),
    });
    writeln!(stdout, "{summary}")?;

    if detector.is_emergency_mode() {
        for contact in detector.emergency_contacts() {
            eprintln!("{}: {} ({})", contact.name, contact.phone, contact.available);
        }
    }

    Ok(())
}
