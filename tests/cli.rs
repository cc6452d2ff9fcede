//! E2E tests for the calculator commands

use std::process::Command;

fn run(args: &[&str]) -> std::process::Output {
    Command::new("cargo")
        .args(["run", "--"])
        .args(args)
        .output()
        .expect("Failed to execute command")
}

/// Test the Beckham comparison table for a high earner
#[test]
fn beckham_high_earner() {
    let output = run(&["beckham", "--salary", "150000", "--year", "2025"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);

    assert!(stdout.contains("BECKHAM LAW COMPARISON"));
    assert!(stdout.contains("Standard IRPF"));
    assert!(stdout.contains("€58,401.50"));
    assert!(stdout.contains("€36,000.00"));
    assert!(stdout.contains("Annual savings: €22,401.50"));
    assert!(stdout.contains("€114,000.00"));
}

/// Below the break-even point the flat regime costs more
#[test]
fn beckham_low_earner_pays_more() {
    let output = run(&["beckham", "-s", "20000", "-y", "2025"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("costs €622.50 more per year"));
}

#[test]
fn beckham_defaults_to_latest_tables() {
    let output = run(&["beckham", "-s", "150000"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("Annual savings: €22,401.50"));
}

#[test]
fn beckham_lead_payload() {
    let output = run(&["beckham", "-s", "150000", "-y", "2025", "--lead"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("\"calculator\": \"beckham\""));
    assert!(stdout.contains("22401.5"));
}

#[test]
fn beckham_rejects_unknown_region() {
    let output = run(&["beckham", "-s", "50000", "--region", "atlantis"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("atlantis"));
}

/// Test employer cost for a monthly salary over 12 payments
#[test]
fn labor_cost_breakdown() {
    let output = run(&["labor-cost", "-s", "3000", "-p", "12", "-e", "2", "-y", "2025"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);

    assert!(stdout.contains("EMPLOYER COST"));
    assert!(stdout.contains("Common contingencies"));
    assert!(stdout.contains("€962.00"));
    assert!(stdout.contains("€3,962.00"));
    assert!(stdout.contains("€47,544.00"));
    assert!(stdout.contains("€95,088.00"));
}

/// Without --year the latest tables are used, silently
#[test]
fn labor_cost_defaults_to_latest_tables() {
    let output = run(&["labor-cost", "-s", "3000", "-p", "12", "-e", "2"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("€3,962.00"));
    assert!(stdout.contains("€95,088.00"));
    assert!(!stderr.contains("WARN"));
}

#[test]
fn labor_cost_rejects_thirteen_payments() {
    let output = run(&["labor-cost", "-s", "3000", "-p", "13"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("12 or 14"));
}

#[test]
fn labor_cost_rejects_zero_employees() {
    let output = run(&["labor-cost", "-s", "3000", "-e", "0"]);
    assert!(!output.status.success());
}

/// Test the residency assessment from an answers file
#[test]
fn residency_from_file() {
    let output = run(&["residency", "-i", "tests/data/residency.json"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);

    assert!(stdout.contains("TAX RESIDENCY RISK (120 days in Spain)"));
    assert!(stdout.contains("Risk level: MEDIUM (score 29)"));
    assert!(stdout.contains("Part of your income is earned in Spain"));
}

#[test]
fn residency_automatic_above_183_days() {
    let output = run(&["residency", "-d", "200", "--json"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("\"risk_level\": \"high\""));
    assert!(stdout.contains("\"automatic_resident\": true"));
}

#[test]
fn residency_requires_days() {
    let output = run(&["residency"]);
    assert!(!output.status.success());
}

/// Test quiz scoring from an answers file
#[test]
fn quiz_from_file() {
    let output = run(&["quiz", "-i", "tests/data/quiz.json"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);

    assert!(stdout.contains("SETUP READINESS: READY TO LAUNCH"));
    assert!(stdout.contains("Score: 29/30 (97%)"));
}

#[test]
fn quiz_answer_flags() {
    let output = run(&[
        "quiz",
        "-a",
        "timeline=already-operating",
        "-a",
        "nie=appointment-booked",
        "-a",
        "structure=chosen",
        "--json",
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("\"score\": 13"));
    assert!(stdout.contains("\"level\": \"medium\""));
}

#[test]
fn quiz_no_answers_is_early_stage() {
    let output = run(&["quiz"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("SETUP READINESS: EARLY STAGE"));
    assert!(stdout.contains("Score: 0/30 (0%)"));
}

#[test]
fn quiz_malformed_answer() {
    let output = run(&["quiz", "-a", "timeline"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("QUESTION=OPTION"));
}

/// Test batch Beckham CSV output
#[test]
fn batch_beckham_csv() {
    let output = run(&["batch", "beckham", "tests/data/beckham.csv", "-y", "2025"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);

    assert!(stdout.contains("row,region,total_income,standard_irpf"));
    assert!(stdout.contains("58401.5"));
    assert!(stdout.contains("-622.5"));
    assert_eq!(stdout.lines().count(), 4);
}

/// Test batch labor cost CSV output, including minimum wage clamping
#[test]
fn batch_labor_cost_csv() {
    let output = run(&["batch", "labor-cost", "tests/data/labor.csv", "-y", "2025"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);

    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[1].starts_with("1,false,3000"));
    assert!(lines[1].contains("47544"));
    assert!(lines[2].contains("142632"));
    assert!(lines[3].starts_with("3,true,1184"));
}

#[test]
fn schema_csv_header() {
    let output = run(&["schema", "labor-cost", "csv-header"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert_eq!(
        stdout.trim(),
        "gross_salary,salary_input_mode,number_of_payments,contract_type,number_of_employees,industry_risk"
    );
}

#[test]
fn schema_json_for_residency() {
    let output = run(&["schema", "residency"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("days_in_spain"));
    assert!(stdout.contains("\"$schema\""));
}

#[test]
fn schema_quiz_has_no_csv() {
    let output = run(&["schema", "quiz", "csv-fields"]);
    assert!(!output.status.success());
}

#[test]
fn rules_digest() {
    let output = run(&["rules", "--digest", "-y", "2025"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    let digest = stdout.trim();
    assert_eq!(digest.len(), 64);
    assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn rules_tables_for_region() {
    let output = run(&["rules", "-y", "2025", "-r", "madrid"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("IRPF: Comunidad de Madrid"));
    assert!(!stdout.contains("IRPF: Catalunya"));
    assert!(stdout.contains("Over €300,000"));
    assert!(stdout.contains("BECKHAM REGIME"));
    assert!(stdout.contains("24.00% up to €600,000, 47.00% above"));
}
