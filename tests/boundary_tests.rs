use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

fn compute(affiliation: &str, reference: &str, shipments: &str) -> assert_cmd::assert::Assert {
    Command::new(cargo_bin!("leadcomm"))
        .args([
            "compute",
            "--affiliation",
            affiliation,
            "--reference",
            reference,
            "--shipments",
            shipments,
        ])
        .assert()
}

#[test]
fn test_threshold_counts_award_their_own_tier() {
    let cases = [
        ("4", "none,1,0,full"),
        ("5", "5-29,1,5,full"),
        ("30", "30-99,1,30,full"),
        ("100", "100-299,1,100,full"),
        ("300", "300+,1,300,full"),
    ];
    for (shipments, expected) in cases {
        compute("2024-01-10", "2024-01-31", shipments)
            .success()
            .stdout(predicate::str::contains(expected));
    }
}

#[test]
fn test_second_month_thresholds() {
    let cases = [
        ("5", "5-29,0.5,2.5,half"),
        ("29", "5-29,0.5,2.5,half"),
        ("30", "30-99,0.5,15,half"),
        ("100", "100-299,0.5,50,half"),
        ("300", "300+,0.5,150,half"),
    ];
    for (shipments, expected) in cases {
        compute("2024-01-10", "2024-02-01", shipments)
            .success()
            .stdout(predicate::str::contains(expected));
    }
}

#[test]
fn test_day_21_cutoff() {
    compute("2024-05-20", "2024-05-31", "5")
        .success()
        .stdout(predicate::str::contains("5-29,1,5,full,0"));
    compute("2024-05-21", "2024-05-31", "5")
        .success()
        .stdout(predicate::str::contains("5-29,1,5,next_month,0"));
}

#[test]
fn test_year_boundary() {
    compute("2023-12-31", "2024-01-01", "30")
        .success()
        .stdout(predicate::str::contains("30-99,0.5,15,half,1"));
}

#[test]
fn test_negative_shipments_rejected() {
    compute("2024-01-10", "2024-01-31", "-1")
        .failure()
        .stderr(predicate::str::contains("Invalid input"));
}

#[test]
fn test_impossible_date_rejected() {
    compute("2024-02-30", "2024-03-01", "10")
        .failure()
        .stderr(predicate::str::contains("invalid calendar date"));
}

#[test]
fn test_date_with_trailing_text_rejected() {
    compute("2024-03-05Tgarbage", "2024-03-30", "10")
        .failure()
        .stderr(predicate::str::contains("invalid calendar date"));
    compute("2024-03-05", "2024-03-30 not a time", "10")
        .failure()
        .stderr(predicate::str::contains("invalid calendar date"));
}

#[test]
fn test_full_timestamp_keeps_its_date() {
    compute("2024-03-05T10:00:00Z", "2024-03-30 18:45:00", "30")
        .success()
        .stdout(predicate::str::contains("30-99,1,30,full,0"));
}
