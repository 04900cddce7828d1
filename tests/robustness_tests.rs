use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn test_malformed_shipment_rows() {
    let dir = tempdir().unwrap();
    let shipments = dir.path().join("shipments.csv");
    let mut wtr = csv::Writer::from_path(&shipments).unwrap();
    wtr.write_record(["Cliente", "Envios"]).unwrap();

    // Valid row
    wtr.write_record(["Acme", "10"]).unwrap();
    // Count is not a number
    wtr.write_record(["Acme", "many"]).unwrap();
    // Negative count
    wtr.write_record(["Second Co", "-3"]).unwrap();
    // No client name
    wtr.write_record(["", "50"]).unwrap();
    // Empty count counts as zero
    wtr.write_record(["Second Co", ""]).unwrap();
    wtr.flush().unwrap();
    drop(wtr);

    let mut cmd = Command::new(cargo_bin!("leadcomm"));
    cmd.arg("process")
        .arg("--leads")
        .arg("tests/fixtures/leads.csv")
        .arg("--shipments")
        .arg(&shipments)
        .arg("--reference")
        .arg("2024-03-15");

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Error reading shipment row"))
        .stderr(predicate::str::contains("Error processing shipment row"))
        .stdout(predicate::str::contains("Acme,2024,3,10,1,5,5-29,full,2024-03-15,false"))
        .stdout(predicate::str::contains("Second Co,2024,3,0,0.5,0,none,half,2024-03-15,false"))
        .stdout(predicate::str::contains("Second Co,2024,3,-3").not());
}

#[test]
fn test_malformed_lead_rows() {
    let dir = tempdir().unwrap();
    let leads = dir.path().join("leads.csv");
    let mut wtr = csv::Writer::from_path(&leads).unwrap();
    wtr.write_record(["name", "email", "affiliationDate"]).unwrap();
    wtr.write_record(["Acme", "acme@example.com", "2024-03-04"]).unwrap();
    wtr.write_record(["Broken", "broken@example.com", "31/03/2024"]).unwrap();
    wtr.flush().unwrap();
    drop(wtr);

    let mut cmd = Command::new(cargo_bin!("leadcomm"));
    cmd.arg("search").arg("--leads").arg(&leads).arg("example.com");

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Error reading lead"))
        .stdout(predicate::str::contains("Acme,acme@example.com,2024-03-04,active,"))
        .stdout(predicate::str::contains("Broken").not());
}

#[test]
fn test_missing_input_file() {
    let mut cmd = Command::new(cargo_bin!("leadcomm"));
    cmd.args(["report", "tests/fixtures/does_not_exist.csv"]);

    cmd.assert().failure();
}
