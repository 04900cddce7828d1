use std::fs::File;
use std::io::Error;
use std::path::Path;

/// Writes `leads` leads named `Lead N`, affiliated across the first half of March 2024.
pub fn generate_leads_csv(path: &Path, leads: usize) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record(["name", "email", "affiliationDate"])?;

    for i in 1..=leads {
        let day = (i % 15) + 1;
        wtr.write_record([
            format!("Lead {}", i),
            format!("lead{}@example.com", i),
            format!("2024-03-{:02}", day),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes `rows` shipment rows cycling over `leads` leads with varying counts.
pub fn generate_shipments_csv(path: &Path, leads: usize, rows: usize) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record(["Cliente", "Envios"])?;

    for i in 0..rows {
        let lead = (i % leads) + 1;
        let shipments = (i * 37) % 400;
        wtr.write_record([format!("Lead {}", lead), shipments.to_string()])?;
    }

    wtr.flush()?;
    Ok(())
}
