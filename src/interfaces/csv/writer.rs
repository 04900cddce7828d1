use crate::error::Result;
use serde::Serialize;
use std::io::Write;

/// Writes serializable rows as CSV with a header line.
///
/// Used for commission records, summaries, engine results and lead listings.
pub struct CsvWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> CsvWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_row<T: Serialize>(&mut self, row: &T) -> Result<()> {
        self.writer.serialize(row)?;
        Ok(())
    }

    /// Writes every row and flushes the underlying sink.
    pub fn write_all<'a, T, I>(&mut self, rows: I) -> Result<()>
    where
        T: Serialize + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        for row in rows {
            self.writer.serialize(row)?;
        }
        self.flush()
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commission::compute_commission;
    use crate::domain::record::CommissionRecord;
    use crate::interfaces::csv::reader::CsvReader;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_write_commission_records() {
        let reference = date(2024, 5, 31);
        let result = compute_commission(date(2024, 4, 15), reference, 8).unwrap();
        let record = CommissionRecord::new("Acme", 8, &result, reference, false);

        let mut buffer = Vec::new();
        {
            let mut writer = CsvWriter::new(&mut buffer);
            writer.write_all(&[record.clone()]).unwrap();
        }
        let output = String::from_utf8(buffer).unwrap();

        assert!(output.starts_with(
            "lead,year,month,shipments,rate,total_commission,tier,status,processed_at,crm_matched\n"
        ));
        assert!(output.contains("Acme,2024,5,8,0.5,2.5,5-29,half,2024-05-31,false"));

        let back: Vec<CommissionRecord> = CsvReader::new(output.as_bytes())
            .commissions()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(back, vec![record]);
    }

    #[test]
    fn test_write_engine_result() {
        let result = compute_commission(date(2024, 4, 21), date(2024, 4, 22), 300).unwrap();
        let mut buffer = Vec::new();
        {
            let mut writer = CsvWriter::new(&mut buffer);
            writer.write_row(&result).unwrap();
            writer.flush().unwrap();
        }
        let output = String::from_utf8(buffer).unwrap();
        assert_eq!(
            output,
            "tier,rate,total_commission,status,months_since_affiliation\n300+,1,300,next_month,0\n"
        );
    }
}
