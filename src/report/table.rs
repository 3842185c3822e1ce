use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::report::{BandRow, ReportError};

const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

/// Writes the reference table as CSV prefixed with a UTF-8 byte-order
/// marker; spreadsheet tools key their encoding detection on it.
pub fn write_reference_csv(path: &Path, rows: &[BandRow]) -> Result<(), ReportError> {
    let mut file = File::create(path)?;
    file.write_all(UTF8_BOM)?;

    let mut writer = csv::WriterBuilder::new().from_writer(file);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
