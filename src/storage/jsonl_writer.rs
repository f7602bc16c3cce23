use crate::model::AppError;
use crate::storage::ResultSet;
use std::io::Write;
use std::path::Path;

/// Writes one JSON object per product, newline separated. Returns the number
/// of records written.
pub fn write_results<W: Write>(results: &ResultSet, mut out: W, target: &Path) -> Result<usize, AppError> {
    let mut written = 0;
    for record in results.emit() {
        serde_json::to_writer(&mut out, &record).map_err(|e| {
            if e.is_io() {
                AppError::io(target, e.into())
            } else {
                AppError::Serialize(e)
            }
        })?;
        out.write_all(b"\n").map_err(|e| AppError::io(target, e))?;
        written += 1;
    }
    out.flush().map_err(|e| AppError::io(target, e))?;
    Ok(written)
}
