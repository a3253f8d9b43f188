use crate::models::Snapshot;
use crate::utils::error::{AppError, Result};

/// Render the snapshot set as CSV with a header row.
///
/// Column order follows the `Snapshot` field declaration:
/// `timestamp,source,model,title,sku,currency,price_eur,product_url,image_url,image_path`.
pub fn to_csv(snapshots: &[Snapshot]) -> Result<String> {
    let mut buffer = Vec::new();
    {
        let mut writer = csv::Writer::from_writer(&mut buffer);
        for snapshot in snapshots {
            writer.serialize(snapshot)?;
        }
        writer.flush()?;
    }

    String::from_utf8(buffer)
        .map_err(|e| AppError::Validation(format!("CSV output was not valid UTF-8: {e}")))
}
