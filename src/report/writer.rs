use crate::{Finding, Result};
use std::path::Path;

/// Writes findings to a CSV file, one row per finding
///
/// Columns: page_url, name, image_url, image_alt, name_validated. Optional
/// fields serialize as empty cells.
pub fn write_findings_csv(path: &Path, findings: &[Finding]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;

    // Explicit header so an empty report still carries one
    writer.write_record(["page_url", "name", "image_url", "image_alt", "name_validated"])?;

    for finding in findings {
        writer.serialize(finding)?;
    }
    writer.flush()?;

    tracing::info!("Wrote {} findings to {}", findings.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_findings() -> Vec<Finding> {
        vec![
            Finding {
                page_url: "https://hr.nl/team".to_string(),
                name: Some("Jan Bakker".to_string()),
                image_url: Some("https://hr.nl/foto.jpg".to_string()),
                image_alt: Some("portrait".to_string()),
                name_validated: false,
            },
            Finding {
                page_url: "https://hr.nl/about".to_string(),
                name: None,
                image_url: Some("https://hr.nl/avatar.png".to_string()),
                image_alt: None,
                name_validated: false,
            },
        ]
    }

    #[test]
    fn test_write_and_read_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("raw.csv");

        write_findings_csv(&path, &sample_findings()).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let rows: Vec<Finding> = reader.deserialize().map(|r| r.unwrap()).collect();

        assert_eq!(rows, sample_findings());
    }

    #[test]
    fn test_header_row() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("raw.csv");

        write_findings_csv(&path, &sample_findings()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let header = content.lines().next().unwrap();
        assert_eq!(header, "page_url,name,image_url,image_alt,name_validated");
    }

    #[test]
    fn test_empty_findings_writes_header_only() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("raw.csv");

        write_findings_csv(&path, &[]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 1);
    }
}
