//! Deadline Calendar Module
//!
//! Emits one all-day VEVENT per record with a deadline, so the dataset can
//! be subscribed to as an iCalendar feed.

use crate::types::Record;
use anyhow::{Context, Result};
use chrono::Utc;
use std::fs;
use std::path::Path;

const ICS_HEADER: &str = "BEGIN:VCALENDAR
VERSION:2.0
METHOD:PUBLISH
PRODID:-//BandiRadar//IT
CALSCALE:GREGORIAN
X-WR-CALNAME:BandiRadar
X-WR-CALDESC:Scadenze bandi e incentivi italiani
";

const ICS_FOOTER: &str = "END:VCALENDAR\n";

/// Per-event UID, required by the iCal standard.
fn mk_uid(idx: usize) -> String {
    format!("bandiradar-{}@bandiradar.local", idx)
}

/// Write the calendar file. Records without a deadline are skipped; events
/// are all-day (`DTSTART;VALUE=DATE`) to keep imports simple. Returns the
/// number of events written.
pub fn save_ics(records: &[Record], path: &Path) -> Result<usize> {
    let mut lines: Vec<String> = vec![ICS_HEADER.to_string()];
    let stamp = Utc::now().format("%Y%m%dT%H%M%SZ").to_string();
    let mut events = 0;

    for (idx, rec) in records.iter().enumerate() {
        let Some(date) = rec.deadline.as_deref() else {
            continue;
        };
        let date_compact = date.replace('-', "");
        lines.extend([
            "BEGIN:VEVENT".to_string(),
            format!("UID:{}", mk_uid(idx)),
            format!("DTSTAMP:{}", stamp),
            format!("DTSTART;VALUE=DATE:{}", date_compact),
            format!("SUMMARY:{}", rec.title),
            format!("DESCRIPTION:{}", rec.source_url),
            "END:VEVENT".to_string(),
        ]);
        events += 1;
    }

    lines.push(ICS_FOOTER.to_string());
    fs::write(path, lines.join("\n"))
        .with_context(|| format!("Failed to write calendar to {:?}", path))?;
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AmountProvenance;
    use std::collections::BTreeMap;

    fn record(title: &str, deadline: Option<&str>) -> Record {
        Record {
            title: title.to_string(),
            entity: None,
            region: None,
            source_url: "https://example.it/bando".to_string(),
            deadline: deadline.map(str::to_string),
            extracted_at: "2026-08-30T10:00:00".to_string(),
            sector: None,
            funding_type: None,
            amount_min: None,
            amount_max: None,
            amount_provenance: AmountProvenance::Absent,
            extra: BTreeMap::new(),
        }
    }

    #[test]
    fn test_save_ics_skips_records_without_deadline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bandi.ics");

        let records = vec![
            record("Bando uno", Some("2026-09-30")),
            record("Bando due", None),
            record("Bando tre", Some("2026-12-01")),
        ];
        let events = save_ics(&records, &path).unwrap();
        assert_eq!(events, 2);

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.matches("BEGIN:VEVENT").count(), 2);
        assert!(content.contains("DTSTART;VALUE=DATE:20260930"));
        assert!(content.contains("UID:bandiradar-0@bandiradar.local"));
        assert!(content.contains("SUMMARY:Bando uno"));
        assert!(content.starts_with("BEGIN:VCALENDAR"));
        assert!(content.trim_end().ends_with("END:VCALENDAR"));
    }
}
