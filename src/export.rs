use crate::errors::StoreResult;
use crate::models::{DateKey, SnapshotEntry};

pub fn encode_snapshot(entries: &[SnapshotEntry]) -> StoreResult<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(entries)?)
}

pub fn export_file_name(exported_on: DateKey) -> String {
    format!("cycle-log-{exported_on}.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DayRecord, MoodType};

    #[test]
    fn encodes_pretty_array() {
        let entries = vec![SnapshotEntry {
            subject_id: "local-user".into(),
            date: "2024-03-10".parse().unwrap(),
            record: DayRecord {
                mood_present: true,
                mood_type: Some(MoodType::Fair),
                ..DayRecord::default()
            },
        }];

        let bytes = encode_snapshot(&entries).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.starts_with("[\n"));
        assert!(text.contains("\"subjectId\": \"local-user\""));
        assert!(text.contains("\"date\": \"2024-03-10\""));

        let decoded: Vec<SnapshotEntry> = serde_json::from_str(&text).unwrap();
        assert_eq!(decoded, entries);
    }

    #[test]
    fn empty_log_exports_empty_array() {
        assert_eq!(encode_snapshot(&[]).unwrap(), b"[]");
    }

    #[test]
    fn file_name_carries_export_date() {
        let date = DateKey::from_ymd(2026, 1, 5).unwrap();
        assert_eq!(export_file_name(date), "cycle-log-2026-01-05.json");
    }
}
