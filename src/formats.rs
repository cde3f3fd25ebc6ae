use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    #[serde(alias = "ID", deserialize_with = "de_post_id")]
    pub id: u64,
    #[serde(alias = "post_title")]
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    #[serde(alias = "ID", deserialize_with = "de_post_id")]
    pub id: u64,
    #[serde(alias = "post_title")]
    pub title: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeStatus {
    Unchanged,
    WouldRename,
    Renamed,
    Failed,
}

/// One line of the JSONL change report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeRecord {
    pub policy: String,
    pub course_id: u64,
    pub lesson_id: u64,
    pub old_title: String,
    pub new_title: String,
    pub status: ChangeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Post IDs arrive as JSON numbers from WP-CLI and the REST API, but some
/// WP-CLI formatters emit them as strings.
fn de_post_id<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(u64),
        Text(String),
    }

    match RawId::deserialize(deserializer)? {
        RawId::Number(id) => Ok(id),
        RawId::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("post id is not an integer: {text:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wp_cli_rows_parse_with_numeric_or_string_ids() -> anyhow::Result<()> {
        let raw = r#"[{"ID":4397,"post_title":"10 Hr Worker SST"},{"ID":"979","post_title":"Scaffold"}]"#;
        let courses: Vec<Course> = serde_json::from_str(raw)?;
        assert_eq!(
            courses,
            vec![
                Course {
                    id: 4397,
                    title: "10 Hr Worker SST".to_owned()
                },
                Course {
                    id: 979,
                    title: "Scaffold".to_owned()
                },
            ]
        );
        Ok(())
    }

    #[test]
    fn non_integer_id_is_rejected() {
        let raw = r#"[{"ID":"abc","post_title":"x"}]"#;
        let err = serde_json::from_str::<Vec<Lesson>>(raw).unwrap_err();
        assert!(err.to_string().contains("post id is not an integer"));
    }

    #[test]
    fn change_record_omits_missing_error() -> anyhow::Result<()> {
        let record = ChangeRecord {
            policy: "normalize".to_owned(),
            course_id: 1,
            lesson_id: 2,
            old_title: "a".to_owned(),
            new_title: "b".to_owned(),
            status: ChangeStatus::WouldRename,
            error: None,
        };
        let line = serde_json::to_string(&record)?;
        assert!(line.contains(r#""status":"would_rename""#));
        assert!(!line.contains("error"));
        Ok(())
    }
}
