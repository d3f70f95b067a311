use crate::model::{EntitySummary, GenerationReport};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct RunDocument<'a> {
    pub schema_version: u32,
    pub generated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run: Option<&'a GenerationReport>,
    pub entities: &'a [EntitySummary],
    pub cleanup_sql: &'static str,
}

/// Pretty JSON rendering of a run (or of a bare summary when `run` is None).
pub fn render(
    run: Option<&GenerationReport>,
    entities: &[EntitySummary],
) -> anyhow::Result<String> {
    let doc = RunDocument {
        schema_version: 1,
        generated_at: chrono::Utc::now().to_rfc3339(),
        run,
        entities,
        cleanup_sql: crate::storage::schema::CLEANUP_SQL,
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}
