//! AI updates feed. Asks the LLM for a few election updates as a JSON array.
//!
//! Anything other than a non-empty, well-formed array is replaced by the backup set.

use crate::domain::{ChatTurn, DomainError, FallbackCatalog, Sourced, UpdateItem};
use crate::ports::LlmPort;
use std::sync::Arc;
use tracing::{info, warn};

pub const UPDATES_TEMPERATURE: f32 = 0.7;

pub struct UpdatesService {
    llm: Arc<dyn LlmPort>,
    brief: String,
    catalog: Arc<FallbackCatalog>,
}

impl UpdatesService {
    pub fn new(llm: Arc<dyn LlmPort>, brief: String, catalog: Arc<FallbackCatalog>) -> Self {
        Self {
            llm,
            brief,
            catalog,
        }
    }

    /// Generate a fresh feed. Every call goes upstream.
    pub async fn latest(&self) -> Sourced<Vec<UpdateItem>> {
        match self.generate().await {
            Ok(items) => {
                info!(items = items.len(), "AI updates generated");
                Sourced::live(items)
            }
            Err(e) => {
                warn!(error = %e, "AI updates failed, serving backup");
                Sourced::fallback(self.catalog.updates.clone(), e.to_string())
            }
        }
    }

    async fn generate(&self) -> Result<Vec<UpdateItem>, DomainError> {
        let raw = self
            .llm
            .complete(&[ChatTurn::user(&self.brief)], UPDATES_TEMPERATURE)
            .await?;
        parse_updates(&raw)
    }
}

/// Parse model output into update items, tolerating markdown fences and chatter.
pub fn parse_updates(raw: &str) -> Result<Vec<UpdateItem>, DomainError> {
    let clean = strip_code_fences(raw);
    let items: Vec<UpdateItem> = serde_json::from_str(&clean).map_err(|e| {
        warn!(error = %e, json = %clean.chars().take(200).collect::<String>(), "JSON parse failed");
        DomainError::Llm(format!("Failed to parse LLM JSON: {}", e))
    })?;
    if items.is_empty() {
        return Err(DomainError::Llm("LLM returned no updates".to_string()));
    }
    Ok(items)
}

/// Remove ```json / ``` markers, then cut to the outermost JSON array if text surrounds it.
fn strip_code_fences(raw: &str) -> String {
    let unfenced = raw.replace("```json", "").replace("```", "");
    let trimmed = unfenced.trim();

    if !trimmed.starts_with('[') {
        if let (Some(start), Some(end)) = (trimmed.find('['), trimmed.rfind(']')) {
            if start < end {
                return trimmed[start..=end].to_string();
            }
        }
    }
    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::llm::MockLlmAdapter;
    use crate::domain::{DataSource, Priority, Prompts, UpdateCategory};

    const THREE_UPDATES: &str = r#"[
        {"id": "u1", "title": "Bihar Assembly", "category": "Upcoming", "status": "Phase 1 on 6 Nov", "priority": "High"},
        {"id": "u2", "title": "Delhi MCD", "category": "Result", "status": "Counting complete", "priority": "Normal"},
        {"id": "u3", "title": "Voter Roll", "category": "News", "status": "SIR drive extended", "priority": "Normal"}
    ]"#;

    fn service(llm: MockLlmAdapter) -> UpdatesService {
        UpdatesService::new(
            Arc::new(llm),
            Prompts::default().updates_brief,
            Arc::new(FallbackCatalog::default()),
        )
    }

    #[test]
    fn test_strip_code_fences_markdown() {
        let input = format!("```json\n{}\n```", THREE_UPDATES);
        assert_eq!(parse_updates(&input).unwrap().len(), 3);
    }

    #[test]
    fn test_strip_code_fences_with_text() {
        let input = r#"Here are the updates:
[{"id": 1, "title": "t", "category": "Result declared", "status": "s", "priority": "high"}]"#;
        let items = parse_updates(input).unwrap();
        assert_eq!(items[0].id, "1");
        assert_eq!(items[0].category, UpdateCategory::Result);
        assert_eq!(items[0].priority, Priority::High);
    }

    #[test]
    fn test_parse_rejects_empty_array() {
        assert!(parse_updates("[]").is_err());
    }

    #[tokio::test]
    async fn test_latest_live() {
        let out = service(MockLlmAdapter::replying(THREE_UPDATES)).latest().await;
        assert_eq!(out.source, DataSource::Live);
        assert_eq!(out.data.len(), 3);
        assert_eq!(out.data[1].title, "Delhi MCD");
    }

    #[tokio::test]
    async fn test_latest_upstream_failure_serves_backup_in_order() {
        let out = service(MockLlmAdapter::failing("connection refused"))
            .latest()
            .await;

        assert_eq!(out.source, DataSource::Fallback);
        let ids: Vec<&str> = out.data.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(
            ids,
            ["backup-1", "backup-2", "backup-3", "backup-4", "backup-5"]
        );
    }

    #[tokio::test]
    async fn test_latest_malformed_output_serves_backup() {
        let out = service(MockLlmAdapter::replying("Sorry, I cannot help with that."))
            .latest()
            .await;
        assert_eq!(out.data, FallbackCatalog::default().updates);
        assert!(out.diagnostic.unwrap().contains("Failed to parse LLM JSON"));
    }
}
