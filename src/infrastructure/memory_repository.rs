// In-memory panel repository seeded from configuration
use crate::application::panel_repository::PanelRepository;
use crate::domain::options::PanelOptions;
use crate::domain::panel::Panel;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
pub struct InMemoryPanelRepository {
    panels: RwLock<BTreeMap<String, Panel>>,
}

impl InMemoryPanelRepository {
    pub fn new(panels: Vec<Panel>) -> Self {
        let panels = panels.into_iter().map(|p| (p.id.clone(), p)).collect();
        Self {
            panels: RwLock::new(panels),
        }
    }
}

#[async_trait]
impl PanelRepository for InMemoryPanelRepository {
    async fn list_panels(&self) -> Result<Vec<Panel>> {
        Ok(self.panels.read().await.values().cloned().collect())
    }

    async fn get_panel(&self, id: &str) -> Result<Option<Panel>> {
        Ok(self.panels.read().await.get(id).cloned())
    }

    async fn save_options(&self, id: &str, options: PanelOptions) -> Result<bool> {
        let mut panels = self.panels.write().await;
        match panels.get_mut(id) {
            Some(panel) => {
                panel.options = options;
                tracing::debug!("Saved options for panel {}", id);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::options::FieldConfig;

    fn panel(id: &str) -> Panel {
        Panel::new(
            id.to_string(),
            id.to_uppercase(),
            PanelOptions::default(),
            FieldConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_list_and_get() {
        let repository = InMemoryPanelRepository::new(vec![panel("b"), panel("a")]);

        let ids: Vec<String> = repository
            .list_panels()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(repository.get_panel("b").await.unwrap().unwrap().title, "B");
        assert!(repository.get_panel("c").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_options() {
        let repository = InMemoryPanelRepository::new(vec![panel("a")]);
        let options = PanelOptions {
            table_column: Some("temp".to_string()),
            ..PanelOptions::default()
        };

        assert!(repository.save_options("a", options.clone()).await.unwrap());
        assert!(!repository.save_options("z", options).await.unwrap());

        let stored = repository.get_panel("a").await.unwrap().unwrap();
        assert_eq!(stored.options.table_column.as_deref(), Some("temp"));
    }
}
