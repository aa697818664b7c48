// Repository trait for stored panel configuration
use crate::domain::options::PanelOptions;
use crate::domain::panel::Panel;
use async_trait::async_trait;

#[async_trait]
pub trait PanelRepository: Send + Sync {
    /// List all stored panels
    async fn list_panels(&self) -> anyhow::Result<Vec<Panel>>;

    /// Get one panel by id
    async fn get_panel(&self, id: &str) -> anyhow::Result<Option<Panel>>;

    /// Replace the options of a stored panel. Returns false when the panel does not exist.
    async fn save_options(&self, id: &str, options: PanelOptions) -> anyhow::Result<bool>;
}
