// Color resolver trait - Maps theme color names to concrete colors
pub trait ColorResolver: Send + Sync {
    /// Concrete color for a named theme color. Unknown names pass through.
    fn resolve(&self, name: &str) -> String;
}
