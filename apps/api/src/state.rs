use std::sync::Arc;

use crate::config::Config;
use crate::sheet::{LabelTrim, SheetParser, TemplateFiller};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Stateless; shared so every request uses the configured wrapper set.
    pub parser: Arc<SheetParser>,
    /// Moved into `spawn_blocking` per render, hence the `Arc`.
    pub filler: Arc<TemplateFiller>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let parser = SheetParser::new(LabelTrim::new(&config.label_wrappers))
            .skip_empty_values(config.skip_empty_values);
        let filler = TemplateFiller::new(config.template_path.clone());
        Self {
            config,
            parser: Arc::new(parser),
            filler: Arc::new(filler),
        }
    }
}
