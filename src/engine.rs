//! Construction of engine components from configuration.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;
use tracing::{debug, info};

use tabweave_access::HostAccessPolicy;
use tabweave_config::{Config, JsonFileStore};
use tabweave_context::ContextAggregator;
use tabweave_organizer::{OrganizerOptions, TabOrganizer};
use tabweave_protocols::MemoryBrowser;
use tabweave_provider_openai::OpenAIClassifier;
use tabweave_tools_tabs::{TabToolset, ToolRegistry};

/// Everything a command needs, wired over one browser.
pub(crate) struct Engine {
    pub browser: Arc<MemoryBrowser>,
    pub aggregator: Arc<ContextAggregator>,
    pub organizer: Arc<TabOrganizer>,
    pub registry: ToolRegistry,
}

impl Engine {
    pub fn new(config: &Config, browser: MemoryBrowser) -> anyhow::Result<Self> {
        let browser = Arc::new(browser);
        let aggregator = Arc::new(
            ContextAggregator::new(browser.clone())
                .with_bookmark_limit(config.context.bookmark_limit),
        );
        let organizer = Arc::new(
            TabOrganizer::new(browser.clone(), Arc::new(classifier(config)))
                .with_options(organizer_options(config)),
        );
        let policy = Arc::new(access_policy(config));

        let registry = ToolRegistry::new();
        TabToolset::new(organizer.clone(), aggregator.clone(), policy).register(&registry)?;

        Ok(Self {
            browser,
            aggregator,
            organizer,
            registry,
        })
    }

    /// Load a browser snapshot and wire the engine over it.
    pub fn from_snapshot(config: &Config, snapshot: &Path) -> anyhow::Result<Self> {
        let browser = MemoryBrowser::load(snapshot)
            .with_context(|| format!("Failed to load snapshot {}", snapshot.display()))?;
        info!("Loaded browser snapshot {}", snapshot.display());
        Self::new(config, browser)
    }
}

/// Host access policy over the configured JSON store.
pub(crate) fn access_policy(config: &Config) -> HostAccessPolicy {
    let path = config.storage.resolved_path();
    debug!("Using storage file {}", path.display());
    HostAccessPolicy::new(Arc::new(JsonFileStore::new(path)))
}

fn classifier(config: &Config) -> OpenAIClassifier {
    let api_key = config
        .classifier
        .api_key
        .clone()
        .filter(|key| !key.is_empty())
        .or_else(|| std::env::var("OPENAI_API_KEY").ok())
        .unwrap_or_default();
    OpenAIClassifier::new(api_key)
        .with_base_url(config.classifier.base_url.clone())
        .with_model(config.classifier.model.clone())
        .with_timeout(Duration::from_secs(config.classifier.timeout_seconds))
}

fn organizer_options(config: &Config) -> OrganizerOptions {
    OrganizerOptions {
        group_color: config.organizer.group_color,
        min_groups: config.organizer.min_groups,
        max_groups: config.organizer.max_groups,
    }
}
