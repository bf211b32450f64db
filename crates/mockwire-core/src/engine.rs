//! Builder and owner of the engine's services.

use std::{
    path::{Path, PathBuf},
    sync::{Arc, Weak},
};

use crate::{
    error::{MockError, Result},
    intercept::Interceptor,
    registry::TypeRegistry,
    resolver::TemplateResolver,
    storage::DocumentStore,
    store::PlanStore,
    tracker::InstanceTracker,
};

/// Builder for creating and configuring [`Engine`] instances.
#[derive(Debug, Clone, Default)]
pub struct EngineBuilder {
    storage_dir: Option<PathBuf>,
    registry: Option<Arc<TypeRegistry>>,
}

impl EngineBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the directory holding plan documents.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/mockwire/plans` or `~/.local/share/mockwire/plans`
    pub fn with_storage_dir<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.storage_dir = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Uses an existing registry of mockable types instead of an empty one.
    pub fn with_registry(mut self, registry: Arc<TypeRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Builds the engine, loading every plan document from storage.
    ///
    /// # Errors
    ///
    /// Returns `MockError::XdgDirectory` if the default directory cannot be
    /// determined, and `MockError::FileSystem` if the storage directory
    /// cannot be created or read.
    pub fn build(self) -> Result<Engine> {
        let storage_dir = match self.storage_dir {
            Some(path) => path,
            None => Self::default_storage_dir()?,
        };

        let registry = self.registry.unwrap_or_default();
        let tracker = Arc::new(InstanceTracker::new());
        let resolver = Arc::new(TemplateResolver::new(
            Arc::clone(&registry),
            Arc::clone(&tracker),
        ));
        let store = Arc::new(PlanStore::open(
            DocumentStore::new(&storage_dir)?,
            Arc::clone(&tracker),
            Arc::clone(&resolver),
            Arc::clone(&registry),
        )?);
        let interceptor = Arc::new(Interceptor::new(
            Arc::clone(&store),
            Arc::clone(&tracker),
            Arc::clone(&registry),
        ));

        let hook: Weak<Interceptor> = Arc::downgrade(&interceptor);
        store.attach_reinterception(hook);

        Ok(Engine {
            storage_dir,
            registry,
            tracker,
            resolver,
            store,
            interceptor,
        })
    }

    fn default_storage_dir() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("mockwire")
            .create_data_directory("plans")
            .map_err(|e| MockError::XdgDirectory(e.to_string()))
    }
}

/// One instance of each service, wired together.
pub struct Engine {
    storage_dir: PathBuf,
    registry: Arc<TypeRegistry>,
    tracker: Arc<InstanceTracker>,
    resolver: Arc<TemplateResolver>,
    store: Arc<PlanStore>,
    interceptor: Arc<Interceptor>,
}

impl Engine {
    pub fn storage_dir(&self) -> &Path {
        &self.storage_dir
    }

    pub fn registry(&self) -> &Arc<TypeRegistry> {
        &self.registry
    }

    pub fn tracker(&self) -> &Arc<InstanceTracker> {
        &self.tracker
    }

    pub fn resolver(&self) -> &Arc<TemplateResolver> {
        &self.resolver
    }

    pub fn store(&self) -> &Arc<PlanStore> {
        &self.store
    }

    pub fn interceptor(&self) -> &Arc<Interceptor> {
        &self.interceptor
    }
}
