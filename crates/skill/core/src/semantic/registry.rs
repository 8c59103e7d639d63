//! Shared, hot-reloadable view over the action ontology and rule set.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, warn};

use crate::error::DocumentError;

use super::document::RegistryDocument;
use super::info::ActionSemanticInfo;
use super::rule::{CombinationRule, CombinationRuleKind};
use super::source::{BuiltinSource, DocumentSource};

/// Immutable, fully-indexed view of one registry document.
///
/// Snapshots are built off to the side and published whole, so readers never
/// observe a half-rebuilt index during a reload.
#[derive(Debug)]
pub struct RegistrySnapshot {
    document: RegistryDocument,
    actions: HashMap<String, ActionSemanticInfo>,
    action_order: Vec<String>,
    rules: HashMap<String, CombinationRule>,
    rule_order: Vec<String>,
}

impl RegistrySnapshot {
    fn empty() -> Self {
        Self {
            document: RegistryDocument::new(),
            actions: HashMap::new(),
            action_order: Vec::new(),
            rules: HashMap::new(),
            rule_order: Vec::new(),
        }
    }

    /// Indexes a document. Duplicate action types or rule names are a
    /// malformed configuration, not a last-one-wins merge.
    pub fn build(document: RegistryDocument) -> Result<Self, DocumentError> {
        let mut actions = HashMap::with_capacity(document.actions.len());
        let mut action_order = Vec::with_capacity(document.actions.len());
        for info in &document.actions {
            if actions
                .insert(info.action_type.clone(), info.clone())
                .is_some()
            {
                return Err(DocumentError::Duplicate {
                    kind: "action",
                    name: info.action_type.clone(),
                });
            }
            action_order.push(info.action_type.clone());
        }

        let mut rules = HashMap::with_capacity(document.rules.len());
        let mut rule_order = Vec::with_capacity(document.rules.len());
        for rule in &document.rules {
            if rules.insert(rule.rule_name.clone(), rule.clone()).is_some() {
                return Err(DocumentError::Duplicate {
                    kind: "rule",
                    name: rule.rule_name.clone(),
                });
            }
            rule_order.push(rule.rule_name.clone());
        }

        Ok(Self {
            document,
            actions,
            action_order,
            rules,
            rule_order,
        })
    }

    pub fn info(&self, action_type: &str) -> Option<&ActionSemanticInfo> {
        self.actions.get(action_type)
    }

    /// Enabled rules in document order. Disabled rules are invisible to every
    /// query on purpose.
    pub fn enabled_rules(&self) -> impl Iterator<Item = &CombinationRule> {
        self.rule_order
            .iter()
            .filter_map(|name| self.rules.get(name))
            .filter(|rule| rule.enabled)
    }

    pub fn rules_of_kind(&self, kind: CombinationRuleKind) -> Vec<&CombinationRule> {
        self.enabled_rules()
            .filter(|rule| rule.kind == kind)
            .collect()
    }

    pub fn rules_for_action(&self, action_type: &str) -> Vec<&CombinationRule> {
        self.enabled_rules()
            .filter(|rule| rule.involves(action_type))
            .collect()
    }

    /// Action types in document order.
    pub fn action_types(&self) -> &[String] {
        &self.action_order
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn version(&self) -> &str {
        &self.document.version
    }

    pub fn document(&self) -> &RegistryDocument {
        &self.document
    }
}

/// The ontology owner: loads a document from its source, indexes it, and
/// serves shared snapshots to the validator, scorer, and advisor.
pub struct SemanticRegistry {
    source: Box<dyn DocumentSource>,
    snapshot: RwLock<Arc<RegistrySnapshot>>,
}

impl SemanticRegistry {
    /// Opens a registry over the given source.
    ///
    /// A source that fails at this first load (missing file, malformed
    /// document) bootstraps the builtin default set instead of failing, so an
    /// advisor always starts in a usable state. Later `reload` calls are
    /// strict.
    pub fn open(source: impl DocumentSource + 'static) -> Self {
        Self::open_boxed(Box::new(source))
    }

    /// `open` for an already-boxed source.
    pub fn open_boxed(source: Box<dyn DocumentSource>) -> Self {
        let snapshot = match source.load().and_then(RegistrySnapshot::build) {
            Ok(snapshot) => {
                debug!(
                    source = %source.describe(),
                    actions = snapshot.len(),
                    "semantic registry loaded"
                );
                snapshot
            }
            Err(error) => {
                warn!(
                    source = %source.describe(),
                    %error,
                    "registry document unavailable, bootstrapping builtin defaults"
                );
                // The builtin document has no duplicate keys.
                RegistrySnapshot::build(RegistryDocument::builtin())
                    .unwrap_or_else(|_| RegistrySnapshot::empty())
            }
        };

        Self {
            source,
            snapshot: RwLock::new(Arc::new(snapshot)),
        }
    }

    /// Registry over the compiled-in default document.
    pub fn with_builtin() -> Self {
        Self::open(BuiltinSource)
    }

    /// Cheap shared handle to the current snapshot.
    ///
    /// The snapshot behind the `Arc` is immutable, so a poisoned lock cannot
    /// hide a torn write; recovery is safe.
    pub fn snapshot(&self) -> Arc<RegistrySnapshot> {
        self.snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn info(&self, action_type: &str) -> Option<ActionSemanticInfo> {
        self.snapshot().info(action_type).cloned()
    }

    /// Curated ranking weight for a type; unknown types sit at the neutral 1.0.
    pub fn business_priority(&self, action_type: &str) -> f32 {
        self.snapshot()
            .info(action_type)
            .map(|info| info.business_priority)
            .unwrap_or(1.0)
    }

    pub fn version(&self) -> String {
        self.snapshot().version().to_string()
    }

    /// Re-reads the document from the source and publishes a new snapshot.
    ///
    /// The new snapshot is built completely before the swap; when the source
    /// yields a broken document the live snapshot stays untouched and the
    /// error is returned to the caller.
    pub fn reload(&self) -> Result<(), DocumentError> {
        let rebuilt = match self.source.load().and_then(RegistrySnapshot::build) {
            Ok(snapshot) => snapshot,
            Err(error) => {
                warn!(
                    source = %self.source.describe(),
                    %error,
                    "registry reload rejected, keeping previous snapshot"
                );
                return Err(error);
            }
        };

        let mut guard = self
            .snapshot
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(rebuilt);
        debug!(source = %self.source.describe(), "semantic registry reloaded");
        Ok(())
    }

    /// Export of the live document, suitable for editing and saving.
    pub fn document(&self) -> RegistryDocument {
        self.snapshot().document().clone()
    }

    /// Writes the live document to `path` as pretty JSON, refreshing its
    /// modification stamp. Loading the written file yields the same registry.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), DocumentError> {
        let path = path.as_ref();
        let mut document = self.document();
        document.touch();

        let json = document
            .to_json_string()
            .map_err(|source| DocumentError::Serialize { source })?;

        std::fs::write(path, json).map_err(|source| DocumentError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl std::fmt::Debug for SemanticRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SemanticRegistry")
            .field("source", &self.source.describe())
            .field("snapshot", &self.snapshot)
            .finish()
    }
}
