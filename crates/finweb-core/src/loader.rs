//! Dependent select loading
//!
//! A parent selection (category) drives the options of a child select
//! (subcategory). Each call to [`DependentSelectLoader::load`] is one
//! best-effort fetch:
//!
//! - empty parent: no request, "choose a parent first" placeholder
//! - otherwise: loading placeholder, one request, then either the fetched
//!   options or an error placeholder plus a notification
//!
//! Overlapping loads on the same control are resolved by [`RacePolicy`].

use crate::control::{SelectControl, SelectTarget};
use crate::error::{DefaultErrorLogger, ErrorContext, ErrorLogger, LoadError};
use crate::notify::Notifier;
use crate::source::OptionSource;
use crate::types::{LoadState, OptionId, ParentSelection, SelectOption, Severity};
use finweb_config::{Config, LabelsConfig, RacePolicy};

/// Result of a single load
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// No parent was selected; nothing was requested
    Unselected,
    /// Options were displayed
    Loaded {
        options: Vec<SelectOption>,
        selected: Option<OptionId>,
    },
    /// The request failed and the error placeholder was displayed
    Failed(LoadError),
    /// A newer request owns the control; this response was dropped
    Superseded,
}

impl LoadOutcome {
    /// State the control was left in, `None` when nothing was written
    pub fn state(&self) -> Option<LoadState> {
        match self {
            LoadOutcome::Unselected => Some(LoadState::Idle),
            LoadOutcome::Loaded { .. } => Some(LoadState::Loaded),
            LoadOutcome::Failed(_) => Some(LoadState::Failed),
            LoadOutcome::Superseded => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadOutcome::Loaded { .. })
    }
}

/// Loads child options into a select whenever the parent changes
pub struct DependentSelectLoader<S, N> {
    source: S,
    notifier: N,
    labels: LabelsConfig,
    race_policy: RacePolicy,
    disable_on_error: bool,
    logger: Box<dyn ErrorLogger>,
}

impl<S: OptionSource, N: Notifier> DependentSelectLoader<S, N> {
    pub fn new(source: S, notifier: N) -> Self {
        Self {
            source,
            notifier,
            labels: LabelsConfig::default(),
            race_policy: RacePolicy::default(),
            disable_on_error: false,
            logger: Box::new(DefaultErrorLogger),
        }
    }

    /// Build a loader with labels and policy taken from the configuration
    pub fn from_config(source: S, notifier: N, config: &Config) -> Self {
        Self::new(source, notifier)
            .with_labels(config.labels.clone())
            .with_race_policy(config.loader.race_policy)
            .with_disable_on_error(config.loader.disable_on_error)
    }

    pub fn with_labels(mut self, labels: LabelsConfig) -> Self {
        self.labels = labels;
        self
    }

    pub fn with_race_policy(mut self, race_policy: RacePolicy) -> Self {
        self.race_policy = race_policy;
        self
    }

    pub fn with_disable_on_error(mut self, disable_on_error: bool) -> Self {
        self.disable_on_error = disable_on_error;
        self
    }

    pub fn with_error_logger(mut self, logger: Box<dyn ErrorLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn race_policy(&self) -> RacePolicy {
        self.race_policy
    }

    /// Replace the options of `target` with the children of `parent`
    ///
    /// Never returns an error: every failure is rendered into the control
    /// and reported in the outcome.
    pub async fn load<C: SelectControl>(
        &self,
        target: &SelectTarget<C>,
        parent: &ParentSelection,
        preselect: Option<&OptionId>,
    ) -> LoadOutcome {
        let seq = target.issue();
        let context = ErrorContext::new("load_subcategories".to_string())
            .with_request_id(format!("seq-{}", seq));

        let parent_id = match parent.id() {
            Ok(id) => id,
            Err(_) => {
                let written = self.write(target, seq, LoadState::Idle, |control| {
                    control.clear_options();
                    control.append_option("", &self.labels.choose_parent, false);
                    control.set_disabled(false);
                });
                return if written {
                    LoadOutcome::Unselected
                } else {
                    LoadOutcome::Superseded
                };
            }
        };
        let context = context.with_data("parent_id", serde_json::json!(parent_id));

        target.update(LoadState::Loading, |control| {
            control.set_disabled(true);
            control.clear_options();
            control.append_option("", &self.labels.loading, false);
        });
        self.logger.log_debug(&format!("requesting children of {}", parent_id), &context);

        let result = self.source.fetch(parent_id).await;

        match result {
            Ok(options) => {
                let selected = preselect
                    .and_then(|id| options.iter().find(|o| &o.id == id))
                    .map(|o| o.id.clone());

                let written = self.write(target, seq, LoadState::Loaded, |control| {
                    control.clear_options();
                    control.append_option("", &self.labels.select, false);
                    for option in &options {
                        let is_selected = selected.as_ref() == Some(&option.id);
                        control.append_option(option.id.as_str(), &option.label, is_selected);
                    }
                    control.set_disabled(false);
                });
                if !written {
                    self.logger.log_debug("response superseded by a newer request", &context);
                    return LoadOutcome::Superseded;
                }

                log::info!(
                    "Loaded {} option(s) for parent {} (selected: {:?})",
                    options.len(),
                    parent_id,
                    selected.as_ref().map(OptionId::as_str)
                );
                LoadOutcome::Loaded { options, selected }
            }
            Err(error) => {
                let written = self.write(target, seq, LoadState::Failed, |control| {
                    control.clear_options();
                    control.append_option("", &self.labels.error, false);
                    control.set_disabled(self.disable_on_error);
                });
                if !written {
                    self.logger.log_debug("failure superseded by a newer request", &context);
                    return LoadOutcome::Superseded;
                }

                self.logger.log_error(&error, &context);
                if error.notifies() {
                    self.notifier.notify(&self.labels.error_notification, Severity::Error);
                }
                LoadOutcome::Failed(error)
            }
        }
    }

    /// Apply a final update unless the race policy says this request is stale
    fn write<C: SelectControl>(
        &self,
        target: &SelectTarget<C>,
        seq: u64,
        state: LoadState,
        f: impl FnOnce(&mut C),
    ) -> bool {
        match self.race_policy {
            RacePolicy::LastArrival => {
                target.update(state, f);
                true
            }
            RacePolicy::LatestIssued => target.update_if_current(seq, state, f),
        }
    }
}
