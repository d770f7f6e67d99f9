//! Permission Request State Tracker
//!
//! Decides, per permission key, whether a batch entry is already
//! satisfied, should be requested directly, or needs an explanatory
//! prompt first, and persists the bookkeeping that makes the same
//! decision correct on a future run.
//!
//! The flow is two-phase: `evaluate` partitions a batch and either
//! dispatches the platform request or defers it behind a rationale
//! prompt; `reconcile` classifies the grant results the platform
//! reports later, separating plain denials from "don't ask again".

use indexmap::IndexSet;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::catalog;
use crate::platform::Platform;
use crate::record::RequestRecord;
use crate::store::RecordStore;

/// Per-key state before a request is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PermissionStatus {
    /// Already granted; nothing to ask.
    Granted,
    /// Denied before, platform still offers a rationale.
    DeniedRetryable,
    /// No rationale offered and no grant; either never asked or
    /// permanently suppressed (the persisted record disambiguates).
    NeverAsked,
}

/// Per-key state after the platform reported results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GrantOutcome {
    Allowed,
    Denied,
    /// Denied with no rationale offered: the user picked "don't ask
    /// again" and only Settings can re-enable the permission.
    DontAskAgain,
}

/// What the caller must do next after `evaluate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Action {
    /// Empty batch; nothing happened.
    Noop,
    /// The platform request was already dispatched.
    Requested,
    /// Show the prompt, then call `proceed` (accept) or `abandon`
    /// (dismiss). The request is on hold until then.
    PromptRationale { message: String },
}

/// Result of evaluating one batch of permission keys.
#[derive(Debug, Clone, Serialize)]
pub struct Decision {
    /// Code passed through to the platform request call.
    pub request_code: u32,
    /// The de-duplicated batch, in input order.
    pub batch: IndexSet<String>,
    /// Already granted; treated as satisfied regardless of records.
    pub satisfied: IndexSet<String>,
    /// Keys to pass to the platform request call.
    pub need_request: IndexSet<String>,
    /// Subset of `need_request` that warrants a prompt first.
    pub need_rationale: IndexSet<String>,
    pub action: Action,
}

/// Grant results classified by permission group.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReconciledOutcome {
    /// Keys the platform granted.
    pub granted: Vec<String>,
    /// Groups denied but still re-askable.
    pub denied_groups: IndexSet<String>,
    /// Groups permanently suppressed; only Settings helps.
    pub dont_ask_groups: IndexSet<String>,
}

impl ReconciledOutcome {
    pub fn is_fully_granted(&self) -> bool {
        self.denied_groups.is_empty() && self.dont_ask_groups.is_empty()
    }

    /// Union of denied and don't-ask groups.
    pub fn all_not_granted(&self) -> IndexSet<String> {
        self.denied_groups
            .iter()
            .chain(self.dont_ask_groups.iter())
            .cloned()
            .collect()
    }

    /// Warning text for the host to show, if anything was denied.
    ///
    /// Plain denials get a one-liner; permanently suppressed groups get
    /// the "re-enable in Settings" message listing each group.
    pub fn warning_message(&self) -> Option<String> {
        if self.is_fully_granted() {
            return None;
        }

        if self.dont_ask_groups.is_empty() {
            return Some("permission(s) were NOT granted".to_string());
        }

        let mut message = String::from("There are disabled Permissions:\n");
        for group in &self.dont_ask_groups {
            message.push('-');
            message.push_str(group);
            message.push('\n');
        }
        message.push_str(
            "\nTo re-enable these permission(s),\nPlease goto the App's Permissions in Settings",
        );
        Some(message)
    }
}

/// The tracker. Owns the platform seam and the record store; both are
/// injected so hosts and tests control every input.
pub struct PermissionTracker<P: Platform, S: RecordStore> {
    platform: P,
    store: S,
}

impl<P: Platform, S: RecordStore> PermissionTracker<P, S> {
    pub fn new(platform: P, store: S) -> Self {
        Self { platform, store }
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Per-key probe before a request (the original pre-request stage).
    pub fn status(&self, key: &str) -> PermissionStatus {
        let granted = self.platform.is_granted(key);
        debug!("checkSelf {} granted: {}", catalog::short_name(key), granted);

        if granted {
            PermissionStatus::Granted
        } else if self.platform.should_show_rationale(key) {
            PermissionStatus::DeniedRetryable
        } else {
            PermissionStatus::NeverAsked
        }
    }

    /// Per-key probe after results arrived (the original post-request stage).
    pub fn outcome(&self, key: &str) -> GrantOutcome {
        if self.platform.is_granted(key) {
            GrantOutcome::Allowed
        } else if self.platform.should_show_rationale(key) {
            GrantOutcome::Denied
        } else {
            GrantOutcome::DontAskAgain
        }
    }

    /// Evaluate a batch of permission keys.
    ///
    /// Decision table, per key (independent of the rest of the batch):
    ///
    /// | granted | rationale | record        | action              | new record |
    /// |---------|-----------|---------------|---------------------|------------|
    /// | true    | -         | -             | satisfied           | unchanged  |
    /// | false   | true      | any           | rationale + request | Seen       |
    /// | false   | false     | First         | rationale + request | Seen       |
    /// | false   | false     | Seen/DontAsk  | request only        | DontAsk    |
    ///
    /// The first-time row exists because the platform reports no
    /// rationale both before the first request and after "don't ask
    /// again"; the persisted record tells the two apart.
    ///
    /// If a prompt is warranted and `rationale_message` was supplied the
    /// platform request is deferred behind [`Action::PromptRationale`];
    /// otherwise it is dispatched before this method returns. Empty and
    /// duplicate keys are skipped; an empty batch is a no-op.
    pub fn evaluate<K: AsRef<str>>(
        &mut self,
        permissions: &[K],
        request_code: u32,
        rationale_message: Option<&str>,
    ) -> Decision {
        debug!("evaluating batch x{}", permissions.len());

        let mut decision = Decision {
            request_code,
            batch: IndexSet::new(),
            satisfied: IndexSet::new(),
            need_request: IndexSet::new(),
            need_rationale: IndexSet::new(),
            action: Action::Noop,
        };

        for key in permissions {
            let key = key.as_ref();
            if key.is_empty() || !decision.batch.insert(key.to_string()) {
                continue;
            }

            if self.platform.is_granted(key) {
                info!("{} already granted", catalog::short_name(key));
                decision.satisfied.insert(key.to_string());
                continue;
            }

            decision.need_request.insert(key.to_string());

            let rationale = self.platform.should_show_rationale(key);
            let record = self.store.get(key);
            debug!(
                "{}: rationale {}, record {}",
                catalog::short_name(key),
                rationale,
                record.as_str()
            );

            if rationale || record == RequestRecord::First {
                decision.need_rationale.insert(key.to_string());
                self.store.put(key, RequestRecord::Seen);
            } else {
                // no rationale despite a prior request: don't ask again
                self.store.put(key, RequestRecord::DontAsk);
            }
        }

        if let Err(e) = self.store.flush() {
            warn!("record store flush failed: {}", e);
        }

        debug!(
            "check >> p{}/r{}",
            decision.need_request.len(),
            decision.need_rationale.len()
        );

        decision.action = match rationale_message {
            _ if decision.batch.is_empty() => Action::Noop,
            Some(message) if !message.is_empty() && !decision.need_rationale.is_empty() => {
                Action::PromptRationale {
                    message: message.to_string(),
                }
            }
            _ => {
                self.dispatch(&decision);
                Action::Requested
            }
        };

        decision
    }

    /// The user accepted the rationale prompt; dispatch the held request.
    pub fn proceed(&mut self, decision: &Decision) {
        match &decision.action {
            Action::PromptRationale { .. } => self.dispatch(decision),
            Action::Requested => warn!("proceed called on an already dispatched batch"),
            Action::Noop => debug!("proceed on empty batch, nothing to do"),
        }
    }

    /// The user dismissed the rationale prompt; the batch is dropped.
    pub fn abandon(&self, decision: &Decision) {
        info!(
            "request abandoned for x{} permission(s)",
            decision.need_request.len()
        );
    }

    fn dispatch(&mut self, decision: &Decision) {
        // A fully granted batch still goes through the request call so
        // the host's result callback fires uniformly.
        let keys: Vec<String> = if decision.need_request.is_empty() {
            decision.batch.iter().cloned().collect()
        } else {
            decision.need_request.iter().cloned().collect()
        };

        if keys.is_empty() {
            return;
        }

        debug!("requesting x{} code {}", keys.len(), decision.request_code);
        self.platform.request(&keys, decision.request_code);
    }

    /// Classify the grant results the platform reported.
    ///
    /// For each denied key the rationale probe is re-run: no rationale
    /// after a request means "don't ask again". Classification is by
    /// permission group so the host can disable features and warn per
    /// group rather than per key. Returns `None` for empty input or a
    /// permissions/results length mismatch (caller bug; logged, and the
    /// step is skipped rather than producing a garbled classification).
    pub fn reconcile<K: AsRef<str>>(
        &self,
        permissions: &[K],
        results: &[bool],
    ) -> Option<ReconciledOutcome> {
        if permissions.is_empty() && results.is_empty() {
            debug!("reconcile on empty results, nothing to do");
            return None;
        }
        if permissions.len() != results.len() {
            warn!(
                "reconcile permissions x{} != results x{}",
                permissions.len(),
                results.len()
            );
            return None;
        }

        let mut outcome = ReconciledOutcome::default();

        for (key, &granted) in permissions.iter().zip(results) {
            let key = key.as_ref();
            if granted {
                info!(" GRANT: {}", key);
                outcome.granted.push(key.to_string());
                continue;
            }

            let group = self.group_for(key);
            if self.platform.should_show_rationale(key) {
                info!(" DENY: {}, {}", key, group);
                outcome.denied_groups.insert(group);
            } else {
                info!(" DONT: {}, {}", key, group);
                outcome.dont_ask_groups.insert(group);
            }
        }

        Some(outcome)
    }

    /// Group label for a key: platform metadata, then the built-in
    /// catalog, then the raw key as its own group.
    fn group_for(&self, key: &str) -> String {
        if let Some(group) = self.platform.permission_group(key) {
            return group;
        }
        if let Some(group) = catalog::group_label(key) {
            return group.to_string();
        }
        debug!("no group metadata for {}, using the key itself", key);
        key.to_string()
    }
}
