#![deny(missing_docs)]

//! # Description Index
//!
//! The four-level hierarchy (Topic → Operation → Scenario → Request) built in one
//! pass over an expanded Swagger document.
//!
//! Storage is keyed by identifier in unordered maps; every enumeration sorts before
//! returning. Children keep an explicit link to their parent id, so identifiers that
//! contain dots (derived ids such as `/pets/{id}.get`) never need to be split.

use crate::error::{AppError, AppResult};
use crate::swagger::naming::{operation_id, request_id, scenario_id, ScenarioKey};
use crate::swagger::shims::{ShimOperation, ShimParameter, ShimPaths, ShimResponse};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

/// Swagger 2.0 documents one request per scenario.
const REQUESTS_PER_SCENARIO: usize = 1;

/// An indexed method + path pair.
#[derive(Debug, Clone)]
pub(crate) struct OperationEntry {
    /// Uppercase HTTP method.
    pub method: String,
    /// Path template as declared.
    pub path: String,
    /// The operation as declared.
    pub operation: ShimOperation,
    /// Path-level parameters merged with (and overridden by) operation parameters.
    pub parameters: Vec<ShimParameter>,
}

/// An indexed response outcome.
#[derive(Debug, Clone)]
pub(crate) struct ScenarioEntry {
    pub operation_id: String,
    pub key: ScenarioKey,
    pub response: ShimResponse,
}

/// The populated hierarchy. Immutable once [`DescriptionIndex::populate`] returns.
#[derive(Debug, Default)]
pub struct DescriptionIndex {
    topics: HashSet<String>,
    operations: HashMap<String, OperationEntry>,
    scenarios: HashMap<String, ScenarioEntry>,
    // request id -> scenario id
    requests: HashMap<String, String>,
}

impl DescriptionIndex {
    /// Builds the hierarchy from expanded path items.
    ///
    /// Fails with `DuplicateOperationId` when two method + path pairs resolve to the same
    /// operation identifier; nothing is returned in that case.
    pub fn populate(paths: &ShimPaths) -> AppResult<Self> {
        let mut index = Self::default();

        for (path, item) in &paths.items {
            index.topics.insert(path.clone());

            for (method, op) in item.operations() {
                let id = operation_id(op.operation_id.as_deref(), method, path);
                let method = method.to_uppercase();

                if let Some(existing) = index.operations.get(&id) {
                    return Err(AppError::DuplicateOperationId {
                        first: format!("{} {}", existing.method, existing.path),
                        second: format!("{} {}", method, path),
                        id,
                    });
                }

                index.add_scenarios(&id, op);
                debug!(operation = %id, %method, %path, "indexed operation");

                index.operations.insert(
                    id,
                    OperationEntry {
                        method,
                        path: path.clone(),
                        operation: op.clone(),
                        parameters: merge_parameters(&item.parameters, &op.parameters),
                    },
                );
            }
        }

        info!(
            topics = index.topics.len(),
            operations = index.operations.len(),
            scenarios = index.scenarios.len(),
            requests = index.requests.len(),
            "description index populated"
        );
        Ok(index)
    }

    fn add_scenarios(&mut self, op_id: &str, op: &ShimOperation) {
        let responses = &op.responses;

        let explicit = responses.codes.iter().filter_map(|(raw, response)| {
            let key = ScenarioKey::parse(raw);
            if key.is_none() {
                debug!(operation = %op_id, key = %raw, "skipping non status-code response key");
            }
            key.map(|k| (k, response))
        });
        let default = responses
            .default
            .as_ref()
            .map(|response| (ScenarioKey::Default, response));

        for (key, response) in default.into_iter().chain(explicit) {
            let sc_id = scenario_id(op_id, key);
            for ordinal in 0..REQUESTS_PER_SCENARIO {
                self.requests
                    .insert(request_id(&sc_id, ordinal), sc_id.clone());
            }
            self.scenarios.insert(
                sc_id,
                ScenarioEntry {
                    operation_id: op_id.to_string(),
                    key,
                    response: response.clone(),
                },
            );
        }
    }

    /// All path templates.
    pub fn topics(&self) -> Vec<String> {
        sorted(self.topics.iter().cloned())
    }

    /// Operations declared on `topic`, or all of them when `topic` is empty.
    pub fn operations(&self, topic: &str) -> Vec<String> {
        sorted(
            self.operations
                .iter()
                .filter(|(_, op)| topic.is_empty() || op.path == topic)
                .map(|(id, _)| id.clone()),
        )
    }

    /// Scenarios of `operation`, or all of them when `operation` is empty.
    pub fn scenarios(&self, operation: &str) -> Vec<String> {
        sorted(
            self.scenarios
                .iter()
                .filter(|(_, sc)| operation.is_empty() || sc.operation_id == operation)
                .map(|(id, _)| id.clone()),
        )
    }

    /// Requests of `scenario`, or all of them when `scenario` is empty.
    pub fn requests(&self, scenario: &str) -> Vec<String> {
        sorted(
            self.requests
                .iter()
                .filter(|(_, sc)| scenario.is_empty() || sc.as_str() == scenario)
                .map(|(id, _)| id.clone()),
        )
    }

    /// Resolves a request id to its owning operation and scenario.
    pub(crate) fn resolve_request(
        &self,
        id: &str,
    ) -> AppResult<(&OperationEntry, &ScenarioEntry)> {
        let scenario = self
            .requests
            .get(id)
            .and_then(|sc_id| self.scenarios.get(sc_id))
            .ok_or_else(|| AppError::unknown_request(id))?;
        let operation = self
            .operations
            .get(&scenario.operation_id)
            .ok_or_else(|| AppError::unknown_request(id))?;
        Ok((operation, scenario))
    }
}

fn merge_parameters(shared: &[ShimParameter], own: &[ShimParameter]) -> Vec<ShimParameter> {
    let mut merged: Vec<ShimParameter> = shared
        .iter()
        .filter(|p| {
            !own.iter()
                .any(|o| o.name == p.name && o.location == p.location)
        })
        .cloned()
        .collect();
    merged.extend(own.iter().cloned());
    merged
}

fn sorted(ids: impl Iterator<Item = String>) -> Vec<String> {
    let mut out: Vec<String> = ids.collect();
    out.sort();
    out
}
