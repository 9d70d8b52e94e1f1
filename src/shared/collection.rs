//! Collection domain
//!
//! A collection is a curated sequence of explorations. Learners move through
//! it by completing explorations, each of which can require skills and grant
//! skills. Edits arrive as a list of `cmd`-tagged change operations and are
//! applied in order.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

use crate::shared::error::SharedError;

/// One exploration within a collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionNode {
    pub exploration_id: String,
    #[serde(default)]
    pub prerequisite_skills: Vec<String>,
    #[serde(default)]
    pub acquired_skills: Vec<String>,
}

impl CollectionNode {
    pub fn new(exploration_id: impl Into<String>) -> Self {
        Self {
            exploration_id: exploration_id.into(),
            prerequisite_skills: Vec::new(),
            acquired_skills: Vec::new(),
        }
    }
}

/// The editable resource
///
/// `version` starts at 1 for a freshly created collection and is bumped
/// exactly once per committed update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub objective: String,
    #[serde(default = "initial_version")]
    pub version: u64,
    #[serde(default)]
    pub nodes: Vec<CollectionNode>,
}

fn initial_version() -> u64 {
    1
}

/// A single change operation in an edit request's change list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum CollectionChange {
    EditCollectionProperty {
        property_name: String,
        new_value: Value,
    },
    AddCollectionNode {
        exploration_id: String,
    },
    DeleteCollectionNode {
        exploration_id: String,
    },
    EditCollectionNodeProperty {
        exploration_id: String,
        property_name: String,
        new_value: Value,
    },
}

impl CollectionChange {
    /// Parse one raw change-list entry
    ///
    /// Malformed entries (unknown `cmd`, missing fields) are reported as
    /// validation errors, since they come straight from the client.
    pub fn from_value(value: &Value) -> Result<Self, SharedError> {
        serde_json::from_value(value.clone()).map_err(|e| {
            SharedError::validation("change_list", format!("Invalid change {}: {}", value, e))
        })
    }

    /// Parse a whole change list, failing on the first malformed entry
    pub fn parse_list(values: &[Value]) -> Result<Vec<Self>, SharedError> {
        values.iter().map(Self::from_value).collect()
    }
}

impl Collection {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            category: String::new(),
            objective: String::new(),
            version: initial_version(),
            nodes: Vec::new(),
        }
    }

    pub fn node(&self, exploration_id: &str) -> Option<&CollectionNode> {
        self.nodes.iter().find(|n| n.exploration_id == exploration_id)
    }

    pub fn exploration_ids(&self) -> Vec<String> {
        self.nodes.iter().map(|n| n.exploration_id.clone()).collect()
    }

    /// Apply one change in place. Does not touch `version`.
    pub fn apply_change(&mut self, change: &CollectionChange) -> Result<(), SharedError> {
        match change {
            CollectionChange::EditCollectionProperty {
                property_name,
                new_value,
            } => {
                let value = expect_string(property_name, new_value)?;
                match property_name.as_str() {
                    "title" => self.title = value,
                    "category" => self.category = value,
                    "objective" => self.objective = value,
                    other => {
                        return Err(SharedError::validation(
                            "property_name",
                            format!("Unrecognized collection property: {}", other),
                        ))
                    }
                }
            }
            CollectionChange::AddCollectionNode { exploration_id } => {
                if exploration_id.trim().is_empty() {
                    return Err(SharedError::validation(
                        "exploration_id",
                        "Expected a non-empty exploration id",
                    ));
                }
                if self.node(exploration_id).is_some() {
                    return Err(SharedError::validation(
                        "exploration_id",
                        format!("Exploration {} is already part of this collection", exploration_id),
                    ));
                }
                self.nodes.push(CollectionNode::new(exploration_id.clone()));
            }
            CollectionChange::DeleteCollectionNode { exploration_id } => {
                let position = self
                    .nodes
                    .iter()
                    .position(|n| &n.exploration_id == exploration_id)
                    .ok_or_else(|| missing_node(exploration_id))?;
                self.nodes.remove(position);
            }
            CollectionChange::EditCollectionNodeProperty {
                exploration_id,
                property_name,
                new_value,
            } => {
                let skills = expect_string_list(property_name, new_value)?;
                let node = self
                    .nodes
                    .iter_mut()
                    .find(|n| &n.exploration_id == exploration_id)
                    .ok_or_else(|| missing_node(exploration_id))?;
                match property_name.as_str() {
                    "prerequisite_skills" => node.prerequisite_skills = skills,
                    "acquired_skills" => node.acquired_skills = skills,
                    other => {
                        return Err(SharedError::validation(
                            "property_name",
                            format!("Unrecognized collection node property: {}", other),
                        ))
                    }
                }
            }
        }
        Ok(())
    }

    /// Check structural invariants after a batch of changes
    pub fn validate(&self) -> Result<(), SharedError> {
        if self.id.trim().is_empty() {
            return Err(SharedError::validation("id", "Expected a non-empty collection id"));
        }
        let mut seen = HashSet::new();
        for node in &self.nodes {
            if !seen.insert(node.exploration_id.as_str()) {
                return Err(SharedError::validation(
                    "nodes",
                    format!("Duplicate exploration in collection: {}", node.exploration_id),
                ));
            }
            ensure_unique_skills(&node.exploration_id, "prerequisite_skills", &node.prerequisite_skills)?;
            ensure_unique_skills(&node.exploration_id, "acquired_skills", &node.acquired_skills)?;
        }
        Ok(())
    }

    /// Explorations a learner may play next
    ///
    /// A node is available once every one of its prerequisite skills has been
    /// acquired by some completed node. Completed nodes are never offered.
    pub fn next_exploration_ids(&self, completed: &[String]) -> Vec<String> {
        let acquired: HashSet<&str> = self
            .nodes
            .iter()
            .filter(|n| completed.contains(&n.exploration_id))
            .flat_map(|n| n.acquired_skills.iter().map(String::as_str))
            .collect();

        self.nodes
            .iter()
            .filter(|n| !completed.contains(&n.exploration_id))
            .filter(|n| {
                n.prerequisite_skills
                    .iter()
                    .all(|skill| acquired.contains(skill.as_str()))
            })
            .map(|n| n.exploration_id.clone())
            .collect()
    }
}

fn missing_node(exploration_id: &str) -> SharedError {
    SharedError::validation(
        "exploration_id",
        format!("Exploration {} is not part of this collection", exploration_id),
    )
}

fn expect_string(property_name: &str, value: &Value) -> Result<String, SharedError> {
    value.as_str().map(str::to_owned).ok_or_else(|| {
        SharedError::validation(
            property_name,
            format!("Expected {} to be a string, received {}", property_name, value),
        )
    })
}

fn expect_string_list(property_name: &str, value: &Value) -> Result<Vec<String>, SharedError> {
    let invalid = || {
        SharedError::validation(
            property_name,
            format!("Expected {} to be a list of strings, received {}", property_name, value),
        )
    };
    value
        .as_array()
        .ok_or_else(invalid)?
        .iter()
        .map(|v| v.as_str().map(str::to_owned).ok_or_else(invalid))
        .collect()
}

fn ensure_unique_skills(exploration_id: &str, field: &str, skills: &[String]) -> Result<(), SharedError> {
    let mut seen = HashSet::new();
    for skill in skills {
        if !seen.insert(skill.as_str()) {
            return Err(SharedError::validation(
                field,
                format!("Duplicate skill {} in {} of exploration {}", skill, field, exploration_id),
            ));
        }
    }
    Ok(())
}
