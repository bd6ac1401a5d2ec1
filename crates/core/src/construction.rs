//! Batched element creation.
//!
//! A [`Construction`] lists the nodes, links and connectors to create in one
//! atomic store call. Items may be aliased so that a later connector can use
//! an element created earlier in the same batch as an endpoint; this is how a
//! membership arc and the relation arc tagging it are created together.

use std::collections::HashMap;

use crate::error::{SemError, SemResult};
use crate::types::{ElementType, Handle};

/// Endpoint of a connector in a construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// An element that already exists.
    Handle(Handle),
    /// An element created earlier in the same construction.
    Alias(String),
}

impl From<Handle> for Endpoint {
    fn from(handle: Handle) -> Self {
        Endpoint::Handle(handle)
    }
}

impl From<&str> for Endpoint {
    fn from(alias: &str) -> Self {
        Endpoint::Alias(alias.to_string())
    }
}

/// One element to create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstructionItem {
    Node {
        element_type: ElementType,
    },
    Link {
        element_type: ElementType,
        content: String,
    },
    Connector {
        element_type: ElementType,
        source: Endpoint,
        target: Endpoint,
    },
}

/// Ordered batch of elements to create atomically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Construction {
    items: Vec<(ConstructionItem, Option<String>)>,
}

impl Construction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generate_node(&mut self, element_type: ElementType) -> &mut Self {
        self.push(ConstructionItem::Node { element_type }, None)
    }

    pub fn generate_node_as(
        &mut self,
        element_type: ElementType,
        alias: impl Into<String>,
    ) -> &mut Self {
        self.push(ConstructionItem::Node { element_type }, Some(alias.into()))
    }

    pub fn generate_link(
        &mut self,
        element_type: ElementType,
        content: impl Into<String>,
    ) -> &mut Self {
        self.push(
            ConstructionItem::Link {
                element_type,
                content: content.into(),
            },
            None,
        )
    }

    pub fn generate_connector(
        &mut self,
        element_type: ElementType,
        source: impl Into<Endpoint>,
        target: impl Into<Endpoint>,
    ) -> &mut Self {
        self.push(
            ConstructionItem::Connector {
                element_type,
                source: source.into(),
                target: target.into(),
            },
            None,
        )
    }

    pub fn generate_connector_as(
        &mut self,
        element_type: ElementType,
        source: impl Into<Endpoint>,
        target: impl Into<Endpoint>,
        alias: impl Into<String>,
    ) -> &mut Self {
        self.push(
            ConstructionItem::Connector {
                element_type,
                source: source.into(),
                target: target.into(),
            },
            Some(alias.into()),
        )
    }

    fn push(&mut self, item: ConstructionItem, alias: Option<String>) -> &mut Self {
        self.items.push((item, alias));
        self
    }

    /// Items in creation order, each with its optional alias.
    pub fn items(&self) -> impl Iterator<Item = (&ConstructionItem, Option<&str>)> {
        self.items.iter().map(|(item, alias)| (item, alias.as_deref()))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Check aliases and return alias → item index.
    ///
    /// Aliases must be unique, and a connector endpoint alias must name an
    /// item that comes before the connector.
    pub fn validate(&self) -> SemResult<HashMap<String, usize>> {
        let mut aliases: HashMap<String, usize> = HashMap::new();
        for (index, (item, alias)) in self.items.iter().enumerate() {
            if let ConstructionItem::Connector { source, target, .. } = item {
                for endpoint in [source, target] {
                    if let Endpoint::Alias(name) = endpoint {
                        if !aliases.contains_key(name) {
                            return Err(SemError::invalid_input(format!(
                                "Construction endpoint alias '{}' is not defined by an earlier item",
                                name
                            )));
                        }
                    }
                }
            }
            if let Some(name) = alias {
                if aliases.insert(name.clone(), index).is_some() {
                    return Err(SemError::invalid_input(format!(
                        "Construction alias '{}' is defined twice",
                        name
                    )));
                }
            }
        }
        Ok(aliases)
    }
}
