use std::collections::HashMap;

use crate::error::{ContextError, Result};
use crate::structs::context::Context;
use crate::structs::name::{qualify_name, short_name};

/// The contexts of one webhook request/response cycle.
///
/// Records are kept in insertion order: inbound contexts first, in the order
/// the platform sent them, then contexts created by `set`/`delete` in the order
/// they were first touched. Every key is a short (canonical) name.
///
/// Records are never removed. Deleting a context sets its lifespan to zero so
/// the platform deactivates it, while `get` still returns its last state.
#[derive(Clone, Debug)]
pub struct ContextStore {
    session: String,

    /// Live records, in insertion order.
    contexts: Vec<Context>,

    /// Short name -> position in `contexts`.
    index: HashMap<String, usize>,

    /// Inbound records as they were before any mutation.
    input_contexts: Vec<Context>,
}

impl ContextStore {
    /// Builds a store from the platform's active contexts.
    ///
    /// Each inbound name is reduced to its last path segment. When two inbound
    /// records share a short name, the later one replaces the earlier in place.
    pub fn new(input_contexts: impl IntoIterator<Item = Context>, session: impl Into<String>) -> Self {
        let session = session.into();
        let mut contexts: Vec<Context> = Vec::new();
        let mut index = HashMap::new();

        for mut context in input_contexts {
            context.name = short_name(&context.name).to_string();
            match index.get(&context.name) {
                Some(&position) => {
                    tracing::warn!(
                        session = %session,
                        context = %context.name,
                        "ContextStore: duplicate inbound context, keeping the later record"
                    );
                    contexts[position] = context;
                }
                None => {
                    index.insert(context.name.clone(), contexts.len());
                    contexts.push(context);
                }
            }
        }

        tracing::debug!(
            session = %session,
            inbound_count = contexts.len(),
            "ContextStore: created from inbound contexts"
        );

        Self {
            session,
            input_contexts: contexts.clone(),
            contexts,
            index,
        }
    }

    /// A store with no inbound contexts.
    pub fn empty(session: impl Into<String>) -> Self {
        Self::new(Vec::new(), session)
    }

    pub fn session(&self) -> &str {
        &self.session
    }

    /// The inbound contexts, normalized, as they were before any mutation.
    pub fn input_contexts(&self) -> &[Context] {
        &self.input_contexts
    }

    pub fn input_context(&self, name: &str) -> Option<&Context> {
        let name = short_name(name);
        self.input_contexts.iter().find(|context| context.name == name)
    }

    /// Creates or updates a context.
    ///
    /// A missing context is created holding only its name. Then `lifespan_count`
    /// and `parameters` each overwrite the stored field when given; `None`
    /// leaves the field untouched. Parameters are replaced wholesale.
    pub fn set(
        &mut self,
        name: &str,
        lifespan_count: Option<i32>,
        parameters: Option<HashMap<String, serde_json::Value>>,
    ) {
        let name = short_name(name);
        let created = !self.index.contains_key(name);

        tracing::debug!(
            session = %self.session,
            context = %name,
            created,
            lifespan_count = ?lifespan_count,
            has_parameters = parameters.is_some(),
            "ContextStore: set"
        );

        let context = self.entry(name);
        if let Some(count) = lifespan_count {
            context.lifespan_count = Some(count);
        }
        if let Some(params) = parameters {
            context.parameters = Some(params);
        }
    }

    /// `set` for names that arrive as untyped JSON, e.g. from a scripted handler.
    ///
    /// Fails with [`ContextError::InvalidArgument`] unless `name` is a JSON
    /// string; the store is left unchanged on failure.
    pub fn try_set(
        &mut self,
        name: &serde_json::Value,
        lifespan_count: Option<i32>,
        parameters: Option<HashMap<String, serde_json::Value>>,
    ) -> Result<()> {
        let name = Self::name_from_value(name)?;
        self.set(name, lifespan_count, parameters);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Context> {
        self.index
            .get(short_name(name))
            .map(|&position| &self.contexts[position])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(short_name(name))
    }

    /// Deactivates a context by setting its lifespan to 0.
    ///
    /// An unknown name is still recorded, as an already expired context, so the
    /// platform drops it even if it considers it active.
    pub fn delete(&mut self, name: &str) {
        tracing::info!(
            session = %self.session,
            context = %short_name(name),
            "ContextStore: expiring context"
        );
        self.set(name, Some(0), None);
    }

    pub fn try_delete(&mut self, name: &serde_json::Value) -> Result<()> {
        let name = Self::name_from_value(name)?;
        self.delete(name);
        Ok(())
    }

    /// Records in insertion order, with short names.
    pub fn iter(&self) -> std::slice::Iter<'_, Context> {
        self.contexts.iter()
    }

    /// Records whose lifespan has not been set to zero.
    pub fn active(&self) -> impl Iterator<Item = &Context> {
        self.contexts.iter().filter(|context| context.is_active())
    }

    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }

    /// The outbound context list, names qualified as `{session}/contexts/{name}`.
    ///
    /// Works on copies, so the store keeps its short names and the call can be
    /// repeated.
    pub fn output_contexts(&self) -> Vec<Context> {
        let output: Vec<Context> = self
            .contexts
            .iter()
            .map(|context| Context {
                name: qualify_name(&self.session, &context.name),
                ..context.clone()
            })
            .collect();

        tracing::debug!(
            session = %self.session,
            output_count = output.len(),
            "ContextStore: rendered output contexts"
        );

        output
    }

    /// Consuming form of [`output_contexts`](Self::output_contexts).
    pub fn into_output_contexts(self) -> Vec<Context> {
        let session = self.session;
        self.contexts
            .into_iter()
            .map(|mut context| {
                context.name = qualify_name(&session, &context.name);
                context
            })
            .collect()
    }

    fn entry(&mut self, name: &str) -> &mut Context {
        let position = match self.index.get(name) {
            Some(&position) => position,
            None => {
                let position = self.contexts.len();
                self.contexts.push(Context::new(name));
                self.index.insert(name.to_string(), position);
                position
            }
        };
        &mut self.contexts[position]
    }

    fn name_from_value(name: &serde_json::Value) -> Result<&str> {
        name.as_str().ok_or_else(|| {
            tracing::warn!(name = %name, "ContextStore: rejected non-string context name");
            ContextError::InvalidArgument(format!("name argument must be a string, got {name}"))
        })
    }
}

impl<'a> IntoIterator for &'a ContextStore {
    type Item = &'a Context;
    type IntoIter = std::slice::Iter<'a, Context>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
