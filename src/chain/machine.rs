//! The argument chain value
//!
//! A [`ToulminChain`] is immutable. `submit` builds the successor chain and
//! returns it; a rejected submission returns an error and the caller still
//! holds the previous chain unchanged.

use chrono::{DateTime, Utc};
use serde_json::{json, Map, Value};
use uuid::Uuid;

use crate::breaker::{BreakerPolicy, CircuitBreaker};
use crate::components::{
    Backing, Claim, Component, ComponentKind, Data, Qualifier, Rebuttal, Verdict, Vocabulary,
    Warrant,
};
use crate::error::{ToulminError, ToulminResult, ValidationDetails};

use super::render;
use super::state::{dependency_error, ChainSlots, ChainState};

/// Minimum characters in a chain's query, after trimming
pub const QUERY_MIN_CHARS: usize = 10;

/// A Toulmin argument chain for one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToulminChain {
    id: Uuid,
    query: String,
    state: ChainState,
    breaker: CircuitBreaker,
    created_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl ToulminChain {
    /// Creates an empty chain.
    ///
    /// # Errors
    ///
    /// ShapeError on field `query` when it has fewer than
    /// [`QUERY_MIN_CHARS`] characters after trimming.
    pub fn new(query: impl Into<String>, policy: BreakerPolicy) -> ToulminResult<Self> {
        let query = validate_query(query.into())?;
        Ok(Self {
            id: Uuid::new_v4(),
            query,
            state: ChainState::Empty,
            breaker: CircuitBreaker::new(policy),
            created_at: Utc::now(),
            completed_at: None,
        })
    }

    /// Builds a chain from already-validated components in one step.
    ///
    /// Dependencies are checked and every breaker is run.
    pub fn from_parts(
        query: impl Into<String>,
        policy: BreakerPolicy,
        slots: ChainSlots,
    ) -> ToulminResult<Self> {
        let mut chain = Self::new(query, policy)?;
        chain.state = ChainState::from_slots(slots)?;
        chain.run_logic_checks()?;
        if chain.is_complete() {
            chain.completed_at = Some(Utc::now());
        }
        Ok(chain)
    }

    /// Returns this chain under a different policy, re-running every breaker.
    pub fn with_policy(&self, policy: BreakerPolicy) -> ToulminResult<Self> {
        let next = Self {
            breaker: CircuitBreaker::new(policy),
            ..self.clone()
        };
        next.run_logic_checks()?;
        Ok(next)
    }

    /// Accepts `component` into its slot, returning the successor chain.
    ///
    /// Prerequisites are checked before the breaker, so a weak Backing with no
    /// Warrant reports the missing Warrant. Resubmitting a populated slot
    /// replaces its occupant.
    ///
    /// # Errors
    ///
    /// - DependencyError naming missing prerequisites
    /// - CircuitBreakerError when the breaker rejects the component's strength
    pub fn submit(&self, component: impl Into<Component>) -> ToulminResult<Self> {
        let component = component.into();
        let kind = component.kind();

        let mut slots = self.state.clone().into_slots();
        let missing = slots.missing_prerequisites(kind);
        if !missing.is_empty() {
            return Err(dependency_error(kind, &missing));
        }

        self.breaker.check(&component)?;
        slots.set(component);

        let next = Self {
            state: ChainState::from_slots(slots)?,
            completed_at: match kind {
                ComponentKind::Verdict => Some(Utc::now()),
                _ => self.completed_at,
            },
            ..self.clone()
        };

        if kind > ComponentKind::Backing {
            next.run_logic_checks()?;
        }
        Ok(next)
    }

    /// Re-applies the breaker to every populated graded slot, in canonical
    /// order.
    pub fn run_logic_checks(&self) -> ToulminResult<()> {
        match (self.state.warrant(), self.state.backing()) {
            (Some(warrant), Some(backing)) => self.breaker.check_bridge(warrant, backing)?,
            (Some(warrant), None) => self.breaker.check_warrant(warrant)?,
            _ => {}
        }
        if let Some(rebuttal) = self.state.rebuttal() {
            self.breaker.check_rebuttal(rebuttal)?;
        }
        Ok(())
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn policy(&self) -> BreakerPolicy {
        self.breaker.policy()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// 0 through 4, derived from which slots are populated
    pub fn phase(&self) -> u8 {
        self.state.phase()
    }

    pub fn is_complete(&self) -> bool {
        self.state.verdict().is_some()
    }

    pub fn data(&self) -> Option<&Data> {
        self.state.data()
    }

    pub fn claim(&self) -> Option<&Claim> {
        self.state.claim()
    }

    pub fn warrant(&self) -> Option<&Warrant> {
        self.state.warrant()
    }

    pub fn backing(&self) -> Option<&Backing> {
        self.state.backing()
    }

    pub fn rebuttal(&self) -> Option<&Rebuttal> {
        self.state.rebuttal()
    }

    pub fn qualifier(&self) -> Option<&Qualifier> {
        self.state.qualifier()
    }

    pub fn verdict(&self) -> Option<&Verdict> {
        self.state.verdict()
    }

    /// Whether the slot for `kind` is populated
    pub fn has(&self, kind: ComponentKind) -> bool {
        self.state.depth() > kind_index(kind)
    }

    /// Unpopulated slots, in canonical order
    pub fn missing(&self) -> Vec<ComponentKind> {
        ComponentKind::ALL
            .iter()
            .copied()
            .filter(|kind| !self.has(*kind))
            .collect()
    }

    /// The next component the chain accepts without a dependency error
    pub fn next_expected(&self) -> Option<ComponentKind> {
        self.missing().first().copied()
    }

    /// Deterministic JSON snapshot.
    ///
    /// Keys are sorted; only populated slots appear. Exporting the same chain
    /// twice yields identical values.
    pub fn export(&self) -> Value {
        let mut root = Map::new();
        root.insert("id".into(), json!(self.id.to_string()));
        root.insert("query".into(), json!(self.query));
        root.insert("phase".into(), json!(self.phase()));
        root.insert("is_complete".into(), json!(self.is_complete()));
        root.insert("created_at".into(), json!(self.created_at.to_rfc3339()));
        root.insert(
            "completed_at".into(),
            json!(self.completed_at.map(|t| t.to_rfc3339())),
        );
        root.insert("policy".into(), json!(self.breaker.policy()));

        let state = &self.state;
        let slots = [
            (ComponentKind::Data, state.data().map(|v| json!(v))),
            (ComponentKind::Claim, state.claim().map(|v| json!(v))),
            (ComponentKind::Warrant, state.warrant().map(|v| json!(v))),
            (ComponentKind::Backing, state.backing().map(|v| json!(v))),
            (ComponentKind::Rebuttal, state.rebuttal().map(|v| json!(v))),
            (ComponentKind::Qualifier, state.qualifier().map(|v| json!(v))),
            (ComponentKind::Verdict, state.verdict().map(|v| json!(v))),
        ];
        for (kind, value) in slots {
            if let Some(value) = value {
                root.insert(kind.as_str().to_string(), value);
            }
        }

        Value::Object(root)
    }

    /// [`export`](Self::export) as pretty-printed JSON text
    pub fn export_json(&self) -> String {
        format!("{:#}", self.export())
    }

    /// Markdown summary, one row per populated slot
    pub fn render_table(&self) -> String {
        render::render_table(&self.state)
    }
}

fn kind_index(kind: ComponentKind) -> usize {
    ComponentKind::ALL
        .iter()
        .position(|k| *k == kind)
        .unwrap_or(ComponentKind::ALL.len())
}

fn validate_query(query: String) -> ToulminResult<String> {
    let trimmed = query.trim();
    let count = trimmed.chars().count();
    if count < QUERY_MIN_CHARS {
        return Err(ToulminError::shape(
            None,
            ValidationDetails::too_short("query", QUERY_MIN_CHARS, count),
        )
        .with_suggestion("Provide a substantive question or topic to analyse"));
    }
    Ok(trimmed.to_string())
}
