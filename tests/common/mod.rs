//! Shared fixtures: one climate-attribution argument, component by component.

#![allow(dead_code)]

use serde_json::{json, Value};

use toulmini::{
    validate_value, BreakerPolicy, Component, ComponentKind, Payloads, ToulminChain,
};

pub const QUERY: &str = "What is driving recent global warming?";

pub fn data_json() -> Value {
    json!({
        "facts": ["Global average temperatures rose 1.1C since 1900."],
        "citations": [{
            "source": "IPCC AR6",
            "reference": "Summary for Policymakers, A.1",
            "url": "https://www.ipcc.ch/report/ar6/wg1/"
        }],
        "evidence_type": "statistical"
    })
}

pub fn claim_json() -> Value {
    json!({
        "statement": "Human activity is the dominant driver of recent warming.",
        "scope": "general"
    })
}

pub fn warrant_json(strength: &str) -> Value {
    json!({
        "principle": "If a measured trend matches the fingerprint predicted by a causal model, then the modelled cause is generally responsible.",
        "logic_type": "abductive",
        "strength": strength
    })
}

pub fn backing_json(strength: &str) -> Value {
    json!({
        "authority": "Decades of peer-reviewed attribution studies",
        "citations": [{"source": "Nature Climate Change", "reference": "Attribution review 2020"}],
        "strength": strength
    })
}

pub fn rebuttal_json(strength: &str) -> Value {
    json!({
        "exceptions": ["If solar output increased over the same period, the attribution would weaken."],
        "counterexamples": [],
        "strength": strength
    })
}

pub fn qualifier_json(confidence_pct: i64) -> Value {
    json!({
        "degree": "probably",
        "confidence_pct": confidence_pct,
        "rationale": "Because the rebuttals are minor, the claim is qualified as probable."
    })
}

pub fn verdict_json() -> Value {
    json!({
        "status": "sustained",
        "reasoning": "The data establishes the trend, the warrant connects it to the claim, and the backing is authoritative; the rebuttal is minor.",
        "final_statement": "Human activity dominates recent warming."
    })
}

/// Validated component from a fixture value
pub fn component(kind: ComponentKind, value: Value) -> Component {
    validate_value(kind, &value).expect("fixture must validate")
}

/// The seven fixture components, all strong enough to pass a strict breaker
pub fn strong_components() -> Vec<Component> {
    vec![
        component(ComponentKind::Data, data_json()),
        component(ComponentKind::Claim, claim_json()),
        component(ComponentKind::Warrant, warrant_json("strong")),
        component(ComponentKind::Backing, backing_json("strong")),
        component(ComponentKind::Rebuttal, rebuttal_json("weak")),
        component(ComponentKind::Qualifier, qualifier_json(90)),
        component(ComponentKind::Verdict, verdict_json()),
    ]
}

/// Chain holding the first `depth` strong components
pub fn chain_to_depth(depth: usize, policy: BreakerPolicy) -> ToulminChain {
    strong_components()
        .into_iter()
        .take(depth)
        .fold(ToulminChain::new(QUERY, policy).unwrap(), |chain, c| {
            chain.submit(c).unwrap()
        })
}

/// Payloads for every component, as raw JSON text
pub fn full_payloads() -> Payloads {
    Payloads::new()
        .with(ComponentKind::Data, data_json().to_string())
        .with(ComponentKind::Claim, claim_json().to_string())
        .with(ComponentKind::Warrant, warrant_json("strong").to_string())
        .with(ComponentKind::Backing, backing_json("strong").to_string())
        .with(ComponentKind::Rebuttal, rebuttal_json("weak").to_string())
        .with(ComponentKind::Qualifier, qualifier_json(90).to_string())
        .with(ComponentKind::Verdict, verdict_json().to_string())
}
