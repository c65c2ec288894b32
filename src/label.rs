//! Churn label derivation and normalization.
//!
//! The boolean label rule runs in two places that must never drift: once
//! when the training pipeline derives labels, and once when a persisted
//! model is loaded for scoring. It is therefore defined exactly once and
//! registered under a stable contract name; both sites resolve it through
//! the registry instead of re-implementing it inline.

/// Signature of a registered label transform.
pub type LabelFn = fn(&str) -> bool;

/// Contract name under which [`churned`] is registered. Recorded in the
/// model artifact at training time and resolved again at load time.
pub const CHURN_LABEL_CONTRACT: &str = "ChurnYesNoToBool";

const REGISTRY: &[(&str, LabelFn)] = &[(CHURN_LABEL_CONTRACT, churned)];

/// Resolve a label transform by contract name.
pub fn resolve(contract: &str) -> Option<LabelFn> {
    REGISTRY
        .iter()
        .find(|(name, _)| *name == contract)
        .map(|(_, f)| *f)
}

/// True when the trimmed label is non-empty and starts with `Y`
/// (ASCII case-insensitive, ordinal comparison).
pub fn churned(label: &str) -> bool {
    label
        .trim()
        .chars()
        .next()
        .map_or(false, |c| c.eq_ignore_ascii_case(&'y'))
}

/// Normalize a raw churn field to "Yes"/"No" where recognized.
///
/// Unrecognized non-empty values pass through unchanged; downstream label
/// derivation treats them as non-churn unless they start with `Y`.
pub fn normalize_yes_no(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("yes") {
        return "Yes".to_string();
    }
    if trimmed.eq_ignore_ascii_case("no") {
        return "No".to_string();
    }
    match trimmed {
        "1" => "Yes".to_string(),
        "0" => "No".to_string(),
        "" => "No".to_string(),
        other => other.to_string(),
    }
}
