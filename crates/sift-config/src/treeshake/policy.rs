//! Module side-effect policy.
//!
//! The bundler asks, for every module in its dependency graph, whether the
//! module may be dropped when nothing imports a binding from it. A `true`
//! answer means "treat as having side effects, retain even if unused"; `false`
//! means the module is safe to elide when unreferenced.

use std::collections::HashSet;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::bundle::helpers::default_true;
use crate::error::{ConfigError, Result};

/// Path suffix of the native diagnostic shim shipped by the `react-scan`
/// dev-tooling package. Evaluating it has no observable effect.
///
/// Tied to the package's internal file layout: if the file moves, the suffix
/// stops matching and the module is retained again.
pub const DIAGNOSTIC_SHIM_SUFFIX: &str = "node_modules/react-scan/dist/native.js";

/// The project's module side-effect policy.
///
/// Returns `false` only for ids ending in [`DIAGNOSTIC_SHIM_SUFFIX`], whether
/// or not the module is external. Every other id, including the empty string
/// and ids that merely contain the suffix somewhere in the middle, gets the
/// conservative `true`.
///
/// # Example
///
/// ```
/// use sift_config::module_side_effect_policy;
///
/// assert!(!module_side_effect_policy("/project/node_modules/react-scan/dist/native.js", true));
/// assert!(module_side_effect_policy("/project/src/app/main.js", false));
/// assert!(module_side_effect_policy("", false));
/// ```
pub fn module_side_effect_policy(id: &str, _is_external: bool) -> bool {
    !id.ends_with(DIAGNOSTIC_SHIM_SUFFIX)
}

/// Configured form of the module side-effect policy, as written in a config
/// file.
///
/// ```toml
/// # every module keeps its side effects (engine default)
/// module_side_effects = true
///
/// # external modules are side-effect free
/// module_side_effects = "no-external"
///
/// # only these ids have side effects
/// module_side_effects = ["src/polyfills.js"]
///
/// # ordered rules, first match wins
/// [bundle.treeshake.module_side_effects]
/// fallback = true
/// rules = [{ suffix = "node_modules/react-scan/dist/native.js", side_effects = false }]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ModuleSideEffects {
    Bool(bool),
    Keyword(SideEffectsKeyword),
    Ids(Vec<String>),
    Rules(ModuleSideEffectRules),
}

impl Default for ModuleSideEffects {
    fn default() -> Self {
        ModuleSideEffects::Bool(true)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SideEffectsKeyword {
    /// External modules are side-effect free, project modules are not.
    NoExternal,
}

/// Ordered rule list with a fallback verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleSideEffectRules {
    #[serde(default)]
    pub rules: Vec<ModuleSideEffectRule>,

    /// Verdict when no rule matches
    #[serde(default = "default_true")]
    pub fallback: bool,
}

impl ModuleSideEffectRules {
    /// The allow-list behind [`module_side_effect_policy`]: the diagnostic
    /// shim is side-effect free, everything else is retained.
    pub fn diagnostic_shim() -> Self {
        Self {
            rules: vec![ModuleSideEffectRule::suffix(DIAGNOSTIC_SHIM_SUFFIX, false)],
            fallback: true,
        }
    }
}

/// A single rule. Exactly one of `suffix`, `exact` or `pattern` must be set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleSideEffectRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exact: Option<String>,

    /// Regular expression searched for anywhere in the module id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    /// Restrict the rule to external (`true`) or project (`false`) modules
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external: Option<bool>,

    pub side_effects: bool,
}

impl ModuleSideEffectRule {
    pub fn suffix(suffix: impl Into<String>, side_effects: bool) -> Self {
        Self {
            suffix: Some(suffix.into()),
            exact: None,
            pattern: None,
            external: None,
            side_effects,
        }
    }

    pub fn exact(id: impl Into<String>, side_effects: bool) -> Self {
        Self {
            suffix: None,
            exact: Some(id.into()),
            pattern: None,
            external: None,
            side_effects,
        }
    }

    pub fn pattern(pattern: impl Into<String>, side_effects: bool) -> Self {
        Self {
            suffix: None,
            exact: None,
            pattern: Some(pattern.into()),
            external: None,
            side_effects,
        }
    }

    /// Restrict this rule to external or project modules.
    pub fn only_external(mut self, external: bool) -> Self {
        self.external = Some(external);
        self
    }

    fn compile(&self) -> Result<CompiledRule> {
        let matcher = match (&self.suffix, &self.exact, &self.pattern) {
            (Some(suffix), None, None) => {
                if suffix.is_empty() {
                    return Err(empty_matcher("suffix"));
                }
                Matcher::Suffix(suffix.clone())
            }
            (None, Some(exact), None) => {
                if exact.is_empty() {
                    return Err(empty_matcher("exact"));
                }
                Matcher::Exact(exact.clone())
            }
            (None, None, Some(pattern)) => {
                if pattern.is_empty() {
                    return Err(empty_matcher("pattern"));
                }
                let regex = Regex::new(pattern).map_err(|err| ConfigError::InvalidPattern {
                    pattern: pattern.clone(),
                    message: err.to_string(),
                })?;
                Matcher::Pattern(regex)
            }
            _ => {
                return Err(ConfigError::SchemaValidation {
                    message: "side-effect rule must set exactly one of 'suffix', 'exact' or 'pattern'"
                        .to_string(),
                    hint: Some("Split the rule into one rule per matcher".to_string()),
                });
            }
        };

        Ok(CompiledRule {
            matcher,
            external: self.external,
            side_effects: self.side_effects,
        })
    }
}

fn empty_matcher(kind: &str) -> ConfigError {
    ConfigError::SchemaValidation {
        message: format!("side-effect rule has an empty '{kind}' matcher"),
        hint: Some("An empty matcher would match every module; remove the rule instead".to_string()),
    }
}

impl ModuleSideEffects {
    /// Compile into a policy that can be evaluated per module.
    pub fn compile(&self) -> Result<ModuleSideEffectPolicy> {
        let kind = match self {
            ModuleSideEffects::Bool(value) => PolicyKind::All(*value),
            ModuleSideEffects::Keyword(SideEffectsKeyword::NoExternal) => PolicyKind::NoExternal,
            ModuleSideEffects::Ids(ids) => {
                if ids.iter().any(String::is_empty) {
                    return Err(ConfigError::SchemaValidation {
                        message: "module_side_effects lists an empty module id".to_string(),
                        hint: None,
                    });
                }
                PolicyKind::Ids(ids.iter().cloned().collect())
            }
            ModuleSideEffects::Rules(set) => PolicyKind::Rules {
                rules: set
                    .rules
                    .iter()
                    .map(ModuleSideEffectRule::compile)
                    .collect::<Result<Vec<_>>>()?,
                fallback: set.fallback,
            },
        };
        Ok(ModuleSideEffectPolicy { kind })
    }
}

#[derive(Debug, Clone)]
enum Matcher {
    Suffix(String),
    Exact(String),
    Pattern(Regex),
}

#[derive(Debug, Clone)]
struct CompiledRule {
    matcher: Matcher,
    external: Option<bool>,
    side_effects: bool,
}

impl CompiledRule {
    fn matches(&self, id: &str, is_external: bool) -> bool {
        if self.external.is_some_and(|external| external != is_external) {
            return false;
        }
        match &self.matcher {
            Matcher::Suffix(suffix) => id.ends_with(suffix.as_str()),
            Matcher::Exact(exact) => id == exact,
            Matcher::Pattern(regex) => regex.is_match(id),
        }
    }
}

#[derive(Debug, Clone)]
enum PolicyKind {
    All(bool),
    NoExternal,
    Ids(HashSet<String>),
    Rules {
        rules: Vec<CompiledRule>,
        fallback: bool,
    },
}

/// Compiled module side-effect policy.
///
/// Stateless and total: every `(id, is_external)` pair gets an answer, and
/// the same inputs always get the same answer.
#[derive(Debug, Clone)]
pub struct ModuleSideEffectPolicy {
    kind: PolicyKind,
}

impl Default for ModuleSideEffectPolicy {
    fn default() -> Self {
        Self::all(true)
    }
}

impl ModuleSideEffectPolicy {
    /// Same verdict for every module.
    pub fn all(side_effects: bool) -> Self {
        Self {
            kind: PolicyKind::All(side_effects),
        }
    }

    /// The compiled form of [`ModuleSideEffectRules::diagnostic_shim`].
    pub fn diagnostic_shim() -> Self {
        Self {
            kind: PolicyKind::Rules {
                rules: vec![CompiledRule {
                    matcher: Matcher::Suffix(DIAGNOSTIC_SHIM_SUFFIX.to_string()),
                    external: None,
                    side_effects: false,
                }],
                fallback: true,
            },
        }
    }

    /// Whether the module must be treated as having side effects.
    pub fn has_side_effects(&self, id: &str, is_external: bool) -> bool {
        match &self.kind {
            PolicyKind::All(value) => *value,
            PolicyKind::NoExternal => !is_external,
            PolicyKind::Ids(ids) => ids.contains(id),
            PolicyKind::Rules { rules, fallback } => rules
                .iter()
                .find(|rule| rule.matches(id, is_external))
                .map_or(*fallback, |rule| rule.side_effects),
        }
    }
}
