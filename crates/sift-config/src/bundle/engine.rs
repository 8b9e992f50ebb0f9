//! Options rendered in the engine's own vocabulary.
//!
//! The engine phrases several toggles in the opposite sense of ours
//! (`propertyReadSideEffects: true` means "property reads may have side
//! effects"), so the semantic flags are inverted on the way out.
//!
//! `moduleSideEffects` accepts `true`/`false`, `"no-external"`, a list of ids
//! or a function `(id, external) => boolean`. Rule sets are rendered as the
//! source of that function for the engine host to evaluate.

use serde::Serialize;

use super::BundleOptions;
use crate::error::{ConfigError, Result};
use crate::treeshake::{
    ModuleSideEffectRule, ModuleSideEffectRules, ModuleSideEffects, SideEffectsKeyword, Treeshake,
    TreeshakeFlags,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineOptions {
    pub input: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub external: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub plugins: Vec<String>,
    pub output: EngineOutputOptions,
    pub treeshake: EngineTreeshake,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineOutputOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    pub format: &'static str,
    pub preserve_modules: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum EngineTreeshake {
    Disabled(bool),
    Options(EngineTreeshakeOptions),
}

#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineTreeshakeOptions {
    pub annotations: bool,
    pub correct_var_value_before_declaration: bool,
    pub property_read_side_effects: bool,
    pub try_catch_deoptimization: bool,
    pub unknown_global_side_effects: bool,
    pub module_side_effects: EngineModuleSideEffects,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum EngineModuleSideEffects {
    Bool(bool),
    Keyword(SideEffectsKeyword),
    Ids(Vec<String>),
    /// Source of an `(id, external) => boolean` function
    Function(String),
}

impl EngineModuleSideEffects {
    fn from_config(module_side_effects: &ModuleSideEffects) -> Result<Self> {
        Ok(match module_side_effects {
            ModuleSideEffects::Bool(value) => Self::Bool(*value),
            ModuleSideEffects::Keyword(keyword) => Self::Keyword(*keyword),
            ModuleSideEffects::Ids(ids) => Self::Ids(ids.clone()),
            ModuleSideEffects::Rules(rules) => Self::Function(render_rules(rules)?),
        })
    }
}

/// `(id, external) => { if (<rule>) return <verdict>; ... return <fallback>; }`
fn render_rules(rules: &ModuleSideEffectRules) -> Result<String> {
    let mut body = String::new();
    for rule in &rules.rules {
        body.push_str(&format!(
            "if ({}) return {}; ",
            render_condition(rule)?,
            rule.side_effects
        ));
    }
    Ok(format!(
        "(id, external) => {{ {body}return {}; }}",
        rules.fallback
    ))
}

fn render_condition(rule: &ModuleSideEffectRule) -> Result<String> {
    let matcher = match (&rule.suffix, &rule.exact, &rule.pattern) {
        (Some(suffix), _, _) => format!("id.endsWith({})", js_string(suffix)?),
        (None, Some(exact), _) => format!("id === {}", js_string(exact)?),
        (None, None, Some(pattern)) => format!("new RegExp({}).test(id)", js_string(pattern)?),
        (None, None, None) => "false".to_string(),
    };
    Ok(match rule.external {
        Some(true) => format!("external && {matcher}"),
        Some(false) => format!("!external && {matcher}"),
        None => matcher,
    })
}

// JSON string literals are valid JavaScript string literals.
fn js_string(value: &str) -> Result<String> {
    serde_json::to_string(value).map_err(|e| ConfigError::InvalidValue {
        field: "treeshake.module_side_effects".to_string(),
        hint: Some(e.to_string()),
    })
}

impl EngineTreeshakeOptions {
    fn new(flags: TreeshakeFlags, module_side_effects: EngineModuleSideEffects) -> Self {
        Self {
            annotations: flags.trust_annotations,
            correct_var_value_before_declaration: !flags.assume_no_forward_reference_hazards,
            property_read_side_effects: !flags.ignore_property_read_side_effects,
            try_catch_deoptimization: !flags.ignore_try_catch_deoptimization,
            unknown_global_side_effects: !flags.ignore_unknown_global_side_effects,
            module_side_effects,
        }
    }
}

impl EngineOptions {
    pub(crate) fn from_bundle(bundle: &BundleOptions) -> Result<Self> {
        let treeshake = match &bundle.treeshake {
            Treeshake::Enabled(false) => EngineTreeshake::Disabled(false),
            other => {
                let options = other.options();
                let module_side_effects = options.resolved_module_side_effects();
                // Invalid rules surface here rather than in the engine.
                module_side_effects.compile()?;
                EngineTreeshake::Options(EngineTreeshakeOptions::new(
                    options.flags(),
                    EngineModuleSideEffects::from_config(&module_side_effects)?,
                ))
            }
        };

        let output = &bundle.output;
        Ok(Self {
            input: bundle
                .input
                .iter()
                .map(|p| p.to_string_lossy().into_owned())
                .collect(),
            external: bundle.external.clone(),
            plugins: bundle.plugins.clone(),
            output: EngineOutputOptions {
                dir: match &output.file {
                    Some(_) => output.dir.as_ref().map(|d| d.to_string_lossy().into_owned()),
                    None => Some(output.output_dir().to_string_lossy().into_owned()),
                },
                file: output.file.as_ref().map(|f| f.to_string_lossy().into_owned()),
                format: output.format.as_str(),
                preserve_modules: output.preserve_modules,
            },
            treeshake,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::treeshake::{TreeshakeOptions, TreeshakePreset};
    use serde_json::json;

    #[test]
    fn app_defaults_render_engine_flags() {
        let engine = BundleOptions::app_defaults().engine_options().unwrap();
        let value = serde_json::to_value(&engine).unwrap();

        assert_eq!(value["input"], json!(["app/main.js"]));
        assert_eq!(value["output"]["dir"], json!("dist"));
        assert_eq!(value["output"]["format"], json!("cjs"));
        assert_eq!(value["output"]["preserveModules"], json!(true));
        assert_eq!(value["treeshake"]["annotations"], json!(true));
        assert_eq!(value["treeshake"]["correctVarValueBeforeDeclaration"], json!(false));
        assert_eq!(value["treeshake"]["propertyReadSideEffects"], json!(false));
        assert_eq!(value["treeshake"]["tryCatchDeoptimization"], json!(false));
        assert_eq!(value["treeshake"]["unknownGlobalSideEffects"], json!(false));
        assert_eq!(
            value["treeshake"]["moduleSideEffects"],
            json!(
                "(id, external) => { if (id.endsWith(\"node_modules/react-scan/dist/native.js\")) return false; return true; }"
            )
        );
    }

    #[test]
    fn module_side_effects_use_engine_forms() {
        let render = |module_side_effects: ModuleSideEffects| {
            let bundle = BundleOptions {
                treeshake: TreeshakeOptions {
                    module_side_effects: Some(module_side_effects),
                    ..TreeshakeOptions::default()
                }
                .into(),
                ..BundleOptions::default()
            };
            serde_json::to_value(bundle.engine_options().unwrap()).unwrap()["treeshake"]
                ["moduleSideEffects"]
                .clone()
        };

        assert_eq!(render(ModuleSideEffects::Bool(false)), json!(false));
        assert_eq!(
            render(ModuleSideEffects::Keyword(SideEffectsKeyword::NoExternal)),
            json!("no-external")
        );
        assert_eq!(
            render(ModuleSideEffects::Ids(vec!["src/polyfills.js".to_string()])),
            json!(["src/polyfills.js"])
        );
    }

    #[test]
    fn rules_render_in_order_with_external_guards() {
        let rules = ModuleSideEffectRules {
            rules: vec![
                ModuleSideEffectRule::exact("src/setup.js", true),
                ModuleSideEffectRule::pattern("^lodash", false).only_external(true),
                ModuleSideEffectRule::suffix(".css", true).only_external(false),
            ],
            fallback: false,
        };
        assert_eq!(
            render_rules(&rules).unwrap(),
            "(id, external) => { \
             if (id === \"src/setup.js\") return true; \
             if (external && new RegExp(\"^lodash\").test(id)) return false; \
             if (!external && id.endsWith(\".css\")) return true; \
             return false; }"
        );
    }

    #[test]
    fn rule_strings_are_escaped() {
        let rules = ModuleSideEffectRules {
            rules: vec![ModuleSideEffectRule::pattern(r#"\.js"$"#, false)],
            fallback: true,
        };
        assert_eq!(
            render_rules(&rules).unwrap(),
            r#"(id, external) => { if (new RegExp("\\.js\"$").test(id)) return false; return true; }"#
        );
    }

    #[test]
    fn engine_defaults_render_conservatively() {
        let engine = BundleOptions::default().engine_options().unwrap();
        let EngineTreeshake::Options(treeshake) = engine.treeshake else {
            panic!("expected treeshake options");
        };
        assert!(treeshake.annotations);
        assert!(!treeshake.correct_var_value_before_declaration);
        assert!(treeshake.property_read_side_effects);
        assert!(treeshake.try_catch_deoptimization);
        assert!(treeshake.unknown_global_side_effects);
        assert_eq!(treeshake.module_side_effects, EngineModuleSideEffects::Bool(true));
    }

    #[test]
    fn disabled_treeshake_renders_false() {
        let bundle = BundleOptions {
            treeshake: Treeshake::Enabled(false),
            ..BundleOptions::default()
        };
        let value = serde_json::to_value(bundle.engine_options().unwrap()).unwrap();
        assert_eq!(value["treeshake"], json!(false));
    }

    #[test]
    fn preset_module_side_effects_are_rendered() {
        let bundle = BundleOptions {
            treeshake: TreeshakeOptions::with_preset(TreeshakePreset::Smallest).into(),
            ..BundleOptions::default()
        };
        let value = serde_json::to_value(bundle.engine_options().unwrap()).unwrap();
        assert_eq!(value["treeshake"]["moduleSideEffects"], json!(false));
        assert_eq!(value["output"]["format"], json!("es"));
    }

    #[test]
    fn plugins_are_omitted_after_split() {
        let (_, rest) = BundleOptions::app_defaults().split_plugins();
        let value = serde_json::to_value(rest.engine_options().unwrap()).unwrap();
        assert!(value.get("plugins").is_none());
    }
}
