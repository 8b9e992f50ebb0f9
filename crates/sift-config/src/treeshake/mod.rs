//! Tree-shaking configuration handed to the external bundling engine.
//!
//! [`TreeshakeOptions`] is the raw, deserialized form where every flag is
//! optional. [`TreeshakeOptions::normalize`] fills the gaps from a preset or
//! the engine's own conservative defaults and compiles the module
//! side-effect policy. The normalized record is built once per bundle and not
//! mutated afterwards.

mod policy;

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use policy::{
    DIAGNOSTIC_SHIM_SUFFIX, ModuleSideEffectPolicy, ModuleSideEffectRule, ModuleSideEffectRules,
    ModuleSideEffects, SideEffectsKeyword, module_side_effect_policy,
};

/// Named bundles of flags, matching the engine's presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TreeshakePreset {
    /// Keep everything the engine cannot prove removable
    Safest,
    /// Reasonable trade-off for most applications
    Recommended,
    /// Remove as much as possible, trusting the code to be well behaved
    Smallest,
}

impl TreeshakePreset {
    pub fn flags(self) -> TreeshakeFlags {
        match self {
            TreeshakePreset::Safest => TreeshakeFlags {
                trust_annotations: true,
                assume_no_forward_reference_hazards: false,
                ignore_property_read_side_effects: false,
                ignore_try_catch_deoptimization: false,
                ignore_unknown_global_side_effects: false,
            },
            TreeshakePreset::Recommended => TreeshakeFlags {
                trust_annotations: true,
                assume_no_forward_reference_hazards: true,
                ignore_property_read_side_effects: false,
                ignore_try_catch_deoptimization: false,
                ignore_unknown_global_side_effects: true,
            },
            TreeshakePreset::Smallest => TreeshakeFlags {
                trust_annotations: true,
                assume_no_forward_reference_hazards: true,
                ignore_property_read_side_effects: true,
                ignore_try_catch_deoptimization: true,
                ignore_unknown_global_side_effects: true,
            },
        }
    }

    /// Module side-effect verdict the preset applies to every module.
    pub fn module_side_effects(self) -> bool {
        !matches!(self, TreeshakePreset::Smallest)
    }
}

/// The five conservativeness toggles consumed directly by the engine.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeshakeFlags {
    /// Honor `/*#__PURE__*/`-style annotations in source
    pub trust_annotations: bool,
    /// A variable read before its declaration may be reordered
    pub assume_no_forward_reference_hazards: bool,
    /// Reading a property never triggers a getter with side effects
    pub ignore_property_read_side_effects: bool,
    /// Code inside try/catch is eliminated like any other code
    pub ignore_try_catch_deoptimization: bool,
    /// References to unknown globals are side-effect free
    pub ignore_unknown_global_side_effects: bool,
}

impl TreeshakeFlags {
    /// What the engine assumes when a flag is left out.
    pub const ENGINE_DEFAULTS: TreeshakeFlags = TreeshakeFlags {
        trust_annotations: true,
        assume_no_forward_reference_hazards: true,
        ignore_property_read_side_effects: false,
        ignore_try_catch_deoptimization: false,
        ignore_unknown_global_side_effects: false,
    };
}

impl Default for TreeshakeFlags {
    fn default() -> Self {
        Self::ENGINE_DEFAULTS
    }
}

/// Raw tree-shaking options as written in a config file.
///
/// Unknown keys are rejected, so the engine's own option names
/// (`annotations`, `propertyReadSideEffects`, ...) are not silently ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TreeshakeOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<TreeshakePreset>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trust_annotations: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assume_no_forward_reference_hazards: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore_property_read_side_effects: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore_try_catch_deoptimization: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore_unknown_global_side_effects: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_side_effects: Option<ModuleSideEffects>,
}

impl TreeshakeOptions {
    /// The options this project builds with: every conservativeness toggle
    /// relaxed, and only the diagnostic shim allowed to be dropped.
    pub fn app_defaults() -> Self {
        Self {
            preset: None,
            trust_annotations: Some(true),
            assume_no_forward_reference_hazards: Some(true),
            ignore_property_read_side_effects: Some(true),
            ignore_try_catch_deoptimization: Some(true),
            ignore_unknown_global_side_effects: Some(true),
            module_side_effects: Some(ModuleSideEffects::Rules(
                ModuleSideEffectRules::diagnostic_shim(),
            )),
        }
    }

    pub fn with_preset(preset: TreeshakePreset) -> Self {
        Self {
            preset: Some(preset),
            ..Self::default()
        }
    }

    /// Resolve the five flags: explicit value, then preset, then engine default.
    pub fn flags(&self) -> TreeshakeFlags {
        let base = self
            .preset
            .map_or(TreeshakeFlags::ENGINE_DEFAULTS, TreeshakePreset::flags);

        TreeshakeFlags {
            trust_annotations: self.trust_annotations.unwrap_or(base.trust_annotations),
            assume_no_forward_reference_hazards: self
                .assume_no_forward_reference_hazards
                .unwrap_or(base.assume_no_forward_reference_hazards),
            ignore_property_read_side_effects: self
                .ignore_property_read_side_effects
                .unwrap_or(base.ignore_property_read_side_effects),
            ignore_try_catch_deoptimization: self
                .ignore_try_catch_deoptimization
                .unwrap_or(base.ignore_try_catch_deoptimization),
            ignore_unknown_global_side_effects: self
                .ignore_unknown_global_side_effects
                .unwrap_or(base.ignore_unknown_global_side_effects),
        }
    }

    /// Module side-effect setting after applying the preset.
    pub fn resolved_module_side_effects(&self) -> ModuleSideEffects {
        match (&self.module_side_effects, self.preset) {
            (Some(explicit), _) => explicit.clone(),
            (None, Some(preset)) => ModuleSideEffects::Bool(preset.module_side_effects()),
            (None, None) => ModuleSideEffects::default(),
        }
    }

    pub fn normalize(&self) -> Result<NormalizedTreeshakeOptions> {
        Ok(NormalizedTreeshakeOptions {
            enabled: true,
            flags: self.flags(),
            module_side_effects: self.resolved_module_side_effects().compile()?,
        })
    }
}

/// The `treeshake` key: `true`, `false`, or a table of options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Treeshake {
    Enabled(bool),
    Options(TreeshakeOptions),
}

impl Default for Treeshake {
    fn default() -> Self {
        Treeshake::Options(TreeshakeOptions::default())
    }
}

impl Treeshake {
    pub fn is_enabled(&self) -> bool {
        !matches!(self, Treeshake::Enabled(false))
    }

    /// Options in effect; `true` and `false` both map to engine defaults.
    pub fn options(&self) -> TreeshakeOptions {
        match self {
            Treeshake::Options(options) => options.clone(),
            Treeshake::Enabled(_) => TreeshakeOptions::default(),
        }
    }

    pub fn normalize(&self) -> Result<NormalizedTreeshakeOptions> {
        let mut normalized = self.options().normalize()?;
        normalized.enabled = self.is_enabled();
        Ok(normalized)
    }
}

impl From<TreeshakeOptions> for Treeshake {
    fn from(options: TreeshakeOptions) -> Self {
        Treeshake::Options(options)
    }
}

/// Fully resolved tree-shaking configuration.
///
/// The default is what an omitted `treeshake` key normalizes to: enabled,
/// engine default flags, every module keeps its side effects.
#[derive(Debug, Clone)]
pub struct NormalizedTreeshakeOptions {
    /// `false` disables tree-shaking: every module is retained
    pub enabled: bool,
    pub flags: TreeshakeFlags,
    pub module_side_effects: ModuleSideEffectPolicy,
}

impl Default for NormalizedTreeshakeOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            flags: TreeshakeFlags::ENGINE_DEFAULTS,
            module_side_effects: ModuleSideEffectPolicy::all(true),
        }
    }
}

impl NormalizedTreeshakeOptions {
    /// Whether the engine must retain `id` even when none of its bindings are used.
    pub fn module_has_side_effects(&self, id: &str, is_external: bool) -> bool {
        let retained = !self.enabled || self.module_side_effects.has_side_effects(id, is_external);
        tracing::debug!(module = id, external = is_external, retained, "module side-effect decision");
        retained
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn omitted_flags_use_engine_defaults() {
        let flags = TreeshakeOptions::default().flags();
        assert_eq!(flags, TreeshakeFlags::ENGINE_DEFAULTS);
        assert!(flags.trust_annotations);
        assert!(!flags.ignore_property_read_side_effects);
    }

    #[test]
    fn explicit_flag_overrides_preset() {
        let options = TreeshakeOptions {
            ignore_try_catch_deoptimization: Some(false),
            ..TreeshakeOptions::with_preset(TreeshakePreset::Smallest)
        };
        let flags = options.flags();
        assert!(!flags.ignore_try_catch_deoptimization);
        assert!(flags.ignore_property_read_side_effects);
    }

    #[test]
    fn smallest_preset_drops_module_side_effects() {
        let normalized = TreeshakeOptions::with_preset(TreeshakePreset::Smallest)
            .normalize()
            .unwrap();
        assert!(!normalized.module_has_side_effects("/src/main.js", false));
    }

    #[test]
    fn app_defaults_relax_every_flag() {
        let flags = TreeshakeOptions::app_defaults().flags();
        assert!(flags.trust_annotations);
        assert!(flags.assume_no_forward_reference_hazards);
        assert!(flags.ignore_property_read_side_effects);
        assert!(flags.ignore_try_catch_deoptimization);
        assert!(flags.ignore_unknown_global_side_effects);
    }

    #[test]
    fn disabled_treeshake_retains_everything() {
        let normalized = Treeshake::Enabled(false).normalize().unwrap();
        assert!(!normalized.enabled);
        assert!(normalized.module_has_side_effects(
            "/project/node_modules/react-scan/dist/native.js",
            true
        ));
    }

    #[test]
    fn treeshake_key_accepts_bool_or_table() {
        let parsed: Treeshake = serde_json::from_value(json!(false)).unwrap();
        assert_eq!(parsed, Treeshake::Enabled(false));

        let parsed: Treeshake =
            serde_json::from_value(json!({ "preset": "recommended" })).unwrap();
        assert_eq!(
            parsed,
            Treeshake::Options(TreeshakeOptions::with_preset(TreeshakePreset::Recommended))
        );
    }

    #[test]
    fn default_matches_normalized_default_key() {
        let from_key = Treeshake::default().normalize().unwrap();
        let default = NormalizedTreeshakeOptions::default();
        assert!(default.enabled);
        assert_eq!(default.enabled, from_key.enabled);
        assert_eq!(default.flags, from_key.flags);
        for (id, external) in [("/src/pure.js", false), ("react", true)] {
            assert_eq!(
                default.module_has_side_effects(id, external),
                from_key.module_has_side_effects(id, external)
            );
        }
    }

    #[test]
    fn default_treeshake_serializes_to_empty_table() {
        let value = serde_json::to_value(Treeshake::default()).unwrap();
        assert_eq!(value, json!({}));
    }
}
