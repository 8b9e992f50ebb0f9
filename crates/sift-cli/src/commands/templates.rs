//! File templates written by `sift init`.

/// Default `sift.toml`: the project's shipped build configuration.
pub const SIFT_TOML: &str = r#"# Sift configuration

[bundle]
input = ["app/main.js"]
plugins = ["commonjs", "node-resolve"]

[bundle.output]
dir = "dist"
format = "cjs"
preserve_modules = true

[bundle.treeshake]
trust_annotations = true
assume_no_forward_reference_hazards = true
ignore_property_read_side_effects = true
ignore_try_catch_deoptimization = true
ignore_unknown_global_side_effects = true

# Only the react-scan native diagnostic shim may be dropped when unused.
# If the package moves the file, the rule stops matching and the module is kept.
[bundle.treeshake.module_side_effects]
fallback = true
rules = [
    { suffix = "node_modules/react-scan/dist/native.js", side_effects = false },
]
"#;
