//! Environment variable-based configuration loading

use std::env;
use std::path::PathBuf;

use super::{ConfigOverrides, RunnerFailurePolicy};
use crate::error::{RegressError, RegressResult};
use crate::process::CommandSpec;

/// Load overrides from `ISOSEQ_REGRESS_*` environment variables
pub fn load_from_env() -> RegressResult<ConfigOverrides> {
    load_from_lookup(|key| env::var(key).ok())
}

/// Load overrides through an arbitrary variable lookup
///
/// Empty values are treated as unset.
pub fn load_from_lookup<F>(lookup: F) -> RegressResult<ConfigOverrides>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
    let mut overrides = ConfigOverrides::default();

    if let Some(dir) = get("ISOSEQ_REGRESS_WORK_DIR") {
        overrides.work_dir = Some(PathBuf::from(dir));
    }

    if let Some(dir) = get("ISOSEQ_REGRESS_FRESH_OUTPUT_DIR") {
        overrides.fresh_output_dir = Some(PathBuf::from(dir));
    }

    if let Some(dir) = get("ISOSEQ_REGRESS_REFERENCE_DIR") {
        overrides.reference_dir = Some(PathBuf::from(dir));
    }

    if let Some(file) = get("ISOSEQ_REGRESS_RESULTS_FILE") {
        overrides.results_file = Some(PathBuf::from(file));
    }

    if let Some(command) = get("ISOSEQ_REGRESS_RUNNER") {
        let spec = CommandSpec::parse(&command).map_err(|e| {
            RegressError::config_with_context(e.to_string(), "Invalid ISOSEQ_REGRESS_RUNNER value")
        })?;
        overrides.runner = Some(spec);
    }

    if let Some(command) = get("ISOSEQ_REGRESS_COMPARE") {
        let spec = CommandSpec::parse(&command).map_err(|e| {
            RegressError::config_with_context(e.to_string(), "Invalid ISOSEQ_REGRESS_COMPARE value")
        })?;
        overrides.compare = Some(spec);
    }

    if let Some(policy) = get("ISOSEQ_REGRESS_ON_RUNNER_FAILURE") {
        overrides.on_runner_failure = Some(policy.parse::<RunnerFailurePolicy>().map_err(|e| {
            RegressError::config_with_context(
                e.to_string(),
                "Invalid ISOSEQ_REGRESS_ON_RUNNER_FAILURE value",
            )
        })?);
    }

    Ok(overrides)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_empty_environment() {
        let overrides = load_from_lookup(lookup(&[])).unwrap();
        assert!(overrides.work_dir.is_none());
        assert!(overrides.runner.is_none());
        assert!(overrides.on_runner_failure.is_none());
    }

    #[test]
    fn test_loads_paths_and_commands() {
        let overrides = load_from_lookup(lookup(&[
            ("ISOSEQ_REGRESS_WORK_DIR", "/scratch"),
            ("ISOSEQ_REGRESS_REFERENCE_DIR", "/ref/test_bax_in"),
            ("ISOSEQ_REGRESS_COMPARE", "python -m my.compare --verbose"),
            ("ISOSEQ_REGRESS_ON_RUNNER_FAILURE", "continue"),
        ]))
        .unwrap();

        assert_eq!(overrides.work_dir, Some(PathBuf::from("/scratch")));
        assert_eq!(
            overrides.reference_dir,
            Some(PathBuf::from("/ref/test_bax_in"))
        );
        let compare = overrides.compare.unwrap();
        assert_eq!(compare.program, "python");
        assert_eq!(compare.args, vec!["-m", "my.compare", "--verbose"]);
        assert_eq!(
            overrides.on_runner_failure,
            Some(RunnerFailurePolicy::Continue)
        );
    }

    #[test]
    fn test_blank_values_are_ignored() {
        let overrides = load_from_lookup(lookup(&[("ISOSEQ_REGRESS_RUNNER", "   ")])).unwrap();
        assert!(overrides.runner.is_none());
    }

    #[test]
    fn test_invalid_policy_is_config_error() {
        let err =
            load_from_lookup(lookup(&[("ISOSEQ_REGRESS_ON_RUNNER_FAILURE", "retry")])).unwrap_err();
        assert_eq!(err.error_code(), "REGRESS_CONFIG");
    }

    #[test]
    fn test_shell_operators_rejected_in_runner() {
        let err = load_from_lookup(lookup(&[("ISOSEQ_REGRESS_RUNNER", "bash run.sh | tee log")]))
            .unwrap_err();
        assert_eq!(err.error_code(), "REGRESS_CONFIG");
    }
}
