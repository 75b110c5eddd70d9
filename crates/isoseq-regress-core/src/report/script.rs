//! Replay script generation

use std::path::{Path, PathBuf};

use shell_words::quote;

use crate::config::ResolvedPaths;
use crate::error::{RegressError, RegressResult};
use crate::process::CommandSpec;

/// Render a bash script repeating one run's invocations
pub fn render_replay_script(
    runner: &CommandSpec,
    compare: &CommandSpec,
    paths: &ResolvedPaths,
) -> String {
    let fresh = paths.fresh_output_dir.to_string_lossy();
    let reference = paths.reference_dir.to_string_lossy();
    let results = paths.results_file.to_string_lossy();

    let lines = [
        "#!/bin/bash".to_string(),
        format!("cd {}", quote(&paths.work_dir.to_string_lossy())),
        format!("rm -f {}", quote(&results)),
        runner.render_with(&[&*fresh]),
        format!(
            "{} > {}",
            compare.render_with(&[&*fresh, &*reference]),
            quote(&results)
        ),
        "echo $?".to_string(),
    ];

    let mut script = lines.join("\n");
    script.push('\n');
    script
}

/// Write the replay script to `path` and mark it executable
pub async fn write_replay_script(
    path: &Path,
    runner: &CommandSpec,
    compare: &CommandSpec,
    paths: &ResolvedPaths,
) -> RegressResult<PathBuf> {
    let script = render_replay_script(runner, compare, paths);
    tokio::fs::write(path, script).await.map_err(|e| {
        RegressError::io_with_path(format!("Failed to write replay script: {}", e), path)
    })?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tokio::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
            .await
            .map_err(|e| {
                RegressError::io_with_path(format!("Failed to mark script executable: {}", e), path)
            })?;
    }

    tracing::debug!(path = %path.display(), "wrote replay script");
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn paths(work: &str) -> ResolvedPaths {
        let work_dir = PathBuf::from(work);
        ResolvedPaths {
            fresh_output_dir: work_dir.join("test_bam_in"),
            reference_dir: PathBuf::from("/ref/test_bax_in/"),
            results_file: work_dir.join("results.txt"),
            summary_file: None,
            script_file: None,
            work_dir,
        }
    }

    #[test]
    fn test_script_layout() {
        let runner = CommandSpec::parse("bash run_isoseq_bam_in.sh").unwrap();
        let compare = CommandSpec::parse("python -m pbtranscript.testkit.compare_isoseq_runs").unwrap();

        let script = render_replay_script(&runner, &compare, &paths("/work"));
        let lines: Vec<&str> = script.lines().collect();

        assert_eq!(lines[0], "#!/bin/bash");
        assert_eq!(lines[1], "cd /work");
        assert_eq!(lines[2], "rm -f /work/results.txt");
        assert_eq!(lines[3], "bash run_isoseq_bam_in.sh /work/test_bam_in");
        assert_eq!(
            lines[4],
            "python -m pbtranscript.testkit.compare_isoseq_runs /work/test_bam_in /ref/test_bax_in/ > /work/results.txt"
        );
        assert_eq!(lines[5], "echo $?");
    }

    #[test]
    fn test_script_quotes_paths_with_spaces() {
        let runner = CommandSpec::new("bash").with_args(["run.sh"]);
        let compare = CommandSpec::new("diff");

        let script = render_replay_script(&runner, &compare, &paths("/my work"));
        assert!(script.contains("cd '/my work'"));
        assert!(script.contains("bash run.sh '/my work/test_bam_in'"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_written_script_is_executable() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("replay.sh");
        let runner = CommandSpec::new("true");
        let compare = CommandSpec::new("true");

        write_replay_script(&path, &runner, &compare, &paths("/work"))
            .await
            .unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o111, 0o111);
    }
}
