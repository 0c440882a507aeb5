use tracing::warn;

use crate::core::placeholder::{self, DIR_NO, INPUT, JOB_ID, RUN_NO};
use crate::models::{CandidateJob, JobFamilyConfig, JobInvocation, CACHE_PREFIX, TAPE_PREFIX};

/// Stands in for the run number in output paths of per-run jobs
pub const BY_RUN_TOKEN: &str = "byRun";

/// Build the `swif add-job` invocation for one candidate.
///
/// Every templated field is substituted on its own. Tokens that do not apply
/// to a field are left as literal text and reported with a warning.
pub fn materialize(config: &JobFamilyConfig, candidate: &CandidateJob) -> JobInvocation {
    let job_id = candidate.job_id.as_str();
    let run_token = candidate.run_token.as_str();
    let output_run_token = if config.job_per_run { BY_RUN_TOKEN } else { run_token };

    let by_id = [(JOB_ID, job_id)];
    let with_run = [(JOB_ID, job_id), (RUN_NO, run_token), (DIR_NO, run_token)];
    let with_output_run = [
        (JOB_ID, job_id),
        (RUN_NO, output_run_token),
        (DIR_NO, output_run_token),
    ];
    let input_ref = input_reference(config, candidate);
    let for_command = [(JOB_ID, job_id), (INPUT, input_ref.as_str())];

    let mut args: Vec<String> = vec![
        "add-job".into(),
        "-create".into(),
        "-workflow".into(),
        config.workflow.clone(),
        "-project".into(),
        config.project.clone(),
        "-track".into(),
        config.track.clone(),
    ];

    let optional = [
        ("-name", fill("name", &config.name, &by_id)),
        ("-cores", config.cores.clone()),
        ("-disk", config.disk.clone()),
        ("-ram", config.ram.clone()),
        ("-phase", config.phase.clone()),
        ("-time", config.time.clone()),
        ("-os", config.os.clone()),
        ("-stdout", fill("stdout", &config.stdout, &by_id)),
        ("-stderr", fill("stderr", &config.stderr, &by_id)),
    ];
    for (flag, value) in optional {
        if !value.is_empty() {
            args.push(flag.to_string());
            args.push(value);
        }
    }

    for tag in &config.tags {
        push_split(&mut args, "-tag", &fill("tags", tag, &by_id));
    }

    for (name, source) in primary_inputs(config, candidate) {
        args.push("-input".to_string());
        args.push(name);
        args.push(source);
    }
    for input in &config.inputs {
        push_split(&mut args, "-input", &fill("inputs", input, &with_run));
    }
    for output in &config.outputs {
        push_split(&mut args, "-output", &fill("outputs", output, &with_output_run));
    }

    let command = fill("command", &config.full_command, &for_command);
    args.extend(command.split_whitespace().map(str::to_string));

    JobInvocation::new(args)
}

/// Value of `[input]` for this candidate
fn input_reference(config: &JobFamilyConfig, candidate: &CandidateJob) -> String {
    if config.job_per_run {
        let dir = candidate.input.as_deref().unwrap_or_default();
        match dir.strip_prefix(TAPE_PREFIX) {
            Some(rest) if config.is_tape() => format!("{}{}", CACHE_PREFIX, rest),
            _ => dir.to_string(),
        }
    } else {
        format!(
            "{}{}{}",
            config.input_file_prefix, candidate.job_id, config.input_file_suffix
        )
    }
}

/// `(name, scheme:path)` pairs for the files the job reads directly
fn primary_inputs(config: &JobFamilyConfig, candidate: &CandidateJob) -> Vec<(String, String)> {
    let Some(input) = candidate.input.as_deref() else {
        return Vec::new();
    };
    let scheme = if config.is_tape() { "mss" } else { "file" };

    if !config.job_per_run {
        let name = input.rsplit('/').next().unwrap_or(input).to_string();
        return vec![(name, format!("{}:{}", scheme, input))];
    }

    // Jobs on disk find their own inputs; tape files must be staged by swif.
    if !config.is_tape() {
        return Vec::new();
    }
    candidate
        .files
        .iter()
        .map(|file| (file.clone(), format!("{}:{}/{}", scheme, input, file)))
        .collect()
}

fn fill(field: &str, template: &str, pairs: &[(&str, &str)]) -> String {
    let value = placeholder::substitute(template, pairs);
    for token in placeholder::unresolved(&value) {
        warn!("Unresolved placeholder {} left in {}: {}", token, field, value);
    }
    value
}

fn push_split(args: &mut Vec<String>, flag: &str, value: &str) {
    args.push(flag.to_string());
    args.extend(value.split_whitespace().map(str::to_string));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ConfigFormat;
    use std::path::Path;

    fn config(json: &str) -> JobFamilyConfig {
        let mut config = JobFamilyConfig::parse(json, ConfigFormat::Json).unwrap();
        config.finalize(Path::new("/cfg"));
        config
    }

    fn candidate(run: &str, id: &str, input: Option<&str>, files: &[&str]) -> CandidateJob {
        CandidateJob {
            run_token: run.to_string(),
            job_id: id.to_string(),
            input: input.map(str::to_string),
            files: files.iter().map(|f| f.to_string()).collect(),
        }
    }

    fn position(args: &[String], flag: &str) -> Option<usize> {
        args.iter().position(|a| a == flag)
    }

    #[test]
    fn test_per_file_invocation_order() {
        let config = config(
            r#"{"workflow": "ana", "project": "gluex", "track": "analysis",
                "name": "job_[jobID]", "cores": 4, "ram": "8GB", "os": "el9",
                "inputFilePrefix": "hd_", "inputFileSuffix": ".evio", "inputDir": "/cache/run[runNo]",
                "stdout": "/logs/[jobID].out", "stderr": "/logs/[jobID].err",
                "tags": ["file [jobID]"],
                "outputs": ["out.root file:/out/[runNo]/out_[jobID].root"],
                "shell": "/bin/bash", "command": "/home/u/ana.sh [input] [jobID]"}"#,
        );
        let job = candidate("000042", "000042_001", Some("/cache/run000042/hd_000042_001.evio"), &[]);
        let invocation = materialize(&config, &job);

        assert_eq!(
            invocation.render(),
            "swif add-job -create -workflow ana -project gluex -track analysis \
             -name job_000042_001 -cores 4 -ram 8GB -os el9 \
             -stdout /logs/000042_001.out -stderr /logs/000042_001.err \
             -tag file 000042_001 \
             -input hd_000042_001.evio file:/cache/run000042/hd_000042_001.evio \
             -output out.root file:/out/000042/out_000042_001.root \
             /bin/bash /home/u/ana.sh hd_000042_001.evio 000042_001"
        );
    }

    #[test]
    fn test_empty_optional_fields_are_omitted() {
        let config = config(r#"{"workflow": "w", "project": "p", "track": "t", "command": "run"}"#);
        let invocation = materialize(&config, &candidate("000001", "000001_000", None, &[]));
        assert_eq!(
            invocation.args,
            vec!["add-job", "-create", "-workflow", "w", "-project", "p", "-track", "t", "run"]
        );
    }

    #[test]
    fn test_output_run_token_per_file_and_per_run() {
        let json = r#"{"workflow": "w", "project": "p", "track": "t", "command": "run",
                      "outputs": ["[dirNo]/out_[jobID].root"], "jobPerRun": JOB_PER_RUN}"#;

        let per_file = config(&json.replace("JOB_PER_RUN", "false"));
        let invocation = materialize(&per_file, &candidate("000042", "000042_001", None, &[]));
        let at = position(&invocation.args, "-output").unwrap();
        assert_eq!(invocation.args[at + 1], "000042/out_000042_001.root");

        let per_run = config(&json.replace("JOB_PER_RUN", "true"));
        let invocation = materialize(&per_run, &candidate("000042", "000042", None, &[]));
        let at = position(&invocation.args, "-output").unwrap();
        assert_eq!(invocation.args[at + 1], "byRun/out_000042.root");
    }

    #[test]
    fn test_extra_inputs_get_run_token() {
        let config = config(
            r#"{"workflow": "w", "project": "p", "track": "t", "command": "run",
                "inputs": ["calib.db file:/calib/[runNo]/[jobID].db"]}"#,
        );
        let invocation = materialize(&config, &candidate("000007", "000007_002", None, &[]));
        let at = position(&invocation.args, "-input").unwrap();
        assert_eq!(invocation.args[at + 1], "calib.db");
        assert_eq!(invocation.args[at + 2], "file:/calib/000007/000007_002.db");
    }

    #[test]
    fn test_per_run_disk_input_has_no_file_arguments() {
        let config = config(
            r#"{"workflow": "w", "project": "p", "track": "t", "jobPerRun": true,
                "inputDir": "/volatile/run[runNo]", "command": "merge.sh [input] [jobID]"}"#,
        );
        let job = candidate("000003", "000003", Some("/volatile/run000003"), &["a.root", "b.root"]);
        let invocation = materialize(&config, &job);

        assert!(position(&invocation.args, "-input").is_none());
        assert_eq!(
            &invocation.args[invocation.args.len() - 3..],
            &["merge.sh", "/volatile/run000003", "000003"]
        );
    }

    #[test]
    fn test_per_run_tape_input_rewritten_and_staged() {
        let config = config(
            r#"{"workflow": "w", "project": "p", "track": "t", "jobPerRun": true,
                "inputDir": "/mss/data/run[runNo]", "command": "merge.sh [input]"}"#,
        );
        let job = candidate("000001", "000001", Some("/mss/data/run1"), &["a.evio", "b.evio"]);
        let invocation = materialize(&config, &job);

        assert_eq!(invocation.args.last().map(String::as_str), Some("/cache/data/run1"));
        let rendered = invocation.render();
        assert!(rendered.contains("-input a.evio mss:/mss/data/run1/a.evio"));
        assert!(rendered.contains("-input b.evio mss:/mss/data/run1/b.evio"));
    }

    #[test]
    fn test_per_run_disk_path_containing_mss_is_kept() {
        let config = config(
            r#"{"workflow": "w", "project": "p", "track": "t", "jobPerRun": true,
                "inputDir": "/volatile/mss/run[runNo]", "command": "merge.sh [input]"}"#,
        );
        let job = candidate("000001", "000001", Some("/volatile/mss/run000001"), &["a.evio"]);
        let invocation = materialize(&config, &job);

        assert_eq!(
            invocation.args.last().map(String::as_str),
            Some("/volatile/mss/run000001")
        );
        assert!(position(&invocation.args, "-input").is_none());
    }

    #[test]
    fn test_per_file_tape_input_uses_mss_scheme() {
        let config = config(
            r#"{"workflow": "w", "project": "p", "track": "t", "inputDir": "/mss/data",
                "inputFileSuffix": ".evio", "command": "run.sh [input]"}"#,
        );
        let job = candidate("000001", "x_1", Some("/mss/data/x_1.evio"), &[]);
        let invocation = materialize(&config, &job);
        assert!(invocation.render().contains("-input x_1.evio mss:/mss/data/x_1.evio"));
        assert_eq!(invocation.args.last().map(String::as_str), Some("x_1.evio"));
    }

    #[test]
    fn test_unmatched_placeholders_stay_literal() {
        let config = config(
            r#"{"workflow": "w", "project": "p", "track": "t", "name": "n_[runNo]", "command": "run"}"#,
        );
        let invocation = materialize(&config, &candidate("000001", "1", None, &[]));
        let at = position(&invocation.args, "-name").unwrap();
        assert_eq!(invocation.args[at + 1], "n_[runNo]");
    }

    #[test]
    fn test_materialize_is_deterministic() {
        let config = config(
            r#"{"workflow": "w", "project": "p", "track": "t", "command": "run [jobID]",
                "outputs": ["o [jobID]"], "tags": ["a b"]}"#,
        );
        let job = candidate("000001", "000001_000", None, &[]);
        assert_eq!(materialize(&config, &job), materialize(&config, &job));
    }
}
