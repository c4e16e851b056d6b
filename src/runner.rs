// src/runner.rs

use crate::cli::{Cli, Command};
use crate::config::{Config, OutputMode};
use crate::engine::{validate_report, MappingMode, ModelDescriptor};
use crate::model_state::ModelState;
use crate::render::{build_output_envelope, render_output, write_output_file, RenderContext};
use crate::report::{discover_reports, load_report};
use crate::util::write_if_missing;

use anyhow::{bail, Context, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Entry point from `main.rs`.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Init => init_scaffold(Path::new(".")),

        Command::Check { paths } => run_check(&paths),

        Command::Map {
            reports,
            config,
            model,
            prefix,
            output,
            output_file,
            fail_on_errors,
        } => {
            let explicit_config = config != Path::new("statusmap.yaml");
            let mut cfg = Config::load(&config, !explicit_config)?;

            // CLI overrides
            if prefix.is_some() {
                cfg.prefix = prefix;
            }
            if let Some(mode) = output {
                cfg.output.mode = mode;
            }
            if let Some(path) = output_file {
                cfg.output.mode = OutputMode::File;
                cfg.output.file = Some(path.to_string_lossy().to_string());
            }
            cfg.validate()?;

            let request = MapRequest {
                reports,
                model: model.as_deref().map(|name| cfg.model(name)).transpose()?,
                prefix: cfg.prefix.clone(),
            };

            let state = map_reports(&request)?;
            emit(&cfg, &request, &state)?;

            if fail_on_errors && !state.is_valid() {
                bail!("{} error(s) reported", state.error_count());
            }
            Ok(())
        }
    }
}

/* ---------------- map ---------------- */

struct MapRequest {
    reports: Vec<PathBuf>,
    model: Option<ModelDescriptor>,
    prefix: Option<String>,
}

fn map_reports(request: &MapRequest) -> Result<ModelState> {
    let mut state = ModelState::new();

    for path in &request.reports {
        let report = load_report(path)?;

        let validation = validate_report(&report);
        if !validation.is_valid() {
            let issues = validation
                .errors
                .iter()
                .map(|e| format!("{}: {}", e.code, e.message))
                .collect::<Vec<_>>();
            bail!(
                "Malformed status report {}:\n  {}",
                path.display(),
                issues.join("\n  ")
            );
        }

        let mapped = match &request.model {
            Some(model) => report.map_errors(Some(model), request.prefix.as_deref()),
            None => report.map_errors_unscoped(),
        };

        tracing::info!(
            report = %path.display(),
            kind = report.kind(),
            messages = mapped.len(),
            "report mapped"
        );

        state.merge(mapped);
    }

    Ok(state)
}

fn emit(cfg: &Config, request: &MapRequest, state: &ModelState) -> Result<()> {
    let ctx = RenderContext {
        reports: &request.reports,
        mode: MappingMode::for_model(request.model.as_ref()),
        model: request.model.as_ref().map(|m| m.name.as_str()),
        prefix: request.prefix.as_deref(),
        state,
    };
    let envelope = build_output_envelope(&ctx)?;

    if cfg.output.mode == OutputMode::File {
        let path = cfg
            .output
            .file
            .as_ref()
            .context("output.file must be set when output.mode = file")?;
        return write_output_file(Path::new(path), &envelope);
    }

    println!("{}", render_output(cfg.output.mode, &ctx, &envelope)?);
    Ok(())
}

/* ---------------- check ---------------- */

fn run_check(paths: &[PathBuf]) -> Result<()> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            files.extend(discover_reports(path)?);
        } else {
            files.push(path.clone());
        }
    }

    if files.is_empty() {
        bail!("No status reports found");
    }

    let mut any_invalid = false;
    let mut results: Vec<Value> = Vec::new();

    for file in &files {
        let result = match load_report(file) {
            Ok(report) => {
                let validation = validate_report(&report);
                serde_json::json!({
                    "report": file.to_string_lossy(),
                    "kind": report.kind(),
                    "valid": validation.is_valid(),
                    "errors": validation.errors,
                })
            }
            Err(e) => serde_json::json!({
                "report": file.to_string_lossy(),
                "valid": false,
                "errors": [{ "code": "REPORT_UNREADABLE", "message": format!("{:#}", e) }],
            }),
        };

        if result["valid"] != Value::Bool(true) {
            any_invalid = true;
        }
        results.push(result);
    }

    // Always print one stable JSON blob.
    let out = serde_json::json!({
        "ok": !any_invalid,
        "results": results
    });
    println!("{}", serde_json::to_string(&out)?);

    if any_invalid {
        bail!("One or more reports are malformed");
    }

    Ok(())
}

/* ---------------- init ---------------- */

fn init_scaffold(root: &Path) -> Result<()> {
    let files = [
        ("statusmap.yaml", default_config_yaml()),
        ("reports/example.json", default_report_json()),
    ];

    for (rel, contents) in files {
        if write_if_missing(&root.join(rel), contents.trim_start())? {
            eprintln!("Created {}", rel);
        } else {
            eprintln!("{} already exists (skipping)", rel);
        }
    }

    Ok(())
}

fn default_config_yaml() -> &'static str {
    r#"
models:
  member:
    fields: [Name, Email, Phone]

# prefix: Input

output:
  mode: simple # simple | pretty | stdout | file
  # file: errors.json
"#
}

fn default_report_json() -> &'static str {
    r#"
{
  "kind": "biz",
  "valid": false,
  "errors": [
    { "member_names": ["Email"], "message": "Invalid format" },
    { "member_names": [], "message": "General failure" }
  ]
}
"#
}
