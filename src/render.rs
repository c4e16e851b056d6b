// src/render.rs

//! Output rendering for mapped errors.
//!
//! `stdout`/`pretty`/`file` all emit the same JSON envelope:
//!
//! {
//!   "ok": false,
//!   "meta": { "mode": "scoped", "model": "member", "reports": [...] },
//!   "errors": { "Email": ["Invalid format"], "": ["General failure"] }
//! }
//!
//! `simple` is for humans; unattributed messages are shown under
//! `(summary)` so they are never dropped from view.

use anyhow::{bail, Context, Result};
use serde_json::Value;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use crate::config::OutputMode;
use crate::engine::{MappingMode, UNATTRIBUTED_KEY};
use crate::model_state::ModelState;
use crate::util::ensure_dir;

pub struct RenderContext<'a> {
    pub reports: &'a [PathBuf],
    pub mode: MappingMode,
    pub model: Option<&'a str>,
    pub prefix: Option<&'a str>,
    pub state: &'a ModelState,
}

pub fn build_output_envelope(ctx: &RenderContext<'_>) -> Result<Value> {
    let mut meta = serde_json::Map::new();
    meta.insert("mode".to_string(), serde_json::to_value(ctx.mode)?);
    if let Some(model) = ctx.model {
        meta.insert("model".to_string(), Value::String(model.to_string()));
    }
    if let Some(prefix) = ctx.prefix {
        meta.insert("prefix".to_string(), Value::String(prefix.to_string()));
    }
    let reports = ctx
        .reports
        .iter()
        .map(|p| Value::String(p.display().to_string()))
        .collect::<Vec<_>>();
    meta.insert("reports".to_string(), Value::Array(reports));

    let mut envelope = serde_json::Map::new();
    envelope.insert("ok".to_string(), Value::Bool(ctx.state.is_valid()));
    envelope.insert("meta".to_string(), Value::Object(meta));
    envelope.insert(
        "errors".to_string(),
        serde_json::to_value(ctx.state).context("Failed to serialise error dictionary")?,
    );

    Ok(Value::Object(envelope))
}

pub fn render_output(mode: OutputMode, ctx: &RenderContext<'_>, envelope: &Value) -> Result<String> {
    match mode {
        OutputMode::Stdout => serde_json::to_string(envelope)
            .context("Failed to format output as JSON"),
        OutputMode::Pretty => serde_json::to_string_pretty(envelope)
            .context("Failed to format output as pretty JSON"),
        OutputMode::Simple => Ok(format_simple_output(ctx, should_use_color())),
        OutputMode::File => bail!("output.mode = file should be handled separately"),
    }
}

pub fn format_simple_output(ctx: &RenderContext<'_>, use_color: bool) -> String {
    let ok = ctx.state.is_valid();
    let status = if ok { "OK" } else { "ERRORS" };
    let status = paint(status, if ok { "32" } else { "31" }, use_color);

    let mut out = String::new();
    out.push_str(&format!("{} {} report(s)\n", status, ctx.reports.len()));
    if let Some(model) = ctx.model {
        out.push_str(&format!("model: {}\n", model));
    }

    for (key, messages) in ctx.state.iter() {
        let label = if key == UNATTRIBUTED_KEY {
            "(summary)".to_string()
        } else {
            key.to_string()
        };
        for message in messages {
            out.push_str(&format!("{}: {}\n", paint(&label, "1", use_color), message));
        }
    }

    out.trim_end().to_string()
}

fn should_use_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    std::io::stdout().is_terminal()
}

fn paint(text: &str, color: &str, use_color: bool) -> String {
    if use_color {
        format!("\x1b[{}m{}\x1b[0m", color, text)
    } else {
        text.to_string()
    }
}

pub fn write_output_file(path: &Path, payload: &Value) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_dir(parent)?;
        }
    }

    let bytes = serde_json::to_vec_pretty(payload)
        .context("Failed to serialize output JSON")?;

    std::fs::write(path, bytes)
        .with_context(|| format!("Failed to write output file {:?}", path))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_state() -> ModelState {
        let mut state = ModelState::new();
        state.add_model_error("Email", "Invalid format");
        state.add_model_error("", "General failure");
        state
    }

    #[test]
    fn simple_output_labels_summary_messages() {
        let state = sample_state();
        let reports = vec![PathBuf::from("reports/a.json")];
        let ctx = RenderContext {
            reports: &reports,
            mode: MappingMode::Scoped,
            model: Some("member"),
            prefix: None,
            state: &state,
        };

        let text = format_simple_output(&ctx, false);
        assert_eq!(
            text,
            "ERRORS 1 report(s)\nmodel: member\n(summary): General failure\nEmail: Invalid format"
        );
    }

    #[test]
    fn envelope_carries_meta_and_errors() {
        let state = sample_state();
        let reports = vec![PathBuf::from("a.json")];
        let ctx = RenderContext {
            reports: &reports,
            mode: MappingMode::Scoped,
            model: Some("member"),
            prefix: Some("Input"),
            state: &state,
        };

        let envelope = build_output_envelope(&ctx).unwrap();
        assert_eq!(envelope["ok"], Value::Bool(false));
        assert_eq!(envelope["meta"]["mode"], "scoped");
        assert_eq!(envelope["meta"]["prefix"], "Input");
        assert_eq!(envelope["errors"]["Email"][0], "Invalid format");
    }
}
