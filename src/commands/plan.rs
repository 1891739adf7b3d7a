//! Command: derive and print the resource plan.
use std::fmt::Write as _;
use std::io::Write as _;

use anyhow::{Context as _, Result};

use super::{CommandSetup, is_removal, set_summary};
use crate::account::{Plan, plan_accounts};
use crate::cli::{GlobalOpts, OutputFormat, PlanOpts};
use crate::logging::{AccountStatus, Logger};
use crate::resources::{Descriptor, ResourceSet};

/// Run the plan command.
///
/// # Errors
///
/// Returns an error if the declarations cannot be loaded, any account fails
/// to derive, or the plan cannot be written to stdout.
pub fn run(global: &GlobalOpts, opts: &PlanOpts, log: &Logger) -> Result<()> {
    let setup = CommandSetup::init(global, log)?;

    for title in &opts.only {
        if !setup.config.accounts.iter().any(|a| &a.title == title) {
            log.warn(&format!("--only: no account titled '{title}'"));
        }
    }
    let config = setup.config.filtered(&opts.only);

    log.stage("Deriving resources");
    let plan = plan_accounts(&config.accounts, &config.policy).context("deriving resources")?;

    for set in plan.sets() {
        let status = if is_removal(set) {
            AccountStatus::Removed
        } else {
            AccountStatus::Planned
        };
        log.record_account(set.account(), status, Some(set_summary(set).as_str()));
    }

    let output = match opts.format {
        OutputFormat::Json => render_json(&plan)?,
        OutputFormat::Text => render_text(&plan),
    };
    let digest = plan.digest().context("hashing plan")?;

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(output.as_bytes())
        .context("writing plan")?;
    stdout.flush().context("writing plan")?;

    log.debug(&format!("{} resource(s) in total", plan.resource_count()));
    log.info(&format!("digest: sha256:{digest}"));
    log.print_summary();
    Ok(())
}

/// Render the hand-off document as pretty-printed JSON with a trailing newline.
///
/// # Errors
///
/// Returns an error if the document cannot be serialised.
pub fn render_json(plan: &Plan) -> Result<String> {
    let document = plan.document().context("building hand-off document")?;
    let mut json = serde_json::to_string_pretty(&document).context("serialising plan")?;
    json.push('\n');
    Ok(json)
}

/// Render a human-readable listing of each account in apply order.
#[must_use]
pub fn render_text(plan: &Plan) -> String {
    let mut out = String::new();
    for (i, set) in plan.sets().iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        render_set(&mut out, set);
    }
    out
}

fn render_set(out: &mut String, set: &ResourceSet) {
    // write! to a String is infallible; unwrap_or(()) makes that explicit.
    writeln!(out, "{}:", set.account()).unwrap_or(());
    for (n, resource) in set.apply_order().into_iter().enumerate() {
        writeln!(
            out,
            "  {}. {} ({})",
            n + 1,
            resource.reference(),
            resource.ensure()
        )
        .unwrap_or(());
    }
    for edge in set.edges() {
        writeln!(out, "     {edge}").unwrap_or(());
    }
}
