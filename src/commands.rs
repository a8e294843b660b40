use std::io::Write;
use std::path::Path;
use std::str::FromStr;

use rust_decimal::Decimal;
use slabs::{
    audit, find_slab, quote, validate, FormInput, MemoryStore, Rejection, Slab, SlabDraft,
    SlabEditor, SlabError, SlabTable, SubmitError, ValidationPolicy, Verdict,
};
use tracing::{debug, info, warn};

use crate::cli::{
    AddArgs, AuditArgs, CheckArgs, DraftArgs, EditArgs, QuoteArgs, RemoveArgs, SnapshotArgs,
};
use crate::config::CliConfig;
use crate::error::CliError;
use crate::{output, snapshot};

/// Whether a command's subject passed. Rejections are not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Accepted,
    Rejected,
}

impl DraftArgs {
    fn to_form(&self) -> FormInput {
        FormInput {
            level: self.level.clone(),
            from_amount: self.from.clone(),
            to_amount: self.to.clone(),
            value_type: self.value_type.clone(),
            value: self.value.clone(),
            commission_percentage: self.commission.clone(),
        }
    }
}

pub fn run_check<W: Write>(args: &CheckArgs, config: &CliConfig, out: &mut W) -> Result<Outcome, CliError> {
    let existing = snapshot::load(&args.source.snapshot, args.source.table)?;
    let policy = config.policy(args.source.table, args.strict_tail);

    let result = SlabDraft::parse(&args.draft.to_form())
        .and_then(|draft| validate(&draft, &existing, args.editing_id.as_deref(), &policy));
    output::write_verdict(out, &Verdict::from(&result), args.json)?;
    Ok(outcome_of(&result))
}

pub fn run_add<W: Write>(args: &AddArgs, config: &CliConfig, out: &mut W) -> Result<Outcome, CliError> {
    let policy = config.policy(args.source.table, args.strict_tail);
    let mut editor = open_editor(&args.source, policy)?;

    let draft = match SlabDraft::parse(&args.draft.to_form()) {
        Ok(draft) => draft,
        Err(rejection) => return report_rejection(out, &rejection),
    };
    match editor.submit(&draft, None) {
        Ok(slab) => {
            log_payload(args.source.table, &slab)?;
            write_back(&args.source, args.out.as_deref(), editor)?;
            output::write_saved(out, "added", &slab)?;
            Ok(Outcome::Accepted)
        }
        Err(SubmitError::Rejected(rejection)) => report_rejection(out, &rejection),
        Err(SubmitError::Store(err)) => Err(err.into()),
    }
}

pub fn run_edit<W: Write>(args: &EditArgs, config: &CliConfig, out: &mut W) -> Result<Outcome, CliError> {
    let policy = config.policy(args.source.table, false);
    let mut editor = open_editor(&args.source, policy)?;

    let draft = match SlabDraft::parse(&args.draft.to_form()) {
        Ok(draft) => draft,
        Err(rejection) => return report_rejection(out, &rejection),
    };
    match editor.submit(&draft, Some(&args.id)) {
        Ok(slab) => {
            log_payload(args.source.table, &slab)?;
            write_back(&args.source, args.out.as_deref(), editor)?;
            output::write_saved(out, "updated", &slab)?;
            Ok(Outcome::Accepted)
        }
        Err(SubmitError::Rejected(rejection)) => report_rejection(out, &rejection),
        Err(SubmitError::Store(err)) => Err(err.into()),
    }
}

pub fn run_remove<W: Write>(args: &RemoveArgs, config: &CliConfig, out: &mut W) -> Result<Outcome, CliError> {
    let policy = config.policy(args.source.table, false);
    let mut editor = open_editor(&args.source, policy)?;
    let removed = find_slab(editor.snapshot(), &args.id)?.clone();

    editor.remove(&args.id)?;
    write_back(&args.source, args.out.as_deref(), editor)?;
    output::write_saved(out, "removed", &removed)?;
    Ok(Outcome::Accepted)
}

pub fn run_audit<W: Write>(args: &AuditArgs, config: &CliConfig, out: &mut W) -> Result<Outcome, CliError> {
    let existing = snapshot::load(&args.source.snapshot, args.source.table)?;
    let policy = config.policy(args.source.table, false);

    let findings = audit(&existing, &policy);
    if !findings.is_empty() {
        warn!(count = findings.len(), "snapshot has invariant violations");
    }
    output::write_audit(out, &findings)?;
    Ok(if findings.is_empty() {
        Outcome::Accepted
    } else {
        Outcome::Rejected
    })
}

pub fn run_quote<W: Write>(args: &QuoteArgs, config: &CliConfig, out: &mut W) -> Result<Outcome, CliError> {
    let existing = snapshot::load(&args.source.snapshot, args.source.table)?;
    let policy = config.policy(args.source.table, false);
    let amount = Decimal::from_str(args.amount.trim())
        .map_err(|_| CliError::InvalidAmount(args.amount.clone()))?;
    if amount < Decimal::ZERO {
        return Err(CliError::InvalidAmount(args.amount.clone()));
    }

    let found = quote(&existing, &policy, args.level, amount).map_err(|err| match err {
        SlabError::ChargeOverflow { .. } => CliError::InvalidAmount(args.amount.clone()),
        other => other.into(),
    })?;
    output::write_quote(out, amount, found, args.json)?;
    Ok(if found.is_some() {
        Outcome::Accepted
    } else {
        Outcome::Rejected
    })
}

fn open_editor(
    source: &SnapshotArgs,
    policy: ValidationPolicy,
) -> Result<SlabEditor<MemoryStore>, CliError> {
    let existing = snapshot::load(&source.snapshot, source.table)?;
    let store = MemoryStore::with_slabs(existing)?;
    Ok(SlabEditor::new(store, policy)?)
}

fn write_back(
    source: &SnapshotArgs,
    out: Option<&Path>,
    editor: SlabEditor<MemoryStore>,
) -> Result<(), CliError> {
    let target = out.unwrap_or(source.snapshot.as_path());
    let slabs = editor.into_store().into_slabs();
    snapshot::save(target, source.table, &slabs)?;
    info!(path = %target.display(), count = slabs.len(), "snapshot written");
    Ok(())
}

/// Log the create/update body the backend would receive for `slab`.
fn log_payload(table: Option<SlabTable>, slab: &Slab) -> Result<(), CliError> {
    if let Some(table) = table {
        let payload = table.encode_payload(&slab.terms())?;
        debug!(table = %table, id = %slab.id, %payload, "backend payload");
    }
    Ok(())
}

fn report_rejection<W: Write>(out: &mut W, rejection: &Rejection) -> Result<Outcome, CliError> {
    output::write_verdict(out, &Verdict::rejected(rejection), false)?;
    Ok(Outcome::Rejected)
}

fn outcome_of<T>(result: &Result<T, Rejection>) -> Outcome {
    match result {
        Ok(_) => Outcome::Accepted,
        Err(_) => Outcome::Rejected,
    }
}
