use std::io::Write;

use rust_decimal::Decimal;
use serde::Serialize;
use slabs::{AuditFinding, Slab, Verdict};

use crate::error::CliError;

/// JSON shape of a `quote` result.
#[derive(Debug, Serialize)]
struct QuoteLine<'a> {
    amount: Decimal,
    slab: Option<&'a Slab>,
    charge: Option<Decimal>,
}

/// Print a validation verdict as a line of text or JSON.
pub fn write_verdict<W: Write>(writer: &mut W, verdict: &Verdict, json: bool) -> Result<(), CliError> {
    if json {
        serde_json::to_writer(&mut *writer, verdict)?;
        writeln!(writer)?;
    } else if verdict.valid {
        writeln!(writer, "valid")?;
    } else {
        writeln!(
            writer,
            "rejected: {}",
            verdict.reason.as_deref().unwrap_or("unknown reason")
        )?;
    }
    writer.flush()?;
    Ok(())
}

/// Print one line per finding, or `ok` for a clean snapshot.
pub fn write_audit<W: Write>(writer: &mut W, findings: &[AuditFinding]) -> Result<(), CliError> {
    if findings.is_empty() {
        writeln!(writer, "ok")?;
    }
    for finding in findings {
        writeln!(writer, "{finding}")?;
    }
    writer.flush()?;
    Ok(())
}

/// Print the applicable slab and charge for `amount`.
pub fn write_quote<W: Write>(
    writer: &mut W,
    amount: Decimal,
    quote: Option<(&Slab, Decimal)>,
    json: bool,
) -> Result<(), CliError> {
    if json {
        let line = QuoteLine {
            amount,
            slab: quote.map(|(s, _)| s),
            charge: quote.map(|(_, c)| c),
        };
        serde_json::to_writer(&mut *writer, &line)?;
        writeln!(writer)?;
    } else {
        match quote {
            Some((slab, charge)) => writeln!(
                writer,
                "{amount} -> slab {} {} {} {} => charge {charge}",
                slab.id,
                slab.bounds(),
                slab.value_type,
                slab.value
            )?,
            None => writeln!(writer, "{amount} -> no applicable slab")?,
        }
    }
    writer.flush()?;
    Ok(())
}

/// Confirm a write to the snapshot.
pub fn write_saved<W: Write>(writer: &mut W, action: &str, slab: &Slab) -> Result<(), CliError> {
    match slab.level {
        Some(level) => writeln!(writer, "{action} {} level {level} {}", slab.id, slab.bounds())?,
        None => writeln!(writer, "{action} {} {}", slab.id, slab.bounds())?,
    }
    writer.flush()?;
    Ok(())
}
