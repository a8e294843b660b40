use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use slabs::SlabTable;

/// slabctl: validate and maintain tiered fee/commission slab tables.
#[derive(Parser, Debug)]
#[command(name = "slabctl", version)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate a candidate slab against a snapshot without writing
    Check(CheckArgs),

    /// Validate and append a new slab to a snapshot
    Add(AddArgs),

    /// Validate and replace an existing slab in a snapshot
    Edit(EditArgs),

    /// Delete a slab from a snapshot
    Remove(RemoveArgs),

    /// Report every overlap and invalid slab in a snapshot
    Audit(AuditArgs),

    /// Find the applicable slab for an amount and print the charge
    Quote(QuoteArgs),
}

/// Where the existing slabs come from.
#[derive(Args, Debug)]
pub struct SnapshotArgs {
    /// JSON snapshot: an array of slabs, or a backend list response with --table
    pub snapshot: PathBuf,

    /// Table the snapshot belongs to (activation-fee, referral-bonus,
    /// level-commission, monthly-profit-share, withdrawal-charge, transfer-fee)
    #[arg(long)]
    pub table: Option<SlabTable>,
}

/// Candidate slab fields, as typed into the admin form.
#[derive(Args, Debug)]
pub struct DraftArgs {
    /// Referral level (level-scoped tables)
    #[arg(long, default_value = "")]
    pub level: String,

    /// Lower bound, inclusive
    #[arg(long, default_value = "")]
    pub from: String,

    /// Upper bound, exclusive; omit for an open-ended slab
    #[arg(long, default_value = "")]
    pub to: String,

    /// Value type (flat, percent)
    #[arg(long = "type", default_value = "flat")]
    pub value_type: String,

    /// Fee or commission magnitude
    #[arg(long, default_value = "")]
    pub value: String,

    /// Commission percentage (monthly profit share)
    #[arg(long, default_value = "")]
    pub commission: String,
}

/// Arguments for the `check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub source: SnapshotArgs,

    #[command(flatten)]
    pub draft: DraftArgs,

    /// Treat the candidate as a replacement for this slab id
    #[arg(long)]
    pub editing_id: Option<String>,

    /// Require new slabs to start after the last slab's upper bound
    #[arg(long)]
    pub strict_tail: bool,

    /// Print the verdict as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `add` subcommand.
#[derive(Args, Debug)]
pub struct AddArgs {
    #[command(flatten)]
    pub source: SnapshotArgs,

    #[command(flatten)]
    pub draft: DraftArgs,

    /// Require new slabs to start after the last slab's upper bound
    #[arg(long)]
    pub strict_tail: bool,

    /// Write the updated snapshot here instead of in place
    #[arg(long)]
    pub out: Option<PathBuf>,
}

/// Arguments for the `edit` subcommand.
#[derive(Args, Debug)]
pub struct EditArgs {
    #[command(flatten)]
    pub source: SnapshotArgs,

    /// Id of the slab to replace
    pub id: String,

    #[command(flatten)]
    pub draft: DraftArgs,

    /// Write the updated snapshot here instead of in place
    #[arg(long)]
    pub out: Option<PathBuf>,
}

/// Arguments for the `remove` subcommand.
#[derive(Args, Debug)]
pub struct RemoveArgs {
    #[command(flatten)]
    pub source: SnapshotArgs,

    /// Id of the slab to delete
    pub id: String,

    /// Write the updated snapshot here instead of in place
    #[arg(long)]
    pub out: Option<PathBuf>,
}

/// Arguments for the `audit` subcommand.
#[derive(Args, Debug)]
pub struct AuditArgs {
    #[command(flatten)]
    pub source: SnapshotArgs,
}

/// Arguments for the `quote` subcommand.
#[derive(Args, Debug)]
pub struct QuoteArgs {
    #[command(flatten)]
    pub source: SnapshotArgs,

    /// Transaction amount
    pub amount: String,

    /// Referral level (level-scoped tables)
    #[arg(long)]
    pub level: Option<u8>,

    /// Print the quote as JSON
    #[arg(long)]
    pub json: bool,
}
