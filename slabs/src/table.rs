use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;

use crate::error::{Result, SlabError};
use crate::policy::ValidationPolicy;
use crate::types::{
    ApiResponse, BonusList, CommissionList, CommissionRecord, FeeRecord, Level,
    ProfitShareRecord, Slab, SlabRecord, SlabTerms,
};

/// Lowest referral level accepted by level-scoped tables.
pub const MIN_LEVEL: Level = 1;
/// Highest referral level accepted by level-scoped tables.
pub const MAX_LEVEL: Level = 15;

/// The slab tables administered by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlabTable {
    ActivationFee,
    ReferralBonus,
    LevelCommission,
    MonthlyProfitShare,
    WithdrawalCharge,
    TransferFee,
}

impl SlabTable {
    pub const ALL: [SlabTable; 6] = [
        SlabTable::ActivationFee,
        SlabTable::ReferralBonus,
        SlabTable::LevelCommission,
        SlabTable::MonthlyProfitShare,
        SlabTable::WithdrawalCharge,
        SlabTable::TransferFee,
    ];

    /// Kebab-case identifier used on the command line.
    pub fn slug(self) -> &'static str {
        match self {
            SlabTable::ActivationFee => "activation-fee",
            SlabTable::ReferralBonus => "referral-bonus",
            SlabTable::LevelCommission => "level-commission",
            SlabTable::MonthlyProfitShare => "monthly-profit-share",
            SlabTable::WithdrawalCharge => "withdrawal-charge",
            SlabTable::TransferFee => "transfer-fee",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            SlabTable::ActivationFee => "activation fee",
            SlabTable::ReferralBonus => "referral bonus",
            SlabTable::LevelCommission => "level commission",
            SlabTable::MonthlyProfitShare => "monthly profit share",
            SlabTable::WithdrawalCharge => "withdrawal charge",
            SlabTable::TransferFee => "wallet transfer fee",
        }
    }

    /// GET path listing the table's slabs on the admin backend.
    pub fn collection_path(self) -> &'static str {
        match self {
            SlabTable::ActivationFee => "/admin/activation-fees",
            SlabTable::ReferralBonus => "/referral-bonus",
            SlabTable::LevelCommission => "/level-commissions",
            SlabTable::MonthlyProfitShare => "/admin/daily/profit/share",
            SlabTable::WithdrawalCharge => "/admin/get-all-withdrawl",
            SlabTable::TransferFee => "/admin/wallet-transaction-fees/transfer",
        }
    }

    /// Whether slabs are grouped per referral level.
    pub fn is_level_scoped(self) -> bool {
        matches!(
            self,
            SlabTable::ReferralBonus | SlabTable::LevelCommission | SlabTable::MonthlyProfitShare
        )
    }

    /// Validation rules for this table. The sequential-tail rule is off; callers
    /// opt in with [`ValidationPolicy::with_strict_tail`].
    pub fn default_policy(self) -> ValidationPolicy {
        if self.is_level_scoped() {
            ValidationPolicy::levels(MIN_LEVEL, MAX_LEVEL)
        } else {
            ValidationPolicy::unscoped()
        }
    }

    /// Decode a list response body for this table into slabs.
    ///
    /// # Errors
    ///
    /// Returns `SlabError::Json` for bodies that do not match the table's shape,
    /// `SlabError::Api` for unsuccessful responses and
    /// `SlabError::MalformedRecord` for rows without an id or level.
    pub fn decode_list(self, body: &str) -> Result<Vec<Slab>> {
        match self {
            SlabTable::ActivationFee | SlabTable::WithdrawalCharge | SlabTable::TransferFee => {
                let rows: Vec<FeeRecord> = decode_envelope(body)?;
                into_slabs(rows)
            }
            SlabTable::ReferralBonus => {
                let list: BonusList = decode_envelope(body)?;
                into_slabs(list.bonuses)
            }
            SlabTable::LevelCommission => {
                let list: CommissionList = decode_envelope(body)?;
                into_slabs(list.commissions)
            }
            SlabTable::MonthlyProfitShare => {
                let resp: ApiResponse<Vec<ProfitShareRecord>> = serde_json::from_str(body)?;
                into_slabs(resp.into_data_or_default()?)
            }
        }
    }

    /// Render `slabs` as this table's list response, so the result decodes
    /// again with [`SlabTable::decode_list`].
    ///
    /// # Errors
    ///
    /// Returns `SlabError::Json` if the body cannot be serialized.
    pub fn encode_list(self, slabs: &[Slab]) -> Result<String> {
        let message = format!("{} slabs", self.display_name());
        let total = Some(slabs.len() as u64);
        let body = match self {
            SlabTable::ActivationFee | SlabTable::WithdrawalCharge | SlabTable::TransferFee => {
                let rows: Vec<FeeRecord> = from_slabs(slabs);
                serde_json::to_string_pretty(&ApiResponse::ok(rows, message))?
            }
            SlabTable::ReferralBonus => {
                let list = BonusList {
                    bonuses: from_slabs(slabs),
                    total,
                };
                serde_json::to_string_pretty(&ApiResponse::ok(list, message))?
            }
            SlabTable::LevelCommission => {
                let list = CommissionList {
                    commissions: from_slabs(slabs),
                    total,
                };
                serde_json::to_string_pretty(&ApiResponse::ok(list, message))?
            }
            SlabTable::MonthlyProfitShare => {
                let rows: Vec<ProfitShareRecord> = from_slabs(slabs);
                serde_json::to_string_pretty(&ApiResponse::ok(rows, message))?
            }
        };
        Ok(body)
    }

    /// Build the create/update request body for validated terms.
    ///
    /// # Errors
    ///
    /// Returns `SlabError::Json` if the payload cannot be serialized.
    pub fn encode_payload(self, terms: &SlabTerms) -> Result<serde_json::Value> {
        let value = match self {
            SlabTable::ActivationFee | SlabTable::WithdrawalCharge | SlabTable::TransferFee => {
                serde_json::to_value(FeeRecord::from_terms(terms))?
            }
            SlabTable::ReferralBonus | SlabTable::LevelCommission => {
                serde_json::to_value(CommissionRecord::from_terms(terms))?
            }
            SlabTable::MonthlyProfitShare => {
                serde_json::to_value(ProfitShareRecord::from_terms(terms))?
            }
        };
        Ok(value)
    }
}

impl fmt::Display for SlabTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for SlabTable {
    type Err = SlabError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        SlabTable::ALL
            .into_iter()
            .find(|t| t.slug() == wanted)
            .ok_or_else(|| SlabError::UnknownTable(s.to_string()))
    }
}

fn decode_envelope<T: DeserializeOwned>(body: &str) -> Result<T> {
    let resp: ApiResponse<T> = serde_json::from_str(body)?;
    resp.into_data()
}

fn into_slabs<R: SlabRecord>(rows: Vec<R>) -> Result<Vec<Slab>> {
    rows.into_iter().map(SlabRecord::into_slab).collect()
}

fn from_slabs<R: SlabRecord>(slabs: &[Slab]) -> Vec<R> {
    slabs.iter().map(R::from_slab).collect()
}
