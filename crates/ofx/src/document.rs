//! Typed OFX statement model bound to the repaired buffer.
//!
//! This does not cover the complete OFX specification; it models the
//! sign-on and bank-statement response sets that statement downloads
//! actually contain. Missing blocks deserialize to their default values,
//! matching how lenient real-world exports are.

use std::io::Read;

use log::trace;
use memchr::memmem;
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use crate::cleaner::{CleanError, Cleaner};
use crate::preprocess::preprocess;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to read OFX input: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Clean(#[from] CleanError),
    #[error("failed to decode OFX document: {0}")]
    Decode(#[from] quick_xml::DeError),
}

/// Transaction type per OFX 2.2 §11.4.4.3.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub enum TransactionType {
    #[serde(rename = "DEBIT")]
    Debit,
    #[serde(rename = "CREDIT")]
    Credit,
    #[serde(rename = "INT")]
    Interest,
    #[serde(rename = "DIV")]
    Dividend,
    #[serde(rename = "FEE")]
    Fee,
    #[serde(rename = "SRVCHG")]
    ServiceCharge,
    #[serde(rename = "DEP")]
    Deposit,
    #[serde(rename = "ATM")]
    Atm,
    #[serde(rename = "POS")]
    Pos,
    #[serde(rename = "XFER")]
    Transfer,
    #[serde(rename = "CHECK")]
    Check,
    #[serde(rename = "PAYMENT")]
    Payment,
    #[serde(rename = "CASH")]
    Cash,
    #[serde(rename = "DIRECTDEP")]
    DirectDeposit,
    #[serde(rename = "DIRECTDEBIT")]
    DirectDebit,
    #[serde(rename = "REPEATPMT")]
    RepeatPayment,
    #[default]
    #[serde(other)]
    Other,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Status {
    #[serde(rename = "CODE")]
    pub code: i32,
    #[serde(rename = "SEVERITY")]
    pub severity: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FinancialInstitution {
    #[serde(rename = "ORG")]
    pub organization: String,
    #[serde(rename = "FID")]
    pub id: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SignOnResponse {
    #[serde(rename = "STATUS")]
    pub status: Status,
    #[serde(rename = "DTSERVER")]
    pub date: String,
    #[serde(rename = "LANGUAGE")]
    pub language: String,
    #[serde(rename = "FI")]
    pub institution: Option<FinancialInstitution>,
    #[serde(rename = "INTU.BID")]
    pub intuit_id: Option<String>,
}

/// Sign-on message set response (`SIGNONMSGSRSV1`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SignOnMessageSet {
    #[serde(rename = "SONRS")]
    pub response: SignOnResponse,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Transaction {
    #[serde(rename = "TRNTYPE")]
    pub kind: TransactionType,
    #[serde(rename = "DTPOSTED")]
    pub posted: String,
    #[serde(rename = "TRNAMT")]
    pub amount: Decimal,
    #[serde(rename = "FITID")]
    pub fit_id: String,
    #[serde(rename = "DTUSER")]
    pub date: Option<String>,
    #[serde(rename = "NAME")]
    pub name: Option<String>,
    #[serde(rename = "PAYEE")]
    pub payee: Option<String>,
    #[serde(rename = "MEMO")]
    pub memo: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Balance {
    #[serde(rename = "BALAMT")]
    pub amount: Decimal,
    #[serde(rename = "DTASOF")]
    pub date: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BankAccount {
    #[serde(rename = "BANKID")]
    pub bank_id: String,
    #[serde(rename = "ACCTID")]
    pub account_id: String,
    #[serde(rename = "ACCTTYPE")]
    pub account_type: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TransactionList {
    #[serde(rename = "DTSTART")]
    pub start: String,
    #[serde(rename = "DTEND")]
    pub end: String,
    #[serde(rename = "STMTTRN")]
    pub transactions: Vec<Transaction>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct StatementResponse {
    #[serde(rename = "CURDEF")]
    pub currency: String,
    #[serde(rename = "BANKACCTFROM")]
    pub account: BankAccount,
    #[serde(rename = "BANKTRANLIST")]
    pub transaction_list: TransactionList,
    #[serde(rename = "LEDGERBAL")]
    pub ledger_balance: Balance,
    #[serde(rename = "AVAILBAL")]
    pub available_balance: Balance,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct StatementTransactionResponse {
    #[serde(rename = "TRNUID")]
    pub id: String,
    #[serde(rename = "STATUS")]
    pub status: Status,
    #[serde(rename = "STMTRS")]
    pub response: StatementResponse,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct BankResponseMessageSet {
    #[serde(rename = "STMTTRNRS")]
    pub statement: StatementTransactionResponse,
}

/// A parsed OFX/QFX statement.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Document {
    #[serde(rename = "SIGNONMSGSRSV1")]
    pub sign_on: SignOnMessageSet,
    #[serde(rename = "BANKMSGSRSV1")]
    pub bank_messages: Vec<BankResponseMessageSet>,
    /// Number of `STMTTRN` records in the repaired buffer.
    #[serde(skip)]
    pub transaction_count: usize,
}

impl Document {
    /// Reads, repairs and binds an OFX document.
    pub fn from_reader(mut reader: impl Read, cleaner: &Cleaner) -> Result<Self, DocumentError> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(&data, cleaner)
    }

    /// Repairs `data` with `cleaner`, then binds the resulting XML.
    pub fn from_bytes(data: &[u8], cleaner: &Cleaner) -> Result<Self, DocumentError> {
        let data = preprocess(data);
        let clean = cleaner.clean(&data)?;
        trace!("repaired OFX: {}", String::from_utf8_lossy(&clean));

        let mut document: Document = quick_xml::de::from_reader(clean.as_slice())?;
        document.transaction_count = memmem::find_iter(&clean, b"<STMTTRN>").count();
        Ok(document)
    }

    /// All transactions across every bank response message set.
    ///
    /// They may nominally belong to different accounts; callers importing
    /// into a single account flatten them deliberately.
    pub fn transactions(&self) -> impl Iterator<Item = &Transaction> {
        self.bank_messages
            .iter()
            .flat_map(|set| set.statement.response.transaction_list.transactions.iter())
    }
}
