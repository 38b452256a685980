//! OFX/QFX statement parsing with malformed-markup repair.
//!
//! Bank-produced OFX exports are SGML-derived and routinely omit starting or
//! ending tags. The [`Cleaner`] reconstructs well-formed XML from such a file
//! in a single left-to-right token pass; [`Document`] then binds the repaired
//! buffer into a typed statement model.
//!
//! ```
//! use ofx::{Cleaner, Document};
//!
//! let data = b"<OFX><SIGNONMSGSRSV1><SONRS><STATUS><CODE>0<SEVERITY>INFO</STATUS></SONRS></SIGNONMSGSRSV1></OFX>";
//! let document = Document::from_bytes(data, &Cleaner::new()).unwrap();
//! assert_eq!(document.sign_on.response.status.code, 0);
//! ```

pub mod cleaner;
pub mod dates;
pub mod document;
pub mod tags;

mod preprocess;

pub use crate::cleaner::{CleanError, Cleaner, escape_text};
pub use crate::dates::{DateError, parse_date};
pub use crate::document::{
    Balance, BankAccount, BankResponseMessageSet, Document, DocumentError, FinancialInstitution,
    SignOnMessageSet, SignOnResponse, StatementResponse, StatementTransactionResponse, Status,
    Transaction, TransactionList, TransactionType,
};
pub use crate::tags::{DEFAULT_AGGREGATES, TagKind, TagSet};
