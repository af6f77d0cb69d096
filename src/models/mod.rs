//! Core data models for fisca-cli
//!
//! This module contains the data structures of the declaration domain:
//! declarations and their category tables, raw amounts, periods, and the
//! wilaya and region reference data.

pub mod amount;
pub mod category;
pub mod declaration;
pub mod ids;
pub mod period;
pub mod region;
pub mod wilaya;

pub use amount::{AmountParseError, RawAmount};
pub use category::{Classification, DeclarationCategory, ParseCategoryError};
pub use declaration::{
    classify, Declaration, DeclarationBody, DeclarationDraft,
    DeclarationValidationError, EncaissementRow, FlatDeclaration, NatureCode, StampDutyRow,
    TapRow, TurnoverBases, VatRow,
};
pub use ids::DeclarationId;
pub use period::Period;
pub use region::Region;
pub use wilaya::{find_wilaya, Wilaya, WILAYAS};
