//! Service layer for fairshare
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, cascading deletes and audit logging.

pub mod balance;
pub mod expense;
pub mod occasion;
pub mod party;
pub mod person;
pub mod settlement;
pub mod subgroup;

pub use balance::BalanceService;
pub use expense::{ExpenseChanges, ExpenseService, NewExpense};
pub use occasion::{OccasionService, RemovedRecords};
pub use party::{ensure_in_occasion, ensure_name_available, resolve_party, PartyNames};
pub use person::PersonService;
pub use settlement::SettlementService;
pub use subgroup::SubgroupService;
