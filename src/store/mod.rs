pub mod balance;
pub mod history;

pub use balance::BalanceStore;
pub use history::HistoryLog;
