use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};
use utoipa::ToSchema;

/// Leave categories carried as balance counters.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    ToSchema,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum LeaveType {
    /// Casual leave
    Cl,
    /// Sick leave
    Sl,
    /// Earned leave
    El,
}

/// Normalized lookup key for an employee name.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({ "CL": 5, "SL": 2, "EL": 12 }))]
pub struct LeaveBalance {
    #[serde(rename = "CL")]
    pub cl: i64,
    #[serde(rename = "SL")]
    pub sl: i64,
    #[serde(rename = "EL")]
    pub el: i64,
}

impl LeaveBalance {
    pub fn get(&self, leave_type: LeaveType) -> i64 {
        match leave_type {
            LeaveType::Cl => self.cl,
            LeaveType::Sl => self.sl,
            LeaveType::El => self.el,
        }
    }

    pub fn set(&mut self, leave_type: LeaveType, value: i64) {
        match leave_type {
            LeaveType::Cl => self.cl = value,
            LeaveType::Sl => self.sl = value,
            LeaveType::El => self.el = value,
        }
    }

    /// Categories with a positive balance, in CL, SL, EL order.
    pub fn available_types(&self) -> Vec<LeaveType> {
        use strum::IntoEnumIterator;

        LeaveType::iter().filter(|lt| self.get(*lt) > 0).collect()
    }
}

/// One row of the balance table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeBalance {
    /// normalized name, unique within the table
    pub name: String,
    pub balance: LeaveBalance,
    pub manager_email: String,
    /// values of the table's pass-through columns, aligned with `BalanceTable::extra_headers`
    pub extra: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn leave_type_string_forms() {
        assert_eq!(LeaveType::Cl.to_string(), "CL");
        assert_eq!(LeaveType::from_str("EL").unwrap(), LeaveType::El);
        assert_eq!(serde_json::to_string(&LeaveType::Sl).unwrap(), "\"SL\"");
        assert!(LeaveType::from_str("PL").is_err());
    }

    #[test]
    fn names_are_trimmed_and_lowercased() {
        assert_eq!(normalize_name("  Asha Rao "), "asha rao");
    }

    #[test]
    fn only_positive_categories_are_offered() {
        let balance = LeaveBalance { cl: 0, sl: 3, el: -1 };
        assert_eq!(balance.available_types(), vec![LeaveType::Sl]);

        let mut balance = balance;
        balance.set(LeaveType::Cl, 2);
        assert_eq!(balance.get(LeaveType::Cl), 2);
        assert_eq!(balance.available_types(), vec![LeaveType::Cl, LeaveType::Sl]);
    }
}
