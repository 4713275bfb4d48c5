use crate::error::LeaveError;
use crate::model::employee::{EmployeeBalance, LeaveBalance, normalize_name};
use crate::utils::csv_utils::{cell, column_index, replace_csv};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Columns every balance table carries, in write order.
pub const BALANCE_COLUMNS: [&str; 5] = ["name", "CL", "SL", "EL", "manager_email"];

/// The whole balance file: known columns plus any pass-through columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BalanceTable {
    /// header order as read from the file; empty for a table built in memory
    pub columns: Vec<String>,
    pub extra_headers: Vec<String>,
    pub rows: Vec<EmployeeBalance>,
}

impl BalanceTable {
    pub fn find(&self, name: &str) -> Option<&EmployeeBalance> {
        let key = normalize_name(name);
        self.rows.iter().find(|r| r.name == key)
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut EmployeeBalance> {
        let key = normalize_name(name);
        self.rows.iter_mut().find(|r| r.name == key)
    }

    pub fn names(&self) -> Vec<String> {
        self.rows.iter().map(|r| r.name.clone()).collect()
    }

    /// Write order: the file's own order, then any known or extra column it lacked.
    fn write_columns(&self) -> Vec<Column> {
        let mut out: Vec<Column> = Vec::new();
        let mut extra_seen = vec![false; self.extra_headers.len()];

        for header in &self.columns {
            let known = BALANCE_COLUMNS
                .iter()
                .position(|c| *c == header.trim())
                .filter(|k| !out.contains(&Column::Known(*k)));

            if let Some(k) = known {
                out.push(Column::Known(k));
            } else if let Some(i) = (0..self.extra_headers.len())
                .find(|i| !extra_seen[*i] && self.extra_headers[*i] == *header)
            {
                extra_seen[i] = true;
                out.push(Column::Extra(i));
            }
        }

        for k in 0..BALANCE_COLUMNS.len() {
            if !out.contains(&Column::Known(k)) {
                out.push(Column::Known(k));
            }
        }
        out.extend(
            (0..self.extra_headers.len())
                .filter(|i| !extra_seen[*i])
                .map(Column::Extra),
        );
        out
    }

    fn header(&self, column: Column) -> &str {
        match column {
            Column::Known(k) => BALANCE_COLUMNS[k],
            Column::Extra(i) => &self.extra_headers[i],
        }
    }
}

/// Position in `BALANCE_COLUMNS` or in `extra_headers`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Known(usize),
    Extra(usize),
}

fn parse_counter(name: &str, column: &str, raw: &str) -> Result<i64, LeaveError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(0);
    }

    // spreadsheet exports write whole counts as "5.0"
    raw.parse::<i64>()
        .ok()
        .or_else(|| {
            raw.parse::<f64>()
                .ok()
                .filter(|f| f.is_finite() && f.fract() == 0.0)
                .map(|f| f as i64)
        })
        .ok_or_else(|| LeaveError::InvalidCounter {
            name: name.to_string(),
            column: column.to_string(),
            value: raw.to_string(),
        })
}

/// CSV-backed balance table with full-overwrite semantics.
#[derive(Debug, Clone)]
pub struct BalanceStore {
    path: PathBuf,
}

impl BalanceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<BalanceTable, LeaveError> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(&self.path)?;

        let headers = reader.headers()?.clone();
        let idx: Vec<Option<usize>> = BALANCE_COLUMNS
            .iter()
            .map(|c| column_index(&headers, c))
            .collect();

        let extra_idx: Vec<usize> = (0..headers.len())
            .filter(|i| !idx.contains(&Some(*i)))
            .collect();
        let extra_headers = extra_idx
            .iter()
            .map(|i| headers[*i].to_string())
            .collect();

        let mut seen = HashSet::new();
        let mut rows = Vec::new();

        for record in reader.records() {
            let record = record?;
            let name = normalize_name(cell(&record, idx[0]));

            if !seen.insert(name.clone()) {
                return Err(LeaveError::DuplicateEmployee(name));
            }

            let balance = LeaveBalance {
                cl: parse_counter(&name, "CL", cell(&record, idx[1]))?,
                sl: parse_counter(&name, "SL", cell(&record, idx[2]))?,
                el: parse_counter(&name, "EL", cell(&record, idx[3]))?,
            };

            rows.push(EmployeeBalance {
                manager_email: cell(&record, idx[4]).trim().to_string(),
                extra: extra_idx
                    .iter()
                    .map(|i| cell(&record, Some(*i)).to_string())
                    .collect(),
                name,
                balance,
            });
        }

        debug!(path = %self.path.display(), employees = rows.len(), "Loaded balance table");

        Ok(BalanceTable {
            columns: headers.iter().map(str::to_string).collect(),
            extra_headers,
            rows,
        })
    }

    pub fn save(&self, table: &BalanceTable) -> Result<(), LeaveError> {
        let columns = table.write_columns();

        replace_csv(&self.path, |w| {
            w.write_record(columns.iter().map(|c| table.header(*c)))?;

            for row in &table.rows {
                w.write_record(columns.iter().map(|c| match *c {
                    Column::Known(0) => row.name.clone(),
                    Column::Known(1) => row.balance.cl.to_string(),
                    Column::Known(2) => row.balance.sl.to_string(),
                    Column::Known(3) => row.balance.el.to_string(),
                    Column::Known(_) => row.manager_email.clone(),
                    Column::Extra(i) => row.extra.get(i).cloned().unwrap_or_default(),
                }))?;
            }
            Ok(())
        })?;

        debug!(path = %self.path.display(), employees = table.rows.len(), "Saved balance table");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn load_normalizes_names_and_reads_counters() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("balance.csv");
        fs::write(
            &path,
            "name,CL,SL,EL,manager_email\n  Asha Rao ,5,2,12,lead@company.com\nRAVI,0,,3,boss@company.com\n",
        )
        .unwrap();

        let table = BalanceStore::new(&path).load().unwrap();

        assert_eq!(table.names(), vec!["asha rao", "ravi"]);
        let asha = table.find("ASHA RAO").unwrap();
        assert_eq!(asha.balance, LeaveBalance { cl: 5, sl: 2, el: 12 });
        assert_eq!(asha.manager_email, "lead@company.com");
        assert_eq!(table.find("ravi").unwrap().balance.sl, 0);
        assert!(table.find("nobody").is_none());
    }

    #[test]
    fn extra_columns_survive_a_save() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("balance.csv");
        fs::write(
            &path,
            "dept,name,CL,SL,EL,manager_email\nops,Asha,5,2,12,lead@company.com\n",
        )
        .unwrap();

        let store = BalanceStore::new(&path);
        let mut table = store.load().unwrap();
        assert_eq!(table.extra_headers, vec!["dept"]);

        table.find_mut("asha").unwrap().balance.cl = 4;
        store.save(&table).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "dept,name,CL,SL,EL,manager_email\nops,asha,4,2,12,lead@company.com\n"
        );
        assert_eq!(store.load().unwrap(), table);
    }

    #[test]
    fn missing_columns_read_as_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("balance.csv");
        fs::write(&path, "name,CL\nasha,3\n").unwrap();

        let table = BalanceStore::new(&path).load().unwrap();
        let asha = table.find("asha").unwrap();

        assert_eq!(asha.balance, LeaveBalance { cl: 3, sl: 0, el: 0 });
        assert_eq!(asha.manager_email, "");
    }

    #[test]
    fn column_order_is_kept_and_absent_columns_are_appended() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("balance.csv");
        fs::write(&path, "EL,name,grade,CL\n4,ravi,B2,1\n").unwrap();

        let store = BalanceStore::new(&path);
        let table = store.load().unwrap();
        store.save(&table).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "EL,name,grade,CL,SL,manager_email\n4,ravi,B2,1,0,\n"
        );
    }

    #[test]
    fn table_built_in_memory_uses_default_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("balance.csv");
        let table = BalanceTable {
            rows: vec![EmployeeBalance {
                name: "asha".into(),
                balance: LeaveBalance { cl: 1, sl: 2, el: 3 },
                manager_email: "lead@company.com".into(),
                extra: Vec::new(),
            }],
            ..BalanceTable::default()
        };

        BalanceStore::new(&path).save(&table).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "name,CL,SL,EL,manager_email\nasha,1,2,3,lead@company.com\n"
        );
    }

    #[test]
    fn whole_number_floats_are_accepted() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("balance.csv");
        fs::write(&path, "name,CL,SL,EL,manager_email\nasha,5.0,,12.0,a@x\n").unwrap();

        let table = BalanceStore::new(&path).load().unwrap();
        assert_eq!(
            table.find("asha").unwrap().balance,
            LeaveBalance { cl: 5, sl: 0, el: 12 }
        );
    }

    #[test]
    fn fractional_counter_is_refused() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("balance.csv");
        fs::write(&path, "name,CL,SL,EL,manager_email\nasha,1.5,1,1,a@x\n").unwrap();

        let err = BalanceStore::new(&path).load().unwrap_err();
        assert_eq!(err.to_string(), "Invalid CL value \"1.5\" for employee asha");
    }

    #[test]
    fn duplicate_normalized_names_are_refused() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("balance.csv");
        fs::write(&path, "name,CL,SL,EL,manager_email\nAsha,1,1,1,a@x\n asha ,2,2,2,b@x\n").unwrap();

        let err = BalanceStore::new(&path).load().unwrap_err();
        assert!(matches!(err, LeaveError::DuplicateEmployee(name) if name == "asha"));
    }

    #[test]
    fn bad_counter_names_row_and_column() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("balance.csv");
        fs::write(&path, "name,CL,SL,EL,manager_email\nasha,five,1,1,a@x\n").unwrap();

        let err = BalanceStore::new(&path).load().unwrap_err();
        assert_eq!(err.to_string(), "Invalid CL value \"five\" for employee asha");
    }

    #[test]
    fn missing_file_fails_to_load() {
        let dir = tempdir().unwrap();
        let store = BalanceStore::new(dir.path().join("absent.csv"));

        assert!(matches!(store.load(), Err(LeaveError::Csv(_))));
    }
}
