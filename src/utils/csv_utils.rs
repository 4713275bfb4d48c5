use crate::error::LeaveError;
use std::fs;
use std::path::Path;
use tempfile::NamedTempFile;

/// ===============================
/// Header lookup
/// ===============================
pub fn column_index(headers: &csv::StringRecord, column: &str) -> Option<usize> {
    headers.iter().position(|h| h.trim() == column)
}

/// Cell at `idx`, or empty when the column is absent or the row is short.
pub fn cell<'a>(record: &'a csv::StringRecord, idx: Option<usize>) -> &'a str {
    idx.and_then(|i| record.get(i)).unwrap_or("")
}

/// ===============================
/// Full-overwrite write
/// ===============================
/// Writes the whole table to a fresh temp file beside `path`, then persists it over `path`.
pub fn replace_csv<F>(path: &Path, write_rows: F) -> Result<(), LeaveError>
where
    F: FnOnce(&mut csv::Writer<&mut NamedTempFile>) -> Result<(), LeaveError>,
{
    let parent = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => {
            fs::create_dir_all(parent)?;
            parent
        }
        None => Path::new("."),
    };

    // unique per call, removed on drop if never persisted
    let mut tmp = NamedTempFile::new_in(parent)?;
    {
        let mut writer = csv::Writer::from_writer(&mut tmp);
        write_rows(&mut writer)?;
        writer.flush()?;
    }

    tmp.persist(path).map_err(|e| LeaveError::Io(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use tempfile::tempdir;

    #[test]
    fn replace_creates_parent_and_leaves_no_temp_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("table.csv");

        replace_csv(&path, |w| {
            w.write_record(["a", "b"])?;
            w.write_record(["1", "2"])?;
            Ok(())
        })
        .unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "a,b\n1,2\n");
        assert_eq!(fs::read_dir(path.parent().unwrap()).unwrap().count(), 1);
    }

    #[test]
    fn failed_write_keeps_previous_contents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("table.csv");
        fs::write(&path, "a\nold\n").unwrap();

        let result = replace_csv(&path, |w| {
            w.write_record(["a"])?;
            Err(LeaveError::LockPoisoned)
        });

        assert!(result.is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "a\nold\n");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn concurrent_writers_never_interleave() {
        let dir = tempdir().unwrap();
        let path = Arc::new(dir.path().join("table.csv"));

        for _ in 0..20 {
            let writers: Vec<_> = ["a", "b"]
                .into_iter()
                .map(|tag| {
                    let path = Arc::clone(&path);
                    thread::spawn(move || {
                        replace_csv(&path, |w| {
                            w.write_record(["tag"])?;
                            for _ in 0..5_000 {
                                w.write_record([tag])?;
                            }
                            Ok(())
                        })
                    })
                })
                .collect();

            for writer in writers {
                writer.join().unwrap().expect("write succeeds");
            }

            let text = fs::read_to_string(path.as_path()).unwrap();
            let rows: Vec<&str> = text.lines().skip(1).collect();
            assert_eq!(rows.len(), 5_000);
            assert!(rows.iter().all(|r| *r == rows[0]), "rows from both writers");
        }

        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn missing_columns_read_as_empty() {
        let headers = csv::StringRecord::from(vec!["name", " CL "]);
        let row = csv::StringRecord::from(vec!["asha"]);

        assert_eq!(column_index(&headers, "CL"), Some(1));
        assert_eq!(cell(&row, column_index(&headers, "CL")), "");
        assert_eq!(cell(&row, column_index(&headers, "EL")), "");
        assert_eq!(cell(&row, Some(0)), "asha");
    }
}
