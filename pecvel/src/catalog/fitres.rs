//! SNANA FITRES text tables.
//!
//! ```text
//! # comment
//! NVAR: 4
//! VARNAMES: CID zCMB zHD VPEC
//! SN: 1234 0.0251 0.0249 -120.0
//! ```
//!
//! `NVAR` is optional; when present it must match the `VARNAMES` count.
//! Other keyed lines before or between rows (`DOCUMENTATION:` etc.) are
//! skipped.

use std::path::Path;

use tracing::debug;

use crate::error::CatalogError;

const KEY_NVAR: &str = "NVAR";
const KEY_VARNAMES: &str = "VARNAMES";
const KEY_ROW: &str = "SN";

/// Column-named table of raw FITRES cells.
#[derive(Debug, Clone, PartialEq)]
pub struct FitresTable {
    names: Vec<String>,
    rows: Vec<Vec<String>>,
}

/// The four columns the audit needs from a FITRES row.
#[derive(Debug, Clone, PartialEq)]
pub struct FitresRecord {
    /// Candidate ID.
    pub cid: String,
    /// CMB-frame redshift.
    pub zcmb: f64,
    /// Hubble-diagram redshift (CMB frame, velocity corrected).
    pub zhd: f64,
    /// Peculiar velocity used for the correction [km/s].
    pub vpec: f64,
}

impl FitresTable {
    /// Parse FITRES text.
    pub fn parse(text: &str) -> Result<Self, CatalogError> {
        let mut nvar: Option<usize> = None;
        let mut names: Option<Vec<String>> = None;
        let mut rows = Vec::new();

        for (idx, raw) in text.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut tokens = line.split_whitespace();
            let Some(first) = tokens.next() else {
                continue;
            };

            match first.trim_end_matches(':') {
                KEY_NVAR => {
                    let value = tokens.next().ok_or_else(|| CatalogError::MalformedHeader {
                        line: line_no,
                        detail: "NVAR has no value".to_string(),
                    })?;
                    let n = value.parse().map_err(|_| CatalogError::MalformedHeader {
                        line: line_no,
                        detail: format!("NVAR value `{value}` is not a count"),
                    })?;
                    nvar = Some(n);
                }
                KEY_VARNAMES => {
                    let listed: Vec<String> = tokens.map(str::to_string).collect();
                    if listed.is_empty() {
                        return Err(CatalogError::MalformedHeader {
                            line: line_no,
                            detail: "VARNAMES lists no columns".to_string(),
                        });
                    }
                    names = Some(listed);
                }
                KEY_ROW => {
                    let expected = names
                        .as_ref()
                        .ok_or(CatalogError::MissingHeader(KEY_VARNAMES))?
                        .len();
                    let cells: Vec<String> = tokens.map(str::to_string).collect();
                    if cells.len() != expected {
                        return Err(CatalogError::RowWidth {
                            line: line_no,
                            expected,
                            found: cells.len(),
                        });
                    }
                    rows.push(cells);
                }
                _ => {}
            }
        }

        let names = names.ok_or(CatalogError::MissingHeader(KEY_VARNAMES))?;
        if let Some(declared) = nvar {
            if declared != names.len() {
                return Err(CatalogError::HeaderMismatch {
                    declared,
                    listed: names.len(),
                });
            }
        }

        Ok(Self { names, rows })
    }

    /// Read and parse a FITRES file.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::parse(&text)?;
        debug!(
            "FITRES {}: {} rows, {} columns",
            path.display(),
            table.len(),
            table.names.len()
        );
        Ok(table)
    }

    /// Column names in file order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Keep only the first `max_rows` rows.
    pub fn truncate(&mut self, max_rows: usize) {
        self.rows.truncate(max_rows);
    }

    fn column_index(&self, name: &str) -> Result<usize, CatalogError> {
        self.names
            .iter()
            .position(|n| n == name)
            .ok_or_else(|| CatalogError::MissingColumn(name.to_string()))
    }

    /// Raw cells of one column.
    pub fn column(&self, name: &str) -> Result<Vec<&str>, CatalogError> {
        let idx = self.column_index(name)?;
        Ok(self.rows.iter().map(|row| row[idx].as_str()).collect())
    }

    /// One column parsed as `f64`.
    pub fn column_f64(&self, name: &str) -> Result<Vec<f64>, CatalogError> {
        let idx = self.column_index(name)?;
        self.rows
            .iter()
            .enumerate()
            .map(|(row, cells)| {
                cells[idx]
                    .parse::<f64>()
                    .map_err(|_| CatalogError::InvalidNumber {
                        row,
                        column: name.to_string(),
                        value: cells[idx].clone(),
                    })
            })
            .collect()
    }

    /// Extract `CID`, `zCMB`, `zHD` and `VPEC` for every row.
    pub fn records(&self) -> Result<Vec<FitresRecord>, CatalogError> {
        let cid = self.column("CID")?;
        let zcmb = self.column_f64("zCMB")?;
        let zhd = self.column_f64("zHD")?;
        let vpec = self.column_f64("VPEC")?;

        Ok((0..self.len())
            .map(|i| FitresRecord {
                cid: cid[i].to_string(),
                zcmb: zcmb[i],
                zhd: zhd[i],
                vpec: vpec[i],
            })
            .collect())
    }
}
