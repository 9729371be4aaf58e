//! DataFrame helpers shared by the derivations.

use polars::prelude::{BooleanChunked, DataFrame, NewChunkedArray};

use cohort_ingest::is_missing;
use cohort_model::{ColumnName, FieldId};

use crate::error::{Result, TransformError};

pub fn require_column(df: &DataFrame, name: &str) -> Result<()> {
    if df.column(name).is_ok() {
        Ok(())
    } else {
        Err(TransformError::MissingColumn {
            column: name.to_string(),
        })
    }
}

/// Returns a copy of `df` with column `from` renamed to `to`.
pub fn rename_column(df: &DataFrame, from: &str, to: &str) -> Result<DataFrame> {
    require_column(df, from)?;
    let mut out = df.clone();
    out.rename(from, to.into())?;
    Ok(out)
}

/// Keeps the rows whose `keep` flag is set.
pub fn filter_rows(df: &DataFrame, keep: &[bool]) -> Result<DataFrame> {
    let mask = BooleanChunked::from_slice("keep".into(), keep);
    Ok(df.filter(&mask)?)
}

/// Drops every row holding a missing value in any column.
pub fn drop_incomplete_rows(df: &DataFrame) -> Result<DataFrame> {
    let mut keep = vec![true; df.height()];
    for column in df.get_columns() {
        for (idx, flag) in keep.iter_mut().enumerate() {
            if *flag && is_missing(column, idx) {
                *flag = false;
            }
        }
    }
    filter_rows(df, &keep)
}

/// Column names of `field` present in `df`, optionally restricted to one instance.
pub fn field_columns(df: &DataFrame, field: FieldId, instance: Option<u32>) -> Vec<String> {
    df.get_column_names()
        .into_iter()
        .filter(|name| {
            ColumnName::parse(name.as_str()).is_ok_and(|column| {
                column.field() == field
                    && instance.is_none_or(|wanted| column.instance() == Some(wanted))
            })
        })
        .map(|name| name.to_string())
        .collect()
}

/// True when any of `columns` holds a value at row `idx`.
pub fn any_present(df: &DataFrame, columns: &[String], idx: usize) -> Result<bool> {
    for name in columns {
        if !is_missing(df.column(name)?, idx) {
            return Ok(true);
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{IntoColumn, NamedFrom, Series};

    fn frame() -> DataFrame {
        DataFrame::new(vec![
            Series::new("eid".into(), &[1i64, 2, 3]).into_column(),
            Series::new("p31".into(), &[Some("Female"), None, Some("Male")]).into_column(),
            Series::new("p22009_a1".into(), &[Some(0.1f64), Some(0.2), None]).into_column(),
            Series::new("p22009_a2".into(), &[Some(0.3f64), Some(0.4), Some(0.5)]).into_column(),
        ])
        .unwrap()
    }

    #[test]
    fn drop_incomplete_rows_requires_every_column() {
        let df = drop_incomplete_rows(&frame()).unwrap();
        assert_eq!(df.height(), 1);
    }

    #[test]
    fn field_columns_matches_structured_names_only() {
        let df = frame();
        assert_eq!(
            field_columns(&df, FieldId::new(22009), None),
            vec!["p22009_a1", "p22009_a2"]
        );
        assert!(field_columns(&df, FieldId::new(22009), Some(0)).is_empty());
        assert_eq!(field_columns(&df, FieldId::new(31), None), vec!["p31"]);
    }

    #[test]
    fn rename_column_requires_source_column() {
        let renamed = rename_column(&frame(), "eid", "s").unwrap();
        assert!(renamed.column("s").is_ok());
        assert!(matches!(
            rename_column(&frame(), "missing", "s"),
            Err(TransformError::MissingColumn { .. })
        ));
    }

    #[test]
    fn any_present_checks_each_column() {
        let df = frame();
        let columns = vec!["p22009_a1".to_string(), "p31".to_string()];
        assert!(any_present(&df, &columns, 0).unwrap());
        assert!(any_present(&df, &columns, 1).unwrap());
        assert!(any_present(&df, &columns, 2).unwrap());
        assert!(!any_present(&df, &columns[..1], 2).unwrap());
    }
}
