//! Field normalization applied to every record before delivery
//!
//! Two independent passes: the transaction date is rewritten from d/m/Y to
//! the API's Y-m-d form (rejecting future dates), and the known numeric
//! fields are coerced to floats with empty cells treated as zero. The pass
//! is pure and idempotent; a rejected record is abandoned whole, the input
//! is never partially converted.

use chrono::NaiveDate;
use thiserror::Error;

use super::record::{FieldValue, Record};

/// Field carrying the transaction date, where present
pub const DATE_FIELD: &str = "tgl_transaksi";

/// Fields the API expects as numbers, across all categories
pub const NUMERIC_FIELDS: &[&str] = &[
    "jumlah",
    "saldo_akhir",
    "nilai_deposito",
    "nilai_bunga",
    "professor_pns",
    "professor_non_pns",
    "lektor_kepala_pns",
    "lektor_kepala_non_pns",
    "lektor_pns",
    "lektor_non_pns",
    "asisten_ahli_pns",
    "asisten_ahli_non_pns",
    "tenaga_pengajar_pns",
    "tenaga_pengajar_non_pns",
    "terkualifikasi_s3",
    "pegawai_pppk",
    "pns",
    "non_pns",
];

/// Why a record was rejected during normalization
#[derive(Debug, Error, Clone, PartialEq)]
pub enum NormalizeError {
    #[error("tgl_transaksi {value:?} is later than today ({today})")]
    FutureDate { value: String, today: NaiveDate },

    #[error("tgl_transaksi {value:?} is not a d/m/Y date")]
    InvalidDate { value: String },

    #[error("field {field} is not numeric: {value:?}")]
    NotNumeric { field: String, value: String },
}

impl NormalizeError {
    /// The offending field, for failure logs
    pub fn field(&self) -> &str {
        match self {
            NormalizeError::FutureDate { .. } | NormalizeError::InvalidDate { .. } => DATE_FIELD,
            NormalizeError::NotNumeric { field, .. } => field,
        }
    }
}

/// Normalize one record against the given reference date
///
/// Builds a fresh record; the input is untouched regardless of outcome.
pub fn normalize(record: &Record, today: NaiveDate) -> Result<Record, NormalizeError> {
    let mut out = Record::with_capacity(record.len());

    for (name, value) in record.iter() {
        let converted = if name == DATE_FIELD {
            FieldValue::Text(normalize_date(value, today)?)
        } else if NUMERIC_FIELDS.contains(&name) {
            FieldValue::Number(coerce_number(name, value)?)
        } else {
            value.clone()
        };
        out.insert(name, converted);
    }

    Ok(out)
}

fn normalize_date(value: &FieldValue, today: NaiveDate) -> Result<String, NormalizeError> {
    let raw = match value.as_str() {
        Some(s) => s.trim(),
        None => {
            return Err(NormalizeError::InvalidDate {
                value: value.to_string(),
            });
        }
    };

    // Accept the canonical form first so re-running the pass is a no-op
    let parsed = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%d/%m/%Y"))
        .map_err(|_| NormalizeError::InvalidDate {
            value: raw.to_string(),
        })?;

    if parsed > today {
        return Err(NormalizeError::FutureDate {
            value: raw.to_string(),
            today,
        });
    }

    Ok(parsed.format("%Y-%m-%d").to_string())
}

fn coerce_number(field: &str, value: &FieldValue) -> Result<f64, NormalizeError> {
    match value {
        FieldValue::Number(n) => Ok(*n),
        FieldValue::Empty => Ok(0.0),
        FieldValue::Text(s) if s.trim().is_empty() => Ok(0.0),
        FieldValue::Text(s) => s.trim().parse::<f64>().map_err(|_| NormalizeError::NotNumeric {
            field: field.to_string(),
            value: s.clone(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn record(fields: &[(&str, FieldValue)]) -> Record {
        fields
            .iter()
            .map(|(n, v)| (n.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_date_rewritten_to_canonical_form() {
        let input = record(&[("tgl_transaksi", FieldValue::Text("01/02/2024".into()))]);
        let out = normalize(&input, today()).unwrap();
        assert_eq!(out.get("tgl_transaksi"), Some(&FieldValue::Text("2024-02-01".into())));
    }

    #[test]
    fn test_date_today_is_not_rejected() {
        let input = record(&[("tgl_transaksi", FieldValue::Text("15/06/2024".into()))]);
        assert!(normalize(&input, today()).is_ok());
    }

    #[test]
    fn test_future_date_rejected() {
        let input = record(&[("tgl_transaksi", FieldValue::Text("16/06/2024".into()))]);
        let err = normalize(&input, today()).unwrap_err();
        assert!(matches!(err, NormalizeError::FutureDate { .. }));
        assert_eq!(err.field(), "tgl_transaksi");
    }

    #[test]
    fn test_unparseable_date_rejected() {
        let input = record(&[("tgl_transaksi", FieldValue::Text("32/01/2099".into()))]);
        let err = normalize(&input, today()).unwrap_err();
        assert!(matches!(err, NormalizeError::InvalidDate { .. }));
    }

    #[test]
    fn test_missing_date_field_is_fine() {
        let input = record(&[("jumlah", FieldValue::Number(10.0))]);
        assert!(normalize(&input, today()).is_ok());
    }

    #[test]
    fn test_empty_numeric_field_becomes_zero() {
        let input = record(&[
            ("jumlah", FieldValue::Empty),
            ("saldo_akhir", FieldValue::Text("".into())),
        ]);
        let out = normalize(&input, today()).unwrap();
        assert_eq!(out.get("jumlah"), Some(&FieldValue::Number(0.0)));
        assert_eq!(out.get("saldo_akhir"), Some(&FieldValue::Number(0.0)));
    }

    #[test]
    fn test_unparseable_numeric_field_names_the_field() {
        let input = record(&[("nilai_bunga", FieldValue::Text("abc".into()))]);
        let err = normalize(&input, today()).unwrap_err();
        assert_eq!(err.field(), "nilai_bunga");
        assert!(err.to_string().contains("nilai_bunga"));
    }

    #[test]
    fn test_unknown_fields_pass_through_untouched() {
        let input = record(&[("uraian", FieldValue::Text("setoran tunai".into()))]);
        let out = normalize(&input, today()).unwrap();
        assert_eq!(out, input);
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let input = record(&[
            ("tgl_transaksi", FieldValue::Text("01/02/2024".into())),
            ("jumlah", FieldValue::Text("1500000".into())),
            ("uraian", FieldValue::Text("setoran".into())),
        ]);
        let once = normalize(&input, today()).unwrap();
        let twice = normalize(&once, today()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_rejection_leaves_input_untouched() {
        let input = record(&[
            ("tgl_transaksi", FieldValue::Text("01/02/2024".into())),
            ("jumlah", FieldValue::Text("abc".into())),
        ]);
        let before = input.clone();
        assert!(normalize(&input, today()).is_err());
        assert_eq!(input, before);
    }
}
