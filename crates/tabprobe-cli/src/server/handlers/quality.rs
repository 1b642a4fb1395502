//! Quality scoring handlers.

use std::io::Write;

use axum::{
    body::Bytes,
    extract::{Multipart, Query},
    Json,
};
use serde::{Deserialize, Serialize};
use tabprobe::quality::{metrics::OK_FOR_MODEL_SCORE, MetricsFlags};
use tabprobe::{
    score_metrics, DatasetMetrics, MetricsScore, Parser, ParserConfig, QualityConfig,
    QualityEngine, QualityReport, Table, TabprobeError,
};
use tempfile::NamedTempFile;
use tracing::info;

use crate::server::error::ApiError;

/// Query parameters of `POST /quality`.
#[derive(Debug, Deserialize)]
pub struct MetricsQuery {
    pub n_rows: usize,
    pub n_cols: usize,
    pub missing_ratio: f64,
    #[serde(default)]
    pub duplicate_ratio: f64,
}

/// Optional threshold overrides of `POST /quality-flags-from-csv`.
#[derive(Debug, Default, Deserialize)]
pub struct ThresholdQuery {
    pub high_cardinality_threshold: Option<usize>,
    pub zero_threshold: Option<f64>,
    pub min_missing_share: Option<f64>,
    pub outlier_threshold: Option<f64>,
    pub imbalance_threshold: Option<f64>,
    pub dataset_penalties: Option<bool>,
}

impl ThresholdQuery {
    fn to_config(&self) -> Result<QualityConfig, TabprobeError> {
        let defaults = QualityConfig::default();
        let config = QualityConfig {
            high_cardinality_threshold: self
                .high_cardinality_threshold
                .unwrap_or(defaults.high_cardinality_threshold),
            zero_threshold: self.zero_threshold.unwrap_or(defaults.zero_threshold),
            min_missing_share: self.min_missing_share.unwrap_or(defaults.min_missing_share),
            outlier_threshold: self.outlier_threshold.unwrap_or(defaults.outlier_threshold),
            imbalance_threshold: self
                .imbalance_threshold
                .unwrap_or(defaults.imbalance_threshold),
            dataset_penalties: self.dataset_penalties.unwrap_or(defaults.dataset_penalties),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Response of `POST /quality-flags-from-csv`.
#[derive(Debug, Serialize)]
pub struct FlagsResponse {
    pub quality_score: u8,
    pub ok_for_model: bool,
    /// Shape-only flags, as returned by `POST /quality`.
    pub flags: MetricsFlags,
    pub quality: QualityReport,
    pub metadata: FlagsMetadata,
}

#[derive(Debug, Serialize)]
pub struct FlagsMetadata {
    #[serde(flatten)]
    pub metrics: DatasetMetrics,
    pub missing_count: usize,
    pub duplicate_count: usize,
    pub parameters: QualityConfig,
}

/// Score a dataset from its shape metrics alone.
pub async fn quality(Query(query): Query<MetricsQuery>) -> Result<Json<MetricsScore>, ApiError> {
    for (name, value) in [
        ("missing_ratio", query.missing_ratio),
        ("duplicate_ratio", query.duplicate_ratio),
    ] {
        if !(0.0..=1.0).contains(&value) {
            return Err(ApiError::BadRequest(format!(
                "{} must be between 0 and 1, got {}",
                name, value
            )));
        }
    }

    Ok(Json(score_metrics(DatasetMetrics {
        n_rows: query.n_rows,
        n_cols: query.n_cols,
        missing_ratio: query.missing_ratio,
        duplicate_ratio: query.duplicate_ratio,
    })))
}

/// Score an uploaded CSV file from its shape metrics.
pub async fn quality_from_csv(multipart: Multipart) -> Result<Json<MetricsScore>, ApiError> {
    let upload = read_csv_upload(multipart).await?;

    let score = run_blocking(move || {
        let table = load_upload(&upload)?;
        Ok(score_metrics(DatasetMetrics::from_table(&table)))
    })
    .await?;

    Ok(Json(score))
}

/// Run every quality heuristic over an uploaded CSV file.
pub async fn quality_flags_from_csv(
    Query(query): Query<ThresholdQuery>,
    multipart: Multipart,
) -> Result<Json<FlagsResponse>, ApiError> {
    let config = query.to_config()?;
    let upload = read_csv_upload(multipart).await?;

    let response = run_blocking(move || {
        let table = load_upload(&upload)?;
        let metrics = score_metrics(DatasetMetrics::from_table(&table));
        let quality = QualityEngine::with_config(config.clone()).analyze(&table);

        Ok(FlagsResponse {
            quality_score: quality.quality_score,
            ok_for_model: quality.quality_score >= OK_FOR_MODEL_SCORE,
            flags: metrics.flags,
            metadata: FlagsMetadata {
                metrics: metrics.metadata,
                missing_count: quality.missing_count,
                duplicate_count: quality.duplicate_count,
                parameters: config,
            },
            quality,
        })
    })
    .await?;

    Ok(Json(response))
}

/// Pull the `file` field out of a multipart body, rejecting anything that is
/// not named `*.csv`.
async fn read_csv_upload(mut multipart: Multipart) -> Result<Bytes, ApiError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        if !file_name.to_ascii_lowercase().ends_with(".csv") {
            return Err(TabprobeError::UnsupportedFormat(format!(
                "only CSV files are accepted, got '{}'",
                file_name
            ))
            .into());
        }

        let data = field.bytes().await?;
        info!(file = %file_name, bytes = data.len(), "received upload");
        return Ok(data);
    }

    Err(ApiError::BadRequest("missing 'file' field".to_string()))
}

/// Spool an upload to a temporary file and load it. The file is removed when
/// the handle drops, on success and on error alike.
fn load_upload(data: &[u8]) -> Result<Table, ApiError> {
    let mut temp = NamedTempFile::with_suffix(".csv")
        .map_err(|e| ApiError::Internal(format!("Failed to create temp file: {}", e)))?;
    temp.write_all(data)
        .map_err(|e| ApiError::Internal(format!("Failed to write temp file: {}", e)))?;

    let parser = Parser::with_config(ParserConfig {
        delimiter: Some(b','),
        ..ParserConfig::default()
    });
    let (data_table, _) = parser.parse_file(temp.path())?;
    Ok(Table::from_data_table(&data_table))
}

async fn run_blocking<T, F>(work: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, ApiError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| ApiError::Internal(format!("Analysis task failed: {}", e)))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_query_defaults() {
        let config = ThresholdQuery::default().to_config().unwrap();
        assert_eq!(config, QualityConfig::default());
    }

    #[test]
    fn test_threshold_query_overrides() {
        let query = ThresholdQuery {
            zero_threshold: Some(0.5),
            dataset_penalties: Some(true),
            ..ThresholdQuery::default()
        };
        let config = query.to_config().unwrap();

        assert_eq!(config.zero_threshold, 0.5);
        assert!(config.dataset_penalties);
        assert_eq!(config.high_cardinality_threshold, 50);
    }

    #[test]
    fn test_threshold_query_rejects_invalid() {
        let query = ThresholdQuery {
            imbalance_threshold: Some(-0.1),
            ..ThresholdQuery::default()
        };
        let err = query.to_config().unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_load_upload() {
        let table = load_upload(b"a,b\n1,x\n2,y\n").unwrap();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_names(), vec!["a", "b"]);
    }
}
