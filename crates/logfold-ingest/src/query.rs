//! Read path: filtered, paginated listing of stored logs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use logfold_core::config::QueryConfig;
use logfold_core::store::{LogFilter, Pagination};
use logfold_core::{LogLevel, LogRecord, LogStore};

use crate::error::{IngestError, ValidationError};

/// Listing request. Unset filters match everything; `page` and `limit`
/// fall back to 1 and the configured default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogQuery {
    pub level: Option<LogLevel>,
    pub source: Option<String>,
    pub search: Option<String>,
    pub ingestion_source: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogPage {
    pub data: Vec<LogRecord>,
    pub total: usize,
    pub page: usize,
    pub limit: usize,
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl LogQuery {
    /// Check bounds and build the storage filter and window.
    pub fn resolve(&self, config: &QueryConfig) -> Result<(LogFilter, Pagination, usize, usize), ValidationError> {
        let page = self.page.unwrap_or(1);
        if page == 0 {
            return Err(ValidationError::InvalidQuery("page must be at least 1".into()));
        }
        let limit = self.limit.unwrap_or(config.default_limit);
        if limit == 0 || limit > config.max_limit {
            return Err(ValidationError::InvalidQuery(format!(
                "limit must be between 1 and {}",
                config.max_limit
            )));
        }
        if let (Some(from), Some(to)) = (self.from, self.to) {
            if from > to {
                return Err(ValidationError::InvalidQuery("`from` is after `to`".into()));
            }
        }

        let filter = LogFilter {
            level: self.level,
            source: non_blank(&self.source).map(|s| s.to_lowercase()),
            search: non_blank(&self.search),
            ingestion_source: non_blank(&self.ingestion_source),
            from: self.from,
            to: self.to,
        };
        let window = Pagination {
            offset: (page - 1).saturating_mul(limit),
            limit,
        };
        Ok((filter, window, page, limit))
    }
}

/// Run `query` against `store`, newest entries first.
pub async fn find_logs<S>(store: &S, query: &LogQuery, config: &QueryConfig) -> Result<LogPage, IngestError>
where
    S: LogStore + ?Sized,
{
    let (filter, window, page, limit) = query.resolve(config)?;
    let (total, data) = tokio::try_join!(store.count(&filter), store.find_many(&filter, window))?;
    Ok(LogPage {
        data,
        total,
        page,
        limit,
    })
}
