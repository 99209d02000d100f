use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::Deserialize;

use crate::history::{HistoryProvider, HistoryRequest, SourceError};
use crate::http_client::{HttpClient, HttpRequest};
use crate::{DailyBar, PriceHistory, UtcDateTime};

const CHART_BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

/// History provider backed by the Yahoo Finance chart endpoint.
///
/// Single attempt per request: no caching, no retry. Any failure surfaces
/// as a [`SourceError`] for the caller's prompt fallback.
#[derive(Clone)]
pub struct YahooHistoryProvider {
    http_client: Arc<dyn HttpClient>,
    timeout_ms: u64,
}

impl YahooHistoryProvider {
    pub fn new(http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            http_client,
            timeout_ms: 10_000,
        }
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    async fn fetch_daily_history(&self, req: &HistoryRequest) -> Result<PriceHistory, SourceError> {
        let endpoint = format!(
            "{}/{}?range={}&interval=1d",
            CHART_BASE_URL,
            urlencoding::encode(req.symbol.as_str()),
            req.lookback.as_range_param(),
        );

        let request = HttpRequest::get(endpoint)
            .with_header("referer", "https://finance.yahoo.com/")
            .with_timeout_ms(self.timeout_ms);

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|e| SourceError::unavailable(format!("yahoo transport error: {e}")))?;

        if !response.is_success() {
            return Err(SourceError::unavailable(format!(
                "yahoo returned status {}",
                response.status
            )));
        }

        parse_chart_response(&response.body, req)
    }
}

impl HistoryProvider for YahooHistoryProvider {
    fn daily_history<'a>(
        &'a self,
        req: HistoryRequest,
    ) -> Pin<Box<dyn Future<Output = Result<PriceHistory, SourceError>> + Send + 'a>> {
        Box::pin(async move { self.fetch_daily_history(&req).await })
    }
}

fn parse_chart_response(body: &str, req: &HistoryRequest) -> Result<PriceHistory, SourceError> {
    let chart_response: ChartResponse = serde_json::from_str(body)
        .map_err(|e| SourceError::internal(format!("failed to parse yahoo chart: {e}")))?;

    if let Some(error) = &chart_response.chart.error {
        if !error.is_null() {
            return Err(SourceError::unavailable(format!(
                "yahoo chart API error: {error}"
            )));
        }
    }

    let result = chart_response
        .chart
        .result
        .as_deref()
        .and_then(|results| results.first())
        .ok_or_else(|| SourceError::empty_series("no chart data in response"))?;

    let timestamps = result
        .timestamp
        .as_deref()
        .ok_or_else(|| SourceError::empty_series("no timestamp data"))?;
    let quote = result
        .indicators
        .quote
        .first()
        .ok_or_else(|| SourceError::empty_series("no quote data"))?;

    let mut bars = Vec::with_capacity(timestamps.len());
    for (i, &ts_value) in timestamps.iter().enumerate() {
        // Rows with a null close are market holidays or partial data; skip.
        let Some(Some(close)) = quote.close.get(i) else {
            continue;
        };

        let ts = UtcDateTime::from_unix_timestamp(ts_value)
            .map_err(|e| SourceError::internal(e.to_string()))?;
        let volume = quote
            .volume
            .get(i)
            .copied()
            .flatten()
            .and_then(|v| u64::try_from(v).ok());

        if let Ok(bar) = DailyBar::new(ts, *close, volume) {
            bars.push(bar);
        }
    }

    if bars.is_empty() {
        return Err(SourceError::empty_series(format!(
            "no usable daily bars for {}",
            req.symbol
        )));
    }

    Ok(PriceHistory::new(req.symbol.clone(), bars))
}

// Yahoo chart API response structures.
#[derive(Debug, Clone, Deserialize)]
struct ChartResponse {
    chart: ChartData,
}

#[derive(Debug, Clone, Deserialize)]
struct ChartData {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
struct ChartResult {
    timestamp: Option<Vec<i64>>,
    indicators: ChartIndicators,
}

#[derive(Debug, Clone, Deserialize)]
struct ChartIndicators {
    quote: Vec<ChartQuote>,
}

#[derive(Debug, Clone, Deserialize)]
struct ChartQuote {
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<i64>>,
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::history::{Lookback, SourceErrorKind};
    use crate::http_client::{HttpError, HttpResponse};
    use crate::Symbol;

    struct ScriptedHttpClient {
        response: Result<HttpResponse, HttpError>,
        requests: Mutex<Vec<HttpRequest>>,
    }

    impl ScriptedHttpClient {
        fn returning(response: Result<HttpResponse, HttpError>) -> Self {
            Self {
                response,
                requests: Mutex::new(Vec::new()),
            }
        }

        fn recorded_urls(&self) -> Vec<String> {
            self.requests
                .lock()
                .expect("request store should not be poisoned")
                .iter()
                .map(|r| r.url.clone())
                .collect()
        }
    }

    impl HttpClient for ScriptedHttpClient {
        fn execute<'a>(
            &'a self,
            request: HttpRequest,
        ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
            self.requests
                .lock()
                .expect("request store should not be poisoned")
                .push(request);
            let response = self.response.clone();
            Box::pin(async move { response })
        }
    }

    fn chart_body() -> &'static str {
        r#"{
            "chart": {
                "result": [{
                    "timestamp": [1755561600, 1755648000, 1755734400],
                    "indicators": {
                        "quote": [{
                            "close": [24510.5, null, 24688.9],
                            "volume": [310200, null, 295400]
                        }]
                    }
                }],
                "error": null
            }
        }"#
    }

    fn request() -> HistoryRequest {
        HistoryRequest::new(Symbol::parse("^NSEI").expect("symbol"), Lookback::FiveDays)
    }

    #[tokio::test]
    async fn parses_chart_payload_and_skips_null_rows() {
        let client = Arc::new(ScriptedHttpClient::returning(Ok(HttpResponse::ok_json(
            chart_body(),
        ))));
        let provider = YahooHistoryProvider::new(client.clone());

        let history = provider
            .daily_history(request())
            .await
            .expect("history should parse");

        assert_eq!(history.bars.len(), 2, "null close row must be skipped");
        assert_eq!(history.last_close(), Some(24688.9));
        assert_eq!(history.last_volume(), Some(295400));

        let urls = client.recorded_urls();
        assert_eq!(urls.len(), 1, "exactly one attempt, no retry");
        assert!(urls[0].contains("range=5d"));
        assert!(urls[0].contains("%5ENSEI"), "caret must be URL-encoded");
    }

    #[tokio::test]
    async fn upstream_status_maps_to_unavailable() {
        let client = Arc::new(ScriptedHttpClient::returning(Ok(HttpResponse {
            status: 429,
            body: String::new(),
        })));
        let provider = YahooHistoryProvider::new(client);

        let err = provider
            .daily_history(request())
            .await
            .expect_err("must fail");
        assert_eq!(err.kind(), SourceErrorKind::Unavailable);
    }

    #[tokio::test]
    async fn transport_failure_maps_to_unavailable() {
        let client = Arc::new(ScriptedHttpClient::returning(Err(HttpError::new(
            "upstream timeout",
        ))));
        let provider = YahooHistoryProvider::new(client);

        let err = provider
            .daily_history(request())
            .await
            .expect_err("must fail");
        assert_eq!(err.kind(), SourceErrorKind::Unavailable);
        assert!(err.message().contains("timeout"));
    }

    #[tokio::test]
    async fn all_null_series_is_empty() {
        let body = r#"{
            "chart": {
                "result": [{
                    "timestamp": [1755561600],
                    "indicators": {"quote": [{"close": [null], "volume": [null]}]}
                }],
                "error": null
            }
        }"#;
        let client = Arc::new(ScriptedHttpClient::returning(Ok(HttpResponse::ok_json(
            body,
        ))));
        let provider = YahooHistoryProvider::new(client);

        let err = provider
            .daily_history(request())
            .await
            .expect_err("must fail");
        assert_eq!(err.kind(), SourceErrorKind::EmptySeries);
    }

    #[tokio::test]
    async fn api_error_object_is_reported() {
        let body = r#"{"chart": {"result": null, "error": {"code": "Not Found", "description": "No data found"}}}"#;
        let client = Arc::new(ScriptedHttpClient::returning(Ok(HttpResponse::ok_json(
            body,
        ))));
        let provider = YahooHistoryProvider::new(client);

        let err = provider
            .daily_history(request())
            .await
            .expect_err("must fail");
        assert_eq!(err.kind(), SourceErrorKind::Unavailable);
        assert!(err.message().contains("Not Found"));
    }
}
