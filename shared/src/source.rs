//! 视图数据源
//!
//! 每个视图持有一个 `DataSource`，变更成功后调用 `refresh()` 重新拉取，
//! 对话框等子组件只接收回调，不需要了解父视图的加载逻辑。

use crate::client::ApiClient;
use crate::date::{Clock, SystemClock};
use crate::error::ApiResult;
use crate::http::HttpClient;
use crate::stats::StatsWindow;
use crate::{Pool, Reservation, StatisticsSnapshot};

#[async_trait::async_trait(?Send)]
pub trait DataSource {
    type Output;

    async fn refresh(&self) -> ApiResult<Self::Output>;
}

/// 全部预约池
pub struct PoolsSource<C> {
    client: ApiClient<C>,
}

impl<C: HttpClient> PoolsSource<C> {
    pub fn new(client: ApiClient<C>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait(?Send)]
impl<C: HttpClient> DataSource for PoolsSource<C> {
    type Output = Vec<Pool>;

    async fn refresh(&self) -> ApiResult<Vec<Pool>> {
        self.client.list_pools().await
    }
}

/// 从当前时刻开始的预约
pub struct ReservationsSource<C, K = SystemClock> {
    client: ApiClient<C>,
    clock: K,
}

impl<C: HttpClient> ReservationsSource<C> {
    pub fn new(client: ApiClient<C>) -> Self {
        Self::with_clock(client, SystemClock)
    }
}

impl<C: HttpClient, K: Clock> ReservationsSource<C, K> {
    pub fn with_clock(client: ApiClient<C>, clock: K) -> Self {
        Self { client, clock }
    }

    pub fn client(&self) -> &ApiClient<C> {
        &self.client
    }
}

#[async_trait::async_trait(?Send)]
impl<C: HttpClient, K: Clock> DataSource for ReservationsSource<C, K> {
    type Output = Vec<Reservation>;

    async fn refresh(&self) -> ApiResult<Vec<Reservation>> {
        self.client.list_reservations(self.clock.now()).await
    }
}

/// 指定窗口内的使用排行
pub struct StatisticsSource<C, K = SystemClock> {
    client: ApiClient<C>,
    clock: K,
    window: StatsWindow,
}

impl<C: HttpClient> StatisticsSource<C> {
    pub fn new(client: ApiClient<C>, window: StatsWindow) -> Self {
        Self::with_clock(client, SystemClock, window)
    }
}

impl<C: HttpClient, K: Clock> StatisticsSource<C, K> {
    pub fn with_clock(client: ApiClient<C>, clock: K, window: StatsWindow) -> Self {
        Self {
            client,
            clock,
            window,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl<C: HttpClient, K: Clock> DataSource for StatisticsSource<C, K> {
    type Output = StatisticsSnapshot;

    async fn refresh(&self) -> ApiResult<StatisticsSnapshot> {
        let start = self.window.cutoff(self.clock.now());
        self.client.statistics(start).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::FixedClock;
    use crate::http::MockHttpClient;
    use crate::protocol::HttpMethod;
    use chrono::{TimeZone, Utc};
    use serde_json::json;
    use std::rc::Rc;

    const BASE: &str = "http://api.test";

    fn client(mock: &Rc<MockHttpClient>) -> ApiClient<Rc<MockHttpClient>> {
        ApiClient::new(mock.clone(), BASE).with_token("abc123")
    }

    fn now() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap())
    }

    #[tokio::test]
    async fn test_week_requests_seven_day_cutoff() {
        let mock = Rc::new(MockHttpClient::new());
        let url = format!("{BASE}/stats/?start=2026-10-09T12:00:00Z");
        mock.mock_json(
            HttpMethod::Get,
            &url,
            200,
            json!({"topReservations": [{"pool_id": "s7n-vm1", "total_slots": 15}]}),
        );

        let source = StatisticsSource::with_clock(client(&mock), now(), StatsWindow::Week);
        let snapshot = source.refresh().await.unwrap();

        assert_eq!(snapshot.most_used.len(), 1);
        let requests = mock.requests.borrow();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url, url);
        assert!(!requests[0].url.contains("2026-09-16"));
    }

    #[tokio::test]
    async fn test_month_requests_thirty_day_cutoff() {
        let mock = Rc::new(MockHttpClient::new());
        let source = StatisticsSource::with_clock(client(&mock), now(), StatsWindow::Month);
        let _ = source.refresh().await;

        assert_eq!(
            mock.requests.borrow()[0].url,
            format!("{BASE}/stats/?start=2026-09-16T12:00:00Z")
        );
    }

    #[tokio::test]
    async fn test_reservations_start_now() {
        let mock = Rc::new(MockHttpClient::new());
        let url = format!("{BASE}/reservations/?start=2026-10-16T12:00:00Z");
        mock.mock_json(
            HttpMethod::Get,
            &url,
            200,
            json!({"reservations": [{
                "id": 7,
                "pool_id": "s7n-vm1",
                "slot_count": 2,
                "start_datetime": "2026-10-17 09:00:00+00:00",
                "end_datetime": "2026-10-17 11:00:00+00:00"
            }]}),
        );

        let source = ReservationsSource::with_clock(client(&mock), now());
        let reservations = source.refresh().await.unwrap();
        assert_eq!(reservations.len(), 1);
        assert_eq!(reservations[0].id, 7);
    }

    #[tokio::test]
    async fn test_pools_source() {
        let mock = Rc::new(MockHttpClient::new());
        mock.mock_json(
            HttpMethod::Get,
            &format!("{BASE}/pools/"),
            200,
            json!({"pools": [{"pool_id": "a", "displayName": "A", "maximumCount": 3}]}),
        );
        let pools = PoolsSource::new(client(&mock)).refresh().await.unwrap();
        assert_eq!(pools[0].maximum_count, 3);
    }
}
