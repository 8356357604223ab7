use crate::adapters::{EventStoreAdapter, NoopEventsPort, SystemClock};
use crate::errors::{AnalyticsError, AnalyticsResult};
use crate::format::{
    format_burn_up, format_cumulative_flow, format_event_feed, format_velocity, scope_totals,
};
use crate::model::{BurnUp, ChartKind, ChartQuery, CumulativeFlow, QueryDigest, Velocity};
use crate::policy::{AnalyticsPolicyHandle, AnalyticsPolicyView};
use crate::ports::{ClockPort, EventLogPort, EventsPort, PolicyPort};
use crate::reader::{build_plan, describe_source, run_fetch, ReplayPlan};
use crate::replay::{reconstruct, replay};
use async_trait::async_trait;
use futuboard_core_types::{BoardId, ScopeId, TicketEvent};
use futuboard_event_store::TicketEventStore;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

#[async_trait]
pub trait Analytics: Send + Sync {
    /// Raw event feed of the board.
    async fn events(&self, board: BoardId) -> AnalyticsResult<Vec<TicketEvent>>;
    async fn cumulative_flow(
        &self,
        board: BoardId,
        query: &ChartQuery,
    ) -> AnalyticsResult<CumulativeFlow>;
    /// Done vs forecast per scope, as of now.
    async fn velocity(&self, board: BoardId) -> AnalyticsResult<Velocity>;
    async fn burn_up(
        &self,
        board: BoardId,
        scope: ScopeId,
        query: &ChartQuery,
    ) -> AnalyticsResult<BurnUp>;
    fn policy_view(&self) -> AnalyticsPolicyView;
}

pub struct AnalyticsService {
    log: Arc<dyn EventLogPort>,
    policy: Arc<dyn PolicyPort>,
    events: Arc<dyn EventsPort>,
    clock: Arc<dyn ClockPort>,
}

impl AnalyticsService {
    pub fn new(
        log: Arc<dyn EventLogPort>,
        policy: Arc<dyn PolicyPort>,
        events: Arc<dyn EventsPort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            log,
            policy,
            events,
            clock,
        }
    }

    /// Service over an event store with no telemetry and the system clock.
    pub fn with_store(
        store: Arc<dyn TicketEventStore>,
        policy_handle: AnalyticsPolicyHandle,
    ) -> Self {
        let log: Arc<dyn EventLogPort> = Arc::new(EventStoreAdapter::new(store));
        let policy: Arc<dyn PolicyPort> = Arc::new(policy_handle);
        Self::new(
            log,
            policy,
            Arc::new(NoopEventsPort::default()),
            Arc::new(SystemClock),
        )
    }

    pub fn with_clock(mut self, clock: Arc<dyn ClockPort>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_events(mut self, events: Arc<dyn EventsPort>) -> Self {
        self.events = events;
        self
    }

    async fn observe<T, F>(&self, digest: QueryDigest, work: F) -> AnalyticsResult<T>
    where
        F: Future<Output = AnalyticsResult<T>>,
    {
        self.events.analytics_started(&digest);
        let started_at = Instant::now();
        let result = work.await;
        let latency_ms = started_at.elapsed().as_millis();
        match &result {
            Ok(_) => self
                .events
                .analytics_finished(&digest, true, latency_ms, None),
            Err(err) => self
                .events
                .analytics_finished(&digest, false, latency_ms, Some(err)),
        }
        result
    }

    async fn event_feed(&self, board: BoardId) -> AnalyticsResult<Vec<TicketEvent>> {
        let events = self.log.board_events(board, None).await?;
        self.events
            .analytics_fetched(events.len(), describe_source(None).as_ref());
        Ok(format_event_feed(events))
    }

    async fn build_cumulative_flow(
        &self,
        board: BoardId,
        query: &ChartQuery,
    ) -> AnalyticsResult<CumulativeFlow> {
        let plan = build_plan(query, &self.policy.view(), self.clock.now())?;
        let outcome = run_fetch(self.log.as_ref(), board, None, false).await?;
        self.events
            .analytics_fetched(outcome.events.len(), describe_source(None).as_ref());

        let buckets = reconstruct(&outcome.events, &outcome.columns, &plan)?;
        Ok(format_cumulative_flow(&buckets, &outcome.columns))
    }

    async fn build_velocity(&self, board: BoardId) -> AnalyticsResult<Velocity> {
        let plan = ReplayPlan::single_bucket(self.clock.now().naive_utc())
            .with_max_buckets(self.policy.view().max_buckets);
        let outcome = run_fetch(self.log.as_ref(), board, None, true).await?;
        self.events
            .analytics_fetched(outcome.events.len(), describe_source(None).as_ref());

        let snapshots = replay(&outcome.events, &outcome.columns, &outcome.scopes, &plan)?;
        let totals = scope_totals(snapshots.last(), &outcome.scopes);
        Ok(Velocity {
            data: format_velocity(&outcome.scopes, &totals),
        })
    }

    async fn build_burn_up(
        &self,
        board: BoardId,
        scope: ScopeId,
        query: &ChartQuery,
    ) -> AnalyticsResult<BurnUp> {
        let plan = build_plan(query, &self.policy.view(), self.clock.now())?.with_scope(scope);
        let target = self.log.scope(scope).await?;
        if target.board_id != board {
            return Err(AnalyticsError::NotFound(format!(
                "scope {scope} on board {board}"
            )));
        }
        let outcome = run_fetch(self.log.as_ref(), board, Some(scope), false).await?;
        self.events.analytics_fetched(
            outcome.events.len(),
            describe_source(Some(scope)).as_ref(),
        );

        let snapshots = replay(
            &outcome.events,
            &outcome.columns,
            std::slice::from_ref(&target),
            &plan,
        )?;
        Ok(format_burn_up(&snapshots, &target, plan.count_unit))
    }
}

#[async_trait]
impl Analytics for AnalyticsService {
    async fn events(&self, board: BoardId) -> AnalyticsResult<Vec<TicketEvent>> {
        let digest = QueryDigest::new(ChartKind::Events, board);
        self.observe(digest, self.event_feed(board)).await
    }

    async fn cumulative_flow(
        &self,
        board: BoardId,
        query: &ChartQuery,
    ) -> AnalyticsResult<CumulativeFlow> {
        let digest = QueryDigest::new(ChartKind::CumulativeFlow, board).with_query(query);
        self.observe(digest, self.build_cumulative_flow(board, query))
            .await
    }

    async fn velocity(&self, board: BoardId) -> AnalyticsResult<Velocity> {
        let digest = QueryDigest::new(ChartKind::Velocity, board);
        self.observe(digest, self.build_velocity(board)).await
    }

    async fn burn_up(
        &self,
        board: BoardId,
        scope: ScopeId,
        query: &ChartQuery,
    ) -> AnalyticsResult<BurnUp> {
        let digest = QueryDigest::new(ChartKind::BurnUp, board)
            .with_scope(scope)
            .with_query(query);
        self.observe(digest, self.build_burn_up(board, scope, query))
            .await
    }

    fn policy_view(&self) -> AnalyticsPolicyView {
        self.policy.view()
    }
}
