//! Verify Content use case
//!
//! Orchestrates one verification: optional page fetch, prompt build,
//! concurrent judge dispatch, consensus aggregation and reward assessment.

use crate::config::VerificationParams;
use crate::ports::content_source::ContentSource;
use crate::ports::judge_client::JudgeClient;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::ports::verification_logger::{
    EVENT_JUDGE_OPINION, EVENT_VERDICT, NoVerificationLogger, VerificationEvent,
    VerificationLogger,
};
use crate::use_cases::fan_out::FanOutScheduler;
use crate::use_cases::run_judge::JudgeTaskRunner;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use veriquorum_domain::{
    DomainError, JudgePrompt, Opinion, RewardAssessment, Verdict, VerificationRequest, aggregate,
    estimate_popularity,
};

/// Errors that stop a verification before any judge is asked
///
/// Everything that goes wrong with individual judges ends up inside the
/// verdict instead.
#[derive(Error, Debug)]
pub enum VerifyError {
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Input for the VerifyContent use case
#[derive(Debug, Clone)]
pub struct VerifyContentInput {
    pub request: VerificationRequest,
    /// Popularity in `[0, 1]` used for the reward; estimated from the text when absent
    pub popularity: Option<f64>,
}

impl VerifyContentInput {
    pub fn new(request: VerificationRequest) -> Self {
        Self {
            request,
            popularity: None,
        }
    }

    pub fn with_popularity(mut self, popularity: f64) -> Self {
        self.popularity = Some(popularity);
        self
    }
}

impl From<VerificationRequest> for VerifyContentInput {
    fn from(request: VerificationRequest) -> Self {
        Self::new(request)
    }
}

/// Result of a completed verification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationOutcome {
    /// The request as the judges saw it (with fetched page text, if any)
    pub request: VerificationRequest,
    pub verdict: Verdict,
    /// Present only when the verdict is `fake`
    pub reward: Option<RewardAssessment>,
}

/// Use case for verifying one piece of content with a panel of judges
pub struct VerifyContentUseCase {
    judges: Vec<Arc<dyn JudgeClient>>,
    params: VerificationParams,
    content_source: Option<Arc<dyn ContentSource>>,
    logger: Arc<dyn VerificationLogger>,
    cancellation: Option<CancellationToken>,
}

impl VerifyContentUseCase {
    pub fn new(judges: Vec<Arc<dyn JudgeClient>>) -> Self {
        Self {
            judges,
            params: VerificationParams::default(),
            content_source: None,
            logger: Arc::new(NoVerificationLogger),
            cancellation: None,
        }
    }

    pub fn with_params(mut self, params: VerificationParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_content_source(mut self, source: Arc<dyn ContentSource>) -> Self {
        self.content_source = Some(source);
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn VerificationLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    pub fn params(&self) -> &VerificationParams {
        &self.params
    }

    /// Verify a request and return only the verdict
    pub async fn verify(&self, request: VerificationRequest) -> Result<Verdict, VerifyError> {
        self.execute(VerifyContentInput::new(request))
            .await
            .map(|outcome| outcome.verdict)
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &self,
        input: VerifyContentInput,
    ) -> Result<VerificationOutcome, VerifyError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: VerifyContentInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<VerificationOutcome, VerifyError> {
        if self.judges.is_empty() {
            return Err(DomainError::NoJudges.into());
        }
        self.params.validate()?;
        if input.request.is_empty() {
            return Err(DomainError::EmptyRequest.into());
        }

        let request = self.load_content(input.request).await;
        let target = request.target();

        info!(
            "Verifying {} with {} judges ({})",
            target,
            self.judges.len(),
            self.params.policy
        );

        let prompt = Arc::new(JudgePrompt::for_request(&request));
        let opinions = self.scheduler().dispatch(&self.judges, prompt, progress).await;

        for opinion in &opinions {
            self.log_opinion(&target, opinion);
        }

        let verdict = aggregate(opinions, &self.params.policy);
        if !verdict.quorum_met {
            warn!(
                "Quorum not met for {}: {}/{} successful, need {}",
                target, verdict.tally.successful, verdict.tally.total, self.params.policy.min_quorum
            );
        }

        let popularity = input
            .popularity
            .unwrap_or_else(|| estimate_popularity(&request.content_text));
        let reward = self.params.reward.assess(&verdict, popularity);

        info!(
            "Verdict for {}: {} (confidence {:.2}, consensus {:.2})",
            target, verdict.decision, verdict.confidence, verdict.consensus_score
        );

        self.log_verdict(&target, &verdict, reward.as_ref());
        progress.on_dispatch_complete(&verdict);

        Ok(VerificationOutcome {
            request,
            verdict,
            reward,
        })
    }

    fn scheduler(&self) -> FanOutScheduler {
        let mut runner = JudgeTaskRunner::new(self.params.judge_deadline);
        if let Some(token) = &self.cancellation {
            runner = runner.with_cancellation(token.clone());
        }
        FanOutScheduler::new(runner)
    }

    /// Fill in page text for URL-only requests; failures keep the URL-only request
    async fn load_content(&self, mut request: VerificationRequest) -> VerificationRequest {
        let Some(source) = &self.content_source else {
            return request;
        };
        if !request.needs_content() {
            return request;
        }

        let url = request.content_url.clone();
        let fetch = source.fetch(&url);
        let fetched = match &self.cancellation {
            Some(token) => {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => {
                        warn!("Fetch of {} cancelled", url);
                        return request;
                    }
                    fetched = fetch => fetched,
                }
            }
            None => fetch.await,
        };

        match fetched {
            Ok(text) => {
                info!(
                    "Fetched {} chars from {}",
                    text.chars().count(),
                    request.content_url
                );
                request.content_text = text;
            }
            Err(e) => {
                warn!("Could not fetch {}: {}", request.content_url, e);
            }
        }
        request
    }

    fn log_opinion(&self, target: &str, opinion: &Opinion) {
        self.logger.log(VerificationEvent::new(
            EVENT_JUDGE_OPINION,
            serde_json::json!({
                "target": target,
                "judge": opinion.judge_id.as_str(),
                "decision": opinion.decision.as_str(),
                "confidence": opinion.confidence,
                "reasoning": opinion.reasoning,
                "evidence": opinion.evidence,
                "failed": opinion.failed,
                "failure_reason": opinion.failure_reason,
            }),
        ));
    }

    fn log_verdict(&self, target: &str, verdict: &Verdict, reward: Option<&RewardAssessment>) {
        self.logger.log(VerificationEvent::new(
            EVENT_VERDICT,
            serde_json::json!({
                "target": target,
                "decision": verdict.decision.as_str(),
                "confidence": verdict.confidence,
                "consensus_score": verdict.consensus_score,
                "quorum_met": verdict.quorum_met,
                "successful": verdict.tally.successful,
                "total": verdict.tally.total,
                "reward": reward.map(|r| r.reward),
            }),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::content_source::ContentSourceError;
    use crate::ports::judge_client::JudgeError;
    use crate::use_cases::scripted_judge::{Script, ScriptedJudge};
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;
    use veriquorum_domain::{ConsensusPolicy, Decision, EvidenceBlock, EvidenceKind};

    const EPS: f64 = 1e-9;

    fn panel(judges: Vec<ScriptedJudge>) -> Vec<Arc<dyn JudgeClient>> {
        judges
            .into_iter()
            .map(|j| Arc::new(j) as Arc<dyn JudgeClient>)
            .collect()
    }

    fn hanging(id: &str) -> ScriptedJudge {
        ScriptedJudge::new(id, Script::Hang)
    }

    fn request() -> VerificationRequest {
        VerificationRequest::new("Scientists confirm the moon is made of cheese")
            .with_url("https://example.com/moon")
    }

    #[derive(Default)]
    struct RecordingLogger {
        events: Mutex<Vec<(String, serde_json::Value)>>,
    }

    impl VerificationLogger for RecordingLogger {
        fn log(&self, event: VerificationEvent) {
            self.events
                .lock()
                .unwrap()
                .push((event.event_type.to_string(), event.payload));
        }
    }

    struct StaticSource {
        result: Result<String, String>,
    }

    #[async_trait]
    impl ContentSource for StaticSource {
        async fn fetch(&self, url: &str) -> Result<String, ContentSourceError> {
            match &self.result {
                Ok(text) => Ok(text.clone()),
                Err(e) => Err(ContentSourceError::FetchFailed(format!("{url}: {e}"))),
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_five_judges_three_fake_high_confidence() {
        let use_case = VerifyContentUseCase::new(panel(vec![
            ScriptedJudge::voting("j1", "fake", 0.8),
            ScriptedJudge::voting("j2", "fake", 0.7),
            ScriptedJudge::voting("j3", "fake", 0.9),
            hanging("j4"),
            ScriptedJudge::new("j5", Script::Fail(JudgeError::Connection("refused".into()))),
        ]));

        let verdict = use_case.verify(request()).await.unwrap();

        assert_eq!(verdict.decision, Decision::Fake);
        assert!(verdict.quorum_met);
        assert!((verdict.confidence - 0.8).abs() < EPS);
        assert!((verdict.consensus_score - 1.0).abs() < EPS);
        assert_eq!(verdict.opinions.len(), 5);
        assert!(verdict.opinions[3].is_timeout());
        assert!(verdict.opinions[4].failed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_success_is_insufficient_quorum() {
        let use_case = VerifyContentUseCase::new(panel(vec![
            ScriptedJudge::voting("j1", "authentic", 0.9),
            hanging("j2"),
            hanging("j3"),
            hanging("j4"),
            hanging("j5"),
        ]));

        let verdict = use_case.verify(request()).await.unwrap();

        assert_eq!(verdict.decision, Decision::Uncertain);
        assert!(!verdict.quorum_met);
        assert!(verdict.rationale.contains("Insufficient"));
        assert_eq!(verdict.opinions.len(), 5);
    }

    #[tokio::test]
    async fn test_low_confidence_majority_is_uncertain() {
        let use_case = VerifyContentUseCase::new(panel(vec![
            ScriptedJudge::voting("j1", "fake", 0.5),
            ScriptedJudge::voting("j2", "fake", 0.5),
            ScriptedJudge::voting("j3", "authentic", 0.4),
        ]));

        let verdict = use_case.verify(request()).await.unwrap();

        assert_eq!(verdict.decision, Decision::Uncertain);
        assert!(verdict.quorum_met);
        assert!(verdict.rationale.contains("low-confidence"));
    }

    #[tokio::test]
    async fn test_no_judges_is_an_error() {
        let use_case = VerifyContentUseCase::new(Vec::new());
        let result = use_case.verify(request()).await;
        assert!(matches!(
            result,
            Err(VerifyError::Domain(DomainError::NoJudges))
        ));
    }

    #[tokio::test]
    async fn test_empty_request_is_an_error_and_no_judge_is_asked() {
        let judge = Arc::new(ScriptedJudge::voting("j1", "fake", 0.9));
        let use_case = VerifyContentUseCase::new(vec![judge.clone() as Arc<dyn JudgeClient>]);

        let result = use_case.verify(VerificationRequest::default()).await;

        assert!(matches!(
            result,
            Err(VerifyError::Domain(DomainError::EmptyRequest))
        ));
        assert_eq!(judge.calls(), 0);
    }

    #[tokio::test]
    async fn test_invalid_policy_is_an_error() {
        let params = VerificationParams::default()
            .with_policy(ConsensusPolicy::default().with_min_quorum(0));
        let use_case =
            VerifyContentUseCase::new(panel(vec![ScriptedJudge::voting("j1", "fake", 0.9)]))
                .with_params(params);

        let result = use_case.verify(request()).await;

        assert!(matches!(
            result,
            Err(VerifyError::Domain(DomainError::InvalidPolicy(_)))
        ));
    }

    #[tokio::test]
    async fn test_fake_verdict_carries_reward() {
        let use_case = VerifyContentUseCase::new(panel(vec![
            ScriptedJudge::voting("j1", "fake", 0.9),
            ScriptedJudge::voting("j2", "fake", 0.8),
        ]));

        let outcome = use_case
            .execute(VerifyContentInput::new(request()).with_popularity(1.0))
            .await
            .unwrap();

        let reward = outcome.reward.unwrap();
        assert!((reward.popularity - 1.0).abs() < EPS);
        assert!((reward.reward - 0.25).abs() < EPS);
    }

    #[tokio::test]
    async fn test_authentic_verdict_has_no_reward() {
        let use_case = VerifyContentUseCase::new(panel(vec![
            ScriptedJudge::voting("j1", "authentic", 0.9),
            ScriptedJudge::voting("j2", "authentic", 0.8),
        ]));

        let outcome = use_case
            .execute(VerifyContentInput::new(request()).with_popularity(1.0))
            .await
            .unwrap();

        assert_eq!(outcome.verdict.decision, Decision::Authentic);
        assert!(outcome.reward.is_none());
    }

    #[tokio::test]
    async fn test_reward_uses_popularity_estimate_without_override() {
        let use_case = VerifyContentUseCase::new(panel(vec![
            ScriptedJudge::voting("j1", "fake", 0.9),
            ScriptedJudge::voting("j2", "fake", 0.8),
        ]));
        let req = request();
        let expected = estimate_popularity(&req.content_text);

        let outcome = use_case.execute(req.into()).await.unwrap();

        let reward = outcome.reward.unwrap();
        assert!((reward.popularity - expected).abs() < EPS);
    }

    #[tokio::test]
    async fn test_every_judge_receives_the_same_prompt() {
        let a = Arc::new(ScriptedJudge::voting("j1", "fake", 0.9));
        let b = Arc::new(ScriptedJudge::voting("j2", "fake", 0.8));
        let use_case = VerifyContentUseCase::new(vec![
            a.clone() as Arc<dyn JudgeClient>,
            b.clone() as Arc<dyn JudgeClient>,
        ]);
        let req = request().with_evidence(EvidenceBlock::new(
            EvidenceKind::WebSearch,
            "No credible outlet reports this",
        ));

        use_case.verify(req).await.unwrap();

        let prompt = a.last_prompt().unwrap();
        assert_eq!(Some(prompt.clone()), b.last_prompt());
        assert!(prompt.user.contains("No credible outlet reports this"));
        assert!(prompt.user.contains("https://example.com/moon"));
    }

    #[tokio::test]
    async fn test_content_source_fills_url_only_request() {
        let judge = Arc::new(ScriptedJudge::voting("j1", "fake", 0.9));
        let use_case = VerifyContentUseCase::new(vec![judge.clone() as Arc<dyn JudgeClient>])
            .with_content_source(Arc::new(StaticSource {
                result: Ok("Fetched page body".to_string()),
            }));

        let outcome = use_case
            .execute(VerificationRequest::for_url("https://example.com/a").into())
            .await
            .unwrap();

        assert_eq!(outcome.request.content_text, "Fetched page body");
        assert!(judge.last_prompt().unwrap().user.contains("Fetched page body"));
    }

    #[tokio::test]
    async fn test_content_source_failure_keeps_url_only_request() {
        let use_case =
            VerifyContentUseCase::new(panel(vec![ScriptedJudge::voting("j1", "fake", 0.9)]))
                .with_content_source(Arc::new(StaticSource {
                    result: Err("HTTP 404".to_string()),
                }));

        let outcome = use_case
            .execute(VerificationRequest::for_url("https://example.com/a").into())
            .await
            .unwrap();

        assert!(outcome.request.content_text.is_empty());
        assert_eq!(outcome.verdict.opinions.len(), 1);
    }

    #[tokio::test]
    async fn test_logger_records_each_opinion_then_verdict() {
        let logger = Arc::new(RecordingLogger::default());
        let use_case = VerifyContentUseCase::new(panel(vec![
            ScriptedJudge::voting("j1", "fake", 0.9),
            ScriptedJudge::new("j2", Script::Fail(JudgeError::Other("boom".into()))),
        ]))
        .with_logger(logger.clone());

        use_case.verify(request()).await.unwrap();

        let events = logger.events.lock().unwrap();
        let types: Vec<&str> = events.iter().map(|(t, _)| t.as_str()).collect();
        assert_eq!(types, vec!["judge_opinion", "judge_opinion", "verdict"]);
        assert_eq!(events[1].1["failed"], true);
        assert_eq!(events[1].1["failure_reason"], "Other error: boom");
        assert_eq!(events[2].1["total"], 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancellation_still_yields_verdict() {
        let token = CancellationToken::new();
        let use_case = VerifyContentUseCase::new(panel(vec![
            ScriptedJudge::voting("j1", "fake", 0.9),
            hanging("j2"),
            hanging("j3"),
        ]))
        .with_cancellation(token.clone());

        let cancel = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(2)).await;
            token.cancel();
        });

        let start = tokio::time::Instant::now();
        let verdict = use_case.verify(request()).await.unwrap();
        cancel.await.unwrap();

        assert!(start.elapsed() < Duration::from_secs(45));
        assert_eq!(verdict.decision, Decision::Uncertain);
        assert!(!verdict.quorum_met);
        assert_eq!(verdict.opinions[1].failure_reason.as_deref(), Some("cancelled"));
        assert_eq!(verdict.opinions[2].failure_reason.as_deref(), Some("cancelled"));
        assert!(!verdict.opinions[0].failed);
    }

    struct HangingSource;

    #[async_trait]
    impl ContentSource for HangingSource {
        async fn fetch(&self, _url: &str) -> Result<String, ContentSourceError> {
            std::future::pending().await
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancellation_interrupts_page_fetch() {
        let token = CancellationToken::new();
        let use_case = VerifyContentUseCase::new(panel(vec![
            ScriptedJudge::voting("j1", "fake", 0.9),
            ScriptedJudge::voting("j2", "fake", 0.8),
        ]))
        .with_content_source(Arc::new(HangingSource))
        .with_cancellation(token.clone());

        let cancel = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            token.cancel();
        });

        let start = tokio::time::Instant::now();
        let outcome = use_case
            .execute(VerifyContentInput::new(VerificationRequest::for_url(
                "https://example.com/slow",
            )))
            .await
            .unwrap();
        cancel.await.unwrap();

        assert!(start.elapsed() < Duration::from_secs(2));
        assert!(outcome.request.content_text.is_empty());
        assert_eq!(outcome.verdict.decision, Decision::Uncertain);
        assert!(
            outcome
                .verdict
                .opinions
                .iter()
                .all(|o| o.failure_reason.as_deref() == Some("cancelled"))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_deadline_is_honoured() {
        let params = VerificationParams::default().with_judge_deadline(Duration::from_secs(5));
        let use_case = VerifyContentUseCase::new(panel(vec![
            ScriptedJudge::new(
                "slow",
                Script::ReplyAfter(
                    Duration::from_secs(10),
                    r#"{"decision":"fake","confidence":0.9,"reasoning":"late"}"#.to_string(),
                ),
            ),
            ScriptedJudge::voting("fast", "fake", 0.9),
        ]))
        .with_params(params);

        let start = tokio::time::Instant::now();
        let verdict = use_case.verify(request()).await.unwrap();

        assert!(start.elapsed() < Duration::from_secs(6));
        assert!(verdict.opinions[0].is_timeout());
        assert_eq!(verdict.decision, Decision::Uncertain);
    }
}
