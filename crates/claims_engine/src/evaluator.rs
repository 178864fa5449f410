//! Claim evaluation pipeline
//!
//! ```text
//! ClaimSubmission -> DamageAggregator -> ClaimDamageSummary -> FraudRiskEngine -> ClaimEvaluation
//!                                     -> RepairCostKnowledgeBase::lookup -> RepairContext
//! ```

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};

use core_kernel::ClaimId;
use domain_damage::{ClaimDamageSummary, DamageAggregator, ImageAnalysis};
use domain_fraud::{ClaimFacts, FraudAssessment, FraudError, FraudRiskEngine, FraudSignal};
use domain_repair::{RepairContext, RepairCostKnowledgeBase};

use crate::config::EngineConfig;
use crate::error::EngineError;

/// Everything known about a claim at evaluation time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimSubmission {
    pub claim_id: ClaimId,
    pub claimed_amount: Decimal,
    pub coverage_limit: Decimal,
    /// One outcome per attached image
    #[serde(default)]
    pub analyses: Vec<ImageAnalysis>,
    pub signal: FraudSignal,
}

impl ClaimSubmission {
    pub fn new(claim_id: ClaimId, claimed_amount: Decimal, coverage_limit: Decimal, signal: FraudSignal) -> Self {
        Self {
            claim_id,
            claimed_amount,
            coverage_limit,
            analyses: Vec::new(),
            signal,
        }
    }

    pub fn with_analyses(mut self, analyses: Vec<ImageAnalysis>) -> Self {
        self.analyses = analyses;
        self
    }

    pub fn facts(&self) -> ClaimFacts {
        ClaimFacts::new(self.claimed_amount, self.coverage_limit)
    }
}

/// Evaluation record handed to downstream consumers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimEvaluation {
    pub claim_id: ClaimId,
    pub summary: ClaimDamageSummary,
    /// Reference costs and scenarios for the detected damage
    pub repair_context: RepairContext,
    pub assessment: FraudAssessment,
    pub evaluated_at: DateTime<Utc>,
}

/// Runs aggregation, reference lookup, and fraud assessment for claims
#[derive(Debug, Clone)]
pub struct ClaimEvaluator {
    knowledge_base: Arc<RepairCostKnowledgeBase>,
    aggregator: DamageAggregator,
    fraud_engine: FraudRiskEngine,
    pool: Option<Arc<rayon::ThreadPool>>,
}

impl ClaimEvaluator {
    /// Creates an evaluator that keeps model cost estimates as reported
    pub fn new(knowledge_base: Arc<RepairCostKnowledgeBase>, fraud_engine: FraudRiskEngine) -> Self {
        Self {
            knowledge_base,
            aggregator: DamageAggregator::new(),
            fraud_engine,
            pool: None,
        }
    }

    /// Replaces corroborated model cost estimates with catalog costs
    pub fn with_cost_reconciliation(mut self) -> Self {
        self.aggregator = DamageAggregator::with_knowledge_base(Arc::clone(&self.knowledge_base));
        self
    }

    /// Runs batches on a dedicated pool of `threads` workers
    pub fn with_batch_threads(mut self, threads: usize) -> Result<Self, EngineError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|index| format!("claims-eval-{index}"))
            .build()?;
        self.pool = Some(Arc::new(pool));
        Ok(self)
    }

    /// Builds an evaluator from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded, the fraud
    /// configuration is invalid, or the batch pool cannot be built.
    pub fn from_config(config: &EngineConfig) -> Result<Self, EngineError> {
        let knowledge_base = match &config.catalog_path {
            Some(path) => RepairCostKnowledgeBase::from_path(path)?,
            None => RepairCostKnowledgeBase::builtin()?,
        };
        let fraud_engine = FraudRiskEngine::new(config.fraud.clone())?;

        let mut evaluator = Self::new(Arc::new(knowledge_base), fraud_engine);
        if config.reconcile_costs {
            evaluator = evaluator.with_cost_reconciliation();
        }
        if let Some(threads) = config.batch_threads {
            evaluator = evaluator.with_batch_threads(threads)?;
        }

        info!(
            catalog_version = ?evaluator.knowledge_base.catalog().version(),
            reconcile_costs = config.reconcile_costs,
            batch_threads = ?config.batch_threads,
            "Claim evaluator ready"
        );
        Ok(evaluator)
    }

    pub fn knowledge_base(&self) -> &Arc<RepairCostKnowledgeBase> {
        &self.knowledge_base
    }

    pub fn fraud_engine(&self) -> &FraudRiskEngine {
        &self.fraud_engine
    }

    /// Evaluates a single claim
    #[instrument(skip(self, submission), fields(claim_id = %submission.claim_id, images = submission.analyses.len()))]
    pub fn evaluate(&self, submission: &ClaimSubmission) -> Result<ClaimEvaluation, FraudError> {
        let summary = self.aggregator.aggregate_analyses(&submission.analyses);
        let damage_types: Vec<&str> = summary.damage_types.iter().map(|key| key.as_str()).collect();
        let repair_context = self.knowledge_base.lookup(&damage_types[..], summary.max_severity);
        let assessment = self
            .fraud_engine
            .assess(&submission.facts(), &summary, &submission.signal)?;

        info!(
            analyzed = summary.analyzed_count,
            score = %assessment.composite_score,
            risk_level = %assessment.risk_level,
            recommendation = %assessment.recommendation,
            flags = assessment.flags.len(),
            "Claim evaluated"
        );

        Ok(ClaimEvaluation {
            claim_id: submission.claim_id,
            summary,
            repair_context,
            assessment,
            evaluated_at: Utc::now(),
        })
    }

    /// Evaluates independent claims in parallel
    ///
    /// Results are returned in submission order. A failing claim does not
    /// affect the others.
    pub fn evaluate_batch(&self, submissions: &[ClaimSubmission]) -> Vec<Result<ClaimEvaluation, FraudError>> {
        let run = || {
            submissions
                .par_iter()
                .map(|submission| self.evaluate(submission))
                .collect::<Vec<_>>()
        };

        let results = match &self.pool {
            Some(pool) => pool.install(run),
            None => run(),
        };

        let failed = results.iter().filter(|result| result.is_err()).count();
        info!(claims = submissions.len(), failed, "Claim batch evaluated");
        results
    }
}
