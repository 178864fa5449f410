//! Folding per-image findings into a per-claim summary

use std::sync::Arc;
use tracing::{debug, warn};

use core_kernel::CostRange;
use domain_repair::RepairCostKnowledgeBase;

use crate::descriptor::{DamageDescriptor, ImageAnalysis};
use crate::summary::ClaimDamageSummary;

/// Aggregates damage descriptors into a [`ClaimDamageSummary`]
///
/// A plain aggregator sums the model-produced cost of each image. An
/// aggregator built with [`DamageAggregator::with_knowledge_base`] replaces an
/// image's cost with the knowledge-base estimate whenever that estimate is
/// corroborated by a historical scenario.
#[derive(Debug, Clone, Default)]
pub struct DamageAggregator {
    knowledge_base: Option<Arc<RepairCostKnowledgeBase>>,
}

impl DamageAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_knowledge_base(knowledge_base: Arc<RepairCostKnowledgeBase>) -> Self {
        Self {
            knowledge_base: Some(knowledge_base),
        }
    }

    /// Merges descriptors for a claim with `total_image_count` attached images
    ///
    /// Images whose analysis failed are simply absent from `descriptors`.
    /// A `total_image_count` lower than the number of descriptors is raised
    /// to match, so the failed-image count never underflows.
    pub fn aggregate(&self, descriptors: &[DamageDescriptor], total_image_count: u32) -> ClaimDamageSummary {
        let analyzed_count = u32::try_from(descriptors.len()).unwrap_or(u32::MAX);
        let image_count = if total_image_count < analyzed_count {
            warn!(
                total_image_count,
                analyzed_count, "Image count below analyzed count, using analyzed count"
            );
            analyzed_count
        } else {
            total_image_count
        };

        let mut summary = ClaimDamageSummary::no_assessment(image_count);
        summary.analyzed_count = analyzed_count;

        for (index, descriptor) in descriptors.iter().enumerate() {
            summary.damage_types.extend(descriptor.damage_types.iter().cloned());
            summary.affected_areas.extend(descriptor.affected_areas.iter().cloned());
            summary.max_severity = summary.max_severity.max(Some(descriptor.severity));
            summary.max_severity_score = summary.max_severity_score.max(Some(descriptor.severity_score));

            let (cost, from_knowledge_base) = self.descriptor_cost(descriptor);
            if from_knowledge_base {
                summary.knowledge_base_costed += 1;
            }
            summary.total_cost = summary.total_cost + cost;

            if let Some(notes) = descriptor.notes.as_deref().filter(|n| !n.trim().is_empty()) {
                summary.notes.push(format!("Image {}: {}", index + 1, notes));
            }
        }

        debug!(
            image_count,
            analyzed_count,
            damage_types = summary.damage_types.len(),
            max_severity = ?summary.max_severity,
            total_min = %summary.total_cost.min(),
            total_max = %summary.total_cost.max(),
            "Damage findings aggregated"
        );

        summary
    }

    /// Merges per-image analysis outcomes, skipping failures
    ///
    /// Every outcome counts as an attached image.
    pub fn aggregate_analyses(&self, analyses: &[ImageAnalysis]) -> ClaimDamageSummary {
        let mut descriptors = Vec::with_capacity(analyses.len());
        for analysis in analyses {
            match analysis {
                Ok(descriptor) => descriptors.push(descriptor.clone()),
                Err(failure) => warn!(
                    image_id = ?failure.image_id,
                    reason = %failure.reason,
                    "Skipping image with failed analysis"
                ),
            }
        }

        let total = u32::try_from(analyses.len()).unwrap_or(u32::MAX);
        self.aggregate(&descriptors, total)
    }

    fn descriptor_cost(&self, descriptor: &DamageDescriptor) -> (CostRange, bool) {
        let Some(knowledge_base) = &self.knowledge_base else {
            return (descriptor.cost, false);
        };

        let estimate = knowledge_base.estimate(&descriptor.damage_types, Some(descriptor.severity));
        if estimate.is_authoritative() {
            debug!(
                model_min = %descriptor.cost.min(),
                model_max = %descriptor.cost.max(),
                reference_min = %estimate.cost.min(),
                reference_max = %estimate.cost.max(),
                "Using reference repair cost"
            );
            (estimate.cost, true)
        } else {
            (descriptor.cost, false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{AnalysisFailure, FailureReason, SeverityScore};
    use core_kernel::Score;
    use domain_repair::SeverityLevel;
    use rust_decimal_macros::dec;

    fn descriptor(types: &[&str], severity: SeverityLevel, min: u32, max: u32) -> DamageDescriptor {
        DamageDescriptor::new(
            types,
            severity,
            SeverityScore::new(dec!(50)).unwrap(),
            CostRange::from_whole(min, max).unwrap(),
            Score::new(dec!(0.8)).unwrap(),
        )
    }

    #[test]
    fn test_empty_input_is_no_assessment() {
        let summary = DamageAggregator::new().aggregate(&[], 0);
        assert_eq!(summary, ClaimDamageSummary::no_assessment(0));
    }

    #[test]
    fn test_under_reported_image_count_is_raised() {
        let d = descriptor(&["dent"], SeverityLevel::Minor, 150, 500);
        let summary = DamageAggregator::new().aggregate(&[d.clone(), d], 1);
        assert_eq!(summary.image_count, 2);
        assert_eq!(summary.failed_count(), 0);
    }

    #[test]
    fn test_failed_analyses_count_as_images() {
        let analyses: Vec<ImageAnalysis> = vec![
            Ok(descriptor(&["dent"], SeverityLevel::Minor, 150, 500)),
            Err(AnalysisFailure::new(FailureReason::Timeout)),
            Err(AnalysisFailure::new(FailureReason::MissingImage)),
        ];

        let summary = DamageAggregator::new().aggregate_analyses(&analyses);
        assert_eq!(summary.image_count, 3);
        assert_eq!(summary.analyzed_count, 1);
        assert_eq!(summary.failed_count(), 2);
    }

    #[test]
    fn test_notes_are_labelled_by_image() {
        let first = descriptor(&["dent"], SeverityLevel::Minor, 150, 500).with_notes("Door ding");
        let second = descriptor(&["scratch"], SeverityLevel::Minor, 100, 400).with_notes("  ");
        let third = descriptor(&["scratch"], SeverityLevel::Minor, 100, 400).with_notes("Key scratch");

        let summary = DamageAggregator::new().aggregate(&[first, second, third], 3);
        assert_eq!(summary.notes, vec!["Image 1: Door ding", "Image 3: Key scratch"]);
    }

    #[test]
    fn test_knowledge_base_overrides_corroborated_costs() {
        let kb = Arc::new(RepairCostKnowledgeBase::builtin().unwrap());
        let aggregator = DamageAggregator::with_knowledge_base(kb);

        // dent/minor is corroborated by the door-ding scenario: 150-500.
        let corroborated = descriptor(&["dent"], SeverityLevel::Minor, 1000, 2000);
        // water damage has no reference data: keeps model cost.
        let unknown = descriptor(&["water_damage"], SeverityLevel::Major, 700, 900);

        let summary = aggregator.aggregate(&[corroborated, unknown], 2);
        assert_eq!(summary.knowledge_base_costed, 1);
        assert_eq!(summary.total_cost, CostRange::from_whole(850, 1400).unwrap());
    }
}
