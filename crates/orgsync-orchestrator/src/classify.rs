//! HR system failure classification

use orgsync_collaborators::{HrError, HrRejection};
use orgsync_types::{HrSystemConfig, OrgSyncError, Upstream};
use std::collections::HashSet;

/// How a failed HR call should be treated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// The change is already in effect
    AlreadyApplied(HrRejection),
    Failed(OrgSyncError),
}

/// Maps HR errors onto the OrgSync taxonomy using the configured codes
#[derive(Debug, Clone)]
pub struct RejectionClassifier {
    duplicate_codes: HashSet<String>,
    postal_address_codes: HashSet<String>,
}

impl RejectionClassifier {
    pub fn new(config: &HrSystemConfig) -> Self {
        Self {
            duplicate_codes: config.duplicate_codes.iter().cloned().collect(),
            postal_address_codes: config.postal_address_codes.iter().cloned().collect(),
        }
    }

    pub fn classify(&self, err: HrError) -> Classification {
        match err {
            HrError::Unavailable(message) => {
                Classification::Failed(OrgSyncError::unavailable(Upstream::HrSystem, message))
            }
            HrError::Rejected(rejection) if self.duplicate_codes.contains(&rejection.code) => {
                Classification::AlreadyApplied(rejection)
            }
            HrError::Rejected(rejection)
                if self.postal_address_codes.contains(&rejection.code) =>
            {
                Classification::Failed(OrgSyncError::DependencyOrder(format!(
                    "a postal address must exist before this attribute can be set: {}",
                    rejection.message
                )))
            }
            HrError::Rejected(HrRejection { code, message }) => {
                Classification::Failed(OrgSyncError::UpstreamRejected { code, message })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> RejectionClassifier {
        RejectionClassifier::new(&HrSystemConfig::default())
    }

    #[test]
    fn test_duplicate_codes_are_already_applied() {
        let classifier = classifier();

        for code in ["ALREADY_APPLIED", "DUPLICATE"] {
            let outcome = classifier.classify(HrError::rejected(code, "exists"));
            assert!(matches!(outcome, Classification::AlreadyApplied(_)));
        }
    }

    #[test]
    fn test_missing_postal_address_is_dependency_order() {
        let outcome = classifier().classify(HrError::rejected(
            "MISSING_POSTAL_ADDRESS",
            "unit has no postal address",
        ));

        assert!(matches!(
            outcome,
            Classification::Failed(OrgSyncError::DependencyOrder(_))
        ));
    }

    #[test]
    fn test_other_rejections_are_verbatim() {
        let outcome = classifier().classify(HrError::rejected("E_LOCKED", "period is closed"));

        assert_eq!(
            outcome,
            Classification::Failed(OrgSyncError::UpstreamRejected {
                code: "E_LOCKED".into(),
                message: "period is closed".into(),
            })
        );
    }

    #[test]
    fn test_unavailable_is_transient() {
        let outcome = classifier().classify(HrError::Unavailable("connection reset".into()));

        match outcome {
            Classification::Failed(err) => assert!(err.is_retryable()),
            other => panic!("unexpected classification: {:?}", other),
        }
    }
}
