use crate::models::{ApprovalStatus, Doctor};

/// Check if a doctor may appear in patient-facing rankings
///
/// Only approved doctors that are not blocked are eligible.
#[inline]
pub fn is_eligible(doctor: &Doctor) -> bool {
    doctor.approval_status == ApprovalStatus::Approved && !doctor.is_blocked
}

/// Case-insensitive specialty equality
#[inline]
pub fn matches_specialty(doctor: &Doctor, specialty: &str) -> bool {
    doctor.specialty.to_lowercase() == specialty.to_lowercase()
}

/// Reduce a doctor list to the candidate pool for a specialty
///
/// Input order is preserved.
pub fn filter_candidate_pool(doctors: Vec<Doctor>, specialty: &str) -> Vec<Doctor> {
    doctors
        .into_iter()
        .filter(is_eligible)
        .filter(|doctor| matches_specialty(doctor, specialty))
        .collect()
}
