// Unit tests for the doctor ranking engine

use doctor_ranking::core::{
    filters::{filter_candidate_pool, is_eligible, matches_specialty},
    scoring::{calculate_score, get_detailed_scores},
    signals::{experience_score, feedback_count_score, rating_score, specialty_match_score},
    ScoreWeights, ScoringError, Signal,
};
use doctor_ranking::models::{aggregate_feedback, ApprovalStatus, Doctor, Feedback, FeedbackStats};
use std::collections::HashMap;

fn create_doctor(id: &str, specialty: &str, ratings: &[u8], years: Option<u32>) -> Doctor {
    let mut doctor = Doctor::new(id, specialty).with_ratings(ratings);
    doctor.years_of_experience = years;
    doctor
}

#[test]
fn test_rating_score_without_feedback_is_neutral() {
    let doctor = create_doctor("new", "Neurologist", &[], Some(3));
    assert_eq!(rating_score(&doctor.feedback), 50.0);
}

#[test]
fn test_rating_score_uses_mean() {
    let stats = FeedbackStats::from_ratings(&[5, 4, 3, 4]);
    assert_eq!(rating_score(&stats), 80.0);
}

#[test]
fn test_experience_score_monotonic() {
    let mut previous = experience_score(None);
    for years in 0..40 {
        let score = experience_score(Some(years));
        assert!(score >= previous, "score dropped at {} years", years);
        previous = score;
    }
    assert_eq!(experience_score(Some(20)), 100.0);
    assert_eq!(experience_score(Some(39)), 100.0);
}

#[test]
fn test_feedback_count_score_linear_then_capped() {
    assert_eq!(feedback_count_score(25), 50.0);
    assert_eq!(feedback_count_score(10), 20.0);
    assert_eq!(feedback_count_score(50), 100.0);
    assert_eq!(feedback_count_score(51), 100.0);
}

#[test]
fn test_specialty_match_exact_values() {
    assert_eq!(specialty_match_score("Gastroenterologist", Some("GASTROENTEROLOGIST")), 100.0);
    assert_eq!(specialty_match_score("Gastroenterologist", Some("Hepatologist")), 0.0);
    assert_eq!(specialty_match_score("Gastroenterologist", None), 0.0);
}

#[test]
fn test_missing_experience_is_not_an_error() {
    let doctor = create_doctor("no-exp", "ENT", &[4, 4], None);
    let breakdown = get_detailed_scores(&doctor, Some("ENT"), false);

    assert_eq!(breakdown.components.experience.raw_score, 0.0);
    assert!(breakdown.total_score > 0.0);
}

#[test]
fn test_no_prediction_gives_no_bonus() {
    let doctor = create_doctor("1", "ENT", &[5], Some(20));

    let with = calculate_score(&doctor, Some("ent"), None, false);
    let without = calculate_score(&doctor, None, None, false);

    assert!((with - without - 10.0).abs() < 1e-9);
}

#[test]
fn test_breakdown_reports_preset() {
    let doctor = create_doctor("1", "ENT", &[5], Some(20));

    assert_eq!(get_detailed_scores(&doctor, None, false).weights_used, "current");
    assert_eq!(get_detailed_scores(&doctor, None, true).weights_used, "future");
}

#[test]
fn test_breakdown_weights_match_preset() {
    let doctor = create_doctor("1", "ENT", &[5], Some(20));
    let breakdown = get_detailed_scores(&doctor, None, true);

    for signal in Signal::ALL {
        assert_eq!(
            breakdown.components.get(signal).weight,
            ScoreWeights::FUTURE.get(signal)
        );
    }
}

#[test]
fn test_weights_from_map_fails_fast() {
    let mut map: HashMap<String, f64> = HashMap::new();
    map.insert("rating".to_string(), 0.4);
    map.insert("experience".to_string(), 0.3);
    map.insert("feedback_count".to_string(), 0.2);
    map.insert("specialty_match".to_string(), 0.1);

    assert_eq!(
        ScoreWeights::from_map(&map),
        Err(ScoringError::MissingWeight("sentiment".to_string()))
    );

    map.insert("sentiment".to_string(), 0.0);
    assert_eq!(ScoreWeights::from_map(&map), Ok(ScoreWeights::CURRENT));
}

#[test]
fn test_eligibility_filters() {
    let mut blocked = create_doctor("1", "ENT", &[], None);
    blocked.is_blocked = true;
    let mut rejected = create_doctor("2", "ENT", &[], None);
    rejected.approval_status = ApprovalStatus::Rejected;

    assert!(!is_eligible(&blocked));
    assert!(!is_eligible(&rejected));
    assert!(is_eligible(&create_doctor("3", "ENT", &[], None)));
    assert!(matches_specialty(&create_doctor("4", "Ent", &[], None), "eNT"));
}

#[test]
fn test_filter_then_aggregate_batch() {
    let feedback = vec![
        Feedback { doctor_id: "a".into(), appointment_id: "1".into(), rating: 5, comment: None },
        Feedback { doctor_id: "a".into(), appointment_id: "2".into(), rating: 4, comment: Some("Kind".into()) },
        Feedback { doctor_id: "b".into(), appointment_id: "3".into(), rating: 2, comment: None },
    ];
    let stats = aggregate_feedback(&feedback);

    let doctors: Vec<Doctor> = ["a", "b", "c"]
        .iter()
        .map(|id| {
            let mut doctor = Doctor::new(*id, "Urologist");
            doctor.feedback = stats.get(*id).copied().unwrap_or_default();
            doctor
        })
        .collect();

    let pool = filter_candidate_pool(doctors, "urologist");

    assert_eq!(pool.len(), 3);
    assert_eq!(pool[0].feedback.count, 2);
    assert_eq!(pool[0].feedback.average_rating, Some(4.5));
    assert_eq!(pool[2].feedback, FeedbackStats::default());
}
