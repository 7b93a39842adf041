use crate::domain::model::{CertificateStatus, Decision};
use chrono::{Duration, NaiveDateTime};

pub const DEFAULT_RENEW_THRESHOLD_DAYS: i64 = 14;

/// Decide whether the certificate is close enough to expiry to renew.
///
/// Pure and total: `renew` is true iff `valid_until - now` is strictly less
/// than `threshold`. An already expired certificate (negative remaining)
/// therefore still renews, and a remaining time exactly equal to the
/// threshold does not.
pub fn decide(status: &CertificateStatus, now: NaiveDateTime, threshold: Duration) -> Decision {
    let remaining = status.valid_until - now;
    Decision {
        renew: remaining < threshold,
        remaining,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn status_valid_until(valid_until: NaiveDateTime) -> CertificateStatus {
        CertificateStatus {
            domain_id: "1024".to_string(),
            domains: vec!["example.com".to_string()],
            valid_until,
            mark: "prod".to_string(),
        }
    }

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn far_from_expiry_skips() {
        let now = at(2025, 1, 1);
        let decision = decide(&status_valid_until(at(2025, 3, 22)), now, Duration::days(14));
        assert!(!decision.renew);
        assert_eq!(decision.remaining, Duration::days(80));
    }

    #[test]
    fn within_threshold_renews() {
        let now = at(2025, 1, 1);
        let decision = decide(&status_valid_until(at(2025, 1, 11)), now, Duration::days(14));
        assert!(decision.renew);
        assert_eq!(decision.remaining, Duration::days(10));
    }

    #[test]
    fn already_expired_still_renews() {
        let now = at(2025, 1, 20);
        let decision = decide(&status_valid_until(at(2025, 1, 1)), now, Duration::days(14));
        assert!(decision.renew);
        assert_eq!(decision.remaining, Duration::days(-19));
    }

    #[test]
    fn exactly_at_threshold_does_not_renew() {
        let now = at(2025, 1, 1);
        let decision = decide(&status_valid_until(at(2025, 1, 15)), now, Duration::days(14));
        assert!(!decision.renew);
        assert_eq!(decision.remaining, Duration::days(14));
    }

    #[test]
    fn one_second_under_threshold_renews() {
        let now = at(2025, 1, 1);
        let valid_until = at(2025, 1, 15) - Duration::seconds(1);
        let decision = decide(&status_valid_until(valid_until), now, Duration::days(14));
        assert!(decision.renew);
    }
}
