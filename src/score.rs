use std::time::Duration;

/// Score awarded per food item, tiered by the configured tick interval.
///
/// Faster play pays better; an interval outside the three stock tiers
/// falls back to the normal-speed award.
#[must_use]
pub fn points_for_interval(interval: Duration) -> u32 {
    match interval.as_millis() {
        300 => 5,
        150 => 10,
        75 => 20,
        _ => 10,
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::config::SpeedTier;

    use super::points_for_interval;

    #[test]
    fn stock_tiers_award_expected_points() {
        assert_eq!(points_for_interval(SpeedTier::Slow.tick_interval()), 5);
        assert_eq!(points_for_interval(SpeedTier::Normal.tick_interval()), 10);
        assert_eq!(points_for_interval(SpeedTier::Fast.tick_interval()), 20);
    }

    #[test]
    fn odd_intervals_fall_back_to_the_normal_award() {
        assert_eq!(points_for_interval(Duration::from_millis(200)), 10);
        assert_eq!(points_for_interval(Duration::from_millis(1)), 10);
    }
}
