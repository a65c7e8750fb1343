use crate::engine::{Rect, Size};
use crate::liftable::{Items, LiftableId};
use rand::rngs::SmallRng;
use rand::Rng;
use std::rc::Rc;

pub const WEIGHT_LIMIT: f64 = 100.0;
pub const BAY_WIDTH: f64 = 250.0;
pub const BAY_HEIGHT: f64 = 400.0;
// the region reaches a bit past the drawn walls
const BAY_MARGIN: f64 = 30.0;
const CALIBRATION_MS: f64 = 500.0;
const SAMPLE_INTERVAL_MS: f64 = 100.0;
const MAX_FLUCTUATION: f64 = 2.0;

/// Cargo bay with a scale. The true weight is recomputed from whatever sits
/// in the region, the display acts like a real scale settling : it jumps to
/// the new weight, jitters for half a second with a shrinking amplitude, then
/// holds the exact value
pub struct CargoBay<R = SmallRng> {
    region: Rect,
    liftables: Rc<[LiftableId]>,
    target_weight: f64,
    display_weight: f64,
    calibration: Option<Calibration>,
    rng: R,
}

#[derive(Debug, Copy, Clone)]
struct Calibration {
    started: f64,
    last_sample: f64,
}

impl<R: Rng> CargoBay<R> {
    pub fn new(region: Rect, liftables: Rc<[LiftableId]>, items: &Items, rng: R) -> Self {
        let mut bay = CargoBay {
            region,
            liftables,
            target_weight: 0.0,
            display_weight: 0.0,
            calibration: None,
            rng,
        };
        bay.target_weight = bay.true_weight(items);
        bay.display_weight = bay.target_weight;
        bay
    }

    /// Right edge of the canvas, vertically centered
    pub fn region_for(canvas: Size) -> Rect {
        let middle_x = canvas.width - BAY_WIDTH / 2.0;
        let middle_y = canvas.height / 2.0;
        Rect::new(
            middle_x - BAY_WIDTH / 2.0,
            middle_y - BAY_HEIGHT / 2.0,
            BAY_WIDTH + BAY_MARGIN,
            BAY_HEIGHT + BAY_MARGIN,
        )
    }

    pub fn region(&self) -> Rect {
        self.region
    }

    pub fn set_region(&mut self, region: Rect) {
        self.region = region;
    }

    pub fn is_calibrating(&self) -> bool {
        self.calibration.is_some()
    }

    /// Monitored liftables whose bounds center is inside the region
    pub fn liftables_in_bay(&self, items: &Items) -> Vec<LiftableId> {
        self.liftables
            .iter()
            .copied()
            .filter(|id| {
                items
                    .get(*id)
                    .is_some_and(|item| self.region.contains(item.collision_bounds_center()))
            })
            .collect()
    }

    pub fn true_weight(&self, items: &Items) -> f64 {
        self.liftables_in_bay(items)
            .into_iter()
            .filter_map(|id| items.get(id))
            .map(|item| item.weight())
            .sum()
    }

    pub fn is_overweight(&self, items: &Items) -> bool {
        self.true_weight(items) > WEIGHT_LIMIT
    }

    /// ::display_weight, sample once per tick
    /// - advances the calibration clock, so it is not idempotent
    /// - a stalled frame does not replay missed samples
    pub fn display_weight(&mut self, items: &Items, now: f64) -> f64 {
        let weight = self.true_weight(items);

        if weight != self.target_weight {
            log::debug!("bay weight {:.1} -> {:.1}", self.target_weight, weight);
            self.target_weight = weight;
            self.display_weight = weight;
            self.calibration = Some(Calibration {
                started: now,
                last_sample: now,
            });
        }

        let Some(mut calibration) = self.calibration else {
            return self.display_weight;
        };

        let elapsed = now - calibration.started;
        if elapsed > CALIBRATION_MS {
            self.calibration = None;
            self.display_weight = self.target_weight;
            return self.display_weight;
        }

        if now - calibration.last_sample >= SAMPLE_INTERVAL_MS {
            let progress = elapsed / CALIBRATION_MS;
            let fluctuation = MAX_FLUCTUATION * (1.0 - progress);
            let offset = (self.rng.gen::<f64>() - 0.5) * fluctuation * 2.0;
            calibration.last_sample = now;
            self.calibration = Some(calibration);
            self.display_weight = self.target_weight + offset;
        }
        self.display_weight
    }
}

/// What the little screen on the bay shows
pub fn format_reading(weight: f64) -> String {
    if weight == 0.0 {
        "--".to_string()
    } else if weight > WEIGHT_LIMIT {
        format!("{:.0}", weight)
    } else {
        format!("{:.1}", weight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Point;
    use crate::items::{Carton, CartonSize, Chest};
    use crate::liftable::Liftable;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const SEED: u64 = 7;

    fn region() -> Rect {
        Rect::new(500.0, 100.0, 280.0, 430.0)
    }

    // 60x60 cartons : bounds center is the draw origin + 25
    fn carton(center: Point, size: CartonSize) -> Carton {
        Carton::new(Point::new(center.x - 25.0, center.y - 25.0), size, Size::new(60.0, 60.0))
    }

    fn loaded() -> (Items, Vec<LiftableId>) {
        let mut items = Items::new();
        let ids = vec![
            items.insert(carton(Point::new(550.0, 150.0), CartonSize::Small)),
            items.insert(carton(Point::new(600.0, 300.0), CartonSize::Medium)),
            items.insert(carton(Point::new(700.0, 500.0), CartonSize::Large)),
            // outside
            items.insert(carton(Point::new(100.0, 300.0), CartonSize::Medium)),
        ];
        (items, ids)
    }

    fn bay(items: &Items, ids: &[LiftableId]) -> CargoBay<StdRng> {
        CargoBay::new(region(), Rc::from(ids.to_vec()), items, StdRng::seed_from_u64(SEED))
    }

    #[test]
    fn region_hugs_the_right_edge() {
        let region = CargoBay::<StdRng>::region_for(Size::new(1200.0, 800.0));
        assert_eq!(region, Rect::new(950.0, 200.0, 280.0, 430.0));
    }

    #[test]
    fn sums_only_what_is_inside() {
        let (items, ids) = loaded();
        let bay = bay(&items, &ids);
        assert_eq!(bay.liftables_in_bay(&items), ids[..3].to_vec());
        assert_relative_eq!(bay.true_weight(&items), 34.3, epsilon = 1e-9);
        assert!(!bay.is_overweight(&items));
    }

    #[test]
    fn containment_is_inclusive_on_the_edges() {
        let mut items = Items::new();
        let ids = vec![
            items.insert(carton(Point::new(500.0, 100.0), CartonSize::Small)),
            items.insert(carton(Point::new(780.0, 530.0), CartonSize::Small)),
            items.insert(carton(Point::new(780.5, 530.0), CartonSize::Small)),
        ];
        let bay = bay(&items, &ids);
        assert_eq!(bay.liftables_in_bay(&items), ids[..2].to_vec());
    }

    #[test]
    fn only_monitored_liftables_count() {
        let (mut items, mut ids) = loaded();
        let chest = items.insert(Chest::new(Point::new(600.0, 200.0), Size::new(40.0, 40.0)));
        let bay = bay(&items, &ids);
        assert_relative_eq!(bay.true_weight(&items), 34.3, epsilon = 1e-9);

        ids.push(chest);
        let bay = self::bay(&items, &ids);
        assert_relative_eq!(bay.true_weight(&items), 74.8, epsilon = 1e-9);
    }

    #[test]
    fn overweight_past_one_hundred() {
        let mut items = Items::new();
        let ids: Vec<LiftableId> = (0..5)
            .map(|i| items.insert(carton(Point::new(550.0, 150.0 + i as f64 * 60.0), CartonSize::Medium)))
            .collect();
        let bay = bay(&items, &ids[..4]);
        // 4 x 20.8
        assert!(!bay.is_overweight(&items));
        let bay = self::bay(&items, &ids);
        // 5 x 20.8
        assert!(bay.is_overweight(&items));
    }

    #[test]
    fn display_starts_at_the_initial_weight() {
        let (items, ids) = loaded();
        let mut bay = bay(&items, &ids);
        assert!(!bay.is_calibrating());
        assert_relative_eq!(bay.display_weight(&items, 0.0), 34.3, epsilon = 1e-9);
    }

    #[test]
    fn calibration_snaps_jitters_then_holds() {
        let (mut items, ids) = loaded();
        let mut bay = bay(&items, &ids);
        let mut expected_rng = StdRng::seed_from_u64(SEED);

        // throw the large carton out
        let large = items.get_mut(ids[2]).unwrap();
        large.lift();
        large.follow_sprite(Point::new(100.0, 100.0));
        let target = 25.8;

        // snapped straight to the new weight
        assert_relative_eq!(bay.display_weight(&items, 1000.0), target, epsilon = 1e-9);
        assert!(bay.is_calibrating());
        // no sample before 100ms
        assert_relative_eq!(bay.display_weight(&items, 1050.0), target, epsilon = 1e-9);

        // first sample at 100ms, progress 0.2
        let r: f64 = expected_rng.gen();
        let expected = target + (r - 0.5) * 2.0 * 0.8 * 2.0;
        assert_relative_eq!(bay.display_weight(&items, 1100.0), expected, epsilon = 1e-9);
        // held until the next interval
        assert_relative_eq!(bay.display_weight(&items, 1150.0), expected, epsilon = 1e-9);

        // a stall skips straight to whatever the sample is now, progress 0.9
        let r: f64 = expected_rng.gen();
        let expected = target + (r - 0.5) * 2.0 * 0.1 * 2.0;
        assert_relative_eq!(bay.display_weight(&items, 1450.0), expected, epsilon = 1e-9);

        // window over : exact, and it stays exact
        assert_relative_eq!(bay.display_weight(&items, 1501.0), target, epsilon = 1e-9);
        assert!(!bay.is_calibrating());
        for now in [1600.0, 1700.0, 5000.0] {
            assert_eq!(bay.display_weight(&items, now), bay.true_weight(&items));
        }
    }

    #[test]
    fn jitter_stays_within_the_shrinking_amplitude() {
        let (mut items, ids) = loaded();
        let mut bay = bay(&items, &ids);
        items.get_mut(ids[0]).unwrap().lift();
        items.get_mut(ids[0]).unwrap().follow_sprite(Point::new(0.0, 0.0));
        let target = bay.true_weight(&items);
        bay.display_weight(&items, 0.0);
        for step in 1..=5 {
            let now = step as f64 * 100.0;
            let progress = now / 500.0;
            let reading = bay.display_weight(&items, now);
            assert!((reading - target).abs() <= 2.0 * (1.0 - progress) + 1e-9);
        }
    }

    #[test]
    fn reading_format() {
        assert_eq!(format_reading(0.0), "--");
        assert_eq!(format_reading(34.26), "34.3");
        assert_eq!(format_reading(100.0), "100.0");
        assert_eq!(format_reading(103.8), "104");
    }
}
