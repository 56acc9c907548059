//! Stripe-based fadeout effect.
//!
//! The screen is cut into parallel bands along one axis; every band is
//! progressively covered by a growing rectangle along the other axis while
//! the draw color interpolates from a start to an end color. At full
//! progress the screen is uniformly covered.
//!
//! The three variants differ only in reveal order, not band layout:
//! [`FadeoutType::Contra`] grows alternating bands from opposite ends,
//! [`FadeoutType::CloseCenter`] grows every band from both ends toward the
//! middle, and [`FadeoutType::Random`] gives each band an unpredictable
//! start offset fixed at prepare time. All geometry is computed once in the
//! preparing phase; only time-derived extents and the color change between
//! frames.

use fastrand::Rng;
use raylib::prelude::{Color, RaylibDraw, RaylibDrawHandle, Rectangle};
use smallvec::SmallVec;

use crate::effects::{EffectCore, VisualEffect};
use crate::resources::screensize::ScreenSize;

/// Reveal order of the stripes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeoutType {
    /// Alternating stripes advance in opposite directions.
    Contra,
    /// All stripes advance from both ends toward the midline.
    CloseCenter,
    /// Each stripe advances on its own randomized schedule.
    Random,
}

/// Which way the screen is cut into bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Horizontal bands; the split axis is the screen height.
    Horizontal,
    /// Vertical bands; the split axis is the screen width.
    Vertical,
}

/// Stripe fadeout state machine. See the module docs for the geometry.
pub struct StripesFadeout {
    core: EffectCore,
    fadeout_type: FadeoutType,
    orientation: Orientation,
    color_initial: Color,
    color_final: Color,
    stripe_count: usize,
    rng: Rng,
    screen: ScreenSize,
    /// Interior band boundaries along the split axis, ascending. Fixed
    /// after prepare.
    split_points: SmallVec<[i32; 8]>,
    /// Per-band start offsets in `[0, 1)`, only populated for `Random`.
    stripe_offsets: SmallVec<[f32; 8]>,
}

impl StripesFadeout {
    pub fn new(
        fadeout_type: FadeoutType,
        orientation: Orientation,
        duration_ms: f32,
        fps: f32,
    ) -> Self {
        Self {
            core: EffectCore::new(duration_ms, fps),
            fadeout_type,
            orientation,
            color_initial: Color::BLANK,
            color_final: Color::BLACK,
            stripe_count: 1,
            rng: Rng::new(),
            screen: ScreenSize { w: 0, h: 0 },
            split_points: SmallVec::new(),
            stripe_offsets: SmallVec::new(),
        }
    }

    /// Override the interpolation endpoints. Defaults are fully transparent
    /// to opaque black.
    pub fn with_colors(mut self, initial: Color, r#final: Color) -> Self {
        self.color_initial = initial;
        self.color_final = r#final;
        self
    }

    /// Override the stripe count. Defaults to one; zero is clamped to one.
    pub fn with_stripes(mut self, count: usize) -> Self {
        self.stripe_count = count.max(1);
        self
    }

    /// Seed the randomized variant for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Rng::with_seed(seed);
        self
    }

    pub fn fadeout_type(&self) -> FadeoutType {
        self.fadeout_type
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn color_initial(&self) -> Color {
        self.color_initial
    }

    pub fn color_final(&self) -> Color {
        self.color_final
    }

    pub fn stripe_count(&self) -> usize {
        self.stripe_count
    }

    /// Interior band boundaries computed at prepare time.
    pub fn split_points(&self) -> &[i32] {
        &self.split_points
    }

    /// Per-band start offsets (`Random` only).
    pub fn stripe_offsets(&self) -> &[f32] {
        &self.stripe_offsets
    }

    /// Screen length along the split axis.
    fn oriented_measure(&self) -> i32 {
        match self.orientation {
            Orientation::Vertical => self.screen.w,
            Orientation::Horizontal => self.screen.h,
        }
    }

    /// Screen length along the reveal axis.
    fn reveal_length(&self) -> i32 {
        match self.orientation {
            Orientation::Vertical => self.screen.h,
            Orientation::Horizontal => self.screen.w,
        }
    }

    fn compute_split_points(&mut self) {
        let measure = self.oriented_measure();
        self.split_points.clear();
        match self.fadeout_type {
            FadeoutType::Contra | FadeoutType::CloseCenter => {
                // stripe_count regions need stripe_count - 1 interior cuts.
                for i in 1..self.stripe_count {
                    let cut = (measure as i64 * i as i64 / self.stripe_count as i64) as i32;
                    self.split_points.push(cut);
                }
            }
            FadeoutType::Random => {
                // Uniform samples, sorted. Ties are allowed and collapse to
                // zero-width bands.
                for _ in 0..self.stripe_count {
                    self.split_points.push(self.rng.i32(0..=measure));
                }
                self.split_points.sort_unstable();
            }
        }
    }

    /// Band spans along the split axis, from the boundaries.
    fn stripe_spans(&self) -> SmallVec<[(i32, i32); 8]> {
        let mut spans = SmallVec::new();
        let mut start = 0;
        for &cut in &self.split_points {
            spans.push((start, cut));
            start = cut;
        }
        spans.push((start, self.oriented_measure()));
        spans
    }

    /// Rectangle covering `extent` pixels of the band `[a, b)`, anchored at
    /// the leading or trailing end of the reveal axis.
    fn band_rect(&self, a: i32, b: i32, from_leading: bool, extent: f32) -> Rectangle {
        let reveal = self.reveal_length() as f32;
        match self.orientation {
            Orientation::Vertical => Rectangle {
                x: a as f32,
                y: if from_leading { 0.0 } else { reveal - extent },
                width: (b - a) as f32,
                height: extent,
            },
            Orientation::Horizontal => Rectangle {
                x: if from_leading { 0.0 } else { reveal - extent },
                y: a as f32,
                width: extent,
                height: (b - a) as f32,
            },
        }
    }

    /// Interpolated draw color at the current progress.
    pub fn current_color(&self) -> Color {
        lerp_color(self.color_initial, self.color_final, self.core.progress())
    }

    /// Covered rectangles at the current progress, one entry per band (two
    /// for `CloseCenter`). This is the state the renderer consumes; the
    /// band layout itself never changes after prepare.
    pub fn current_rects(&self) -> SmallVec<[Rectangle; 16]> {
        match self.fadeout_type {
            FadeoutType::Contra => self.rects_contra(),
            FadeoutType::CloseCenter => self.rects_close_center(),
            FadeoutType::Random => self.rects_random(),
        }
    }

    fn rects_contra(&self) -> SmallVec<[Rectangle; 16]> {
        let extent = self.core.progress() * self.reveal_length() as f32;
        self.stripe_spans()
            .iter()
            .enumerate()
            .map(|(i, &(a, b))| self.band_rect(a, b, i % 2 == 0, extent))
            .collect()
    }

    fn rects_close_center(&self) -> SmallVec<[Rectangle; 16]> {
        let extent = self.core.progress() * self.reveal_length() as f32 * 0.5;
        let mut rects = SmallVec::new();
        for &(a, b) in self.stripe_spans().iter() {
            rects.push(self.band_rect(a, b, true, extent));
            rects.push(self.band_rect(a, b, false, extent));
        }
        rects
    }

    fn rects_random(&self) -> SmallVec<[Rectangle; 16]> {
        let f = self.core.progress();
        let reveal = self.reveal_length() as f32;
        self.stripe_spans()
            .iter()
            .enumerate()
            .map(|(i, &(a, b))| {
                let offset = self.stripe_offsets.get(i).copied().unwrap_or(0.0);
                // Late starters catch up: local progress reaches 1 at f = 1
                // regardless of the offset.
                let local = ((f - offset) / (1.0 - offset)).clamp(0.0, 1.0);
                self.band_rect(a, b, true, local * reveal)
            })
            .collect()
    }
}

impl VisualEffect for StripesFadeout {
    fn core(&self) -> &EffectCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut EffectCore {
        &mut self.core
    }

    fn prepare_instance(&mut self, screen: ScreenSize) {
        self.screen = screen;
        self.compute_split_points();
        self.stripe_offsets.clear();
        if self.fadeout_type == FadeoutType::Random {
            let bands = self.split_points.len() + 1;
            for _ in 0..bands {
                self.stripe_offsets.push(self.rng.f32());
            }
        }
    }

    fn tidy_up_instance(&mut self) {
        self.split_points.clear();
        self.stripe_offsets.clear();
    }

    fn render(&self, d: &mut RaylibDrawHandle) {
        let color = self.current_color();
        for rect in self.current_rects() {
            d.draw_rectangle_rec(rect, color);
        }
    }
}

fn lerp_channel(a: u8, b: u8, t: f32) -> u8 {
    (a as f32 + (b as f32 - a as f32) * t).round() as u8
}

/// Component-wise linear interpolation between two colors.
pub fn lerp_color(a: Color, b: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    Color::new(
        lerp_channel(a.r, b.r, t),
        lerp_channel(a.g, b.g, t),
        lerp_channel(a.b, b.b, t),
        lerp_channel(a.a, b.a, t),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::EffectPhase;

    const SCREEN: ScreenSize = ScreenSize { w: 800, h: 600 };

    fn started(fadeout_type: FadeoutType, stripes: usize) -> StripesFadeout {
        let mut fx = StripesFadeout::new(fadeout_type, Orientation::Vertical, 1000.0, 60.0)
            .with_stripes(stripes)
            .with_seed(42);
        fx.start(SCREEN);
        fx
    }

    #[test]
    fn even_split_points_for_four_stripes() {
        let fx = started(FadeoutType::Contra, 4);
        assert_eq!(fx.split_points(), &[200, 400, 600]);
    }

    #[test]
    fn single_stripe_has_no_interior_points() {
        let fx = started(FadeoutType::CloseCenter, 1);
        assert!(fx.split_points().is_empty());
    }

    #[test]
    fn horizontal_orientation_splits_the_height() {
        let mut fx = StripesFadeout::new(FadeoutType::Contra, Orientation::Horizontal, 500.0, 60.0)
            .with_stripes(3);
        fx.start(SCREEN);
        assert_eq!(fx.split_points(), &[200, 400]);
    }

    #[test]
    fn random_split_points_are_sorted_and_in_range() {
        let fx = started(FadeoutType::Random, 5);
        let points = fx.split_points();
        assert_eq!(points.len(), 5);
        assert!(points.windows(2).all(|w| w[0] <= w[1]));
        assert!(points.iter().all(|&p| (0..=800).contains(&p)));
    }

    #[test]
    fn random_offsets_cover_every_band_and_stay_fixed() {
        let mut fx = started(FadeoutType::Random, 5);
        assert_eq!(fx.stripe_offsets().len(), 6);
        assert!(fx.stripe_offsets().iter().all(|&o| (0.0..1.0).contains(&o)));

        let before: Vec<f32> = fx.stripe_offsets().to_vec();
        fx.advance(0.3);
        let _ = fx.current_rects();
        assert_eq!(fx.stripe_offsets(), before.as_slice());
    }

    #[test]
    fn seeded_geometry_is_reproducible() {
        let a = started(FadeoutType::Random, 4);
        let b = started(FadeoutType::Random, 4);
        assert_eq!(a.split_points(), b.split_points());
        assert_eq!(a.stripe_offsets(), b.stripe_offsets());
    }

    #[test]
    fn color_matches_endpoints_at_progress_bounds() {
        let mut fx = started(FadeoutType::Contra, 2);
        let start = fx.current_color();
        assert_eq!(
            (start.r, start.g, start.b, start.a),
            (Color::BLANK.r, Color::BLANK.g, Color::BLANK.b, Color::BLANK.a)
        );

        fx.advance(5.0);
        let end = fx.current_color();
        assert_eq!(
            (end.r, end.g, end.b, end.a),
            (Color::BLACK.r, Color::BLACK.g, Color::BLACK.b, Color::BLACK.a)
        );
    }

    #[test]
    fn interpolation_is_monotonic_per_channel() {
        let initial = Color::new(10, 200, 0, 0);
        let terminal = Color::new(240, 20, 128, 255);
        let mut previous = lerp_color(initial, terminal, 0.0);
        for step in 1..=10 {
            let t = step as f32 / 10.0;
            let current = lerp_color(initial, terminal, t);
            assert!(current.r >= previous.r);
            assert!(current.g <= previous.g);
            assert!(current.b >= previous.b);
            assert!(current.a >= previous.a);
            previous = current;
        }
        assert_eq!(previous.r, terminal.r);
        assert_eq!(previous.a, terminal.a);
    }

    #[test]
    fn contra_alternates_reveal_direction() {
        let mut fx = started(FadeoutType::Contra, 2);
        fx.advance(0.5);
        let rects = fx.current_rects();
        assert_eq!(rects.len(), 2);
        // Vertical bands over 800x600: reveal axis is the height.
        assert_eq!((rects[0].x, rects[0].width), (0.0, 400.0));
        assert_eq!((rects[1].x, rects[1].width), (400.0, 400.0));
        assert_eq!((rects[0].y, rects[0].height), (0.0, 300.0));
        assert_eq!((rects[1].y, rects[1].height), (300.0, 300.0));
    }

    #[test]
    fn close_center_grows_from_both_ends() {
        let mut fx = started(FadeoutType::CloseCenter, 1);
        fx.advance(0.5);
        let rects = fx.current_rects();
        assert_eq!(rects.len(), 2);
        assert_eq!((rects[0].y, rects[0].height), (0.0, 150.0));
        assert_eq!((rects[1].y, rects[1].height), (450.0, 150.0));
    }

    #[test]
    fn random_band_waits_for_its_offset() {
        let mut fx = StripesFadeout::new(FadeoutType::Random, Orientation::Vertical, 1000.0, 60.0)
            .with_stripes(3)
            .with_seed(7);
        fx.start(SCREEN);
        let offsets: Vec<f32> = fx.stripe_offsets().to_vec();

        // Pick the band with the largest offset and sample just before it.
        let (band, &max_offset) = offsets
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .unwrap();
        fx.advance(max_offset * 0.9);
        let rects = fx.current_rects();
        assert_eq!(rects[band].height, 0.0);

        // At full progress every band is fully covered.
        fx.advance(10.0);
        assert!(fx.current_rects().iter().all(|r| r.height == 600.0));
    }

    #[test]
    fn full_progress_covers_the_whole_screen() {
        for kind in [FadeoutType::Contra, FadeoutType::CloseCenter] {
            let mut fx = started(kind, 4);
            fx.advance(2.0);
            let covered: f32 = fx
                .current_rects()
                .iter()
                .map(|r| r.width * r.height)
                .sum();
            assert_eq!(covered, (SCREEN.w * SCREEN.h) as f32);
        }
    }

    #[test]
    fn tidy_up_clears_geometry_and_allows_restart() {
        let mut fx = started(FadeoutType::Random, 4);
        fx.stop();
        assert_eq!(fx.phase(), EffectPhase::Idle);
        assert!(fx.split_points().is_empty());
        assert!(fx.stripe_offsets().is_empty());

        fx.start(SCREEN);
        assert!(fx.is_running());
        assert_eq!(fx.stripe_offsets().len(), fx.split_points().len() + 1);
    }
}
