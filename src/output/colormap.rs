//! Sequential color ramps and multi-stop interpolation.
//!
//! One ramp per index product, matching the palettes the products are
//! conventionally rendered with (moisture in blues, vegetation in greens,
//! and so on).

use crate::types::IndexKind;

/// RGB color with channel values in 0..=255
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A color stop: position in [0, 1] mapped to an RGB color
#[derive(Debug, Clone, Copy)]
pub struct ColorStop {
    pub t: f32,
    pub color: Rgb,
}

impl ColorStop {
    pub const fn new(t: f32, r: u8, g: u8, b: u8) -> Self {
        Self {
            t,
            color: Rgb::new(r, g, b),
        }
    }
}

/// Available sequential ramps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorRamp {
    /// White -> dark blue (moisture)
    Blues,
    /// White -> dark green (vegetation)
    Greens,
    /// Pale yellow -> dark green (enhanced vegetation)
    YellowGreen,
    /// Pale pink -> deep purple (SAR moisture)
    RedPurple,
    /// Pale orange -> dark red (soil carbon)
    OrangeRed,
    /// White -> deep purple (SAR soil carbon)
    Purples,
}

impl ColorRamp {
    /// Ramp used to render the given index product
    pub fn for_index(kind: IndexKind) -> Self {
        match kind {
            IndexKind::Ndmi => ColorRamp::Blues,
            IndexKind::Ndvi => ColorRamp::Greens,
            IndexKind::Evi => ColorRamp::YellowGreen,
            IndexKind::SoilMoistureSar => ColorRamp::RedPurple,
            IndexKind::Soc => ColorRamp::OrangeRed,
            IndexKind::SocSar => ColorRamp::Purples,
        }
    }

    fn stops(&self) -> &'static [ColorStop] {
        match self {
            ColorRamp::Blues => BLUES_STOPS,
            ColorRamp::Greens => GREENS_STOPS,
            ColorRamp::YellowGreen => YELLOW_GREEN_STOPS,
            ColorRamp::RedPurple => RED_PURPLE_STOPS,
            ColorRamp::OrangeRed => ORANGE_RED_STOPS,
            ColorRamp::Purples => PURPLES_STOPS,
        }
    }

    /// Evaluate the ramp at normalized position `t` in [0, 1].
    ///
    /// Positions outside [0, 1] clamp to the endpoint colors.
    pub fn evaluate(&self, t: f32) -> Rgb {
        multi_stop(self.stops(), t)
    }
}

const BLUES_STOPS: &[ColorStop] = &[
    ColorStop::new(0.00, 247, 251, 255),
    ColorStop::new(0.25, 198, 219, 239),
    ColorStop::new(0.50, 107, 174, 214),
    ColorStop::new(0.75, 33, 113, 181),
    ColorStop::new(1.00, 8, 48, 107),
];

const GREENS_STOPS: &[ColorStop] = &[
    ColorStop::new(0.00, 247, 252, 245),
    ColorStop::new(0.25, 199, 233, 192),
    ColorStop::new(0.50, 116, 196, 118),
    ColorStop::new(0.75, 35, 139, 69),
    ColorStop::new(1.00, 0, 68, 27),
];

const YELLOW_GREEN_STOPS: &[ColorStop] = &[
    ColorStop::new(0.00, 255, 255, 229),
    ColorStop::new(0.25, 217, 240, 163),
    ColorStop::new(0.50, 120, 198, 121),
    ColorStop::new(0.75, 35, 132, 67),
    ColorStop::new(1.00, 0, 69, 41),
];

const RED_PURPLE_STOPS: &[ColorStop] = &[
    ColorStop::new(0.00, 255, 247, 243),
    ColorStop::new(0.25, 251, 180, 185),
    ColorStop::new(0.50, 247, 104, 161),
    ColorStop::new(0.75, 174, 1, 126),
    ColorStop::new(1.00, 73, 0, 106),
];

const ORANGE_RED_STOPS: &[ColorStop] = &[
    ColorStop::new(0.00, 255, 247, 236),
    ColorStop::new(0.25, 253, 212, 158),
    ColorStop::new(0.50, 252, 141, 89),
    ColorStop::new(0.75, 215, 48, 31),
    ColorStop::new(1.00, 127, 0, 0),
];

const PURPLES_STOPS: &[ColorStop] = &[
    ColorStop::new(0.00, 252, 251, 253),
    ColorStop::new(0.25, 218, 218, 235),
    ColorStop::new(0.50, 158, 154, 200),
    ColorStop::new(0.75, 106, 81, 163),
    ColorStop::new(1.00, 63, 0, 125),
];

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

fn lerp_color(c1: Rgb, c2: Rgb, t: f32) -> Rgb {
    Rgb::new(
        lerp(c1.r as f32, c2.r as f32, t).round() as u8,
        lerp(c1.g as f32, c2.g as f32, t).round() as u8,
        lerp(c1.b as f32, c2.b as f32, t).round() as u8,
    )
}

fn multi_stop(stops: &[ColorStop], t: f32) -> Rgb {
    if t <= 0.0 || !t.is_finite() {
        return stops[0].color;
    }
    if t >= 1.0 {
        return stops[stops.len() - 1].color;
    }
    for i in 1..stops.len() {
        if t <= stops[i].t {
            let ratio = (t - stops[i - 1].t) / (stops[i].t - stops[i - 1].t);
            return lerp_color(stops[i - 1].color, stops[i].color, ratio);
        }
    }
    stops[stops.len() - 1].color
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blues_endpoints() {
        let ramp = ColorRamp::Blues;
        assert_eq!(ramp.evaluate(0.0), Rgb::new(247, 251, 255));
        assert_eq!(ramp.evaluate(1.0), Rgb::new(8, 48, 107));
    }

    #[test]
    fn test_clamping_out_of_range() {
        let ramp = ColorRamp::Greens;
        assert_eq!(ramp.evaluate(-0.5), ramp.evaluate(0.0));
        assert_eq!(ramp.evaluate(1.5), ramp.evaluate(1.0));
    }

    #[test]
    fn test_midpoint_hits_middle_stop() {
        let ramp = ColorRamp::OrangeRed;
        assert_eq!(ramp.evaluate(0.5), Rgb::new(252, 141, 89));
    }

    #[test]
    fn test_interpolation_between_stops() {
        // Halfway between the 0.0 and 0.25 stops of Blues
        let c = ColorRamp::Blues.evaluate(0.125);
        assert_eq!(c, Rgb::new(223, 235, 247));
    }

    #[test]
    fn test_ramp_per_index() {
        assert_eq!(ColorRamp::for_index(IndexKind::Ndmi), ColorRamp::Blues);
        assert_eq!(ColorRamp::for_index(IndexKind::Ndvi), ColorRamp::Greens);
        assert_eq!(
            ColorRamp::for_index(IndexKind::SoilMoistureSar),
            ColorRamp::RedPurple
        );
    }

    #[test]
    fn test_all_ramps_evaluate() {
        let ramps = [
            ColorRamp::Blues,
            ColorRamp::Greens,
            ColorRamp::YellowGreen,
            ColorRamp::RedPurple,
            ColorRamp::OrangeRed,
            ColorRamp::Purples,
        ];
        for ramp in ramps {
            // No panics across the range, including non-finite input
            ramp.evaluate(0.0);
            ramp.evaluate(0.3);
            ramp.evaluate(0.9);
            ramp.evaluate(f32::NAN);
        }
    }
}
