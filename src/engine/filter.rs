//! Video filter-graph composition
//!
//! Translates the optional visual edits of an [`EditRequest`] into the
//! engine's `-vf` filter chain plus its companion arguments. The chain order
//! is fixed: crop, scale, transpose, setpts. Crop runs first because the
//! auto-scale math operates on the post-crop frame size, and the transpose
//! filter must be paired with a rotation-metadata reset or players would
//! rotate the frame a second time.

use crate::domain::model::{EditRequest, Rotation};

/// Composed filter fragment for one request
#[derive(Debug, Clone, PartialEq)]
pub struct FilterGraph {
    /// Comma-joined `-vf` filter chain
    pub chain: String,
    /// Companion arguments emitted outside the filter chain
    pub extra_args: Vec<String>,
}

impl FilterGraph {
    /// Render as the `-vf "..."` block followed by the companion arguments
    pub fn to_command_fragment(&self) -> String {
        format!("-vf \"{}\" {}", self.chain, self.extra_args.join(" "))
            .trim_end()
            .to_string()
    }
}

/// Build the filter chain for a request, or `None` when no visual edit
/// (crop, resize, rotation, speed) is present.
pub fn build_filter_args(req: &EditRequest) -> Option<FilterGraph> {
    let scale_requested = req.resize_width.is_some() || req.resize_height.is_some();
    let crop_requested = req.crop.is_some();
    let rotation_requested = req.rotation != Rotation::None;
    let speed_requested = req.speed.is_some();

    if !scale_requested && !crop_requested && !rotation_requested && !speed_requested {
        return None;
    }

    let mut chain: Vec<String> = Vec::new();
    let mut extra_args: Vec<String> = Vec::new();

    // Effective frame size for the auto-scale math; replaced by the clamped
    // crop size when a crop runs.
    let mut effective_width = req.original_width as f64;
    let mut effective_height = req.original_height as f64;

    if let Some(crop) = &req.crop {
        let x = crop.x.max(0.0);
        let y = crop.y.max(0.0);
        let width = if crop.width + x <= req.original_width as f64 {
            crop.width
        } else {
            req.original_width as f64 - x
        };
        let height = if crop.height + y <= req.original_height as f64 {
            crop.height
        } else {
            req.original_height as f64 - y
        };

        chain.push(format!("crop={:.2}:{:.2}:{:.2}:{:.2}", width, height, x, y));
        effective_width = width;
        effective_height = height;
    }

    if scale_requested {
        if let Some(scale) = build_scale_term(
            req.resize_width,
            req.resize_height,
            effective_width,
            effective_height,
        ) {
            chain.push(scale);
        }
    }

    if rotation_requested {
        chain.push(transpose_term(req.rotation).to_string());
        // Bake the rotation in; without this reset playback would apply the
        // stream's rotation metadata on top of the transpose.
        extra_args.push("-metadata:s:v:0 rotate=0".to_string());
    }

    if let Some(speed) = req.speed {
        chain.push(format!("setpts=PTS/{}", format_multiplier(speed)));
        // Audio has to follow the new presentation timestamps.
        extra_args.push(format!("-af atempo={}", format_multiplier(speed)));
    }

    Some(FilterGraph {
        chain: chain.join(","),
        extra_args,
    })
}

/// Build the `scale=` term, computing the auto dimension from the other one
/// when only a single target is given. Returns `None` when both targets are
/// auto (no resize).
fn build_scale_term(
    width: Option<u32>,
    height: Option<u32>,
    effective_width: f64,
    effective_height: f64,
) -> Option<String> {
    match (width, height) {
        (Some(w), Some(h)) => Some(format!("scale={}:{}", w, h)),
        (None, Some(h)) => {
            let auto_width = auto_dimension(h, effective_width, effective_height);
            Some(format!("scale={}:{}", auto_width, h))
        }
        (Some(w), None) => {
            let auto_height = auto_dimension(w, effective_height, effective_width);
            Some(format!("scale={}:{}", w, auto_height))
        }
        (None, None) => None,
    }
}

/// Compute an auto dimension from the specified one and the effective aspect
/// ratio, rounded to the nearest integer and bumped to even (most codecs
/// reject odd dimensions). A zero divisor yields 0.
fn auto_dimension(specified: u32, numerator: f64, denominator: f64) -> u32 {
    if denominator == 0.0 {
        return 0;
    }
    let mut auto = (specified as f64 * numerator / denominator).round() as u32;
    if auto % 2 != 0 {
        auto += 1;
    }
    auto
}

fn transpose_term(rotation: Rotation) -> &'static str {
    match rotation {
        Rotation::Rotate90 => "transpose=1",
        Rotation::Rotate180 => "transpose=1,transpose=1",
        Rotation::Rotate270 => "transpose=2",
        Rotation::None => "",
    }
}

/// Format a speed multiplier with at least one decimal place so the engine
/// sees `2.0` rather than `2`.
fn format_multiplier(value: f64) -> String {
    if value == value.trunc() {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}
