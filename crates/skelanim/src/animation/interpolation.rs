//! Keyframe sampling for bone animation channels

use super::types::{Interpolate, TimedFrame};

/// Default tolerance for treating a query time as an exact keyframe hit
pub const EXACT_HIT_EPSILON: f32 = 1e-6;

/// Timestamp carried by an interpolated frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TimestampMode {
    /// The query time
    #[default]
    Query,
    /// `prev.time + (next.time - prev.time) * t`, reconstructed from the blend factor
    Recomputed,
}

/// Options controlling channel sampling
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SamplingOptions {
    /// Distance below which a query time snaps to a keyframe
    pub epsilon: f32,
    /// Keyframe spans shorter than this are not interpolated
    pub span_epsilon: f32,
    /// Timestamp written into interpolated frames
    pub timestamp: TimestampMode,
}

impl Default for SamplingOptions {
    fn default() -> Self {
        Self {
            epsilon: EXACT_HIT_EPSILON,
            span_epsilon: f32::EPSILON,
            timestamp: TimestampMode::Query,
        }
    }
}

/// Find the index of the last keyframe at or before the given time
///
/// Returns None if the sequence is empty or `time` precedes the first keyframe.
/// Frames are expected in non-decreasing time order.
pub fn find_frame_index<T>(frames: &[TimedFrame<T>], time: f32) -> Option<usize> {
    let count = frames.partition_point(|frame| frame.time <= time);
    count.checked_sub(1)
}

/// Sample a keyframe sequence at the given time
///
/// Never fails: out-of-range times clamp to the first or last frame, and
/// degenerate spans or non-finite blends fall back to the earlier frame.
pub fn find_nearest_transform<T: Interpolate>(
    time: f32,
    frames: &[TimedFrame<T>],
    options: &SamplingOptions,
) -> Option<TimedFrame<T>> {
    let (first, last) = match frames {
        [] => return None,
        [only] => return Some(*only),
        [first, .., last] => (first, last),
    };

    let Some(index) = find_frame_index(frames, time) else {
        return Some(*first);
    };

    if index == frames.len() - 1 {
        return Some(*last);
    }

    let prev = frames[index];
    let next = frames[index + 1];

    if (prev.time - time).abs() < options.epsilon {
        return Some(prev);
    }
    if (next.time - time).abs() < options.epsilon {
        return Some(next);
    }

    let span = next.time - prev.time;
    if span < options.span_epsilon {
        log::debug!(
            "Degenerate keyframe span [{}, {}], holding earlier frame",
            prev.time,
            next.time
        );
        return Some(prev);
    }

    let t = ((time - prev.time) / span).clamp(0.0, 1.0);
    let value = prev.value.interpolate(&next.value, t);
    if !value.all_finite() {
        log::debug!("Non-finite blend at time {time}, holding frame at {}", prev.time);
        return Some(prev);
    }

    let frame_time = match options.timestamp {
        TimestampMode::Query => time,
        TimestampMode::Recomputed => prev.time + span * t,
    };

    Some(TimedFrame::new(frame_time, value))
}
