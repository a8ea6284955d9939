//! Formatting utilities

use glam::{Mat4, Quat, Vec3};
use skelanim::BoneFrameTransform;

pub fn format_vec3(v: Vec3) -> String {
    format!("({:.4}, {:.4}, {:.4})", v.x, v.y, v.z)
}

pub fn format_quat(q: Quat) -> String {
    format!("({:.4}, {:.4}, {:.4}, {:.4})", q.x, q.y, q.z, q.w)
}

/// Format an optional channel, `-` when absent
pub fn format_channel<T>(value: Option<T>, format: impl Fn(T) -> String) -> String {
    value.map_or_else(|| "-".to_string(), format)
}

/// Position, rotation and scale cells for a partial transform
pub fn transform_cells(transform: &BoneFrameTransform) -> [String; 3] {
    [
        format_channel(transform.position, format_vec3),
        format_channel(transform.rotation, format_quat),
        format_channel(transform.scale, format_vec3),
    ]
}

/// Format a column-major matrix row by row
pub fn format_matrix(m: Mat4) -> String {
    (0..4)
        .map(|row| {
            let r = m.row(row);
            format!("[{:9.4} {:9.4} {:9.4} {:9.4}]", r.x, r.y, r.z, r.w)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a percentage
pub fn format_percentage(value: f32) -> String {
    format!("{:.1}%", value * 100.0)
}
