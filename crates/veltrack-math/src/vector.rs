use std::fmt::Write;

/// Dot product over the common prefix of `a` and `b`.
#[inline]
pub fn vector_dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Euclidean norm.
#[inline]
pub fn vector_norm(a: &[f32]) -> f32 {
    a.iter().map(|t| t * t).sum::<f32>().sqrt()
}

/// Formats a vector as `[ 1.000000, 2.000000 ]` for trace output.
pub fn format_vector(a: &[f32]) -> String {
    let mut output = String::from("[");
    for (i, value) in a.iter().enumerate() {
        if i > 0 {
            output.push(',');
        }
        write!(output, " {:.6}", value).ok();
    }
    output.push_str(" ]");
    output
}
