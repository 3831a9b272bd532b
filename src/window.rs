use num_complex::Complex32;

/// Compute a symmetric Hann (raised cosine) window.
///
/// Both end points are zero and the window peaks at the centre, which is
/// the shape `numpy.hanning` produces. The phase vocoder uses it for both
/// analysis and synthesis.
///
/// # Arguments
/// * `n` - Window length
///
/// # Returns
/// Hann window of length `n`
///
/// # Example
/// ```
/// use keytone::window::hann_symmetric;
///
/// let w = hann_symmetric(5);
/// assert_eq!(w, vec![0.0, 0.5, 1.0, 0.5, 0.0]);
/// ```
pub fn hann_symmetric(n: usize) -> Vec<f32> {
    if n == 0 {
        return Vec::new();
    }
    if n == 1 {
        return vec![1.0];
    }
    let m = (n - 1) as f64;
    (0..n)
        .map(|i| (0.5 - 0.5 * (2.0 * std::f64::consts::PI * i as f64 / m).cos()) as f32)
        .collect()
}

/// Fixed-length Hann window applied to every frame of a stretch.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisWindow {
    coeffs: Vec<f32>,
}

impl AnalysisWindow {
    /// Build a symmetric Hann window of `len` samples.
    pub fn hann(len: usize) -> Self {
        Self {
            coeffs: hann_symmetric(len),
        }
    }

    pub fn len(&self) -> usize {
        self.coeffs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coeffs.is_empty()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.coeffs
    }

    /// Multiply `frame` by the window into a complex FFT buffer.
    ///
    /// `frame` and `out` must both be exactly as long as the window.
    pub fn apply_complex(&self, frame: &[f32], out: &mut [Complex32]) {
        debug_assert_eq!(frame.len(), self.coeffs.len());
        debug_assert_eq!(out.len(), self.coeffs.len());
        for ((dst, &x), &w) in out.iter_mut().zip(frame).zip(&self.coeffs) {
            *dst = Complex32::new(x * w, 0.0);
        }
    }

    /// Window `frame` and add it into `out` (overlap-add).
    pub fn overlap_add(&self, frame: &[f32], out: &mut [f32]) {
        for ((dst, &x), &w) in out.iter_mut().zip(frame).zip(&self.coeffs) {
            *dst += x * w;
        }
    }
}
