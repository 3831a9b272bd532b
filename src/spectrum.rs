use crate::fft::FftPlan;
use crate::window::AnalysisWindow;
use num_complex::Complex32;
use realfft::RealFftPlanner;

/// Complex spectrum of one windowed analysis frame.
///
/// Holds all `W` bins of a full complex FFT. The negative-frequency half
/// is kept so that rephasing with a conjugate-symmetric phase vector still
/// inverse-transforms to a real signal.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectralFrame {
    bins: Vec<Complex32>,
}

impl SpectralFrame {
    /// Window `frame` and transform it to the frequency domain.
    ///
    /// # Arguments
    /// * `frame` - Exactly `window.len()` time-domain samples
    /// * `window` - Analysis window
    /// * `plan` - FFT plan of the same length as the window
    pub fn analyze(frame: &[f32], window: &AnalysisWindow, plan: &FftPlan) -> Self {
        let mut bins = vec![Complex32::new(0.0, 0.0); window.len()];
        window.apply_complex(frame, &mut bins);
        plan.forward(&mut bins);
        Self { bins }
    }

    pub fn from_bins(bins: Vec<Complex32>) -> Self {
        Self { bins }
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    pub fn bins(&self) -> &[Complex32] {
        &self.bins
    }

    pub fn magnitude(&self, bin: usize) -> f32 {
        self.bins[bin].norm()
    }

    pub fn phase(&self, bin: usize) -> f32 {
        self.bins[bin].arg()
    }

    /// Per-bin phase difference `angle(next / self)`, in `(-π, π]`.
    ///
    /// Evaluated as `arg(next * conj(self))`, which has the same angle as
    /// the quotient but yields 0 instead of NaN where a bin of `self` is
    /// exactly zero.
    pub fn phase_advance<'a>(&'a self, next: &'a SpectralFrame) -> impl Iterator<Item = f32> + 'a {
        self.bins
            .iter()
            .zip(&next.bins)
            .map(|(a, b)| (b * a.conj()).arg())
    }

    /// Rebuild a time-domain frame from this frame's magnitudes and the
    /// given `phases`, returning the real part of the inverse transform.
    pub fn resynthesize(&self, phases: &[f32], plan: &FftPlan) -> Vec<f32> {
        let mut buffer: Vec<Complex32> = self
            .bins
            .iter()
            .zip(phases)
            .map(|(c, &phase)| Complex32::from_polar(c.norm(), phase))
            .collect();
        plan.inverse(&mut buffer);
        buffer.into_iter().map(|c| c.re).collect()
    }
}

/// Estimate the strongest frequency component of a signal, in Hz.
///
/// Picks the largest non-DC bin of the real FFT over the whole signal.
/// Resolution is `sample_rate / y.len()` Hz.
///
/// # Returns
/// `None` for signals shorter than two samples or with no energy
/// outside DC.
///
/// # Example
/// ```
/// use keytone::{io, spectrum};
///
/// let y = io::tone(440.0, 8000, 1.0);
/// let f = spectrum::dominant_frequency(&y, 8000).unwrap();
/// assert!((f - 440.0).abs() < 2.0);
/// ```
pub fn dominant_frequency(y: &[f32], sample_rate: u32) -> Option<f32> {
    if y.len() < 2 {
        return None;
    }
    let r2c = RealFftPlanner::<f32>::new().plan_fft_forward(y.len());
    let mut input = y.to_vec();
    let mut spectrum = r2c.make_output_vec();
    r2c.process(&mut input, &mut spectrum).ok()?;
    let (bin, mag) = spectrum
        .iter()
        .enumerate()
        .skip(1)
        .map(|(i, c)| (i, c.norm()))
        .max_by(|a, b| a.1.total_cmp(&b.1))?;
    if mag <= 0.0 {
        return None;
    }
    Some(bin as f32 * sample_rate as f32 / y.len() as f32)
}
