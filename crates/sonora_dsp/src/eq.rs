//! Multi-Band Parametric Equalizer
//!
//! Implements a cascade of BiQuad filters for audio equalization.
//! Based on the RBJ (Robert Bristow-Johnson) Audio EQ Cookbook.
//! The band layout comes from the engine; gains arrive as `EqualizerSettings`.

use biquad::{Biquad, Coefficients, DirectForm2Transposed, ToHertz, Type, Q_BUTTERWORTH_F32};

use crate::error::DspError;
use crate::profile::EqualizerSettings;

/// Filter type for each EQ band
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BandType {
    LowShelf,
    Peaking,
    HighShelf,
}

impl BandType {
    /// Shelves on the outer bands, peaking everywhere else
    pub fn for_position(index: usize, band_count: usize) -> Self {
        match index {
            _ if band_count < 2 => BandType::Peaking,
            0 => BandType::LowShelf,
            i if i + 1 == band_count => BandType::HighShelf,
            _ => BandType::Peaking,
        }
    }
}

/// Convert dB gain to linear amplitude
/// Formula: amplitude = 10^(dB/20)
fn db_to_amplitude(db: f32) -> f32 {
    10.0_f32.powf(db / 20.0)
}

fn band_coefficients(
    frequency: f32,
    gain_db: f32,
    band_type: BandType,
    sample_rate: f32,
) -> Result<Coefficients<f32>, DspError> {
    let filter = match band_type {
        BandType::LowShelf => Type::LowShelf(gain_db),
        BandType::Peaking => Type::PeakingEQ(gain_db),
        BandType::HighShelf => Type::HighShelf(gain_db),
    };

    Coefficients::<f32>::from_params(filter, sample_rate.hz(), frequency.hz(), Q_BUTTERWORTH_F32)
        .map_err(|_| DspError::InvalidCoefficients {
            frequency,
            sample_rate,
        })
}

/// Live equalizer processor
///
/// Holds the filter state and processes stereo audio.
/// Designed for real-time use: no allocations in `process_*()`.
pub struct Equalizer {
    // Each channel needs its own filter state (stereo = 2 channels)
    filters_left: Vec<DirectForm2Transposed<f32>>,
    filters_right: Vec<DirectForm2Transposed<f32>>,
    frequencies: Vec<f32>,
    sample_rate: f32,
    preamp_linear: f32,
    enabled: bool,
}

impl Equalizer {
    /// Create a flat, enabled equalizer for the given band layout
    pub fn new(sample_rate: f32, frequencies: &[f32]) -> Result<Self, DspError> {
        if sample_rate.is_nan() || sample_rate <= 0.0 {
            return Err(DspError::InvalidSampleRate(sample_rate));
        }

        let coefficients = frequencies
            .iter()
            .enumerate()
            .map(|(i, &frequency)| {
                let band_type = BandType::for_position(i, frequencies.len());
                band_coefficients(frequency, 0.0, band_type, sample_rate)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            filters_left: coefficients.iter().map(|c| DirectForm2Transposed::<f32>::new(*c)).collect(),
            filters_right: coefficients.iter().map(|c| DirectForm2Transposed::<f32>::new(*c)).collect(),
            frequencies: frequencies.to_vec(),
            sample_rate,
            preamp_linear: 1.0,
            enabled: true,
        })
    }

    /// Apply a committed settings set
    ///
    /// Call this between buffer processing, not during.
    /// On error the previous settings stay in effect.
    pub fn apply(&mut self, settings: &EqualizerSettings) -> Result<(), DspError> {
        if settings.gains.len() != self.frequencies.len() {
            return Err(DspError::BandCountMismatch {
                expected: self.frequencies.len(),
                got: settings.gains.len(),
            });
        }

        let band_count = self.frequencies.len();
        let coefficients = self
            .frequencies
            .iter()
            .zip(&settings.gains)
            .enumerate()
            .map(|(i, (&frequency, &gain))| {
                band_coefficients(
                    frequency,
                    gain,
                    BandType::for_position(i, band_count),
                    self.sample_rate,
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        for (i, coeffs) in coefficients.into_iter().enumerate() {
            self.filters_left[i].update_coefficients(coeffs);
            self.filters_right[i].update_coefficients(coeffs);
        }
        self.preamp_linear = db_to_amplitude(settings.preamp);
        self.enabled = settings.enabled;
        Ok(())
    }

    /// Process a stereo sample pair through the EQ chain
    ///
    /// # Real-time Safety
    /// This function performs NO allocations and NO syscalls.
    #[inline]
    pub fn process_sample(&mut self, left: f32, right: f32) -> (f32, f32) {
        if !self.enabled {
            return (left, right);
        }

        let mut l = left * self.preamp_linear;
        let mut r = right * self.preamp_linear;

        for (filter_l, filter_r) in self.filters_left.iter_mut().zip(self.filters_right.iter_mut()) {
            l = filter_l.run(l);
            r = filter_r.run(r);
        }

        (l, r)
    }

    /// Process an interleaved stereo buffer in-place
    ///
    /// Buffer format: [L0, R0, L1, R1, L2, R2, ...]
    #[inline]
    pub fn process_interleaved(&mut self, buffer: &mut [f32]) {
        for frame in buffer.chunks_exact_mut(2) {
            let (l, r) = self.process_sample(frame[0], frame[1]);
            frame[0] = l;
            frame[1] = r;
        }
    }

    pub fn band_count(&self) -> usize {
        self.frequencies.len()
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Reset filter state (clear delay lines)
    ///
    /// Call when switching audio sources to prevent filter ringing
    pub fn reset(&mut self) {
        for filter in self.filters_left.iter_mut().chain(self.filters_right.iter_mut()) {
            filter.reset_state();
        }
    }
}
