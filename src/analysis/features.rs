//! Scalar summary statistics over a decoded waveform.
//!
//! Everything here is a pure function of the samples: frames are analyzed
//! with a Hann window and a real FFT, and each feature is averaged across
//! frames into a single scalar (or short fixed vector).

use realfft::RealFftPlanner;

const FRAME_LEN: usize = 2048;
const HOP_LEN: usize = 512;
const N_MFCC: usize = 13;
const N_MEL_FILTERS: usize = 26;
const N_CONTRAST_BANDS: usize = 7;
// Octave-ish band edges for spectral contrast, Hz. The last band extends to
// Nyquist.
const CONTRAST_EDGES: [f32; 7] = [0.0, 200.0, 400.0, 800.0, 1600.0, 3200.0, 6400.0];
const MIN_BPM: f32 = 30.0;
const MAX_BPM: f32 = 240.0;

/// Fixed vector of summary statistics derived once per audio request.
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureVector {
    pub mfcc_mean: [f32; N_MFCC],
    pub centroid_mean: f32,
    pub contrast_mean: [f32; N_CONTRAST_BANDS],
    pub zcr_mean: f32,
    pub rms_mean: f32,
    /// Tempo estimate in beats per minute; 0.0 when the signal is too short
    /// or too flat to estimate.
    pub tempo: f32,
}

/// Computes the [`FeatureVector`] for a mono waveform.
pub fn extract_features(samples: &[f32], sample_rate: u32) -> FeatureVector {
    let sr = sample_rate.max(1) as f32;
    let mut planner = RealFftPlanner::<f32>::new();
    let fft = planner.plan_fft_forward(FRAME_LEN);
    let window = hann_window(FRAME_LEN);
    let mel_bank = mel_filterbank(sr);

    let mut input = fft.make_input_vec();
    let mut spectrum = fft.make_output_vec();

    let mut frames = 0usize;
    let mut rms_sum = 0f64;
    let mut zcr_sum = 0f64;
    let mut centroid_sum = 0f64;
    let mut centroid_frames = 0usize;
    let mut contrast_sums = [0f64; N_CONTRAST_BANDS];
    let mut mfcc_sums = [0f64; N_MFCC];
    let mut onset_envelope: Vec<f32> = Vec::new();
    let mut prev_magnitudes: Vec<f32> = Vec::new();

    let mut start = 0usize;
    while start < samples.len() {
        let end = (start + FRAME_LEN).min(samples.len());
        let frame = &samples[start..end];
        frames += 1;

        rms_sum += frame_rms(frame) as f64;
        zcr_sum += frame_zcr(frame) as f64;

        for (i, slot) in input.iter_mut().enumerate() {
            let sample = frame.get(i).copied().unwrap_or(0.0);
            *slot = sample * window[i];
        }
        fft.process(&mut input, &mut spectrum)
            .expect("fft buffers sized by the plan");
        let magnitudes: Vec<f32> = spectrum.iter().map(|c| c.norm()).collect();

        if let Some(centroid) = spectral_centroid(&magnitudes, sr) {
            centroid_sum += centroid as f64;
            centroid_frames += 1;
        }
        let contrast = spectral_contrast(&magnitudes, sr);
        for (sum, value) in contrast_sums.iter_mut().zip(contrast) {
            *sum += value as f64;
        }
        let mfcc = frame_mfcc(&magnitudes, &mel_bank);
        for (sum, value) in mfcc_sums.iter_mut().zip(mfcc) {
            *sum += value as f64;
        }

        onset_envelope.push(spectral_flux(&magnitudes, &prev_magnitudes));
        prev_magnitudes = magnitudes;

        start += HOP_LEN;
    }

    if frames == 0 {
        return FeatureVector {
            mfcc_mean: [0.0; N_MFCC],
            centroid_mean: 0.0,
            contrast_mean: [0.0; N_CONTRAST_BANDS],
            zcr_mean: 0.0,
            rms_mean: 0.0,
            tempo: 0.0,
        };
    }

    let n = frames as f64;
    let mut mfcc_mean = [0f32; N_MFCC];
    for (out, sum) in mfcc_mean.iter_mut().zip(mfcc_sums) {
        *out = (sum / n) as f32;
    }
    let mut contrast_mean = [0f32; N_CONTRAST_BANDS];
    for (out, sum) in contrast_mean.iter_mut().zip(contrast_sums) {
        *out = (sum / n) as f32;
    }

    let frame_rate = sr / HOP_LEN as f32;
    FeatureVector {
        mfcc_mean,
        centroid_mean: if centroid_frames > 0 {
            (centroid_sum / centroid_frames as f64) as f32
        } else {
            0.0
        },
        contrast_mean,
        zcr_mean: (zcr_sum / n) as f32,
        rms_mean: (rms_sum / n) as f32,
        tempo: estimate_tempo(&onset_envelope, frame_rate),
    }
}

fn frame_rms(frame: &[f32]) -> f32 {
    if frame.is_empty() {
        return 0.0;
    }
    let sum_sq: f64 = frame.iter().map(|&s| (s as f64) * (s as f64)).sum();
    (sum_sq / frame.len() as f64).sqrt() as f32
}

fn frame_zcr(frame: &[f32]) -> f32 {
    if frame.len() < 2 {
        return 0.0;
    }
    let crossings = frame
        .windows(2)
        .filter(|pair| (pair[0] >= 0.0) != (pair[1] >= 0.0))
        .count();
    crossings as f32 / frame.len() as f32
}

fn spectral_centroid(magnitudes: &[f32], sr: f32) -> Option<f32> {
    let bin_hz = sr / FRAME_LEN as f32;
    let total: f32 = magnitudes.iter().sum();
    if total <= 1e-8 {
        return None;
    }
    let weighted: f32 = magnitudes
        .iter()
        .enumerate()
        .map(|(k, &m)| k as f32 * bin_hz * m)
        .sum();
    Some(weighted / total)
}

/// Peak-to-valley log ratio per frequency band.
fn spectral_contrast(magnitudes: &[f32], sr: f32) -> [f32; N_CONTRAST_BANDS] {
    let bin_hz = sr / FRAME_LEN as f32;
    let nyquist = sr / 2.0;
    let mut out = [0f32; N_CONTRAST_BANDS];
    for (band, slot) in out.iter_mut().enumerate() {
        let lo = CONTRAST_EDGES[band];
        let hi = if band + 1 < CONTRAST_EDGES.len() {
            CONTRAST_EDGES[band + 1].min(nyquist)
        } else {
            nyquist
        };
        let mut band_mags: Vec<f32> = magnitudes
            .iter()
            .enumerate()
            .filter(|(k, _)| {
                let f = *k as f32 * bin_hz;
                f >= lo && f < hi
            })
            .map(|(_, &m)| m)
            .collect();
        if band_mags.is_empty() {
            continue;
        }
        band_mags.sort_by(|a, b| a.total_cmp(b));
        let take = (band_mags.len() / 5).max(1);
        let valley: f32 = band_mags.iter().take(take).sum::<f32>() / take as f32;
        let peak: f32 = band_mags.iter().rev().take(take).sum::<f32>() / take as f32;
        *slot = ((peak + 1e-10) / (valley + 1e-10)).ln();
    }
    out
}

fn frame_mfcc(magnitudes: &[f32], mel_bank: &[Vec<f32>]) -> [f32; N_MFCC] {
    let log_mel: Vec<f32> = mel_bank
        .iter()
        .map(|filter| {
            let energy: f32 = filter
                .iter()
                .zip(magnitudes)
                .map(|(&w, &m)| w * m * m)
                .sum();
            (energy + 1e-10).ln()
        })
        .collect();

    // DCT-II over the log mel energies; the first N_MFCC coefficients.
    let m_total = log_mel.len() as f32;
    let mut coeffs = [0f32; N_MFCC];
    for (n, coeff) in coeffs.iter_mut().enumerate() {
        *coeff = log_mel
            .iter()
            .enumerate()
            .map(|(m, &e)| e * (std::f32::consts::PI * n as f32 * (m as f32 + 0.5) / m_total).cos())
            .sum();
    }
    coeffs
}

fn spectral_flux(magnitudes: &[f32], previous: &[f32]) -> f32 {
    if previous.len() != magnitudes.len() {
        return 0.0;
    }
    magnitudes
        .iter()
        .zip(previous)
        .map(|(&m, &p)| (m - p).max(0.0))
        .sum()
}

/// Picks the autocorrelation lag of the onset envelope with the strongest
/// response inside the 30-240 BPM window.
fn estimate_tempo(onset: &[f32], frame_rate: f32) -> f32 {
    if onset.len() < 4 || frame_rate <= 0.0 {
        return 0.0;
    }
    let mean = onset.iter().sum::<f32>() / onset.len() as f32;
    let centered: Vec<f32> = onset.iter().map(|&v| v - mean).collect();
    let energy: f32 = centered.iter().map(|&v| v * v).sum();
    if energy <= 1e-12 {
        return 0.0;
    }

    let min_lag = ((60.0 * frame_rate / MAX_BPM).round() as usize).max(1);
    let max_lag = ((60.0 * frame_rate / MIN_BPM).round() as usize).min(centered.len() - 1);
    if min_lag > max_lag {
        return 0.0;
    }

    let mut best_lag = 0usize;
    let mut best = f32::MIN;
    for lag in min_lag..=max_lag {
        let score: f32 = centered[lag..]
            .iter()
            .zip(&centered)
            .map(|(&a, &b)| a * b)
            .sum();
        if score > best {
            best = score;
            best_lag = lag;
        }
    }
    if best <= 0.0 || best_lag == 0 {
        return 0.0;
    }
    60.0 * frame_rate / best_lag as f32
}

fn hann_window(len: usize) -> Vec<f32> {
    (0..len)
        .map(|i| {
            let phase = 2.0 * std::f32::consts::PI * i as f32 / len as f32;
            0.5 * (1.0 - phase.cos())
        })
        .collect()
}

fn hz_to_mel(hz: f32) -> f32 {
    2595.0 * (1.0 + hz / 700.0).log10()
}

fn mel_to_hz(mel: f32) -> f32 {
    700.0 * (10f32.powf(mel / 2595.0) - 1.0)
}

/// Triangular mel filterbank over the FFT bins, 0 Hz to Nyquist.
fn mel_filterbank(sr: f32) -> Vec<Vec<f32>> {
    let n_bins = FRAME_LEN / 2 + 1;
    let mel_max = hz_to_mel(sr / 2.0);
    let points: Vec<f32> = (0..N_MEL_FILTERS + 2)
        .map(|i| mel_to_hz(mel_max * i as f32 / (N_MEL_FILTERS + 1) as f32))
        .collect();

    let mut bank = vec![vec![0f32; n_bins]; N_MEL_FILTERS];
    for (m, filter) in bank.iter_mut().enumerate() {
        let lo = points[m];
        let mid = points[m + 1];
        let hi = points[m + 2];
        for (k, weight) in filter.iter_mut().enumerate() {
            let f = k as f32 * sr / FRAME_LEN as f32;
            *weight = if f <= lo || f >= hi {
                0.0
            } else if f <= mid {
                (f - lo) / (mid - lo).max(1e-6)
            } else {
                (hi - f) / (hi - mid).max(1e-6)
            };
        }
    }
    bank
}
