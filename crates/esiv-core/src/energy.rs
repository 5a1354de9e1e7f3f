// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — ESIV Energy Normalization
// ─────────────────────────────────────────────────────────────────────
//! Energy is the normalized load of a turn. The monitor either supplies
//! it precomputed or hands over raw token length and latency, which are
//! folded into [0, 1] with the constants in [`EnergyNorm`].

use serde::{Deserialize, Serialize};

use esiv_types::{EnergyNorm, GovernorError, GovernorResult};

/// Where the Energy of a turn comes from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EnergySource {
    /// Precomputed E, clamped to [0, 1] on use.
    Direct(f64),
    /// Raw interaction cost, normalized with [`compute_energy`].
    Normalized { token_len: u64, latency_s: f64 },
}

impl EnergySource {
    /// Pick the source from optional caller arguments: either a
    /// precomputed E, or both token length and latency. Anything else is
    /// ambiguous or incomplete and is rejected.
    pub fn from_parts(
        energy: Option<f64>,
        token_len: Option<u64>,
        latency_s: Option<f64>,
    ) -> GovernorResult<Self> {
        match (energy, token_len, latency_s) {
            (Some(e), None, None) => Ok(EnergySource::Direct(e)),
            (None, Some(token_len), Some(latency_s)) => Ok(EnergySource::Normalized {
                token_len,
                latency_s,
            }),
            (Some(_), _, _) => Err(GovernorError::Validation(
                "pass either energy or token_len/latency_s, not both".into(),
            )),
            _ => Err(GovernorError::Validation(
                "either energy or both token_len and latency_s are required".into(),
            )),
        }
    }

    /// Resolve to an Energy value in [0, 1] (NaN passes through).
    pub fn resolve(&self, norm: &EnergyNorm) -> f64 {
        match *self {
            EnergySource::Direct(e) => e.clamp(0.0, 1.0),
            EnergySource::Normalized {
                token_len,
                latency_s,
            } => compute_energy(token_len, latency_s, norm),
        }
    }
}

/// Direct-Energy variant:
/// `E = clamp(α_L · min(tokens / max_tokens, 1) + α_C · min(latency / max_latency, 1), 0, 1)`.
///
/// Negative latency counts as zero.
pub fn compute_energy(token_len: u64, latency_s: f64, norm: &EnergyNorm) -> f64 {
    let length_load = (token_len as f64 / norm.max_token_norm).min(1.0);
    let compute_load = (latency_s.max(0.0) / norm.max_latency_norm).min(1.0);
    (norm.alpha_l * length_load + norm.alpha_c * compute_load).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parts_direct_and_normalized() {
        assert_eq!(
            EnergySource::from_parts(Some(0.4), None, None).unwrap(),
            EnergySource::Direct(0.4)
        );
        assert_eq!(
            EnergySource::from_parts(None, Some(100), Some(2.0)).unwrap(),
            EnergySource::Normalized {
                token_len: 100,
                latency_s: 2.0
            }
        );
    }

    #[test]
    fn test_from_parts_rejects_energy_with_raw_cost() {
        for (tokens, latency) in [(Some(100), None), (None, Some(2.0)), (Some(100), Some(2.0))] {
            let err = EnergySource::from_parts(Some(0.4), tokens, latency).unwrap_err();
            assert!(matches!(err, GovernorError::Validation(_)));
            assert!(err.to_string().contains("not both"), "{err}");
        }
    }

    #[test]
    fn test_from_parts_rejects_missing_args() {
        for (tokens, latency) in [(None, None), (Some(100), None), (None, Some(2.0))] {
            let err = EnergySource::from_parts(None, tokens, latency).unwrap_err();
            assert!(err.to_string().contains("required"), "{err}");
        }
    }

    #[test]
    fn test_zero_load() {
        assert_eq!(compute_energy(0, 0.0, &EnergyNorm::default()), 0.0);
    }

    #[test]
    fn test_half_load() {
        // 2048/4096 = 0.5, 15/30 = 0.5 → 0.5*0.5 + 0.5*0.5 = 0.5
        let e = compute_energy(2048, 15.0, &EnergyNorm::default());
        assert!((e - 0.5).abs() < 1e-12, "E={e}");
    }

    #[test]
    fn test_saturates_at_one() {
        let e = compute_energy(1_000_000, 1e6, &EnergyNorm::default());
        assert!((e - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_overweighted_norm_still_clamped() {
        let norm = EnergyNorm {
            alpha_l: 1.0,
            alpha_c: 1.0,
            ..Default::default()
        };
        assert_eq!(compute_energy(8192, 60.0, &norm), 1.0);
    }

    #[test]
    fn test_negative_latency_is_zero() {
        let e = compute_energy(0, -5.0, &EnergyNorm::default());
        assert_eq!(e, 0.0);
    }

    #[test]
    fn test_direct_source_clamped() {
        let norm = EnergyNorm::default();
        assert_eq!(EnergySource::Direct(1.7).resolve(&norm), 1.0);
        assert_eq!(EnergySource::Direct(-0.2).resolve(&norm), 0.0);
        assert!((EnergySource::Direct(0.6).resolve(&norm) - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_normalized_source_matches_function() {
        let norm = EnergyNorm::default();
        let src = EnergySource::Normalized {
            token_len: 1024,
            latency_s: 3.0,
        };
        assert_eq!(src.resolve(&norm), compute_energy(1024, 3.0, &norm));
    }
}
