//! Continuum x-ray emission models. Results are unscaled spectral shapes.

use crate::constants::{BOLTZMANN, ELEMENTARY_CHARGE, PLANCK, SPEED_OF_LIGHT};

/// Free-free emission of an optically thin plasma in thermal equilibrium.
pub fn thermal_bremsstrahlung(wavelength_nm: f64, temperature_k: f64) -> f64 {
    let kt = BOLTZMANN * temperature_k;
    let frequency = SPEED_OF_LIGHT / (wavelength_nm * 1e-9);
    (1.0 / kt).sqrt()
        * (-PLANCK * frequency / kt).exp()
        * gaunt_factor(wavelength_nm, temperature_k)
}

/// Quantum mechanical correction to thermal bremsstrahlung
/// (Mewe et al. 1985, A&AS 62, 197).
pub fn gaunt_factor(wavelength_nm: f64, temperature_k: f64) -> f64 {
    let t_mk = temperature_k * 1e-6;
    let wavelength_angstrom = wavelength_nm * 10.0;
    27.83 * (t_mk + 0.65).powf(-1.33) + 0.15 * wavelength_angstrom.powf(0.34) * t_mk.powf(0.422)
}

/// Kramers' law for the continuum of an x-ray tube, in 1/nm².
/// Zero at wavelengths shorter than the Duane-Hunt cutoff.
pub fn xray_tube_emission(wavelength_nm: f64, voltage_v: f64) -> f64 {
    let f = (wavelength_nm / cutoff_wavelength_nm(voltage_v) - 1.0) / wavelength_nm.powi(2);
    f.max(0.0)
}

pub fn xray_tube_emission_many(wavelengths_nm: &[f64], voltage_v: f64) -> Vec<f64> {
    wavelengths_nm
        .iter()
        .map(|&w| xray_tube_emission(w, voltage_v))
        .collect()
}

/// Duane-Hunt limit: shortest wavelength emitted by a tube at `voltage_v`.
pub fn cutoff_wavelength_nm(voltage_v: f64) -> f64 {
    PLANCK * SPEED_OF_LIGHT / (ELEMENTARY_CHARGE * voltage_v) * 1e9
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cutoff_wavelength() {
        // 12.398 keV photon is 0.1 nm
        assert_relative_eq!(cutoff_wavelength_nm(12_398.42), 0.1, max_relative = 1e-5);
    }

    #[test]
    fn test_kramers_zero_below_cutoff() {
        let cutoff = cutoff_wavelength_nm(30_000.0);
        assert_eq!(xray_tube_emission(0.5 * cutoff, 30_000.0), 0.0);
        assert_eq!(xray_tube_emission(cutoff, 30_000.0), 0.0);
        assert!(xray_tube_emission(2.0 * cutoff, 30_000.0) > 0.0);
    }

    #[test]
    fn test_tube_spectrum_over_wavelengths() {
        let cutoff = cutoff_wavelength_nm(50_000.0);
        let wavelengths = [0.5 * cutoff, 1.5 * cutoff, 2.0 * cutoff, 4.0 * cutoff];
        let spectrum = xray_tube_emission_many(&wavelengths, 50_000.0);
        assert_eq!(spectrum.len(), wavelengths.len());
        assert_eq!(spectrum[0], 0.0);
        for (w, f) in wavelengths.iter().zip(&spectrum) {
            assert_eq!(*f, xray_tube_emission(*w, 50_000.0));
        }
        // Kramers' law peaks at twice the cutoff wavelength
        assert!(spectrum[2] > spectrum[1] && spectrum[2] > spectrum[3]);
    }

    #[test]
    fn test_gaunt_factor_value() {
        // 10 MK, 1 nm
        let expected =
            27.83 * 10.65_f64.powf(-1.33) + 0.15 * 10.0_f64.powf(0.34) * 10.0_f64.powf(0.422);
        assert_relative_eq!(gaunt_factor(1.0, 1e7), expected, max_relative = 1e-12);
    }

    #[test]
    fn test_bremsstrahlung_falls_with_energy() {
        let soft = thermal_bremsstrahlung(1.0, 1e7);
        let hard = thermal_bremsstrahlung(0.1, 1e7);
        assert!(soft > hard);
        assert!(hard > 0.0);
    }
}
