/// Piecewise-linear interpolator in (log10 x, log10 y) space.
///
/// Between two samples the interpolant is a power law, which is how
/// attenuation coefficients behave between tabulated energies.
/// `xp` must be strictly increasing and all values must be positive.
#[derive(Debug, Clone)]
pub struct LogLogInterpolator {
    log_x: Vec<f64>,
    log_y: Vec<f64>,
    x_min: f64,
    x_max: f64,
}

impl LogLogInterpolator {
    pub fn new(xp: &[f64], fp: &[f64]) -> Self {
        debug_assert_eq!(xp.len(), fp.len());
        debug_assert!(
            xp.windows(2).all(|w| w[0] < w[1]),
            "xp must be strictly increasing"
        );
        LogLogInterpolator {
            log_x: xp.iter().map(|v| v.log10()).collect(),
            log_y: fp.iter().map(|v| v.log10()).collect(),
            x_min: xp[0],
            x_max: xp[xp.len() - 1],
        }
    }

    /// The tabulated domain `[x_min, x_max]`.
    pub fn domain(&self) -> (f64, f64) {
        (self.x_min, self.x_max)
    }

    pub fn contains(&self, x: f64) -> bool {
        x >= self.x_min && x <= self.x_max
    }

    /// Evaluate at `x`. Outside the domain the boundary value is returned;
    /// callers that must reject such energies check [`contains`](Self::contains).
    pub fn evaluate(&self, x: f64) -> f64 {
        10f64.powf(self.segment(x.log10()))
    }

    fn segment(&self, lx: f64) -> f64 {
        let (xp, fp) = (&self.log_x, &self.log_y);
        let last = xp.len() - 1;
        if lx <= xp[0] {
            return fp[0];
        }
        if lx >= xp[last] {
            return fp[last];
        }

        let hi = xp.partition_point(|&v| v < lx);
        // exact knot
        if xp[hi] == lx {
            return fp[hi];
        }

        let lo = hi - 1;
        let t = (lx - xp[lo]) / (xp[hi] - xp[lo]);
        fp[lo] + t * (fp[hi] - fp[lo])
    }
}
