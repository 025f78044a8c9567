/// Maps a galactic stellar mass onto the central black hole and nuclear star
/// cluster masses used to seed the simulator. All masses are in solar masses.
pub trait ScalingRelations {
    /// Supermassive black hole mass hosted by a galaxy of stellar mass `m_star`.
    fn smbh_mass(&self, m_star: f64) -> f64;

    /// Nuclear star cluster mass for an early-type host.
    fn early_nsc_mass(&self, m_star: f64) -> f64;

    /// Nuclear star cluster mass for a late-type host.
    fn late_nsc_mass(&self, m_star: f64) -> f64;
}

/// Power-law fits of the form `log10 y = slope * log10(m_star / pivot) + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PowerLaw {
    slope: f64,
    intercept: f64,
    pivot: f64,
}

impl PowerLaw {
    fn eval(&self, m_star: f64) -> f64 {
        10f64.powf(self.slope * (m_star / self.pivot).log10() + self.intercept)
    }
}

/// Literature sources of [`StandardRelations`], black hole relation first.
pub const RELATION_CITATIONS: [&str; 2] = [
    "smbh: Schramm & Silverman 2013",
    "nsc: Neumayer, Seth & Boeker 2020",
];

/// Schramm & Silverman (2013) for black holes, Neumayer, Seth & Böker (2020)
/// for nuclear star clusters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StandardRelations;

const SMBH: PowerLaw = PowerLaw {
    slope: 1.12,
    intercept: -4.12,
    pivot: 1.0,
};

const NSC_EARLY: PowerLaw = PowerLaw {
    slope: 0.48,
    intercept: 6.51,
    pivot: 1e9,
};

const NSC_LATE: PowerLaw = PowerLaw {
    slope: 0.92,
    intercept: 6.13,
    pivot: 1e9,
};

impl ScalingRelations for StandardRelations {
    fn smbh_mass(&self, m_star: f64) -> f64 {
        SMBH.eval(m_star)
    }

    fn early_nsc_mass(&self, m_star: f64) -> f64 {
        NSC_EARLY.eval(m_star)
    }

    fn late_nsc_mass(&self, m_star: f64) -> f64 {
        NSC_LATE.eval(m_star)
    }
}
