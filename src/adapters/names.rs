use crate::domain::ports::NameGenerator;
use crate::utils::error::{AnnuaireError, Result};
use fake::faker::name::raw::{FirstName, LastName};
use fake::locales::FR_FR as FakerFrFr;
use fake::Fake;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::{Mutex, MutexGuard};

pub const FR_FR: &str = "fr_FR";

pub const SUPPORTED_LOCALES: &[&str] = &[FR_FR];

/// French first and last names from the `fake` fr_FR locale.
pub struct FrenchNameGenerator {
    rng: Mutex<StdRng>,
}

impl FrenchNameGenerator {
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_os_rng())
    }

    /// Same seed, same names; used by tests and reproducible fixture runs.
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    /// Only `fr_FR` is available; `seed` makes the output reproducible.
    pub fn for_locale(locale: &str, seed: Option<u64>) -> Result<Self> {
        if locale != FR_FR {
            return Err(AnnuaireError::generator(format!(
                "unsupported locale '{locale}', available: {}",
                SUPPORTED_LOCALES.join(", ")
            )));
        }
        Ok(seed.map_or_else(Self::new, Self::seeded))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            rng: Mutex::new(rng),
        }
    }

    fn rng(&self) -> Result<MutexGuard<'_, StdRng>> {
        self.rng
            .lock()
            .map_err(|_| AnnuaireError::generator("random source poisoned"))
    }
}

impl Default for FrenchNameGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl NameGenerator for FrenchNameGenerator {
    fn locale(&self) -> &str {
        FR_FR
    }

    fn first_name(&self) -> Result<String> {
        let mut rng = self.rng()?;
        Ok(FirstName(FakerFrFr).fake_with_rng(&mut *rng))
    }

    fn last_name(&self) -> Result<String> {
        let mut rng = self.rng()?;
        Ok(LastName(FakerFrFr).fake_with_rng(&mut *rng))
    }
}
