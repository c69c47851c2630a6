#[cfg(test)]
#[path = "vitals_test.rs"]
mod tests;

use rand::Rng;

/// Simulated live biometrics. Display only, never persisted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Vitals {
    pub bpm: i32,
    pub spo2: i32,
    pub stress: i32,
}

impl Default for Vitals {
    fn default() -> Vitals {
        return Vitals {
            bpm: 72,
            spo2: 98,
            stress: 24,
        };
    }
}

fn drift<R: Rng>(rng: &mut R, value: i32, min: i32, max: i32) -> i32 {
    let change = rng.gen_range(-1..=1);
    return (value + change).clamp(min, max);
}

impl Vitals {
    /// One random-walk step. SpO2 only moves on roughly one tick in five.
    pub fn step<R: Rng>(&mut self, rng: &mut R) {
        self.bpm = drift(rng, self.bpm, 60, 100);
        if rng.gen_bool(0.2) {
            self.spo2 = drift(rng, self.spo2, 95, 100);
        }
        self.stress = drift(rng, self.stress, 10, 40);
    }

    /// Stress rendered as a ten segment gauge.
    pub fn stress_gauge(&self) -> String {
        let filled = (self.stress / 10) as usize;
        return format!("{}{}", "▮".repeat(filled), "▯".repeat(10 - filled.min(10)));
    }
}
