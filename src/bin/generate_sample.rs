use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};

use csvfilter::data::model::DOB_FORMAT;

const FIRST_NAMES: [&str; 12] = [
    "Jane", "Jon", "Maria", "Wei", "Amara", "Lucas", "Priya", "Tomasz", "Aiko", "Omar", "Grace",
    "Diego",
];

const LAST_NAMES: [&str; 10] = [
    "Doe", "Smith", "Roe", "Garcia", "Chen", "Okafor", "Novak", "Tanaka", "Haddad", "Silva",
];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    /// Uniform index in `0..n`.
    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.below(items.len())]
    }
}

fn main() -> Result<()> {
    let output_path: PathBuf = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("example_input.csv"));

    let mut rng = SimpleRng::new(42);

    // Birth dates spread over roughly sixty years from 1950
    let earliest = NaiveDate::from_ymd_opt(1950, 1, 1).context("invalid start date")?;
    let span_days = 60 * 365;

    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {}", output_path.display()))?;
    writer.write_record(["first_name", "last_name", "dob"])?;

    let rows = 200;
    for _ in 0..rows {
        let first_name = rng.pick(&FIRST_NAMES);
        let last_name = rng.pick(&LAST_NAMES);
        let dob = earliest + Duration::days(rng.below(span_days) as i64);
        let dob = dob.format(DOB_FORMAT).to_string();
        writer.write_record([first_name, last_name, dob.as_str()])?;
    }
    writer.flush()?;

    println!("Wrote {rows} people to {}", output_path.display());
    Ok(())
}
