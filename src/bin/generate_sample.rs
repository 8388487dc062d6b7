use anyhow::{Context, Result};

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

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Inclusive integer range.
    fn range(&mut self, lo: u32, hi: u32) -> u32 {
        lo + (self.next_u64() % u64::from(hi - lo + 1)) as u32
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "crimedata.csv".to_string());

    // (name, easting centroid, northing centroid, relative incident rate)
    let neighbourhoods: [(&str, f64, f64, f64); 6] = [
        ("Central Business District", 491_500.0, 5_459_100.0, 3.0),
        ("West End", 490_300.0, 5_459_600.0, 1.6),
        ("Strathcona", 492_700.0, 5_458_500.0, 1.2),
        ("Kitsilano", 488_400.0, 5_457_900.0, 1.0),
        ("Sunset", 492_200.0, 5_453_500.0, 0.8),
        ("Dunbar-Southlands", 486_700.0, 5_454_700.0, 0.4),
    ];

    let crime_types: [(&str, f64); 5] = [
        ("Theft from Vehicle", 3.0),
        ("Mischief", 2.0),
        ("Break and Enter Residential/Other", 1.5),
        ("Offence Against a Person", 1.0),
        ("Theft of Bicycle", 0.8),
    ];

    let streets = ["NICOLA ST", "MAIN ST", "W 4TH AVE", "FRASER ST", "DUNBAR ST"];

    let mut writer =
        csv::Writer::from_path(&output_path).with_context(|| format!("creating {output_path}"))?;
    writer.write_record([
        "TYPE",
        "YEAR",
        "MONTH",
        "DAY",
        "HOUR",
        "MINUTE",
        "HUNDRED_BLOCK",
        "NEIGHBOURHOOD",
        "X",
        "Y",
    ])?;

    let mut rows: usize = 0;
    for year in 2017..=2022u32 {
        // The trailing year stops in May, like a mid-year export; the loader
        // is expected to discard it wholesale.
        let last_month = if year == 2022 { 5 } else { 12 };

        for month in 1..=last_month {
            for &(nhood, cx, cy, nhood_rate) in &neighbourhoods {
                for &(crime, type_rate) in &crime_types {
                    let expected = 4.0 * nhood_rate * type_rate;
                    let n = (expected * (0.75 + 0.5 * rng.next_f64())).round() as usize;

                    for _ in 0..n {
                        let day = rng.range(1, 28);
                        let hour = rng.range(0, 23);
                        let minute = rng.range(0, 59);
                        let block = format!(
                            "{}XX {}",
                            rng.range(1, 99),
                            streets[(rng.next_u64() % streets.len() as u64) as usize]
                        );

                        // A small slice of rows mimic the export's withheld
                        // locations and blank fields.
                        let withheld = rng.next_f64() < 0.02;
                        let (x, y) = if withheld {
                            (0.0, 0.0)
                        } else {
                            (rng.gauss(cx, 350.0), rng.gauss(cy, 350.0))
                        };
                        let nhood_field = if rng.next_f64() < 0.01 { "" } else { nhood };

                        writer.write_record([
                            crime.to_string(),
                            year.to_string(),
                            month.to_string(),
                            day.to_string(),
                            hour.to_string(),
                            minute.to_string(),
                            block,
                            nhood_field.to_string(),
                            format!("{x:.1}"),
                            format!("{y:.1}"),
                        ])?;
                        rows += 1;
                    }
                }
            }
        }
    }

    writer.flush().context("flushing CSV writer")?;
    println!("Wrote {rows} records to {output_path}");
    Ok(())
}
