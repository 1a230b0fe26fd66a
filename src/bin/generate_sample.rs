use std::fs::File;
use std::io::{BufWriter, Write};

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

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

const GEARS: [&str; 7] = [
    "Neutral", "1st gear", "2nd gear", "3rd gear", "4th gear", "5th gear", "6th gear",
];

/// Header row: every decoded column kind, plus a repeated `MAP(kPa)`.
const HEADER: &str = "time(ms);RPM;M_GEAR;COMP_BPV;EGR_ERR#1(%);MAP(kPa);MAP(kPa);COOLANT(C)";

fn main() -> std::io::Result<()> {
    let mut rng = SimpleRng::new(42);
    let output_path = "sample_log.csv";
    let mut out = BufWriter::new(File::create(output_path)?);

    write!(out, "{HEADER}\r\n")?;

    let rows = 6000;
    let mut gear = 0usize;
    for i in 0..rows {
        let time_ms = i * 50;
        let t = time_ms as f64 / 1000.0;

        // Shift up every 20 s, back to neutral after sixth.
        if i % 400 == 0 && i > 0 {
            gear = (gear + 1) % GEARS.len();
        }

        let rpm = 900.0 + 2500.0 * (t / 3.0).sin().abs() + rng.gauss(0.0, 25.0);
        let boost = rpm > 2500.0;
        let bpv = if boost { "ON" } else { "OFF" };
        let egr = if boost { 99.22 } else { 40.0 + rng.gauss(0.0, 5.0) };
        let map = 100.0 + if boost { (rpm - 2500.0) * 0.08 } else { 0.0 };
        let map_2 = map + rng.gauss(0.0, 1.5);
        let coolant = 20.0 + 70.0 * (1.0 - (-t / 120.0).exp());

        // Every 997th row the logger drops the trailing fields.
        if i % 997 == 996 {
            write!(out, "{time_ms};{rpm:.0};{}\r\n", GEARS[gear])?;
            continue;
        }

        write!(
            out,
            "{time_ms};{rpm:.0};{};{bpv};{egr:.2};{map:.1};{map_2:.1};{coolant:.1}\r\n",
            GEARS[gear]
        )?;
    }
    out.flush()?;

    println!("Wrote {rows} rows to {output_path}");
    Ok(())
}
