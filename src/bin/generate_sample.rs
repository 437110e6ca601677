//! Writes `sample_transactions.csv`: a deterministic insider-transaction
//! table with realistic rows plus the kinds of defects the live sheet has
//! (blank names, unparseable share counts, missing prices, empty lines).

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

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

fn main() {
    let mut rng = SimpleRng::new(42);

    let insiders: &[(&str, &str, &str)] = &[
        ("Jane Doe", "Acme Corp", "CEO"),
        ("John Smith", "Acme Corp", "CFO"),
        ("Maria Garcia", "Globex Industries", "Director"),
        ("Wei Chen", "Globex Industries", "Director"),
        ("Priya Patel", "Initech Software", "General Counsel"),
        ("Liam O'Brien", "Umbrella Health", "10% Owner"),
        ("Sofia Rossi", "Umbrella Health", "Director"),
    ];
    let codes = ["P", "S", "A", "M", "G"];
    let ownership = ["D", "I", "D", "D", "I", "By Trust"];

    let output_path = "sample_transactions.csv";
    let mut writer = csv::Writer::from_path(output_path)
        .expect("Failed to create output file");
    writer
        .write_record([
            "Insider Name",
            "Issuer",
            "Transaction Code",
            "Shares",
            "Price per Share",
            "Ownership Type",
            "Insider Role",
        ])
        .expect("Failed to write header");

    let rows = 60;
    for i in 0..rows {
        let &(name, issuer, role) = rng.pick(insiders);
        let code = *rng.pick(&codes);
        let own = *rng.pick(&ownership);

        // Log-uniform share counts spanning all histogram buckets.
        let magnitude = 2.0 + rng.next_f64() * 4.0;
        let shares = format!("{:.0}", 10f64.powf(magnitude));
        let price = format!("{:.2}", 2.0 + rng.next_f64() * 650.0);

        // Deliberate defects, same flavors as the live sheet.
        let name = if i % 9 == 3 { "" } else { name };
        let shares = if i % 13 == 5 { "n/a".to_string() } else { shares };
        let price = if i % 7 == 2 { String::new() } else { price };
        let role = if i % 11 == 4 { "  " } else { role };

        writer
            .write_record([name, issuer, code, shares.as_str(), price.as_str(), own, role])
            .expect("Failed to write row");

        if i == rows / 2 {
            // One fully blank line; the loader skips it.
            writer
                .write_record(["", "", "", "", "", "", ""])
                .expect("Failed to write blank row");
        }
    }

    writer.flush().expect("Failed to flush output");
    println!("Wrote {rows} transactions to {output_path}");
}
