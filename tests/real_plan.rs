//! Cross-module properties tying `RealPlan` back to `Plan` (§8).

use num_complex::Complex32;
use rs_planned_fft::{Direction, PackFormat, Plan, RealPlan};

struct Xorshift64(u64);

impl Xorshift64 {
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    fn next_f32(&mut self) -> f32 {
        ((self.next_u64() >> 40) as f32 / (1u32 << 24) as f32) * 2.0 - 1.0
    }
}

fn test_signal(n: usize, seed: u64) -> Vec<f32> {
    let mut rng = Xorshift64(seed);
    (0..n).map(|_| rng.next_f32()).collect()
}

const SIZES: [usize; 5] = [4, 16, 64, 1024, 4096];

#[test]
fn real_to_complex_equivalence_ccs_and_perm() {
    for &n in &SIZES {
        let real_plan = RealPlan::<f32>::new(n, Direction::Forward).unwrap();
        let complex_plan = Plan::<f32>::new(n, Direction::Forward).unwrap();
        let x = test_signal(n, 0xabcd ^ n as u64);
        let mut temp: Vec<f32> = Vec::new();

        let complex_in: Vec<Complex32> = x.iter().map(|v| Complex32::new(*v, 0.0)).collect();
        let mut complex_out = vec![Complex32::new(0.0, 0.0); n];
        complex_plan
            .execute(&mut complex_out, &complex_in, &mut temp, false)
            .unwrap();

        let mut ccs = vec![Complex32::new(0.0, 0.0); n / 2 + 1];
        real_plan
            .execute_forward(&mut ccs, &x, &mut temp, PackFormat::CCs)
            .unwrap();
        for i in 0..=n / 2 {
            assert!((ccs[i] - complex_out[i]).norm() < 1e-2, "n={n} CCs i={i}");
        }

        let mut perm = vec![Complex32::new(0.0, 0.0); n / 2];
        real_plan
            .execute_forward(&mut perm, &x, &mut temp, PackFormat::Perm)
            .unwrap();
        assert!((perm[0].re - complex_out[0].re).abs() < 1e-2, "n={n} perm DC");
        assert!((perm[0].im - complex_out[n / 2].re).abs() < 1e-2, "n={n} perm Nyquist");
        for i in 1..n / 2 {
            assert!((perm[i] - complex_out[i]).norm() < 1e-2, "n={n} perm i={i}");
        }
    }
}

#[test]
fn format_round_trip_holds_across_sizes() {
    for &n in &SIZES {
        let plan = RealPlan::<f32>::new(n, Direction::Both).unwrap();
        let x = test_signal(n, 0x5a5a ^ n as u64);
        let mut temp: Vec<f32> = Vec::new();
        let scale = (n / 2) as f32;

        for fmt in [PackFormat::Perm, PackFormat::CCs] {
            let len = match fmt {
                PackFormat::Perm => n / 2,
                PackFormat::CCs => n / 2 + 1,
            };
            let mut spectrum = vec![Complex32::new(0.0, 0.0); len];
            plan.execute_forward(&mut spectrum, &x, &mut temp, fmt).unwrap();

            let mut recovered = vec![0.0f32; n];
            plan.execute_inverse(&mut recovered, &spectrum, &mut temp, fmt).unwrap();

            for (a, b) in recovered.iter().zip(x.iter()) {
                assert!((*a - *b * scale).abs() < 1e-1, "n={n} fmt={fmt:?}");
            }
        }
    }
}
