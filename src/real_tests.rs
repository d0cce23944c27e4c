use super::*;
use num_complex::Complex32;

fn assert_close(a: f32, b: f32, tol: f32) {
    assert!((a - b).abs() < tol, "{a} vs {b}");
}

fn assert_cplx_close(a: Complex32, b: Complex32, tol: f32) {
    assert!((a - b).norm() < tol, "{a:?} vs {b:?}");
}

fn test_signal(n: usize) -> Vec<f32> {
    (0..n).map(|i| (i as f32 * 0.37).sin() + 0.2).collect()
}

#[test]
fn format_round_trip_perm() {
    let n = 16;
    let plan = RealPlan::<f32>::new(n, Direction::Both).unwrap();
    let x = test_signal(n);

    let mut spectrum = alloc::vec![Complex32::new(0.0, 0.0); n / 2];
    let mut temp: Vec<f32> = Vec::new();
    plan.execute_forward(&mut spectrum, &x, &mut temp, PackFormat::Perm)
        .unwrap();

    let mut recovered = alloc::vec![0.0f32; n];
    plan.execute_inverse(&mut recovered, &spectrum, &mut temp, PackFormat::Perm)
        .unwrap();

    let scale = (n / 2) as f32;
    for (a, b) in recovered.iter().zip(x.iter()) {
        assert_close(*a, *b * scale, 1e-2);
    }
}

#[test]
fn format_round_trip_ccs() {
    let n = 16;
    let plan = RealPlan::<f32>::new(n, Direction::Both).unwrap();
    let x = test_signal(n);

    let mut spectrum = alloc::vec![Complex32::new(0.0, 0.0); n / 2 + 1];
    let mut temp: Vec<f32> = Vec::new();
    plan.execute_forward(&mut spectrum, &x, &mut temp, PackFormat::CCs)
        .unwrap();

    let mut recovered = alloc::vec![0.0f32; n];
    plan.execute_inverse(&mut recovered, &spectrum, &mut temp, PackFormat::CCs)
        .unwrap();

    let scale = (n / 2) as f32;
    for (a, b) in recovered.iter().zip(x.iter()) {
        assert_close(*a, *b * scale, 1e-2);
    }
}

#[test]
fn ccs_and_perm_agree_on_the_unique_bins() {
    let n = 32;
    let plan = RealPlan::<f32>::new(n, Direction::Forward).unwrap();
    let x = test_signal(n);
    let mut temp: Vec<f32> = Vec::new();

    let mut perm = alloc::vec![Complex32::new(0.0, 0.0); n / 2];
    plan.execute_forward(&mut perm, &x, &mut temp, PackFormat::Perm)
        .unwrap();

    let mut ccs = alloc::vec![Complex32::new(0.0, 0.0); n / 2 + 1];
    plan.execute_forward(&mut ccs, &x, &mut temp, PackFormat::CCs)
        .unwrap();

    assert_close(perm[0].re, ccs[0].re, 1e-4);
    assert_close(perm[0].im, ccs[n / 2].re, 1e-4);
    for i in 1..n / 2 {
        assert_cplx_close(perm[i], ccs[i], 1e-4);
    }
}

#[test]
fn real_to_complex_equivalence() {
    let n = 16;
    let real_plan = RealPlan::<f32>::new(n, Direction::Forward).unwrap();
    let complex_plan = Plan::<f32>::new(n, Direction::Forward).unwrap();
    let x = test_signal(n);
    let mut temp: Vec<f32> = Vec::new();

    let mut ccs = alloc::vec![Complex32::new(0.0, 0.0); n / 2 + 1];
    real_plan
        .execute_forward(&mut ccs, &x, &mut temp, PackFormat::CCs)
        .unwrap();

    let complex_in: Vec<Complex32> = x.iter().map(|v| Complex32::new(*v, 0.0)).collect();
    let mut complex_out = alloc::vec![Complex32::new(0.0, 0.0); n];
    complex_plan
        .execute(&mut complex_out, &complex_in, &mut temp, false)
        .unwrap();

    for i in 0..=n / 2 {
        assert_cplx_close(ccs[i], complex_out[i], 1e-2);
    }
}

#[test]
fn dc_and_nyquist_match_alternating_and_plain_sums() {
    let n = 1024;
    let plan = RealPlan::<f32>::new(n, Direction::Forward).unwrap();
    let x = test_signal(n);
    let mut temp: Vec<f32> = Vec::new();

    let mut ccs = alloc::vec![Complex32::new(0.0, 0.0); n / 2 + 1];
    plan.execute_forward(&mut ccs, &x, &mut temp, PackFormat::CCs)
        .unwrap();

    let sum: f32 = x.iter().sum();
    let alt: f32 = x.iter().enumerate().map(|(n, v)| if n % 2 == 0 { *v } else { -*v }).sum();

    assert_close(ccs[0].re, sum, 1e-1);
    assert_close(ccs[n / 2].re, alt, 1e-1);
}
