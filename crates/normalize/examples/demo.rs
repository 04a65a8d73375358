use normalize::{normalize_debug, Matcher, NormalizeConfig};

#[derive(Debug)]
#[allow(dead_code)]
struct Sample {
    id: u32,
    path: std::path::PathBuf,
    values: Vec<f64>,
}

fn main() {
    let sample = Sample {
        id: 7,
        path: "/usr/bin/bash".into(),
        values: vec![1.0, std::f64::consts::PI, 7.5, std::f64::consts::SQRT_2],
    };

    let cfg = NormalizeConfig::default().with_replacement(Matcher::literal("Sample"), "S");
    let form = normalize_debug(&sample, &cfg).expect("normalization succeeds");

    println!("canonical: {}", form.text());
    println!();
    println!("tokens: {:?}", form.tokens());
}
